use crate::events::AppEvent;
use async_channel::Sender;
use std::thread;
use tokio::runtime::Runtime;

/// Runs the config watcher on its own tokio runtime so the GTK main loop
/// never blocks on file-system notifications.
pub fn start_background_services(tx: Sender<AppEvent>) {
    thread::spawn(move || match Runtime::new() {
        Ok(rt) => rt.block_on(crate::config::run_async_watcher(tx)),
        Err(e) => log::error!("Failed to create Tokio runtime, config reload disabled: {}", e),
    });
}
