/// Events produced off the GTK main loop and forwarded to the app.
#[derive(Debug, Clone)]
pub enum AppEvent {
    ConfigReload,
}
