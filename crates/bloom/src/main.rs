use bloom::config;
use bloom::gui::app::AppModel;
use bloom::gui::dial::Dial;
use bloom::sys::runtime;
use relm4::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = config::load_or_default();
    let dial = Dial::from_config(&config)?;

    let (tx, rx) = async_channel::bounded(32);

    runtime::start_background_services(tx);

    let app = RelmApp::new("org.bloom.dial");
    app.run::<AppModel>((dial, rx));
    Ok(())
}
