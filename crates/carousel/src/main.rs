use carousel::config;
use carousel::gui::app::AppModel;
use carousel::gui::stage::Stage;
use carousel::sys::runtime;
use relm4::prelude::*;

fn main() {
    env_logger::init();

    let config = config::load_or_setup();
    let config_dir = config::get_config_dir().unwrap_or_default();
    let stage = Stage::from_config(&config, &config_dir);
    log::info!("Starting with {} slides", stage.len());

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.turntable.carousel");

    app.run::<AppModel>((stage, config_dir, rx));
}
