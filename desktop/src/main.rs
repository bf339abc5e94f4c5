use dioxus::desktop::Config;
use dioxus::desktop::WindowBuilder;
use dioxus_logger::tracing::Level;

fn main() {
    dioxus_logger::init(Level::INFO).expect("failed to init logger");
    dioxus_logger::tracing::info!("starting Babylon Explorer (desktop)");

    let window = WindowBuilder::new()
        .with_title("Babylon Explorer")
        .with_resizable(true);

    dioxus::LaunchBuilder::desktop()
        .with_cfg(Config::new().with_window(window))
        .launch(ui::App);
}
