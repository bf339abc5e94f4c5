use dioxus_logger::tracing::Level;

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    dioxus_logger::init(Level::INFO).expect("failed to init logger");
    dioxus_logger::tracing::info!("starting Babylon Explorer (web)");
    dioxus::launch(ui::App);
}
