use triptych::{AppConfig, run};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("starting triptych");
    run(AppConfig::new().title("Triptych").size(1280, 720));
}
