use std::path::Path;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use stardust_core::AppConfig;
use stardust_ui::run_app;

fn main() {
    // Init logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter("info")
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    info!("Stardust starting");
    let config = match AppConfig::load(Path::new("stardust.toml")) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Stardust config error: {e}");
            return;
        }
    };
    if let Err(e) = run_app(config) {
        eprintln!("Stardust error: {e}");
    }
}
