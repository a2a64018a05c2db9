use anyhow::Context;
use tracing_subscriber::EnvFilter;

mod config;
mod console;

pub fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = config::load().context("loading configuration")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.tracing.filter)),
        )
        .with_writer(std::io::stderr)
        .init();
    let store = brgy_db::create(&config.database).context("opening resident database")?;
    let registry = brgy_registry::Registry::new(store);
    let navigator = brgy_registry::navigation::Navigator::new(config.admin);
    let stdin = std::io::stdin();
    console::Console::new(registry, navigator, stdin.lock(), std::io::stdout())
        .run()
        .context("running console")
}
