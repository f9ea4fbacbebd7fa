use anyhow::Context;
use atlas::domain::config::ApiConfig;
use atlas::kernel::config::load_config;
use atlas_logger::{LevelFilter, Logger};
use atlas_server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg: ApiConfig =
        load_config(Some("server")).context("Critical: Configuration is malformed")?;

    let level = cfg.logging.level.parse::<LevelFilter>().context("Invalid logging.level")?;
    let mut logger = Logger::builder().name(env!("CARGO_PKG_NAME")).level(level).json(cfg.logging.json);
    if let Some(directory) = &cfg.logging.directory {
        logger = logger.directory(directory);
    }
    if let Some(filter) = &cfg.logging.filter {
        logger = logger.env_filter(filter);
    }
    let _log = logger.init()?;

    Server::builder().config(cfg).build().await?.run().await
}
