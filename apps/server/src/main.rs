use anyhow::Context;
use orc::domain::config::AppConfig;
use orc::kernel::config::load_config;
use orc_logger::Logger;
use orc_server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg: AppConfig =
        load_config(None::<&str>).context("Critical: Configuration is malformed")?;

    let _log = Logger::builder()
        .name(env!("CARGO_PKG_NAME"))
        .filter(&cfg.logging.level)
        .json(cfg.logging.json)
        .directory(cfg.logging.dir.as_ref())
        .init()?;

    Server::builder().config(cfg).build().await?.run().await
}
