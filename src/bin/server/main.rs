use servicemanual::config::Config;
use servicemanual::domain::device::service::Service;
use servicemanual::inbound::http::{HttpServer, HttpServerConfig};
use servicemanual::outbound::sqlite::Sqlite;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt::init();

    let sqlite = Sqlite::new(&config.database_url).await?;
    let device_service = Service::new(sqlite);

    let server_config = HttpServerConfig {
        port: &config.server_port,
    };

    let http_server = HttpServer::new(device_service, server_config).await?;

    http_server.run().await
}
