use log::{error, info};
use pizza_delivery_server::{config::ServerConfig, server::run_server};

#[actix_web::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();
    let config = ServerConfig::from_env_or_default();
    info!("🚀️ Starting the pizza delivery server on {}:{}", config.host, config.port);
    match run_server(config).await {
        Ok(()) => info!("🚀️ The pizza delivery server has shut down. Goodbye."),
        Err(e) => error!("🚀️ The pizza delivery server met an untimely end. {e}"),
    }
}
