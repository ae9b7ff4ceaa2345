use log::info;
use std::net::TcpListener;
use stockprices::config::Config;
use stockprices::{build_likes_client, build_quotes_client, run};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env()?;

    let quotes_client = build_quotes_client(&config)?;

    let likes_client = build_likes_client(&config).await;

    let listener = TcpListener::bind(("0.0.0.0", config.server_port))?;

    info!("Listening on port {}", config.server_port);

    run(listener, quotes_client, likes_client)?.await?;

    Ok(())
}
