pub mod config;
pub mod errors;
pub mod routes;
use crate::config::{Config, StoreBackend};
use actix_web::dev::Server;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use anyhow::Result;
use log::{info, warn};
use std::net::TcpListener;
use std::sync::Arc;
use stockchecker::likes::{
    Client as LikesClient, Interface as LikesInterface, MemoryClient as MemoryLikesClient,
};
use stockchecker::quotes::{Client as QuotesClient, Interface as QuotesInterface};

pub fn run(
    listener: TcpListener,
    quotes_client: Arc<dyn QuotesInterface>,
    likes_client: Arc<dyn LikesInterface>,
) -> Result<Server> {
    let quotes_client = web::Data::new(quotes_client);

    let likes_client = web::Data::new(likes_client);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(quotes_client.clone())
            .app_data(likes_client.clone())
            .service(routes::health::handler)
            .service(routes::stock_prices::handler)
    })
    .listen(listener)?
    .run();

    Ok(server)
}

pub fn build_quotes_client(config: &Config) -> Result<Arc<dyn QuotesInterface>> {
    let quotes_client = QuotesClient::new(config.quote_base_url.clone(), config.quote_timeout)?;

    Ok(Arc::new(quotes_client))
}

/// An unreachable MongoDB is logged here and retried on each request.
pub async fn build_likes_client(config: &Config) -> Arc<dyn LikesInterface> {
    match config.store_backend {
        StoreBackend::Memory => {
            info!("Using in-memory like store");
            Arc::new(MemoryLikesClient::new())
        }
        StoreBackend::MongoDB => {
            let likes_client = LikesClient::new(
                config.mongo_uri.clone(),
                config.mongo_database.clone(),
                config.mongo_collection.clone(),
                config.store_timeout,
            );

            if let Err(e) = likes_client.connect().await {
                warn!("MongoDB connection error: {}", e);
            }

            Arc::new(likes_client)
        }
    }
}
