//! stockfeed backend service
//!
//! Ingests daily stock-price CSV uploads and serves aggregate queries
//! (highest volume, average close, average VWAP) over the stored records.

mod config;   // configuration loading
mod handlers; // HTTP request handlers
mod ingest;   // CSV ingestion pipeline
mod models;   // data model definitions
mod services; // business-logic services
mod store;    // document-store interface

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use crate::config::AppConfig;
use crate::store::{MemoryStore, StockStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::load();
    log::info!("starting stockfeed backend on {}", config.bind_addr());

    // One store shared by every ingestion and query call; it owns its
    // own reader/writer concurrency control.
    let store = web::Data::from(Arc::new(MemoryStore::new()) as Arc<dyn StockStore>);

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(store.clone())
            .configure(handlers::config)
    })
    .bind(config.bind_addr())?;

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.run().await
}
