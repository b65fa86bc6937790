#![deny(missing_docs)]
//! Hangar server executable.
//!
//! Hosts the `/rest/ships` catalog API over PostgreSQL or an in-memory store.

mod config;
mod db;
mod models;
mod openapi;
mod routes;
mod schema;
mod store;
mod validation;

#[cfg(not(test))]
use std::sync::Arc;

#[cfg(not(test))]
use actix_cors::Cors;
#[cfg(not(test))]
use actix_web::{App, HttpServer, http::header, web};
#[cfg(not(test))]
use dotenvy::dotenv;
#[cfg(not(test))]
use hangar_core::{MemoryShipStore, ShipService, ShipStore};

#[cfg(not(test))]
use crate::config::ServerConfig;
#[cfg(not(test))]
use crate::db::init_pool;
#[cfg(not(test))]
use crate::routes::AppState;
#[cfg(not(test))]
use crate::store::PgShipStore;

#[cfg(not(test))]
fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = ServerConfig::from_env().map_err(std::io::Error::other)?;

    // Pool setup and migrations block, so they run before the runtime starts.
    let store: Arc<dyn ShipStore + Send + Sync> = match &config.database_url {
        Some(url) => {
            let pool = init_pool(url).map_err(std::io::Error::other)?;
            log::info!("using PostgreSQL ship store");
            Arc::new(PgShipStore::new(pool))
        }
        None => {
            log::warn!("DATABASE_URL is not set; ships are kept in memory only");
            Arc::new(MemoryShipStore::new())
        }
    };
    let state = web::Data::new(AppState {
        ships: ShipService::new(store),
    });

    let ServerConfig {
        host,
        port,
        allowed_origins,
        ..
    } = config;
    log::info!("listening on {host}:{port}");

    actix_web::rt::System::new().block_on(async move {
        HttpServer::new(move || {
            let mut cors = Cors::default()
                .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
                .allowed_headers(vec![header::CONTENT_TYPE])
                .max_age(3600);
            for origin in &allowed_origins {
                cors = cors.allowed_origin(origin);
            }
            App::new()
                .wrap(actix_web::middleware::Logger::default())
                .wrap(cors)
                .app_data(state.clone())
                .configure(routes::configure)
        })
        .bind((host, port))?
        .run()
        .await
    })
}

#[cfg(test)]
fn main() {}
