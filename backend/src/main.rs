mod config;
mod errors;
mod services;
mod store;

use crate::config::AppConfig;
use crate::store::StudentStore;
use actix_web::{middleware, web, App, HttpServer};
use env_logger::Env;
use log::info;
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(io::Error::other)?;
    let store = StudentStore::open(&config.database_path).map_err(io::Error::other)?;
    info!(
        "Opened {} ({} students)",
        config.database_path,
        store.count().map_err(io::Error::other)?
    );

    info!("Server running at {}", config.url());

    let app_config = config.clone();
    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::NormalizePath::trim())
            .wrap(middleware::Logger::default())
            .app_data(app_config.json_config())
            .app_data(web::Data::new(store.clone()))
            .service(services::students::configure_routes())
    });
    if let Some(workers) = config.workers {
        server = server.workers(workers.get());
    }

    server
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
