mod config;
mod db;
mod errors;
mod handlers;
mod models;

use std::process;
use std::sync::Arc;

use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};

use crate::config::Config;
use crate::db::{EmployeeStore, MongoGateway};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("Invalid configuration: {}", err);
            process::exit(1);
        }
    };

    let gateway = match MongoGateway::connect(&config.mongodb_uri, config.connect_timeout).await {
        Ok(gateway) => gateway,
        Err(err) => {
            error!("{}", err);
            process::exit(1);
        }
    };
    info!("Using database {}", gateway.database_name());

    let store: Arc<dyn EmployeeStore> = Arc::new(gateway);
    let store = web::Data::from(store);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(store.clone())
            .configure(handlers::employee::configure)
    });

    let server = match server.bind(&config.bind_address) {
        Ok(server) => server,
        Err(err) => {
            error!("Failed to bind {}: {}", config.bind_address, err);
            process::exit(1);
        }
    };

    info!("Starting server at {}", config.bind_address);
    server.run().await
}
