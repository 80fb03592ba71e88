use std::process;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;

use polycms::db::{establish_connection_pool, run_migrations};
use polycms::models::config::ServerConfig;
use polycms::repository::DieselRepository;
use polycms::routes::{configure, cors};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let server_config = match ServerConfig::load("config/default") {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            process::exit(1);
        }
    };

    let database_url = &server_config.database_url;
    let pool = match establish_connection_pool(database_url, server_config.pool_max_size) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            process::exit(1);
        }
    };

    match pool.get() {
        Ok(mut conn) => {
            if let Err(e) = run_migrations(&mut conn) {
                log::error!("Failed to run database migrations: {e}");
                process::exit(1);
            }
        }
        Err(e) => {
            log::error!("Failed to get database connection: {e}");
            process::exit(1);
        }
    }

    let repo = web::Data::new(DieselRepository::new(pool));
    let bind_address = server_config.bind_address();
    log::info!("Listening on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(cors())
            .wrap(Logger::default())
            .app_data(repo.clone())
            .configure(configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
