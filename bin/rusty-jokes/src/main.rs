//! # Rusty-Jokes Binary
//!
//! The entry point that assembles the application based on compile-time features.

mod config;

use actix_web::{web, App, HttpServer};
use rj_api::handlers::AppState;
use rj_api::middleware::{cors_policy, security_headers, standard_middleware};

// Feature-gated imports: the storage plugin is chosen at compile time
#[cfg(feature = "db-sqlite")]
use rj_db_sqlite::SqliteJokeRepo;

#[cfg(not(feature = "db-sqlite"))]
compile_error!("rusty-jokes needs a storage plugin; enable the `db-sqlite` feature");

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let settings = config::Settings::from_env()?;

    // 1. Initialize Database Implementation
    #[cfg(feature = "db-sqlite")]
    let repo = SqliteJokeRepo::new(&settings.database_url).await?;

    // 2. Wrap in AppState (Using dynamic dispatch for maximum flexibility)
    let state = web::Data::new(AppState {
        repo: Box::new(repo),
    });

    log::info!("Rusty-Jokes starting on http://{}:{}", settings.host, settings.port);

    let static_dir = settings.static_dir.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(standard_middleware())
            .wrap(cors_policy())
            .wrap(security_headers())
            .service(actix_files::Files::new("/static", &static_dir))
            .configure(rj_api::configure_routes)
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await?;

    Ok(())
}
