//! # rj-api
//!
//! The web routing and orchestration layer for Rusty-Jokes.

pub mod error;
pub mod handlers;
pub mod identity;
pub mod middleware;

use actix_web::web;

/// Registers every joke board route at the site root. The binary adds
/// `/static` and the middleware stack around it.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("")
            .route("/", web::get().to(handlers::index))
            // The feed and the posting endpoint
            .route("/jokes", web::get().to(handlers::feed))
            .route("/jokes", web::post().to(handlers::store))
            // Registered before /jokes/{id} so "new" is not parsed as an ID
            .route("/jokes/new", web::get().to(handlers::posting_form))
            .route("/jokes/{id}", web::get().to(handlers::show))
            .route("/jokes/{id}", web::post().to(handlers::update))
            .route("/jokes/{id}/edit", web::get().to(handlers::edit_form))
            .route("/jokes/{id}/delete", web::post().to(handlers::destroy))
            // The joke page and the rating/comment endpoint
            .route("/jokes/{id}/interactions", web::get().to(handlers::show_joke))
            .route("/jokes/{id}/interactions", web::post().to(handlers::interactions))
    );
}
