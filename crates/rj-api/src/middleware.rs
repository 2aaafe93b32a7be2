//! Middleware wrapped around the route table by the binary.

use actix_web::middleware::{DefaultHeaders, Logger};
use actix_cors::Cors;

/// Access log line per request, written through `log`.
pub fn standard_middleware() -> Logger {
    Logger::default()
}

/// The board's forms post back to their own origin, so no foreign origin is
/// allowed. A cross-site page must never be able to send [`USER_HEADER`] on
/// a visitor's behalf.
///
/// [`USER_HEADER`]: crate::identity::USER_HEADER
pub fn cors_policy() -> Cors {
    Cors::default()
        .allowed_methods(vec!["GET", "POST"])
        .max_age(3600)
}

/// Headers added to every response.
pub fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Content-Security-Policy", "default-src 'self'; img-src 'self' https: data:"))
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("Referrer-Policy", "strict-origin-when-cross-origin"))
}
