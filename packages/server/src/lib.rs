#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web server for the donos archive.
//!
//! Every request runs the full pipeline; there is no server-side cache.
//! Successful responses carry a `Cache-Control` header that lets a CDN in
//! front of the server keep the page for a day and refresh it in the
//! background.

mod handlers;

use actix_web::{App, HttpServer, middleware, web};
use donos_archive::ArchiveConfig;

pub use handlers::{CACHE_CONTROL, document_response};

/// Shared application state.
pub struct AppState {
    /// Settings every archive build runs with.
    pub config: ArchiveConfig,
}

/// Registers the archive routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::generate))
        .route("/api/generate", web::get().to(handlers::generate));
}

/// Starts the donos archive server on `bind_addr:port`.
///
/// This is a regular async function; the caller provides the runtime
/// (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(
    config: ArchiveConfig,
    bind_addr: &str,
    port: u16,
) -> std::io::Result<()> {
    let state = web::Data::new(AppState { config });

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
