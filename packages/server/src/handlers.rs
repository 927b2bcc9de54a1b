//! HTTP handler functions for the donos archive.

use actix_web::http::header;
use actix_web::{HttpResponse, web};
use donos_archive::{Archive, ArchiveError};

use crate::AppState;

/// Lets shared caches serve the page for a day and refresh it in the
/// background for up to an hour after that.
pub const CACHE_CONTROL: &str = "public, s-maxage=86400, stale-while-revalidate=3600";

/// `GET /` and `GET /api/generate`
///
/// Builds the archive and returns it as HTML.
pub async fn generate(state: web::Data<AppState>) -> HttpResponse {
    let result = match Archive::new(state.config.clone()) {
        Ok(archive) => archive.build().await,
        Err(e) => Err(e),
    };
    document_response(result)
}

/// Turns a build result into the HTTP response: the page with caching
/// headers on success, a plain-text 500 otherwise.
#[must_use]
pub fn document_response(result: Result<String, ArchiveError>) -> HttpResponse {
    match result {
        Ok(html) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .insert_header((header::CACHE_CONTROL, CACHE_CONTROL))
            .body(html),
        Err(e) => {
            log::error!("Archive build failed: {e}");
            HttpResponse::InternalServerError()
                .content_type("text/plain; charset=utf-8")
                .body(format!("Error: {e}"))
        }
    }
}
