#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Builds the donos archive once and writes it to `public/index.html`.

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = donos_archive_cli_utils::init_logger();
    donos_archive_generate::run(&multi).await
}
