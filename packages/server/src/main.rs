#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Serves the donos archive, building it on every request.

use clap::Parser;
use donos_archive::ArchiveConfig;

#[derive(Parser)]
#[command(name = "donos_archive_server", about = "Donos archive server")]
struct Cli {
    /// Address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    bind_addr: String,

    /// Port to listen on
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    donos_archive_server::run_server(ArchiveConfig::default(), &cli.bind_addr, cli.port).await
}
