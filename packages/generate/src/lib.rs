#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Static build of the donos archive.
//!
//! Runs the pipeline once with the production settings and writes the
//! resulting page to [`OUTPUT_PATH`], ready to be served by any static
//! host.

use std::path::Path;

use donos_archive::{Archive, ArchiveConfig};
use donos_archive_cli_utils::{MultiProgress, PagesBar};

/// Where the generated page is written, relative to the working directory.
pub const OUTPUT_PATH: &str = "public/index.html";

/// Builds the archive and writes it to [`OUTPUT_PATH`].
///
/// # Errors
///
/// Returns an error if the build fails or the file cannot be written.
pub async fn run(multi: &MultiProgress) -> Result<(), Box<dyn std::error::Error>> {
    let archive = Archive::new(ArchiveConfig::default())?.with_progress(PagesBar::new(multi));

    let html = archive.build().await?;

    let output = Path::new(OUTPUT_PATH);
    write_document(output, &html)?;
    log::info!("Archive written to {}", output.display());
    println!("Wrote {} ({} bytes)", output.display(), format_size(html.len()));

    Ok(())
}

/// Writes `html` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns an I/O error if a directory or the file cannot be created.
pub fn write_document(path: &Path, html: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
}

/// Formats a byte count with thousands separators, e.g. `12,345`.
#[must_use]
pub fn format_size(bytes: usize) -> String {
    let digits = bytes.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
