//! Final document assembly.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use donos_archive_models::Section;

use crate::config::ArchiveConfig;

/// Layout applied on top of whatever styling the index page brings along.
const BASE_STYLE: &str = r"<style>
  body { margin: 1.25rem; font-family: system-ui, -apple-system, Segoe UI, Roboto, Helvetica, Arial, sans-serif; }
  h1 { margin-bottom: .25rem; }
  .subtitle { color: #555; margin-bottom: 1rem; font-size: .95rem; }
  h2 { margin-top: 1.5rem; }
  table { border-collapse: collapse; width: 100%; margin-top: .5rem; }
  table, th, td { border: 1px solid #ddd; }
  th, td { padding: .5rem; vertical-align: top; }
  a { text-decoration: none; }
</style>";

/// Format of the "last update" timestamp.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z";

/// Renders the merged archive page.
///
/// `head_styles` is inserted verbatim into `<head>`; `sections` are
/// rendered in the order given, each as an `<h2>` date heading followed by
/// its table markup.
#[must_use]
pub fn render_document(
    config: &ArchiveConfig,
    head_styles: &str,
    sections: &[Section],
    generated_at: DateTime<Utc>,
) -> String {
    let title = escape_text(&config.title);
    let timestamp = generated_at
        .with_timezone(&config.timezone)
        .format(TIMESTAMP_FORMAT);

    let mut html = String::new();
    write!(
        html,
        "<!DOCTYPE html>
<html lang=\"en\">
<head>
<meta charset=\"UTF-8\" />
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />
<title>{title}</title>
{head_styles}
{BASE_STYLE}
</head>
<body>
<h1>{title}</h1>
<p class=\"subtitle\">Updated daily \u{2022} Last update: {timestamp}</p>
"
    )
    .unwrap();

    if let Some(credit) = &config.credit {
        writeln!(html, "<p class=\"subtitle\">{}</p>", escape_text(credit)).unwrap();
    }

    for section in sections {
        write!(
            html,
            "<h2>{}</h2>\n{}\n",
            escape_text(&section.date_label),
            section.table_html
        )
        .unwrap();
    }

    html.push_str("</body>\n</html>");
    html
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}
