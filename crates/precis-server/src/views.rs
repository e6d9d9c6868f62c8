//! HTML pages.
//!
//! Pages are rendered with `format!`; every user-supplied value passes
//! through [`escape_html`].

use axum::http::StatusCode;
use strum::IntoEnumIterator;

use precis_core::types::{SummaryMethod, SummaryReport};
use precis_extractors::DocumentKind;

use crate::session::Session;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 960px; margin: 2rem auto; padding: 0 1rem; color: #1f2933; }
h1 { margin-bottom: 0; }
.tagline { margin-top: .25rem; color: #52606d; }
fieldset { border: 1px solid #cbd2d9; border-radius: 6px; margin-bottom: 1rem; }
.stats { display: flex; gap: 2rem; }
.stat .value { font-size: 1.5rem; font-weight: 600; }
.summaries { display: flex; gap: 1rem; flex-wrap: wrap; }
.panel { flex: 1 1 300px; border: 1px solid #cbd2d9; border-radius: 6px; padding: 1rem; }
.summary-text { white-space: pre-wrap; line-height: 1.5; }
.error { background: #fde8e8; border: 1px solid #f29b9b; border-radius: 6px; padding: 1rem; color: #8a1c1c; }
button { padding: .5rem 1rem; }
"#;

/// Escape text for inclusion in HTML content or attribute values.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{style}</style>
</head>
<body>
<h1>Summarization Assistant</h1>
<p class="tagline"><strong>Intelligent Document Summarization with AI</strong></p>
<hr>
{body}
</body>
</html>"#,
        title = escape_html(title),
        style = STYLE,
        body = body,
    )
}

fn method_radios(selected: SummaryMethod) -> String {
    SummaryMethod::iter()
        .map(|method| {
            format!(
                r#"<label><input type="radio" name="method" value="{value}"{checked}> {label}</label>"#,
                value = method,
                checked = if method == selected { " checked" } else { "" },
                label = method.label(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

const ABOUT: &str = r#"<section class="about">
<h3>About</h3>
<p><strong>Summarization Methods:</strong></p>
<ul>
<li><strong>Extraction Summarization</strong>: picks the most important sentences directly from the original text using the Luhn algorithm, keeping their original wording.</li>
<li><strong>Abstractive Summarization</strong>: writes a new summary that rephrases the information in shorter, natural language using the BART model.</li>
<li><strong>Both Methods</strong>: shows the extraction and abstractive summaries side by side for comparison.</li>
</ul>
</section>"#;

/// Idle page: settings and upload form.
pub fn index_page() -> String {
    let options = DocumentKind::iter()
        .map(|kind| {
            format!(
                r#"<option value="{value}">{label}</option>"#,
                value = kind,
                label = kind.label()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    let accept = DocumentKind::iter()
        .map(|kind| format!(".{}", kind.extension()))
        .collect::<Vec<_>>()
        .join(",");

    let body = format!(
        r#"<form method="post" action="/documents" enctype="multipart/form-data">
<h2>Settings</h2>
<fieldset>
<legend>Summarization Method:</legend>
{radios}
</fieldset>
<p><label>Select Document Type:
<select name="document_type">
{options}
</select></label></p>
<hr>
{about}
<hr>
<h2>Upload Your Document</h2>
<p><input type="file" name="file" accept="{accept}" required></p>
<p><button type="submit">Upload</button></p>
</form>"#,
        radios = method_radios(SummaryMethod::default()),
        options = options,
        about = ABOUT,
        accept = accept,
    );
    layout("Summarization Assistant", &body)
}

fn document_section(session: &Session) -> String {
    let document = &session.document;
    format!(
        r#"<section class="document">
<p><strong>Filename:</strong> {filename}</p>
<p><strong>File Size:</strong> {size}</p>
<p><strong>Document Type:</strong> {kind}</p>
</section>
<form method="post" action="/documents/{id}/summary">
<fieldset>
<legend>Summarization Method:</legend>
{radios}
</fieldset>
<p><button type="submit">Generate Summary</button> <a href="/">Upload another document</a></p>
</form>"#,
        filename = escape_html(&document.filename),
        size = document.size_kb(),
        kind = document.kind.label(),
        id = session.id,
        radios = method_radios(session.method),
    )
}

/// Ready page: upload accepted, waiting for "Generate Summary".
pub fn ready_page(session: &Session) -> String {
    layout(&session.document.filename, &document_section(session))
}

/// Labeled statistics for a report.
///
/// A single summary shows its own length and ratio; `Both` shows the summed
/// length and the ratio over that sum.
pub fn stats_entries(report: &SummaryReport) -> Vec<(&'static str, String)> {
    let stats = &report.stats;
    let mut entries = vec![(
        "Original Text Length",
        format!("{} chars", stats.original_length),
    )];

    match report.method {
        SummaryMethod::Both => {
            entries.push((
                "Total Summary Length",
                format!("{} chars", stats.total_summary_length),
            ));
            entries.push(("Avg Compression Ratio", stats.compression_ratio.to_string()));
        }
        SummaryMethod::Extraction | SummaryMethod::Abstractive => {
            entries.push((
                "Summary Length",
                format!("{} chars", stats.total_summary_length),
            ));
            entries.push(("Compression Ratio", stats.compression_ratio.to_string()));
        }
    }
    entries
}

/// Result page: statistics, one panel per summary, original text.
pub fn result_page(session: &Session, report: &SummaryReport) -> String {
    let stats = stats_entries(report)
        .into_iter()
        .map(|(label, value)| {
            format!(
                r#"<div class="stat"><div class="label">{}</div><div class="value">{}</div></div>"#,
                label, value
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let panels = report
        .summaries
        .iter()
        .map(|(kind, text)| {
            format!(
                r#"<div class="panel" id="{kind}">
<h3>{label}</h3>
<div class="summary-text">{text}</div>
<p><a href="/documents/{id}/downloads/{kind}" download="{filename}">Download {label}</a></p>
</div>"#,
                kind = kind,
                label = kind.label(),
                text = escape_html(text),
                id = session.id,
                filename = escape_html(&kind.download_filename(&session.document.filename)),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let body = format!(
        r#"{document}
<hr>
<h2>Results</h2>
<h3>Text Statistics</h3>
<div class="stats">
{stats}
</div>
<hr>
<h3>Summaries</h3>
<div class="summaries">
{panels}
</div>
<details>
<summary>View Original Text</summary>
<div class="summary-text">{original}</div>
</details>"#,
        document = document_section(session),
        stats = stats,
        panels = panels,
        original = escape_html(&report.original_text),
    );
    layout(&session.document.filename, &body)
}

/// Ready page with the processing failure; no results are shown.
pub fn processing_error_page(session: &Session, message: &str) -> String {
    let body = format!(
        r#"{document}
<div class="error">An error occurred: {message}</div>"#,
        document = document_section(session),
        message = escape_html(message),
    );
    layout(&session.document.filename, &body)
}

/// Stand-alone error page for request-level failures.
pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        r#"<div class="error"><strong>{status}</strong>: {message}</div>
<p><a href="/">Back to upload</a></p>"#,
        status = status,
        message = escape_html(message),
    );
    layout("Error", &body)
}
