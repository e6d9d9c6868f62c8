//! Integration tests for the web front end.
//!
//! Drives the router in-process with `tower::ServiceExt::oneshot` and a stub
//! summarization model in place of the inference endpoint.

use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use docx_rs::{Docx, Paragraph, Run};
use tower::ServiceExt;

use precis_core::model_cache::{ModelCache, ModelFuture, ModelLoader};
use precis_core::{GenerationOptions, PrecisConfig, PrecisError, PrecisResult, SummarizationModel};
use precis_server::{create_server, AppState};

const BOUNDARY: &str = "precis-test-boundary";
const THREE_SENTENCES: &str = "The sky is blue. Grass is green. Water is wet.";

/// Answers each call with `s<n>`, or fails every call when `fail` is set.
#[derive(Default)]
struct StubModel {
    calls: AtomicUsize,
    fail: bool,
}

#[async_trait]
impl SummarizationModel for StubModel {
    async fn summarize(&self, _text: &str, options: &GenerationOptions) -> PrecisResult<String> {
        assert_eq!(*options, GenerationOptions::default());
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail {
            return Err(PrecisError::model("inference endpoint unreachable"));
        }
        Ok(format!("s{}", call))
    }

    fn model_name(&self) -> &str {
        "stub/bart"
    }
}

fn app_with_model(model: Arc<StubModel>) -> Router {
    let cache = Arc::new(ModelCache::preloaded(model));
    create_server(AppState::new_with_cache(PrecisConfig::default(), cache))
}

fn multipart_body(method: &str, document_type: &str, filename: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in [("method", method), ("document_type", document_type)] {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn upload(
    app: &Router,
    method: &str,
    document_type: &str,
    filename: &str,
    content: &[u8],
) -> (StatusCode, Option<String>, String) {
    let request = Request::post("/documents")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(method, document_type, filename, content)))
        .unwrap();
    let (status, headers, body) = send(app, request).await;
    let location = headers
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    (status, location, body)
}

async fn generate(app: &Router, document: &str, method: Option<&str>) -> (StatusCode, String) {
    let form = method.map(|m| format!("method={}", m)).unwrap_or_default();
    let request = Request::post(format!("{}/summary", document))
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form))
        .unwrap();
    let (status, _, body) = send(app, request).await;
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

#[tokio::test]
async fn test_index_shows_settings_and_upload_form() {
    let app = app_with_model(Arc::new(StubModel::default()));
    let (status, _, body) = get(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Summarization Method:"));
    assert!(body.contains("PowerPoint Presentation (.pptx)"));
    assert!(body.contains("Upload Your Document"));
    assert!(body.contains("About"));
}

/// Three short sentences with Extraction return all three, in order.
#[tokio::test]
async fn test_extraction_of_short_text_keeps_every_sentence() {
    let model = Arc::new(StubModel::default());
    let app = app_with_model(model.clone());

    let (status, location, _) =
        upload(&app, "extraction", "txt", "notes.txt", THREE_SENTENCES.as_bytes()).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    let document = location.unwrap();

    let (status, _, ready) = get(&app, &document).await;
    assert_eq!(status, StatusCode::OK);
    assert!(ready.contains("notes.txt"));
    assert!(ready.contains("0.04 KB"));
    assert!(ready.contains("Generate Summary"));

    let (status, page) = generate(&app, &document, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains(&format!(r#"<div class="summary-text">{}</div>"#, THREE_SENTENCES)));
    assert!(page.contains("Original Text Length"));
    assert!(page.contains("46 chars"));
    assert!(page.contains("Compression Ratio"));
    assert!(page.contains("100.0%"));
    assert!(!page.contains("Abstractive Summary"));
    assert_eq!(model.calls.load(Ordering::SeqCst), 0);

    let (status, headers, text) = get(&app, &format!("{}/downloads/extraction", document)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(text, THREE_SENTENCES);
    assert_eq!(headers[header::CONTENT_TYPE], "text/plain; charset=utf-8");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"sumy_summary_notes.txt.txt\""
    );

    let (status, _, _) = get(&app, &format!("{}/downloads/abstractive", document)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// 3000 characters are summarized as three chunks joined by spaces.
#[tokio::test]
async fn test_abstractive_summary_of_long_text() {
    let model = Arc::new(StubModel::default());
    let app = app_with_model(model.clone());
    let text = "word ".repeat(600);

    let (_, location, _) = upload(&app, "abstractive", "txt", "long.txt", text.as_bytes()).await;
    let document = location.unwrap();
    let (status, page) = generate(&app, &document, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(model.calls.load(Ordering::SeqCst), 3);
    assert!(page.contains("s1 s2 s3"));
    assert!(page.contains("3000 chars"));
    assert!(page.contains("0.3%"));

    let (_, headers, summary) = get(&app, &format!("{}/downloads/abstractive", document)).await;
    assert_eq!(summary, "s1 s2 s3");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"abstractive_summary_long.txt.txt\""
    );
}

/// A text file renamed to .pdf fails with one message and no results.
#[tokio::test]
async fn test_malformed_pdf_shows_single_error() {
    let app = app_with_model(Arc::new(StubModel::default()));

    let (status, location, _) = upload(
        &app,
        "extraction",
        "pdf",
        "report.pdf",
        b"This is plain text, not a PDF.",
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    let document = location.unwrap();

    let (status, page) = generate(&app, &document, None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(page.matches("An error occurred:").count(), 1);
    assert!(!page.contains("Text Statistics"));
    assert!(!page.contains("Download Extraction Summary"));

    let (status, _, _) = get(&app, &format!("{}/downloads/extraction", document)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// Both shows two panels and aggregates over the summed lengths.
#[tokio::test]
async fn test_both_methods_side_by_side() {
    let model = Arc::new(StubModel::default());
    let app = app_with_model(model.clone());

    let (_, location, _) = upload(&app, "both", "txt", "notes.txt", THREE_SENTENCES.as_bytes()).await;
    let (status, page) = generate(&app, &location.unwrap(), None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("<h3>Extraction Summary</h3>"));
    assert!(page.contains("<h3>Abstractive Summary</h3>"));
    assert!(page.contains("Total Summary Length"));
    assert!(page.contains("48 chars"));
    assert!(page.contains("Avg Compression Ratio"));
    assert!(page.contains("104.3%"));
    assert_eq!(model.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_method_can_change_before_generating() {
    let model = Arc::new(StubModel::default());
    let app = app_with_model(model.clone());

    let (_, location, _) =
        upload(&app, "extraction", "txt", "notes.txt", THREE_SENTENCES.as_bytes()).await;
    let document = location.unwrap();
    let (status, page) = generate(&app, &document, Some("abstractive")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("<h3>Abstractive Summary</h3>"));
    assert!(!page.contains("<h3>Extraction Summary</h3>"));
    assert!(page.contains(r#"value="abstractive" checked"#));
}

#[tokio::test]
async fn test_model_failure_aborts_without_partial_output() {
    let model = Arc::new(StubModel {
        fail: true,
        ..Default::default()
    });
    let app = app_with_model(model);

    let (_, location, _) = upload(&app, "both", "txt", "notes.txt", THREE_SENTENCES.as_bytes()).await;
    let (status, page) = generate(&app, &location.unwrap(), None).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(page.contains("An error occurred: Model error: inference endpoint unreachable"));
    assert!(!page.contains("<h3>Extraction Summary</h3>"));
}

#[tokio::test]
async fn test_docx_upload_end_to_end() {
    let app = app_with_model(Arc::new(StubModel::default()));
    let mut buffer = Cursor::new(Vec::new());
    Docx::new()
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Rivers carry water.")))
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Oceans hold water.")))
        .build()
        .pack(&mut buffer)
        .unwrap();

    let (status, location, _) =
        upload(&app, "extraction", "docx", "water.docx", &buffer.into_inner()).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    let (status, page) = generate(&app, &location.unwrap(), None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("Rivers carry water. Oceans hold water."));
}

#[tokio::test]
async fn test_extension_must_match_document_type() {
    let app = app_with_model(Arc::new(StubModel::default()));
    let (status, location, body) =
        upload(&app, "extraction", "docx", "notes.txt", THREE_SENTENCES.as_bytes()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(location.is_none());
    assert!(body.contains(".docx"));
}

#[tokio::test]
async fn test_unknown_form_values_are_rejected() {
    let app = app_with_model(Arc::new(StubModel::default()));

    let (status, _, _) = upload(&app, "bart", "txt", "a.txt", b"Text.").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = upload(&app, "extraction", "rtf", "a.rtf", b"Text.").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_document_is_not_found() {
    let app = app_with_model(Arc::new(StubModel::default()));
    let missing = format!("/documents/{}", uuid::Uuid::new_v4());

    let (status, _, body) = get(&app, &missing).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("upload the document again"));

    let (status, _) = generate(&app, &missing, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = get(&app, &format!("{}/downloads/summary", missing)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_reports_lazy_model_load() {
    let loads = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&loads);
    let loader: ModelLoader = Arc::new(move || -> ModelFuture {
        counter.fetch_add(1, Ordering::SeqCst);
        Box::pin(async { Ok(Arc::new(StubModel::default()) as Arc<dyn SummarizationModel>) })
    });
    let cache = Arc::new(ModelCache::new("stub/bart", loader));
    let app = create_server(AppState::new_with_cache(PrecisConfig::default(), cache));

    let (status, _, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    let health: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["model"], "stub/bart");
    assert_eq!(health["model_loaded"], false);

    let (_, location, _) = upload(&app, "abstractive", "txt", "a.txt", b"Some text.").await;
    let document = location.unwrap();
    generate(&app, &document, None).await;
    generate(&app, &document, None).await;

    let (_, _, body) = get(&app, "/health").await;
    let health: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(health["model_loaded"], true);
    assert_eq!(loads.load(Ordering::SeqCst), 1);
}
