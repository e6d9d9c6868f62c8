//! Upload, summary and download endpoints.

use std::str::FromStr;

use axum::{
    body::Bytes,
    extract::{Multipart, Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tracing::{error, info};
use uuid::Uuid;

use precis_core::types::{SummaryKind, SummaryMethod};
use precis_extractors::DocumentKind;

use crate::error::{ApiError, ApiResult};
use crate::session::{Session, UploadedDocument};
use crate::state::AppState;
use crate::views;

/// Settings submitted with "Generate Summary".
#[derive(Debug, Default, Deserialize)]
pub struct GenerateForm {
    /// Overrides the method chosen at upload time.
    #[serde(default)]
    pub method: Option<SummaryMethod>,
}

/// Idle page.
/// GET /
pub async fn index() -> Html<String> {
    Html(views::index_page())
}

/// Accept an upload and redirect to its Ready page.
/// POST /documents
pub async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Redirect> {
    let mut method = SummaryMethod::default();
    let mut kind: Option<DocumentKind> = None;
    let mut file: Option<(String, Bytes)> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(|n| n.to_string());

        match name.as_deref() {
            Some("method") => {
                let value = field.text().await?;
                method = SummaryMethod::from_str(value.trim()).map_err(|_| {
                    ApiError::bad_request(format!("Unknown summarization method: {}", value))
                })?;
            }
            Some("document_type") => {
                let value = field.text().await?;
                kind = Some(DocumentKind::from_str(value.trim()).map_err(|_| {
                    ApiError::bad_request(format!("Unknown document type: {}", value))
                })?);
            }
            Some("file") => {
                let Some(filename) = field.file_name().map(|s| s.to_string()) else {
                    continue;
                };
                let bytes = field.bytes().await?;
                file = Some((filename, bytes));
            }
            _ => {}
        }
    }

    let kind = kind.ok_or_else(|| ApiError::bad_request("Please select a document type."))?;
    let (filename, bytes) = file
        .filter(|(filename, _)| !filename.is_empty())
        .ok_or_else(|| ApiError::bad_request("Please choose a file to upload."))?;

    if !kind.matches_filename(&filename) {
        return Err(ApiError::bad_request(format!(
            "{} must have a .{} extension; got \"{}\".",
            kind.label(),
            kind.extension(),
            filename
        )));
    }

    let session = state
        .sessions
        .create(UploadedDocument::new(bytes, kind, filename), method)
        .await;
    info!(
        session = %session.id,
        filename = %session.document.filename,
        kind = %kind,
        bytes = session.document.size(),
        "Document uploaded"
    );

    Ok(Redirect::to(&format!("/documents/{}", session.id)))
}

async fn load_session(state: &AppState, id: Uuid) -> ApiResult<Session> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(ApiError::session_not_found)
}

/// Ready page, or the latest result if one was generated.
/// GET /documents/:id
pub async fn show_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Html<String>> {
    let session = load_session(&state, id).await?;
    let page = match &session.report {
        Some(report) => views::result_page(&session, report),
        None => views::ready_page(&session),
    };
    Ok(Html(page))
}

/// Run extraction and summarization for an uploaded document.
/// POST /documents/:id/summary
pub async fn generate_summary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<GenerateForm>,
) -> ApiResult<Response> {
    let mut session = load_session(&state, id).await?;
    let method = form.method.unwrap_or(session.method);
    session.method = method;

    match state.service.process(&session.document, method).await {
        Ok(report) => {
            let page = views::result_page(&session, &report);
            state.sessions.set_report(id, method, Some(report)).await;
            Ok(Html(page).into_response())
        }
        Err(e) => {
            error!(
                session = %id,
                stage = e.stage(),
                format = e.format(),
                error = %e,
                "Summary generation failed"
            );
            state.sessions.set_report(id, method, None).await;
            let page = views::processing_error_page(&session, &e.to_string());
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response())
        }
    }
}

/// Download one summary as a text file.
/// GET /documents/:id/downloads/:kind
pub async fn download_summary(
    State(state): State<AppState>,
    Path((id, kind)): Path<(Uuid, String)>,
) -> ApiResult<Response> {
    let kind = SummaryKind::from_str(&kind)
        .map_err(|_| ApiError::not_found(format!("Unknown summary kind: {}", kind)))?;
    let session = load_session(&state, id).await?;
    let text = session
        .report
        .as_ref()
        .and_then(|report| report.summary(kind))
        .ok_or_else(|| ApiError::not_found(format!("No {} has been generated yet.", kind.label())))?;

    let filename = kind.download_filename(&session.document.filename);
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename.replace('"', "")))
            .unwrap_or_else(|_| HeaderValue::from_static("attachment")),
    );

    Ok((headers, text.to_string()).into_response())
}
