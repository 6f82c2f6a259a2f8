use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use kasse_core::catalog::ProductRules;
use kasse_core::config::ReportOptions;
use kasse_core::error::KasseError;
use kasse_core::extraction::pdftotext::PdftotextExtractor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

const UPLOAD_FIELD: &str = "pdf_files";
const DOWNLOAD_NAME: &str = "Point of Sale Analysis.xlsx";
const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Point of Sale Analysis</title>
</head>
<body>
  <h1>Point of Sale Analysis</h1>
  <form action="/upload" method="post" enctype="multipart/form-data">
    <p><input type="file" name="pdf_files" accept=".pdf" multiple required></p>
    <p><button type="submit">Create report</button></p>
  </form>
</body>
</html>
"#;

#[derive(Clone)]
struct AppState {
    rules: Arc<ProductRules>,
    options: Arc<ReportOptions>,
}

pub fn run(
    bind: &str,
    catalog: Option<PathBuf>,
    config: Option<PathBuf>,
) -> Result<(), KasseError> {
    let state = AppState {
        rules: Arc::new(super::load_rules(catalog.as_deref())?),
        options: Arc::new(super::load_options(config.as_deref(), None)?),
    };
    if !PdftotextExtractor::is_available() {
        warn!("pdftotext not found, uploads will fail until poppler-utils is installed");
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(serve(bind, state))
}

async fn serve(bind: &str, state: AppState) -> Result<(), KasseError> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/upload", post(upload))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn upload(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let dir = match tempfile::tempdir() {
        Ok(dir) => dir,
        Err(e) => {
            error!(error = %e, "cannot create upload directory");
            return internal_error();
        }
    };

    let mut paths = Vec::new();
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return bad_request(format!("Malformed upload: {e}")),
        };
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let Some(file_name) = field.file_name().and_then(upload_file_name) else {
            // Browsers send an empty part when no file was chosen.
            continue;
        };
        if !has_pdf_extension(&file_name) {
            warn!(file = %file_name, "rejected non-PDF upload");
            return bad_request(format!("'{file_name}' is not a PDF file"));
        }

        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => return bad_request(format!("Malformed upload: {e}")),
        };
        // Prefix keeps same-named uploads apart and preserves upload order.
        let path = dir.path().join(format!("{:03}-{}", paths.len(), file_name));
        if let Err(e) = tokio::fs::write(&path, &bytes).await {
            error!(error = %e, "cannot store upload");
            return internal_error();
        }
        paths.push(path);
    }

    if paths.is_empty() {
        return bad_request("No PDF files uploaded".to_string());
    }
    info!(files = paths.len(), "generating report from upload");

    let out = dir.path().join("report.xlsx");
    let result = tokio::task::spawn_blocking(move || {
        let extractor = PdftotextExtractor::new();
        kasse_core::generate_report(&paths, &extractor, &state.rules, &state.options, &out)?;
        Ok::<_, KasseError>(std::fs::read(&out)?)
    })
    .await;

    match result {
        Ok(Ok(workbook)) => (
            [
                (header::CONTENT_TYPE, XLSX_MIME.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{DOWNLOAD_NAME}\""),
                ),
            ],
            workbook,
        )
            .into_response(),
        Ok(Err(e)) => {
            error!(error = %e, "report generation failed");
            internal_error()
        }
        Err(e) => {
            error!(error = %e, "report worker panicked");
            internal_error()
        }
    }
}

/// Final path component of a client-supplied file name.
fn upload_file_name(raw: &str) -> Option<String> {
    Path::new(raw)
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(String::from)
}

fn has_pdf_extension(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, message).into_response()
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "The report could not be generated from the uploaded files.",
    )
        .into_response()
}
