use crate::error::{Result, ServiceError};
use crate::report::ReportKind;
use crate::state::AppState;
use axum::{
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};

pub async fn export_pdf(State(state): State<AppState>) -> Result<impl IntoResponse> {
    export(state, ReportKind::Document).await
}

pub async fn export_excel(State(state): State<AppState>) -> Result<impl IntoResponse> {
    export(state, ReportKind::Spreadsheet).await
}

/// Renders the whole product list and returns it as an attachment.
async fn export(state: AppState, kind: ReportKind) -> Result<impl IntoResponse> {
    tracing::info!("Export request for {:?} report", kind);

    let _permit = state
        .export_semaphore
        .acquire()
        .await
        .map_err(|_| ServiceError::ServiceOverloaded)?;

    let report = state.reports.export(kind).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, report.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", report.file_name),
            ),
        ],
        report.body,
    ))
}
