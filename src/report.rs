//! Export of the full product list as a downloadable report.
//!
//! Every call fetches a fresh snapshot from the store, projects it into a
//! [`TableShape`] and encodes it on the blocking pool. Nothing survives the call
//! except the returned bytes.

use crate::store::{ProductStore, StoreError};
use chrono::{Local, NaiveDateTime};
use productos_render_core::{RenderError, TableRenderer, TableShape};
use productos_render_lopdf::PdfTableRenderer;
use productos_render_xlsx::XlsxTableRenderer;
use std::sync::Arc;

const FILE_PREFIX: &str = "productos";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Spreadsheet,
    Document,
}

/// A finished report, ready to be sent as an attachment.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub content_type: &'static str,
    pub file_name: String,
    pub body: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to fetch products: {0}")]
    Fetch(#[source] StoreError),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("report task did not complete: {0}")]
    Task(String),
}

/// `productos_<YYYY-MM-DD_HH:mm:ss>.<extension>`
pub fn report_file_name(extension: &str, exported_at: NaiveDateTime) -> String {
    format!(
        "{FILE_PREFIX}_{}.{extension}",
        exported_at.format(TIMESTAMP_FORMAT)
    )
}

#[derive(Clone)]
pub struct ReportService {
    store: Arc<dyn ProductStore>,
    document: PdfTableRenderer,
    spreadsheet: XlsxTableRenderer,
}

impl ReportService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self {
            store,
            document: PdfTableRenderer::default(),
            spreadsheet: XlsxTableRenderer::default(),
        }
    }

    pub async fn export(&self, kind: ReportKind) -> Result<RenderedReport, ReportError> {
        let exported_at = Local::now().naive_local();
        let products = self.store.list().await.map_err(ReportError::Fetch)?;
        let table = TableShape::from_products(&products);

        let report = match kind {
            ReportKind::Spreadsheet => render(self.spreadsheet.clone(), table, exported_at).await?,
            ReportKind::Document => render(self.document.clone(), table, exported_at).await?,
        };

        tracing::info!(
            "Exported {} products to {} ({} bytes)",
            products.len(),
            report.file_name,
            report.body.len()
        );
        Ok(report)
    }
}

async fn render<R>(
    renderer: R,
    table: TableShape,
    exported_at: NaiveDateTime,
) -> Result<RenderedReport, ReportError>
where
    R: TableRenderer + Send + 'static,
{
    let content_type = renderer.content_type();
    let file_name = report_file_name(renderer.file_extension(), exported_at);

    let body = tokio::task::spawn_blocking(move || renderer.render(&table))
        .await
        .map_err(|e| ReportError::Task(e.to_string()))??;

    Ok(RenderedReport {
        content_type,
        file_name,
        body,
    })
}
