//! Bill PDF rendering
//!
//! Rendering is delegated to an external HTTP collaborator; this service only
//! assembles the document payload and streams the bytes back. Export fails
//! with a validation error when no renderer is configured.

use serde::Serialize;
use std::time::Duration;

use crate::db::models::{Bill, OrderItem};
use crate::utils::{AppError, AppResult};

/// Payload posted to the renderer
#[derive(Debug, Serialize)]
pub struct BillDocument {
    pub bill: Bill,
    pub table_number: i64,
    pub items: Vec<OrderItem>,
}

#[derive(Clone)]
pub struct PdfService {
    client: reqwest::Client,
    base_url: Option<String>,
}

impl PdfService {
    pub fn new(base_url: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_default();

        Self { client, base_url }
    }

    /// Render a bill document to PDF bytes
    pub async fn render_bill(&self, document: &BillDocument) -> AppResult<Vec<u8>> {
        let base_url = self.base_url.as_deref().ok_or_else(|| {
            AppError::validation("PDF export is not configured (PDF_RENDERER_URL unset)")
        })?;

        let response = self
            .client
            .post(format!("{base_url}/render/bill"))
            .json(document)
            .send()
            .await
            .map_err(|e| AppError::internal(format!("PDF renderer unreachable: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::internal(format!(
                "PDF renderer returned {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::internal(format!("PDF renderer response truncated: {e}")))?;

        Ok(bytes.to_vec())
    }
}
