use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The HTML template references a placeholder the renderer does not fill.
    #[error("unknown template placeholder: {0}")]
    Template(String),
}
