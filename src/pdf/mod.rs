//! Contract document pipeline.
//!
//! Split into three collaborators:
//! - `composer` - gathers the order/driver/vehicle/passenger snapshot and
//!   renders the Typst source for the bilingual transport contract
//! - `layout` - manual bilingual text measurement and word wrap
//! - `engine` - subprocess rendering of Typst source to PDF bytes

pub mod composer;
pub mod engine;
pub mod layout;

pub use composer::{compose_contract, ContractData, ContractGenerator};

use thiserror::Error;

/// Errors that can occur while generating a contract PDF.
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("failed to load contract template: {0}")]
    TemplateIo(#[source] std::io::Error),
    #[error("failed to create temporary directory: {0}")]
    TempDir(#[source] std::io::Error),
    #[error("failed to write renderer source: {0}")]
    WriteSource(#[source] std::io::Error),
    #[error("renderer execution failed: {0}")]
    RendererIo(#[source] std::io::Error),
    #[error("renderer exited with status {code}: {stderr}")]
    RendererExit { code: i32, stderr: String },
    #[error("failed to read generated PDF: {0}")]
    ReadPdf(#[source] std::io::Error),
    #[error("renderer produced an empty PDF")]
    EmptyOutput,
    #[error("failed to store generated PDF: {0}")]
    StorePdf(#[source] std::io::Error),
}

/// Result of a successful contract generation.
#[derive(Debug)]
pub struct GeneratedContract {
    /// Filename under the uploads directory, `order_{id}_{timestamp}.pdf`.
    pub filename: String,
    pub size_bytes: u64,
}
