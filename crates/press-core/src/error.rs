use thiserror::Error;

/// Error union shared by every presskit engine.
///
/// Configuration kinds are produced at plan time, before any output is
/// written. External kinds are mapped in by the PDF/QR adapters; the
/// backing library's own error types never cross a crate boundary.
#[derive(Error, Debug)]
pub enum PressError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error("layout exceeds the selected press sheet: {0}")]
    LayoutExceedsSheet(String),
    #[error("bleed of {bleed_in}\" exceeds the {page_w_in}\" x {page_h_in}\" page")]
    BleedExceedsPage {
        bleed_in: f64,
        page_w_in: f64,
        page_h_in: f64,
    },
    #[error("Saddle stitch requires the total interior page count to be a multiple of 4.")]
    InvalidPageCountForBinding(usize),
    #[error("unknown paper SKU: {0}")]
    UnknownPaperSku(String),
    #[error("finished size does not fit the {0} parent sheet")]
    FinishedSizeDoesNotFitPaper(String),
    #[error("cover spread does not fit the cover parent sheet")]
    CoverSpreadDoesNotFitCover,
    #[error("PDF parse error: {0}")]
    PdfParse(String),
    #[error("PDF render error: {0}")]
    PdfRender(String),
    #[error("QR generation error: {0}")]
    QrGeneration(String),
    #[error("operation cancelled")]
    Cancelled,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PressError>;
