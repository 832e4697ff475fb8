use thiserror::Error;

/// Fixed user-facing reply for questions whose best match falls below the
/// similarity gate. Internal error details never reach the end user.
pub const OUT_OF_SCOPE_MESSAGE: &str = "Esa pregunta queda fuera del contenido didáctico. Solo puedo responder sobre el material proporcionado.";

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("pdf parse error: {0}")]
    PdfParse(String),

    #[error("regex error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("path has no file name: {0}")]
    MissingFileName(String),

    #[error("no pdf files found in {0}")]
    EmptyFolder(String),

    #[error("unknown embedding model: {0}")]
    UnknownModel(String),
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("question is empty")]
    EmptyQuestion,

    #[error("no chunks are indexed; check the document folder and segmentation settings")]
    EmptyIndex,

    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T, E = IngestError> = std::result::Result<T, E>;
