use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Decode error: {0}")]
    Decode(String),

    /// None of the known record-list keys was present; `found` lists the keys that were
    #[error("No record list in envelope (keys: {found:?}): {body}")]
    MissingEnvelope { found: Vec<String>, body: String },

    #[error("Analysis error: {0}")]
    Analysis(String),
}
