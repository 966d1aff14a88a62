use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeclError {
    #[error("XML processing failed: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Template error: {message}")]
    TemplateError { message: String },

    #[error("Input shape error at '{field}': {reason}")]
    InputShapeError { field: String, reason: String },
}

pub type Result<T> = std::result::Result<T, DeclError>;
