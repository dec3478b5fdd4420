use crate::image_classifier::response::ClassificationResult;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// The image as it is uploaded: original file name, mime type and raw bytes.
#[derive(Clone, PartialEq)]
pub struct ImageFile {
    pub name: String,
    pub mime: String,
    pub bytes: Arc<[u8]>,
}

impl fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageFile")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("bytes", &format_args!("<{} bytes>", self.bytes.len()))
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum ClassifyError {
    /// Callers show the base URL themselves.
    #[error("could not reach the server: {reason}")]
    Connection { url: String, reason: String },

    #[error("Server error: {status} - {body}")]
    Server { status: u16, body: String },

    #[error("HTTP error: {status}")]
    Status { status: u16 },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

pub trait ImageClassifier {
    fn classify(
        &self,
        base_url: &str,
        image: &ImageFile,
    ) -> Result<ClassificationResult, ClassifyError>;

    fn check_connection(&self, base_url: &str) -> Result<(), ClassifyError>;
}

/// Joins `path` onto a user-typed base URL.
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim().trim_end_matches('/'), path)
}
