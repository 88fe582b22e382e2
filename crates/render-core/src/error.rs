use folio_traits::FontError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("font error: {0}")]
    Font(#[from] FontError),
    #[error("backend error: {0}")]
    Backend(String),
}

impl From<&str> for RenderError {
    fn from(s: &str) -> Self {
        RenderError::Backend(s.to_string())
    }
}
