use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("record store returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),
}
