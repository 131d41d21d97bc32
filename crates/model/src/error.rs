use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("{record} record is missing upstream field '{key}'")]
    MissingField {
        record: &'static str,
        key: &'static str,
    },
    #[error("unparseable date value '{0}'")]
    BadDate(String),
    #[error("unparseable quantity value '{0}'")]
    BadQuantity(String),
}
