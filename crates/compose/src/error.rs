use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ComposeError {
    /// The totals section needs all three scalars; refusing here beats
    /// emitting a malformed totals block.
    #[error("cannot synthesize totals section: {0} value is empty")]
    MissingTotalValue(&'static str),
}
