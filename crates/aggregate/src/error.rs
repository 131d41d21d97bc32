use invoicepress_model::ModelError;
use invoicepress_store::StoreError;
use std::fmt;
use thiserror::Error;

/// Which of the three resolutions failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    Header,
    LineItem(usize),
    Payee,
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Part::Header => write!(f, "invoice header"),
            Part::LineItem(index) => write!(f, "line item at position {index}"),
            Part::Payee => write!(f, "payee info"),
        }
    }
}

#[derive(Error, Debug)]
pub enum AggregateError {
    /// An upstream fetch failed or returned an unusable record. The model is
    /// all-or-nothing: nothing downstream ever sees a partial aggregate.
    #[error("{part} unavailable: {source}")]
    DataUnavailable {
        part: Part,
        #[source]
        source: StoreError,
    },

    /// A record arrived but did not map onto the model's fixed field table.
    #[error("record shape invalid: {0}")]
    BadRecord(#[from] ModelError),

    /// The caller's deadline expired before all three resolutions finished.
    #[error("deadline exceeded before all records resolved")]
    DeadlineExceeded,
}

impl AggregateError {
    pub(crate) fn unavailable(part: Part) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::DataUnavailable { part, source }
    }
}
