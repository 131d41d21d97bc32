//! The render conduit: turns a composed layout tree into one complete PDF
//! byte buffer.
//!
//! A `RenderEngine` streams `RenderEvent`s — chunks of bytes terminated by
//! an explicit end-of-stream marker. `collect_pdf` concatenates the chunks
//! and only hands the buffer back once the end marker has arrived; a stream
//! that closes early is a render failure, never a partial document.

mod conduit;
mod engine;
mod error;
mod paint;

pub use conduit::collect_pdf;
pub use engine::LopdfEngine;
pub use error::RenderError;

use async_trait::async_trait;
use invoicepress_doctree::Document;

/// One event on the rendered byte stream.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    Chunk(Vec<u8>),
    /// The explicit completion signal. The buffer is not final until this
    /// has been observed.
    End,
}

/// A rendering engine: consumes a layout tree, emits a byte stream.
///
/// Implementations send zero or more `Chunk`s followed by exactly one `End`,
/// then drop the sender. Engine internals (fonts, pagination, shaping) are
/// entirely behind this boundary.
#[async_trait]
pub trait RenderEngine: Send + Sync {
    async fn render(
        &self,
        doc: &Document,
        events: async_channel::Sender<RenderEvent>,
    ) -> Result<(), RenderError>;
}
