//! Collecting an engine's byte stream into one finished buffer.

use crate::{RenderEngine, RenderError, RenderEvent};
use invoicepress_doctree::Document;

const CHANNEL_CAPACITY: usize = 16;

/// Runs the engine and concatenates its stream into a single buffer.
///
/// The buffer is returned only after the engine's explicit `End` event; if
/// the channel closes without one, the render is treated as failed so a
/// truncated document can never reach the caller.
pub async fn collect_pdf(
    engine: &dyn RenderEngine,
    doc: &Document,
) -> Result<Vec<u8>, RenderError> {
    let (tx, rx) = async_channel::bounded(CHANNEL_CAPACITY);

    let produce = engine.render(doc, tx);
    let consume = async {
        let mut buffer = Vec::new();
        let mut completed = false;
        while let Ok(event) = rx.recv().await {
            match event {
                RenderEvent::Chunk(chunk) => buffer.extend_from_slice(&chunk),
                RenderEvent::End => completed = true,
            }
        }
        (buffer, completed)
    };

    let (render_result, (buffer, completed)) = tokio::join!(produce, consume);
    render_result?;
    if !completed {
        return Err(RenderError::Truncated);
    }

    log::debug!("collected {} rendered bytes", buffer.len());
    Ok(buffer)
}
