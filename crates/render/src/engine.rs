//! The bundled engine: paints the tree with lopdf and streams the result.

use crate::{paint, RenderEngine, RenderError, RenderEvent};
use async_trait::async_trait;
use invoicepress_doctree::Document;

const DEFAULT_CHUNK_SIZE: usize = 16 * 1024;

/// A minimal single-page engine on top of `lopdf`: built-in Helvetica
/// fonts, approximate metrics, no wrapping or pagination. Enough to
/// rasterize a composed invoice; anything fancier belongs in a real engine
/// behind the same trait.
pub struct LopdfEngine {
    chunk_size: usize,
}

impl Default for LopdfEngine {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl LopdfEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RenderEngine for LopdfEngine {
    async fn render(
        &self,
        doc: &Document,
        events: async_channel::Sender<RenderEvent>,
    ) -> Result<(), RenderError> {
        // Painting is CPU-bound; keep it off the async runtime's workers.
        let doc = doc.clone();
        let bytes = tokio::task::spawn_blocking(move || paint::paint(&doc))
            .await
            .map_err(|e| RenderError::Other(format!("render task failed: {e}")))??;

        for chunk in bytes.chunks(self.chunk_size) {
            events
                .send(RenderEvent::Chunk(chunk.to_vec()))
                .await
                .map_err(|_| RenderError::ChannelClosed)?;
        }
        events
            .send(RenderEvent::End)
            .await
            .map_err(|_| RenderError::ChannelClosed)?;
        Ok(())
    }
}
