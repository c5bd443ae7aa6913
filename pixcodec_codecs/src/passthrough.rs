use pixcodec_core::{Codec, CodecContext, CodecError};

use crate::TAG_PASSTHROUGH;

/// No-op codec: stores planes verbatim, with no compression.
///
/// Useful for:
/// - Exercising the dispatch contract independently of any real transform.
/// - Data that is already compressed, where a second pass would expand it.
///
/// Ignores all context fields. Empty input stays empty in both directions.
#[derive(Debug)]
pub struct PassthroughCodec;

impl Codec for PassthroughCodec {
    fn tag(&self) -> u16 {
        TAG_PASSTHROUGH
    }

    fn name(&self) -> &'static str {
        "passthrough"
    }

    fn compress_plane(
        &self,
        plane: &[u8],
        _ctx: &CodecContext<'_>,
    ) -> Result<Vec<u8>, CodecError> {
        Ok(plane.to_vec())
    }

    fn decompress_plane(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        Ok(data.to_vec())
    }
}
