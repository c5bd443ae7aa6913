use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use pixcodec_core::{Codec, CodecContext, CodecError};

use crate::TAG_LZ4;

/// LZ4 block codec.
///
/// Fastest decompression of the bundled codecs; the wire form is the
/// `lz4_flex` size-prepended block. Ignores all context fields. An empty
/// plane compresses to a valid frame; decompression rejects an empty byte
/// stream.
#[derive(Debug)]
pub struct Lz4Codec;

impl Codec for Lz4Codec {
    fn tag(&self) -> u16 {
        TAG_LZ4
    }

    fn name(&self) -> &'static str {
        "lz4"
    }

    fn compress_plane(
        &self,
        plane: &[u8],
        _ctx: &CodecContext<'_>,
    ) -> Result<Vec<u8>, CodecError> {
        Ok(compress_prepend_size(plane))
    }

    fn decompress_plane(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        if data.is_empty() {
            return Err(CodecError::decompress(self.name(), "empty stream"));
        }
        decompress_size_prepended(data)
            .map_err(|e| CodecError::decompress(self.name(), e.to_string()))
    }
}
