use pixcodec_core::{Codec, CodecContext, CodecError};

use crate::TAG_ZSTD;

/// Zstandard codec.
///
/// Each plane is compressed as one independent frame with `zstd` at the
/// configured level (default 3), overridable per call with [`ZstdOptions`].
/// Ignores dimensions. An empty plane compresses to a valid empty frame;
/// decompression rejects an empty byte stream.
#[derive(Debug)]
pub struct ZstdCodec {
    /// Compression level (1 = fast / larger, 22 = slow / smallest).
    pub level: i32,
}

/// Per-call options for [`ZstdCodec`].
#[derive(Debug, Clone, Copy)]
pub struct ZstdOptions {
    pub level: i32,
}

impl Default for ZstdCodec {
    fn default() -> Self {
        Self { level: 3 }
    }
}

impl ZstdCodec {
    pub fn new(level: i32) -> Self {
        Self { level }
    }
}

impl Codec for ZstdCodec {
    fn tag(&self) -> u16 {
        TAG_ZSTD
    }

    fn name(&self) -> &'static str {
        "zstd"
    }

    fn compress_plane(
        &self,
        plane: &[u8],
        ctx: &CodecContext<'_>,
    ) -> Result<Vec<u8>, CodecError> {
        let level = ctx.options_as::<ZstdOptions>().map_or(self.level, |o| o.level);
        zstd::bulk::compress(plane, level)
            .map_err(|e| CodecError::compress(self.name(), e.to_string()))
    }

    fn decompress_plane(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        if data.is_empty() {
            return Err(CodecError::decompress(self.name(), "empty stream"));
        }
        zstd::decode_all(data).map_err(|e| CodecError::decompress(self.name(), e.to_string()))
    }
}
