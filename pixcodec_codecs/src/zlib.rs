use std::io::Write;

use flate2::write::{ZlibDecoder, ZlibEncoder};
use flate2::Compression;
use pixcodec_core::{Codec, CodecContext, CodecError};

use crate::TAG_ZLIB;

/// Zlib (RFC 1950) codec backed by `flate2`.
///
/// The construction-time level can be overridden per call with
/// [`ZlibOptions`]. Ignores dimensions. An empty plane compresses to a
/// valid empty stream; decompression rejects an empty byte stream.
#[derive(Debug)]
pub struct ZlibCodec {
    /// Compression level, 0 (store) to 9 (smallest).
    pub level: u32,
}

/// Per-call options for [`ZlibCodec`].
#[derive(Debug, Clone, Copy)]
pub struct ZlibOptions {
    pub level: u32,
}

impl Default for ZlibCodec {
    fn default() -> Self {
        Self { level: 6 }
    }
}

impl ZlibCodec {
    pub fn new(level: u32) -> Self {
        Self { level }
    }
}

impl Codec for ZlibCodec {
    fn tag(&self) -> u16 {
        TAG_ZLIB
    }

    fn name(&self) -> &'static str {
        "zlib"
    }

    fn compress_plane(
        &self,
        plane: &[u8],
        ctx: &CodecContext<'_>,
    ) -> Result<Vec<u8>, CodecError> {
        let level = ctx.options_as::<ZlibOptions>().map_or(self.level, |o| o.level);
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(level));
        encoder
            .write_all(plane)
            .map_err(|e| CodecError::compress(self.name(), e.to_string()))?;
        encoder
            .finish()
            .map_err(|e| CodecError::compress(self.name(), e.to_string()))
    }

    fn decompress_plane(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        if data.is_empty() {
            return Err(CodecError::decompress(self.name(), "empty stream"));
        }
        let mut decoder = ZlibDecoder::new(Vec::new());
        decoder
            .write_all(data)
            .map_err(|e| CodecError::decompress(self.name(), e.to_string()))?;
        decoder
            .finish()
            .map_err(|e| CodecError::decompress(self.name(), e.to_string()))
    }
}
