use pixcodec_core::{Codec, CodecContext, CodecError};
use weezl::{decode, encode, BitOrder};

use crate::TAG_LZW;

/// TIFF-variant LZW codec, built on `weezl`.
///
/// MSB-first bit order with 8-bit symbols. `early_change` selects the TIFF
/// behavior of widening codes one dictionary entry early; it must agree
/// between the two directions, so it is fixed at construction rather than
/// passed per call. The default is the TIFF behavior.
///
/// Ignores all context fields. Empty input stays empty in both directions;
/// decompression rejects invalid code streams.
#[derive(Debug)]
pub struct LzwCodec {
    early_change: bool,
}

impl LzwCodec {
    pub fn new(early_change: bool) -> Self {
        Self { early_change }
    }

    fn encoder(&self) -> encode::Encoder {
        if self.early_change {
            encode::Encoder::with_tiff_size_switch(BitOrder::Msb, 8)
        } else {
            encode::Encoder::new(BitOrder::Msb, 8)
        }
    }

    fn decoder(&self) -> decode::Decoder {
        if self.early_change {
            decode::Decoder::with_tiff_size_switch(BitOrder::Msb, 8)
        } else {
            decode::Decoder::new(BitOrder::Msb, 8)
        }
    }
}

impl Default for LzwCodec {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Codec for LzwCodec {
    fn tag(&self) -> u16 {
        TAG_LZW
    }

    fn name(&self) -> &'static str {
        "lzw"
    }

    fn compress_plane(
        &self,
        plane: &[u8],
        _ctx: &CodecContext<'_>,
    ) -> Result<Vec<u8>, CodecError> {
        if plane.is_empty() {
            return Ok(Vec::new());
        }
        self.encoder()
            .encode(plane)
            .map_err(|e| CodecError::compress(self.name(), e.to_string()))
    }

    fn decompress_plane(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        if data.is_empty() {
            return Ok(Vec::new());
        }
        self.decoder()
            .decode(data)
            .map_err(|e| CodecError::decompress(self.name(), e.to_string()))
    }
}
