use pixcodec_core::{Codec, CodecContext, CodecError};

use crate::TAG_RLE;

/// Byte-oriented run-length codec.
///
/// Encoded layout: a sequence of `[count, value]` pairs with `count >= 1`;
/// runs longer than 255 bytes span multiple pairs. Ignores all context
/// fields. Empty input stays empty in both directions; decompression rejects
/// odd-length input and zero-length runs.
#[derive(Debug)]
pub struct RleCodec;

impl Codec for RleCodec {
    fn tag(&self) -> u16 {
        TAG_RLE
    }

    fn name(&self) -> &'static str {
        "rle"
    }

    fn compress_plane(
        &self,
        plane: &[u8],
        _ctx: &CodecContext<'_>,
    ) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::with_capacity(plane.len() / 2 + 2);
        let mut i = 0;
        while i < plane.len() {
            let value = plane[i];
            let mut run = 1;
            while run < 255 && i + run < plane.len() && plane[i + run] == value {
                run += 1;
            }
            out.push(run as u8);
            out.push(value);
            i += run;
        }
        Ok(out)
    }

    fn decompress_plane(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        if data.len() % 2 != 0 {
            return Err(CodecError::decompress(self.name(), "truncated run pair"));
        }
        let mut out = Vec::with_capacity(data.len());
        for pair in data.chunks_exact(2) {
            let (count, value) = (pair[0], pair[1]);
            if count == 0 {
                return Err(CodecError::decompress(self.name(), "zero-length run"));
            }
            out.resize(out.len() + count as usize, value);
        }
        Ok(out)
    }
}
