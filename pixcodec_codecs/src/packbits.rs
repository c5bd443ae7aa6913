use pixcodec_core::{Codec, CodecContext, CodecError};

use crate::TAG_PACKBITS;

/// TIFF PackBits codec.
///
/// Control byte semantics (TIFF 6.0, section 9):
/// - `0..=127`: copy the next `n + 1` bytes literally.
/// - `129..=255`: repeat the next byte `257 - n` times.
/// - `128`: no-op, skipped on decode and never emitted on encode.
///
/// Ignores all context fields. Empty input stays empty in both directions;
/// decompression rejects literal or repeat runs that read past the end of
/// the stream.
#[derive(Debug)]
pub struct PackbitsCodec;

impl Codec for PackbitsCodec {
    fn tag(&self) -> u16 {
        TAG_PACKBITS
    }

    fn name(&self) -> &'static str {
        "packbits"
    }

    fn compress_plane(
        &self,
        plane: &[u8],
        _ctx: &CodecContext<'_>,
    ) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::with_capacity(plane.len() + plane.len() / 128 + 1);
        let mut i = 0;
        while i < plane.len() {
            // Length of the repeat run starting at i, capped at 128.
            let mut run = 1;
            while run < 128 && i + run < plane.len() && plane[i + run] == plane[i] {
                run += 1;
            }
            if run >= 2 {
                out.push((257 - run) as u8);
                out.push(plane[i]);
                i += run;
            } else {
                // Literal run: gather bytes until a repeat of 3+ starts or
                // the 128-byte cap is hit.
                let start = i;
                i += 1;
                while i < plane.len() && i - start < 128 {
                    if i + 2 < plane.len() && plane[i] == plane[i + 1] && plane[i] == plane[i + 2]
                    {
                        break;
                    }
                    i += 1;
                }
                out.push((i - start - 1) as u8);
                out.extend_from_slice(&plane[start..i]);
            }
        }
        Ok(out)
    }

    fn decompress_plane(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::with_capacity(data.len() * 2);
        let mut i = 0;
        while i < data.len() {
            let control = data[i];
            i += 1;
            if control == 128 {
                continue;
            }
            if control < 128 {
                let n = control as usize + 1;
                if i + n > data.len() {
                    return Err(CodecError::decompress(
                        self.name(),
                        "literal run past end of stream",
                    ));
                }
                out.extend_from_slice(&data[i..i + n]);
                i += n;
            } else {
                let n = 257 - control as usize;
                if i >= data.len() {
                    return Err(CodecError::decompress(
                        self.name(),
                        "repeat run missing its value byte",
                    ));
                }
                out.resize(out.len() + n, data[i]);
                i += 1;
            }
        }
        Ok(out)
    }
}
