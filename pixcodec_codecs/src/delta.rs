use pixcodec_core::{Codec, CodecContext, CodecError};

use crate::TAG_DELTA;

/// Stream header: `[row_len: u32 LE][channels: u16 LE]`.
const HEADER_LEN: usize = 6;

/// Horizontal differencing predictor.
///
/// Replaces each sample with its difference from the previous sample of the
/// same channel in the same row, turning smooth gradients into long
/// near-constant runs for a downstream entropy coder. Operates on 8-bit
/// samples; wider samples are differenced bytewise.
///
/// Context use:
/// - `width`: samples per row. Absent: the whole plane is one row.
/// - `height`: when present together with `width`,
///   `width * height * channels` must equal the plane length exactly.
/// - `extra_dims`: the interleaved channel count is their product
///   (default 1); differencing reaches back `channels` bytes so channels
///   stay independent.
///
/// The encoded stream is self-describing (the header carries the row
/// stride and channel count), so decompression needs no context. Empty
/// input stays empty in both directions; decompression rejects truncated or
/// invalid headers and payloads that are not a whole number of rows.
#[derive(Debug)]
pub struct DeltaCodec;

impl DeltaCodec {
    /// Resolve (row_len, channels) from the context, validating that the
    /// declared geometry matches the plane length.
    fn row_layout(
        &self,
        plane_len: usize,
        ctx: &CodecContext<'_>,
    ) -> Result<(usize, usize), CodecError> {
        let channels = ctx.extra_dim_product();
        if channels == 0 {
            return Err(CodecError::compress(
                self.name(),
                "zero-length extra dimension",
            ));
        }
        let row_len = match ctx.width {
            Some(0) => {
                return Err(CodecError::compress(self.name(), "zero-width rows"));
            }
            Some(width) => width * channels,
            None => plane_len,
        };
        if let (Some(_), Some(height)) = (ctx.width, ctx.height) {
            if row_len * height != plane_len {
                return Err(CodecError::compress(
                    self.name(),
                    format!(
                        "declared dimensions cover {} bytes but plane holds {}",
                        row_len * height,
                        plane_len
                    ),
                ));
            }
        }
        if row_len > 0 && plane_len % row_len != 0 {
            return Err(CodecError::compress(
                self.name(),
                format!(
                    "plane length {} is not a whole number of {}-byte rows",
                    plane_len, row_len
                ),
            ));
        }
        Ok((row_len, channels))
    }
}

impl Codec for DeltaCodec {
    fn tag(&self) -> u16 {
        TAG_DELTA
    }

    fn name(&self) -> &'static str {
        "delta"
    }

    fn compress_plane(
        &self,
        plane: &[u8],
        ctx: &CodecContext<'_>,
    ) -> Result<Vec<u8>, CodecError> {
        if plane.is_empty() {
            return Ok(Vec::new());
        }
        let (row_len, channels) = self.row_layout(plane.len(), ctx)?;
        if row_len > u32::MAX as usize || channels > u16::MAX as usize {
            return Err(CodecError::compress(
                self.name(),
                "row stride too large for the stream header",
            ));
        }
        let mut out = Vec::with_capacity(HEADER_LEN + plane.len());
        out.extend_from_slice(&(row_len as u32).to_le_bytes());
        out.extend_from_slice(&(channels as u16).to_le_bytes());
        for row in plane.chunks_exact(row_len) {
            // The first sample of each channel is stored verbatim.
            out.extend_from_slice(&row[..channels.min(row_len)]);
            for i in channels..row_len {
                out.push(row[i].wrapping_sub(row[i - channels]));
            }
        }
        Ok(out)
    }

    fn decompress_plane(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        if data.is_empty() {
            return Ok(Vec::new());
        }
        if data.len() < HEADER_LEN {
            return Err(CodecError::decompress(self.name(), "truncated stream header"));
        }
        let (header, payload) = data.split_at(HEADER_LEN);
        let row_len = u32::from_le_bytes([header[0], header[1], header[2], header[3]]) as usize;
        let channels = u16::from_le_bytes([header[4], header[5]]) as usize;
        if row_len == 0 || channels == 0 {
            return Err(CodecError::decompress(self.name(), "invalid stream header"));
        }
        if payload.len() % row_len != 0 {
            return Err(CodecError::decompress(
                self.name(),
                format!(
                    "payload of {} bytes is not a whole number of {}-byte rows",
                    payload.len(),
                    row_len
                ),
            ));
        }
        let mut out = Vec::with_capacity(payload.len());
        for row in payload.chunks_exact(row_len) {
            let base = out.len();
            out.extend_from_slice(row);
            for i in channels..row_len {
                out[base + i] = out[base + i].wrapping_add(out[base + i - channels]);
            }
        }
        Ok(out)
    }
}
