use crate::block::{CompressedBlock, PixelBlock};
use crate::context::CodecContext;
use crate::error::CodecError;

/// Which operations a codec provides, split by direction and buffer shape.
///
/// The contract requires shape symmetry per direction: a codec that
/// compresses flat planes must also compress banded input, and likewise for
/// decompression, so a caller picking the "wrong" buffer shape can never
/// silently fall into different semantics. Direction asymmetry is fine:
/// compress-only and decompress-only codecs (e.g. readers of legacy data)
/// are legal. `CodecRegistry::register` enforces this at registration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub compress_plane: bool,
    pub compress_bands: bool,
    pub decompress_plane: bool,
    pub decompress_bands: bool,
}

impl Capabilities {
    /// Full support in both directions (the common case).
    pub const fn encode_decode() -> Self {
        Self {
            compress_plane: true,
            compress_bands: true,
            decompress_plane: true,
            decompress_bands: true,
        }
    }

    /// Read side only: the codec can decompress stored data but never
    /// produce it.
    pub const fn decode_only() -> Self {
        Self {
            compress_plane: false,
            compress_bands: false,
            decompress_plane: true,
            decompress_bands: true,
        }
    }

    /// Write side only.
    pub const fn encode_only() -> Self {
        Self {
            compress_plane: true,
            compress_bands: true,
            decompress_plane: false,
            decompress_bands: false,
        }
    }

    /// True when each supported direction covers both buffer shapes.
    pub const fn shape_symmetric(&self) -> bool {
        self.compress_plane == self.compress_bands
            && self.decompress_plane == self.decompress_bands
    }

    /// True when at least one operation is supported.
    pub const fn any(&self) -> bool {
        self.compress_plane
            || self.compress_bands
            || self.decompress_plane
            || self.decompress_bands
    }
}

/// Core compression abstraction.
///
/// Each `Codec` implementation:
/// - Is identified by a stable numeric `tag()` that container formats store
///   and the registry resolves.
/// - Is a pure transform over its inputs: no mutable state across calls, so
///   one instance may serve concurrent per-tile calls without coordination.
///   Configuration (a compression level, an algorithm variant) is fixed at
///   construction.
/// - Must tolerate absent context fields. A codec that does not use
///   dimensions or options accepts the default `CodecContext` and produces
///   the same output as with any irrelevant value supplied.
///
/// The provided `compress`/`decompress` methods are the dispatch layer: they
/// check `capabilities()` and route by buffer shape, so the output shape
/// always mirrors the input shape and an unsupported operation surfaces as a
/// typed error instead of wrong semantics.
pub trait Codec: Send + Sync + std::fmt::Debug {
    /// Stable compression tag resolved by the registry.
    fn tag(&self) -> u16;

    /// Human-readable codec name for CLI display and error messages.
    fn name(&self) -> &'static str;

    /// Which operations this codec provides. Defaults to full support.
    fn capabilities(&self) -> Capabilities {
        Capabilities::encode_decode()
    }

    /// Compress a single flat plane.
    fn compress_plane(
        &self,
        plane: &[u8],
        ctx: &CodecContext<'_>,
    ) -> Result<Vec<u8>, CodecError> {
        let _ = (plane, ctx);
        Err(CodecError::unsupported(self.name(), "compression"))
    }

    /// Compress an ordered sequence of bands forming one logical image.
    ///
    /// The default compresses each band independently, which keeps the
    /// banded result exactly the per-band result. Codecs that predict across
    /// bands may override this together with `decompress_bands`.
    fn compress_bands(
        &self,
        bands: &[Vec<u8>],
        ctx: &CodecContext<'_>,
    ) -> Result<Vec<Vec<u8>>, CodecError> {
        bands
            .iter()
            .map(|band| self.compress_plane(band, ctx))
            .collect()
    }

    /// Decompress a single flat buffer.
    fn decompress_plane(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        let _ = data;
        Err(CodecError::unsupported(self.name(), "decompression"))
    }

    /// Decompress an ordered sequence of bands; inverse of `compress_bands`.
    fn decompress_bands(&self, bands: &[Vec<u8>]) -> Result<Vec<Vec<u8>>, CodecError> {
        bands
            .iter()
            .map(|band| self.decompress_plane(band))
            .collect()
    }

    /// Compress a block of data, routing by buffer shape.
    ///
    /// The result mirrors the input shape. Fails with
    /// `CodecError::Unsupported` when the codec does not provide the
    /// required direction, and with `CodecError::Compress` when the block
    /// content is structurally incompatible with the codec.
    fn compress(
        &self,
        block: &PixelBlock,
        ctx: &CodecContext<'_>,
    ) -> Result<CompressedBlock, CodecError> {
        let caps = self.capabilities();
        match block {
            PixelBlock::Plane(plane) => {
                if !caps.compress_plane {
                    return Err(CodecError::unsupported(self.name(), "compression"));
                }
                Ok(PixelBlock::Plane(self.compress_plane(plane, ctx)?))
            }
            PixelBlock::Bands(bands) => {
                if !caps.compress_bands {
                    return Err(CodecError::unsupported(self.name(), "banded compression"));
                }
                Ok(PixelBlock::Bands(self.compress_bands(bands, ctx)?))
            }
        }
    }

    /// Decompress a block of data, routing by buffer shape; inverse of
    /// `compress`.
    ///
    /// Fails with `CodecError::Decompress` when the bytes are not valid
    /// compressed data for this codec; never succeeds with garbage output.
    fn decompress(&self, block: &CompressedBlock) -> Result<PixelBlock, CodecError> {
        let caps = self.capabilities();
        match block {
            PixelBlock::Plane(data) => {
                if !caps.decompress_plane {
                    return Err(CodecError::unsupported(self.name(), "decompression"));
                }
                Ok(PixelBlock::Plane(self.decompress_plane(data)?))
            }
            PixelBlock::Bands(bands) => {
                if !caps.decompress_bands {
                    return Err(CodecError::unsupported(self.name(), "banded decompression"));
                }
                Ok(PixelBlock::Bands(self.decompress_bands(bands)?))
            }
        }
    }
}
