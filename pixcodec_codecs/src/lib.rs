mod delta;
mod lz4_codec;
mod lzw;
mod packbits;
mod passthrough;
mod rle;
mod zlib;
mod zstd_codec;

pub use delta::DeltaCodec;
pub use lz4_codec::Lz4Codec;
pub use lzw::LzwCodec;
pub use packbits::PackbitsCodec;
pub use passthrough::PassthroughCodec;
pub use rle::RleCodec;
pub use zlib::{ZlibCodec, ZlibOptions};
pub use zstd_codec::{ZstdCodec, ZstdOptions};

use std::sync::Arc;

use pixcodec_core::{Codec, CodecError, CodecRegistry};

// ── Compression tags ───────────────────────────────────────────────────────

pub const TAG_PASSTHROUGH: u16 = 0;
pub const TAG_ZSTD: u16 = 1;
pub const TAG_LZ4: u16 = 2;
pub const TAG_DELTA: u16 = 3;
pub const TAG_ZLIB: u16 = 4;
pub const TAG_PACKBITS: u16 = 5;
pub const TAG_RLE: u16 = 6;
pub const TAG_LZW: u16 = 7;

/// Resolve a codec from the compression tag stored by a container format.
///
/// Called by format readers after parsing a file's compression field, so
/// decompression can proceed without knowing which algorithm is in play.
/// Codecs come back at default settings; formats that need specific
/// configuration construct the codec directly instead.
pub fn codec_by_tag(tag: u16) -> Result<Arc<dyn Codec>, CodecError> {
    match tag {
        TAG_PASSTHROUGH => Ok(Arc::new(PassthroughCodec)),
        TAG_ZSTD => Ok(Arc::new(ZstdCodec::default())),
        TAG_LZ4 => Ok(Arc::new(Lz4Codec)),
        TAG_DELTA => Ok(Arc::new(DeltaCodec)),
        TAG_ZLIB => Ok(Arc::new(ZlibCodec::default())),
        TAG_PACKBITS => Ok(Arc::new(PackbitsCodec)),
        TAG_RLE => Ok(Arc::new(RleCodec)),
        TAG_LZW => Ok(Arc::new(LzwCodec::default())),
        _ => Err(CodecError::UnknownTag(tag)),
    }
}

/// Registry pre-populated with every bundled codec at default settings.
pub fn bundled_registry() -> CodecRegistry {
    let mut registry = CodecRegistry::new();
    let codecs: Vec<Arc<dyn Codec>> = vec![
        Arc::new(PassthroughCodec),
        Arc::new(ZstdCodec::default()),
        Arc::new(Lz4Codec),
        Arc::new(DeltaCodec),
        Arc::new(ZlibCodec::default()),
        Arc::new(PackbitsCodec),
        Arc::new(RleCodec),
        Arc::new(LzwCodec::default()),
    ];
    for codec in codecs {
        registry
            .register(codec)
            .expect("bundled codecs have unique tags and symmetric capabilities");
    }
    registry
}
