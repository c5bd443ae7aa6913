use thiserror::Error;

/// Errors produced by codec operations and registry lookups.
///
/// Compression and decompression failures carry the codec name and the
/// reason the content was rejected. Absent optional parameters are never an
/// error condition; only malformed content, capability misses, and registry
/// contract violations are.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The input block's content or shape cannot be compressed by this codec.
    #[error("{codec}: cannot compress block: {reason}")]
    Compress { codec: &'static str, reason: String },

    /// The input bytes are not valid compressed data for this codec.
    #[error("{codec}: invalid compressed data: {reason}")]
    Decompress { codec: &'static str, reason: String },

    /// The codec does not provide the requested operation.
    #[error("{codec} does not support {op}")]
    Unsupported { codec: &'static str, op: &'static str },

    /// No codec is registered under this compression tag.
    #[error("unknown compression tag {0}")]
    UnknownTag(u16),

    /// The codec declared a capability set the contract forbids.
    #[error("codec {codec} rejected at registration: {reason}")]
    InvalidCapabilities {
        codec: &'static str,
        reason: &'static str,
    },

    /// Another codec already owns this compression tag.
    #[error("compression tag {0} is already registered")]
    DuplicateTag(u16),
}

impl CodecError {
    pub fn compress(codec: &'static str, reason: impl Into<String>) -> Self {
        CodecError::Compress {
            codec,
            reason: reason.into(),
        }
    }

    pub fn decompress(codec: &'static str, reason: impl Into<String>) -> Self {
        CodecError::Decompress {
            codec,
            reason: reason.into(),
        }
    }

    pub fn unsupported(codec: &'static str, op: &'static str) -> Self {
        CodecError::Unsupported { codec, op }
    }
}
