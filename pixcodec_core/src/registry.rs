use std::collections::BTreeMap;
use std::sync::Arc;

use crate::codec::Codec;
use crate::error::CodecError;

/// Lookup table mapping a format's compression tag to a codec instance.
///
/// Registration is where the contract's capability rules are enforced:
/// shape-asymmetric capability sets, codecs providing no operation at all,
/// and tag collisions are all rejected up front, so every codec handed out
/// by `get` is usable interchangeably through the `Codec` dispatch methods.
#[derive(Default)]
pub struct CodecRegistry {
    codecs: BTreeMap<u16, Arc<dyn Codec>>,
}

impl CodecRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `codec` under its own tag.
    pub fn register(&mut self, codec: Arc<dyn Codec>) -> Result<(), CodecError> {
        let caps = codec.capabilities();
        if !caps.any() {
            return Err(CodecError::InvalidCapabilities {
                codec: codec.name(),
                reason: "no supported operations",
            });
        }
        if !caps.shape_symmetric() {
            return Err(CodecError::InvalidCapabilities {
                codec: codec.name(),
                reason: "a supported direction must cover both buffer shapes",
            });
        }
        let tag = codec.tag();
        if self.codecs.contains_key(&tag) {
            return Err(CodecError::DuplicateTag(tag));
        }
        self.codecs.insert(tag, codec);
        Ok(())
    }

    /// Resolve a compression tag to its codec.
    pub fn get(&self, tag: u16) -> Result<Arc<dyn Codec>, CodecError> {
        self.codecs
            .get(&tag)
            .cloned()
            .ok_or(CodecError::UnknownTag(tag))
    }

    /// All registered codecs, in tag order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Codec>> {
        self.codecs.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}
