use std::any::Any;
use std::fmt;

/// Opaque codec-specific configuration, passed through [`CodecContext`]
/// uninterpreted by the dispatch layer.
///
/// Each codec that takes options documents its own options struct and
/// retrieves it with [`CodecContext::options_as`]; a value meant for a
/// different codec is indistinguishable from no value at all.
pub trait CodecOptions: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + fmt::Debug + Send + Sync> CodecOptions for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Per-call context for compression.
///
/// Every field is independently optional, and absence is the default. A
/// codec that does not use a field must accept the default context and
/// produce the same output as with any irrelevant value supplied: passing
/// a dimensionless codec no dimensions is not an error.
///
/// Decompression takes no context; codecs that need spatial layout to
/// invert their transform embed it in their encoded stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodecContext<'a> {
    /// Length of the x dimension of the pixel data, if known.
    pub width: Option<usize>,
    /// Length of the y dimension of the pixel data, if known.
    pub height: Option<usize>,
    /// Axis lengths beyond the 2D plane (e.g. channel count, tile depth),
    /// if known.
    pub extra_dims: Option<&'a [usize]>,
    /// Codec-specific options, if any.
    pub options: Option<&'a dyn CodecOptions>,
}

impl<'a> CodecContext<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dimensions(mut self, width: usize, height: usize) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_extra_dims(mut self, extra_dims: &'a [usize]) -> Self {
        self.extra_dims = Some(extra_dims);
        self
    }

    pub fn with_options(mut self, options: &'a dyn CodecOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// This codec's own options, when present and of the expected type.
    ///
    /// Absent options and options addressed to another codec both come back
    /// as `None`; the codec then falls back to its construction-time
    /// defaults.
    pub fn options_as<T: 'static>(&self) -> Option<&T> {
        self.options
            .and_then(|options| options.as_any().downcast_ref::<T>())
    }

    /// Product of the extra axis lengths; 1 when none were supplied.
    pub fn extra_dim_product(&self) -> usize {
        self.extra_dims
            .map(|dims| dims.iter().product())
            .unwrap_or(1)
    }
}
