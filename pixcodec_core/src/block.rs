/// Raw pixel data handed to a codec: one flat buffer, or an ordered
/// sequence of bands (rows, planes, or tiles) that together form one
/// logical image.
///
/// Blocks are borrowed for the duration of a codec call and never retained
/// by the codec afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelBlock {
    Plane(Vec<u8>),
    Bands(Vec<Vec<u8>>),
}

/// Compressed bytes, in the same shape as the input they were produced from:
/// a flat plane compresses to a flat buffer, banded input to one compressed
/// buffer per band.
pub type CompressedBlock = PixelBlock;

impl PixelBlock {
    /// Total payload size in bytes across all buffers.
    pub fn len(&self) -> usize {
        match self {
            PixelBlock::Plane(plane) => plane.len(),
            PixelBlock::Bands(bands) => bands.iter().map(Vec::len).sum(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of buffers: 1 for a flat plane, the band count otherwise.
    #[inline]
    pub fn band_count(&self) -> usize {
        match self {
            PixelBlock::Plane(_) => 1,
            PixelBlock::Bands(bands) => bands.len(),
        }
    }

    /// Concatenate into a single flat buffer, consuming the block.
    ///
    /// For banded data this is the logical image content in band order.
    pub fn into_flat(self) -> Vec<u8> {
        match self {
            PixelBlock::Plane(plane) => plane,
            PixelBlock::Bands(bands) => bands.concat(),
        }
    }
}

impl From<Vec<u8>> for PixelBlock {
    fn from(plane: Vec<u8>) -> Self {
        PixelBlock::Plane(plane)
    }
}

impl From<Vec<Vec<u8>>> for PixelBlock {
    fn from(bands: Vec<Vec<u8>>) -> Self {
        PixelBlock::Bands(bands)
    }
}
