/// Behavior tests for the bundled codecs: round-trip fidelity, the
/// documented empty-input and malformed-input policies, optional-parameter
/// tolerance, and multi-band equivalence.
use std::sync::Arc;

use pixcodec_codecs::{
    bundled_registry, codec_by_tag, DeltaCodec, Lz4Codec, LzwCodec, PackbitsCodec,
    PassthroughCodec, RleCodec, ZlibCodec, ZlibOptions, ZstdCodec, ZstdOptions, TAG_DELTA,
    TAG_LZ4, TAG_LZW, TAG_PACKBITS, TAG_PASSTHROUGH, TAG_RLE, TAG_ZLIB, TAG_ZSTD,
};
use pixcodec_core::{Codec, CodecContext, CodecError, PixelBlock};

/// Generate `len` deterministic bytes using a simple LCG.
fn pseudo_random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = seed;
    (0..len)
        .map(|_| {
            rng = rng
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (rng >> 56) as u8
        })
        .collect()
}

/// Generate `len` highly compressible bytes (repeating pattern).
fn compressible_bytes(len: usize) -> Vec<u8> {
    let pattern = b"the quick brown fox jumps over the lazy dog. ";
    (0..len).map(|i| pattern[i % pattern.len()]).collect()
}

/// A smooth ramp with short runs: representative of real pixel planes.
fn gradient_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i / 4) as u8).collect()
}

fn all_codecs() -> Vec<Arc<dyn Codec>> {
    bundled_registry().iter().cloned().collect()
}

// ── round-trip law ─────────────────────────────────────────────────────────

#[test]
fn every_codec_round_trips_a_flat_plane() {
    let data = gradient_bytes(4096);
    for codec in all_codecs() {
        let compressed = codec
            .compress_plane(&data, &CodecContext::new())
            .unwrap_or_else(|e| panic!("{} compress failed: {e}", codec.name()));
        let restored = codec
            .decompress_plane(&compressed)
            .unwrap_or_else(|e| panic!("{} decompress failed: {e}", codec.name()));
        assert_eq!(restored, data, "{} round trip must be byte-exact", codec.name());
    }
}

#[test]
fn every_codec_round_trips_incompressible_data() {
    let data = pseudo_random_bytes(2048, 0xDEAD_BEEF);
    for codec in all_codecs() {
        let compressed = codec.compress_plane(&data, &CodecContext::new()).unwrap();
        let restored = codec.decompress_plane(&compressed).unwrap();
        assert_eq!(restored, data, "{} must not corrupt high-entropy data", codec.name());
    }
}

#[test]
fn every_codec_round_trips_banded_input() {
    let bands = vec![
        gradient_bytes(512),
        vec![0u8; 300],
        pseudo_random_bytes(129, 42),
    ];
    for codec in all_codecs() {
        let ctx = CodecContext::new();
        let compressed = codec.compress_bands(&bands, &ctx).unwrap();
        assert_eq!(compressed.len(), bands.len(), "{}: band count", codec.name());
        let restored = codec.decompress_bands(&compressed).unwrap();
        assert_eq!(restored, bands, "{} banded round trip", codec.name());
    }
}

#[test]
fn dispatch_preserves_shape_for_every_codec() {
    let block = PixelBlock::Bands(vec![vec![1u8; 64], vec![2u8; 64]]);
    let ctx = CodecContext::new();
    for codec in all_codecs() {
        let compressed = codec.compress(&block, &ctx).unwrap();
        assert_eq!(compressed.band_count(), 2, "{}", codec.name());
        assert_eq!(codec.decompress(&compressed).unwrap(), block, "{}", codec.name());
    }
}

// ── rle ────────────────────────────────────────────────────────────────────

#[test]
fn rle_encodes_short_runs_compactly() {
    let codec = RleCodec;
    let data = [0u8, 0, 0, 1, 1, 1, 2, 2, 2];

    let compressed = codec.compress_plane(&data, &CodecContext::new()).unwrap();
    assert_eq!(compressed, vec![3, 0, 3, 1, 3, 2]);
    assert!(compressed.len() < data.len());
    assert_eq!(codec.decompress_plane(&compressed).unwrap(), data);
}

#[test]
fn rle_splits_runs_longer_than_255() {
    let codec = RleCodec;
    let data = vec![0u8; 700];
    let compressed = codec.compress_plane(&data, &CodecContext::new()).unwrap();
    assert_eq!(compressed, vec![255, 0, 255, 0, 190, 0]);
    assert_eq!(codec.decompress_plane(&compressed).unwrap(), data);
}

#[test]
fn rle_rejects_odd_length_input() {
    let err = RleCodec.decompress_plane(&[5, 0, 9]).unwrap_err();
    assert!(matches!(err, CodecError::Decompress { .. }), "got: {err}");
}

#[test]
fn rle_rejects_zero_length_run() {
    let err = RleCodec.decompress_plane(&[0, 7]).unwrap_err();
    assert!(matches!(err, CodecError::Decompress { .. }), "got: {err}");
}

// ── packbits ───────────────────────────────────────────────────────────────

#[test]
fn packbits_encodes_repeat_runs() {
    let codec = PackbitsCodec;
    let data = [0u8, 0, 0, 1, 1, 1, 2, 2, 2];

    let compressed = codec.compress_plane(&data, &CodecContext::new()).unwrap();
    assert_eq!(compressed, vec![254, 0, 254, 1, 254, 2]);
    assert_eq!(codec.decompress_plane(&compressed).unwrap(), data);
}

#[test]
fn packbits_round_trips_mixed_literals_and_runs() {
    let codec = PackbitsCodec;
    let mut data = pseudo_random_bytes(1000, 7);
    data.extend_from_slice(&[9u8; 400]);
    data.extend_from_slice(&pseudo_random_bytes(333, 8));

    let compressed = codec.compress_plane(&data, &CodecContext::new()).unwrap();
    assert_eq!(codec.decompress_plane(&compressed).unwrap(), data);
}

#[test]
fn packbits_rejects_literal_run_past_end() {
    // Control byte 5 promises six literal bytes; only two follow.
    let err = PackbitsCodec.decompress_plane(&[5, 1, 2]).unwrap_err();
    assert!(matches!(err, CodecError::Decompress { .. }), "got: {err}");
}

#[test]
fn packbits_rejects_repeat_run_missing_value() {
    let err = PackbitsCodec.decompress_plane(&[200]).unwrap_err();
    assert!(matches!(err, CodecError::Decompress { .. }), "got: {err}");
}

#[test]
fn packbits_truncated_by_one_byte_fails() {
    let codec = PackbitsCodec;
    let data = [0u8, 0, 0, 1, 1, 1, 2, 2, 2];
    let mut compressed = codec.compress_plane(&data, &CodecContext::new()).unwrap();
    compressed.pop();
    assert!(codec.decompress_plane(&compressed).is_err());
}

// ── lzw ────────────────────────────────────────────────────────────────────

#[test]
fn lzw_shrinks_repetitive_data() {
    let codec = LzwCodec::default();
    let data = compressible_bytes(8192);

    let compressed = codec.compress_plane(&data, &CodecContext::new()).unwrap();
    assert!(
        compressed.len() < data.len(),
        "lzw should compress repetitive text: {} -> {}",
        data.len(),
        compressed.len()
    );
    assert_eq!(codec.decompress_plane(&compressed).unwrap(), data);
}

#[test]
fn lzw_without_early_change_round_trips() {
    let codec = LzwCodec::new(false);
    let data = gradient_bytes(1024);
    let compressed = codec.compress_plane(&data, &CodecContext::new()).unwrap();
    assert_eq!(codec.decompress_plane(&compressed).unwrap(), data);
}

#[test]
fn lzw_rejects_invalid_code_stream() {
    // All-ones bits decode to codes far beyond the dictionary.
    let err = LzwCodec::default().decompress_plane(&[0xFF; 8]).unwrap_err();
    assert!(matches!(err, CodecError::Decompress { .. }), "got: {err}");
}

// ── delta ──────────────────────────────────────────────────────────────────

#[test]
fn delta_round_trips_with_full_dimensions() {
    let codec = DeltaCodec;
    let extra = [3usize];
    let ctx = CodecContext::new()
        .with_dimensions(16, 8)
        .with_extra_dims(&extra);
    let data: Vec<u8> = (0..16 * 8 * 3).map(|i| i as u8).collect();

    let compressed = codec.compress_plane(&data, &ctx).unwrap();
    assert_eq!(codec.decompress_plane(&compressed).unwrap(), data);
}

#[test]
fn delta_flattens_a_linear_ramp() {
    let codec = DeltaCodec;
    let extra = [3usize];
    let ctx = CodecContext::new()
        .with_dimensions(16, 8)
        .with_extra_dims(&extra);
    // Samples increase by 1 per byte, so every per-channel difference is 3.
    let data: Vec<u8> = (0..16 * 8 * 3).map(|i| i as u8).collect();

    let compressed = codec.compress_plane(&data, &ctx).unwrap();
    let payload = &compressed[6..];
    for row in payload.chunks_exact(48) {
        assert!(row[3..].iter().all(|&d| d == 3), "differenced row: {row:?}");
    }
}

#[test]
fn delta_without_context_treats_plane_as_one_row() {
    let codec = DeltaCodec;
    let data = gradient_bytes(100);
    let compressed = codec.compress_plane(&data, &CodecContext::new()).unwrap();
    assert_eq!(&compressed[0..4], &(100u32).to_le_bytes());
    assert_eq!(&compressed[4..6], &(1u16).to_le_bytes());
    assert_eq!(codec.decompress_plane(&compressed).unwrap(), data);
}

#[test]
fn delta_rejects_dimension_data_length_mismatch() {
    let codec = DeltaCodec;
    let ctx = CodecContext::new().with_dimensions(10, 10);
    let err = codec.compress_plane(&[0u8; 50], &ctx).unwrap_err();
    assert!(matches!(err, CodecError::Compress { .. }), "got: {err}");
}

#[test]
fn delta_rejects_partial_trailing_row() {
    let codec = DeltaCodec;
    let ctx = CodecContext {
        width: Some(16),
        ..CodecContext::default()
    };
    let err = codec.compress_plane(&[0u8; 40], &ctx).unwrap_err();
    assert!(matches!(err, CodecError::Compress { .. }), "got: {err}");
}

#[test]
fn delta_rejects_zero_width() {
    let codec = DeltaCodec;
    let ctx = CodecContext::new().with_dimensions(0, 4);
    let err = codec.compress_plane(&[0u8; 16], &ctx).unwrap_err();
    assert!(matches!(err, CodecError::Compress { .. }), "got: {err}");
}

#[test]
fn delta_rejects_truncated_header() {
    let err = DeltaCodec.decompress_plane(&[1, 2, 3]).unwrap_err();
    assert!(matches!(err, CodecError::Decompress { .. }), "got: {err}");
}

#[test]
fn delta_truncated_by_one_byte_fails() {
    let codec = DeltaCodec;
    let ctx = CodecContext::new().with_dimensions(16, 4);
    let data = gradient_bytes(64);
    let mut compressed = codec.compress_plane(&data, &ctx).unwrap();
    compressed.pop();
    assert!(codec.decompress_plane(&compressed).is_err());
}

// ── optional-parameter tolerance ───────────────────────────────────────────

#[derive(Debug)]
struct UnrelatedOptions;

#[test]
fn dimensionless_codecs_ignore_dimensions_and_foreign_options() {
    let data = compressible_bytes(1024);
    let extra = [3usize];
    let options = UnrelatedOptions;
    let loaded = CodecContext::new()
        .with_dimensions(640, 480)
        .with_extra_dims(&extra)
        .with_options(&options);

    // Every bundled codec except the dimension-aware predictor.
    let codecs: Vec<Arc<dyn Codec>> = vec![
        Arc::new(PassthroughCodec),
        Arc::new(RleCodec),
        Arc::new(PackbitsCodec),
        Arc::new(LzwCodec::default()),
        Arc::new(ZlibCodec::default()),
        Arc::new(ZstdCodec::default()),
        Arc::new(Lz4Codec),
    ];
    for codec in codecs {
        let with_ctx = codec.compress_plane(&data, &loaded).unwrap();
        let without = codec.compress_plane(&data, &CodecContext::new()).unwrap();
        assert_eq!(
            with_ctx,
            without,
            "{}: absent and irrelevant parameters must be equivalent",
            codec.name()
        );
    }
}

#[test]
fn zstd_level_can_be_overridden_per_call() {
    let codec = ZstdCodec::default();
    let data = compressible_bytes(64 * 1024);
    let options = ZstdOptions { level: 19 };
    let ctx = CodecContext::new().with_options(&options);

    let tuned = codec.compress_plane(&data, &ctx).unwrap();
    let default = codec.compress_plane(&data, &CodecContext::new()).unwrap();
    assert_eq!(codec.decompress_plane(&tuned).unwrap(), data);
    assert_eq!(codec.decompress_plane(&default).unwrap(), data);
    eprintln!(
        "zstd level 3: {} bytes, level 19: {} bytes",
        default.len(),
        tuned.len()
    );
}

#[test]
fn zlib_level_can_be_overridden_per_call() {
    let codec = ZlibCodec::default();
    let data = compressible_bytes(32 * 1024);
    let options = ZlibOptions { level: 9 };
    let ctx = CodecContext::new().with_options(&options);

    let tuned = codec.compress_plane(&data, &ctx).unwrap();
    assert_eq!(codec.decompress_plane(&tuned).unwrap(), data);
}

// ── multi-band equivalence ─────────────────────────────────────────────────

#[test]
fn banded_and_flat_content_agree_for_independent_codecs() {
    let data = gradient_bytes(3 * 64);
    let bands: Vec<Vec<u8>> = data.chunks(64).map(|chunk| chunk.to_vec()).collect();

    for codec in all_codecs() {
        let ctx = CodecContext::new();
        let flat = codec
            .decompress_plane(&codec.compress_plane(&data, &ctx).unwrap())
            .unwrap();
        let banded = codec
            .decompress_bands(&codec.compress_bands(&bands, &ctx).unwrap())
            .unwrap()
            .concat();
        assert_eq!(flat, data, "{}", codec.name());
        assert_eq!(
            banded, data,
            "{}: banded round trip must reconstruct the same logical content",
            codec.name()
        );
    }
}

#[test]
fn banded_compression_equals_per_band_compression() {
    let bands = vec![vec![1u8; 100], gradient_bytes(64)];
    for codec in all_codecs() {
        let ctx = CodecContext::new();
        let banded = codec.compress_bands(&bands, &ctx).unwrap();
        for (band, compressed) in bands.iter().zip(&banded) {
            assert_eq!(
                compressed,
                &codec.compress_plane(band, &ctx).unwrap(),
                "{}: bundled codecs compress bands independently",
                codec.name()
            );
        }
    }
}

// ── empty input ────────────────────────────────────────────────────────────

#[test]
fn transform_codecs_pass_empty_input_through() {
    let codecs: Vec<Arc<dyn Codec>> = vec![
        Arc::new(PassthroughCodec),
        Arc::new(RleCodec),
        Arc::new(PackbitsCodec),
        Arc::new(LzwCodec::default()),
        Arc::new(DeltaCodec),
    ];
    for codec in codecs {
        let compressed = codec.compress_plane(&[], &CodecContext::new()).unwrap();
        assert!(compressed.is_empty(), "{}", codec.name());
        let restored = codec.decompress_plane(&[]).unwrap();
        assert!(restored.is_empty(), "{}", codec.name());
    }
}

#[test]
fn framed_codecs_round_trip_empty_planes_but_reject_empty_streams() {
    let codecs: Vec<Arc<dyn Codec>> = vec![
        Arc::new(ZlibCodec::default()),
        Arc::new(ZstdCodec::default()),
        Arc::new(Lz4Codec),
    ];
    for codec in codecs {
        let compressed = codec.compress_plane(&[], &CodecContext::new()).unwrap();
        assert!(!compressed.is_empty(), "{}: empty plane still has a frame", codec.name());
        assert!(codec.decompress_plane(&compressed).unwrap().is_empty());

        let err = codec.decompress_plane(&[]).unwrap_err();
        assert!(matches!(err, CodecError::Decompress { .. }), "{}: {err}", codec.name());
    }
}

// ── malformed streams ──────────────────────────────────────────────────────

#[test]
fn lz4_truncated_by_one_byte_fails() {
    let codec = Lz4Codec;
    let data = compressible_bytes(512);
    let mut compressed = codec.compress_plane(&data, &CodecContext::new()).unwrap();
    compressed.pop();
    assert!(codec.decompress_plane(&compressed).is_err());
}

#[test]
fn zstd_rejects_garbage() {
    let err = ZstdCodec::default().decompress_plane(&[0x11; 16]).unwrap_err();
    assert!(matches!(err, CodecError::Decompress { .. }), "got: {err}");
}

#[test]
fn zlib_rejects_garbage() {
    // 0x00 0xFF is not a valid zlib header.
    let err = ZlibCodec::default()
        .decompress_plane(&[0x00, 0xFF, 0x55, 0x55, 0x55])
        .unwrap_err();
    assert!(matches!(err, CodecError::Decompress { .. }), "got: {err}");
}

// ── registry ───────────────────────────────────────────────────────────────

#[test]
fn every_bundled_tag_resolves_to_its_codec() {
    for tag in [
        TAG_PASSTHROUGH,
        TAG_ZSTD,
        TAG_LZ4,
        TAG_DELTA,
        TAG_ZLIB,
        TAG_PACKBITS,
        TAG_RLE,
        TAG_LZW,
    ] {
        let codec = codec_by_tag(tag).unwrap();
        assert_eq!(codec.tag(), tag, "{}", codec.name());
    }
}

#[test]
fn unknown_tag_is_a_typed_error() {
    let err = codec_by_tag(999).unwrap_err();
    assert!(matches!(err, CodecError::UnknownTag(999)), "got: {err}");
}

#[test]
fn bundled_registry_holds_all_codecs() {
    let registry = bundled_registry();
    assert_eq!(registry.len(), 8);
}

#[test]
fn every_bundled_codec_has_shape_symmetric_capabilities() {
    for codec in bundled_registry().iter() {
        let caps = codec.capabilities();
        assert!(caps.shape_symmetric(), "{}", codec.name());
        assert_eq!(
            caps.compress_plane, caps.decompress_plane,
            "{}: bundled codecs support both directions",
            codec.name()
        );
    }
}
