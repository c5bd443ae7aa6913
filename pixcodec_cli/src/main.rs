use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use xxhash_rust::xxh3::xxh3_64;

use pixcodec_codecs::{
    bundled_registry, DeltaCodec, Lz4Codec, LzwCodec, PackbitsCodec, PassthroughCodec, RleCodec,
    ZlibCodec, ZstdCodec,
};
use pixcodec_core::{Codec, CodecContext};

// ── CLI definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "pixcodec",
    about = "Pixel-data codec toolkit: compress, decompress, and verify raw pixel planes",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a raw pixel plane with a chosen codec
    Compress {
        /// Source file ("-" reads stdin)
        input: PathBuf,
        /// Destination file ("-" writes stdout)
        output: PathBuf,
        #[command(flatten)]
        codec: CodecArgs,
    },
    /// Decompress a stream produced by `compress` with the same codec
    ///
    /// There is no container here: the codec is not recorded in the
    /// stream, so it must be named again.
    Decompress {
        /// Source file ("-" reads stdin)
        input: PathBuf,
        /// Destination file ("-" writes stdout)
        output: PathBuf,
        /// Codec the stream was compressed with
        #[arg(short, long, default_value = "zstd")]
        codec: String,
    },
    /// Compress, decompress, and verify the round trip without writing output
    Roundtrip {
        /// Source file ("-" reads stdin)
        input: PathBuf,
        #[command(flatten)]
        codec: CodecArgs,
    },
    /// List bundled codecs with their tags and capabilities
    List,
}

#[derive(Args)]
struct CodecArgs {
    /// Codec: passthrough | rle | packbits | lzw | delta | zlib | zstd | lz4
    #[arg(short, long, default_value = "zstd")]
    codec: String,
    /// Compression level (zstd: 1–22, zlib: 0–9)
    #[arg(long)]
    level: Option<i32>,
    /// Samples per row, for dimension-aware codecs
    #[arg(long)]
    width: Option<usize>,
    /// Row count, for dimension-aware codecs
    #[arg(long)]
    height: Option<usize>,
    /// Interleaved channel count, for dimension-aware codecs
    #[arg(long)]
    channels: Option<usize>,
}

// ── Helpers ────────────────────────────────────────────────────────────────

fn codec_from_name(name: &str, level: Option<i32>) -> anyhow::Result<Arc<dyn Codec>> {
    let codec: Arc<dyn Codec> = match name {
        "passthrough" | "pass" | "none" => Arc::new(PassthroughCodec),
        "rle" => Arc::new(RleCodec),
        "packbits" => Arc::new(PackbitsCodec),
        "lzw" => Arc::new(LzwCodec::default()),
        "delta" => Arc::new(DeltaCodec),
        "zlib" => {
            let level = level.unwrap_or(6);
            anyhow::ensure!((0..=9).contains(&level), "zlib level must be 0–9");
            Arc::new(ZlibCodec::new(level as u32))
        }
        "zstd" | "z" => match level {
            Some(level) => Arc::new(ZstdCodec::new(level)),
            None => Arc::new(ZstdCodec::default()),
        },
        "lz4" | "l" => Arc::new(Lz4Codec),
        other => anyhow::bail!(
            "unknown codec '{}'. Valid options: passthrough, rle, packbits, lzw, delta, zlib, zstd, lz4",
            other
        ),
    };
    Ok(codec)
}

fn read_input(path: &PathBuf) -> anyhow::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if path.to_str() == Some("-") {
        io::stdin().lock().read_to_end(&mut buf)?;
    } else {
        File::open(path)
            .with_context(|| format!("opening input file {:?}", path))?
            .read_to_end(&mut buf)?;
    }
    Ok(buf)
}

fn write_output(path: &PathBuf, bytes: &[u8]) -> anyhow::Result<()> {
    if path.to_str() == Some("-") {
        io::stdout().lock().write_all(bytes)?;
    } else {
        File::create(path)
            .with_context(|| format!("creating output file {:?}", path))?
            .write_all(bytes)?;
    }
    Ok(())
}

fn human_bytes(n: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut v = n as f64;
    let mut unit = 0;
    while v >= 1024.0 && unit < UNITS.len() - 1 {
        v /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", n)
    } else {
        format!("{:.2} {}", v, UNITS[unit])
    }
}

// ── Subcommand implementations ─────────────────────────────────────────────

fn run_compress(input: PathBuf, output: PathBuf, args: &CodecArgs) -> anyhow::Result<()> {
    let codec = codec_from_name(&args.codec, args.level)?;
    let data = read_input(&input)?;

    let extra: Vec<usize> = args.channels.map(|c| vec![c]).unwrap_or_default();
    let ctx = CodecContext {
        width: args.width,
        height: args.height,
        extra_dims: if extra.is_empty() { None } else { Some(&extra) },
        options: None,
    };

    let t0 = Instant::now();
    let compressed = codec
        .compress_plane(&data, &ctx)
        .with_context(|| format!("compressing with {}", codec.name()))?;
    let elapsed = t0.elapsed();

    write_output(&output, &compressed)?;

    let ratio = data.len() as f64 / compressed.len().max(1) as f64;
    eprintln!("  codec       : {}", codec.name());
    eprintln!("  raw size    : {}", human_bytes(data.len() as u64));
    eprintln!("  compressed  : {}", human_bytes(compressed.len() as u64));
    eprintln!("  ratio       : {:.2}x", ratio);
    eprintln!(
        "  throughput  : {}/s",
        human_bytes((data.len() as f64 / elapsed.as_secs_f64()) as u64)
    );
    eprintln!("  elapsed     : {:.3}s", elapsed.as_secs_f64());
    Ok(())
}

fn run_decompress(input: PathBuf, output: PathBuf, codec_name: &str) -> anyhow::Result<()> {
    let codec = codec_from_name(codec_name, None)?;
    let data = read_input(&input)?;

    let t0 = Instant::now();
    let raw = codec
        .decompress_plane(&data)
        .with_context(|| format!("decompressing with {}", codec.name()))?;
    let elapsed = t0.elapsed();

    write_output(&output, &raw)?;

    eprintln!("  codec       : {}", codec.name());
    eprintln!("  compressed  : {}", human_bytes(data.len() as u64));
    eprintln!("  raw size    : {}", human_bytes(raw.len() as u64));
    eprintln!(
        "  throughput  : {}/s",
        human_bytes((raw.len() as f64 / elapsed.as_secs_f64()) as u64)
    );
    eprintln!("  elapsed     : {:.3}s", elapsed.as_secs_f64());
    Ok(())
}

fn run_roundtrip(input: PathBuf, args: &CodecArgs) -> anyhow::Result<()> {
    let codec = codec_from_name(&args.codec, args.level)?;
    let data = read_input(&input)?;

    let extra: Vec<usize> = args.channels.map(|c| vec![c]).unwrap_or_default();
    let ctx = CodecContext {
        width: args.width,
        height: args.height,
        extra_dims: if extra.is_empty() { None } else { Some(&extra) },
        options: None,
    };

    let t0 = Instant::now();
    let compressed = codec
        .compress_plane(&data, &ctx)
        .with_context(|| format!("compressing with {}", codec.name()))?;
    let compress_elapsed = t0.elapsed();

    let t1 = Instant::now();
    let restored = codec
        .decompress_plane(&compressed)
        .with_context(|| format!("decompressing with {}", codec.name()))?;
    let decompress_elapsed = t1.elapsed();

    let original_hash = xxh3_64(&data);
    let restored_hash = xxh3_64(&restored);
    anyhow::ensure!(
        restored.len() == data.len() && restored_hash == original_hash,
        "round trip mismatch: {} bytes / {:016x} in, {} bytes / {:016x} out",
        data.len(),
        original_hash,
        restored.len(),
        restored_hash
    );

    let ratio = data.len() as f64 / compressed.len().max(1) as f64;
    eprintln!("  codec       : {}", codec.name());
    eprintln!("  raw size    : {}", human_bytes(data.len() as u64));
    eprintln!("  compressed  : {}", human_bytes(compressed.len() as u64));
    eprintln!("  ratio       : {:.2}x", ratio);
    eprintln!("  xxh3-64     : {:016x}", original_hash);
    eprintln!(
        "  compress    : {}/s",
        human_bytes((data.len() as f64 / compress_elapsed.as_secs_f64()) as u64)
    );
    eprintln!(
        "  decompress  : {}/s",
        human_bytes((data.len() as f64 / decompress_elapsed.as_secs_f64()) as u64)
    );
    println!("round trip OK");
    Ok(())
}

fn run_list() -> anyhow::Result<()> {
    println!("{:>5}  {:<12} {}", "tag", "codec", "capabilities");
    for codec in bundled_registry().iter() {
        let caps = codec.capabilities();
        let direction = match (caps.compress_plane, caps.decompress_plane) {
            (true, true) => "compress + decompress",
            (true, false) => "compress only",
            (false, true) => "decompress only",
            (false, false) => "none",
        };
        println!("{:>5}  {:<12} {}", codec.tag(), codec.name(), direction);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Compress {
            input,
            output,
            codec,
        } => run_compress(input, output, &codec),
        Commands::Decompress {
            input,
            output,
            codec,
        } => run_decompress(input, output, &codec),
        Commands::Roundtrip { input, codec } => run_roundtrip(input, &codec),
        Commands::List => run_list(),
    }
}
