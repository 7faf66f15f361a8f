//! facevault Inspection Tool
//!
//! Dumps the contents of a file-backed store region image: header fields,
//! per-record dims, and the leading floats of each embedding.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use facevault::store::MAGIC;
use facevault::{EmbeddingList, FileBackend, StorageBackend, StoreConfig, StoreManager};

/// facevault region inspector
#[derive(Parser, Debug)]
#[command(name = "facevault-inspect")]
#[command(about = "Inspect a facevault store region image")]
#[command(version)]
struct Args {
    /// Directory holding region image files (<name>.bin)
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// Region name
    #[arg(short, long, default_value = "fr")]
    region: String,

    /// Embedding capacity the store was written with
    #[arg(short, long, default_value = "7")]
    capacity: usize,

    /// Erase block length in bytes
    #[arg(short, long, default_value = "4096")]
    block_len: u64,

    /// Floats to print per record
    #[arg(short = 'n', long, default_value = "5")]
    head: usize,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,facevault=debug"));

    fmt().with_env_filter(filter).with_target(false).init();

    let args = Args::parse();

    match inspect(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("inspection failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn inspect(args: &Args) -> facevault::Result<()> {
    let config = StoreConfig::builder()
        .region_name(&args.region)
        .capacity(args.capacity)
        .erase_block_len(args.block_len)
        .build();

    let mut backend = FileBackend::open(&args.dir, args.block_len)?;

    // Raw header first, so foreign or erased images still show something
    let region = backend.find_region(&args.region)?;
    let mut header = [0u8; 8];
    backend.read(&region, 0, &mut header)?;
    let magic = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
    let count = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);

    println!("region:  {} ({} bytes)", region.name, region.len);
    println!(
        "magic:   0x{:08X} ({})",
        magic,
        if magic == MAGIC { "valid" } else { "not a store" }
    );
    println!("count:   {}", count);

    let mut manager = StoreManager::open(config, backend)?;
    let mut list = EmbeddingList::new(args.capacity);
    let report = manager.load(&mut list)?;

    if report.truncated {
        println!(
            "warning: stored count {} exceeds capacity {}",
            report.stored_count, args.capacity
        );
    }
    if let Some(offset) = report.corrupt_at {
        println!("warning: corrupt record at offset {}, dump is partial", offset);
    }

    for (index, tensor) in list.iter().enumerate() {
        let (n, w, h, c) = tensor.shape();
        let head = &tensor.data()[..tensor.num_floats().min(args.head)];
        println!(
            "record {}: n:{} w:{} h:{} c:{} ({} floats) {:?}",
            index,
            n,
            w,
            h,
            c,
            tensor.num_floats(),
            head
        );
    }

    println!("{} of {} record(s) decoded", report.loaded, report.stored_count);
    Ok(())
}
