use anyhow::Result;
use clap::Parser;
use memsift::{shell, ScanOptions};
use tracing::Level;

/// Interactive memory scanner/editor for live Linux processes
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// PID of the process to inspect
    #[arg(short, long)]
    pid: i32,

    /// Maximum memory usage in gigabytes
    #[arg(short, long, value_name = "GB", default_value_t = 8)]
    memory: u64,

    /// Scan each region twice during the initial search and skip values
    /// that change between the two scans
    #[arg(long)]
    skip_volatile: bool,

    /// Skip zeroes during the initial search to lower the memory usage
    #[arg(long)]
    skip_zeroes: bool,

    /// Skip memory regions that are full of zeroes during the initial search
    #[arg(long)]
    skip_null_regions: bool,

    /// Only scan the stack of the target process
    #[arg(long)]
    stack_scan: bool,
}

impl From<&Args> for ScanOptions {
    fn from(args: &Args) -> Self {
        ScanOptions {
            pid: args.pid,
            memory_limit: args.memory,
            skip_volatile: args.skip_volatile,
            skip_zeroes: args.skip_zeroes,
            skip_null_regions: args.skip_null_regions,
            stack_scan: args.stack_scan,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    let args = Args::parse();
    shell::run(ScanOptions::from(&args))?;

    Ok(())
}
