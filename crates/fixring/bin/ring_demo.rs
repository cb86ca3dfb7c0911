//! # Ring Buffer Demo
//!
//! Walks a capacity-10 `GeneralRing` through fill, overflow, partial drain and
//! refill, printing the live sequence at each stage, then times `push_back`
//! on a full `GeneralRing<i32, 11>` and `FastRing<i32, 8>`.
//!
//! ## Running
//!
//! ```bash
//! cargo run -p fixring --features demo --bin ring_demo --release
//!
//! # More timing iterations, debug logging
//! RUST_LOG=debug cargo run -p fixring --features demo --bin ring_demo --release -- --calls 10000000 --verbose
//! ```

use anyhow::{ensure, Result};
use clap::Parser;
use fixring::{timing, FastRing, FullPolicy, GeneralRing, Ring, Wrap};
use std::fmt::Display;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Command-line configuration.
#[derive(Debug, Parser)]
#[command(name = "ring_demo", about = "Fixed-capacity ring buffer walkthrough and push_back timing")]
struct Args {
    /// Number of push_back calls averaged per timing run
    #[arg(long, default_value_t = 1_000_000)]
    calls: u32,

    /// Log every push outcome during the walkthrough
    #[arg(long, short)]
    verbose: bool,
}

fn render<T: Display, const N: usize, W: Wrap, P: FullPolicy>(ring: &Ring<T, N, W, P>) -> String {
    ring.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn push_range<const N: usize, W: Wrap, P: FullPolicy>(
    ring: &mut Ring<i32, N, W, P>,
    values: std::ops::RangeInclusive<i32>,
    verbose: bool,
) {
    for v in values {
        let outcome = ring.push_back(v);
        if verbose {
            debug!(value = v, ?outcome, len = ring.len(), "push_back");
        }
    }
}

fn walkthrough(verbose: bool) -> Result<()> {
    let mut buf: GeneralRing<i32, 11> = GeneralRing::new();
    info!(capacity = buf.capacity(), policy = <fixring::DefaultPolicy as FullPolicy>::NAME, "created ring");

    println!("Printing empty... {}", render(&buf));

    println!("Filling buffer...");
    push_range(&mut buf, 1..=10, verbose);
    println!("Printing first time... {}", render(&buf));
    ensure!(buf.len() == 10, "expected a full ring, got len {}", buf.len());

    println!("Adding 5 elements over tail...");
    push_range(&mut buf, 11..=15, verbose);
    println!("Printing second time... {}", render(&buf));
    ensure!(buf.len() == buf.capacity(), "overflow changed the length");

    println!("Deleting 4 elements...");
    for _ in 0..4 {
        buf.pop_front();
    }
    println!("Printing third time... {}", render(&buf));
    ensure!(buf.len() == 6, "expected 6 live elements, got {}", buf.len());

    println!("Adding 6 elements over tail...");
    push_range(&mut buf, 16..=21, verbose);
    println!("Printing last time... {}", render(&buf));
    ensure!(buf.is_full(), "ring should be full after refill");

    Ok(())
}

/// Filter used when `RUST_LOG` is unset; `--verbose` turns on per-push lines.
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter(args.verbose))),
        )
        .init();

    walkthrough(args.verbose)?;

    let mut buf: GeneralRing<i32, 11> = GeneralRing::new();
    let mut buf_f: FastRing<i32, 8> = FastRing::new();

    let general = timing::measure_avg_on(args.calls, &mut buf, |r| r.push_back(1));
    let fast = timing::measure_avg_on(args.calls, &mut buf_f, |r| r.push_back(1));

    info!(calls = args.calls, "timed push_back");
    println!("{} ns", general.as_nanos());
    println!("{} ns", fast.as_nanos());

    Ok(())
}
