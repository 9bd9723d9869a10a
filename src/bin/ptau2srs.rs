//! Convert a snarkjs `.ptau` transcript into arkworks SRS files
//!
//! ```text
//! ptau2srs <input.ptau> <output-dir>
//! ```
//!
//! Reads the transcript, runs the pairing consistency check, and writes
//! `<output-dir>/G1.bin` (compressed `Vec<G1Affine>`) and
//! `<output-dir>/G2.bin` (compressed `[G2, τ·G2]`), printing the BLAKE3
//! digests so they can be compared against published ceremony values.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let (input, out_dir) = match (args.next(), args.next()) {
        (Some(input), Some(out_dir)) => (PathBuf::from(input), PathBuf::from(out_dir)),
        _ => bail!("usage: ptau2srs <input.ptau> <output-dir>"),
    };

    let file = File::open(&input).with_context(|| format!("opening {}", input.display()))?;
    println!("Reading transcript from {}...", input.display());

    let srs = ptau_kzg::read_srs(BufReader::new(file))
        .with_context(|| format!("converting {}", input.display()))?;
    println!(
        "✓ Parsed {} G1 powers (max degree {}) and the G2 pair",
        srs.g1_powers.len(),
        srs.max_degree()
    );

    srs.check_pairing().context("pairing consistency check")?;
    println!("✓ Pairing check passed: e(τ·G1, G2) = e(G1, τ·G2)");

    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;
    let g1_path = out_dir.join("G1.bin");
    let g2_path = out_dir.join("G2.bin");
    srs.save(&g1_path, &g2_path).context("writing SRS files")?;

    println!("✓ Wrote {}", g1_path.display());
    println!("✓ Wrote {}", g2_path.display());
    println!("  G1 digest: {}", hex::encode(srs.g1_digest()?));
    println!("  G2 digest: {}", hex::encode(srs.g2_digest()?));
    println!();
    println!("Compare the digests against the ceremony transcript before use.");

    Ok(())
}
