//! Convert the fixed-width nearby-galaxies table into one JSON document per
//! galaxy.
//!
//! Usage: `import_dat <NearbyGalaxies.dat> [out_dir]` (default `data`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use galcat::catalog::import::parse_catalog;
use galcat::catalog::loader::save_doc;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let input = PathBuf::from(args.next().context("usage: import_dat <input.dat> [out_dir]")?);
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "data".to_string()));

    let text = std::fs::read_to_string(&input)
        .with_context(|| format!("reading {}", input.display()))?;
    let docs = parse_catalog(&text)?;

    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;
    for doc in &docs {
        save_doc(doc, &out_dir, None)?;
    }

    println!("Wrote {} galaxies to {}", docs.len(), out_dir.display());
    Ok(())
}
