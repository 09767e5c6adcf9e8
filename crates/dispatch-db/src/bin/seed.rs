//! # Catalog Seeder
//!
//! Fills an empty database with the paint catalog for development and
//! demos.
//!
//! ## Usage
//! ```bash
//! cargo run -p dispatch-db --bin seed
//! cargo run -p dispatch-db --bin seed -- --db ./data/dispatch.db
//! cargo run -p dispatch-db --bin seed -- --stock 25
//! ```
//!
//! Every range is offered in 1L, 4L, 10L and 20L cans. SKUs look like
//! `APEX-ULT-20L`.

use std::path::PathBuf;

use clap::Parser;
use dispatch_db::repository::product::new_product;
use dispatch_db::{Database, DbConfig};

/// Paint catalog seeder
#[derive(Debug, Parser)]
#[command(name = "seed", version)]
struct Args {
    /// Database file path
    #[arg(short, long, default_value = "./dispatch_dev.db")]
    db: PathBuf,

    /// Units on hand per product
    #[arg(short, long, default_value_t = 50, value_parser = clap::value_parser!(i64).range(0..))]
    stock: i64,
}

/// (sku prefix, name, DP per litre in paise, bill discount bps, cash discount bps)
const RANGES: &[(&str, &str, i64, u32, u32)] = &[
    ("APEX-ULT", "Apex Ultima Exterior Emulsion", 520_00, 1200, 300),
    ("APEX-DST", "Apex Dustproof Exterior", 410_00, 1000, 300),
    ("ROYALE-LUX", "Royale Luxury Emulsion", 610_00, 1500, 500),
    ("ROYALE-SHY", "Royale Shyne Sheen", 690_00, 1500, 500),
    ("TRAC-EMU", "Tractor Emulsion", 240_00, 800, 200),
    ("TRAC-SHY", "Tractor Shyne", 290_00, 800, 200),
    ("ACE-EXT", "Ace Exterior Emulsion", 210_00, 600, 200),
    ("PRIM-WAL", "Wall Primer (Water Based)", 160_00, 500, 0),
    ("APCO-ENM", "Apcolite Premium Gloss Enamel", 450_00, 1000, 300),
    ("DAMP-PRF", "Damp Proof Waterproofing", 540_00, 1000, 500),
];

/// (size label, millilitres, price multiplier in percent of 1L × size)
///
/// Larger cans carry a small per-litre discount.
const SIZES: &[(&str, i64, i64)] = &[("1L", 1_000, 100), ("4L", 4_000, 97), ("10L", 10_000, 94), ("20L", 20_000, 92)];

const GST_BPS: u32 = 1800;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    println!("Paint catalog seeder");
    println!("Database: {}", args.db.display());

    let db = Database::new(DbConfig::new(args.db.clone())).await?;

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("Database already has {} products, skipping.", existing);
        println!("Delete the database file to regenerate.");
        return Ok(());
    }

    let mut generated = 0;
    for (prefix, name, per_litre, bill_bps, cd_bps) in RANGES {
        for (label, ml, pct) in SIZES {
            let litres = ml / 1_000;
            let dp_paise = per_litre * litres * pct / 100;
            let product = new_product(
                &format!("{prefix}-{label}"),
                &format!("{name} {label}"),
                dp_paise,
                *ml,
                *bill_bps,
                *cd_bps,
                GST_BPS,
                args.stock,
            );

            if let Err(e) = db.products().insert(&product).await {
                eprintln!("Failed to insert {}: {}", product.sku, e);
                continue;
            }
            generated += 1;
        }
    }

    println!("Inserted {} products", generated);

    let sample = db.products().search("apex", 5).await?;
    println!("Search 'apex': {} results", sample.len());

    Ok(())
}
