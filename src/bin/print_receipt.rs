//! # print-receipt
//!
//! Render an order JSON file as a two-copy receipt.
//!
//! ## Usage
//! ```bash
//! # Write the document to a file
//! cargo run --bin print-receipt -- order.json settings.json --out receipt.html
//!
//! # Stage it in the spool directory and open the print view
//! cargo run --bin print-receipt -- order.json
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use pos_receipt::logging::init_logging;
use pos_receipt::{assemble_document, print_receipt, FileSpoolHost, Order, PrintConfig, Settings};
use tracing::info;

struct Args {
    order_path: PathBuf,
    settings_path: Option<PathBuf>,
    out: Option<PathBuf>,
    copies: u32,
}

fn parse_args() -> Result<Args> {
    let mut positional = Vec::new();
    let mut out = None;
    let mut copies = 2;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" => out = Some(PathBuf::from(args.next().context("--out needs a path")?)),
            "--copies" => {
                copies = args
                    .next()
                    .context("--copies needs a number")?
                    .parse()
                    .context("--copies must be a number")?
            }
            _ => positional.push(PathBuf::from(arg)),
        }
    }
    let mut positional = positional.into_iter();
    let Some(order_path) = positional.next() else {
        bail!("usage: print-receipt <order.json> [settings.json] [--out <file>] [--copies <n>]");
    };
    Ok(Args {
        order_path,
        settings_path: positional.next(),
        out,
        copies,
    })
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let _guard = init_logging(None);
    let args = parse_args()?;

    let order: Order = read_json(&args.order_path)?;
    let settings: Option<Settings> = args
        .settings_path
        .as_deref()
        .map(read_json::<Settings>)
        .transpose()?;

    if let Some(out) = args.out {
        let document = assemble_document(&order, settings.as_ref(), args.copies);
        fs::write(&out, document.as_html()).with_context(|| format!("write {}", out.display()))?;
        info!(path = %out.display(), "Receipt written");
        return Ok(());
    }

    let config = PrintConfig::default();
    let host = FileSpoolHost::new(&config.spool_dir).with_retention(config.spool_retention());
    print_receipt(&host, &order, settings.as_ref(), args.copies, &config);

    // Stay up until the scheduled teardown has run.
    tokio::time::sleep(config.ready_fallback() + config.teardown_delay() * 2).await;
    Ok(())
}
