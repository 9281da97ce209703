//! `logdecode decode`: decode a batch, write the grouped output, print the summary.

use anyhow::{Context, Result};
use logdecode_batch::{AddressCache, Aggregator};
use logdecode_evm::EvmLogDecoder;
use std::{fs::File, io::BufWriter, path::Path, sync::Arc};
use tracing::info;

use crate::{config::CliConfig, input};

pub fn run(config: &CliConfig, input_path: &Path, out: &Path, limit: Option<usize>) -> Result<()> {
    let logs = input::read_logs(input_path, limit)?;
    info!(logs = logs.len(), input = %input_path.display(), "input loaded");

    let registry = config.signature_registry()?;
    let book = config.address_book()?;

    let cache = AddressCache::for_logs(&logs, &book);
    let aggregator = Aggregator::new(
        Arc::new(registry),
        Arc::new(book),
        Arc::new(EvmLogDecoder::new()),
    );

    let request = config.batch.request(logs).address_cache(cache);
    let output = aggregator.decode_batch(request)?;

    let file = File::create(out).with_context(|| format!("creating '{}'", out.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &output)
        .with_context(|| format!("writing '{}'", out.display()))?;
    std::io::Write::flush(&mut writer)?;
    info!(out = %out.display(), "output written");

    println!("{}", serde_json::to_string_pretty(&output.summary)?);
    Ok(())
}
