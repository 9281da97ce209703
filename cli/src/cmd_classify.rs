//! `logdecode classify`: resolve contract addresses to protocols.

use anyhow::Result;
use logdecode_core::metadata::AddressClassifier;
use serde::Serialize;

use crate::config::CliConfig;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Classification<'a> {
    address: String,
    protocol: String,
    protocol_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    decimals: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    chain: Option<&'a str>,
}

pub fn run(config: &CliConfig, addresses: &[String], as_json: bool) -> Result<()> {
    let book = config.address_book()?;

    let rows: Vec<Classification<'_>> = addresses
        .iter()
        .map(|address| {
            let info = book.classify(address);
            let token = book.token(address);
            Classification {
                address: address.trim().to_lowercase(),
                protocol: info.name,
                protocol_type: info.protocol_type,
                decimals: token.map(|t| t.decimals),
                chain: token.map(|t| t.chain.as_str()).filter(|c| !c.is_empty()),
            }
        })
        .collect();

    if as_json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for row in &rows {
        print!("{}  {} ({})", row.address, row.protocol, row.protocol_type);
        if let Some(decimals) = row.decimals {
            print!("  decimals={decimals}");
        }
        println!();
    }
    Ok(())
}
