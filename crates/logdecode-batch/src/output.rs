//! Batch output records and the order-preserving accumulator that builds them.

use indexmap::{IndexMap, IndexSet};
use logdecode_core::{
    event::{DecodedEvent, RawLog},
    metadata::ProtocolInfo,
    types::DecodedValue,
};
use serde::Serialize;

/// One decoded log, enriched with its protocol and provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedEventEntry {
    pub transaction_hash: serde_json::Value,
    pub block_number: serde_json::Value,
    pub log_index: serde_json::Value,
    pub protocol: String,
    pub protocol_type: String,
    /// Lower-cased emitting address
    pub contract_address: String,
    pub event_name: String,
    pub event_signature: Option<String>,
    pub decoded_data: Option<IndexMap<String, DecodedValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl DecodedEventEntry {
    pub fn new(log: &RawLog, protocol: ProtocolInfo, event: DecodedEvent) -> Self {
        let note = event.note();
        Self {
            transaction_hash: log.transaction_hash.clone(),
            block_number: log.block_number.clone(),
            log_index: log.log_index.clone(),
            protocol: protocol.name,
            protocol_type: protocol.protocol_type,
            contract_address: log.contract_address(),
            event_name: event.event_name,
            event_signature: event.event_signature,
            decoded_data: event.decoded_data,
            note,
        }
    }
}

/// Batch-level statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_logs_processed: usize,
    pub total_events_decoded: usize,
    /// protocol type → distinct protocol names, first-seen order
    pub protocols_identified: IndexMap<String, IndexSet<String>>,
    /// event name → count, first-seen order
    pub event_type_distribution: IndexMap<String, usize>,
}

/// The full result of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutput {
    pub summary: Summary,
    /// protocol type → entries, buckets in first-seen order
    pub events_by_protocol: IndexMap<String, Vec<DecodedEventEntry>>,
}

impl BatchOutput {
    /// All entries, bucket by bucket.
    pub fn entries(&self) -> impl Iterator<Item = &DecodedEventEntry> {
        self.events_by_protocol.values().flatten()
    }

    pub fn entry_count(&self) -> usize {
        self.events_by_protocol.values().map(Vec::len).sum()
    }
}

/// Single-writer accumulator. Entries must be pushed in input order.
#[derive(Debug, Default)]
pub(crate) struct Accumulator {
    output: BatchOutput,
    /// Entries carrying a note (unknown, missing topics, or failed)
    pub(crate) noted: usize,
}

impl Accumulator {
    pub(crate) fn push(&mut self, entry: DecodedEventEntry) {
        let summary = &mut self.output.summary;
        summary.total_logs_processed += 1;
        summary.total_events_decoded += 1;
        summary
            .protocols_identified
            .entry(entry.protocol_type.clone())
            .or_default()
            .insert(entry.protocol.clone());
        *summary
            .event_type_distribution
            .entry(entry.event_name.clone())
            .or_insert(0) += 1;

        if entry.note.is_some() {
            self.noted += 1;
        }

        self.output
            .events_by_protocol
            .entry(entry.protocol_type.clone())
            .or_default()
            .push(entry);
    }

    pub(crate) fn finish(self) -> BatchOutput {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(protocol: &str, protocol_type: &str, event: &str) -> DecodedEventEntry {
        DecodedEventEntry {
            transaction_hash: serde_json::Value::Null,
            block_number: serde_json::Value::Null,
            log_index: serde_json::Value::Null,
            protocol: protocol.into(),
            protocol_type: protocol_type.into(),
            contract_address: "0x00".into(),
            event_name: event.into(),
            event_signature: Some("0x00".into()),
            decoded_data: Some(IndexMap::new()),
            note: None,
        }
    }

    #[test]
    fn buckets_and_keys_follow_first_seen_order() {
        let mut acc = Accumulator::default();
        acc.push(entry("Aave V3", "lending", "Supply"));
        acc.push(entry("USDC", "token", "Transfer"));
        acc.push(entry("Uniswap V3", "dex", "Transfer"));
        acc.push(entry("USDT", "token", "Approval"));
        acc.push(entry("USDC", "token", "Transfer"));
        let out = acc.finish();

        let buckets: Vec<_> = out.events_by_protocol.keys().cloned().collect();
        assert_eq!(buckets, ["lending", "token", "dex"]);
        assert_eq!(out.events_by_protocol["token"].len(), 3);

        let dist: Vec<_> = out.summary.event_type_distribution.iter().collect();
        assert_eq!(
            dist,
            [
                (&"Supply".to_string(), &1),
                (&"Transfer".to_string(), &3),
                (&"Approval".to_string(), &1)
            ]
        );

        let tokens: Vec<_> = out.summary.protocols_identified["token"].iter().cloned().collect();
        assert_eq!(tokens, ["USDC", "USDT"]);
        assert_eq!(out.summary.total_logs_processed, 5);
        assert_eq!(out.summary.total_events_decoded, 5);
        assert_eq!(out.entry_count(), 5);
    }

    #[test]
    fn entry_json_shape() {
        let log = RawLog {
            address: "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48".into(),
            block_number: serde_json::json!(18_500_000),
            transaction_hash: serde_json::json!("0xabc"),
            ..Default::default()
        };
        let ok = DecodedEventEntry::new(
            &log,
            ProtocolInfo::new("USDC", "token"),
            DecodedEvent::decoded("Transfer", "0xddf2", IndexMap::new()),
        );
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["contractAddress"], "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48");
        assert_eq!(json["blockNumber"], 18_500_000);
        assert_eq!(json["transactionHash"], "0xabc");
        assert!(json["logIndex"].is_null());
        assert_eq!(json["protocolType"], "token");
        assert!(json.get("note").is_none());

        let missing = DecodedEventEntry::new(&log, ProtocolInfo::unknown(), DecodedEvent::missing_topics());
        let json = serde_json::to_value(&missing).unwrap();
        assert_eq!(json["note"], "Missing topics");
        assert!(json["decodedData"].is_null());
        assert!(json["eventSignature"].is_null());
    }

    #[test]
    fn summary_json_shape() {
        let mut acc = Accumulator::default();
        acc.push(entry("USDC", "token", "Transfer"));
        let json = serde_json::to_value(acc.finish()).unwrap();
        assert_eq!(json["summary"]["totalLogsProcessed"], 1);
        assert_eq!(json["summary"]["protocolsIdentified"]["token"], serde_json::json!(["USDC"]));
        assert_eq!(json["summary"]["eventTypeDistribution"]["Transfer"], 1);
        assert_eq!(json["eventsByProtocol"]["token"][0]["eventName"], "Transfer");
    }
}
