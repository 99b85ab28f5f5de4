use std::collections::BTreeMap;

use serde::Deserialize;

use super::time::optional_timestamp;
use super::{TransportError, paging};
use crate::domain::{Batch, BatchesResponse, Timestamp};

#[derive(Debug, Deserialize)]
struct MessageBatchesXml {
    #[serde(rename = "@startindex", default)]
    start_index: u32,
    #[serde(rename = "@count", default)]
    count: u32,
    #[serde(rename = "@totalcount", default)]
    total_count: u32,
    #[serde(rename = "messagebatch", default)]
    batches: Vec<MessageBatchXml>,
}

#[derive(Debug, Deserialize)]
struct MessageBatchXml {
    #[serde(rename = "@id", default)]
    id: String,
    #[serde(rename = "@uri", default)]
    uri: String,
    #[serde(rename = "createdat", default, deserialize_with = "optional_timestamp")]
    created_at: Option<Timestamp>,
    #[serde(rename = "batchsize", default)]
    batch_size: u32,
    #[serde(rename = "persistedbatchsize", default)]
    persisted_batch_size: u32,
    /// One child element per known status, zero counts included.
    #[serde(default)]
    status: BTreeMap<String, u32>,
    #[serde(rename = "accountreference", default)]
    account_reference: String,
    #[serde(rename = "createdby", default)]
    created_by: String,
    #[serde(default)]
    name: String,
}

impl From<MessageBatchXml> for Batch {
    fn from(value: MessageBatchXml) -> Self {
        Batch {
            id: value.id,
            uri: value.uri,
            created_at: value.created_at,
            batch_size: value.batch_size,
            persisted_batch_size: value.persisted_batch_size,
            status: non_zero_statuses(value.status),
            account_reference: value.account_reference,
            created_by: value.created_by,
            name: value.name,
        }
    }
}

fn non_zero_statuses(status: BTreeMap<String, u32>) -> BTreeMap<String, u32> {
    status.into_iter().filter(|(_, count)| *count > 0).collect()
}

pub fn decode_batches_xml_response(xml: &str) -> Result<BatchesResponse, TransportError> {
    let parsed: MessageBatchesXml = quick_xml::de::from_str(xml)?;
    Ok(BatchesResponse {
        paging: paging(parsed.start_index, parsed.count, parsed.total_count),
        batches: parsed.batches.into_iter().map(Batch::from).collect(),
    })
}

pub fn decode_batch_xml_response(xml: &str) -> Result<Batch, TransportError> {
    let parsed: MessageBatchXml = quick_xml::de::from_str(xml)?;
    Ok(parsed.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BATCH_BODY: &str = r#"
  <createdat>2012-01-01T12:00:00Z</createdat>
  <batchsize>1</batchsize>
  <persistedbatchsize>1</persistedbatchsize>
  <status>
   <acknowledged>0</acknowledged>
   <authorisationfailed>0</authorisationfailed>
   <connecting>0</connecting>
   <delivered>0</delivered>
   <failed>0</failed>
   <partiallydelivered>0</partiallydelivered>
   <rejected>0</rejected>
   <scheduled>0</scheduled>
   <sent>0</sent>
   <submitted>1</submitted>
   <validityperiodexpired>0</validityperiodexpired>
   <cancelled>0</cancelled>
  </status>
  <accountreference>EXHEYEYE</accountreference>
  <createdby>efiwewe@example.com</createdby>
  <name>my cool batch</name>"#;

    fn assert_batch(batch: &Batch) {
        assert_eq!(batch.id, "messagebatchid");
        assert_eq!(batch.uri, "messagebatchuri");
        assert_eq!(
            batch.created_at,
            Some(Timestamp::parse("2012-01-01T12:00:00").unwrap())
        );
        assert_eq!(batch.batch_size, 1);
        assert_eq!(batch.persisted_batch_size, 1);
        assert_eq!(
            batch.status,
            BTreeMap::from([("submitted".to_owned(), 1)])
        );
        assert_eq!(batch.account_reference, "EXHEYEYE");
        assert_eq!(batch.created_by, "efiwewe@example.com");
        assert_eq!(batch.name, "my cool batch");
    }

    #[test]
    fn decode_batches_drops_zero_status_counts() {
        let xml = format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<messagebatches startindex="0" count="15" totalcount="15" xmlns="http://api.esendex.com/ns/">
 <messagebatch id="messagebatchid" uri="messagebatchuri">{BATCH_BODY}
 </messagebatch>
</messagebatches>"#
        );

        let response = decode_batches_xml_response(&xml).unwrap();
        assert_eq!(response.paging.start_index, 0);
        assert_eq!(response.paging.count, 15);
        assert_eq!(response.paging.total_count, 15);
        assert_eq!(response.batches.len(), 1);
        assert_batch(&response.batches[0]);
    }

    #[test]
    fn decode_single_batch() {
        let xml = format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<messagebatch id="messagebatchid" uri="messagebatchuri" xmlns="http://api.esendex.com/ns/">{BATCH_BODY}
</messagebatch>"#
        );

        let batch = decode_batch_xml_response(&xml).unwrap();
        assert_batch(&batch);
    }

    #[test]
    fn decode_batches_tolerates_interleaved_siblings() {
        let xml = r#"<messagebatches startindex="0" count="2" totalcount="2" xmlns="http://api.esendex.com/ns/">
 <messagebatch id="b1" uri="u1"/>
 <other/>
 <messagebatch id="b2" uri="u2"/>
</messagebatches>"#;
        let response = decode_batches_xml_response(xml).unwrap();
        let ids: Vec<&str> = response.batches.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["b1", "b2"]);
    }

    #[test]
    fn non_zero_statuses_keeps_every_positive_entry() {
        let status = BTreeMap::from([
            ("delivered".to_owned(), 3),
            ("failed".to_owned(), 0),
            ("submitted".to_owned(), 1),
        ]);
        assert_eq!(
            non_zero_statuses(status),
            BTreeMap::from([("delivered".to_owned(), 3), ("submitted".to_owned(), 1)])
        );
    }

    #[test]
    fn batch_without_status_block_has_empty_histogram() {
        let xml = r#"<messagebatch id="b" uri="u" xmlns="http://api.esendex.com/ns/"><name>n</name></messagebatch>"#;
        let batch = decode_batch_xml_response(xml).unwrap();
        assert!(batch.status.is_empty());
        assert_eq!(batch.created_at, None);
    }
}
