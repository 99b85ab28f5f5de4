//! Transport layer: XML wire schemas (serialization/deserialization).
//!
//! Every response element lives in the `http://api.esendex.com/ns/` default
//! namespace; elements are matched by local name.

mod accounts;
mod batches;
mod dispatch;
mod messages;
mod time;

use serde::Deserialize;

use crate::domain::{BodyReference, Paging};

pub use accounts::decode_accounts_xml_response;
pub use batches::{decode_batch_xml_response, decode_batches_xml_response};
pub use dispatch::{decode_dispatch_xml_response, encode_dispatch_xml_request};
pub use messages::{
    decode_message_body_xml_response, decode_message_header_xml_response,
    decode_received_messages_xml_response, decode_sent_messages_xml_response,
};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid XML response: {0}")]
    Xml(#[from] quick_xml::de::DeError),

    #[error("cannot encode XML request: {0}")]
    Encode(#[from] quick_xml::se::SeError),
}

fn paging(start_index: u32, count: u32, total_count: u32) -> Paging {
    Paging {
        start_index,
        count,
        total_count,
    }
}

/// `<to><phonenumber>...</phonenumber></to>`
#[derive(Debug, Clone, Default, Deserialize)]
struct PhoneNumberXml {
    #[serde(default)]
    phonenumber: String,
}

/// An element whose only payload is a `uri` attribute, e.g. `<body uri="..."/>`.
#[derive(Debug, Clone, Default, Deserialize)]
struct UriXml {
    #[serde(rename = "@uri", default)]
    uri: String,
}

impl UriXml {
    fn into_body_reference(self) -> Option<BodyReference> {
        if self.uri.trim().is_empty() {
            None
        } else {
            Some(BodyReference::new(self.uri))
        }
    }
}
