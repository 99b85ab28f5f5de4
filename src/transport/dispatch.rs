use serde::{Deserialize, Serialize};

use super::TransportError;
use crate::domain::{AccountReference, Dispatch, DispatchedMessage, Message, SendResponse};

#[derive(Debug, Serialize)]
#[serde(rename = "messages")]
struct DispatchXml<'a> {
    #[serde(rename = "accountreference")]
    account_reference: &'a str,
    #[serde(rename = "sendat", skip_serializing_if = "Option::is_none")]
    send_at: Option<String>,
    #[serde(rename = "message")]
    messages: Vec<DispatchMessageXml<'a>>,
}

/// Element order is significant to the dispatcher.
#[derive(Debug, Serialize)]
struct DispatchMessageXml<'a> {
    to: &'a str,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    message_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lang: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    validity: Option<i32>,
    #[serde(rename = "characterset", skip_serializing_if = "Option::is_none")]
    character_set: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    retries: Option<u32>,
    body: &'a str,
}

impl<'a> From<&'a Message> for DispatchMessageXml<'a> {
    fn from(message: &'a Message) -> Self {
        let options = message.options();
        Self {
            to: message.to().as_str(),
            message_type: options.message_type.map(|it| it.as_str()),
            lang: options.lang.as_deref(),
            validity: options.validity,
            character_set: options.character_set.as_deref(),
            retries: options.retries,
            body: message.body().as_str(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DispatchResponseXml {
    #[serde(rename = "@batchid", default)]
    batch_id: String,
    #[serde(rename = "messageheader", default)]
    messages: Vec<DispatchedHeaderXml>,
}

#[derive(Debug, Deserialize)]
struct DispatchedHeaderXml {
    #[serde(rename = "@id", default)]
    id: String,
    #[serde(rename = "@uri", default)]
    uri: String,
}

pub fn encode_dispatch_xml_request(
    account_reference: &AccountReference,
    dispatch: &Dispatch,
) -> Result<String, TransportError> {
    let body = DispatchXml {
        account_reference: account_reference.as_str(),
        send_at: dispatch.send_at().map(|at| at.to_string()),
        messages: dispatch
            .messages()
            .iter()
            .map(DispatchMessageXml::from)
            .collect(),
    };
    Ok(quick_xml::se::to_string(&body)?)
}

pub fn decode_dispatch_xml_response(xml: &str) -> Result<SendResponse, TransportError> {
    let parsed: DispatchResponseXml = quick_xml::de::from_str(xml)?;
    Ok(SendResponse {
        batch_id: parsed.batch_id,
        messages: parsed
            .messages
            .into_iter()
            .map(|header| DispatchedMessage {
                id: header.id,
                uri: header.uri,
            })
            .collect(),
    })
}
