use serde::Deserialize;

use super::time::optional_timestamp;
use super::{PhoneNumberXml, TransportError, UriXml, paging};
use crate::domain::{
    FailureReason, MessageBody, MessageHeader, ReceivedMessage, ReceivedMessagesResponse,
    SentMessage, SentMessagesResponse, Timestamp,
};

/// `<messageheaders>` listing; used by both the sent and the inbox endpoints.
#[derive(Debug, Deserialize)]
struct MessageHeadersXml {
    #[serde(rename = "@startindex", default)]
    start_index: u32,
    #[serde(rename = "@count", default)]
    count: u32,
    #[serde(rename = "@totalcount", default)]
    total_count: u32,
    #[serde(rename = "messageheader", default)]
    messages: Vec<MessageHeaderXml>,
}

/// Superset of the header fields; each endpoint only fills some of them.
#[derive(Debug, Deserialize)]
struct MessageHeaderXml {
    #[serde(rename = "@id", default)]
    id: String,
    #[serde(rename = "@uri", default)]
    uri: String,
    #[serde(default)]
    reference: String,
    #[serde(default)]
    status: String,
    #[serde(rename = "laststatusat", default, deserialize_with = "optional_timestamp")]
    last_status_at: Option<Timestamp>,
    #[serde(rename = "submittedat", default, deserialize_with = "optional_timestamp")]
    submitted_at: Option<Timestamp>,
    #[serde(rename = "receivedat", default, deserialize_with = "optional_timestamp")]
    received_at: Option<Timestamp>,
    #[serde(rename = "type", default)]
    message_type: String,
    #[serde(default)]
    to: PhoneNumberXml,
    #[serde(default)]
    from: PhoneNumberXml,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    body: UriXml,
    #[serde(default)]
    direction: String,
    #[serde(rename = "readat", default, deserialize_with = "optional_timestamp")]
    read_at: Option<Timestamp>,
    #[serde(rename = "sentat", default, deserialize_with = "optional_timestamp")]
    sent_at: Option<Timestamp>,
    #[serde(rename = "deliveredat", default, deserialize_with = "optional_timestamp")]
    delivered_at: Option<Timestamp>,
    #[serde(rename = "readby", default)]
    read_by: String,
    #[serde(default)]
    parts: u32,
    #[serde(default)]
    username: String,
    #[serde(rename = "failurereason", default)]
    failure_reason: Option<FailureReasonXml>,
}

#[derive(Debug, Deserialize)]
struct FailureReasonXml {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    description: String,
    #[serde(rename = "permanentfailure", default)]
    permanent_failure: bool,
}

impl From<FailureReasonXml> for FailureReason {
    fn from(value: FailureReasonXml) -> Self {
        FailureReason {
            code: value.code,
            description: value.description,
            permanent: value.permanent_failure,
        }
    }
}

impl From<MessageHeaderXml> for SentMessage {
    fn from(value: MessageHeaderXml) -> Self {
        SentMessage {
            id: value.id,
            uri: value.uri,
            reference: value.reference,
            status: value.status,
            last_status_at: value.last_status_at,
            submitted_at: value.submitted_at,
            message_type: value.message_type,
            to: value.to.phonenumber,
            from: value.from.phonenumber,
            summary: value.summary,
            body: value.body.into_body_reference(),
            direction: value.direction,
            parts: value.parts,
            username: value.username,
            failure_reason: value.failure_reason.map(FailureReason::from),
        }
    }
}

impl From<MessageHeaderXml> for ReceivedMessage {
    fn from(value: MessageHeaderXml) -> Self {
        ReceivedMessage {
            id: value.id,
            uri: value.uri,
            reference: value.reference,
            status: value.status,
            received_at: value.received_at,
            message_type: value.message_type,
            to: value.to.phonenumber,
            from: value.from.phonenumber,
            summary: value.summary,
            body: value.body.into_body_reference(),
            direction: value.direction,
            parts: value.parts,
            read_at: value.read_at,
            read_by: value.read_by,
        }
    }
}

impl From<MessageHeaderXml> for MessageHeader {
    fn from(value: MessageHeaderXml) -> Self {
        MessageHeader {
            id: value.id,
            uri: value.uri,
            reference: value.reference,
            status: value.status,
            last_status_at: value.last_status_at,
            submitted_at: value.submitted_at,
            received_at: value.received_at,
            message_type: value.message_type,
            to: value.to.phonenumber,
            from: value.from.phonenumber,
            summary: value.summary,
            body: value.body.into_body_reference(),
            direction: value.direction,
            read_at: value.read_at,
            sent_at: value.sent_at,
            delivered_at: value.delivered_at,
            read_by: value.read_by,
            parts: value.parts,
            username: value.username,
            failure_reason: value.failure_reason.map(FailureReason::from),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MessageBodyXml {
    #[serde(rename = "bodytext", default)]
    body_text: String,
    #[serde(rename = "characterset", default)]
    character_set: String,
}

pub fn decode_sent_messages_xml_response(
    xml: &str,
) -> Result<SentMessagesResponse, TransportError> {
    let parsed: MessageHeadersXml = quick_xml::de::from_str(xml)?;
    Ok(SentMessagesResponse {
        paging: paging(parsed.start_index, parsed.count, parsed.total_count),
        messages: parsed.messages.into_iter().map(SentMessage::from).collect(),
    })
}

pub fn decode_received_messages_xml_response(
    xml: &str,
) -> Result<ReceivedMessagesResponse, TransportError> {
    let parsed: MessageHeadersXml = quick_xml::de::from_str(xml)?;
    Ok(ReceivedMessagesResponse {
        paging: paging(parsed.start_index, parsed.count, parsed.total_count),
        messages: parsed
            .messages
            .into_iter()
            .map(ReceivedMessage::from)
            .collect(),
    })
}

pub fn decode_message_header_xml_response(xml: &str) -> Result<MessageHeader, TransportError> {
    let parsed: MessageHeaderXml = quick_xml::de::from_str(xml)?;
    Ok(parsed.into())
}

pub fn decode_message_body_xml_response(xml: &str) -> Result<MessageBody, TransportError> {
    let parsed: MessageBodyXml = quick_xml::de::from_str(xml)?;
    Ok(MessageBody {
        text: parsed.body_text,
        character_set: parsed.character_set,
    })
}
