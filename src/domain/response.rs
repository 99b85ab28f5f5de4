use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::timestamp::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
/// The window of a paged listing, echoed by the server.
pub struct Paging {
    pub start_index: u32,
    pub count: u32,
    pub total_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
/// Location of a message body, resolved with [`crate::EsendexClient::body`].
pub struct BodyReference(String);

impl BodyReference {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Any message whose text can be fetched separately from its header.
pub trait HasBody {
    fn body_reference(&self) -> Option<&BodyReference>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Why a message failed to deliver.
pub struct FailureReason {
    pub code: i32,
    pub description: String,
    /// `true` when retrying the same message cannot succeed.
    pub permanent: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentMessage {
    pub id: String,
    pub uri: String,
    pub reference: String,
    pub status: String,
    pub last_status_at: Option<Timestamp>,
    pub submitted_at: Option<Timestamp>,
    pub message_type: String,
    pub to: String,
    pub from: String,
    pub summary: String,
    pub body: Option<BodyReference>,
    pub direction: String,
    pub parts: u32,
    pub username: String,
    pub failure_reason: Option<FailureReason>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentMessagesResponse {
    pub paging: Paging,
    pub messages: Vec<SentMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceivedMessage {
    pub id: String,
    pub uri: String,
    pub reference: String,
    pub status: String,
    pub received_at: Option<Timestamp>,
    pub message_type: String,
    pub to: String,
    pub from: String,
    pub summary: String,
    pub body: Option<BodyReference>,
    pub direction: String,
    pub parts: u32,
    pub read_at: Option<Timestamp>,
    pub read_by: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceivedMessagesResponse {
    pub paging: Paging,
    pub messages: Vec<ReceivedMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Full header of a single message, in either direction.
pub struct MessageHeader {
    pub id: String,
    pub uri: String,
    pub reference: String,
    pub status: String,
    pub last_status_at: Option<Timestamp>,
    pub submitted_at: Option<Timestamp>,
    pub received_at: Option<Timestamp>,
    pub message_type: String,
    pub to: String,
    pub from: String,
    pub summary: String,
    pub body: Option<BodyReference>,
    pub direction: String,
    pub read_at: Option<Timestamp>,
    pub sent_at: Option<Timestamp>,
    pub delivered_at: Option<Timestamp>,
    pub read_by: String,
    pub parts: u32,
    pub username: String,
    pub failure_reason: Option<FailureReason>,
}

impl HasBody for SentMessage {
    fn body_reference(&self) -> Option<&BodyReference> {
        self.body.as_ref()
    }
}

impl HasBody for ReceivedMessage {
    fn body_reference(&self) -> Option<&BodyReference> {
        self.body.as_ref()
    }
}

impl HasBody for MessageHeader {
    fn body_reference(&self) -> Option<&BodyReference> {
        self.body.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageBody {
    pub text: String,
    pub character_set: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchedMessage {
    pub id: String,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendResponse {
    pub batch_id: String,
    pub messages: Vec<DispatchedMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Batch {
    pub id: String,
    pub uri: String,
    pub created_at: Option<Timestamp>,
    pub batch_size: u32,
    pub persisted_batch_size: u32,
    /// Message count per status; statuses with no messages are omitted.
    pub status: BTreeMap<String, u32>,
    pub account_reference: String,
    pub created_by: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchesResponse {
    pub paging: Paging,
    pub batches: Vec<Batch>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub id: String,
    pub uri: String,
    pub reference: String,
    pub label: String,
    pub address: String,
    pub account_type: String,
    pub messages_remaining: i64,
    pub expires_on: Option<Timestamp>,
    pub role: String,
    pub settings_uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountsResponse {
    pub accounts: Vec<Account>,
}
