use crate::domain::timestamp::Timestamp;
use crate::domain::validation::ValidationError;
use crate::domain::value::{MessageText, Recipient};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    Sms,
    Voice,
}

impl MessageType {
    /// Value used in the `type` element.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sms => "SMS",
            Self::Voice => "Voice",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Optional per-message settings; unset fields are left to the account defaults.
pub struct MessageOptions {
    pub message_type: Option<MessageType>,
    /// Voice language, e.g. `en-GB`.
    pub lang: Option<String>,
    /// Validity period in hours.
    pub validity: Option<i32>,
    pub character_set: Option<String>,
    /// Voice retries.
    pub retries: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single outbound message.
pub struct Message {
    to: Recipient,
    body: MessageText,
    options: MessageOptions,
}

impl Message {
    pub fn new(to: Recipient, body: MessageText) -> Self {
        Self::with_options(to, body, MessageOptions::default())
    }

    pub fn with_options(to: Recipient, body: MessageText, options: MessageOptions) -> Self {
        Self { to, body, options }
    }

    pub fn to(&self) -> &Recipient {
        &self.to
    }

    pub fn body(&self) -> &MessageText {
        &self.body
    }

    pub fn options(&self) -> &MessageOptions {
        &self.options
    }
}

#[derive(Debug, Clone)]
/// Messages submitted together as one batch, optionally scheduled.
///
/// Invariant: at least one message.
pub struct Dispatch {
    messages: Vec<Message>,
    send_at: Option<Timestamp>,
}

impl Dispatch {
    pub const FIELD: &'static str = "message";

    pub fn new(messages: Vec<Message>) -> Result<Self, ValidationError> {
        if messages.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self {
            messages,
            send_at: None,
        })
    }

    /// Schedule the batch instead of sending it immediately.
    pub fn scheduled(messages: Vec<Message>, send_at: Timestamp) -> Result<Self, ValidationError> {
        let mut dispatch = Self::new(messages)?;
        dispatch.send_at = Some(send_at);
        Ok(dispatch)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn send_at(&self) -> Option<Timestamp> {
        self.send_at
    }
}
