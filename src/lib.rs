//! Typed Rust client for the Esendex REST API.
//!
//! The crate has three layers. The domain layer holds strong types and has
//! no I/O. The transport layer handles the XML wire format. The client layer
//! builds authenticated requests and runs them.
//!
//! ```rust,no_run
//! use esendex::{
//!     AccountReference, Credentials, EsendexClient, ListOption, Message, MessageText, Recipient,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), esendex::EsendexError> {
//!     let client = EsendexClient::new(Credentials::new("user@example.com", "secret")?);
//!
//!     let sent = client.sent(&[ListOption::page(0, 20)]).await?;
//!     for message in &sent.messages {
//!         let body = client.body(message).await?;
//!         println!("{} -> {}: {}", message.from, message.to, body.text);
//!     }
//!
//!     let account = client.account(AccountReference::new("EX0000001")?);
//!     let message = Message::new(Recipient::new("447700900123")?, MessageText::new("hello")?);
//!     let response = account.send(vec![message]).await?;
//!     println!("batch {}", response.batch_id);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{AccountClient, Credentials, EsendexClient, EsendexClientBuilder, EsendexError};
pub use domain::{
    Account, AccountReference, AccountsResponse, Batch, BatchId, BatchesResponse, BodyReference,
    Dispatch, DispatchedMessage, FailureReason, HasBody, ListOption, Message, MessageBody,
    MessageHeader, MessageId, MessageOptions, MessageText, MessageType, Paging, Password,
    ReceivedMessage, ReceivedMessagesResponse, Recipient, SendResponse, SentMessage,
    SentMessagesResponse, Timestamp, Username, ValidationError,
};
