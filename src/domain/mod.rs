//! Domain layer: strong types with validation and invariants (no I/O).

mod options;
mod request;
mod response;
mod timestamp;
mod validation;
mod value;

pub(crate) use options::encode_query;
pub use options::ListOption;
pub use request::{Dispatch, Message, MessageOptions, MessageType};
pub use response::{
    Account, AccountsResponse, Batch, BatchesResponse, BodyReference, DispatchedMessage,
    FailureReason, HasBody, MessageBody, MessageHeader, Paging, ReceivedMessage,
    ReceivedMessagesResponse, SendResponse, SentMessage, SentMessagesResponse,
};
pub use timestamp::Timestamp;
pub use validation::ValidationError;
pub use value::{
    AccountReference, BatchId, MessageId, MessageText, Password, Recipient, Username,
};
