use super::{EsendexClient, EsendexError};
use crate::domain::{
    AccountReference, BatchesResponse, Dispatch, ListOption, Message, ReceivedMessagesResponse,
    SendResponse, SentMessagesResponse, Timestamp,
};

/// Operations scoped to one account.
///
/// Listing filters for the account are appended after the caller's options.
#[derive(Clone)]
pub struct AccountClient<'a> {
    client: &'a EsendexClient,
    reference: AccountReference,
}

impl<'a> AccountClient<'a> {
    pub(super) fn new(client: &'a EsendexClient, reference: AccountReference) -> Self {
        Self { client, reference }
    }

    pub fn reference(&self) -> &AccountReference {
        &self.reference
    }

    /// List messages sent from this account.
    pub async fn sent(&self, options: &[ListOption]) -> Result<SentMessagesResponse, EsendexError> {
        let options = self.scoped(options, ListOption::sent_by_account);
        self.client.sent(&options).await
    }

    /// List messages received by this account.
    pub async fn received(
        &self,
        options: &[ListOption],
    ) -> Result<ReceivedMessagesResponse, EsendexError> {
        let path = format!("/v1.0/inbox/{}/messages", self.reference.as_str());
        self.client.received_at(&path, options).await
    }

    /// List batches created under this account.
    pub async fn batches(&self, options: &[ListOption]) -> Result<BatchesResponse, EsendexError> {
        let options = self.scoped(options, ListOption::batches_by_account);
        self.client.batches(&options).await
    }

    /// Send messages immediately, all in one batch.
    pub async fn send(&self, messages: Vec<Message>) -> Result<SendResponse, EsendexError> {
        let dispatch = Dispatch::new(messages)?;
        self.client.dispatch(&self.reference, &dispatch).await
    }

    /// Schedule messages for delivery at `send_at`.
    pub async fn send_at(
        &self,
        send_at: Timestamp,
        messages: Vec<Message>,
    ) -> Result<SendResponse, EsendexError> {
        let dispatch = Dispatch::scheduled(messages, send_at)?;
        self.client.dispatch(&self.reference, &dispatch).await
    }

    fn scoped(
        &self,
        options: &[ListOption],
        filter: fn(AccountReference) -> ListOption,
    ) -> Vec<ListOption> {
        let mut scoped = options.to_vec();
        scoped.push(filter(self.reference.clone()));
        scoped
    }
}
