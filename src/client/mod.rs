//! Client layer: builds requests, runs them through the HTTP transport and
//! maps transport ↔ domain.

mod account;
#[cfg(test)]
mod testing;

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Method;
use url::Url;

use crate::domain::{
    AccountReference, AccountsResponse, Batch, BatchId, BatchesResponse, Dispatch, HasBody,
    ListOption, MessageBody, MessageHeader, MessageId, Password, ReceivedMessagesResponse,
    SendResponse, SentMessagesResponse, Username, ValidationError, encode_query,
};
use crate::transport::TransportError;

pub use account::AccountClient;

const DEFAULT_BASE_URL: &str = "https://api.esendex.com/";
const DEFAULT_USER_AGENT: &str = concat!("esendex-rust/", env!("CARGO_PKG_VERSION"));
const XML_CONTENT_TYPE: &str = "application/xml";

const ACCOUNTS_PATH: &str = "/v1.0/accounts";
const MESSAGE_HEADERS_PATH: &str = "/v1.0/messageheaders";
const INBOX_PATH: &str = "/v1.0/inbox/messages";
const DISPATCHER_PATH: &str = "/v1.0/messagedispatcher";
const BATCHES_PATH: &str = "/v1.1/messagebatches";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpRequest {
    method: Method,
    url: Url,
    headers: Vec<(&'static str, String)>,
    body: Option<String>,
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    /// Run one request and read the whole response body.
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut builder = self.client.request(request.method, request.url);
            for (name, value) in request.headers {
                builder = builder.header(name, value);
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone)]
/// HTTP Basic credentials for the Esendex API.
pub struct Credentials {
    username: Username,
    password: Password,
}

impl Credentials {
    /// Create credentials, validating that both parts are non-empty.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            username: Username::new(username)?,
            password: Password::new(password)?,
        })
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    fn authorization_header(&self) -> String {
        let pair = format!("{}:{}", self.username.as_str(), self.password.as_str());
        format!("Basic {}", BASE64.encode(pair))
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`EsendexClient`] and [`AccountClient`].
pub enum EsendexError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// The server answered with a status the operation does not accept.
    #[error("{method} {path}: {status}")]
    UnexpectedStatus {
        method: Method,
        path: String,
        status: u16,
    },

    /// Response body could not be decoded as the expected XML document.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// Request body could not be encoded as XML.
    #[error("encode error: {0}")]
    Encode(#[source] Box<dyn StdError + Send + Sync>),

    /// The base URL or a request path is not a valid URL.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The message carries no body reference to fetch.
    #[error("message has no body reference")]
    MissingBody,

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    Success,
    NoContent,
}

impl Expect {
    fn accepts(self, status: u16) -> bool {
        match self {
            Self::Success => (200..=299).contains(&status),
            Self::NoContent => status == 204,
        }
    }
}

#[derive(Debug, Clone)]
/// Builder for [`EsendexClient`].
///
/// Use this when you need to customize the base URL, timeout, or user-agent.
pub struct EsendexClientBuilder {
    credentials: Credentials,
    base_url: String,
    user_agent: String,
    timeout: Option<Duration>,
}

impl EsendexClientBuilder {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout: None,
        }
    }

    /// Override the API root (`https://api.esendex.com/` by default).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<EsendexClient, EsendexError> {
        Url::parse(&self.base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| EsendexError::Transport(Box::new(err)))?;

        Ok(EsendexClient {
            credentials: self.credentials,
            base_url: self.base_url,
            user_agent: self.user_agent,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level Esendex client.
///
/// Every operation is a single HTTP round trip authenticated with HTTP Basic
/// credentials. Listing operations accept [`ListOption`]s, applied in order.
/// Use [`EsendexClient::account`] for operations scoped to one account,
/// including sending.
pub struct EsendexClient {
    credentials: Credentials,
    base_url: String,
    user_agent: String,
    http: Arc<dyn HttpTransport>,
}

impl EsendexClient {
    /// Create a client using the default base URL and user agent.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    pub fn builder(credentials: Credentials) -> EsendexClientBuilder {
        EsendexClientBuilder::new(credentials)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Scope operations to one account.
    pub fn account(&self, reference: AccountReference) -> AccountClient<'_> {
        AccountClient::new(self, reference)
    }

    /// List the accounts visible to the credentials.
    pub async fn accounts(&self) -> Result<AccountsResponse, EsendexError> {
        self.get(
            ACCOUNTS_PATH,
            &[],
            crate::transport::decode_accounts_xml_response,
        )
        .await
    }

    /// List sent messages, newest first.
    pub async fn sent(&self, options: &[ListOption]) -> Result<SentMessagesResponse, EsendexError> {
        self.get(
            MESSAGE_HEADERS_PATH,
            options,
            crate::transport::decode_sent_messages_xml_response,
        )
        .await
    }

    /// List received messages across every account.
    pub async fn received(
        &self,
        options: &[ListOption],
    ) -> Result<ReceivedMessagesResponse, EsendexError> {
        self.received_at(INBOX_PATH, options).await
    }

    async fn received_at(
        &self,
        path: &str,
        options: &[ListOption],
    ) -> Result<ReceivedMessagesResponse, EsendexError> {
        self.get(
            path,
            options,
            crate::transport::decode_received_messages_xml_response,
        )
        .await
    }

    /// Fetch the header of one message, sent or received.
    pub async fn message(&self, id: &MessageId) -> Result<MessageHeader, EsendexError> {
        let path = format!("{MESSAGE_HEADERS_PATH}/{}", id.as_str());
        self.get(
            &path,
            &[],
            crate::transport::decode_message_header_xml_response,
        )
        .await
    }

    /// Resolve the body of any message kind through its body reference.
    ///
    /// Only the path of the reference is used; the request goes to the
    /// configured base URL with the client's credentials.
    pub async fn body<M>(&self, message: &M) -> Result<MessageBody, EsendexError>
    where
        M: HasBody + ?Sized,
    {
        let reference = message.body_reference().ok_or(EsendexError::MissingBody)?;
        let path = Url::parse(&self.base_url)?
            .join(reference.as_str())?
            .path()
            .to_owned();
        self.get(
            &path,
            &[],
            crate::transport::decode_message_body_xml_response,
        )
        .await
    }

    /// List message batches.
    pub async fn batches(&self, options: &[ListOption]) -> Result<BatchesResponse, EsendexError> {
        self.get(
            BATCHES_PATH,
            options,
            crate::transport::decode_batches_xml_response,
        )
        .await
    }

    pub async fn batch(&self, id: &BatchId) -> Result<Batch, EsendexError> {
        let path = format!("{BATCHES_PATH}/{}", id.as_str());
        self.get(&path, &[], crate::transport::decode_batch_xml_response)
            .await
    }

    /// Cancel a scheduled batch. The API answers `204 No Content`; any other
    /// status, including other 2xx codes, is an error.
    pub async fn cancel_batch(&self, id: &BatchId) -> Result<(), EsendexError> {
        let path = format!("{BATCHES_PATH}/{}/schedule", id.as_str());
        let request = self.build_request(Method::DELETE, &path, &[], None)?;
        self.execute(request, Expect::NoContent).await?;
        Ok(())
    }

    async fn dispatch(
        &self,
        reference: &AccountReference,
        dispatch: &Dispatch,
    ) -> Result<SendResponse, EsendexError> {
        let body = crate::transport::encode_dispatch_xml_request(reference, dispatch)
            .map_err(|err| EsendexError::Encode(Box::new(err)))?;
        let request = self.build_request(Method::POST, DISPATCHER_PATH, &[], Some(body))?;
        let response = self.execute(request, Expect::Success).await?;
        crate::transport::decode_dispatch_xml_response(&response.body)
            .map_err(|err| EsendexError::Parse(Box::new(err)))
    }

    async fn get<T>(
        &self,
        path: &str,
        options: &[ListOption],
        decode: fn(&str) -> Result<T, TransportError>,
    ) -> Result<T, EsendexError> {
        let request = self.build_request(Method::GET, path, &encode_query(options), None)?;
        let response = self.execute(request, Expect::Success).await?;
        decode(&response.body).map_err(|err| EsendexError::Parse(Box::new(err)))
    }

    fn build_request(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<String>,
    ) -> Result<HttpRequest, EsendexError> {
        let mut url = Url::parse(&self.base_url)?.join(path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        Ok(HttpRequest {
            method,
            url,
            headers: vec![
                ("Content-Type", XML_CONTENT_TYPE.to_owned()),
                ("User-Agent", self.user_agent.clone()),
                ("Authorization", self.credentials.authorization_header()),
            ],
            body,
        })
    }

    async fn execute(
        &self,
        request: HttpRequest,
        expect: Expect,
    ) -> Result<HttpResponse, EsendexError> {
        let method = request.method.clone();
        let path = request.url.path().to_owned();
        tracing::debug!(%method, %path, "sending request");

        let response = self
            .http
            .execute(request)
            .await
            .map_err(EsendexError::Transport)?;
        tracing::debug!(%method, %path, status = response.status, "received response");

        if !expect.accepts(response.status) {
            tracing::warn!(%method, %path, status = response.status, "unexpected HTTP status");
            return Err(EsendexError::UnexpectedStatus {
                method,
                path,
                status: response.status,
            });
        }

        Ok(response)
    }
}
