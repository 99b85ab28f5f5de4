use std::error::Error as StdError;
use std::sync::{Arc, Mutex};

use super::{
    BoxFuture, Credentials, EsendexClient, HttpRequest, HttpResponse, HttpTransport,
};

#[derive(Debug, Default)]
struct State {
    last_request: Option<HttpRequest>,
}

#[derive(Clone)]
pub(super) struct FakeTransport {
    state: Arc<Mutex<State>>,
    response: Result<HttpResponse, String>,
}

impl FakeTransport {
    pub(super) fn new(status: u16, body: &str) -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
            response: Ok(HttpResponse {
                status,
                body: body.to_owned(),
            }),
        }
    }

    pub(super) fn failing(message: &str) -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
            response: Err(message.to_owned()),
        }
    }

    pub(super) fn last_request(&self) -> Option<HttpRequest> {
        self.state.lock().unwrap().last_request.clone()
    }
}

impl HttpTransport for FakeTransport {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            self.state.lock().unwrap().last_request = Some(request);
            match &self.response {
                Ok(response) => Ok(response.clone()),
                Err(message) => Err(message.clone().into()),
            }
        })
    }
}

pub(super) fn make_client(transport: FakeTransport) -> EsendexClient {
    EsendexClient {
        credentials: Credentials::new("user", "pass").unwrap(),
        base_url: "https://example.invalid/".to_owned(),
        user_agent: "esendex-test".to_owned(),
        http: Arc::new(transport),
    }
}

pub(super) fn header_values<'a>(request: &'a HttpRequest, name: &str) -> Vec<&'a str> {
    request
        .headers
        .iter()
        .filter(|(header, _)| header.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
        .collect()
}

pub(super) fn assert_query(request: &HttpRequest, expected: &[(&str, &str)]) {
    let pairs: Vec<(String, String)> = request
        .url
        .query_pairs()
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    let expected: Vec<(String, String)> = expected
        .iter()
        .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
        .collect();
    assert_eq!(pairs, expected);
}
