//! End-to-end tests through the real reqwest transport against a mock server.

use esendex::{
    AccountReference, BatchId, Credentials, EsendexClient, EsendexError, ListOption, Message,
    MessageId, MessageText, Recipient, Timestamp,
};
use wiremock::matchers::{basic_auth, body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> EsendexClient {
    EsendexClient::builder(Credentials::new("user", "pass").unwrap())
        .base_url(server.uri())
        .user_agent("esendex-it")
        .build()
        .unwrap()
}

fn xml(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "application/xml")
        .set_body_string(body)
}

#[tokio::test]
async fn sent_messages_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1.0/messageheaders"))
        .and(query_param("startindex", "20"))
        .and(query_param("count", "20"))
        .and(basic_auth("user", "pass"))
        .and(header("content-type", "application/xml"))
        .and(header("user-agent", "esendex-it"))
        .respond_with(xml(
            r#"<?xml version="1.0" encoding="utf-8"?>
<messageheaders startindex="20" count="1" totalcount="21" xmlns="http://api.esendex.com/ns/">
 <messageheader id="m1" uri="http://example.com/v1.0/messageheaders/m1">
  <reference>EX0000001</reference>
  <status>Delivered</status>
  <laststatusat>2012-01-01T12:00:05.000</laststatusat>
  <submittedat>2012-01-01T12:00:02</submittedat>
  <type>SMS</type>
  <to><phonenumber>447700900123</phonenumber></to>
  <from><phonenumber>447700900456</phonenumber></from>
  <summary>hello</summary>
  <body uri="http://example.com/v1.0/messageheaders/m1/body"/>
  <direction>Outbound</direction>
  <parts>1</parts>
  <username>user</username>
 </messageheader>
</messageheaders>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client.sent(&[ListOption::page(20, 20)]).await.unwrap();

    assert_eq!(response.paging.start_index, 20);
    assert_eq!(response.paging.total_count, 21);
    let message = &response.messages[0];
    assert_eq!(message.id, "m1");
    assert_eq!(message.to, "447700900123");
    assert_eq!(message.from, "447700900456");
    assert_eq!(
        message.submitted_at,
        Some(Timestamp::parse("2012-01-01T12:00:02Z").unwrap())
    );
    assert_eq!(message.failure_reason, None);
}

#[tokio::test]
async fn body_is_fetched_from_mock_server_by_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1.0/messageheaders/m1"))
        .respond_with(xml(
            r#"<messageheader id="m1" uri="http://example.com/v1.0/messageheaders/m1" xmlns="http://api.esendex.com/ns/">
 <body uri="https://api.esendex.com/v1.0/messageheaders/m1/body"/>
</messageheader>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1.0/messageheaders/m1/body"))
        .and(basic_auth("user", "pass"))
        .respond_with(xml(
            r#"<messagebody xmlns="http://api.esendex.com/ns/"><bodytext>Hey there</bodytext><characterset>GSM</characterset></messagebody>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let header = client.message(&MessageId::new("m1").unwrap()).await.unwrap();
    let body = client.body(&header).await.unwrap();

    assert_eq!(body.text, "Hey there");
    assert_eq!(body.character_set, "GSM");
}

#[tokio::test]
async fn send_posts_xml_to_dispatcher() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1.0/messagedispatcher"))
        .and(body_string(
            "<messages>\
             <accountreference>EX0000001</accountreference>\
             <sendat>2030-01-01T09:00:00Z</sendat>\
             <message><to>447700900123</to><body>hello</body></message>\
             </messages>",
        ))
        .respond_with(xml(
            r#"<messageheaders batchid="b1" xmlns="http://api.esendex.com/ns/"><messageheader uri="u1" id="m1"/></messageheaders>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let message = Message::new(
        Recipient::new("447700900123").unwrap(),
        MessageText::new("hello").unwrap(),
    );
    let response = client
        .account(AccountReference::new("EX0000001").unwrap())
        .send_at(Timestamp::parse("2030-01-01T09:00:00").unwrap(), vec![message])
        .await
        .unwrap();

    assert_eq!(response.batch_id, "b1");
    assert_eq!(response.messages[0].id, "m1");
}

#[tokio::test]
async fn unauthorized_is_reported_as_unexpected_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1.0/accounts"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let err = client_for(&server).accounts().await.unwrap_err();
    match err {
        EsendexError::UnexpectedStatus { path, status, .. } => {
            assert_eq!(path, "/v1.0/accounts");
            assert_eq!(status, 401);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn cancel_batch_deletes_schedule() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1.1/messagebatches/b1/schedule"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .cancel_batch(&BatchId::new("b1").unwrap())
        .await
        .unwrap();
}

#[tokio::test]
async fn account_batches_are_filtered_by_account() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1.1/messagebatches"))
        .and(query_param("filterBy", "account"))
        .and(query_param("filterValue", "EX0000001"))
        .respond_with(xml(
            r#"<messagebatches startindex="0" count="0" totalcount="0" xmlns="http://api.esendex.com/ns/"/>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client
        .account(AccountReference::new("EX0000001").unwrap())
        .batches(&[])
        .await
        .unwrap();

    assert!(response.batches.is_empty());
    assert_eq!(response.paging.total_count, 0);
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let client = EsendexClient::builder(Credentials::new("user", "pass").unwrap())
        .base_url("http://127.0.0.1:1/")
        .build()
        .unwrap();

    let err = client.accounts().await.unwrap_err();
    assert!(matches!(err, EsendexError::Transport(_)));
}
