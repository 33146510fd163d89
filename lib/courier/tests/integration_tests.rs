//! Integration tests for `HyperConnector` using wiremock.

use std::time::Duration;

use assert2::{check, let_assert};
use bytes::Bytes;
use courier::{
    ConnectorExt, Error, HttpResponse, HyperConnector, Json, JsonList, NoContent, Text,
};
use serde::Deserialize;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct Server {
    id: u64,
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct Servers {
    servers: Vec<Server>,
}

fn get(uri: String) -> http::Request<Bytes> {
    http::Request::get(uri)
        .header("Accept", "application/json")
        .body(Bytes::new())
        .expect("valid request")
}

#[tokio::test]
async fn decodes_success_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/servers/1"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "alpha"})))
        .mount(&mock_server)
        .await;

    let connector = HyperConnector::new();
    let mut response = connector
        .execute(get(format!("{}/servers/1", mock_server.uri())))
        .await
        .expect("response");

    check!(response.status() == 200);
    check!(response.reason() == "OK");

    let_assert!(Ok(Some(server)) = response.entity::<Json<Server>>());
    check!(
        server
            == Server {
                id: 1,
                name: "alpha".to_string()
            }
    );
}

#[tokio::test]
async fn client_error_carries_server_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/servers"))
        .respond_with(ResponseTemplate::new(400).set_body_raw(
            r#"{"badRequest": {"message": "quota exceeded", "code": 400}}"#,
            "application/json",
        ))
        .mount(&mock_server)
        .await;

    let connector = HyperConnector::new();
    let mut response = connector
        .execute(get(format!("{}/servers", mock_server.uri())))
        .await
        .expect("response");

    let_assert!(Err(err) = response.entity::<JsonList<Servers>>());
    check!(err.is_client_error());
    check!(err.status() == 400);
    check!(err.message() == "quota exceeded");
}

#[tokio::test]
async fn unauthorized_is_authentication_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/servers"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_raw(r#"{"error": {"message": "token expired"}}"#, "application/json"),
        )
        .mount(&mock_server)
        .await;

    let connector = HyperConnector::new();
    let mut response = connector
        .execute(get(format!("{}/servers", mock_server.uri())))
        .await
        .expect("response");

    let_assert!(Err(err) = response.entity::<JsonList<Servers>>());
    let_assert!(Error::Authentication { status, message, .. } = err);
    check!(status == 401);
    check!(message == "token expired");
}

#[tokio::test]
async fn not_found_collection_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/servers"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
        .mount(&mock_server)
        .await;

    let connector = HyperConnector::new();
    let mut response = connector
        .execute(get(format!("{}/servers", mock_server.uri())))
        .await
        .expect("response");

    let_assert!(Ok(servers) = response.entity::<JsonList<Servers>>());
    check!(servers.servers.is_empty());
    check!(!response.is_body_consumed());
}

#[tokio::test]
async fn not_found_record_is_absent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/servers/9"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let connector = HyperConnector::new();
    let mut response = connector
        .execute(get(format!("{}/servers/9", mock_server.uri())))
        .await
        .expect("response");

    let_assert!(Ok(None) = response.entity::<Json<Server>>());
}

#[tokio::test]
async fn server_error_uses_reason_phrase() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/servers/1"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_raw(r#"{"message": "stack trace leaked"}"#, "application/json"),
        )
        .mount(&mock_server)
        .await;

    let connector = HyperConnector::new();
    let request = http::Request::delete(format!("{}/servers/1", mock_server.uri()))
        .body(Bytes::new())
        .expect("valid request");
    let mut response = connector.execute(request).await.expect("response");

    let_assert!(Err(err) = response.entity::<NoContent>());
    check!(err.is_server_error());
    check!(err.message() == "Internal Server Error");
    insta::assert_snapshot!(err, @"server error 500: Internal Server Error");
}

#[tokio::test]
async fn no_content_succeeds() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/servers/1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let connector = HyperConnector::new();
    let request = http::Request::delete(format!("{}/servers/1", mock_server.uri()))
        .body(Bytes::new())
        .expect("valid request");
    let mut response = connector.execute(request).await.expect("response");

    let_assert!(Ok(()) = response.entity::<NoContent>());
    check!(response.reason() == "No Content");
}

#[tokio::test]
async fn exposes_response_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/version"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Request-Id", "req-42")
                .set_body_string("2.1"),
        )
        .mount(&mock_server)
        .await;

    let connector = HyperConnector::new();
    let mut response = connector
        .execute(get(format!("{}/version", mock_server.uri())))
        .await
        .expect("response");

    check!(response.header("x-request-id") == Some("req-42".to_string()));
    check!(response.header("X-REQUEST-ID") == Some("req-42".to_string()));
    check!(response.header("X-Missing").is_none());
    check!(response.headers().contains_key("x-request-id"));

    let_assert!(Ok(Some(text)) = response.entity::<Text>());
    check!(text == "2.1");
}

#[tokio::test]
async fn slow_response_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&mock_server)
        .await;

    let connector = HyperConnector::builder()
        .timeout(Duration::from_millis(50))
        .build();
    let result = connector
        .execute(get(format!("{}/slow", mock_server.uri())))
        .await;

    let_assert!(Err(err) = result);
    check!(err.is_timeout());
}

#[tokio::test]
async fn refused_connection_is_connection_error() {
    let connector = HyperConnector::builder()
        .connect_timeout(Duration::from_secs(1))
        .build();
    let result = connector
        .execute(get("http://127.0.0.1:1/unreachable".to_string()))
        .await;

    let_assert!(Err(err) = result);
    check!(err.is_connection());
}

#[tokio::test]
async fn logging_layer_keeps_contract() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/servers"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_raw(r#"{"forbidden": {"message": "policy denied"}}"#, "application/json"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let connector = HyperConnector::builder().with_debug_logging().build();
    let mut response = connector
        .execute(get(format!("{}/servers", mock_server.uri())))
        .await
        .expect("response");

    let_assert!(Err(err) = response.entity::<JsonList<Servers>>());
    check!(err.is_client_error());
    check!(err.message() == "policy denied");
}

#[tokio::test]
async fn relative_uri_is_rejected() {
    let connector = HyperConnector::new();
    let result = connector.execute(get("/servers".to_string())).await;

    let_assert!(Err(Error::InvalidRequest(message)) = result);
    check!(message.contains("/servers"));
}
