//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives every call shape over
//! real HTTP with `ReqwestTransport`. Validates that request building, the
//! transport and response classification agree with an actual server.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::time::Duration;

use futures::StreamExt;
use mock_server::{User, CREATED_ID};
use wirecall_core::{
    ApiClient, ApiError, Body, EndpointDescriptor, Outcome, ReqwestTransport, TransportConfig,
};

/// Start the mock server on its own thread and return its address.
fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn client() -> ApiClient<ReqwestTransport> {
    let transport = ReqwestTransport::from_config(&TransportConfig::default()).unwrap();
    ApiClient::new(transport)
}

fn base(addr: SocketAddr) -> String {
    format!("http://{addr}/")
}

#[tokio::test]
async fn fetch_decodes_a_user() {
    let addr = start_server();
    let endpoint = EndpointDescriptor::get(base(addr), "users").query("id", "7");

    let user: User = client().fetch(&endpoint).await.unwrap();
    assert_eq!(
        user,
        User {
            id: 7,
            name: "user-7".to_string()
        }
    );
}

#[tokio::test]
async fn post_sends_a_json_body() {
    let addr = start_server();
    let endpoint = EndpointDescriptor::post(base(addr), "users")
        .with_body(Body::json(serde_json::json!({"name": "Ada"})));

    let user: User = client().fetch(&endpoint).await.unwrap();
    assert_eq!(user.id, CREATED_ID);
    assert_eq!(user.name, "Ada");
}

#[tokio::test]
async fn every_shape_agrees_on_each_fixture() {
    let addr = start_server();
    let client = client();

    let cases: [(&str, fn(&Outcome<User>) -> bool); 5] = [
        ("users?id=3", |o: &Outcome<User>| matches!(o, Ok(User { id: 3, .. }))),
        ("users", |o: &Outcome<User>| matches!(o, Err(ApiError::Status(Some(400))))),
        ("missing", |o: &Outcome<User>| matches!(o, Err(ApiError::Status(Some(404))))),
        ("empty", |o: &Outcome<User>| matches!(o, Err(ApiError::NoData))),
        ("malformed", |o: &Outcome<User>| matches!(o, Err(ApiError::Decoding(_)))),
    ];

    for (path, expected) in cases {
        let endpoint = EndpointDescriptor::get(base(addr), path);

        let suspended = client.fetch::<User>(&endpoint).await;
        assert!(expected(&suspended), "fetch {path}: {suspended:?}");

        let streamed = client.fetch_stream::<User>(&endpoint).next().await.unwrap();
        assert!(expected(&streamed), "stream {path}: {streamed:?}");

        let (tx, rx) = tokio::sync::oneshot::channel();
        client.fetch_with(&endpoint, move |outcome: Outcome<User>| {
            let _ = tx.send(outcome);
        });
        let called_back = rx.await.unwrap();
        assert!(expected(&called_back), "callback {path}: {called_back:?}");
    }
}

#[tokio::test]
async fn set_and_add_headers_reach_the_server() {
    let addr = start_server();
    let endpoint = EndpointDescriptor::new(wirecall_core::Method::GET, base(addr), "headers")
        .header("X-A", "0")
        .header("X-A", "1")
        .with_body(Body::payload(HeaderPayload));

    let echoed: BTreeMap<String, Vec<String>> = client().fetch(&endpoint).await.unwrap();
    assert_eq!(echoed["x-a"], vec!["1", "2"]);
}

/// Payload that only contributes an extra `X-A` header.
struct HeaderPayload;

impl wirecall_core::Payload for HeaderPayload {
    fn additional_headers(&self) -> Vec<(String, String)> {
        vec![("X-A".to_string(), "2".to_string())]
    }

    fn encode(&self) -> Result<bytes::Bytes, wirecall_core::EncodingError> {
        Ok(bytes::Bytes::new())
    }
}

#[tokio::test]
async fn connection_refused_is_a_transport_failure() {
    // Bind then drop to get a port nothing listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let endpoint = EndpointDescriptor::get(base(addr), "users").query("id", "1");

    let err = client().fetch::<User>(&endpoint).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

#[test]
fn callback_works_without_an_ambient_runtime() {
    let addr = start_server();
    let transport = ReqwestTransport::from_config(&TransportConfig::default()).unwrap();
    let client = ApiClient::new(transport);
    let endpoint = EndpointDescriptor::get(base(addr), "users").query("id", "9");

    let (tx, rx) = std::sync::mpsc::channel();
    client.fetch_with(&endpoint, move |outcome: Outcome<User>| {
        tx.send(outcome).unwrap();
    });
    let user = rx.recv_timeout(Duration::from_secs(10)).unwrap().unwrap();
    assert_eq!(user.id, 9);
}
