mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use h2::Reason;
use h2fetch_client::{
    RequestDescriptor, SessionOptions, SessionState, TimeoutConfig, create_session,
};
use tokio::sync::mpsc;

use common::{Route, TestServer, closed_address};

#[tokio::test]
async fn default_request_is_get_root() {
    let server = TestServer::start(Route::Echo).await;
    let session = create_session(server.address(), SessionOptions::default())
        .await
        .unwrap();
    assert_eq!(session.state(), SessionState::Open);

    let response = session.request(RequestDescriptor::new()).await.unwrap();
    assert_eq!(response.status(), 200);
    assert!(response.ok());
    assert_eq!(response.headers().get("x-method"), Some("GET"));
    assert_eq!(response.headers().get("x-path"), Some("/"));
    assert_eq!(response.text().await.unwrap(), "GET /");

    session.close().await.unwrap();
}

#[tokio::test]
async fn body_and_headers_reach_the_server() {
    let server = TestServer::start(Route::Echo).await;
    let session = create_session(server.address(), SessionOptions::default())
        .await
        .unwrap();

    let response = session
        .request(
            RequestDescriptor::new()
                .with_header(":method", "POST")
                .with_header(":path", "/submit")
                .with_header("X-Custom", "yes")
                .with_body("hello"),
        )
        .await
        .unwrap();

    assert_eq!(response.headers().get("x-method"), Some("POST"));
    assert_eq!(response.headers().get("x-path"), Some("/submit"));
    assert_eq!(response.headers().get("x-custom"), Some("yes"));
    assert_eq!(response.text().await.unwrap(), "hello");

    session.close().await.unwrap();
}

#[tokio::test]
async fn close_is_idempotent_and_detaches_listeners() {
    let server = TestServer::start(Route::Echo).await;
    let session = create_session(server.address(), SessionOptions::default())
        .await
        .unwrap();

    session.close().await.unwrap();
    assert_eq!(session.state(), SessionState::Closed);
    assert_eq!(session.listener_count(), 0);

    session.close().await.unwrap();
    assert_eq!(session.listener_count(), 0);
}

#[tokio::test]
async fn request_after_close_is_rejected() {
    let server = TestServer::start(Route::Echo).await;
    let session = create_session(server.address(), SessionOptions::default())
        .await
        .unwrap();
    session.close().await.unwrap();

    let err = session.request(RequestDescriptor::new()).await.unwrap_err();
    assert!(err.is_session_closed());
}

#[tokio::test]
async fn in_flight_body_survives_close() {
    let server = TestServer::start(Route::Json {
        status: 200,
        body: r#"{"done":true}"#,
    })
    .await;
    let session = create_session(server.address(), SessionOptions::default())
        .await
        .unwrap();

    let response = session.request(RequestDescriptor::new()).await.unwrap();
    session.close().await.unwrap();

    let value = response.json().await.unwrap();
    assert_eq!(value["done"], true);
}

#[tokio::test]
async fn hung_body_over_limit_is_cancelled() {
    let (resets, mut reset_rx) = mpsc::unbounded_channel();
    let server = TestServer::start(Route::Hang {
        chunk: b"0123456789abcdef",
        resets,
    })
    .await;
    let options = SessionOptions::default().with_max_body_size(8);
    let session = create_session(server.address(), options).await.unwrap();

    let response = session.request(RequestDescriptor::new()).await.unwrap();
    let err = response.text().await.unwrap_err();
    assert!(err.is_length_exceeded());

    let reason = tokio::time::timeout(Duration::from_secs(5), reset_rx.recv())
        .await
        .unwrap();
    assert_eq!(reason, Some(Reason::CANCEL));

    session.close().await.unwrap();
}

#[tokio::test]
async fn unread_body_stops_at_the_session_cap() {
    let delivered = Arc::new(AtomicUsize::new(0));
    let server = TestServer::start(Route::Flood {
        total: 4 * 1024 * 1024,
        delivered: Arc::clone(&delivered),
    })
    .await;
    let options = SessionOptions::default().with_max_body_size(16);
    let session = create_session(server.address(), options).await.unwrap();

    let response = session.request(RequestDescriptor::new()).await.unwrap();
    tokio::time::sleep(Duration::from_millis(500)).await;

    // Nothing read the body, yet the peer never got past the initial window.
    let sent = delivered.load(Ordering::SeqCst);
    assert!(sent <= 65_535 + 16, "server sent {sent} bytes into an unread body");

    let err = response.text().await.unwrap_err();
    assert!(err.is_length_exceeded());

    tokio::time::timeout(Duration::from_secs(5), session.close())
        .await
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn refused_stream_fails_the_request_only() {
    let server = TestServer::start(Route::Reset(Reason::REFUSED_STREAM)).await;
    let session = create_session(server.address(), SessionOptions::default())
        .await
        .unwrap();

    let err = session.request(RequestDescriptor::new()).await.unwrap_err();
    assert!(err.is_stream());
    assert_eq!(err.h2_reason(), Some(Reason::REFUSED_STREAM));
    assert_eq!(session.state(), SessionState::Open);

    session.close().await.unwrap();
}

#[tokio::test]
async fn unreachable_address_fails_to_connect() {
    let address = closed_address().await;
    let options = SessionOptions::default()
        .with_timeouts(TimeoutConfig::default().with_connect(Duration::from_secs(5)));

    let err = create_session(&address, options).await.unwrap_err();
    assert!(err.is_connect(), "{err:?}");
    assert!(err.address().is_some());
}

#[tokio::test]
async fn unsupported_scheme_is_a_builder_error() {
    let err = create_session("ftp://127.0.0.1:21", SessionOptions::default())
        .await
        .unwrap_err();
    assert!(err.is_builder());
}
