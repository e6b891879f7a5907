//! In-process plaintext HTTP/2 server for integration tests.

#![allow(dead_code)]

use std::future::poll_fn;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::{Bytes, BytesMut};
use h2::server::SendResponse;
use h2::{Reason, RecvStream};
use http::{Request, Response, StatusCode};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// How the server answers every request it accepts
#[derive(Debug, Clone)]
pub enum Route {
    /// 200 with `x-method`/`x-path` headers; echoes the request body, or
    /// `"METHOD PATH"` when there is none
    Echo,
    /// Fixed status and JSON payload
    Json { status: u16, body: &'static str },
    /// Headers and one chunk, then never ends; reports the client's reset
    Hang {
        chunk: &'static [u8],
        resets: mpsc::UnboundedSender<Reason>,
    },
    /// Send up to `total` bytes as fast as flow control allows and never
    /// end; `delivered` counts the bytes the peer granted window for
    Flood {
        total: usize,
        delivered: Arc<AtomicUsize>,
    },
    /// Refuse the stream outright
    Reset(Reason),
}

pub struct TestServer {
    addr: SocketAddr,
    task: JoinHandle<()>,
}

impl TestServer {
    pub async fn start(route: Route) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let task = tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                let route = route.clone();
                tokio::spawn(async move {
                    let Ok(mut connection) = h2::server::handshake(socket).await else {
                        return;
                    };
                    while let Some(Ok((request, respond))) = connection.accept().await {
                        tokio::spawn(serve(route.clone(), request, respond));
                    }
                });
            }
        });

        Self { addr, task }
    }

    pub fn address(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// An address nothing listens on
pub async fn closed_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

async fn serve(route: Route, request: Request<RecvStream>, mut respond: SendResponse<Bytes>) {
    let (parts, body) = request.into_parts();

    match route {
        Route::Echo => {
            let received = read_body(body).await;
            let payload = if received.is_empty() {
                Bytes::from(format!("{} {}", parts.method, parts.uri.path()))
            } else {
                received
            };

            let mut response = Response::builder()
                .status(StatusCode::OK)
                .header("content-type", "text/plain")
                .header("x-method", parts.method.as_str())
                .header("x-path", parts.uri.path());
            if let Some(value) = parts.headers.get("x-custom") {
                response = response.header("x-custom", value);
            }

            let mut send = respond.send_response(response.body(()).unwrap(), false).unwrap();
            send.send_data(payload, true).unwrap();
        }
        Route::Json { status, body: payload } => {
            read_body(body).await;
            let response = Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(())
                .unwrap();
            let mut send = respond.send_response(response, false).unwrap();
            send.send_data(Bytes::from_static(payload.as_bytes()), true).unwrap();
        }
        Route::Hang { chunk, resets } => {
            let response = Response::builder().status(StatusCode::OK).body(()).unwrap();
            let mut send = respond.send_response(response, false).unwrap();
            send.send_data(Bytes::from_static(chunk), false).unwrap();

            if let Ok(reason) = poll_fn(|cx| send.poll_reset(cx)).await {
                let _ = resets.send(reason);
            }
        }
        Route::Flood { total, delivered } => {
            let response = Response::builder().status(StatusCode::OK).body(()).unwrap();
            let mut send = respond.send_response(response, false).unwrap();

            let mut remaining = total;
            while remaining > 0 {
                send.reserve_capacity(remaining.min(16_384));
                let granted = match poll_fn(|cx| send.poll_capacity(cx)).await {
                    Some(Ok(granted)) => granted,
                    _ => return,
                };
                if granted == 0 {
                    continue;
                }
                if send.send_data(Bytes::from(vec![b'x'; granted]), false).is_err() {
                    return;
                }
                delivered.fetch_add(granted, Ordering::SeqCst);
                remaining -= granted;
            }

            let _ = poll_fn(|cx| send.poll_reset(cx)).await;
        }
        Route::Reset(reason) => respond.send_reset(reason),
    }
}

async fn read_body(mut body: RecvStream) -> Bytes {
    let mut buffer = BytesMut::new();
    while let Some(Ok(chunk)) = body.data().await {
        let _ = body.flow_control().release_capacity(chunk.len());
        buffer.extend_from_slice(&chunk);
    }
    buffer.freeze()
}
