//! In-process plaintext HTTP/2 server answering every request the same way.

#![allow(dead_code)]

use std::future::poll_fn;
use std::net::SocketAddr;

use bytes::{Bytes, BytesMut};
use h2::server::SendResponse;
use h2::{Reason, RecvStream};
use http::{Request, Response};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub enum Reply {
    /// Status, content type and a complete body
    Full {
        status: u16,
        content_type: &'static str,
        body: &'static str,
    },
    /// Echo `:method`, `:path` and the request body back as JSON
    Inspect,
    /// One chunk, then silence until the client resets the stream
    Hang {
        chunk: &'static [u8],
        resets: mpsc::UnboundedSender<Reason>,
    },
}

pub struct TestServer {
    addr: SocketAddr,
    task: JoinHandle<()>,
}

impl TestServer {
    pub async fn start(reply: Reply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let task = tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                let reply = reply.clone();
                tokio::spawn(async move {
                    let Ok(mut connection) = h2::server::handshake(socket).await else {
                        return;
                    };
                    while let Some(Ok((request, respond))) = connection.accept().await {
                        tokio::spawn(answer(reply.clone(), request, respond));
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

async fn answer(reply: Reply, request: Request<RecvStream>, mut respond: SendResponse<Bytes>) {
    let (parts, body) = request.into_parts();
    let received = read_body(body).await;

    match reply {
        Reply::Full {
            status,
            content_type,
            body,
        } => {
            let response = Response::builder()
                .status(status)
                .header("content-type", content_type)
                .body(())
                .unwrap();
            let mut send = respond.send_response(response, false).unwrap();
            send.send_data(Bytes::from_static(body.as_bytes()), true).unwrap();
        }
        Reply::Inspect => {
            let echoed = serde_json::json!({
                "method": parts.method.as_str(),
                "path": parts.uri.path_and_query().map(|p| p.as_str()),
                "content_type": parts
                    .headers
                    .get("content-type")
                    .and_then(|v| v.to_str().ok()),
                "body": String::from_utf8_lossy(&received),
            });
            let response = Response::builder()
                .status(200)
                .header("content-type", "application/json")
                .body(())
                .unwrap();
            let mut send = respond.send_response(response, false).unwrap();
            send.send_data(Bytes::from(echoed.to_string()), true).unwrap();
        }
        Reply::Hang { chunk, resets } => {
            let response = Response::builder().status(200).body(()).unwrap();
            let mut send = respond.send_response(response, false).unwrap();
            send.send_data(Bytes::from_static(chunk), false).unwrap();

            if let Ok(reason) = poll_fn(|cx| send.poll_reset(cx)).await {
                let _ = resets.send(reason);
            }
        }
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
