//! Buffered body reads with a size cap
//!
//! A reader takes ownership of a [`ResponseBody`], appends each data event to
//! one buffer in arrival order and settles exactly once:
//!
//! - the buffer grows past `max_size` (`0` = unlimited), or the pump already
//!   cut the stream at the session cap: the stream is destroyed with `CANCEL`
//!   and the read fails with `LengthExceeded`
//! - the stream ends: it is closed with `NO_ERROR` and the buffer is decoded
//! - the stream errors: the read fails with that error
//!
//! Dropping the body on return detaches the reader from the stream.

use bytes::BytesMut;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::body::{BodyEvent, ResponseBody};
use super::json;
use crate::constants::{NGHTTP2_CANCEL, NGHTTP2_NO_ERROR};
use crate::error::{self, Result};

/// Buffer the whole body and decode it as UTF-8 text.
///
/// # Errors
///
/// - `LengthExceeded` once more than `max_size` bytes arrived (`max_size > 0`)
/// - `Stream` if the stream is reset or fails before its end
/// - `Decode` if the payload is not valid UTF-8
pub async fn read_text(mut body: ResponseBody, max_size: usize) -> Result<String> {
    let mut buffer = BytesMut::new();

    loop {
        match body.next_event().await {
            Some(BodyEvent::Data(chunk)) => {
                buffer.extend_from_slice(&chunk);

                if max_size > 0 && buffer.len() > max_size {
                    tracing::debug!(
                        "Body exceeded {} bytes ({} received), destroying stream",
                        max_size,
                        buffer.len()
                    );
                    let received = buffer.len();
                    body.destroy(NGHTTP2_CANCEL);
                    return Err(error::length_exceeded(max_size, received));
                }
            }
            Some(BodyEvent::End) => {
                body.close(NGHTTP2_NO_ERROR);
                return decode_utf8(&buffer);
            }
            Some(BodyEvent::Error(e)) => return Err(error::stream(e)),
            Some(BodyEvent::LengthExceeded { limit, received }) => {
                return Err(error::length_exceeded(limit, received));
            }
            None => return Err(error::stream("response stream closed before its end")),
        }
    }
}

/// Buffer the body as text, then parse it as JSON.
///
/// # Errors
///
/// Everything [`read_text`] returns, plus `Decode` for malformed JSON.
pub async fn read_json(body: ResponseBody, max_size: usize) -> Result<Value> {
    let text = read_text(body, max_size).await?;
    json::parse(&text)
}

/// Buffer the body as text, then deserialize it into `T`.
///
/// # Errors
///
/// Everything [`read_text`] returns, plus `Decode` if the JSON does not match `T`.
pub async fn read_json_as<T: DeserializeOwned>(body: ResponseBody, max_size: usize) -> Result<T> {
    let text = read_text(body, max_size).await?;
    json::parse_as(&text)
}

fn decode_utf8(buffer: &[u8]) -> Result<String> {
    simdutf8::compat::from_utf8(buffer)
        .map(str::to_owned)
        .map_err(error::decode)
}
