use super::BoxError;
use super::helpers::{BodyAlreadyConsumed, LengthExceeded, SessionNotOpen, TimedOut};
use super::types::{Error, Kind};

/// Creates an `Error` for invalid addresses or options.
pub fn builder<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Builder).with(e.into())
}

/// Creates an `Error` for a connection failure.
pub fn connect<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Connect).with(e.into())
}

/// Creates an `Error` for a request stream failure.
pub fn stream<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Stream).with(e.into())
}

/// Creates an `Error` for a body that grew past `limit` bytes.
pub fn length_exceeded(limit: usize, received: usize) -> Error {
    Error::new(Kind::LengthExceeded { limit }).with(LengthExceeded { limit, received })
}

/// Creates an `Error` for a failed graceful shutdown.
pub fn close<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Close).with(e.into())
}

/// Creates an `Error` for a decode failure.
pub fn decode<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Decode).with(e.into())
}

pub fn session_closed() -> Error {
    Error::new(Kind::SessionClosed).with(SessionNotOpen)
}

pub fn body_consumed() -> Error {
    Error::new(Kind::BodyConsumed).with(BodyAlreadyConsumed)
}

pub fn timeout() -> Error {
    Error::new(Kind::Timeout).with(TimedOut)
}
