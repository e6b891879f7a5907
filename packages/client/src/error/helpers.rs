use std::fmt;

/// A marker type to indicate that a configured deadline elapsed.
#[derive(Debug)]
pub struct TimedOut;

impl fmt::Display for TimedOut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("timed out")
    }
}

impl std::error::Error for TimedOut {}

/// A marker type to indicate that an address scheme was not `http` or `https`.
#[derive(Debug)]
pub struct BadScheme;

impl fmt::Display for BadScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("bad scheme")
    }
}

impl std::error::Error for BadScheme {}

/// Reason a buffered body read was aborted.
#[derive(Debug)]
pub struct LengthExceeded {
    pub limit: usize,
    pub received: usize,
}

impl fmt::Display for LengthExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Data length exceeded: received {} bytes, limit is {}",
            self.received, self.limit
        )
    }
}

impl std::error::Error for LengthExceeded {}

/// A marker type to indicate that the session was closing or closed.
#[derive(Debug)]
pub struct SessionNotOpen;

impl fmt::Display for SessionNotOpen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("session not open")
    }
}

impl std::error::Error for SessionNotOpen {}

/// A marker type to indicate that `text()` or `json()` was already called.
#[derive(Debug)]
pub struct BodyAlreadyConsumed;

impl fmt::Display for BodyAlreadyConsumed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("body already consumed")
    }
}

impl std::error::Error for BodyAlreadyConsumed {}
