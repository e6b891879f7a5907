use std::error::Error as StdError;
use std::io;

use super::helpers::TimedOut;
use super::types::{Error, Kind};

impl Error {
    /// Returns true if the error came from parsing the address or options.
    #[must_use]
    pub fn is_builder(&self) -> bool {
        matches!(self.inner.kind, Kind::Builder)
    }

    /// Returns true if the session could not be established.
    #[must_use]
    pub fn is_connect(&self) -> bool {
        matches!(self.inner.kind, Kind::Connect)
    }

    /// Returns true if the error belongs to a single request stream.
    ///
    /// A body that exceeded its size limit counts as a stream failure: the
    /// stream was reset because of it.
    #[must_use]
    pub fn is_stream(&self) -> bool {
        matches!(
            self.inner.kind,
            Kind::Stream | Kind::LengthExceeded { .. }
        )
    }

    /// Returns true if a buffered body read hit its size limit.
    #[must_use]
    pub fn is_length_exceeded(&self) -> bool {
        matches!(self.inner.kind, Kind::LengthExceeded { .. })
    }

    #[must_use]
    pub fn is_close(&self) -> bool {
        matches!(self.inner.kind, Kind::Close)
    }

    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self.inner.kind, Kind::Decode)
    }

    #[must_use]
    pub fn is_session_closed(&self) -> bool {
        matches!(self.inner.kind, Kind::SessionClosed)
    }

    #[must_use]
    pub fn is_body_consumed(&self) -> bool {
        matches!(self.inner.kind, Kind::BodyConsumed)
    }

    /// Returns true if the error is related to a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        if matches!(self.inner.kind, Kind::Timeout) {
            return true;
        }

        let mut source = self.source();

        while let Some(err) = source {
            if err.is::<TimedOut>() {
                return true;
            }
            if let Some(io) = err.downcast_ref::<io::Error>()
                && io.kind() == io::ErrorKind::TimedOut
            {
                return true;
            }
            source = err.source();
        }

        false
    }

    /// The HTTP/2 reason code carried by the underlying protocol error, if any.
    #[must_use]
    pub fn h2_reason(&self) -> Option<h2::Reason> {
        let mut source = self.source();

        while let Some(err) = source {
            if let Some(h2_err) = err.downcast_ref::<h2::Error>() {
                return h2_err.reason();
            }
            source = err.source();
        }

        None
    }
}
