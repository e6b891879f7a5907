//! Terminal methods
//!
//! `send` runs the request as configured. The verb shorthands set `:method`
//! first; `post`/`put`/`patch` need a body, `get`/`delete` take none.

use h2fetch_client::{Response, Result};

use crate::builder::core::{BodyNotSet, BodySet, FetchBuilder};
use crate::fetch;

impl<S> FetchBuilder<S> {
    /// Fetch from `address` (scheme and authority, e.g. `https://host:8443`).
    ///
    /// # Errors
    ///
    /// A deferred build error, or anything [`fetch`] fails with.
    pub async fn send(self, address: &str) -> Result<Response> {
        if let Some(e) = self.pending {
            return Err(e);
        }

        let debug_enabled = self.debug_enabled;
        if debug_enabled {
            tracing::debug!(
                "{} {}{}",
                self.options.headers.method().unwrap_or("GET"),
                address,
                self.options.headers.path().unwrap_or("/")
            );
        }

        let response = fetch(address, self.options).await?;
        if debug_enabled {
            tracing::debug!("Response status {}", response.status());
        }
        Ok(response)
    }
}

impl FetchBuilder<BodyNotSet> {
    /// # Errors
    ///
    /// See [`send`](FetchBuilder::send).
    pub async fn get(self, address: &str) -> Result<Response> {
        self.method("GET").send(address).await
    }

    /// # Errors
    ///
    /// See [`send`](FetchBuilder::send).
    pub async fn delete(self, address: &str) -> Result<Response> {
        self.method("DELETE").send(address).await
    }
}

impl FetchBuilder<BodySet> {
    /// # Errors
    ///
    /// See [`send`](FetchBuilder::send).
    pub async fn post(self, address: &str) -> Result<Response> {
        self.method("POST").send(address).await
    }

    /// # Errors
    ///
    /// See [`send`](FetchBuilder::send).
    pub async fn put(self, address: &str) -> Result<Response> {
        self.method("PUT").send(address).await
    }

    /// # Errors
    ///
    /// See [`send`](FetchBuilder::send).
    pub async fn patch(self, address: &str) -> Result<Response> {
        self.method("PATCH").send(address).await
    }
}
