//! Request and response types and the body pipeline
//!
//! `request` issues one exchange on a session, `body` pumps the response
//! stream into ordered events, `reader` buffers those events into one payload
//! and `response` ties them together behind lazy accessors.

pub mod body;
pub mod headers;
pub mod json;
pub mod reader;
pub mod request;
pub mod response;

pub use body::{BodyEvent, ResponseBody};
pub use headers::{RequestHeaders, ResponseHeaders};
pub use reader::{read_json, read_json_as, read_text};
pub use request::RequestDescriptor;
pub use response::Response;
