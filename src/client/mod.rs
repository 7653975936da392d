//! Shared transport and request/response interceptors
//!
//! Every wrapper call in [`crate::api`] builds an [`ApiRequest`] and hands it
//! to a single [`Transport`], which applies the timeout policy on the way out
//! and the envelope policy on the way back.

pub mod request;
pub mod response;
pub mod transport;

pub use request::{is_long_running, ApiRequest, RequestBody, RequestInterceptor, ResponseKind, UploadPart};
pub use response::{ApiResponse, BinaryPayload, Envelope, RawResponse, ResponseInterceptor};
pub use transport::{Transport, TransportConfig};
