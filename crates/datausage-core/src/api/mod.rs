//! Remote access to the dataset endpoint.
//!
//! - `HttpClient` / `ReqwestClient`: the GET transport seam
//! - `mapper`: payload decoding behind a strict 200 gate
//! - `RemoteSource`: the remote face of the data-source contract

pub mod http;
pub mod mapper;
pub mod remote;

pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use remote::RemoteSource;
