//! Card gateway implementations.

pub mod http;
pub mod stub;

pub use http::HttpCardGateway;
pub use stub::StubCardGateway;
