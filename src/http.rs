//! A small HTTP/1.1 server: one request per connection, dynamic routes under
//! [`server::DYNAMIC_PREFIX`], static files for everything that looks like a
//! page or asset.

pub mod handler;
pub mod method;
pub mod parse;
pub mod request;
pub mod response;
pub mod router;
pub mod server;
pub mod static_files;
pub mod status;

pub use request::Request;
pub use response::Response;

pub(crate) const BUFFER_SIZE: usize = 1024;
