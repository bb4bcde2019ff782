//! An HTTP/1.1 server built directly on `std::net`.
//!
//! ```no_run
//! use mini_http_server::http::server::Server;
//!
//! let mut server = Server::from_tcp_addr("127.0.0.1:35000", 4)?;
//! server.get("/pi", |_req, res| Ok(res.body(std::f64::consts::PI.to_string())));
//! server.run()?;
//! # Ok::<(), mini_http_server::http::server::ServerError>(())
//! ```

pub mod app;
pub mod concurrency;
pub mod config;
pub mod http;
pub mod json;
pub mod logging;
pub mod tasks;
