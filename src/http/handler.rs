use crate::http::request::Request;
use crate::http::response::Response;

/// A dynamic route: receives the request and a fresh response to fill in.
pub type HandlerFunc = Box<dyn Fn(&Request, Response) -> anyhow::Result<Response> + Sync + Send>;
