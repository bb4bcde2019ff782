use crate::http::handler::HandlerFunc;
use std::collections::HashMap;

/// Exact-path lookup table for dynamic routes.
///
/// Populated before the server starts; shared read-only afterwards.
#[derive(Default)]
pub struct Router {
    routes: HashMap<String, HandlerFunc>,
}

impl Router {
    pub fn new() -> Router {
        Router::default()
    }

    /// Stores `handler` under `path`, replacing any earlier registration.
    pub fn register(&mut self, path: &str, handler: HandlerFunc) {
        if self.routes.insert(path.to_string(), handler).is_some() {
            tracing::debug!(path, "replaced existing route");
        }
    }

    pub fn resolve(&self, path: &str) -> Option<&HandlerFunc> {
        self.routes.get(path)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::request::Request;
    use crate::http::response::Response;

    fn fixed(text: &'static str) -> HandlerFunc {
        Box::new(move |_req: &Request, res: Response| Ok(res.body(text)))
    }

    fn call(router: &Router, path: &str) -> Option<Vec<u8>> {
        let req = Request::from_uri(path);
        router
            .resolve(path)
            .map(|h| h(&req, Response::new()).unwrap().content().unwrap().to_vec())
    }

    #[test]
    fn resolves_registered_paths_exactly() {
        let mut router = Router::new();
        router.register("/pi", fixed("pi"));
        router.register("/hello", fixed("hello"));

        assert_eq!(router.len(), 2);
        assert_eq!(call(&router, "/pi"), Some(b"pi".to_vec()));
        assert_eq!(call(&router, "/hello"), Some(b"hello".to_vec()));
        assert!(router.resolve("/pi/").is_none());
        assert!(router.resolve("/missing").is_none());
    }

    #[test]
    fn duplicate_registration_replaces_handler() {
        let mut router = Router::new();
        router.register("/x", fixed("first"));
        router.register("/x", fixed("second"));

        assert_eq!(router.len(), 1);
        assert_eq!(call(&router, "/x"), Some(b"second".to_vec()));
    }

    #[test]
    fn empty_router_resolves_nothing() {
        let router = Router::new();
        assert!(router.is_empty());
        assert!(router.resolve("/").is_none());
    }
}
