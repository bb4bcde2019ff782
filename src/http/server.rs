use crate::concurrency::{PoolError, ThreadPool};
use crate::http::handler::HandlerFunc;
use crate::http::method::Method;
use crate::http::parse::{self, RawRequest};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::router::Router;
use crate::http::static_files::{self, StaticFiles};
use crate::json::Json;
use crate::tasks::{MemoryTaskStore, TaskStore};
use std::io::{self, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Requests under this prefix go to the router instead of the filesystem.
pub const DYNAMIC_PREFIX: &str = "/app";

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Can't bind address {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },
    #[error("Error accepting connection: {0}")]
    Accept(#[source] io::Error),
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// Failures while producing a response that become error responses.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl DispatchError {
    pub fn into_response(self) -> Response {
        match self {
            DispatchError::NotFound(msg) => Response::with_status(404, msg),
            DispatchError::Internal(e) => Response::with_status(500, format!("{:#}", e)),
        }
    }
}

pub struct Server {
    listener: TcpListener,
    pool: ThreadPool,
    dispatcher: Dispatcher,
    read_timeout: Option<Duration>,
}

/// Everything a worker needs to answer a request. Read-only once the
/// server is running.
struct Dispatcher {
    router: Router,
    static_files: Option<StaticFiles>,
    tasks: Arc<dyn TaskStore>,
}

impl Server {
    fn new(listener: TcpListener, num_workers: usize) -> Server {
        Server {
            listener,
            pool: ThreadPool::new(num_workers),
            dispatcher: Dispatcher {
                router: Router::new(),
                static_files: None,
                tasks: Arc::new(MemoryTaskStore::new()),
            },
            read_timeout: None,
        }
    }

    pub fn from_tcp_addr(addr: &str, num_workers: usize) -> Result<Server, ServerError> {
        let listener = TcpListener::bind(addr).map_err(|source| ServerError::Bind {
            addr: addr.to_string(),
            source,
        })?;
        Ok(Server::new(listener, num_workers))
    }

    pub fn with_static_files(mut self, static_files: StaticFiles) -> Self {
        self.dispatcher.static_files = Some(static_files);
        self
    }

    pub fn with_task_store(mut self, tasks: Arc<dyn TaskStore>) -> Self {
        self.dispatcher.tasks = tasks;
        self
    }

    /// Bounds how long a worker waits on a silent client. `None` waits forever.
    pub fn with_read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn task_store(&self) -> Arc<dyn TaskStore> {
        Arc::clone(&self.dispatcher.tasks)
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Registers a dynamic GET route. `path` is matched after the
    /// [`DYNAMIC_PREFIX`] has been stripped.
    pub fn get<F>(&mut self, path: &str, f: F)
    where
        F: Fn(&Request, Response) -> anyhow::Result<Response> + Sync + Send + 'static,
    {
        self.dispatcher.router.register(path, Box::new(f) as HandlerFunc);
    }

    /// Accepts connections until `accept` fails. Each connection is handled
    /// by a pool worker: one request, one response, then close.
    pub fn run(self) -> Result<(), ServerError> {
        let Server {
            listener,
            pool,
            dispatcher,
            read_timeout,
        } = self;
        let dispatcher = Arc::new(dispatcher);

        tracing::info!(
            address = ?listener.local_addr().ok(),
            workers = pool.size(),
            routes = dispatcher.router.len(),
            "listening"
        );

        for stream in listener.incoming() {
            let stream = stream.map_err(ServerError::Accept)?;
            let dispatcher = Arc::clone(&dispatcher);
            pool.execute(move || dispatcher.process_incoming(stream, read_timeout))?;
        }
        Ok(())
    }
}

impl Dispatcher {
    fn process_incoming(&self, mut stream: TcpStream, read_timeout: Option<Duration>) {
        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string());
        tracing::debug!(%peer, "accepted new connection");

        if let Err(e) = stream.set_read_timeout(read_timeout) {
            tracing::warn!(%peer, error = %e, "can't set read timeout");
        }

        let (line, response) = match parse::read_request(&mut stream) {
            Ok(Some(raw)) => {
                let line = format!("{} {}", raw.method, raw.target);
                (line, self.respond(&raw))
            }
            Ok(None) => {
                tracing::debug!(%peer, "connection closed before request line");
                return;
            }
            Err(e) => {
                tracing::warn!(%peer, error = %e, "bad request");
                ("-".to_string(), Response::with_status(400, e.to_string()))
            }
        };

        let response = response.finalize();
        match write_response(&mut stream, &response) {
            Ok(()) => tracing::info!(
                %peer,
                request = %line,
                status = response.status_code(),
                "request handled"
            ),
            Err(e) => tracing::warn!(%peer, request = %line, error = %e, "can't write response"),
        }
    }

    fn respond(&self, raw: &RawRequest) -> Response {
        self.dispatch(raw).unwrap_or_else(|e| {
            if let DispatchError::Internal(ref err) = e {
                tracing::error!(target_uri = %raw.target, error = %err, "request failed");
            }
            e.into_response()
        })
    }

    fn dispatch(&self, raw: &RawRequest) -> Result<Response, DispatchError> {
        let request = Request::from_uri(&raw.target);
        let path = request.path();
        let method = Method::from_str(&raw.method).ok();

        match method {
            Some(Method::GET) if path.starts_with(DYNAMIC_PREFIX) => self.handle_dynamic(&request),
            Some(Method::POST) if path.starts_with(DYNAMIC_PREFIX) => Ok(self.create_task(&raw.body)),
            Some(Method::GET) if static_files::is_static_asset(path) => match &self.static_files {
                Some(files) => files.serve(path),
                None => Err(DispatchError::NotFound(format!("File {} not found", path))),
            },
            _ => Ok(Response::with_status(
                405,
                format!("Method {} {} not supported", raw.method, path),
            )),
        }
    }

    fn handle_dynamic(&self, request: &Request) -> Result<Response, DispatchError> {
        let route = &request.path()[DYNAMIC_PREFIX.len()..];
        match self.router.resolve(route) {
            Some(handler) => Ok(handler(request, Response::new())?),
            None => Ok(Response::new()
                .status(405)
                .body(format!("Method GET {} not supported", request.uri()))),
        }
    }

    fn create_task(&self, body: &str) -> Response {
        match parse::parse_task_fields(body) {
            Some(fields) => {
                let task = self.tasks.add_task(&fields.name, &fields.description);
                tracing::debug!(name = %task.name, "task created");
                Response::new()
                    .body(Json(task))
                    .content_type("application/json")
            }
            None => Response::with_status(
                400,
                "Missing values, Task Name and Task Description are required",
            ),
        }
    }
}

fn write_response(stream: &mut TcpStream, response: &Response) -> io::Result<()> {
    stream.write_all(&response.head_bytes())?;
    if let Some(content) = response.content() {
        stream.write_all(content)?;
    }
    stream.flush()
}
