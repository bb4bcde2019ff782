//! Example routes wired up by the binary.

use crate::http::server::Server;
use crate::http::{Request, Response};
use crate::json::Json;
use crate::tasks::TaskStore;
use anyhow::Context;

/// Passing this as the `name` filter lists every task.
pub const ALL_TASKS: &str = "All";

pub fn register_routes(server: &mut Server) {
    server.get("/pi", pi);
    server.get("/hello", hello);
    server.get("/numbers", numbers);

    let tasks = server.task_store();
    server.get("/tasks", move |req: &Request, res: Response| {
        list_tasks(tasks.as_ref(), req, res)
    });
}

fn pi(_req: &Request, res: Response) -> anyhow::Result<Response> {
    Ok(res
        .body(std::f64::consts::PI.to_string())
        .content_type("text/html"))
}

fn hello(req: &Request, res: Response) -> anyhow::Result<Response> {
    let body = match req.value_of("name") {
        Some(name) => format!("Hello {}", name),
        None => "hello world!".to_string(),
    };
    Ok(res.body(body).content_type("text/html"))
}

fn list_tasks(store: &dyn TaskStore, req: &Request, res: Response) -> anyhow::Result<Response> {
    let Some(name) = req.value_of("name") else {
        return Ok(res.status(400).body("Missing filter parameter"));
    };
    let tasks = if name == ALL_TASKS {
        store.tasks()
    } else {
        store.tasks_by_name(name)
    };
    Ok(res.body(Json(tasks)))
}

fn numbers(req: &Request, res: Response) -> anyhow::Result<Response> {
    let Some(n) = req.value_of("n") else {
        return Ok(res.status(400).body("Missing n parameter"));
    };
    let n: i64 = n
        .parse()
        .with_context(|| format!("For input string: \"{}\"", n))?;
    Ok(res.body(Json((1..=n).collect::<Vec<_>>())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::response::CONTENT_TYPE;
    use crate::tasks::MemoryTaskStore;
    use std::sync::Arc;

    fn get(handler: fn(&Request, Response) -> anyhow::Result<Response>, uri: &str) -> Response {
        handler(&Request::from_uri(uri), Response::new()).unwrap()
    }

    fn body(res: &Response) -> &str {
        std::str::from_utf8(res.content().unwrap()).unwrap()
    }

    #[test]
    fn pi_is_html_text() {
        let res = get(pi, "/pi");
        assert_eq!(res.status_code(), 200);
        assert_eq!(body(&res), "3.141592653589793");
        assert_eq!(res.get_header(CONTENT_TYPE), Some("text/html"));
    }

    #[test]
    fn hello_greets_world_or_name() {
        assert_eq!(body(&get(hello, "/hello")), "hello world!");
        assert_eq!(body(&get(hello, "/hello?name=Ana")), "Hello Ana");
    }

    #[test]
    fn tasks_need_a_filter() {
        let store = MemoryTaskStore::new();
        let req = Request::from_uri("/tasks");
        let res = list_tasks(&store, &req, Response::new()).unwrap();
        assert_eq!(res.status_code(), 400);
        assert_eq!(body(&res), "Missing filter parameter");
    }

    #[test]
    fn tasks_filter_by_name_or_all() {
        let store = MemoryTaskStore::new();
        store.add_task("Buy", "Milk");
        store.add_task("Call", "Mom");

        let req = Request::from_uri("/tasks?name=Buy");
        let res = list_tasks(&store, &req, Response::new()).unwrap();
        assert_eq!(body(&res), r#"[{"name":"Buy","description":"Milk"}]"#);
        assert_eq!(res.get_header(CONTENT_TYPE), Some("application/json"));

        let req = Request::from_uri("/tasks?name=All");
        let res = list_tasks(&store, &req, Response::new()).unwrap();
        assert_eq!(
            body(&res),
            r#"[{"name":"Buy","description":"Milk"},{"name":"Call","description":"Mom"}]"#
        );
    }

    #[test]
    fn numbers_lists_one_to_n() {
        let res = get(numbers, "/numbers?n=4");
        assert_eq!(body(&res), "[1,2,3,4]");
        assert_eq!(body(&get(numbers, "/numbers?n=0")), "[]");
    }

    #[test]
    fn numbers_rejects_missing_and_invalid_n() {
        let res = get(numbers, "/numbers");
        assert_eq!(res.status_code(), 400);
        assert_eq!(body(&res), "Missing n parameter");

        let req = Request::from_uri("/numbers?n=abc");
        let err = numbers(&req, Response::new()).unwrap_err();
        assert_eq!(err.to_string(), "For input string: \"abc\"");
    }

    #[test]
    fn registers_all_example_routes() {
        let mut server = Server::from_tcp_addr("127.0.0.1:0", 1).unwrap();
        register_routes(&mut server);
        let store: Arc<dyn TaskStore> = server.task_store();
        store.add_task("Buy", "Milk");
        assert_eq!(server.task_store().tasks().len(), 1);
    }
}
