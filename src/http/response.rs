use crate::http::status::Status;
use crate::json::{Json, ToJson};

pub const CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_LENGTH: &str = "Content-Length";

/// A response body before it is attached to a [`Response`].
///
/// Raw bytes and text are sent verbatim. Structured values are encoded as
/// JSON and mark the response as `application/json` unless a content type
/// was already chosen.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Raw(Vec<u8>),
    Structured(String),
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Raw(bytes)
    }
}

impl From<&[u8]> for Body {
    fn from(bytes: &[u8]) -> Self {
        Body::Raw(bytes.to_vec())
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Raw(text.into_bytes())
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Raw(text.as_bytes().to_vec())
    }
}

impl<T: ToJson> From<Json<T>> for Body {
    fn from(Json(value): Json<T>) -> Self {
        Body::Structured(value.to_json())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    status: Status,
    headers: Vec<(String, String)>,
    content: Option<Vec<u8>>,
}

impl Default for Response {
    fn default() -> Self {
        Response::new()
    }
}

impl Response {
    pub fn new() -> Response {
        Response {
            status: Status::OK,
            headers: Vec::new(),
            content: None,
        }
    }

    pub fn with_status(code: u16, body: impl Into<Body>) -> Response {
        Response::new().status(code).body(body)
    }

    pub fn status(mut self, code: u16) -> Self {
        self.status = Status::from_code(code);
        self
    }

    /// Sets a header. Names compare case-insensitively; overwriting keeps
    /// the header in its original position.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.set_header(name, value);
        self
    }

    pub fn content_type(self, value: &str) -> Self {
        self.header(CONTENT_TYPE, value)
    }

    pub fn body(mut self, body: impl Into<Body>) -> Self {
        let bytes = match body.into() {
            Body::Raw(bytes) => bytes,
            Body::Structured(json) => {
                self.set_header_if_absent(CONTENT_TYPE, "application/json");
                json.into_bytes()
            }
        };
        self.content = Some(bytes);
        self
    }

    pub fn status_code(&self) -> u16 {
        self.status.code_num
    }

    pub fn status_message(&self) -> &'static str {
        self.status.message
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn content(&self) -> Option<&[u8]> {
        self.content.as_deref()
    }

    /// Applies the defaults every response gets right before it is written:
    /// `text/plain` when no content type was chosen, `204` for a bodiless
    /// `200`, and a `Content-Length` for any body.
    pub fn finalize(mut self) -> Self {
        self.set_header_if_absent(CONTENT_TYPE, "text/plain");
        if self.content.is_none() && self.status == Status::OK {
            self.status = Status::NO_CONTENT;
        }
        if let Some(len) = self.content.as_ref().map(|c| c.len()) {
            self.set_header_if_absent(CONTENT_LENGTH, &len.to_string());
        }
        self
    }

    /// Status line and headers, terminated by the blank line.
    pub fn head_bytes(&self) -> Vec<u8> {
        let mut head = format!(
            "HTTP/1.1 {} {}\r\n",
            self.status.code_num, self.status.message
        );
        for (key, value) in &self.headers {
            head.push_str(&format!("{}: {}\r\n", key, value));
        }
        head.push_str("\r\n");
        head.into_bytes()
    }

    fn set_header(&mut self, name: &str, value: &str) {
        match self
            .headers
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
        {
            Some((_, v)) => *v = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }

    fn set_header_if_absent(&mut self, name: &str, value: &str) {
        if self.get_header(name).is_none() {
            self.headers.push((name.to_string(), value.to_string()));
        }
    }
}
