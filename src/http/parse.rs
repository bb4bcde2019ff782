use crate::http::BUFFER_SIZE;
use std::cmp::min;
use std::io::{BufRead, BufReader, Read};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Can't read request: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed request line: {0}")]
    BadRequestLine(String),
    #[error("Invalid Content-Length: {0}")]
    BadContentLength(String),
}

/// The request as read off the wire, before any routing decisions.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRequest {
    pub method: String,
    pub target: String,
    pub body: String,
}

/// Reads the request line, the header block and, when a positive
/// `Content-Length` was declared, exactly that many body bytes.
///
/// Returns `Ok(None)` when the peer closed before sending a request line.
pub fn read_request(readable: &mut impl Read) -> Result<Option<RawRequest>, RequestError> {
    let mut rdr = BufReader::new(readable);

    let mut first_line: Option<String> = None;
    let mut content_length: i64 = 0;

    while let Some(line) = read_line(&mut rdr)? {
        tracing::trace!(line = %line, "received");
        if line.trim().is_empty() {
            break;
        }
        if first_line.is_none() {
            first_line = Some(line);
            continue;
        }
        if line.to_ascii_lowercase().starts_with("content-length:") {
            let raw = line["content-length:".len()..].trim();
            content_length = raw
                .parse()
                .map_err(|_| RequestError::BadContentLength(raw.to_string()))?;
        }
    }

    let first_line = match first_line {
        Some(line) => line,
        None => return Ok(None),
    };

    let mut parts = first_line.split(' ');
    let (method, target) = match (parts.next(), parts.next()) {
        (Some(method), Some(target)) if !method.is_empty() && !target.is_empty() => {
            (method.to_string(), target.to_string())
        }
        _ => return Err(RequestError::BadRequestLine(first_line)),
    };

    let body = if content_length > 0 {
        let content = read_content(&mut rdr, content_length as usize)?;
        String::from_utf8_lossy(&content).into_owned()
    } else {
        String::new()
    };

    Ok(Some(RawRequest {
        method,
        target,
        body,
    }))
}

/// Reads one CRLF- or LF-terminated line; `None` at end of stream.
fn read_line(rdr: &mut impl BufRead) -> Result<Option<String>, RequestError> {
    let mut buf = Vec::new();
    let n = rdr.read_until(b'\n', &mut buf)?;
    if n == 0 {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(&buf);
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn read_content(rdr: &mut impl Read, mut content_length: usize) -> Result<Vec<u8>, RequestError> {
    let mut content = Vec::with_capacity(min(content_length, 64 * BUFFER_SIZE));
    let mut buf = [0u8; BUFFER_SIZE];
    while content_length > 0 {
        let slice_to_read = &mut buf[..min(BUFFER_SIZE, content_length)];
        let bytes_read = rdr.read(slice_to_read)?;
        if bytes_read == 0 {
            break;
        }
        content.extend_from_slice(&slice_to_read[..bytes_read]);
        content_length -= bytes_read;
    }
    Ok(content)
}

/// The two fields a task-creation body must carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
    pub name: String,
    pub description: String,
}

/// Pulls `name` and `description` out of a flat `{"k":"v", ...}` body.
///
/// This is not a JSON parser: fields are split on commas and then on the
/// first colon, and quotes and braces are stripped. Values containing
/// commas, or nested objects, are not supported. Returns `None` unless
/// both fields are present and non-empty.
pub fn parse_task_fields(body: &str) -> Option<TaskFields> {
    let mut name = String::new();
    let mut description = String::new();

    for field in body.split(',') {
        let Some((key, value)) = field.split_once(':') else {
            continue;
        };
        let key: String = strip_json_noise(key)
            .chars()
            .filter(|c| *c != ' ')
            .collect();
        let value = strip_json_noise(value);
        match key.trim() {
            "name" => name = value,
            "description" => description = value,
            _ => {}
        }
    }

    if name.is_empty() || description.is_empty() {
        None
    } else {
        Some(TaskFields { name, description })
    }
}

fn strip_json_noise(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '"' | '{' | '}'))
        .collect::<String>()
        .trim()
        .to_string()
}
