//! Minimal HTTP/1.1 framing: one request per connection, `Connection: close`

use crate::{Result, ShelterError};
use std::fmt;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Upper bound for the request line plus headers
pub const MAX_HEAD_BYTES: u64 = 16 * 1024;
/// Upper bound for a request body
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

pub const CONTENT_TYPE_HTML: &str = "text/html";
pub const CONTENT_TYPE_CSS: &str = "text/css";
pub const CONTENT_TYPE_ICON: &str = "image/x-icon";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Other(String),
}

impl Method {
    pub fn parse(token: &str) -> Self {
        match token {
            "GET" => Method::Get,
            "POST" => Method::Post,
            other => Method::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
            Method::Other(token) => f.write_str(token),
        }
    }
}

/// A parsed request
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    /// Path component of the target, still percent-encoded
    pub path: String,
    /// Raw query string without the leading `?`
    pub query: Option<String>,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Request {
    /// Build a request from a method and a request target such as `/search?q=tom`
    pub fn new(method: Method, target: &str) -> Self {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path.to_string(), Some(query.to_string())),
            None => (target.to_string(), None),
        };

        Self {
            method,
            path,
            query,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn get(target: &str) -> Self {
        Self::new(Method::Get, target)
    }

    pub fn post(target: &str, body: impl Into<Vec<u8>>) -> Self {
        let mut request = Self::new(Method::Post, target);
        request.body = body.into();
        request
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A response ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn html(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            content_type: Some(CONTENT_TYPE_HTML),
            body: body.into().into_bytes(),
        }
    }

    pub fn bytes(content_type: &'static str, body: Vec<u8>) -> Self {
        Self {
            status: 200,
            content_type: Some(content_type),
            body,
        }
    }

    /// Empty `200 text/html`, the reply to every form submission
    pub fn empty() -> Self {
        Self::html(String::new())
    }

    /// Bare 500 with no body
    pub fn internal_error() -> Self {
        Self {
            status: 500,
            content_type: None,
            body: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        413 => "Payload Too Large",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// Read one request; `Ok(None)` when the peer closed before sending anything
pub async fn read_request<R>(reader: &mut R) -> Result<Option<Request>>
where
    R: AsyncBufRead + Unpin,
{
    let mut head = (&mut *reader).take(MAX_HEAD_BYTES);

    let mut request_line = String::new();
    if head.read_line(&mut request_line).await? == 0 {
        return Ok(None);
    }
    let request_line = complete_line(&request_line)?;

    let mut parts = request_line.split_whitespace();
    let (Some(method), Some(target), Some(version)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(ShelterError::Protocol(format!(
            "Malformed request line: {:?}",
            request_line
        )));
    };
    if !version.starts_with("HTTP/1.") {
        return Err(ShelterError::Protocol(format!(
            "Unsupported protocol version: {}",
            version
        )));
    }

    let mut request = Request::new(Method::parse(method), target);

    loop {
        let mut line = String::new();
        if head.read_line(&mut line).await? == 0 {
            return Err(ShelterError::Protocol(
                "Connection closed inside request head".to_string(),
            ));
        }
        let line = complete_line(&line)?;
        if line.is_empty() {
            break;
        }

        let Some((name, value)) = line.split_once(':') else {
            return Err(ShelterError::Protocol(format!("Malformed header: {:?}", line)));
        };
        request
            .headers
            .push((name.trim().to_string(), value.trim().to_string()));
    }

    let content_length = match request.header("content-length") {
        Some(value) => value.parse::<usize>().map_err(|_| {
            ShelterError::Protocol(format!("Invalid Content-Length: {}", value))
        })?,
        None => 0,
    };
    if content_length > MAX_BODY_BYTES {
        return Err(ShelterError::Protocol(format!(
            "Request body of {} bytes exceeds limit",
            content_length
        )));
    }

    let mut body = vec![0; content_length];
    reader.read_exact(&mut body).await?;
    request.body = body;

    Ok(Some(request))
}

/// Strip the line terminator, failing when the head limit cut the line short
fn complete_line(line: &str) -> Result<&str> {
    line.strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .ok_or_else(|| ShelterError::Protocol("Request head too large or truncated".to_string()))
}

/// Serialize a response onto the wire
pub async fn write_response<W>(writer: &mut W, response: &Response) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut head = format!(
        "HTTP/1.1 {} {}\r\n",
        response.status,
        reason_phrase(response.status)
    );
    if let Some(content_type) = response.content_type {
        head.push_str(&format!("Content-Type: {}\r\n", content_type));
    }
    head.push_str(&format!("Content-Length: {}\r\n", response.body.len()));
    head.push_str("Connection: close\r\n\r\n");

    writer.write_all(head.as_bytes()).await?;
    writer.write_all(&response.body).await?;
    writer.flush().await?;
    Ok(())
}
