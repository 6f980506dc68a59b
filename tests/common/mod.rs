//! Shared test support: a minimal in-process HTTP stub the client runs
//! against, plus an image-store stub for upload sequencing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use forecourt::client::services::image_store::{ImageStore, LocalImage, UploadFuture};
use forecourt::UploadError;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// One canned response, matched on method and path (query ignored).
#[derive(Debug, Clone)]
pub struct Route {
    pub method: &'static str,
    pub path: &'static str,
    pub status: u16,
    pub body: String,
}

impl Route {
    pub fn get(path: &'static str, body: impl Into<String>) -> Self {
        Self {
            method: "GET",
            path,
            status: 200,
            body: body.into(),
        }
    }

    pub fn post(path: &'static str, body: impl Into<String>) -> Self {
        Self {
            method: "POST",
            path,
            status: 200,
            body: body.into(),
        }
    }

    pub fn delete(path: &'static str, body: impl Into<String>) -> Self {
        Self {
            method: "DELETE",
            path,
            status: 200,
            body: body.into(),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }
}

/// A request the stub server saw.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub target: String,
    pub cookie: Option<String>,
    pub body: String,
}

impl Recorded {
    pub fn path(&self) -> &str {
        self.target.split('?').next().unwrap_or(&self.target)
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or(serde_json::Value::Null)
    }
}

/// Tiny HTTP/1.1 responder for integration tests; each connection gets
/// one canned response and is closed.
pub struct StubServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl StubServer {
    pub async fn start(routes: Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests: Arc<Mutex<Vec<Recorded>>> = Arc::new(Mutex::new(Vec::new()));

        let seen = Arc::clone(&requests);
        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    break;
                };
                let routes = routes.clone();
                let seen = Arc::clone(&seen);
                tokio::spawn(async move {
                    let Some(recorded) = read_request(&mut stream).await else {
                        return;
                    };
                    let response = routes
                        .iter()
                        .find(|route| {
                            route.method == recorded.method && route.path == recorded.path()
                        })
                        .cloned()
                        .unwrap_or(Route {
                            method: "GET",
                            path: "/",
                            status: 404,
                            body: r#"{"message":"not found"}"#.to_string(),
                        });
                    seen.lock().unwrap().push(recorded);

                    let payload = format!(
                        "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        response.status,
                        response.body.len(),
                        response.body
                    );
                    let _ = stream.write_all(payload.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        Self { addr, requests }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

async fn read_request(stream: &mut tokio::net::TcpStream) -> Option<Recorded> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];

    // Read until the end of the header block.
    let header_end = loop {
        let read = stream.read(&mut chunk).await.ok()?;
        if read == 0 {
            return None;
        }
        buffer.extend_from_slice(&chunk[..read]);
        if let Some(pos) = find_header_end(&buffer) {
            break pos;
        }
        if buffer.len() > 64 * 1024 {
            return None;
        }
    };

    let head = String::from_utf8_lossy(&buffer[..header_end]).to_string();
    let mut lines = head.lines();
    let request_line = lines.next()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let target = parts.next()?.to_string();

    let mut content_length = 0usize;
    let mut cookie = None;
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        if name.eq_ignore_ascii_case("content-length") {
            content_length = value.trim().parse().unwrap_or(0);
        } else if name.eq_ignore_ascii_case("cookie") {
            cookie = Some(value.trim().to_string());
        }
    }

    let mut body = buffer[header_end + 4..].to_vec();
    while body.len() < content_length {
        let read = stream.read(&mut chunk).await.ok()?;
        if read == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..read]);
    }
    body.truncate(content_length);

    Some(Recorded {
        method,
        target,
        cookie,
        body: String::from_utf8_lossy(&body).to_string(),
    })
}

fn find_header_end(buffer: &[u8]) -> Option<usize> {
    buffer.windows(4).position(|window| window == b"\r\n\r\n")
}

/// Image store stub: uploads succeed in order with predictable URLs,
/// unless the filename starts with `bad`.
pub struct StubImageStore {
    pub uploads: Mutex<Vec<String>>,
}

impl StubImageStore {
    pub fn shared() -> Arc<dyn ImageStore> {
        Arc::new(Self {
            uploads: Mutex::new(Vec::new()),
        })
    }
}

impl ImageStore for StubImageStore {
    fn upload(&self, image: LocalImage) -> UploadFuture<'_> {
        Box::pin(async move {
            if image.filename().starts_with("bad") {
                return Err(UploadError::Rejected {
                    status: 400,
                    message: "unsupported".into(),
                });
            }
            let url = format!("https://cdn.test/{}", image.filename());
            self.uploads.lock().unwrap().push(url.clone());
            Ok(url)
        })
    }
}
