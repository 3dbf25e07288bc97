//! Test utilities for the detection service
//!
//! Provides a tiny in-process HTTP/1.1 server that answers with canned
//! responses and records what it received, plus staged-file builders.
//! Enabled for dependents through the `test-helpers` feature.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use url::Url;
use woundscan_core::StagedFile;

/// A canned HTTP response
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub content_type: String,
    pub body: Vec<u8>,
    pub delay: Option<Duration>,
}

impl MockResponse {
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "application/json".to_string(),
            body: body.as_bytes().to_vec(),
            delay: None,
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain".to_string(),
            body: body.as_bytes().to_vec(),
            delay: None,
        }
    }

    /// Hold the response back for `delay` before writing it
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// A request as seen by the mock server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request line and headers, verbatim
    pub head: String,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn path(&self) -> &str {
        self.head.split_whitespace().nth(1).unwrap_or("")
    }
}

#[derive(Debug)]
enum Routing {
    /// Responses served in order; the last one repeats
    Sequence(Vec<MockResponse>),
    /// Responses keyed by request path; unknown paths get a 404
    ByPath(HashMap<String, MockResponse>),
}

#[derive(Debug)]
struct Shared {
    routing: Routing,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// In-process HTTP server for client tests
#[derive(Debug)]
pub struct MockServer {
    addr: SocketAddr,
    shared: Arc<Shared>,
    task: JoinHandle<()>,
}

impl MockServer {
    /// Serve `responses` in order regardless of path
    pub async fn start(responses: Vec<MockResponse>) -> Self {
        Self::spawn(Routing::Sequence(responses)).await
    }

    /// Serve responses by request path (e.g. `"/detect"`)
    pub async fn with_routes(routes: Vec<(&str, MockResponse)>) -> Self {
        let map = routes
            .into_iter()
            .map(|(path, response)| (path.to_string(), response))
            .collect();
        Self::spawn(Routing::ByPath(map)).await
    }

    async fn spawn(routing: Routing) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock server");
        let addr = listener.local_addr().expect("mock server address");
        let shared = Arc::new(Shared {
            routing,
            requests: Mutex::new(Vec::new()),
        });

        let accept_shared = Arc::clone(&shared);
        let task = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let shared = Arc::clone(&accept_shared);
                tokio::spawn(async move {
                    let _ = serve_connection(stream, shared).await;
                });
            }
        });

        Self { addr, shared, task }
    }

    /// Base URL, e.g. `http://127.0.0.1:41234`
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Absolute URL for `path` on this server
    pub fn url(&self, path: &str) -> Url {
        Url::parse(&format!("{}{}", self.base_url(), path)).expect("valid mock url")
    }

    /// Requests received so far, in arrival order
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.shared.requests.lock().await.clone()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn serve_connection(mut stream: TcpStream, shared: Arc<Shared>) -> std::io::Result<()> {
    let request = read_request(&mut stream).await?;

    let response = {
        let mut requests = shared.requests.lock().await;
        let index = requests.len();
        let response = match &shared.routing {
            Routing::Sequence(list) => list
                .get(index)
                .or_else(|| list.last())
                .cloned()
                .unwrap_or_else(|| MockResponse::text(500, "no canned response")),
            Routing::ByPath(map) => map
                .get(request.path())
                .cloned()
                .unwrap_or_else(|| MockResponse::text(404, "Not Found")),
        };
        requests.push(request);
        response
    };

    if let Some(delay) = response.delay {
        tokio::time::sleep(delay).await;
    }

    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        reason_phrase(response.status),
        response.content_type,
        response.body.len()
    );
    stream.write_all(head.as_bytes()).await?;
    stream.write_all(&response.body).await?;
    stream.shutdown().await
}

async fn read_request(stream: &mut TcpStream) -> std::io::Result<RecordedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Err(std::io::ErrorKind::UnexpectedEof.into());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find_subsequence(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = buf[header_end..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }

    Ok(RecordedRequest { head, body })
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    }
}

/// Creates a staged file with a few placeholder bytes.
///
/// The MIME type follows the extension of `file_name` (`.png` or JPEG).
pub fn test_staged_file(file_name: &str) -> StagedFile {
    let mime_type = if file_name.to_ascii_lowercase().ends_with(".png") {
        "image/png"
    } else {
        "image/jpeg"
    };
    StagedFile {
        file_name: file_name.to_string(),
        mime_type: mime_type.to_string(),
        raw_bytes: b"\x89PNG\r\n\x1a\nnot-really-an-image".to_vec(),
    }
}

/// A small catalog in the published wire format
pub const SAMPLE_CATALOG_JSON: &str = r#"{
    "Laceration": {
        "name": "Luka Robek",
        "ciri_ciri": ["Tepi luka tidak rata", "Perdarahan"],
        "penanganan": [
            {"step": "Hentikan perdarahan", "penjelasan": "Tekan luka dengan kain bersih"},
            {"step": "Bersihkan luka", "penjelasan": "Bilas dengan air mengalir"}
        ],
        "pencarian_medis": ["Luka dalam atau lebar"],
        "waktu_penyembuhan": ["1-2 minggu"],
        "hindari": ["Meniup luka"],
        "tips": [{"penanganan": "Ganti perban", "penjelasan": "Setiap hari"}]
    },
    "Abrasion": {
        "name": "Luka Lecet",
        "penanganan": [],
        "tips": "Jaga luka tetap bersih dan kering."
    }
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staged_file_mime_from_extension() {
        assert_eq!(test_staged_file("a.PNG").mime_type, "image/png");
        assert_eq!(test_staged_file("a.jpg").mime_type, "image/jpeg");
    }

    #[tokio::test]
    async fn test_mock_server_routes_by_path() {
        let server = MockServer::with_routes(vec![(
            "/static/info/wound_info.json",
            MockResponse::json(200, "{}"),
        )])
        .await;

        let ok = reqwest::get(server.url("/static/info/wound_info.json"))
            .await
            .unwrap();
        assert_eq!(ok.status().as_u16(), 200);

        let missing = reqwest::get(server.url("/nope")).await.unwrap();
        assert_eq!(missing.status().as_u16(), 404);

        let requests = server.requests().await;
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].path(), "/static/info/wound_info.json");
    }
}
