//! End-to-end HTTP tests against a live listener

mod common;

use cat_shelter::server::{App, Server, NOT_FOUND_BODY};
use pretty_assertions::assert_eq;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;

struct RawResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl RawResponse {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn start(app: App) -> Self {
        Self::start_server(Server::bind("127.0.0.1:0", app).await.unwrap()).await
    }

    async fn start_server(server: Server) -> Self {
        let addr = server.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            server
                .run_until(async {
                    let _ = rx.await;
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown: Some(tx),
            handle,
        }
    }

    async fn send(&self, raw: &str) -> RawResponse {
        send_to(self.addr, raw).await
    }

    async fn get(&self, target: &str) -> RawResponse {
        get_from(self.addr, target).await
    }

    async fn post(&self, target: &str, body: &str) -> RawResponse {
        self.send(&format!(
            "POST {} HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/x-www-form-urlencoded\r\nContent-Length: {}\r\n\r\n{}",
            target,
            body.len(),
            body
        ))
        .await
    }

    async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle.await.unwrap();
    }
}

async fn send_to(addr: SocketAddr, raw: &str) -> RawResponse {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw.as_bytes()).await.unwrap();

    let mut bytes = Vec::new();
    stream.read_to_end(&mut bytes).await.unwrap();
    parse_response(&bytes)
}

async fn get_from(addr: SocketAddr, target: &str) -> RawResponse {
    send_to(
        addr,
        &format!("GET {} HTTP/1.1\r\nHost: localhost\r\n\r\n", target),
    )
    .await
}

fn parse_response(bytes: &[u8]) -> RawResponse {
    let split = bytes
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response has a header terminator");
    let head = String::from_utf8_lossy(&bytes[..split]).into_owned();
    let body = bytes[split + 4..].to_vec();

    let mut lines = head.split("\r\n");
    let status_line = lines.next().unwrap();
    let status = status_line
        .split_whitespace()
        .nth(1)
        .unwrap()
        .parse()
        .unwrap();
    let headers = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();

    RawResponse {
        status,
        headers,
        body,
    }
}

#[tokio::test]
async fn test_home_page() {
    let content = common::content_tree();
    let server = TestServer::start(common::app_for(content.path())).await;

    let response = server.get("/").await;
    assert_eq!(response.status, 200);
    assert_eq!(response.header("content-type"), Some("text/html"));
    assert_eq!(
        response.header("content-length"),
        Some(response.body.len().to_string().as_str())
    );
    let text = response.text();
    assert!(text.starts_with("<nav>menu</nav><input value=\"\">"));
    assert_eq!(text.matches("<li ").count(), 5);

    server.stop().await;
}

#[tokio::test]
async fn test_search_decodes_query() {
    let content = common::content_tree();
    let server = TestServer::start(common::app_for(content.path())).await;

    let response = server.get("/search?q=on+keyboards").await;
    assert_eq!(response.status, 200);
    assert_eq!(
        response.text(),
        "<nav>menu</nav><input value=\"on keyboards\"><ul><li id=\"2\" data-match=\"description\">Tom</li></ul>"
    );

    let response = server.get("/search?q=%53iam").await;
    assert!(response.text().contains("<input value=\"Siam\">"));

    server.stop().await;
}

#[tokio::test]
async fn test_search_without_query_lists_everything() {
    let content = common::content_tree();
    let server = TestServer::start(common::app_for(content.path())).await;

    let response = server.get("/search?q=").await;
    assert_eq!(response.text().matches("<li ").count(), 5);

    let response = server.get("/search").await;
    assert_eq!(response.text().matches("<li ").count(), 5);

    server.stop().await;
}

#[tokio::test]
async fn test_edit_page_and_missing_cat() {
    let content = common::content_tree();
    let server = TestServer::start(common::app_for(content.path())).await;

    let response = server.get("/cats/1/edit").await;
    assert_eq!(response.status, 200);
    assert!(response.text().contains("Milo|Siamese|Talks all day|milo.jpg"));

    let response = server.get("/cats/9999/edit").await;
    assert_eq!(response.status, 200);
    assert_eq!(response.text(), NOT_FOUND_BODY);

    server.stop().await;
}

#[tokio::test]
async fn test_unknown_route_keeps_status_200_by_default() {
    let content = common::content_tree();
    let server = TestServer::start(common::app_for(content.path())).await;

    let response = server.get("/does/not/exist").await;
    assert_eq!(response.status, 200);
    assert_eq!(response.text(), NOT_FOUND_BODY);

    server.stop().await;
}

#[tokio::test]
async fn test_strict_status_uses_404() {
    let content = common::content_tree();
    let app = common::app_for(content.path()).with_strict_status(true);
    let server = TestServer::start(app).await;

    let response = server.get("/does/not/exist").await;
    assert_eq!(response.status, 404);
    assert_eq!(response.text(), NOT_FOUND_BODY);

    let response = server.get("/cats/42/edit").await;
    assert_eq!(response.status, 404);

    server.stop().await;
}

#[tokio::test]
async fn test_form_posts_are_discarded() {
    let content = common::content_tree();
    let server = TestServer::start(common::app_for(content.path())).await;

    let before_home = server.get("/").await.text();
    let before_edit = server.get("/cats/1/edit").await.text();

    for (target, body) in [
        ("/cats/add-cat", "name=Rex&breed=Sphynx&description=Bald&imageUrl=rex.jpg"),
        ("/cats/add-breed", "breed=Sphynx"),
        ("/cats/1/edit", "name=Renamed&breed=Mystery"),
    ] {
        let response = server.post(target, body).await;
        assert_eq!(response.status, 200);
        assert!(response.body.is_empty());
    }

    assert_eq!(server.get("/").await.text(), before_home);
    assert_eq!(server.get("/cats/1/edit").await.text(), before_edit);
    assert_eq!(server.get("/search?q=rex").await.text().matches("<li ").count(), 0);

    server.stop().await;
}

#[tokio::test]
async fn test_create_forms() {
    let content = common::content_tree();
    let server = TestServer::start(common::app_for(content.path())).await;

    assert_eq!(
        server.get("/cats/add-cat").await.text(),
        "<nav>menu</nav><h2>Add Cat</h2>"
    );
    assert_eq!(
        server.get("/cats/add-breed").await.text(),
        "<nav>menu</nav><h2>Add Breed</h2>"
    );

    server.stop().await;
}

#[tokio::test]
async fn test_static_assets() {
    let content = common::content_tree();
    std::fs::create_dir_all(content.path().join("static/images")).unwrap();
    std::fs::write(content.path().join("static/images/paw.ico"), [0u8, 1, 2, 255]).unwrap();
    let server = TestServer::start(common::app_for(content.path())).await;

    let response = server.get("/styles/site.css").await;
    assert_eq!(response.status, 200);
    assert_eq!(response.header("content-type"), Some("text/css"));
    assert_eq!(response.text(), common::STYLESHEET);

    let response = server.get("/images/paw.ico").await;
    assert_eq!(response.header("content-type"), Some("image/x-icon"));
    assert_eq!(response.body, vec![0u8, 1, 2, 255]);

    let response = server.get("/styles/missing.css").await;
    assert_eq!(response.text(), NOT_FOUND_BODY);

    server.stop().await;
}

#[tokio::test]
async fn test_static_traversal_is_refused() {
    let content = common::content_tree();
    let server = TestServer::start(common::app_for(content.path())).await;

    let response = server.get("/styles/../../data.json").await;
    assert_eq!(response.text(), NOT_FOUND_BODY);

    let response = server.get("/styles/%2E%2E/%2E%2E/data.json").await;
    assert_eq!(response.text(), NOT_FOUND_BODY);

    server.stop().await;
}

#[tokio::test]
async fn test_missing_template_yields_500() {
    let content = common::content_tree();
    let server = TestServer::start(common::app_for(content.path())).await;
    std::fs::remove_file(content.path().join("views/home/index.html")).unwrap();

    let response = server.get("/").await;
    assert_eq!(response.status, 500);
    assert!(response.body.is_empty());

    // Other pages are unaffected
    let response = server.get("/cats/add-cat").await;
    assert_eq!(response.status, 200);

    server.stop().await;
}

#[tokio::test]
async fn test_concurrent_searches_do_not_interfere() {
    let content = common::content_tree();
    let server = TestServer::start(common::app_for(content.path())).await;
    let addr = server.addr;

    let mut tasks = Vec::new();
    for i in 0..20 {
        tasks.push(tokio::spawn(async move {
            if i % 2 == 0 {
                get_from(addr, "/search?q=ze").await.text()
            } else {
                get_from(addr, "/").await.text()
            }
        }));
    }

    for (i, task) in tasks.into_iter().enumerate() {
        let text = task.await.unwrap();
        if i % 2 == 0 {
            assert_eq!(text.matches("<li ").count(), 2);
        } else {
            assert_eq!(text.matches("data-match=\"{{matchBy}}\"").count(), 5);
        }
    }

    server.stop().await;
}

#[tokio::test]
async fn test_idle_connection_is_closed_after_read_timeout() {
    let content = common::content_tree();
    let server = Server::bind("127.0.0.1:0", common::app_for(content.path()))
        .await
        .unwrap()
        .with_read_timeout(Duration::from_millis(100));
    let server = TestServer::start_server(server).await;

    // Half a request line, then silence
    let mut stream = TcpStream::connect(server.addr).await.unwrap();
    stream.write_all(b"GET / HT").await.unwrap();

    let mut bytes = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut bytes))
        .await
        .expect("server closes the idle connection")
        .unwrap();
    assert!(bytes.is_empty());

    // The listener keeps serving other clients
    assert_eq!(server.get("/").await.status, 200);

    server.stop().await;
}
