use std::process::Stdio;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};

/// A `solidbook serve` child bound to an ephemeral port.
struct ServeProcess {
    child: Child,
    addr: String,
    client: reqwest::Client,
    _dir: tempfile::TempDir,
}

impl ServeProcess {
    /// Spawns the server and waits for the "Serving on" line on stderr.
    async fn start() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut child = Command::new(env!("CARGO_BIN_EXE_solidbook"))
            .args(["serve", "--bind", "127.0.0.1:0"])
            .current_dir(dir.path())
            .env("SOLIDBOOK_COLOR", "never")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .expect("failed to spawn solidbook");

        let stderr = child.stderr.take().expect("stderr not captured");
        let mut reader = BufReader::new(stderr);
        let mut line = String::new();

        let addr = tokio::time::timeout(Duration::from_secs(10), async {
            loop {
                line.clear();
                let n = reader.read_line(&mut line).await.expect("read stderr");
                assert!(n > 0, "server exited before printing its address");
                if let Some(rest) = line.trim().strip_prefix("Serving on http://") {
                    return rest.split('/').next().unwrap().to_string();
                }
            }
        })
        .await
        .expect("timed out waiting for server startup");

        // Keep draining stderr so the child never blocks on a full pipe.
        tokio::spawn(async move {
            let mut sink = String::new();
            while reader.read_line(&mut sink).await.unwrap_or(0) > 0 {
                sink.clear();
            }
        });

        Self {
            child,
            addr,
            client: reqwest::Client::new(),
            _dir: dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }
}

#[tokio::test]
async fn serves_pages_and_not_found() {
    let server = ServeProcess::start().await;
    let client = &server.client;

    let home = client.get(server.url("/")).send().await.unwrap();
    assert_eq!(home.status(), StatusCode::OK);
    assert!(home.text().await.unwrap().contains("<nav class=\"side-nav\""));

    let srp = client.get(server.url("/solid/srp/")).send().await.unwrap();
    assert_eq!(srp.status(), StatusCode::OK);
    assert!(srp.text().await.unwrap().contains("code-box-config"));

    let css = client.get(server.url("/style.css")).send().await.unwrap();
    assert_eq!(css.status(), StatusCode::OK);
    assert_eq!(css.headers()[CONTENT_TYPE], "text/css; charset=utf-8");

    let missing = client.get(server.url("/solid/srpp")).send().await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    let body = missing.text().await.unwrap();
    assert!(body.contains("Page not found"));
    assert!(body.contains("href=\"/solid/srp\""));

    let post = client.post(server.url("/solid/srp")).send().await.unwrap();
    assert_eq!(post.status(), StatusCode::METHOD_NOT_ALLOWED);

    let health = client.get(server.url("/healthz")).send().await.unwrap();
    assert_eq!(health.status(), StatusCode::OK);
    assert_eq!(health.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn sigterm_shuts_down_gracefully() {
    let mut server = ServeProcess::start().await;
    let health = server
        .client
        .get(server.url("/healthz"))
        .send()
        .await
        .unwrap();
    assert_eq!(health.status(), StatusCode::OK);
    let pid = server.child.id().expect("child has a pid");

    let status = std::process::Command::new("kill")
        .args(["-TERM", &pid.to_string()])
        .status()
        .unwrap();
    assert!(status.success());

    let status = tokio::time::timeout(Duration::from_secs(10), server.child.wait())
        .await
        .expect("server did not shut down")
        .unwrap();
    assert_eq!(status.code(), Some(143));
}
