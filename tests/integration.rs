use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::process::Command;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn setup_test_env(backend: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let config_content = format!(
        r#"[backend]
url = "{}"
use_https = false

[dev_server]
port = 3000
"#,
        backend
    );

    let config_path = config_dir.join("brief.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

// The mock server lives on the test runtime, so the binary must be awaited
// rather than run with a blocking `std::process::Command`.
async fn run_brief(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = env!("CARGO_BIN_EXE_brief");
    let output = Command::new(binary)
        .arg("--config")
        .arg(config_path)
        .args(args)
        .env_remove("BRIEF_BACKEND_URL")
        .env("RUST_LOG", "error")
        .output()
        .await
        .unwrap_or_else(|e| panic!("Failed to run brief binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

fn brief_json(id: &str, status: &str) -> serde_json::Value {
    json!({"id": id, "title": format!("Brief {}", id), "status": status, "version": 2})
}

#[tokio::test]
async fn test_config_prints_resolved_url() {
    let (_tmp, config_path) = setup_test_env("http://briefs.internal:8001");

    let (stdout, stderr, success) = run_brief(&config_path, &["config"]).await;
    assert!(success, "config failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("http://briefs.internal:8001/api"));
    assert!(stdout.contains("dev_server.port"));
}

#[tokio::test]
async fn test_open_dashboard() {
    let server = MockServer::start().await;
    let (_tmp, config_path) = setup_test_env(&server.uri());

    Mock::given(method("GET"))
        .and(path("/api/briefs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            brief_json("b1", "draft"),
            brief_json("b2", "in_progress"),
            brief_json("b3", "completed")
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let (stdout, stderr, success) = run_brief(&config_path, &["open", "/"]).await;
    assert!(success, "open failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.starts_with("Dashboard - GPJ Input Brief Assistant"));
    assert!(stdout.contains("In progress (1)"));
    assert!(stdout.contains("Brief b3"));
    assert!(stdout.contains("Total: 3"));
}

#[tokio::test]
async fn test_open_unknown_path_fails() {
    let server = MockServer::start().await;
    let (_tmp, config_path) = setup_test_env(&server.uri());

    let (_, stderr, success) = run_brief(&config_path, &["open", "/settings"]).await;
    assert!(!success);
    assert!(stderr.contains("No view for path"));
}

#[tokio::test]
async fn test_show_renders_editor_even_when_documents_fail() {
    let server = MockServer::start().await;
    let (_tmp, config_path) = setup_test_env(&server.uri());

    Mock::given(method("GET"))
        .and(path("/api/briefs/b1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(brief_json("b1", "draft")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/sections/brief/b1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "s1",
            "brief_id": "b1",
            "section_number": 1,
            "section_name": "Project Overview",
            "content": {"Venue": "Hall B"}
        }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/documents/brief/b1"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let (stdout, stderr, success) = run_brief(&config_path, &["show", "b1"]).await;
    assert!(success, "show failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.starts_with("Edit Brief"));
    assert!(stdout.contains("Venue: Hall B"));
    assert!(stdout.contains("Warning: documents could not be loaded"));
}

#[tokio::test]
async fn test_new_creates_brief() {
    let server = MockServer::start().await;
    let (_tmp, config_path) = setup_test_env(&server.uri());

    Mock::given(method("POST"))
        .and(path("/api/briefs/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(brief_json("b1", "draft")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/sections/brief/b1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let (stdout, stderr, success) = run_brief(
        &config_path,
        &["new", "--title", "Summit", "--meta", "client=Acme"],
    )
    .await;
    assert!(success, "new failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("Created brief b1"));
}

#[tokio::test]
async fn test_dashboard_reports_backend_error() {
    let server = MockServer::start().await;
    let (_tmp, config_path) = setup_test_env(&server.uri());

    Mock::given(method("GET"))
        .and(path("/api/briefs"))
        .and(query_param("status", "completed"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let (stdout, stderr, success) =
        run_brief(&config_path, &["dashboard", "--status", "completed"]).await;
    assert!(!success);
    assert!(stdout.contains("Error:"));
    assert!(stderr.contains("Failed to list briefs"));
}

#[tokio::test]
async fn test_export_writes_file() {
    let server = MockServer::start().await;
    let (tmp, config_path) = setup_test_env(&server.uri());
    let out_dir = tmp.path().join("out");

    Mock::given(method("GET"))
        .and(path("/api/briefs/b1/export"))
        .and(query_param("format", "pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let (stdout, stderr, success) = run_brief(
        &config_path,
        &["export", "b1", "--out", out_dir.to_str().unwrap()],
    )
    .await;
    assert!(success, "export failed: stdout={}, stderr={}", stdout, stderr);
    assert_eq!(fs::read(out_dir.join("brief_b1.pdf")).unwrap(), b"%PDF");
}

#[tokio::test]
async fn test_update_requires_a_change() {
    let server = MockServer::start().await;
    let (_tmp, config_path) = setup_test_env(&server.uri());

    let (_, stderr, success) = run_brief(&config_path, &["update", "b1"]).await;
    assert!(!success);
    assert!(stderr.contains("Nothing to update"));
}
