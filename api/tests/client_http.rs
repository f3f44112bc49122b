//! Exercises the client against a local HTTP server standing in for the backend.

use std::io::Read;
use std::sync::mpsc;

use api::{ApiClient, ApiError, GenerateRequest};
use tiny_http::{Header, Method, Response, Server};

type Seen = mpsc::Receiver<(Method, String, String)>;

/// Serve exactly one request with the given status and JSON body on an OS
/// assigned port. Returns the server's base URL and a channel reporting the
/// received method, path and body.
fn serve_once(status: u16, body: &'static str) -> (String, Seen) {
    let server = Server::http("127.0.0.1:0").expect("bind test server");
    let addr = server
        .server_addr()
        .to_ip()
        .expect("test server listens on TCP");
    let base = format!("http://{addr}");
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        if let Ok(mut request) = server.recv() {
            let mut received = String::new();
            let _ = request.as_reader().read_to_string(&mut received);
            let _ = tx.send((request.method().clone(), request.url().to_string(), received));
            let response = Response::from_string(body)
                .with_status_code(status)
                .with_header(
                    "Content-Type: application/json"
                        .parse::<Header>()
                        .expect("header"),
                );
            let _ = request.respond(response);
        }
    });
    (base, rx)
}

fn request() -> GenerateRequest {
    GenerateRequest {
        name: Some("テスト".into()),
        birthdate: "1990-01-02".into(),
        birthtime: "03:04".into(),
    }
}

#[tokio::test]
async fn generate_posts_json_and_decodes_result() {
    let (base, seen) = serve_once(
        200,
        r#"{"numbers": [1, 2, 3], "hissatsu_numbers": [2], "actions": [{"action": "走る", "meaning": "前へ"}]}"#,
    );
    let client = ApiClient::new(&base).expect("client");

    let result = client.generate(&request()).await.expect("generate");
    assert_eq!(result.numbers, vec![1, 2, 3]);
    assert_eq!(result.hissatsu_numbers, vec![2]);
    assert_eq!(result.actions[0].action, "走る");

    let (method, path, body) = seen.recv().expect("request seen");
    assert_eq!(method, Method::Post);
    assert_eq!(path, "/api/generate");
    let sent: serde_json::Value = serde_json::from_str(&body).expect("json body");
    assert_eq!(sent["birthdate"], "1990-01-02");
    assert_eq!(sent["birthtime"], "03:04");
    assert_eq!(sent["name"], "テスト");
}

#[tokio::test]
async fn error_detail_is_reported_verbatim() {
    let (base, _seen) = serve_once(500, r#"{"detail": "外部サイトに接続できません"}"#);
    let client = ApiClient::new(&base).expect("client");

    let err = client.generate(&request()).await.expect_err("should fail");
    assert_eq!(err, ApiError::Rejected("外部サイトに接続できません".into()));
    assert_eq!(err.user_message("結果の生成に失敗しました"), "外部サイトに接続できません");
}

#[tokio::test]
async fn error_without_detail_falls_back() {
    let (base, _seen) = serve_once(500, r#"{}"#);
    let client = ApiClient::new(&base).expect("client");

    let err = client.generate(&request()).await.expect_err("should fail");
    assert_eq!(err, ApiError::Status(500));
    assert_eq!(err.user_message("結果の生成に失敗しました"), "結果の生成に失敗しました");
}

#[test]
fn test_servers_get_distinct_ports() {
    let (first, _a) = serve_once(200, "{}");
    let (second, _b) = serve_once(200, "{}");
    assert_ne!(first, second);
    assert!(first.starts_with("http://127.0.0.1:"));
}
