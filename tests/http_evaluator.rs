//! HttpEvaluator against an in-process HTTP stub

use calcline::{ComputationOutcome, Evaluator, HttpEvaluator};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Serve exactly one canned response; the handle yields the raw request text
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        request
    });

    (format!("http://{addr}"), handle)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut data = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        data.extend_from_slice(&chunk[..n]);

        if let Some(header_end) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&data[..header_end]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if data.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&data).into_owned()
}

#[tokio::test]
async fn success_response_should_yield_result() {
    let (server, handle) = serve_once("200 OK", r#"{"result": 42}"#).await;
    let evaluator = HttpEvaluator::new(&server).unwrap();

    let outcome = evaluator.evaluate("6*7").await;
    let request = handle.await.unwrap();

    assert_eq!(outcome, ComputationOutcome::Success(42.0));
    assert!(request.starts_with("POST /api/calc HTTP/1.1"));
    assert!(request.to_lowercase().contains("content-type: application/json"));
    assert!(request.ends_with(r#"{"expression":"6*7"}"#));
}

#[tokio::test]
async fn fractional_result_should_be_preserved() {
    let (server, handle) = serve_once("200 OK", r#"{"result": 3.5}"#).await;
    let evaluator = HttpEvaluator::new(&server).unwrap();

    let outcome = evaluator.evaluate("7/2").await;
    handle.await.unwrap();

    assert_eq!(outcome, ComputationOutcome::Success(3.5));
    assert_eq!(outcome.display_text(), "3.5");
}

#[tokio::test]
async fn error_response_should_surface_detail() {
    let (server, handle) = serve_once("400 Bad Request", r#"{"detail": "division by zero"}"#).await;
    let evaluator = HttpEvaluator::new(&server).unwrap();

    let outcome = evaluator.evaluate("1/0").await;
    handle.await.unwrap();

    assert_eq!(
        outcome,
        ComputationOutcome::RemoteError("division by zero".to_string())
    );
}

#[tokio::test]
async fn error_response_without_string_detail_should_fall_back() {
    let (server, handle) = serve_once(
        "422 Unprocessable Entity",
        r#"{"detail": [{"loc": ["body", "expression"], "msg": "too long"}]}"#,
    )
    .await;
    let evaluator = HttpEvaluator::new(&server).unwrap();

    let outcome = evaluator.evaluate("1").await;
    handle.await.unwrap();

    assert_eq!(outcome, ComputationOutcome::RemoteError("Error".to_string()));
}

#[tokio::test]
async fn non_json_body_should_be_transport_error() {
    let (server, handle) = serve_once("200 OK", "<html>oops</html>").await;
    let evaluator = HttpEvaluator::new(&server).unwrap();

    let outcome = evaluator.evaluate("1+1").await;
    handle.await.unwrap();

    assert_eq!(outcome, ComputationOutcome::TransportError);
}

#[tokio::test]
async fn non_json_error_body_should_be_transport_error() {
    let (server, handle) = serve_once("502 Bad Gateway", "upstream down").await;
    let evaluator = HttpEvaluator::new(&server).unwrap();

    let outcome = evaluator.evaluate("1+1").await;
    handle.await.unwrap();

    assert_eq!(outcome, ComputationOutcome::TransportError);
}

#[tokio::test]
async fn unreachable_server_should_be_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let evaluator = HttpEvaluator::new(&format!("http://{addr}")).unwrap();
    let outcome = evaluator.evaluate("1+1").await;

    assert_eq!(outcome, ComputationOutcome::TransportError);
    assert_eq!(outcome.display_text(), "Network error");
}
