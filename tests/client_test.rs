use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use mediadex::catalog::{ApiClient, ApiError, Collection};
use reqwest::StatusCode;
use serde_json::Value;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

// Local HTTP server that answers the n-th request with `replies[n]`, repeating
// the last reply once the list runs out.
async fn serve(replies: Vec<(u16, &'static str)>) -> (ApiClient, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));

    let counter = hits.clone();
    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            let index = counter.fetch_add(1, Ordering::SeqCst);
            let (status, body) = replies[index.min(replies.len() - 1)];

            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }

            let reason = StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("");
            let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                reason,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });

    let client =
        ApiClient::new(&format!("http://{}", addr)).with_retry_delay(Duration::from_millis(1));
    (client, hits)
}

#[tokio::test]
async fn test_bad_gateway_is_retried_until_success() {
    let (client, hits) = serve(vec![
        (502, "bad gateway"),
        (502, "bad gateway"),
        (200, r#"[{"code":"ABC-1","title":"First"}]"#),
    ])
    .await;

    let movies: Vec<Value> = client.list(Collection::Movies, "token").await.unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0]["code"], "ABC-1");
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_bad_gateway_gives_up_after_three_attempts() {
    let (client, hits) = serve(vec![(502, "bad gateway")]).await;

    let result = client.list::<Value>(Collection::Actresses, "token").await;
    assert!(matches!(result, Err(ApiError::Status(StatusCode::BAD_GATEWAY))));
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_not_found_is_not_retried() {
    let (client, hits) = serve(vec![(404, r#"{"error":"not found"}"#)]).await;

    let err = client
        .get_by_id::<Value>(Collection::Movies, "NOPE-1", "token")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_invalid_body_is_a_decode_error() {
    let (client, _) = serve(vec![(200, "not json")]).await;

    let result = client.list::<Value>(Collection::Groups, "token").await;
    assert!(matches!(result, Err(ApiError::Decode(_))));
}
