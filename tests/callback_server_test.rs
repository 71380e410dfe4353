use std::time::Duration;

use forceplay::api::{FAILURE_PAGE, SUCCESS_PAGE};
use forceplay::errors::Error;
use forceplay::server::{CallbackServer, ServerPhase};
use forceplay::types::CallbackResult;

async fn started(expected_state: &str) -> (CallbackServer, String) {
    let mut server = CallbackServer::new("/callback", expected_state);
    assert_eq!(server.phase(), ServerPhase::Idle);

    let addr = server.start("127.0.0.1:0").await.unwrap();
    assert_eq!(server.phase(), ServerPhase::Listening);
    (server, format!("http://{}", addr))
}

fn hit(url: String) -> tokio::task::JoinHandle<(u16, String)> {
    tokio::spawn(async move {
        let res = reqwest::get(url).await.unwrap();
        let status = res.status().as_u16();
        (status, res.text().await.unwrap())
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn test_valid_callback() {
    let (mut server, base) = started("S").await;
    let request = hit(format!("{}/callback?code=abc&state=S", base));

    let result = server.await_callback(Duration::from_secs(5)).await.unwrap();
    assert_eq!(
        result,
        CallbackResult {
            code: Some("abc".to_string()),
            state: "S".to_string(),
            error: None,
        }
    );
    assert!(result.is_valid("S"));
    assert_eq!(server.phase(), ServerPhase::Closed);

    let (status, body) = request.await.unwrap();
    assert_eq!(status, 200);
    assert_eq!(body, SUCCESS_PAGE);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_state_mismatch() {
    let (mut server, base) = started("S").await;
    let request = hit(format!("{}/callback?code=abc&state=OTHER", base));

    let result = server.await_callback(Duration::from_secs(5)).await.unwrap();
    assert_eq!(result.state, "OTHER");
    assert!(matches!(result.validated_code("S"), Err(Error::Auth(_))));

    let (status, body) = request.await.unwrap();
    assert_eq!(status, 200);
    assert_eq!(body, FAILURE_PAGE);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_state_and_code() {
    let (mut server, base) = started("S").await;
    let request = hit(format!("{}/callback?error=access_denied", base));

    let result = server.await_callback(Duration::from_secs(5)).await.unwrap();
    assert_eq!(result.code, None);
    assert_eq!(result.state, "");
    assert_eq!(result.error.as_deref(), Some("access_denied"));
    assert!(!result.is_valid("S"));

    let (_, body) = request.await.unwrap();
    assert_eq!(body, FAILURE_PAGE);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_other_paths_do_not_count() {
    let (mut server, base) = started("S").await;

    let browser = async {
        let favicon = hit(format!("{}/favicon.ico", base)).await.unwrap();
        let callback = hit(format!("{}/callback?code=abc&state=S", base))
            .await
            .unwrap();
        (favicon, callback)
    };
    let (result, (favicon, callback)) =
        tokio::join!(server.await_callback(Duration::from_secs(5)), browser);

    // The stray request got a 404 and did not end the wait
    assert_eq!(favicon.0, 404);
    assert_eq!(result.unwrap().code.as_deref(), Some("abc"));
    assert_eq!(callback.1, SUCCESS_PAGE);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_timeout_releases_listener() {
    let mut server = CallbackServer::new("/callback", "S");
    let addr = server.start("127.0.0.1:0").await.unwrap();

    let res = server.await_callback(Duration::from_millis(200)).await;
    assert!(matches!(res, Err(Error::CallbackTimeout(_))));
    assert_eq!(server.phase(), ServerPhase::Closed);

    // The port is free again
    let rebound = tokio::net::TcpListener::bind(addr).await;
    assert!(rebound.is_ok());
}

#[tokio::test]
async fn test_await_without_start() {
    let mut server = CallbackServer::new("/callback", "S");
    let res = server.await_callback(Duration::from_millis(50)).await;
    assert!(matches!(res, Err(Error::Server(_))));
}

#[tokio::test]
async fn test_start_twice() {
    let (mut server, _) = started("S").await;
    assert!(server.start("127.0.0.1:0").await.is_err());
}

#[tokio::test]
async fn test_unroutable_paths_fail_before_binding() {
    for path in ["/:cb", "/auth/*rest", "callback", "", "/{code}"] {
        let mut server = CallbackServer::new(path, "S");
        let res = server.start("127.0.0.1:0").await;

        assert!(matches!(res, Err(Error::Config(_))), "path {:?}", path);
        assert_eq!(server.phase(), ServerPhase::Idle);

        // Still no listener, so waiting reports an error instead of panicking
        let res = server.await_callback(Duration::from_millis(50)).await;
        assert!(matches!(res, Err(Error::Server(_))));
    }
}
