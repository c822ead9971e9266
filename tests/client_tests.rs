mod support;

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use quick_downloader::common::client::client::{PositionHow, UNBOUNDED};
use quick_downloader::common::client::models::stat::VersionInfo;
use quick_downloader::common::client::transport::Transport;
use quick_downloader::common::config::RetryPolicy;
use quick_downloader::{Aria2Client, Aria2Config, Method, RpcError, TaskStatus};
use serde_json::{Value, json};
use support::*;
use tokio::sync::oneshot;
use wiremock::{MockServer, ResponseTemplate};

#[tokio::test]
async fn test_add_uri_sends_token_first() {
    let server = MockServer::start().await;
    mount_result(&server, "aria2.addUri", json!("2089b05ecca3d829")).await;

    let client = client_for(&server, Some("s3cret"));
    let options = HashMap::from([("dir".to_string(), "/downloads".to_string())]);
    let gid = client
        .add_uri(&["http://example.org/file".to_string()], Some(&options), Some(0))
        .await
        .unwrap();
    assert_eq!(gid, "2089b05ecca3d829");

    let bodies = received_bodies(&server).await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["id"], "qd");
    assert_eq!(
        bodies[0]["params"],
        json!(["token:s3cret", ["http://example.org/file"], { "dir": "/downloads" }, 0])
    );
}

#[tokio::test]
async fn test_position_without_options_adds_empty_options() {
    let server = MockServer::start().await;
    mount_result(&server, "aria2.addUri", json!("abc")).await;

    let client = client_for(&server, None);
    client
        .add_uri(&["http://example.org/a".to_string()], None, Some(2))
        .await
        .unwrap();

    let bodies = received_bodies(&server).await;
    assert_eq!(bodies[0]["params"], json!([["http://example.org/a"], {}, 2]));
}

#[tokio::test]
async fn test_tell_status_decodes_single_task() {
    let server = MockServer::start().await;
    mount_result(&server, "aria2.tellStatus", task_json("a1", "paused")).await;

    let client = client_for(&server, None);
    let keys = vec!["gid".to_string(), "status".to_string()];
    let task = client.tell_status("a1", Some(&keys)).await.unwrap();
    assert_eq!(task.gid, "a1");
    assert_eq!(task.status, TaskStatus::Paused);

    // keys 作为一个数组参数传递
    let bodies = received_bodies(&server).await;
    assert_eq!(bodies[0]["params"], json!(["a1", ["gid", "status"]]));
}

#[tokio::test]
async fn test_tell_waiting_unbounded() {
    let server = MockServer::start().await;
    mount_result(&server, "aria2.tellWaiting", json!([])).await;

    let client = client_for(&server, None);
    let tasks = client.tell_waiting(0, UNBOUNDED, None).await.unwrap();
    assert!(tasks.is_empty());

    let bodies = received_bodies(&server).await;
    assert_eq!(bodies[0]["params"], json!([0, i64::MAX]));
}

#[tokio::test]
async fn test_daemon_error_is_distinct() {
    let server = MockServer::start().await;
    mount_response(
        &server,
        "aria2.pause",
        ResponseTemplate::new(400).set_body_json(error_body(1, "GID a1 is not found")),
    )
    .await;

    let client = client_for(&server, None);
    match client.pause("a1").await {
        Err(RpcError::Daemon { code, message }) => {
            assert_eq!(code, 1);
            assert_eq!(message, "GID a1 is not found");
        }
        other => panic!("期望 Daemon 错误，实际: {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_without_retry() {
    let server = MockServer::start().await;
    mount_response(&server, "aria2.getVersion", ResponseTemplate::new(500)).await;

    let client = client_for(&server, None);
    assert!(matches!(client.get_version().await, Err(RpcError::Http(500))));
    assert_eq!(received_bodies(&server).await.len(), 1);
}

#[tokio::test]
async fn test_server_error_with_retry() {
    let server = MockServer::start().await;
    mount_response(&server, "aria2.getVersion", ResponseTemplate::new(503)).await;

    let addr = server.address();
    let config = Aria2Config::new(addr.ip().to_string(), addr.port().to_string(), None)
        .with_retry(RetryPolicy::new(2, Duration::from_millis(10)));
    let client = Aria2Client::new(&config).unwrap();

    assert!(client.get_version().await.is_err());
    // 首次请求加两次重试
    assert_eq!(received_bodies(&server).await.len(), 3);
}

#[tokio::test]
async fn test_get_version() {
    let server = MockServer::start().await;
    mount_result(
        &server,
        "aria2.getVersion",
        json!({ "version": "1.36.0", "enabledFeatures": ["BitTorrent"] }),
    )
    .await;

    let client = client_for(&server, Some("abc"));
    let version = client.get_version().await.unwrap();
    assert_eq!(version.version, "1.36.0");
    assert_eq!(received_bodies(&server).await[0]["params"], json!(["token:abc"]));
}

#[tokio::test]
async fn test_change_position() {
    let server = MockServer::start().await;
    mount_result(&server, "aria2.changePosition", json!(0)).await;

    let client = client_for(&server, None);
    let pos = client.change_position("a1", -1, PositionHow::Current).await.unwrap();
    assert_eq!(pos, 0);
    assert_eq!(
        received_bodies(&server).await[0]["params"],
        json!(["a1", -1, "POS_CUR"])
    );
}

#[tokio::test]
async fn test_multicall_tokenizes_each_call() {
    let server = MockServer::start().await;
    mount_result(&server, "system.multicall", json!([["OK"], ["OK"]])).await;

    let client = client_for(&server, Some("abc"));
    let results = client
        .multicall(&[
            (Method::Pause, vec![json!("a1")]),
            (Method::PauseAll, vec![]),
        ])
        .await
        .unwrap();
    assert_eq!(results.len(), 2);

    let body = &received_bodies(&server).await[0];
    assert_eq!(body["method"], "system.multicall");
    assert_eq!(body["params"][1][0]["methodName"], "aria2.pause");
    assert_eq!(body["params"][1][0]["params"], json!(["token:abc", "a1"]));
    assert_eq!(body["params"][1][1]["params"], json!(["token:abc"]));
}

#[tokio::test]
async fn test_dispatch_fires_once_with_result() {
    let server = MockServer::start().await;
    mount_result(&server, "aria2.remove", json!("a1")).await;

    let client = client_for(&server, None);
    let (tx, rx) = oneshot::channel();
    let handle = client.dispatch(Method::Remove, vec![json!("a1")], move |gid: Option<String>| {
        let _ = tx.send(gid);
    });

    handle.await.unwrap();
    assert_eq!(rx.await.unwrap().as_deref(), Some("a1"));
}

#[tokio::test]
async fn test_dispatch_oneshot_returns_to_caller() {
    let server = MockServer::start().await;
    mount_result(&server, "aria2.getGlobalStat", json!({ "numActive": "2" })).await;

    let client = client_for(&server, None);
    let rx = client.dispatch_oneshot::<Value>(Method::GetGlobalStat, vec![]);
    let stat = rx.await.unwrap().unwrap();
    assert_eq!(stat["numActive"], "2");

    // 无效结果同样会交回调用方
    mount_result(&server, "aria2.getVersion", json!("not an object")).await;
    let rx = client.dispatch_oneshot::<VersionInfo>(Method::GetVersion, vec![]);
    assert!(rx.await.unwrap().is_none());
}

/// 永远失败的传输层，记录调用次数
struct FailingTransport {
    calls: AtomicUsize,
}

#[async_trait]
impl Transport for FailingTransport {
    async fn post(&self, _body: Vec<u8>) -> Result<Vec<u8>, RpcError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(RpcError::Http(502))
    }
}

#[tokio::test]
async fn test_dispatch_failure_gives_none() {
    let transport = Arc::new(FailingTransport {
        calls: AtomicUsize::new(0),
    });
    let client = Aria2Client::with_transport(transport.clone(), None);

    let fired = Arc::new(AtomicUsize::new(0));
    let fired_clone = Arc::clone(&fired);
    let handle = client.dispatch(Method::GetGlobalStat, vec![], move |stat: Option<Value>| {
        assert!(stat.is_none());
        fired_clone.fetch_add(1, Ordering::SeqCst);
    });
    handle.await.unwrap();

    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_endpoint() {
    let config = Aria2Config::default();
    assert_eq!(config.port, "6800");
    assert_eq!(
        config.endpoint().unwrap().as_str(),
        "http://localhost:6800/jsonrpc"
    );

    let bad = Aria2Config::new("", "6800", None);
    assert!(matches!(bad.endpoint(), Err(RpcError::InvalidEndpoint(_))));

    // 空密钥等同于未设置
    assert_eq!(Aria2Config::new("localhost", "6800", Some(String::new())).secret, None);
}

#[test]
fn test_retry_backoff() {
    let policy = RetryPolicy::new(3, Duration::from_millis(100));
    assert_eq!(policy.delay_for(0), Duration::from_millis(100));
    assert_eq!(policy.delay_for(1), Duration::from_millis(200));
    assert_eq!(policy.delay_for(3), Duration::from_millis(800));
}
