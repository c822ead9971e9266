//! 测试用的 aria2 模拟服务
#![allow(dead_code)]

use std::time::Duration;

use quick_downloader::{Aria2Client, Aria2Config};
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 指向模拟服务的客户端
pub fn client_for(server: &MockServer, secret: Option<&str>) -> Aria2Client {
    let addr = server.address();
    let config = Aria2Config::new(addr.ip().to_string(), addr.port().to_string(), secret.map(str::to_string))
        .with_timeout(Duration::from_secs(5));
    Aria2Client::new(&config).expect("创建客户端失败")
}

pub fn ok_body(result: Value) -> Value {
    json!({ "id": "qd", "jsonrpc": "2.0", "result": result })
}

pub fn error_body(code: i64, message: &str) -> Value {
    json!({
        "id": "qd",
        "jsonrpc": "2.0",
        "error": { "code": code, "message": message }
    })
}

/// 按 JSON 中的 method 字段匹配，返回给定 result
pub async fn mount_result(server: &MockServer, wire_method: &str, result: Value) {
    mount_response(
        server,
        wire_method,
        ResponseTemplate::new(200).set_body_json(ok_body(result)),
    )
    .await;
}

pub async fn mount_delayed_result(server: &MockServer, wire_method: &str, result: Value, delay: Duration) {
    mount_response(
        server,
        wire_method,
        ResponseTemplate::new(200)
            .set_body_json(ok_body(result))
            .set_delay(delay),
    )
    .await;
}

pub async fn mount_response(server: &MockServer, wire_method: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/jsonrpc"))
        .and(body_partial_json(json!({ "method": wire_method })))
        .respond_with(response)
        .mount(server)
        .await;
}

pub fn task_json(gid: &str, status: &str) -> Value {
    json!({
        "gid": gid,
        "status": status,
        "totalLength": "1000",
        "completedLength": "250",
        "downloadSpeed": "50",
        "files": [{ "index": "1", "path": format!("/downloads/{}.bin", gid), "uris": [] }]
    })
}

/// 模拟服务收到的全部请求体
pub async fn received_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|req| serde_json::from_slice(&req.body).expect("请求体不是 JSON"))
        .collect()
}

pub fn gids(tasks: &[quick_downloader::Task]) -> Vec<&str> {
    tasks.iter().map(|t| t.gid.as_str()).collect()
}
