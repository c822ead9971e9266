use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC 2.0 请求体
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest {
    pub jsonrpc: &'static str,

    pub id: &'static str,

    pub method: String,

    pub params: Vec<Value>,
}

/// aria2 返回的错误对象
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RpcErrorObject {
    pub code: i64,

    pub message: String,
}

/// 通用响应结构，result 的类型随调用而变
#[derive(Debug, Deserialize)]
pub struct RpcResponse<T> {
    /// 原样回显的请求 id，解析失败时守护进程会返回 null
    #[serde(default)]
    pub id: Value,

    pub jsonrpc: String,

    pub result: Option<T>,

    pub error: Option<RpcErrorObject>,
}
