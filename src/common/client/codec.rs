use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::error::RpcError;
use super::method::Method;
use super::models::common::{RpcRequest, RpcResponse};

pub const JSONRPC_VERSION: &str = "2.0";

/// 请求 id 固定不变，调用之间不做流水线复用
pub const REQUEST_ID: &str = "qd";

/// 构造请求体，配置了密钥时在参数最前面插入 `token:<secret>`
pub fn build_request(method: Method, params: Vec<Value>, secret: Option<&str>) -> RpcRequest {
    let mut new_params = params;
    if let Some(secret) = secret {
        new_params.insert(0, Value::String(token(secret)));
    }

    RpcRequest {
        jsonrpc: JSONRPC_VERSION,
        id: REQUEST_ID,
        method: method.wire_name(),
        params: new_params,
    }
}

pub fn token(secret: &str) -> String {
    format!("token:{}", secret)
}

pub fn encode_request(
    method: Method,
    params: Vec<Value>,
    secret: Option<&str>,
) -> Result<Vec<u8>, RpcError> {
    let request = build_request(method, params, secret);
    serde_json::to_vec(&request).map_err(|e| RpcError::Encode(e.to_string()))
}

/// 严格解码响应，区分守护进程错误、结构不符和缺少 result
pub fn decode_result<T: DeserializeOwned>(body: &[u8]) -> Result<T, RpcError> {
    let response: RpcResponse<T> = serde_json::from_slice(body).map_err(|e| {
        debug!("响应体: {}", String::from_utf8_lossy(body));
        RpcError::InvalidResponse(format!(
            "结构匹配失败: {}. 期望的结构: {}",
            e,
            std::any::type_name::<T>()
        ))
    })?;

    if let Some(err) = response.error {
        return Err(RpcError::Daemon {
            code: err.code,
            message: err.message,
        });
    }

    response.result.ok_or(RpcError::MissingResult)
}

/// 只关心有没有结果的调用方使用，任何失败都视为没有数据
pub fn decode_response<T: DeserializeOwned>(body: Option<&[u8]>) -> Option<T> {
    let body = body?;
    match decode_result(body) {
        Ok(result) => Some(result),
        Err(e) => {
            warn!("丢弃无法使用的响应: {}", e);
            None
        }
    }
}
