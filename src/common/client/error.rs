use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("网络请求失败: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP 状态异常: {0}")]
    Http(u16),

    #[error("响应解析失败: {0}")]
    InvalidResponse(String),

    #[error("aria2 返回错误 {code}: {message}")]
    Daemon { code: i64, message: String },

    #[error("响应中没有 result 字段")]
    MissingResult,

    #[error("无效的 RPC 地址: {0}")]
    InvalidEndpoint(String),

    #[error("请求编码失败: {0}")]
    Encode(String),
}

impl RpcError {
    /// 是否值得重试（网络层失败或服务端 5xx）
    pub fn is_retryable(&self) -> bool {
        match self {
            RpcError::Transport(_) => true,
            RpcError::Http(status) => *status >= 500,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for RpcError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidResponse(e.to_string())
    }
}

impl From<url::ParseError> for RpcError {
    fn from(e: url::ParseError) -> Self {
        Self::InvalidEndpoint(e.to_string())
    }
}
