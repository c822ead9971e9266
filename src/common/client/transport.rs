use async_trait::async_trait;
use reqwest::{
    Client, ClientBuilder, Url,
    header::{CONTENT_TYPE, HeaderMap, HeaderValue},
};
use tracing::{debug, error, warn};

use super::error::RpcError;
use crate::common::config::{Aria2Config, RetryPolicy};

/// 发送一次已编码的请求，返回原始响应体
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, body: Vec<u8>) -> Result<Vec<u8>, RpcError>;
}

/// 基于 HTTP POST 的传输层，每次调用对应一个请求
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: Client,
    endpoint: Url,
    retry: RetryPolicy,
}

impl HttpTransport {
    pub fn new(config: &Aria2Config) -> Result<Self, RpcError> {
        let inner = ClientBuilder::new()
            .timeout(config.timeout)
            .default_headers(Self::get_default_headers())
            .build()
            .map_err(|e| {
                error!("创建 HTTP 客户端失败: {}", e);
                RpcError::Transport(e)
            })?;

        Ok(Self {
            inner,
            endpoint: config.endpoint()?,
            retry: config.retry,
        })
    }

    pub fn get_default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn post_once(&self, body: Vec<u8>) -> Result<Vec<u8>, RpcError> {
        let resp = self
            .inner
            .post(self.endpoint.clone())
            .body(body)
            .send()
            .await?;

        let status = resp.status();
        // aria2 对 RPC 层的错误也会回 4xx 并附带 error 对象，交给解码层处理
        if status.is_server_error() {
            return Err(RpcError::Http(status.as_u16()));
        }

        let raw_body = resp.bytes().await?;
        Ok(raw_body.to_vec())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, body: Vec<u8>) -> Result<Vec<u8>, RpcError> {
        let mut attempt = 0;
        loop {
            match self.post_once(body.clone()).await {
                Ok(data) => return Ok(data),
                Err(e) if e.is_retryable() && attempt < self.retry.max_retries => {
                    let delay = self.retry.delay_for(attempt);
                    warn!(
                        "请求 {} 失败: {}，{:?} 后第 {} 次重试",
                        self.endpoint,
                        e,
                        delay,
                        attempt + 1
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    debug!("请求 {} 失败: {}", self.endpoint, e);
                    return Err(e);
                }
            }
        }
    }
}
