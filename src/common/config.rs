use std::time::Duration;

use url::Url;

use crate::common::client::error::RpcError;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: &str = "6800";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// 连接 aria2 守护进程所需的配置
#[derive(Debug, Clone, PartialEq)]
pub struct Aria2Config {
    pub host: String,
    pub port: String,
    pub secret: Option<String>,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for Aria2Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT.to_string(),
            secret: None,
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }
}

impl Aria2Config {
    pub fn new(host: impl Into<String>, port: impl Into<String>, secret: Option<String>) -> Self {
        Self {
            host: host.into(),
            port: port.into(),
            // 空字符串等同于没有配置密钥
            secret: secret.filter(|s| !s.is_empty()),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// `http://{host}:{port}/jsonrpc`
    pub fn endpoint(&self) -> Result<Url, RpcError> {
        let url = Url::parse(&format!("http://{}:{}/jsonrpc", self.host, self.port))?;
        if url.host_str().is_none_or(str::is_empty) {
            return Err(RpcError::InvalidEndpoint(url.to_string()));
        }
        Ok(url)
    }
}

/// 失败重试策略，默认不重试
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::from_millis(200),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// 第 attempt 次重试前的等待时间（指数退避）
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt.min(16)))
    }
}

/// 启动 aria2c 时客户端期望的 RPC 选项
#[derive(Debug, Clone, PartialEq)]
pub struct DaemonOptions {
    pub listen_port: String,
    pub secret: String,
    pub listen_all: bool,
    pub allow_origin_all: bool,
}

impl Default for DaemonOptions {
    fn default() -> Self {
        Self {
            listen_port: DEFAULT_PORT.to_string(),
            secret: String::new(),
            listen_all: true,
            allow_origin_all: true,
        }
    }
}

impl DaemonOptions {
    pub fn from_config(config: &Aria2Config) -> Self {
        Self {
            listen_port: config.port.clone(),
            secret: config.secret.clone().unwrap_or_default(),
            ..Default::default()
        }
    }

    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("enable-rpc", "true".to_string()),
            ("rpc-listen-all", self.listen_all.to_string()),
            ("rpc-allow-origin-all", self.allow_origin_all.to_string()),
            ("rpc-listen-port", self.listen_port.clone()),
            ("rpc-secret", self.secret.clone()),
        ]
    }

    /// 渲染成 aria2c 的命令行参数
    pub fn to_args(&self) -> Vec<String> {
        self.pairs()
            .into_iter()
            .map(|(key, value)| format!("--{}={}", key, value))
            .collect()
    }
}
