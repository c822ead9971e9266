use std::collections::HashMap;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use super::codec::{decode_response, decode_result, encode_request, token};
use super::error::RpcError;
use super::method::Method;
use super::models::stat::{GlobalStat, Peer, ServerGroup, SessionInfo, VersionInfo};
use super::models::task::{Task, TaskFile, TaskUri};
use super::transport::{HttpTransport, Transport};
use crate::common::config::Aria2Config;

/// tellWaiting / tellStopped 不限制数量时传的 num
pub const UNBOUNDED: i64 = i64::MAX;

pub type Options = HashMap<String, String>;

/// changePosition 的定位方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionHow {
    Set,
    Current,
    End,
}

impl PositionHow {
    pub fn as_str(&self) -> &'static str {
        match self {
            PositionHow::Set => "POS_SET",
            PositionHow::Current => "POS_CUR",
            PositionHow::End => "POS_END",
        }
    }
}

// aria2 的 JSON-RPC 客户端，显式构造后传给需要的地方
#[derive(Clone)]
pub struct Aria2Client {
    transport: Arc<dyn Transport>,
    secret: Option<String>,
}

impl Aria2Client {
    pub fn new(config: &Aria2Config) -> Result<Self, RpcError> {
        let transport = HttpTransport::new(config)?;
        debug!("aria2 RPC 地址: {}", transport.endpoint());
        Ok(Self::with_transport(Arc::new(transport), config.secret.clone()))
    }

    pub fn with_transport(transport: Arc<dyn Transport>, secret: Option<String>) -> Self {
        Self {
            transport,
            secret: secret.filter(|s| !s.is_empty()),
        }
    }

    pub fn secret(&self) -> Option<&str> {
        self.secret.as_deref()
    }

    /// 发送请求并返回原始响应体
    pub async fn call_raw(&self, method: Method, params: Vec<Value>) -> Result<Vec<u8>, RpcError> {
        debug!("调用 {}", method);
        let body = encode_request(method, params, self.secret())?;
        self.transport.post(body).await.map_err(|e| {
            error!("调用 {} 失败: {}", method, e);
            e
        })
    }

    // 通用调用
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        params: Vec<Value>,
    ) -> Result<T, RpcError> {
        let body = self.call_raw(method, params).await?;
        decode_result(&body)
    }

    /// 后台发起调用，结束后 continuation 恰好被调用一次，失败时收到 None
    ///
    /// continuation 在 tokio 工作线程上执行。需要回到调用方所在任务处理结果时
    /// 用 [`Aria2Client::dispatch_oneshot`]，持续刷新用 `Poller` 的 channel
    pub fn dispatch<T, F>(&self, method: Method, params: Vec<Value>, continuation: F) -> JoinHandle<()>
    where
        T: DeserializeOwned + Send + 'static,
        F: FnOnce(Option<T>) + Send + 'static,
    {
        let client = self.clone();
        tokio::spawn(async move {
            let body = client.call_raw(method, params).await.ok();
            continuation(decode_response(body.as_deref()));
        })
    }

    /// 和 dispatch 相同，但结果通过 oneshot 交回调用方
    pub fn dispatch_oneshot<T>(
        &self,
        method: Method,
        params: Vec<Value>,
    ) -> oneshot::Receiver<Option<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        self.dispatch(method, params, move |result: Option<T>| {
            if tx.send(result).is_err() {
                debug!("{} 的结果没有接收方", method);
            }
        });
        rx
    }
}

fn options_param(options: Option<&Options>) -> Value {
    json!(options.cloned().unwrap_or_default())
}

// 位置参数在 options 之后，只给位置时补一个空的 options
fn push_options_and_position(
    params: &mut Vec<Value>,
    options: Option<&Options>,
    position: Option<u32>,
) {
    if options.is_some() || position.is_some() {
        params.push(options_param(options));
    }
    if let Some(pos) = position {
        params.push(json!(pos));
    }
}

fn push_keys(params: &mut Vec<Value>, keys: Option<&[String]>) {
    if let Some(keys) = keys {
        params.push(json!(keys));
    }
}

// 提交任务
impl Aria2Client {
    pub async fn add_uri(
        &self,
        uris: &[String],
        options: Option<&Options>,
        position: Option<u32>,
    ) -> Result<String, RpcError> {
        let mut params = vec![json!(uris)];
        push_options_and_position(&mut params, options, position);
        self.call(Method::AddUri, params).await
    }

    /// 种子文件内容会被 base64 编码后发送
    pub async fn add_torrent(
        &self,
        torrent: &[u8],
        uris: &[String],
        options: Option<&Options>,
        position: Option<u32>,
    ) -> Result<String, RpcError> {
        let mut params = vec![json!(STANDARD.encode(torrent)), json!(uris)];
        push_options_and_position(&mut params, options, position);
        self.call(Method::AddTorrent, params).await
    }

    pub async fn add_metalink(
        &self,
        metalink: &[u8],
        options: Option<&Options>,
        position: Option<u32>,
    ) -> Result<Vec<String>, RpcError> {
        let mut params = vec![json!(STANDARD.encode(metalink))];
        push_options_and_position(&mut params, options, position);
        self.call(Method::AddMetalink, params).await
    }
}

// 任务控制
impl Aria2Client {
    pub async fn remove(&self, gid: &str) -> Result<String, RpcError> {
        self.call(Method::Remove, vec![json!(gid)]).await
    }

    pub async fn force_remove(&self, gid: &str) -> Result<String, RpcError> {
        self.call(Method::ForceRemove, vec![json!(gid)]).await
    }

    pub async fn pause(&self, gid: &str) -> Result<String, RpcError> {
        self.call(Method::Pause, vec![json!(gid)]).await
    }

    pub async fn pause_all(&self) -> Result<String, RpcError> {
        self.call(Method::PauseAll, vec![]).await
    }

    pub async fn force_pause(&self, gid: &str) -> Result<String, RpcError> {
        self.call(Method::ForcePause, vec![json!(gid)]).await
    }

    pub async fn force_pause_all(&self) -> Result<String, RpcError> {
        self.call(Method::ForcePauseAll, vec![]).await
    }

    pub async fn unpause(&self, gid: &str) -> Result<String, RpcError> {
        self.call(Method::Unpause, vec![json!(gid)]).await
    }

    pub async fn unpause_all(&self) -> Result<String, RpcError> {
        self.call(Method::UnpauseAll, vec![]).await
    }
}

// 查询
impl Aria2Client {
    pub async fn tell_status(&self, gid: &str, keys: Option<&[String]>) -> Result<Task, RpcError> {
        let mut params = vec![json!(gid)];
        push_keys(&mut params, keys);
        self.call(Method::TellStatus, params).await
    }

    pub async fn get_uris(&self, gid: &str) -> Result<Vec<TaskUri>, RpcError> {
        self.call(Method::GetUris, vec![json!(gid)]).await
    }

    pub async fn get_files(&self, gid: &str) -> Result<Vec<TaskFile>, RpcError> {
        self.call(Method::GetFiles, vec![json!(gid)]).await
    }

    pub async fn get_peers(&self, gid: &str) -> Result<Vec<Peer>, RpcError> {
        self.call(Method::GetPeers, vec![json!(gid)]).await
    }

    pub async fn get_servers(&self, gid: &str) -> Result<Vec<ServerGroup>, RpcError> {
        self.call(Method::GetServers, vec![json!(gid)]).await
    }

    pub async fn tell_active(&self, keys: Option<&[String]>) -> Result<Vec<Task>, RpcError> {
        let mut params = vec![];
        push_keys(&mut params, keys);
        self.call(Method::TellActive, params).await
    }

    pub async fn tell_waiting(
        &self,
        offset: i64,
        num: i64,
        keys: Option<&[String]>,
    ) -> Result<Vec<Task>, RpcError> {
        let mut params = vec![json!(offset), json!(num)];
        push_keys(&mut params, keys);
        self.call(Method::TellWaiting, params).await
    }

    pub async fn tell_stopped(
        &self,
        offset: i64,
        num: i64,
        keys: Option<&[String]>,
    ) -> Result<Vec<Task>, RpcError> {
        let mut params = vec![json!(offset), json!(num)];
        push_keys(&mut params, keys);
        self.call(Method::TellStopped, params).await
    }
}

// 调整队列
impl Aria2Client {
    /// 返回调整后的位置
    pub async fn change_position(
        &self,
        gid: &str,
        pos: i64,
        how: PositionHow,
    ) -> Result<i64, RpcError> {
        self.call(
            Method::ChangePosition,
            vec![json!(gid), json!(pos), json!(how.as_str())],
        )
        .await
    }

    /// 返回 [删除的数量, 添加的数量]
    pub async fn change_uri(
        &self,
        gid: &str,
        file_index: u64,
        del_uris: &[String],
        add_uris: &[String],
        position: Option<u32>,
    ) -> Result<Vec<u64>, RpcError> {
        let mut params = vec![
            json!(gid),
            json!(file_index),
            json!(del_uris),
            json!(add_uris),
        ];
        if let Some(pos) = position {
            params.push(json!(pos));
        }
        self.call(Method::ChangeUri, params).await
    }
}

// 选项
impl Aria2Client {
    pub async fn get_option(&self, gid: &str) -> Result<Options, RpcError> {
        self.call(Method::GetOption, vec![json!(gid)]).await
    }

    pub async fn change_option(&self, gid: &str, options: &Options) -> Result<String, RpcError> {
        self.call(Method::ChangeOption, vec![json!(gid), json!(options)])
            .await
    }

    pub async fn get_global_option(&self) -> Result<Options, RpcError> {
        self.call(Method::GetGlobalOption, vec![]).await
    }

    pub async fn change_global_option(&self, options: &Options) -> Result<String, RpcError> {
        self.call(Method::ChangeGlobalOption, vec![json!(options)])
            .await
    }

    pub async fn get_global_stat(&self) -> Result<GlobalStat, RpcError> {
        self.call(Method::GetGlobalStat, vec![]).await
    }
}

// 下载结果与守护进程
impl Aria2Client {
    pub async fn purge_download_result(&self) -> Result<String, RpcError> {
        self.call(Method::PurgeDownloadResult, vec![]).await
    }

    pub async fn remove_download_result(&self, gid: &str) -> Result<String, RpcError> {
        self.call(Method::RemoveDownloadResult, vec![json!(gid)])
            .await
    }

    pub async fn get_version(&self) -> Result<VersionInfo, RpcError> {
        self.call(Method::GetVersion, vec![]).await
    }

    pub async fn get_session_info(&self) -> Result<SessionInfo, RpcError> {
        self.call(Method::GetSessionInfo, vec![]).await
    }

    pub async fn shutdown(&self) -> Result<String, RpcError> {
        self.call(Method::Shutdown, vec![]).await
    }

    pub async fn force_shutdown(&self) -> Result<String, RpcError> {
        self.call(Method::ForceShutdown, vec![]).await
    }

    pub async fn save_session(&self) -> Result<String, RpcError> {
        self.call(Method::SaveSession, vec![]).await
    }
}

// 内省
impl Aria2Client {
    /// 一次请求里批量调用，每个子调用各自带上 token
    pub async fn multicall(&self, calls: &[(Method, Vec<Value>)]) -> Result<Vec<Value>, RpcError> {
        let batch: Vec<Value> = calls
            .iter()
            .map(|(method, params)| {
                let mut sub_params = params.clone();
                if let Some(secret) = self.secret() {
                    sub_params.insert(0, json!(token(secret)));
                }
                json!({
                    "methodName": method.wire_name(),
                    "params": sub_params,
                })
            })
            .collect();

        self.call(Method::Multicall, vec![json!(batch)]).await
    }

    pub async fn list_methods(&self) -> Result<Vec<String>, RpcError> {
        self.call(Method::ListMethods, vec![]).await
    }

    pub async fn list_notifications(&self) -> Result<Vec<String>, RpcError> {
        self.call(Method::ListNotifications, vec![]).await
    }
}
