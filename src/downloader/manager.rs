use std::collections::HashMap;

use futures::future::join_all;
use tracing::{debug, info, warn};

use super::aggregate::tell_all;
use crate::common::client::client::Aria2Client;
use crate::common::client::error::RpcError;
use crate::common::client::models::task::{Task, TaskStatus};

/// toggle 实际执行的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Paused,
    Unpaused,
    Ignored,
}

#[derive(Clone)]
pub struct TaskManager {
    client: Aria2Client,
}

impl TaskManager {
    pub fn new(client: Aria2Client) -> Self {
        Self { client }
    }

    /// 当前全部任务的快照
    pub async fn tasks(&self) -> Vec<Task> {
        tell_all(&self.client, None).await
    }

    pub async fn find(&self, gid: &str) -> Option<Task> {
        self.tasks().await.into_iter().find(|t| t.gid == gid)
    }

    /// 下载到指定目录，放在等待队列最前面
    pub async fn download(&self, url: &str, dir: &str) -> Result<String, RpcError> {
        let options = HashMap::from([("dir".to_string(), dir.to_string())]);
        let gid = self
            .client
            .add_uri(&[url.to_string()], Some(&options), Some(0))
            .await?;
        info!("已添加任务 {}: {}", gid, url);
        Ok(gid)
    }

    /// 暂停中的任务恢复，下载或等待中的任务暂停，其他状态不处理
    pub async fn toggle(&self, task: &Task) -> Result<ToggleAction, RpcError> {
        match task.status {
            TaskStatus::Paused => {
                self.client.unpause(&task.gid).await?;
                Ok(ToggleAction::Unpaused)
            }
            TaskStatus::Active | TaskStatus::Waiting => {
                self.client.pause(&task.gid).await?;
                Ok(ToggleAction::Paused)
            }
            _ => {
                debug!("任务 {} 状态为 {}，忽略", task.gid, task.status);
                Ok(ToggleAction::Ignored)
            }
        }
    }

    /// 已结束的任务只清除下载结果，未结束的先停止再清除
    ///
    /// remove 失败时仍会清除下载结果，返回第一个错误
    pub async fn remove_task(&self, task: &Task) -> Result<(), RpcError> {
        let removed = if task.status.is_finished() {
            Ok(())
        } else {
            self.client.remove(&task.gid).await.map(|_| ())
        };
        if let Err(e) = &removed {
            warn!("停止任务 {} 失败: {}", task.gid, e);
        }

        let cleared = self.client.remove_download_result(&task.gid).await.map(|_| ());
        removed.and(cleared)?;
        info!("已移除任务 {}", task.gid);
        Ok(())
    }

    /// aria2 没有 removeAll，这里逐个移除活动和等待中的任务
    pub async fn remove_all(&self) -> Vec<(String, Result<(), RpcError>)> {
        let tasks: Vec<Task> = self
            .tasks()
            .await
            .into_iter()
            .filter(|t| !t.status.is_finished())
            .collect();

        let results = join_all(tasks.iter().map(|t| self.remove_task(t))).await;
        tasks
            .into_iter()
            .map(|t| t.gid)
            .zip(results)
            .inspect(|(gid, result)| {
                if let Err(e) = result {
                    warn!("移除任务 {} 失败: {}", gid, e);
                }
            })
            .collect()
    }

    /// 清除所有已结束任务的记录
    pub async fn clear(&self) -> Result<(), RpcError> {
        self.client.purge_download_result().await?;
        Ok(())
    }

    pub async fn pause_many(&self, gids: &[String]) -> Vec<Result<String, RpcError>> {
        join_all(gids.iter().map(|gid| self.client.pause(gid))).await
    }

    pub async fn unpause_many(&self, gids: &[String]) -> Vec<Result<String, RpcError>> {
        join_all(gids.iter().map(|gid| self.client.unpause(gid))).await
    }
}
