use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::aggregate::tell_all;
use crate::common::client::client::Aria2Client;
use crate::common::client::models::task::Task;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// 一次轮询得到的全部任务
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub tasks: Vec<Task>,
    pub polled_at: Instant,
}

/// 轮询器：拉取一次、交付、等待 interval、再拉取
///
/// 等待从上一次交付完成后开始计时，守护进程变慢时轮询间隔随之拉长，不会堆积请求。
pub struct Poller {
    client: Aria2Client,
    interval: Duration,
    keys: Option<Vec<String>>,
}

impl Poller {
    pub fn new(client: Aria2Client) -> Self {
        Self {
            client,
            interval: DEFAULT_POLL_INTERVAL,
            keys: None,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// 只请求指定的任务字段
    pub fn with_keys(mut self, keys: Vec<String>) -> Self {
        self.keys = Some(keys);
        self
    }

    pub async fn poll_once(&self) -> Snapshot {
        let tasks = tell_all(&self.client, self.keys.as_deref()).await;
        Snapshot {
            tasks,
            polled_at: Instant::now(),
        }
    }

    /// 持续轮询直到接收端被丢弃
    pub async fn run(self, tx: mpsc::Sender<Snapshot>) {
        let mut rounds: u64 = 0;
        loop {
            let snapshot = self.poll_once().await;
            rounds += 1;
            debug!("第 {} 轮轮询，任务数: {}", rounds, snapshot.tasks.len());

            if tx.send(snapshot).await.is_err() {
                info!("接收端已关闭，停止轮询");
                break;
            }

            tokio::time::sleep(self.interval).await;
        }
    }

    /// 在后台启动轮询，快照通过通道交回调用方所在的任务
    pub fn spawn(self) -> (mpsc::Receiver<Snapshot>, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(1);
        let handle = tokio::spawn(self.run(tx));
        (rx, handle)
    }
}
