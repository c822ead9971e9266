use tracing::{debug, warn};

use crate::common::client::client::{Aria2Client, UNBOUNDED};
use crate::common::client::error::RpcError;
use crate::common::client::models::task::Task;

/// 按 active、waiting、stopped 三个桶合并全部任务
///
/// 三个查询并发发出，但拼接顺序固定为 active ++ waiting ++ stopped，
/// 与响应先后无关。任何一个桶失败都只当作空列表，不影响其他桶。
pub async fn tell_all(client: &Aria2Client, keys: Option<&[String]>) -> Vec<Task> {
    let (active, waiting, stopped) = futures::join!(
        client.tell_active(keys),
        client.tell_waiting(0, UNBOUNDED, keys),
        client.tell_stopped(0, UNBOUNDED, keys),
    );

    merge_buckets([("active", active), ("waiting", waiting), ("stopped", stopped)])
}

fn merge_buckets(buckets: [(&str, Result<Vec<Task>, RpcError>); 3]) -> Vec<Task> {
    let mut all_tasks = Vec::new();
    for (name, result) in buckets {
        match result {
            Ok(tasks) => {
                debug!("{} 任务数: {}", name, tasks.len());
                all_tasks.extend(tasks);
            }
            Err(e) => warn!("查询 {} 任务失败，按空列表处理: {}", name, e),
        }
    }
    all_tasks
}
