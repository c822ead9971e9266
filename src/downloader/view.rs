use crate::common::client::models::task::{Task, TaskStatus, parse_count};
use crate::common::format::{format_duration, format_size_str, format_speed_str};

/// 无法估算剩余时间时的占位
pub const ETA_UNKNOWN: &str = "∞";

/// 从任务快照派生的展示字段，都是纯函数
pub trait TaskView {
    /// 完成比例，限制在 [0, 1]
    fn progress(&self) -> f64;

    /// 剩余秒数，总大小或速度缺失、不可解析或为 0 时返回 None
    ///
    /// aria2 在还不知道文件大小时报告 totalLength 为 "0"
    fn eta_seconds(&self) -> Option<u64>;

    fn eta(&self) -> String {
        match self.eta_seconds() {
            Some(secs) => format_duration(secs),
            None => ETA_UNKNOWN.to_string(),
        }
    }

    fn title(&self) -> String;

    fn file_path(&self) -> Option<&str>;

    fn subtitle(&self) -> String;
}

impl TaskView for Task {
    fn progress(&self) -> f64 {
        let total = self.total_length();
        if total == 0 {
            return 0.0;
        }
        (self.completed_length() as f64 / total as f64).clamp(0.0, 1.0)
    }

    fn eta_seconds(&self) -> Option<u64> {
        let total = parse_count(self.total_length.as_deref()).filter(|t| *t > 0)?;
        let speed = parse_count(self.download_speed.as_deref()).filter(|s| *s > 0)?;
        // 已完成超过总大小时按 0 处理
        let remaining = total.saturating_sub(self.completed_length());
        Some(remaining / speed)
    }

    fn title(&self) -> String {
        self.files()
            .first()
            .and_then(|f| f.path.as_deref())
            .and_then(|path| path.rsplit('/').next())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.gid.clone())
    }

    fn file_path(&self) -> Option<&str> {
        self.files()
            .first()
            .and_then(|f| f.path.as_deref())
            .filter(|path| !path.is_empty())
    }

    fn subtitle(&self) -> String {
        let total = format_size_str(self.total_length.as_deref().unwrap_or("0"));
        let downloaded = format_size_str(self.completed_length.as_deref().unwrap_or("0"));
        let pgs = (self.progress() * 100.0) as u32;

        // 只有下载中的任务才显示速度和剩余时间
        match self.status {
            TaskStatus::Active => {
                let speed = format_speed_str(self.download_speed.as_deref().unwrap_or("0"));
                format!(
                    "{} - {}% - {}/{} - {}",
                    speed,
                    pgs,
                    downloaded,
                    total,
                    self.eta()
                )
            }
            _ => format!("{} - {}% - {}/{}", self.status, pgs, downloaded, total),
        }
    }
}

/// 列表的状态筛选
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Complete,
    Error,
}

impl StatusFilter {
    pub fn is_match(&self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => matches!(
                task.status,
                TaskStatus::Active | TaskStatus::Waiting | TaskStatus::Paused
            ),
            StatusFilter::Complete => task.status == TaskStatus::Complete,
            StatusFilter::Error => {
                matches!(task.status, TaskStatus::Error | TaskStatus::Removed)
            }
        }
    }

    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|t| self.is_match(t)).collect()
    }
}
