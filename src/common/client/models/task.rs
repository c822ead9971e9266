use std::fmt;

use serde::{Deserialize, Serialize};

/// aria2 把数字都编码成字符串，缺失或非法时按 0 处理
pub fn parse_count(value: Option<&str>) -> Option<u64> {
    value.and_then(|v| v.trim().parse::<u64>().ok())
}

pub fn count_or_zero(value: Option<&str>) -> u64 {
    parse_count(value).unwrap_or(0)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Active,
    #[default]
    Waiting,
    Paused,
    Error,
    Complete,
    Removed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Active => "active",
            TaskStatus::Waiting => "waiting",
            TaskStatus::Paused => "paused",
            TaskStatus::Error => "error",
            TaskStatus::Complete => "complete",
            TaskStatus::Removed => "removed",
        }
    }

    /// 已经结束、只剩下载结果的任务
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            TaskStatus::Complete | TaskStatus::Error | TaskStatus::Removed
        )
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UriStatus {
    Used,
    Waiting,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TaskUri {
    pub uri: Option<String>,
    pub status: Option<UriStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TaskFile {
    pub index: Option<String>,
    pub path: Option<String>,
    pub length: Option<String>,
    pub completed_length: Option<String>,
    pub selected: Option<String>,
    pub uris: Option<Vec<TaskUri>>,
}

impl TaskFile {
    pub fn index(&self) -> Option<u64> {
        parse_count(self.index.as_deref())
    }

    pub fn length(&self) -> u64 {
        count_or_zero(self.length.as_deref())
    }

    pub fn completed_length(&self) -> u64 {
        count_or_zero(self.completed_length.as_deref())
    }

    pub fn is_selected(&self) -> bool {
        self.selected.as_deref() == Some("true")
    }
}

/// 一个 aria2 下载任务的快照，数值字段保留原始字符串
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub gid: String,
    #[serde(default)]
    pub status: TaskStatus,
    pub total_length: Option<String>,
    pub completed_length: Option<String>,
    pub upload_length: Option<String>,

    pub download_speed: Option<String>,
    pub upload_speed: Option<String>,

    pub error_code: Option<String>,
    pub error_message: Option<String>,

    pub dir: Option<String>,
    pub files: Option<Vec<TaskFile>>,
}

impl Task {
    pub fn total_length(&self) -> u64 {
        count_or_zero(self.total_length.as_deref())
    }

    pub fn completed_length(&self) -> u64 {
        count_or_zero(self.completed_length.as_deref())
    }

    pub fn upload_length(&self) -> u64 {
        count_or_zero(self.upload_length.as_deref())
    }

    pub fn download_speed(&self) -> u64 {
        count_or_zero(self.download_speed.as_deref())
    }

    pub fn upload_speed(&self) -> u64 {
        count_or_zero(self.upload_speed.as_deref())
    }

    pub fn error_code(&self) -> Option<i64> {
        self.error_code.as_deref().and_then(|c| c.parse().ok())
    }

    pub fn files(&self) -> &[TaskFile] {
        self.files.as_deref().unwrap_or_default()
    }
}
