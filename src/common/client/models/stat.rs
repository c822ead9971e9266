use serde::{Deserialize, Serialize};

use super::task::count_or_zero;

/// aria2.getGlobalStat 的结果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStat {
    pub download_speed: Option<String>,
    pub upload_speed: Option<String>,
    pub num_active: Option<String>,
    pub num_waiting: Option<String>,
    pub num_stopped: Option<String>,
    pub num_stopped_total: Option<String>,
}

impl GlobalStat {
    pub fn download_speed(&self) -> u64 {
        count_or_zero(self.download_speed.as_deref())
    }

    pub fn upload_speed(&self) -> u64 {
        count_or_zero(self.upload_speed.as_deref())
    }

    pub fn num_active(&self) -> u64 {
        count_or_zero(self.num_active.as_deref())
    }

    pub fn num_waiting(&self) -> u64 {
        count_or_zero(self.num_waiting.as_deref())
    }

    pub fn num_stopped(&self) -> u64 {
        count_or_zero(self.num_stopped.as_deref())
    }

    pub fn num_stopped_total(&self) -> u64 {
        count_or_zero(self.num_stopped_total.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VersionInfo {
    pub version: String,
    #[serde(default)]
    pub enabled_features: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub session_id: String,
}

/// BT 任务的对端
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Peer {
    pub peer_id: Option<String>,
    pub ip: Option<String>,
    pub port: Option<String>,
    pub am_choking: Option<String>,
    pub peer_choking: Option<String>,
    pub download_speed: Option<String>,
    pub upload_speed: Option<String>,
    pub seeder: Option<String>,
}

impl Peer {
    pub fn download_speed(&self) -> u64 {
        count_or_zero(self.download_speed.as_deref())
    }

    pub fn upload_speed(&self) -> u64 {
        count_or_zero(self.upload_speed.as_deref())
    }

    pub fn is_seeder(&self) -> bool {
        self.seeder.as_deref() == Some("true")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    pub uri: Option<String>,
    pub current_uri: Option<String>,
    pub download_speed: Option<String>,
}

impl Server {
    pub fn download_speed(&self) -> u64 {
        count_or_zero(self.download_speed.as_deref())
    }
}

/// aria2.getServers 按文件分组返回
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ServerGroup {
    pub index: Option<String>,
    #[serde(default)]
    pub servers: Vec<Server>,
}
