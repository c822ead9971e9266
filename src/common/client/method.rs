use std::fmt;

/// aria2 的全部 RPC 方法，名称与线上协议一一对应
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    // 提交任务
    AddUri,
    AddTorrent,
    AddMetalink,

    // 任务控制
    Remove,
    ForceRemove,
    Pause,
    PauseAll,
    ForcePause,
    ForcePauseAll,
    Unpause,
    UnpauseAll,

    // 查询
    TellStatus,
    GetUris,
    GetFiles,
    GetPeers,
    GetServers,
    TellActive,
    TellWaiting,
    TellStopped,

    // 调整队列
    ChangePosition,
    ChangeUri,

    // 选项
    GetOption,
    ChangeOption,
    GetGlobalOption,
    ChangeGlobalOption,

    GetGlobalStat,

    PurgeDownloadResult,
    RemoveDownloadResult,

    // 守护进程
    GetVersion,
    GetSessionInfo,
    Shutdown,
    ForceShutdown,
    SaveSession,

    // 内省方法，不带 aria2. 前缀
    Multicall,
    ListMethods,
    ListNotifications,
}

impl Method {
    pub const ALL: [Method; 36] = [
        Method::AddUri,
        Method::AddTorrent,
        Method::AddMetalink,
        Method::Remove,
        Method::ForceRemove,
        Method::Pause,
        Method::PauseAll,
        Method::ForcePause,
        Method::ForcePauseAll,
        Method::Unpause,
        Method::UnpauseAll,
        Method::TellStatus,
        Method::GetUris,
        Method::GetFiles,
        Method::GetPeers,
        Method::GetServers,
        Method::TellActive,
        Method::TellWaiting,
        Method::TellStopped,
        Method::ChangePosition,
        Method::ChangeUri,
        Method::GetOption,
        Method::ChangeOption,
        Method::GetGlobalOption,
        Method::ChangeGlobalOption,
        Method::GetGlobalStat,
        Method::PurgeDownloadResult,
        Method::RemoveDownloadResult,
        Method::GetVersion,
        Method::GetSessionInfo,
        Method::Shutdown,
        Method::ForceShutdown,
        Method::SaveSession,
        Method::Multicall,
        Method::ListMethods,
        Method::ListNotifications,
    ];

    /// 不含命名空间的方法名
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::AddUri => "addUri",
            Method::AddTorrent => "addTorrent",
            Method::AddMetalink => "addMetalink",
            Method::Remove => "remove",
            Method::ForceRemove => "forceRemove",
            Method::Pause => "pause",
            Method::PauseAll => "pauseAll",
            Method::ForcePause => "forcePause",
            Method::ForcePauseAll => "forcePauseAll",
            Method::Unpause => "unpause",
            Method::UnpauseAll => "unpauseAll",
            Method::TellStatus => "tellStatus",
            Method::GetUris => "getUris",
            Method::GetFiles => "getFiles",
            Method::GetPeers => "getPeers",
            Method::GetServers => "getServers",
            Method::TellActive => "tellActive",
            Method::TellWaiting => "tellWaiting",
            Method::TellStopped => "tellStopped",
            Method::ChangePosition => "changePosition",
            Method::ChangeUri => "changeUri",
            Method::GetOption => "getOption",
            Method::ChangeOption => "changeOption",
            Method::GetGlobalOption => "getGlobalOption",
            Method::ChangeGlobalOption => "changeGlobalOption",
            Method::GetGlobalStat => "getGlobalStat",
            Method::PurgeDownloadResult => "purgeDownloadResult",
            Method::RemoveDownloadResult => "removeDownloadResult",
            Method::GetVersion => "getVersion",
            Method::GetSessionInfo => "getSessionInfo",
            Method::Shutdown => "shutdown",
            Method::ForceShutdown => "forceShutdown",
            Method::SaveSession => "saveSession",
            Method::Multicall => "system.multicall",
            Method::ListMethods => "system.listMethods",
            Method::ListNotifications => "system.listNotifications",
        }
    }

    pub fn is_introspection(&self) -> bool {
        matches!(
            self,
            Method::Multicall | Method::ListMethods | Method::ListNotifications
        )
    }

    /// 实际写入请求体的方法名
    pub fn wire_name(&self) -> String {
        if self.is_introspection() {
            self.as_str().to_string()
        } else {
            format!("aria2.{}", self.as_str())
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.wire_name())
    }
}
