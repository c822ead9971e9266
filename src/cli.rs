use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use quick_downloader::StatusFilter;

/// aria2 下载管理工具
#[derive(Parser, Debug)]
#[command(name = "qdl")]
#[command(version = "0.1")]
#[command(author = "rpeng252@gmail.com")]
#[command(about = "通过 JSON-RPC 管理本地 aria2 下载任务", long_about = None)]
pub struct Cli {
    /// aria2 RPC 主机
    #[arg(long, global = true, env = "ARIA2_HOST", default_value = "localhost")]
    pub host: String,

    /// aria2 RPC 端口
    #[arg(long, global = true, env = "ARIA2_PORT", default_value = "6800")]
    pub port: String,

    /// RPC 密钥 (对应 aria2 的 --rpc-secret)
    #[arg(long, global = true, env = "ARIA2_SECRET", hide_env_values = true)]
    pub secret: Option<String>,

    /// 单次请求超时 (秒)
    #[arg(long, global = true, default_value_t = 10)]
    pub timeout: u64,

    /// 网络失败时的重试次数
    #[arg(long, global = true, default_value_t = 0)]
    pub retries: u32,

    /// 输出调试日志
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 添加下载链接
    Add {
        #[arg(required = true, value_name = "URL")]
        #[arg(value_hint = clap::ValueHint::Url)]
        urls: Vec<String>,

        /// 保存目录
        #[arg(long, value_name = "DIR")]
        #[arg(value_hint = clap::ValueHint::DirPath)]
        dir: Option<PathBuf>,

        /// 在等待队列中的位置
        #[arg(long)]
        position: Option<u32>,
    },

    /// 添加种子文件
    AddTorrent {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// 添加 Metalink 文件
    AddMetalink {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// 暂停任务
    Pause {
        #[arg(value_name = "GID")]
        gids: Vec<String>,

        #[arg(long, conflicts_with = "gids")]
        all: bool,

        /// 不等待连接断开，立即暂停
        #[arg(long)]
        force: bool,
    },

    /// 恢复任务
    Unpause {
        #[arg(value_name = "GID")]
        gids: Vec<String>,

        #[arg(long, conflicts_with = "gids")]
        all: bool,
    },

    /// 移除任务及其下载结果
    Remove {
        #[arg(value_name = "GID")]
        gids: Vec<String>,

        #[arg(long, conflicts_with = "gids")]
        all: bool,
    },

    /// 清除所有已结束任务的记录
    Purge,

    /// 列出任务
    List {
        #[arg(long, value_enum, default_value_t = FilterArg::All)]
        filter: FilterArg,
    },

    /// 查看单个任务
    Status {
        #[arg(value_name = "GID")]
        gid: String,
    },

    /// 持续显示任务进度
    Watch {
        #[arg(long, value_enum, default_value_t = FilterArg::All)]
        filter: FilterArg,

        /// 两次轮询之间的间隔 (毫秒)
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,
    },

    /// 全局速度和任务数
    Stat,

    /// aria2 版本信息
    Version,

    /// 列出 aria2 支持的 RPC 方法
    Methods,

    /// 关闭 aria2
    Shutdown {
        #[arg(long)]
        force: bool,
    },

    /// 保存 aria2 会话
    SaveSession,

    /// 打印启动 aria2c 时需要的 RPC 参数
    DaemonArgs,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterArg {
    All,
    Active,
    Complete,
    Error,
}

impl From<FilterArg> for StatusFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => StatusFilter::All,
            FilterArg::Active => StatusFilter::Active,
            FilterArg::Complete => StatusFilter::Complete,
            FilterArg::Error => StatusFilter::Error,
        }
    }
}
