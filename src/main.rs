use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::Parser;
use colored::Colorize;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use quick_downloader::common::client::client::Options;
use quick_downloader::common::config::{DaemonOptions, RetryPolicy};
use quick_downloader::common::format::{format_size, format_speed_str};
use quick_downloader::common::logger::PrettyLogger;
use quick_downloader::common::progress::ProgressBoard;
use quick_downloader::downloader::TaskView;
use quick_downloader::{
    Aria2Client, Aria2Config, Poller, StatusFilter, TaskManager, log_error, log_info,
    log_success, log_warning,
};

mod cli;

use cli::{Cli, Command};

type Result<T> = anyhow::Result<T>;

/// 从命令行参数生成连接配置
fn create_config(args: &Cli) -> Aria2Config {
    Aria2Config::new(&args.host, &args.port, args.secret.clone())
        .with_timeout(Duration::from_secs(args.timeout))
        .with_retry(RetryPolicy::new(args.retries, Duration::from_millis(200)))
}

fn dir_options(dir: Option<&Path>) -> Option<Options> {
    dir.map(|d| HashMap::from([("dir".to_string(), d.to_string_lossy().to_string())]))
}

/// 批量操作的结果汇总
fn report<T>(
    action: &str,
    gids: &[String],
    results: Vec<std::result::Result<T, impl std::fmt::Display>>,
) {
    for (gid, result) in gids.iter().zip(results) {
        match result {
            Ok(_) => log_success!("{} {}", action, gid),
            Err(e) => log_error!("{} {} 失败: {}", action, gid, e),
        }
    }
}

async fn handle_add(
    client: &Aria2Client,
    urls: &[String],
    dir: Option<&Path>,
    position: Option<u32>,
) -> Result<()> {
    let options = dir_options(dir);
    let gid = client
        .add_uri(urls, options.as_ref(), position)
        .await
        .context("添加下载失败")?;
    log_success!("已添加任务: {}", gid);
    Ok(())
}

async fn handle_list(manager: &TaskManager, filter: StatusFilter) -> Result<()> {
    let tasks = manager.tasks().await;
    let matched = filter.apply(&tasks);
    if matched.is_empty() {
        log_info!("没有任务");
        return Ok(());
    }

    PrettyLogger::title(format!("{} 个任务", matched.len()));
    for task in matched {
        PrettyLogger::task(task);
    }
    PrettyLogger::separator();
    Ok(())
}

async fn handle_status(client: &Aria2Client, gid: &str) -> Result<()> {
    let task = client
        .tell_status(gid, None)
        .await
        .with_context(|| format!("查询任务 {} 失败", gid))?;

    PrettyLogger::task(&task);
    PrettyLogger::field("目录", task.dir.as_deref().unwrap_or("-"));
    PrettyLogger::field("进度", format!("{:.1}%", task.progress() * 100.0));
    PrettyLogger::field("剩余时间", task.eta());
    PrettyLogger::field("已上传", format_size(task.upload_length() as f64));
    for file in task.files() {
        PrettyLogger::field(
            format!("文件 {}", file.index.as_deref().unwrap_or("?")),
            format!(
                "{} ({}/{})",
                file.path.as_deref().unwrap_or("-"),
                format_size(file.completed_length() as f64),
                format_size(file.length() as f64)
            ),
        );
    }
    Ok(())
}

/// 轮询并用进度条显示，直到 Ctrl-C
async fn handle_watch(client: Aria2Client, filter: StatusFilter, interval: Duration) -> Result<()> {
    let poller = Poller::new(client).with_interval(interval);
    let (mut rx, handle) = poller.spawn();
    let mut board = ProgressBoard::new();

    PrettyLogger::waiting("正在监视任务，按 Ctrl-C 退出");
    loop {
        tokio::select! {
            snapshot = rx.recv() => {
                let Some(snapshot) = snapshot else {
                    warn!("轮询已停止");
                    break;
                };
                let tasks: Vec<_> = snapshot
                    .tasks
                    .into_iter()
                    .filter(|t| filter.is_match(t))
                    .collect();
                board.update(&tasks);
            }
            _ = tokio::signal::ctrl_c() => {
                debug!("收到 Ctrl-C");
                break;
            }
        }
    }

    board.clear();
    handle.abort();
    Ok(())
}

async fn run(args: Cli) -> Result<()> {
    let config = create_config(&args);
    let client = Aria2Client::new(&config).context("创建 aria2 客户端失败")?;
    let manager = TaskManager::new(client.clone());

    match args.command {
        Command::Add { urls, dir, position } => {
            handle_add(&client, &urls, dir.as_deref(), position).await?;
        }
        Command::AddTorrent { file, dir } => {
            let torrent = tokio::fs::read(&file)
                .await
                .with_context(|| format!("读取种子文件失败: {:?}", file))?;
            let options = dir_options(dir.as_deref());
            let gid = client
                .add_torrent(&torrent, &[], options.as_ref(), None)
                .await
                .context("添加种子失败")?;
            log_success!("已添加任务: {}", gid);
        }
        Command::AddMetalink { file, dir } => {
            let metalink = tokio::fs::read(&file)
                .await
                .with_context(|| format!("读取 Metalink 文件失败: {:?}", file))?;
            let options = dir_options(dir.as_deref());
            let gids = client
                .add_metalink(&metalink, options.as_ref(), None)
                .await
                .context("添加 Metalink 失败")?;
            log_success!("已添加任务: {}", gids.join(", "));
        }
        Command::Pause { gids, all, force } => {
            if all {
                if force {
                    client.force_pause_all().await?;
                } else {
                    client.pause_all().await?;
                }
                log_success!("已暂停全部任务");
            } else if gids.is_empty() {
                bail!("需要指定 GID 或 --all");
            } else if force {
                let results =
                    futures::future::join_all(gids.iter().map(|g| client.force_pause(g))).await;
                report("暂停", &gids, results);
            } else {
                report("暂停", &gids, manager.pause_many(&gids).await);
            }
        }
        Command::Unpause { gids, all } => {
            if all {
                client.unpause_all().await?;
                log_success!("已恢复全部任务");
            } else if gids.is_empty() {
                bail!("需要指定 GID 或 --all");
            } else {
                report("恢复", &gids, manager.unpause_many(&gids).await);
            }
        }
        Command::Remove { gids, all } => {
            if all {
                let results = manager.remove_all().await;
                let (gids, results): (Vec<_>, Vec<_>) = results.into_iter().unzip();
                report("移除", &gids, results);
            } else if gids.is_empty() {
                bail!("需要指定 GID 或 --all");
            } else {
                for gid in &gids {
                    match manager.find(gid).await {
                        Some(task) => match manager.remove_task(&task).await {
                            Ok(()) => log_success!("移除 {}", gid),
                            Err(e) => log_error!("移除 {} 失败: {}", gid, e),
                        },
                        None => log_warning!("任务不存在: {}", gid),
                    }
                }
            }
        }
        Command::Purge => {
            manager.clear().await.context("清除下载结果失败")?;
            log_success!("已清除已结束的任务");
        }
        Command::List { filter } => handle_list(&manager, filter.into()).await?,
        Command::Status { gid } => handle_status(&client, &gid).await?,
        Command::Watch {
            filter,
            interval_ms,
        } => handle_watch(client, filter.into(), Duration::from_millis(interval_ms)).await?,
        Command::Stat => {
            let stat = client.get_global_stat().await.context("查询全局状态失败")?;
            PrettyLogger::field(
                "下载速度",
                format_speed_str(stat.download_speed.as_deref().unwrap_or("0")),
            );
            PrettyLogger::field(
                "上传速度",
                format_speed_str(stat.upload_speed.as_deref().unwrap_or("0")),
            );
            PrettyLogger::field("下载中", stat.num_active().to_string());
            PrettyLogger::field("等待中", stat.num_waiting().to_string());
            PrettyLogger::field("已停止", stat.num_stopped().to_string());
        }
        Command::Version => {
            let version = client.get_version().await.context("查询版本失败")?;
            let session = client.get_session_info().await.ok();
            PrettyLogger::field("aria2", &version.version);
            PrettyLogger::field("特性", version.enabled_features.join(", "));
            if let Some(session) = session {
                PrettyLogger::field("会话", &session.session_id);
            }
        }
        Command::Methods => {
            for method in client.list_methods().await.context("查询方法列表失败")? {
                println!("{}", method);
            }
        }
        Command::Shutdown { force } => {
            if force {
                client.force_shutdown().await?;
            } else {
                client.shutdown().await?;
            }
            log_success!("aria2 正在关闭");
        }
        Command::SaveSession => {
            client.save_session().await.context("保存会话失败")?;
            log_success!("会话已保存");
        }
        Command::DaemonArgs => {
            let options = DaemonOptions::from_config(&config);
            println!("aria2c {}", options.to_args().join(" "));
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // 解析命令行参数
    let args = Cli::parse();

    // 初始化日志，RUST_LOG 优先
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("连接 aria2: {}:{}", args.host, args.port);
    if let Err(e) = run(args).await {
        error!("{:#}", e);
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
    Ok(())
}
