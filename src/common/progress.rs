use std::collections::HashMap;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::common::client::models::task::Task;
use crate::downloader::view::TaskView;

/// watch 命令使用的多进度条面板，每个 GID 一条
pub struct ProgressBoard {
    multi_pb: MultiProgress,
    bars: HashMap<String, ProgressBar>,
    style: ProgressStyle,
}

impl ProgressBoard {
    pub fn new() -> Self {
        let style = ProgressStyle::default_bar()
            .template("{prefix:.bold} [{bar:30.cyan/blue}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        Self {
            multi_pb: MultiProgress::new(),
            bars: HashMap::new(),
            style,
        }
    }

    /// 用新的快照刷新面板，快照中已经不存在的任务会被移除
    pub fn update(&mut self, tasks: &[Task]) {
        for task in tasks {
            let pb = self.bars.entry(task.gid.clone()).or_insert_with(|| {
                let pb = self.multi_pb.add(ProgressBar::new(0));
                pb.set_style(self.style.clone());
                pb
            });

            let total = task.total_length();
            pb.set_length(total);
            pb.set_position(task.completed_length().min(total));
            pb.set_prefix(task.title());
            pb.set_message(task.subtitle());
        }

        let gone: Vec<String> = self
            .bars
            .keys()
            .filter(|gid| !tasks.iter().any(|t| &t.gid == *gid))
            .cloned()
            .collect();
        for gid in gone {
            if let Some(pb) = self.bars.remove(&gid) {
                pb.finish_and_clear();
                self.multi_pb.remove(&pb);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn clear(&mut self) {
        for (_, pb) in self.bars.drain() {
            pb.finish_and_clear();
        }
        let _ = self.multi_pb.clear();
    }
}

impl Default for ProgressBoard {
    fn default() -> Self {
        Self::new()
    }
}
