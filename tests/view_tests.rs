use quick_downloader::common::format::{format_duration, format_size, format_size_str, format_speed_str};
use quick_downloader::downloader::{ETA_UNKNOWN, StatusFilter, TaskView};
use quick_downloader::{Task, TaskFile, TaskStatus};

fn task(status: TaskStatus, total: Option<&str>, completed: Option<&str>, speed: Option<&str>) -> Task {
    Task {
        gid: "2089b05ecca3d829".to_string(),
        status,
        total_length: total.map(str::to_string),
        completed_length: completed.map(str::to_string),
        download_speed: speed.map(str::to_string),
        ..Default::default()
    }
}

#[test]
fn test_progress_and_eta() {
    let t = task(TaskStatus::Active, Some("34896138"), Some("901120"), Some("15158"));

    assert!((t.progress() - 0.0258).abs() < 0.0001);
    assert_ne!(t.eta(), ETA_UNKNOWN);
    // (34896138 - 901120) / 15158 = 2242
    assert_eq!(t.eta_seconds(), Some(2242));
    assert_eq!(t.eta(), "37m22s");
}

#[test]
fn test_zero_or_missing_total() {
    let missing = task(TaskStatus::Active, None, Some("100"), Some("10"));
    assert_eq!(missing.progress(), 0.0);
    assert_eq!(missing.eta(), ETA_UNKNOWN);

    let zero = task(TaskStatus::Active, Some("0"), Some("0"), Some("0"));
    assert_eq!(zero.progress(), 0.0);
    assert_eq!(zero.eta(), ETA_UNKNOWN);

    // 大小未知但已经有速度
    let unknown_size = task(TaskStatus::Active, Some("0"), Some("0"), Some("15158"));
    assert_eq!(unknown_size.progress(), 0.0);
    assert_eq!(unknown_size.eta_seconds(), None);
    assert_eq!(unknown_size.eta(), ETA_UNKNOWN);
    assert_eq!(unknown_size.subtitle(), "15 KB/s - 0% - 0 B/0 B - ∞");
}

#[test]
fn test_eta_needs_positive_speed() {
    assert_eq!(task(TaskStatus::Active, Some("100"), Some("10"), Some("0")).eta(), ETA_UNKNOWN);
    assert_eq!(task(TaskStatus::Active, Some("100"), Some("10"), None).eta(), ETA_UNKNOWN);
    assert_eq!(task(TaskStatus::Active, Some("100"), Some("10"), Some("fast")).eta(), ETA_UNKNOWN);
}

#[test]
fn test_progress_is_clamped() {
    let t = task(TaskStatus::Active, Some("100"), Some("250"), Some("10"));
    assert_eq!(t.progress(), 1.0);
    assert_eq!(t.eta_seconds(), Some(0));
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(0), "0s");
    assert_eq!(format_duration(59), "59s");
    assert_eq!(format_duration(60), "1m0s");
    assert_eq!(format_duration(3599), "59m59s");
    assert_eq!(format_duration(3600), "1h0m0s");
    assert_eq!(format_duration(3661), "1h1m1s");
}

#[test]
fn test_format_size() {
    assert_eq!(format_size_str("512"), "512 B");
    assert_eq!(format_size_str("1024"), "1024 B");
    assert_eq!(format_size_str("2048"), "2 KB");
    assert_eq!(format_size(5.0 * 1024.0 * 1024.0), "5.00 MB");
    assert_eq!(format_size(3.5 * 1024.0 * 1024.0 * 1024.0), "3.50 GB");
    // 没有 TB，止于 GB
    assert_eq!(format_size(2048.0 * 1024.0 * 1024.0 * 1024.0), "2048.00 GB");
    assert_eq!(format_size_str("n/a"), "n/a");
    assert_eq!(format_speed_str("2048"), "2 KB/s");
}

#[test]
fn test_subtitle_active_shows_speed_and_eta() {
    let t = task(TaskStatus::Active, Some("2048"), Some("1024"), Some("512"));
    assert_eq!(t.subtitle(), "512 B/s - 50% - 1024 B/2 KB - 2s");
}

#[test]
fn test_subtitle_other_status() {
    let t = task(TaskStatus::Paused, Some("2048"), Some("1024"), Some("512"));
    assert_eq!(t.subtitle(), "paused - 50% - 1024 B/2 KB");

    let empty = task(TaskStatus::Waiting, None, None, None);
    assert_eq!(empty.subtitle(), "waiting - 0% - 0 B/0 B");
}

#[test]
fn test_title_and_file_path() {
    let mut t = task(TaskStatus::Complete, None, None, None);
    assert_eq!(t.title(), "2089b05ecca3d829");
    assert_eq!(t.file_path(), None);

    t.files = Some(vec![TaskFile {
        path: Some("/downloads/ubuntu.iso".to_string()),
        ..Default::default()
    }]);
    assert_eq!(t.title(), "ubuntu.iso");
    assert_eq!(t.file_path(), Some("/downloads/ubuntu.iso"));

    t.files = Some(vec![TaskFile {
        path: Some(String::new()),
        ..Default::default()
    }]);
    assert_eq!(t.title(), "2089b05ecca3d829");
    assert_eq!(t.file_path(), None);
}

#[test]
fn test_status_filter() {
    let all = [
        TaskStatus::Active,
        TaskStatus::Waiting,
        TaskStatus::Paused,
        TaskStatus::Error,
        TaskStatus::Complete,
        TaskStatus::Removed,
    ]
    .map(|s| task(s, None, None, None));

    let count = |f: StatusFilter| f.apply(&all).len();
    assert_eq!(count(StatusFilter::All), 6);
    assert_eq!(count(StatusFilter::Active), 3);
    assert_eq!(count(StatusFilter::Complete), 1);
    assert_eq!(count(StatusFilter::Error), 2);
}
