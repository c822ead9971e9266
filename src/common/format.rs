/// 字节数格式化：B/KB 取整，MB/GB 保留两位小数，最大到 GB
pub fn format_size(bytes: f64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let max = UNITS.len() - 1;

    let mut value = bytes;
    let mut index = 0;
    while value > 1024.0 {
        value /= 1024.0;
        index += 1;
        if index >= max {
            break;
        }
    }

    if index < 2 {
        format!("{:.0} {}", value, UNITS[index])
    } else {
        format!("{:.2} {}", value, UNITS[index])
    }
}

/// 格式化 aria2 返回的数字字符串，无法解析时原样返回
pub fn format_size_str(raw: &str) -> String {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => format_size(value),
        _ => raw.to_string(),
    }
}

pub fn format_speed_str(raw: &str) -> String {
    format!("{}/s", format_size_str(raw))
}

/// 59 -> "59s", 60 -> "1m0s", 3661 -> "1h1m1s"
pub fn format_duration(secs: u64) -> String {
    if secs < 60 {
        return format!("{}s", secs);
    }
    let sec = secs % 60;
    let min = secs / 60;
    if min < 60 {
        return format!("{}m{}s", min, sec);
    }

    let hour = secs / 3600;
    format!("{}h{}m{}s", hour, min % 60, sec)
}
