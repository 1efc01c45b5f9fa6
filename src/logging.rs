use std::io::Write;
use std::path::{Path, PathBuf};

use log::{LevelFilter, SetLoggerError};
use serde::Serialize;
use simplelog::{ColorChoice, TermLogger, TerminalMode};

/// Install a terminal logger on stderr for the `log` records emitted by
/// shell invocations.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
}

/// Whether the streams of an invocation were captured or inherited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Capture,
    Inherit,
}

#[derive(Debug, Serialize)]
struct ExecutionRecord<'a> {
    ts: &'a str,
    mode: Mode,
    code: i32,
    command: &'a str,
}

/// Expand a leading `~` in a configured path.
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}

/// Append an execution record to `path` as one JSON line.
/// Best-effort: failures are silently ignored (logging must never fail a run).
pub fn log_execution(path: &Path, mode: Mode, command: &str, code: i32) {
    if let Some(dir) = path.parent() {
        let _ = std::fs::create_dir_all(dir);
    }
    let Ok(mut file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
    else {
        return;
    };

    let cmd_truncated: String = command.chars().take(200).collect();
    let ts = timestamp_now();
    let record = ExecutionRecord {
        ts: &ts,
        mode,
        code,
        command: &cmd_truncated,
    };
    let Ok(line) = serde_json::to_string(&record) else {
        return;
    };
    let _ = writeln!(file, "{line}");
}

/// Simple UTC timestamp without external deps.
fn timestamp_now() -> String {
    let dur = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = dur.as_secs();
    let days = secs / 86400;
    let rem = secs % 86400;
    let h = rem / 3600;
    let m = (rem % 3600) / 60;
    let s = rem % 60;
    let (year, month, day) = epoch_days_to_date(days);
    format!("{year:04}-{month:02}-{day:02}T{h:02}:{m:02}:{s:02}Z")
}

/// Convert days since Unix epoch to (year, month, day).
fn epoch_days_to_date(days: u64) -> (u64, u64, u64) {
    // Civil calendar from days algorithm (Howard Hinnant)
    let z = days + 719468;
    let era = z / 146097;
    let doe = z - era * 146097;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y, m, d)
}
