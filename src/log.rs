//! Activity log: one line per CLI command, kept in the user data directory.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{KwError, Result};

const ERROR_MARK: &str = "ERROR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Info,
    Error,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Error => ERROR_MARK,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub command: String,
    pub keyword: Option<String>,
    pub details: Option<String>,
}

impl LogEntry {
    fn line(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.level.as_str(),
            self.command,
            self.keyword.as_deref().unwrap_or("*"),
            self.details.as_deref().unwrap_or("")
        )
        .trim_end()
        .to_string()
    }
}

#[derive(Debug, Clone)]
pub struct ActivityLog {
    path: PathBuf,
}

impl ActivityLog {
    /// Log at `<data dir>/kwlens/activity.log`, creating the directory.
    pub fn new() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "kwlens")
            .ok_or_else(|| KwError::Config("could not determine a data directory".to_string()))?;
        let dir = dirs.data_dir();
        fs::create_dir_all(dir)?;
        Ok(Self::at(dir.join("activity.log")))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn log(
        &self,
        level: LogLevel,
        command: &str,
        keyword: Option<&str>,
        details: Option<&str>,
    ) -> Result<()> {
        let entry = LogEntry {
            timestamp: Local::now(),
            level,
            command: command.to_string(),
            keyword: keyword.map(str::to_string),
            details: details.map(|d| d.replace('\n', " ")),
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", entry.line())?;
        Ok(())
    }

    /// Write failures are reported through tracing only.
    pub fn info(&self, command: &str, keyword: Option<&str>, details: Option<&str>) {
        if let Err(e) = self.log(LogLevel::Info, command, keyword, details) {
            tracing::debug!(error = %e, "activity log write failed");
        }
    }

    pub fn error(&self, command: &str, keyword: Option<&str>, details: Option<&str>) {
        if let Err(e) = self.log(LogLevel::Error, command, keyword, details) {
            tracing::debug!(error = %e, "activity log write failed");
        }
    }

    /// Matching lines, newest first.
    pub fn read_logs(&self, filter: Option<&str>, errors_only: bool) -> Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(vec![]);
        }

        let reader = BufReader::new(fs::File::open(&self.path)?);
        let mut lines = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let level = line.split_whitespace().nth(2);
            if errors_only && level != Some(ERROR_MARK) {
                continue;
            }
            if let Some(needle) = filter {
                if !line.contains(needle) {
                    continue;
                }
            }
            lines.push(line);
        }

        lines.reverse();
        Ok(lines)
    }
}
