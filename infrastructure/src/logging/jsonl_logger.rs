//! JSONL run transcript.
//!
//! Every [`RunEvent`] becomes one JSON line carrying `type`, `timestamp`,
//! `run` (the id of the logger's run) and `seq`. The file is opened in
//! append mode so several runs can share one transcript.

use scout_application::{RunEvent, RunLogger};
use serde_json::{Value, json};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;

pub struct JsonlRunLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
    run_id: String,
    seq: AtomicU64,
}

impl JsonlRunLogger {
    /// Open (or create) the transcript at `path`, creating parent
    /// directories. Returns `None` when the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create transcript directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open transcript {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
            run_id: chrono::Utc::now().format("%Y%m%dT%H%M%S%.3fZ").to_string(),
            seq: AtomicU64::new(0),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    fn record(&self, event: RunEvent) -> Value {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);

        let mut map = match event.payload {
            Value::Object(map) => map,
            other => {
                let mut map = serde_json::Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        map.insert("type".to_string(), json!(event.event_type));
        map.insert("timestamp".to_string(), json!(timestamp));
        map.insert("run".to_string(), json!(self.run_id));
        map.insert("seq".to_string(), json!(seq));
        Value::Object(map)
    }
}

impl RunLogger for JsonlRunLogger {
    fn log(&self, event: RunEvent) {
        let Ok(line) = serde_json::to_string(&self.record(event)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlRunLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn read_lines(path: &Path) -> Vec<Value> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_record_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs").join("scout.jsonl");
        let logger = JsonlRunLogger::open(&path).unwrap();

        logger.log(RunEvent::new(
            "plan_output",
            json!({ "query": "What is MCP?", "output": "{\"action\":\"search_web\"}" }),
        ));
        logger.log(RunEvent::new(
            "tool_call",
            json!({ "tool": "search_web", "status": "ok" }),
        ));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["type"], "plan_output");
        assert_eq!(records[0]["query"], "What is MCP?");
        assert_eq!(records[0]["seq"], 0);
        assert_eq!(records[1]["type"], "tool_call");
        assert_eq!(records[1]["seq"], 1);
        assert_eq!(records[0]["run"], records[1]["run"]);
        assert!(records[1]["timestamp"].is_string());
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.jsonl");
        let logger = JsonlRunLogger::open(&path).unwrap();

        logger.log(RunEvent::new("final_answer", json!("plain text")));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records[0]["type"], "final_answer");
        assert_eq!(records[0]["data"], "plain text");
    }

    #[test]
    fn test_appends_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.jsonl");

        for _ in 0..2 {
            let logger = JsonlRunLogger::open(&path).unwrap();
            logger.log(RunEvent::new("final_answer", json!({ "answer": "x" })));
        }

        assert_eq!(read_lines(&path).len(), 2);
    }

    #[test]
    fn test_unopenable_path_is_none() {
        let dir = tempfile::tempdir().unwrap();
        // a directory cannot be opened as a file
        assert!(JsonlRunLogger::open(dir.path()).is_none());
    }
}
