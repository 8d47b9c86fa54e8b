use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;
use std::time::Duration;

/// Saturating counters describing engine activity.
#[derive(Debug, Default, Clone)]
pub struct EngineMetrics {
    drags_started: u64,
    commits: u64,
    noop_commits: u64,
    cancels: u64,
    pointer_moves: u64,
    rebuilds: u64,
    persist_writes: u64,
    persist_failures: u64,
}

impl EngineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_drag_started(&mut self) {
        self.drags_started = self.drags_started.saturating_add(1);
    }

    pub fn record_commit(&mut self) {
        self.commits = self.commits.saturating_add(1);
    }

    pub fn record_noop_commit(&mut self) {
        self.noop_commits = self.noop_commits.saturating_add(1);
    }

    pub fn record_cancel(&mut self) {
        self.cancels = self.cancels.saturating_add(1);
    }

    pub fn record_pointer_move(&mut self) {
        self.pointer_moves = self.pointer_moves.saturating_add(1);
    }

    pub fn record_rebuild(&mut self) {
        self.rebuilds = self.rebuilds.saturating_add(1);
    }

    pub fn record_persist(&mut self, ok: bool) {
        if ok {
            self.persist_writes = self.persist_writes.saturating_add(1);
        } else {
            self.persist_failures = self.persist_failures.saturating_add(1);
        }
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            drags_started: self.drags_started,
            commits: self.commits,
            noop_commits: self.noop_commits,
            cancels: self.cancels,
            pointer_moves: self.pointer_moves,
            rebuilds: self.rebuilds,
            persist_writes: self.persist_writes,
            persist_failures: self.persist_failures,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub drags_started: u64,
    pub commits: u64,
    pub noop_commits: u64,
    pub cancels: u64,
    pub pointer_moves: u64,
    pub rebuilds: u64,
    pub persist_writes: u64,
    pub persist_failures: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "engine_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        map.insert("drags_started".to_string(), json!(self.drags_started));
        map.insert("commits".to_string(), json!(self.commits));
        map.insert("noop_commits".to_string(), json!(self.noop_commits));
        map.insert("cancels".to_string(), json!(self.cancels));
        map.insert("pointer_moves".to_string(), json!(self.pointer_moves));
        map.insert("rebuilds".to_string(), json!(self.rebuilds));
        map.insert("persist_writes".to_string(), json!(self.persist_writes));
        map.insert("persist_failures".to_string(), json!(self.persist_failures));
        map
    }
}
