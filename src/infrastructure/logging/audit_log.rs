//! Bounded in-memory operation log with `tracing` mirroring.
//!
//! The registry notifies this log of every operation outcome. It is purely
//! informational: correctness never depends on it, and the registry works
//! without one attached.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;
use uuid::Uuid;

/// Severity of an audit entry.
///
/// Ordered so that `min_level` filtering can compare directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for AuditLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        };
        f.write_str(s)
    }
}

/// A structured record of one operation outcome.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub level: AuditLevel,
    pub component: String,
    pub action: String,
    pub message: String,
    pub details: Value,
}

/// Per-level entry counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AuditStats {
    pub total: usize,
    pub debug: usize,
    pub info: usize,
    pub warn: usize,
    pub error: usize,
}

/// Bounded circular buffer of audit entries.
///
/// Recording appends an entry, drops the oldest entries beyond `capacity`,
/// and mirrors the entry to `tracing` when it meets `min_level`. Entries
/// below `min_level` are still stored; the level gate only controls
/// mirroring, matching how the original kept every record while muting
/// console noise.
pub struct AuditLog {
    capacity: usize,
    min_level: AuditLevel,
    entries: Mutex<VecDeque<AuditEntry>>,
}

impl AuditLog {
    /// Creates a log retaining at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            min_level: AuditLevel::Debug,
            entries: Mutex::new(VecDeque::new()),
        }
    }

    /// Sets the minimum level mirrored to `tracing`.
    pub fn with_min_level(mut self, level: AuditLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Records one entry.
    pub fn record(
        &self,
        level: AuditLevel,
        component: &str,
        action: &str,
        message: impl Into<String>,
        details: Value,
    ) -> AuditEntry {
        let entry = AuditEntry {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            level,
            component: component.to_string(),
            action: action.to_string(),
            message: message.into(),
            details,
        };

        {
            let mut entries = self.entries.lock().expect("audit log mutex poisoned");
            entries.push_back(entry.clone());
            while entries.len() > self.capacity {
                entries.pop_front();
            }
        }

        if level >= self.min_level {
            self.mirror(&entry);
        }

        entry
    }

    pub fn debug(&self, component: &str, action: &str, message: impl Into<String>, details: Value) {
        self.record(AuditLevel::Debug, component, action, message, details);
    }

    pub fn info(&self, component: &str, action: &str, message: impl Into<String>, details: Value) {
        self.record(AuditLevel::Info, component, action, message, details);
    }

    pub fn warn(&self, component: &str, action: &str, message: impl Into<String>, details: Value) {
        self.record(AuditLevel::Warn, component, action, message, details);
    }

    pub fn error(&self, component: &str, action: &str, message: impl Into<String>, details: Value) {
        self.record(AuditLevel::Error, component, action, message, details);
    }

    fn mirror(&self, entry: &AuditEntry) {
        match entry.level {
            AuditLevel::Debug => tracing::debug!(
                component = %entry.component,
                action = %entry.action,
                details = %entry.details,
                "{}",
                entry.message
            ),
            AuditLevel::Info => tracing::info!(
                component = %entry.component,
                action = %entry.action,
                details = %entry.details,
                "{}",
                entry.message
            ),
            AuditLevel::Warn => tracing::warn!(
                component = %entry.component,
                action = %entry.action,
                details = %entry.details,
                "{}",
                entry.message
            ),
            AuditLevel::Error => tracing::error!(
                component = %entry.component,
                action = %entry.action,
                details = %entry.details,
                "{}",
                entry.message
            ),
        }
    }

    /// Returns entries, newest first, optionally filtered by level and/or
    /// component.
    pub fn entries(
        &self,
        level: Option<AuditLevel>,
        component: Option<&str>,
    ) -> Vec<AuditEntry> {
        let entries = self.entries.lock().expect("audit log mutex poisoned");

        entries
            .iter()
            .rev()
            .filter(|e| level.is_none_or(|l| e.level == l))
            .filter(|e| component.is_none_or(|c| e.component == c))
            .cloned()
            .collect()
    }

    /// Per-level counts over the retained entries.
    pub fn stats(&self) -> AuditStats {
        let entries = self.entries.lock().expect("audit log mutex poisoned");

        let mut stats = AuditStats {
            total: entries.len(),
            ..AuditStats::default()
        };
        for entry in entries.iter() {
            match entry.level {
                AuditLevel::Debug => stats.debug += 1,
                AuditLevel::Info => stats.info += 1,
                AuditLevel::Warn => stats.warn += 1,
                AuditLevel::Error => stats.error += 1,
            }
        }

        stats
    }

    /// Drops all retained entries.
    pub fn clear(&self) {
        self.entries
            .lock()
            .expect("audit log mutex poisoned")
            .clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("audit log mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
