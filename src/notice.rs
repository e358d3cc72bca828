use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::error::DashError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    EmptyResult,
    UpstreamFailure,
    InvalidRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub kind: NoticeKind,
    pub title: String,
    pub body: String,
}

impl Notice {
    pub fn warning(kind: NoticeKind, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            kind,
            title: title.into(),
            body: body.into(),
        }
    }

    // Only validation messages are shown verbatim.
    pub fn from_error(error: &DashError, generic: &str) -> Self {
        match error {
            DashError::EmptyInput => Self::warning(
                NoticeKind::EmptyResult,
                "No results",
                "No recommendations matched your criteria.",
            ),
            DashError::InvalidRequest(message) => {
                Self::warning(NoticeKind::InvalidRequest, "Invalid input", message.clone())
            }
            DashError::UpstreamFailure { .. } | DashError::InvalidUrl(_) => {
                Self::warning(NoticeKind::UpstreamFailure, "Backend unavailable", generic)
            }
        }
    }
}

pub trait NoticeSink: Send + Sync {
    fn notify(&self, notice: &Notice);
}

pub struct StderrSink;

impl NoticeSink for StderrSink {
    fn notify(&self, notice: &Notice) {
        let level = match notice.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
        };
        eprintln!("[{level}] {} - {}", notice.title, notice.body);
    }
}

#[derive(Clone, Default)]
pub struct CollectingSink {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn kinds(&self) -> Vec<NoticeKind> {
        self.notices().into_iter().map(|n| n.kind).collect()
    }
}

impl NoticeSink for CollectingSink {
    fn notify(&self, notice: &Notice) {
        if let Ok(mut guard) = self.notices.lock() {
            guard.push(notice.clone());
        }
    }
}
