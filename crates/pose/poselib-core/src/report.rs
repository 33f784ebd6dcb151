//! Operator results handed back to the host UI.
//!
//! Failures never escape an operator as errors: they become a `Cancelled` report
//! carrying a warning the host can show in its status bar.

use serde::{Deserialize, Serialize};

use crate::error::PoseError;

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum OpStatus {
    Finished,
    Cancelled,
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReportLevel {
    Info,
    Warning,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub level: ReportLevel,
    pub text: String,
}

/// Outcome of one operator call.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct OpReport {
    pub status: OpStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
}

impl OpReport {
    /// Finished without anything to tell the user.
    pub fn finished() -> Self {
        Self {
            status: OpStatus::Finished,
            message: None,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        let text = text.into();
        log::info!("{text}");
        Self {
            status: OpStatus::Finished,
            message: Some(Message {
                level: ReportLevel::Info,
                text,
            }),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        let text = text.into();
        log::warn!("{text}");
        Self {
            status: OpStatus::Cancelled,
            message: Some(Message {
                level: ReportLevel::Warning,
                text,
            }),
        }
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.status == OpStatus::Finished
    }

    pub fn text(&self) -> Option<&str> {
        self.message.as_ref().map(|m| m.text.as_str())
    }

    pub fn level(&self) -> Option<ReportLevel> {
        self.message.as_ref().map(|m| m.level)
    }
}

impl From<PoseError> for OpReport {
    fn from(err: PoseError) -> Self {
        Self::warning(err.to_string())
    }
}
