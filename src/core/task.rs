//! Task descriptors and the TaskGPT definition syntax.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::color::Color;

/// Key under which the host registers a spawned task.
///
/// Bodies carry this key instead of the task itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TaskError {
    #[error("task name must not be empty")]
    EmptyName,
    #[error("session duration must be a positive number, got {0}")]
    InvalidDuration(f32),
    #[error("session count must be at least 1")]
    ZeroSessions,
}

/// A task shown as `session_count` circles of radius `session_duration`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TaskFields", rename_all = "camelCase")]
pub struct Task {
    name: String,
    color: Color,
    session_duration: f32,
    session_count: u32,
}

impl Task {
    pub fn new(
        name: impl Into<String>,
        color: Color,
        session_duration: f32,
        session_count: u32,
    ) -> Result<Self, TaskError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TaskError::EmptyName);
        }
        if !session_duration.is_finite() || session_duration <= 0.0 {
            return Err(TaskError::InvalidDuration(session_duration));
        }
        if session_count == 0 {
            return Err(TaskError::ZeroSessions);
        }

        Ok(Self {
            name,
            color,
            session_duration,
            session_count,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Session length, also used as the circle radius in pixels.
    pub fn session_duration(&self) -> f32 {
        self.session_duration
    }

    pub fn session_count(&self) -> u32 {
        self.session_count
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskFields {
    name: String,
    color: Color,
    session_duration: f32,
    session_count: u32,
}

impl TryFrom<TaskFields> for Task {
    type Error = TaskError;

    fn try_from(fields: TaskFields) -> Result<Self, Self::Error> {
        Task::new(
            fields.name,
            fields.color,
            fields.session_duration,
            fields.session_count,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DefinitionError {
    #[error("reply is not a TaskGPT task definition")]
    NotADefinition,
    #[error(transparent)]
    Task(#[from] TaskError),
}

/// A colorless task parsed from an assistant reply such as
/// `"Learn Little Wing by Jimi Hendrix, 30, 3"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDefinition {
    pub name: String,
    pub session_duration: f32,
    pub session_count: u32,
}

fn definition_regex() -> &'static Regex {
    static CACHED: OnceLock<Regex> = OnceLock::new();
    CACHED.get_or_init(|| {
        Regex::new(
            r#"^\s*"?\s*(?P<name>.+?)\s*,\s*(?P<duration>\d+(?:\.\d+)?)\s*,\s*(?P<count>\d+)\s*"?\s*\.?\s*$"#,
        )
        .expect("definition regex must compile")
    })
}

impl TaskDefinition {
    /// Parses `name, duration, count`, optionally wrapped in double quotes.
    ///
    /// The name may itself contain commas; the last two fields are numeric.
    pub fn parse(reply: &str) -> Result<Self, DefinitionError> {
        let captures = definition_regex()
            .captures(reply)
            .ok_or(DefinitionError::NotADefinition)?;

        let name = captures["name"].trim_matches('"').trim();
        let session_duration: f32 = captures["duration"]
            .parse()
            .map_err(|_| DefinitionError::NotADefinition)?;
        let session_count: u32 = captures["count"]
            .parse()
            .map_err(|_| DefinitionError::NotADefinition)?;

        if name.is_empty() {
            return Err(TaskError::EmptyName.into());
        }
        if !session_duration.is_finite() || session_duration <= 0.0 {
            return Err(TaskError::InvalidDuration(session_duration).into());
        }
        if session_count == 0 {
            return Err(TaskError::ZeroSessions.into());
        }

        Ok(Self {
            name: name.to_string(),
            session_duration,
            session_count,
        })
    }

    pub fn into_task(self, color: Color) -> Result<Task, TaskError> {
        Task::new(self.name, color, self.session_duration, self.session_count)
    }
}
