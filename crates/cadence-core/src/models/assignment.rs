//! Assignment records submitted by the assigner.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::TaskKind;
use crate::error::{PlannerError, Result};

/// A task descriptor handed to the engine by the assigner.
///
/// The engine owns nothing here: `command` is forwarded verbatim to the
/// executor and `metadata` is carried for the journal only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Assignment {
    /// Dedup key within the kind's collection
    pub id: String,

    /// Periodic or once
    #[serde(alias = "type")]
    pub kind: TaskKind,

    /// Duration literal such as `30s` or `1h`; ignored for once tasks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,

    /// Opaque command string
    pub command: String,

    /// Opaque annotations
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl Assignment {
    /// Build a periodic assignment.
    pub fn periodic(
        id: impl Into<String>,
        interval: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: TaskKind::Periodic,
            interval: Some(interval.into()),
            command: command.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Build a once assignment.
    pub fn once(id: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: TaskKind::Once,
            interval: None,
            command: command.into(),
            metadata: BTreeMap::new(),
        }
    }
}

/// Wire envelope used by the assigner: `{"tasks": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignmentBatch {
    pub tasks: Vec<Assignment>,
}

/// Parse an assignment payload.
///
/// Accepts either a bare JSON array of assignments or the `{"tasks": [...]}`
/// envelope.
pub fn parse_assignments(payload: &str) -> Result<Vec<Assignment>> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Payload {
        List(Vec<Assignment>),
        Batch(AssignmentBatch),
    }

    let payload: Payload = serde_json::from_str(payload).map_err(|e| {
        PlannerError::invalid_input("assignments").with_reason(e.to_string())
    })?;

    let assignments = match payload {
        Payload::List(list) => list,
        Payload::Batch(batch) => batch.tasks,
    };

    if let Some(blank) = assignments.iter().find(|a| a.id.trim().is_empty()) {
        return Err(PlannerError::invalid_input("id")
            .with_reason(format!("assignment with command '{}' has an empty id", blank.command)));
    }

    Ok(assignments)
}
