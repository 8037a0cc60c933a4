//! Scripted viewer sessions.
//!
//! A script is a JSON array of steps, each applied at the start of its frame:
//!
//! ```json
//! [
//!   {"frame": 0, "action": {"add_cap": {"cap": {"latitude": 51.5, "longitude": -0.12}}}},
//!   {"frame": 3, "action": {"update_cap": {"index": 0, "field": {"facing": "SW"}}}},
//!   {"frame": 5, "action": {"set_rotate": {"enabled": true}}}
//! ]
//! ```
//!
//! Caps are addressed by their position in the current cap list.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use caps::{AreaClass, CapCommand, CapDescriptor, CapField, EditError, Facing};
use scene::components::{Color, ParseColorError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::viewer::Viewer;

/// New value for one cap field.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldEdit {
    Latitude(f64),
    Longitude(f64),
    Altitude(f64),
    AreaClass(AreaClass),
    Facing(Facing),
}

impl From<FieldEdit> for CapField {
    fn from(edit: FieldEdit) -> Self {
        match edit {
            FieldEdit::Latitude(v) => CapField::Latitude(v),
            FieldEdit::Longitude(v) => CapField::Longitude(v),
            FieldEdit::Altitude(v) => CapField::Altitude(v),
            FieldEdit::AreaClass(a) => CapField::AreaClass(a),
            FieldEdit::Facing(f) => CapField::Facing(f),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    AddCap {
        #[serde(default)]
        cap: Option<CapDescriptor>,
    },
    RemoveCap {
        index: usize,
    },
    UpdateCap {
        index: usize,
        field: FieldEdit,
    },
    Resize {
        width: f64,
        height: f64,
    },
    SetCameraDistance {
        distance_km: f64,
    },
    SetRotate {
        enabled: bool,
    },
    SetBackground {
        color: String,
    },
    SetWireframeColor {
        color: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    #[serde(default)]
    pub frame: u64,
    pub action: Action,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub steps: Vec<ScriptStep>,
}

#[derive(Debug)]
pub enum SessionError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
    NoCapAtIndex { frame: u64, index: usize },
    Edit { frame: u64, source: EditError },
    Color { frame: u64, source: ParseColorError },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Io { path, source } => write!(f, "read {}: {source}", path.display()),
            SessionError::Parse(err) => write!(f, "script parse error: {err}"),
            SessionError::NoCapAtIndex { frame, index } => {
                write!(f, "frame {frame}: no cap at index {index}")
            }
            SessionError::Edit { frame, source } => write!(f, "frame {frame}: {source}"),
            SessionError::Color { frame, source } => write!(f, "frame {frame}: {source}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Io { source, .. } => Some(source),
            SessionError::Parse(err) => Some(err),
            SessionError::NoCapAtIndex { .. } => None,
            SessionError::Edit { source, .. } => Some(source),
            SessionError::Color { source, .. } => Some(source),
        }
    }
}

impl Script {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let path = path.as_ref();
        let payload = fs::read_to_string(path).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&payload)
    }

    pub fn from_json(payload: &str) -> Result<Self, SessionError> {
        serde_json::from_str(payload).map_err(SessionError::Parse)
    }

    /// Number of frames needed to reach every step.
    pub fn span(&self) -> u64 {
        self.steps.iter().map(|s| s.frame + 1).max().unwrap_or(0)
    }
}

/// Runs `viewer` for `max(frames, script.span())` frames, applying each step
/// at the start of its frame. Steps sharing a frame run in script order.
///
/// Stops at the first step that fails; the viewer keeps whatever state the
/// earlier steps produced.
pub fn run_session(viewer: &mut Viewer, script: &Script, frames: u64) -> Result<(), SessionError> {
    let mut steps: Vec<&ScriptStep> = script.steps.iter().collect();
    steps.sort_by_key(|s| s.frame);
    let mut pending = steps.into_iter().peekable();

    let start = viewer.frame().index;
    let total = frames.max(script.span());
    info!(steps = script.steps.len(), frames = total, "session started");

    for _ in 0..total {
        let frame = viewer.frame().index - start;
        while let Some(step) = pending.next_if(|s| s.frame <= frame) {
            debug!(frame, action = ?step.action, "session step");
            apply_action(viewer, frame, &step.action)?;
        }
        viewer.advance();
    }

    info!(
        caps = viewer.caps().len(),
        frame = viewer.frame().index,
        events = viewer.events().events().len(),
        "session finished"
    );
    Ok(())
}

fn apply_action(viewer: &mut Viewer, frame: u64, action: &Action) -> Result<(), SessionError> {
    let cap_at = |viewer: &Viewer, index: usize| {
        viewer
            .caps()
            .id_at(index)
            .ok_or(SessionError::NoCapAtIndex { frame, index })
    };
    let edit = |source| SessionError::Edit { frame, source };
    let color = |hex: &str| Color::from_hex(hex).map_err(|source| SessionError::Color { frame, source });

    match action {
        Action::AddCap { cap } => {
            viewer.apply(CapCommand::Add(*cap)).map_err(edit)?;
        }
        Action::RemoveCap { index } => {
            let id = cap_at(&*viewer, *index)?;
            viewer.apply(CapCommand::Remove(id)).map_err(edit)?;
        }
        Action::UpdateCap { index, field } => {
            let id = cap_at(&*viewer, *index)?;
            viewer
                .apply(CapCommand::Update(id, (*field).into()))
                .map_err(edit)?;
        }
        Action::Resize { width, height } => viewer.resize(*width, *height),
        Action::SetCameraDistance { distance_km } => viewer.set_camera_distance(*distance_km),
        Action::SetRotate { enabled } => viewer.set_rotate_sphere(*enabled),
        Action::SetBackground { color: hex } => viewer.set_background(color(hex.as_str())?),
        Action::SetWireframeColor { color: hex } => viewer.set_wireframe_color(color(hex.as_str())?),
    }
    Ok(())
}
