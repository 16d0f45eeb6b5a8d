use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::bounds::{Offset, DEFAULT_ORIGIN_OFFSET, DEFAULT_TOLERANCE_OFFSET};
use crate::geometry::CollisionMode;
use crate::snap::{SnapOptions, GRID_SIZE_DEFAULT, GRID_SIZE_MAX};
use crate::transition::{TRANSITION_MS_DEFAULT, TRANSITION_MS_MAX, TRANSITION_MS_MIN};

pub const TOLERANCE_MAX: f64 = 200.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionOptions {
    pub enabled: bool,
    pub mode: CollisionMode,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragOptions {
    pub collision: CollisionOptions,
    pub snap: SnapOptions,
}

impl Default for DragOptions {
    fn default() -> Self {
        Self {
            collision: CollisionOptions {
                enabled: false,
                mode: CollisionMode::Rectangle,
            },
            snap: SnapOptions::default(),
        }
    }
}

/// Rotation never snaps, so only collision settings apply.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotateOptions {
    #[serde(deserialize_with = "deserialize_rotate_collision")]
    pub collision: CollisionOptions,
}

impl Default for RotateOptions {
    fn default() -> Self {
        Self {
            collision: CollisionOptions {
                enabled: false,
                mode: CollisionMode::Obb,
            },
        }
    }
}

/// Same shape as `CollisionOptions`, but a missing `mode` reads as `obb`.
#[derive(Deserialize)]
#[serde(default)]
struct RotateCollisionFields {
    enabled: bool,
    mode: CollisionMode,
}

impl Default for RotateCollisionFields {
    fn default() -> Self {
        let collision = RotateOptions::default().collision;
        Self {
            enabled: collision.enabled,
            mode: collision.mode,
        }
    }
}

fn deserialize_rotate_collision<'de, D>(deserializer: D) -> Result<CollisionOptions, D::Error>
where
    D: Deserializer<'de>,
{
    let fields = RotateCollisionFields::deserialize(deserializer)?;
    Ok(CollisionOptions {
        enabled: fields.enabled,
        mode: fields.mode,
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundsOptions {
    pub origin: Offset,
    pub tolerance: Offset,
}

impl Default for BoundsOptions {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN_OFFSET,
            tolerance: DEFAULT_TOLERANCE_OFFSET,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardOptions {
    pub drag: DragOptions,
    pub rotate: RotateOptions,
    pub bounds: BoundsOptions,
    pub transition_ms: f64,
}

impl Default for BoardOptions {
    fn default() -> Self {
        Self {
            drag: DragOptions::default(),
            rotate: RotateOptions::default(),
            bounds: BoundsOptions::default(),
            transition_ms: TRANSITION_MS_DEFAULT,
        }
    }
}

impl BoardOptions {
    pub fn from_json(raw: &str) -> Result<Self, OptionsError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(OptionsError::Empty);
        }
        let options: BoardOptions =
            serde_json::from_str(raw).map_err(|err| OptionsError::Parse(err.to_string()))?;
        Ok(options.sanitized())
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn sanitized(mut self) -> Self {
        self.drag.snap = sanitize_snap(self.drag.snap);
        self.bounds.tolerance = Offset {
            x: sanitize_tolerance(self.bounds.tolerance.x),
            y: sanitize_tolerance(self.bounds.tolerance.y),
        };
        self.bounds.origin = Offset {
            x: finite_or(self.bounds.origin.x, DEFAULT_ORIGIN_OFFSET.x),
            y: finite_or(self.bounds.origin.y, DEFAULT_ORIGIN_OFFSET.y),
        };
        self.transition_ms = if self.transition_ms.is_finite() {
            self.transition_ms.clamp(TRANSITION_MS_MIN, TRANSITION_MS_MAX)
        } else {
            TRANSITION_MS_DEFAULT
        };
        self
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

fn sanitize_snap(snap: SnapOptions) -> SnapOptions {
    let grid_size = finite_or(snap.grid_size, GRID_SIZE_DEFAULT).min(GRID_SIZE_MAX);
    SnapOptions {
        enabled: snap.enabled && grid_size > 0.0,
        grid_size,
    }
}

fn sanitize_tolerance(value: f64) -> f64 {
    finite_or(value, 0.0).clamp(0.0, TOLERANCE_MAX)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    Empty,
    Parse(String),
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionsError::Empty => write!(f, "board options are empty"),
            OptionsError::Parse(message) => write!(f, "invalid board options: {message}"),
        }
    }
}

impl std::error::Error for OptionsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_gesture_kind() {
        let options = BoardOptions::default();
        assert_eq!(options.drag.collision.mode, CollisionMode::Rectangle);
        assert!(options.drag.snap.enabled);
        assert_eq!(options.drag.snap.grid_size, 6.0);
        assert_eq!(options.rotate.collision.mode, CollisionMode::Obb);
        assert_eq!(options.bounds.origin, Offset::new(0.0, 10.0));
        assert_eq!(options.bounds.tolerance, Offset::new(0.0, 10.0));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let options = BoardOptions::from_json(
            r#"{"drag": {"collision": {"enabled": true, "mode": "circle"}}, "transition_ms": 120}"#,
        )
        .expect("options");
        assert!(options.drag.collision.enabled);
        assert_eq!(options.drag.collision.mode, CollisionMode::Circle);
        assert!(options.drag.snap.enabled);
        assert_eq!(options.rotate.collision.mode, CollisionMode::Obb);
        assert_eq!(options.transition_ms, 120.0);
    }

    #[test]
    fn partial_rotate_json_keeps_obb() {
        let options =
            BoardOptions::from_json(r#"{"rotate": {"collision": {"enabled": true}}}"#).expect("options");
        assert!(options.rotate.collision.enabled);
        assert_eq!(options.rotate.collision.mode, CollisionMode::Obb);
        let options = BoardOptions::from_json(r#"{"rotate": {}}"#).expect("options");
        assert_eq!(options.rotate, RotateOptions::default());
    }

    #[test]
    fn rotate_snap_is_not_part_of_the_schema() {
        let json = BoardOptions::default().to_json();
        let value: serde_json::Value = serde_json::from_str(&json).expect("json");
        assert!(value["rotate"].get("snap").is_none());
        assert!(value["drag"].get("snap").is_some());
    }

    #[test]
    fn unknown_mode_falls_back_to_rectangle() {
        let options =
            BoardOptions::from_json(r#"{"rotate": {"collision": {"mode": "polygon"}}}"#).expect("options");
        assert_eq!(options.rotate.collision.mode, CollisionMode::Rectangle);
    }

    #[test]
    fn sanitize_clamps_numbers() {
        let options = BoardOptions::from_json(
            r#"{"drag": {"snap": {"enabled": true, "grid_size": -3}}, "transition_ms": 99999,
                "bounds": {"tolerance": {"x": -5, "y": 1000}}}"#,
        )
        .expect("options");
        assert!(!options.drag.snap.enabled);
        assert_eq!(options.transition_ms, TRANSITION_MS_MAX);
        assert_eq!(options.bounds.tolerance, Offset::new(0.0, TOLERANCE_MAX));
    }

    #[test]
    fn bad_json_reports_error() {
        assert_eq!(BoardOptions::from_json("  "), Err(OptionsError::Empty));
        let err = BoardOptions::from_json("{nope").expect_err("parse error");
        assert!(err.to_string().starts_with("invalid board options"));
    }

    #[test]
    fn json_round_trips_mode_names() {
        let json = BoardOptions::default().to_json();
        assert!(json.contains("\"rectangle\""));
        assert!(json.contains("\"obb\""));
    }
}
