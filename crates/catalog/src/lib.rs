//! Canned descriptor documents for preset shapes.
//!
//! Pickers and tooling deal in preset identifiers; the command pipeline only
//! ever sees fully-formed descriptor documents. This crate is the boundary
//! between the two: a preset name goes in, a complete model descriptor comes
//! out. Unrecognized presets are logged and dropped, so no command is ever
//! produced for them.

use serde_json::json;

/// The preset identifiers with a canned descriptor.
pub const SHAPE_PRESETS: [&str; 5] = ["box", "sphere", "cylinder", "capsule", "ellipsoid"];

/// Build the descriptor document for a preset shape. Matching is
/// case-insensitive. Returns `None` for unknown presets.
pub fn shape_descriptor(preset: &str) -> Option<String> {
    let name = preset.to_ascii_lowercase();
    let geometry = match name.as_str() {
        "box" => json!({"box": {"size": [1.0, 1.0, 1.0]}}),
        "sphere" => json!({"sphere": {"radius": 0.5}}),
        "cylinder" => json!({"cylinder": {"radius": 0.5, "length": 1.0}}),
        "capsule" => json!({"capsule": {"radius": 0.2, "length": 0.6}}),
        "ellipsoid" => json!({"ellipsoid": {"radii": [0.2, 0.3, 0.5]}}),
        other => {
            tracing::warn!(
                preset = other,
                valid = ?SHAPE_PRESETS,
                "unknown shape preset, dropped"
            );
            return None;
        }
    };
    let document = json!({
        "model": {
            "name": name,
            "pose": [0.0, 0.0, 0.5, 0.0, 0.0, 0.0],
            "mass": 1.0,
            "geometry": geometry,
        }
    });
    Some(document.to_string())
}
