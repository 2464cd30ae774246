//! Descriptor classification for spawn requests.
//!
//! A descriptor is an opaque JSON document describing the entity to create.
//! The command pipeline extracts exactly three facts from it: the entity kind
//! (which root key is present), the declared name, and an optional declared
//! pose. Everything else in the document is payload for downstream consumers
//! and is never interpreted here.
//!
//! # Invariants
//! - Exactly one root kind key (`model` or `light`) per document.
//! - The declared name is non-empty.

use serde::Deserialize;
use simspace_common::{EntityKind, Pose};

/// Errors from classifying a descriptor. All of these surface as a rejected
/// submission at the gateway; none of them enter the command queue.
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    #[error("descriptor is empty")]
    Empty,
    #[error("descriptor is not a valid document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("descriptor declares no known entity kind")]
    UnknownKind,
    #[error("descriptor declares more than one entity kind")]
    AmbiguousKind,
    #[error("descriptor declares an empty name")]
    EmptyName,
}

/// The facts the command pipeline needs from a descriptor document.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    pub kind: EntityKind,
    /// Name declared by the document's root entity. Used as the default
    /// spawn name when the request does not override it.
    pub name: String,
    /// Pose declared by the document, if any. Applied when the request
    /// carries no pose override.
    pub pose: Option<Pose>,
}

#[derive(Deserialize)]
struct Document {
    model: Option<Declaration>,
    light: Option<Declaration>,
}

#[derive(Deserialize)]
struct Declaration {
    name: String,
    #[serde(default)]
    pose: Option<[f32; 6]>,
}

impl Descriptor {
    /// Classify a descriptor document.
    pub fn parse(text: &str) -> Result<Self, DescriptorError> {
        if text.trim().is_empty() {
            return Err(DescriptorError::Empty);
        }
        let doc: Document = serde_json::from_str(text)?;
        let (kind, decl) = match (doc.model, doc.light) {
            (Some(decl), None) => (EntityKind::Model, decl),
            (None, Some(decl)) => (EntityKind::Light, decl),
            (Some(_), Some(_)) => return Err(DescriptorError::AmbiguousKind),
            (None, None) => return Err(DescriptorError::UnknownKind),
        };
        if decl.name.trim().is_empty() {
            return Err(DescriptorError::EmptyName);
        }
        let pose = decl
            .pose
            .map(|[x, y, z, roll, pitch, yaw]| Pose::from_xyz_rpy(x, y, z, roll, pitch, yaw));
        Ok(Self {
            kind,
            name: decl.name,
            pose,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn classifies_a_model() {
        let d = Descriptor::parse(
            r#"{"model": {"name": "crate", "geometry": {"box": {"size": [1, 1, 1]}}}}"#,
        )
        .unwrap();
        assert_eq!(d.kind, EntityKind::Model);
        assert_eq!(d.name, "crate");
        assert!(d.pose.is_none());
    }

    #[test]
    fn classifies_a_light() {
        let d = Descriptor::parse(r#"{"light": {"name": "sun", "type": "directional"}}"#).unwrap();
        assert_eq!(d.kind, EntityKind::Light);
        assert_eq!(d.name, "sun");
    }

    #[test]
    fn extracts_declared_pose() {
        let d =
            Descriptor::parse(r#"{"model": {"name": "box", "pose": [0, 0, 0.5, 0, 0, 0]}}"#)
                .unwrap();
        let pose = d.pose.unwrap();
        assert_eq!(pose.position, Vec3::new(0.0, 0.0, 0.5));
    }

    #[test]
    fn empty_input_rejected() {
        assert!(matches!(
            Descriptor::parse("   "),
            Err(DescriptorError::Empty)
        ));
    }

    #[test]
    fn invalid_document_rejected() {
        assert!(matches!(
            Descriptor::parse("<model name='box'/>"),
            Err(DescriptorError::Parse(_))
        ));
    }

    #[test]
    fn unknown_kind_rejected() {
        assert!(matches!(
            Descriptor::parse(r#"{"actor": {"name": "walker"}}"#),
            Err(DescriptorError::UnknownKind)
        ));
    }

    #[test]
    fn two_kinds_rejected() {
        let text = r#"{"model": {"name": "a"}, "light": {"name": "b"}}"#;
        assert!(matches!(
            Descriptor::parse(text),
            Err(DescriptorError::AmbiguousKind)
        ));
    }

    #[test]
    fn blank_name_rejected() {
        assert!(matches!(
            Descriptor::parse(r#"{"model": {"name": "  "}}"#),
            Err(DescriptorError::EmptyName)
        ));
    }

    #[test]
    fn payload_fields_are_opaque() {
        // Geometry, materials, anything else: ignored, never an error.
        let d = Descriptor::parse(
            r#"{"model": {"name": "m", "mass": 1.0, "links": [{"name": "l"}]}}"#,
        )
        .unwrap();
        assert_eq!(d.name, "m");
    }
}
