use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an entity in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

/// Category of a world entity. Name uniqueness is scoped per kind: a model
/// and a light may share a name, two models may not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Model,
    Light,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Model => write!(f, "model"),
            Self::Light => write!(f, "light"),
        }
    }
}

/// Rigid 6-DOF pose: position plus orientation.
///
/// Descriptors and requests carry poses as six scalars (x y z roll pitch yaw);
/// internally the rotation is a quaternion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    /// Build a pose from the six-scalar form used at the submission boundary.
    pub fn from_xyz_rpy(x: f32, y: f32, z: f32, roll: f32, pitch: f32, yaw: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            rotation: Quat::from_euler(EulerRot::ZYX, yaw, pitch, roll),
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_id_uniqueness() {
        let a = EntityId::new();
        let b = EntityId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn pose_default_is_identity() {
        let p = Pose::default();
        assert_eq!(p.position, Vec3::ZERO);
        assert_eq!(p.rotation, Quat::IDENTITY);
    }

    #[test]
    fn pose_from_translation_only() {
        let p = Pose::from_xyz_rpy(1.0, 2.0, 3.0, 0.0, 0.0, 0.0);
        assert_eq!(p.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(p.rotation, Quat::IDENTITY);
    }

    #[test]
    fn kind_display_names() {
        assert_eq!(EntityKind::Model.to_string(), "model");
        assert_eq!(EntityKind::Light.to_string(), "light");
    }

    #[test]
    fn kind_ordering_is_total() {
        let mut kinds = vec![EntityKind::Light, EntityKind::Model];
        kinds.sort();
        assert_eq!(kinds, vec![EntityKind::Model, EntityKind::Light]);
    }
}
