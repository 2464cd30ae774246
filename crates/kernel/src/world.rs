use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use simspace_common::{EntityId, EntityKind, Pose};

/// An event record produced by every mutation to the world.
///
/// The event log is instrumentation over all state changes: hosts can drain
/// it per step to observe exactly which mutations a batch produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WorldEvent {
    /// Entity was created with the given kind, name and pose.
    Spawned {
        id: EntityId,
        kind: EntityKind,
        name: String,
        pose: Pose,
    },
    /// Entity was removed.
    Despawned {
        id: EntityId,
        kind: EntityKind,
        name: String,
    },
    /// Entity pose was updated.
    PoseChanged { id: EntityId, old: Pose, new: Pose },
    /// Simulation advanced one tick.
    Stepped { tick: u64 },
}

/// Errors from world mutations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error("a {kind} named {name:?} already exists")]
    DuplicateName { kind: EntityKind, name: String },
}

/// Per-entity data stored in the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityData {
    pub kind: EntityKind,
    pub name: String,
    pub pose: Pose,
}

/// The authoritative world state.
///
/// All mutations go through explicit operations. The kernel owns the truth;
/// the command executor and any host tooling derive from it.
///
/// Uses BTreeMap for deterministic iteration order. Entities are addressable
/// two ways: by id, and by (kind, name) through a secondary index. The index
/// is what gives the command pipeline its per-kind name uniqueness.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct World {
    entities: BTreeMap<EntityId, EntityData>,
    /// Secondary index: (kind, name) -> id. Kept in lockstep with `entities`.
    names: BTreeMap<(EntityKind, String), EntityId>,
    tick: u64,
    /// Append-only event log of all mutations.
    #[serde(skip)]
    event_log: Vec<WorldEvent>,
}

impl World {
    /// Create an empty world at tick 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulation tick.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Number of entities in the world.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Read-only access to all entities (BTreeMap for deterministic iteration).
    pub fn entities(&self) -> &BTreeMap<EntityId, EntityData> {
        &self.entities
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[WorldEvent] {
        &self.event_log
    }

    /// Create an entity. The (kind, name) pair must be free; callers resolve
    /// name conflicts before inserting, and the store still enforces it.
    pub fn spawn(
        &mut self,
        kind: EntityKind,
        name: impl Into<String>,
        pose: Pose,
    ) -> Result<EntityId, WorldError> {
        let name = name.into();
        if self.names.contains_key(&(kind, name.clone())) {
            return Err(WorldError::DuplicateName { kind, name });
        }
        let id = EntityId::new();
        self.names.insert((kind, name.clone()), id);
        self.entities.insert(
            id,
            EntityData {
                kind,
                name: name.clone(),
                pose,
            },
        );
        self.event_log.push(WorldEvent::Spawned {
            id,
            kind,
            name,
            pose,
        });
        Ok(id)
    }

    /// Remove an entity. Returns the data if it existed.
    pub fn despawn(&mut self, id: EntityId) -> Option<EntityData> {
        let data = self.entities.remove(&id);
        if let Some(ref d) = data {
            self.names.remove(&(d.kind, d.name.clone()));
            self.event_log.push(WorldEvent::Despawned {
                id,
                kind: d.kind,
                name: d.name.clone(),
            });
        }
        data
    }

    /// Get a reference to entity data.
    pub fn get(&self, id: EntityId) -> Option<&EntityData> {
        self.entities.get(&id)
    }

    /// Look up an entity by kind and name.
    pub fn find_by_kind_and_name(&self, kind: EntityKind, name: &str) -> Option<EntityId> {
        self.names.get(&(kind, name.to_owned())).copied()
    }

    /// Snapshot of all names currently in use by entities of one kind.
    pub fn names_of_kind(&self, kind: EntityKind) -> BTreeSet<String> {
        self.names
            .range((kind, String::new())..)
            .take_while(|((k, _), _)| *k == kind)
            .map(|((_, name), _)| name.clone())
            .collect()
    }

    /// Update an entity's pose and log the change.
    pub fn set_pose(&mut self, id: EntityId, new: Pose) -> bool {
        if let Some(data) = self.entities.get_mut(&id) {
            let old = data.pose;
            data.pose = new;
            self.event_log.push(WorldEvent::PoseChanged { id, old, new });
            true
        } else {
            false
        }
    }

    /// Advance the simulation by one tick.
    pub fn step(&mut self) {
        self.tick += 1;
        tracing::trace!(tick = self.tick, "world stepped");
        self.event_log.push(WorldEvent::Stepped { tick: self.tick });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_starts_empty() {
        let w = World::new();
        assert_eq!(w.tick(), 0);
        assert_eq!(w.entity_count(), 0);
    }

    #[test]
    fn spawn_and_despawn() {
        let mut w = World::new();
        let id = w
            .spawn(EntityKind::Model, "crate", Pose::default())
            .unwrap();
        assert_eq!(w.entity_count(), 1);
        assert!(w.get(id).is_some());

        let data = w.despawn(id);
        assert_eq!(data.unwrap().name, "crate");
        assert_eq!(w.entity_count(), 0);
        assert!(w.find_by_kind_and_name(EntityKind::Model, "crate").is_none());
    }

    #[test]
    fn duplicate_name_within_kind_rejected() {
        let mut w = World::new();
        w.spawn(EntityKind::Model, "crate", Pose::default()).unwrap();
        let err = w.spawn(EntityKind::Model, "crate", Pose::default());
        assert!(matches!(err, Err(WorldError::DuplicateName { .. })));
        assert_eq!(w.entity_count(), 1);
    }

    #[test]
    fn same_name_across_kinds_allowed() {
        let mut w = World::new();
        w.spawn(EntityKind::Model, "sun", Pose::default()).unwrap();
        w.spawn(EntityKind::Light, "sun", Pose::default()).unwrap();
        assert_eq!(w.entity_count(), 2);
    }

    #[test]
    fn find_by_kind_and_name_is_kind_scoped() {
        let mut w = World::new();
        let light = w.spawn(EntityKind::Light, "sun", Pose::default()).unwrap();
        assert_eq!(w.find_by_kind_and_name(EntityKind::Light, "sun"), Some(light));
        assert_eq!(w.find_by_kind_and_name(EntityKind::Model, "sun"), None);
    }

    #[test]
    fn names_of_kind_only_sees_that_kind() {
        let mut w = World::new();
        w.spawn(EntityKind::Model, "a", Pose::default()).unwrap();
        w.spawn(EntityKind::Model, "b", Pose::default()).unwrap();
        w.spawn(EntityKind::Light, "c", Pose::default()).unwrap();

        let models = w.names_of_kind(EntityKind::Model);
        assert_eq!(models.len(), 2);
        assert!(models.contains("a"));
        assert!(models.contains("b"));
        assert!(!models.contains("c"));
    }

    #[test]
    fn step_increments_tick() {
        let mut w = World::new();
        w.step();
        w.step();
        w.step();
        assert_eq!(w.tick(), 3);
    }

    #[test]
    fn set_pose_logs_event() {
        let mut w = World::new();
        let id = w.spawn(EntityKind::Model, "m", Pose::default()).unwrap();
        let new = Pose::from_xyz_rpy(1.0, 2.0, 3.0, 0.0, 0.0, 0.0);
        assert!(w.set_pose(id, new));
        assert_eq!(w.get(id).unwrap().pose.position, new.position);
        // spawn + pose change
        assert_eq!(w.events().len(), 2);
    }

    #[test]
    fn set_pose_on_missing_entity_is_false() {
        let mut w = World::new();
        assert!(!w.set_pose(EntityId::new(), Pose::default()));
        assert!(w.events().is_empty());
    }

    #[test]
    fn events_are_recorded() {
        let mut w = World::new();
        let id = w.spawn(EntityKind::Model, "m", Pose::default()).unwrap();
        w.step();
        w.despawn(id);
        assert_eq!(w.events().len(), 3); // spawn + step + despawn
    }

    #[test]
    fn drain_events_clears_log() {
        let mut w = World::new();
        w.spawn(EntityKind::Model, "m", Pose::default()).unwrap();
        let events = w.drain_events();
        assert_eq!(events.len(), 1);
        assert!(w.events().is_empty());
    }

    #[test]
    fn despawn_frees_the_name() {
        let mut w = World::new();
        let id = w.spawn(EntityKind::Model, "m", Pose::default()).unwrap();
        w.despawn(id);
        assert!(w.spawn(EntityKind::Model, "m", Pose::default()).is_ok());
    }
}
