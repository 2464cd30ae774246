use std::sync::Arc;

use simspace_common::{EntityKind, Pose};
use simspace_kernel::World;

use crate::command::{Command, SpawnCommand};
use crate::naming::{NameResolution, resolve_name};
use crate::queue::CommandQueue;

/// Applies queued commands to the world, once per simulation step.
///
/// The host invokes [`CommandExecutor::apply`] at a fixed pre-update phase,
/// before the rest of the step's logic. Everything drained is applied or
/// skipped within that same step, in sequence order; nothing is deferred and
/// nothing applies early.
pub struct CommandExecutor {
    queue: Arc<CommandQueue>,
}

impl CommandExecutor {
    pub fn new(queue: Arc<CommandQueue>) -> Self {
        Self { queue }
    }

    /// Drain this step's batch and apply it in sequence order.
    ///
    /// A command that cannot be applied is skipped; it never aborts the rest
    /// of the batch or the step.
    pub fn apply(&self, world: &mut World) {
        let batch = self.queue.drain_all();
        if batch.is_empty() {
            return;
        }
        let _span =
            tracing::debug_span!("apply_commands", tick = world.tick(), batch = batch.len())
                .entered();
        for queued in batch {
            match queued.command {
                Command::Spawn(spawn) => apply_spawn(world, queued.sequence, spawn),
                Command::SetPose { kind, name, pose } => {
                    match world.find_by_kind_and_name(kind, &name) {
                        Some(id) => {
                            world.set_pose(id, pose);
                            tracing::debug!(sequence = queued.sequence, %kind, %name, "pose set");
                        }
                        None => {
                            tracing::debug!(
                                sequence = queued.sequence,
                                %kind,
                                %name,
                                "no such entity, pose command skipped"
                            );
                        }
                    }
                }
                Command::Remove { kind, name } => {
                    match world.find_by_kind_and_name(kind, &name) {
                        Some(id) => {
                            world.despawn(id);
                            tracing::debug!(sequence = queued.sequence, %kind, %name, "removed");
                        }
                        None => {
                            tracing::debug!(
                                sequence = queued.sequence,
                                %kind,
                                %name,
                                "no such entity, remove skipped"
                            );
                        }
                    }
                }
            }
        }
    }
}

fn apply_spawn(world: &mut World, sequence: u64, spawn: SpawnCommand) {
    let kind = spawn.descriptor.kind;
    // Recomputed per command: spawns earlier in the batch are visible to
    // later ones when their names resolve.
    let existing = world.names_of_kind(kind);
    match resolve_name(spawn.base_name(), &existing, spawn.allow_renaming) {
        NameResolution::Accepted(name) => {
            let pose = spawn
                .pose_override
                .or(spawn.descriptor.pose)
                .unwrap_or_else(|| default_spawn_pose(kind));
            match world.spawn(kind, name.clone(), pose) {
                Ok(id) => {
                    tracing::debug!(sequence, %kind, %name, id = ?id.0, "spawned");
                }
                Err(err) => {
                    tracing::error!(sequence, %kind, %name, %err, "spawn failed");
                }
            }
        }
        NameResolution::Conflict => {
            // Designed no-op: the submitter already received its
            // acknowledgment at enqueue time.
            tracing::debug!(sequence, %kind, name = spawn.base_name(), "name taken, spawn skipped");
        }
    }
}

/// Pose used when neither the request nor the descriptor declares one.
pub fn default_spawn_pose(kind: EntityKind) -> Pose {
    match kind {
        EntityKind::Model => Pose::default(),
        // Lights start overhead rather than inside the ground plane.
        EntityKind::Light => Pose::from_xyz_rpy(0.0, 0.0, 10.0, 0.0, 0.0, 0.0),
    }
}
