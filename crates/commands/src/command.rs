use simspace_common::{EntityKind, Pose};
use simspace_descriptor::Descriptor;

/// A pending world mutation. Closed set, matched exhaustively by the
/// executor.
///
/// Commands are plain data describing what change should occur. They are
/// created by the gateway, held in the queue, and consumed exactly once by
/// the executor; a command is never re-enqueued.
#[derive(Debug, Clone)]
pub enum Command {
    /// Create an entity from a descriptor.
    Spawn(SpawnCommand),
    /// Update the pose of an existing entity, addressed by (kind, name).
    SetPose {
        kind: EntityKind,
        name: String,
        pose: Pose,
    },
    /// Remove an existing entity, addressed by (kind, name).
    Remove { kind: EntityKind, name: String },
}

/// Payload of a spawn command.
#[derive(Debug, Clone)]
pub struct SpawnCommand {
    /// Classified descriptor; the payload beyond kind/name/pose stays opaque.
    pub descriptor: Descriptor,
    /// Explicit name from the request; `None` means "use the descriptor's
    /// declared name".
    pub requested_name: Option<String>,
    /// Whether a name conflict may be resolved by suffixing instead of
    /// skipping.
    pub allow_renaming: bool,
    /// Pose from the request; applied after creation in preference to the
    /// descriptor's declared pose.
    pub pose_override: Option<Pose>,
}

impl SpawnCommand {
    /// The name resolution starts from: the request's explicit name when
    /// present, else the descriptor's declared name.
    pub fn base_name(&self) -> &str {
        self.requested_name
            .as_deref()
            .unwrap_or(&self.descriptor.name)
    }
}

/// A command plus its queue-assigned position in the process-wide total
/// order.
#[derive(Debug, Clone)]
pub struct QueuedCommand {
    pub sequence: u64,
    pub command: Command,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_command(requested: Option<&str>) -> SpawnCommand {
        SpawnCommand {
            descriptor: Descriptor::parse(r#"{"model": {"name": "declared"}}"#).unwrap(),
            requested_name: requested.map(str::to_owned),
            allow_renaming: false,
            pose_override: None,
        }
    }

    #[test]
    fn base_name_prefers_the_request() {
        assert_eq!(spawn_command(Some("explicit")).base_name(), "explicit");
    }

    #[test]
    fn base_name_falls_back_to_descriptor() {
        assert_eq!(spawn_command(None).base_name(), "declared");
    }
}
