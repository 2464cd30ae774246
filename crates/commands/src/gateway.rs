use std::sync::Arc;

use serde::Deserialize;
use simspace_common::{EntityKind, Pose};
use simspace_descriptor::{Descriptor, DescriptorError};

use crate::command::{Command, SpawnCommand};
use crate::queue::CommandQueue;

/// A submission payload, as it arrives from external callers.
///
/// Poses cross the boundary in the six-scalar form (x y z roll pitch yaw),
/// matching the descriptor document format.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    Spawn(SpawnRequest),
    SetPose(SetPoseRequest),
    Remove(RemoveRequest),
}

/// Request to create an entity from a descriptor document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpawnRequest {
    /// Opaque descriptor text; must classify into a known kind.
    pub descriptor: String,
    /// Explicit entity name; absent means "use the descriptor's declared
    /// name".
    #[serde(default)]
    pub name: Option<String>,
    /// Resolve a name conflict by suffixing instead of skipping.
    #[serde(default)]
    pub allow_renaming: bool,
    /// Pose override applied after creation.
    #[serde(default)]
    pub pose: Option<[f32; 6]>,
}

/// Request to move an existing entity.
#[derive(Debug, Clone, Deserialize)]
pub struct SetPoseRequest {
    pub kind: EntityKind,
    pub name: String,
    pub pose: [f32; 6],
}

/// Request to remove an existing entity.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoveRequest {
    pub kind: EntityKind,
    pub name: String,
}

/// Why a submission was rejected. Rejections never enter the queue; the
/// caller sees them only as a `false` acknowledgment.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
    #[error("request names a blank entity name")]
    BlankName,
}

/// Service-facing front door of the command pipeline.
///
/// `submit` may be called concurrently from any number of threads and never
/// blocks on the simulation step: it validates the request's shape, assigns
/// a sequence, enqueues and returns immediately.
pub struct RequestGateway {
    queue: Arc<CommandQueue>,
}

impl RequestGateway {
    pub fn new(queue: Arc<CommandQueue>) -> Self {
        Self { queue }
    }

    /// Validate and enqueue a request.
    ///
    /// `true` means "queued for application at the next step boundary",
    /// never "entity now exists". A queued command that later loses a name
    /// conflict is skipped without the caller ever learning of it; the store
    /// is the only witness.
    pub fn submit(&self, request: Request) -> bool {
        match validate(request) {
            Ok(command) => {
                let sequence = self.queue.push(command);
                tracing::debug!(sequence, "request queued");
                true
            }
            Err(err) => {
                tracing::warn!(%err, "request rejected");
                false
            }
        }
    }
}

fn validate(request: Request) -> Result<Command, RequestError> {
    match request {
        Request::Spawn(req) => {
            let descriptor = Descriptor::parse(&req.descriptor)?;
            if req.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
                return Err(RequestError::BlankName);
            }
            Ok(Command::Spawn(SpawnCommand {
                descriptor,
                requested_name: req.name,
                allow_renaming: req.allow_renaming,
                pose_override: req.pose.map(pose_from_array),
            }))
        }
        Request::SetPose(req) => {
            if req.name.trim().is_empty() {
                return Err(RequestError::BlankName);
            }
            Ok(Command::SetPose {
                kind: req.kind,
                name: req.name,
                pose: pose_from_array(req.pose),
            })
        }
        Request::Remove(req) => {
            if req.name.trim().is_empty() {
                return Err(RequestError::BlankName);
            }
            Ok(Command::Remove {
                kind: req.kind,
                name: req.name,
            })
        }
    }
}

fn pose_from_array([x, y, z, roll, pitch, yaw]: [f32; 6]) -> Pose {
    Pose::from_xyz_rpy(x, y, z, roll, pitch, yaw)
}
