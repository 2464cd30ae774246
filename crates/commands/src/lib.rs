//! User command pipeline: external clients mutate the live world without
//! racing the step loop.
//!
//! Flow: any number of submitter threads call [`RequestGateway::submit`],
//! which validates the payload, assigns a sequence and enqueues a
//! [`Command`]. Once per step, before the rest of the step's logic, the host
//! calls [`CommandExecutor::apply`], which drains the queue atomically and
//! applies the batch in sequence order against the world.
//!
//! # Invariants
//! - Acknowledgment means "queued", never "applied".
//! - Sequences are strictly increasing process-wide; no two commands share one.
//! - A drained batch is applied entirely within its step; a rejected command
//!   never blocks the rest of the batch.

pub mod command;
pub mod executor;
pub mod gateway;
pub mod naming;
pub mod queue;

pub use command::{Command, QueuedCommand, SpawnCommand};
pub use executor::{CommandExecutor, default_spawn_pose};
pub use gateway::{
    RemoveRequest, Request, RequestError, RequestGateway, SetPoseRequest, SpawnRequest,
};
pub use naming::{NameResolution, resolve_name};
pub use queue::CommandQueue;

pub fn crate_info() -> &'static str {
    "simspace-commands v0.1.0"
}
