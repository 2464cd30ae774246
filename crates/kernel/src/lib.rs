//! World kernel: authoritative entity store and simulation stepping.
//!
//! # Invariants
//! - All state mutations flow through explicit operations.
//! - At most one entity per (kind, name) pair at any step boundary.
//! - Only the step thread ever touches the world.

pub mod world;

pub use world::{EntityData, World, WorldError, WorldEvent};

pub fn crate_info() -> &'static str {
    "simspace-kernel v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("kernel"));
    }
}
