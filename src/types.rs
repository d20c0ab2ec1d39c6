//! Shared scheduling types for the frame update pipeline.

use bevy::prelude::*;

/// System sets ordering the per-frame update pipeline.
///
/// Input tracking must run before motion integration, which must run before
/// anything that reads the ship's fresh kinematics (trail emission, proximity
/// checks). Camera transition advancement runs last so it sees the frame's
/// final requests.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum UpdateSet {
    /// Keyboard state snapshot.
    Input,
    /// Ship velocity/position/attitude integration and orbital advancement.
    Flight,
    /// Trail emission and proximity checks (read ship state).
    Effects,
    /// Camera transition start/advance.
    Camera,
}
