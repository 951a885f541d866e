//! Grab positions on a core.

use serde::{Deserialize, Serialize};

/// Where a pointer is relative to a core.
///
/// `Inside` grabs the whole core for moving, the four edges grab that edge for
/// resizing. Edge handles sit at the edge midpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    #[default]
    None,
    Inside,
    Top,
    Bottom,
    Left,
    Right,
}

impl Handle {
    /// Edge handles in hit-test priority order.
    pub const EDGES: [Handle; 4] = [Handle::Top, Handle::Bottom, Handle::Left, Handle::Right];

    /// Whether this is one of the four resize handles.
    pub fn is_edge(&self) -> bool {
        matches!(self, Handle::Top | Handle::Bottom | Handle::Left | Handle::Right)
    }

    /// Whether the pointer is over the core at all.
    pub fn is_hit(&self) -> bool {
        !matches!(self, Handle::None)
    }
}
