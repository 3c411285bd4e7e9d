//! Two-pass layout for workflow graphs.
//!
//! Pass one groups nodes into topological levels ([`level::compute_levels`]);
//! pass two assigns fixed world-space rectangles from level and lane indices
//! ([`Layout::place`]) and routes connector curves between the resulting
//! centers. Because coordinates are computed up front, edge geometry never
//! depends on rendered output.

mod level;
mod path;
mod place;
pub mod svg;
mod types;

pub use level::compute_levels;
pub use path::{connector, route_edges};
pub use place::{Layout, node_size};
pub use types::{
    CubicCurve, EdgePath, LayoutResult, Orientation, PlacedNode, Rect, Size,
};
