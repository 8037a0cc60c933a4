//! Geographic-to-spherical-cap projection.
//!
//! A cap is described by a center (latitude/longitude), an altitude above the
//! reference sphere, an area preset and a compass facing. [`CapProjector`]
//! turns a descriptor into wireframe geometry (full cap outline plus a
//! one-octant wedge) and a placement on the sphere; [`CapLayer`] keeps the
//! scene in sync with a [`CapSet`] by rebuilding all cap geometry after every
//! edit.

pub mod area;
pub mod cap_set;
pub mod descriptor;
pub mod edges;
pub mod facing;
pub mod layer;
pub mod patch;
pub mod placement;
pub mod projector;

pub use area::*;
pub use cap_set::*;
pub use descriptor::*;
pub use edges::*;
pub use facing::*;
pub use layer::*;
pub use patch::*;
pub use placement::*;
pub use projector::*;
