// polytess: plane-sweep polygon tessellation
// Licensed under the MIT license.

//! Plane-sweep polygon tessellation.
//!
//! `polytess` turns arbitrary closed contours (self-intersecting,
//! overlapping, nested) into a triangulation of their interior under a
//! configurable winding rule, or into the boundary loops separating
//! interior from exterior. The pipeline descends from the SGI GLU
//! tessellator: contours become half-edge loops in a mesh, a plane sweep
//! computes the planar arrangement and marks interior regions, monotone
//! regions are fan-triangulated, and an optional edge-flip pass refines
//! the result toward a constrained Delaunay triangulation.
//!
//! ```
//! use polytess::{ElementType, Tessellator, WindingRule};
//!
//! let mut tess = Tessellator::new();
//! tess.add_contour(2, &[0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0]).unwrap();
//! tess.tessellate(WindingRule::Odd, ElementType::Polygons, 3, 2, None)
//!     .unwrap();
//! assert_eq!(tess.elements().len(), 6); // two triangles
//! ```

pub mod dict;
pub mod geom;
pub mod mesh;
pub mod pool;
pub mod queue;
pub mod sweep;
pub mod tess;

pub use tess::{ElementType, TessOption, Tessellator, WindingRule};

/// Output index type.
pub type Index = u32;

/// Sentinel index: unused polygon slots, and `vertex_indices` entries for
/// vertices synthesized at edge intersections.
pub const INVALID_INDEX: Index = u32::MAX;

/// Tessellation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TessError {
    /// No usable contour data: empty mesh, empty contour, or a coordinate
    /// out of range.
    #[error("invalid contour data")]
    InvalidContour,
    /// An arena ran out of handle space.
    #[error("allocation failure")]
    AllocationFailure,
    /// The sweep detected an invariant violation it could not repair.
    #[error("sweep failure")]
    SweepFailure,
    /// Floating-point arithmetic drove the sweep into a state that should
    /// be unreachable.
    #[error("numeric degeneracy")]
    NumericDegeneracy,
}
