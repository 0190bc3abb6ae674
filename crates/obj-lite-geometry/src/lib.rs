// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # OBJ-Lite Geometry Processing
//!
//! Numeric routines the OBJ ingestion core runs per face.
//!
//! ## Overview
//!
//! - **Eigen-decomposition**: bounded classical Jacobi for symmetric 3x3 matrices
//! - **Oriented bounding boxes**: principal-axis boxes from covariance
//! - **Planar projection**: flatten an n-gon onto its two widest axes
//! - **Triangulation**: ear clipping via earcutr
//! - **Winding**: agree triangle order with face normals
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use obj_lite_geometry::{triangulate_face, Point3};
//!
//! let quad = [
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let face = triangulate_face(&quad)?;
//! assert_eq!(face.triangle_count(), 2);
//! ```

pub mod eigen;
pub mod error;
pub mod math;
pub mod obb;
pub mod projection;
pub mod triangulation;
pub mod winding;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix3, Point2, Point3, Vector2, Vector3};

// Re-export main types
pub use eigen::{eigen_decomposition, EigenDecomposition};
pub use error::{Error, Result};
pub use math::normalize_or_unit_z;
pub use obb::OrientedBoundingBox;
pub use projection::{triangulate_face, FaceTriangulation, PlaneProjection};
pub use triangulation::{earcut_flat, triangulate_polygon};
pub use winding::{
    is_winding_correct, orient_triangle, sanitize_winding, signed_area_2d, winding_order_2d,
    WindingOrder,
};
