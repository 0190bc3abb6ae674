// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! OBJ-Lite Model - Output data model and shared types for OBJ ingestion
//!
//! This crate holds everything the ingestion core hands across its boundary:
//! the finalized node / mesh / primitive hierarchy, the options the core reads,
//! and the error type every stage reports through.
//!
//! # Architecture
//!
//! - [`ObjParser`] - Entry point implemented by parser backends
//! - [`ObjData`] - The finalized geometry handed to the serialization stage
//! - [`Node`], [`Mesh`], [`Primitive`] - The hierarchy inside [`ObjData`]
//! - [`LoadOptions`] - The only configuration the ingestion core consumes
//!
//! # Example
//!
//! ```ignore
//! use obj_lite_model::{LoadOptions, ObjParser};
//!
//! let parser: Box<dyn ObjParser> = get_parser();
//! let data = parser.parse(obj_content)?;
//! for primitive in data.primitives() {
//!     println!("{} triangles", primitive.triangle_count());
//! }
//! ```

pub mod error;
pub mod options;
pub mod traits;
pub mod types;

// Re-export all public types
pub use error::*;
pub use options::*;
pub use traits::*;
pub use types::*;
