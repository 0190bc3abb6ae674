// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core traits for OBJ ingestion

use crate::{LoadOptions, ObjData, Result};

/// Main parsing interface - entry point for ingesting OBJ content
///
/// Implementations consume the whole input in a single pass and return the
/// finalized geometry, or the first fatal error.
///
/// # Example
///
/// ```ignore
/// use obj_lite_model::ObjParser;
///
/// let parser: Box<dyn ObjParser> = get_parser();
/// let data = parser.parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n")?;
/// assert_eq!(data.nodes.len(), 1);
/// ```
pub trait ObjParser: Send + Sync {
    /// Options this parser was configured with
    fn options(&self) -> &LoadOptions;

    /// Parse complete OBJ content held in memory
    ///
    /// # Arguments
    /// * `content` - The OBJ file content as a string
    ///
    /// # Returns
    /// The finalized [`ObjData`], or a `ParseError` on failure
    fn parse(&self, content: &str) -> Result<ObjData>;
}
