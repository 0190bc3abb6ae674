// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Options consumed by the ingestion core

use serde::{Deserialize, Serialize};

/// Default ceiling for the per-primitive vertex cache
pub const DEFAULT_VERTEX_CACHE_LIMIT: usize = 1_000_000;

/// Ingestion options
///
/// Everything else a converter is configured with (material conversion,
/// texture handling, output format) belongs to later stages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoadOptions {
    /// Reorder triangle corners so they agree with the first corner's normal
    pub triangle_winding_order_sanitization: bool,
    /// Number of cache inserts after which the vertex cache is cleared
    pub vertex_cache_limit: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            triangle_winding_order_sanitization: false,
            vertex_cache_limit: DEFAULT_VERTEX_CACHE_LIMIT,
        }
    }
}

impl LoadOptions {
    /// Create options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether triangle winding order is sanitized against face normals
    pub fn with_winding_order_sanitization(mut self, enabled: bool) -> Self {
        self.triangle_winding_order_sanitization = enabled;
        self
    }

    /// Set the vertex cache ceiling
    pub fn with_vertex_cache_limit(mut self, limit: usize) -> Self {
        self.vertex_cache_limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = LoadOptions::default();
        assert!(!options.triangle_winding_order_sanitization);
        assert_eq!(options.vertex_cache_limit, 1_000_000);
    }

    #[test]
    fn test_deserialize_partial() {
        let options: LoadOptions =
            serde_json::from_str(r#"{"triangleWindingOrderSanitization": true}"#).unwrap();
        assert!(options.triangle_winding_order_sanitization);
        assert_eq!(options.vertex_cache_limit, DEFAULT_VERTEX_CACHE_LIMIT);
    }
}
