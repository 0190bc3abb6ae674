// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! OBJ-Lite Parser - Streaming Wavefront OBJ ingestion
//!
//! Turns OBJ text into named nodes, meshes and indexed triangle primitives
//! ready for glTF-style serialization.
//!
//! # Features
//!
//! - **Streaming input** - byte or text chunks, split anywhere
//! - **Fast tokenization** using `lexical-core` and `nom`
//! - **SIMD-accelerated line splitting** using `memchr`
//! - **Vertex deduplication** with a bounded cache
//! - **N-gon triangulation** through `obj-lite-geometry`
//!
//! # Example
//!
//! ```ignore
//! use obj_lite_parser::ObjStreamParser;
//! use obj_lite_model::ObjParser;
//!
//! let parser = ObjStreamParser::new().with_winding_order_sanitization(true);
//! let data = parser.parse(obj_content)?;
//!
//! for primitive in data.primitives() {
//!     println!("{} triangles", primitive.triangle_count());
//! }
//! ```

mod builder;
mod cache;
mod cleanup;
mod stream;
mod tokenizer;

pub use builder::{ObjBuilder, MODEL_NAME};
pub use cache::{VertexCache, VertexKey};
pub use stream::{load_obj, load_obj_reader, LineSplitter, ObjIngestion, Utf8ChunkDecoder};
pub use tokenizer::{classify_line, parse_face_corners, split_mtl_paths, FaceCorner, Line};

pub use obj_lite_model::{LoadOptions, ObjData, ObjParser, ParseError, Result};

/// OBJ parser implementing the `ObjParser` trait
#[derive(Clone, Debug, Default)]
pub struct ObjStreamParser {
    options: LoadOptions,
}

impl ObjStreamParser {
    /// Create a new parser with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser from existing options
    pub fn with_options(options: LoadOptions) -> Self {
        Self { options }
    }

    /// Set whether triangle winding order is sanitized against face normals
    pub fn with_winding_order_sanitization(mut self, enabled: bool) -> Self {
        self.options.triangle_winding_order_sanitization = enabled;
        self
    }

    /// Set the vertex cache ceiling
    pub fn with_vertex_cache_limit(mut self, limit: usize) -> Self {
        self.options.vertex_cache_limit = limit;
        self
    }
}

impl ObjParser for ObjStreamParser {
    fn options(&self) -> &LoadOptions {
        &self.options
    }

    fn parse(&self, content: &str) -> Result<ObjData> {
        parse_str(content, &self.options)
    }
}

/// Parse OBJ content held in memory
pub fn parse_str(content: &str, options: &LoadOptions) -> Result<ObjData> {
    let mut ingestion = ObjIngestion::new(options.clone());
    ingestion.feed_str(content)?;
    ingestion.finish()
}

/// Quick parse function with default options
pub fn parse(content: &str) -> Result<ObjData> {
    ObjStreamParser::new().parse(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";

    #[test]
    fn test_quick_parse() {
        let data = parse(TRIANGLE).unwrap();
        assert_eq!(data.name, MODEL_NAME);
        assert_eq!(data.nodes.len(), 1);
        assert_eq!(data.nodes[0].name.as_deref(), Some("Node"));
        assert_eq!(data.nodes[0].meshes[0].name.as_deref(), Some("Node-Mesh"));
    }

    #[test]
    fn test_parser_builder() {
        let parser = ObjStreamParser::new()
            .with_winding_order_sanitization(true)
            .with_vertex_cache_limit(8);
        assert!(parser.options().triangle_winding_order_sanitization);
        assert_eq!(parser.options().vertex_cache_limit, 8);
        assert!(parser.parse(TRIANGLE).is_ok());
    }

    #[test]
    fn test_parser_as_trait_object() {
        let parser: Box<dyn ObjParser> = Box::new(ObjStreamParser::new());
        let data = parser.parse(TRIANGLE).unwrap();
        assert_eq!(data.primitives().count(), 1);
    }

    #[test]
    fn test_crlf_line_endings() {
        let data = parse("v 0 0 0\r\nv 1 0 0\r\nv 0 1 0\r\nf 1 2 3\r\n").unwrap();
        assert_eq!(data.primitives().next().unwrap().vertex_count(), 3);
    }
}
