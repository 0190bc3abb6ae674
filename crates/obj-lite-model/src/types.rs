// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry hierarchy produced by OBJ ingestion
//!
//! `ObjData` → `Node` → `Mesh` → `Primitive`. Primitives hold flat,
//! GPU-ready buffers; everything above them is naming and grouping.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Vertex attribute kinds referenced by face corners
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeKind {
    Position,
    Normal,
    Uv,
}

impl AttributeKind {
    /// Number of float components per entry
    pub const fn components(self) -> usize {
        match self {
            AttributeKind::Position | AttributeKind::Normal => 3,
            AttributeKind::Uv => 2,
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeKind::Position => write!(f, "Position"),
            AttributeKind::Normal => write!(f, "Normal"),
            AttributeKind::Uv => write!(f, "UV"),
        }
    }
}

/// One indexed triangle batch sharing a material and attribute layout
///
/// `normals` and `uvs` are either empty or hold exactly one entry per
/// vertex; `positions` always does.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    /// Material name, bound to a loaded material later
    pub material: Option<String>,
    /// Triangle indices
    pub indices: Vec<u32>,
    /// Vertex positions as flattened [x, y, z, x, y, z, ...]
    pub positions: Vec<f32>,
    /// Vertex normals as flattened [nx, ny, nz, nx, ny, nz, ...]
    pub normals: Vec<f32>,
    /// Texture coordinates as flattened [u, v, u, v, ...]
    pub uvs: Vec<f32>,
}

impl Primitive {
    /// Create an empty primitive bound to a material
    pub fn new(material: Option<String>) -> Self {
        Self {
            material,
            ..Self::default()
        }
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    pub fn has_uvs(&self) -> bool {
        !self.uvs.is_empty()
    }

    /// A primitive without indices or positions carries no drawable geometry
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty() || self.positions.is_empty()
    }

    /// Component-wise (min, max) of all positions
    pub fn position_bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        let mut chunks = self.positions.chunks_exact(3);
        let first = chunks.next()?;
        let mut min = [first[0], first[1], first[2]];
        let mut max = min;
        for p in chunks {
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }
        Some((min, max))
    }

    /// Raw bytes of the index buffer in native byte order
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Raw bytes of the position buffer in native byte order
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Raw bytes of the normal buffer in native byte order
    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Raw bytes of the uv buffer in native byte order
    pub fn uv_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.uvs)
    }
}

/// An ordered list of primitives, one per OBJ group (`g`)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub name: Option<String>,
    pub primitives: Vec<Primitive>,
}

impl Mesh {
    pub fn new(name: Option<String>) -> Self {
        Self {
            name,
            primitives: Vec::new(),
        }
    }
}

/// An ordered list of meshes, one per OBJ object (`o`)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub name: Option<String>,
    pub meshes: Vec<Mesh>,
}

impl Node {
    pub fn new(name: Option<String>) -> Self {
        Self {
            name,
            meshes: Vec::new(),
        }
    }
}

/// Finalized geometry handed to the material and serialization stages
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjData {
    /// Model name
    pub name: String,
    /// Surviving nodes, all named
    pub nodes: Vec<Node>,
    /// Material library paths in file order, as written
    pub mtl_paths: Vec<String>,
    /// Whether a material was still selected when the input ended
    pub uses_materials: bool,
}

impl ObjData {
    /// Iterate over all meshes in node order
    pub fn meshes(&self) -> impl Iterator<Item = &Mesh> {
        self.nodes.iter().flat_map(|node| node.meshes.iter())
    }

    /// Iterate over all primitives in node and mesh order
    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> {
        self.meshes().flat_map(|mesh| mesh.primitives.iter())
    }

    fn primitives_mut(&mut self) -> impl Iterator<Item = &mut Primitive> {
        self.nodes
            .iter_mut()
            .flat_map(|node| node.meshes.iter_mut())
            .flat_map(|mesh| mesh.primitives.iter_mut())
    }

    /// Material library paths without duplicates, with `\` separators
    /// normalized to `/`
    pub fn unique_mtl_paths(&self) -> Vec<String> {
        let mut unique: Vec<String> = Vec::with_capacity(self.mtl_paths.len());
        for path in &self.mtl_paths {
            let normalized = path.replace('\\', "/");
            if !unique.contains(&normalized) {
                unique.push(normalized);
            }
        }
        unique
    }

    /// Bind primitives without a material once material libraries are loaded
    ///
    /// `material_names` lists the loaded materials in library order. When the
    /// file never selected a material, every primitive falls back to the first
    /// one. Primitives still unbound then take a material with an empty name,
    /// if the libraries define one.
    pub fn bind_materials(&mut self, material_names: &[&str]) {
        if let Some(first) = material_names.first() {
            if !self.uses_materials {
                for primitive in self.primitives_mut() {
                    if primitive.material.is_none() {
                        primitive.material = Some((*first).to_string());
                    }
                }
            }
        }

        if material_names.iter().any(|name| name.is_empty()) {
            for primitive in self.primitives_mut() {
                if primitive.material.is_none() {
                    primitive.material = Some(String::new());
                }
            }
        }
    }
}
