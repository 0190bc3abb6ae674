// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ingestion context
//!
//! `ObjBuilder` consumes OBJ lines one at a time and assembles the node,
//! mesh and primitive hierarchy. Attribute stores are global to the file;
//! primitives receive deduplicated copies of the attributes their faces
//! reference.

use crate::cache::{VertexCache, VertexKey};
use crate::cleanup::clean_nodes;
use crate::tokenizer::{classify_line, parse_face_corners, split_mtl_paths, FaceCorner, Line};
use obj_lite_geometry::{
    is_winding_correct, normalize_or_unit_z, orient_triangle, triangulate_face, Point3, Vector3,
};
use obj_lite_model::{
    AttributeKind, LoadOptions, Mesh, Node, ObjData, ParseError, Primitive, Result,
};
use smallvec::SmallVec;

/// Name given to every ingested model
pub const MODEL_NAME: &str = "model";

/// Which optional attributes a face (or primitive) carries
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct AttributeLayout {
    uvs: bool,
    normals: bool,
}

impl AttributeLayout {
    fn of(primitive: &Primitive) -> Self {
        Self {
            uvs: primitive.has_uvs(),
            normals: primitive.has_normals(),
        }
    }
}

/// Mutable state of a single ingestion
pub struct ObjBuilder {
    options: LoadOptions,

    // Global attribute stores, flattened
    positions: Vec<f32>,
    normals: Vec<f32>,
    uvs: Vec<f32>,

    nodes: Vec<Node>,
    node: usize,
    mesh: usize,
    primitive: usize,

    active_material: Option<String>,
    cache: VertexCache,
    mtl_paths: Vec<String>,

    /// Pending `f` line split with trailing backslashes
    continuation: String,
}

fn non_empty(name: &str) -> Option<String> {
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// Resolve a 1-based or negative OBJ index against a store of `count` entries
fn resolve_index(index: i64, count: usize, kind: AttributeKind) -> Result<usize> {
    let resolved = match index {
        i if i > 0 => i - 1,
        i if i < 0 => count as i64 + i,
        _ => -1,
    };
    if resolved < 0 || resolved as usize >= count {
        return Err(ParseError::out_of_bounds(kind, index));
    }
    Ok(resolved as usize)
}

impl ObjBuilder {
    pub fn new(options: LoadOptions) -> Self {
        let cache = VertexCache::new(options.vertex_cache_limit);
        let mut builder = Self {
            options,
            positions: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
            nodes: Vec::new(),
            node: 0,
            mesh: 0,
            primitive: 0,
            active_material: None,
            cache,
            mtl_paths: Vec::new(),
            continuation: String::new(),
        };
        builder.add_node(None);
        builder
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Number of `v` entries read so far
    pub fn position_count(&self) -> usize {
        self.positions.len() / AttributeKind::Position.components()
    }

    /// Number of `vn` entries read so far
    pub fn normal_count(&self) -> usize {
        self.normals.len() / AttributeKind::Normal.components()
    }

    /// Number of `vt` entries read so far
    pub fn uv_count(&self) -> usize {
        self.uvs.len() / AttributeKind::Uv.components()
    }

    fn add_node(&mut self, name: Option<String>) {
        self.nodes.push(Node::new(name));
        self.node = self.nodes.len() - 1;
        self.add_mesh(None);
    }

    fn add_mesh(&mut self, name: Option<String>) {
        let meshes = &mut self.nodes[self.node].meshes;
        meshes.push(Mesh::new(name));
        self.mesh = meshes.len() - 1;
        self.add_primitive();
    }

    fn add_primitive(&mut self) {
        let primitives = &mut self.nodes[self.node].meshes[self.mesh].primitives;
        primitives.push(Primitive::new(self.active_material.clone()));
        self.primitive = primitives.len() - 1;
        self.cache.clear();
    }

    /// Switch to the first primitive of the current mesh with the active
    /// material (and layout, when given), or start a new one
    fn reuse_primitive(&mut self, layout: Option<AttributeLayout>) {
        let found = self.nodes[self.node].meshes[self.mesh]
            .primitives
            .iter()
            .position(|p| {
                p.material == self.active_material
                    && layout.map_or(true, |layout| AttributeLayout::of(p) == layout)
            });
        match found {
            Some(index) => {
                self.primitive = index;
                self.cache.clear();
            }
            None => self.add_primitive(),
        }
    }

    fn use_material(&mut self, name: &str) {
        self.active_material = non_empty(name);
        self.reuse_primitive(None);
    }

    fn current_primitive(&mut self) -> &mut Primitive {
        &mut self.nodes[self.node].meshes[self.mesh].primitives[self.primitive]
    }

    /// Make sure the active primitive can take a face with this layout
    fn check_primitive(&mut self, layout: AttributeLayout) {
        let primitive = self.current_primitive();
        if primitive.indices.is_empty() || AttributeLayout::of(primitive) == layout {
            return;
        }
        log::debug!(
            "Switching primitive for face layout (uvs: {}, normals: {})",
            layout.uvs,
            layout.normals
        );
        self.reuse_primitive(Some(layout));
    }

    /// Feed one physical line (without its `\n`)
    pub fn push_line(&mut self, line: &str) -> Result<()> {
        let line = line.trim();

        if !self.continuation.is_empty() {
            return self.continue_face(line);
        }

        match classify_line(line) {
            Line::Blank => {}
            Line::Object(name) => self.add_node(non_empty(name)),
            Line::Group(name) => self.add_mesh(non_empty(name)),
            Line::UseMaterial(name) => self.use_material(name),
            Line::MaterialLibrary(paths) => {
                let found = split_mtl_paths(paths);
                if found.is_empty() {
                    log::warn!("mtllib line without a .mtl path: {}", line);
                }
                self.mtl_paths.extend(found);
            }
            Line::Position(p) => self.positions.extend(p.map(|c| c as f32)),
            Line::Normal(n) => {
                let n = normalize_or_unit_z(Vector3::from(n));
                self.normals
                    .extend([n.x as f32, n.y as f32, n.z as f32]);
            }
            Line::TexCoord([u, v]) => self.uvs.extend([u as f32, (1.0 - v) as f32]),
            Line::Face(_) | Line::Unknown(_) if line.ends_with('\\') => {
                self.continue_face(line)?;
            }
            Line::Face(corners) => self.add_face_line(corners)?,
            Line::Unknown(_) => {}
        }
        Ok(())
    }

    /// Accumulate a backslash-continued line; parse once the chain ends
    fn continue_face(&mut self, line: &str) -> Result<()> {
        if !self.continuation.is_empty() {
            self.continuation.push(' ');
        }
        if let Some(head) = line.strip_suffix('\\') {
            self.continuation.push_str(head);
            return Ok(());
        }
        self.continuation.push_str(line);
        self.flush_continuation()
    }

    fn flush_continuation(&mut self) -> Result<()> {
        let joined = std::mem::take(&mut self.continuation);
        match classify_line(&joined) {
            Line::Face(corners) => self.add_face_line(corners),
            _ => Ok(()),
        }
    }

    fn add_face_line(&mut self, corners: &str) -> Result<()> {
        let corners = parse_face_corners(corners);
        if corners.len() < 3 {
            return Ok(());
        }
        self.add_face(&corners)
    }

    fn resolve_corner(&self, corner: &FaceCorner) -> Result<VertexKey> {
        let position = resolve_index(
            corner.position,
            self.position_count(),
            AttributeKind::Position,
        )?;
        let uv = match corner.uv {
            Some(index) if !self.uvs.is_empty() => {
                Some(resolve_index(index, self.uv_count(), AttributeKind::Uv)?)
            }
            _ => None,
        };
        let normal = match corner.normal {
            Some(index) if !self.normals.is_empty() => Some(resolve_index(
                index,
                self.normal_count(),
                AttributeKind::Normal,
            )?),
            _ => None,
        };
        Ok(VertexKey {
            position,
            uv,
            normal,
        })
    }

    fn position(&self, index: usize) -> Point3<f64> {
        let p = &self.positions[index * 3..index * 3 + 3];
        Point3::new(p[0] as f64, p[1] as f64, p[2] as f64)
    }

    fn normal(&self, index: usize) -> Vector3<f64> {
        let n = &self.normals[index * 3..index * 3 + 3];
        Vector3::new(n[0] as f64, n[1] as f64, n[2] as f64)
    }

    fn add_face(&mut self, corners: &[FaceCorner]) -> Result<()> {
        let mut keys: SmallVec<[VertexKey; 8]> = SmallVec::with_capacity(corners.len());
        for corner in corners {
            keys.push(self.resolve_corner(corner)?);
        }

        let layout = AttributeLayout {
            uvs: keys.iter().all(|k| k.uv.is_some()),
            normals: keys.iter().all(|k| k.normal.is_some()),
        };
        for key in keys.iter_mut() {
            if !layout.uvs {
                key.uv = None;
            }
            if !layout.normals {
                key.normal = None;
            }
        }

        self.check_primitive(layout);

        if keys.len() == 3 {
            self.add_triangle([keys[0], keys[1], keys[2]]);
            return Ok(());
        }

        let points: SmallVec<[Point3<f64>; 8]> =
            keys.iter().map(|k| self.position(k.position)).collect();
        let face = match triangulate_face(&points) {
            Ok(face) if face.triangle_count() > 0 => face,
            Ok(_) => {
                log::debug!("Dropping {}-gon without triangles", keys.len());
                return Ok(());
            }
            Err(err) => {
                log::debug!("Dropping {}-gon: {}", keys.len(), err);
                return Ok(());
            }
        };

        let vertices: SmallVec<[u32; 8]> = keys.iter().map(|k| self.add_vertex(*k)).collect();
        let primitive = self.current_primitive();
        for [a, b, c] in face.triangles() {
            primitive
                .indices
                .extend([vertices[a], vertices[b], vertices[c]]);
        }
        Ok(())
    }

    fn add_triangle(&mut self, keys: [VertexKey; 3]) {
        let correct = !self.options.triangle_winding_order_sanitization || {
            let normal = keys[0].normal.map(|n| self.normal(n));
            is_winding_correct(
                &self.position(keys[0].position),
                &self.position(keys[1].position),
                &self.position(keys[2].position),
                normal.as_ref(),
            )
        };
        let triangle = keys.map(|key| self.add_vertex(key));
        let triangle = orient_triangle(triangle, correct);
        self.current_primitive().indices.extend(triangle);
    }

    /// Index of `key` in the active primitive, appending its attributes on a
    /// cache miss
    fn add_vertex(&mut self, key: VertexKey) -> u32 {
        if let Some(index) = self.cache.get(&key) {
            return index;
        }

        let primitive = &mut self.nodes[self.node].meshes[self.mesh].primitives[self.primitive];
        let index = primitive.vertex_count() as u32;

        let p = key.position * 3;
        primitive
            .positions
            .extend_from_slice(&self.positions[p..p + 3]);
        if let Some(n) = key.normal {
            primitive
                .normals
                .extend_from_slice(&self.normals[n * 3..n * 3 + 3]);
        }
        if let Some(t) = key.uv {
            primitive.uvs.extend_from_slice(&self.uvs[t * 2..t * 2 + 2]);
        }

        self.cache.insert(key, index);
        index
    }

    /// Finalize the hierarchy and release the global stores
    pub fn finish(mut self) -> Result<ObjData> {
        if !self.continuation.is_empty() {
            self.flush_continuation()?;
        }

        let nodes = clean_nodes(self.nodes);
        if nodes.is_empty() {
            return Err(ParseError::NoGeometry);
        }

        let data = ObjData {
            name: MODEL_NAME.to_string(),
            nodes,
            mtl_paths: self.mtl_paths,
            // material still selected once the input ends
            uses_materials: self.active_material.is_some(),
        };
        log::info!(
            "Loaded OBJ: {} nodes, {} meshes, {} primitives",
            data.nodes.len(),
            data.meshes().count(),
            data.primitives().count()
        );
        Ok(data)
    }
}
