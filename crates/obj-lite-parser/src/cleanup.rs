// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hierarchy finalization: pruning, node promotion and default names

use obj_lite_model::{Mesh, Node};
use rustc_hash::FxHashMap;

/// Prune empty entries and give every node and mesh a unique name
pub(crate) fn clean_nodes(nodes: Vec<Node>) -> Vec<Node> {
    let mut nodes = remove_empty_nodes(nodes);
    set_default_names(&mut nodes);
    nodes
}

fn remove_empty_meshes(meshes: Vec<Mesh>) -> Vec<Mesh> {
    meshes
        .into_iter()
        .filter_map(|mut mesh| {
            mesh.primitives.retain(|primitive| !primitive.is_empty());
            (!mesh.primitives.is_empty()).then_some(mesh)
        })
        .collect()
}

fn remove_empty_nodes(nodes: Vec<Node>) -> Vec<Node> {
    let mut result = Vec::with_capacity(nodes.len());
    for mut node in nodes {
        let meshes = remove_empty_meshes(std::mem::take(&mut node.meshes));
        if meshes.is_empty() {
            continue;
        }
        // Files that only use `g` get one node per group
        if node.name.is_none() && meshes.iter().any(|mesh| mesh.name.is_some()) {
            result.extend(meshes.into_iter().map(|mesh| Node {
                name: mesh.name.clone(),
                meshes: vec![mesh],
            }));
        } else {
            node.meshes = meshes;
            result.push(node);
        }
    }
    result
}

fn assign_name(name: &mut Option<String>, default: &str, used: &mut FxHashMap<String, usize>) {
    let base = name.take().unwrap_or_else(|| default.to_string());
    let unique = match used.get_mut(&base) {
        Some(occurrences) => {
            let suffix = *occurrences;
            *occurrences += 1;
            format!("{}_{}", base, suffix)
        }
        None => {
            used.insert(base.clone(), 1);
            base
        }
    };
    *name = Some(unique);
}

fn set_default_names(nodes: &mut [Node]) {
    let mut used = FxHashMap::default();
    for node in nodes.iter_mut() {
        assign_name(&mut node.name, "Node", &mut used);
    }
    for node in nodes.iter_mut() {
        let default = format!("{}-Mesh", node.name.as_deref().unwrap_or("Node"));
        for mesh in &mut node.meshes {
            assign_name(&mut mesh.name, &default, &mut used);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use obj_lite_model::Primitive;

    fn filled() -> Primitive {
        Primitive {
            indices: vec![0, 0, 0],
            positions: vec![0.0; 3],
            ..Primitive::default()
        }
    }

    fn mesh(name: Option<&str>, primitives: Vec<Primitive>) -> Mesh {
        Mesh {
            name: name.map(str::to_string),
            primitives,
        }
    }

    fn node(name: Option<&str>, meshes: Vec<Mesh>) -> Node {
        Node {
            name: name.map(str::to_string),
            meshes,
        }
    }

    fn names(nodes: &[Node]) -> Vec<(String, Vec<String>)> {
        nodes
            .iter()
            .map(|n| {
                (
                    n.name.clone().unwrap_or_default(),
                    n.meshes
                        .iter()
                        .map(|m| m.name.clone().unwrap_or_default())
                        .collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_prunes_empty_entries() {
        let nodes = vec![
            node(None, vec![mesh(None, vec![Primitive::default()])]),
            node(
                Some("Cube"),
                vec![
                    mesh(None, vec![]),
                    mesh(Some("Side"), vec![Primitive::default(), filled()]),
                ],
            ),
        ];
        let nodes = clean_nodes(nodes);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].meshes.len(), 1);
        assert_eq!(nodes[0].meshes[0].primitives.len(), 1);
    }

    #[test]
    fn test_default_names() {
        let nodes = clean_nodes(vec![node(None, vec![mesh(None, vec![filled()])])]);
        assert_eq!(
            names(&nodes),
            vec![("Node".to_string(), vec!["Node-Mesh".to_string()])]
        );
    }

    #[test]
    fn test_groups_promote_to_nodes() {
        let nodes = clean_nodes(vec![node(
            None,
            vec![
                mesh(Some("Wing"), vec![filled()]),
                mesh(Some("Tail"), vec![filled()]),
            ],
        )]);
        assert_eq!(
            names(&nodes),
            vec![
                ("Wing".to_string(), vec!["Wing_1".to_string()]),
                ("Tail".to_string(), vec!["Tail_1".to_string()]),
            ]
        );
    }

    #[test]
    fn test_duplicate_names_get_suffixes() {
        let nodes = clean_nodes(vec![
            node(Some("Part"), vec![mesh(None, vec![filled()])]),
            node(Some("Part"), vec![mesh(None, vec![filled()])]),
            node(Some("Part"), vec![mesh(None, vec![filled()])]),
        ]);
        assert_eq!(
            names(&nodes),
            vec![
                ("Part".to_string(), vec!["Part-Mesh".to_string()]),
                ("Part_1".to_string(), vec!["Part_1-Mesh".to_string()]),
                ("Part_2".to_string(), vec!["Part_2-Mesh".to_string()]),
            ]
        );
    }

    #[test]
    fn test_everything_empty() {
        assert!(clean_nodes(vec![node(None, vec![mesh(None, vec![])])]).is_empty());
    }
}
