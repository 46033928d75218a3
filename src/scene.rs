use std::collections::HashMap;

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::math::Rgb;
use crate::traits::{CameraParams, Fog, Light, LightId, NodeId, SceneGraph};

/// Triangle mesh plus upload bookkeeping
#[derive(Debug, Clone)]
pub struct MeshData {
    pub vertices: Vec<Vec3>,
    /// Triangle list into `vertices`; fixed after creation
    pub indices: Vec<u32>,
    pub color: Rgb,
    /// Set by every write, cleared by [`MemoryScene::take_dirty`]
    pub needs_upload: bool,
    /// Number of writes since creation
    pub revision: u64,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
    pub mesh: Option<MeshData>,
}

impl Node {
    fn new(name: &str, parent: Option<NodeId>) -> Self {
        Self {
            name: name.to_string(),
            parent,
            children: Vec::new(),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            mesh: None,
        }
    }

    /// Scale, then XYZ Euler rotation, then translation
    pub fn local_matrix(&self) -> Mat4 {
        let r = self.rotation;
        Mat4::from_scale_rotation_translation(
            self.scale,
            Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z),
            self.position,
        )
    }
}

/// Arena-backed scene graph kept entirely on the CPU.
///
/// Drives the headless runner and the tests. The window build animates the
/// same scene and mirrors its meshes to the GPU each frame.
#[derive(Debug, Clone, Default)]
pub struct MemoryScene {
    nodes: Vec<Node>,
    names: HashMap<String, NodeId>,
    lights: Vec<Light>,
    fog: Option<Fog>,
    camera: CameraParams,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total vertices across all meshes
    pub fn vertex_count(&self) -> usize {
        self.nodes
            .iter()
            .filter_map(|n| n.mesh.as_ref())
            .map(|m| m.vertices.len())
            .sum()
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn light(&self, id: LightId) -> Option<&Light> {
        self.lights.get(id.0)
    }

    pub fn fog(&self) -> Option<Fog> {
        self.fog
    }

    pub fn mesh(&self, id: NodeId) -> Option<&MeshData> {
        self.node(id).and_then(|n| n.mesh.as_ref())
    }

    /// Every mesh node in creation order
    pub fn meshes(&self) -> impl Iterator<Item = (NodeId, &MeshData)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, node)| node.mesh.as_ref().map(|mesh| (NodeId(i), mesh)))
    }

    /// Model matrix of every node, indexed by `NodeId`.
    ///
    /// Parents are always created before their children, so one forward pass
    /// sees each parent's matrix before it is needed.
    pub fn world_matrices(&self) -> Vec<Mat4> {
        let mut world: Vec<Mat4> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let local = node.local_matrix();
            let matrix = match node.parent.and_then(|p| world.get(p.0)) {
                Some(parent) => *parent * local,
                None => local,
            };
            world.push(matrix);
        }
        world
    }

    /// Meshes written since the last call, clearing their flags
    pub fn take_dirty(&mut self) -> Vec<NodeId> {
        self.nodes
            .iter_mut()
            .enumerate()
            .filter_map(|(i, node)| {
                let mesh = node.mesh.as_mut()?;
                if mesh.needs_upload {
                    mesh.needs_upload = false;
                    Some(NodeId(i))
                } else {
                    None
                }
            })
            .collect()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        if let Some(parent) = node.parent.and_then(|p| self.nodes.get_mut(p.0)) {
            parent.children.push(id);
        }
        self.names.entry(node.name.clone()).or_insert(id);
        self.nodes.push(node);
        id
    }

    fn with_node(&mut self, id: NodeId, f: impl FnOnce(&mut Node)) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            f(node);
        }
    }

    fn with_light(&mut self, id: LightId, f: impl FnOnce(&mut Light)) {
        if let Some(light) = self.lights.get_mut(id.0) {
            f(light);
        }
    }
}

impl SceneGraph for MemoryScene {
    fn add_node(&mut self, name: &str, parent: Option<NodeId>) -> NodeId {
        self.push(Node::new(name, parent))
    }

    fn add_mesh(
        &mut self,
        name: &str,
        parent: Option<NodeId>,
        vertices: Vec<Vec3>,
        indices: Vec<u32>,
        color: Rgb,
    ) -> NodeId {
        let mut node = Node::new(name, parent);
        node.mesh = Some(MeshData {
            vertices,
            indices,
            color,
            needs_upload: true,
            revision: 0,
        });
        self.push(node)
    }

    fn find(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    fn contains(&self, node: NodeId) -> bool {
        node.0 < self.nodes.len()
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    fn position(&self, node: NodeId) -> Vec3 {
        self.node(node).map_or(Vec3::ZERO, |n| n.position)
    }

    fn set_position(&mut self, node: NodeId, position: Vec3) {
        self.with_node(node, |n| n.position = position);
    }

    fn rotation(&self, node: NodeId) -> Vec3 {
        self.node(node).map_or(Vec3::ZERO, |n| n.rotation)
    }

    fn set_rotation(&mut self, node: NodeId, rotation: Vec3) {
        self.with_node(node, |n| n.rotation = rotation);
    }

    fn scale(&self, node: NodeId) -> Vec3 {
        self.node(node).map_or(Vec3::ONE, |n| n.scale)
    }

    fn set_scale(&mut self, node: NodeId, scale: Vec3) {
        self.with_node(node, |n| n.scale = scale);
    }

    fn vertices(&self, node: NodeId) -> Option<&[Vec3]> {
        self.mesh(node).map(|m| m.vertices.as_slice())
    }

    fn set_vertices(&mut self, node: NodeId, vertices: &[Vec3]) {
        self.with_node(node, |n| {
            if let Some(mesh) = n.mesh.as_mut() {
                mesh.vertices.clear();
                mesh.vertices.extend_from_slice(vertices);
                mesh.needs_upload = true;
                mesh.revision += 1;
            }
        });
    }

    fn add_light(&mut self, light: Light) -> LightId {
        self.lights.push(light);
        LightId(self.lights.len() - 1)
    }

    fn set_light_color(&mut self, light: LightId, color: Rgb) {
        self.with_light(light, |l| match l {
            Light::Hemisphere { sky, .. } => *sky = color,
            Light::Ambient { color: c, .. } | Light::Directional { color: c, .. } => *c = color,
        });
    }

    fn set_light_intensity(&mut self, light: LightId, intensity: f32) {
        self.with_light(light, |l| match l {
            Light::Hemisphere { intensity: i, .. }
            | Light::Ambient { intensity: i, .. }
            | Light::Directional { intensity: i, .. } => *i = intensity,
        });
    }

    fn set_fog(&mut self, fog: Fog) {
        self.fog = Some(fog);
    }

    fn camera(&self) -> CameraParams {
        self.camera
    }

    fn set_camera_fov(&mut self, fov: f32) {
        self.camera.fov = fov;
    }

    fn set_camera_aspect(&mut self, aspect: f32) {
        self.camera.aspect = aspect;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SceneError;

    #[test]
    fn test_nodes_link_to_parent() {
        let mut scene = MemoryScene::new();
        let root = scene.add_node("root", None);
        let a = scene.add_node("a", Some(root));
        let b = scene.add_node("b", Some(root));

        assert_eq!(scene.children(root), &[a, b]);
        assert_eq!(scene.node(a).unwrap().parent, Some(root));
        assert!(scene.children(a).is_empty());
    }

    #[test]
    fn test_find_returns_first_registration() {
        let mut scene = MemoryScene::new();
        let first = scene.add_node("cloud", None);
        scene.add_node("cloud", None);
        assert_eq!(scene.find("cloud"), Some(first));
        assert_eq!(scene.find("missing"), None);
    }

    #[test]
    fn test_require_fails_for_missing_node() {
        let scene = MemoryScene::new();
        assert_eq!(
            scene.require("sea"),
            Err(SceneError::MissingNode { name: "sea".into() })
        );
        assert_eq!(scene.check(NodeId(3)), Err(SceneError::InvalidHandle { id: 3 }));
    }

    #[test]
    fn test_setters_ignore_unknown_handles() {
        let mut scene = MemoryScene::new();
        scene.set_position(NodeId(9), Vec3::ONE);
        assert_eq!(scene.position(NodeId(9)), Vec3::ZERO);
        assert_eq!(scene.scale(NodeId(9)), Vec3::ONE);
    }

    #[test]
    fn test_set_vertices_marks_dirty() {
        let mut scene = MemoryScene::new();
        let mesh = scene.add_mesh(
            "sea",
            None,
            vec![Vec3::ZERO; 3],
            vec![0, 1, 2],
            Rgb::from_hex(0x3763cc),
        );
        assert_eq!(scene.take_dirty(), vec![mesh]);
        assert!(scene.take_dirty().is_empty());

        scene.set_vertices(mesh, &[Vec3::X, Vec3::Y, Vec3::Z]);
        assert_eq!(scene.vertices(mesh).unwrap(), &[Vec3::X, Vec3::Y, Vec3::Z]);
        assert_eq!(scene.mesh(mesh).unwrap().revision, 1);
        assert_eq!(scene.take_dirty(), vec![mesh]);
    }

    #[test]
    fn test_world_matrices_follow_parents() {
        let mut scene = MemoryScene::new();
        let body = scene.add_node("body", None);
        scene.set_position(body, Vec3::new(0.0, 100.0, 0.0));
        scene.set_scale(body, Vec3::splat(0.5));
        let arm = scene.add_node("arm", Some(body));
        scene.set_position(arm, Vec3::new(10.0, 0.0, 0.0));
        scene.set_rotation(arm, Vec3::new(0.0, 0.0, std::f32::consts::FRAC_PI_2));

        let world = scene.world_matrices();
        assert_eq!(world.len(), 2);
        // Arm origin: scaled offset from the body
        let origin = world[arm.0].transform_point3(Vec3::ZERO);
        assert!(origin.distance(Vec3::new(5.0, 100.0, 0.0)) < 1e-4);
        // A quarter turn about z carries local x onto y
        let tip = world[arm.0].transform_point3(Vec3::X);
        assert!(tip.distance(Vec3::new(5.0, 100.5, 0.0)) < 1e-4);
    }

    #[test]
    fn test_rotation_applies_x_then_y_then_z() {
        let mut node = Node::new("block", None);
        node.rotation = Vec3::new(0.3, -0.7, 1.1);
        let expected = Mat4::from_rotation_x(0.3)
            * Mat4::from_rotation_y(-0.7)
            * Mat4::from_rotation_z(1.1);
        let point = Vec3::new(1.0, 2.0, 3.0);
        let a = node.local_matrix().transform_point3(point);
        let b = expected.transform_point3(point);
        assert!(a.distance(b) < 1e-5);
    }

    #[test]
    fn test_meshes_skip_plain_nodes() {
        let mut scene = MemoryScene::new();
        scene.add_node("sky", None);
        let block = scene.add_mesh(
            "cloud-block",
            None,
            vec![Vec3::ZERO; 3],
            vec![0, 1, 2],
            Rgb::from_hex(0xffffff),
        );
        let ids: Vec<NodeId> = scene.meshes().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![block]);
        assert_eq!(scene.meshes().next().unwrap().1.indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_plain_node_has_no_vertices() {
        let mut scene = MemoryScene::new();
        let node = scene.add_node("body", None);
        assert!(scene.vertices(node).is_none());
        scene.set_vertices(node, &[Vec3::X]);
        assert!(scene.take_dirty().is_empty());
    }

    #[test]
    fn test_light_updates() {
        let mut scene = MemoryScene::new();
        let light = scene.add_light(Light::Ambient {
            color: Rgb::from_hex(0x515151),
            intensity: 0.2,
        });
        scene.set_light_intensity(light, 0.9);
        scene.set_light_color(light, Rgb::from_hex(0xffffff));

        assert_eq!(
            scene.light(light),
            Some(&Light::Ambient {
                color: Rgb::from_hex(0xffffff),
                intensity: 0.9
            })
        );
    }

    #[test]
    fn test_hemisphere_color_keeps_ground() {
        let mut scene = MemoryScene::new();
        let hemi = scene.add_light(Light::Hemisphere {
            sky: Rgb::from_hex(0xffffff),
            ground: Rgb::from_hex(0x3763cc),
            intensity: 0.9,
        });

        scene.set_light_color(hemi, Rgb::from_hex(0xfff4b0));
        assert_eq!(
            scene.light(hemi),
            Some(&Light::Hemisphere {
                sky: Rgb::from_hex(0xfff4b0),
                ground: Rgb::from_hex(0x3763cc),
                intensity: 0.9
            })
        );
    }

    #[test]
    fn test_camera_defaults_and_updates() {
        let mut scene = MemoryScene::new();
        assert_eq!(scene.camera().fov, 60.0);
        scene.set_camera_fov(45.0);
        scene.set_camera_aspect(2.0);
        assert_eq!(scene.camera().fov, 45.0);
        assert_eq!(scene.camera().aspect, 2.0);
        assert_eq!(scene.camera().position, Vec3::new(0.0, 100.0, 200.0));
    }
}
