use glam::{Mat4, Vec3};

use crate::error::SceneError;
use crate::math::Rgb;

/// Handle to a node in a scene graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Handle to a light in a scene graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightId(pub usize);

/// Light sources the scene knows about
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Hemisphere { sky: Rgb, ground: Rgb, intensity: f32 },
    Ambient { color: Rgb, intensity: f32 },
    Directional { color: Rgb, intensity: f32, position: Vec3, cast_shadow: bool },
}

impl Light {
    pub fn intensity(&self) -> f32 {
        match *self {
            Light::Hemisphere { intensity, .. }
            | Light::Ambient { intensity, .. }
            | Light::Directional { intensity, .. } => intensity,
        }
    }
}

/// Linear distance fog
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub color: Rgb,
    pub near: f32,
    pub far: f32,
}

/// Perspective camera parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraParams {
    pub position: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl CameraParams {
    /// Projection times view. The camera keeps its default orientation and
    /// looks down -Z from `position`.
    pub fn view_projection(&self) -> Mat4 {
        let view = Mat4::look_to_rh(self.position, Vec3::NEG_Z, Vec3::Y);
        let projection =
            Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far);
        projection * view
    }
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 100.0, 200.0),
            fov: 60.0,
            aspect: 1.0,
            near: 1.0,
            far: 10000.0,
        }
    }
}

/// Retained scene the animation reads from and writes to.
///
/// Setters on unknown handles are ignored; handles are validated once with
/// [`SceneGraph::require`] and [`SceneGraph::check`] while the scene is built.
pub trait SceneGraph {
    /// Add an empty transform node
    fn add_node(&mut self, name: &str, parent: Option<NodeId>) -> NodeId;

    /// Add a node that owns a triangle mesh in local space
    fn add_mesh(
        &mut self,
        name: &str,
        parent: Option<NodeId>,
        vertices: Vec<Vec3>,
        indices: Vec<u32>,
        color: Rgb,
    ) -> NodeId;

    /// First node registered under `name`
    fn find(&self, name: &str) -> Option<NodeId>;

    fn contains(&self, node: NodeId) -> bool;

    fn children(&self, node: NodeId) -> &[NodeId];

    fn position(&self, node: NodeId) -> Vec3;
    fn set_position(&mut self, node: NodeId, position: Vec3);

    /// Euler angles in radians
    fn rotation(&self, node: NodeId) -> Vec3;
    fn set_rotation(&mut self, node: NodeId, rotation: Vec3);

    fn scale(&self, node: NodeId) -> Vec3;
    fn set_scale(&mut self, node: NodeId, scale: Vec3);

    /// Vertex buffer of a mesh node, `None` for plain nodes
    fn vertices(&self, node: NodeId) -> Option<&[Vec3]>;

    /// Overwrite a mesh's vertices and flag the buffer for re-upload
    fn set_vertices(&mut self, node: NodeId, vertices: &[Vec3]);

    fn add_light(&mut self, light: Light) -> LightId;

    /// Recolour a light. Hemisphere lights take `color` as their sky colour
    /// and keep their ground colour.
    fn set_light_color(&mut self, light: LightId, color: Rgb);

    fn set_light_intensity(&mut self, light: LightId, intensity: f32);

    fn set_fog(&mut self, fog: Fog);

    fn camera(&self) -> CameraParams;
    fn set_camera_fov(&mut self, fov: f32);
    fn set_camera_aspect(&mut self, aspect: f32);

    /// Look up a node by name, failing when it is absent
    fn require(&self, name: &str) -> Result<NodeId, SceneError> {
        self.find(name).ok_or_else(|| SceneError::MissingNode {
            name: name.to_string(),
        })
    }

    /// Confirm a handle still refers to a live node
    fn check(&self, node: NodeId) -> Result<NodeId, SceneError> {
        if self.contains(node) {
            Ok(node)
        } else {
            Err(SceneError::InvalidHandle { id: node.0 })
        }
    }
}
