use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use glam::Vec3;

use super::pointer::SharedPointer;
use super::pose::{Pose, PoseState};
use super::sway::SwayCluster;
use super::wave_field::WaveField;
use crate::config::AnimationConfig;
use crate::error::SceneError;
use crate::frame::FrameInfo;
use crate::math::wrap_angle;
use crate::traits::{NodeId, SceneGraph};

/// Every update advances by one display refresh
pub const TICK: f32 = 1.0;
/// Sky ring roll, radians per tick
pub const SKY_SPIN: f32 = 0.01;

/// Cooperative stop flag, checked once per tick
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Scene nodes the animation writes to
#[derive(Debug, Clone, PartialEq)]
pub struct SceneHandles {
    pub body: NodeId,
    /// Layer containers of the head tuft; their children are the hair members
    pub head_layers: Vec<NodeId>,
    pub tail_layers: Vec<NodeId>,
    pub sea: NodeId,
    pub sky: NodeId,
}

/// Everything the driver needs from scene construction
#[derive(Debug, Clone)]
pub struct World {
    pub handles: SceneHandles,
    pub waves: WaveField,
}

/// Runs one animation tick per display refresh.
///
/// Tick order:
/// 1. snapshot the shared pointer
/// 2. pose: body height, roll and pitch
/// 3. head tuft sway
/// 4. tail sway
/// 5. camera field of view
/// 6. sea waves and surface spin
/// 7. sky spin
///
/// Steps 2-7 touch disjoint nodes. Lighting is fixed at construction.
pub struct FrameDriver {
    handles: SceneHandles,
    head_members: Vec<Vec<NodeId>>,
    tail_members: Vec<Vec<NodeId>>,
    waves: WaveField,
    head: SwayCluster,
    tail: SwayCluster,
    pose: Pose,
    pointer: SharedPointer,
    cancel: CancelToken,
    sea_rest_rotation: Vec3,
    sky_spin: f32,
    vertex_scratch: Vec<Vec3>,
    ticks: u64,
}

impl FrameDriver {
    /// Validate every handle in `world` against `scene` and set up state.
    ///
    /// Fails if a node is missing or the sea mesh does not match the wave
    /// field; the per-tick path assumes all of this holds.
    pub fn new<S: SceneGraph>(
        scene: &S,
        world: World,
        pointer: SharedPointer,
        config: &AnimationConfig,
    ) -> Result<Self, SceneError> {
        let World { handles, waves } = world;

        scene.check(handles.body)?;
        scene.check(handles.sky)?;
        scene.check(handles.sea)?;

        let sea_vertices = scene
            .vertices(handles.sea)
            .ok_or_else(|| SceneError::NotAMesh {
                name: format!("node #{}", handles.sea.0),
            })?
            .len();
        if sea_vertices != waves.len() {
            return Err(SceneError::VertexCountMismatch {
                expected: sea_vertices,
                actual: waves.len(),
            });
        }

        let head_members = collect_members(scene, &handles.head_layers)?;
        let tail_members = collect_members(scene, &handles.tail_layers)?;

        let start_height = scene.position(handles.body).y;
        let pose = Pose::new(PoseState::at_height(start_height), config.pose);

        log::debug!(
            "frame driver ready: {} wave vertices, {} head members, {} tail members",
            waves.len(),
            head_members.iter().map(Vec::len).sum::<usize>(),
            tail_members.iter().map(Vec::len).sum::<usize>(),
        );

        Ok(Self {
            sea_rest_rotation: scene.rotation(handles.sea),
            head_members,
            tail_members,
            vertex_scratch: Vec::with_capacity(waves.len()),
            waves,
            head: SwayCluster::new(config.sway.head)
                .with_step(config.sway.phase_step, config.sway.member_spread),
            tail: SwayCluster::new(config.sway.tail)
                .with_step(config.sway.phase_step, config.sway.member_spread),
            pose,
            pointer,
            cancel: CancelToken::new(),
            sky_spin: config.sky_spin,
            handles,
            ticks: 0,
        })
    }

    /// Token that stops [`FrameDriver::run`] at the next tick boundary
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn waves(&self) -> &WaveField {
        &self.waves
    }

    pub fn head_sway(&self) -> &SwayCluster {
        &self.head
    }

    pub fn tail_sway(&self) -> &SwayCluster {
        &self.tail
    }

    pub fn handles(&self) -> &SceneHandles {
        &self.handles
    }

    /// Run one tick in the documented order
    pub fn tick<S: SceneGraph>(&mut self, scene: &mut S, frame: &FrameInfo) -> PoseState {
        let pointer = self.pointer.load();

        let pose = self.pose.advance(pointer);
        let body = self.handles.body;
        let position = scene.position(body);
        scene.set_position(body, Vec3::new(position.x, pose.position_y, position.z));
        let rotation = scene.rotation(body);
        scene.set_rotation(body, Vec3::new(pose.rotation_x, rotation.y, pose.rotation_z));

        apply_sway(scene, &mut self.head, &self.head_members);
        apply_sway(scene, &mut self.tail, &self.tail_members);

        scene.set_camera_fov(pose.fov);

        self.waves.advance_into(TICK, &mut self.vertex_scratch);
        scene.set_vertices(self.handles.sea, &self.vertex_scratch);
        scene.set_rotation(
            self.handles.sea,
            self.sea_rest_rotation + Vec3::Z * self.waves.rotation_z(),
        );

        let sky = self.handles.sky;
        let sky_rotation = scene.rotation(sky);
        scene.set_rotation(
            sky,
            Vec3::new(
                sky_rotation.x,
                sky_rotation.y,
                wrap_angle(sky_rotation.z + self.sky_spin * TICK),
            ),
        );

        self.ticks += 1;
        if frame.number > 0 && frame.number % 600 == 0 {
            log::debug!(
                "tick {} at {:.1}s: height {:.2}, fov {:.1}",
                frame.number,
                frame.time,
                pose.position_y,
                pose.fov
            );
        }

        pose
    }

    /// Tick once per frame until the source ends or the token is cancelled.
    ///
    /// `on_frame` runs after every tick, where a renderer would draw.
    /// Returns the number of ticks run.
    pub fn run<S, I, F>(&mut self, scene: &mut S, frames: I, mut on_frame: F) -> u64
    where
        S: SceneGraph,
        I: IntoIterator<Item = FrameInfo>,
        F: FnMut(&S, &FrameInfo),
    {
        let mut ran = 0;
        for frame in frames {
            if self.cancel.is_cancelled() {
                log::info!("animation cancelled after {} ticks", ran);
                break;
            }
            self.tick(scene, &frame);
            on_frame(scene, &frame);
            ran += 1;
        }
        ran
    }
}

fn collect_members<S: SceneGraph>(
    scene: &S,
    layers: &[NodeId],
) -> Result<Vec<Vec<NodeId>>, SceneError> {
    layers
        .iter()
        .map(|&layer| {
            scene.check(layer)?;
            Ok(scene.children(layer).to_vec())
        })
        .collect()
}

/// One sway step shared by every layer of an appendage
fn apply_sway<S: SceneGraph>(scene: &mut S, cluster: &mut SwayCluster, layers: &[Vec<NodeId>]) {
    let count = layers.iter().map(Vec::len).max().unwrap_or(0);
    let scales = cluster.advance(count);
    for members in layers {
        for (&member, &scale_y) in members.iter().zip(&scales) {
            let s = scene.scale(member);
            scene.set_scale(member, Vec3::new(s.x, scale_y, s.z));
        }
    }
}
