use std::collections::HashMap;

use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::math::Rgb;
use crate::scene::{MemoryScene, MeshData};
use crate::traits::{Light, NodeId, SceneGraph, Viewport};

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

/// Camera, fog and lights shared by every mesh in a frame.
///
/// The scene holds at most one light of each kind; a later light of the
/// same kind replaces an earlier one here.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniform {
    pub view_proj: [[f32; 4]; 4],
    pub camera_position: [f32; 4],
    pub fog_color: [f32; 4],
    /// near, far, enabled, unused
    pub fog: [f32; 4],
    /// rgb plus intensity in w
    pub hemisphere_sky: [f32; 4],
    pub hemisphere_ground: [f32; 4],
    pub sun_color: [f32; 4],
    pub sun_direction: [f32; 4],
    pub ambient: [f32; 4],
}

impl FrameUniform {
    pub fn new(scene: &MemoryScene, srgb_surface: bool) -> Self {
        let encode = |color: Rgb, w: f32| {
            let [r, g, b] = if srgb_surface {
                color.to_linear()
            } else {
                color.to_array()
            };
            [r, g, b, w]
        };

        let camera = scene.camera();
        let mut uniform = Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            camera_position: camera.position.extend(1.0).to_array(),
            ..bytemuck::Zeroable::zeroed()
        };

        if let Some(fog) = scene.fog() {
            uniform.fog_color = encode(fog.color, 1.0);
            uniform.fog = [fog.near, fog.far, 1.0, 0.0];
        }

        for light in scene.lights() {
            match *light {
                Light::Hemisphere {
                    sky,
                    ground,
                    intensity,
                } => {
                    uniform.hemisphere_sky = encode(sky, intensity);
                    uniform.hemisphere_ground = encode(ground, 0.0);
                }
                Light::Directional {
                    color,
                    intensity,
                    position,
                    ..
                } => {
                    uniform.sun_color = encode(color, intensity);
                    uniform.sun_direction = position.normalize_or_zero().extend(0.0).to_array();
                }
                Light::Ambient { color, intensity } => {
                    uniform.ambient = encode(color, intensity);
                }
            }
        }
        uniform
    }
}

/// Model matrix and flat colour of one mesh
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshUniform {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl MeshUniform {
    pub fn new(model: Mat4, color: Rgb, srgb_surface: bool) -> Self {
        let [r, g, b] = if srgb_surface {
            color.to_linear()
        } else {
            color.to_array()
        };
        Self {
            model: model.to_cols_array_2d(),
            color: [r, g, b, 1.0],
        }
    }
}

/// Positions as plain arrays for the vertex buffer
pub fn vertex_data(mesh: &MeshData) -> Vec<[f32; 3]> {
    mesh.vertices.iter().map(|v| v.to_array()).collect()
}

/// Whether `mesh` has triangles that all reference its own vertices
pub fn is_drawable(mesh: &MeshData) -> bool {
    let count = mesh.vertices.len();
    !mesh.indices.is_empty() && mesh.indices.iter().all(|&i| (i as usize) < count)
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    vertex_count: usize,
    index_count: u32,
}

/// Draws the scene's meshes with depth testing on top of the sky.
///
/// Vertex buffers are created the first time a mesh is seen and rewritten
/// only when the scene reports the mesh dirty. Model matrices and the frame
/// uniform are refreshed every frame.
pub struct ScenePass {
    pipeline: wgpu::RenderPipeline,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    mesh_layout: wgpu::BindGroupLayout,
    depth_view: wgpu::TextureView,
    meshes: HashMap<NodeId, GpuMesh>,
    srgb_surface: bool,
}

impl ScenePass {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        viewport: Viewport,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("scene.wgsl").into()),
        });

        let uniform_entry = wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };
        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[uniform_entry],
            label: Some("frame_bind_group_layout"),
        });
        let mesh_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[uniform_entry],
            label: Some("mesh_bind_group_layout"),
        });

        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Frame Uniform"),
            size: std::mem::size_of::<FrameUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
            label: Some("frame_bind_group"),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&frame_layout, &mesh_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Scene Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &VERTEX_ATTRIBUTES,
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Generated meshes do not keep a consistent winding
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            frame_buffer,
            frame_bind_group,
            mesh_layout,
            depth_view: Self::create_depth_view(device, viewport),
            meshes: HashMap::new(),
            srgb_surface: surface_format.is_srgb(),
        }
    }

    fn create_depth_view(device: &wgpu::Device, viewport: Viewport) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Scene Depth"),
            size: wgpu::Extent3d {
                width: viewport.width.max(1),
                height: viewport.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Match the depth buffer to a new surface size
    pub fn resize(&mut self, device: &wgpu::Device, viewport: Viewport) {
        self.depth_view = Self::create_depth_view(device, viewport);
    }

    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth_view
    }

    /// Sync GPU buffers with `scene`. `dirty` lists meshes whose vertices
    /// changed since the previous call.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        scene: &MemoryScene,
        dirty: &[NodeId],
    ) {
        let frame = FrameUniform::new(scene, self.srgb_surface);
        queue.write_buffer(&self.frame_buffer, 0, bytemuck::cast_slice(&[frame]));

        let world = scene.world_matrices();
        for (id, mesh) in scene.meshes() {
            let stale = match self.meshes.get(&id) {
                Some(gpu) => gpu.vertex_count != mesh.vertices.len(),
                None => true,
            };
            if stale {
                if !is_drawable(mesh) {
                    continue;
                }
                let gpu = self.upload(device, id, mesh);
                self.meshes.insert(id, gpu);
            } else if dirty.contains(&id) {
                if let Some(gpu) = self.meshes.get(&id) {
                    queue.write_buffer(
                        &gpu.vertex_buffer,
                        0,
                        bytemuck::cast_slice(&vertex_data(mesh)),
                    );
                }
            }

            if let (Some(gpu), Some(model)) = (self.meshes.get(&id), world.get(id.0)) {
                let uniform = MeshUniform::new(*model, mesh.color, self.srgb_surface);
                queue.write_buffer(&gpu.uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));
            }
        }
    }

    fn upload(&self, device: &wgpu::Device, id: NodeId, mesh: &MeshData) -> GpuMesh {
        log::debug!(
            "uploading mesh {:?}: {} vertices, {} triangles",
            id,
            mesh.vertices.len(),
            mesh.indices.len() / 3
        );
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Vertices"),
            contents: bytemuck::cast_slice(&vertex_data(mesh)),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Indices"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Mesh Uniform"),
            size: std::mem::size_of::<MeshUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &self.mesh_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some("mesh_bind_group"),
        });

        GpuMesh {
            vertex_buffer,
            index_buffer,
            uniform_buffer,
            bind_group,
            vertex_count: mesh.vertices.len(),
            index_count: mesh.indices.len() as u32,
        }
    }

    /// Record draws for every uploaded mesh
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.frame_bind_group, &[]);
        for gpu in self.meshes.values() {
            render_pass.set_bind_group(1, &gpu.bind_group, &[]);
            render_pass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
            render_pass.set_index_buffer(gpu.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..gpu.index_count, 0, 0..1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::select_palette;
    use crate::scenes::apply_palette;
    use crate::time_of_day::TimeCategory;
    use glam::Vec3;

    #[test]
    fn test_uniform_layouts() {
        assert_eq!(std::mem::size_of::<FrameUniform>(), 192);
        assert_eq!(std::mem::size_of::<MeshUniform>(), 80);
    }

    #[test]
    fn test_frame_uniform_carries_palette_lights() {
        let mut scene = MemoryScene::new();
        let palette = select_palette(TimeCategory::Night);
        apply_palette(&mut scene, palette);

        let uniform = FrameUniform::new(&scene, false);
        let [r, g, b] = palette.hemisphere.sky.to_array();
        assert_eq!(uniform.hemisphere_sky, [r, g, b, palette.hemisphere.intensity]);
        let [r, g, b] = palette.primary_color.to_array();
        assert_eq!(uniform.ambient, [r, g, b, palette.light_intensity]);
        assert_eq!(uniform.fog, [100.0, 950.0, 1.0, 0.0]);

        let sun = Vec3::from_slice(&uniform.sun_direction[..3]);
        assert!((sun.length() - 1.0).abs() < 1e-5);
        assert!(sun.y > 0.0);
        assert_eq!(uniform.camera_position, [0.0, 100.0, 200.0, 1.0]);
    }

    #[test]
    fn test_scene_without_fog_disables_it() {
        let scene = MemoryScene::new();
        let uniform = FrameUniform::new(&scene, true);
        assert_eq!(uniform.fog[2], 0.0);
        assert_eq!(uniform.ambient, [0.0; 4]);
    }

    #[test]
    fn test_view_projection_tracks_camera_fov() {
        let mut scene = MemoryScene::new();
        let before = FrameUniform::new(&scene, false).view_proj;
        scene.set_camera_fov(75.0);
        let after = FrameUniform::new(&scene, false).view_proj;
        assert_ne!(before, after);
        assert_eq!(after, scene.camera().view_projection().to_cols_array_2d());
    }

    #[test]
    fn test_mesh_uniform_converts_for_srgb_surface() {
        let color = Rgb::from_hex(0x3763cc);
        let model = Mat4::from_translation(Vec3::new(0.0, -600.0, 0.0));
        let uniform = MeshUniform::new(model, color, true);
        let [r, g, b] = color.to_linear();
        assert_eq!(uniform.color, [r, g, b, 1.0]);
        assert_eq!(uniform.model[3], [0.0, -600.0, 0.0, 1.0]);
    }

    #[test]
    fn test_drawable_requires_indices_in_range() {
        let mut scene = MemoryScene::new();
        let color = Rgb::new(1, 2, 3);
        let ok = scene.add_mesh("ok", None, vec![Vec3::ZERO; 3], vec![0, 1, 2], color);
        let bad = scene.add_mesh("bad", None, vec![Vec3::ZERO; 3], vec![0, 1, 3], color);
        let empty = scene.add_mesh("empty", None, vec![Vec3::ZERO; 3], vec![], color);

        assert!(is_drawable(scene.mesh(ok).unwrap()));
        assert!(!is_drawable(scene.mesh(bad).unwrap()));
        assert!(!is_drawable(scene.mesh(empty).unwrap()));
        assert_eq!(vertex_data(scene.mesh(ok).unwrap()), vec![[0.0; 3]; 3]);
    }
}
