use glam::{Vec2, Vec3};
use wgpu::util::DeviceExt;

use crate::camera::core::{Camera, CameraUniform};
use crate::camera::orbit::Orbit;
use crate::gpu::render_context::RenderContext;
use crate::options::CameraOptions;

/// Default eye position, matching the reference view of the galaxy disc.
const DEFAULT_EYE: Vec3 = Vec3::new(10.0, 10.0, 10.0);

/// Damped orbital camera controller owning the camera state and its GPU
/// uniform resources.
pub struct OrbitController {
    /// Damped orbit state (yaw/pitch/distance around the focus point).
    pub orbit: Orbit,
    /// Derived perspective camera.
    pub camera: Camera,
    /// CPU copy of the camera uniform.
    pub uniform: CameraUniform,
    /// GPU uniform buffer.
    pub buffer: wgpu::Buffer,
    /// Bind group layout for the camera uniform.
    pub layout: wgpu::BindGroupLayout,
    /// Bind group for the camera uniform.
    pub bind_group: wgpu::BindGroup,

    /// Whether the orbit (left) mouse button is held.
    pub mouse_pressed: bool,
    /// Whether shift is held (drag pans instead of rotating).
    pub shift_pressed: bool,
}

impl OrbitController {
    /// Create the controller and its GPU resources.
    pub fn new(context: &RenderContext, options: &CameraOptions) -> Self {
        let orbit = Orbit::from_eye(DEFAULT_EYE, Vec3::ZERO, options);

        let camera = Camera {
            eye: orbit.eye(),
            target: orbit.focus(),
            up: Vec3::Y,
            aspect: context.config.width as f32 / context.config.height as f32,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        };

        let mut uniform = CameraUniform::new();
        uniform.update(&camera);

        let buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            },
        );

        let bind_group =
            context
                .device
                .create_bind_group(&wgpu::BindGroupDescriptor {
                    layout: &layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                    label: Some("Camera Bind Group"),
                });

        Self {
            orbit,
            camera,
            uniform,
            buffer,
            layout,
            bind_group,
            mouse_pressed: false,
            shift_pressed: false,
        }
    }

    /// Advance the damped orbit state one frame and sync the camera.
    pub fn update(&mut self) {
        let _ = self.orbit.update();
        self.camera.eye = self.orbit.eye();
        self.camera.target = self.orbit.focus();
    }

    /// Upload the current camera state to the GPU.
    pub fn update_gpu(&mut self, queue: &wgpu::Queue) {
        self.uniform.update(&self.camera);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[
            self.uniform,
        ]));
    }

    /// Recompute the aspect ratio for a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.camera.aspect = width as f32 / height as f32;
        }
    }

    /// Queue an orbit rotation from a pointer drag.
    pub fn rotate(&mut self, delta: Vec2) {
        self.orbit.rotate(delta);
    }

    /// Queue a focus pan from a pointer drag.
    pub fn pan(&mut self, delta: Vec2) {
        self.orbit.pan(delta);
    }

    /// Queue a zoom step.
    pub fn zoom(&mut self, delta: f32) {
        self.orbit.zoom(delta);
    }

    /// Push view-only option changes into the projection and orbit state.
    pub fn apply_options(&mut self, options: &CameraOptions) {
        self.camera.fovy = options.fovy;
        self.camera.znear = options.znear;
        self.camera.zfar = options.zfar;
        self.orbit.apply_options(options);
    }
}
