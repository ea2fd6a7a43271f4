//! The rendering engine: GPU context, camera, and point renderer.

use glam::Vec2;

use crate::camera::OrbitController;
use crate::error::WhorlError;
use crate::galaxy::PointField;
use crate::gpu::render_context::RenderContext;
use crate::input::{InputEvent, MouseButton};
use crate::options::CameraOptions;
use crate::renderer::{FieldDisplay, PointsRenderer};
use crate::util::FrameTiming;

/// The core rendering engine for the galaxy visualization.
///
/// Owns the wgpu context, the damped orbit camera, and the point renderer.
/// Implements [`FieldDisplay`], so a
/// [`GalaxySession`](crate::galaxy::GalaxySession) can push regenerated
/// fields straight into it.
///
/// # Frame loop
///
/// Each frame, call [`update_camera`](Self::update_camera) to advance the
/// damped orbit, then [`render`](Self::render) (or
/// [`render_with_overlay`](Self::render_with_overlay) to paint UI into the
/// same frame). Call [`resize`](Self::resize) when the window size changes;
/// this reconfigures the surface and aspect ratio only, never the field.
pub struct GalaxyEngine {
    context: RenderContext,
    /// Damped orbital camera controller.
    pub camera_controller: OrbitController,
    renderer: PointsRenderer,
    frame_timing: FrameTiming,
    last_cursor_pos: Option<(f32, f32)>,
}

impl GalaxyEngine {
    /// Initialize the GPU context and renderer for the given surface target.
    ///
    /// # Errors
    ///
    /// Returns [`WhorlError::Gpu`] if GPU initialization fails; this is
    /// fatal, there is no fallback rendering path.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        camera_options: &CameraOptions,
    ) -> Result<Self, WhorlError> {
        let context = RenderContext::new(window, size).await?;
        let camera_controller = OrbitController::new(&context, camera_options);
        let renderer = PointsRenderer::new(&context, &camera_controller.layout);

        Ok(Self {
            context,
            camera_controller,
            renderer,
            frame_timing: FrameTiming::new(),
            last_cursor_pos: None,
        })
    }

    /// The GPU context (device, queue, surface configuration).
    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    /// Smoothed frames per second.
    pub fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }

    /// Number of points currently resident on the GPU.
    pub fn point_count(&self) -> u32 {
        self.renderer.point_count()
    }

    /// Advance the camera's damped orbit state one frame.
    pub fn update_camera(&mut self) {
        self.camera_controller.update();
    }

    /// Push view-only option changes into the camera.
    pub fn apply_camera_options(&mut self, options: &CameraOptions) {
        self.camera_controller.apply_options(options);
    }

    /// Process a platform-agnostic input event.
    ///
    /// Left drag rotates the orbit (pans with shift held); the scroll wheel
    /// zooms. All motion is queued into the damped orbit state and applied
    /// over the following frames.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::CursorMoved { x, y } => {
                let delta = self.last_cursor_pos.map_or(
                    Vec2::ZERO,
                    |(lx, ly)| Vec2::new(x - lx, y - ly),
                );
                self.last_cursor_pos = Some((x, y));

                if self.camera_controller.mouse_pressed {
                    if self.camera_controller.shift_pressed {
                        self.camera_controller.pan(delta);
                    } else {
                        self.camera_controller.rotate(delta);
                    }
                }
            }
            InputEvent::MouseButton { button, pressed } => {
                if button == MouseButton::Left {
                    self.camera_controller.mouse_pressed = pressed;
                }
            }
            InputEvent::Scroll { delta } => {
                self.camera_controller.zoom(delta);
            }
            InputEvent::ModifiersChanged { shift } => {
                self.camera_controller.shift_pressed = shift;
            }
        }
    }

    /// Execute one frame: upload camera state, draw the point pass, and
    /// present.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain frame cannot be
    /// acquired; `Lost`/`Outdated` are recovered by the caller via
    /// [`resize`](Self::resize).
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.render_with_overlay(|_, _, _| {})
    }

    /// Execute one frame, invoking `overlay` after the point pass so UI can
    /// be painted into the same swapchain texture.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain frame cannot be
    /// acquired.
    pub fn render_with_overlay<F>(
        &mut self,
        overlay: F,
    ) -> Result<(), wgpu::SurfaceError>
    where
        F: FnOnce(&RenderContext, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        self.camera_controller.update_gpu(&self.context.queue);

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.context.create_encoder();

        {
            let mut render_pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("points pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                                store: wgpu::StoreOp::Store,
                            },
                        },
                    )],
                    ..Default::default()
                });
            self.renderer
                .draw(&mut render_pass, &self.camera_controller.bind_group);
        }

        overlay(&self.context, &mut encoder, &view);

        self.context.submit(encoder);
        frame.present();
        self.frame_timing.end_frame();

        Ok(())
    }

    /// Resize all GPU surfaces and the camera projection to match the new
    /// window size. Does not touch the point field.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.context.resize(width, height);
            self.camera_controller.resize(width, height);
        }
    }
}

impl FieldDisplay for GalaxyEngine {
    fn display_field(&mut self, field: &PointField, point_size: f32) {
        self.renderer.display_field(&self.context, field, point_size);
    }
}
