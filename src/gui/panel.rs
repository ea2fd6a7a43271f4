//! egui debug panel: parameter sliders plus an FPS/stats overlay.
//!
//! The panel edits a pending copy of the options and commits it only when
//! the interaction ends (no pointer button held, no text field focused).
//! Intermediate drag ticks never reach the session: regeneration cost
//! scales with the point count, so commit-on-release is required behavior,
//! not an optimization.

use std::time::Duration;

use winit::window::Window;

use crate::gpu::render_context::RenderContext;
use crate::options::Options;

/// Live numbers for the stats overlay.
pub struct PanelStats {
    /// Smoothed frames per second.
    pub fps: f32,
    /// Points resident on the GPU.
    pub point_count: u32,
    /// Duration of the most recent field generation.
    pub generation: Duration,
}

/// Owns the egui context, winit integration state, and wgpu renderer for
/// the debug panel.
///
/// Constructed always, drawn only when the debug opt-in flag was present at
/// startup. Hidden means no egui frame runs and no events are consumed.
pub struct DebugPanel {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
    visible: bool,
    pending: Options,
    editing: bool,
}

impl DebugPanel {
    /// Create the panel against the window and surface format.
    pub fn new(
        window: &Window,
        context: &RenderContext,
        initial: &Options,
        visible: bool,
    ) -> Self {
        let ctx = egui::Context::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let renderer = egui_wgpu::Renderer::new(
            &context.device,
            context.format(),
            None,
            1,
            false,
        );

        Self {
            ctx,
            state,
            renderer,
            visible,
            pending: initial.clone(),
            editing: false,
        }
    }

    /// Whether the panel was enabled with the debug opt-in flag.
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Feed a window event to egui. Hidden panels consume nothing.
    pub fn on_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> egui_winit::EventResponse {
        if !self.visible {
            return egui_winit::EventResponse {
                consumed: false,
                repaint: false,
            };
        }
        self.state.on_window_event(window, event)
    }

    /// Run one egui frame and paint it over the scene in `view`.
    ///
    /// Returns the edited options once the user finishes an interaction and
    /// the pending copy differs from `current`.
    pub fn draw(
        &mut self,
        window: &Window,
        context: &RenderContext,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        current: &Options,
        stats: &PanelStats,
    ) -> Option<Options> {
        if !self.visible {
            return None;
        }

        // Track external changes while idle; keep the user's edit while a
        // drag is in flight.
        if !self.editing {
            self.pending = current.clone();
        }

        let raw_input = self.state.take_egui_input(window);
        let ctx = self.ctx.clone();
        let mut changed = false;
        let pending = &mut self.pending;
        let full_output = ctx.run(raw_input, |ctx| {
            egui::Window::new("galaxy")
                .default_width(280.0)
                .show(ctx, |ui| {
                    changed |= options_controls(ui, pending);
                });

            if pending.debug.show_stats {
                stats_overlay(ctx, stats);
            }
        });

        self.state
            .handle_platform_output(window, full_output.platform_output);

        for (id, image_delta) in &full_output.textures_delta.set {
            self.renderer.update_texture(
                &context.device,
                &context.queue,
                *id,
                image_delta,
            );
        }

        let paint_jobs = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [context.config.width, context.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };
        let callback_buffers = self.renderer.update_buffers(
            &context.device,
            &context.queue,
            encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        if !callback_buffers.is_empty() {
            let _ = context.queue.submit(callback_buffers);
        }

        {
            let mut render_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Load,
                                store: wgpu::StoreOp::Store,
                            },
                        },
                    )],
                    ..Default::default()
                })
                .forget_lifetime();
            self.renderer
                .render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.renderer.free_texture(id);
        }

        // Commit-on-release: emit the edit once no interaction is active.
        if changed {
            self.editing = true;
        }
        let interacting = self.ctx.input(|i| i.pointer.any_down())
            || self.ctx.wants_keyboard_input();
        if self.editing && !interacting {
            self.editing = false;
            if self.pending != *current {
                return Some(self.pending.clone());
            }
        }
        None
    }
}

/// All tunable options. Returns `true` if any widget changed this frame.
fn options_controls(ui: &mut egui::Ui, opts: &mut Options) -> bool {
    let mut changed = false;
    let g = &mut opts.galaxy;

    changed |= ui
        .add(egui::Slider::new(&mut g.count, 1..=50_000).text("count"))
        .changed();
    changed |= ui
        .add(
            egui::Slider::new(&mut g.point_size, 0.0..=1.0)
                .step_by(0.01)
                .text("size"),
        )
        .changed();
    changed |= ui
        .add(
            egui::Slider::new(&mut g.radius, 0.0..=15.0)
                .step_by(1.0)
                .text("radius"),
        )
        .changed();
    changed |= ui
        .add(egui::Slider::new(&mut g.branches, 1..=10).text("branches"))
        .changed();
    changed |= ui
        .add(
            egui::Slider::new(&mut g.spin, 1.0..=10.0)
                .step_by(1.0)
                .text("spin"),
        )
        .changed();
    changed |= ui
        .add(
            egui::Slider::new(&mut g.randomness, 0.0..=1.0)
                .step_by(0.01)
                .text("randomness"),
        )
        .changed();

    ui.horizontal(|ui| {
        changed |= ui.color_edit_button_rgb(&mut g.inside_color).changed();
        ui.label("inside color");
    });
    ui.horizontal(|ui| {
        changed |= ui.color_edit_button_rgb(&mut g.outside_color).changed();
        ui.label("outside color");
    });

    ui.collapsing("camera", |ui| {
        let c = &mut opts.camera;
        changed |= ui
            .add(
                egui::Slider::new(&mut c.fovy, 20.0..=120.0)
                    .step_by(1.0)
                    .text("fov"),
            )
            .changed();
        changed |= ui
            .add(
                egui::Slider::new(&mut c.rotate_speed, 0.1..=2.0)
                    .text("rotate speed"),
            )
            .changed();
        changed |= ui
            .add(
                egui::Slider::new(&mut c.pan_speed, 0.1..=2.0)
                    .text("pan speed"),
            )
            .changed();
        changed |= ui
            .add(
                egui::Slider::new(&mut c.zoom_speed, 0.01..=0.5)
                    .text("zoom speed"),
            )
            .changed();
        changed |= ui
            .add(
                egui::Slider::new(&mut c.damping, 0.01..=1.0)
                    .text("damping"),
            )
            .changed();
    });

    changed |= ui
        .checkbox(&mut opts.debug.show_stats, "show stats")
        .changed();

    changed
}

/// Frameless FPS / point-count readout in the top-left corner.
fn stats_overlay(ctx: &egui::Context, stats: &PanelStats) {
    egui::Window::new("stats")
        .anchor(egui::Align2::LEFT_TOP, [8.0, 8.0])
        .title_bar(false)
        .resizable(false)
        .interactable(false)
        .show(ctx, |ui| {
            ui.label(format!("{:>5.1} fps", stats.fps));
            ui.label(format!("{} points", stats.point_count));
            ui.label(format!(
                "last generation: {:.2} ms",
                stats.generation.as_secs_f64() * 1000.0
            ));
        });
}
