//! Standalone visualization window backed by winit.
//!
//! ```no_run
//! # use whorl::Viewer;
//! Viewer::builder()
//!     .with_debug(true)
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::application::ApplicationHandler;
use winit::event::{MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::engine::GalaxyEngine;
use crate::error::WhorlError;
use crate::galaxy::{CommitOutcome, GalaxySession};
use crate::gui::{DebugPanel, PanelStats};
use crate::input::InputEvent;
use crate::options::Options;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    debug: bool,
    title: String,
}

impl ViewerBuilder {
    /// Builder with defaults: default options, debug panel hidden, title
    /// "Whorl".
    fn new() -> Self {
        Self {
            options: None,
            debug: false,
            title: "Whorl".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Show the debug panel and stats overlay.
    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options,
            debug: self.debug,
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays the galaxy.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to enter
/// the event loop.
pub struct Viewer {
    options: Option<Options>,
    debug: bool,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`WhorlError::Viewer`] if the event loop cannot be created
    /// or fails while running.
    pub fn run(self) -> Result<(), WhorlError> {
        let event_loop =
            EventLoop::new().map_err(|e| WhorlError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            session: None,
            panel: None,
            options: self.options.unwrap_or_default(),
            debug: self.debug,
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| WhorlError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<GalaxyEngine>,
    session: Option<GalaxySession<StdRng>>,
    panel: Option<DebugPanel>,
    options: Options,
    debug: bool,
    title: String,
}

impl ViewerApp {
    /// One frame: advance the damped camera, draw the points and panel,
    /// route any committed parameter edit back into the session.
    fn redraw(&mut self) {
        let (Some(window), Some(engine), Some(session), Some(panel)) = (
            self.window.as_ref(),
            self.engine.as_mut(),
            self.session.as_mut(),
            self.panel.as_mut(),
        ) else {
            return;
        };

        engine.update_camera();

        let stats = PanelStats {
            fps: engine.fps(),
            point_count: engine.point_count(),
            generation: session.last_generation(),
        };
        let current = session.options().clone();

        let mut committed = None;
        let result = engine.render_with_overlay(|context, encoder, view| {
            committed =
                panel.draw(window, context, encoder, view, &current, &stats);
        });

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                let inner = window.inner_size();
                engine.resize(inner.width, inner.height);
            }
            Err(e) => {
                log::error!("render error: {e:?}");
            }
        }

        if let Some(edited) = committed {
            let outcome = session.commit_options(edited, engine);
            if outcome != CommitOutcome::Unchanged {
                engine.apply_camera_options(&session.options().camera);
            }
        }

        window.request_redraw();
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (mon_size.width as f64 / scale * 0.75) as u32;
            let logical_h = (mon_size.height as f64 / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let mut engine = match pollster::block_on(GalaxyEngine::new(
            window.clone(),
            (size.width.max(1), size.height.max(1)),
            &self.options.camera,
        )) {
            Ok(engine) => engine,
            Err(e) => {
                log::error!("failed to initialize GPU: {e}");
                event_loop.exit();
                return;
            }
        };

        let session =
            GalaxySession::new(self.options.clone(), StdRng::from_os_rng());
        session.attach(&mut engine);
        log::info!(
            "displaying {} points{}",
            session.field().len(),
            if self.debug { " (debug panel on)" } else { "" }
        );

        let panel = DebugPanel::new(
            &window,
            engine.context(),
            session.options(),
            self.debug,
        );

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
        self.session = Some(session);
        self.panel = Some(panel);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        // The panel sees events first; anything egui consumes stays out of
        // the camera.
        if let (Some(panel), Some(window)) =
            (self.panel.as_mut(), self.window.as_ref())
        {
            let response = panel.on_window_event(window, &event);
            if response.repaint {
                window.request_redraw();
            }
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(engine) = &mut self.engine {
                    engine.resize(size.width, size.height);
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let (Some(window), Some(engine)) =
                    (&self.window, &mut self.engine)
                {
                    let inner = window.inner_size();
                    engine.resize(inner.width, inner.height);
                }
            }

            WindowEvent::RedrawRequested => {
                self.redraw();
            }

            WindowEvent::MouseInput { button, state, .. } => {
                if let Some(engine) = &mut self.engine {
                    engine.handle_input(InputEvent::MouseButton {
                        button: button.into(),
                        pressed: state.is_pressed(),
                    });
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(engine) = &mut self.engine {
                    engine.handle_input(InputEvent::CursorMoved {
                        x: position.x as f32,
                        y: position.y as f32,
                    });
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                if let Some(engine) = &mut self.engine {
                    let delta = match delta {
                        MouseScrollDelta::LineDelta(_, y) => y,
                        MouseScrollDelta::PixelDelta(pos) => {
                            pos.y as f32 * 0.01
                        }
                    };
                    engine.handle_input(InputEvent::Scroll { delta });
                }
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                if let Some(engine) = &mut self.engine {
                    engine.handle_input(InputEvent::ModifiersChanged {
                        shift: modifiers.state().shift_key(),
                    });
                }
            }

            _ => (),
        }
    }
}
