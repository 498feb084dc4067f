//! Standalone window backed by winit.
//!
//! ```no_run
//! # use glearn::{scene::SceneKind, Viewer};
//! Viewer::builder()
//!     .with_scene(SceneKind::LineTrails)
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{CursorGrabMode, Window, WindowId},
};

use crate::{
    camera::CameraController,
    error::GlearnError,
    gpu::{render_context::RenderContext, shader_composer::ShaderComposer},
    input::{Command, InputEvent, InputProcessor},
    options::Options,
    scene::{Frame, Scene, SceneInit, SceneKind},
    util::frame_timing::FrameTiming,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    scene: SceneKind,
    options: Option<Options>,
    title: Option<String>,
}

impl ViewerBuilder {
    /// Default scene, default options, title from options.
    fn new() -> Self {
        Self {
            scene: SceneKind::default(),
            options: None,
            title: None,
        }
    }

    /// Select the scene to show.
    #[must_use]
    pub fn with_scene(mut self, scene: SceneKind) -> Self {
        self.scene = scene;
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title (overrides `window.title` in the options).
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        let options = self.options.unwrap_or_default();
        let title = self
            .title
            .unwrap_or_else(|| format!("{} - {}", options.window.title, self.scene));
        Viewer {
            scene: self.scene,
            options,
            title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A window showing one scene.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    scene: SceneKind,
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed or Escape is released.
    ///
    /// # Errors
    ///
    /// Returns [`GlearnError::Viewer`] if the event loop fails, or the
    /// error that aborted startup (GPU, shader).
    pub fn run(self) -> Result<(), GlearnError> {
        let event_loop =
            EventLoop::new().map_err(|e| GlearnError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            scene_kind: self.scene,
            options: self.options,
            title: self.title,
            state: None,
            startup_error: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| GlearnError::Viewer(e.to_string()))?;

        app.startup_error.map_or(Ok(()), Err)
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    scene_kind: SceneKind,
    options: Options,
    title: String,
    state: Option<ViewerState>,
    startup_error: Option<GlearnError>,
}

/// Everything that exists once the window is open.
struct ViewerState {
    window: Arc<Window>,
    context: RenderContext,
    camera: CameraController,
    scene: Box<dyn Scene>,
    input: InputProcessor,
    timing: FrameTiming,
    uses_camera: bool,
    cursor_grabbed: bool,
    /// Unbounded cursor position accumulated from raw mouse motion while
    /// the cursor is grabbed.
    virtual_cursor: (f64, f64),
    clear_color: wgpu::Color,
}

impl ViewerApp {
    fn create_state(
        &self,
        event_loop: &ActiveEventLoop,
    ) -> Result<ViewerState, GlearnError> {
        let window_options = &self.options.window;
        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                window_options.width,
                window_options.height,
            ));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| GlearnError::Viewer(e.to_string()))?,
        );

        let inner = window.inner_size();
        let context = pollster::block_on(RenderContext::new(
            window.clone(),
            (inner.width, inner.height),
            window_options.vsync,
        ))?;

        let mut shaders =
            ShaderComposer::new(self.options.assets.shader_dir.clone())?;
        let camera = CameraController::new(&context, &self.options.camera);
        let scene = self.scene_kind.build(&mut SceneInit {
            context: &context,
            shaders: &mut shaders,
            camera_layout: &camera.layout,
            options: &self.options,
        })?;

        let [r, g, b] = window_options.clear_color;
        let mut state = ViewerState {
            window,
            context,
            camera,
            scene,
            input: InputProcessor::new(),
            timing: FrameTiming::new(window_options.target_fps),
            uses_camera: self.scene_kind.uses_camera(),
            cursor_grabbed: false,
            virtual_cursor: (0.0, 0.0),
            clear_color: wgpu::Color {
                r: f64::from(r),
                g: f64::from(g),
                b: f64::from(b),
                a: 1.0,
            },
        };
        state.set_cursor_grab(state.uses_camera);
        Ok(state)
    }
}

impl ViewerState {
    /// Grab and hide the cursor (mouse-look on), or release it.
    fn set_cursor_grab(&mut self, grab: bool) {
        if grab {
            let result = self
                .window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined));
            if let Err(e) = result {
                log::warn!("cursor grab unavailable: {e}");
            }
        } else if let Err(e) = self.window.set_cursor_grab(CursorGrabMode::None) {
            log::warn!("cursor release failed: {e}");
        }
        self.window.set_cursor_visible(!grab);
        self.cursor_grabbed = grab;
        self.input.set_look_enabled(grab);
    }

    fn handle_input(&mut self, event: InputEvent, event_loop: &ActiveEventLoop) {
        let Some(command) = self.input.handle_event(event) else {
            return;
        };
        match command {
            Command::Look { x, y } => self.camera.look(x, y),
            Command::Zoom { delta } => self.camera.zoom(delta),
            Command::Exit => event_loop.exit(),
            Command::ToggleCursorGrab => {
                if self.uses_camera {
                    self.set_cursor_grab(!self.cursor_grabbed);
                }
            }
            Command::Scene(action) => self.scene.handle_action(action),
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.camera.resize(width, height);
        self.scene.resize(&self.context.device, width, height);
    }

    fn redraw(&mut self) {
        if !self.timing.should_render() {
            return;
        }
        let dt = self.timing.tick();

        self.input
            .apply_held_movement(self.camera.camera_mut(), dt);
        self.camera.update_gpu(&self.context.queue);
        self.scene
            .update(&self.context.queue, self.camera.camera(), dt);

        let frame = match self.context.get_next_frame() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                self.context.reconfigure();
                return;
            }
            Err(e) => {
                log::error!("render error: {e:?}");
                return;
            }
        };

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.context.create_encoder();
        self.scene.render(&mut Frame {
            encoder: &mut encoder,
            target: &view,
            camera: &self.camera.bind_group,
            clear_color: self.clear_color,
        });
        self.context.submit(encoder);
        self.window.pre_present_notify();
        frame.present();
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        match self.create_state(event_loop) {
            Ok(state) => {
                state.window.request_redraw();
                self.state = Some(state);
            }
            Err(e) => {
                log::error!("failed to start viewer: {e}");
                self.startup_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => state.resize(size.width, size.height),

            WindowEvent::RedrawRequested => state.redraw(),

            WindowEvent::Focused(false) => {
                state.handle_input(InputEvent::FocusLost, event_loop);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                };
                state.handle_input(InputEvent::Scroll { delta }, event_loop);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.repeat {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let Some(action) =
                    self.options.keybindings.lookup(&format!("{code:?}"))
                else {
                    return;
                };
                let pressed = event.state == ElementState::Pressed;
                state.handle_input(InputEvent::Key { action, pressed }, event_loop);
            }

            _ => (),
        }
    }

    fn device_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };
        if !state.cursor_grabbed {
            return;
        }
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            state.virtual_cursor.0 += dx;
            state.virtual_cursor.1 += dy;
            let (x, y) = state.virtual_cursor;
            state.handle_input(
                InputEvent::CursorMoved {
                    x: x as f32,
                    y: y as f32,
                },
                event_loop,
            );
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(state) = &self.state else {
            return;
        };
        let wait = state.timing.until_next_frame();
        if wait.is_zero() {
            event_loop.set_control_flow(ControlFlow::Poll);
            state.window.request_redraw();
        } else {
            event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + wait));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let viewer = Viewer::builder().build();
        assert_eq!(viewer.scene, SceneKind::Lighting);
        assert_eq!(viewer.title, "glearn - lighting");
        assert_eq!(viewer.options, Options::default());
    }

    #[test]
    fn builder_overrides() {
        let mut options = Options::default();
        options.window.width = 1024;
        let viewer = Viewer::builder()
            .with_scene(SceneKind::LineTrails)
            .with_options(options.clone())
            .with_title("Line Trails")
            .build();
        assert_eq!(viewer.scene, SceneKind::LineTrails);
        assert_eq!(viewer.title, "Line Trails");
        assert_eq!(viewer.options, options);
    }
}
