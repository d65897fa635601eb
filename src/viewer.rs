//! Standalone visualization window backed by winit.
//!
//! ```no_run
//! # use car_lights::Viewer;
//! Viewer::builder()
//!     .with_title("Night Drive")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```
//!
//! Keys: `D` cycles the road distortion, `R` rebuilds both light sets with a
//! fresh random layout.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::{
    engine::RoadSceneEngine, error::CarLightsError, lights::DistortionPreset,
    options::Options,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
    target_fps: u32,
}

impl ViewerBuilder {
    /// Create a builder with sensible defaults (title "Car Lights", default
    /// options, unlimited frame rate).
    fn new() -> Self {
        Self {
            options: None,
            title: "Car Lights".into(),
            target_fps: 0,
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Cap the frame rate (0 = unlimited).
    #[must_use]
    pub fn with_target_fps(mut self, target_fps: u32) -> Self {
        self.target_fps = target_fps;
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
            target_fps: self.target_fps,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays the road scene.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
    target_fps: u32,
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
    /// Returns [`CarLightsError::Viewer`] if the event loop cannot be
    /// created or exits with an error.
    pub fn run(self) -> Result<(), CarLightsError> {
        let event_loop = EventLoop::new()
            .map_err(|e| CarLightsError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            options: Some(self.options),
            title: self.title,
            target_fps: self.target_fps,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| CarLightsError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<RoadSceneEngine>,
    /// Taken when the engine is created.
    options: Option<Options>,
    title: String,
    target_fps: u32,
}

/// The preset after `current`, wrapping around.
fn next_distortion(current: DistortionPreset) -> DistortionPreset {
    let all = DistortionPreset::ALL;
    let i = all.iter().position(|&p| p == current).unwrap_or(0);
    all[(i + 1) % all.len()]
}

impl ViewerApp {
    fn handle_key(&mut self, code: KeyCode) {
        let Some(engine) = &mut self.engine else {
            return;
        };
        let mut options = engine.options().clone();
        match code {
            KeyCode::KeyD => {
                let next = next_distortion(options.left_lights.distortion);
                options.left_lights.distortion = next;
                options.right_lights.distortion = next;
                log::info!("distortion: {next:?}");
            }
            KeyCode::KeyR => {
                options.left_lights.seed = None;
                options.right_lights.seed = None;
                log::info!("regenerating light layout");
            }
            _ => return,
        }
        if let Err(e) = engine.set_options(options) {
            log::error!("Failed to apply options: {e}");
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let inner = window.inner_size();
        let options = self.options.take().unwrap_or_default();
        let mut engine = match pollster::block_on(RoadSceneEngine::new(
            window.clone(),
            (inner.width, inner.height),
            options,
        )) {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };
        engine.set_target_fps(self.target_fps);

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::Resized(size) => {
                if let Some(engine) = &mut self.engine {
                    engine.resize(size.width, size.height);
                }
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => self.handle_key(code),

            WindowEvent::RedrawRequested => {
                let (Some(window), Some(engine)) =
                    (&self.window, &mut self.engine)
                else {
                    return;
                };
                if engine.should_render() {
                    engine.update(engine.elapsed());
                    if let Err(e) = engine.render() {
                        log::error!("render failed: {e}");
                        event_loop.exit();
                        return;
                    }
                }
                window.request_redraw();
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distortion_cycle_visits_every_preset() {
        let mut current = DistortionPreset::None;
        let mut seen = vec![current];
        for _ in 1..DistortionPreset::ALL.len() {
            current = next_distortion(current);
            seen.push(current);
        }
        assert_eq!(seen, DistortionPreset::ALL.to_vec());
        assert_eq!(next_distortion(current), DistortionPreset::None);
    }

    #[test]
    fn builder_defaults() {
        let viewer = Viewer::builder().build();
        assert_eq!(viewer.title, "Car Lights");
        assert_eq!(viewer.target_fps, 0);
        assert_eq!(viewer.options, Options::default());
    }
}
