//! Road scene: two opposing light sets under one camera.
//!
//! The engine owns the GPU context, camera, depth target and both
//! [`CarLights`] sets. Callers feed elapsed time with
//! [`update`](RoadSceneEngine::update) and draw with
//! [`render`](RoadSceneEngine::render).

use glam::Vec3;
use rand::{rngs::StdRng, SeedableRng};
use web_time::Instant;

use crate::{
    camera::controller::CameraController,
    error::CarLightsError,
    gpu::{
        render_context::RenderContext, shader_composer::ShaderComposer,
        texture::DepthTarget,
    },
    options::{CarLightsOptions, Options},
    renderer::car_lights::{CarLights, CarLightsDescriptor},
    util::frame_timing::FrameTiming,
};

/// Renders the road scene into a surface or an external texture view.
pub struct RoadSceneEngine {
    context: RenderContext,
    camera: CameraController,
    depth: DepthTarget,
    shader_composer: ShaderComposer,
    left_lights: CarLights,
    right_lights: CarLights,
    options: Options,
    frame_timing: FrameTiming,
    start: Instant,
}

impl RoadSceneEngine {
    /// Create a render context on `window` and build the scene.
    ///
    /// # Errors
    ///
    /// Returns [`CarLightsError::Gpu`] if the GPU context cannot be created,
    /// or a shader error if a light pipeline fails to build.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
    ) -> Result<Self, CarLightsError> {
        let context = RenderContext::new(window, size).await?;
        Self::from_context(context, options)
    }

    fn from_context(
        context: RenderContext,
        options: Options,
    ) -> Result<Self, CarLightsError> {
        let mut shader_composer = ShaderComposer::new()?;
        let camera = CameraController::new(&context, &options.camera);
        let depth = DepthTarget::new(
            &context.device,
            context.config.width,
            context.config.height,
        );
        let (left_lights, right_lights) = Self::build_lights(
            &context,
            &camera,
            &options,
            &mut shader_composer,
        )?;

        log::info!(
            "road scene ready: {} + {} light instances",
            left_lights.instance_count(),
            right_lights.instance_count()
        );

        Ok(Self {
            context,
            camera,
            depth,
            shader_composer,
            left_lights,
            right_lights,
            options,
            frame_timing: FrameTiming::new(0),
            start: Instant::now(),
        })
    }

    fn build_lights(
        context: &RenderContext,
        camera: &CameraController,
        options: &Options,
        shader_composer: &mut ShaderComposer,
    ) -> Result<(CarLights, CarLights), CarLightsError> {
        let center = options.road.roadway_center();
        let mut build = |label: &str, lights: &CarLightsOptions, x: f32| {
            let instances = lights.instance_config(&options.road);
            let mut rng = lights.seed.map_or_else(
                || StdRng::from_rng(&mut rand::rng()),
                StdRng::seed_from_u64,
            );
            CarLights::new(
                context,
                &camera.layout,
                &CarLightsDescriptor {
                    label,
                    instances: &instances,
                    distortion: lights.distortion,
                    fade: lights.fade,
                    fog: &options.fog,
                    origin: Vec3::new(x, 0.0, 0.0),
                },
                &mut rng,
                shader_composer,
            )
        };
        let left = build("Left Car Lights", &options.left_lights, -center)?;
        let right = build("Right Car Lights", &options.right_lights, center)?;
        Ok((left, right))
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace the options and rebuild both light sets with fresh layouts.
    ///
    /// # Errors
    ///
    /// Returns a shader error if a light pipeline fails to build; the
    /// previous scene is kept in that case.
    pub fn set_options(
        &mut self,
        options: Options,
    ) -> Result<(), CarLightsError> {
        let (left, right) = Self::build_lights(
            &self.context,
            &self.camera,
            &options,
            &mut self.shader_composer,
        )?;
        self.left_lights = left;
        self.right_lights = right;
        self.camera.apply_options(&options.camera);
        self.options = options;
        // Re-apply the current time so new sets pick up mid-animation.
        self.update(self.elapsed());
        Ok(())
    }

    /// Seconds since the engine was created.
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    /// Set the time uniform on both light sets.
    pub fn update(&mut self, elapsed: f32) {
        self.left_lights.update(elapsed);
        self.right_lights.update(elapsed);
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }

    /// Whether the frame limiter allows a frame now.
    #[must_use]
    pub fn should_render(&self) -> bool {
        self.frame_timing.should_render()
    }

    /// Limit rendering to `target_fps` (0 = unlimited).
    pub fn set_target_fps(&mut self, target_fps: u32) {
        self.frame_timing.set_target_fps(target_fps);
    }

    /// Resize the surface, depth target and camera aspect. Minimized
    /// windows (zero size) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        let (width, height) = self.context.size();
        self.depth = DepthTarget::new(&self.context.device, width, height);
        self.camera.resize(width, height);
    }

    /// Render one frame to the window surface. Frames lost to a stale or
    /// busy surface are dropped silently.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the surface fails in a way
    /// reconfiguring cannot fix.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let Some(frame) = self.context.acquire_frame()? else {
            return Ok(());
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.render_to_view(&view);
        frame.present();
        Ok(())
    }

    fn render_to_view(&mut self, view: &wgpu::TextureView) {
        self.camera.update_gpu(&self.context.queue);
        self.left_lights.flush(&self.context.queue);
        self.right_lights.flush(&self.context.queue);

        let [r, g, b] = self.options.fog.color;
        let mut encoder = self.context.device.create_command_encoder(
            &wgpu::CommandEncoderDescriptor {
                label: Some("Road Scene Encoder"),
            },
        );
        {
            let mut rp =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Road Scene Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color {
                                    r: f64::from(r),
                                    g: f64::from(g),
                                    b: f64::from(b),
                                    a: 1.0,
                                }),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: &self.depth.view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Discard,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    ..Default::default()
                });

            self.left_lights.draw(&mut rp, &self.camera.bind_group);
            self.right_lights.draw(&mut rp, &self.camera.bind_group);
        }
        self.context.submit(encoder);

        if let Some(fps) = self.frame_timing.end_frame() {
            log::debug!("{fps:.1} fps");
        }
    }
}
