//! Window surface, device and queue for the road scene.

use std::fmt;

/// Errors raised while bringing up the GPU for a window.
#[derive(Debug)]
pub enum RenderContextError {
    /// The window handle could not back a wgpu surface.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No adapter can present to the surface.
    AdapterRequest(wgpu::RequestAdapterError),
    /// The adapter refused the device request.
    DeviceRequest(wgpu::RequestDeviceError),
    /// The adapter reports no usable configuration for the surface.
    UnsupportedSurface,
}

impl fmt::Display for RenderContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SurfaceCreation(e) => write!(f, "cannot create surface: {e}"),
            Self::AdapterRequest(e) => write!(f, "no usable GPU adapter: {e}"),
            Self::DeviceRequest(e) => write!(f, "device request failed: {e}"),
            Self::UnsupportedSurface => {
                f.write_str("surface is not supported by the adapter")
            }
        }
    }
}

impl std::error::Error for RenderContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SurfaceCreation(e) => Some(e),
            Self::AdapterRequest(e) => Some(e),
            Self::DeviceRequest(e) => Some(e),
            Self::UnsupportedSurface => None,
        }
    }
}

/// What the render loop does after failing to acquire a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameRecovery {
    /// The swapchain no longer matches the window; reconfigure and skip.
    Reconfigure,
    /// Transient; skip this frame and try again next redraw.
    Skip,
    /// Unrecoverable; surface the error to the caller.
    Fatal,
}

impl FrameRecovery {
    /// Classify a surface acquisition error.
    #[must_use]
    pub fn for_error(error: &wgpu::SurfaceError) -> Self {
        match error {
            wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost => {
                Self::Reconfigure
            }
            wgpu::SurfaceError::Timeout => Self::Skip,
            _ => Self::Fatal,
        }
    }
}

/// Clamp a window size to something a surface can be configured with.
#[must_use]
pub fn surface_size(width: u32, height: u32) -> (u32, u32) {
    (width.max(1), height.max(1))
}

/// The presentation surface of one window plus the device drawing into it.
pub struct RenderContext {
    /// Logical device.
    pub device: wgpu::Device,
    /// Command queue.
    pub queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    /// Current surface configuration.
    pub config: wgpu::SurfaceConfiguration,
}

impl RenderContext {
    /// Create a surface on `window`, pick an adapter that can present to
    /// it, and configure it at `size`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderContextError`] naming the step that failed.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
    ) -> Result<Self, RenderContextError> {
        let (width, height) = surface_size(size.0, size.1);
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window)
            .map_err(RenderContextError::SurfaceCreation)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                power_preference: wgpu::PowerPreference::HighPerformance,
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::AdapterRequest)?;
        let info = adapter.get_info();
        log::info!(
            "GPU adapter: {} ({:?}, {:?})",
            info.name,
            info.device_type,
            info.backend
        );

        // Streaks need nothing beyond the WebGPU baseline.
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Car Lights Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults()
                    .using_resolution(adapter.limits()),
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::DeviceRequest)?;

        let mut config = surface
            .get_default_config(&adapter, width, height)
            .ok_or(RenderContextError::UnsupportedSurface)?;
        config.present_mode = wgpu::PresentMode::AutoVsync;
        surface.configure(&device, &config);
        log::debug!(
            "surface configured: {width}x{height} {:?}",
            config.format
        );

        Ok(Self {
            device,
            queue,
            surface,
            config,
        })
    }

    /// Color format of the swapchain.
    #[must_use]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Current surface size.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Reconfigure the surface for a new window size. Zero-sized
    /// dimensions (minimized windows) are clamped to one pixel.
    pub fn resize(&mut self, width: u32, height: u32) {
        let (width, height) = surface_size(width, height);
        if (width, height) == self.size() {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        log::debug!("surface resized to {width}x{height}");
    }

    /// Acquire the next swapchain texture.
    ///
    /// A lost or outdated surface is reconfigured in place and a timeout is
    /// skipped; both yield `Ok(None)` so the caller simply drops the frame.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] for failures that reconfiguring cannot
    /// fix, such as running out of memory.
    pub fn acquire_frame(
        &self,
    ) -> Result<Option<wgpu::SurfaceTexture>, wgpu::SurfaceError> {
        match self.surface.get_current_texture() {
            Ok(frame) => Ok(Some(frame)),
            Err(e) => match FrameRecovery::for_error(&e) {
                FrameRecovery::Reconfigure => {
                    log::warn!("surface {e}, reconfiguring");
                    self.surface.configure(&self.device, &self.config);
                    Ok(None)
                }
                FrameRecovery::Skip => {
                    log::debug!("surface {e}, skipping frame");
                    Ok(None)
                }
                FrameRecovery::Fatal => Err(e),
            },
        }
    }

    /// Finish `encoder` and submit it.
    pub fn submit(&self, encoder: wgpu::CommandEncoder) {
        let _ = self.queue.submit([encoder.finish()]);
    }
}
