use std::borrow::Cow;

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, NagaModuleDescriptor,
    ShaderLanguage, ShaderType,
};

use crate::error::CarLightsError;

/// Shared camera uniform layout.
pub const CAMERA_MODULE: &str =
    include_str!("../../assets/shaders/modules/camera.wgsl");
/// Distance fog helpers.
pub const FOG_MODULE: &str =
    include_str!("../../assets/shaders/modules/fog.wgsl");
/// Instanced light-streak program, with a distortion marker line.
pub const CAR_LIGHTS_SHADER: &str =
    include_str!("../../assets/shaders/raster/car_lights.wgsl");

/// Wraps `naga_oil::compose::Composer` to provide shader composition with
/// `#import` support.
///
/// Pre-loads all shared WGSL modules at construction time. Consuming shaders
/// use `#import car_lights::module_name::item` to pull in shared code. The
/// composer produces `naga::Module` IR directly, skipping WGSL re-parse at
/// runtime.
pub struct ShaderComposer {
    composer: Composer,
}

/// Shared module definition.
struct ModuleDef {
    source: &'static str,
    file_path: &'static str,
}

impl ShaderComposer {
    /// Composer with every shared module registered.
    ///
    /// # Errors
    ///
    /// Returns [`CarLightsError::ShaderCompose`] if a shared module fails to
    /// parse.
    pub fn new() -> Result<Self, CarLightsError> {
        let mut composer = Composer::default();

        // Dependency order: modules with no imports first.
        let modules: &[ModuleDef] = &[
            ModuleDef {
                source: CAMERA_MODULE,
                file_path: "modules/camera.wgsl",
            },
            ModuleDef {
                source: FOG_MODULE,
                file_path: "modules/fog.wgsl",
            },
        ];

        for m in modules {
            let _ = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source: m.source,
                    file_path: m.file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map_err(|e| {
                    CarLightsError::ShaderCompose(format!(
                        "register '{}': {e}",
                        m.file_path
                    ))
                })?;
        }

        Ok(Self { composer })
    }

    /// Compose a shader source string (which may contain `#import`
    /// directives) into a `wgpu::ShaderModule` ready for pipeline creation.
    ///
    /// # Errors
    ///
    /// Returns [`CarLightsError::ShaderCompose`] if composition fails.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        label: &str,
        source: &str,
        file_path: &str,
    ) -> Result<wgpu::ShaderModule, CarLightsError> {
        let naga_module = self.compose_naga(source, file_path)?;
        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(naga_module)),
        }))
    }

    /// Compose a shader source into a `naga::Module` without creating a wgpu
    /// shader module. Useful for testing shader composition without a GPU
    /// device.
    ///
    /// # Errors
    ///
    /// Returns [`CarLightsError::ShaderCompose`] if composition fails.
    pub fn compose_naga(
        &mut self,
        source: &str,
        file_path: &str,
    ) -> Result<naga::Module, CarLightsError> {
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source,
                file_path,
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(|e| {
                CarLightsError::ShaderCompose(format!("'{file_path}': {e}"))
            })
    }
}
