use std::borrow::Cow;
use std::path::PathBuf;

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, NagaModuleDescriptor, ShaderLanguage,
    ShaderType,
};

use crate::error::GlearnError;
use crate::gpu::shaders::{EmbeddedShader, SHARED_MODULES};

/// Wraps `naga_oil::compose::Composer` to provide shader composition with
/// `#import` support.
///
/// Pre-loads the shared WGSL modules (`glearn::camera`, `glearn::lighting`)
/// at construction time. Scene shaders are read from `shader_dir` when a
/// file with the same name exists there, otherwise the copy embedded in the
/// binary is used. Every composed module is validated before it reaches
/// wgpu, so broken shaders surface as [`GlearnError::Shader`] instead of a
/// device panic.
pub struct ShaderComposer {
    composer: Composer,
    shader_dir: Option<PathBuf>,
}

impl ShaderComposer {
    /// Composer with the shared modules registered.
    ///
    /// # Errors
    ///
    /// Returns [`GlearnError::Shader`] if a shared module fails to parse.
    pub fn new(shader_dir: Option<PathBuf>) -> Result<Self, GlearnError> {
        let mut composer = Composer::default();

        // Shared modules have no dependencies on each other.
        for module in SHARED_MODULES {
            let _ = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source: module.source,
                    file_path: module.name,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map_err(|e| GlearnError::Shader {
                    path: module.name.to_owned(),
                    message: e.to_string(),
                })?;
        }

        Ok(Self {
            composer,
            shader_dir,
        })
    }

    /// Source text for `shader`: the override file if one exists, else the
    /// embedded copy.
    ///
    /// # Errors
    ///
    /// Returns [`GlearnError::Shader`] if the override exists but cannot be
    /// read.
    pub fn source_for(
        &self,
        shader: &EmbeddedShader,
    ) -> Result<Cow<'static, str>, GlearnError> {
        let Some(dir) = &self.shader_dir else {
            return Ok(Cow::Borrowed(shader.source));
        };
        let path = dir.join(shader.name);
        if !path.is_file() {
            return Ok(Cow::Borrowed(shader.source));
        }

        log::debug!("loading shader override {}", path.display());
        std::fs::read_to_string(&path)
            .map(Cow::Owned)
            .map_err(|e| GlearnError::Shader {
                path: path.display().to_string(),
                message: e.to_string(),
            })
    }

    /// Compose and validate a shader into a `naga::Module` without creating
    /// a wgpu shader module. Useful for testing without a GPU device.
    ///
    /// # Errors
    ///
    /// Returns [`GlearnError::Shader`] on composition or validation failure.
    pub fn compose_naga(
        &mut self,
        source: &str,
        file_path: &str,
    ) -> Result<naga::Module, GlearnError> {
        let module = self
            .composer
            .make_naga_module(NagaModuleDescriptor {
                source,
                file_path,
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(|e| GlearnError::Shader {
                path: file_path.to_owned(),
                message: e.to_string(),
            })?;

        let _ = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::default(),
        )
        .validate(&module)
        .map_err(|e| GlearnError::Shader {
            path: file_path.to_owned(),
            message: e.to_string(),
        })?;

        Ok(module)
    }

    /// Resolve, compose, and validate `shader`, returning a
    /// `wgpu::ShaderModule` ready for pipeline creation. Failures are
    /// logged before being returned.
    ///
    /// # Errors
    ///
    /// Returns [`GlearnError::Shader`] if the shader cannot be read,
    /// composed, or validated.
    pub fn load(
        &mut self,
        device: &wgpu::Device,
        shader: &EmbeddedShader,
    ) -> Result<wgpu::ShaderModule, GlearnError> {
        let source = self.source_for(shader)?;
        let module = self
            .compose_naga(&source, shader.name)
            .inspect_err(|e| log::error!("{e}"))?;

        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(shader.name),
            source: wgpu::ShaderSource::Naga(Cow::Owned(module)),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::shaders::SCENE_SHADERS;

    #[test]
    fn all_scene_shaders_compose() {
        let mut composer = ShaderComposer::new(None).unwrap();
        for shader in SCENE_SHADERS {
            let _ = composer
                .compose_naga(shader.source, shader.name)
                .unwrap_or_else(|e| panic!("{e}"));
        }
    }

    #[test]
    fn broken_shader_is_reported() {
        let mut composer = ShaderComposer::new(None).unwrap();
        let err = composer
            .compose_naga("@vertex fn vs_main( -> {", "broken.wgsl")
            .unwrap_err();
        match err {
            GlearnError::Shader { path, .. } => assert_eq!(path, "broken.wgsl"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn override_directory_wins_over_embedded() {
        let dir = std::env::temp_dir().join(format!(
            "glearn-shaders-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let shader = EmbeddedShader {
            name: "override_probe.wgsl",
            source: "embedded",
        };

        let composer = ShaderComposer::new(Some(dir.clone())).unwrap();
        assert_eq!(composer.source_for(&shader).unwrap(), "embedded");

        std::fs::write(dir.join(shader.name), "from disk").unwrap();
        assert_eq!(composer.source_for(&shader).unwrap(), "from disk");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
