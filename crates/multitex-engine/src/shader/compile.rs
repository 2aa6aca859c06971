use std::borrow::Cow;

use super::{ShaderError, ShaderReflection};

/// A validated shader module plus the reflection data extracted from it.
pub struct CompiledShader {
    pub module: wgpu::ShaderModule,
    pub reflection: ShaderReflection,
}

/// Parses and validates WGSL into `naga` IR.
///
/// Does not touch the GPU.
pub fn parse_wgsl(label: &str, source: &str) -> Result<naga::Module, ShaderError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| ShaderError::Parse {
        label: label.to_string(),
        message: e.emit_to_string(source),
    })?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::empty(),
    )
    .validate(&module)
    .map_err(|e| ShaderError::Validation {
        label: label.to_string(),
        message: e.emit_to_string(source),
    })?;

    Ok(module)
}

/// Compiles WGSL into a wgpu shader module.
///
/// The validated IR is handed to wgpu directly, skipping a second WGSL parse.
pub fn compile_wgsl(
    device: &wgpu::Device,
    label: &str,
    source: &str,
) -> Result<CompiledShader, ShaderError> {
    let module = parse_wgsl(label, source)?;
    let reflection = ShaderReflection::from_module(&module);
    log::debug!("compiled shader `{label}`: {reflection:?}");

    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Naga(Cow::Owned(module)),
    });

    Ok(CompiledShader { module, reflection })
}
