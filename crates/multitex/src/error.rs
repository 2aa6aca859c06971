use std::fmt;

use multitex_engine::shader::ShaderError;
use multitex_engine::texture::TextureError;

/// Which of the two maps a texture plays in the blend.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TextureRole {
    BaseMap,
    LightMap,
}

impl fmt::Display for TextureRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BaseMap => f.write_str("base map"),
            Self::LightMap => f.write_str("light map"),
        }
    }
}

/// Reasons the render pass cannot start.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("shader program could not be built")]
    Shader(#[from] ShaderError),

    #[error("binding `{name}` lives in group {group}; only group {expected} is bound")]
    BindGroup {
        name: String,
        group: u32,
        expected: u32,
    },

    #[error("failed to load {role} texture")]
    Texture {
        role: TextureRole,
        #[source]
        source: TextureError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::path::PathBuf;

    #[test]
    fn texture_error_keeps_role_and_source() {
        let err = InitError::Texture {
            role: TextureRole::LightMap,
            source: TextureError::Empty {
                path: PathBuf::from("world3.bmp"),
            },
        };
        assert_eq!(err.to_string(), "failed to load light map texture");
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some("bitmap world3.bmp has no pixels".to_string())
        );
    }

    #[test]
    fn shader_error_converts() {
        let err: InitError = ShaderError::MissingResource {
            name: "base_map".to_string(),
        }
        .into();
        assert!(matches!(err, InitError::Shader(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn anyhow_chain_includes_path() {
        let err = anyhow::Error::from(InitError::Texture {
            role: TextureRole::BaseMap,
            source: TextureError::Empty {
                path: PathBuf::from("China.bmp"),
            },
        });
        let chain = format!("{err:#}");
        assert!(chain.contains("base map"));
        assert!(chain.contains("China.bmp"));
    }
}
