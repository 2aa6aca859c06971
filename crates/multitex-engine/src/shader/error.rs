/// Shader compilation or binding-resolution failure.
#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("shader `{label}` failed to parse:\n{message}")]
    Parse { label: String, message: String },

    #[error("shader `{label}` failed validation:\n{message}")]
    Validation { label: String, message: String },

    #[error("shader has no {stage:?} entry point named `{name}`")]
    MissingEntryPoint { stage: super::Stage, name: String },

    #[error("entry point `{entry}` has no vertex input named `{name}`")]
    MissingVertexInput { entry: String, name: String },

    #[error("shader has no resource binding named `{name}`")]
    MissingResource { name: String },
}
