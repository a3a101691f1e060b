use thiserror::Error;

use crate::device::ValidationError;
use crate::mesh::{MeshError, VertexDescriptor};
use crate::shader::ShaderError;

/// Failure while building a renderer. Construction is all-or-nothing.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Shader(#[from] ShaderError),

    #[error("mesh generation failed")]
    Mesh(#[from] MeshError),

    #[error("mesh `{0}` has no submesh to draw")]
    NoSubmesh(String),

    #[error("vertex layout is empty or has overlapping attributes: {0:?}")]
    InvalidVertexLayout(VertexDescriptor),

    #[error("cannot display image: {0}")]
    InvalidImage(String),

    #[error("wgpu rejected pipeline `{label}`")]
    PipelineRejected {
        label: String,
        #[source]
        source: ValidationError,
    },

    #[error("pipeline `{label}` needs device feature {feature:?}")]
    MissingFeature {
        label: String,
        feature: wgpu::Features,
    },
}

/// Failure that ends rendering. Transient surface conditions are not errors;
/// they drop the frame instead.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("surface cannot provide a drawable")]
    Surface(#[source] wgpu::SurfaceError),
}
