//! GPU rendering.
//!
//! Mesh renderers go through [`RenderBackend`] so they can be driven without a
//! GPU. The image view talks to wgpu directly through [`RenderCtx`].

mod backend;
mod ctx;
mod error;
mod image_view;
mod pipeline;
mod sphere;

pub use backend::{
    BufferOf, CommandsOf, DrawableOf, GpuResources, MeshPass, PipelineDesc, PipelineOf,
    RenderBackend, Wgpu,
};
pub use ctx::{RenderCtx, RenderTarget};
pub use error::{FrameError, SetupError};
pub use image_view::{ImageSource, ImageViewRenderer};
pub use pipeline::{PipelineBuilder, DEFAULT_FRAGMENT_ENTRY, DEFAULT_VERTEX_ENTRY};
pub use sphere::{default_shader_library, FrameOutcome, SphereConfig, SphereRenderer, WireframeMode};
