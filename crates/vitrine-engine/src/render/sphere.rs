use crate::mesh::{GpuMesh, GpuSubmesh, MeshData, SphereParams};
use crate::paint::Color;
use crate::shader::{ShaderError, ShaderLibrary};

use super::{FrameError, GpuResources, MeshPass, PipelineBuilder, RenderBackend, SetupError};

const DEFAULT_SHADER: &str = include_str!("shaders/sphere.wgsl");

/// Loads the embedded `vertex_main`/`fragment_main` pair.
pub fn default_shader_library() -> Result<ShaderLibrary, ShaderError> {
    ShaderLibrary::from_wgsl("sphere.wgsl", DEFAULT_SHADER)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereConfig {
    pub sphere: SphereParams,
    pub clear_color: Color,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            sphere: SphereParams::default(),
            // pale yellow
            clear_color: Color::from_srgb(1.0, 1.0, 0.8, 1.0),
        }
    }
}

/// How triangle edges end up on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireframeMode {
    /// Triangle list rasterized with `PolygonMode::Line`.
    PolygonLine,
    /// Unique triangle edges drawn as a line list.
    EdgeList,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Presented,
    /// No drawable was available; nothing was encoded.
    Dropped,
}

/// Draws one wireframe sphere per [`SphereRenderer::redraw`].
///
/// Everything the frame needs is created by [`SphereRenderer::new`], so a
/// renderer that exists can always draw.
pub struct SphereRenderer<R: GpuResources> {
    vertex_buffer: R::Buffer,
    draw: GpuSubmesh<R>,
    pipeline: R::Pipeline,
    clear_color: Color,
    wireframe: WireframeMode,
    color_format: wgpu::TextureFormat,
}

impl<R: GpuResources> SphereRenderer<R> {
    pub fn new<B>(
        backend: &B,
        config: &SphereConfig,
        shader: &ShaderLibrary,
    ) -> Result<Self, SetupError>
    where
        B: RenderBackend<Resources = R>,
    {
        let mesh = MeshData::uv_sphere(&config.sphere)?;

        let (wireframe, mesh) = if backend.supports_line_fill() {
            (WireframeMode::PolygonLine, mesh)
        } else {
            (WireframeMode::EdgeList, mesh.to_wireframe())
        };

        log::info!(
            "sphere mesh: {} vertices, {} indices, {:?}",
            mesh.vertex_count(),
            mesh.submeshes.first().map_or(0, |s| s.index_count()),
            wireframe
        );

        let GpuMesh {
            vertex_buffer,
            descriptor,
            submeshes,
            ..
        } = GpuMesh::upload(backend, &mesh, "sphere");

        let draw = submeshes
            .into_iter()
            .next()
            .ok_or_else(|| SetupError::NoSubmesh("sphere".to_string()))?;

        let polygon_mode = match wireframe {
            WireframeMode::PolygonLine => wgpu::PolygonMode::Line,
            WireframeMode::EdgeList => wgpu::PolygonMode::Fill,
        };

        let pipeline = PipelineBuilder::new(shader)
            .with_label("sphere wireframe")
            .with_topology(draw.topology)
            .with_polygon_mode(polygon_mode)
            .build(backend, &descriptor)?;

        let color_format = backend.color_format();
        Ok(Self {
            vertex_buffer,
            draw,
            pipeline,
            clear_color: config.clear_color.for_format(color_format),
            wireframe,
            color_format,
        })
    }

    pub fn wireframe(&self) -> WireframeMode {
        self.wireframe
    }

    /// Format the pipeline was compiled for.
    pub fn color_format(&self) -> wgpu::TextureFormat {
        self.color_format
    }

    pub fn index_count(&self) -> u32 {
        self.draw.index_count
    }

    /// Encodes, commits and presents one frame.
    ///
    /// Once the pass is encoded the command buffer is always committed and the
    /// drawable always presented.
    pub fn redraw<B>(&self, backend: &mut B) -> Result<FrameOutcome, FrameError>
    where
        B: RenderBackend<Resources = R>,
    {
        let Some(mut commands) = backend.begin_commands() else {
            log::debug!("no command buffer available, dropping frame");
            return Ok(FrameOutcome::Dropped);
        };

        let Some(drawable) = backend.next_drawable()? else {
            return Ok(FrameOutcome::Dropped);
        };

        backend.encode_mesh_pass(
            &mut commands,
            &drawable,
            &MeshPass {
                label: "sphere",
                clear: self.clear_color,
                pipeline: &self.pipeline,
                vertex_buffer: &self.vertex_buffer,
                index_buffer: &self.draw.index_buffer,
                index_format: self.draw.index_format,
                index_count: self.draw.index_count,
            },
        );

        backend.commit(commands);
        backend.present(drawable);
        log::trace!("sphere frame presented");

        Ok(FrameOutcome::Presented)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::ShaderStage;

    #[test]
    fn default_library_has_sphere_entry_points() {
        let lib = default_shader_library().unwrap();
        assert!(lib.has_entry_point(ShaderStage::Vertex, "vertex_main"));
        assert!(lib.has_entry_point(ShaderStage::Fragment, "fragment_main"));
    }

    #[test]
    fn default_clear_color_is_pale_yellow() {
        let c = SphereConfig::default().clear_color;
        assert_eq!((c.r, c.g, c.a), (1.0, 1.0, 1.0));
        assert!(c.b < 1.0 && c.b > 0.5);
    }
}
