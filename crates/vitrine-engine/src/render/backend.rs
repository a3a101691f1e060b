//! The seam between renderers and the GPU API.
//!
//! Renderers are written against [`RenderBackend`] so the frame sequence can be
//! driven by wgpu ([`Gpu`]) or by a recording stand-in. Resource types are
//! grouped in [`GpuResources`] so a renderer can own them without borrowing the
//! backend that created them.

use wgpu::util::DeviceExt;

use crate::device::{validated, Drawable, Gpu, SurfaceErrorAction};
use crate::mesh::VertexDescriptor;
use crate::paint::Color;
use crate::shader::ShaderLibrary;

use super::{FrameError, SetupError};

/// Resource types produced by one backend.
pub trait GpuResources {
    type Buffer;
    type Pipeline;
    /// Command buffer under construction.
    type Commands;
    /// Presentable render target for one frame.
    type Drawable;
}

pub type BufferOf<B> = <<B as RenderBackend>::Resources as GpuResources>::Buffer;
pub type PipelineOf<B> = <<B as RenderBackend>::Resources as GpuResources>::Pipeline;
pub type CommandsOf<B> = <<B as RenderBackend>::Resources as GpuResources>::Commands;
pub type DrawableOf<B> = <<B as RenderBackend>::Resources as GpuResources>::Drawable;

/// Everything needed to compile a render pipeline for one mesh layout.
#[derive(Debug, Clone, Copy)]
pub struct PipelineDesc<'a> {
    pub label: &'a str,
    pub shader: &'a ShaderLibrary,
    pub vertex_entry: &'a str,
    pub fragment_entry: &'a str,
    pub vertex_layout: &'a VertexDescriptor,
    pub color_format: wgpu::TextureFormat,
    pub topology: wgpu::PrimitiveTopology,
    pub polygon_mode: wgpu::PolygonMode,
}

/// One cleared render pass with a single indexed draw.
pub struct MeshPass<'a, R: GpuResources> {
    pub label: &'a str,
    pub clear: Color,
    pub pipeline: &'a R::Pipeline,
    /// Bound at vertex buffer slot 0.
    pub vertex_buffer: &'a R::Buffer,
    pub index_buffer: &'a R::Buffer,
    pub index_format: wgpu::IndexFormat,
    pub index_count: u32,
}

pub trait RenderBackend {
    type Resources: GpuResources;

    /// Pixel format of the drawables this backend hands out.
    fn color_format(&self) -> wgpu::TextureFormat;

    /// Whether pipelines may rasterize triangles as lines.
    fn supports_line_fill(&self) -> bool;

    fn create_buffer(
        &self,
        label: &str,
        contents: &[u8],
        usage: wgpu::BufferUsages,
    ) -> <Self::Resources as GpuResources>::Buffer;

    fn create_pipeline(
        &self,
        desc: &PipelineDesc<'_>,
    ) -> Result<<Self::Resources as GpuResources>::Pipeline, SetupError>;

    /// Starts a command buffer; `None` when the queue cannot provide one.
    fn begin_commands(&self) -> Option<<Self::Resources as GpuResources>::Commands>;

    /// Acquires the next drawable.
    ///
    /// `Ok(None)` means the frame should be skipped (surface busy, outdated or
    /// minimized); `Err` means rendering cannot continue.
    fn next_drawable(
        &mut self,
    ) -> Result<Option<<Self::Resources as GpuResources>::Drawable>, FrameError>;

    fn encode_mesh_pass(
        &self,
        commands: &mut <Self::Resources as GpuResources>::Commands,
        drawable: &<Self::Resources as GpuResources>::Drawable,
        pass: &MeshPass<'_, Self::Resources>,
    );

    /// Submits the command buffer to the queue.
    fn commit(&self, commands: <Self::Resources as GpuResources>::Commands);

    /// Schedules the drawable for presentation.
    fn present(&self, drawable: <Self::Resources as GpuResources>::Drawable);
}

// ── wgpu ──────────────────────────────────────────────────────────────────

/// Resource types of the wgpu backend.
pub enum Wgpu {}

impl GpuResources for Wgpu {
    type Buffer = wgpu::Buffer;
    type Pipeline = wgpu::RenderPipeline;
    type Commands = wgpu::CommandEncoder;
    type Drawable = Drawable;
}

impl<'w> RenderBackend for Gpu<'w> {
    type Resources = Wgpu;

    fn color_format(&self) -> wgpu::TextureFormat {
        self.surface_format()
    }

    fn supports_line_fill(&self) -> bool {
        self.device()
            .features()
            .contains(wgpu::Features::POLYGON_MODE_LINE)
    }

    fn create_buffer(
        &self,
        label: &str,
        contents: &[u8],
        usage: wgpu::BufferUsages,
    ) -> wgpu::Buffer {
        self.device()
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage,
            })
    }

    fn create_pipeline(&self, desc: &PipelineDesc<'_>) -> Result<wgpu::RenderPipeline, SetupError> {
        create_render_pipeline(self.device(), desc)
    }

    fn begin_commands(&self) -> Option<wgpu::CommandEncoder> {
        Some(self.create_encoder("vitrine frame encoder"))
    }

    fn next_drawable(&mut self) -> Result<Option<Drawable>, FrameError> {
        match self.acquire_drawable() {
            Ok(drawable) => Ok(Some(drawable)),
            Err(err) => match self.handle_surface_error(err.clone()) {
                SurfaceErrorAction::Fatal => Err(FrameError::Surface(err)),
                action => {
                    log::debug!("dropping frame: {err} ({action:?})");
                    Ok(None)
                }
            },
        }
    }

    fn encode_mesh_pass(
        &self,
        commands: &mut wgpu::CommandEncoder,
        drawable: &Drawable,
        pass: &MeshPass<'_, Wgpu>,
    ) {
        let mut rpass = commands.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(pass.label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &drawable.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(pass.clear.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pass.pipeline);
        rpass.set_vertex_buffer(0, pass.vertex_buffer.slice(..));
        rpass.set_index_buffer(pass.index_buffer.slice(..), pass.index_format);
        rpass.draw_indexed(0..pass.index_count, 0, 0..1);
    }

    fn commit(&self, commands: wgpu::CommandEncoder) {
        self.submit(commands);
    }

    fn present(&self, drawable: Drawable) {
        drawable.present();
    }
}

/// Compiles `desc` on `device`. The pipeline uses no bind groups.
///
/// WGSL that passes the entry point scan but fails wgpu validation is a
/// [`SetupError::PipelineRejected`].
pub(crate) fn create_render_pipeline(
    device: &wgpu::Device,
    desc: &PipelineDesc<'_>,
) -> Result<wgpu::RenderPipeline, SetupError> {
    validated(device, || build_render_pipeline(device, desc)).map_err(|source| {
        SetupError::PipelineRejected {
            label: desc.label.to_owned(),
            source,
        }
    })
}

fn build_render_pipeline(device: &wgpu::Device, desc: &PipelineDesc<'_>) -> wgpu::RenderPipeline {
    let module = desc.shader.create_module(device);

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(desc.label),
        bind_group_layouts: &[],
        immediate_size: 0,
    });

    let attributes = desc.vertex_layout.wgpu_attributes();

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(desc.label),
        layout: Some(&layout),

        vertex: wgpu::VertexState {
            module: &module,
            entry_point: Some(desc.vertex_entry),
            compilation_options: Default::default(),
            buffers: &[desc.vertex_layout.buffer_layout(&attributes)],
        },

        fragment: Some(wgpu::FragmentState {
            module: &module,
            entry_point: Some(desc.fragment_entry),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: desc.color_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: desc.topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: desc.polygon_mode,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{GpuInit, HeadlessGpu};
    use crate::mesh::MeshVertex;

    // Entry points scan fine; the vertex body does not type-check.
    const MISTYPED: &str = r#"
@vertex
fn vertex_main(@location(0) p: vec3<f32>) -> @builtin(position) vec4<f32> {
    let x: f32 = true;
    return vec4<f32>(p, 1.0);
}

@fragment
fn fragment_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0);
}
"#;

    fn desc<'a>(shader: &'a ShaderLibrary, layout: &'a VertexDescriptor) -> PipelineDesc<'a> {
        PipelineDesc {
            label: "mistyped",
            shader,
            vertex_entry: "vertex_main",
            fragment_entry: "fragment_main",
            vertex_layout: layout,
            color_format: wgpu::TextureFormat::Rgba8UnormSrgb,
            topology: wgpu::PrimitiveTopology::LineList,
            polygon_mode: wgpu::PolygonMode::Fill,
        }
    }

    #[test]
    fn rejected_shader_is_a_setup_error() {
        let gpu = match HeadlessGpu::new_blocking(GpuInit::default()) {
            Ok(gpu) => gpu,
            Err(err) => {
                eprintln!("skipping: {err}");
                return;
            }
        };

        let shader = ShaderLibrary::from_wgsl("mistyped", MISTYPED).unwrap();
        assert!(shader.require(crate::shader::ShaderStage::Vertex, "vertex_main").is_ok());

        let layout = MeshVertex::descriptor();
        let err = create_render_pipeline(gpu.device(), &desc(&shader, &layout)).unwrap_err();
        assert!(matches!(err, SetupError::PipelineRejected { ref label, .. } if label == "mistyped"));
    }
}
