//! End-to-end tests for the sphere renderer.
//! A recording backend stands in for the GPU so the frame sequence can be
//! checked call by call.
use std::cell::{Cell, RefCell};

use vitrine_engine::mesh::SphereParams;
use vitrine_engine::paint::Color;
use vitrine_engine::render::{
    FrameError, FrameOutcome, GpuResources, MeshPass, PipelineDesc, RenderBackend, SetupError,
    SphereConfig, SphereRenderer, WireframeMode,
};
use vitrine_engine::shader::{ShaderError, ShaderLibrary};

const STUB_SHADERS: &str = r#"
@vertex
fn vertex_main(@location(0) p: vec3<f32>) -> @builtin(position) vec4<f32> {
    return vec4<f32>(p, 1.0);
}

@fragment
fn fragment_main() -> @location(0) vec4<f32> {
    return vec4<f32>(0.0, 0.0, 0.0, 1.0);
}
"#;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    CreateBuffer { label: String, len: usize },
    CreatePipeline,
    BeginCommands,
    NextDrawable,
    Encode { index_count: u32, clear: Color },
    Commit { passes: usize },
    Present { frame: u32 },
}

#[derive(Debug, Clone, PartialEq)]
struct PipelineRecord {
    color_format: wgpu::TextureFormat,
    topology: wgpu::PrimitiveTopology,
    polygon_mode: wgpu::PolygonMode,
    vertex_entry: String,
    fragment_entry: String,
    stride: u64,
}

#[derive(Debug)]
struct BufferRecord {
    len: usize,
}

#[derive(Debug, Default)]
struct CommandRecord {
    passes: usize,
}

enum Stub {}

impl GpuResources for Stub {
    type Buffer = BufferRecord;
    type Pipeline = PipelineRecord;
    type Commands = CommandRecord;
    type Drawable = u32;
}

struct RecordingBackend {
    format: wgpu::TextureFormat,
    line_fill: bool,
    /// Frames for which no drawable is available.
    busy: Cell<u32>,
    fatal: bool,
    next_frame: u32,
    calls: RefCell<Vec<Call>>,
    pipelines: RefCell<Vec<PipelineRecord>>,
}

impl RecordingBackend {
    fn new(line_fill: bool) -> Self {
        Self {
            format: wgpu::TextureFormat::Bgra8UnormSrgb,
            line_fill,
            busy: Cell::new(0),
            fatal: false,
            next_frame: 0,
            calls: RefCell::new(Vec::new()),
            pipelines: RefCell::new(Vec::new()),
        }
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn frame_calls(&self) -> Vec<Call> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| !matches!(c, Call::CreateBuffer { .. } | Call::CreatePipeline))
            .cloned()
            .collect()
    }

    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }
}

impl RenderBackend for RecordingBackend {
    type Resources = Stub;

    fn color_format(&self) -> wgpu::TextureFormat {
        self.format
    }

    fn supports_line_fill(&self) -> bool {
        self.line_fill
    }

    fn create_buffer(&self, label: &str, contents: &[u8], _usage: wgpu::BufferUsages) -> BufferRecord {
        self.record(Call::CreateBuffer {
            label: label.to_string(),
            len: contents.len(),
        });
        BufferRecord { len: contents.len() }
    }

    fn create_pipeline(&self, desc: &PipelineDesc<'_>) -> Result<PipelineRecord, SetupError> {
        self.record(Call::CreatePipeline);
        let record = PipelineRecord {
            color_format: desc.color_format,
            topology: desc.topology,
            polygon_mode: desc.polygon_mode,
            vertex_entry: desc.vertex_entry.to_string(),
            fragment_entry: desc.fragment_entry.to_string(),
            stride: desc.vertex_layout.stride,
        };
        self.pipelines.borrow_mut().push(record.clone());
        Ok(record)
    }

    fn begin_commands(&self) -> Option<CommandRecord> {
        self.record(Call::BeginCommands);
        Some(CommandRecord::default())
    }

    fn next_drawable(&mut self) -> Result<Option<u32>, FrameError> {
        self.record(Call::NextDrawable);
        if self.fatal {
            return Err(FrameError::Surface(wgpu::SurfaceError::OutOfMemory));
        }
        if self.busy.get() > 0 {
            self.busy.set(self.busy.get() - 1);
            return Ok(None);
        }
        self.next_frame += 1;
        Ok(Some(self.next_frame))
    }

    fn encode_mesh_pass(&self, commands: &mut CommandRecord, _drawable: &u32, pass: &MeshPass<'_, Stub>) {
        assert!(pass.vertex_buffer.len > 0);
        assert!(pass.index_buffer.len > 0);
        commands.passes += 1;
        self.record(Call::Encode {
            index_count: pass.index_count,
            clear: pass.clear,
        });
    }

    fn commit(&self, commands: CommandRecord) {
        self.record(Call::Commit {
            passes: commands.passes,
        });
    }

    fn present(&self, drawable: u32) {
        self.record(Call::Present { frame: drawable });
    }
}

fn stub_library() -> ShaderLibrary {
    ShaderLibrary::from_wgsl("stub.wgsl", STUB_SHADERS).unwrap()
}

fn renderer(backend: &RecordingBackend) -> SphereRenderer<Stub> {
    SphereRenderer::new(backend, &SphereConfig::default(), &stub_library()).unwrap()
}

#[test]
fn one_redraw_commits_and_presents_once() {
    let mut backend = RecordingBackend::new(true);
    let sphere = renderer(&backend);

    let outcome = sphere.redraw(&mut backend).unwrap();
    assert_eq!(outcome, FrameOutcome::Presented);

    let config = SphereConfig::default();
    assert_eq!(
        backend.frame_calls(),
        vec![
            Call::BeginCommands,
            Call::NextDrawable,
            Call::Encode {
                index_count: 19_800 * 3,
                clear: config.clear_color,
            },
            Call::Commit { passes: 1 },
            Call::Present { frame: 1 },
        ]
    );
}

#[test]
fn clear_color_is_encoded_for_non_srgb_targets() {
    let mut backend = RecordingBackend::new(true);
    backend.format = wgpu::TextureFormat::Bgra8Unorm;
    let sphere = renderer(&backend);
    sphere.redraw(&mut backend).unwrap();

    let clear = backend
        .frame_calls()
        .into_iter()
        .find_map(|c| match c {
            Call::Encode { clear, .. } => Some(clear),
            _ => None,
        })
        .unwrap();
    assert!((clear.r - 1.0).abs() < 1e-5);
    assert!((clear.g - 1.0).abs() < 1e-5);
    assert!((clear.b - 0.8).abs() < 1e-4);
}

#[test]
fn setup_uploads_one_vertex_and_one_index_buffer() {
    let backend = RecordingBackend::new(true);
    let _sphere = renderer(&backend);

    let calls = backend.calls.borrow();
    let buffers: Vec<_> = calls
        .iter()
        .filter_map(|c| match c {
            Call::CreateBuffer { label, len } => Some((label.clone(), *len)),
            _ => None,
        })
        .collect();

    // 101 x 101 vertices of 32 bytes, 16-bit indices.
    assert_eq!(
        buffers,
        vec![
            ("sphere vertices".to_string(), 101 * 101 * 32),
            ("sphere indices 0".to_string(), 19_800 * 3 * 2),
        ]
    );
    assert_eq!(backend.count(|c| *c == Call::CreatePipeline), 1);
}

#[test]
fn pipeline_targets_the_backend_color_format() {
    let backend = RecordingBackend::new(true);
    let sphere = renderer(&backend);

    assert_eq!(sphere.color_format(), wgpu::TextureFormat::Bgra8UnormSrgb);
    assert_eq!(sphere.wireframe(), WireframeMode::PolygonLine);

    let pipeline = backend.pipelines.borrow()[0].clone();
    assert_eq!(pipeline.color_format, backend.format);
    assert_eq!(pipeline.polygon_mode, wgpu::PolygonMode::Line);
    assert_eq!(pipeline.topology, wgpu::PrimitiveTopology::TriangleList);
    assert_eq!(pipeline.vertex_entry, "vertex_main");
    assert_eq!(pipeline.fragment_entry, "fragment_main");
    assert_eq!(pipeline.stride, 32);
}

#[test]
fn without_line_fill_edges_are_drawn_as_lines() {
    let mut backend = RecordingBackend::new(false);
    let sphere = renderer(&backend);

    assert_eq!(sphere.wireframe(), WireframeMode::EdgeList);
    let pipeline = backend.pipelines.borrow()[0].clone();
    assert_eq!(pipeline.topology, wgpu::PrimitiveTopology::LineList);
    assert_eq!(pipeline.polygon_mode, wgpu::PolygonMode::Fill);
    // Each unique edge once: every triangle contributes at most three.
    assert!(sphere.index_count() < 19_800 * 3 * 2);
    assert_eq!(sphere.index_count() % 2, 0);

    sphere.redraw(&mut backend).unwrap();
    assert_eq!(backend.count(|c| matches!(c, Call::Commit { .. })), 1);
    assert_eq!(backend.count(|c| matches!(c, Call::Present { .. })), 1);
}

#[test]
fn busy_surface_drops_the_frame_without_committing() {
    let mut backend = RecordingBackend::new(true);
    let sphere = renderer(&backend);
    backend.busy.set(1);

    assert_eq!(sphere.redraw(&mut backend).unwrap(), FrameOutcome::Dropped);
    assert_eq!(backend.count(|c| matches!(c, Call::Encode { .. })), 0);
    assert_eq!(backend.count(|c| matches!(c, Call::Commit { .. })), 0);
    assert_eq!(backend.count(|c| matches!(c, Call::Present { .. })), 0);

    // The next request draws normally.
    assert_eq!(sphere.redraw(&mut backend).unwrap(), FrameOutcome::Presented);
    assert_eq!(backend.count(|c| matches!(c, Call::Present { .. })), 1);
}

#[test]
fn fatal_surface_error_is_returned() {
    let mut backend = RecordingBackend::new(true);
    let sphere = renderer(&backend);
    backend.fatal = true;

    assert!(matches!(
        sphere.redraw(&mut backend),
        Err(FrameError::Surface(wgpu::SurfaceError::OutOfMemory))
    ));
    assert_eq!(backend.count(|c| matches!(c, Call::Commit { .. })), 0);
}

#[test]
fn each_redraw_request_draws_exactly_one_frame() {
    let mut backend = RecordingBackend::new(true);
    let sphere = renderer(&backend);

    for _ in 0..3 {
        sphere.redraw(&mut backend).unwrap();
    }
    assert_eq!(backend.count(|c| matches!(c, Call::Commit { passes: 1 })), 3);
    assert_eq!(backend.count(|c| matches!(c, Call::Present { .. })), 3);
}

#[test]
fn missing_entry_point_fails_construction() {
    let backend = RecordingBackend::new(true);
    let library = ShaderLibrary::from_wgsl(
        "half.wgsl",
        "@vertex fn vertex_main() -> @builtin(position) vec4<f32> { return vec4<f32>(); }",
    )
    .unwrap();

    let err = SphereRenderer::new(&backend, &SphereConfig::default(), &library)
        .err()
        .unwrap();
    assert!(matches!(
        err,
        SetupError::Shader(ShaderError::MissingEntryPoint { ref name, .. }) if name == "fragment_main"
    ));
    assert_eq!(backend.count(|c| *c == Call::CreatePipeline), 0);
}

#[test]
fn invalid_sphere_parameters_fail_construction() {
    let backend = RecordingBackend::new(true);
    let config = SphereConfig {
        sphere: SphereParams {
            segments: [2, 100],
            ..SphereParams::default()
        },
        ..SphereConfig::default()
    };

    assert!(matches!(
        SphereRenderer::new(&backend, &config, &stub_library()),
        Err(SetupError::Mesh(_))
    ));
}
