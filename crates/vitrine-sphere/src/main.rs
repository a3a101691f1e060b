use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use winit::dpi::LogicalSize;

use vitrine_engine::core::{App, AppControl, FrameCtx};
use vitrine_engine::device::{Gpu, GpuInit};
use vitrine_engine::logging::{init_logging, LoggingConfig};
use vitrine_engine::render::{
    default_shader_library, FrameOutcome, SphereConfig, SphereRenderer, Wgpu,
};
use vitrine_engine::shader::ShaderLibrary;
use vitrine_engine::window::{RedrawMode, Runtime, RuntimeConfig};

#[derive(Parser)]
#[command(name = "vitrine-sphere")]
#[command(about = "Draws a wireframe UV sphere", long_about = None)]
#[command(version)]
struct Cli {
    /// WGSL file declaring `vertex_main` and `fragment_main`
    #[arg(long, env = "VITRINE_SPHERE_SHADER")]
    shader: Option<PathBuf>,

    /// Window title
    #[arg(long, default_value = "vitrine sphere")]
    title: String,

    /// Window width in logical pixels
    #[arg(long, default_value = "800")]
    width: f64,

    /// Window height in logical pixels
    #[arg(long, default_value = "800")]
    height: f64,

    /// Redraw every frame instead of only when asked
    #[arg(long)]
    continuous: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

struct SphereApp {
    shader: ShaderLibrary,
    config: SphereConfig,
    renderer: Option<SphereRenderer<Wgpu>>,
}

impl App for SphereApp {
    fn on_gpu_ready(&mut self, gpu: &Gpu<'_>) -> Result<()> {
        let renderer = SphereRenderer::new(gpu, &self.config, &self.shader)
            .context("failed to build the sphere renderer")?;
        log::info!(
            "sphere ready: {:?} wireframe, {} indices",
            renderer.wireframe(),
            renderer.index_count()
        );
        self.renderer = Some(renderer);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(renderer) = &self.renderer else {
            return AppControl::Continue;
        };

        match renderer.redraw(&mut *ctx.gpu) {
            Ok(FrameOutcome::Presented) => AppControl::Continue,
            // The next resize or expose asks again.
            Ok(FrameOutcome::Dropped) => AppControl::Continue,
            Err(err) => {
                log::error!("rendering stopped: {err}");
                AppControl::Exit
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(LoggingConfig::default().with_verbosity(cli.verbose));

    let shader = match &cli.shader {
        Some(path) => ShaderLibrary::load(path)
            .with_context(|| format!("failed to load shader library {}", path.display()))?,
        None => default_shader_library()?,
    };

    let config = RuntimeConfig {
        title: cli.title,
        initial_size: LogicalSize::new(cli.width, cli.height),
        redraw: if cli.continuous {
            RedrawMode::Continuous
        } else {
            RedrawMode::OnDemand
        },
    };

    let app = SphereApp {
        shader,
        config: SphereConfig::default(),
        renderer: None,
    };

    Runtime::run(config, GpuInit::default(), app)
}
