use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use winit::dpi::LogicalSize;

use vitrine_engine::core::{App, AppControl, FrameCtx};
use vitrine_engine::device::{Gpu, GpuCtx, GpuInit, HeadlessGpu};
use vitrine_engine::logging::{init_logging, LoggingConfig};
use vitrine_engine::paint::Color;
use vitrine_engine::render::{ImageSource, ImageViewRenderer, RenderCtx};
use vitrine_engine::window::{RedrawMode, Runtime, RuntimeConfig};
use vitrine_filters::kernel::KernelLibrary;
use vitrine_filters::{GlowFilter, Image, ImageFilter, Super8Filter, ThreeDyeFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FilterKind {
    /// Warm home-movie look
    Super8,
    /// Red, green and blue thirds
    Dye,
    /// Blurred, saturated glow screened over the image
    Glow,
}

#[derive(Parser)]
#[command(name = "vitrine-gallery")]
#[command(about = "Shows an image next to its filtered version", long_about = None)]
#[command(version)]
struct Cli {
    /// Image to filter
    #[arg(long, default_value = "assets/Image.png")]
    image: PathBuf,

    /// Filter to apply
    #[arg(short, long, value_enum, default_value_t = FilterKind::Super8)]
    filter: FilterKind,

    /// Glow blur radius in pixels
    #[arg(long, default_value_t = 10.0)]
    radius: f32,

    /// Glow saturation
    #[arg(long, default_value_t = 1.0)]
    intensity: f32,

    /// Directory holding `default.wgsl`; the built-in kernels are used otherwise
    #[arg(long, env = "VITRINE_KERNELS")]
    kernels: Option<PathBuf>,

    /// Write the filtered image here instead of opening a window
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

// Behind the letterboxed images.
const BACKGROUND: Color = Color::rgba(0.02, 0.02, 0.02, 1.0);

fn build_filter(cli: &Cli) -> Result<Box<dyn ImageFilter>> {
    let kernels = || -> Result<Arc<KernelLibrary>> {
        let library = KernelLibrary::from_bundle(cli.kernels.as_deref())
            .context("failed to load the kernel library")?;
        Ok(Arc::new(library))
    };

    Ok(match cli.filter {
        FilterKind::Super8 => Box::new(Super8Filter::new(kernels()?)),
        FilterKind::Dye => Box::new(ThreeDyeFilter::new(kernels()?)),
        FilterKind::Glow => Box::new(GlowFilter {
            radius: cli.radius,
            intensity: cli.intensity,
        }),
    })
}

fn apply(filter: &dyn ImageFilter, gpu: GpuCtx<'_>, image: &Image) -> Result<Image> {
    let output = filter
        .output_image(gpu, Some(image))
        .with_context(|| format!("filter `{}` failed", filter.name()))?;
    output.with_context(|| format!("filter `{}` produced no image", filter.name()))
}

fn run_headless(filter: &dyn ImageFilter, image: &Image, output: &Path) -> Result<()> {
    let gpu = HeadlessGpu::new_blocking(GpuInit::default())
        .context("failed to initialize a headless GPU")?;
    log::info!("using {}", gpu.adapter_info().name);

    let filtered = apply(filter, gpu.ctx(), image)?;
    filtered.save(output)?;
    log::info!("wrote {}", output.display());
    Ok(())
}

struct GalleryApp {
    original: Image,
    filter: Box<dyn ImageFilter>,
    view: Option<ImageViewRenderer>,
}

impl App for GalleryApp {
    fn on_gpu_ready(&mut self, gpu: &Gpu<'_>) -> Result<()> {
        let filtered = apply(self.filter.as_ref(), gpu.ctx(), &self.original)?;

        let original_bytes = self.original.to_rgba8();
        let filtered_bytes = filtered.to_rgba8();

        let rctx = RenderCtx::from_gpu(gpu);
        let mut view = ImageViewRenderer::new(&rctx)?;
        view.set_images(
            &rctx,
            &[
                ImageSource {
                    width: self.original.width(),
                    height: self.original.height(),
                    rgba8: &original_bytes,
                },
                ImageSource {
                    width: filtered.width(),
                    height: filtered.height(),
                    rgba8: &filtered_bytes,
                },
            ],
        )?;

        self.view = Some(view);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(view) = &self.view else {
            return AppControl::Continue;
        };
        ctx.render(BACKGROUND, |rctx, target, clear| view.render(rctx, target, clear))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(LoggingConfig::default().with_verbosity(cli.verbose));

    let image = Image::open(&cli.image)?;
    let filter = build_filter(&cli)?;
    log::info!("filter: {}", filter.name());

    if let Some(output) = &cli.output {
        return run_headless(filter.as_ref(), &image, output);
    }

    let config = RuntimeConfig {
        title: format!("vitrine gallery: {}", filter.name()),
        initial_size: LogicalSize::new(1200.0, 600.0),
        redraw: RedrawMode::OnDemand,
    };

    let app = GalleryApp {
        original: image,
        filter,
        view: None,
    };

    Runtime::run(config, GpuInit::default(), app)
}
