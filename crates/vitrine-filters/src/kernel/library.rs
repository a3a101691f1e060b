use std::path::{Path, PathBuf};

use vitrine_engine::shader::{ShaderLibrary, ShaderStage};

use super::{Kernel, KernelSignature};
use crate::KernelError;

const EMBEDDED: &str = include_str!("../kernels/default.wgsl");

/// WGSL source holding one or more `@compute` kernels.
#[derive(Debug, Clone)]
pub struct KernelLibrary {
    shader: ShaderLibrary,
}

impl KernelLibrary {
    pub const DEFAULT_NAME: &'static str = "default";

    /// The library compiled into the crate.
    pub fn embedded() -> Result<Self, KernelError> {
        let shader = ShaderLibrary::from_wgsl("default.wgsl (embedded)", EMBEDDED)?;
        Ok(Self { shader })
    }

    /// Loads `<dir>/<name>.wgsl`.
    pub fn load(dir: impl AsRef<Path>, name: &str) -> Result<Self, KernelError> {
        let path = bundle_path(dir.as_ref(), name);
        if !path.is_file() {
            return Err(KernelError::LibraryNotFound(path));
        }
        let shader = ShaderLibrary::load(&path)?;
        log::info!("kernel library loaded from {}", path.display());
        Ok(Self { shader })
    }

    /// The `default` library from `dir`, or the embedded one without a bundle.
    pub fn from_bundle(dir: Option<&Path>) -> Result<Self, KernelError> {
        match dir {
            Some(dir) => Self::load(dir, Self::DEFAULT_NAME),
            None => Self::embedded(),
        }
    }

    pub fn label(&self) -> &str {
        self.shader.label()
    }

    pub fn has_kernel(&self, name: &str) -> bool {
        self.shader.has_entry_point(ShaderStage::Compute, name)
    }

    /// Compiles the kernel named by `signature`.
    pub fn kernel(
        &self,
        device: &wgpu::Device,
        signature: KernelSignature,
    ) -> Result<Kernel, KernelError> {
        let entry = self.shader.require(ShaderStage::Compute, signature.name)?;
        log::info!("compiling kernel `{entry}` from `{}`", self.shader.label());
        Kernel::compile(device, &self.shader, signature)
    }
}

fn bundle_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(name).with_extension("wgsl")
}
