use std::sync::Arc;

use vitrine_engine::device::GpuCtx;

use super::kernel_filter::LazyKernel;
use super::ImageFilter;
use crate::kernel::{KernelLibrary, KernelSignature};
use crate::{FilterError, Image};

pub const SUPER8: KernelSignature = KernelSignature {
    name: "super8Filter",
    vectors: 0,
};

/// Home-movie look: warm tone, lifted blacks, vignette and grain.
pub struct Super8Filter {
    kernel: LazyKernel,
}

impl Super8Filter {
    pub fn new(library: Arc<KernelLibrary>) -> Self {
        Self {
            kernel: LazyKernel::new(library, SUPER8),
        }
    }

    pub fn is_compiled(&self) -> bool {
        self.kernel.is_compiled()
    }
}

impl ImageFilter for Super8Filter {
    fn name(&self) -> &'static str {
        SUPER8.name
    }

    fn output_image(
        &self,
        gpu: GpuCtx<'_>,
        input: Option<&Image>,
    ) -> Result<Option<Image>, FilterError> {
        self.kernel.apply_full(gpu, input, &[])
    }
}
