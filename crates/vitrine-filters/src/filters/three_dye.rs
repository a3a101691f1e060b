use std::sync::Arc;

use vitrine_engine::device::GpuCtx;

use super::kernel_filter::LazyKernel;
use super::ImageFilter;
use crate::kernel::{KernelLibrary, KernelSignature};
use crate::{FilterError, Image};

pub const DYE_IN_THREE: KernelSignature = KernelSignature {
    name: "dyeInThree",
    vectors: 3,
};

/// Tints the left, middle and right thirds of the image red, green and blue.
pub struct ThreeDyeFilter {
    kernel: LazyKernel,
    tints: [[f32; 3]; 3],
}

impl ThreeDyeFilter {
    pub const REDDISH: [f32; 3] = [1.1, 0.1, 0.1];
    pub const GREENISH: [f32; 3] = [0.1, 1.1, 0.1];
    pub const BLUEISH: [f32; 3] = [0.1, 0.1, 1.1];

    pub fn new(library: Arc<KernelLibrary>) -> Self {
        Self {
            kernel: LazyKernel::new(library, DYE_IN_THREE),
            tints: [Self::REDDISH, Self::GREENISH, Self::BLUEISH],
        }
    }
}

impl ImageFilter for ThreeDyeFilter {
    fn name(&self) -> &'static str {
        DYE_IN_THREE.name
    }

    fn output_image(
        &self,
        gpu: GpuCtx<'_>,
        input: Option<&Image>,
    ) -> Result<Option<Image>, FilterError> {
        self.kernel.apply_full(gpu, input, &self.tints)
    }
}
