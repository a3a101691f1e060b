use std::sync::{Arc, OnceLock};

use vitrine_engine::coords::PixelRect;
use vitrine_engine::device::GpuCtx;

use crate::kernel::{Kernel, KernelLibrary, KernelSignature};
use crate::{FilterError, Image};

/// A library kernel compiled on first use and kept for the filter's lifetime.
///
/// The cached kernel belongs to the device it was first compiled on.
pub(super) struct LazyKernel {
    library: Arc<KernelLibrary>,
    signature: KernelSignature,
    compiled: OnceLock<Kernel>,
}

impl LazyKernel {
    pub(super) fn new(library: Arc<KernelLibrary>, signature: KernelSignature) -> Self {
        Self {
            library,
            signature,
            compiled: OnceLock::new(),
        }
    }

    pub(super) fn get(&self, device: &wgpu::Device) -> Result<&Kernel, FilterError> {
        if let Some(kernel) = self.compiled.get() {
            return Ok(kernel);
        }
        let kernel = self.library.kernel(device, self.signature)?;
        Ok(self.compiled.get_or_init(|| kernel))
    }

    pub(super) fn is_compiled(&self) -> bool {
        self.compiled.get().is_some()
    }

    /// Applies the kernel over the whole input with an identity ROI.
    pub(super) fn apply_full(
        &self,
        gpu: GpuCtx<'_>,
        input: Option<&Image>,
        vectors: &[[f32; 3]],
    ) -> Result<Option<Image>, FilterError> {
        let Some(input) = input else { return Ok(None) };

        let kernel = self.get(gpu.device)?;
        kernel
            .apply(gpu, input, input.extent(), identity_roi, vectors)
            .map(Some)
    }
}

/// Each destination pixel reads only the source pixel under it.
pub(super) fn identity_roi(_input: usize, rect: PixelRect) -> PixelRect {
    rect
}
