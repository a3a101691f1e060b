use super::{DeviceError, GpuInit};

/// Adapter + device + queue, as returned by [`request_device`].
pub(crate) struct DeviceParts {
    pub adapter: wgpu::Adapter,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

pub(crate) fn create_instance() -> wgpu::Instance {
    // Use all backends to allow wgpu to select the optimal platform backend.
    wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    })
}

/// Selects an adapter (compatible with `surface` when given) and opens a device on it.
pub(crate) async fn request_device(
    instance: &wgpu::Instance,
    surface: Option<&wgpu::Surface<'_>>,
    init: &GpuInit,
    label: &str,
) -> Result<DeviceParts, DeviceError> {
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: surface,
            force_fallback_adapter: false,
        })
        .await?;

    let info = adapter.get_info();
    log::info!("selected GPU adapter: {} ({:?})", info.name, info.backend);

    let required_features = init.features_for(adapter.features());
    if !required_features.contains(init.optional_features) {
        log::info!(
            "adapter lacks optional features {:?}",
            init.optional_features - required_features
        );
    }

    let (device, queue) = adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some(label),
            required_features,
            required_limits: init.required_limits.clone(),
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::Off,
        })
        .await?;

    Ok(DeviceParts {
        adapter,
        device,
        queue,
    })
}
