use wgpu::util::DeviceExt;

use vitrine_engine::coords::PixelRect;
use vitrine_engine::device::{validated, GpuCtx};
use vitrine_engine::shader::ShaderLibrary;

use super::{plan_dispatch, readback, KernelParams, MAX_VECTORS};
use crate::{FilterError, Image, KernelError};

/// Entry point name and the number of colour vectors a kernel takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelSignature {
    pub name: &'static str,
    pub vectors: usize,
}

/// A compiled compute kernel with its bind group layout.
pub struct Kernel {
    signature: KernelSignature,
    layout: wgpu::BindGroupLayout,
    pipeline: wgpu::ComputePipeline,
}

impl Kernel {
    /// Compiles `signature.name` from `library`. WGSL that wgpu rejects is a
    /// [`KernelError::Compile`].
    pub(super) fn compile(
        device: &wgpu::Device,
        library: &ShaderLibrary,
        signature: KernelSignature,
    ) -> Result<Self, KernelError> {
        validated(device, || Self::build(device, library, signature)).map_err(|source| {
            KernelError::Compile {
                kernel: signature.name,
                source,
            }
        })
    }

    fn build(device: &wgpu::Device, library: &ShaderLibrary, signature: KernelSignature) -> Self {
        let module = library.create_module(device);

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(signature.name),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: false },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::StorageTexture {
                        access: wgpu::StorageTextureAccess::WriteOnly,
                        format: wgpu::TextureFormat::Rgba32Float,
                        view_dimension: wgpu::TextureViewDimension::D2,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<KernelParams>() as u64,
                        ),
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(signature.name),
            bind_group_layouts: &[&layout],
            immediate_size: 0,
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some(signature.name),
            layout: Some(&pipeline_layout),
            module: &module,
            entry_point: Some(signature.name),
            compilation_options: Default::default(),
            cache: None,
        });

        Self {
            signature,
            layout,
            pipeline,
        }
    }

    /// Runs the kernel over `extent` and reads the result back.
    ///
    /// `roi` maps the destination rect to the input pixels it needs; the answer
    /// is clamped to `input`. The output has the size of `extent`.
    pub fn apply<F>(
        &self,
        gpu: GpuCtx<'_>,
        input: &Image,
        extent: PixelRect,
        roi: F,
        vectors: &[[f32; 3]],
    ) -> Result<Image, FilterError>
    where
        F: Fn(usize, PixelRect) -> PixelRect,
    {
        let name = self.signature.name;
        if vectors.len() != self.signature.vectors || vectors.len() > MAX_VECTORS {
            return Err(FilterError::ArgumentCount {
                kernel: name,
                expected: self.signature.vectors,
                actual: vectors.len(),
            });
        }

        let plan = plan_dispatch(name, input.extent(), extent, roi)?;

        let limit = gpu.device.limits().max_texture_dimension_2d;
        for r in [plan.dest, plan.source] {
            if r.width > limit || r.height > limit {
                return Err(FilterError::TooLarge {
                    width: r.width,
                    height: r.height,
                    limit,
                });
            }
        }

        let region = input.crop(plan.source).ok_or(FilterError::EmptyRegion {
            kernel: name,
            dest: plan.dest,
        })?;

        let source = upload_rgba32f(gpu, name, &region);
        let dest = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(name),
            size: wgpu::Extent3d {
                width: plan.dest.width,
                height: plan.dest.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba32Float,
            usage: wgpu::TextureUsages::STORAGE_BINDING | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });

        let params = KernelParams::new(&plan, vectors);
        let params_ubo = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("vitrine kernel params"),
                contents: bytemuck::bytes_of(&params),
                usage: wgpu::BufferUsages::UNIFORM,
            });

        let source_view = source.create_view(&wgpu::TextureViewDescriptor::default());
        let dest_view = dest.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(name),
            layout: &self.layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&source_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&dest_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: params_ubo.as_entire_binding(),
                },
            ],
        });

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some(name) });
        {
            let mut cpass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some(name),
                timestamp_writes: None,
            });
            cpass.set_pipeline(&self.pipeline);
            cpass.set_bind_group(0, &bind_group, &[]);
            cpass.dispatch_workgroups(plan.workgroups[0], plan.workgroups[1], 1);
        }
        gpu.queue.submit(Some(encoder.finish()));

        log::debug!(
            "{name}: {}x{} workgroups over {:?}",
            plan.workgroups[0],
            plan.workgroups[1],
            plan.dest
        );

        let pixels = readback::read_rgba32f(gpu, &dest, plan.dest.width, plan.dest.height)?;
        Ok(Image::new(plan.dest.width, plan.dest.height, pixels)?)
    }
}

fn upload_rgba32f(gpu: GpuCtx<'_>, label: &str, image: &Image) -> wgpu::Texture {
    let size = wgpu::Extent3d {
        width: image.width(),
        height: image.height(),
        depth_or_array_layers: 1,
    };

    let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba32Float,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    gpu.queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        image.as_bytes(),
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(image.width() * 16),
            rows_per_image: Some(image.height()),
        },
        size,
    );

    texture
}
