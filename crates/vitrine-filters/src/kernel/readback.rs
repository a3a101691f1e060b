use vitrine_engine::device::GpuCtx;

use crate::FilterError;

const BYTES_PER_PIXEL: u32 = 16; // rgba32float

/// Copies an `rgba32float` texture into host memory, dropping row padding.
pub(super) fn read_rgba32f(
    gpu: GpuCtx<'_>,
    texture: &wgpu::Texture,
    width: u32,
    height: u32,
) -> Result<Vec<[f32; 4]>, FilterError> {
    let unpadded_bytes_per_row = width * BYTES_PER_PIXEL;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    let padded_bytes_per_row = unpadded_bytes_per_row.div_ceil(align) * align;

    let staging = gpu.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("vitrine kernel readback"),
        size: padded_bytes_per_row as wgpu::BufferAddress * height as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = gpu
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("vitrine kernel readback encoder"),
        });

    encoder.copy_texture_to_buffer(
        texture.as_image_copy(),
        wgpu::TexelCopyBufferInfo {
            buffer: &staging,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded_bytes_per_row),
                rows_per_image: Some(height),
            },
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );

    gpu.queue.submit(Some(encoder.finish()));

    let slice = staging.slice(..);
    let (tx, rx) = std::sync::mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        // The receiver outlives the poll below.
        let _ = tx.send(result);
    });

    gpu.wait_idle()?;

    rx.recv().map_err(|_| FilterError::ReadbackLost)??;

    let data = slice.get_mapped_range();
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for row in data.chunks_exact(padded_bytes_per_row as usize) {
        pixels.extend(
            row[..unpadded_bytes_per_row as usize]
                .chunks_exact(BYTES_PER_PIXEL as usize)
                .map(bytemuck::pod_read_unaligned::<[f32; 4]>),
        );
    }

    drop(data);
    staging.unmap();

    Ok(pixels)
}
