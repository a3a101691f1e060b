//! Side-by-side display of still images.
//!
//! Each image is uploaded once as an sRGB texture and drawn as one quad,
//! aspect-fit into its column of the target.

use crate::coords::{Rect, Vec2, Viewport};
use crate::paint::Color;
use crate::shader::{ShaderLibrary, ShaderStage};

use super::{RenderCtx, RenderTarget, SetupError};

const SHADER: &str = include_str!("shaders/image_view.wgsl");

/// sRGB-encoded, straight-alpha RGBA8 pixels, row-major.
#[derive(Debug, Clone, Copy)]
pub struct ImageSource<'a> {
    pub width: u32,
    pub height: u32,
    pub rgba8: &'a [u8],
}

struct ImageTexture {
    size: Vec2,
    // Keeps the texture alive for the bind group.
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

pub struct ImageViewRenderer {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    images: Vec<ImageTexture>,
}

impl ImageViewRenderer {
    pub fn new(ctx: &RenderCtx<'_>) -> Result<Self, SetupError> {
        let library = ShaderLibrary::from_wgsl("image_view.wgsl", SHADER)?;
        let vertex_entry = library.require(ShaderStage::Vertex, "vertex_main")?;
        let fragment_entry = library.require(ShaderStage::Fragment, "fragment_main")?;
        let shader = library.create_module(ctx.device);

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("vitrine image bgl"),
                    entries: &[
                        wgpu::BindGroupLayoutEntry {
                            binding: 0,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Texture {
                                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                                view_dimension: wgpu::TextureViewDimension::D2,
                                multisampled: false,
                            },
                            count: None,
                        },
                        wgpu::BindGroupLayoutEntry {
                            binding: 1,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                            count: None,
                        },
                    ],
                });

        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("vitrine image pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("vitrine image pipeline"),
                layout: Some(&pipeline_layout),

                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some(vertex_entry),
                    compilation_options: Default::default(),
                    buffers: &[],
                },

                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some(fragment_entry),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },

                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            });

        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("vitrine image sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        Ok(Self {
            pipeline,
            bind_group_layout,
            sampler,
            images: Vec::new(),
        })
    }

    /// Replaces the displayed images, left to right.
    pub fn set_images(
        &mut self,
        ctx: &RenderCtx<'_>,
        images: &[ImageSource<'_>],
    ) -> Result<(), SetupError> {
        let max_dim = ctx.device.limits().max_texture_dimension_2d;

        let mut uploaded = Vec::with_capacity(images.len());
        for (i, image) in images.iter().enumerate() {
            check_source(i, image, max_dim)?;
            uploaded.push(self.upload(ctx, i, image));
        }

        log::debug!("image view: {} images uploaded", uploaded.len());
        self.images = uploaded;
        Ok(())
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Where each image lands inside `viewport`.
    pub fn layout(&self, viewport: Viewport) -> Vec<Rect> {
        layout_views(viewport, self.images.iter().map(|t| t.size))
    }

    /// Clears the target and draws every image into its slot.
    pub fn render(&self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, clear: Color) {
        let rects = self.layout(ctx.viewport);

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("vitrine image pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);

        for (image, rect) in self.images.iter().zip(rects) {
            if rect.is_empty() {
                continue;
            }
            rpass.set_viewport(rect.origin.x, rect.origin.y, rect.size.x, rect.size.y, 0.0, 1.0);
            rpass.set_bind_group(0, &image.bind_group, &[]);
            rpass.draw(0..6, 0..1);
        }
    }

    fn upload(&self, ctx: &RenderCtx<'_>, index: usize, image: &ImageSource<'_>) -> ImageTexture {
        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(&format!("vitrine image {index}")),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            image.rgba8,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(image.width * 4),
                rows_per_image: Some(image.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("vitrine image bind group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        ImageTexture {
            size: Vec2::new(image.width as f32, image.height as f32),
            _texture: texture,
            bind_group,
        }
    }
}

fn check_source(index: usize, image: &ImageSource<'_>, max_dim: u32) -> Result<(), SetupError> {
    if image.width == 0 || image.height == 0 {
        return Err(SetupError::InvalidImage(format!("image {index} is empty")));
    }
    if image.width > max_dim || image.height > max_dim {
        return Err(SetupError::InvalidImage(format!(
            "image {index} is {}x{}, device limit is {max_dim}",
            image.width, image.height
        )));
    }
    let expected = image.width as usize * image.height as usize * 4;
    if image.rgba8.len() != expected {
        return Err(SetupError::InvalidImage(format!(
            "image {index} has {} bytes, expected {expected}",
            image.rgba8.len()
        )));
    }
    Ok(())
}

/// One equal column per image, each image aspect-fit into its column.
fn layout_views(viewport: Viewport, sizes: impl ExactSizeIterator<Item = Vec2>) -> Vec<Rect> {
    let columns = viewport.bounds().columns(sizes.len());
    columns
        .into_iter()
        .zip(sizes)
        .map(|(column, size)| column.aspect_fit(size))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_images_split_the_window() {
        let sizes = [Vec2::new(100.0, 100.0), Vec2::new(100.0, 50.0)];
        let rects = layout_views(Viewport::new(800.0, 400.0), sizes.into_iter());
        assert_eq!(rects[0], Rect::new(0.0, 0.0, 400.0, 400.0));
        assert_eq!(rects[1], Rect::new(400.0, 100.0, 400.0, 200.0));
    }

    #[test]
    fn no_images_no_slots() {
        assert!(layout_views(Viewport::new(800.0, 400.0), std::iter::empty()).is_empty());
    }

    #[test]
    fn source_byte_count_must_match_extent() {
        let pixels = [0u8; 12];
        let short = ImageSource { width: 2, height: 2, rgba8: &pixels };
        assert!(matches!(check_source(0, &short, 8192), Err(SetupError::InvalidImage(_))));

        let ok = ImageSource { width: 3, height: 1, rgba8: &pixels };
        assert!(check_source(0, &ok, 8192).is_ok());
        assert!(check_source(0, &ok, 2).is_err());
    }
}
