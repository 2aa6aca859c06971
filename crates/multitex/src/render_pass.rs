//! The multi-texture render pass.
//!
//! One program, two textures on two units, one indexed draw of a fixed quad.

use wgpu::util::DeviceExt;

use multitex_engine::coords::ColorRgba;
use multitex_engine::device::Gpu;
use multitex_engine::render::{RenderCtx, RenderTarget};
use multitex_engine::shader::{compile_wgsl, ResourceSlot, ShaderReflection, Stage};
use multitex_engine::texture::{load_bitmap_texture, GpuTexture, SamplerParams};

use crate::config::AssetPaths;
use crate::error::{InitError, TextureRole};
use crate::geometry::{Vertex, QUAD_INDICES, QUAD_VERTICES, TRIANGLE_COUNT};

pub const SHADER_SOURCE: &str = include_str!("shaders/multitex.wgsl");

const SHADER_LABEL: &str = "multitex shader";
const VERTEX_ENTRY: &str = "vs_main";
const FRAGMENT_ENTRY: &str = "fs_main";

/// The only bind group the pass uses.
const TEXTURE_GROUP: u32 = 0;

// ── binding slots ─────────────────────────────────────────────────────────

/// Binding indices of one texture unit: the texture and its sampler.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TextureUnit {
    pub texture: u32,
    pub sampler: u32,
}

/// Everything the pass looks up by name in the compiled program.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BindingSlots {
    pub position: u32,
    pub tex_coord: u32,
    /// Unit 0.
    pub base_map: TextureUnit,
    /// Unit 1.
    pub light_map: TextureUnit,
}

impl BindingSlots {
    pub fn resolve(reflection: &ShaderReflection) -> Result<Self, InitError> {
        reflection.require_entry_point(Stage::Vertex, VERTEX_ENTRY)?;
        reflection.require_entry_point(Stage::Fragment, FRAGMENT_ENTRY)?;

        let slots = Self {
            position: reflection.vertex_input(VERTEX_ENTRY, "position")?,
            tex_coord: reflection.vertex_input(VERTEX_ENTRY, "tex_coord")?,
            base_map: texture_unit(reflection, "base_map")?,
            light_map: texture_unit(reflection, "light_map")?,
        };

        log::debug!("resolved binding slots: {slots:?}");
        Ok(slots)
    }
}

fn texture_unit(reflection: &ShaderReflection, name: &str) -> Result<TextureUnit, InitError> {
    let sampler_name = format!("{name}_sampler");
    Ok(TextureUnit {
        texture: in_texture_group(name, reflection.resource(name)?)?,
        sampler: in_texture_group(&sampler_name, reflection.resource(&sampler_name)?)?,
    })
}

fn in_texture_group(name: &str, slot: ResourceSlot) -> Result<u32, InitError> {
    if slot.group != TEXTURE_GROUP {
        return Err(InitError::BindGroup {
            name: name.to_string(),
            group: slot.group,
            expected: TEXTURE_GROUP,
        });
    }
    Ok(slot.binding)
}

// ── program ───────────────────────────────────────────────────────────────

/// Linked pipeline + the layout its textures are bound through.
struct ShaderProgram {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
}

impl ShaderProgram {
    fn build(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
    ) -> Result<(Self, BindingSlots), InitError> {
        let shader = compile_wgsl(device, SHADER_LABEL, SHADER_SOURCE)?;
        let slots = BindingSlots::resolve(&shader.reflection)?;

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("multitex bgl"),
            entries: &[
                texture_layout_entry(slots.base_map.texture),
                sampler_layout_entry(slots.base_map.sampler),
                texture_layout_entry(slots.light_map.texture),
                sampler_layout_entry(slots.light_map.sampler),
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("multitex pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let attributes = Vertex::attributes(slots.position, slots.tex_coord);

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("multitex pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader.module,
                entry_point: Some(VERTEX_ENTRY),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout(&attributes)],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader.module,
                entry_point: Some(FRAGMENT_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    // Output replaces the cleared color; no blending.
                    blend: None,
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

        Ok((
            Self {
                pipeline,
                bind_group_layout,
            },
            slots,
        ))
    }
}

fn texture_layout_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    }
}

fn sampler_layout_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

// ── render state ──────────────────────────────────────────────────────────

/// What [`RenderState::shutdown`] freed.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Released {
    pub textures: usize,
    pub programs: usize,
}

/// GPU resources of the pass, created once and released once.
pub struct RenderState {
    program: ShaderProgram,
    slots: BindingSlots,

    base_map: GpuTexture,
    light_map: GpuTexture,
    texture_units: wgpu::BindGroup,

    quad_vbo: wgpu::Buffer,
    quad_ibo: wgpu::Buffer,

    clear_color: ColorRgba,
}

impl RenderState {
    /// Builds the program, resolves its slots and loads both bitmaps.
    ///
    /// Anything created before a failing step is dropped on the error path.
    pub fn initialize(
        gpu: &Gpu<'_>,
        assets: &AssetPaths,
        sampler: &SamplerParams,
    ) -> Result<Self, InitError> {
        Self::with_device(gpu.device(), gpu.queue(), gpu.surface_format(), assets, sampler)
    }

    /// Same as [`RenderState::initialize`] without a window surface.
    pub fn with_device(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        assets: &AssetPaths,
        sampler: &SamplerParams,
    ) -> Result<Self, InitError> {
        let (program, slots) = ShaderProgram::build(device, surface_format)?;

        let base_map = load_bitmap_texture(device, queue, &assets.base_map, sampler)
            .map_err(|source| InitError::Texture {
                role: TextureRole::BaseMap,
                source,
            })?;
        let light_map = load_bitmap_texture(device, queue, &assets.light_map, sampler)
            .map_err(|source| InitError::Texture {
                role: TextureRole::LightMap,
                source,
            })?;

        // Unit 0 ← base map, unit 1 ← light map.
        let texture_units = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("multitex texture units"),
            layout: &program.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: slots.base_map.texture,
                    resource: wgpu::BindingResource::TextureView(&base_map.view),
                },
                wgpu::BindGroupEntry {
                    binding: slots.base_map.sampler,
                    resource: wgpu::BindingResource::Sampler(&base_map.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: slots.light_map.texture,
                    resource: wgpu::BindingResource::TextureView(&light_map.view),
                },
                wgpu::BindGroupEntry {
                    binding: slots.light_map.sampler,
                    resource: wgpu::BindingResource::Sampler(&light_map.sampler),
                },
            ],
        });

        let quad_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("multitex quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let quad_ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("multitex quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        log::debug!(
            "quad uploaded: {} vertices, {} indices, {TRIANGLE_COUNT} triangles",
            QUAD_VERTICES.len(),
            QUAD_INDICES.len()
        );

        Ok(Self {
            program,
            slots,
            base_map,
            light_map,
            texture_units,
            quad_vbo,
            quad_ibo,
            clear_color: ColorRgba::transparent(),
        })
    }

    /// Color the frame is cleared to before the quad is drawn.
    pub fn clear_color(&self) -> ColorRgba {
        self.clear_color
    }

    pub fn slots(&self) -> BindingSlots {
        self.slots
    }

    /// Records the quad draw into `target`.
    ///
    /// The target has already been cleared; the viewport spans `ctx.viewport`.
    pub fn draw(&self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("multitex pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        let (x, y, w, h, min_depth, max_depth) = ctx.viewport.to_wgpu();
        rpass.set_viewport(x, y, w, h, min_depth, max_depth);

        rpass.set_pipeline(&self.program.pipeline);
        rpass.set_vertex_buffer(0, self.quad_vbo.slice(..));
        rpass.set_bind_group(TEXTURE_GROUP, &self.texture_units, &[]);
        rpass.set_index_buffer(self.quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
    }

    /// Releases both textures and the program.
    pub fn shutdown(self) -> Released {
        let Self {
            program,
            slots: _,
            base_map,
            light_map,
            texture_units,
            quad_vbo,
            quad_ibo,
            clear_color: _,
        } = self;

        let mut released = Released::default();

        drop(texture_units);
        for texture in [base_map, light_map] {
            texture.release();
            released.textures += 1;
        }
        quad_vbo.destroy();
        quad_ibo.destroy();
        drop(program);
        released.programs += 1;

        log::info!(
            "released {} textures and {} shader program",
            released.textures,
            released.programs
        );
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blend::LIGHT_BIAS;
    use image::{Rgb, RgbImage};
    use multitex_engine::shader::{parse_wgsl, ShaderError};
    use multitex_engine::texture::TextureError;
    use std::path::{Path, PathBuf};

    fn slots_for(source: &str) -> Result<BindingSlots, InitError> {
        let module = parse_wgsl("test", source).map_err(InitError::from)?;
        BindingSlots::resolve(&ShaderReflection::from_module(&module))
    }

    fn noop_device() -> (wgpu::Device, wgpu::Queue) {
        wgpu::Device::noop(&wgpu::DeviceDescriptor::default())
    }

    fn write_bmp(dir: &Path, name: &str, rgb: [u8; 3]) -> PathBuf {
        let path = dir.join(name);
        RgbImage::from_pixel(4, 2, Rgb(rgb))
            .save_with_format(&path, image::ImageFormat::Bmp)
            .unwrap();
        path
    }

    fn state_for(assets: &AssetPaths) -> Result<RenderState, InitError> {
        let (device, queue) = noop_device();
        RenderState::with_device(
            &device,
            &queue,
            wgpu::TextureFormat::Rgba8Unorm,
            assets,
            &SamplerParams::default(),
        )
    }

    // ── lifecycle ───────────────────────────────────────────────────────────

    #[test]
    fn initialize_then_shutdown_releases_two_textures_and_one_program() {
        let dir = tempfile::tempdir().unwrap();
        let assets = AssetPaths {
            base_map: write_bmp(dir.path(), "China.bmp", [200, 100, 50]),
            light_map: write_bmp(dir.path(), "world3.bmp", [10, 20, 30]),
        };

        let state = state_for(&assets).unwrap();
        assert_eq!(state.clear_color(), ColorRgba::transparent());
        assert_eq!(state.slots().base_map, TextureUnit { texture: 0, sampler: 1 });
        assert_eq!((state.base_map.width, state.base_map.height), (4, 2));
        assert_eq!((state.light_map.width, state.light_map.height), (4, 2));

        assert_eq!(state.shutdown(), Released { textures: 2, programs: 1 });
    }

    #[test]
    fn missing_base_map_fails_init() {
        let dir = tempfile::tempdir().unwrap();
        let assets = AssetPaths {
            base_map: dir.path().join("China.bmp"),
            light_map: write_bmp(dir.path(), "world3.bmp", [10, 20, 30]),
        };

        let err = state_for(&assets).err().unwrap();
        assert!(
            matches!(
                &err,
                InitError::Texture { role: TextureRole::BaseMap, source: TextureError::Io { .. } }
            ),
            "got {err:?}"
        );
    }

    #[test]
    fn corrupt_light_map_fails_init() {
        let dir = tempfile::tempdir().unwrap();
        let light_map = dir.path().join("world3.bmp");
        std::fs::write(&light_map, b"not a bitmap").unwrap();
        let assets = AssetPaths {
            base_map: write_bmp(dir.path(), "China.bmp", [200, 100, 50]),
            light_map,
        };

        let err = state_for(&assets).err().unwrap();
        assert!(
            matches!(
                &err,
                InitError::Texture { role: TextureRole::LightMap, source: TextureError::Decode { .. } }
            ),
            "got {err:?}"
        );
    }

    // ── binding slots ───────────────────────────────────────────────────────

    #[test]
    fn shader_slots_resolve_by_name() {
        let slots = slots_for(SHADER_SOURCE).unwrap();
        assert_eq!(slots.position, 0);
        assert_eq!(slots.tex_coord, 1);
        assert_eq!(slots.base_map, TextureUnit { texture: 0, sampler: 1 });
        assert_eq!(slots.light_map, TextureUnit { texture: 2, sampler: 3 });
    }

    #[test]
    fn texture_units_do_not_overlap() {
        let s = slots_for(SHADER_SOURCE).unwrap();
        let mut bindings = [
            s.base_map.texture,
            s.base_map.sampler,
            s.light_map.texture,
            s.light_map.sampler,
        ];
        bindings.sort_unstable();
        assert!(bindings.windows(2).all(|w| w[0] != w[1]));
    }

    #[test]
    fn missing_sampler_is_fatal() {
        let source = SHADER_SOURCE.replace("light_map_sampler", "lm_sampler");
        let err = slots_for(&source).unwrap_err();
        assert!(
            matches!(&err, InitError::Shader(ShaderError::MissingResource { name }) if name == "light_map_sampler"),
            "got {err:?}"
        );
    }

    #[test]
    fn renamed_attribute_is_fatal() {
        let source = SHADER_SOURCE
            .replace("tex_coord: vec2<f32>) -> VsOut", "uv: vec2<f32>) -> VsOut")
            .replace("out.tex_coord = tex_coord;", "out.tex_coord = uv;");
        let err = slots_for(&source).unwrap_err();
        assert!(
            matches!(&err, InitError::Shader(ShaderError::MissingVertexInput { name, .. }) if name == "tex_coord"),
            "got {err:?}"
        );
    }

    #[test]
    fn texture_outside_group_zero_is_rejected() {
        let source = SHADER_SOURCE.replace(
            "@group(0) @binding(2) var light_map:",
            "@group(1) @binding(2) var light_map:",
        );
        let err = slots_for(&source).unwrap_err();
        assert!(
            matches!(&err, InitError::BindGroup { group: 1, expected: 0, .. }),
            "got {err:?}"
        );
    }

    #[test]
    fn broken_shader_is_a_shader_error() {
        let err = slots_for("@fragment fn fs_main( {").unwrap_err();
        assert!(matches!(err, InitError::Shader(ShaderError::Parse { .. })));
    }

    #[test]
    fn shader_bias_matches_cpu_reference() {
        let module = parse_wgsl("multitex", SHADER_SOURCE).unwrap();
        let (_, constant) = module
            .constants
            .iter()
            .find(|(_, c)| c.name.as_deref() == Some("LIGHT_BIAS"))
            .expect("LIGHT_BIAS constant");

        match module.global_expressions[constant.init] {
            naga::Expression::Literal(naga::Literal::F32(v)) => assert_eq!(v, LIGHT_BIAS),
            ref other => panic!("unexpected LIGHT_BIAS initializer: {other:?}"),
        }
    }
}
