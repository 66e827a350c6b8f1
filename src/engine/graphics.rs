use glam::{Mat4, Vec2, Vec4};
use sokol::gfx as sg;
use std::ffi::CStr;
use std::mem;

use crate::debug_print;
use crate::engine::surface::{rotate, Color, DrawSurface};
use crate::engine::text::TextRenderer;
use crate::engine::texture::{TextureId, TextureManager};

const MAX_VERTICES: usize = u16::MAX as usize + 1;
const MAX_INDICES: usize = MAX_VERTICES * 3;

#[repr(C)]
struct Vertex {
    pos: [f32; 2],
    uv: [f32; 2],
    color: [f32; 4],
}

#[repr(C)]
struct Uniforms {
    mvp: [[f32; 4]; 4],
}

/// A run of indices that share one texture
struct Batch {
    image: sg::Image,
    first_index: usize,
    index_count: usize,
}

pub struct Renderer {
    pipeline: sg::Pipeline,
    bind: sg::Bindings,
    vertices: Vec<Vertex>,
    indices: Vec<u16>,
    batches: Vec<Batch>,
    dropped_primitives: usize,
    viewport: Vec2,
    text: TextRenderer,
    pub textures: TextureManager,
}

/// Implementation for new, init, flush.
/// Handles the pipeline and shaders and all that good stuff
impl Renderer {
    pub fn new() -> Self {
        Self {
            pipeline: sg::Pipeline::default(),
            bind: sg::Bindings::default(),
            vertices: Vec::new(),
            indices: Vec::new(),
            batches: Vec::new(),
            dropped_primitives: 0,
            viewport: Vec2::new(800.0, 600.0),
            text: TextRenderer::new(),
            textures: TextureManager::new(),
        }
    }

    pub fn init(&mut self) {
        self.textures.init();

        let shader = sg::make_shader(&shader_desc(sg::query_backend()));

        let mut pipeline_desc = sg::PipelineDesc {
            shader,
            index_type: sg::IndexType::Uint16,
            ..Default::default()
        };
        pipeline_desc.layout.buffers[0].stride = mem::size_of::<Vertex>() as i32;
        pipeline_desc.layout.attrs[0] = sg::VertexAttrState {
            buffer_index: 0,
            offset: 0,
            format: sg::VertexFormat::Float2,
        }; // position
        pipeline_desc.layout.attrs[1] = sg::VertexAttrState {
            buffer_index: 0,
            offset: 8,
            format: sg::VertexFormat::Float2,
        }; // uv
        pipeline_desc.layout.attrs[2] = sg::VertexAttrState {
            buffer_index: 0,
            offset: 16,
            format: sg::VertexFormat::Float4,
        }; // color
        pipeline_desc.colors[0].blend = sg::BlendState {
            enabled: true,
            src_factor_rgb: sg::BlendFactor::SrcAlpha,
            dst_factor_rgb: sg::BlendFactor::OneMinusSrcAlpha,
            src_factor_alpha: sg::BlendFactor::One,
            dst_factor_alpha: sg::BlendFactor::OneMinusSrcAlpha,
            ..Default::default()
        };
        self.pipeline = sg::make_pipeline(&pipeline_desc);

        // Streamed every frame
        let vbuf = sg::make_buffer(&sg::BufferDesc {
            size: MAX_VERTICES * mem::size_of::<Vertex>(),
            usage: sg::BufferUsage {
                vertex_buffer: true,
                stream_update: true,
                ..Default::default()
            },
            ..Default::default()
        });

        let ibuf = sg::make_buffer(&sg::BufferDesc {
            size: MAX_INDICES * mem::size_of::<u16>(),
            usage: sg::BufferUsage {
                index_buffer: true,
                stream_update: true,
                ..Default::default()
            },
            ..Default::default()
        });

        self.bind.vertex_buffers[0] = vbuf;
        self.bind.index_buffer = ibuf;
        self.bind.samplers[0] = self.textures.sampler();

        println!("Renderer initialized with shaders and buffers");
    }

    /// Sets the pixel space draw calls are made in. The projection always
    /// maps it onto the whole framebuffer, so a resized window stretches the
    /// scene instead of revealing more of it.
    pub fn with_logical_size(mut self, width: f32, height: f32) -> Self {
        self.viewport = Vec2::new(width.max(1.0), height.max(1.0));
        self
    }

    /// Uploads everything queued this frame and draws it
    pub fn flush(&mut self) {
        if self.dropped_primitives > 0 {
            debug_print!("renderer full, dropped {} primitives", self.dropped_primitives);
            self.dropped_primitives = 0;
        }

        if self.indices.is_empty() {
            self.vertices.clear();
            self.batches.clear();
            return;
        }

        sg::update_buffer(
            self.bind.vertex_buffers[0],
            &sg::Range {
                ptr: self.vertices.as_ptr() as *const _,
                size: self.vertices.len() * mem::size_of::<Vertex>(),
            },
        );

        sg::update_buffer(
            self.bind.index_buffer,
            &sg::Range {
                ptr: self.indices.as_ptr() as *const _,
                size: self.indices.len() * mem::size_of::<u16>(),
            },
        );

        // Logical pixel coordinates, origin top-left, y down
        let ortho = Mat4::orthographic_rh(0.0, self.viewport.x, self.viewport.y, 0.0, -1.0, 1.0);
        let uniforms = Uniforms {
            mvp: ortho.to_cols_array_2d(),
        };

        sg::apply_pipeline(self.pipeline);
        for batch in &self.batches {
            self.bind.images[0] = batch.image;
            sg::apply_bindings(&self.bind);
            sg::apply_uniforms(
                0,
                &sg::Range {
                    ptr: &uniforms as *const _ as *const _,
                    size: mem::size_of::<Uniforms>(),
                },
            );
            sg::draw(batch.first_index, batch.index_count, 1);
        }

        // Clear for next frame
        self.vertices.clear();
        self.indices.clear();
        self.batches.clear();
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Geometry builders
impl Renderer {
    /// Reserves room for a primitive, opening a new batch when the texture
    /// changes. Returns the first vertex index, or `None` when the frame is full.
    fn begin_primitive(&mut self, image: sg::Image, vertex_count: usize, index_count: usize) -> Option<u16> {
        if self.vertices.len() + vertex_count > MAX_VERTICES
            || self.indices.len() + index_count > MAX_INDICES
        {
            self.dropped_primitives += 1;
            return None;
        }

        let same_texture = self
            .batches
            .last()
            .is_some_and(|batch| batch.image.id == image.id);
        if !same_texture {
            self.batches.push(Batch {
                image,
                first_index: self.indices.len(),
                index_count: 0,
            });
        }

        if let Some(batch) = self.batches.last_mut() {
            batch.index_count += index_count;
        }

        Some(self.vertices.len() as u16)
    }

    fn push_quad(&mut self, image: sg::Image, corners: [Vec2; 4], uvs: [Vec2; 4], colors: [Vec4; 4]) {
        let Some(start) = self.begin_primitive(image, 4, 6) else {
            return;
        };

        for i in 0..4 {
            self.vertices.push(Vertex {
                pos: corners[i].to_array(),
                uv: uvs[i].to_array(),
                color: colors[i].to_array(),
            });
        }

        self.indices.extend_from_slice(&[
            start, start + 1, start + 2,
            start, start + 2, start + 3,
        ]);
    }

    fn push_solid_quad(&mut self, corners: [Vec2; 4], color: Color) {
        let white = self.textures.get_white_texture();
        let c = color.to_vec4();
        self.push_quad(white, corners, [Vec2::ZERO; 4], [c; 4]);
    }

    fn push_fan(&mut self, points: &[Vec2], color: Color) {
        if points.len() < 3 {
            return;
        }
        let white = self.textures.get_white_texture();
        let n = points.len();
        let Some(start) = self.begin_primitive(white, n, (n - 2) * 3) else {
            return;
        };

        let c = color.to_vec4().to_array();
        for p in points {
            self.vertices.push(Vertex {
                pos: p.to_array(),
                uv: [0.0, 0.0],
                color: c,
            });
        }
        for i in 1..(n as u16 - 1) {
            self.indices.extend_from_slice(&[start, start + i, start + i + 1]);
        }
    }
}

impl DrawSurface for Renderer {
    fn size(&self) -> Vec2 {
        self.viewport
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        let segments = ((radius * 1.5) as usize).clamp(8, 48);
        let points: Vec<Vec2> = (0..segments)
            .map(|i| {
                let angle = (i as f32 / segments as f32) * 2.0 * std::f32::consts::PI;
                center + Vec2::new(angle.cos(), angle.sin()) * radius
            })
            .collect();
        self.push_fan(&points, color);
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        let delta = to - from;
        if delta.length_squared() == 0.0 || width <= 0.0 {
            return;
        }
        let normal = delta.perp().normalize() * (width * 0.5);
        self.push_solid_quad([from + normal, to + normal, to - normal, from - normal], color);
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.push_fan(points, color);
    }

    fn outline_polygon(&mut self, points: &[Vec2], width: f32, color: Color) {
        if points.len() < 2 {
            return;
        }
        for i in 0..points.len() {
            let next = (i + 1) % points.len();
            self.line(points[i], points[next], width, color);
        }
    }

    fn text(&mut self, position: Vec2, text: &str, size: f32, color: Color) {
        let dot = TextRenderer::dot_size(size);
        for corner in self.text.layout(position, text, size) {
            self.push_solid_quad(
                [
                    corner,
                    corner + Vec2::new(dot, 0.0),
                    corner + Vec2::new(dot, dot),
                    corner + Vec2::new(0.0, dot),
                ],
                color,
            );
        }
    }

    fn blit(&mut self, texture: TextureId, center: Vec2, size: Vec2, rotation: f32) {
        let Some(image) = self.textures.get_texture(texture) else {
            debug_print!("blit of unknown texture {:?}", texture);
            return;
        };

        let half = size * 0.5;
        let corners = [
            Vec2::new(-half.x, -half.y),
            Vec2::new(half.x, -half.y),
            Vec2::new(half.x, half.y),
            Vec2::new(-half.x, half.y),
        ]
        .map(|c| center + rotate(c, rotation));
        let uvs = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];

        self.push_quad(image, corners, uvs, [Vec4::ONE; 4]);
    }

    fn fill_vertical_gradient(&mut self, top: Color, bottom: Color) {
        let white = self.textures.get_white_texture();
        let (w, h) = (self.viewport.x, self.viewport.y);
        let (t, b) = (top.to_vec4(), bottom.to_vec4());
        self.push_quad(
            white,
            [Vec2::ZERO, Vec2::new(w, 0.0), Vec2::new(w, h), Vec2::new(0.0, h)],
            [Vec2::ZERO; 4],
            [t, t, b, b],
        );
    }
}

const HLSL_VS: &CStr = c"
cbuffer uniforms : register(b0) {
    float4x4 mvp;
};
struct vs_in {
    float2 position : POSITION;
    float2 uv       : TEXCOORD0;
    float4 color    : COLOR0;
};
struct vs_out {
    float2 uv       : TEXCOORD0;
    float4 color    : COLOR0;
    float4 position : SV_Position;
};
vs_out main(vs_in inp) {
    vs_out outp;
    outp.position = mul(mvp, float4(inp.position, 0.0, 1.0));
    outp.uv = inp.uv;
    outp.color = inp.color;
    return outp;
}
";

const HLSL_FS: &CStr = c"
Texture2D<float4> tex : register(t0);
SamplerState smp : register(s0);
float4 main(float2 uv : TEXCOORD0, float4 color : COLOR0) : SV_Target0 {
    return tex.Sample(smp, uv) * color;
}
";

const GLSL_VS: &CStr = c"#version 410
uniform mat4 mvp;
layout(location=0) in vec2 position;
layout(location=1) in vec2 texcoord0;
layout(location=2) in vec4 color0;
out vec2 uv;
out vec4 color;
void main() {
    gl_Position = mvp * vec4(position, 0.0, 1.0);
    uv = texcoord0;
    color = color0;
}
";

const GLSL_FS: &CStr = c"#version 410
uniform sampler2D tex;
in vec2 uv;
in vec4 color;
out vec4 frag_color;
void main() {
    frag_color = texture(tex, uv) * color;
}
";

const MSL_VS: &CStr = c"
#include <metal_stdlib>
using namespace metal;
struct params_t { float4x4 mvp; };
struct vs_in {
    float2 position [[attribute(0)]];
    float2 uv [[attribute(1)]];
    float4 color [[attribute(2)]];
};
struct vs_out {
    float4 position [[position]];
    float2 uv;
    float4 color;
};
vertex vs_out _main(vs_in inp [[stage_in]], constant params_t& params [[buffer(0)]]) {
    vs_out outp;
    outp.position = params.mvp * float4(inp.position, 0.0, 1.0);
    outp.uv = inp.uv;
    outp.color = inp.color;
    return outp;
}
";

const MSL_FS: &CStr = c"
#include <metal_stdlib>
using namespace metal;
struct fs_in {
    float4 position [[position]];
    float2 uv;
    float4 color;
};
fragment float4 _main(fs_in inp [[stage_in]], texture2d<float> tex [[texture(0)]], sampler smp [[sampler(0)]]) {
    return tex.sample(smp, inp.uv) * inp.color;
}
";

fn shader_desc(backend: sg::Backend) -> sg::ShaderDesc {
    let mut desc = sg::ShaderDesc::new();

    match backend {
        sg::Backend::D3d11 => {
            desc.vertex_func.source = HLSL_VS.as_ptr();
            desc.fragment_func.source = HLSL_FS.as_ptr();
        }
        sg::Backend::MetalIos | sg::Backend::MetalMacos | sg::Backend::MetalSimulator => {
            desc.vertex_func.source = MSL_VS.as_ptr();
            desc.vertex_func.entry = c"_main".as_ptr();
            desc.fragment_func.source = MSL_FS.as_ptr();
            desc.fragment_func.entry = c"_main".as_ptr();
        }
        _ => {
            desc.vertex_func.source = GLSL_VS.as_ptr();
            desc.fragment_func.source = GLSL_FS.as_ptr();
        }
    }

    desc.attrs[0].glsl_name = c"position".as_ptr();
    desc.attrs[0].hlsl_sem_name = c"POSITION".as_ptr();
    desc.attrs[1].glsl_name = c"texcoord0".as_ptr();
    desc.attrs[1].hlsl_sem_name = c"TEXCOORD".as_ptr();
    desc.attrs[2].glsl_name = c"color0".as_ptr();
    desc.attrs[2].hlsl_sem_name = c"COLOR".as_ptr();

    desc.uniform_blocks[0].stage = sg::ShaderStage::Vertex;
    desc.uniform_blocks[0].size = mem::size_of::<Uniforms>() as u32;
    desc.uniform_blocks[0].hlsl_register_b_n = 0; // register(b0)
    desc.uniform_blocks[0].msl_buffer_n = 0;
    desc.uniform_blocks[0].glsl_uniforms[0].glsl_name = c"mvp".as_ptr();
    desc.uniform_blocks[0].glsl_uniforms[0]._type = sg::UniformType::Mat4;

    desc.images[0].stage = sg::ShaderStage::Fragment;
    desc.images[0].image_type = sg::ImageType::Dim2;
    desc.images[0].sample_type = sg::ImageSampleType::Float;
    desc.images[0].hlsl_register_t_n = 0;
    desc.images[0].msl_texture_n = 0;

    desc.samplers[0].stage = sg::ShaderStage::Fragment;
    desc.samplers[0].sampler_type = sg::SamplerType::Filtering;
    desc.samplers[0].hlsl_register_s_n = 0;
    desc.samplers[0].msl_sampler_n = 0;

    desc.image_sampler_pairs[0].stage = sg::ShaderStage::Fragment;
    desc.image_sampler_pairs[0].image_slot = 0;
    desc.image_sampler_pairs[0].sampler_slot = 0;
    desc.image_sampler_pairs[0].glsl_name = c"tex".as_ptr();

    desc
}
