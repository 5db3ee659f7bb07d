//! Fake resources and recording backends shared by the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use glam::Mat4;

use pigment::backend::gl::GlApi;
use pigment::backend::{
    Backend, BufferBindings, Capabilities, DrawContext, IndexDataType, PrimitiveType,
    VertexAttributes,
};
use pigment::resources::{Drawable, GpuBuffer, Mesh, MipmapMode, Shader, Texture};
use pigment::{Color, GfxError, PixelFormat, RenderTargetSetup, StateBits};

// Externally-owned resources.

pub struct FakeTexture {
    pub format: PixelFormat,
    pub width: u32,
    pub height: u32,
    pub mipmaps: u32,
    pub slices: u32,
    pub msaa: u32,
    pub readable: bool,
    pub mipmap_mode: MipmapMode,
    pub handle: u64,
    pub mipmap_generations: AtomicU32,
}

impl FakeTexture {
    pub fn new(format: PixelFormat, width: u32, height: u32) -> Self {
        Self {
            format,
            width,
            height,
            mipmaps: 1,
            slices: 1,
            msaa: 1,
            readable: true,
            mipmap_mode: MipmapMode::None,
            handle: 1,
            mipmap_generations: AtomicU32::new(0),
        }
    }

    pub fn with_handle(mut self, handle: u64) -> Self {
        self.handle = handle;
        self
    }

    pub fn with_msaa(mut self, msaa: u32) -> Self {
        self.msaa = msaa;
        self
    }

    pub fn with_slices(mut self, slices: u32) -> Self {
        self.slices = slices;
        self
    }

    pub fn with_mipmaps(mut self, count: u32, mode: MipmapMode) -> Self {
        self.mipmaps = count;
        self.mipmap_mode = mode;
        self
    }

    pub fn with_readable(mut self, readable: bool) -> Self {
        self.readable = readable;
        self
    }
}

impl Texture for FakeTexture {
    fn pixel_format(&self) -> PixelFormat {
        self.format
    }

    fn pixel_width(&self, mip: u32) -> u32 {
        (self.width >> mip).max(1)
    }

    fn pixel_height(&self, mip: u32) -> u32 {
        (self.height >> mip).max(1)
    }

    fn mipmap_count(&self) -> u32 {
        self.mipmaps
    }

    fn is_valid_slice(&self, slice: u32) -> bool {
        slice < self.slices
    }

    fn msaa_samples(&self) -> u32 {
        self.msaa
    }

    fn is_readable(&self) -> bool {
        self.readable
    }

    fn mipmap_mode(&self) -> MipmapMode {
        self.mipmap_mode
    }

    fn generate_mipmaps(&self) {
        self.mipmap_generations.fetch_add(1, Ordering::Relaxed);
    }

    fn native_handle(&self) -> u64 {
        self.handle
    }
}

pub struct FakeShader {
    pub handle: u64,
}

impl Shader for FakeShader {
    fn native_handle(&self) -> u64 {
        self.handle
    }
}

pub struct FakeBuffer {
    pub handle: u64,
}

impl GpuBuffer for FakeBuffer {
    fn native_handle(&self) -> u64 {
        self.handle
    }
}

/// Remembers the transform of every replayed draw and issues one triangle
/// through the backend, so backend-side logs see it too.
#[derive(Default)]
pub struct RecordingDrawable {
    pub transforms: Mutex<Vec<Mat4>>,
}

impl Drawable for RecordingDrawable {
    fn draw(
        &self,
        backend: &mut dyn Backend,
        _ctx: &mut DrawContext,
        transform: Mat4,
    ) -> Result<(), GfxError> {
        self.transforms.lock().unwrap().push(transform);
        backend.draw_primitives(PrimitiveType::Triangles, 0, 3, 1)
    }
}

impl Mesh for RecordingDrawable {
    fn draw_instanced(
        &self,
        backend: &mut dyn Backend,
        _ctx: &mut DrawContext,
        transform: Mat4,
        instance_count: u32,
    ) -> Result<(), GfxError> {
        self.transforms.lock().unwrap().push(transform);
        backend.draw_primitives(PrimitiveType::Triangles, 0, 3, instance_count)
    }
}

/// Draws a fixed quad range through `draw_quads`, optionally binding vertex
/// attributes first so split draws exercise offset advancing.
pub struct QuadDrawable {
    pub start: u32,
    pub count: u32,
    pub buffer: FakeBuffer,
    pub attributes: Option<(VertexAttributes, BufferBindings)>,
}

impl Drawable for QuadDrawable {
    fn draw(
        &self,
        backend: &mut dyn Backend,
        _ctx: &mut DrawContext,
        _transform: Mat4,
    ) -> Result<(), GfxError> {
        if let Some((attributes, buffers)) = &self.attributes {
            backend.set_vertex_attributes(attributes, buffers);
        }
        backend.draw_quads(self.start, self.count, &self.buffer)
    }
}

// Recorder-level backend fake.

#[derive(Clone, Debug, PartialEq)]
pub enum BackendEvent {
    Begin { backbuffer: bool, width: u32, height: u32 },
    Apply { diff: StateBits, color: Color },
    Draw { instance_count: u32 },
    End,
}

/// Pure [`Backend`] fake that logs pass lifecycle, applied state diffs and
/// draw calls.
#[derive(Default)]
pub struct FakeBackend {
    pub events: Vec<BackendEvent>,
    pub caps: Capabilities,
    pub backbuffer: (u32, u32),
    pub supported_formats: Vec<PixelFormat>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            caps: Capabilities {
                max_color_targets: 8,
                instancing: true,
                multi_format_targets: false,
                base_vertex: false,
            },
            backbuffer: (640, 480),
            supported_formats: Vec::new(),
        }
    }

    pub fn applied_diffs(&self) -> Vec<StateBits> {
        self.events
            .iter()
            .filter_map(|e| match e {
                BackendEvent::Apply { diff, .. } => Some(*diff),
                _ => None,
            })
            .collect()
    }

    pub fn applied_colors(&self) -> Vec<Color> {
        self.events
            .iter()
            .filter_map(|e| match e {
                BackendEvent::Apply { color, .. } => Some(*color),
                _ => None,
            })
            .collect()
    }

    pub fn draw_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, BackendEvent::Draw { .. }))
            .count()
    }
}

impl Backend for FakeBackend {
    fn capabilities(&self) -> Capabilities {
        self.caps
    }

    fn backbuffer_size(&self) -> (u32, u32) {
        self.backbuffer
    }

    fn supports_format(&self, format: PixelFormat) -> bool {
        self.supported_formats.contains(&format)
    }

    fn acquire_temporary_target(
        &mut self,
        format: PixelFormat,
        width: u32,
        height: u32,
        msaa: u32,
    ) -> Result<Arc<dyn Texture>, GfxError> {
        Ok(Arc::new(
            FakeTexture::new(format, width, height)
                .with_msaa(msaa)
                .with_handle(9000),
        ))
    }

    fn begin_pass(
        &mut self,
        targets: &RenderTargetSetup,
        ctx: &mut DrawContext,
    ) -> Result<(), GfxError> {
        self.events.push(BackendEvent::Begin {
            backbuffer: targets.is_backbuffer(),
            width: ctx.pass_width,
            height: ctx.pass_height,
        });
        Ok(())
    }

    fn end_pass(
        &mut self,
        _targets: &RenderTargetSetup,
        _ctx: &mut DrawContext,
    ) -> Result<(), GfxError> {
        self.events.push(BackendEvent::End);
        Ok(())
    }

    fn apply_state(&mut self, ctx: &mut DrawContext) -> Result<(), GfxError> {
        self.events.push(BackendEvent::Apply {
            diff: ctx.state_diff,
            color: ctx.color,
        });
        ctx.state_diff = StateBits::empty();
        Ok(())
    }

    fn set_vertex_attributes(&mut self, _attributes: &VertexAttributes, _buffers: &BufferBindings) {
    }

    fn draw_primitives(
        &mut self,
        _primitive: PrimitiveType,
        _first_vertex: u32,
        _vertex_count: u32,
        instance_count: u32,
    ) -> Result<(), GfxError> {
        self.events.push(BackendEvent::Draw { instance_count });
        Ok(())
    }

    fn draw_indexed(
        &mut self,
        _primitive: PrimitiveType,
        _index_count: u32,
        instance_count: u32,
        _index_type: IndexDataType,
        _index_buffer: &dyn GpuBuffer,
        _index_offset: u64,
    ) -> Result<(), GfxError> {
        self.events.push(BackendEvent::Draw { instance_count });
        Ok(())
    }

    fn draw_quads(
        &mut self,
        _start: u32,
        _count: u32,
        _quad_index_buffer: &dyn GpuBuffer,
    ) -> Result<(), GfxError> {
        self.events.push(BackendEvent::Draw { instance_count: 1 });
        Ok(())
    }
}

// GL adapter fake.

#[derive(Clone, Debug, PartialEq)]
pub enum GlCall {
    CreateFramebuffer(u32),
    DeleteFramebuffer(u32),
    BindFramebuffer { target: u32, fbo: u32 },
    FramebufferTexture { attachment: u32, texture: u64, level: u32, layer: Option<u32> },
    InvalidateFramebuffer { target: u32, attachments: Vec<u32> },
    BlitFramebuffer { width: i32, height: i32, mask: u32 },
    ResolveMultisample,
    ReadBuffer(u32),
    Clear(u32),
    ClearColor([f32; 4]),
    ClearDepth(f64),
    ClearStencil(i32),
    ClearBufferColor { index: u32, rgba: [f32; 4] },
    SetEnabled { cap: u32, enabled: bool },
    Viewport { x: i32, y: i32, width: i32, height: i32 },
    Scissor { x: i32, y: i32, width: i32, height: i32 },
    BlendEquationSeparate { rgb: u32, alpha: u32 },
    BlendFuncSeparate { src_rgb: u32, dst_rgb: u32, src_alpha: u32, dst_alpha: u32 },
    DepthFunc(u32),
    DepthMask(bool),
    StencilFunc { func: u32, reference: i32, mask: u32 },
    StencilOp { fail: u32, depth_fail: u32, pass: u32 },
    StencilMask(u32),
    ColorMask(bool, bool, bool, bool),
    CullFace(u32),
    FrontFace(u32),
    PolygonMode { face: u32, mode: u32 },
    UseProgram(u32),
    VertexAttrib4f { index: u32, value: [f32; 4] },
    BindBuffer { target: u32, buffer: u64 },
    ApplyVertexAttributes { offsets: [u64; 16] },
    DrawArrays { mode: u32, first: i32, count: i32 },
    DrawArraysInstanced { mode: u32, first: i32, count: i32, instances: i32 },
    DrawElements { mode: u32, count: i32, index_type: u32, offset: usize },
    DrawElementsInstanced { mode: u32, count: i32, index_type: u32, offset: usize, instances: i32 },
    DrawElementsBaseVertex { mode: u32, count: i32, index_type: u32, offset: usize, base_vertex: i32 },
    AcquireTemporaryTarget { format: PixelFormat, width: u32, height: u32, msaa: u32 },
}

/// [`GlApi`] fake that logs every call and answers capability queries from
/// configurable knobs.
pub struct RecordingGl {
    pub calls: Vec<GlCall>,
    next_fbo: u32,
    pub framebuffer_status: u32,
    pub max_color_attachments: u32,
    pub instancing: bool,
    pub base_vertex: bool,
    pub invalidate: bool,
    pub native_resolve: bool,
    pub srgb_write_control: bool,
    pub wireframe: bool,
    pub multi_format_targets: bool,
    pub supported_formats: Vec<PixelFormat>,
}

impl RecordingGl {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            next_fbo: 1,
            framebuffer_status: pigment::backend::gl::GL_FRAMEBUFFER_COMPLETE,
            max_color_attachments: 8,
            instancing: true,
            base_vertex: true,
            invalidate: true,
            native_resolve: false,
            srgb_write_control: true,
            wireframe: true,
            multi_format_targets: false,
            supported_formats: vec![
                PixelFormat::Rgba8,
                PixelFormat::Srgba8,
                PixelFormat::Depth24,
                PixelFormat::Depth24Stencil8,
                PixelFormat::Stencil8,
            ],
        }
    }

    pub fn count_calls(&self, f: impl Fn(&GlCall) -> bool) -> usize {
        self.calls.iter().filter(|c| f(c)).count()
    }
}

impl Default for RecordingGl {
    fn default() -> Self {
        Self::new()
    }
}

impl GlApi for RecordingGl {
    fn create_framebuffer(&mut self) -> u32 {
        let fbo = self.next_fbo;
        self.next_fbo += 1;
        self.calls.push(GlCall::CreateFramebuffer(fbo));
        fbo
    }

    fn delete_framebuffer(&mut self, fbo: u32) {
        self.calls.push(GlCall::DeleteFramebuffer(fbo));
    }

    fn bind_framebuffer(&mut self, target: u32, fbo: u32) {
        self.calls.push(GlCall::BindFramebuffer { target, fbo });
    }

    fn framebuffer_texture(&mut self, attachment: u32, texture: u64, level: u32, layer: Option<u32>) {
        self.calls.push(GlCall::FramebufferTexture {
            attachment,
            texture,
            level,
            layer,
        });
    }

    fn check_framebuffer_status(&mut self) -> u32 {
        self.framebuffer_status
    }

    fn invalidate_framebuffer(&mut self, target: u32, attachments: &[u32]) {
        self.calls.push(GlCall::InvalidateFramebuffer {
            target,
            attachments: attachments.to_vec(),
        });
    }

    fn blit_framebuffer(&mut self, width: i32, height: i32, mask: u32) {
        self.calls.push(GlCall::BlitFramebuffer { width, height, mask });
    }

    fn resolve_multisample(&mut self) {
        self.calls.push(GlCall::ResolveMultisample);
    }

    fn read_buffer(&mut self, src: u32) {
        self.calls.push(GlCall::ReadBuffer(src));
    }

    fn clear(&mut self, mask: u32) {
        self.calls.push(GlCall::Clear(mask));
    }

    fn clear_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.calls.push(GlCall::ClearColor([r, g, b, a]));
    }

    fn clear_depth(&mut self, depth: f64) {
        self.calls.push(GlCall::ClearDepth(depth));
    }

    fn clear_stencil(&mut self, value: i32) {
        self.calls.push(GlCall::ClearStencil(value));
    }

    fn clear_buffer_color(&mut self, attachment_index: u32, rgba: [f32; 4]) {
        self.calls.push(GlCall::ClearBufferColor {
            index: attachment_index,
            rgba,
        });
    }

    fn set_enabled(&mut self, cap: u32, enabled: bool) {
        self.calls.push(GlCall::SetEnabled { cap, enabled });
    }

    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.calls.push(GlCall::Viewport { x, y, width, height });
    }

    fn scissor(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.calls.push(GlCall::Scissor { x, y, width, height });
    }

    fn blend_equation_separate(&mut self, rgb: u32, alpha: u32) {
        self.calls.push(GlCall::BlendEquationSeparate { rgb, alpha });
    }

    fn blend_func_separate(&mut self, src_rgb: u32, dst_rgb: u32, src_alpha: u32, dst_alpha: u32) {
        self.calls.push(GlCall::BlendFuncSeparate {
            src_rgb,
            dst_rgb,
            src_alpha,
            dst_alpha,
        });
    }

    fn depth_func(&mut self, func: u32) {
        self.calls.push(GlCall::DepthFunc(func));
    }

    fn depth_mask(&mut self, write: bool) {
        self.calls.push(GlCall::DepthMask(write));
    }

    fn stencil_func(&mut self, func: u32, reference: i32, mask: u32) {
        self.calls.push(GlCall::StencilFunc {
            func,
            reference,
            mask,
        });
    }

    fn stencil_op(&mut self, fail: u32, depth_fail: u32, pass: u32) {
        self.calls.push(GlCall::StencilOp {
            fail,
            depth_fail,
            pass,
        });
    }

    fn stencil_mask(&mut self, mask: u32) {
        self.calls.push(GlCall::StencilMask(mask));
    }

    fn color_mask(&mut self, r: bool, g: bool, b: bool, a: bool) {
        self.calls.push(GlCall::ColorMask(r, g, b, a));
    }

    fn cull_face(&mut self, mode: u32) {
        self.calls.push(GlCall::CullFace(mode));
    }

    fn front_face(&mut self, winding: u32) {
        self.calls.push(GlCall::FrontFace(winding));
    }

    fn polygon_mode(&mut self, face: u32, mode: u32) {
        self.calls.push(GlCall::PolygonMode { face, mode });
    }

    fn use_program(&mut self, program: u32) {
        self.calls.push(GlCall::UseProgram(program));
    }

    fn vertex_attrib4f(&mut self, index: u32, x: f32, y: f32, z: f32, w: f32) {
        self.calls.push(GlCall::VertexAttrib4f {
            index,
            value: [x, y, z, w],
        });
    }

    fn bind_buffer(&mut self, target: u32, buffer: u64) {
        self.calls.push(GlCall::BindBuffer { target, buffer });
    }

    fn apply_vertex_attributes(&mut self, _attributes: &VertexAttributes, buffers: &BufferBindings) {
        let mut offsets = [0u64; 16];
        for (slot, info) in offsets.iter_mut().zip(buffers.info.iter()) {
            *slot = info.offset;
        }
        self.calls.push(GlCall::ApplyVertexAttributes { offsets });
    }

    fn draw_arrays(&mut self, mode: u32, first: i32, count: i32) {
        self.calls.push(GlCall::DrawArrays { mode, first, count });
    }

    fn draw_arrays_instanced(&mut self, mode: u32, first: i32, count: i32, instances: i32) {
        self.calls.push(GlCall::DrawArraysInstanced {
            mode,
            first,
            count,
            instances,
        });
    }

    fn draw_elements(&mut self, mode: u32, count: i32, index_type: u32, offset: usize) {
        self.calls.push(GlCall::DrawElements {
            mode,
            count,
            index_type,
            offset,
        });
    }

    fn draw_elements_instanced(
        &mut self,
        mode: u32,
        count: i32,
        index_type: u32,
        offset: usize,
        instances: i32,
    ) {
        self.calls.push(GlCall::DrawElementsInstanced {
            mode,
            count,
            index_type,
            offset,
            instances,
        });
    }

    fn draw_elements_base_vertex(
        &mut self,
        mode: u32,
        count: i32,
        index_type: u32,
        offset: usize,
        base_vertex: i32,
    ) {
        self.calls.push(GlCall::DrawElementsBaseVertex {
            mode,
            count,
            index_type,
            offset,
            base_vertex,
        });
    }

    fn acquire_temporary_target(
        &mut self,
        format: PixelFormat,
        width: u32,
        height: u32,
        msaa: u32,
    ) -> Result<Arc<dyn Texture>, GfxError> {
        self.calls.push(GlCall::AcquireTemporaryTarget {
            format,
            width,
            height,
            msaa,
        });
        Ok(Arc::new(
            FakeTexture::new(format, width, height)
                .with_msaa(msaa)
                .with_handle(9000),
        ))
    }

    fn max_color_attachments(&self) -> u32 {
        self.max_color_attachments
    }

    fn supports_instancing(&self) -> bool {
        self.instancing
    }

    fn supports_base_vertex(&self) -> bool {
        self.base_vertex
    }

    fn supports_invalidate(&self) -> bool {
        self.invalidate
    }

    fn supports_native_resolve(&self) -> bool {
        self.native_resolve
    }

    fn supports_srgb_write_control(&self) -> bool {
        self.srgb_write_control
    }

    fn supports_wireframe(&self) -> bool {
        self.wireframe
    }

    fn supports_multi_format_targets(&self) -> bool {
        self.multi_format_targets
    }

    fn supports_format(&self, format: PixelFormat) -> bool {
        self.supported_formats.contains(&format)
    }
}
