//! No-op backend.
//!
//! Accepts recorded passes and consumes state changes without touching any
//! graphics API. Draw calls fail, so it suits headless validation and
//! recorder-level tests, not rendering.

use std::sync::Arc;

use crate::error::GfxError;
use crate::format::PixelFormat;
use crate::resources::{GpuBuffer, Texture};
use crate::state::StateBits;
use crate::target::RenderTargetSetup;

use super::{
    Backend, BufferBindings, Capabilities, DrawContext, IndexDataType, PrimitiveType,
    VertexAttributes,
};

pub struct NullBackend {
    backbuffer_width: u32,
    backbuffer_height: u32,
}

impl NullBackend {
    pub fn new(backbuffer_width: u32, backbuffer_height: u32) -> Self {
        Self {
            backbuffer_width,
            backbuffer_height,
        }
    }
}

impl Default for NullBackend {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl Backend for NullBackend {
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            max_color_targets: 8,
            instancing: false,
            multi_format_targets: false,
            base_vertex: false,
        }
    }

    fn backbuffer_size(&self) -> (u32, u32) {
        (self.backbuffer_width, self.backbuffer_height)
    }

    fn supports_format(&self, _format: PixelFormat) -> bool {
        false
    }

    fn acquire_temporary_target(
        &mut self,
        _format: PixelFormat,
        _width: u32,
        _height: u32,
        _msaa: u32,
    ) -> Result<Arc<dyn Texture>, GfxError> {
        Err(GfxError::Unsupported("null.temporary_target"))
    }

    fn begin_pass(
        &mut self,
        _targets: &RenderTargetSetup,
        _ctx: &mut DrawContext,
    ) -> Result<(), GfxError> {
        Ok(())
    }

    fn end_pass(
        &mut self,
        _targets: &RenderTargetSetup,
        _ctx: &mut DrawContext,
    ) -> Result<(), GfxError> {
        Ok(())
    }

    fn apply_state(&mut self, ctx: &mut DrawContext) -> Result<(), GfxError> {
        ctx.state_diff = StateBits::empty();
        Ok(())
    }

    fn set_vertex_attributes(&mut self, _attributes: &VertexAttributes, _buffers: &BufferBindings) {}

    fn draw_primitives(
        &mut self,
        _primitive: PrimitiveType,
        _first_vertex: u32,
        _vertex_count: u32,
        _instance_count: u32,
    ) -> Result<(), GfxError> {
        Err(GfxError::Unsupported("null.draw_primitives"))
    }

    fn draw_indexed(
        &mut self,
        _primitive: PrimitiveType,
        _index_count: u32,
        _instance_count: u32,
        _index_type: IndexDataType,
        _index_buffer: &dyn GpuBuffer,
        _index_offset: u64,
    ) -> Result<(), GfxError> {
        Err(GfxError::Unsupported("null.draw_indexed"))
    }

    fn draw_quads(
        &mut self,
        _start: u32,
        _count: u32,
        _quad_index_buffer: &dyn GpuBuffer,
    ) -> Result<(), GfxError> {
        Err(GfxError::Unsupported("null.draw_quads"))
    }
}
