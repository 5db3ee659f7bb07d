//! `pigment` is a backend-agnostic render-pass recording and execution
//! engine.
//!
//! A [`RenderPass`] records draw and state-change operations into a compact
//! command stream (typed headers plus a byte arena), deduplicating redundant
//! state calls against a tracked snapshot, then replays the stream against a
//! concrete [`Backend`] while applying only the state diffs that accumulated
//! since the previous draw.
//!
//! This crate provides:
//! - The command recorder and its arena (see [`RenderPass`], [`CommandArena`]).
//! - Attachment description and validation (see [`target`]).
//! - An OpenGL-style reference backend driving a narrow [`backend::gl::GlApi`]
//!   adapter, plus a no-op backend for headless use (see [`backend`]).
//! - The trait boundary for externally-owned drawables, textures, shaders
//!   and buffers (see [`resources`]).

mod arena;
mod color;
mod error;
mod format;
mod pass;

pub mod backend;
pub mod resources;
pub mod state;
pub mod target;

pub use arena::CommandArena;
pub use backend::{Backend, Capabilities, DrawContext};
pub use color::Color;
pub use error::GfxError;
pub use format::PixelFormat;
pub use pass::{CommandKind, RenderPass};
pub use state::{
    blend_state_for, BlendAlpha, BlendMode, BlendState, ColorMask, CompareMode, CullMode,
    DepthState, LineStyle, ScissorRect, StateBits, StencilAction, StencilState, Winding,
};
pub use target::{
    BeginAction, EndAction, RenderTarget, RenderTargetSetup, TargetError, TemporaryTargetFlags,
    MAX_COLOR_TARGETS,
};
