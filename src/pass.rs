//! The command recorder.
//!
//! A [`RenderPass`] turns a sequence of high-level draw and state calls into
//! a replayable, self-contained command stream: typed command headers in a
//! `Vec`, plain-data payloads in a byte arena, and strong references to every
//! external object a recorded command will touch. `execute` replays the
//! stream against a [`Backend`].
//!
//! State-setting calls are compared against a tracked snapshot and recorded
//! only when they would change GPU state; the stream therefore carries at
//! most one state command per axis between any two draws. Draws are never
//! elided.

use std::fmt;
use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3, Vec4};
use tracing::{debug, warn};

use crate::arena::CommandArena;
use crate::backend::{Backend, Capabilities, DrawContext};
use crate::color::Color;
use crate::error::GfxError;
use crate::format::PixelFormat;
use crate::resources::{Drawable, Mesh, MipmapMode, Shader, Texture};
use crate::state::{
    blend_state_for, BlendAlpha, BlendFactor, BlendMode, BlendOperation, BlendState, ColorMask,
    CompareMode, CullMode, DepthState, GraphicsState, LineStyle, ScissorRect, ScissorState,
    StateBits, StencilAction, StencilState, Winding,
};
use crate::target::{
    BeginAction, EndAction, RenderTarget, RenderTargetSetup, TemporaryTargetFlags,
};

/// Payload index meaning "no input"; used by shader commands to restore the
/// default program.
const NO_INPUT: u32 = u32::MAX;

/// Discriminant of a recorded command. Payload layout is fixed per kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandKind {
    DrawDrawable,
    DrawMeshInstanced,
    SetColor,
    SetShader,
    SetBlendState,
    SetStencilState,
    SetDepthState,
    SetScissor,
    SetColorMask,
    SetCullMode,
    SetFaceWinding,
    SetWireframe,
}

/// Header of one recorded command: its kind plus the arena offset of its
/// payload.
#[derive(Clone, Copy)]
struct Command {
    kind: CommandKind,
    offset: u32,
}

/// Strong reference to an externally-owned object a recorded command will
/// dereference during replay. Payloads address these by index.
enum PassInput {
    Drawable(Arc<dyn Drawable>),
    Mesh(Arc<dyn Mesh>),
    Shader(Arc<dyn Shader>),
}

// Command payloads. Plain data only; object references stay in the input
// list and are addressed by index.

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct DrawPayload {
    input: u32,
    transform: [f32; 16],
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct DrawInstancedPayload {
    input: u32,
    instance_count: u32,
    transform: [f32; 16],
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct ColorPayload {
    rgba: [f32; 4],
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct ShaderPayload {
    input: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct BlendPayload {
    enable: u32,
    operation_rgb: u32,
    operation_a: u32,
    src_factor_rgb: u32,
    src_factor_a: u32,
    dst_factor_rgb: u32,
    dst_factor_a: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct StencilPayload {
    compare: u32,
    action: u32,
    value: i32,
    read_mask: u32,
    write_mask: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct DepthPayload {
    compare: u32,
    write: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct ScissorPayload {
    enable: u32,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct ColorMaskPayload {
    bits: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct CullModePayload {
    mode: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct WindingPayload {
    winding: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct WireframePayload {
    enable: u32,
}

/// One recorded sequence of draw/state commands destined for a single
/// attachment set.
///
/// Recording and execution are single-threaded and synchronous; the arena
/// and input list are exclusively owned by this instance.
pub struct RenderPass {
    caps: Capabilities,
    gamma_correct: bool,
    targets: RenderTargetSetup,
    commands: Vec<Command>,
    arena: CommandArena,
    inputs: Vec<PassInput>,
    /// Logical state the next recorded draw observes; drives deduplication.
    state: GraphicsState,
    /// Transform stack. `transform_root` is the bottom frame and can never
    /// be popped.
    transform_root: Mat4,
    transform_stack: Vec<Mat4>,
}

impl fmt::Debug for RenderPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderPass")
            .field("commands", &self.commands.len())
            .field("arena_capacity", &self.arena.capacity())
            .field("inputs", &self.inputs.len())
            .field("transform_depth", &self.transform_stack.len())
            .finish_non_exhaustive()
    }
}

impl RenderPass {
    /// Validates `targets` against the backend limits and creates an empty
    /// recorder for them.
    pub fn new(caps: Capabilities, targets: RenderTargetSetup) -> Result<Self, GfxError> {
        targets.validate(&caps)?;
        Ok(Self {
            caps,
            gamma_correct: false,
            targets,
            commands: Vec::new(),
            arena: CommandArena::new(),
            inputs: Vec::new(),
            state: GraphicsState::default(),
            transform_root: Mat4::IDENTITY,
            transform_stack: Vec::new(),
        })
    }

    /// Caps the command arena at `limit` bytes. Call before recording;
    /// replaces the arena.
    pub fn with_arena_limit(mut self, limit: usize) -> Self {
        self.arena = CommandArena::with_limit(limit);
        self
    }

    /// Whether recorded colors are converted to linear space and clears are
    /// gamma-corrected at execute time.
    pub fn set_gamma_correct(&mut self, enabled: bool) {
        self.gamma_correct = enabled;
    }

    pub fn gamma_correct(&self) -> bool {
        self.gamma_correct
    }

    pub fn targets(&self) -> &RenderTargetSetup {
        &self.targets
    }

    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Kinds of the recorded commands, in replay order.
    pub fn command_kinds(&self) -> impl Iterator<Item = CommandKind> + '_ {
        self.commands.iter().map(|c| c.kind)
    }

    /// Current backing capacity of the command arena.
    pub fn arena_capacity(&self) -> usize {
        self.arena.capacity()
    }

    // Recording: draws.

    /// Records a draw of `drawable` under `local` composed onto the current
    /// transform. Never deduplicated.
    pub fn draw(&mut self, drawable: Arc<dyn Drawable>, local: Mat4) -> Result<(), GfxError> {
        let payload = DrawPayload {
            input: self.inputs.len() as u32,
            transform: (self.current_transform() * local).to_cols_array(),
        };
        self.inputs.push(PassInput::Drawable(drawable));
        if let Err(err) = self.record(CommandKind::DrawDrawable, &payload) {
            self.inputs.pop();
            return Err(err);
        }
        Ok(())
    }

    /// Records an instanced draw of `mesh`. Fails with
    /// [`GfxError::Unsupported`] when `instance_count > 1` and the backend
    /// lacks instancing.
    pub fn draw_instanced(
        &mut self,
        mesh: Arc<dyn Mesh>,
        local: Mat4,
        instance_count: u32,
    ) -> Result<(), GfxError> {
        if instance_count > 1 && !self.caps.instancing {
            return Err(GfxError::Unsupported("backend.instancing"));
        }
        let payload = DrawInstancedPayload {
            input: self.inputs.len() as u32,
            instance_count,
            transform: (self.current_transform() * local).to_cols_array(),
        };
        self.inputs.push(PassInput::Mesh(mesh));
        if let Err(err) = self.record(CommandKind::DrawMeshInstanced, &payload) {
            self.inputs.pop();
            return Err(err);
        }
        Ok(())
    }

    // Recording: state. Each call compares against the snapshot, records
    // only on change, then updates the snapshot.

    /// Sets the constant draw color. Channels are clamped to `[0, 1]`; with
    /// gamma-correct rendering the color is converted to linear space once,
    /// at record time.
    pub fn set_color(&mut self, color: Color) -> Result<(), GfxError> {
        let mut color = color.clamped();
        if self.gamma_correct {
            color = color.gamma_corrected();
        }
        if color == self.state.color {
            return Ok(());
        }
        self.record(
            CommandKind::SetColor,
            &ColorPayload {
                rgba: color.to_array(),
            },
        )?;
        self.state.color = color;
        Ok(())
    }

    /// Binds `shader` for subsequent draws, or restores the default program
    /// when `None`. Compared by identity, not value.
    pub fn set_shader(&mut self, shader: Option<Arc<dyn Shader>>) -> Result<(), GfxError> {
        let unchanged = match (&shader, &self.state.shader) {
            (None, None) => true,
            (Some(next), Some(current)) => Arc::ptr_eq(next, current),
            _ => false,
        };
        if unchanged {
            return Ok(());
        }

        let payload = ShaderPayload {
            input: shader
                .as_ref()
                .map_or(NO_INPUT, |_| self.inputs.len() as u32),
        };
        let registered = if let Some(shader) = &shader {
            self.inputs.push(PassInput::Shader(Arc::clone(shader)));
            true
        } else {
            false
        };
        if let Err(err) = self.record(CommandKind::SetShader, &payload) {
            if registered {
                self.inputs.pop();
            }
            return Err(err);
        }
        self.state.shader = shader;
        Ok(())
    }

    pub fn clear_shader(&mut self) -> Result<(), GfxError> {
        self.set_shader(None)
    }

    pub fn set_blend_state(&mut self, blend: BlendState) -> Result<(), GfxError> {
        if blend == self.state.render.blend {
            return Ok(());
        }
        self.record(
            CommandKind::SetBlendState,
            &BlendPayload {
                enable: blend.enable as u32,
                operation_rgb: blend.operation_rgb.to_raw(),
                operation_a: blend.operation_a.to_raw(),
                src_factor_rgb: blend.src_factor_rgb.to_raw(),
                src_factor_a: blend.src_factor_a.to_raw(),
                dst_factor_rgb: blend.dst_factor_rgb.to_raw(),
                dst_factor_a: blend.dst_factor_a.to_raw(),
            },
        )?;
        self.state.render.blend = blend;
        Ok(())
    }

    /// Resolves a blend preset to its full state and records it.
    pub fn set_blend_mode(&mut self, mode: BlendMode, alpha: BlendAlpha) -> Result<(), GfxError> {
        self.set_blend_state(blend_state_for(mode, alpha))
    }

    pub fn set_stencil(
        &mut self,
        compare: CompareMode,
        action: StencilAction,
        value: i32,
        read_mask: u32,
        write_mask: u32,
    ) -> Result<(), GfxError> {
        let stencil = StencilState {
            compare,
            action,
            value,
            read_mask,
            write_mask,
        };
        if stencil == self.state.render.stencil {
            return Ok(());
        }
        self.record(
            CommandKind::SetStencilState,
            &StencilPayload {
                compare: stencil.compare.to_raw(),
                action: stencil.action.to_raw(),
                value: stencil.value,
                read_mask: stencil.read_mask,
                write_mask: stencil.write_mask,
            },
        )?;
        self.state.render.stencil = stencil;
        Ok(())
    }

    /// Restores the default stencil state (test always passes, no writes).
    pub fn clear_stencil(&mut self) -> Result<(), GfxError> {
        let d = StencilState::default();
        self.set_stencil(d.compare, d.action, d.value, d.read_mask, d.write_mask)
    }

    pub fn set_depth_mode(&mut self, compare: CompareMode, write: bool) -> Result<(), GfxError> {
        let depth = DepthState { compare, write };
        if depth == self.state.render.depth {
            return Ok(());
        }
        self.record(
            CommandKind::SetDepthState,
            &DepthPayload {
                compare: depth.compare.to_raw(),
                write: depth.write as u32,
            },
        )?;
        self.state.render.depth = depth;
        Ok(())
    }

    pub fn set_scissor(&mut self, rect: ScissorRect) -> Result<(), GfxError> {
        self.set_scissor_state(ScissorState { enable: true, rect })
    }

    pub fn clear_scissor(&mut self) -> Result<(), GfxError> {
        self.set_scissor_state(ScissorState::default())
    }

    fn set_scissor_state(&mut self, scissor: ScissorState) -> Result<(), GfxError> {
        if scissor == self.state.render.scissor {
            return Ok(());
        }
        self.record(
            CommandKind::SetScissor,
            &ScissorPayload {
                enable: scissor.enable as u32,
                x: scissor.rect.x,
                y: scissor.rect.y,
                width: scissor.rect.width,
                height: scissor.rect.height,
            },
        )?;
        self.state.render.scissor = scissor;
        Ok(())
    }

    pub fn set_color_mask(&mut self, mask: ColorMask) -> Result<(), GfxError> {
        if mask == self.state.render.color_mask {
            return Ok(());
        }
        self.record(
            CommandKind::SetColorMask,
            &ColorMaskPayload {
                bits: mask.to_bits(),
            },
        )?;
        self.state.render.color_mask = mask;
        Ok(())
    }

    pub fn set_mesh_cull_mode(&mut self, mode: CullMode) -> Result<(), GfxError> {
        if mode == self.state.render.cull_mode {
            return Ok(());
        }
        self.record(
            CommandKind::SetCullMode,
            &CullModePayload {
                mode: mode.to_raw(),
            },
        )?;
        self.state.render.cull_mode = mode;
        Ok(())
    }

    pub fn set_face_winding(&mut self, winding: Winding) -> Result<(), GfxError> {
        if winding == self.state.render.winding {
            return Ok(());
        }
        self.record(
            CommandKind::SetFaceWinding,
            &WindingPayload {
                winding: winding.to_raw(),
            },
        )?;
        self.state.render.winding = winding;
        Ok(())
    }

    pub fn set_wireframe(&mut self, enable: bool) -> Result<(), GfxError> {
        if enable == self.state.render.wireframe {
            return Ok(());
        }
        self.record(
            CommandKind::SetWireframe,
            &WireframePayload {
                enable: enable as u32,
            },
        )?;
        self.state.render.wireframe = enable;
        Ok(())
    }

    /// Snapshot-only: consumed by geometry generation at record time, never
    /// replayed through the backend.
    pub fn set_line_width(&mut self, width: f32) {
        self.state.line_width = width;
    }

    pub fn line_width(&self) -> f32 {
        self.state.line_width
    }

    /// Snapshot-only, like [`Self::set_line_width`].
    pub fn set_line_style(&mut self, style: LineStyle) {
        self.state.line_style = style;
    }

    pub fn line_style(&self) -> LineStyle {
        self.state.line_style
    }

    // Transform stack. Draws capture `top * local` at record time; later
    // stack mutations never affect already-recorded draws.

    pub fn current_transform(&self) -> Mat4 {
        self.transform_stack
            .last()
            .copied()
            .unwrap_or(self.transform_root)
    }

    fn top_mut(&mut self) -> &mut Mat4 {
        self.transform_stack
            .last_mut()
            .unwrap_or(&mut self.transform_root)
    }

    /// Pushes a copy of the current transform.
    pub fn push_transform(&mut self) {
        self.transform_stack.push(self.current_transform());
    }

    /// Pops the top frame. The root frame cannot be popped.
    pub fn pop_transform(&mut self) -> Result<(), GfxError> {
        self.transform_stack
            .pop()
            .map(|_| ())
            .ok_or(GfxError::TransformStackUnderflow)
    }

    pub fn translate(&mut self, x: f32, y: f32) {
        self.apply_transform(Mat4::from_translation(Vec3::new(x, y, 0.0)));
    }

    /// Rotates by `angle` radians around the view axis.
    pub fn rotate(&mut self, angle: f32) {
        self.apply_transform(Mat4::from_rotation_z(angle));
    }

    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.apply_transform(Mat4::from_scale(Vec3::new(sx, sy, 1.0)));
    }

    pub fn shear(&mut self, kx: f32, ky: f32) {
        self.apply_transform(Mat4::from_cols(
            Vec4::new(1.0, ky, 0.0, 0.0),
            Vec4::new(kx, 1.0, 0.0, 0.0),
            Vec4::Z,
            Vec4::W,
        ));
    }

    /// Resets the current frame to the identity.
    pub fn origin(&mut self) {
        *self.top_mut() = Mat4::IDENTITY;
    }

    pub fn apply_transform(&mut self, m: Mat4) {
        let top = self.top_mut();
        *top = *top * m;
    }

    pub fn replace_transform(&mut self, m: Mat4) {
        *self.top_mut() = m;
    }

    pub fn transform_point(&self, point: Vec2) -> Vec2 {
        self.current_transform()
            .transform_point3(point.extend(0.0))
            .truncate()
    }

    pub fn inverse_transform_point(&self, point: Vec2) -> Vec2 {
        self.current_transform()
            .inverse()
            .transform_point3(point.extend(0.0))
            .truncate()
    }

    // Lifecycle.

    /// Clears the command list, input list, snapshot and transform stack.
    /// Arena capacity is retained for reuse.
    pub fn reset(&mut self) {
        self.commands.clear();
        self.arena.reset();
        self.inputs.clear();
        self.state = GraphicsState::default();
        self.transform_root = Mat4::IDENTITY;
        self.transform_stack.clear();
    }

    /// Validates `targets`, then resets and adopts them. On validation
    /// failure the previous pass state is left untouched.
    pub fn reset_with_targets(&mut self, targets: RenderTargetSetup) -> Result<(), GfxError> {
        targets.validate(&self.caps)?;
        self.reset();
        self.targets = targets;
        Ok(())
    }

    /// Replays the recorded stream against `backend`.
    ///
    /// Not idempotent: discard and resolve end-actions are destructive to
    /// attachment contents.
    pub fn execute(&mut self, backend: &mut dyn Backend) -> Result<(), GfxError> {
        let mut targets = self.targets.clone();
        let mut temporary: Option<Arc<dyn Texture>> = None;

        // Synthesize the requested pass-lifetime depth/stencil attachment.
        let flags = targets.temporary_flags();
        if !flags.is_empty() && targets.depth_stencil().is_none() {
            if let Some((width, height)) = targets.pixel_dimensions() {
                let msaa = targets
                    .first_target()
                    .and_then(|t| t.image.as_ref())
                    .map_or(1, |i| i.msaa_samples());
                let format = best_depth_stencil_format(&*backend, flags)
                    .ok_or(GfxError::Unsupported("backend.depth_stencil_format"))?;
                let image = backend.acquire_temporary_target(format, width, height, msaa)?;
                targets.set_depth_stencil(
                    RenderTarget::new(Arc::clone(&image))
                        .with_begin_action(BeginAction::Clear)
                        .with_end_action(EndAction::Discard),
                );
                temporary = Some(image);
            }
        }

        let (pass_width, pass_height) = targets
            .pixel_dimensions()
            .unwrap_or_else(|| backend.backbuffer_size());
        let mut ctx = DrawContext::new(
            pass_width,
            pass_height,
            targets.is_backbuffer(),
            self.gamma_correct,
        );

        debug!(
            commands = self.commands.len(),
            inputs = self.inputs.len(),
            arena_bytes = self.arena.write_offset(),
            width = pass_width,
            height = pass_height,
            "execute pass"
        );

        backend.begin_pass(&targets, &mut ctx)?;

        for command in &self.commands {
            match command.kind {
                CommandKind::DrawDrawable => {
                    let payload: DrawPayload = self.arena.read(command.offset);
                    let Some(PassInput::Drawable(drawable)) =
                        self.inputs.get(payload.input as usize)
                    else {
                        return Err(GfxError::CorruptCommandStream);
                    };
                    let transform = Mat4::from_cols_array(&payload.transform);
                    ctx.builtin.transform = transform;
                    backend.apply_state(&mut ctx)?;
                    drawable.draw(backend, &mut ctx, transform)?;
                }
                CommandKind::DrawMeshInstanced => {
                    let payload: DrawInstancedPayload = self.arena.read(command.offset);
                    let Some(PassInput::Mesh(mesh)) = self.inputs.get(payload.input as usize)
                    else {
                        return Err(GfxError::CorruptCommandStream);
                    };
                    let transform = Mat4::from_cols_array(&payload.transform);
                    ctx.builtin.transform = transform;
                    backend.apply_state(&mut ctx)?;
                    mesh.draw_instanced(backend, &mut ctx, transform, payload.instance_count)?;
                }
                CommandKind::SetColor => {
                    let payload: ColorPayload = self.arena.read(command.offset);
                    ctx.color = Color::from_array(payload.rgba);
                    ctx.state_diff |= StateBits::COLOR;
                }
                CommandKind::SetShader => {
                    let payload: ShaderPayload = self.arena.read(command.offset);
                    ctx.shader = if payload.input == NO_INPUT {
                        None
                    } else {
                        match self.inputs.get(payload.input as usize) {
                            Some(PassInput::Shader(shader)) => Some(Arc::clone(shader)),
                            _ => return Err(GfxError::CorruptCommandStream),
                        }
                    };
                    ctx.state_diff |= StateBits::SHADER;
                }
                CommandKind::SetBlendState => {
                    let payload: BlendPayload = self.arena.read(command.offset);
                    ctx.render.blend = BlendState {
                        enable: payload.enable != 0,
                        operation_rgb: BlendOperation::from_raw(payload.operation_rgb),
                        operation_a: BlendOperation::from_raw(payload.operation_a),
                        src_factor_rgb: BlendFactor::from_raw(payload.src_factor_rgb),
                        src_factor_a: BlendFactor::from_raw(payload.src_factor_a),
                        dst_factor_rgb: BlendFactor::from_raw(payload.dst_factor_rgb),
                        dst_factor_a: BlendFactor::from_raw(payload.dst_factor_a),
                    };
                    ctx.state_diff |= StateBits::BLEND;
                }
                CommandKind::SetStencilState => {
                    let payload: StencilPayload = self.arena.read(command.offset);
                    ctx.render.stencil = StencilState {
                        compare: CompareMode::from_raw(payload.compare),
                        action: StencilAction::from_raw(payload.action),
                        value: payload.value,
                        read_mask: payload.read_mask,
                        write_mask: payload.write_mask,
                    };
                    ctx.state_diff |= StateBits::STENCIL;
                }
                CommandKind::SetDepthState => {
                    let payload: DepthPayload = self.arena.read(command.offset);
                    ctx.render.depth = DepthState {
                        compare: CompareMode::from_raw(payload.compare),
                        write: payload.write != 0,
                    };
                    ctx.state_diff |= StateBits::DEPTH;
                }
                CommandKind::SetScissor => {
                    let payload: ScissorPayload = self.arena.read(command.offset);
                    ctx.render.scissor = ScissorState {
                        enable: payload.enable != 0,
                        rect: ScissorRect {
                            x: payload.x,
                            y: payload.y,
                            width: payload.width,
                            height: payload.height,
                        },
                    };
                    ctx.state_diff |= StateBits::SCISSOR;
                }
                CommandKind::SetColorMask => {
                    let payload: ColorMaskPayload = self.arena.read(command.offset);
                    ctx.render.color_mask = ColorMask::from_bits(payload.bits);
                    ctx.state_diff |= StateBits::COLOR_MASK;
                }
                CommandKind::SetCullMode => {
                    let payload: CullModePayload = self.arena.read(command.offset);
                    ctx.render.cull_mode = CullMode::from_raw(payload.mode);
                    ctx.state_diff |= StateBits::CULL_MODE;
                }
                CommandKind::SetFaceWinding => {
                    let payload: WindingPayload = self.arena.read(command.offset);
                    ctx.render.winding = Winding::from_raw(payload.winding);
                    ctx.state_diff |= StateBits::FACE_WINDING;
                }
                CommandKind::SetWireframe => {
                    let payload: WireframePayload = self.arena.read(command.offset);
                    ctx.render.wireframe = payload.enable != 0;
                    ctx.state_diff |= StateBits::WIREFRAME;
                }
            }
        }

        backend.end_pass(&targets, &mut ctx)?;
        drop(temporary);

        // Regenerate mipmaps for auto-mipmap attachments rendered at the
        // base level. The synthesized depth/stencil target never qualifies.
        for target in self
            .targets
            .colors()
            .iter()
            .chain(self.targets.depth_stencil())
        {
            if target.mip != 0 {
                continue;
            }
            if let Some(image) = &target.image {
                if image.mipmap_mode() == MipmapMode::Auto && image.mipmap_count() > 1 {
                    image.generate_mipmaps();
                }
            }
        }

        Ok(())
    }

    fn record<T: Pod>(&mut self, kind: CommandKind, payload: &T) -> Result<(), GfxError> {
        match self.arena.write(payload) {
            Some(offset) => {
                self.commands.push(Command { kind, offset });
                Ok(())
            }
            None => {
                let limit = self.arena.limit();
                warn!(?kind, limit, "command dropped, arena exhausted");
                Err(GfxError::ArenaExhausted { limit })
            }
        }
    }
}

/// Picks the best supported depth/stencil format for a temporary
/// attachment: combined when both aspects are requested, otherwise the most
/// precise single-aspect format with combined formats as a fallback.
fn best_depth_stencil_format(
    backend: &dyn Backend,
    flags: TemporaryTargetFlags,
) -> Option<PixelFormat> {
    let depth = flags.contains(TemporaryTargetFlags::DEPTH);
    let stencil = flags.contains(TemporaryTargetFlags::STENCIL);

    let candidates: &[PixelFormat] = if depth && stencil {
        &[PixelFormat::Depth24Stencil8, PixelFormat::Depth32FStencil8]
    } else if depth {
        &[
            PixelFormat::Depth24,
            PixelFormat::Depth32F,
            PixelFormat::Depth16,
            PixelFormat::Depth24Stencil8,
        ]
    } else {
        &[PixelFormat::Stencil8, PixelFormat::Depth24Stencil8]
    };

    candidates
        .iter()
        .copied()
        .find(|format| backend.supports_format(*format))
}
