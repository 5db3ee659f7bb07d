//! Pipeline state descriptors recorded by a pass.
//!
//! Every type here is a small comparable-by-value record describing one axis
//! of pipeline state. The recorder compares incoming values against its
//! current-state snapshot and skips commands that would not change anything.

use bitflags::bitflags;

use crate::color::Color;

bitflags! {
    /// Dirty mask of state axes that changed since the last draw.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct StateBits: u32 {
        const COLOR = 1 << 0;
        const SHADER = 1 << 1;
        const BLEND = 1 << 2;
        const STENCIL = 1 << 3;
        const DEPTH = 1 << 4;
        const SCISSOR = 1 << 5;
        const COLOR_MASK = 1 << 6;
        const CULL_MODE = 1 << 7;
        const FACE_WINDING = 1 << 8;
        const WIREFRAME = 1 << 9;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum BlendFactor {
    Zero = 0,
    One,
    SrcColor,
    OneMinusSrcColor,
    SrcAlpha,
    OneMinusSrcAlpha,
    DstColor,
    OneMinusDstColor,
    DstAlpha,
    OneMinusDstAlpha,
    SrcAlphaSaturated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum BlendOperation {
    Add = 0,
    Subtract,
    ReverseSubtract,
    Min,
    Max,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum CompareMode {
    Less = 0,
    LessEqual,
    Equal,
    GreaterEqual,
    Greater,
    NotEqual,
    Always,
    Never,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum StencilAction {
    Keep = 0,
    Zero,
    Replace,
    Increment,
    Decrement,
    IncrementWrap,
    DecrementWrap,
    Invert,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum CullMode {
    None = 0,
    Back,
    Front,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum Winding {
    CounterClockwise = 0,
    Clockwise,
}

/// High-level blend presets that resolve to a full [`BlendState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendMode {
    Alpha,
    Add,
    Subtract,
    Multiply,
    Lighten,
    Darken,
    Screen,
    Replace,
    None,
}

/// Whether incoming colors are treated as premultiplied by alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendAlpha {
    Multiply,
    Premultiplied,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlendState {
    pub enable: bool,
    pub operation_rgb: BlendOperation,
    pub operation_a: BlendOperation,
    pub src_factor_rgb: BlendFactor,
    pub src_factor_a: BlendFactor,
    pub dst_factor_rgb: BlendFactor,
    pub dst_factor_a: BlendFactor,
}

impl Default for BlendState {
    fn default() -> Self {
        Self {
            enable: false,
            operation_rgb: BlendOperation::Add,
            operation_a: BlendOperation::Add,
            src_factor_rgb: BlendFactor::One,
            src_factor_a: BlendFactor::One,
            dst_factor_rgb: BlendFactor::Zero,
            dst_factor_a: BlendFactor::Zero,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepthState {
    pub compare: CompareMode,
    pub write: bool,
}

impl Default for DepthState {
    fn default() -> Self {
        Self {
            compare: CompareMode::Always,
            write: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StencilState {
    pub compare: CompareMode,
    pub action: StencilAction,
    pub value: i32,
    pub read_mask: u32,
    pub write_mask: u32,
}

impl Default for StencilState {
    fn default() -> Self {
        Self {
            compare: CompareMode::Always,
            action: StencilAction::Keep,
            value: 0,
            read_mask: u32::MAX,
            write_mask: u32::MAX,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScissorRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScissorState {
    pub enable: bool,
    pub rect: ScissorRect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorMask {
    pub r: bool,
    pub g: bool,
    pub b: bool,
    pub a: bool,
}

impl Default for ColorMask {
    fn default() -> Self {
        Self {
            r: true,
            g: true,
            b: true,
            a: true,
        }
    }
}

impl ColorMask {
    pub(crate) fn to_bits(self) -> u32 {
        (self.r as u32) | (self.g as u32) << 1 | (self.b as u32) << 2 | (self.a as u32) << 3
    }

    pub(crate) fn from_bits(bits: u32) -> Self {
        Self {
            r: bits & 1 != 0,
            g: bits & 2 != 0,
            b: bits & 4 != 0,
            a: bits & 8 != 0,
        }
    }
}

/// Everything a backend needs to issue one draw, minus the geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderState {
    pub blend: BlendState,
    pub depth: DepthState,
    pub stencil: StencilState,
    pub scissor: ScissorState,
    pub color_mask: ColorMask,
    pub cull_mode: CullMode,
    pub winding: Winding,
    pub wireframe: bool,
}

impl Default for CullMode {
    fn default() -> Self {
        Self::None
    }
}

impl Default for Winding {
    fn default() -> Self {
        Self::CounterClockwise
    }
}

/// Reverses a comparison for APIs that test `reference OP buffer` instead of
/// `buffer OP reference`.
///
/// Native stencil tests pass when the reference value satisfies the compare
/// against the buffer value; the public API promises the opposite reading, so
/// the ordered comparisons must be mirrored before translation.
pub fn reversed_compare_mode(mode: CompareMode) -> CompareMode {
    match mode {
        CompareMode::Less => CompareMode::Greater,
        CompareMode::LessEqual => CompareMode::GreaterEqual,
        CompareMode::Greater => CompareMode::Less,
        CompareMode::GreaterEqual => CompareMode::LessEqual,
        CompareMode::Equal | CompareMode::NotEqual | CompareMode::Always | CompareMode::Never => {
            mode
        }
    }
}

/// Resolves a high-level blend preset to a concrete [`BlendState`].
pub fn blend_state_for(mode: BlendMode, alpha: BlendAlpha) -> BlendState {
    use BlendFactor::*;
    use BlendOperation::*;

    let mut state = BlendState {
        enable: !matches!(mode, BlendMode::None),
        ..BlendState::default()
    };

    match mode {
        BlendMode::Alpha => {
            state.src_factor_rgb = One;
            state.src_factor_a = One;
            state.dst_factor_rgb = OneMinusSrcAlpha;
            state.dst_factor_a = OneMinusSrcAlpha;
        }
        BlendMode::Add => {
            state.src_factor_rgb = One;
            state.src_factor_a = Zero;
            state.dst_factor_rgb = One;
            state.dst_factor_a = One;
        }
        BlendMode::Subtract => {
            state.operation_rgb = ReverseSubtract;
            state.operation_a = ReverseSubtract;
            state.src_factor_rgb = One;
            state.src_factor_a = Zero;
            state.dst_factor_rgb = One;
            state.dst_factor_a = One;
        }
        BlendMode::Multiply => {
            state.src_factor_rgb = DstColor;
            state.src_factor_a = DstColor;
            state.dst_factor_rgb = Zero;
            state.dst_factor_a = Zero;
        }
        BlendMode::Lighten => {
            state.operation_rgb = Max;
            state.operation_a = Max;
        }
        BlendMode::Darken => {
            state.operation_rgb = Min;
            state.operation_a = Min;
        }
        BlendMode::Screen => {
            state.src_factor_rgb = One;
            state.src_factor_a = One;
            state.dst_factor_rgb = OneMinusSrcColor;
            state.dst_factor_a = OneMinusSrcColor;
        }
        BlendMode::Replace | BlendMode::None => {
            state.src_factor_rgb = One;
            state.src_factor_a = One;
            state.dst_factor_rgb = Zero;
            state.dst_factor_a = Zero;
        }
    }

    // Non-premultiplied sources scale the RGB factor by source alpha instead.
    if matches!(alpha, BlendAlpha::Multiply)
        && !matches!(
            mode,
            BlendMode::Multiply | BlendMode::Lighten | BlendMode::Darken
        )
        && state.src_factor_rgb == One
    {
        state.src_factor_rgb = SrcAlpha;
    }

    state
}

macro_rules! raw_enum {
    ($ty:ident { $($variant:ident),+ $(,)? }) => {
        impl $ty {
            pub(crate) fn to_raw(self) -> u32 {
                self as u32
            }

            pub(crate) fn from_raw(raw: u32) -> Self {
                $(
                    if raw == $ty::$variant as u32 {
                        return $ty::$variant;
                    }
                )+
                // Decoders only see values the recorder wrote.
                debug_assert!(false, "invalid raw {} value {raw}", stringify!($ty));
                Self::from_raw(0)
            }
        }
    };
}

raw_enum!(BlendFactor {
    Zero,
    One,
    SrcColor,
    OneMinusSrcColor,
    SrcAlpha,
    OneMinusSrcAlpha,
    DstColor,
    OneMinusDstColor,
    DstAlpha,
    OneMinusDstAlpha,
    SrcAlphaSaturated,
});
raw_enum!(BlendOperation {
    Add,
    Subtract,
    ReverseSubtract,
    Min,
    Max,
});
raw_enum!(CompareMode {
    Less,
    LessEqual,
    Equal,
    GreaterEqual,
    Greater,
    NotEqual,
    Always,
    Never,
});
raw_enum!(StencilAction {
    Keep,
    Zero,
    Replace,
    Increment,
    Decrement,
    IncrementWrap,
    DecrementWrap,
    Invert,
});
raw_enum!(CullMode { None, Back, Front });
raw_enum!(Winding {
    CounterClockwise,
    Clockwise,
});

/// Everything the recorder tracks between commands, including values the
/// backends never see (line style feeds geometry generation at record time).
#[derive(Clone)]
pub(crate) struct GraphicsState {
    pub color: Color,
    pub shader: Option<std::sync::Arc<dyn crate::resources::Shader>>,
    pub render: RenderState,
    pub line_width: f32,
    pub line_style: LineStyle,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            shader: None,
            render: RenderState::default(),
            line_width: 1.0,
            line_style: LineStyle::Smooth,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    Rough,
    Smooth,
}
