//! Fixed-function state for the photo, overlay and box pipelines
//!
//! The photo and its annotation marks are drawn flat, in submission order,
//! over a depth buffer they never touch. The box is depth tested and only
//! its inward-facing walls are kept.

/// Color and depth every frame starts from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearState {
    /// Background behind the photo or the box (RGBA).
    pub color: [f32; 4],
    pub depth: f32,
}

impl ClearState {
    /// Clear to `color` and the far plane.
    pub fn new(color: [f32; 4]) -> Self {
        Self { color, depth: 1.0 }
    }

    pub(crate) fn color_ops(&self) -> wgpu::Operations<wgpu::Color> {
        let [r, g, b, a] = self.color.map(f64::from);
        wgpu::Operations {
            load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
            store: wgpu::StoreOp::Store,
        }
    }

    pub(crate) fn depth_ops(&self) -> wgpu::Operations<f32> {
        wgpu::Operations {
            load: wgpu::LoadOp::Clear(self.depth),
            store: wgpu::StoreOp::Store,
        }
    }
}

impl Default for ClearState {
    fn default() -> Self {
        Self::new([0.0, 0.0, 0.0, 1.0])
    }
}

/// Color blending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendState {
    #[default]
    Opaque,
    /// Straight alpha over, for the anti-aliased dots.
    Alpha,
}

impl BlendState {
    pub fn to_wgpu(self) -> Option<wgpu::BlendState> {
        match self {
            BlendState::Opaque => None,
            BlendState::Alpha => Some(wgpu::BlendState::ALPHA_BLENDING),
        }
    }
}

/// Whether a pipeline takes part in depth testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthState {
    /// Nearest wall wins.
    #[default]
    Tested,
    /// Draw in submission order; the attachment is left untouched.
    Ignored,
}

impl DepthState {
    pub fn to_wgpu(self, format: wgpu::TextureFormat) -> wgpu::DepthStencilState {
        let (depth_write_enabled, depth_compare) = match self {
            DepthState::Tested => (true, wgpu::CompareFunction::Less),
            DepthState::Ignored => (false, wgpu::CompareFunction::Always),
        };
        wgpu::DepthStencilState {
            format,
            depth_write_enabled,
            depth_compare,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }
    }
}

/// Face culling. Front faces are counter-clockwise on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CullState {
    None,
    /// Drop the outside of the box.
    #[default]
    Back,
}

impl CullState {
    pub fn to_wgpu(self) -> Option<wgpu::Face> {
        match self {
            CullState::None => None,
            CullState::Back => Some(wgpu::Face::Back),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_targets_far_plane() {
        let clear = ClearState::new([0.2, 0.3, 0.3, 1.0]);
        assert!(matches!(clear.depth_ops().load, wgpu::LoadOp::Clear(d) if d == 1.0));
        match clear.color_ops().load {
            wgpu::LoadOp::Clear(c) => {
                assert!((c.r - 0.2).abs() < 1e-6);
                assert!((c.g - 0.3).abs() < 1e-6);
                assert_eq!(c.a, 1.0);
            }
            other => panic!("expected clear, got {other:?}"),
        }
    }

    #[test]
    fn test_ignored_depth_never_writes() {
        let state = DepthState::Ignored.to_wgpu(wgpu::TextureFormat::Depth32Float);
        assert!(!state.depth_write_enabled);
        assert_eq!(state.depth_compare, wgpu::CompareFunction::Always);
        assert!(DepthState::Tested
            .to_wgpu(wgpu::TextureFormat::Depth32Float)
            .depth_write_enabled);
    }

    #[test]
    fn test_state_conversions() {
        assert_eq!(BlendState::Opaque.to_wgpu(), None);
        assert_eq!(CullState::Back.to_wgpu(), Some(wgpu::Face::Back));
        assert_eq!(CullState::None.to_wgpu(), None);
    }
}
