//! Pointer-driven 3D tilt for project cards
//!
//! Each card tracks the cursor relative to its own rectangle, normalizes it to
//! `[-0.5, 0.5]` on both axes, smooths each axis through a critically damped
//! spring and maps the smoothed values to rotations. Cards own their state
//! outright; nothing is shared between cards.

use glam::Vec2;

use crate::consts::{GLOW_RADIUS_PX, TILT_MAX_DEG, TILT_PERSPECTIVE_PX};
use crate::spring::{Spring, SpringConfig};

/// Card bounds in client coordinates (as from `getBoundingClientRect`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl SurfaceRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(left, top),
            size: Vec2::new(width, height),
        }
    }

    /// Pointer position relative to the top-left corner
    pub fn local(&self, client: Vec2) -> Vec2 {
        client - self.origin
    }

    /// Strictly inside the rectangle
    pub fn contains(&self, client: Vec2) -> bool {
        let p = self.local(client);
        p.x > 0.0 && p.y > 0.0 && p.x < self.size.x && p.y < self.size.y
    }

    /// Offset from the center normalized by the rectangle's own size.
    ///
    /// Clamped to `[-0.5, 0.5]` so events delivered just outside the edge (or
    /// a degenerate zero-sized rect) stay in range.
    pub fn normalize(&self, client: Vec2) -> PointerSample {
        if self.size.x <= 0.0 || self.size.y <= 0.0 {
            return PointerSample::CENTER;
        }
        let pct = self.local(client) / self.size - Vec2::splat(0.5);
        let pct = pct.clamp(Vec2::splat(-0.5), Vec2::splat(0.5));
        PointerSample {
            x_pct: pct.x,
            y_pct: pct.y,
        }
    }
}

/// Normalized cursor offset from the card center
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerSample {
    pub x_pct: f32,
    pub y_pct: f32,
}

impl PointerSample {
    pub const CENTER: Self = Self {
        x_pct: 0.0,
        y_pct: 0.0,
    };
}

/// Transform applied to a card surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardTransform {
    /// No transform at all
    Flat,
    Tilted {
        /// Rotation around the horizontal axis (degrees)
        rotate_x_deg: f32,
        /// Rotation around the vertical axis (degrees)
        rotate_y_deg: f32,
    },
}

impl CardTransform {
    pub fn is_identity(&self) -> bool {
        match self {
            CardTransform::Flat => true,
            CardTransform::Tilted {
                rotate_x_deg,
                rotate_y_deg,
            } => *rotate_x_deg == 0.0 && *rotate_y_deg == 0.0,
        }
    }

    /// Value for the CSS `transform` property
    pub fn to_css(&self) -> String {
        match self {
            CardTransform::Flat => "none".to_string(),
            CardTransform::Tilted {
                rotate_x_deg,
                rotate_y_deg,
            } => format!(
                "perspective({TILT_PERSPECTIVE_PX}px) rotateX({rotate_x_deg:.3}deg) rotateY({rotate_y_deg:.3}deg)"
            ),
        }
    }
}

/// Soft radial highlight that follows the pointer, in card-local pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub at: Vec2,
}

impl Glow {
    /// Value for the CSS `background` property of the overlay
    pub fn to_css(&self) -> String {
        format!(
            "radial-gradient({GLOW_RADIUS_PX}px circle at {:.1}px {:.1}px, rgba(139, 92, 246, 0.15), transparent 40%)",
            self.at.x, self.at.y
        )
    }
}

/// Linear map of `value` from `[-0.5, 0.5]` onto `[from, to]`, clamped
fn map_range(value: f32, from: f32, to: f32) -> f32 {
    let t = (value + 0.5).clamp(0.0, 1.0);
    from + (to - from) * t
}

/// Tilt state owned by one card instance
#[derive(Debug, Clone)]
pub struct TiltCard {
    raw: PointerSample,
    /// Last pointer position in card-local pixels, while hovered
    pointer: Option<Vec2>,
    x: Spring,
    y: Spring,
    hovered: bool,
    reduced_motion: bool,
}

impl Default for TiltCard {
    fn default() -> Self {
        Self::new(false)
    }
}

impl TiltCard {
    pub fn new(reduced_motion: bool) -> Self {
        Self::with_config(SpringConfig::default(), reduced_motion)
    }

    pub fn with_config(config: SpringConfig, reduced_motion: bool) -> Self {
        Self {
            raw: PointerSample::CENTER,
            pointer: None,
            x: Spring::new(config, 0.0),
            y: Spring::new(config, 0.0),
            hovered: false,
            reduced_motion,
        }
    }

    pub fn pointer_enter(&mut self) {
        self.hovered = true;
    }

    /// Track the pointer at `client` over a card occupying `rect`.
    /// Ignored entirely under reduced motion.
    pub fn pointer_move(&mut self, client: Vec2, rect: SurfaceRect) {
        if self.reduced_motion {
            return;
        }
        self.hovered = true;
        self.raw = rect.normalize(client);
        self.pointer = Some(rect.local(client).clamp(Vec2::ZERO, rect.size.max(Vec2::ZERO)));
        self.x.set_target(self.raw.x_pct);
        self.y.set_target(self.raw.y_pct);
    }

    /// Reset the raw offsets; the springs carry the card back to neutral
    pub fn pointer_leave(&mut self) {
        self.hovered = false;
        self.raw = PointerSample::CENTER;
        self.pointer = None;
        self.x.set_target(0.0);
        self.y.set_target(0.0);
    }

    /// Flip the reduced-motion branch. Turning it on drops all tracking and
    /// leaves the card flat immediately.
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
        if reduced {
            self.raw = PointerSample::CENTER;
            self.pointer = None;
            self.x.snap(0.0);
            self.y.snap(0.0);
        }
    }

    /// Step the springs by a frame delta (seconds)
    pub fn advance(&mut self, dt: f32) {
        if self.reduced_motion {
            return;
        }
        self.x.advance(dt);
        self.y.advance(dt);
    }

    /// Springs still moving; the frame loop can skip settled cards
    pub fn is_animating(&self) -> bool {
        !self.reduced_motion && !(self.x.is_settled(1e-4) && self.y.is_settled(1e-4))
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Latest raw (unsmoothed) sample
    pub fn sample(&self) -> PointerSample {
        self.raw
    }

    /// Spring-smoothed sample
    pub fn smoothed(&self) -> PointerSample {
        PointerSample {
            x_pct: self.x.position,
            y_pct: self.y.position,
        }
    }

    /// `(rotate_x, rotate_y)` in degrees.
    ///
    /// Pointer toward the top (negative y) tilts the top edge away from the
    /// viewer, so the x rotation is inverted; the y rotation follows x.
    pub fn rotation(&self) -> (f32, f32) {
        let s = self.smoothed();
        (
            map_range(s.y_pct, TILT_MAX_DEG, -TILT_MAX_DEG),
            map_range(s.x_pct, -TILT_MAX_DEG, TILT_MAX_DEG),
        )
    }

    pub fn transform(&self) -> CardTransform {
        if self.reduced_motion {
            return CardTransform::Flat;
        }
        let (rotate_x_deg, rotate_y_deg) = self.rotation();
        CardTransform::Tilted {
            rotate_x_deg,
            rotate_y_deg,
        }
    }

    pub fn glow(&self) -> Option<Glow> {
        if self.reduced_motion || !self.hovered {
            return None;
        }
        self.pointer.map(|at| Glow { at })
    }
}
