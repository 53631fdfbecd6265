//! Timing curves for page transitions

/// CSS-style `cubic-bezier(x1, y1, x2, y2)` timing function
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl CubicBezier {
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub const fn from_tuple(p: (f32, f32, f32, f32)) -> Self {
        Self::new(p.0, p.1, p.2, p.3)
    }

    /// Eased progress for linear progress `t` (clamped to [0, 1])
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }

        // Newton-Raphson: find curve parameter u with x(u) == t
        let mut u = t;
        for _ in 0..8 {
            let x = bezier(u, self.x1, self.x2) - t;
            if x.abs() < 1e-5 {
                break;
            }
            let slope = bezier_slope(u, self.x1, self.x2);
            if slope.abs() < 1e-6 {
                break;
            }
            u = (u - x / slope).clamp(0.0, 1.0);
        }
        bezier(u, self.y1, self.y2)
    }

    pub fn to_css(&self) -> String {
        format!("cubic-bezier({}, {}, {}, {})", self.x1, self.y1, self.x2, self.y2)
    }
}

/// One coordinate of the curve with endpoints fixed at 0 and 1
fn bezier(u: f32, p1: f32, p2: f32) -> f32 {
    let mu = 1.0 - u;
    3.0 * mu * mu * u * p1 + 3.0 * mu * u * u * p2 + u * u * u
}

fn bezier_slope(u: f32, p1: f32, p2: f32) -> f32 {
    let mu = 1.0 - u;
    3.0 * mu * mu * p1 + 6.0 * mu * u * (p2 - p1) + 3.0 * u * u * (1.0 - p2)
}
