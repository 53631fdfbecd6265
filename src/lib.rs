//! Folio - a single-page portfolio site
//!
//! Core modules:
//! - `route`: Path resolution (path string -> page + slug)
//! - `history`: Address-bar fragment synchronization
//! - `transition`: Navigation state machine with animated page layers
//! - `tilt`: Pointer-driven 3D tilt for project cards
//! - `motion`: Reduced-motion preference as an observable signal
//! - `content`: Read-only project/profile data
//! - `view`: HTML rendering of resolved pages
//! - `app`: Everything the browser shell drives, behind one `Site`

pub mod app;
pub mod contact;
pub mod content;
pub mod easing;
pub mod history;
pub mod motion;
pub mod nav;
pub mod pages;
pub mod route;
pub mod spring;
pub mod tilt;
pub mod transition;
pub mod view;

pub use content::Portfolio;
pub use history::{HistorySync, Location, MemoryLocation};
pub use motion::MotionPreference;
pub use route::{Page, Route, resolve};
pub use tilt::TiltCard;
pub use transition::{Direction, NavigationState, TransitionController};

/// Site configuration constants
pub mod consts {
    /// Fixed integration step for springs (120 Hz)
    pub const SPRING_DT: f32 = 1.0 / 120.0;
    /// Maximum spring substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Frame deltas above this are treated as a stall (tab switch) and clamped
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Page enter animation (seconds)
    pub const ENTER_DURATION: f32 = 0.3;
    /// Page exit animation (seconds)
    pub const EXIT_DURATION: f32 = 0.2;
    /// Scale of a page at the invisible end of a transition
    pub const TRANSITION_SCALE: f32 = 0.98;
    /// Transition easing, CSS `cubic-bezier(0.22, 1, 0.36, 1)`
    pub const TRANSITION_EASE: (f32, f32, f32, f32) = (0.22, 1.0, 0.36, 1.0);

    /// Maximum card rotation around either axis (degrees)
    pub const TILT_MAX_DEG: f32 = 7.5;
    /// Card tilt spring stiffness
    pub const TILT_STIFFNESS: f32 = 100.0;
    /// Card tilt spring mass
    pub const TILT_MASS: f32 = 1.0;
    /// CSS perspective applied to tilted cards (px)
    pub const TILT_PERSPECTIVE_PX: f32 = 1000.0;
    /// Radius of the hover glow gradient (px)
    pub const GLOW_RADIUS_PX: f32 = 600.0;

    /// Navbar switches to its opaque style past this scroll offset (px)
    pub const NAV_SCROLL_THRESHOLD: f64 = 20.0;
    /// How long "Copied!" feedback stays visible (ms)
    pub const COPY_FEEDBACK_MS: f64 = 2000.0;

    /// Media query for the accessibility preference
    pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
}
