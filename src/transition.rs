//! Navigation state machine with animated page layers
//!
//! `TransitionController` is the single writer of the navigation state. Every
//! route change funnels through [`TransitionController::navigate`] (or
//! [`TransitionController::sync_from_location`] for back/forward), which
//! swaps the mounted page layer:
//!
//! ```text
//!   old layer:  Mounted/Entering --> Exiting --(EXIT_DURATION)--> Unmounted
//!   new layer:  Entering --(ENTER_DURATION)--> Mounted
//! ```
//!
//! Both phases run on the same frame clock (`advance`). Under reduced motion
//! both collapse to an immediate swap.

use crate::consts::{ENTER_DURATION, EXIT_DURATION, TRANSITION_EASE, TRANSITION_SCALE};
use crate::easing::CubicBezier;
use crate::history::{HistorySync, Location};
use crate::route::{Route, normalize_path, resolve};

/// Whether the last change came from a navigation (animated) or startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Neutral,
    Enter,
}

/// Process-wide navigation state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    /// Always starts with `/`
    pub current_path: String,
    pub direction: Direction,
}

/// Identity of one mounted page subtree. A fresh key is minted for every
/// transition, so the DOM can tell an entering page from the one leaving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MountKey(pub u64);

impl std::fmt::Display for MountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opacity and scale of a page layer at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageVisual {
    pub opacity: f32,
    pub scale: f32,
}

impl PageVisual {
    pub const VISIBLE: Self = Self {
        opacity: 1.0,
        scale: 1.0,
    };
    pub const HIDDEN: Self = Self {
        opacity: 0.0,
        scale: TRANSITION_SCALE,
    };

    pub fn lerp(from: Self, to: Self, t: f32) -> Self {
        Self {
            opacity: from.opacity + (to.opacity - from.opacity) * t,
            scale: from.scale + (to.scale - from.scale) * t,
        }
    }

    /// Inline style for the layer element
    pub fn to_css(&self) -> String {
        format!("opacity: {:.3}; transform: scale({:.4});", self.opacity, self.scale)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayerPhase {
    Entering { elapsed: f32 },
    Mounted,
    /// `from` is the layer's appearance when the exit began, so a page that
    /// was still entering fades out from where it was
    Exiting { elapsed: f32, from: PageVisual },
}

/// One mounted page subtree
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayer {
    pub key: MountKey,
    pub path: String,
    pub phase: LayerPhase,
}

impl PageLayer {
    /// Route displayed by this layer, derived fresh from its path
    pub fn route(&self) -> Route {
        resolve(&self.path)
    }

    pub fn visual(&self, ease: &CubicBezier) -> PageVisual {
        match self.phase {
            LayerPhase::Mounted => PageVisual::VISIBLE,
            LayerPhase::Entering { elapsed } => {
                let t = ease.evaluate(elapsed / ENTER_DURATION);
                PageVisual::lerp(PageVisual::HIDDEN, PageVisual::VISIBLE, t)
            }
            LayerPhase::Exiting { elapsed, from } => {
                let t = ease.evaluate(elapsed / EXIT_DURATION);
                PageVisual::lerp(from, PageVisual::HIDDEN, t)
            }
        }
    }
}

/// Lifecycle notifications, drained by the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionEvent {
    /// New layer created (its subtree must be rendered)
    Mounted { key: MountKey, path: String },
    EnterStarted(MountKey),
    EnterCompleted(MountKey),
    ExitStarted(MountKey),
    ExitCompleted(MountKey),
    /// An in-flight exit abandoned by a newer navigation
    Superseded(MountKey),
    /// Layer removed (its subtree and any per-card state must be dropped)
    Unmounted(MountKey),
}

/// Owner of the navigation state and the page transition lifecycle
#[derive(Debug)]
pub struct TransitionController<L: Location> {
    state: NavigationState,
    history: HistorySync<L>,
    current: PageLayer,
    exiting: Option<PageLayer>,
    next_key: u64,
    reduced_motion: bool,
    ease: CubicBezier,
    events: Vec<TransitionEvent>,
}

impl<L: Location> TransitionController<L> {
    /// Hydrate from the address bar. The first page appears without animation.
    pub fn new(location: L, reduced_motion: bool) -> Self {
        let history = HistorySync::new(location);
        let path = history.initial_path();
        log::info!("Initial route: {} ({})", path, resolve(&path));

        let current = PageLayer {
            key: MountKey(0),
            path: path.clone(),
            phase: LayerPhase::Mounted,
        };
        Self {
            state: NavigationState {
                current_path: path.clone(),
                direction: Direction::Neutral,
            },
            history,
            events: vec![TransitionEvent::Mounted {
                key: current.key,
                path,
            }],
            current,
            exiting: None,
            next_key: 1,
            reduced_motion,
            ease: CubicBezier::from_tuple(TRANSITION_EASE),
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn current_path(&self) -> &str {
        &self.state.current_path
    }

    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    /// The displayed route, always `resolve(current_path)`
    pub fn route(&self) -> Route {
        resolve(&self.state.current_path)
    }

    pub fn history(&self) -> &HistorySync<L> {
        &self.history
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Navigate to `path`: update state, swap page layers, publish the
    /// fragment and scroll to top.
    ///
    /// Navigating to the path already shown re-publishes and scrolls but does
    /// not start a second transition cycle.
    pub fn navigate(&mut self, path: &str) {
        let path = normalize_path(path);
        self.state.direction = Direction::Enter;

        if path == self.state.current_path {
            log::debug!("Already at {}, not restarting transition", path);
        } else {
            log::info!("Navigate {} -> {}", self.state.current_path, path);
            self.switch_to(path);
        }

        self.history.publish(path);
    }

    /// Follow an external fragment change (back/forward buttons).
    ///
    /// Returns `true` if the route changed. A fragment equal to the current
    /// path is the echo of our own `publish` and is ignored.
    pub fn sync_from_location(&mut self) -> bool {
        let Some(fragment) = self.history.read() else {
            return false;
        };
        let path = normalize_path(if fragment.is_empty() { "/" } else { &fragment });
        if path == self.state.current_path {
            return false;
        }
        log::info!("Location changed {} -> {}", self.state.current_path, path);
        self.state.direction = Direction::Enter;
        self.switch_to(path);
        true
    }

    fn switch_to(&mut self, path: &str) {
        self.state.current_path = path.to_string();

        // A faster second navigation abandons any exit still in flight
        if let Some(stale) = self.exiting.take() {
            log::debug!("Superseding exit of layer {}", stale.key);
            self.events.push(TransitionEvent::Superseded(stale.key));
            self.events.push(TransitionEvent::Unmounted(stale.key));
        }

        let key = MountKey(self.next_key);
        self.next_key += 1;

        let entering_phase = if self.reduced_motion {
            LayerPhase::Mounted
        } else {
            LayerPhase::Entering { elapsed: 0.0 }
        };
        let incoming = PageLayer {
            key,
            path: path.to_string(),
            phase: entering_phase,
        };
        let mut outgoing = std::mem::replace(&mut self.current, incoming);

        if self.reduced_motion {
            self.events.push(TransitionEvent::Unmounted(outgoing.key));
        } else {
            outgoing.phase = LayerPhase::Exiting {
                elapsed: 0.0,
                from: outgoing.visual(&self.ease),
            };
            self.events.push(TransitionEvent::ExitStarted(outgoing.key));
            self.exiting = Some(outgoing);
        }

        self.events.push(TransitionEvent::Mounted {
            key,
            path: path.to_string(),
        });
        if !self.reduced_motion {
            self.events.push(TransitionEvent::EnterStarted(key));
        }
    }

    /// Advance running animations by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        let dt = dt.max(0.0);

        let mut finished_exit = None;
        if let Some(layer) = self.exiting.as_mut() {
            if let LayerPhase::Exiting { elapsed, .. } = &mut layer.phase {
                *elapsed += dt;
                if *elapsed >= EXIT_DURATION {
                    finished_exit = Some(layer.key);
                }
            }
        }
        if let Some(key) = finished_exit {
            // Exit completion strictly precedes unmount
            self.events.push(TransitionEvent::ExitCompleted(key));
            self.exiting = None;
            self.events.push(TransitionEvent::Unmounted(key));
        }

        if let LayerPhase::Entering { elapsed } = &mut self.current.phase {
            *elapsed += dt;
            if *elapsed >= ENTER_DURATION {
                self.current.phase = LayerPhase::Mounted;
                self.events.push(TransitionEvent::EnterCompleted(self.current.key));
            }
        }
    }

    /// Apply a change of the reduced-motion preference. Switching it on
    /// finishes any in-flight transition instantly.
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        if self.reduced_motion == reduced {
            return;
        }
        self.reduced_motion = reduced;
        if !reduced {
            return;
        }
        if let Some(stale) = self.exiting.take() {
            self.events.push(TransitionEvent::Unmounted(stale.key));
        }
        if matches!(self.current.phase, LayerPhase::Entering { .. }) {
            self.current.phase = LayerPhase::Mounted;
            self.events.push(TransitionEvent::EnterCompleted(self.current.key));
        }
    }

    pub fn is_animating(&self) -> bool {
        self.exiting.is_some() || !matches!(self.current.phase, LayerPhase::Mounted)
    }

    /// The layer keyed by the current path
    pub fn current_layer(&self) -> &PageLayer {
        &self.current
    }

    pub fn exiting_layer(&self) -> Option<&PageLayer> {
        self.exiting.as_ref()
    }

    /// All live layers in paint order (outgoing first)
    pub fn layers(&self) -> impl Iterator<Item = &PageLayer> {
        self.exiting.iter().chain(std::iter::once(&self.current))
    }

    pub fn visual(&self, layer: &PageLayer) -> PageVisual {
        if self.reduced_motion {
            return PageVisual::VISIBLE;
        }
        layer.visual(&self.ease)
    }

    /// Take pending lifecycle events in the order they occurred
    pub fn drain_events(&mut self) -> Vec<TransitionEvent> {
        std::mem::take(&mut self.events)
    }
}
