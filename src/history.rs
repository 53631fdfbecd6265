//! Address-bar synchronization
//!
//! The fragment (`#/work/slug`) is the only persisted, shareable form of the
//! navigation state. `HistorySync` hydrates the initial path from it and
//! publishes every navigation back into it.
//!
//! The browser is abstracted behind [`Location`] so the same logic runs in
//! tests (`MemoryLocation`) and in wasm (`BrowserLocation`).

use crate::route::normalize_path;

/// The addressable location of the page view
pub trait Location {
    /// Current fragment without the leading `#`. `None` when there is no
    /// addressable window (e.g. non-interactive rendering).
    fn fragment(&self) -> Option<String>;

    /// Replace the fragment without reloading the page
    fn set_fragment(&mut self, path: &str);

    /// Smoothly scroll the viewport back to its origin
    fn scroll_to_top(&mut self);
}

/// Percent-encode every segment of `path` for use as a URL fragment.
/// Slashes are kept, so `/work/slug` stays readable in the address bar.
pub fn encode_fragment(path: &str) -> String {
    path.split('/')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/")
}

/// Inverse of [`encode_fragment`]. A fragment with malformed escapes (typed
/// by hand) is taken as is.
pub fn decode_fragment(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

/// Bidirectional bridge between navigation state and the fragment
#[derive(Debug, Clone)]
pub struct HistorySync<L: Location> {
    location: L,
}

impl<L: Location> HistorySync<L> {
    pub fn new(location: L) -> Self {
        Self { location }
    }

    /// Path to seed navigation state with at startup.
    ///
    /// Missing or empty fragments (and a missing window) yield `/`.
    pub fn initial_path(&self) -> String {
        match self.location.fragment() {
            Some(fragment) if !fragment.is_empty() => normalize_path(&fragment).to_string(),
            _ => "/".to_string(),
        }
    }

    /// Write `path` into the fragment and scroll to the top.
    ///
    /// History entries are left to the fragment mechanism itself: assigning the
    /// same fragment twice does not add a second entry.
    pub fn publish(&mut self, path: &str) {
        log::debug!("Publishing fragment #{}", path);
        self.location.set_fragment(path);
        self.location.scroll_to_top();
    }

    /// Current fragment as a navigation path, if any
    pub fn read(&self) -> Option<String> {
        self.location.fragment()
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    /// The environment side of the location (e.g. to simulate back/forward)
    pub fn location_mut(&mut self) -> &mut L {
        &mut self.location
    }
}

/// In-memory location used natively and in tests.
///
/// Mirrors browser fragment semantics: the address bar holds the encoded
/// fragment, and writing a fragment equal to the current one is not a new
/// history entry.
#[derive(Debug, Clone, Default)]
pub struct MemoryLocation {
    /// Raw (encoded) fragment as the address bar shows it
    fragment: Option<String>,
    /// Raw fragments in history order (oldest first)
    pub entries: Vec<String>,
    /// Number of scroll-to-top requests seen
    pub scroll_requests: u32,
    /// Whether a window is "available"; when false every operation is a no-op
    detached: bool,
}

impl MemoryLocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Location whose address bar already carries the raw `fragment`
    /// (without `#`)
    pub fn with_fragment(fragment: &str) -> Self {
        Self {
            fragment: Some(fragment.to_string()),
            entries: vec![fragment.to_string()],
            ..Self::default()
        }
    }

    /// Location with no window at all
    pub fn detached() -> Self {
        Self {
            detached: true,
            ..Self::default()
        }
    }

    /// Simulate the user pressing "back": returns the fragment now showing
    pub fn back(&mut self) -> Option<String> {
        if self.entries.len() > 1 {
            self.entries.pop();
            self.fragment = self.entries.last().cloned();
        }
        self.fragment()
    }
}

impl Location for MemoryLocation {
    fn fragment(&self) -> Option<String> {
        if self.detached {
            return None;
        }
        self.fragment.as_deref().map(decode_fragment)
    }

    fn set_fragment(&mut self, path: &str) {
        if self.detached {
            return;
        }
        let raw = encode_fragment(path);
        if self.fragment.as_deref() != Some(raw.as_str()) {
            self.entries.push(raw.clone());
        }
        self.fragment = Some(raw);
    }

    fn scroll_to_top(&mut self) {
        if self.detached {
            return;
        }
        self.scroll_requests += 1;
    }
}

/// The real browser address bar.
///
/// The window is looked up on every call; before it exists every operation
/// degrades to a no-op.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserLocation;

#[cfg(target_arch = "wasm32")]
impl Location for BrowserLocation {
    fn fragment(&self) -> Option<String> {
        let hash = web_sys::window()?.location().hash().ok()?;
        let raw = hash.strip_prefix('#').unwrap_or(&hash);
        Some(decode_fragment(raw))
    }

    fn set_fragment(&mut self, path: &str) {
        if let Some(window) = web_sys::window() {
            if window.location().set_hash(&encode_fragment(path)).is_err() {
                log::warn!("Failed to set location hash to {}", path);
            }
        }
    }

    fn scroll_to_top(&mut self) {
        if let Some(window) = web_sys::window() {
            let options = web_sys::ScrollToOptions::new();
            options.set_top(0.0);
            options.set_behavior(web_sys::ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
        }
    }
}
