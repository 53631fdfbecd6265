//! Site state shared by the browser shell
//!
//! `Site` ties the transition controller, per-card tilt state and the page
//! chrome together behind plain methods, so everything the DOM shell does
//! in response to an event is testable without a browser.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use glam::Vec2;

use crate::contact::{ContactError, ContactForm, CopyFeedback};
use crate::content::Portfolio;
use crate::history::Location;
use crate::motion::{MotionPreference, Subscription};
use crate::nav::NavState;
use crate::pages::{PageView, TagFilter};
use crate::tilt::{CardTransform, Glow, SurfaceRect, TiltCard};
use crate::transition::{MountKey, PageLayer, PageVisual, TransitionController, TransitionEvent};
use crate::view::{self, CardId};

/// Result of one animation frame
#[derive(Debug, Default)]
pub struct Frame {
    /// Transition lifecycle events, in order
    pub events: Vec<TransitionEvent>,
    /// Cards whose transform changed this frame
    pub cards: Vec<CardId>,
}

pub struct Site<L: Location> {
    portfolio: Portfolio,
    reduced_motion: bool,
    controller: TransitionController<L>,
    nav: NavState,
    filter: TagFilter,
    contact: ContactForm,
    copy: CopyFeedback,
    cards: HashMap<CardId, TiltCard>,
    /// Cards whose style changed outside the frame loop
    restyle: Vec<CardId>,
}

impl<L: Location> Site<L> {
    pub fn new(location: L, portfolio: Portfolio, reduced_motion: bool) -> Self {
        Self {
            portfolio,
            reduced_motion,
            controller: TransitionController::new(location, reduced_motion),
            nav: NavState::new(),
            filter: TagFilter::default(),
            contact: ContactForm::default(),
            copy: CopyFeedback::default(),
            cards: HashMap::new(),
            restyle: Vec::new(),
        }
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn controller(&self) -> &TransitionController<L> {
        &self.controller
    }

    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// The one navigation entry point for clicks anywhere on the site
    pub fn navigate(&mut self, path: &str) {
        self.nav.close_menu();
        self.controller.navigate(path);
    }

    /// Browser back/forward changed the fragment
    pub fn on_hash_change(&mut self) -> bool {
        self.controller.sync_from_location()
    }

    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        self.nav.on_scroll(scroll_y)
    }

    pub fn toggle_menu(&mut self) {
        self.nav.toggle_menu();
    }

    /// The environment's reduced-motion signal changed
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        if self.reduced_motion == reduced {
            return;
        }
        log::info!("Reduced motion: {}", reduced);
        self.reduced_motion = reduced;
        self.controller.set_reduced_motion(reduced);
        for (id, card) in self.cards.iter_mut() {
            card.set_reduced_motion(reduced);
            self.restyle.push(id.clone());
        }
    }

    /// Select a work-list tag. Returns `true` if the current page must be
    /// re-rendered.
    pub fn select_tag(&mut self, tag: &str) -> bool {
        if self.filter.is_selected(tag) {
            return false;
        }
        self.filter.select(tag);
        // Cards of the current layer are about to be replaced
        let key = self.controller.current_layer().key;
        self.cards.retain(|id, _| id.key != key);
        true
    }

    fn card(&mut self, id: &CardId) -> &mut TiltCard {
        let reduced = self.reduced_motion;
        self.cards
            .entry(id.clone())
            .or_insert_with(|| TiltCard::new(reduced))
    }

    fn is_live(&self, key: MountKey) -> bool {
        self.controller.layers().any(|l| l.key == key)
    }

    pub fn card_enter(&mut self, id: &CardId) {
        if self.is_live(id.key) {
            self.card(id).pointer_enter();
        }
    }

    pub fn card_move(&mut self, id: &CardId, client: Vec2, rect: SurfaceRect) {
        if self.is_live(id.key) {
            self.card(id).pointer_move(client, rect);
        }
    }

    pub fn card_leave(&mut self, id: &CardId) {
        if let Some(card) = self.cards.get_mut(id) {
            card.pointer_leave();
        }
    }

    pub fn card_style(&self, id: &CardId) -> (CardTransform, Option<Glow>) {
        match self.cards.get(id) {
            Some(card) => (card.transform(), card.glow()),
            None => (CardTransform::Flat, None),
        }
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Advance animations by `dt` seconds
    pub fn frame(&mut self, dt: f32) -> Frame {
        self.controller.advance(dt);
        let events = self.controller.drain_events();

        // Per-card state dies with its layer
        for event in &events {
            if let TransitionEvent::Unmounted(key) = event {
                self.cards.retain(|id, _| id.key != *key);
            }
        }

        let mut cards = std::mem::take(&mut self.restyle);
        cards.retain(|id| self.cards.contains_key(id));
        for (id, card) in self.cards.iter_mut() {
            if card.is_animating() || card.is_hovered() {
                card.advance(dt);
                if !cards.contains(id) {
                    cards.push(id.clone());
                }
            }
        }

        Frame { events, cards }
    }

    pub fn layers(&self) -> impl Iterator<Item = (&PageLayer, PageVisual)> {
        self.controller
            .layers()
            .map(|layer| (layer, self.controller.visual(layer)))
    }

    pub fn view_of(&self, layer: &PageLayer) -> PageView<'_> {
        PageView::resolve(&layer.route(), &self.portfolio)
    }

    /// Markup for a layer
    pub fn render_layer(&self, layer: &PageLayer, now_ms: f64) -> String {
        let view = self.view_of(layer);
        view::render_page(
            layer.key,
            &view,
            &self.portfolio,
            &self.filter,
            self.copy.is_showing(now_ms),
        )
    }

    pub fn render_nav(&self) -> String {
        view::render_nav(
            &self.portfolio.profile,
            self.controller.current_path(),
            &self.nav,
        )
    }

    pub fn document_title(&self) -> String {
        let layer = self.controller.current_layer();
        self.view_of(layer).title(&self.portfolio)
    }

    pub fn contact_field(&mut self, field: &str, value: &str) {
        self.contact.set_field(field, value);
    }

    /// `mailto:` URL for the filled-in form
    pub fn submit_contact(&self) -> Result<String, ContactError> {
        self.contact.mailto(&self.portfolio.profile.email)
    }

    pub fn email_copied(&mut self, now_ms: f64) {
        self.copy.mark_copied(now_ms);
    }

    pub fn copy_label(&self, now_ms: f64) -> &'static str {
        if self.copy.is_showing(now_ms) {
            "Copied!"
        } else {
            "Copy Email"
        }
    }
}

/// Keep `site` in step with `preference` for as long as the returned
/// subscription lives
pub fn watch_motion<L: Location + 'static>(
    site: &Rc<RefCell<Site<L>>>,
    preference: &MotionPreference,
) -> Subscription {
    let weak = Rc::downgrade(site);
    preference.subscribe(move |reduced| {
        if let Some(site) = weak.upgrade() {
            site.borrow_mut().set_reduced_motion(reduced);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::tests::sample;
    use crate::history::MemoryLocation;
    use crate::route::Route;

    fn site(path: &str, reduced: bool) -> Site<MemoryLocation> {
        let mut site = Site::new(MemoryLocation::with_fragment(path), sample(), reduced);
        site.frame(0.0);
        site
    }

    fn rect() -> SurfaceRect {
        SurfaceRect::new(0.0, 0.0, 300.0, 200.0)
    }

    fn run(site: &mut Site<MemoryLocation>, seconds: f32) -> Vec<TransitionEvent> {
        let mut events = Vec::new();
        for _ in 0..(seconds * 60.0) as usize {
            events.extend(site.frame(1.0 / 60.0).events);
        }
        events
    }

    #[test]
    fn test_card_state_dies_with_layer() {
        let mut site = site("/work", false);
        let key = site.controller().current_layer().key;
        let id = CardId::new(key, "edge-cache");
        site.card_enter(&id);
        site.card_move(&id, Vec2::new(280.0, 20.0), rect());
        run(&mut site, 0.5);
        assert!(!site.card_style(&id).0.is_identity());
        assert_eq!(site.card_count(), 1);

        site.navigate("/about");
        // Still exiting: card survives
        site.frame(0.05);
        assert_eq!(site.card_count(), 1);

        let events = run(&mut site, 0.5);
        assert!(events.contains(&TransitionEvent::Unmounted(key)));
        assert_eq!(site.card_count(), 0);
    }

    #[test]
    fn test_cards_of_dead_layers_are_not_recreated() {
        let mut site = site("/", false);
        let stale = CardId::new(MountKey(99), "edge-cache");
        site.card_enter(&stale);
        site.card_move(&stale, Vec2::new(10.0, 10.0), rect());
        assert_eq!(site.card_count(), 0);
    }

    #[test]
    fn test_cards_are_independent() {
        let mut site = site("/work", false);
        let key = site.controller().current_layer().key;
        let a = CardId::new(key, "edge-cache");
        let b = CardId::new(key, "physical-ai-humanoid-robotics");
        site.card_enter(&a);
        site.card_enter(&b);
        site.card_move(&a, Vec2::new(290.0, 10.0), rect());
        run(&mut site, 0.5);
        assert!(!site.card_style(&a).0.is_identity());
        assert!(site.card_style(&b).0.is_identity());
    }

    #[test]
    fn test_preference_flip_reaches_everything() {
        let site = Rc::new(RefCell::new(site("/work", false)));
        let preference = MotionPreference::new(false);
        let _sub = watch_motion(&site, &preference);

        let key = site.borrow().controller().current_layer().key;
        let id = CardId::new(key, "edge-cache");
        {
            let mut s = site.borrow_mut();
            s.card_enter(&id);
            s.card_move(&id, Vec2::new(280.0, 20.0), rect());
            s.frame(0.2);
            s.navigate("/work/edge-cache");
            assert!(s.controller().is_animating());
        }

        preference.set(true);
        let s = site.borrow();
        assert!(s.reduced_motion());
        assert!(!s.controller().is_animating());
        assert_eq!(s.layers().count(), 1);
    }

    #[test]
    fn test_motion_flip_restyles_cards() {
        let mut site = site("/work", false);
        let key = site.controller().current_layer().key;
        let id = CardId::new(key, "edge-cache");
        site.card_enter(&id);
        site.card_move(&id, Vec2::new(280.0, 20.0), rect());
        run(&mut site, 0.5);
        site.card_leave(&id);
        run(&mut site, 2.0);

        // Settled and not hovered: nothing to restyle
        assert!(site.frame(1.0 / 60.0).cards.is_empty());

        site.set_reduced_motion(true);
        assert_eq!(site.frame(0.0).cards, vec![id.clone()]);
        assert_eq!(site.card_style(&id), (CardTransform::Flat, None));
    }

    #[test]
    fn test_reduced_motion_cards_stay_flat() {
        let mut site = site("/work", true);
        let key = site.controller().current_layer().key;
        let id = CardId::new(key, "edge-cache");
        site.card_enter(&id);
        site.card_move(&id, Vec2::new(280.0, 20.0), rect());
        run(&mut site, 0.5);
        assert_eq!(site.card_style(&id), (CardTransform::Flat, None));
    }

    #[test]
    fn test_reduced_motion_wins_everywhere() {
        let mut site = site("/work", true);
        let key = site.controller().current_layer().key;
        let id = CardId::new(key, "edge-cache");
        site.card_enter(&id);
        for _ in 0..30 {
            site.card_move(&id, Vec2::new(280.0, 20.0), rect());
            site.frame(1.0 / 60.0);
        }
        let (transform, glow) = site.card_style(&id);
        assert!(transform.is_identity());
        assert!(glow.is_none());

        site.navigate("/about");
        assert!(!site.controller().is_animating());
        assert_eq!(site.layers().count(), 1);

        // Preference cleared: motion comes back
        site.set_reduced_motion(false);
        site.navigate("/work");
        assert!(site.controller().is_animating());
    }

    #[test]
    fn test_not_found_scenario() {
        let mut site = site("/", false);
        site.navigate("/work/does-not-exist");
        let layer = site.controller().current_layer().clone();
        assert_eq!(
            layer.route(),
            Route::CaseStudy {
                slug: "does-not-exist".to_string()
            }
        );
        assert!(matches!(site.view_of(&layer), PageView::ProjectNotFound { .. }));
        assert!(site.render_layer(&layer, 0.0).contains("Project Not Found"));
        assert_eq!(site.document_title(), "Project Not Found - Aaira Sheikh");

        // Recovery action
        site.navigate("/work");
        assert_eq!(site.controller().route(), Route::WorkList);
    }

    #[test]
    fn test_tag_selection_rerenders_and_drops_cards() {
        let mut site = site("/work", false);
        let key = site.controller().current_layer().key;
        let id = CardId::new(key, "edge-cache");
        site.card_enter(&id);
        assert!(site.select_tag("Rust"));
        assert!(!site.select_tag("Rust"));
        assert_eq!(site.card_count(), 0);

        let layer = site.controller().current_layer().clone();
        let html = site.render_layer(&layer, 0.0);
        assert!(html.contains("edge-cache"));
        assert!(!html.contains(&format!("data-card=\"{}:physical-ai-humanoid-robotics\"", key)));
    }

    #[test]
    fn test_navigate_closes_menu() {
        let mut site = site("/", false);
        site.toggle_menu();
        assert!(site.nav().menu_open());
        site.navigate("/contact");
        assert!(!site.nav().menu_open());
        assert!(site.render_nav().contains("nav-link active\" data-nav=\"/contact\""));
    }

    #[test]
    fn test_contact_submission() {
        let mut site = site("/contact", false);
        assert_eq!(site.submit_contact(), Err(ContactError::MissingName));
        site.contact_field("name", "Lin");
        site.contact_field("email", "lin@example.org");
        site.contact_field("message", "Hi there");
        let url = site.submit_contact().unwrap();
        assert!(url.starts_with("mailto:aairasheikh66@gmail.com?subject="));

        site.email_copied(100.0);
        let layer = site.controller().current_layer().clone();
        assert!(site.render_layer(&layer, 500.0).contains("Copied!"));
        assert!(site.render_layer(&layer, 2500.0).contains("Copy Email"));
        assert_eq!(site.copy_label(2500.0), "Copy Email");
    }
}
