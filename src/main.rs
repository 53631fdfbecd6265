//! Folio entry point
//!
//! In the browser this wires DOM events and the animation frame loop to a
//! [`folio::app::Site`]. Natively it prints a routing trace for the paths
//! given on the command line.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_site {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, Event, MouseEvent, PointerEvent};

    use folio::app::{Frame, Site, watch_motion};
    use folio::consts::MAX_FRAME_DT;
    use folio::history::BrowserLocation;
    use folio::motion::{MediaQueryBridge, MotionPreference};
    use folio::tilt::SurfaceRect;
    use folio::transition::{MountKey, TransitionEvent};
    use folio::view::CardId;
    use folio::Portfolio;

    type SharedSite = Rc<RefCell<Site<BrowserLocation>>>;

    /// Shell-only state that is not part of the site model
    #[derive(Default)]
    struct Shell {
        last_time: f64,
        hovered: Option<CardId>,
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn layer_element(document: &Document, key: MountKey) -> Option<Element> {
        document
            .query_selector(&format!("[data-mount-key=\"{}\"]", key))
            .ok()
            .flatten()
    }

    fn card_element(document: &Document, id: &CardId) -> Option<Element> {
        document
            .query_selector(&format!("[data-card=\"{}\"]", id))
            .ok()
            .flatten()
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Folio starting...");

        let Some(document) = document() else {
            log::error!("No document, nothing to render");
            return;
        };

        let portfolio = match Portfolio::embedded() {
            Ok(portfolio) => portfolio,
            Err(e) => {
                log::error!("Portfolio data is unreadable: {}", e);
                if let Some(pages) = document.get_element_by_id("pages") {
                    pages.set_text_content(Some("Content failed to load."));
                }
                return;
            }
        };

        let preference = MotionPreference::new(false);
        let bridge = MediaQueryBridge::attach(&preference);
        if bridge.is_none() {
            log::warn!("prefers-reduced-motion unavailable, assuming full motion");
        }

        let site: SharedSite = Rc::new(RefCell::new(Site::new(
            BrowserLocation,
            portfolio,
            preference.reduced(),
        )));
        let subscription = watch_motion(&site, &preference);
        // Both live for the whole page
        std::mem::forget(bridge);
        std::mem::forget(subscription);

        log::info!(
            "Starting at {} (reduced motion: {})",
            site.borrow().controller().current_path(),
            site.borrow().reduced_motion()
        );

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        // Initial mount
        sync(&site, 0.0);
        render_nav(&site.borrow(), &document);

        let shell = Rc::new(RefCell::new(Shell::default()));
        setup_click_handler(&document, site.clone());
        setup_history_handlers(site.clone());
        setup_pointer_handlers(&document, site.clone(), shell.clone());
        setup_contact_handlers(&document, site.clone());

        request_animation_frame(site, shell);

        log::info!("Folio running!");
    }

    /// Advance the site by `dt` and push the result into the DOM
    fn sync(site: &SharedSite, dt: f32) {
        let mut s = site.borrow_mut();
        let frame = s.frame(dt);
        let Some(document) = document() else {
            return;
        };
        apply_frame(&s, &frame, &document);
    }

    fn apply_frame(site: &Site<BrowserLocation>, frame: &Frame, document: &Document) {
        let mut navigated = false;
        for event in &frame.events {
            match event {
                TransitionEvent::Mounted { key, path } => {
                    log::debug!("Mount {} at {}", key, path);
                    mount_layer(site, *key, document);
                    navigated = true;
                }
                TransitionEvent::ExitStarted(key) => {
                    if let Some(el) = layer_element(document, *key) {
                        let _ = el.class_list().add_1("exiting");
                    }
                }
                TransitionEvent::Unmounted(key) => {
                    log::debug!("Unmount {}", key);
                    if let Some(el) = layer_element(document, *key) {
                        el.remove();
                    }
                }
                TransitionEvent::Superseded(key) => log::debug!("Exit of {} superseded", key),
                other => log::trace!("{:?}", other),
            }
        }

        if navigated {
            document.set_title(&site.document_title());
            render_nav(site, document);
        }

        if navigated || !frame.events.is_empty() || site.controller().is_animating() {
            for (layer, visual) in site.layers() {
                if let Some(el) = layer_element(document, layer.key) {
                    let _ = el.set_attribute("style", &visual.to_css());
                }
            }
        }

        for id in &frame.cards {
            update_card(site, id, document);
        }

        if let Some(button) = document.query_selector("[data-copy-email]").ok().flatten() {
            let label = site.copy_label(js_sys::Date::now());
            if button.text_content().as_deref() != Some(label) {
                button.set_text_content(Some(label));
            }
        }
    }

    fn mount_layer(site: &Site<BrowserLocation>, key: MountKey, document: &Document) {
        let Some(pages) = document.get_element_by_id("pages") else {
            log::error!("Missing #pages container");
            return;
        };
        let Some(layer) = site.controller().layers().find(|l| l.key == key) else {
            return;
        };
        let Ok(el) = document.create_element("div") else {
            return;
        };
        let _ = el.set_attribute("class", "page-layer");
        let _ = el.set_attribute("data-mount-key", &key.to_string());
        let _ = el.set_attribute("style", &site.controller().visual(layer).to_css());
        el.set_inner_html(&site.render_layer(layer, js_sys::Date::now()));
        if pages.append_child(&el).is_err() {
            log::warn!("Failed to mount page layer {}", key);
        }
    }

    /// Re-render the current layer in place (tag filter changed)
    fn rerender_current(site: &Site<BrowserLocation>, document: &Document) {
        let layer = site.controller().current_layer();
        if let Some(el) = layer_element(document, layer.key) {
            el.set_inner_html(&site.render_layer(layer, js_sys::Date::now()));
        }
    }

    fn render_nav(site: &Site<BrowserLocation>, document: &Document) {
        if let Some(nav) = document.get_element_by_id("nav") {
            nav.set_inner_html(&site.render_nav());
        }
    }

    fn update_card(site: &Site<BrowserLocation>, id: &CardId, document: &Document) {
        let Some(card) = card_element(document, id) else {
            return;
        };
        let (transform, glow) = site.card_style(id);
        let _ = card.set_attribute(
            "style",
            &format!("transform: {}; transform-style: preserve-3d;", transform.to_css()),
        );
        if let Some(overlay) = card.query_selector(".card-glow").ok().flatten() {
            match glow {
                Some(glow) => {
                    let _ = overlay.set_attribute("style", &format!("background: {};", glow.to_css()));
                    let _ = overlay.remove_attribute("hidden");
                }
                None => {
                    let _ = overlay.set_attribute("hidden", "");
                }
            }
        }
    }

    fn event_element(event: &Event) -> Option<Element> {
        event.target()?.dyn_into::<Element>().ok()
    }

    fn closest(el: &Element, selector: &str) -> Option<Element> {
        el.closest(selector).ok().flatten()
    }

    fn setup_click_handler(document: &Document, site: SharedSite) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let Some(target) = event_element(&event) else {
                return;
            };
            let Some(document) = document() else {
                return;
            };

            // Real links (repository, external) keep their default behavior
            if closest(&target, "a[href]").is_some() {
                return;
            }

            if let Some(el) = closest(&target, "[data-tag]") {
                let tag = el.get_attribute("data-tag").unwrap_or_default();
                let mut s = site.borrow_mut();
                if s.select_tag(&tag) {
                    rerender_current(&s, &document);
                }
                return;
            }

            if closest(&target, "[data-menu-toggle]").is_some() {
                let mut s = site.borrow_mut();
                s.toggle_menu();
                render_nav(&s, &document);
                return;
            }

            if closest(&target, "[data-copy-email]").is_some() {
                let email = site.borrow().portfolio().profile.email.clone();
                copy_to_clipboard(site.clone(), email);
                return;
            }

            if let Some(el) = closest(&target, "[data-nav]") {
                event.prevent_default();
                let path = el.get_attribute("data-nav").unwrap_or_default();
                site.borrow_mut().navigate(&path);
                sync(&site, 0.0);
            }
        });
        let _ = document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// `navigator.clipboard.writeText`, looked up dynamically since it is
    /// missing on insecure origins
    fn copy_to_clipboard(site: SharedSite, text: String) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let clipboard = js_sys::Reflect::get(&window.navigator(), &JsValue::from_str("clipboard"))
            .ok()
            .filter(|c| !c.is_undefined());
        let Some(clipboard) = clipboard else {
            log::warn!("Clipboard API unavailable");
            return;
        };
        let write = js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText"))
            .ok()
            .and_then(|f| f.dyn_into::<js_sys::Function>().ok());
        let Some(write) = write else {
            log::warn!("Clipboard API unavailable");
            return;
        };
        let promise = match write.call1(&clipboard, &JsValue::from_str(&text)) {
            Ok(value) => js_sys::Promise::resolve(&value),
            Err(e) => {
                log::warn!("Copy failed: {:?}", e);
                return;
            }
        };

        wasm_bindgen_futures::spawn_local(async move {
            match wasm_bindgen_futures::JsFuture::from(promise).await {
                Ok(_) => {
                    log::info!("Email copied");
                    site.borrow_mut().email_copied(js_sys::Date::now());
                }
                Err(e) => log::warn!("Copy failed: {:?}", e),
            }
        });
    }

    fn setup_history_handlers(site: SharedSite) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Back/forward and hand-edited fragments
        {
            let site = site.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: Event| {
                let changed = site.borrow_mut().on_hash_change();
                if changed {
                    sync(&site, 0.0);
                }
            });
            let _ = window.add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Navbar style follows the scroll offset
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: Event| {
                let Some(window) = web_sys::window() else {
                    return;
                };
                let scroll_y = window.scroll_y().unwrap_or(0.0);
                let mut s = site.borrow_mut();
                if s.on_scroll(scroll_y) {
                    if let Some(document) = window.document() {
                        render_nav(&s, &document);
                    }
                }
            });
            let _ = window.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_pointer_handlers(document: &Document, site: SharedSite, shell: Rc<RefCell<Shell>>) {
        // Pointer enter/leave is derived from which card is under the pointer
        {
            let site = site.clone();
            let shell = shell.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let card = event_element(&event).and_then(|t| closest(&t, "[data-card]"));
                let id = card
                    .as_ref()
                    .and_then(|c| c.get_attribute("data-card"))
                    .and_then(|attr| CardId::parse(&attr));

                let mut s = site.borrow_mut();
                let mut shell = shell.borrow_mut();
                if shell.hovered != id {
                    if let Some(old) = shell.hovered.take() {
                        s.card_leave(&old);
                    }
                    if let Some(new) = &id {
                        s.card_enter(new);
                    }
                    shell.hovered = id.clone();
                }

                if let (Some(id), Some(card)) = (id, card) {
                    let r = card.get_bounding_client_rect();
                    let rect = SurfaceRect::new(r.left() as f32, r.top() as f32, r.width() as f32, r.height() as f32);
                    let client = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                    s.card_move(&id, client, rect);
                }
            });
            let _ = document.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer left the page entirely
        if let Some(root) = document.document_element() {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                if let Some(old) = shell.borrow_mut().hovered.take() {
                    site.borrow_mut().card_leave(&old);
                }
            });
            let _ = root.add_event_listener_with_callback("pointerleave", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_contact_handlers(document: &Document, site: SharedSite) {
        // Field edits
        {
            let site = site.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: Event| {
                let Some(target) = event_element(&event) else {
                    return;
                };
                if closest(&target, "#contact-form").is_none() {
                    return;
                }
                let name = target.get_attribute("name").unwrap_or_default();
                let value = if let Some(input) = target.dyn_ref::<web_sys::HtmlInputElement>() {
                    input.value()
                } else if let Some(area) = target.dyn_ref::<web_sys::HtmlTextAreaElement>() {
                    area.value()
                } else {
                    return;
                };
                site.borrow_mut().contact_field(&name, &value);
            });
            let _ = document.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Submit opens the mail client
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: Event| {
                let Some(form) = event_element(&event) else {
                    return;
                };
                if form.id() != "contact-form" {
                    return;
                }
                event.prevent_default();

                let error = form.query_selector(".form-error").ok().flatten();
                match site.borrow().submit_contact() {
                    Ok(url) => {
                        if let Some(error) = &error {
                            let _ = error.set_attribute("hidden", "");
                        }
                        if let Some(window) = web_sys::window() {
                            if window.location().set_href(&url).is_err() {
                                log::warn!("Could not open mail client");
                            }
                        }
                    }
                    Err(e) => {
                        log::info!("Contact form rejected: {}", e);
                        if let Some(error) = &error {
                            error.set_text_content(Some(&e.to_string()));
                            let _ = error.remove_attribute("hidden");
                        }
                    }
                }
            });
            let _ = document.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(site: SharedSite, shell: Rc<RefCell<Shell>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame_loop(site, shell, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(site: SharedSite, shell: Rc<RefCell<Shell>>, time: f64) {
        {
            let mut sh = shell.borrow_mut();
            let dt = if sh.last_time > 0.0 {
                ((time - sh.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            sh.last_time = time;
            drop(sh);

            sync(&site, dt.min(MAX_FRAME_DT));
        }

        request_animation_frame(site, shell);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_site::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use folio::app::Site;
    use folio::history::MemoryLocation;
    use folio::{Portfolio, resolve};

    env_logger::init();
    log::info!("Folio (native) starting...");
    log::info!("The site runs in the browser - use `trunk serve` for the web version");

    let portfolio = match Portfolio::embedded() {
        Ok(portfolio) => portfolio,
        Err(e) => {
            log::error!("Portfolio data is unreadable: {}", e);
            std::process::exit(1);
        }
    };

    let mut paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        paths = ["/", "/work", "/work/physical-ai-humanoid-robotics", "/work/missing", "/about", "/nope"]
            .iter()
            .map(|p| p.to_string())
            .collect();
    }

    println!("\nRoutes:");
    for path in &paths {
        println!("  {:<40} -> {}", path, resolve(path));
    }

    // Walk the paths as a viewer would, 60 frames per second
    println!("\nNavigation trace:");
    let mut site = Site::new(MemoryLocation::new(), portfolio, false);
    for event in site.frame(0.0).events {
        println!("  {:?}", event);
    }
    for path in &paths {
        site.navigate(path);
        println!("  navigate {} -> \"{}\"", path, site.document_title());
        for _ in 0..30 {
            for event in site.frame(1.0 / 60.0).events {
                println!("    {:?}", event);
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
