//! Valentine Proposal entry point
//!
//! Handles platform-specific initialization and wires the widget to the page.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use gloo_timers::callback::Timeout;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;
    use web_sys::Document;

    use valentine_proposal::audio::{
        GESTURE_EVENTS, GestureUnlock, HtmlAudioSink, MusicSync, PlaybackSink, SilentSink,
    };
    use valentine_proposal::celebration::{CanvasConfetti, CelebrationSequence};
    use valentine_proposal::config::reset_destination;
    use valentine_proposal::consts::*;
    use valentine_proposal::persistence::bridge;
    use valentine_proposal::platform::{self, LocalStore};
    use valentine_proposal::ui::{self, Heart};
    use valentine_proposal::{LaunchConfig, ProposalWidget, View, WidgetEvent};

    /// Page instance holding all state
    struct App {
        widget: ProposalWidget<LocalStore>,
        audio: Box<dyn PlaybackSink>,
        sync: MusicSync,
        /// Dropping this cancels the pending sync
        pending_sync: Option<Timeout>,
        unlock: GestureUnlock,
    }

    type SharedApp = Rc<RefCell<App>>;

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Valentine Proposal starting...");

        let config = LaunchConfig::from_query(&platform::query_string());

        // Escape hatch: wipe everything and come back without parameters
        if config.reset {
            let mut store = LocalStore::new();
            bridge::wipe(&mut store);
            let href = platform::location_href();
            match href.as_deref().and_then(reset_destination) {
                Some(dest) => platform::navigate(&dest),
                None => log::warn!("Reset done but current URL is unreadable"),
            }
            return;
        }

        let document = web_sys::window()
            .and_then(|w| w.document())
            .expect("no document");

        let seed = platform::now_ms() as u64;
        let viewport = platform::viewport();
        let widget = ProposalWidget::mount(config, LocalStore::new(), seed, viewport);

        let audio: Box<dyn PlaybackSink> = match HtmlAudioSink::new(MUSIC_SRC) {
            Some(sink) => Box::new(sink),
            None => Box::new(SilentSink),
        };

        let app = Rc::new(RefCell::new(App {
            widget,
            audio,
            sync: MusicSync::new(),
            pending_sync: None,
            unlock: GestureUnlock::armed(),
        }));

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.class_list().add_1("hidden");
        }

        let mut rng = Pcg32::seed_from_u64(seed ^ 0x5eed);
        let prompt_hearts = ui::prompt_hearts(&mut rng);
        let success_hearts = ui::success_hearts(&mut rng);
        scatter_hearts(&document, "prompt-hearts", "heart pulse", &prompt_hearts);
        scatter_hearts(&document, "success-hearts", "heart float", &success_hearts);

        if let Some(credit) = document.get_element_by_id("credit-link") {
            credit.set_text_content(Some(ui::CREDIT_LABEL));
            let _ = credit.set_attribute("href", ui::CREDIT_URL);
        }

        setup_buttons(&document, app.clone());
        arm_gesture_unlock(&document, app.clone());

        // Try the saved preference right away; browsers usually reject this
        // until the first gesture, which is fine
        let music_on = app.borrow().widget.state().music_on;
        schedule_music_sync(&app, music_on);

        render(&app.borrow());

        log::info!("Valentine Proposal running!");
    }

    fn setup_buttons(document: &Document, app: SharedApp) {
        // YES
        {
            let app = app.clone();
            on_click(document, "yes-btn", move || {
                let events = app.borrow_mut().widget.accept();
                handle_events(&app, &events);
                render(&app.borrow());
            });
        }

        // NO
        {
            let app = app.clone();
            on_click(document, "no-btn", move || {
                {
                    let mut a = app.borrow_mut();
                    a.widget.set_viewport(platform::viewport());
                    a.widget.refuse();
                }
                render(&app.borrow());
            });
        }

        // Music toggle (shared by both views)
        {
            let app = app.clone();
            on_click(document, "music-toggle", move || {
                let events = app.borrow_mut().widget.toggle_music();
                handle_events(&app, &events);
                render(&app.borrow());
            });
        }

        // Share
        on_click(document, "share-btn", move || {
            let url = app.borrow().widget.success_view().share_url;
            platform::open_external(&url);
        });
    }

    fn on_click(document: &Document, id: &str, mut handler: impl FnMut() + 'static) {
        let Some(el) = document.get_element_by_id(id) else {
            log::warn!("Missing #{} - button disabled", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| handler());
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn handle_events(app: &SharedApp, events: &[WidgetEvent]) {
        for event in events {
            match *event {
                WidgetEvent::Accepted => start_celebration(),
                WidgetEvent::MusicToggled { on } => schedule_music_sync(app, on),
                WidgetEvent::Refused { .. } | WidgetEvent::RefusalMoved { .. } => {}
            }
        }
    }

    /// Apply `music_on` after a short delay, replacing any pending sync
    fn schedule_music_sync(app: &SharedApp, music_on: bool) {
        let ticket = app.borrow_mut().sync.schedule(music_on);
        let timeout = {
            let app = app.clone();
            Timeout::new(MUSIC_SYNC_DELAY_MS, move || {
                let mut guard = app.borrow_mut();
                let App { sync, audio, .. } = &mut *guard;
                sync.fire(ticket, audio.as_mut());
            })
        };
        app.borrow_mut().pending_sync = Some(timeout);
    }

    /// Listen for the first click/touch/key anywhere, then stop listening
    fn arm_gesture_unlock(document: &Document, app: SharedApp) {
        let registered = Rc::new(RefCell::new(None::<js_sys::Function>));

        let closure = {
            let registered = registered.clone();
            Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                {
                    let mut guard = app.borrow_mut();
                    let music_on = guard.widget.state().music_on;
                    let App { unlock, audio, .. } = &mut *guard;
                    unlock.trigger(music_on, audio.as_mut());
                }

                let Some(func) = registered.borrow_mut().take() else {
                    return;
                };
                if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                    for event in GESTURE_EVENTS {
                        let _ = document.remove_event_listener_with_callback(event, &func);
                    }
                }
            })
        };

        let func: &js_sys::Function = closure.as_ref().unchecked_ref();
        let func = func.clone();
        for event in GESTURE_EVENTS {
            let _ = document.add_event_listener_with_callback(event, &func);
        }
        *registered.borrow_mut() = Some(func);
        closure.forget();
    }

    /// Kick off the confetti interval; it clears itself when the sequence ends
    fn start_celebration() {
        let Some(window) = web_sys::window() else {
            return;
        };

        let now = platform::now_ms();
        let mut sequence = CelebrationSequence::start(now, now as u64);
        let mut effect = CanvasConfetti::default();
        let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

        let closure = {
            let handle = handle.clone();
            Closure::<dyn FnMut()>::new(move || {
                if sequence.tick(platform::now_ms(), &mut effect) {
                    return;
                }
                if let (Some(id), Some(window)) = (handle.take(), web_sys::window()) {
                    window.clear_interval_with_handle(id);
                }
            })
        };

        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            CELEBRATION_INTERVAL_MS as i32,
        ) {
            Ok(id) => handle.set(Some(id)),
            Err(e) => log::warn!("Failed to start confetti: {:?}", e),
        }
        closure.forget();
    }

    /// Copy the current view model into the DOM
    fn render(app: &App) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let widget = &app.widget;
        let view = widget.view();

        set_hidden(&document, "prompt-view", view != View::Prompt);
        set_hidden(&document, "success-view", view != View::Success);

        match view {
            View::Prompt => {
                let model = widget.prompt_view();
                set_text(&document, "prompt-heading", &model.heading);
                set_text(&document, "yes-btn", model.yes_label);
                set_style(&document, "yes-btn", &model.yes_style);
                set_text(&document, "no-btn", model.refusal_label);
                set_style(&document, "no-btn", &model.refusal_style);
                set_text(&document, "music-toggle", model.music_label);
            }
            View::Success => {
                let model = widget.success_view();
                set_text(&document, "success-heading", model.heading);
                set_text(&document, "success-message", &model.message);
                set_text(&document, "share-btn", model.share_label);
                set_text(&document, "music-toggle", model.music_label);
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_style(document: &Document, id: &str, style: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("style", style);
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    fn scatter_hearts(document: &Document, container_id: &str, class: &str, hearts: &[Heart]) {
        let Some(container) = document.get_element_by_id(container_id) else {
            return;
        };
        for heart in hearts {
            let Ok(span) = document.create_element("span") else {
                continue;
            };
            let _ = span.set_attribute("class", class);
            let _ = span.set_attribute("style", &heart.style());
            span.set_text_content(Some(heart.glyph));
            let _ = container.append_child(&span);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Valentine Proposal (native) starting...");
    log::info!("The page itself is web-only - run with `trunk serve` for the real thing");

    walkthrough();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Print the escalation against an in-memory store
#[cfg(not(target_arch = "wasm32"))]
fn walkthrough() {
    use valentine_proposal::consts::REFUSAL_MESSAGES;
    use valentine_proposal::{LaunchConfig, MemoryStore, ProposalWidget, platform};

    let config = LaunchConfig::from_query("?name=valentine");
    let viewport = platform::viewport();
    let mut widget = ProposalWidget::mount(config, MemoryStore::new(), 2024, viewport);

    println!("\n{}", widget.prompt_view().heading);
    for _ in 0..REFUSAL_MESSAGES.len() - 1 {
        widget.refuse();
        let view = widget.prompt_view();
        let pos = widget.state().refusal_pos;
        println!(
            "  NO -> {:<26} YES x{:<4} NO at ({}, {})",
            view.refusal_label, view.yes_scale, pos.x, pos.y
        );
    }

    widget.accept();
    let view = widget.success_view();
    println!("\n{}\n{}", view.heading, view.message);
    println!("Share: {}", view.share_url);
    if let Ok(json) = serde_json::to_string(widget.state()) {
        println!("State: {}", json);
    }
}
