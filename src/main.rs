//! Meme Kart backdrop entry point
//!
//! On the web: mounts the particle backdrop, runs the splash loader and wires the
//! sound toggle. Natively: runs the backdrop headless as a smoke check.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_site {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, PageTransitionEvent};

    use meme_kart_backdrop::audio::{SoundBoard, SoundEffect, Synth};
    use meme_kart_backdrop::loading::LoadingProgress;
    use meme_kart_backdrop::platform::PageAction;
    use meme_kart_backdrop::web::{LocalStorage, ParticleBackdrop};

    type Board = Rc<RefCell<SoundBoard<LocalStorage, Synth>>>;

    const BACKDROP_CANVAS: &str = "particles";

    thread_local! {
        static BACKDROP: RefCell<Option<ParticleBackdrop>> = const { RefCell::new(None) };
    }

    struct Loader {
        progress: LoadingProgress,
        last_time: f64,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Meme Kart site starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let backdrop = ParticleBackdrop::mount(BACKDROP_CANVAS);
        if !backdrop.is_mounted() {
            log::info!("Particle backdrop unavailable");
        }
        BACKDROP.with(|b| *b.borrow_mut() = Some(backdrop));
        setup_page_lifecycle();

        let board: Board = Rc::new(RefCell::new(SoundBoard::new(
            LocalStorage::new(),
            Synth::new(),
        )));
        setup_sound_toggle(&document, board.clone());
        setup_sound_triggers(&document, board);

        let loader = Rc::new(RefCell::new(Loader {
            progress: LoadingProgress::new(),
            last_time: 0.0,
        }));
        request_loader_frame(loader);
    }

    /// Stop the backdrop while the page sits in the back/forward cache and tear
    /// it down when the page is discarded
    fn setup_page_lifecycle() {
        let window = web_sys::window().unwrap();

        let on_hide = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
            match PageAction::on_hide(event.persisted()) {
                PageAction::Suspend => BACKDROP.with(|b| {
                    if let Some(backdrop) = b.borrow().as_ref() {
                        backdrop.stop();
                    }
                }),
                _ => BACKDROP.with(|b| {
                    if let Some(backdrop) = b.borrow_mut().take() {
                        backdrop.unmount();
                    }
                }),
            }
        });
        let _ = window.add_event_listener_with_callback("pagehide", on_hide.as_ref().unchecked_ref());
        on_hide.forget();

        let on_show = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
            if PageAction::on_show(event.persisted()) != PageAction::Resume {
                return;
            }
            BACKDROP.with(|b| {
                let mut slot = b.borrow_mut();
                if let Some(backdrop) = slot.as_ref().filter(|b| b.is_mounted()) {
                    backdrop.start();
                    return;
                }
                log::info!("Remounting particle backdrop after page restore");
                *slot = Some(ParticleBackdrop::mount(BACKDROP_CANVAS));
            });
        });
        let _ = window.add_event_listener_with_callback("pageshow", on_show.as_ref().unchecked_ref());
        on_show.forget();
    }

    fn update_toggle_label(button: &web_sys::Element, muted: bool) {
        let label = if muted {
            "Unmute sound effects"
        } else {
            "Mute sound effects"
        };
        let _ = button.set_attribute("aria-label", label);
        let _ = button.set_attribute("title", label);
        let _ = button.set_attribute("data-muted", if muted { "true" } else { "false" });
    }

    fn setup_sound_toggle(document: &Document, board: Board) {
        let Some(button) = document.get_element_by_id("sound-toggle") else {
            return;
        };
        update_toggle_label(&button, board.borrow().is_muted());

        let target = button.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let chime = board.borrow_mut().toggle_mute();
            update_toggle_label(&target, board.borrow().is_muted());

            if let Some(chime) = chime {
                let board = board.clone();
                let play = Closure::once(move || {
                    board.borrow_mut().play(chime.effect);
                });
                if let Some(window) = web_sys::window() {
                    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                        play.as_ref().unchecked_ref(),
                        chime.delay_ms,
                    );
                }
                play.forget();
            }
        });
        let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Elements with `data-sound="click"` etc. play that effect on click;
    /// `data-hover-sound` plays on mouseenter
    fn setup_sound_triggers(document: &Document, board: Board) {
        for (selector, attr, event) in [
            ("[data-sound]", "data-sound", "click"),
            ("[data-hover-sound]", "data-hover-sound", "mouseenter"),
        ] {
            let Ok(nodes) = document.query_selector_all(selector) else {
                continue;
            };
            for i in 0..nodes.length() {
                let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok())
                else {
                    continue;
                };
                let Some(effect) = el
                    .get_attribute(attr)
                    .and_then(|name| SoundEffect::from_name(&name))
                else {
                    log::warn!("Unknown sound on {} element", selector);
                    continue;
                };

                let board = board.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                    board.borrow_mut().play(effect);
                });
                let _ = el.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn request_loader_frame(loader: Rc<RefCell<Loader>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            loader_frame(loader, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn loader_frame(loader: Rc<RefCell<Loader>>, time: f64) {
        let document = web_sys::window().unwrap().document().unwrap();
        let done = {
            let mut l = loader.borrow_mut();
            let dt = if l.last_time > 0.0 { time - l.last_time } else { 0.0 };
            l.last_time = time;
            l.progress.advance(dt);
            render_loader(&document, &l.progress);
            l.progress.is_complete()
        };

        if done {
            log::info!("Loading complete");
        } else {
            request_loader_frame(loader);
        }
    }

    /// Reflect loader state into the `#loading` overlay
    fn render_loader(document: &Document, progress: &LoadingProgress) {
        let Some(overlay) = document.get_element_by_id("loading") else {
            return;
        };

        if !progress.is_visible() {
            let _ = overlay.set_attribute("class", "hidden");
            return;
        }

        if let Some(overlay) = overlay.dyn_ref::<HtmlElement>() {
            let _ = overlay
                .style()
                .set_property("opacity", &progress.opacity().to_string());
        }
        if let Some(bar) = document
            .get_element_by_id("loading-bar")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let _ = bar
                .style()
                .set_property("width", &format!("{}%", progress.progress()));
        }
        if let Some(label) = document.get_element_by_id("loading-percent") {
            label.set_text_content(Some(&format!("{}%", progress.progress())));
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_site::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Meme Kart backdrop (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let frames = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(600);
    smoke_run(frames);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Mount headless, animate `frames` frames, unmount, and report
#[cfg(not(target_arch = "wasm32"))]
fn smoke_run(frames: usize) {
    use meme_kart_backdrop::Animator;
    use meme_kart_backdrop::platform::{HeadlessHost, RecordingSurface, Viewport};

    let mut host = HeadlessHost::new(Viewport::new(1920, 1080));
    let Some(mut animator) = Animator::mount(&mut host, Some(RecordingSurface::new()), 12345)
    else {
        log::error!("Headless mount failed");
        return;
    };

    let mut links = 0;
    for _ in 0..frames {
        if host.fire_frame().is_none() {
            break;
        }
        animator.on_frame(&mut host);
        if let Some(frame) = &animator.surface().last_frame {
            links += frame.link_count();
        }
    }

    let presented = animator.surface().presented;
    let particles = animator.field().len();
    animator.unmount(&mut host);

    println!(
        "✓ {} frames, {} particles, {:.1} links/frame, {} callbacks and {} listeners left",
        presented,
        particles,
        links as f64 / presented.max(1) as f64,
        host.pending_frames(),
        host.listener_count()
    );
}
