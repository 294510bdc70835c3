//! Word Rain entry point
//!
//! Handles platform-specific initialization and runs the game loop. On
//! wasm32 this wires the browser's animation frames and key events into the
//! engine and hands frame snapshots to an external JS renderer; natively it
//! runs a short headless autoplay session and prints the final stats.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, KeyboardEvent, MouseEvent};

    use word_rain::sim::{self, Engine, GamePhase, TextMeasure, Viewport};
    use word_rain::variation::Variation;

    // The renderer is an external collaborator: each frame we hand it a JSON
    // snapshot and it draws words/particles however it likes.
    #[wasm_bindgen(inline_js = "
        export function render_frame(json) {
            if (window.__wordRainRender) {
                window.__wordRainRender(JSON.parse(json));
            }
        }
    ")]
    extern "C" {
        fn render_frame(json: &str);
    }

    /// Canvas-2d backed text measurement
    struct CanvasMeasure {
        ctx: CanvasRenderingContext2d,
    }

    impl CanvasMeasure {
        fn new(document: &web_sys::Document) -> Option<Self> {
            let canvas = document
                .create_element("canvas")
                .ok()?
                .dyn_into::<web_sys::HtmlCanvasElement>()
                .ok()?;
            let ctx = canvas
                .get_context("2d")
                .ok()??
                .dyn_into::<CanvasRenderingContext2d>()
                .ok()?;
            Some(Self { ctx })
        }
    }

    impl TextMeasure for CanvasMeasure {
        fn text_width(&self, text: &str, font_size: f32) -> f32 {
            self.ctx.set_font(&format!("{font_size}px monospace"));
            match self.ctx.measure_text(text) {
                Ok(metrics) => metrics.width() as f32,
                Err(_) => sim::ApproxMeasure.text_width(text, font_size),
            }
        }
    }

    struct Game {
        engine: Engine,
    }

    fn viewport() -> Viewport {
        let window = web_sys::window().unwrap();
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(1280.0) as f32;
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(720.0) as f32;
        Viewport { width, height }
    }

    /// Variation id from the URL: `?v=word-storm` wins, else the last path
    /// segment, else classic
    fn variation_from_location(window: &web_sys::Window) -> Variation {
        let location = window.location();
        if let Ok(search) = location.search() {
            if let Some(id) = search.trim_start_matches('?').split('&').find_map(|pair| {
                pair.strip_prefix("v=")
            }) {
                return Variation::resolve(id);
            }
        }
        let id = location
            .pathname()
            .unwrap_or_default()
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();
        Variation::resolve(&id)
    }

    /// Translate a browser key event into the engine's character set
    fn key_to_char(event: &KeyboardEvent) -> Option<char> {
        if event.code() == "Space" {
            return Some(' ');
        }
        let key = event.key().to_lowercase();
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) if sim::recognized_key(ch) => Some(ch),
            _ => None,
        }
    }

    fn update_hud(document: &web_sys::Document, engine: &Engine) {
        let stats = &engine.stats;
        let fields = [
            ("score", stats.score.to_string()),
            ("words-typed", stats.words_typed.to_string()),
            ("accuracy", format!("{:.0}%", stats.accuracy)),
            ("missed", stats.missed_words.to_string()),
            ("wpm", format!("{:.0}", engine.words_per_minute())),
        ];
        for (id, value) in fields {
            if let Some(el) = document.get_element_by_id(id) {
                el.set_inner_html(&value);
            }
        }
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let Some(ch) = key_to_char(&event) else {
                return;
            };
            event.prevent_default();
            let mut g = game.borrow_mut();
            let result = sim::apply_keystroke(&mut g.engine, ch, viewport());
            drop(g);
            // The hit/completed pair is the collaborator's audio cue
            if result.hit || result.completed {
                let _ = js_sys::Reflect::get(&js_sys::global(), &"__wordRainCue".into())
                    .ok()
                    .filter(|f| f.is_function())
                    .and_then(|f| {
                        let f: js_sys::Function = f.unchecked_into();
                        f.call2(
                            &JsValue::NULL,
                            &JsValue::from_bool(result.hit),
                            &JsValue::from_bool(result.completed),
                        )
                        .ok()
                    });
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_start_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.engine.start();
                log::info!("started via button, variation {}", g.engine.variation.id);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn start_frame_loop(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        let raf_cell: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let raf_outer = raf_cell.clone();

        *raf_cell.borrow_mut() = Some(Closure::new(move || {
            {
                let mut g = game.borrow_mut();
                sim::tick(&mut g.engine, viewport());
                if let Ok(json) = serde_json::to_string(&g.engine.snapshot()) {
                    render_frame(&json);
                }
                update_hud(&document, &g.engine);
                if g.engine.phase == GamePhase::Ended {
                    if let Some(el) = document.get_element_by_id("game-over") {
                        let _ = el.class_list().remove_1("hidden");
                    }
                }
            }
            let window = web_sys::window().unwrap();
            let _ = window.request_animation_frame(
                raf_cell
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }));

        let _ = window.request_animation_frame(
            raf_outer
                .borrow()
                .as_ref()
                .unwrap()
                .as_ref()
                .unchecked_ref(),
        );
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        let variation = variation_from_location(&window);
        let seed = js_sys::Date::now() as u64;
        log::info!("word-rain starting: variation={} seed={}", variation.id, seed);

        let engine = match CanvasMeasure::new(&document) {
            Some(measure) => Engine::with_measure(seed, variation, Box::new(measure)),
            None => Engine::new(seed, variation),
        };

        let game = Rc::new(RefCell::new(Game { engine }));
        setup_keyboard(game.clone());
        setup_start_button(game.clone());
        start_frame_loop(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use word_rain::sim::{self, GamePhase, Viewport};
    use word_rain::variation::Variation;

    env_logger::init();

    let variation = Variation::resolve(&std::env::args().nth(1).unwrap_or_default());
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(42);
    log::info!(
        "word-rain headless demo: variation={} seed={}",
        variation.id,
        seed
    );

    let viewport = Viewport {
        width: 1280.0,
        height: 720.0,
    };
    let mut engine = sim::Engine::new(seed, variation);
    engine.start();

    // Scripted typist: every few frames, type the next character of the
    // oldest falling word. It falls behind as the pace ramps and eventually
    // loses, exercising the whole loop.
    for frame in 0u64..36_000 {
        sim::tick(&mut engine, viewport);
        if frame % 6 == 0 {
            let next = engine
                .words
                .iter()
                .find(|w| w.is_falling())
                .and_then(|w| w.next_char());
            if let Some(ch) = next {
                sim::apply_keystroke(&mut engine, ch, viewport);
            }
        }
        if engine.phase == GamePhase::Ended {
            log::info!("demo ended after {} frames", frame + 1);
            break;
        }
    }

    match serde_json::to_string_pretty(&engine.stats) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("failed to serialize stats: {err}"),
    }
}
