//! Canvas Collision entry point
//!
//! On web: sizes the canvas, wires clicks and resizes, and runs one tick plus
//! one draw per animation frame. On native: runs a headless simulation and
//! logs what happened.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;

    use glam::DVec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

    use canvas_collision::consts::TITLE_MARGIN;
    use canvas_collision::render::{DrawCommand, draw_list};
    use canvas_collision::sim::{SimState, TickInput, tick};
    use canvas_collision::{Mode, Settings};

    /// App instance holding all state
    struct App {
        state: SimState,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        input: TickInput,
        shown_hits: Option<u64>,
    }

    impl App {
        /// One animation frame: tick, then draw
        fn frame(&mut self) {
            tick(&mut self.state, &self.input);
            self.input.clicks.clear();

            if let Err(e) = self.draw() {
                log::warn!("Draw error: {:?}", e);
            }
            self.update_counter();
        }

        fn draw(&self) -> Result<(), JsValue> {
            let bounds = self.state.bounds;
            self.ctx.clear_rect(0.0, 0.0, bounds.width, bounds.height);
            for cmd in draw_list(&self.state) {
                draw_circle(&self.ctx, &cmd)?;
            }
            Ok(())
        }

        /// Mirror the hit count into `#counter` if the page has one
        fn update_counter(&mut self) {
            if self.shown_hits == Some(self.state.hits) {
                return;
            }
            let el = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id("counter"));
            if let Some(el) = el {
                el.set_text_content(Some(&self.state.hits.to_string()));
            }
            self.shown_hits = Some(self.state.hits);
        }

        /// Queue a click given in client coordinates
        fn click(&mut self, client_x: f64, client_y: f64) {
            let rect = self.canvas.get_bounding_client_rect();
            let point = DVec2::new(client_x - rect.left(), client_y - rect.top());
            self.input.clicks.push(point);
        }

        fn resize(&mut self, width: f64, height: f64) {
            match self.state.resize(width, height) {
                Ok(()) => {
                    self.canvas.set_width(width as u32);
                    self.canvas.set_height(height as u32);
                }
                Err(e) => log::warn!("Ignoring resize: {}", e),
            }
        }
    }

    fn draw_circle(ctx: &CanvasRenderingContext2d, cmd: &DrawCommand) -> Result<(), JsValue> {
        let stroke = cmd.stroke.to_css();
        ctx.save();
        ctx.begin_path();

        if let Some(label) = &cmd.label {
            ctx.set_fill_style_str(&stroke);
            ctx.set_font("16px Arial");
            ctx.set_text_align("center");
            ctx.set_text_baseline("middle");
            ctx.fill_text(label, cmd.center.x, cmd.center.y)?;
        }

        ctx.arc(cmd.center.x, cmd.center.y, cmd.radius, 0.0, TAU)?;
        if let Some(fill) = cmd.fill {
            ctx.set_fill_style_str(&fill.to_css());
            ctx.fill();
        }
        ctx.set_line_width(cmd.line_width);
        ctx.set_stroke_style_str(&stroke);
        ctx.stroke();
        ctx.close_path();
        ctx.restore();
        Ok(())
    }

    /// Window size minus room for the title
    fn viewport_size(window: &Window) -> Result<(f64, f64), JsValue> {
        let width = window.inner_width()?.as_f64().unwrap_or(0.0);
        let height = window.inner_height()?.as_f64().unwrap_or(0.0) - TITLE_MARGIN;
        Ok((width, height))
    }

    /// `?mode=clicker` in the page URL overrides the stored mode
    fn mode_from_query(window: &Window) -> Option<Mode> {
        let search = window.location().search().ok()?;
        search
            .trim_start_matches('?')
            .split('&')
            .find_map(|pair| pair.strip_prefix("mode="))
            .and_then(Mode::parse)
    }

    pub fn run() -> Result<(), JsValue> {
        log::info!("Canvas Collision starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no #canvas element")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2d context unavailable")?
            .dyn_into()?;

        let (width, height) = viewport_size(&window)?;
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let mut settings = Settings::load();
        if let Some(mode) = mode_from_query(&window) {
            if mode != settings.mode {
                settings = Settings::for_mode(mode);
                settings.save();
            }
        }

        let seed = js_sys::Date::now() as u64;
        let state = SimState::from_settings(&settings, width, height, seed).map_err(|e| {
            log::warn!("Rejected settings: {}", e);
            JsValue::from_str(&e.to_string())
        })?;

        let app = Rc::new(RefCell::new(App {
            state,
            canvas: canvas.clone(),
            ctx,
            input: TickInput::default(),
            shown_hits: None,
        }));

        setup_input_handlers(&window, &canvas, app.clone());
        request_animation_frame(app);

        log::info!("Canvas Collision running!");
        Ok(())
    }

    fn setup_input_handlers(window: &Window, canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Clicks
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                app.borrow_mut()
                    .click(event.client_x() as f64, event.client_y() as f64);
            });
            let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window resize
        {
            let window_clone = window.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if let Ok((width, height)) = viewport_size(&window_clone) {
                    app.borrow_mut().resize(width, height);
                }
            });
            let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            app.borrow_mut().frame();
            request_animation_frame(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    if let Err(e) = wasm_app::run() {
        log::error!("Failed to start: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Frames simulated by the native build (10 s at 60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_TICKS: u64 = 600;

/// Viewport used by the native build
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_VIEWPORT: (f64, f64) = (1280.0, 720.0);

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Canvas Collision (native) starting...");
    log::info!("Native mode runs headless - serve the wasm build for the canvas version");

    if let Err(e) = run_headless() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// Run a fixed number of ticks without drawing.
///
/// An optional first argument names a JSON settings file. In clicker mode the
/// driver clicks a body every half second so respawns get exercised too.
#[cfg(not(target_arch = "wasm32"))]
fn run_headless() -> Result<(), Box<dyn std::error::Error>> {
    use canvas_collision::Settings;
    use canvas_collision::consts::TITLE_MARGIN;
    use canvas_collision::sim::{SimState, TickInput, tick};

    let settings = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading settings from {}", path);
            Settings::from_json(&std::fs::read_to_string(&path)?)?
        }
        None => Settings::load(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    let (width, height) = HEADLESS_VIEWPORT;
    let mut state = SimState::from_settings(&settings, width, height - TITLE_MARGIN, seed)?;

    let mut contact_frames = 0u64;
    let mut input = TickInput::default();
    for frame in 0..HEADLESS_TICKS {
        input.clicks.clear();
        if frame % 30 == 0 && !state.bodies.is_empty() {
            let target = (frame / 30) as usize % state.bodies.len();
            input.clicks.push(state.bodies[target].pos);
        }

        tick(&mut state, &input);

        if state.highlighted().next().is_some() {
            contact_frames += 1;
        }
    }

    log::info!(
        "Ran {} ticks: {} bodies, {} frames with contact, {} click respawns",
        state.time_ticks,
        state.bodies.len(),
        contact_frames,
        state.hits
    );
    Ok(())
}
