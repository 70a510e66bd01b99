//! WASM bridge for Shapefall — runs the falling-shapes toy in the browser.
//!
//! Compiled via `wasm-pack build --target web`. A page calls `start()` once
//! and the crate takes over the canvas, the control buttons and the frame
//! loop. Hosts that drive their own loop use `ShapefallCanvas` directly.

mod console;
mod dom;
mod render2d;

use dom::DomBinding;
use sf_core::{ClickOutcome, RandomSource, SceneConfig};
use sf_engine::{ControlMap, InputEvent, Simulation};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

/// `Math.random()` as a random source.
struct JsRandom;

impl RandomSource for JsRandom {
    fn next_f64(&mut self) -> f64 {
        js_sys::Math::random()
    }
}

/// The WASM-facing canvas controller.
///
/// Holds the simulation and the canvas size. All interaction from JS goes
/// through this struct.
#[wasm_bindgen]
pub struct ShapefallCanvas {
    sim: Simulation,
    width: f64,
    height: f64,
}

#[wasm_bindgen]
impl ShapefallCanvas {
    /// Create a controller for a canvas of the given size. `config_json` may
    /// be empty for the defaults; its `logLevel` sets the console level.
    /// The canvas size always wins over a configured viewport.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64, config_json: &str) -> Result<ShapefallCanvas, JsValue> {
        console::console_error_panic_hook_setup();

        let config = if config_json.trim().is_empty() {
            SceneConfig::default()
        } else {
            SceneConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e))?
        };
        console::init_logger(&config.log_level);
        Ok(Self::from_config(config, width, height))
    }

    /// Run the tasks due at `time_ms` (a `requestAnimationFrame` timestamp).
    /// Returns the number of spawn waves that ran.
    pub fn frame(&mut self, time_ms: f64) -> u32 {
        self.sim.frame(time_ms).waves
    }

    /// Render the scene to a Canvas2D context.
    pub fn render(&self, ctx: &CanvasRenderingContext2d) {
        render2d::render_scene(
            ctx,
            &self.sim.scene,
            self.sim.background(),
            self.width,
            self.height,
        );
    }

    /// Handle a pointer-down in canvas coordinates.
    /// Returns JSON `{"action":"removed"|"spawned","id":"..."}`.
    pub fn handle_pointer_down(&mut self, x: f32, y: f32) -> String {
        let (action, id) = match self.sim.click(x, y) {
            ClickOutcome::Removed(id) => ("removed", id),
            ClickOutcome::Spawned(id) => ("spawned", id),
        };
        serde_json::json!({ "action": action, "id": id }).to_string()
    }

    /// Handle a click on a control button by its element id.
    /// Returns `true` if gravity or spawn count changed.
    pub fn handle_control(&mut self, element_id: &str) -> bool {
        match ControlMap::resolve(element_id) {
            Some(action) => self.sim.handle(InputEvent::Control(action)),
            None => {
                log::warn!("no control bound to #{element_id}");
                false
            }
        }
    }

    /// Resize the canvas.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.sim.handle(InputEvent::Resize {
            width: width as f32,
            height: height as f32,
        });
    }

    /// Restart frame timing (after the page was hidden).
    pub fn reset_clock(&mut self) {
        self.sim.reset_clock();
    }

    pub fn shape_count(&self) -> usize {
        self.sim.counters().shapes
    }

    pub fn total_area(&self) -> f64 {
        self.sim.counters().area as f64
    }

    pub fn gravity(&self) -> u32 {
        self.sim.scene.gravity()
    }

    pub fn spawn_count(&self) -> u32 {
        self.sim.scene.spawn_count()
    }

    /// Counters, gravity, spawn count and viewport as JSON.
    pub fn stats_json(&self) -> String {
        self.sim.stats_json()
    }
}

impl ShapefallCanvas {
    fn from_config(mut config: SceneConfig, width: f64, height: f64) -> Self {
        config.viewport = sf_core::Viewport {
            width: width as f32,
            height: height as f32,
        };
        Self {
            sim: Simulation::new(config, Box::new(JsRandom)),
            width,
            height,
        }
    }
}

// ─── Page entry point ────────────────────────────────────────────────────

/// Mount the toy: create a window-sized canvas inside `container_selector`
/// (default `.canvas`), bind the control buttons and counters, and start
/// the frame loop. Fails if a required element is missing.
#[wasm_bindgen]
pub fn start(container_selector: Option<String>) -> Result<(), JsValue> {
    console::console_error_panic_hook_setup();
    console::init_logger("info");

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;
    let selector = container_selector
        .as_deref()
        .unwrap_or(dom::CANVAS_CONTAINER_SELECTOR);
    let binding = DomBinding::bind(&document, selector)?;

    let query = window.location().search().unwrap_or_default();
    let config = SceneConfig::from_query(&query).unwrap_or_else(|e| {
        log::warn!("{e}; using default config");
        SceneConfig::default()
    });
    console::init_logger(&config.log_level);

    let (width, height) = window_size(&window);
    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
    binding.container.append_child(&canvas)?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
        .dyn_into()?;

    let mut app = ShapefallCanvas::from_config(config, width, height);
    app.sim.set_counter_sink(Box::new(binding.counters()));
    let app = Rc::new(RefCell::new(app));

    // Control buttons
    for (action, button) in &binding.buttons {
        let app = app.clone();
        let action = *action;
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            app.borrow_mut().sim.handle(InputEvent::Control(action));
        }) as Box<dyn FnMut(_)>);
        button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Click-to-remove / click-to-spawn
    {
        let app = app.clone();
        let target = canvas.clone();
        let closure = Closure::wrap(Box::new(move |evt: web_sys::PointerEvent| {
            let rect = target.get_bounding_client_rect();
            let event = InputEvent::from_client(
                evt.client_x() as f64,
                evt.client_y() as f64,
                rect.left(),
                rect.top(),
            );
            app.borrow_mut().sim.handle(event);
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Canvas follows the window
    {
        let app = app.clone();
        let canvas = canvas.clone();
        let win = window.clone();
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            let (width, height) = window_size(&win);
            canvas.set_width(width as u32);
            canvas.set_height(height as u32);
            app.borrow_mut().resize(width, height);
        }) as Box<dyn FnMut(_)>);
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Hidden tabs get no frames; start timing afresh when visible again
    {
        let app = app.clone();
        let doc = document.clone();
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            if !doc.hidden() {
                app.borrow_mut().reset_clock();
            }
        }) as Box<dyn FnMut(_)>);
        document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    start_frame_loop(&window, app, ctx)?;
    log::info!("shapefall started on {selector} ({width}x{height})");
    Ok(())
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_frame_loop(
    window: &Window,
    app: Rc<RefCell<ShapefallCanvas>>,
    ctx: CanvasRenderingContext2d,
) -> Result<(), JsValue> {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    let win = window.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        {
            let mut app = app.borrow_mut();
            app.frame(ts);
            app.render(&ctx);
        }
        if let Some(cb) = f.borrow().as_ref() {
            if let Err(e) = win.request_animation_frame(cb.as_ref().unchecked_ref()) {
                log::error!("requestAnimationFrame failed: {e:?}");
            }
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(cb) = g.borrow().as_ref() {
        window.request_animation_frame(cb.as_ref().unchecked_ref())?;
    }
    Ok(())
}

fn window_size(window: &Window) -> (f64, f64) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(800.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(600.0);
    (width, height)
}
