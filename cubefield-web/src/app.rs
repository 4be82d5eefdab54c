use std::cell::RefCell;
use std::rc::Rc;

use cubefield_shared::color::Color;
use cubefield_wgpu::{Renderer, SurfaceTarget};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlCanvasElement, Window};

use crate::config::DemoConfig;
use crate::dom::{self, PageControls};
use crate::random::MathRandom;
use crate::state::{DemoState, UiEffect};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Running page: scene state, GPU renderer and the canvas they draw to.
///
/// Listeners, the color-cycle interval and the frame loop each hold a
/// clone of the shared handles and live as long as the page.
#[wasm_bindgen]
pub struct App {
    state: Rc<RefCell<DemoState>>,
    canvas: HtmlCanvasElement,
}

#[wasm_bindgen]
impl App {
    /// Canvas backing-store width in device pixels.
    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    /// Canvas backing-store height in device pixels.
    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    #[wasm_bindgen(js_name = isStarted)]
    pub fn is_started(&self) -> bool {
        self.state.borrow().is_started()
    }
}

impl App {
    pub async fn new(config: DemoConfig) -> Result<App, JsValue> {
        let window = web_sys::window().ok_or("No window")?;
        let document = window.document().ok_or("No document")?;
        let canvas: HtmlCanvasElement = dom::query(&document, &config.dom.canvas)?;
        let page = Rc::new(PageControls::find(&document, &config.dom)?);

        let size = dom::fit_canvas(&window, &canvas, config.max_pixel_ratio)?;
        let mut renderer = Renderer::new(
            SurfaceTarget::Canvas(canvas.clone()),
            size.pixel_width,
            size.pixel_height,
            config.cube_size,
            config.cube_count(),
        )
        .await
        .map_err(|e| JsValue::from_str(&format!("Failed to create renderer: {e}")))?;
        renderer.set_clear_color(Color::from_hex(config.background));

        log::info!("Renderer ready on a {}x{} canvas", size.pixel_width, size.pixel_height);

        let interval_ms = config.color_cycle_interval_ms;
        let state = Rc::new(RefCell::new(DemoState::new(
            config,
            size.css_width,
            size.css_height,
        )));
        let renderer = Rc::new(RefCell::new(renderer));

        wire_resize(&window, &canvas, &state, &renderer)?;
        wire_pointer(&window, &canvas, &state)?;
        wire_controls(&page, &state)?;

        let interval = start_color_cycle(&window, &state, interval_ms)?;
        start_frame_loop(window, page, state.clone(), renderer, interval)?;

        Ok(App { state, canvas })
    }
}

fn wire_resize(
    window: &Window,
    canvas: &HtmlCanvasElement,
    state: &Rc<RefCell<DemoState>>,
    renderer: &Rc<RefCell<Renderer>>,
) -> Result<(), JsValue> {
    let (win, canvas, state, renderer) =
        (window.clone(), canvas.clone(), state.clone(), renderer.clone());
    dom::listen(window, "resize", move |_| {
        let max_ratio = state.borrow().config().max_pixel_ratio;
        match dom::fit_canvas(&win, &canvas, max_ratio) {
            Ok(size) => {
                state.borrow_mut().resize(size.css_width, size.css_height);
                renderer.borrow_mut().resize(size.pixel_width, size.pixel_height);
            }
            Err(e) => log::warn!("Resize failed: {e:?}"),
        }
    })
}

fn wire_pointer(
    window: &Window,
    canvas: &HtmlCanvasElement,
    state: &Rc<RefCell<DemoState>>,
) -> Result<(), JsValue> {
    let moved = {
        let (canvas, state) = (canvas.clone(), state.clone());
        move |event: Event| {
            if let Some(client) = dom::client_position(&event) {
                state.borrow_mut().pointer_moved(client, &dom::canvas_rect(&canvas));
            }
        }
    };
    dom::listen(window, "mousemove", moved.clone())?;
    dom::listen(window, "touchmove", moved)?;

    for name in ["mouseout", "mouseleave"] {
        let state = state.clone();
        dom::listen(window, name, move |_| state.borrow_mut().pointer_left())?;
    }

    let pressed = {
        let (canvas, state) = (canvas.clone(), state.clone());
        move |event: Event| {
            if let Some(client) = dom::client_position(&event) {
                state.borrow_mut().pointer_pressed(client, &dom::canvas_rect(&canvas));
            }
        }
    };
    dom::listen(canvas, "mousedown", pressed.clone())?;
    dom::listen_active(canvas, "touchstart", move |event: Event| {
        event.prevent_default();
        pressed(event);
    })?;

    {
        let state = state.clone();
        dom::listen(window, "mouseup", move |_| {
            state.borrow_mut().pointer_released();
        })?;
    }
    {
        let state = state.clone();
        dom::listen(window, "touchend", move |_| {
            let mut state = state.borrow_mut();
            state.pointer_released();
            state.pointer_left();
        })?;
    }

    let state = state.clone();
    dom::listen_active(canvas, "wheel", move |event: Event| {
        if let Some(wheel) = event.dyn_ref::<web_sys::WheelEvent>() {
            event.prevent_default();
            state.borrow_mut().wheel(wheel.delta_y());
        }
    })
}

fn wire_controls(page: &Rc<PageControls>, state: &Rc<RefCell<DemoState>>) -> Result<(), JsValue> {
    {
        let state = state.clone();
        dom::listen(&page.start_button, "click", move |event: Event| {
            event.prevent_default();
            state.borrow_mut().press_start();
        })?;
    }
    {
        let state = state.clone();
        dom::listen(&page.reset_button, "click", move |event: Event| {
            event.prevent_default();
            state.borrow_mut().reset_colors();
        })?;
    }

    let (input, state) = (page.color_input.clone(), state.clone());
    dom::listen(&page.color_input, "change", move |_| {
        let value = input.value();
        if let Err(e) = state.borrow_mut().select_color(&value) {
            log::warn!("Ignoring color {value:?}: {e}");
        }
    })
}

fn start_color_cycle(
    window: &Window,
    state: &Rc<RefCell<DemoState>>,
    interval_ms: u32,
) -> Result<i32, JsValue> {
    let state = state.clone();
    let tick = Closure::wrap(Box::new(move || {
        state.borrow_mut().color_cycle_tick(&mut MathRandom);
    }) as Box<dyn FnMut()>);
    let handle = window.set_interval_with_callback_and_timeout_and_arguments_0(
        tick.as_ref().unchecked_ref(),
        interval_ms as i32,
    )?;
    tick.forget();
    Ok(handle)
}

fn start_frame_loop(
    window: Window,
    page: Rc<PageControls>,
    state: Rc<RefCell<DemoState>>,
    renderer: Rc<RefCell<Renderer>>,
    interval: i32,
) -> Result<(), JsValue> {
    let callback: FrameCallback = Rc::new(RefCell::new(None));
    let next = callback.clone();
    let win = window.clone();
    let mut interval = Some(interval);

    *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |time: f64| {
        let effects = state.borrow_mut().frame(time);
        for effect in effects {
            if effect == UiEffect::StopColorCycle {
                if let Some(handle) = interval.take() {
                    win.clear_interval_with_handle(handle);
                    log::debug!("Color cycle stopped");
                }
            }
            if let Err(e) = page.apply(effect) {
                log::warn!("Failed to apply {effect:?}: {e:?}");
            }
        }

        {
            let state = state.borrow();
            if let Err(e) = renderer
                .borrow_mut()
                .render(&state.frame_uniforms(), state.instances())
            {
                log::error!("Render failed: {e}");
            }
        }

        if let Some(cb) = next.borrow().as_ref() {
            if let Err(e) = win.request_animation_frame(cb.as_ref().unchecked_ref()) {
                log::error!("requestAnimationFrame failed: {e:?}");
            }
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(cb) = callback.borrow().as_ref() {
        window.request_animation_frame(cb.as_ref().unchecked_ref())?;
    }
    Ok(())
}
