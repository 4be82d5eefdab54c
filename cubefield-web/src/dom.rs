//! Thin helpers over `web_sys` for the page elements the runtime touches.

use glam::Vec2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlCanvasElement,
    HtmlElement, HtmlInputElement, Window,
};

use crate::config::DomConfig;
use crate::input::CanvasRect;
use crate::state::UiEffect;

/// First element matching `selector`, cast to `T`.
pub fn query<T: JsCast>(document: &Document, selector: &str) -> Result<T, JsValue> {
    document
        .query_selector(selector)?
        .ok_or_else(|| JsValue::from_str(&format!("No element matches {selector}")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Element {selector} has the wrong type")))
}

/// Attach `handler` for `event` on `target` for the lifetime of the page.
pub fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Like [`listen`], but non-passive so the handler may call `preventDefault`.
pub fn listen_active(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let options = AddEventListenerOptions::new();
    options.set_passive(false);
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        closure.as_ref().unchecked_ref(),
        &options,
    )?;
    closure.forget();
    Ok(())
}

pub fn canvas_rect(canvas: &HtmlCanvasElement) -> CanvasRect {
    let r = canvas.get_bounding_client_rect();
    CanvasRect::new(r.left() as f32, r.top() as f32, r.width() as f32, r.height() as f32)
}

/// CSS and backing-store size of a full-window canvas.
#[derive(Debug, Clone, Copy)]
pub struct CanvasSize {
    pub css_width: f64,
    pub css_height: f64,
    pub pixel_width: u32,
    pub pixel_height: u32,
}

/// Stretch the canvas over the window, capping the device pixel ratio.
pub fn fit_canvas(
    window: &Window,
    canvas: &HtmlCanvasElement,
    max_pixel_ratio: f64,
) -> Result<CanvasSize, JsValue> {
    let css_width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let css_height = window.inner_height()?.as_f64().unwrap_or(0.0);
    let ratio = window.device_pixel_ratio().min(max_pixel_ratio).max(1.0);
    let size = CanvasSize {
        css_width,
        css_height,
        pixel_width: ((css_width * ratio) as u32).max(1),
        pixel_height: ((css_height * ratio) as u32).max(1),
    };

    canvas.set_width(size.pixel_width);
    canvas.set_height(size.pixel_height);
    let style = canvas.style();
    style.set_property("width", &format!("{css_width}px"))?;
    style.set_property("height", &format!("{css_height}px"))?;
    Ok(size)
}

/// Client position of a mouse or the first active touch.
pub fn client_position(event: &Event) -> Option<Vec2> {
    if let Some(mouse) = event.dyn_ref::<web_sys::MouseEvent>() {
        return Some(Vec2::new(mouse.client_x() as f32, mouse.client_y() as f32));
    }
    let touch = event.dyn_ref::<web_sys::TouchEvent>()?.touches().get(0)?;
    Some(Vec2::new(touch.client_x() as f32, touch.client_y() as f32))
}

/// The buttons and picker shown or hidden as the session advances.
pub struct PageControls {
    pub start_button: HtmlElement,
    pub reset_button: Element,
    pub color_picker: Element,
    pub color_input: HtmlInputElement,
    hidden_class: String,
}

impl PageControls {
    pub fn find(document: &Document, dom: &DomConfig) -> Result<Self, JsValue> {
        Ok(Self {
            start_button: query(document, &dom.start_button)?,
            reset_button: query(document, &dom.reset_button)?,
            color_picker: query(document, &dom.color_picker)?,
            color_input: query(document, &dom.color_input)?,
            hidden_class: dom.hidden_class.clone(),
        })
    }

    /// Apply a page effect. Interval bookkeeping is left to the caller.
    pub fn apply(&self, effect: UiEffect) -> Result<(), JsValue> {
        match effect {
            UiEffect::StartButtonOpacity(opacity) => {
                let style = self.start_button.style();
                style.set_property("opacity", &opacity.to_string())?;
                let visibility = if opacity <= 0.0 { "hidden" } else { "visible" };
                style.set_property("visibility", visibility)?;
            }
            UiEffect::HideStartButton => self.hide(&self.start_button)?,
            UiEffect::ShowResetButton => self.show(&self.reset_button)?,
            UiEffect::ShowColorPicker => self.show(&self.color_picker)?,
            UiEffect::StopColorCycle => {}
        }
        Ok(())
    }

    fn show(&self, element: &Element) -> Result<(), JsValue> {
        element.class_list().remove_1(&self.hidden_class)
    }

    fn hide(&self, element: &Element) -> Result<(), JsValue> {
        element.class_list().add_1(&self.hidden_class)
    }
}
