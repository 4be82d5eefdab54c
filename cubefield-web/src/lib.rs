//! Cubefield WASM Web Runtime
//!
//! Renders a 16×16 grid of outlined cubes in the browser. Hovering lights up
//! the cube under the pointer. Colors cycle at random until the start button
//! flies the camera in; after that the orbit controls, the reset button and
//! the color picker take over.

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod dom;

pub mod camera;
pub mod config;
pub mod controls;
pub mod input;
pub mod pick;
pub mod random;
pub mod scene;
pub mod session;
pub mod state;
pub mod tween;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Entry point, called when the WASM module loads.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Fails only when a logger is already installed
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Cubefield Web Runtime initialized");
}

/// Build the scene on the page's canvas and start the render loop.
///
/// `config_json` may override any field of the default configuration.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub async fn create_app(config_json: Option<String>) -> Result<app::App, JsValue> {
    let config = match config_json.as_deref() {
        Some(json) => config::DemoConfig::from_json(json).map_err(|e| JsValue::from_str(&e))?,
        None => config::DemoConfig::default(),
    };
    app::App::new(config).await
}
