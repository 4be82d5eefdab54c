use cubefield_shared::color::{Color, ColorParseError};
use cubefield_shared::uniforms::{CubeInstance, FrameUniforms};
use glam::Vec2;

use crate::camera::PerspectiveCamera;
use crate::config::DemoConfig;
use crate::controls::OrbitControls;
use crate::input::{CanvasRect, PointerState};
use crate::pick::PickController;
use crate::random::RandomSource;
use crate::scene::CubeGrid;
use crate::session::{Session, SessionPhase};
use crate::tween::FlyIn;

/// Page changes the runtime asks the DOM layer to make.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEffect {
    StartButtonOpacity(f32),
    HideStartButton,
    ShowResetButton,
    ShowColorPicker,
    StopColorCycle,
}

/// Everything the page mutates: grid colors, pick state, camera, session.
///
/// DOM callbacks and the frame callback all run on the browser's single
/// thread, so this is plain mutable state behind one `RefCell`.
pub struct DemoState {
    config: DemoConfig,
    grid: CubeGrid,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    pointer: PointerState,
    picker: PickController,
    session: Session,
    fly_in: Option<FlyIn>,
    last_time: f64,
    viewport: Vec2,
    instances: Vec<CubeInstance>,
}

impl DemoState {
    pub fn new(config: DemoConfig, width: f64, height: f64) -> Self {
        let grid = CubeGrid::new(
            config.grid_rows,
            config.grid_columns,
            config.cube_spacing,
            config.cube_size,
            Color::WHITE,
        );

        let cam = &config.camera;
        let mut camera =
            PerspectiveCamera::new(cam.fov_degrees, (width / height.max(1.0)) as f32, cam.near, cam.far);
        camera.position = cam.start_position();

        let mut controls = OrbitControls::new(cam.target(), cam.min_distance, cam.max_distance);
        controls.update(&mut camera);

        let picker = PickController::new(Color::from_hex(config.highlight_color));
        let mut instances = Vec::with_capacity(grid.len());
        grid.write_instances(&mut instances);

        log::info!(
            "Built {}x{} cube grid ({} cubes)",
            config.grid_rows,
            config.grid_columns,
            grid.len()
        );

        Self {
            config,
            grid,
            camera,
            controls,
            pointer: PointerState::new(),
            picker,
            session: Session::new(),
            fly_in: None,
            last_time: 0.0,
            viewport: Vec2::new(width as f32, height as f32),
            instances,
        }
    }

    // ─── Frame ───────────────────────────────────────────────────────

    /// One tick of the render loop; `time` is the rAF timestamp in ms.
    pub fn frame(&mut self, time: f64) -> Vec<UiEffect> {
        let dt = if self.last_time > 0.0 {
            ((time - self.last_time) / 1000.0).max(0.0)
        } else {
            0.016 // ~60fps first frame
        };
        self.last_time = time;

        let mut effects = Vec::new();
        self.advance_fly_in(dt as f32, &mut effects);

        self.pick_step();

        self.controls.update(&mut self.camera);
        self.grid.write_instances(&mut self.instances);

        effects
    }

    fn pick_step(&mut self) {
        let ray = self.pointer.pick_position().map(|ndc| self.camera.ray_from_ndc(ndc));
        self.picker.pick(ray.as_ref(), &mut self.grid);
    }

    fn advance_fly_in(&mut self, dt: f32, effects: &mut Vec<UiEffect>) {
        let Some(fly_in) = self.fly_in.as_mut() else {
            return;
        };
        let step = fly_in.advance(dt);
        self.camera.position = step.camera_position;

        effects.push(UiEffect::StartButtonOpacity(step.button_opacity));
        if step.fade_done {
            effects.push(UiEffect::HideStartButton);
        }
        if step.camera_done {
            self.fly_in = None;
            self.complete_start(effects);
        }
    }

    fn complete_start(&mut self, effects: &mut Vec<UiEffect>) {
        self.grid.set_all_colors(Color::WHITE);
        self.picker.reapply(&mut self.grid);
        self.controls.enable();
        effects.push(UiEffect::ShowResetButton);
        effects.push(UiEffect::ShowColorPicker);
        effects.push(UiEffect::StopColorCycle);
        self.session.finish();
        log::info!("Session started");
    }

    // ─── Session ─────────────────────────────────────────────────────

    /// Start button: begin the fly-in. Ignored after the first press.
    pub fn press_start(&mut self) -> bool {
        if !self.session.begin() {
            log::debug!("Start pressed again in {:?}, ignoring", self.session.phase());
            return false;
        }
        self.fly_in = Some(FlyIn::new(
            self.camera.position,
            self.config.camera.fly_in_position(),
            self.config.fly_in_duration_secs,
            self.config.start_fade_duration_secs,
        ));
        log::info!("Start pressed, camera flying in");
        true
    }

    /// Interval callback: recolor every cube at random while not started.
    ///
    /// The highlighted cube keeps its highlight; its new random color is
    /// what the next restore brings back.
    pub fn color_cycle_tick(&mut self, rng: &mut dyn RandomSource) -> bool {
        if !self.session.cycles_colors() {
            return false;
        }
        self.grid.randomize_colors(rng);
        self.picker.reapply(&mut self.grid);
        log::debug!("Cycled {} cube colors", self.grid.len());
        true
    }

    /// Reset button: every cube back to white. Session phase is unchanged.
    pub fn reset_colors(&mut self) {
        self.grid.set_all_colors(Color::WHITE);
        self.picker.reapply(&mut self.grid);
    }

    /// Color picker finished an interaction with `hex`.
    pub fn select_color(&mut self, hex: &str) -> Result<Color, ColorParseError> {
        let color = Color::parse_hex_str(hex)?;
        self.picker.set_highlight_color(color);
        log::debug!("Highlight color set to #{:06x}", color.to_hex());
        Ok(color)
    }

    // ─── Pointer ─────────────────────────────────────────────────────

    pub fn pointer_moved(&mut self, client: Vec2, rect: &CanvasRect) {
        let delta = self.pointer.move_to(client, rect);
        if self.pointer.is_pressed() {
            self.controls.rotate(delta, self.viewport.y);
        }
    }

    /// Pointer left the window or the touch ended: stop picking.
    pub fn pointer_left(&mut self) {
        self.pointer.clear();
    }

    pub fn pointer_pressed(&mut self, client: Vec2, rect: &CanvasRect) {
        self.pointer.press(client, rect);
    }

    /// End a press. A click after the session started paints the cube under
    /// the pointer, even when no frame has run since the press.
    pub fn pointer_released(&mut self) -> Option<usize> {
        let clicked = self.pointer.release();
        if !(clicked && self.session.is_started()) {
            return None;
        }
        self.pick_step();
        let painted = self.picker.paint();
        if let Some(index) = painted {
            log::debug!("Painted cube {index}");
        }
        painted
    }

    pub fn wheel(&mut self, delta_y: f64) {
        self.controls.zoom(delta_y as f32);
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport = Vec2::new(width as f32, height as f32);
        self.camera.set_aspect(width, height);
    }

    // ─── Accessors ───────────────────────────────────────────────────

    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    pub fn grid(&self) -> &CubeGrid {
        &self.grid
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn picker(&self) -> &PickController {
        &self.picker
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    pub fn is_started(&self) -> bool {
        self.session.is_started()
    }

    pub fn instances(&self) -> &[CubeInstance] {
        &self.instances
    }

    pub fn frame_uniforms(&self) -> FrameUniforms {
        FrameUniforms::new(self.camera.view_proj(), self.config.edge_thickness)
    }
}
