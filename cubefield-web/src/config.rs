use glam::Vec3;
use serde::Deserialize;

/// Camera placement for the landing view and the fly-in.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub start_position: [f32; 3],
    pub fly_in_position: [f32; 3],
    pub target: [f32; 3],
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            start_position: [20.0, 20.0, 20.0],
            fly_in_position: [-12.91, 53.31, 41.76],
            target: [35.0, -15.0, 30.0],
            min_distance: 30.0,
            max_distance: 100.0,
        }
    }
}

impl CameraConfig {
    pub fn start_position(&self) -> Vec3 {
        Vec3::from(self.start_position)
    }

    pub fn fly_in_position(&self) -> Vec3 {
        Vec3::from(self.fly_in_position)
    }

    pub fn target(&self) -> Vec3 {
        Vec3::from(self.target)
    }
}

/// CSS selectors for the page elements the runtime drives.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DomConfig {
    pub canvas: String,
    pub start_button: String,
    pub reset_button: String,
    pub color_picker: String,
    pub color_input: String,
    pub hidden_class: String,
}

impl Default for DomConfig {
    fn default() -> Self {
        Self {
            canvas: "canvas.webgl".into(),
            start_button: ".start-button".into(),
            reset_button: ".reset-button".into(),
            color_picker: ".color-picker".into(),
            color_input: "#picker".into(),
            hidden_class: "hidden".into(),
        }
    }
}

/// Full runtime configuration. Every field has a default, so any subset may
/// be supplied as JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub grid_rows: u32,
    pub grid_columns: u32,
    pub cube_size: f32,
    pub cube_spacing: f32,
    pub edge_thickness: f32,
    /// Packed `0xRRGGBB`.
    pub background: u32,
    /// Packed `0xRRGGBB`; used until the color picker supplies one.
    pub highlight_color: u32,
    pub color_cycle_interval_ms: u32,
    pub fly_in_duration_secs: f32,
    pub start_fade_duration_secs: f32,
    pub max_pixel_ratio: f64,
    pub camera: CameraConfig,
    pub dom: DomConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            grid_rows: 16,
            grid_columns: 16,
            cube_size: 5.0,
            cube_spacing: 5.0,
            edge_thickness: 1.5,
            background: 0x282828,
            highlight_color: 0xffffff,
            color_cycle_interval_ms: 2000,
            fly_in_duration_secs: 1.5,
            start_fade_duration_secs: 0.5,
            max_pixel_ratio: 2.0,
            camera: CameraConfig::default(),
            dom: DomConfig::default(),
        }
    }
}

impl DemoConfig {
    /// Parse a (possibly partial) JSON object and validate it.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: DemoConfig =
            serde_json::from_str(json).map_err(|e| format!("Invalid config JSON: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.grid_rows == 0 || self.grid_columns == 0 {
            return Err(format!(
                "Grid must be non-empty, got {}x{}",
                self.grid_rows, self.grid_columns
            ));
        }
        let positive = [
            ("cube_size", self.cube_size),
            ("cube_spacing", self.cube_spacing),
            ("edge_thickness", self.edge_thickness),
            ("fly_in_duration_secs", self.fly_in_duration_secs),
            ("start_fade_duration_secs", self.start_fade_duration_secs),
            ("camera.fov_degrees", self.camera.fov_degrees),
            ("camera.near", self.camera.near),
            ("camera.min_distance", self.camera.min_distance),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("{name} must be positive, got {value}"));
            }
        }
        if self.color_cycle_interval_ms == 0 {
            return Err("color_cycle_interval_ms must be positive".into());
        }
        if self.camera.far <= self.camera.near {
            return Err(format!(
                "camera.far ({}) must exceed camera.near ({})",
                self.camera.far, self.camera.near
            ));
        }
        if self.camera.min_distance > self.camera.max_distance {
            return Err(format!(
                "camera.min_distance ({}) exceeds camera.max_distance ({})",
                self.camera.min_distance, self.camera.max_distance
            ));
        }
        if !(self.max_pixel_ratio >= 1.0) {
            return Err(format!("max_pixel_ratio must be at least 1, got {}", self.max_pixel_ratio));
        }
        Ok(())
    }

    pub fn cube_count(&self) -> usize {
        self.grid_rows as usize * self.grid_columns as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = DemoConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cube_count(), 256);
        assert_eq!(config.camera.target(), Vec3::new(35.0, -15.0, 30.0));
    }

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = DemoConfig::from_json("{}").unwrap();
        assert_eq!(config, DemoConfig::default());
    }

    #[test]
    fn test_partial_json_overrides() {
        let config = DemoConfig::from_json(
            r##"{ "grid_rows": 4, "camera": { "fov_degrees": 60.0 }, "dom": { "canvas": "#main" } }"##,
        )
        .unwrap();
        assert_eq!(config.grid_rows, 4);
        assert_eq!(config.grid_columns, 16);
        assert_eq!(config.camera.fov_degrees, 60.0);
        assert_eq!(config.camera.near, 0.1);
        assert_eq!(config.dom.canvas, "#main");
        assert_eq!(config.dom.start_button, ".start-button");
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let err = DemoConfig::from_json("{ grid_rows: ").unwrap_err();
        assert!(err.starts_with("Invalid config JSON"), "{err}");
    }

    #[test]
    fn test_validation_failures() {
        assert!(DemoConfig::from_json(r#"{ "grid_rows": 0 }"#).is_err());
        assert!(DemoConfig::from_json(r#"{ "cube_size": -1.0 }"#).is_err());
        assert!(DemoConfig::from_json(r#"{ "color_cycle_interval_ms": 0 }"#).is_err());
        assert!(DemoConfig::from_json(
            r#"{ "camera": { "min_distance": 50.0, "max_distance": 40.0 } }"#
        )
        .is_err());
        assert!(DemoConfig::from_json(r#"{ "camera": { "near": 10.0, "far": 5.0 } }"#).is_err());
    }
}
