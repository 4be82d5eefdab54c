use glam::Vec3;

/// Values a [`Tween`] can interpolate.
pub trait Lerp: Copy {
    fn lerp(a: Self, b: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }
}

impl Lerp for Vec3 {
    fn lerp(a: Vec3, b: Vec3, t: f32) -> Vec3 {
        a + (b - a) * t
    }
}

/// Quadratic ease-out, `1 - (1 - t)²`, with `t` clamped to [0, 1].
pub fn power1_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenStep<T> {
    Running(T),
    Finished(T),
}

impl<T: Copy> TweenStep<T> {
    pub fn value(&self) -> T {
        match *self {
            TweenStep::Running(v) | TweenStep::Finished(v) => v,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, TweenStep::Finished(_))
    }
}

/// Eases from `from` to `to` over `duration` seconds.
#[derive(Debug, Clone)]
pub struct Tween<T: Lerp> {
    from: T,
    to: T,
    duration: f32,
    elapsed: f32,
}

impl<T: Lerp> Tween<T> {
    pub fn new(from: T, to: T, duration: f32) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }

    /// Advance by `dt` seconds. Once finished, keeps reporting the end value.
    pub fn advance(&mut self, dt: f32) -> TweenStep<T> {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        if self.is_finished() {
            return TweenStep::Finished(self.to);
        }
        let t = power1_out(self.elapsed / self.duration);
        TweenStep::Running(T::lerp(self.from, self.to, t))
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// The start-button sequence: the camera glides to its overview spot while
/// the button fades out.
#[derive(Debug, Clone)]
pub struct FlyIn {
    pub camera: Tween<Vec3>,
    pub fade: Tween<f32>,
    fade_reported: bool,
}

/// What one fly-in step produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyInStep {
    pub camera_position: Vec3,
    pub button_opacity: f32,
    /// True on the single step where the fade completes.
    pub fade_done: bool,
    pub camera_done: bool,
}

impl FlyIn {
    pub fn new(from: Vec3, to: Vec3, duration: f32, fade_duration: f32) -> Self {
        Self {
            camera: Tween::new(from, to, duration),
            fade: Tween::new(1.0, 0.0, fade_duration),
            fade_reported: false,
        }
    }

    pub fn advance(&mut self, dt: f32) -> FlyInStep {
        let camera = self.camera.advance(dt);
        let fade = self.fade.advance(dt);
        let fade_done = fade.is_finished() && !self.fade_reported;
        if fade_done {
            self.fade_reported = true;
        }
        FlyInStep {
            camera_position: camera.value(),
            button_opacity: fade.value(),
            fade_done,
            camera_done: camera.is_finished(),
        }
    }
}
