/// Frame clock driving the animation.
///
/// `tick` turns an absolute timestamp into a delta against the previous one,
/// starting from a zero baseline. `advance` accumulates deltas into the
/// animation angle without clamping.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Clock {
    previous_time: f32,
    angle: f32,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns seconds elapsed since the previous tick and stores `now`.
    pub fn tick(&mut self, now: f32) -> f32 {
        let dt = now - self.previous_time;
        self.previous_time = now;
        dt
    }

    pub fn advance(&mut self, dt: f32) {
        self.angle += dt;
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn previous_time(&self) -> f32 {
        self.previous_time
    }
}
