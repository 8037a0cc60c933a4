use foundation::time::Time;

/// Default display refresh rate used to pace the frame loop.
pub const DEFAULT_REFRESH_HZ: f64 = 60.0;

/// Deterministic frame metadata.
///
/// Frames are pure values so a session can be recorded and replayed
/// frame-for-frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Fixed delta time (seconds).
    pub dt_s: f64,
    /// Time at the start of the frame (seconds).
    pub time: Time,
}

impl Frame {
    pub fn new(index: u64, dt_s: f64) -> Self {
        Self {
            index,
            dt_s,
            time: Time(index as f64 * dt_s),
        }
    }

    pub fn next(self) -> Self {
        Self::new(self.index + 1, self.dt_s)
    }
}

/// Hands out frames one at a time, paced by a fixed refresh rate.
///
/// Each call to [`FrameClock::tick`] yields the frame that is about to run;
/// the caller runs it to completion before asking for the next one.
#[derive(Debug, Clone)]
pub struct FrameClock {
    next: Frame,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::with_refresh_hz(DEFAULT_REFRESH_HZ)
    }
}

impl FrameClock {
    pub fn with_refresh_hz(hz: f64) -> Self {
        let hz = if hz.is_finite() && hz > 0.0 { hz } else { DEFAULT_REFRESH_HZ };
        Self {
            next: Frame::new(0, 1.0 / hz),
        }
    }

    pub fn tick(&mut self) -> Frame {
        let frame = self.next;
        self.next = frame.next();
        frame
    }

    /// Frames handed out so far.
    pub fn elapsed_frames(&self) -> u64 {
        self.next.index
    }
}

#[cfg(test)]
mod tests {
    use super::{Frame, FrameClock};
    use foundation::time::Time;

    #[test]
    fn frame_time_is_deterministic() {
        let a = Frame::new(10, 1.0 / 60.0);
        let b = Frame::new(10, 1.0 / 60.0);
        assert_eq!(a, b);
        assert_eq!(a.time, Time(10.0 / 60.0));
    }

    #[test]
    fn clock_ticks_sequential_frames() {
        let mut clock = FrameClock::with_refresh_hz(2.0);
        let f0 = clock.tick();
        let f1 = clock.tick();
        assert_eq!(f0.index, 0);
        assert_eq!(f1.index, 1);
        assert_eq!(f1.time, Time(0.5));
        assert_eq!(clock.elapsed_frames(), 2);
    }

    #[test]
    fn invalid_refresh_rate_falls_back_to_default() {
        let mut clock = FrameClock::with_refresh_hz(0.0);
        assert_eq!(clock.tick().dt_s, 1.0 / super::DEFAULT_REFRESH_HZ);
    }
}
