/// Silence the radio needs on the line around `+++` before it switches to
/// command mode. Both default to the factory `GT` setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GuardTimes {
    /// Quiet period before the first `+`.
    pub before_ms: u32,
    /// Quiet period after the last `+`; no data may be sent meanwhile.
    pub after_ms: u32,
}

pub const GUARD_TIME_BEFORE_MS: u32 = 2000;
pub const GUARD_TIME_AFTER_MS: u32 = 1000;

impl Default for GuardTimes {
    fn default() -> Self {
        Self {
            before_ms: GUARD_TIME_BEFORE_MS,
            after_ms: GUARD_TIME_AFTER_MS,
        }
    }
}

#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub guard_times: GuardTimes,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn guard_times(self, guard_times: GuardTimes) -> Self {
        Self { guard_times }
    }
}
