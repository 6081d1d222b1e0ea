use crate::level::Level;

/// Software model of the IC's internal step counter.
///
/// The IC has no feedback path, so this is only ever a belief: it moves with
/// each emitted pulse and is reset by a shutdown. A missed pulse or a power
/// loss on the IC side desynchronizes the two and cannot be detected here.
#[derive(Debug, Clone, Default)]
pub struct LevelTracker {
    believed: Level,
}

impl LevelTracker {
    /// Create a tracker for an IC that was just held low (off).
    pub const fn new() -> Self {
        Self {
            believed: Level::OFF,
        }
    }

    /// Step the IC is believed to sit at.
    pub const fn current(&self) -> Level {
        self.believed
    }

    /// Account for one step-down pulse, rolling over past the dimmest step.
    pub fn decrement_with_wrap(&mut self) -> Level {
        self.believed = self.believed.stepped_down();
        self.believed
    }

    /// Account for a completed shutdown hold.
    pub fn reset_to_off(&mut self) {
        self.believed = Level::OFF;
    }
}
