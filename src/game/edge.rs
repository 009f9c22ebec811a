//! Rising-edge detection

/// Fires once per contiguous interval in which a condition holds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeTrigger {
    was_active: bool,
}

impl EdgeTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current condition; true only on a false -> true transition
    pub fn update(&mut self, active: bool) -> bool {
        let rising = active && !self.was_active;
        self.was_active = active;
        rising
    }
}
