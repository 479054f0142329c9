use crate::ui_state::DeviceProfile;

/// Session tuning knobs
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Maximum history entries kept (0 = unlimited)
    pub history_limit: usize,

    /// Device selected when the session starts
    pub default_device: DeviceProfile,

    /// Expand the parent of every inserted component so it is visible
    pub expand_inserted: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_limit: 100,
            default_device: DeviceProfile::Desktop,
            expand_inserted: false,
        }
    }
}

impl SessionConfig {
    pub fn with_history_limit(mut self, history_limit: usize) -> Self {
        self.history_limit = history_limit;
        self
    }

    pub fn with_default_device(mut self, device: DeviceProfile) -> Self {
        self.default_device = device;
        self
    }

    pub fn with_expand_inserted(mut self, expand_inserted: bool) -> Self {
        self.expand_inserted = expand_inserted;
        self
    }
}
