//! Volume control
//!
//! Nominal level in [0.0, 1.0] plus a mute flag. Muting never touches the
//! nominal level, so unmuting restores it exactly.

/// Volume controller
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    /// Nominal level (0.0-1.0)
    level: f32,

    /// Mute state (preserves volume level)
    muted: bool,
}

impl Volume {
    /// Create new volume controller
    ///
    /// # Arguments
    /// * `level` - Initial level, clamped to [0.0, 1.0]
    pub fn new(level: f32) -> Self {
        Self {
            level: Self::clamp(level),
            muted: false,
        }
    }

    /// Set nominal level, clamped to [0.0, 1.0]
    pub fn set_level(&mut self, level: f32) {
        self.level = Self::clamp(level);
    }

    /// Get nominal level
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Mute audio (preserves volume level)
    pub fn mute(&mut self) {
        self.muted = true;
    }

    /// Unmute audio (restores previous volume)
    pub fn unmute(&mut self) {
        self.muted = false;
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Effective output volume handed to the device
    ///
    /// Returns 0.0 if muted, otherwise the nominal level
    pub fn gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.level
        }
    }

    fn clamp(level: f32) -> f32 {
        if level.is_nan() {
            0.0
        } else {
            level.clamp(0.0, 1.0)
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_volume() {
        let vol = Volume::new(0.8);
        assert_eq!(vol.level(), 0.8);
        assert!(!vol.is_muted());
    }

    #[test]
    fn set_volume_level_clamps() {
        let mut vol = Volume::new(0.5);

        vol.set_level(1.5);
        assert_eq!(vol.level(), 1.0);

        vol.set_level(-0.2);
        assert_eq!(vol.level(), 0.0);

        vol.set_level(f32::NAN);
        assert_eq!(vol.level(), 0.0);
    }

    #[test]
    fn mute_preserves_level() {
        let mut vol = Volume::new(0.37);

        vol.mute();
        assert!(vol.is_muted());
        assert_eq!(vol.gain(), 0.0);
        assert_eq!(vol.level(), 0.37);

        vol.unmute();
        assert_eq!(vol.gain(), 0.37);
    }

    #[test]
    fn toggle_mute_round_trip() {
        let mut vol = Volume::new(0.63);
        vol.toggle_mute();
        vol.toggle_mute();
        assert!(!vol.is_muted());
        assert_eq!(vol.gain(), 0.63);
    }
}
