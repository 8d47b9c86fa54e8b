//! Best-effort haptic feedback collaborator.

use crate::config::HapticCue;
use crate::error::HapticsError;

pub trait Haptics {
    fn vibrate(&self, duration_ms: u64, amplitude: u8) -> Result<(), HapticsError>;

    fn play(&self, cue: HapticCue) -> Result<(), HapticsError> {
        self.vibrate(cue.duration_ms, cue.amplitude)
    }
}

/// Haptics for hosts without a vibrator; every cue succeeds silently.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHaptics;

impl Haptics for NullHaptics {
    fn vibrate(&self, _duration_ms: u64, _amplitude: u8) -> Result<(), HapticsError> {
        Ok(())
    }
}
