/// Host-tunable playback settings, shared read-only through `MovieContext`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerConfig {
    /// Used when a movie declares a frame rate of zero or less.
    pub default_frame_rate: f32,
    /// Log every executed action at debug level.
    pub trace_actions: bool,
    /// Overrides the header version for script value semantics.
    pub swf_version_override: Option<u8>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            default_frame_rate: 24.0,
            trace_actions: false,
            swf_version_override: None,
        }
    }
}

impl PlayerConfig {
    pub fn frame_rate_or_default(&self, frame_rate: f32) -> f32 {
        if frame_rate > 0.0 && frame_rate.is_finite() {
            frame_rate
        } else {
            self.default_frame_rate
        }
    }
}
