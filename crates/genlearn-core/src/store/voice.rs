/// Recording and playback state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceState {
    pub is_recording: bool,
    pub recording_seconds: u32,
    pub is_speaking: bool,
    pub transcript: Option<String>,
    pub last_audio_len: usize,
    pub error: Option<String>,
}

impl VoiceState {
    pub fn start_recording(&mut self) {
        self.is_recording = true;
        self.recording_seconds = 0;
        self.error = None;
    }

    pub fn stop_recording(&mut self) {
        self.is_recording = false;
    }

    /// One tick of the recording-duration counter. Ignored once stopped.
    pub fn tick(&mut self) {
        if self.is_recording {
            self.recording_seconds += 1;
        }
    }

    pub fn set_speaking(&mut self, speaking: bool) {
        self.is_speaking = speaking;
    }

    pub fn set_transcript(&mut self, transcript: impl Into<String>) {
        self.transcript = Some(transcript.into());
    }

    pub fn set_last_audio_len(&mut self, len: usize) {
        self.last_audio_len = len;
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}
