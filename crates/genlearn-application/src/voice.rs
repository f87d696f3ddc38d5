use crate::scope::TaskScope;
use genlearn_core::media::{AudioClip, SpeechRequest, Transcription, VoiceGateway};
use genlearn_core::store::VoiceState;
use genlearn_core::user::UserSettings;
use genlearn_core::{GenlearnError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Period of the recording-duration counter.
pub const RECORDING_TICK: Duration = Duration::from_secs(1);

/// Text-to-speech, speech-to-text and the recording timer.
pub struct VoiceService {
    gateway: Arc<dyn VoiceGateway>,
    state: Arc<Mutex<VoiceState>>,
    recording: Mutex<Option<CancellationToken>>,
}

impl VoiceService {
    pub fn new(gateway: Arc<dyn VoiceGateway>) -> Self {
        Self {
            gateway,
            state: Arc::new(Mutex::new(VoiceState::default())),
            recording: Mutex::new(None),
        }
    }

    pub fn state(&self) -> Arc<Mutex<VoiceState>> {
        self.state.clone()
    }

    /// Synthesizes `text` in the user's language and preferred voice.
    pub async fn speak(&self, text: &str, settings: &UserSettings) -> Result<Vec<u8>> {
        let request = SpeechRequest::new(
            text,
            settings.language_preference.clone(),
            settings.voice_preference,
        );
        {
            let mut state = self.state.lock().await;
            state.clear_error();
            state.set_speaking(true);
        }

        let result = self.gateway.synthesize(&request).await;

        let mut state = self.state.lock().await;
        state.set_speaking(false);
        match result {
            Ok(audio) => {
                debug!(bytes = audio.len(), voice = %request.voice_type, "Speech synthesized");
                state.set_last_audio_len(audio.len());
                Ok(audio)
            }
            Err(e) => {
                state.set_error(e.to_string());
                Err(e)
            }
        }
    }

    /// Starts the duration counter on a ticker owned by `scope`.
    pub async fn start_recording(&self, scope: &TaskScope) -> Result<()> {
        let mut recording = self.recording.lock().await;
        if recording.as_ref().is_some_and(|token| !token.is_cancelled()) {
            return Err(GenlearnError::validation("Already recording"));
        }

        self.state.lock().await.start_recording();
        let token = scope.child_token();
        *recording = Some(token.clone());

        let state = self.state.clone();
        scope.spawn(async move {
            let mut ticker = interval_at(Instant::now() + RECORDING_TICK, RECORDING_TICK);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        let mut state = state.lock().await;
                        if !state.is_recording {
                            break;
                        }
                        state.tick();
                    }
                }
            }
        });
        Ok(())
    }

    /// Stops the counter and returns the recorded duration in seconds.
    pub async fn stop_recording(&self) -> u32 {
        if let Some(token) = self.recording.lock().await.take() {
            token.cancel();
        }
        let mut state = self.state.lock().await;
        state.stop_recording();
        state.recording_seconds
    }

    pub async fn transcribe(&self, clip: &AudioClip) -> Result<Transcription> {
        match self.gateway.transcribe(clip).await {
            Ok(transcription) => {
                self.state
                    .lock()
                    .await
                    .set_transcript(transcription.transcribed_text.clone());
                Ok(transcription)
            }
            Err(e) => {
                warn!(file = %clip.file_name, error = %e, "Transcription failed");
                self.state.lock().await.set_error(e.to_string());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use genlearn_core::user::VoicePreference;
    use std::sync::Mutex as StdMutex;

    #[derive(Default)]
    struct MockVoice {
        requests: StdMutex<Vec<SpeechRequest>>,
    }

    #[async_trait]
    impl VoiceGateway for MockVoice {
        async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(vec![0; 16])
        }

        async fn transcribe(&self, clip: &AudioClip) -> Result<Transcription> {
            if clip.bytes.is_empty() {
                return Err(GenlearnError::validation("Recording is empty"));
            }
            Ok(Transcription {
                transcribed_text: "chlorophyll".into(),
                language: clip.language.clone(),
            })
        }
    }

    #[tokio::test]
    async fn test_speak_uses_voice_preference() {
        let gateway = Arc::new(MockVoice::default());
        let service = VoiceService::new(gateway.clone());
        let settings = UserSettings {
            voice_preference: VoicePreference::Male,
            language_preference: "hi".into(),
            ..UserSettings::default()
        };

        let audio = service.speak("Namaste", &settings).await.unwrap();
        assert_eq!(audio.len(), 16);

        let request = gateway.requests.lock().unwrap()[0].clone();
        assert_eq!(request.voice_type, VoicePreference::Male);
        assert_eq!(request.language, "hi");

        let state = service.state();
        let state = state.lock().await;
        assert!(!state.is_speaking);
        assert_eq!(state.last_audio_len, 16);
    }

    #[tokio::test(start_paused = true)]
    async fn test_recording_counter_ticks_every_second_until_stopped() {
        let service = VoiceService::new(Arc::new(MockVoice::default()));
        let scope = TaskScope::new();

        service.start_recording(&scope).await.unwrap();
        tokio::time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(service.stop_recording().await, 3);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(service.state().lock().await.recording_seconds, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_scope_stops_counter() {
        let service = VoiceService::new(Arc::new(MockVoice::default()));
        let scope = TaskScope::new();
        service.start_recording(&scope).await.unwrap();
        tokio::time::sleep(Duration::from_millis(1500)).await;

        drop(scope);
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(service.state().lock().await.recording_seconds, 1);
    }

    #[tokio::test]
    async fn test_transcript_is_stored() {
        let service = VoiceService::new(Arc::new(MockVoice::default()));
        let clip = AudioClip {
            file_name: "answer.webm".into(),
            bytes: vec![1, 2, 3],
            language: "en".into(),
        };
        service.transcribe(&clip).await.unwrap();
        assert_eq!(
            service.state().lock().await.transcript.as_deref(),
            Some("chlorophyll")
        );

        let empty = AudioClip {
            bytes: vec![],
            ..clip
        };
        assert!(service.transcribe(&empty).await.is_err());
        assert!(service.state().lock().await.error.is_some());
    }
}
