//! Echoes the parameter text back
//!
//! The text is always read aloud, even when the session itself is silent, so
//! it goes straight to a voice of its own and stays off the speech channel.

use std::fmt;
use std::sync::Arc;

use crate::command::dispatcher::{Handler, HandlerCall, HandlerError, SideChannel};
use crate::session::voice::Voice;

const NOTHING_TO_REPEAT: &str = "What exactly do I repeat for you?";

#[derive(Clone)]
pub struct Repeat {
    voice: Arc<dyn Voice + Sync>,
}

impl Repeat {
    pub fn new(voice: Arc<dyn Voice + Sync>) -> Self {
        Self { voice }
    }
}

impl fmt::Debug for Repeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repeat").finish_non_exhaustive()
    }
}

impl Handler for Repeat {
    fn handle(&self, call: &HandlerCall) -> Result<SideChannel, HandlerError> {
        let text = call.parameter_text().unwrap_or(NOTHING_TO_REPEAT);
        self.voice.say(text)?;
        Ok(SideChannel::new(format!(" {text}"), ""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::voice::CommandVoice;
    use parking_lot::Mutex;
    use std::io;

    #[derive(Default)]
    struct RecordingVoice {
        spoken: Mutex<Vec<String>>,
    }

    impl Voice for RecordingVoice {
        fn say(&self, text: &str) -> io::Result<()> {
            self.spoken.lock().push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_repeats_parameters_aloud() {
        let voice = Arc::new(RecordingVoice::default());
        let side = Repeat::new(voice.clone())
            .handle(&HandlerCall::new("say ", "  I am here "))
            .unwrap();

        assert_eq!(side, SideChannel::new(" I am here", ""));
        assert_eq!(voice.spoken.lock().clone(), vec!["I am here".to_string()]);
    }

    #[test]
    fn test_asks_when_nothing_given() {
        let voice = Arc::new(RecordingVoice::default());
        let side = Repeat::new(voice.clone())
            .handle(&HandlerCall::new("repeat after me", ""))
            .unwrap();

        assert_eq!(side.display, format!(" {NOTHING_TO_REPEAT}"));
        assert!(side.speech.is_empty());
        assert_eq!(voice.spoken.lock().clone(), vec![NOTHING_TO_REPEAT.to_string()]);
    }

    #[test]
    fn test_voice_failure_is_io_error() {
        let repeat = Repeat::new(Arc::new(CommandVoice::new("conviva-no-such-tts-program")));
        let result = repeat.handle(&HandlerCall::new("repeat", " hello"));
        assert!(matches!(result, Err(HandlerError::Io(_))));
    }
}
