use crate::capabilities::VoiceSpec;

pub const TRANSCRIPTION_FORMATS: &[&str] = &["mp3", "mp4", "mpeg", "mpga", "m4a", "wav", "webm"];

pub const TRANSCRIPTION_LANGUAGES: &[&str] = &[
    "en", "es", "fr", "de", "it", "pt", "nl", "pl", "ru", "zh", "ja", "ko", "ar", "tr", "sv", "hi",
    "id", "vi", "th", "ms",
];

pub const SPEECH_FORMATS: &[&str] = &["mp3"];

pub const SPEECH_VOICES: &[VoiceSpec] = &[
    VoiceSpec::new("alloy", "Alloy").language("en").gender("neutral"),
    VoiceSpec::new("echo", "Echo").language("en").gender("male"),
    VoiceSpec::new("fable", "Fable").language("en").gender("neutral"),
    VoiceSpec::new("onyx", "Onyx").language("en").gender("male"),
    VoiceSpec::new("nova", "Nova").language("en").gender("female"),
    VoiceSpec::new("shimmer", "Shimmer").language("en").gender("female"),
];
