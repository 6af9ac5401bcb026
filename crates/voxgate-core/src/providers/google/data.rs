pub const TRANSCRIPTION_FORMATS: &[&str] = &[
    "audio/webm",
    "audio/wav",
    "audio/mp3",
    "audio/mpeg",
    "audio/ogg",
    "audio/flac",
    "audio/linear16",
    "audio/mulaw",
    "audio/amr-wb",
];

/// Arabic locales
pub const TRANSCRIPTION_LANGUAGES: &[&str] = &[
    "ar-SA", "ar-AE", "ar-BH", "ar-DZ", "ar-EG", "ar-IQ", "ar-IL", "ar-JO", "ar-KW", "ar-LB",
    "ar-MA", "ar-OM", "ar-PS", "ar-QA", "ar-SY", "ar-TN", "ar-YE",
];
