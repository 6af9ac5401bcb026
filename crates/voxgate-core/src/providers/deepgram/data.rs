use crate::capabilities::VoiceSpec;
use crate::language::LanguageMap;

/// Nova-3 accepts full BCP 47 tags including Arabic dialects; only English
/// regional tags collapse.
pub const LANGUAGES: LanguageMap = LanguageMap::new(
    "multi",
    &[
        ("en-US", "en"),
        ("en-GB", "en"),
        ("en", "en"),
        ("ar-SA", "ar-SA"),
        ("ar-AE", "ar-AE"),
        ("ar-EG", "ar-EG"),
        ("ar-QA", "ar-QA"),
        ("ar-KW", "ar-KW"),
        ("ar-SY", "ar-SY"),
        ("ar-LB", "ar-LB"),
        ("ar-PS", "ar-PS"),
        ("ar-JO", "ar-JO"),
        ("ar-SD", "ar-SD"),
        ("ar-TD", "ar-TD"),
        ("ar-MA", "ar-MA"),
        ("ar-DZ", "ar-DZ"),
        ("ar-TN", "ar-TN"),
        ("ar-IQ", "ar-IQ"),
        ("ar-IR", "ar-IR"),
        ("ar", "ar"),
        ("es", "es"),
        ("fr", "fr"),
        ("de", "de"),
        ("it", "it"),
        ("pt", "pt"),
        ("nl", "nl"),
        ("hi", "hi"),
        ("ja", "ja"),
        ("ko", "ko"),
        ("sv", "sv"),
        ("ru", "ru"),
        ("tr", "tr"),
        ("vi", "vi"),
        ("th", "th"),
        ("zh", "zh"),
        ("uk", "uk"),
        ("cs", "cs"),
        ("pl", "pl"),
        ("fi", "fi"),
    ],
);

pub const TRANSCRIPTION_LANGUAGES: &[&str] = &[
    "en", "es", "fr", "de", "it", "pt", "nl", "hi", "ja", "ko", "sv", "ru", "tr", "vi", "th", "zh",
    "uk", "cs", "pl", "fi", "ar", "ar-SA", "ar-AE", "ar-EG", "ar-QA", "ar-KW", "ar-SY", "ar-LB",
    "ar-PS", "ar-JO", "ar-SD", "ar-TD", "ar-MA", "ar-DZ", "ar-TN", "ar-IQ", "ar-IR",
];

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

pub const SPEECH_FORMATS: &[&str] = &["mp3", "pcm", "mulaw"];

pub const SPEECH_VOICES: &[VoiceSpec] = &[
    VoiceSpec::new("aura-2-thalia", "Aura 2 Thalia")
        .language("en")
        .gender("female")
        .description("English female voice (Aura 2)"),
    VoiceSpec::new("aura-asteria-en", "Aura Asteria English")
        .language("en")
        .gender("female")
        .description("English female voice"),
    VoiceSpec::new("aura-2-luna", "Aura 2 Luna")
        .language("en")
        .gender("female")
        .description("English female voice (Aura 2)"),
    VoiceSpec::new("aura-2-stella", "Aura 2 Stella")
        .language("en")
        .gender("female")
        .description("English female voice (Aura 2)"),
    VoiceSpec::new("aura-2-saoirse", "Aura 2 Saoirse")
        .language("en")
        .gender("female")
        .description("Irish English female voice (Aura 2)"),
    VoiceSpec::new("aura-2-orion", "Aura 2 Orion")
        .language("en")
        .gender("male")
        .description("English male voice (Aura 2)"),
    VoiceSpec::new("aura-zeus-en", "Aura Zeus English")
        .language("en")
        .gender("male")
        .description("English male voice"),
    VoiceSpec::new("aura-arcas-en", "Aura Arcas English")
        .language("en")
        .gender("male")
        .description("English male voice"),
    VoiceSpec::new("aura-2-harmony", "Aura 2 Harmony")
        .language("en")
        .gender("female")
        .description("English female voice with emotional range (Aura 2)"),
    VoiceSpec::new("aura-2-linnea", "Aura 2 Linnea")
        .language("sv")
        .gender("female")
        .description("Swedish female voice (Aura 2)"),
    VoiceSpec::new("aura-2-mads", "Aura 2 Mads")
        .language("da")
        .gender("male")
        .description("Danish male voice (Aura 2)"),
    VoiceSpec::new("aura-2-nanami", "Aura 2 Nanami")
        .language("ja")
        .gender("female")
        .description("Japanese female voice (Aura 2)"),
];
