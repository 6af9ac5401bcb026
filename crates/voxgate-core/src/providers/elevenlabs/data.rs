use crate::capabilities::VoiceSpec;

/// Served when the voice listing call fails (e.g. a key without voices_read)
pub const FALLBACK_VOICES: &[VoiceSpec] = &[
    VoiceSpec::new("21m00Tcm4TlvDq8ikWAM", "Rachel")
        .language("Multilingual")
        .gender("Female"),
    VoiceSpec::new("AZnzlk1XvdvUeBnXmlld", "Domi")
        .language("Multilingual")
        .gender("Female"),
    VoiceSpec::new("EXAVITQu4vr4xnSDxMaL", "Bella")
        .language("Multilingual")
        .gender("Female"),
    VoiceSpec::new("ErXwobaYiD0MjBEv2gSq", "Antoni")
        .language("Multilingual")
        .gender("Male"),
    VoiceSpec::new("MF3mGyEYCl7XYWbV9V6O", "Elli")
        .language("Multilingual")
        .gender("Female"),
    VoiceSpec::new("TxGEqnHWrfWFTfGW9XjX", "Josh")
        .language("Multilingual")
        .gender("Male"),
    VoiceSpec::new("VR6AewLTigWG4xSOukaG", "Arnold")
        .language("Multilingual")
        .gender("Male"),
    VoiceSpec::new("ODq5zmih8GrVes37Dizj", "Patrick")
        .language("Multilingual")
        .gender("Male"),
    VoiceSpec::new("bIHGb242EICVFPQLKN2k", "Fin")
        .language("Multilingual")
        .gender("Male"),
    VoiceSpec::new("nPczCjzI2devNBz1zQrh", "Seraphina")
        .language("Multilingual")
        .gender("Female"),
];
