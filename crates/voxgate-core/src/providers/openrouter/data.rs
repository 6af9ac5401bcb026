/// Selectable OpenRouter models: (id, display name, publisher)
pub const OPENROUTER_MODELS: &[(&str, &str, &str)] = &[
    ("z-ai/glm-4.5-air", "GLM 4.5 Air", "Z.ai"),
    ("x-ai/grok-4.1-fast", "Grok 4.1 Fast", "xAI"),
];
