/*!
 * Caption language utilities.
 *
 * Caption groups are keyed by locale-style codes (`en`, `zh_CN`). This
 * module resolves those keys to ISO languages for the deck header: display
 * names for the subtitle engine and the built-in edge-tts voice table.
 */

use isolang::Language;

/// Caption languages assumed when a deck carries no captions at all
pub const DEFAULT_LANGUAGES: [&str; 2] = ["en", "zh_CN"];

/// One text-to-speech voice offered for a caption language
#[derive(Debug, Clone, Copy)]
pub struct TtsVoice {
    /// Voice identifier passed to the TTS API
    pub value: &'static str,
    /// Human-readable voice name
    pub display: &'static str,
}

static ZH_VOICES: &[TtsVoice] = &[
    TtsVoice {
        value: "zh-CN-YunjianNeural",
        display: "云间",
    },
    TtsVoice {
        value: "zh-CN-XiaoxiaoNeural",
        display: "晓晓",
    },
];

static EN_VOICES: &[TtsVoice] = &[
    TtsVoice {
        value: "en-US-AndrewNeural",
        display: "Andrew",
    },
    TtsVoice {
        value: "en-US-AriaNeural",
        display: "Aria",
    },
];

/// Strip a locale suffix from a caption key: `zh_CN` and `zh-CN` both
/// normalize to `zh`
pub fn base_code(lang_key: &str) -> &str {
    lang_key.split(['_', '-']).next().unwrap_or(lang_key)
}

/// Resolve a caption key to a display name for the subtitle engine.
///
/// Prefers the language's own name (autonym) and falls back to the English
/// one; unknown codes yield `None` and are displayed verbatim by callers.
pub fn display_name(lang_key: &str) -> Option<String> {
    let base = base_code(lang_key).to_ascii_lowercase();
    let language = match base.len() {
        2 => Language::from_639_1(&base),
        3 => Language::from_639_3(&base),
        _ => None,
    }?;
    let name = language.to_autonym().unwrap_or_else(|| language.to_name());
    Some(name.to_string())
}

/// Built-in TTS voices for a caption language; empty for languages the
/// voice table does not cover
pub fn tts_voices(lang_key: &str) -> &'static [TtsVoice] {
    match base_code(lang_key).to_ascii_lowercase().as_str() {
        "zh" => ZH_VOICES,
        "en" => EN_VOICES,
        _ => &[],
    }
}
