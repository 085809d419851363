/*!
 * Tests for caption language utilities
 */

use slaide::caption_lang::{base_code, display_name, tts_voices, DEFAULT_LANGUAGES};

/// Test locale suffix stripping
#[test]
fn test_base_code_withLocaleSuffix_shouldStripIt() {
    assert_eq!(base_code("zh_CN"), "zh");
    assert_eq!(base_code("zh-CN"), "zh");
    assert_eq!(base_code("en"), "en");
    assert_eq!(base_code("en_US"), "en");
}

/// Test display name resolution for caption keys
#[test]
fn test_display_name_withKnownCodes_shouldResolve() {
    assert_eq!(display_name("en").as_deref(), Some("English"));
    assert_eq!(display_name("en_US").as_deref(), Some("English"));

    // The Chinese autonym is preferred over the English name
    let chinese = display_name("zh_CN");
    assert!(chinese.is_some());
    assert_ne!(chinese.as_deref(), Some("Chinese"));
}

/// Test that unknown codes resolve to nothing
#[test]
fn test_display_name_withUnknownCodes_shouldReturnNone() {
    assert!(display_name("xx").is_none());
    assert!(display_name("notalang").is_none());
    assert!(display_name("").is_none());
}

/// Test the built-in voice table
#[test]
fn test_tts_voices_withCoveredLanguages_shouldListVoices() {
    let zh = tts_voices("zh_CN");
    assert_eq!(zh.len(), 2);
    assert_eq!(zh[0].value, "zh-CN-YunjianNeural");

    let en = tts_voices("en");
    assert_eq!(en.len(), 2);
    assert_eq!(en[1].display, "Aria");

    assert!(tts_voices("fr").is_empty());
}

/// Test the bilingual fallback pair
#[test]
fn test_default_languages_shouldCoverVoiceTable() {
    for lang in DEFAULT_LANGUAGES {
        assert!(!tts_voices(lang).is_empty());
    }
}
