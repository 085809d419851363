/*!
 * Tests for deck assembly: layout decisions, captions and document shape
 */

use serde_json::json;
use slaide::deck::models::{CaptionGroup, DeckPayload, TriggerCaptions};
use slaide::deck::{DeckAssembler, DeckStyle};
use slaide::errors::AssemblyError;

fn assembler() -> DeckAssembler {
    DeckAssembler::new(DeckStyle::default())
}

fn caption(lang: &str, lines: &[&str]) -> CaptionGroup {
    let mut group = CaptionGroup::new();
    group.insert(
        lang.to_string(),
        lines.iter().map(|line| line.to_string()).collect(),
    );
    group
}

/// Test that a payload without a slides array is a hard error
#[test]
fn test_assemble_withMissingSlides_shouldFail() {
    let result = assembler().assemble(&json!({ "title": "t" }));
    assert!(matches!(result, Err(AssemblyError::MissingSlides)));

    let result = assembler().assemble(&json!({ "title": "t", "slides": null }));
    assert!(matches!(result, Err(AssemblyError::MissingSlides)));

    let result = assembler().assemble(&json!({ "title": "t", "slides": "not-a-list" }));
    assert!(matches!(result, Err(AssemblyError::MissingSlides)));
}

/// Test that the first slide carries the full deck header
#[test]
fn test_assemble_withCoverSlide_shouldEmitDeckHeader() {
    let outputs = json!({
        "title": "Streams 101",
        "slides": [
            { "page": 1, "slide": "# Streams 101\n", "subtitles": [ { "en": ["welcome"] } ] },
            { "page": 2, "slide": "body\n", "subtitles": [] }
        ]
    });

    let document = assembler().assemble(&outputs).unwrap();

    assert!(document.starts_with("---\npage: 1\n\ntheme: seriph\n"));
    assert!(document.contains("background: https://cover.sli.dev\n"));
    assert!(document.contains("title: \"Streams 101\"\n"));
    assert!(document.contains("titleTemplate: '%s - Slaide'\n"));
    assert!(document.contains("layout: cover\n"));
    assert!(document.contains("  ogTitle: \"Streams 101\"\n"));
    assert!(document.contains("addons:\n  - slidev-theme-viplay\n"));
    assert!(document.contains("subtitlesConfig:\n  noTTSDelay: 2000\n"));
    assert!(document.contains("  ttsApi: \"https://edgetts.deno.dev/v1/audio/speech\"\n"));
    assert!(document.contains("    en: \"English\"\n"));

    // The deck header appears on the cover only
    assert_eq!(document.matches("theme: seriph").count(), 1);
    assert!(document.contains("\n\n---\npage: 2\n"));
}

/// Test that a quote in the title cannot break the YAML header
#[test]
fn test_assemble_withQuotedTitle_shouldEscapeQuotes() {
    let outputs = json!({
        "title": "The \"Best\" Deck",
        "slides": [ { "page": 1, "slide": "x\n" } ]
    });

    let document = assembler().assemble(&outputs).unwrap();

    assert!(document.contains("title: \"The \\\"Best\\\" Deck\"\n"));
}

/// Test the single-column image layout and its parity tie-break
#[test]
fn test_assemble_withShortBody_shouldPickImageLayoutByParity() {
    let outputs = json!({
        "title": "t",
        "slides": [
            { "page": 1, "slide": "cover" },
            { "page": 2, "slide": "abc" },
            { "page": 3, "slide": "abcd" }
        ]
    });

    let document = assembler().assemble(&outputs).unwrap();

    // Odd body length goes image-left, even goes image-right
    assert!(document.contains("page: 2\n\nlayout: image-left\nimage: \"https://cover.sli.dev\"\n"));
    assert!(document.contains("page: 3\n\nlayout: image-right\nimage: \"https://cover.sli.dev\"\n"));
}

/// Test the two-column split of long bodies
#[test]
fn test_assemble_withLongBody_shouldSplitTwoColumns() {
    let body: String = (1..=12).map(|i| format!("p{}\n\n", i)).collect();
    let outputs = json!({
        "title": "t",
        "slides": [
            { "page": 1, "slide": "cover" },
            { "page": 2, "slide": body }
        ]
    });

    let document = assembler().assemble(&outputs).unwrap();

    assert!(document.contains("page: 2\n\nlayout: two-cols\n"));
    let left: String = (1..=6).map(|i| format!("p{}\n\n", i)).collect();
    let right: String = (7..=12).map(|i| format!("p{}\n\n", i)).collect();
    let expected_body = format!("{}\n\n::right::\n\n{}", left, right);
    assert!(document.contains(&expected_body));
}

/// Test caption regrouping into trigger keys
#[test]
fn test_assemble_withSubtitles_shouldRegroupByTrigger() {
    let outputs = json!({
        "title": "t",
        "slides": [
            {
                "page": 1,
                "slide": "cover",
                "subtitles": [
                    { "en": ["one **bold**"] },
                    { "en": ["two"] },
                    { "en": ["three"] }
                ]
            }
        ]
    });

    let document = assembler().assemble(&outputs).unwrap();

    assert!(document.contains("subtitles: {\"default\":{\"en\":[\"one bold\"]}"));
    assert!(document.contains("\"click1\":{\"en\":[\"two\"]}"));
    assert!(document.contains("\"click2\":{\"en\":[\"three\"]}"));

    // Trigger keys keep reveal order in the serialized object
    let default_at = document.find("\"default\"").unwrap();
    let click1_at = document.find("\"click1\"").unwrap();
    let click2_at = document.find("\"click2\"").unwrap();
    assert!(default_at < click1_at && click1_at < click2_at);
}

/// Test that a slide without captions emits no caption block at all
#[test]
fn test_assemble_withoutSubtitles_shouldOmitCaptionBlock() {
    let outputs = json!({
        "title": "t",
        "slides": [
            { "page": 1, "slide": "cover" },
            { "page": 2, "slide": "plain", "subtitles": [] }
        ]
    });

    let document = assembler().assemble(&outputs).unwrap();

    assert!(!document.contains("subtitles: {"));
}

/// Test that embedded slide separators are stripped from bodies
#[test]
fn test_assemble_withEmbeddedSeparators_shouldStripThem() {
    let outputs = json!({
        "title": "t",
        "slides": [
            { "page": 1, "slide": "cover" },
            { "page": 2, "slide": "a\n---\nb" }
        ]
    });

    let document = assembler().assemble(&outputs).unwrap();

    assert!(document.ends_with("\n---\n\nab"));
}

/// Test tolerance of a caption/reveal-block count mismatch
#[test]
fn test_assemble_withCaptionMismatch_shouldStillEmitAllGroups() {
    // Three caption groups but zero reveal blocks in the body
    let outputs = json!({
        "title": "t",
        "slides": [
            {
                "page": 1,
                "slide": "no reveals here",
                "subtitles": [
                    { "en": ["a"] },
                    { "en": ["b"] },
                    { "en": ["c"] }
                ]
            }
        ]
    });

    let document = assembler().assemble(&outputs).unwrap();

    assert!(document.contains("\"click2\":{\"en\":[\"c\"]}"));
}

/// Test defaulting of absent slide fields
#[test]
fn test_payload_withMissingFields_shouldDefault() {
    let outputs = json!({ "slides": [ { "slide": "x" } ] });

    let payload = DeckPayload::from_outputs(&outputs).unwrap();
    assert_eq!(payload.title, "");
    assert_eq!(payload.slides.len(), 1);
    assert_eq!(payload.slides[0].page, 0);
    assert!(payload.slides[0].subtitles.is_empty());

    let document = assembler().assemble(&outputs).unwrap();
    assert!(document.starts_with("---\npage: 0\n"));
}

/// Test the trigger re-keying in isolation
#[test]
fn test_trigger_captions_withOrderedGroups_shouldKeyByRevealIndex() {
    let groups = vec![
        caption("en", &["base"]),
        caption("en", &["first reveal"]),
        caption("en", &["second reveal"]),
    ];

    let captions = TriggerCaptions::from_subtitles(&groups);
    let keys: Vec<&str> = captions.trigger_keys().collect();
    assert_eq!(keys, vec!["default", "click1", "click2"]);

    assert!(TriggerCaptions::from_subtitles(&[]).is_empty());
}
