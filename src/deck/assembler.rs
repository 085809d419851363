/*!
 * Deck assembly: turns the decoded slide list into one Slidev document.
 *
 * The first slide always gets the cover layout and carries the deck-level
 * header (theme, background, subtitle-engine configuration). Every other
 * slide is measured with the display-line counter: short bodies get an
 * image-augmented single column, long ones are split into two synchronized
 * columns.
 */

use std::collections::BTreeSet;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::caption_lang;
use crate::deck::layout;
use crate::deck::models::{DeckPayload, SlideDraft, TriggerCaptions};
use crate::errors::AssemblyError;

/// Bodies with fewer display-line runs than this keep a single column
pub const TWO_COLUMN_THRESHOLD: usize = 10;

/// Visual defaults carried into the deck header and image layouts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckStyle {
    /// Slidev theme name
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Cover background URL
    #[serde(default = "default_background")]
    pub background: String,

    /// Illustration URL for image-left/image-right slides
    #[serde(default = "default_image")]
    pub image: String,

    /// Browser title template
    #[serde(default = "default_title_template")]
    pub title_template: String,

    /// Endpoint of the subtitle TTS service
    #[serde(default = "default_tts_api")]
    pub tts_api: String,
}

fn default_theme() -> String {
    "seriph".to_string()
}

fn default_background() -> String {
    "https://cover.sli.dev".to_string()
}

fn default_image() -> String {
    "https://cover.sli.dev".to_string()
}

fn default_title_template() -> String {
    "%s - Slaide".to_string()
}

fn default_tts_api() -> String {
    "https://edgetts.deno.dev/v1/audio/speech".to_string()
}

impl Default for DeckStyle {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            background: default_background(),
            image: default_image(),
            title_template: default_title_template(),
            tts_api: default_tts_api(),
        }
    }
}

/// Assembles the final deck document from workflow outputs
#[derive(Debug, Clone, Default)]
pub struct DeckAssembler {
    style: DeckStyle,
}

impl DeckAssembler {
    /// Create an assembler with the given visual style
    pub fn new(style: DeckStyle) -> Self {
        Self { style }
    }

    /// Assemble directly from the outputs value captured off the stream
    pub fn assemble(&self, outputs: &Value) -> Result<String, AssemblyError> {
        let payload = DeckPayload::from_outputs(outputs)?;
        self.assemble_payload(&payload)
    }

    /// Assemble a decoded payload into one ordered document text
    pub fn assemble_payload(&self, payload: &DeckPayload) -> Result<String, AssemblyError> {
        let languages = caption_languages(&payload.slides);
        let mut fragments = Vec::with_capacity(payload.slides.len());
        for (index, draft) in payload.slides.iter().enumerate() {
            fragments.push(self.render_slide(index, draft, &payload.title, &languages)?);
        }
        Ok(fragments.join("\n\n"))
    }

    fn render_slide(
        &self,
        index: usize,
        draft: &SlideDraft,
        title: &str,
        languages: &BTreeSet<String>,
    ) -> Result<String, AssemblyError> {
        // Embedded slide separators would break the page structure
        let mut body = draft.slide.replace("\n---\n", "");

        let headmatter = if index == 0 {
            self.cover_headmatter(title, languages)
        } else {
            self.content_headmatter(&mut body)
        };

        if !draft.subtitles.is_empty() {
            let reveal_blocks = layout::count_reveal_blocks(&draft.slide);
            if reveal_blocks + 1 != draft.subtitles.len() {
                // Tolerated: extra captions are still emitted, missing ones leave gaps
                debug!(
                    "Slide {}: {} reveal blocks but {} caption groups",
                    draft.page,
                    reveal_blocks,
                    draft.subtitles.len()
                );
            }
        }

        let captions = TriggerCaptions::from_subtitles(&draft.subtitles);
        let subtitles_line = if captions.is_empty() {
            String::new()
        } else {
            let json = serde_json::to_string(&captions)?;
            format!("subtitles: {}", json.replace("**", ""))
        };

        Ok(format!(
            "---\npage: {}\n{}{}\n---\n\n{}",
            draft.page, headmatter, subtitles_line, body
        ))
    }

    /// Deck-level header, emitted only for the first slide
    fn cover_headmatter(&self, title: &str, languages: &BTreeSet<String>) -> String {
        let title = escape_quoted(title);
        let mut head = format!(
            "\ntheme: {}\nbackground: {}\ntitle: \"{}\"\ntitleTemplate: '{}'\nlayout: cover\npresenter: dev\nseoMeta:\n  ogTitle: \"{}\"\naddons:\n  - slidev-theme-viplay\n",
            self.style.theme, self.style.background, title, self.style.title_template, title
        );

        head.push_str("subtitlesConfig:\n  noTTSDelay: 2000\n");
        head.push_str(&format!("  ttsApi: \"{}\"\n", self.style.tts_api));
        head.push_str("  ttsLangName:\n");
        for lang in languages {
            let name = caption_lang::display_name(lang).unwrap_or_else(|| lang.clone());
            head.push_str(&format!("    {}: \"{}\"\n", lang, name));
        }
        head.push_str("  apiCustom:\n    voice: 'rate:-0.2|pitch:0.1'\n  ttsModel:\n");
        for lang in languages {
            let voices = caption_lang::tts_voices(lang);
            if voices.is_empty() {
                continue;
            }
            head.push_str(&format!("    {}:\n", lang));
            for voice in voices {
                head.push_str(&format!(
                    "      - value: \"{}\"\n        display: \"{}\"\n",
                    voice.value, voice.display
                ));
            }
        }
        head
    }

    /// Layout decision for non-cover slides; rewrites the body in place
    /// when it is split into two columns
    fn content_headmatter(&self, body: &mut String) -> String {
        let count = layout::count_display_lines(body);
        if count < TWO_COLUMN_THRESHOLD {
            // Parity of the body length alternates the image side
            let side = if body.chars().count() % 2 == 1 {
                "image-left"
            } else {
                "image-right"
            };
            format!("\nlayout: {}\nimage: \"{}\"\n", side, self.style.image)
        } else {
            let split = layout::split_by_display_lines(body, count.div_ceil(2), count);
            *body = format!("{}\n\n::right::\n\n{}", split.left, split.right);
            "\nlayout: two-cols\n".to_string()
        }
    }
}

/// Caption languages observed across the deck, with a bilingual default
/// when no slide carries captions
fn caption_languages(slides: &[SlideDraft]) -> BTreeSet<String> {
    let languages: BTreeSet<String> = slides
        .iter()
        .flat_map(|slide| slide.subtitles.iter())
        .flat_map(|group| group.keys().cloned())
        .collect();
    if languages.is_empty() {
        caption_lang::DEFAULT_LANGUAGES
            .iter()
            .map(|lang| lang.to_string())
            .collect()
    } else {
        languages
    }
}

fn escape_quoted(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
