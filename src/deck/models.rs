/*!
 * Payload types decoded from the terminal workflow event.
 */

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::errors::AssemblyError;

/// Language code to ordered caption lines, for one reveal step of a slide
pub type CaptionGroup = BTreeMap<String, Vec<String>>;

/// One slide as produced by the upstream workflow.
///
/// Position in `subtitles` is significant: index 0 binds to the slide's
/// always-visible content, index i > 0 to the i-th reveal block.
#[derive(Debug, Clone, Deserialize)]
pub struct SlideDraft {
    /// Page number carried into the front-matter
    #[serde(default)]
    pub page: i64,

    /// Markdown body of the slide
    #[serde(default)]
    pub slide: String,

    /// Ordered bilingual caption groups
    #[serde(default)]
    pub subtitles: Vec<CaptionGroup>,
}

/// Decoded `outputs` object of a finished workflow
#[derive(Debug, Clone, Deserialize)]
pub struct DeckPayload {
    /// Deck title, used only on the cover slide
    #[serde(default)]
    pub title: String,

    /// Ordered slide list
    pub slides: Vec<SlideDraft>,
}

impl DeckPayload {
    /// Decode the outputs value captured from the stream.
    ///
    /// The absence of a `slides` array is the one hard precondition of
    /// assembly; every other field is defaulted when missing.
    pub fn from_outputs(outputs: &Value) -> Result<Self, AssemblyError> {
        if !outputs.get("slides").is_some_and(Value::is_array) {
            return Err(AssemblyError::MissingSlides);
        }
        Ok(serde_json::from_value(outputs.clone())?)
    }
}

/// Caption groups re-keyed by reveal trigger.
///
/// Serializes as a JSON object in insertion order: `default` first, then
/// `click1`, `click2`, ... matching the reveal sequence of the slide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerCaptions(Vec<(String, CaptionGroup)>);

impl TriggerCaptions {
    /// Re-key an ordered subtitles array: index 0 becomes the `default`
    /// trigger, index i becomes `click{i}`
    pub fn from_subtitles(subtitles: &[CaptionGroup]) -> Self {
        let groups = subtitles
            .iter()
            .enumerate()
            .map(|(index, group)| {
                let key = if index == 0 {
                    "default".to_string()
                } else {
                    format!("click{}", index)
                };
                (key, group.clone())
            })
            .collect();
        Self(groups)
    }

    /// True when the slide carried no caption groups at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Trigger keys in reveal order
    pub fn trigger_keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(key, _)| key.as_str())
    }
}

impl Serialize for TriggerCaptions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, group) in &self.0 {
            map.serialize_entry(key, group)?;
        }
        map.end()
    }
}
