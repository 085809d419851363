/*!
 * Pure text-layout helpers for slide bodies.
 *
 * A "display-line run" is a maximal sequence of consecutive newline
 * characters, counted once regardless of length. Reveal wrappers (numbered
 * click-to-reveal blocks) are special-cased so their markup does not
 * inflate the count while their inner content still counts normally.
 */

use once_cell::sync::Lazy;
use regex::Regex;

// Matches only a reveal block whose content carries newline padding on both
// sides; an unpadded block is left untouched and counts as literal text.
static REVEAL_BLOCK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<div v-click="\d+">\n+(.*?)\n+</div>"#).unwrap()
});

static NEWLINE_RUN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").unwrap());

/// Result of a two-column split. Concatenating `left` and `right` always
/// reproduces the original body byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSplit {
    /// Content of the left column
    pub left: String,
    /// Remainder for the right column
    pub right: String,
}

/// Count the visible paragraph breaks of a markdown body.
///
/// Each reveal wrapper collapses to its content padded by a single newline
/// on each side, merging with any surrounding blank lines into one run.
pub fn count_display_lines(body: &str) -> usize {
    let collapsed = REVEAL_BLOCK_REGEX.replace_all(body, "\n$1\n");
    NEWLINE_RUN_REGEX.find_iter(&collapsed).count()
}

/// Count the reveal wrapper blocks in a body
pub fn count_reveal_blocks(body: &str) -> usize {
    REVEAL_BLOCK_REGEX.find_iter(body).count()
}

/// Partition `body` so that the left part holds exactly `target` display-line
/// runs and the right part is the remainder.
///
/// The walker steps over a reveal wrapper starting at the cursor as one
/// atomic unit: its internal newlines are never run boundaries, and the
/// whole block lands on whichever side the walk had not yet crossed.
/// With `target == 0` or `target >= total` the entire body stays left.
pub fn split_by_display_lines(body: &str, target: usize, total: usize) -> ColumnSplit {
    if target == 0 || target >= total {
        return ColumnSplit {
            left: body.to_string(),
            right: String::new(),
        };
    }

    // The wrapper pattern is non-overlapping by construction, so one
    // left-to-right sweep collects every span the walker must skip.
    let wrappers: Vec<(usize, usize)> = REVEAL_BLOCK_REGEX
        .find_iter(body)
        .map(|m| (m.start(), m.end()))
        .collect();

    let bytes = body.as_bytes();
    let mut split_index = body.len();
    let mut runs = 0usize;
    let mut wrapper = 0usize;
    let mut i = 0usize;

    while i < bytes.len() {
        while wrapper < wrappers.len() && wrappers[wrapper].0 < i {
            wrapper += 1;
        }
        if wrapper < wrappers.len() && wrappers[wrapper].0 == i {
            i = wrappers[wrapper].1;
            wrapper += 1;
            continue;
        }
        if bytes[i] == b'\n' {
            // Consume the whole run; the split lands right after it
            while i < bytes.len() && bytes[i] == b'\n' {
                i += 1;
            }
            runs += 1;
            if runs == target {
                split_index = i;
                break;
            }
        } else {
            i += 1;
        }
    }

    // A newline is single-byte, so split_index is always a char boundary
    let (left, right) = body.split_at(split_index);
    ColumnSplit {
        left: left.to_string(),
        right: right.to_string(),
    }
}
