/*!
 * Slide-deck derivation from workflow outputs.
 *
 * The module is split the same way the data flows:
 * - `models`: the payload types decoded from the terminal workflow event
 * - `layout`: pure text-layout helpers (display-line counting, column split)
 * - `assembler`: per-slide layout decision, caption regrouping and the
 *   final document join
 */

pub mod assembler;
pub mod layout;
pub mod models;

pub use assembler::{DeckAssembler, DeckStyle, TWO_COLUMN_THRESHOLD};
pub use layout::{count_display_lines, split_by_display_lines, ColumnSplit};
pub use models::{CaptionGroup, DeckPayload, SlideDraft, TriggerCaptions};
