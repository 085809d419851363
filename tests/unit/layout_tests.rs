/*!
 * Tests for the display-line counter and column splitter
 */

use slaide::deck::layout::{count_display_lines, count_reveal_blocks, split_by_display_lines};

// Reference fixtures carried over from the original pipeline's test suite
const TEST_STRING1: &str = "\n这是一个段落1\n<div v-click=\"1\">\n这里是 div 内容 1\n</div>\n这是一个段落2，带一个换行符\n在这里\n<div v-click=\"99\">\n\n多行内容\n\n</div>\n这是一个段落3，带两个换行符\n\n在这里\n<div>普通 div 1\n换行\n</div>\n这是段落4\n<div v-click=\"5\">单行内容</div>\n<div v-click=\"2\">\n内容后没有换行</div>\n前面没有换行\n</div>\n结尾文本\n";
const TEST_STRING2: &str =
    "LineA\nLineB\n<div v-click=\"1\">\n\nContentC\n\n</div>LineD\n\nLineE<div>RegularF</div>LineG";
const TEST_STRING3: &str = "Line1\nLine2<div v-click=\"1\">\nContent\n</div>Line3";
const TEST_STRING4: &str = "abc\n\ndef\n\n";

/// Test the reference counts of the fixture bodies
#[test]
fn test_count_display_lines_withReferenceBodies_shouldMatchKnownCounts() {
    assert_eq!(count_display_lines(TEST_STRING1), 16);
    assert_eq!(count_display_lines(TEST_STRING2), 4);
    assert_eq!(count_display_lines(TEST_STRING3), 3);
    assert_eq!(count_display_lines(TEST_STRING4), 2);
}

/// Test that reveal wrapper markup does not inflate the count while its
/// inner breaks still count
#[test]
fn test_count_display_lines_withRevealWrapper_shouldCollapseWrapperOnly() {
    // Wrapper plus padding collapses into the surrounding runs
    assert_eq!(count_display_lines("a\n\n<div v-click=\"1\">\n\nx\n\n</div>b\n\n"), 3);
    // Inner content breaks count normally
    assert_eq!(
        count_display_lines("a\n\n<div v-click=\"1\">\n\nx\n\ny\n\n</div>b\n\n"),
        4
    );
    // An ordinary div is plain text, its newlines count as-is
    assert_eq!(count_display_lines("a\n<div>\nx\n</div>\nb"), 4);
}

/// Test that an unpadded reveal block does not qualify as a wrapper
#[test]
fn test_count_display_lines_withUnpaddedReveal_shouldCountLiterally() {
    // No newline after the open tag or before the close tag
    assert_eq!(count_display_lines("<div v-click=\"1\">inline</div>"), 0);
    assert_eq!(count_display_lines("a\n<div v-click=\"1\">inline</div>\nb"), 2);
}

/// Test detection of reveal blocks used for the caption invariant
#[test]
fn test_count_reveal_blocks_withMixedMarkup_shouldCountOnlyQualifiedBlocks() {
    assert_eq!(count_reveal_blocks(TEST_STRING4), 0);
    assert_eq!(count_reveal_blocks(TEST_STRING2), 1);
    assert_eq!(count_reveal_blocks("<div v-click=\"1\">inline</div>"), 0);
    assert_eq!(
        count_reveal_blocks("<div v-click=\"1\">\nx\n</div><div v-click=\"2\">\ny\n</div>"),
        2
    );
}

/// Test the documented split example
#[test]
fn test_split_withSimpleBody_shouldSplitAfterTargetRun() {
    let split = split_by_display_lines(TEST_STRING4, 1, 2);
    assert_eq!(split.left, "abc\n\n");
    assert_eq!(split.right, "def\n\n");
}

/// Test that no characters are created or lost by a split
#[test]
fn test_split_withReferenceBody_shouldConserveLength() {
    let total = count_display_lines(TEST_STRING1);
    let split = split_by_display_lines(TEST_STRING1, total / 2, total);
    assert_eq!(split.left.len() + split.right.len(), TEST_STRING1.len());

    let total = count_display_lines(TEST_STRING2);
    let split = split_by_display_lines(TEST_STRING2, total.div_ceil(2), total);
    assert_eq!(split.left.len() + split.right.len(), TEST_STRING2.len());
}

/// Test the degenerate targets: everything stays in the left column
#[test]
fn test_split_withDegenerateTargets_shouldKeepBodyLeft() {
    let split = split_by_display_lines(TEST_STRING4, 0, 2);
    assert_eq!(split.left, TEST_STRING4);
    assert_eq!(split.right, "");

    let split = split_by_display_lines(TEST_STRING4, 2, 2);
    assert_eq!(split.left, TEST_STRING4);
    assert_eq!(split.right, "");

    let split = split_by_display_lines(TEST_STRING4, 5, 2);
    assert_eq!(split.left, TEST_STRING4);
    assert_eq!(split.right, "");
}

/// Test that a reveal wrapper is stepped over as one atomic unit
#[test]
fn test_split_withWrapperBeforeBoundary_shouldSkipWrapperWhole() {
    let body = "a\n\n<div v-click=\"1\">\n\nx\n\ny\n\n</div>b\n\nc\n\n";
    let total = count_display_lines(body);
    assert_eq!(total, 5);

    // The walker skips the wrapper without counting its inner runs, so the
    // second counted run is the one after `b`
    let split = split_by_display_lines(body, 2, total);
    assert_eq!(split.left, "a\n\n<div v-click=\"1\">\n\nx\n\ny\n\n</div>b\n\n");
    assert_eq!(split.right, "c\n\n");
    assert_eq!(split.left.len() + split.right.len(), body.len());
}

/// Test the re-concatenation invariance when no wrapper straddles the cut
#[test]
fn test_split_withCleanBoundary_shouldPreserveTotalCount() {
    let body = "p1\n\np2\n\np3\n\np4\n\n";
    let total = count_display_lines(body);
    assert_eq!(total, 4);

    let split = split_by_display_lines(body, 2, total);
    assert_eq!(
        count_display_lines(&split.left) + count_display_lines(&split.right),
        total
    );
    assert_eq!(split.left, "p1\n\np2\n\n");
    assert_eq!(split.right, "p3\n\np4\n\n");
}

/// Test splitting multi-byte content away from char boundaries of interest
#[test]
fn test_split_withMultibyteBody_shouldSplitOnCharBoundary() {
    let body = "第一段落\n\n第二段落\n\n第三段落\n\n";
    let total = count_display_lines(body);
    assert_eq!(total, 3);

    let split = split_by_display_lines(body, 2, total);
    assert_eq!(split.left, "第一段落\n\n第二段落\n\n");
    assert_eq!(split.right, "第三段落\n\n");
}
