//! Subject-block segmentation.
//!
//! A subject block is the contiguous run of entries acting on one
//! NPC/object/item/widget instance. Unrelated subjects may be interleaved in
//! the host's list (two same-named NPCs each contribute their own run), so
//! identity is the subject text plus its opaque back-reference.

use menuki_protocol::Entry;

/// True when `a` and `b` act on the same subject instance.
///
/// Entries with neither subject text nor a back-reference (Cancel,
/// Walk here) never group; each is its own singleton block.
pub fn same_block(a: &Entry, b: &Entry) -> bool {
    let (name, subject_ref) = a.subject_id();
    if name.is_empty() && subject_ref.is_none() {
        return false;
    }
    a.subject_id() == b.subject_id()
}

/// Inclusive bounds of the subject block containing `index`.
pub fn block_bounds(entries: &[Entry], index: usize) -> (usize, usize) {
    let mut start = index;
    let mut end = index;
    while start > 0 && same_block(&entries[start - 1], &entries[index]) {
        start -= 1;
    }
    while end + 1 < entries.len() && same_block(&entries[end + 1], &entries[index]) {
        end += 1;
    }
    (start, end)
}
