//! Character-level edit script between two spellings.
//!
//! Aligns the strings on a longest common subsequence and reports the
//! differences as runs, in the same spirit as a classic line diff:
//! matched, replaced, deleted (only in the correct word) and inserted
//! (only in the attempt).

use std::ops::Range;

use similar::{capture_diff_slices, Algorithm, DiffTag};

/// Kind of an edit run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTag {
    Equal,
    Replace,
    Delete,
    Insert,
}

impl From<DiffTag> for EditTag {
    fn from(tag: DiffTag) -> Self {
        match tag {
            DiffTag::Equal => EditTag::Equal,
            DiffTag::Delete => EditTag::Delete,
            DiffTag::Insert => EditTag::Insert,
            DiffTag::Replace => EditTag::Replace,
        }
    }
}

/// One run of the edit script. `old` indexes the correct word, `new` the attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRun {
    pub tag: EditTag,
    pub old: Range<usize>,
    pub new: Range<usize>,
}

/// Compute the edit script turning `a` into `b`.
///
/// Adjacent deletes and inserts come back as a single replace.
pub fn edit_script(a: &[char], b: &[char]) -> Vec<EditRun> {
    capture_diff_slices(Algorithm::Lcs, a, b)
        .iter()
        .map(|op| {
            let (tag, old, new) = op.as_tag_tuple();
            EditRun {
                tag: tag.into(),
                old,
                new,
            }
        })
        .filter(|run| !(run.old.is_empty() && run.new.is_empty()))
        .collect()
}
