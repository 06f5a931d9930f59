//! Classification from the edit script, plus the transposition fallback.

use super::{doubled_letter_omitted, unnecessary_double_letter};
use crate::diff::{edit_script, EditRun, EditTag};
use crate::types::PatternType;

/// Non-equal runs of the edit script, with adjacent swaps cancelled out.
///
/// A swap of two neighbouring letters shows up as a one-letter delete and a
/// matching one-letter insert on either side of a single equal letter. Those
/// triples are dropped here and left to the transposition check.
pub(super) fn significant_runs(correct: &[char], attempt: &[char]) -> Vec<EditRun> {
    let runs = edit_script(correct, attempt);
    let mut kept = Vec::new();
    let mut i = 0;
    while i < runs.len() {
        if i + 2 < runs.len() && is_swap(&runs[i..i + 3], correct, attempt) {
            i += 3;
            continue;
        }
        if runs[i].tag != EditTag::Equal {
            kept.push(runs[i].clone());
        }
        i += 1;
    }
    kept
}

fn is_swap(triple: &[EditRun], correct: &[char], attempt: &[char]) -> bool {
    let (first, middle, last) = (&triple[0], &triple[1], &triple[2]);
    if middle.tag != EditTag::Equal || middle.old.len() != 1 {
        return false;
    }
    match (first.tag, last.tag) {
        (EditTag::Delete, EditTag::Insert) => {
            first.old.len() == 1
                && last.new.len() == 1
                && correct[first.old.start] == attempt[last.new.start]
        }
        (EditTag::Insert, EditTag::Delete) => {
            first.new.len() == 1
                && last.old.len() == 1
                && attempt[first.new.start] == correct[last.old.start]
        }
        _ => false,
    }
}

/// Classify each run; the first non-generic candidate wins.
pub(super) fn classify_runs(
    runs: &[EditRun],
    correct: &[char],
    attempt: &[char],
) -> Option<(PatternType, String)> {
    let mut candidates: Vec<(PatternType, String)> = Vec::new();
    // Single-letter substitutions waiting to be grouped: (position, old, new).
    let mut pending: Vec<(usize, char, char)> = Vec::new();

    for run in runs {
        let old = &correct[run.old.clone()];
        let new = &attempt[run.new.clone()];
        match run.tag {
            EditTag::Equal => continue,
            EditTag::Replace if old.len() == new.len() => {
                for (k, (o, n)) in old.iter().zip(new).enumerate() {
                    let position = run.old.start + k;
                    if pending.last().is_some_and(|(p, _, _)| p + 1 != position) {
                        flush_substitutions(&mut pending, &mut candidates);
                    }
                    pending.push((position, *o, *n));
                }
                continue;
            }
            _ => {}
        }

        flush_substitutions(&mut pending, &mut candidates);
        candidates.push(match run.tag {
            EditTag::Replace if old.len() == 2 && old[0] == old[1] && new.len() == 1 => {
                (PatternType::Doubling, doubled_letter_omitted(old[0]))
            }
            EditTag::Replace if old.len() == 1 && new.len() == 2 && new[0] == new[1] => {
                (PatternType::Doubling, unnecessary_double_letter(new[0]))
            }
            EditTag::Replace => (
                PatternType::Substitution,
                format!("incorrect letters: {} → {}", text(old), text(new)),
            ),
            EditTag::Delete if old.len() == 1 && has_twin(correct, run.old.start) => {
                (PatternType::Doubling, doubled_letter_omitted(old[0]))
            }
            EditTag::Delete => (
                PatternType::Deletion,
                format!("missing letter(s): {}", text(old)),
            ),
            EditTag::Insert if new.len() == 1 && has_twin(attempt, run.new.start) => {
                (PatternType::Doubling, unnecessary_double_letter(new[0]))
            }
            EditTag::Insert => (
                PatternType::Insertion,
                format!("extra letter(s): {}", text(new)),
            ),
            EditTag::Equal => unreachable!("equal runs are skipped above"),
        });
    }
    flush_substitutions(&mut pending, &mut candidates);

    candidates
        .into_iter()
        .find(|(pattern_type, _)| *pattern_type != PatternType::Other)
}

fn flush_substitutions(
    pending: &mut Vec<(usize, char, char)>,
    candidates: &mut Vec<(PatternType, String)>,
) {
    match pending.len() {
        0 => {}
        1 => {
            let (_, old, new) = pending[0];
            candidates.push((
                PatternType::Substitution,
                format!("incorrect letter: {} → {}", old, new),
            ));
        }
        _ => {
            let old: String = pending.iter().map(|(_, o, _)| o).collect();
            let new: String = pending.iter().map(|(_, _, n)| n).collect();
            candidates.push((
                PatternType::Sequence,
                format!("letter sequence mismatch: {} → {}", old, new),
            ));
        }
    }
    pending.clear();
}

/// Whether the letter at `index` has an identical neighbour.
fn has_twin(word: &[char], index: usize) -> bool {
    let letter = word[index];
    (index > 0 && word[index - 1] == letter) || word.get(index + 1) == Some(&letter)
}

fn text(chars: &[char]) -> String {
    chars.iter().collect()
}

/// Adjacent letter swaps between two words of the same length.
pub(super) fn find_transpositions(correct: &[char], attempt: &[char]) -> Option<(PatternType, String)> {
    if correct.len() != attempt.len() {
        return None;
    }
    let mut swaps = Vec::new();
    let mut i = 0;
    while i + 1 < correct.len() {
        if correct[i] != correct[i + 1]
            && correct[i] == attempt[i + 1]
            && correct[i + 1] == attempt[i]
        {
            swaps.push(text(&correct[i..i + 2]));
            i += 2;
        } else {
            i += 1;
        }
    }
    if swaps.is_empty() {
        None
    } else {
        Some((
            PatternType::Transposition,
            format!("letter swap: {}", swaps.join(", ")),
        ))
    }
}
