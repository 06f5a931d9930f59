//! Static lookup tables for known English spelling confusions.
//!
//! Order matters: the first matching entry wins.

use super::{doubled_letter_omitted, unnecessary_double_letter};
use crate::types::PatternType;

/// Where a confusable fragment may appear in the correct word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Anywhere,
    End,
}

/// A set of spellings that are commonly swapped for one another.
#[derive(Debug)]
pub struct Confusion {
    pub description: &'static str,
    pub spellings: &'static [&'static str],
    pub anchor: Anchor,
    /// One side of the swap must be the first spelling.
    pub hub: bool,
}

#[derive(Debug)]
pub enum PhoneticRule {
    Swap(Confusion),
    /// Any consonant written once instead of twice, or twice instead of once.
    DoubledConsonant,
}

pub static PHONETIC_RULES: &[PhoneticRule] = &[
    PhoneticRule::Swap(Confusion {
        description: "ie/ei confusion",
        spellings: &["ie", "ei"],
        anchor: Anchor::Anywhere,
        hub: false,
    }),
    PhoneticRule::Swap(Confusion {
        description: "silent e",
        spellings: &["e", ""],
        anchor: Anchor::End,
        hub: false,
    }),
    PhoneticRule::DoubledConsonant,
    PhoneticRule::Swap(Confusion {
        description: "ph/f confusion",
        spellings: &["ph", "f"],
        anchor: Anchor::Anywhere,
        hub: false,
    }),
    PhoneticRule::Swap(Confusion {
        description: "ough spelling",
        spellings: &["ough", "uff", "off", "ow", "oe", "o", "oo", "u", "aw"],
        anchor: Anchor::Anywhere,
        hub: true,
    }),
    PhoneticRule::Swap(Confusion {
        description: "tion/sion confusion",
        spellings: &["tion", "sion", "ssion", "cion", "shun"],
        anchor: Anchor::Anywhere,
        hub: true,
    }),
    PhoneticRule::Swap(Confusion {
        description: "ck/k/c confusion",
        spellings: &["ck", "k", "c"],
        anchor: Anchor::Anywhere,
        hub: false,
    }),
    PhoneticRule::Swap(Confusion {
        description: "gh spelling",
        spellings: &["gh", "g", "f", ""],
        anchor: Anchor::Anywhere,
        hub: true,
    }),
];

/// Spellings of one vowel sound.
#[derive(Debug)]
pub struct VowelSound {
    pub name: &'static str,
    pub spellings: &'static [&'static str],
}

/// Checked in order; schwa is last since any single vowel can stand for it.
pub static VOWEL_SOUNDS: &[VowelSound] = &[
    VowelSound { name: "long a", spellings: &["a", "ai", "ei", "ea"] },
    VowelSound { name: "long e", spellings: &["e", "ee", "ea", "ie", "ei"] },
    VowelSound { name: "long i", spellings: &["i", "ie"] },
    VowelSound { name: "long o", spellings: &["o", "oa", "oe", "ou"] },
    VowelSound { name: "long u", spellings: &["u", "oo", "ue", "ou"] },
    VowelSound { name: "schwa", spellings: &["a", "e", "i", "o", "u"] },
];

pub fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn is_consonant(c: char) -> bool {
    c.is_alphabetic() && !is_vowel(c)
}

/// Run the phonetic table against a case-folded pair.
pub fn match_phonetic(correct: &str, attempt: &str) -> Option<(PatternType, String)> {
    PHONETIC_RULES.iter().find_map(|rule| match rule {
        PhoneticRule::Swap(confusion) => confusion
            .reproduces(correct, attempt)
            .then(|| (PatternType::Phonetic, confusion.description.to_string())),
        PhoneticRule::DoubledConsonant => match_doubled_consonant(correct, attempt),
    })
}

impl Confusion {
    /// Whether swapping one occurrence of a spelling for another alternative
    /// turns the correct word into the attempt.
    fn reproduces(&self, correct: &str, attempt: &str) -> bool {
        self.spellings.iter().any(|from| {
            self.occurrences(correct, from).into_iter().any(|start| {
                self.alternatives(from).any(|to| {
                    let end = start + from.len();
                    correct.len() - from.len() + to.len() == attempt.len()
                        && attempt.starts_with(&correct[..start])
                        && attempt[start..].starts_with(to)
                        && attempt[start + to.len()..] == correct[end..]
                })
            })
        })
    }

    fn alternatives<'a>(&'a self, from: &'a str) -> impl Iterator<Item = &'static str> + 'a {
        let canonical = self.spellings[0];
        self.spellings
            .iter()
            .copied()
            .filter(move |to| *to != from)
            .filter(move |to| !self.hub || from == canonical || *to == canonical)
    }

    fn occurrences(&self, word: &str, fragment: &str) -> Vec<usize> {
        match self.anchor {
            Anchor::End if word.ends_with(fragment) => vec![word.len() - fragment.len()],
            Anchor::End => Vec::new(),
            Anchor::Anywhere if fragment.is_empty() => Vec::new(),
            Anchor::Anywhere => word.match_indices(fragment).map(|(i, _)| i).collect(),
        }
    }
}

fn match_doubled_consonant(correct: &str, attempt: &str) -> Option<(PatternType, String)> {
    let c: Vec<char> = correct.chars().collect();
    let a: Vec<char> = attempt.chars().collect();

    if c.len() == a.len() + 1 {
        if let Some(letter) = collapsed_double(&c, &a) {
            return Some((PatternType::Doubling, doubled_letter_omitted(letter)));
        }
    } else if a.len() == c.len() + 1 {
        if let Some(letter) = collapsed_double(&a, &c) {
            return Some((PatternType::Doubling, unnecessary_double_letter(letter)));
        }
    }
    None
}

/// Find a doubled consonant in `long` whose collapse yields `short`.
fn collapsed_double(long: &[char], short: &[char]) -> Option<char> {
    (0..long.len().saturating_sub(1)).find_map(|i| {
        let letter = long[i];
        (letter == long[i + 1]
            && is_consonant(letter)
            && long[..i] == short[..i]
            && long[i + 1..] == short[i..])
            .then_some(letter)
    })
}

/// Step two: differing vowel subsequences.
pub fn match_vowel_pattern(correct: &str, attempt: &str) -> Option<(PatternType, String)> {
    let correct_vowels: String = correct.chars().filter(|c| is_vowel(*c)).collect();
    let attempt_vowels: String = attempt.chars().filter(|c| is_vowel(*c)).collect();
    if correct_vowels == attempt_vowels {
        return None;
    }

    let c: Vec<char> = correct.chars().collect();
    let a: Vec<char> = attempt.chars().collect();
    let (old, new) = differing_vowel_cluster(&c, &a);

    let named = VOWEL_SOUNDS.iter().find(|sound| {
        sound.spellings.contains(&old.as_str()) && sound.spellings.contains(&new.as_str())
    });
    let description = match named {
        Some(sound) => format!("{} vowel confusion ({} → {})", sound.name, old, new),
        None => format!("vowel sequence error: {} → {}", correct_vowels, attempt_vowels),
    };
    Some((PatternType::Vowel, description))
}

/// The differing middle of the two words, widened to whole vowel clusters.
fn differing_vowel_cluster(c: &[char], a: &[char]) -> (String, String) {
    let shorter = c.len().min(a.len());
    let prefix = c.iter().zip(a).take_while(|(x, y)| x == y).count();
    let suffix = c
        .iter()
        .rev()
        .zip(a.iter().rev())
        .take(shorter - prefix)
        .take_while(|(x, y)| x == y)
        .count();

    let mut start = prefix;
    while start > 0 && is_vowel(c[start - 1]) {
        start -= 1;
    }
    let mut end_c = c.len() - suffix;
    let mut end_a = a.len() - suffix;
    while end_c < c.len() && is_vowel(c[end_c]) {
        end_c += 1;
        end_a += 1;
    }

    (
        c[start..end_c].iter().collect(),
        a[start..end_a].iter().collect(),
    )
}
