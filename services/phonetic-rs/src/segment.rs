//! Segmentation of transcriptions into phoneme sequences.
//!
//! Two transcription systems are supported:
//!
//! - **ASJP**: one ASCII character per phoneme, with the modifiers `*`
//!   (nasalized) and `"` (glottalized) attaching to the previous phoneme,
//!   and the ligature markers `~` and `$` fusing the previous two or three
//!   phonemes into a single symbol (`ts~`, `kxh$`).
//! - **IPA**: extended grapheme clusters, with tie bars joining the
//!   following cluster and spacing modifier letters (`ʰ`, `ː`, ...) attaching
//!   to the previous one.
//!
//! Segmentation is total: characters outside the alphabet become their own
//! symbol. Such symbols only ever match themselves, which can inflate
//! distances, but they are never an error.

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Transcription system of the input strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transcription {
    /// ASCII phonetic alphabet of the Automated Similarity Judgment Program.
    #[default]
    Asjp,
    /// International Phonetic Alphabet, segmented on grapheme clusters.
    Ipa,
}

impl fmt::Display for Transcription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asjp => write!(f, "asjp"),
            Self::Ipa => write!(f, "ipa"),
        }
    }
}

/// Ordered, immutable sequence of phoneme symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PhonemeSequence {
    symbols: Vec<String>,
}

impl PhonemeSequence {
    pub fn new(symbols: Vec<String>) -> Self {
        Self { symbols }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }

    pub fn into_symbols(self) -> Vec<String> {
        self.symbols
    }
}

impl Index<usize> for PhonemeSequence {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.symbols[index]
    }
}

impl<S: Into<String>> FromIterator<S> for PhonemeSequence {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// Splits raw transcriptions into [`PhonemeSequence`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tokenizer {
    transcription: Transcription,
}

impl Tokenizer {
    pub fn new(transcription: Transcription) -> Self {
        Self { transcription }
    }

    pub fn transcription(&self) -> Transcription {
        self.transcription
    }

    /// Segment a transcription. Characters without a rule, whitespace
    /// included, become symbols of their own.
    pub fn tokenize(&self, input: &str) -> PhonemeSequence {
        let symbols = match self.transcription {
            Transcription::Asjp => tokenize_asjp(input),
            Transcription::Ipa => tokenize_ipa(input),
        };
        PhonemeSequence::new(symbols)
    }
}

fn tokenize_asjp(input: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::with_capacity(input.len());

    for ch in input.chars() {
        match ch {
            '*' | '"' => match tokens.last_mut() {
                Some(last) => last.push(ch),
                None => tokens.push(ch.to_string()),
            },
            '~' => fuse_last(&mut tokens, 2, ch),
            '$' => fuse_last(&mut tokens, 3, ch),
            _ => tokens.push(ch.to_string()),
        }
    }

    tokens
}

/// Replace the last `n` tokens (or as many as exist) by their concatenation
/// followed by `marker`.
fn fuse_last(tokens: &mut Vec<String>, n: usize, marker: char) {
    let start = tokens.len().saturating_sub(n);
    let mut fused: String = tokens.drain(start..).collect();
    fused.push(marker);
    tokens.push(fused);
}

const TIE_BARS: [char; 2] = ['\u{0361}', '\u{035C}'];

fn is_ipa_modifier(grapheme: &str) -> bool {
    let mut chars = grapheme.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => matches!(
            c,
            'ʰ' | 'ʱ' | 'ʷ' | 'ʲ' | 'ˠ' | 'ˤ' | 'ⁿ' | 'ˡ' | 'ː' | 'ˑ' | 'ʼ'
        ),
        _ => false,
    }
}

fn ends_with_tie(grapheme: &str) -> bool {
    grapheme.chars().last().is_some_and(|c| TIE_BARS.contains(&c))
}

fn is_blank(grapheme: &str) -> bool {
    grapheme.chars().all(char::is_whitespace)
}

fn tokenize_ipa(input: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let mut join_next = false;

    for grapheme in input.graphemes(true) {
        let attach = !is_blank(grapheme) && (join_next || is_ipa_modifier(grapheme));
        match tokens.last_mut() {
            Some(last) if attach => last.push_str(grapheme),
            _ => tokens.push(grapheme.to_string()),
        }
        join_next = ends_with_tie(grapheme);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asjp(s: &str) -> Vec<String> {
        Tokenizer::new(Transcription::Asjp).tokenize(s).into_symbols()
    }

    fn ipa(s: &str) -> Vec<String> {
        Tokenizer::new(Transcription::Ipa).tokenize(s).into_symbols()
    }

    #[test]
    fn test_plain_asjp() {
        assert_eq!(asjp("pater"), vec!["p", "a", "t", "e", "r"]);
        assert_eq!(asjp("fE3r"), vec!["f", "E", "3", "r"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(asjp("").is_empty());
        assert!(ipa("").is_empty());
    }

    #[test]
    fn test_asjp_modifiers() {
        assert_eq!(asjp("a*n"), vec!["a*", "n"]);
        assert_eq!(asjp("k\"a"), vec!["k\"", "a"]);
        assert_eq!(asjp("ts~a"), vec!["ts~", "a"]);
        assert_eq!(asjp("kxh$u"), vec!["kxh$", "u"]);
    }

    #[test]
    fn test_asjp_modifier_without_base() {
        assert_eq!(asjp("*a"), vec!["*", "a"]);
        assert_eq!(asjp("~a"), vec!["~", "a"]);
        assert_eq!(asjp("t~"), vec!["t~"]);
    }

    #[test]
    fn test_whitespace_is_a_symbol() {
        assert_eq!(asjp("a b"), vec!["a", " ", "b"]);
        assert_eq!(asjp("t ~"), vec!["t ~"]);
        assert_eq!(ipa("a b"), vec!["a", " ", "b"]);
        assert_eq!(ipa("t\u{0361} s"), vec!["t\u{0361}", " ", "s"]);
    }

    #[test]
    fn test_unknown_characters_pass_through() {
        assert_eq!(asjp("a#b"), vec!["a", "#", "b"]);
    }

    #[test]
    fn test_ipa_modifiers_and_ties() {
        assert_eq!(ipa("pʰater"), vec!["pʰ", "a", "t", "e", "r"]);
        assert_eq!(ipa("t\u{0361}sa"), vec!["t\u{0361}s", "a"]);
        assert_eq!(ipa("aːɛ"), vec!["aː", "ɛ"]);
    }

    #[test]
    fn test_sequence_indexing() {
        let seq = Tokenizer::default().tokenize("ab");
        assert_eq!(seq.len(), 2);
        assert_eq!(&seq[1], "b");
    }
}
