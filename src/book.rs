//! Opening book: a trie of recorded move sequences.
//!
//! Lines are either a bare sequence (`F5D6C3`) or `Name | sequence`;
//! `#` comments and blank lines are ignored. Tokens are normalized to
//! uppercase, so histories in the case-encoded form (`F5d6C3`) match.
//! Malformed lines are skipped with a warning and loading continues.
//!
//! The book is immutable once loaded and can be shared read-only.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::{Board, Move};

/// How to pick among several legal book moves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BookPolicy {
    /// Uniformly at random
    #[default]
    Random,
    /// First in token order, for reproducible play
    First,
}

/// A skipped opening-book line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookParseWarning {
    /// Nothing left after removing the name
    EmptySequence { line: usize },
    /// Sequence length is not a whole number of tokens
    OddLength { line: usize, len: usize },
    /// A token is not a file letter followed by a rank digit
    InvalidToken { line: usize, token: String },
}

impl fmt::Display for BookParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookParseWarning::EmptySequence { line } => {
                write!(f, "Book line {line}: empty move sequence")
            }
            BookParseWarning::OddLength { line, len } => {
                write!(f, "Book line {line}: sequence length {len} is not a multiple of 2")
            }
            BookParseWarning::InvalidToken { line, token } => {
                write!(f, "Book line {line}: invalid move token '{token}'")
            }
        }
    }
}

impl std::error::Error for BookParseWarning {}

/// Failure to read a book file.
#[derive(Debug)]
pub enum BookError {
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for BookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookError::Io { path, source } => {
                write!(f, "Failed reading opening book {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for BookError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BookError::Io { source, .. } => Some(source),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct BookNode {
    /// Uppercase token -> child node index
    children: BTreeMap<String, usize>,
    /// A recorded line ends here
    is_terminal: bool,
}

/// Trie of opening lines plus the names recorded for them.
#[derive(Debug, Clone)]
pub struct OpeningBook {
    nodes: Vec<BookNode>, // nodes[0] is the root
    /// Original-case sequence -> opening name
    names: BTreeMap<String, String>,
    lines: usize,
}

impl Default for OpeningBook {
    fn default() -> Self {
        OpeningBook {
            nodes: vec![BookNode::default()],
            names: BTreeMap::new(),
            lines: 0,
        }
    }
}

/// Split a sequence into uppercase tokens, validating each one.
fn tokenize(sequence: &str, line: usize) -> Result<Vec<String>, BookParseWarning> {
    let compact: String = sequence.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(BookParseWarning::EmptySequence { line });
    }
    let chars: Vec<char> = compact.chars().collect();
    if chars.len() % 2 != 0 {
        return Err(BookParseWarning::OddLength {
            line,
            len: chars.len(),
        });
    }
    chars
        .chunks(2)
        .map(|pair| {
            let token: String = pair.iter().collect::<String>().to_ascii_uppercase();
            match token.parse::<Move>() {
                Ok(_) => Ok(token),
                Err(_) => Err(BookParseWarning::InvalidToken { line, token }),
            }
        })
        .collect()
}

/// History tokens, uppercased. `None` if the history is malformed.
fn history_tokens(history: &str) -> Option<Vec<String>> {
    if history.is_empty() {
        return Some(Vec::new());
    }
    tokenize(history, 0).ok()
}

impl OpeningBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse book text, logging and skipping malformed lines.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut book = OpeningBook::new();
        book.load_lines(text.lines());
        book
    }

    /// The small book compiled into the crate.
    #[must_use]
    pub fn builtin() -> Self {
        Self::parse(include_str!("data/openings.txt"))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, BookError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| BookError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    /// Add lines to the book. Returns the warnings for skipped lines, which
    /// are also logged.
    pub fn load_lines<I, S>(&mut self, lines: I) -> Vec<BookParseWarning>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut warnings = Vec::new();
        for (idx, raw) in lines.into_iter().enumerate() {
            let line = raw.as_ref().trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Err(warning) = self.insert_line(line, idx + 1) {
                log::warn!("{warning}; line skipped");
                warnings.push(warning);
            }
        }
        warnings
    }

    fn insert_line(&mut self, line: &str, line_number: usize) -> Result<(), BookParseWarning> {
        let (name, sequence) = match line.split_once('|') {
            Some((name, sequence)) => (Some(name.trim()), sequence.trim()),
            None => (None, line),
        };
        let tokens = tokenize(sequence, line_number)?;

        let mut node = 0;
        for token in tokens {
            node = match self.nodes[node].children.get(&token) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(BookNode::default());
                    self.nodes[node].children.insert(token, child);
                    child
                }
            };
        }
        if !self.nodes[node].is_terminal {
            self.nodes[node].is_terminal = true;
            self.lines += 1;
        }

        if let Some(name) = name.filter(|n| !n.is_empty()) {
            let key: String = sequence.chars().filter(|c| !c.is_whitespace()).collect();
            self.names.insert(key, name.to_string());
        }
        Ok(())
    }

    fn descend(&self, history: &str) -> Option<usize> {
        let mut node = 0;
        for token in history_tokens(history)? {
            node = *self.nodes[node].children.get(&token)?;
        }
        Some(node)
    }

    /// Book continuations after `history`, in token order. Empty when the
    /// history has left the book.
    #[must_use]
    pub fn moves_at(&self, history: &str) -> Vec<Move> {
        self.descend(history)
            .map(|node| {
                self.nodes[node]
                    .children
                    .keys()
                    .filter_map(|token| token.parse().ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether a recorded line ends exactly at `history`.
    #[must_use]
    pub fn is_line_end(&self, history: &str) -> bool {
        self.descend(history)
            .is_some_and(|node| self.nodes[node].is_terminal)
    }

    /// Names whose sequence is a prefix of `history` or extends it,
    /// ignoring case. Ordered by sequence.
    #[must_use]
    pub fn opening_names_matching(&self, history: &str) -> Vec<&str> {
        let history = history.to_ascii_uppercase();
        self.names
            .iter()
            .filter(|(sequence, _)| {
                let sequence = sequence.to_ascii_uppercase();
                sequence.starts_with(&history) || history.starts_with(&sequence)
            })
            .map(|(_, name)| name.as_str())
            .collect()
    }

    /// A legal book move for `board`, chosen per `policy`.
    pub fn choose_move<R: Rng + ?Sized>(
        &self,
        board: &Board,
        policy: BookPolicy,
        rng: &mut R,
    ) -> Option<Move> {
        let candidates: Vec<Move> = self
            .moves_at(board.history())
            .into_iter()
            .filter(|&mv| board.is_legal_move(mv))
            .collect();
        match policy {
            BookPolicy::First => candidates.first().copied(),
            BookPolicy::Random => candidates.choose(rng).copied(),
        }
    }

    /// Number of recorded lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines == 0
    }
}
