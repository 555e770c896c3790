//! Trie over ASCII letters with 26 paths per node.
//!
//! Uppercase input is folded to lowercase. Removing a word only clears its
//! end-of-word flag; the nodes on its path stay allocated until the trie is
//! dropped, so a later insert of the same word reuses them.

use crate::error::TrieError;
use core::fmt;
use slotmap::{DefaultKey, SlotMap};

pub const TRIE_PATHS: usize = 26;

#[derive(Debug, Default)]
struct TrieNode {
    is_word: bool,
    paths: [Option<DefaultKey>; TRIE_PATHS],
}

pub struct Trie {
    nodes: SlotMap<DefaultKey, TrieNode>,
    root: DefaultKey,
    words: usize,
}

/// `a`/`A` -> 0 ... `z`/`Z` -> 25; `None` for anything else.
#[inline]
fn path_index(c: char) -> Option<usize> {
    c.is_ascii_alphabetic()
        .then(|| usize::from(c.to_ascii_lowercase() as u8 - b'a'))
}

impl Trie {
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(TrieNode::default());
        Self {
            nodes,
            root,
            words: 0,
        }
    }

    /// Number of distinct words stored.
    pub fn len(&self) -> usize {
        self.words
    }
    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    /// Allocated nodes, root included. Never shrinks on `remove`.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Store `word`. Returns `Ok(false)` if it was already present. The
    /// whole word is validated before any node is created.
    pub fn insert(&mut self, word: &str) -> Result<bool, TrieError> {
        let path = word
            .chars()
            .map(|ch| path_index(ch).ok_or(TrieError::NonAlphabetic { ch }))
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|e| tracing::warn!(error = %e, "failed to add word to trie"))?;

        let mut node = self.root;
        for i in path {
            node = match self.nodes[node].paths[i] {
                Some(child) => child,
                None => {
                    let child = self.nodes.insert(TrieNode::default());
                    self.nodes[node].paths[i] = Some(child);
                    child
                }
            };
        }

        let end = &mut self.nodes[node];
        if end.is_word {
            return Ok(false);
        }
        end.is_word = true;
        self.words += 1;
        tracing::trace!(
            words = self.words,
            nodes = self.nodes.len(),
            "inserted word"
        );
        Ok(true)
    }

    fn locate(&self, word: &str) -> Option<DefaultKey> {
        word.chars().try_fold(self.root, |node, ch| {
            let i = path_index(ch)?;
            self.nodes[node].paths[i]
        })
    }

    pub fn contains(&self, word: &str) -> bool {
        self.locate(word)
            .map(|k| self.nodes[k].is_word)
            .unwrap_or(false)
    }

    /// Clear the end-of-word flag for `word`. `false` if it was not stored.
    pub fn remove(&mut self, word: &str) -> bool {
        let Some(k) = self.locate(word) else {
            return false;
        };
        let node = &mut self.nodes[k];
        if !node.is_word {
            return false;
        }
        node.is_word = false;
        self.words -= 1;
        tracing::trace!(words = self.words, "removed word");
        true
    }

    /// All stored words in lexicographic order.
    pub fn words(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.words);
        let mut pending = vec![(self.root, String::new())];
        while let Some((k, prefix)) = pending.pop() {
            let node = &self.nodes[k];
            if node.is_word {
                out.push(prefix.clone());
            }
            // Reverse so `a` is popped before `z`.
            for (i, child) in node.paths.iter().enumerate().rev() {
                if let Some(child) = *child {
                    let mut next = prefix.clone();
                    next.push(char::from(b'a' + i as u8));
                    pending.push((child, next));
                }
            }
        }
        out
    }
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Trie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.words()).finish()
    }
}
