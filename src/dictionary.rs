// Fadeno – A solver for Strands-style word puzzles
// Copyright (C) 2026  Neil Roberts
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use std::num::NonZeroUsize;

// Words shorter than this are dropped while building the dictionary
pub const MIN_WORD_LENGTH: usize = 4;

// The trie is stored as a list of nodes where each node links to its
// first child and its next sibling. The first entry in the list is
// the root node. Its letter should be ignored.
struct Node {
    letter: char,
    terminal: bool,

    // Index of the first child if there is one
    first_child: Option<NonZeroUsize>,
    // Index of the next sibling if there is one
    next_sibling: Option<NonZeroUsize>,
}

impl Node {
    fn new(letter: char) -> Node {
        Node {
            letter,
            terminal: false,
            first_child: None,
            next_sibling: None,
        }
    }
}

pub struct Dictionary {
    nodes: Vec<Node>,
    n_words: usize,
}

impl Dictionary {
    pub fn new() -> Dictionary {
        Dictionary {
            nodes: vec![Node::new('*')],
            n_words: 0,
        }
    }

    // Builds a dictionary from the lines of a word list. Each line is
    // trimmed and uppercased; anything that still contains a
    // character outside of A-Z, or that is shorter than
    // MIN_WORD_LENGTH, is skipped. Duplicate words are harmless.
    pub fn build<I>(lines: I) -> Dictionary
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut dictionary = Dictionary::new();

        for line in lines {
            if let Some(word) = normalize_word(line.as_ref()) {
                dictionary.add_word(&word);
            }
        }

        dictionary
    }

    fn add_word(&mut self, word: &str) {
        let mut node = 0;

        for ch in word.chars() {
            node = 'find_node: {
                let mut child = self.nodes[node].first_child;

                while let Some(this_child) = child {
                    if self.nodes[this_child.get()].letter == ch {
                        break 'find_node this_child.get();
                    }

                    child = self.nodes[this_child.get()].next_sibling;
                }

                let new_node_pos = self.nodes.len();
                let mut new_node = Node::new(ch);

                let old_node = &mut self.nodes[node];

                new_node.next_sibling = old_node.first_child;
                old_node.first_child = NonZeroUsize::new(new_node_pos);
                // The nodes list is never empty, so the new_node_pos
                // shouldn’t be zero
                assert!(old_node.first_child.is_some());

                self.nodes.push(new_node);

                new_node_pos
            };
        }

        if !self.nodes[node].terminal {
            self.nodes[node].terminal = true;
            self.n_words += 1;
        }
    }

    // Follows the letters down from the root, returning the index of
    // the node reached or None if the walk falls off the trie
    fn walk(&self, letters: &str) -> Option<usize> {
        let mut node = 0;

        for ch in letters.chars() {
            let mut child = self.nodes[node].first_child;

            node = loop {
                let this_child = child?;

                if self.nodes[this_child.get()].letter == ch {
                    break this_child.get();
                }

                child = self.nodes[this_child.get()].next_sibling;
            };
        }

        Some(node)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.walk(word).map(|node| self.nodes[node].terminal)
            .unwrap_or(false)
    }

    // Whether any word in the dictionary starts with the given
    // letters. A word counts as a prefix of itself.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.n_words > 0 && self.walk(prefix).is_some()
    }

    pub fn len(&self) -> usize {
        self.n_words
    }

    pub fn is_empty(&self) -> bool {
        self.n_words == 0
    }
}

fn normalize_word(line: &str) -> Option<String> {
    let word = line.trim();

    if word.len() < MIN_WORD_LENGTH {
        return None;
    }

    let mut normalized = String::with_capacity(word.len());

    for ch in word.chars() {
        let ch = ch.to_ascii_uppercase();

        if !ch.is_ascii_uppercase() {
            return None;
        }

        normalized.push(ch);
    }

    Some(normalized)
}
