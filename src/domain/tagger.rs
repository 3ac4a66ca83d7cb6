//! Word tagging: wrap free-standing word occurrences in `em` or `b`.
//!
//! An occurrence is free-standing when it starts the text or follows a space,
//! and is followed by end of text, a space, or a single punctuation mark
//! (`. , ; : ! ?`) that itself ends the text or precedes a space. A trailing
//! punctuation mark is wrapped together with the word.

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::DomTree;
use crate::domain::entities::WrapTag;

const PUNCTUATION: [char; 6] = ['.', ',', ';', ':', '!', '?'];

/// One piece of a split text leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text that stays a plain leaf
    Plain(&'a str),
    /// A qualifying occurrence, punctuation included
    Tagged(&'a str),
}

/// Split `text` into plain runs and free-standing occurrences of `word`.
///
/// Matching ignores case; the returned slices keep the original casing.
/// Empty plain runs are omitted.
pub fn split_occurrences<'a>(text: &'a str, word: &str) -> Vec<Segment<'a>> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let word: Vec<char> = word.chars().collect();
    if word.is_empty() {
        return vec![Segment::Plain(text)];
    }

    let byte_at = |pos: usize| chars.get(pos).map_or(text.len(), |&(offset, _)| offset);
    let mut segments = Vec::new();
    let mut run_start = 0;
    let mut pos = 0;

    while pos + word.len() <= chars.len() {
        match occurrence_end(&chars, &word, pos) {
            Some(end) => {
                if run_start < pos {
                    segments.push(Segment::Plain(&text[byte_at(run_start)..byte_at(pos)]));
                }
                segments.push(Segment::Tagged(&text[byte_at(pos)..byte_at(end)]));
                pos = end;
                run_start = end;
            }
            None => pos += 1,
        }
    }

    if run_start < chars.len() {
        segments.push(Segment::Plain(&text[byte_at(run_start)..]));
    }
    segments
}

/// End position (in chars) of a qualifying occurrence starting at `pos`.
fn occurrence_end(chars: &[(usize, char)], word: &[char], pos: usize) -> Option<usize> {
    if pos > 0 && chars[pos - 1].1 != ' ' {
        return None;
    }
    let candidate = chars.get(pos..pos + word.len())?;
    let matched = candidate
        .iter()
        .zip(word)
        .all(|(&(_, c), &w)| same_letter(c, w));
    if !matched {
        return None;
    }

    let after = pos + word.len();
    match chars.get(after).map(|&(_, c)| c) {
        None | Some(' ') => Some(after),
        Some(c) if PUNCTUATION.contains(&c) => match chars.get(after + 1).map(|&(_, c)| c) {
            None | Some(' ') => Some(after + 1),
            Some(_) => None,
        },
        Some(_) => None,
    }
}

fn same_letter(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

impl DomTree {
    /// Wrap every free-standing occurrence of `word` in `tag`.
    ///
    /// Empty arguments and tags other than `em` and `b` are ignored.
    #[instrument(level = "debug", skip(self))]
    pub fn add_tag(&mut self, word: &str, tag: &str) {
        if word.is_empty() || tag.is_empty() {
            debug!("empty word or tag, ignoring");
            return;
        }
        match WrapTag::parse(tag) {
            Some(kind) => self.add_tag_kind(word, kind),
            None => debug!(tag, "tag cannot wrap words, ignoring"),
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn add_tag_kind(&mut self, word: &str, tag: WrapTag) {
        if word.is_empty() {
            return;
        }

        // Collected up front so leaves created below are never rescanned
        let mut candidates: Vec<(Index, Index)> = Vec::new();
        for (parent, node) in self.iter() {
            if node.is_leaf() {
                continue;
            }
            for child in self.children(parent) {
                if self.is_leaf(child) {
                    candidates.push((parent, child));
                }
            }
        }

        let mut wrapped = 0usize;
        for (parent, leaf) in candidates {
            let Some(text) = self.label(leaf).map(str::to_string) else {
                continue;
            };
            let segments = split_occurrences(&text, word);
            let hits = segments
                .iter()
                .filter(|s| matches!(s, Segment::Tagged(_)))
                .count();
            if hits == 0 {
                continue;
            }

            trace!(?leaf, %text, hits, "splitting text leaf");
            let prev = self.previous_sibling(parent, leaf);
            let head = self.build_chain(&segments, tag);
            self.splice(parent, prev, leaf, head);
            wrapped += hits;
        }

        debug!(word, %tag, wrapped, "tagged words");
    }

    /// Allocate a detached sibling chain for `segments`, returning its head.
    fn build_chain(&mut self, segments: &[Segment<'_>], tag: WrapTag) -> Option<Index> {
        let mut head = None;
        let mut last: Option<Index> = None;

        for segment in segments {
            let idx = match *segment {
                Segment::Plain(text) => self.alloc(text),
                Segment::Tagged(text) => {
                    let wrapper = self.alloc(tag.as_str());
                    let inner = self.alloc(text);
                    if let Some(node) = self.get_node_mut(wrapper) {
                        node.first_child = Some(inner);
                    }
                    wrapper
                }
            };
            match last {
                Some(prev) => {
                    if let Some(node) = self.get_node_mut(prev) {
                        node.next_sibling = Some(idx);
                    }
                }
                None => head = Some(idx),
            }
            last = Some(idx);
        }

        head
    }
}
