use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

/// State of the editable control a floating-label widget wraps.
///
/// Offsets are byte indices into `text`, always on char boundaries.
/// `TextInput` only edits; lifecycle dispatch belongs to the owning widget.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    selection: Range<usize>,
    editing: bool,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let end = text.len();
        Self {
            text,
            selection: end..end,
            editing: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    pub fn caret_index(&self) -> usize {
        self.selection.end
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub(crate) fn set_editing(&mut self, editing: bool) {
        self.editing = editing;
    }

    /// Replaces `text` wholesale, caret at the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        let end = self.text.len();
        self.selection = end..end;
    }

    pub fn replace_range(&mut self, range: Range<usize>, text: &str) {
        let mut start = clamp_to_char_boundary(&self.text, range.start);
        let mut end = clamp_to_char_boundary(&self.text, range.end);
        if end < start {
            std::mem::swap(&mut start, &mut end);
        }
        self.text.replace_range(start..end, text);
        let new_pos = start + text.len();
        self.selection = new_pos..new_pos;
    }

    pub fn insert_text(&mut self, text: &str) {
        self.replace_range(self.selection(), text);
    }

    /// What a backspace would remove: the selection, or the grapheme before
    /// the caret. `None` at the start of the text with nothing selected.
    pub fn backspace_range(&self) -> Option<Range<usize>> {
        let start = self.selection.start.min(self.text.len());
        let end = self.selection.end.min(self.text.len());
        if start != end {
            return Some(start.min(end)..start.max(end));
        }
        if end == 0 {
            return None;
        }
        Some(prev_grapheme_boundary(&self.text, end)..end)
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.selection = 0..0;
    }

    pub fn select(&mut self, range: Range<usize>) {
        let start = clamp_to_char_boundary(&self.text, range.start);
        let end = clamp_to_char_boundary(&self.text, range.end);
        self.selection = start..end;
    }

    pub fn select_all(&mut self) {
        self.selection = 0..self.text.len();
    }

    pub fn selected_text(&self) -> &str {
        let start = self.selection.start.min(self.selection.end);
        let end = self.selection.start.max(self.selection.end);
        &self.text[start..end]
    }
}

fn prev_grapheme_boundary(text: &str, byte: usize) -> usize {
    let mut last = 0usize;
    for (i, _) in text.grapheme_indices(true) {
        if i >= byte {
            break;
        }
        last = i;
    }
    last
}

fn clamp_to_char_boundary(s: &str, i: usize) -> usize {
    if i >= s.len() {
        return s.len();
    }
    // walk back to previous valid boundary
    let mut j = i;
    while j > 0 && !s.is_char_boundary(j) {
        j -= 1;
    }
    j
}
