use crate::config::OutputOptions;

/// The text being edited.
///
/// Stored in one canonical form: the lines (without terminators) plus a flag
/// recording whether the text ended with a terminator. The flat buffer is
/// produced on demand by [`Document::to_text`] for the operations that need
/// it, and `Document::from_text(d.to_text())` always gives `d` back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
    trailing_terminator: bool,
    terminator: String,
}

impl Document {
    /// Split `text` into lines on `terminator`. Empty text has no lines.
    pub fn from_text(text: &str, terminator: &str) -> Self {
        let (body, trailing_terminator) = match text.strip_suffix(terminator) {
            Some(body) if !terminator.is_empty() => (body, true),
            _ => (text, false),
        };

        let lines = if text.is_empty() {
            Vec::new()
        } else if terminator.is_empty() {
            vec![body.to_string()]
        } else {
            body.split(terminator).map(str::to_string).collect()
        };

        Self {
            lines,
            trailing_terminator,
            terminator: terminator.to_string(),
        }
    }

    /// Build the initial document for a run, applying the input-side
    /// normalization from `output`.
    pub fn load(text: &str, output: &OutputOptions) -> Self {
        let terminator = output.line_terminator.as_str();
        if output.normalize_trailing_terminator && !text.ends_with(terminator) {
            let mut normalized = String::with_capacity(text.len() + terminator.len());
            normalized.push_str(text);
            normalized.push_str(terminator);
            Self::from_text(&normalized, terminator)
        } else {
            Self::from_text(text, terminator)
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn has_trailing_terminator(&self) -> bool {
        self.trailing_terminator
    }

    /// The document as one flat buffer.
    pub fn to_text(&self) -> String {
        let mut text = self.lines.join(&self.terminator);
        if self.trailing_terminator {
            text.push_str(&self.terminator);
        }
        text
    }

    /// A new document holding `text`, split with this document's terminator.
    pub fn with_text(&self, text: &str) -> Self {
        Self::from_text(text, &self.terminator)
    }

    /// A new document made of `lines`, as produced by a line-oriented
    /// operation. Lines that picked up a terminator are split apart, and every
    /// resulting line is terminated.
    pub fn with_lines<I>(&self, lines: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut split = Vec::new();
        for line in lines {
            if self.terminator.is_empty() || !line.contains(self.terminator.as_str()) {
                split.push(line);
            } else {
                split.extend(line.split(self.terminator.as_str()).map(str::to_string));
            }
        }

        Self {
            trailing_terminator: !split.is_empty(),
            lines: split,
            terminator: self.terminator.clone(),
        }
    }

    /// Render the final output text.
    pub fn serialize(&self, output: &OutputOptions) -> String {
        let mut text = self.to_text();
        if output.force_no_trailing_terminator && !self.terminator.is_empty() {
            if let Some(body) = text.strip_suffix(self.terminator.as_str()) {
                text.truncate(body.len());
            }
        }
        text
    }
}
