//! Line-block model for emitted source text.
//!
//! Lines carry an indentation depth instead of literal spaces, so nested
//! blocks compose by shifting depths and the indent width is applied once
//! when rendering. Blank lines never carry indentation.

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Blank,
    Text { depth: usize, text: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeBlock {
    lines: Vec<Line>,
}

impl CodeBlock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a line at `depth` levels. An empty `text` is pushed as a blank line.
    pub fn line(&mut self, depth: usize, text: impl Into<String>) {
        let text: String = text.into();
        if text.is_empty() {
            self.lines.push(Line::Blank);
        } else {
            self.lines.push(Line::Text { depth, text });
        }
    }

    pub fn blank(&mut self) {
        self.lines.push(Line::Blank);
    }

    /// Append `block` as a unit, indented `level` levels deeper.
    pub fn append(&mut self, block: Self, level: usize) {
        self.lines
            .extend(block.lines.into_iter().map(|line| match line {
                Line::Blank => Line::Blank,
                Line::Text { depth, text } => Line::Text {
                    depth: depth + level,
                    text,
                },
            }));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Render with `indent` spaces per level, lines joined by `line_break`.
    /// No line break is added after the last line.
    #[must_use]
    pub fn render(&self, indent: usize, line_break: &str) -> String {
        let mut result: String = String::new();
        for (index, line) in self.lines.iter().enumerate() {
            if index > 0 {
                result.push_str(line_break);
            }
            if let Line::Text { depth, text } = line {
                result.extend(std::iter::repeat_n(' ', depth * indent));
                result.push_str(text);
            }
        }
        result
    }
}
