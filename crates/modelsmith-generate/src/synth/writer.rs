/// Line-oriented source builder with four-space indentation.
#[derive(Debug, Default)]
pub struct SourceWriter {
    buf: String,
    depth: usize,
}

impl SourceWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one line at the current depth; an empty line carries no indent.
    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.buf.push_str("    ");
            }
            self.buf.push_str(text);
        }
        self.buf.push('\n');
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.line("")
    }

    /// Write a line and indent what follows.
    pub fn open(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.line(text);
        self.depth += 1;
        self
    }

    /// Dedent and write a closing line.
    pub fn close(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self.line(text)
    }

    /// Dedent, write a line, and indent again (`) -> T {`, `} else {`).
    pub fn reopen(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self.open(text)
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

/// Render `value` as a Rust string literal.
pub fn string_literal(value: &str) -> String {
    format!("{value:?}")
}

/// Collapse line breaks so catalog text can sit in a `//` or `///` comment.
pub fn comment_text(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}
