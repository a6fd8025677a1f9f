//! Line-oriented, indent-tracked source buffer (spec §4.1). Grounded on
//! the original `proto-codegen` `CodeGenerator`'s `push_indent`/`buf:
//! String` discipline, generalized into a reusable type so every plugin
//! shares one writer per output file instead of re-deriving indentation
//! by hand.

const INDENT: &str = "    ";

#[derive(Debug, Default)]
pub struct Writer {
    buf: String,
    depth: u32,
}

/// An opaque checkpoint returned by [`Writer::snapshot`]; passing it to
/// [`Writer::restore`] discards everything written since.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot {
    buf_len: usize,
    depth: u32,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Concatenates `tokens` onto one line, prefixed by the current
    /// indent, and terminates it with a newline.
    pub fn emit(&mut self, tokens: &[&str]) {
        for _ in 0..self.depth {
            self.buf.push_str(INDENT);
        }
        for token in tokens {
            self.buf.push_str(token);
        }
        self.buf.push('\n');
    }

    /// Convenience for the common case of a single already-assembled
    /// line (possibly itself containing no further concatenation).
    pub fn emit_line(&mut self, line: impl AsRef<str>) {
        self.emit(&[line.as_ref()]);
    }

    /// A blank line, still useful as a paragraph break between emitted
    /// items; does not receive indentation.
    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn outdent(&mut self) {
        assert!(self.depth > 0, "outdent() without a matching indent()");
        self.depth -= 1;
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            buf_len: self.buf.len(),
            depth: self.depth,
        }
    }

    pub fn restore(&mut self, snapshot: Snapshot) {
        self.buf.truncate(snapshot.buf_len);
        self.depth = snapshot.depth;
    }

    /// Flushes the buffer, asserting every `indent` was matched by an
    /// `outdent` (spec §4.1 guarantee).
    pub fn finish(self) -> String {
        assert_eq!(
            self.depth, 0,
            "source-writer flushed with unmatched indent() calls"
        );
        self.buf
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indents_nested_blocks() {
        let mut w = Writer::new();
        w.emit_line("fn foo() {");
        w.indent();
        w.emit_line("bar();");
        w.outdent();
        w.emit_line("}");
        assert_eq!(w.finish(), "fn foo() {\n    bar();\n}\n");
    }

    #[test]
    #[should_panic(expected = "unmatched indent")]
    fn finish_panics_on_unmatched_indent() {
        let mut w = Writer::new();
        w.indent();
        let _ = w.finish();
    }

    #[test]
    fn snapshot_restore_discards_speculative_output() {
        let mut w = Writer::new();
        w.emit_line("kept");
        let snap = w.snapshot();
        w.emit_line("speculative");
        w.restore(snap);
        w.emit_line("also kept");
        assert_eq!(w.finish(), "kept\nalso kept\n");
    }

    #[test]
    fn emit_concatenates_tokens_on_one_line() {
        let mut w = Writer::new();
        w.emit(&["pub fn ", "Set", "Foo", "(", ")"]);
        assert_eq!(w.finish(), "pub fn SetFoo()\n");
    }
}
