//! Chaining helpers shared by all alignment and block writers.

use std::io::{self, BufWriter, Write};

// =#========================================================================#=
// TEXT WRITER
// =#========================================================================#=
/// Buffered writer with small chainable helpers (`space`, `tab`, `newline`,
/// …), each returning itself so a line can be written in one expression:
///
/// ```ignore
/// // "\tDIMENSIONS NTAX=3;"
/// w.tab()?.write_all(DIMENSIONS)?.space()?.write_all(NTAX)?.equals()?.write_str("3")?.semicolon_ln()?;
/// ```
pub(crate) struct TextWriter<W: Write> {
    bw: BufWriter<W>,
}

impl<W: Write> TextWriter<W> {
    pub(crate) fn new(inner: W) -> Self {
        TextWriter { bw: BufWriter::new(inner) }
    }

    /// Appends a byte slice, returning itself for chaining.
    pub(crate) fn write_all(&mut self, buf: &[u8]) -> io::Result<&mut Self> {
        self.bw.write_all(buf)?;
        Ok(self)
    }

    /// Appends a string, returning itself for chaining.
    pub(crate) fn write_str(&mut self, s: &str) -> io::Result<&mut Self> {
        self.write_all(s.as_bytes())
    }

    /// Appends a string followed by a newline, returning itself for chaining.
    pub(crate) fn line(&mut self, s: &str) -> io::Result<&mut Self> {
        self.write_str(s)?.newline()
    }

    /// Appends a space character (' '), returning itself for chaining.
    pub(crate) fn space(&mut self) -> io::Result<&mut Self> {
        self.write_all(b" ")
    }

    /// Appends a tab character ('\t'), returning itself for chaining.
    pub(crate) fn tab(&mut self) -> io::Result<&mut Self> {
        self.write_all(b"\t")
    }

    /// Appends a newline character ('\n'), returning itself for chaining.
    pub(crate) fn newline(&mut self) -> io::Result<&mut Self> {
        self.write_all(b"\n")
    }

    /// Appends a semicolon (';'), returning itself for chaining.
    pub(crate) fn semicolon(&mut self) -> io::Result<&mut Self> {
        self.write_all(b";")
    }

    /// Appends a semicolon followed by a newline (';\n'), returning itself for chaining.
    pub(crate) fn semicolon_ln(&mut self) -> io::Result<&mut Self> {
        self.semicolon()?.newline()
    }

    /// Appends an equals sign ('='), returning itself for chaining.
    pub(crate) fn equals(&mut self) -> io::Result<&mut Self> {
        self.write_all(b"=")
    }

    /// Appends `label` left-justified in a field of `width` characters.
    pub(crate) fn padded_label(&mut self, label: &str, width: usize) -> io::Result<&mut Self> {
        let field = format!("{label:<width$}");
        self.write_str(&field)
    }

    /// Appends `sequence` right-padded with `pad` up to `width` characters.
    pub(crate) fn padded_sequence(&mut self, sequence: &str, width: usize, pad: char) -> io::Result<&mut Self> {
        self.write_str(sequence)?;
        for _ in sequence.len()..width {
            let mut buf = [0u8; 4];
            self.write_str(pad.encode_utf8(&mut buf))?;
        }
        Ok(self)
    }

    /// Flushes the buffer to the underlying writer.
    pub(crate) fn flush(&mut self) -> io::Result<()> {
        self.bw.flush()
    }
}
