//! MEGA serializer.

use crate::model::AlignmentRecord;
use crate::transform::wrap;
use crate::writer::text_writer::TextWriter;
use crate::writer::DocumentContext;
use std::io::{self, Write};

/// Fixed format directive; sequences are always declared as DNA
const MEGA_FORMAT: &str = "!Format DataType=DNA indel=-;";

/// Writes `#mega`, `!Title <title>;`, the format directive, then per record a
/// `#label` line, the sequence (wrapped if a width is set) and a blank line.
pub(crate) fn write_mega<W: Write>(
    w: &mut TextWriter<W>,
    records: &[&AlignmentRecord],
    ctx: &DocumentContext,
) -> io::Result<()> {
    w.line("#mega")?
        .write_str("!Title ")?
        .write_str(&ctx.options.title)?
        .semicolon_ln()?
        .line(MEGA_FORMAT)?;

    for record in records {
        let body = match ctx.options.wrap_width {
            Some(width) => wrap(&record.sequence, width),
            None => record.sequence.clone(),
        };
        w.write_all(b"#")?.line(&record.label)?.line(&body)?.newline()?;
    }
    Ok(())
}
