//! Sequential PHYLIP serializer.
//!
//! ```text
//! 2 8
//! seqA          ACGTACGT
//! outgroup1     ACG-----
//! ```
//! The header holds NTAX and NCHAR. Each row is the label left-justified in a
//! column of (longest label + 10) characters, directly followed by the
//! sequence gap-padded to NCHAR. Column positions matter to downstream tools.

use crate::model::AlignmentRecord;
use crate::nexus::defs::PAD_CHAR;
use crate::writer::text_writer::TextWriter;
use crate::writer::DocumentContext;
use std::io::{self, Write};

pub(crate) fn write_phylip<W: Write>(
    w: &mut TextWriter<W>,
    records: &[&AlignmentRecord],
    ctx: &DocumentContext,
) -> io::Result<()> {
    let dims = ctx.dims;
    w.write_str(&dims.ntax.to_string())?
        .space()?
        .write_str(&dims.nchar.to_string())?
        .newline()?;

    for record in records {
        w.padded_label(&record.label, dims.label_column())?
            .padded_sequence(&record.sequence, dims.nchar, PAD_CHAR)?
            .newline()?;
    }
    Ok(())
}
