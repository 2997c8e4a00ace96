//! FASTA serializer: `>label` line followed by the unwrapped sequence.

use crate::model::AlignmentRecord;
use crate::writer::text_writer::TextWriter;
use std::io::{self, Write};

pub(crate) fn write_fasta<W: Write>(w: &mut TextWriter<W>, records: &[&AlignmentRecord]) -> io::Result<()> {
    for record in records {
        w.write_all(b">")?.line(&record.label)?.line(&record.sequence)?;
    }
    Ok(())
}
