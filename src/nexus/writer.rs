//! NEXUS DATA block writer (for [AlignmentRecord]s).

use crate::model::AlignmentRecord;
use crate::nexus::defs::{BLOCK_BEGIN, BLOCK_END, DATA, DIMENSIONS, MATRIX, NCHAR, NEXUS_HEADER, NTAX, PAD_CHAR};
use crate::writer::text_writer::TextWriter;
use crate::writer::DocumentContext;
use std::io::{self, Write};

/// Writes a complete NEXUS file holding one DATA block:
///
/// ```text
/// #NEXUS
/// [Written by nexalign on 2026-10-19 10:15:00]
/// BEGIN DATA;
/// 	DIMENSIONS NTAX=2 NCHAR=8;
/// 	FORMAT DATATYPE = DNA GAP = - MISSING = ? Interleave = no;
/// 	MATRIX
/// 	seqA          ACGTACGT
/// 	outgroup1     ACG-----
/// 	;
/// END;
/// ```
///
/// DATATYPE, GAP and MISSING are carried over (blank if unknown); rows are
/// always written sequentially, so Interleave is always `no`. Rows use the
/// same fixed-width padding as PHYLIP, behind a leading tab.
pub(crate) fn write_nexus_matrix<W: Write>(
    w: &mut TextWriter<W>,
    records: &[&AlignmentRecord],
    ctx: &DocumentContext,
) -> io::Result<()> {
    header(w, ctx)?;
    data_block(w, records, ctx)?;
    Ok(())
}

// ============================================================================
// Nexus Block & Command Writing (private)
// ============================================================================
/// Writes "#NEXUS" and the timestamp comment.
fn header<W: Write>(w: &mut TextWriter<W>, ctx: &DocumentContext) -> io::Result<()> {
    let timestamp = match &ctx.options.timestamp {
        Some(timestamp) => timestamp.clone(),
        None => chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    };

    w.write_all(NEXUS_HEADER)?.newline()?;
    w.write_str("[Written by ")?
        .write_str(env!("CARGO_PKG_NAME"))?
        .write_str(" on ")?
        .write_str(&timestamp)?
        .write_str("]")?
        .newline()?;
    Ok(())
}

fn data_block<W: Write>(w: &mut TextWriter<W>, records: &[&AlignmentRecord], ctx: &DocumentContext) -> io::Result<()> {
    let dims = ctx.dims;
    let info = ctx.format_info;

    // "BEGIN DATA;"
    w.write_all(BLOCK_BEGIN)?.space()?.write_all(DATA)?.newline()?;

    // "\tDIMENSIONS NTAX=n NCHAR=m;"
    w.tab()?
        .write_all(DIMENSIONS)?
        .space()?
        .write_all(NTAX)?
        .equals()?
        .write_str(&dims.ntax.to_string())?
        .space()?
        .write_all(NCHAR)?
        .equals()?
        .write_str(&dims.nchar.to_string())?
        .semicolon_ln()?;

    // "\tFORMAT DATATYPE = .. GAP = .. MISSING = .. Interleave = no;"
    let format_line = format!(
        "FORMAT DATATYPE = {} GAP = {} MISSING = {} Interleave = no",
        info.datatype_or_blank(),
        info.gap_or_blank(),
        info.missing_or_blank()
    );
    w.tab()?.write_str(&format_line)?.semicolon_ln()?;

    // "\tMATRIX" + one padded row per record + "\t;"
    w.tab()?.write_all(MATRIX)?.newline()?;
    for record in records {
        w.tab()?
            .padded_label(&record.label, dims.label_column())?
            .padded_sequence(&record.sequence, dims.nchar, PAD_CHAR)?
            .newline()?;
    }
    w.tab()?.semicolon_ln()?;

    // "END;"
    w.write_all(BLOCK_END)?.newline()?;
    Ok(())
}
