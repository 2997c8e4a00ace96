use nexalign::model::FormatInfo;
use nexalign::nexus::NexusParserBuilder;
use nexalign::parse_nexus_file;
use nexalign::parser::ParsingErrorType;
use nexalign::writer::{write_records, AlignmentFormat, WriteOptions};
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new("tests").join("fixtures").join(name)
}

fn fixed_time() -> WriteOptions {
    WriteOptions { timestamp: Some("2026-01-01 00:00:00".to_string()), ..WriteOptions::default() }
}

#[test]
fn test_parse_default_settings() {
    let result = parse_nexus_file(fixture("primates.nex"));
    if let Err(e) = &result {
        eprintln!("Error parsing primates: {e}");
    }
    let alignment = result.unwrap();

    assert_eq!(alignment.num_records(), 4);
    assert_eq!(
        alignment.labels().collect::<Vec<_>>(),
        vec!["seqA", "seqB", "outgroup1", "Homo_sapiens"]
    );
    // Gaps stripped, case normalized
    assert_eq!(alignment.get("seqB"), Some("ACGTACGTAAGGCCTTAA"));
    assert_eq!(alignment.get("outgroup1"), Some("ACGTACGTAAGGCCTTAACC"));
    assert_eq!(alignment.get("Homo_sapiens"), Some("ACGTNNNNAAGGCCTT"));

    let format = alignment.format();
    assert_eq!(format.datatype.as_deref(), Some("DNA"));
    assert_eq!(format.gap.as_deref(), Some("-"));
    assert_eq!(format.missing.as_deref(), Some("?"));
    assert_eq!(format.interleaved, Some(false));
}

#[test]
fn test_leading_and_trailing_text() {
    let parser = NexusParserBuilder::for_file(fixture("primates.nex")).unwrap().build().unwrap();
    assert!(parser.leading_text().starts_with("#NEXUS\nBEGIN DATA;"));
    assert!(!parser.leading_text().contains("MATRIX"));
    assert_eq!(parser.trailing_text(), "BEGIN PAUP;\n\tset criterion=parsimony;\nEND;");
}

#[test]
fn test_duplicate_labels_last_write_wins() {
    let alignment = parse_nexus_file(fixture("duplicates.nex")).unwrap();

    // "taxon 1" normalizes to "taxon_1" and overwrites the first record
    assert_eq!(alignment.num_records(), 2);
    assert_eq!(alignment.get("taxon_1"), Some("GGGG"));
    assert_eq!(alignment.get("taxon_2"), Some("CCCC"));
    assert_eq!(alignment.labels().collect::<Vec<_>>(), vec!["taxon_1", "taxon_2"]);
}

#[test]
fn test_malformed_record_aborts() {
    let err = parse_nexus_file(fixture("malformed.nex")).unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::MalformedRecord);
    assert_eq!(err.line(), 6);
    assert!(err.to_string().contains("seqB ACGT"));
}

#[test]
fn test_missing_format_line_echoes_blanks() {
    let alignment = parse_nexus_file(fixture("no_format.nex")).unwrap();
    assert_eq!(alignment.format(), &FormatInfo::default());
    assert_eq!(alignment.get("a"), Some("ACGT"));
    assert_eq!(alignment.get("b"), Some("AC"));

    let records: Vec<_> = alignment.records().iter().collect();
    let mut out = Vec::new();
    write_records(&mut out, AlignmentFormat::Nexus, &records, alignment.format(), &fixed_time()).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("\tFORMAT DATATYPE =  GAP =  MISSING =  Interleave = no;\n"));
    assert!(text.contains("\tDIMENSIONS NTAX=2 NCHAR=4;\n"));
}

#[test]
fn test_no_matrix_gives_empty_alignment() {
    let alignment = parse_nexus_file(fixture("no_matrix.nex")).unwrap();
    assert!(alignment.is_empty());

    let mut out = Vec::new();
    write_records(&mut out, AlignmentFormat::Phylip, &[], alignment.format(), &fixed_time()).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "0 0\n");
}

#[test]
fn test_nexus_output_layout() {
    let alignment = NexusParserBuilder::for_file(fixture("primates.nex")).unwrap()
        .keep_gaps()
        .build()
        .unwrap()
        .into_alignment();
    let records: Vec<_> = alignment.records().iter().collect();

    let mut out = Vec::new();
    write_records(&mut out, AlignmentFormat::Nexus, &records, alignment.format(), &fixed_time()).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "#NEXUS");
    assert_eq!(lines[1], "[Written by nexalign on 2026-01-01 00:00:00]");
    assert_eq!(lines[2], "BEGIN DATA;");
    assert_eq!(lines[3], "\tDIMENSIONS NTAX=4 NCHAR=20;");
    assert_eq!(lines[4], "\tFORMAT DATATYPE = DNA GAP = - MISSING = ? Interleave = no;");
    assert_eq!(lines[5], "\tMATRIX");
    // Longest label "Homo_sapiens" (12) + 10
    assert_eq!(lines[6], format!("\t{:<22}{}", "seqA", "ACGTACGTAAGGCCTTAACC"));
    assert_eq!(lines[9], format!("\t{:<22}{}", "Homo_sapiens", "ACGTNNNNAAGGCCTT----"));
    assert_eq!(lines[10], "\t;");
    assert_eq!(lines[11], "END;");
    assert_eq!(lines.len(), 12);
}

#[test]
fn test_nexus_round_trip() {
    let original = NexusParserBuilder::for_file(fixture("primates.nex")).unwrap()
        .keep_gaps()
        .build()
        .unwrap()
        .into_alignment();
    let records: Vec<_> = original.records().iter().collect();

    let mut out = Vec::new();
    write_records(&mut out, AlignmentFormat::Nexus, &records, original.format(), &fixed_time()).unwrap();
    let text = String::from_utf8(out).unwrap();

    let reparsed = NexusParserBuilder::for_str(&text).keep_gaps().build().unwrap().into_alignment();

    assert_eq!(reparsed.records(), original.records());
    assert_eq!(reparsed.format().datatype, original.format().datatype);
    assert_eq!(reparsed.format().gap, original.format().gap);
    assert_eq!(reparsed.format().missing, original.format().missing);
}

#[test]
fn test_read_missing_file() {
    let err = parse_nexus_file(fixture("does_not_exist.nex")).unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::IoError(_)));
}

#[test]
fn test_all_gap_record_round_trip() {
    let original = NexusParserBuilder::for_str("MATRIX\nA  ----\n;\nEND;").build().unwrap().into_alignment();
    assert_eq!(original.get("A"), Some(""));

    let records: Vec<_> = original.records().iter().collect();
    let mut out = Vec::new();
    write_records(&mut out, AlignmentFormat::Nexus, &records, original.format(), &fixed_time()).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("\tDIMENSIONS NTAX=1 NCHAR=1;\n"));
    assert!(text.contains(&format!("\t{:<11}-\n", "A")));

    let reparsed = NexusParserBuilder::for_str(&text).build().unwrap().into_alignment();
    assert_eq!(reparsed.records(), original.records());
}
