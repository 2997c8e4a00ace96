use criterion::{Criterion, criterion_group, criterion_main};
use nexalign::nexus::NexusParserBuilder;
use nexalign::transform::{self, SubstringSpec, TransformConfig};
use nexalign::writer::{AlignmentFormat, WriteOptions, write_records};
use std::hint::black_box;

const ALIGNMENT_SIZES: &[(&str, usize, usize)] = &[
    ("n50-l1k", 50, 1_000),
    ("n200-l5k", 200, 5_000),
    ("n1000-l2k", 1_000, 2_000),
];

/// Builds a NEXUS file with `ntax` records of `nchar` pseudo-random bases.
fn synthetic_nexus(ntax: usize, nchar: usize) -> String {
    const BASES: &[u8] = b"ACGT-N";
    let mut state: u64 = 0x2545_F491_4F6C_DD1D;
    let mut text = format!(
        "#NEXUS\nBEGIN DATA;\n\tDIMENSIONS NTAX={ntax} NCHAR={nchar};\n\
         \tFORMAT DATATYPE = DNA GAP = - MISSING = ? Interleave = no;\n\tMATRIX\n"
    );
    for i in 0..ntax {
        text.push_str(&format!("\ttaxon_{i:<6}    "));
        for _ in 0..nchar {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            text.push(BASES[(state % BASES.len() as u64) as usize] as char);
        }
        text.push('\n');
    }
    text.push_str("\t;\nEND;\n");
    text
}

fn parsing(c: &mut Criterion) {
    for (name, ntax, nchar) in ALIGNMENT_SIZES {
        let input = synthetic_nexus(*ntax, *nchar);
        c.bench_function(&format!("parse/{name}"), |b| {
            b.iter(|| NexusParserBuilder::for_str(black_box(&input)).build().unwrap());
        });
    }
}

fn converting(c: &mut Criterion) {
    let config = TransformConfig::default()
        .with_no_ambiguity()
        .with_substring(SubstringSpec::new(500, 1));
    let options = WriteOptions { timestamp: Some("bench".to_string()), ..WriteOptions::default() };

    for (name, ntax, nchar) in ALIGNMENT_SIZES {
        let alignment = NexusParserBuilder::for_str(&synthetic_nexus(*ntax, *nchar))
            .keep_gaps()
            .build()
            .unwrap()
            .into_alignment();

        c.bench_function(&format!("transform+phylip/{name}"), |b| {
            b.iter(|| {
                let transformed = transform::apply(alignment.clone(), &config).unwrap();
                let records: Vec<_> = transformed.records().iter().collect();
                let mut out = Vec::new();
                write_records(&mut out, AlignmentFormat::Phylip, &records, transformed.format(), &options).unwrap();
                black_box(out)
            });
        });
    }
}

criterion_group!(regression, parsing);
criterion_group! {
    name = reporting;
    config = Criterion::default().sample_size(10);
    targets = converting
}
criterion_main!(regression, reporting);
