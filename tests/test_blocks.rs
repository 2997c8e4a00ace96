use nexalign::nexus::{
    append_block, find_tree_line, AnalysisBlock, Method, MrBayesBlock, PaupBlock, Rooting, Statistics, TreesBlock,
};
use nexalign::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

fn fixture(name: &str) -> PathBuf {
    Path::new("tests").join("fixtures").join(name)
}

/// Copies a fixture into a fresh temporary directory.
fn scratch_copy(name: &str) -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let target = dir.path().join(name);
    fs::copy(fixture(name), &target).unwrap();
    (dir, target)
}

#[test]
fn test_append_trees_from_files() {
    let (_dir, target) = scratch_copy("primates.nex");
    let original = fs::read_to_string(&target).unwrap();

    let mut block = TreesBlock::new(Rooting::Unrooted);
    block.add_tree_file(fixture("ml.tre")).unwrap();
    block.add_tree_file(fixture("mp.tre")).unwrap();
    assert_eq!(block.num_trees(), 2);

    let written = append_block(&target, &block, None).unwrap();
    assert_eq!(written, target);

    let text = fs::read_to_string(&target).unwrap();
    assert!(text.starts_with(&original));
    assert!(text.ends_with(
        "BEGIN TREES;\n\
         \ttree 1 = [&U] ((seqA,seqB),outgroup1);\n\
         \ttree 2 = [&U] ((seqA,outgroup1),seqB);\n\
         \t[1: ml.tre]\n\
         \t[2: mp.tre]\n\
         \t[ntrees=2]\n\
         END;\n"
    ));
    assert!(find_tree_line(&text).is_some());
}

#[test]
fn test_tree_file_without_tree() {
    let mut block = TreesBlock::new(Rooting::Unrooted);
    assert!(block.add_tree_file(fixture("empty.tre")).is_err());
    assert_eq!(block.num_trees(), 0);
}

#[test]
fn test_score_tree_needs_a_tree() {
    let (_dir, target) = scratch_copy("primates.nex");
    let original = fs::read_to_string(&target).unwrap();
    let block = PaupBlock { statistics: Statistics::ScoreTree, ..PaupBlock::default() };

    let err = append_block(&target, &block, None).unwrap_err();
    assert!(matches!(err, Error::MissingTree(ref path) if path == &target));
    assert_eq!(fs::read_to_string(&target).unwrap(), original);

    // Once a TREES block is present the score block can be appended
    let mut trees = TreesBlock::new(Rooting::Unrooted);
    trees.add_tree_file(fixture("ml.tre")).unwrap();
    append_block(&target, &trees, None).unwrap();
    append_block(&target, &block, None).unwrap();

    let text = fs::read_to_string(&target).unwrap();
    assert!(text.contains("\tpscores 1;\n"));
    assert!(!text.contains("savetrees"));
}

#[test]
fn test_paup_likelihood_bootstrap() {
    let block = PaupBlock {
        method: Method::Likelihood,
        statistics: Statistics::Bootstrap,
        replicates: 250,
        ..PaupBlock::default()
    };
    let text = block.render();

    assert!(text.starts_with("BEGIN PAUP;\n\tlog start file=paup.log replace;\n"));
    assert!(text.contains("\tset criterion=likelihood;\n"));
    assert!(text.contains("\tlset nst=6"));
    assert!(text.contains("\tbootstrap nreps=250 search=heuristic;\n"));
    assert!(text.ends_with("\tsavetrees brlens=yes replace;\n\tlog stop;\nEND;\n"));
}

#[test]
fn test_mrbayes_to_output_file() {
    let (dir, target) = scratch_copy("primates.nex");
    let original = fs::read_to_string(&target).unwrap();
    let output = dir.path().join("primates.mb.nex");

    let block = MrBayesBlock {
        outgroup: Some("outgroup1".to_string()),
        generations: 20_000,
        sample_freq: 100,
        ..MrBayesBlock::default()
    };
    let written = append_block(&target, &block, Some(output.as_path())).unwrap();
    assert_eq!(written, output);

    // Target is left untouched
    assert_eq!(fs::read_to_string(&target).unwrap(), original);

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with(&original));
    assert!(text.contains("BEGIN MRBAYES;\n"));
    assert!(text.contains("\toutgroup outgroup1;\n"));
    assert!(text.contains("\tlset nst=6 rates=invgamma;\n"));
    assert!(text.contains("\tmcmc ngen=20000 samplefreq=100 printfreq=100 nchains=4;\n"));
    assert!(text.ends_with("END;\n"));
}

#[test]
fn test_append_to_missing_target() {
    let dir = tempdir().unwrap();
    let err = append_block(&dir.path().join("absent.nex"), &MrBayesBlock::default(), None).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
