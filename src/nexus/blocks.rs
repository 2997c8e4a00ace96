//! Analysis blocks appended to existing NEXUS files: TREES, PAUP and MrBayes.
//!
//! Blocks are plain templates; the only parsing involved is locating a tree
//! definition (`tree NAME = <newick>;`) in a tree file or in the target file.

use crate::error::{Error, Result};
use crate::nexus::defs::{BLOCK_BEGIN, BLOCK_END, MRBAYES, PAUP, TREE, TREES, TREE_PREFIX};
use crate::parser::ParsingError;
use crate::writer::text_writer::TextWriter;
use log::{debug, info};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

// =#========================================================================#=
// ANALYSIS BLOCK (Trait)
// =#========================================================================#=
/// A NEXUS block that can be rendered and appended to a file.
pub trait AnalysisBlock {
    /// Renders the complete block, from `BEGIN` to `END;` with trailing newline.
    fn render(&self) -> String;

    /// Whether the target file must already contain a tree definition.
    fn requires_tree(&self) -> bool {
        false
    }
}

/// Renders a block through a [TextWriter] into a String.
fn render_with<F>(f: F) -> String
where
    F: FnOnce(&mut TextWriter<&mut Vec<u8>>) -> io::Result<()>,
{
    let mut buf = Vec::new();
    {
        let mut w = TextWriter::new(&mut buf);
        // Writing into a Vec cannot fail
        let _ = f(&mut w).and_then(|_| w.flush());
    }
    String::from_utf8_lossy(&buf).into_owned()
}


// =#========================================================================#=
// TREE LINES
// =#========================================================================#=
/// Returns the first line starting (after indentation) with `tree `, ignoring case.
pub fn find_tree_line(text: &str) -> Option<&str> {
    text.lines().find(|line| is_tree_line(line))
}

fn is_tree_line(line: &str) -> bool {
    let line = line.trim_start().as_bytes();
    line.len() >= TREE_PREFIX.len() && line[..TREE_PREFIX.len()].eq_ignore_ascii_case(TREE_PREFIX.as_bytes())
}

/// Extracts the Newick string from a tree line.
///
/// For `tree NAME = [&U] (A,B);` this is the text between `=` and `;` with
/// leading comments such as `[&U]` removed; a line without the `tree … =`
/// prefix is taken as a bare Newick string.
///
/// # Errors
/// Returns an `InvalidTreeLine` error if no Newick string remains.
///
/// # Example
/// ```
/// use nexalign::nexus::extract_newick;
///
/// assert_eq!(extract_newick("tree best = [&R] ((A,B),C);").unwrap(), "((A,B),C)");
/// assert_eq!(extract_newick("((A,B),C);").unwrap(), "((A,B),C)");
/// ```
pub fn extract_newick(line: &str) -> std::result::Result<String, ParsingError> {
    let text = line.trim();
    let mut body = if is_tree_line(text) {
        match text.split_once('=') {
            Some((_, rest)) => rest,
            None => return Err(ParsingError::invalid_tree_line(1, line)),
        }
    } else {
        text
    };

    // Drop leading comments like [&U] or [&R]
    loop {
        body = body.trim_start();
        match body.strip_prefix('[').and_then(|rest| rest.split_once(']')) {
            Some((_, rest)) => body = rest,
            None => break,
        }
    }

    let newick = body.split(';').next().unwrap_or("").trim();
    if newick.is_empty() {
        return Err(ParsingError::invalid_tree_line(1, line));
    }
    Ok(newick.to_string())
}


// =#========================================================================#=
// TREES BLOCK
// =#========================================================================#=
/// Rooting annotation written in front of each tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rooting {
    #[default]
    Unrooted,
    Rooted,
}

impl Rooting {
    fn comment(&self) -> &'static str {
        match self {
            Rooting::Unrooted => "[&U]",
            Rooting::Rooted => "[&R]",
        }
    }
}

/// A TREES block built from single-tree files.
///
/// ```text
/// BEGIN TREES;
/// 	tree 1 = [&U] ((A,B),C);
/// 	tree 2 = [&U] (A,(B,C));
/// 	[1: ml.tre]
/// 	[2: mp.tre]
/// 	[ntrees=2]
/// END;
/// ```
#[derive(Debug, Clone, Default)]
pub struct TreesBlock {
    rooting: Rooting,
    /// (source name, newick without trailing semicolon)
    trees: Vec<(String, String)>,
}

impl TreesBlock {
    pub fn new(rooting: Rooting) -> Self {
        TreesBlock { rooting, trees: Vec::new() }
    }

    /// Adds a tree given by a tree line or bare Newick string.
    pub fn add_tree(&mut self, source: impl Into<String>, line: &str) -> std::result::Result<(), ParsingError> {
        let newick = extract_newick(line)?;
        self.trees.push((source.into(), newick));
        Ok(())
    }

    /// Adds the tree of a tree file (first non-blank line).
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or holds no tree.
    pub fn add_tree_file<P: AsRef<Path>>(&mut self, path: P) -> std::result::Result<(), ParsingError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let (idx, line) = content
            .lines()
            .enumerate()
            .find(|(_, l)| !l.trim().is_empty())
            .ok_or_else(|| ParsingError::invalid_tree_line(1, ""))?;
        let source = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        debug!("Read tree from {}", path.display());
        self.add_tree(source, line).map_err(|e| e.with_line(idx + 1))
    }

    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }
}

impl AnalysisBlock for TreesBlock {
    fn render(&self) -> String {
        render_with(|w| {
            w.write_all(BLOCK_BEGIN)?.space()?.write_all(TREES)?.newline()?;
            for (k, (_, newick)) in self.trees.iter().enumerate() {
                // "\ttree k = [&U] <newick>;"
                w.tab()?
                    .write_all(TREE)?
                    .space()?
                    .write_str(&(k + 1).to_string())?
                    .space()?
                    .equals()?
                    .space()?
                    .write_str(self.rooting.comment())?
                    .space()?
                    .write_str(newick)?
                    .semicolon_ln()?;
            }
            for (k, (source, _)) in self.trees.iter().enumerate() {
                w.tab()?.line(&format!("[{}: {source}]", k + 1))?;
            }
            w.tab()?.line(&format!("[ntrees={}]", self.trees.len()))?;
            w.write_all(BLOCK_END)?.newline()?;
            Ok(())
        })
    }
}


// =#========================================================================#=
// PAUP BLOCK
// =#========================================================================#=
/// Optimality criterion of a PAUP analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Parsimony,
    Likelihood,
    Distance,
}

impl Method {
    fn criterion(&self) -> &'static str {
        match self {
            Method::Parsimony => "parsimony",
            Method::Likelihood => "likelihood",
            Method::Distance => "distance",
        }
    }

    /// Search used for resampling replicates
    fn search(&self) -> &'static str {
        match self {
            Method::Distance => "nj",
            _ => "heuristic",
        }
    }

    /// Scoring command for an existing tree
    fn score_command(&self) -> &'static str {
        match self {
            Method::Parsimony => "pscores 1;",
            Method::Likelihood => "lscores 1;",
            Method::Distance => "dscores 1;",
        }
    }
}

/// Support statistics computed by a PAUP analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Statistics {
    /// Plain tree search
    #[default]
    None,
    Bootstrap,
    Jackknife,
    /// Score the tree already defined in the file
    ScoreTree,
}

/// A PAUP command block.
#[derive(Debug, Clone, PartialEq)]
pub struct PaupBlock {
    pub method: Method,
    pub statistics: Statistics,
    pub outgroup: Option<String>,
    pub replicates: usize,
    pub log_file: String,
}

impl Default for PaupBlock {
    fn default() -> Self {
        PaupBlock {
            method: Method::default(),
            statistics: Statistics::default(),
            outgroup: None,
            replicates: 100,
            log_file: "paup.log".to_string(),
        }
    }
}

impl AnalysisBlock for PaupBlock {
    fn render(&self) -> String {
        render_with(|w| {
            w.write_all(BLOCK_BEGIN)?.space()?.write_all(PAUP)?.newline()?;
            w.tab()?.line(&format!("log start file={} replace;", self.log_file))?;
            w.tab()?.line("set autoclose=yes warntree=no warnreset=no increase=auto;")?;
            w.tab()?.line(&format!("set criterion={};", self.method.criterion()))?;
            if self.method == Method::Likelihood {
                w.tab()?.line("lset nst=6 rmatrix=estimate basefreq=estimate rates=gamma shape=estimate pinvar=estimate;")?;
            }
            if let Some(outgroup) = &self.outgroup {
                w.tab()?.line(&format!("outgroup {outgroup};"))?;
            }

            let n = self.replicates;
            match (self.statistics, self.method) {
                (Statistics::None, Method::Distance) => {
                    w.tab()?.line("nj;")?;
                }
                (Statistics::None, _) => {
                    w.tab()?.line(&format!("hsearch addseq=random nreps={n} swap=tbr;"))?;
                }
                (Statistics::Bootstrap, method) => {
                    w.tab()?.line(&format!("bootstrap nreps={n} search={};", method.search()))?;
                    w.tab()?.line("contree all / majrule=yes strict=no;")?;
                }
                (Statistics::Jackknife, method) => {
                    w.tab()?.line(&format!("jackknife nreps={n} search={};", method.search()))?;
                    w.tab()?.line("contree all / majrule=yes strict=no;")?;
                }
                (Statistics::ScoreTree, method) => {
                    w.tab()?.line(method.score_command())?;
                }
            }
            if self.statistics != Statistics::ScoreTree {
                w.tab()?.line("savetrees brlens=yes replace;")?;
            }

            w.tab()?.line("log stop;")?;
            w.write_all(BLOCK_END)?.newline()?;
            Ok(())
        })
    }

    fn requires_tree(&self) -> bool {
        self.statistics == Statistics::ScoreTree
    }
}


// =#========================================================================#=
// MRBAYES BLOCK
// =#========================================================================#=
/// A MrBayes command block.
#[derive(Debug, Clone, PartialEq)]
pub struct MrBayesBlock {
    pub outgroup: Option<String>,
    pub generations: usize,
    pub sample_freq: usize,
    pub nst: u8,
    pub rates: String,
    pub log_file: String,
}

impl Default for MrBayesBlock {
    fn default() -> Self {
        MrBayesBlock {
            outgroup: None,
            generations: 1_000_000,
            sample_freq: 1000,
            nst: 6,
            rates: "invgamma".to_string(),
            log_file: "mrbayes.log".to_string(),
        }
    }
}

impl AnalysisBlock for MrBayesBlock {
    fn render(&self) -> String {
        render_with(|w| {
            w.write_all(BLOCK_BEGIN)?.space()?.write_all(MRBAYES)?.newline()?;
            w.tab()?.line("set autoclose=yes nowarn=yes;")?;
            w.tab()?.line(&format!("log start filename={} replace;", self.log_file))?;
            if let Some(outgroup) = &self.outgroup {
                w.tab()?.line(&format!("outgroup {outgroup};"))?;
            }
            w.tab()?.line(&format!("lset nst={} rates={};", self.nst, self.rates))?;
            w.tab()?.line(&format!(
                "mcmc ngen={} samplefreq={} printfreq={} nchains=4;",
                self.generations, self.sample_freq, self.sample_freq
            ))?;
            w.tab()?.line("sump relburnin=yes burninfrac=0.25;")?;
            w.tab()?.line("sumt relburnin=yes burninfrac=0.25;")?;
            w.tab()?.line("log stop;")?;
            w.write_all(BLOCK_END)?.newline()?;
            Ok(())
        })
    }
}


// =#========================================================================#=
// APPENDING
// =#========================================================================#=
/// Appends a rendered block after the content of `target`.
///
/// The result is written back to `target`, or to `output` if given (leaving
/// `target` untouched). A newline is inserted first if the content does not
/// end with one.
///
/// # Returns
/// The path written to
///
/// # Errors
/// * [Error::MissingTree] if the block needs a tree definition and `target` has none
/// * [Error::UnopenableDestination] if the destination cannot be created
/// * [Error::Io] if reading `target` or writing fails
pub fn append_block<B: AnalysisBlock + ?Sized>(target: &Path, block: &B, output: Option<&Path>) -> Result<PathBuf> {
    let mut content = fs::read_to_string(target)?;
    if block.requires_tree() && find_tree_line(&content).is_none() {
        return Err(Error::MissingTree(target.to_path_buf()));
    }
    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    content.push_str(&block.render());

    let destination = output.unwrap_or(target).to_path_buf();
    let mut file = fs::File::create(&destination).map_err(|source| Error::UnopenableDestination {
        path: destination.clone(),
        source,
    })?;
    file.write_all(content.as_bytes())?;

    info!("Appended block to {}", destination.display());
    Ok(destination)
}
