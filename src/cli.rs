//! Command-line interface: argument definitions and their resolution into
//! library configuration.

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use nexalign::filter::FetchFilter;
use nexalign::nexus::{
    append_block, AnalysisBlock, GapHandling, Method, MrBayesBlock, PaupBlock, Rooting, Statistics, TreesBlock,
};
use nexalign::transform::{SubstringSpec, TransformConfig};
use nexalign::writer::{AlignmentFormat, OutputMode, WriteOptions};
use nexalign::{convert, ConvertConfig, Input, Result};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "nexalign", author, version, about)]
#[command(
    long_about = "Convert the alignment of a NEXUS file to FASTA, PHYLIP, MEGA or NEXUS,\nand append TREES, PAUP or MrBayes blocks to NEXUS files."
)]
pub struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert the MATRIX block of a NEXUS file
    Convert(ConvertArgs),
    /// Append a TREES block built from single-tree files
    Trees(TreesArgs),
    /// Append a PAUP command block
    Paup(PaupArgs),
    /// Append a MrBayes command block
    Mrbayes(MrBayesArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Nexus,
    Fasta,
    Phylip,
    Mega,
}

impl From<FormatArg> for AlignmentFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Nexus => AlignmentFormat::Nexus,
            FormatArg::Fasta => AlignmentFormat::Fasta,
            FormatArg::Phylip => AlignmentFormat::Phylip,
            FormatArg::Mega => AlignmentFormat::Mega,
        }
    }
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// NEXUS input file ('-' or omit for stdin)
    #[arg(value_name = "NEXUS")]
    pub input: Option<PathBuf>,

    /// Target format
    #[arg(short, long, value_enum, default_value = "fasta")]
    pub to: FormatArg,

    /// Output file (default: input name with the format's extension, stdout for stdin)
    #[arg(short, long, value_name = "FILE", conflicts_with = "split")]
    pub output: Option<PathBuf>,

    /// Write one file per record into this directory
    #[arg(long, value_name = "DIR")]
    pub split: Option<PathBuf>,

    /// Only records whose label contains this pattern (regex or literal)
    #[arg(short, long, value_name = "PATTERN")]
    pub fetch: Option<String>,

    /// Keep gap symbols in sequences
    #[arg(long)]
    pub keep_gaps: bool,

    /// Keep sequence case as written
    #[arg(long)]
    pub keep_case: bool,

    /// Remove dashes from labels (after turning '.1' into '-1')
    #[arg(long)]
    pub strip_dashes: bool,

    /// Collapse nucleotide ambiguity codes to a single base
    #[arg(long)]
    pub no_ambiguity: bool,

    /// Reverse complement every sequence
    #[arg(long)]
    pub revcomp: bool,

    /// First position of the substring to keep (1-based)
    #[arg(long, requires = "end", allow_negative_numbers = true)]
    pub start: Option<i64>,

    /// Last position of the substring to keep (1-based); below start means reverse complement
    #[arg(long, requires = "start", allow_negative_numbers = true)]
    pub end: Option<i64>,

    /// Wrap MEGA sequence lines at this width
    #[arg(long, value_name = "N")]
    pub wrap: Option<usize>,

    /// Cut labels at their first '.fasta'-like suffix
    #[arg(long)]
    pub header_fix: bool,

    /// Write records sorted by label
    #[arg(long)]
    pub sort: bool,

    /// Title for MEGA output
    #[arg(long, default_value = "Alignment")]
    pub title: String,
}

#[derive(Args, Debug)]
pub struct TreesArgs {
    /// NEXUS file to append to
    #[arg(value_name = "NEXUS")]
    pub target: PathBuf,

    /// Tree files, one tree each
    #[arg(value_name = "TREE", required = true, num_args = 1..)]
    pub trees: Vec<PathBuf>,

    /// Mark trees as rooted ([&R]) instead of unrooted ([&U])
    #[arg(long)]
    pub rooted: bool,

    /// Write to this file instead of appending in place
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodArg {
    Parsimony,
    Likelihood,
    Distance,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatisticsArg {
    None,
    Bootstrap,
    Jackknife,
    Score,
}

#[derive(Args, Debug)]
pub struct PaupArgs {
    /// NEXUS file to append to
    #[arg(value_name = "NEXUS")]
    pub target: PathBuf,

    #[arg(short, long, value_enum, default_value = "parsimony")]
    pub method: MethodArg,

    #[arg(short, long, value_enum, default_value = "none")]
    pub statistics: StatisticsArg,

    /// Outgroup taxon
    #[arg(long)]
    pub outgroup: Option<String>,

    /// Number of replicates (search replicates, bootstrap or jackknife)
    #[arg(short = 'n', long, default_value_t = 100)]
    pub replicates: usize,

    /// Log file written by PAUP
    #[arg(long, default_value = "paup.log")]
    pub log: String,

    /// Write to this file instead of appending in place
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct MrBayesArgs {
    /// NEXUS file to append to
    #[arg(value_name = "NEXUS")]
    pub target: PathBuf,

    /// Outgroup taxon
    #[arg(long)]
    pub outgroup: Option<String>,

    /// Number of MCMC generations
    #[arg(short = 'n', long, default_value_t = 1_000_000)]
    pub generations: usize,

    /// Sample (and print) frequency
    #[arg(long, default_value_t = 1000)]
    pub sample_freq: usize,

    /// Number of substitution types
    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u8).range(1..=6))]
    pub nst: u8,

    /// Rate variation model
    #[arg(long, default_value = "invgamma")]
    pub rates: String,

    /// Log file written by MrBayes
    #[arg(long, default_value = "mrbayes.log")]
    pub log: String,

    /// Write to this file instead of appending in place
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

// ============================================================================
// Resolution & dispatch
// ============================================================================
impl ConvertArgs {
    fn input(&self) -> Input {
        match &self.input {
            None => Input::Stdin,
            Some(path) if path.as_os_str() == "-" => Input::Stdin,
            Some(path) => Input::Path(path.clone()),
        }
    }

    fn config(&self) -> ConvertConfig {
        let mut transform = TransformConfig {
            reverse_complement: self.revcomp,
            no_ambiguity: self.no_ambiguity,
            wrap_width: self.wrap,
            header_fix: self.header_fix,
            header_dash_strip: self.strip_dashes,
            ..TransformConfig::default()
        };
        if let (Some(start), Some(end)) = (self.start, self.end) {
            transform.substring = Some(SubstringSpec::new(start, end));
        }

        ConvertConfig {
            format: self.to.into(),
            gaps: if self.keep_gaps { GapHandling::Keep } else { GapHandling::Strip },
            keep_case: self.keep_case,
            transform,
            options: WriteOptions {
                title: self.title.clone(),
                sort_labels: self.sort,
                ..WriteOptions::default()
            },
        }
    }

    fn mode(&self, input: &Input, format: AlignmentFormat) -> Result<OutputMode> {
        let filter = self.fetch.as_deref().map(FetchFilter::new).transpose()?;
        let destination = match &self.output {
            Some(path) if path.as_os_str() == "-" => nexalign::writer::Destination::Stdout,
            Some(path) => nexalign::writer::Destination::Path(path.clone()),
            None => input.default_destination(format),
        };

        Ok(match (&self.split, filter) {
            (Some(dir), filter) => OutputMode::Split { dir: dir.clone(), filter },
            (None, Some(filter)) => OutputMode::Subset { filter, destination },
            (None, None) => OutputMode::Combined(destination),
        })
    }
}

/// Runs the selected subcommand.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Convert(args) => {
            let input = args.input();
            let config = args.config();
            let mode = args.mode(&input, config.format)?;
            let written = convert(&input, &config, &mode)?;
            info!("Wrote {} file(s)", written.len());
        }
        Command::Trees(args) => {
            let rooting = if args.rooted { Rooting::Rooted } else { Rooting::Unrooted };
            let mut block = TreesBlock::new(rooting);
            for tree in &args.trees {
                block.add_tree_file(tree)?;
            }
            append(&args.target, &block, args.output.as_deref())?;
        }
        Command::Paup(args) => {
            let block = PaupBlock {
                method: match args.method {
                    MethodArg::Parsimony => Method::Parsimony,
                    MethodArg::Likelihood => Method::Likelihood,
                    MethodArg::Distance => Method::Distance,
                },
                statistics: match args.statistics {
                    StatisticsArg::None => Statistics::None,
                    StatisticsArg::Bootstrap => Statistics::Bootstrap,
                    StatisticsArg::Jackknife => Statistics::Jackknife,
                    StatisticsArg::Score => Statistics::ScoreTree,
                },
                outgroup: args.outgroup,
                replicates: args.replicates,
                log_file: args.log,
            };
            append(&args.target, &block, args.output.as_deref())?;
        }
        Command::Mrbayes(args) => {
            let block = MrBayesBlock {
                outgroup: args.outgroup,
                generations: args.generations,
                sample_freq: args.sample_freq,
                nst: args.nst,
                rates: args.rates,
                log_file: args.log,
            };
            append(&args.target, &block, args.output.as_deref())?;
        }
    }
    Ok(())
}

fn append<B: AnalysisBlock>(target: &Path, block: &B, output: Option<&Path>) -> Result<()> {
    append_block(target, block, output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_convert_args_resolve() {
        let cli = Cli::parse_from([
            "nexalign", "convert", "aln.nex", "--to", "phylip", "--start", "10", "--end", "1", "--fetch", "seq",
        ]);
        let Command::Convert(args) = cli.command else { panic!("expected convert") };
        let config = args.config();
        assert_eq!(config.format, AlignmentFormat::Phylip);
        assert_eq!(config.transform.substring, Some(SubstringSpec::new(10, 1)));

        let input = args.input();
        let mode = args.mode(&input, config.format).unwrap();
        assert!(matches!(mode, OutputMode::Subset { .. }));
    }

    #[test]
    fn test_start_requires_end() {
        assert!(Cli::try_parse_from(["nexalign", "convert", "aln.nex", "--start", "3"]).is_err());
    }
}
