use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

use sa_aligner::align;
use sa_aligner::assemble;
use sa_aligner::config::{AlignConfig, BlockConfig, MatchPolicy};
use sa_aligner::index::SaAlgorithm;
use sa_aligner::io::alnfile::AlignmentFile;
use sa_aligner::io::seqfile;
use sa_aligner::reference::Reference;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "sa-aligner", author, version, about = "Suffix-array k-mismatch read aligner", arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Align reads to a reference and reconstruct the sequence they came from
    Align(AlignArgs),
    /// Score a previous alignment run against ground truth
    Evaluate(EvaluateArgs),
}

#[derive(Args, Debug)]
struct AlignArgs {
    /// Reference sequence (plain text or FASTA)
    #[arg(short = 'r', long)]
    reference: PathBuf,
    /// Reads (one per line, or FASTQ)
    #[arg(short = 'q', long)]
    reads: PathBuf,
    /// Maximum substitutions per read
    #[arg(short = 'k', long = "mismatches", default_value_t = 2)]
    max_mismatches: usize,
    /// Index the reference in blocks of this many bases
    #[arg(long = "block-size")]
    block_size: Option<usize>,
    /// Overlap appended to each block (raised to read length - 1 if smaller)
    #[arg(long, default_value_t = 100)]
    overlap: usize,
    /// Which block wins when a read matches in several blocks
    #[arg(long, value_enum, default_value_t = MatchPolicy::FirstMatch)]
    policy: MatchPolicy,
    /// Suffix array construction algorithm
    #[arg(long = "sa", value_enum, default_value_t = SaAlgorithm::Doubling)]
    sa_algorithm: SaAlgorithm,
    #[arg(short = 't', long = "threads", default_value_t = 1)]
    threads: usize,
    /// Ground truth offsets (one per read) for accuracy reporting
    #[arg(long)]
    truth: Option<PathBuf>,
    /// Output alignment file
    #[arg(short, long, default_value = "out.aln")]
    out: PathBuf,
    /// Output reconstructed sequence
    #[arg(long, default_value = "reconstructed.txt")]
    reconstructed: PathBuf,
    /// Also write offsets as text, one per read (-1 = unmatched)
    #[arg(long)]
    offsets: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct EvaluateArgs {
    /// Alignment file written by `align`
    #[arg(short, long)]
    alignments: PathBuf,
    #[arg(short = 'q', long)]
    reads: PathBuf,
    #[arg(long)]
    truth: PathBuf,
    /// Reconstructed sequence to check read recovery against
    #[arg(long)]
    reconstructed: Option<PathBuf>,
    /// Known mutated sequence for base-level identity
    #[arg(long = "true-sequence")]
    true_sequence: Option<PathBuf>,
    /// Mismatch tolerance for read recovery
    #[arg(short = 'k', long = "mismatches", default_value_t = 2)]
    max_mismatches: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Align(args) => run_align(args),
        Commands::Evaluate(args) => run_evaluate(args),
    }
}

fn run_align(args: AlignArgs) -> Result<()> {
    let started = chrono::Utc::now();
    let reference = Reference::new(seqfile::load_reference(&args.reference)?);
    let reads = seqfile::load_reads(&args.reads)?;
    info!("reference: {} ({} bp)", args.reference.display(), reference.len());
    info!("reads: {} ({} records)", args.reads.display(), reads.len());

    let mut config = AlignConfig::default()
        .with_mismatches(args.max_mismatches)
        .with_algorithm(args.sa_algorithm)
        .with_threads(args.threads);
    if let Some(block_size) = args.block_size {
        config = config.with_blocking(BlockConfig { block_size, overlap: args.overlap, policy: args.policy });
    }

    let alignments = align::align_reads(&reference, &reads, &config)?;

    if let Some(truth_path) = &args.truth {
        let truth = seqfile::load_truth(truth_path)?;
        report_read_accuracy(&alignments, &truth)?;
    }

    let file = AlignmentFile::new(reference.len(), config, alignments);
    file.save_to_file(&args.out)?;
    info!("alignments saved: {}", args.out.display());
    if let Some(p) = &args.offsets {
        std::fs::write(p, file.offsets_tsv())?;
        info!("offsets saved: {}", p.display());
    }

    let rebuilt = assemble::assemble(&reference, &reads, &file.alignments);
    seqfile::write_sequence(&args.reconstructed, &rebuilt)?;
    info!("reconstructed sequence saved: {}", args.reconstructed.display());

    info!("total time: {} ms", (chrono::Utc::now() - started).num_milliseconds());
    Ok(())
}

fn run_evaluate(args: EvaluateArgs) -> Result<()> {
    let file = AlignmentFile::load_from_file(&args.alignments)?;
    let reads = seqfile::load_reads(&args.reads)?;
    let truth = seqfile::load_truth(&args.truth)?;
    info!(
        "alignment file created {} (k={}, {:?})",
        file.created.to_rfc3339(),
        file.config.max_mismatches,
        file.config.sa_algorithm
    );

    report_read_accuracy(&file.alignments, &truth)?;

    if let Some(p) = &args.reconstructed {
        let rebuilt = load_sequence(p)?;
        let rec = assemble::recovery_accuracy(&rebuilt, &reads, &truth, args.max_mismatches)?;
        println!(
            "recovered reads (mismatch <= {}): {}/{} ({:.2}%)",
            args.max_mismatches,
            rec.correct,
            rec.total,
            rec.percent()
        );

        if let Some(t) = &args.true_sequence {
            let expected = load_sequence(t)?;
            let identity = assemble::base_identity(&rebuilt, &expected)?;
            println!("base-level identity: {:.4}%", identity * 100.0);
        }
    } else if args.true_sequence.is_some() {
        anyhow::bail!("--true-sequence requires --reconstructed");
    }
    Ok(())
}

fn report_read_accuracy(alignments: &align::Alignments, truth: &[usize]) -> Result<()> {
    let acc = assemble::read_accuracy(alignments, truth)?;
    println!("total reads: {}", acc.total);
    println!("matched reads: {}", alignments.matched_count());
    println!("correctly aligned reads: {}", acc.correct);
    println!("alignment accuracy: {:.2}%", acc.percent());
    Ok(())
}

fn load_sequence(path: &Path) -> Result<Vec<u8>> {
    seqfile::load_reference(path)
}
