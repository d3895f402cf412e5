use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use italic_distances::{
    compute_report, sound_correspondences, write_rows, AncientForms, Config,
    LanguagePair, ReportWriter,
};
use italic_phonetic::{CostVariant, Transcription};

#[derive(Parser)]
#[command(name = "italic-distances")]
#[command(about = "Average phonological distances between language pairs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the transcription system from the config
    #[arg(long, value_enum, global = true)]
    transcription: Option<TranscriptionArg>,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Number of threads for parallel computation (defaults to all cores)
    #[arg(long, global = true)]
    threads: Option<usize>,
}

#[derive(Clone, Copy, ValueEnum)]
enum TranscriptionArg {
    Asjp,
    Ipa,
}

impl From<TranscriptionArg> for Transcription {
    fn from(arg: TranscriptionArg) -> Self {
        match arg {
            TranscriptionArg::Asjp => Transcription::Asjp,
            TranscriptionArg::Ipa => Transcription::Ipa,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum VariantArg {
    Regular,
    VowelWeighted,
}

impl From<VariantArg> for CostVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Regular => CostVariant::Uniform,
            VariantArg::VowelWeighted => CostVariant::VowelWeighted,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Build the per-pair distance table from the modern and ancient word lists
    Compute {
        /// Semicolon-delimited modern pairs (pairs;form_x;form_y;cognate)
        #[arg(long)]
        modern: PathBuf,

        /// Semicolon-delimited ancient forms, one column per language
        #[arg(long)]
        ancient: PathBuf,

        /// Output table; printed to stdout when omitted
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Compare two transcriptions under both cost functions
    Pair {
        /// First transcription
        x: String,
        /// Second transcription
        y: String,
    },

    /// Count sound correspondences in the ancient comparisons
    Correspondences {
        /// Semicolon-delimited ancient forms, one column per language
        #[arg(long)]
        ancient: PathBuf,

        /// Restrict to one comparison, written `left:right`
        #[arg(long)]
        pair: Option<String>,

        /// Cost function used for the alignments
        #[arg(long, value_enum, default_value = "vowel-weighted")]
        variant: VariantArg,

        /// Number of correspondences to list per comparison
        #[arg(long, default_value_t = 10)]
        top: usize,

        /// Emit JSON instead of a text table
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
        info!(threads, "thread pool configured");
    }

    let mut config = match &cli.config {
        Some(path) => Config::load(path).context("failed to load configuration")?,
        None => Config::default(),
    };
    if let Some(transcription) = cli.transcription {
        let transcription = Transcription::from(transcription);
        if transcription != config.engine.transcription {
            // A custom cycle belongs to the configured transcription system.
            config.engine.vowels = None;
            config.engine.reduced_vowel = None;
        }
        config.engine.transcription = transcription;
    }

    match cli.command {
        Command::Compute {
            modern,
            ancient,
            output,
        } => run_compute(&config, &modern, &ancient, output.as_deref()),
        Command::Pair { x, y } => run_pair(&config, &x, &y),
        Command::Correspondences {
            ancient,
            pair,
            variant,
            top,
            json,
        } => run_correspondences(&config, &ancient, pair.as_deref(), variant.into(), top, json),
    }
}

fn run_compute(
    config: &Config,
    modern: &Path,
    ancient: &Path,
    output: Option<&Path>,
) -> Result<()> {
    let rows = compute_report(modern, ancient, config).context("failed to compute distances")?;

    match output {
        Some(path) => ReportWriter::new(path)
            .write(&rows)
            .context("failed to write distance table")?,
        None => write_rows(std::io::stdout().lock(), &rows).context("failed to print table")?,
    }
    Ok(())
}

fn run_pair(config: &Config, x: &str, y: &str) -> Result<()> {
    let engine = config.engine.build_engine().context("invalid engine configuration")?;
    let (tx, ty) = (engine.tokenize(x), engine.tokenize(y));
    println!("x: {}", tx.symbols().join(" "));
    println!("y: {}", ty.symbols().join(" "));

    for variant in CostVariant::ALL {
        let raw = engine.raw(x, y, variant);
        let normalized = engine
            .normalized(x, y, variant)
            .context("cannot normalize the distance of two empty forms")?;
        println!("{:<15} raw {raw:.4}  normalized {normalized:.4}", variant.as_str());
        println!("{}", engine.align(x, y, variant).render());
    }
    Ok(())
}

fn run_correspondences(
    config: &Config,
    ancient: &Path,
    pair: Option<&str>,
    variant: CostVariant,
    top: usize,
    json: bool,
) -> Result<()> {
    let engine = config.engine.build_engine().context("invalid engine configuration")?;
    let forms = AncientForms::read(ancient).context("failed to read ancient forms")?;
    if forms.is_empty() {
        bail!("{} has no rows", ancient.display());
    }

    let comparisons = match pair {
        Some(raw) => {
            let Some((left, right)) = raw.split_once(':') else {
                bail!("--pair must be written left:right, got {raw:?}");
            };
            vec![LanguagePair::new(left.trim(), right.trim())]
        }
        None => config.ancient.language_pairs(),
    };

    let mut report = Vec::with_capacity(comparisons.len());
    for comparison in comparisons {
        let pairs = forms.pairs_for(&comparison).with_context(|| {
            format!("known languages: {}", forms.languages().join(", "))
        })?;

        let mut found = sound_correspondences(&pairs, &engine, variant);
        found.truncate(top);
        info!(%comparison, pairs = pairs.len(), listed = found.len(), "correspondences counted");
        report.push((comparison.label(), found));
    }

    if json {
        let value: serde_json::Map<String, serde_json::Value> = report
            .into_iter()
            .map(|(label, found)| serde_json::to_value(found).map(|v| (label, v)))
            .collect::<Result<_, _>>()?;
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        for (label, found) in report {
            println!("{label}");
            for c in found {
                println!("  {:>6} ~ {:<6} {}", c.from, c.to, c.count);
            }
        }
    }
    Ok(())
}
