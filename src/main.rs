//! Wordle Sim CLI
//!
//! Runs batches of simulated games against a chosen agent and prints the
//! resulting statistics.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;
use wordle_sim::agent::best_opening;
use wordle_sim::simulation::DEFAULT_NUM_GAMES;
use wordle_sim::{
    default_allowed, default_possible, evaluate, load_vocabulary, AgentBuilder, AgentKind,
    BatchResult, Bucket, GameSession, GameStatus, HistogramReport, SimulationConfig,
    SimulationRunner, Vocabulary, Word, DEFAULT_MAX_ATTEMPTS, WORD_LENGTH,
};

/// Width of the longest histogram bar.
const BAR_WIDTH: usize = 40;

#[derive(Parser, Debug)]
#[command(name = "wordle-sim")]
#[command(about = "Simulate Wordle games and measure guessing agents")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a batch of games and report statistics
    Simulate {
        #[command(flatten)]
        vocab: VocabArgs,

        #[command(flatten)]
        agent: AgentArgs,

        /// Number of games to play
        #[arg(short = 'n', long, env = "WORDLE_GAMES", default_value_t = DEFAULT_NUM_GAMES)]
        games: usize,

        /// Guesses allowed per game
        #[arg(long, env = "WORDLE_MAX_ATTEMPTS", default_value_t = DEFAULT_MAX_ATTEMPTS)]
        max_attempts: usize,

        /// Base seed for reproducible runs
        #[arg(long, env = "WORDLE_SEED")]
        seed: Option<u64>,

        /// Run games in parallel
        #[arg(long, env = "WORDLE_PARALLEL")]
        parallel: bool,

        /// Worker threads when running in parallel
        #[arg(long, env = "WORDLE_THREADS")]
        threads: Option<usize>,

        /// Play every possible word once instead of drawing targets
        #[arg(long, env = "WORDLE_EXHAUSTIVE")]
        exhaustive: bool,

        /// How to print the report
        #[arg(short, long, value_enum, env = "WORDLE_OUTPUT", default_value_t = OutputMode::Summary)]
        output: OutputMode,
    },
    /// Play one game against a known target and show every guess
    Solve {
        /// The hidden word
        target: String,

        #[command(flatten)]
        vocab: VocabArgs,

        #[command(flatten)]
        agent: AgentArgs,

        /// Guesses allowed
        #[arg(long, env = "WORDLE_MAX_ATTEMPTS", default_value_t = DEFAULT_MAX_ATTEMPTS)]
        max_attempts: usize,

        /// Seed for the agent
        #[arg(long, env = "WORDLE_SEED", default_value_t = 0)]
        seed: u64,
    },
    /// Show the feedback for one guess against one target
    Score { guess: String, target: String },
}

#[derive(Args, Debug)]
struct VocabArgs {
    /// Word list of legal guesses (defaults to the built-in list)
    #[arg(long, env = "WORDLE_ALLOWED")]
    allowed: Option<PathBuf>,

    /// Word list of legal targets (defaults to the built-in list)
    #[arg(long, env = "WORDLE_POSSIBLE")]
    possible: Option<PathBuf>,

    /// Length of every word
    #[arg(long, env = "WORDLE_WORD_LENGTH", default_value_t = WORD_LENGTH)]
    word_length: usize,
}

impl VocabArgs {
    fn load(&self) -> anyhow::Result<(Vocabulary, Vocabulary)> {
        let allowed = match &self.allowed {
            Some(path) => load_vocabulary(path, self.word_length)
                .with_context(|| format!("loading allowed words from {}", path.display()))?,
            None => default_allowed().context("loading built-in allowed words")?,
        };
        let possible = match &self.possible {
            Some(path) => load_vocabulary(path, self.word_length)
                .with_context(|| format!("loading possible words from {}", path.display()))?,
            None => default_possible().context("loading built-in possible words")?,
        };
        info!(
            allowed = allowed.len(),
            possible = possible.len(),
            "vocabularies loaded"
        );
        Ok((allowed, possible))
    }
}

#[derive(Args, Debug)]
struct AgentArgs {
    /// Guessing strategy
    #[arg(short, long, value_enum, env = "WORDLE_AGENT", default_value_t = AgentKind::Random)]
    agent: AgentKind,

    /// Fixed opening guess for the entropy agent
    #[arg(long, env = "WORDLE_OPENING")]
    opening: Option<String>,
}

impl AgentArgs {
    fn builder(&self, allowed: &Vocabulary, possible: &Vocabulary) -> anyhow::Result<AgentBuilder> {
        let builder = AgentBuilder::new(self.agent);
        if self.agent != AgentKind::Entropy {
            return Ok(builder);
        }
        let opening = match &self.opening {
            Some(raw) => Word::new(raw).context("parsing --opening")?,
            None => {
                info!("computing entropy opening");
                match best_opening(allowed, possible) {
                    Some(word) => word,
                    None => return Ok(builder),
                }
            }
        };
        info!(%opening, "entropy opening");
        Ok(builder.with_opening(opening))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputMode {
    /// Headline statistics
    Summary,
    /// Statistics plus the guess distribution
    Histogram,
    /// Report and aborted games as JSON
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    agent: &'static str,
    seed: u64,
    report: &'a HistogramReport,
    failures: &'a [wordle_sim::GameFailure],
}

fn print_summary(agent: AgentKind, batch: &BatchResult, report: &HistogramReport) {
    println!("Agent: {}", agent);
    println!("Seed: {}", batch.seed);
    println!("Games: {}", report.total_games);
    println!("Wins: {} ({:.1}%)", report.wins, report.win_rate * 100.0);
    println!("Losses: {}", report.losses);
    match (report.mean_guesses, report.median_guesses) {
        (Some(mean), Some(median)) => {
            println!("Average guesses (wins): {:.3}", mean);
            println!("Median guesses (wins): {:.1}", median);
        }
        _ => println!("Average guesses (wins): n/a"),
    }
    if report.aborted_games > 0 {
        println!("Aborted (illegal guess): {}", report.aborted_games);
    }
}

fn print_histogram(report: &HistogramReport) {
    let total = report.total_games.max(1);
    let peak = report.peak().max(1);
    println!();
    println!("Guess distribution:");
    for bin in report.bins() {
        let pct = bin.count as f64 / total as f64 * 100.0;
        let bar = "█".repeat(bin.count * BAR_WIDTH / peak);
        let label = match bin.bucket {
            Bucket::Guesses(k) => format!("{} guesses", k),
            Bucket::Loss => "   failed".to_string(),
        };
        println!("  {}: {:>6} ({:>5.1}%) {}", label, bin.count, pct, bar);
    }
}

fn simulate(
    vocab: VocabArgs,
    agent: AgentArgs,
    config: SimulationConfig,
    threads: Option<usize>,
    exhaustive: bool,
    output: OutputMode,
) -> anyhow::Result<()> {
    if let Some(threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("building the rayon thread pool")?;
    }

    let (allowed, possible) = vocab.load()?;
    let builder = agent.builder(&allowed, &possible)?;
    let runner = SimulationRunner::new(config);

    let batch = if exhaustive {
        runner.run_exhaustive(&allowed, &possible, |seed| builder.build(seed))?
    } else {
        runner.run(&allowed, &possible, |seed| builder.build(seed))?
    };
    let report = batch.report();

    match output {
        OutputMode::Summary => print_summary(builder.kind(), &batch, &report),
        OutputMode::Histogram => {
            print_summary(builder.kind(), &batch, &report);
            print_histogram(&report);
        }
        OutputMode::Json => {
            let json = JsonReport {
                agent: builder.kind().as_str(),
                seed: batch.seed,
                report: &report,
                failures: &batch.failures,
            };
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }
    Ok(())
}

fn solve(
    target: &str,
    vocab: VocabArgs,
    agent: AgentArgs,
    max_attempts: usize,
    seed: u64,
) -> anyhow::Result<()> {
    let (allowed, possible) = vocab.load()?;
    let target = Word::new(target).context("parsing target")?;
    let builder = agent.builder(&allowed, &possible)?;
    let mut agent = builder.build(seed);

    let mut session = GameSession::new(&allowed, &possible, target.clone(), max_attempts)?;
    println!("Solving for: {}", target.as_str().to_uppercase());
    println!();

    let outcome = session.play(&mut agent)?;
    for (i, attempt) in session.history().iter().enumerate() {
        println!(
            "Guess {}: {} → {}",
            i + 1,
            attempt.guess.as_str().to_uppercase(),
            attempt.feedback
        );
    }

    println!();
    match outcome.status() {
        GameStatus::Won => println!("Solved in {} guesses.", outcome.attempts_used()),
        _ => println!("Failed to solve within {} guesses.", outcome.max_attempts()),
    }
    Ok(())
}

fn score(guess: &str, target: &str) -> anyhow::Result<()> {
    let guess = Word::new(guess).context("parsing guess")?;
    let target = Word::new(target).context("parsing target")?;
    let feedback = evaluate(&guess, &target)?;
    println!("{} {}", feedback, feedback.to_code_string());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            vocab,
            agent,
            games,
            max_attempts,
            seed,
            parallel,
            threads,
            exhaustive,
            output,
        } => {
            if max_attempts == 0 {
                bail!("--max-attempts must be at least 1");
            }
            let config = SimulationConfig {
                num_games: games,
                max_attempts,
                seed,
                parallel,
            };
            simulate(vocab, agent, config, threads, exhaustive, output)
        }
        Commands::Solve {
            target,
            vocab,
            agent,
            max_attempts,
            seed,
        } => solve(&target, vocab, agent, max_attempts, seed),
        Commands::Score { guess, target } => score(&guess, &target),
    }
}
