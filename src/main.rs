use std::io::{self, BufRead, Write};

use anyhow::{bail, Context};
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use jumpboard::render::{final_line, render_board};
use jumpboard::{parse_seed, run_batch, BatchConfig, EngineConfig, Error, Playthrough, TurnEvent};

#[derive(Debug, Parser)]
#[command(
    name = "jumpboard",
    about = "Play jump/halt boards generated from a size and a seed",
    args_conflicts_with_subcommands = true
)]
struct Args {
    #[command(subcommand)]
    cmd: Option<Cmd>,

    #[command(flatten)]
    play: PlayArgs,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Play boards interactively (the default)
    Play(PlayArgs),

    /// Play many seeds and print a JSON summary
    Batch {
        /// Cells per board
        #[arg(long)]
        size: usize,

        /// Number of games
        #[arg(long, default_value_t = 100)]
        games: u64,

        /// Seed of the first game; game i uses offset + i
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        seed_offset: String,

        /// Turn limit per game (0 = unlimited)
        #[arg(long, default_value_t = 10_000)]
        max_turns: u64,

        /// Include per-game results in the output
        #[arg(long)]
        records: bool,
    },
}

#[derive(Debug, Clone, ClapArgs)]
struct PlayArgs {
    /// Board size for the first game (prompted for if omitted)
    #[arg(requires = "seed")]
    size: Option<String>,

    /// Seed for the first game
    #[arg(allow_hyphen_values = true)]
    seed: Option<String>,

    /// Turn limit per game (0 = unlimited)
    #[arg(long, default_value_t = 10_000)]
    max_turns: u64,

    /// Skip printing the board grid
    #[arg(long)]
    no_grid: bool,

    /// Play one game and exit without asking to continue
    #[arg(long)]
    once: bool,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();

    match args.cmd {
        Some(Cmd::Batch { size, games, seed_offset, max_turns, records }) => {
            batch(size, games, &seed_offset, max_turns, records)
        }
        Some(Cmd::Play(play_args)) => play(&play_args),
        None => play(&args.play),
    }
}

/// Logs go to stderr so game output on stdout stays clean.
/// Use `RUST_LOG` to override the default `warn` filter.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn turn_limit(max_turns: u64) -> Option<u64> {
    (max_turns > 0).then_some(max_turns)
}

fn parse_size(input: &str) -> anyhow::Result<usize> {
    let size: i64 = input
        .trim()
        .parse()
        .with_context(|| format!("board size {:?} is not an integer", input))?;
    // Negative sizes become 0 and are rejected as too short by the generator
    Ok(usize::try_from(size).unwrap_or(0))
}

fn parse_request(size: &str, seed: &str) -> anyhow::Result<(usize, u64)> {
    Ok((parse_size(size)?, parse_seed(seed)?))
}

fn parse_line(line: &str) -> anyhow::Result<(usize, u64)> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        [size, seed] => parse_request(size, seed),
        _ => bail!("expected two integers: board size and seed"),
    }
}

/// Prompt until a valid size/seed pair is entered. `None` on end of input.
fn prompt_request(lines: &mut impl Iterator<Item = io::Result<String>>) -> anyhow::Result<Option<(usize, u64)>> {
    loop {
        print!("Board Size and Seed: ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(None);
        };
        match parse_line(&line?) {
            Ok(request) => return Ok(Some(request)),
            Err(e) => eprintln!("error: {e:#}"),
        }
    }
}

fn ask_continue(lines: &mut impl Iterator<Item = io::Result<String>>) -> anyhow::Result<bool> {
    print!("continue? ");
    io::stdout().flush()?;

    match lines.next() {
        Some(line) => {
            let answer = line?;
            Ok(matches!(answer.trim(), "y" | "yes"))
        }
        None => Ok(false),
    }
}

fn play(args: &PlayArgs) -> anyhow::Result<()> {
    let stdin = io::stdin();
    play_lines(args, &mut stdin.lock().lines())
}

/// The interactive loop, reading answers from `lines`.
fn play_lines(args: &PlayArgs, lines: &mut impl Iterator<Item = io::Result<String>>) -> anyhow::Result<()> {
    let mut pending = match (&args.size, &args.seed) {
        (Some(size), Some(seed)) => Some(parse_request(size, seed)?),
        _ => None,
    };

    loop {
        let (size, seed) = match pending.take() {
            Some(request) => request,
            None => match prompt_request(lines)? {
                Some(request) => request,
                None => return Ok(()),
            },
        };

        match play_once(size, seed, args) {
            Ok(()) => {}
            // Generation failed before play started; ask for new input
            Err(e @ Error::InvalidLength { .. }) if !args.once => {
                eprintln!("error: {e}");
                continue;
            }
            Err(e @ Error::NonTerminating { .. }) => eprintln!("stopped: {e}"),
            Err(e) => return Err(e.into()),
        }

        if args.once || !ask_continue(lines)? {
            return Ok(());
        }
    }
}

fn play_once(size: usize, seed: u64, args: &PlayArgs) -> Result<(), Error> {
    let play = Playthrough::builder()
        .max_turns(turn_limit(args.max_turns))
        .build(size, seed)?;
    debug!(size, seed, "playthrough ready");

    if !args.no_grid {
        print!("{}", render_board(play.board()));
    }

    let outcome = play.run(&mut |event: &TurnEvent| println!("{event}"))?;
    println!("{}", final_line(&outcome));
    Ok(())
}

fn batch(size: usize, games: u64, seed_offset: &str, max_turns: u64, records: bool) -> anyhow::Result<()> {
    let mut engine = EngineConfig::default();
    engine.max_turns = turn_limit(max_turns);

    let config = BatchConfig::new()
        .with_board_len(size)
        .with_games(games)
        .with_seed_offset(parse_seed(seed_offset)?)
        .with_engine(engine)
        .with_records(records);

    let summary = run_batch(&config)?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(once: bool) -> PlayArgs {
        PlayArgs {
            size: None,
            seed: None,
            max_turns: 10_000,
            no_grid: true,
            once,
        }
    }

    fn input(lines: &[&str]) -> impl Iterator<Item = io::Result<String>> {
        lines.iter().map(|l| Ok(l.to_string())).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("10 42").unwrap(), (10, 42));
        assert_eq!(parse_line("  7\t3 ").unwrap(), (7, 3));
    }

    #[test]
    fn test_parse_line_rejects_bad_shape() {
        for line in ["10", "a b", "5 7 9", ""] {
            assert!(parse_line(line).is_err(), "{:?}", line);
        }
    }

    #[test]
    fn test_negative_seed_is_bit_cast() {
        assert_eq!(parse_line("5 -1").unwrap(), (5, u64::MAX));
        assert_eq!(parse_line("5 -2").unwrap(), (5, u64::MAX - 1));
    }

    #[test]
    fn test_negative_size_clamps_to_invalid_length() {
        let (size, seed) = parse_line("-3 5").unwrap();
        assert_eq!((size, seed), (0, 5));

        let err = Playthrough::new(size, seed).unwrap_err();
        assert_eq!(err, Error::InvalidLength { length: 0 });
    }

    #[test]
    fn test_prompt_skips_malformed_lines() {
        let mut lines = input(&["10", "a b", "5 7 9", "6 2", "4 4"]);

        assert_eq!(prompt_request(&mut lines).unwrap(), Some((6, 2)));
        assert_eq!(lines.next().unwrap().unwrap(), "4 4");
        assert_eq!(prompt_request(&mut lines).unwrap(), None);
    }

    #[test]
    fn test_invalid_length_prompts_again() {
        // "-3 5" is rejected, "4 1" is played, "n" declines another game
        let mut lines = input(&["-3 5", "4 1", "n", "left over"]);

        play_lines(&args(false), &mut lines).unwrap();

        assert_eq!(lines.next().unwrap().unwrap(), "left over");
    }

    #[test]
    fn test_continue_answers() {
        let mut lines = input(&["y", "yes", " y ", "n", "Y"]);
        assert!(ask_continue(&mut lines).unwrap());
        assert!(ask_continue(&mut lines).unwrap());
        assert!(ask_continue(&mut lines).unwrap());
        assert!(!ask_continue(&mut lines).unwrap());
        assert!(!ask_continue(&mut lines).unwrap());
        assert!(!ask_continue(&mut lines).unwrap());
    }

    #[test]
    fn test_once_fails_on_invalid_length() {
        let mut play = args(true);
        play.size = Some("1".to_string());
        play.seed = Some("9".to_string());

        let err = play_lines(&play, &mut input(&[])).unwrap_err();
        assert!(err.to_string().contains("length"), "{err}");
    }

    #[test]
    fn test_cli_parses_batch() {
        let args = Args::try_parse_from(["jumpboard", "batch", "--size", "12", "--seed-offset", "-4"]).unwrap();
        match args.cmd {
            Some(Cmd::Batch { size, games, seed_offset, max_turns, records }) => {
                assert_eq!(size, 12);
                assert_eq!(games, 100);
                assert_eq!(parse_seed(&seed_offset).unwrap(), (-4i64) as u64);
                assert_eq!(turn_limit(max_turns), Some(10_000));
                assert!(!records);
            }
            other => panic!("expected batch, got {:?}", other),
        }
        assert_eq!(turn_limit(0), None);
    }
}
