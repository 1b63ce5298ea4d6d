use std::fmt;
use std::path::PathBuf;

use quiz_core::model::{Level, TopicCatalog, TopicKey};
use serde_json::Value;
use storage::json::DEFAULT_DATA_DIR;
use storage::{JsonDirStore, QuestionRecord};

#[derive(Debug, Clone)]
struct Args {
    data_dir: PathBuf,
    per_level: u32,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidPerLevel { raw: String },
    InvalidDataDir { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidPerLevel { raw } => write!(f, "invalid --per-level value: {raw}"),
            ArgsError::InvalidDataDir { raw } => write!(f, "invalid --data-dir value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut data_dir =
            std::env::var("QUIZ_DATA_DIR").map_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);
        let mut per_level = 3;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--data-dir" => {
                    let value = require_value(&mut args, "--data-dir")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDataDir { raw: value });
                    }
                    data_dir = PathBuf::from(value);
                }
                "--per-level" => {
                    let value = require_value(&mut args, "--per-level")?;
                    per_level = value
                        .parse::<u32>()
                        .ok()
                        .filter(|n| *n > 0)
                        .ok_or_else(|| ArgsError::InvalidPerLevel { raw: value.clone() })?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            data_dir,
            per_level,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --data-dir <path>         Directory for question banks (default: data)");
    eprintln!("  --per-level <n>           Sample questions per difficulty (default: 3)");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DATA_DIR");
}

/// Sample questions for one topic, levels interleaved as in hand-authored banks.
fn sample_records(topic: &str, per_level: u32) -> Vec<QuestionRecord> {
    let mut records = Vec::new();
    for n in 1..=per_level {
        for level in Level::ALL {
            let correct = i64::from(n % 4);
            records.push(QuestionRecord {
                question: format!("{topic} ({level}) sample question #{n}: which option is marked correct?"),
                options: (0..4).map(|i| format!("Option {}", i + 1)).collect(),
                correct,
                // Easy rows omit the level to exercise the default.
                level: (level != Level::Easy).then(|| Value::from(level.as_str())),
            });
        }
    }
    records
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let store = JsonDirStore::new(&args.data_dir);
    let catalog = TopicCatalog::builtin();
    for topic in catalog.topics() {
        let key = TopicKey::from_topic(topic);
        store.write_topic(&key, &sample_records(topic, args.per_level))?;
        println!("wrote {}", store.path_for(&key).display());
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
