use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use log::info;
use quiz_core::model::Level;
use services::{QuizServices, QuizSession};
use storage::json::DEFAULT_DATA_DIR;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDataDir { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
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

struct Args {
    data_dir: PathBuf,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--data-dir <path>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --data-dir data");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DATA_DIR, RUST_LOG");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut data_dir = std::env::var("QUIZ_DATA_DIR")
            .map_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--data-dir" => {
                    let value = require_value(args, "--data-dir")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDataDir { raw: value });
                    }
                    data_dir = PathBuf::from(value);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { data_dir })
    }
}

/// Line-oriented terminal front end. Only talks to the session through its
/// public operations.
struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    /// Prompt until the user picks a number in `1..=max`; `None` on EOF or `q`.
    fn pick(&mut self, prompt: &str, max: usize) -> io::Result<Option<usize>> {
        loop {
            write!(self.output, "{prompt} [1-{max}, q to quit]: ")?;
            self.output.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let line = line.trim();
            if line.eq_ignore_ascii_case("q") {
                return Ok(None);
            }
            match line.parse::<usize>() {
                Ok(n) if (1..=max).contains(&n) => return Ok(Some(n)),
                _ => writeln!(self.output, "Please enter a number between 1 and {max}.")?,
            }
        }
    }

    /// Hold the feedback until the user continues. `false` on EOF or `q`.
    fn wait_to_continue(&mut self) -> io::Result<bool> {
        write!(self.output, "Press Enter to continue (q to quit): ")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(false);
        }
        Ok(!line.trim().eq_ignore_ascii_case("q"))
    }

    fn choose_topic(&mut self, services: &QuizServices) -> io::Result<Option<(String, Level)>> {
        let catalog = services.topics();
        writeln!(self.output, "\nTopics:")?;
        for (i, topic) in catalog.topics().enumerate() {
            writeln!(self.output, "  {}. {topic}", i + 1)?;
        }
        let Some(pick) = self.pick("Topic", catalog.len())? else {
            return Ok(None);
        };
        let Some((topic, levels)) = catalog.iter().nth(pick - 1) else {
            return Ok(None);
        };

        let levels: Vec<Level> = levels.iter().copied().collect();
        writeln!(self.output, "Difficulty:")?;
        for (i, level) in levels.iter().enumerate() {
            writeln!(self.output, "  {}. {level}", i + 1)?;
        }
        let Some(pick) = self.pick("Difficulty", levels.len())? else {
            return Ok(None);
        };
        Ok(Some((topic.to_owned(), levels[pick - 1])))
    }

    /// Ask questions until the session completes. Returns `false` if the user quit.
    fn run_quiz(&mut self, session: &mut QuizSession) -> io::Result<bool> {
        while let Some(question) = session.current_question() {
            let progress = session.progress();
            let Some(position) = progress.position() else {
                break;
            };
            writeln!(self.output, "\nQuestion {position} of {}", progress.total)?;
            writeln!(self.output, "{}", question.text())?;
            let options = question.options().len();
            for (i, option) in question.options().iter().enumerate() {
                writeln!(self.output, "  {}. {option}", i + 1)?;
            }

            let Some(pick) = self.pick("Answer", options)? else {
                return Ok(false);
            };
            // An answer is only rejected before a topic loads or after completion.
            let Ok(outcome) = session.record_answer(pick - 1) else {
                break;
            };
            if outcome.is_correct {
                writeln!(self.output, "Correct!")?;
            } else {
                writeln!(
                    self.output,
                    "Incorrect. The correct answer is: {}",
                    outcome.correct_answer
                )?;
            }
            if !self.wait_to_continue()? {
                return Ok(false);
            }
            session.dismiss_feedback();
        }
        Ok(true)
    }

    fn print_results(&mut self, session: &QuizSession) -> io::Result<()> {
        let results = session.results();
        writeln!(self.output, "\nQuiz complete!")?;
        if let (Some(topic), Some(level)) = (&results.topic, results.difficulty) {
            writeln!(self.output, "Topic: {topic} ({level})")?;
        }
        writeln!(self.output, "Score: {results}")?;
        writeln!(self.output, "{}", results.tier().headline())?;

        writeln!(self.output, "\nReview:")?;
        for item in session.review() {
            let mark = if item.is_correct { "ok" } else { "x" };
            writeln!(self.output, "{}. [{mark}] {}", item.number, item.question)?;
            let yours = item.user_option.as_deref().unwrap_or("(no such option)");
            writeln!(self.output, "   your answer: {yours}")?;
            if !item.is_correct {
                let correct = item.correct_option.as_deref().unwrap_or_default();
                writeln!(self.output, "   correct answer: {correct}")?;
            }
        }
        Ok(())
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    info!("using question banks in {}", args.data_dir.display());
    let services = QuizServices::json_dir(&args.data_dir);
    let mut session = services.new_session();

    let stdin = io::stdin();
    let mut terminal = Terminal {
        input: stdin.lock(),
        output: io::stdout().lock(),
    };

    loop {
        let Some((topic, level)) = terminal.choose_topic(&services)? else {
            break;
        };
        if let Err(err) = services.load_topic(&mut session, &topic, level) {
            writeln!(terminal.output, "{err}")?;
            continue;
        }
        if !terminal.run_quiz(&mut session)? {
            break;
        }
        terminal.print_results(&session)?;
        session.reset();
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::{InMemoryStore, QuestionRepository};

    fn services() -> QuizServices {
        let store = InMemoryStore::new();
        store
            .insert_raw(
                "Tools",
                r#"[
                    {"question": "First?", "options": ["yes", "no"], "correct": 0},
                    {"question": "Second?", "options": ["yes", "no"], "correct": 0}
                ]"#,
            )
            .unwrap();
        QuizServices::new(QuestionRepository::in_memory(store))
    }

    fn play(input: &str) -> (bool, QuizSession, String) {
        let services = services();
        let mut session = services.start_session("Tools", Level::Easy).unwrap();
        let mut terminal = Terminal {
            input: input.as_bytes(),
            output: Vec::new(),
        };
        let finished = terminal.run_quiz(&mut session).unwrap();
        if finished {
            terminal.print_results(&session).unwrap();
        }
        (finished, session, String::from_utf8(terminal.output).unwrap())
    }

    #[test]
    fn feedback_waits_for_continue_before_next_question() {
        let (finished, session, out) = play("1\n\n2\n\n");
        assert!(finished);
        assert!(session.is_completed());
        assert!(out.contains("Question 1 of 2"));
        assert!(out.contains("Question 2 of 2"));
        assert!(!out.contains("Question 3"));

        let feedback = out.find("Correct!").unwrap();
        let prompt = out.find("Press Enter to continue").unwrap();
        let second = out.find("Question 2 of 2").unwrap();
        assert!(feedback < prompt && prompt < second);
    }

    #[test]
    fn results_show_score_tier() {
        let (_, _, out) = play("1\n\n1\n\n");
        assert!(out.contains("Score: 2/2 (100.0%)"));
        assert!(out.contains("Excellent work!"));

        let (_, _, out) = play("1\n\n2\n\n");
        assert!(out.contains("Score: 1/2 (50.0%)"));
        assert!(out.contains("Keep studying!"));
    }

    #[test]
    fn quitting_at_continue_stops_the_quiz() {
        let (finished, session, out) = play("1\nq\n");
        assert!(!finished);
        assert_eq!(session.cursor(), 1);
        assert!(!out.contains("Question 2 of 2"));
    }
}
