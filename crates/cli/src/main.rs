//! Terminal front end for the slideshow quiz.

mod remote;

use anyhow::{bail, Context, Result};
use clap::Parser;
use quiz_core::{
    Advance, AnswerOutcome, FileSource, LoadedSlides, Loader, QuizState, ScoreSummary, Session,
    TextRenderer, DEFAULT_LOCATION,
};
use remote::{is_remote, HttpSource};
use std::io::{BufRead, Write};
use std::time::Duration;

/// Play a slideshow quiz in the terminal.
#[derive(Parser, Debug)]
#[command(name = "slide-quiz")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Question document: a file path or an http(s) URL
    #[arg(default_value = DEFAULT_LOCATION)]
    source: String,

    /// Seconds to wait for a remote document before using the built-in questions
    #[arg(short, long, default_value = "10")]
    timeout: u64,

    /// Answer non-interactively, e.g. "0:0:2,1:0:1" (slide:question:option)
    #[arg(short, long)]
    answers: Option<String>,

    /// Print the final score as JSON (with --answers)
    #[arg(short, long)]
    json: bool,

    /// Hide the right/wrong marks next to answered options
    #[arg(long)]
    no_marks: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// A line typed at the interactive prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Answer a question on the current slide; `None` means the first unanswered one.
    Answer {
        question: Option<usize>,
        option: usize,
    },
    Next,
    Previous,
    Restart,
    Quit,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let loaded = load(&args);
    if loaded.is_fallback() {
        eprintln!(
            "Could not load {}; using the built-in questions.",
            args.source
        );
    }

    let mut session = Session::new(loaded.slides);
    let renderer = TextRenderer::new().with_marks(!args.no_marks);

    match &args.answers {
        Some(script) => {
            let answers = parse_answers(script)?;
            let summary = run_scripted(&mut session, &answers);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", renderer.render_results(&summary));
            }
        }
        None => {
            let stdin = std::io::stdin();
            run_interactive(&mut session, &renderer, stdin.lock())?;
        }
    }

    Ok(())
}

/// Load slides from the configured source, falling back to the built-in set.
fn load(args: &Args) -> LoadedSlides {
    if is_remote(&args.source) {
        let source = HttpSource::new(&args.source).with_timeout(Duration::from_secs(args.timeout));
        Loader::new(source).load()
    } else {
        Loader::new(FileSource::new(&args.source)).load()
    }
}

/// Parse a comma-separated list of `slide:question:option` triples.
fn parse_answers(script: &str) -> Result<Vec<(usize, usize, usize)>> {
    script
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|triple| {
            let parts: Vec<&str> = triple.split(':').collect();
            if parts.len() != 3 {
                bail!("Expected slide:question:option, got \"{}\"", triple);
            }
            let mut nums = [0usize; 3];
            for (slot, part) in nums.iter_mut().zip(&parts) {
                *slot = part
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid number in \"{}\"", triple))?;
            }
            Ok((nums[0], nums[1], nums[2]))
        })
        .collect()
}

/// Apply scripted answers, then advance through every slide to completion.
fn run_scripted(session: &mut Session, answers: &[(usize, usize, usize)]) -> ScoreSummary {
    session.start();
    for &(slide, question, option) in answers {
        let outcome = session.select_answer(slide, question, option);
        log::debug!("{}:{}:{} -> {:?}", slide, question, option, outcome);
    }

    loop {
        if let Advance::Finished { summary } = session.advance() {
            return summary;
        }
    }
}

/// Parse one line typed at the prompt.
fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim().to_lowercase();
    match line.as_str() {
        "n" | "next" => return Some(Command::Next),
        "p" | "prev" | "previous" => return Some(Command::Previous),
        "r" | "restart" => return Some(Command::Restart),
        "q" | "quit" | "exit" => return Some(Command::Quit),
        _ => {}
    }

    let letter = line.chars().last()?;
    let option = option_from_letter(letter)?;
    let number = &line[..line.len() - letter.len_utf8()];
    if number.is_empty() {
        return Some(Command::Answer {
            question: None,
            option,
        });
    }

    let number: usize = number.trim().parse().ok()?;
    if number == 0 {
        return None;
    }
    Some(Command::Answer {
        question: Some(number - 1),
        option,
    })
}

fn option_from_letter(letter: char) -> Option<usize> {
    match letter {
        'a' => Some(0),
        'b' => Some(1),
        'c' => Some(2),
        'd' => Some(3),
        _ => None,
    }
}

/// First question on the current slide that has no answer yet.
fn first_unanswered(session: &Session) -> Option<usize> {
    let snapshot = session.snapshot();
    snapshot
        .slide?
        .questions
        .iter()
        .position(|q| !q.locked)
}

/// Answer a question on the current slide. Returns a message when nothing was recorded.
fn answer(session: &mut Session, question: Option<usize>, option: usize) -> Option<&'static str> {
    if session.state() == QuizState::Completed {
        return Some("The quiz is finished. Type r to restart, p to review or q to quit.");
    }

    let Some(question) = question.or_else(|| first_unanswered(session)) else {
        return Some("Every question on this slide is answered.");
    };
    match session.select_current(question, option) {
        AnswerOutcome::Locked => Some("That question is already answered."),
        AnswerOutcome::Ignored => Some("No such question or option."),
        AnswerOutcome::Recorded { .. } => None,
    }
}

/// Drive the session from lines read on `input`.
fn run_interactive<R: BufRead>(
    session: &mut Session,
    renderer: &TextRenderer,
    input: R,
) -> Result<()> {
    let mut stdout = std::io::stdout();
    session.start();
    print!("{}", renderer.render(&session.snapshot()));
    prompt(&mut stdout)?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        let Some(command) = parse_command(&line) else {
            println!("Commands: a-d, <n><letter> (e.g. 2b), n, p, r, q");
            prompt(&mut stdout)?;
            continue;
        };

        match command {
            Command::Quit => break,
            Command::Answer { question, option } => {
                if let Some(message) = answer(session, question, option) {
                    println!("{}", message);
                    if session.state() == QuizState::Completed {
                        prompt(&mut stdout)?;
                        continue;
                    }
                }
            }
            Command::Next => {
                session.advance();
            }
            Command::Previous => {
                session.retreat();
            }
            Command::Restart => session.restart(),
        }

        println!();
        print!("{}", renderer.render(&session.snapshot()));
        if session.snapshot().results.is_some() {
            println!("\n[r] Restart   [q] Quit");
        }
        prompt(&mut stdout)?;
    }

    Ok(())
}

fn prompt(stdout: &mut std::io::Stdout) -> Result<()> {
    print!("> ");
    stdout.flush().context("Failed to flush stdout")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::fallback_slides;

    #[test]
    fn test_parse_answers() {
        let answers = parse_answers("0:0:2, 1:0:1").unwrap();
        assert_eq!(answers, vec![(0, 0, 2), (1, 0, 1)]);
        assert!(parse_answers("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_answers_rejects_malformed_triples() {
        assert!(parse_answers("0:0").is_err());
        assert!(parse_answers("0:x:1").is_err());
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("n"), Some(Command::Next));
        assert_eq!(parse_command(" P "), Some(Command::Previous));
        assert_eq!(parse_command("restart"), Some(Command::Restart));
        assert_eq!(parse_command("q"), Some(Command::Quit));
        assert_eq!(
            parse_command("c"),
            Some(Command::Answer {
                question: None,
                option: 2
            })
        );
        assert_eq!(
            parse_command("2B"),
            Some(Command::Answer {
                question: Some(1),
                option: 1
            })
        );
        assert_eq!(parse_command("0a"), None);
        assert_eq!(parse_command("e"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn test_run_scripted() {
        let mut session = Session::new(fallback_slides());
        let summary = run_scripted(&mut session, &[(0, 0, 2), (0, 1, 0), (0, 1, 1)]);
        assert_eq!(summary.correct, 1);
        assert_eq!(summary.answered, 2);
        assert_eq!(summary.accuracy, 50);
    }

    #[test]
    fn test_first_unanswered() {
        let mut session = Session::new(fallback_slides());
        assert_eq!(first_unanswered(&session), Some(0));
        session.select_current(0, 2);
        assert_eq!(first_unanswered(&session), Some(1));
        session.select_current(1, 2);
        assert_eq!(first_unanswered(&session), None);
    }

    #[test]
    fn test_answer_messages() {
        let mut session = Session::new(fallback_slides());
        assert_eq!(answer(&mut session, None, 2), None);
        assert_eq!(
            answer(&mut session, Some(0), 1),
            Some("That question is already answered.")
        );
        assert_eq!(
            answer(&mut session, Some(5), 1),
            Some("No such question or option.")
        );
        assert_eq!(answer(&mut session, None, 1), None);
        assert_eq!(
            answer(&mut session, None, 0),
            Some("Every question on this slide is answered.")
        );
    }

    #[test]
    fn test_answer_after_finish_points_to_restart() {
        let mut session = Session::new(fallback_slides());
        session.advance();
        let message = answer(&mut session, None, 0).unwrap();
        assert!(message.starts_with("The quiz is finished."));
        assert_eq!(session.answered_count(), 0);
    }

    #[test]
    fn test_run_interactive_to_completion() {
        let mut session = Session::new(fallback_slides());
        let input = std::io::Cursor::new("c\nb\nn\nq\n");
        run_interactive(&mut session, &TextRenderer::new(), input).unwrap();

        let score = session.score();
        assert_eq!(score.correct, 2);
        assert_eq!(score.accuracy, 100);
    }
}
