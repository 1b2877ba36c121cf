use std::error::Error;
use std::io::{self, Write};
use std::time::Duration;

use atty::Stream;
use clap::{Parser, Subcommand};
use rhymefetch_rs::{
    Output, Phase, QueryController, QueryMode, QueryView, WordClient, WordServiceConfig,
};
use serde_json::json;
use termimad::MadSkin;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser, Debug)]
#[command(
    name = "rhymefetch-rs",
    about = "Look up rhymes and synonyms from the Datamuse word service",
    version
)]
pub struct Cli {
    /// Emit JSON instead of human-readable output.
    #[arg(long, global = true)]
    json: bool,

    /// Word service base URL (defaults to the public Datamuse endpoint).
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<Url>,

    /// Outbound request timeout in seconds.
    #[arg(long, global = true, default_value_t = 10)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up words that rhyme with a term, grouped by syllable count.
    Rhymes {
        /// Term to find rhymes for.
        term: String,
    },
    /// Look up words with a meaning similar to a term.
    Synonyms {
        /// Term to find synonyms for.
        term: String,
    },
    /// Start an interactive lookup session with a saved-word list.
    Session,
}

pub async fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing();
    let controller = controller_from(&cli)?;
    match cli.command {
        Command::Rhymes { term } => {
            handle_lookup(&controller, QueryMode::Rhyme, term, cli.json).await
        }
        Command::Synonyms { term } => {
            handle_lookup(&controller, QueryMode::Synonym, term, cli.json).await
        }
        Command::Session => run_session(controller).await,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn controller_from(cli: &Cli) -> Result<QueryController, Box<dyn Error>> {
    let mut config =
        WordServiceConfig::default().timeout(Duration::from_secs(cli.timeout_secs.max(1)));
    if let Some(base_url) = cli.base_url.clone() {
        config = config.base_url(base_url);
    }
    Ok(QueryController::new(WordClient::with_config(config)?))
}

async fn handle_lookup(
    controller: &QueryController,
    mode: QueryMode,
    term: String,
    as_json: bool,
) -> Result<(), Box<dyn Error>> {
    controller.lookup(mode, &term).await;
    let view = controller.view();
    if view.phase == Phase::Error {
        return Err(view.description.into());
    }
    if as_json {
        let payload = view_payload(mode, &term, &view);
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        print_view(&view);
    }
    Ok(())
}

async fn run_session(controller: QueryController) -> Result<(), Box<dyn Error>> {
    println!("Interactive lookup session. Type a word for rhymes, /help for commands.");
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;
        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        match SessionAction::parse(&line) {
            SessionAction::Nothing => {}
            SessionAction::Quit => break,
            SessionAction::Help => print_session_help(),
            SessionAction::Save(word) => {
                controller.save(word);
                print_session_state(&controller);
            }
            SessionAction::ShowSaved => {
                println!(
                    "Saved words ({}): {}",
                    controller.saved_count(),
                    controller.saved_display()
                );
            }
            SessionAction::Lookup(mode, term) => {
                controller.lookup(mode, &term).await;
                print_session_state(&controller);
            }
            SessionAction::Unknown(command) => {
                println!("Unknown command {command:?}; /help lists the commands.");
            }
        }
    }
    Ok(())
}

/// One parsed line of session input. A bare word is a rhyme lookup, so plain
/// typing queries immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionAction {
    Nothing,
    Quit,
    Help,
    ShowSaved,
    Save(String),
    Lookup(QueryMode, String),
    Unknown(String),
}

impl SessionAction {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return SessionAction::Nothing;
        }
        let Some(command) = line.strip_prefix('/') else {
            return SessionAction::Lookup(QueryMode::Rhyme, line.to_string());
        };
        let (name, rest) = match command.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (command, ""),
        };
        match name {
            "quit" | "q" => SessionAction::Quit,
            "help" => SessionAction::Help,
            "saved" => SessionAction::ShowSaved,
            // Saves are recorded as-is, even when the argument is empty.
            "save" => SessionAction::Save(rest.to_string()),
            "rhyme" => SessionAction::Lookup(QueryMode::Rhyme, rest.to_string()),
            "syn" => SessionAction::Lookup(QueryMode::Synonym, rest.to_string()),
            other => SessionAction::Unknown(format!("/{other}")),
        }
    }
}

fn print_session_help() {
    println!("Commands:");
    println!("  <word>         look up rhymes for <word>");
    println!("  /rhyme <word>  look up rhymes for <word>");
    println!("  /syn <word>    look up words with a similar meaning");
    println!("  /save <word>   add <word> to the saved list");
    println!("  /saved         show the saved list");
    println!("  /quit          leave the session");
}

fn view_payload(mode: QueryMode, term: &str, view: &QueryView) -> serde_json::Value {
    let results = match &view.output {
        Output::Grouped(groups) => json!(
            groups
                .iter()
                .map(|group| {
                    json!({
                        "syllables": group.key.count(),
                        "heading": group.key.heading(),
                        "words": group.words.iter().map(|w| &w.word).collect::<Vec<_>>(),
                    })
                })
                .collect::<Vec<_>>()
        ),
        Output::Flat(words) => json!(words.iter().map(|w| &w.word).collect::<Vec<_>>()),
        _ => json!([]),
    };
    json!({
        "mode": mode.to_string(),
        "term": term,
        "description": view.description,
        "results": results,
    })
}

/// Redraws all three session regions: description, output, then the
/// saved-word line.
fn print_session_state(controller: &QueryController) {
    let view = controller.view();
    if view.phase != Phase::Idle {
        print_view(&view);
    }
    println!("Saved words: {}", controller.saved_display());
}

fn print_view(view: &QueryView) {
    println!("{}", view.description);
    match &view.output {
        Output::Grouped(groups) if stdout_is_tty() => {
            let skin = MadSkin::default();
            for group in groups {
                println!("{}", skin.inline(&format!("**{}:**", group.key)));
                for word in &group.words {
                    println!("  {}", word.word);
                }
            }
        }
        output => {
            let text = output.to_string();
            if !text.is_empty() {
                println!("{text}");
            }
        }
    }
}

fn stdout_is_tty() -> bool {
    atty::is(Stream::Stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_words_are_rhyme_lookups() {
        assert_eq!(
            SessionAction::parse("cat\n"),
            SessionAction::Lookup(QueryMode::Rhyme, "cat".to_string())
        );
        assert_eq!(SessionAction::parse("   \n"), SessionAction::Nothing);
    }

    #[test]
    fn slash_commands_route_by_name() {
        assert_eq!(
            SessionAction::parse("/syn cold"),
            SessionAction::Lookup(QueryMode::Synonym, "cold".to_string())
        );
        assert_eq!(
            SessionAction::parse("/save cat"),
            SessionAction::Save("cat".to_string())
        );
        assert_eq!(SessionAction::parse("/saved"), SessionAction::ShowSaved);
        assert_eq!(SessionAction::parse("/quit"), SessionAction::Quit);
        assert_eq!(
            SessionAction::parse("/bogus"),
            SessionAction::Unknown("/bogus".to_string())
        );
    }

    #[test]
    fn save_without_an_argument_saves_the_empty_string() {
        assert_eq!(
            SessionAction::parse("/save"),
            SessionAction::Save(String::new())
        );
        assert_eq!(
            SessionAction::parse("/save   "),
            SessionAction::Save(String::new())
        );
    }
}
