mod render;

use anyhow::Result;
use colored::Colorize;
use rustyline::highlight::Highlighter;
use rustyline::Editor;
use rustyline_derive::{Completer, Helper, Hinter, Validator};
use sortvis::prelude::*;
use sortvis::{ENGINE_NAME, VERSION as LIB_VERSION};
use std::borrow::Cow;
use std::env;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

const SHELL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// A custom helper struct for rustyline that enables syntax highlighting.
#[derive(Completer, Helper, Hinter, Validator)]
struct ShellHighlighter;

impl Highlighter for ShellHighlighter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if let Some((command, rest)) = line.split_once(' ') {
            Cow::Owned(format!("{} {}", command.yellow().bold(), rest.yellow()))
        } else {
            Cow::Owned(line.yellow().bold().to_string())
        }
    }
    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

fn print_banner() {
    if env::var("QUIET_MODE").is_ok() {
        return;
    }
    const LOGO_TEXT: &str = include_str!("../logo.log");
    println!("{}", LOGO_TEXT.cyan());

    let version_string = format!(
        "          Shell   v{:<8} Library   v{:<8}",
        SHELL_VERSION, LIB_VERSION
    );
    let rule = "-".repeat(79);
    println!("{}", rule.dimmed());
    println!("{}", version_string);
    let license_blurb = "
    This software is provided 'as is', without warranty of any kind.
    Distributed under the MIT OR Apache-2.0 license. Use at your own risk.
    ";
    println!("{}", license_blurb.dimmed());
    println!("{}", rule.dimmed());
}

/// Prints run lifecycle events while `show_events` is set.
fn spawn_event_listener(controller: &RunController, show_events: Arc<AtomicBool>) {
    let mut run_rx = controller.subscribe_run_events();
    tokio::spawn(async move {
        while let Ok(event) = run_rx.recv().await {
            if show_events.load(Ordering::Relaxed) {
                println!("<-- [RUN EVENT] {:?}", event);
            }
        }
    });
}

fn print_help() {
    println!("Available commands:");
    println!("  generate [N]          - Generates N random values (default from config).");
    println!("  show                  - Prints the current sequence and settings.");
    println!("  algo <NAME>           - Selects bubble, selection, insertion, quick or merge.");
    println!("  speed <X>             - Sets the speed multiplier (delay = base / X).");
    println!("  mode <MODE>           - Selects boxes, bars or sized-boxes.");
    println!("  sort                  - Starts animating the selected algorithm.");
    println!("  stop                  - Cancels the running animation.");
    println!("  describe [NAME]       - Explains an algorithm.");
    println!("  code <LANG>           - Prints the algorithm in C, C#, Java, Python, JavaScript.");
    println!("  lang vi|en            - Switches the interface labels.");
    println!("  events on|off         - Toggles the run lifecycle event stream.");
    println!("  exit                  - Quits the shell.");
}

fn print_description(algorithm: AlgorithmId, language: UiLanguage) {
    let description = sortvis::content::describe(algorithm);
    println!(
        "{} - {}",
        language.text_or_key("section.desc").dimmed(),
        algorithm.label().cyan().bold()
    );
    println!("  {}", description.summary);
    println!("  Complexity: {}", description.complexity);
    println!("  Stable:     {}", if description.stable { "yes" } else { "no" });
    let languages: Vec<_> = description.languages().collect();
    println!("  Code:       {}", languages.join(", "));
}

fn print_show(session: &Session, language: UiLanguage) {
    println!(
        "{}",
        render::render_sequence(session.sequence(), session.mode())
    );
    let state = if session.is_sorting() { "sorting" } else { "idle" };
    println!(
        "  {}: {}  {}: {}x  {}: {}  {}: {} ({})",
        language.text_or_key("label.algorithm"),
        session.algorithm(),
        language.text_or_key("label.speed"),
        session.speed(),
        language.text_or_key("label.visual"),
        session.mode(),
        language.text_or_key("label.elements"),
        session.sequence().len(),
        state
    );
}

async fn start_sort(session: &mut Session) -> Result<(), SortvisError> {
    let mode = session.mode();
    let algorithm = session.algorithm();
    let handle = session
        .request_start(move |step| {
            println!("  {:>9} {}", step.kind, render::render_step(step, mode));
        })
        .await?;
    println!("--> Started {} as run {:?}.", algorithm.label(), handle.id());

    // Report the result once the driver exits, without blocking the prompt.
    tokio::spawn(async move {
        match handle.wait().await {
            Ok(outcome) => println!(
                "<-- [{}] {:?} after {} steps: {:?}",
                outcome.algorithm, outcome.status, outcome.steps, outcome.sequence
            ),
            Err(e) => println!("<-- Run ended without an outcome: {}", e),
        }
    });
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    print_banner();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config_path = env::args().nth(1).map(PathBuf::from);
    let config = SortvisConfig::load(config_path.as_deref())?;
    let default_count = config.element_count;
    let mut language = config.language;

    let controller: RunController = RunController::new();
    let show_events = Arc::new(AtomicBool::new(false));
    spawn_event_listener(&controller, show_events.clone());

    let mut session = Session::with_controller(config, controller)?;
    info!("{} ready with {} elements.", ENGINE_NAME.cyan(), default_count);

    let mut rl = Editor::new()?;
    rl.set_helper(Some(ShellHighlighter));

    println!("{} is running. Type 'help' for commands or 'exit' to quit.", ENGINE_NAME.cyan());

    loop {
        let prompt = format!("{}", ">> ".cyan().bold());
        let readline = rl.readline(&prompt);
        match readline {
            Ok(line) => {
                rl.add_history_entry(line.as_str())?;
                let args = line.split_whitespace().collect::<Vec<_>>();

                if let Some(command) = args.first() {
                    match *command {
                        "generate" => {
                            let count = match args.get(1).map(|s| s.parse::<usize>()) {
                                None => Ok(default_count),
                                Some(parsed) => parsed,
                            };
                            match count {
                                Ok(count) => {
                                    let generated =
                                        session.request_randomize(count).map(|values| values.len());
                                    match generated {
                                        Ok(_) => print_show(&session, language),
                                        Err(e) => println!("Error: {}", e),
                                    }
                                }
                                Err(_) => println!("Error: element count must be a number."),
                            }
                        }
                        "show" => print_show(&session, language),
                        "algo" => match args.get(1).map(|s| s.parse::<AlgorithmId>()) {
                            Some(Ok(algorithm)) => {
                                if session.select_algorithm(algorithm) {
                                    println!("--> Stopped the running animation.");
                                }
                                println!("--> Selected {}.", algorithm.label());
                            }
                            Some(Err(e)) => println!("Error: {}", e),
                            None => println!("Usage: algo <NAME>"),
                        },
                        "speed" => match args.get(1).map(|s| s.parse::<f64>()) {
                            Some(Ok(speed)) => match session.request_set_pace(speed) {
                                Ok(pace) => println!("--> Speed {}x ({} per step).", speed, pace),
                                Err(e) => println!("Error: {}", e),
                            },
                            Some(Err(_)) => println!("Error: speed must be a number."),
                            None => println!("Usage: speed <X>"),
                        },
                        "mode" => match args.get(1).map(|s| s.parse::<VisualizationMode>()) {
                            Some(Ok(mode)) => {
                                session.set_mode(mode);
                                println!("--> Visualization mode is now {}.", mode);
                            }
                            Some(Err(e)) => println!("Error: {}", e),
                            None => println!("Usage: mode <MODE>"),
                        },
                        "sort" => {
                            if let Err(e) = start_sort(&mut session).await {
                                println!("Error: {}", e);
                            }
                        }
                        "stop" => match session.request_cancel() {
                            Some(id) => println!("--> Cancelling run {:?}.", id),
                            None => println!("--> Nothing is running."),
                        },
                        "describe" => match args.get(1).map(|s| s.parse::<AlgorithmId>()) {
                            Some(Ok(algorithm)) => print_description(algorithm, language),
                            Some(Err(e)) => println!("Error: {}", e),
                            None => print_description(session.algorithm(), language),
                        },
                        "code" => match args.get(1) {
                            Some(listing) => match session.describe().snippet(listing) {
                                Some(source) => println!("{}", source),
                                None => println!(
                                    "Error: no '{}' listing for {}.",
                                    listing,
                                    session.algorithm()
                                ),
                            },
                            None => println!("Usage: code <LANG>"),
                        },
                        "events" => match args.get(1) {
                            Some(&"on") => {
                                show_events.store(true, Ordering::Relaxed);
                                println!("--> Started printing run events.");
                            }
                            Some(&"off") => {
                                show_events.store(false, Ordering::Relaxed);
                                println!("--> Stopped printing run events.");
                            }
                            _ => println!("Usage: events on|off"),
                        },
                        "lang" => match args.get(1).map(|s| s.parse::<UiLanguage>()) {
                            Some(Ok(choice)) => {
                                language = choice;
                                println!("--> {}", language.text_or_key("desc.text"));
                            }
                            Some(Err(e)) => println!("Error: {}", e),
                            None => println!("Usage: lang vi|en"),
                        },
                        "help" => print_help(),
                        "exit" => break,
                        _ => println!("Unknown command: '{}'. Type 'help'.", line.trim()),
                    }
                }
            }
            Err(_) => break,
        }
    }

    if let Some(id) = session.request_cancel() {
        info!("Cancelled run {:?} on exit.", id);
    }
    println!("Exiting sortshell...");
    Ok(())
}
