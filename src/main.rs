use clap::Parser;
use tracing::info;

use ez_meal_plan_rs::cli::{Cli, Command};
use ez_meal_plan_rs::command::{command_verb, Flow, Session};
use ez_meal_plan_rs::error::Result;
use ez_meal_plan_rs::interface::{prompt_command, prompt_yes_no, ConsoleReporter, Reporter};
use ez_meal_plan_rs::state::Storage;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    let storage = Storage::new(cli.storage_config());
    let mut reporter = ConsoleReporter;
    let mut session = Session::open(storage, &mut reporter)?;

    match cli.command.unwrap_or_default() {
        Command::Shell => cmd_shell(&mut session, &mut reporter),
        Command::Run { words } => {
            session.execute(&words.join(" "), &mut reporter);
            Ok(())
        }
    }
}

/// Read and execute commands until the user says `bye`.
fn cmd_shell(session: &mut Session, reporter: &mut ConsoleReporter) -> Result<()> {
    reporter.report_message(&format!(
        "Loaded {} recipes and {} wish-list meals. Type 'help' for commands.",
        session.recipes().len(),
        session.wish().len()
    ));

    loop {
        let line = prompt_command()?;

        if command_verb(&line) == "clear"
            && !session.wish().is_empty()
            && !prompt_yes_no("Remove every meal from your wish list?", false)?
        {
            continue;
        }

        if session.execute(&line, reporter) == Flow::Exit {
            break;
        }
    }

    info!("session closed");
    reporter.report_message("Goodbye! Enjoy your meals.");
    Ok(())
}
