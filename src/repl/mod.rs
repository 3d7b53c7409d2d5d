//! REPL (Read-Eval-Print Loop) for share-link tokens

use crate::commands::{create_registry, CommandContext, CommandRegistry, CommandResult};
use crate::config::Config;
use anyhow::Result;
use colored::*;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RustylineResult};
use tracing::debug;

/// Interactive REPL over the command registry
pub struct Repl {
    editor: DefaultEditor,
    registry: CommandRegistry,
    ctx: CommandContext,
}

impl Repl {
    /// Create a new REPL instance
    pub fn new(config: Config) -> RustylineResult<Self> {
        Ok(Repl {
            editor: DefaultEditor::new()?,
            registry: create_registry(),
            ctx: CommandContext::new(config),
        })
    }

    /// Start the REPL loop
    pub fn run(&mut self) -> Result<()> {
        println!(
            "{} {}",
            "🔗".bright_yellow(),
            "Chordlink share-link codec".bright_cyan().bold()
        );
        println!(
            "Paste a token after {} or a URL after {}",
            "decode".cyan(),
            "link".cyan()
        );
        println!(
            "Type '{}' for more information, '{}' or {} to exit.\n",
            "help".bright_green(),
            "quit".bright_red(),
            "Ctrl+C".bright_red()
        );

        loop {
            let prompt = format!("{} ", "chordlink>".bright_magenta().bold());
            let line = match self.editor.readline(&prompt) {
                Ok(line) => line.trim().to_string(),
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    println!("{}", "Goodbye!".bright_cyan());
                    break;
                }
                Err(e) => return Err(anyhow::anyhow!("Readline error: {}", e)),
            };
            if line.is_empty() {
                continue;
            }
            let _ = self.editor.add_history_entry(&line);

            if !report(self.registry.execute(&line, &mut self.ctx), &line) {
                println!("{}", "Goodbye!".bright_cyan());
                break;
            }
        }

        Ok(())
    }
}

/// Print a command's outcome. Returns false when the loop should stop.
pub fn report(result: CommandResult, line: &str) -> bool {
    match result {
        CommandResult::Success => {}
        CommandResult::Message(msg) => println!("{}", msg),
        CommandResult::Exit => return false,
        CommandResult::Error(e) => {
            println!("{} {}", "Error:".bright_red().bold(), e.red());
        }
        CommandResult::NotACommand => {
            debug!(%line, "Unrecognised input");
            println!(
                "{} Unknown command '{}'. Type '{}' for a list.",
                "Error:".bright_red().bold(),
                line,
                "help".bright_green()
            );
        }
    }
    true
}

/// Run a single command without entering the loop
pub fn run_once(config: Config, line: &str) -> Result<()> {
    let registry = create_registry();
    let mut ctx = CommandContext::new(config);
    match registry.execute(line, &mut ctx) {
        CommandResult::Error(e) => anyhow::bail!(e),
        CommandResult::NotACommand => anyhow::bail!("Unknown command '{}'", line),
        other => {
            report(other, line);
            Ok(())
        }
    }
}

/// Convenience function to start the REPL
pub fn start(config: Config) -> Result<()> {
    let mut repl =
        Repl::new(config).map_err(|e| anyhow::anyhow!("Failed to initialize REPL: {}", e))?;
    repl.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_once_reports_failures() {
        assert!(run_once(Config::default(), "upgrade v4_0_0_1.2_1o_0_1").is_ok());
        assert!(run_once(Config::default(), "decode garbage").is_err());
        assert!(run_once(Config::default(), "frobnicate").is_err());
    }

    #[test]
    fn test_report_stops_on_exit() {
        assert!(!report(CommandResult::Exit, "quit"));
        assert!(report(CommandResult::Success, "help"));
    }
}
