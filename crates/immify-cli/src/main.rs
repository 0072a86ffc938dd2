//! Immify terminal frontend.
//!
//! Three surfaces driven from one rustyline REPL: a landing screen with
//! the featured destinations, the chat screen talking to the advisory
//! endpoint, and the auth-gated admin screen for knowledge entries.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use immify_app::{AdminController, ChatController, EntryForm, Notifier, SubmitOutcome};
use immify_backend::{AdvisorApiAgent, SupabaseAuthClient, SupabaseKnowledgeRepository};
use immify_core::{
    BackendConfig, ChatMessage, MessageRole, PRODUCT_TAGLINE, PRODUCT_TITLE, featured_destinations,
};

#[derive(Parser)]
#[command(name = "immify")]
#[command(about = "Immify - StudyAbroad AI Advisor", long_about = None)]
struct Cli {
    /// Service base URL (overrides the config file and environment)
    #[arg(long)]
    url: Option<String>,

    /// Anon credential (overrides the config file and environment)
    #[arg(long)]
    anon_key: Option<String>,
}

/// CLI helper for rustyline that provides completion, highlighting, and hints
/// for the current screen's commands.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self { commands: vec![] }
    }

    fn set_commands(&mut self, commands: &[&str]) {
        self.commands = commands.iter().map(|cmd| cmd.to_string()).collect();
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        let candidates: Vec<Pair> = self
            .commands
            .iter()
            .filter(|cmd| !line.is_empty() && cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if self.commands.iter().any(|cmd| cmd == line.trim()) {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if !line.is_empty() && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// Notifier that renders transient notifications as colored lines.
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn success(&self, message: &str) {
        println!("{}", message.green());
    }

    fn error(&self, message: &str) {
        eprintln!("{}", message.red());
    }
}

/// How a screen was left.
enum ScreenExit {
    Back,
    Quit,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    // ===== Backend Initialization =====
    let notifier: Arc<dyn Notifier> = Arc::new(TerminalNotifier);
    let agent = Arc::new(AdvisorApiAgent::new(&config));
    let auth = Arc::new(SupabaseAuthClient::new(&config));
    let knowledge =
        Arc::new(SupabaseKnowledgeRepository::new(&config).with_auth(auth.clone()));

    let chat = ChatController::new(agent, notifier.clone());
    let admin = AdminController::new(auth, knowledge, notifier);

    // ===== REPL Setup =====
    let mut rl = Editor::<CliHelper, DefaultHistory>::new()?;
    rl.set_helper(Some(CliHelper::new()));

    landing_loop(&mut rl, &chat, &admin).await
}

fn resolve_config(cli: &Cli) -> Result<BackendConfig> {
    // Each field resolves flag > config file > environment.
    Ok(BackendConfig::resolve(
        None,
        cli.url.as_deref(),
        cli.anon_key.as_deref(),
    )?)
}

fn set_commands(rl: &mut Editor<CliHelper, DefaultHistory>, commands: &[&str]) {
    if let Some(helper) = rl.helper_mut() {
        helper.set_commands(commands);
    }
}

fn print_landing() {
    println!();
    println!("{}", format!("=== {PRODUCT_TITLE} ===").bright_magenta().bold());
    println!("{}", PRODUCT_TAGLINE.bright_black());
    println!();
    for destination in featured_destinations() {
        println!(
            "  {}  {}",
            format!("{:<10}", destination.name).bold(),
            destination.description
        );
    }
    println!();
    println!(
        "{}",
        "Type 'chat' to start chatting, 'admin' for the admin portal, or 'quit' to exit."
            .bright_black()
    );
}

async fn landing_loop(
    rl: &mut Editor<CliHelper, DefaultHistory>,
    chat: &ChatController,
    admin: &AdminController,
) -> Result<()> {
    print_landing();

    loop {
        set_commands(rl, &["chat", "admin", "quit"]);

        match rl.readline("immify> ") {
            Ok(line) => {
                let trimmed = line.trim();
                match trimmed {
                    "" => continue,
                    "quit" | "exit" => break,
                    "chat" => {
                        if let ScreenExit::Quit = chat_screen(rl, chat).await? {
                            break;
                        }
                        print_landing();
                    }
                    "admin" => {
                        if let ScreenExit::Quit = admin_screen(rl, admin).await? {
                            break;
                        }
                        print_landing();
                    }
                    _ => println!("{}", "Unknown command".bright_black()),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    println!("{}", "Goodbye!".bright_green());
    Ok(())
}

fn print_message(message: &ChatMessage) {
    match message.role {
        MessageRole::User => println!("{}", format!("> {}", message.content).green()),
        MessageRole::Assistant => {
            for line in message.content.lines() {
                println!("{}", line.bright_blue());
            }
        }
    }
}

async fn chat_screen(
    rl: &mut Editor<CliHelper, DefaultHistory>,
    chat: &ChatController,
) -> Result<ScreenExit> {
    set_commands(rl, &["/back", "/quit"]);

    println!();
    println!("{}", "=== Chat ===".bright_magenta().bold());
    println!(
        "{}",
        "Type a message, '/back' to return, or '/quit' to exit.".bright_black()
    );
    for message in chat.transcript().await {
        print_message(&message);
    }

    loop {
        match rl.readline("you> ") {
            Ok(line) => {
                let trimmed = line.trim();
                match trimmed {
                    "/back" => return Ok(ScreenExit::Back),
                    "/quit" => return Ok(ScreenExit::Quit),
                    "" => continue,
                    _ => {
                        let _ = rl.add_history_entry(&line);
                        if let SubmitOutcome::Completed = chat.submit(trimmed).await {
                            let transcript = chat.transcript().await;
                            if let Some(reply) = transcript.last() {
                                print_message(reply);
                            }
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                return Ok(ScreenExit::Back);
            }
            Err(err) => return Err(err.into()),
        }
    }
}

/// Reads one line; `None` means the user bailed out (Ctrl-C / Ctrl-D).
fn prompt(rl: &mut Editor<CliHelper, DefaultHistory>, label: &str) -> Result<Option<String>> {
    match rl.readline(label) {
        Ok(line) => Ok(Some(line)),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

async fn admin_screen(
    rl: &mut Editor<CliHelper, DefaultHistory>,
    admin: &AdminController,
) -> Result<ScreenExit> {
    println!();
    println!("{}", "=== Admin Portal ===".bright_magenta().bold());

    // One-shot session check on every entry of the surface.
    admin.check_auth().await;

    loop {
        if !admin.is_authenticated().await {
            set_commands(rl, &["back", "quit"]);
            println!(
                "{}",
                "Admin Login (type 'back' to return)".bright_black()
            );

            let Some(email) = prompt(rl, "email> ")? else {
                return Ok(ScreenExit::Back);
            };
            let email = email.trim().to_string();
            match email.as_str() {
                "back" => return Ok(ScreenExit::Back),
                "quit" => return Ok(ScreenExit::Quit),
                "" => continue,
                _ => {}
            }

            let Some(password) = prompt(rl, "password> ")? else {
                return Ok(ScreenExit::Back);
            };

            admin.login(&email, &password).await;
            continue;
        }

        set_commands(rl, &["add", "seed", "logout", "back", "quit"]);

        match rl.readline("admin> ") {
            Ok(line) => match line.trim() {
                "" => continue,
                "back" => return Ok(ScreenExit::Back),
                "quit" => return Ok(ScreenExit::Quit),
                "logout" => admin.logout().await,
                "seed" => {
                    admin.seed_sample_entries().await;
                }
                "add" => {
                    let Some(form) = read_entry_form(rl)? else {
                        continue;
                    };
                    admin.set_form(form).await;
                    admin.add_entry().await;
                }
                _ => println!(
                    "{}",
                    "Commands: add, seed, logout, back, quit".bright_black()
                ),
            },
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                return Ok(ScreenExit::Back);
            }
            Err(err) => return Err(err.into()),
        }
    }
}

/// Prompts for the four entry fields. No field is validated; all may be
/// left empty, matching the management form's contract.
fn read_entry_form(rl: &mut Editor<CliHelper, DefaultHistory>) -> Result<Option<EntryForm>> {
    set_commands(rl, &[]);

    let Some(question) = prompt(rl, "question> ")? else {
        return Ok(None);
    };
    let Some(answer) = prompt(rl, "answer> ")? else {
        return Ok(None);
    };
    let Some(category) = prompt(rl, "category> ")? else {
        return Ok(None);
    };
    let Some(tags) = prompt(rl, "tags (comma-separated)> ")? else {
        return Ok(None);
    };

    Ok(Some(EntryForm {
        question,
        answer,
        category,
        tags,
    }))
}
