//! Tribuna demo player - play a scripted hearing from the terminal.
//!
//! Usage:
//!
//! ```text
//! tribuna <case-script-id> [--mode lawyer|judge]
//! tribuna --resume <session-id>
//! ```
//!
//! Scripts are read from the configured script directory; sessions are
//! persisted according to the configured storage backend.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use tribuna::adapters::fs::{JsonSessionStore, YamlScriptSource};
use tribuna::adapters::memory::{InMemorySessionStore, InMemoryStudyLibrary};
use tribuna::adapters::postgres::PostgresSessionStore;
use tribuna::application::{GetFeedbackHandler, SessionController};
use tribuna::config::{AppConfig, StorageBackend};
use tribuna::domain::case_script::CaseMode;
use tribuna::domain::foundation::{CaseScriptId, OptionId, SessionId};
use tribuna::domain::session::{SessionStatus, SessionView};
use tribuna::domain::typist::{DialogueTypist, TypingEvent, TypistConfig};
use tribuna::ports::{SessionStore, StudyLibrary};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = parse_args(&args)?;

    let scripts = Arc::new(YamlScriptSource::new(&config.storage.script_dir));
    let store: Arc<dyn SessionStore> = match config.storage.backend {
        StorageBackend::File => Arc::new(JsonSessionStore::new(&config.storage.snapshot_dir)),
        StorageBackend::Memory => Arc::new(InMemorySessionStore::new()),
        StorageBackend::Postgres => {
            let url = config
                .storage
                .database_url
                .as_deref()
                .ok_or("storage.database_url is required for the postgres backend")?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(5)
                .connect(url)
                .await?;
            Arc::new(PostgresSessionStore::new(pool))
        }
    };
    let library: Arc<dyn StudyLibrary> = Arc::new(InMemoryStudyLibrary::new());

    let mut controller = SessionController::new(scripts.clone(), store.clone());
    let mut typist = DialogueTypist::new(TypistConfig {
        chunk_limit: config.typist.chunk_limit,
        chunk_delay: config.typist.chunk_delay(),
    });

    let view = match command {
        Command::Start { case, mode } => controller.start_session(case, mode).await?,
        Command::Resume { session } => controller.resume_session(session).await?,
    };

    let mut shown = 0;
    shown = reveal_new_messages(&mut typist, &view, shown).await;
    let mut view = view;

    let stdin = io::stdin();
    while view.status == SessionStatus::InProgress {
        let session_id: SessionId = view.session_id.parse()?;

        let Some(options) = view.pending_options.as_ref() else {
            // Resumed mid-narration; acknowledge and keep going.
            view = controller.advance(session_id)?;
            shown = reveal_new_messages(&mut typist, &view, shown).await;
            continue;
        };

        println!();
        for (i, option) in options.iter().enumerate() {
            println!("  [{}] {}", i + 1, option.text());
        }
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!("\nSession saved. Resume with: tribuna --resume {}", session_id);
            break;
        }
        let picked = match line.trim().parse::<usize>() {
            Ok(n) if n >= 1 && n <= options.len() => options[n - 1].id().clone(),
            _ => match OptionId::new(line.trim()) {
                Ok(id) => id,
                Err(_) => {
                    println!("Pick an option number between 1 and {}.", options.len());
                    continue;
                }
            },
        };

        match controller.submit_choice(session_id, &picked) {
            Ok(next) => {
                view = next;
                shown = reveal_new_messages(&mut typist, &view, shown).await;
            }
            Err(err) if err.is_recoverable() => println!("{}", err),
            Err(err) => return Err(err.into()),
        }
    }

    controller.flush().await;
    if !controller.sync_monitor().is_synced() {
        eprintln!(
            "Warning: the session could not be saved: {}",
            controller
                .sync_monitor()
                .last_error()
                .unwrap_or_else(|| "unknown write failure".to_string())
        );
    }

    if view.status == SessionStatus::Concluded {
        let feedback = GetFeedbackHandler::new(scripts, store, library);
        let report = feedback.execute(view.session_id.parse()?).await?;

        println!("\n════ Hearing concluded ════");
        println!("{}", report.narrative());
        println!("Final score: {}", report.score());
        if !report.strengths().is_empty() {
            println!("\nWhat went well:");
            for choice in report.strengths() {
                println!("  + {} ({:+})", choice.text(), choice.point_value());
            }
        }
        if !report.improvements().is_empty() {
            println!("\nWhat to improve:");
            for choice in report.improvements() {
                println!("  - {} ({:+})", choice.text(), choice.point_value());
            }
        }
        for line in report.suggestions() {
            println!("Study suggestion: {}", line);
        }
        for resource in report.recommended() {
            println!("Recommended: {} ({})", resource.title, resource.reference);
        }
    }

    Ok(())
}

enum Command {
    Start { case: CaseScriptId, mode: CaseMode },
    Resume { session: SessionId },
}

fn parse_args(args: &[String]) -> Result<Command, Box<dyn std::error::Error>> {
    match args {
        [flag, id] if flag == "--resume" => Ok(Command::Resume {
            session: id.parse()?,
        }),
        [case] => Ok(Command::Start {
            case: CaseScriptId::new(case.as_str())?,
            mode: CaseMode::Lawyer,
        }),
        [case, flag, mode] if flag == "--mode" => {
            let mode = match mode.as_str() {
                "lawyer" => CaseMode::Lawyer,
                "judge" => CaseMode::Judge,
                other => return Err(format!("Unknown mode: {}", other).into()),
            };
            Ok(Command::Start {
                case: CaseScriptId::new(case.as_str())?,
                mode,
            })
        }
        _ => Err("Usage: tribuna <case-script-id> [--mode lawyer|judge] | --resume <session-id>"
            .into()),
    }
}

/// Reveals messages the player has not seen yet, paced by the typist.
async fn reveal_new_messages(
    typist: &mut DialogueTypist,
    view: &SessionView,
    shown: usize,
) -> usize {
    for message in &view.messages[shown..] {
        print!("\n{}: ", message.speaker());
        let _ = io::stdout().flush();
        let mut rx = typist.begin(message.text());
        while let Some(event) = rx.recv().await {
            match event {
                TypingEvent::Typing => {}
                TypingEvent::Chunk(chunk) => {
                    print!("{}", chunk);
                    let _ = io::stdout().flush();
                }
                TypingEvent::Finished => println!(),
            }
        }
    }
    view.messages.len()
}
