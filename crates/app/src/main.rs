use anyhow::Context;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use pdf_tutor_core::{
    Answer, ChatTurn, EngineOptions, FallbackTrigger, TutorEngine, DEFAULT_EMBEDDING_MODEL,
};
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "pdf-tutor", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct EngineArgs {
    /// Folder that contains the PDF study materials.
    #[arg(long, default_value = "pdfs")]
    folder: String,

    /// Embedding model identifier.
    #[arg(long, default_value = DEFAULT_EMBEDDING_MODEL)]
    model: String,

    /// Minimum similarity before a chunk is returned as an answer.
    #[arg(long, default_value = "0.65")]
    similarity_gate: f32,

    /// Maximum pages read per PDF; overflow pages are ignored.
    #[arg(long, default_value = "50")]
    max_pages: usize,

    /// Restrict the paragraph fallback to the first loaded document,
    /// replicating the legacy loader.
    #[arg(long, default_value_t = false)]
    legacy_fallback: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive question-answering session over the PDF folder.
    Chat {
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Answer a single question and exit.
    Ask {
        #[command(flatten)]
        engine: EngineArgs,

        /// The question to answer.
        #[arg(long)]
        question: String,

        /// Print the full answer record as JSON instead of prose.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Chat { engine } => {
            let engine = build_engine(&engine)?;
            run_chat(&engine)
        }
        Command::Ask {
            engine,
            question,
            json,
        } => {
            let engine = build_engine(&engine)?;
            let answer = engine
                .ask(&question)
                .map_err(|error| anyhow::anyhow!(error.to_string()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&answer)?);
            } else {
                print_answer(&answer);
            }
            Ok(())
        }
    }
}

fn build_engine(args: &EngineArgs) -> anyhow::Result<TutorEngine> {
    let options = EngineOptions {
        embedding_model: args.model.clone(),
        similarity_gate: args.similarity_gate,
        max_pages_per_pdf: args.max_pages,
        fallback_trigger: if args.legacy_fallback {
            FallbackTrigger::FirstDocumentOnly
        } else {
            FallbackTrigger::PerDocument
        },
        ..Default::default()
    };

    let report = TutorEngine::build(Path::new(&args.folder), options).with_context(|| {
        format!(
            "no se pudieron preparar los materiales de la carpeta '{}'",
            args.folder
        )
    })?;

    for skipped in &report.skipped {
        warn!(path = %skipped.path.display(), reason = %skipped.reason, "skipped pdf");
    }
    for document in &report.empty_documents {
        warn!(document = %document, "document produced no chunks and is invisible to retrieval");
    }

    info!(
        documents = report.document_count,
        chunks = report.engine.chunk_count(),
        "study materials indexed"
    );

    if report.engine.chunk_count() == 0 {
        anyhow::bail!(
            "ningún documento produjo contenido consultable; revisa la carpeta '{}'",
            args.folder
        );
    }

    Ok(report.engine)
}

fn run_chat(engine: &TutorEngine) -> anyhow::Result<()> {
    println!("¡Hola! Soy tu asistente de estudio. Pregunta sobre tus materiales (escribe 'salir' para terminar).");

    let mut history: Vec<ChatTurn> = Vec::new();
    let stdin = io::stdin();

    loop {
        print!("tú> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if matches!(question, "salir" | "exit" | "quit") {
            break;
        }

        match engine.ask(question) {
            Ok(answer) => {
                print_answer(&answer);
                history.push(ChatTurn {
                    question: question.to_string(),
                    answer,
                    asked_at: Utc::now(),
                });
            }
            Err(error) => {
                warn!(%error, "query failed");
                println!("No he podido procesar la pregunta. Inténtalo de nuevo con otra formulación.");
            }
        }
    }

    info!(turns = history.len(), "session finished");
    Ok(())
}

fn print_answer(answer: &Answer) {
    println!("{}", strip_marks(&answer.answer_text));
    if answer.in_scope {
        println!(
            "  fuente: {} · apartado: {} · similitud: {:.2}",
            answer.source_document, answer.section_label, answer.similarity
        );
    }
}

fn strip_marks(text: &str) -> String {
    text.replace("<mark>", "").replace("</mark>", "")
}
