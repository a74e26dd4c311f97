use anyhow::Result;
use askdoc::api::ApiClient;
use askdoc::config::Config;
use askdoc::state::ConversationManager;
use askdoc::ui::markdown::AnswerRenderer;
use askdoc::ui::presenter::TerminalPresenter;
use std::io::{self, BufRead, Write};
use std::path::Path;

const PROMPT: &str = "> ";

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load();
    config.validate()?;

    let width = answer_width();
    let renderer = if config.plain_output {
        AnswerRenderer::verbatim(width)
    } else {
        AnswerRenderer::markdown(width)
    };
    let client = ApiClient::new(&config);
    let mut manager = ConversationManager::new(client, renderer, config.history_window);
    let mut presenter = TerminalPresenter::new();
    let mut enable_rag = true;

    print_banner(&config);

    loop {
        print!("{PROMPT}");
        io::stdout().flush()?;
        let Some(line) = read_line()? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if let Some(command) = input.strip_prefix('/') {
            if !dispatch_command(command, &mut manager, &mut presenter, &mut enable_rag).await? {
                break;
            }
            continue;
        }

        // A failed turn is already annotated in place by the presenter; the
        // prompt loop stays alive either way. Awaiting here is what keeps
        // turns single-flight: no new input is read until this one is done.
        let _ = manager.ask(input, enable_rag, &mut presenter).await;
    }

    Ok(())
}

async fn dispatch_command(
    command: &str,
    manager: &mut ConversationManager,
    presenter: &mut TerminalPresenter,
    enable_rag: &mut bool,
) -> Result<bool> {
    let mut parts = command.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default();
    let argument = parts.next().map(str::trim).unwrap_or_default();

    match name {
        "help" => print_help(),
        "quit" | "exit" => return Ok(false),
        "rag" => match argument {
            "on" => {
                *enable_rag = true;
                presenter.notice("context retrieval enabled");
            }
            "off" => {
                *enable_rag = false;
                presenter.notice("context retrieval disabled");
            }
            "" => presenter.notice(if *enable_rag {
                "context retrieval is on"
            } else {
                "context retrieval is off"
            }),
            _ => presenter.status_failure("usage: /rag [on|off]"),
        },
        "upload" => {
            if argument.is_empty() {
                presenter.status_failure("usage: /upload <path>");
                return Ok(true);
            }
            match manager.upload_document(Path::new(argument)).await {
                Ok(message) => presenter.status_success(&message),
                Err(error) => presenter.status_failure(&format!("upload failed: {error}")),
            }
        }
        "reset" => {
            if !confirm_reset()? {
                presenter.notice("reset cancelled");
                return Ok(true);
            }
            match manager.reset_knowledge_base().await {
                Ok(message) => {
                    presenter.status_success(&message);
                    presenter.notice("conversation memory cleared");
                }
                Err(error) => presenter.status_failure(&format!("reset failed: {error}")),
            }
        }
        _ => presenter.status_failure(&format!("unknown command '/{name}', try /help")),
    }

    Ok(true)
}

fn confirm_reset() -> io::Result<bool> {
    print!("This makes the backend forget every learned document and clears the chat memory. Proceed? [y/N] ");
    io::stdout().flush()?;
    match read_line()? {
        Some(line) => {
            let reply = line.trim().to_ascii_lowercase();
            Ok(reply == "y" || reply == "yes")
        }
        None => Ok(false),
    }
}

fn read_line() -> io::Result<Option<String>> {
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn answer_width() -> usize {
    crossterm::terminal::size()
        .map(|(columns, _)| columns as usize)
        .unwrap_or(100)
        .clamp(20, 120)
}

fn print_banner(config: &Config) {
    println!("askdoc - chat with your documents");
    println!("server: {}", config.server_url);
    println!("type a question, or /help for commands");
    println!();
}

fn print_help() {
    println!("  <question>       ask the assistant; answers stream in as Markdown");
    println!("  /rag [on|off]    toggle retrieval over uploaded documents");
    println!("  /upload <path>   add a PDF or DOCX document to the knowledge base");
    println!("  /reset           forget all documents and clear the chat memory");
    println!("  /quit            leave");
}
