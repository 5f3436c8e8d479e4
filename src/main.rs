//! Terminal shell around the game session.
//!
//! Renders the board as text, reads square names and session commands from
//! stdin, and drives agent turns between human inputs. All game semantics
//! live in the library; this file is only plumbing.

use anyhow::Result;
use clap::Parser;
use shakmaty::Square;
use tracing::error;
use tracing_subscriber::EnvFilter;

use botboard::game::session::{GameSession, SessionMode};
use botboard::net::agent::{play_agent_turn, AgentClient};
use botboard::view::{history_lines, BoardView};

/// Play chess in the terminal against a remote move-generating agent.
#[derive(Debug, Parser)]
#[command(name = "botboard", version, about)]
struct Args {
    /// Endpoint of the agent's move service.
    #[arg(long, default_value = "http://127.0.0.1:5000/get_ai_move")]
    agent_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let client = AgentClient::new(args.agent_url);
    let mut session = GameSession::new();

    println!("commands: a square to click (e2), flip, new, reset, quit");
    loop {
        print_session(&session);

        if session.mode() == SessionMode::Active {
            match play_agent_turn(&mut session, &client).await {
                Ok(true) => continue,
                Ok(false) => {}
                // Abandoned attempt; only flip/new/reset get things moving.
                Err(err) => error!("[NET] {err}"),
            }
        }

        let Some(line) = read_command()? else { break };
        match line.as_str() {
            "quit" | "q" => break,
            "flip" => session.toggle_orientation(),
            "new" => session.new_game(),
            "reset" => session.reset(),
            "" => {}
            token => match token.parse::<Square>() {
                Ok(square) => {
                    session.handle_click(square);
                }
                Err(_) => println!("unrecognized command {token:?}"),
            },
        }
    }
    Ok(())
}

fn print_session(session: &GameSession) {
    println!("{}", BoardView::render(session).to_text());
    for line in history_lines(session.rules().history()) {
        println!("{line}");
    }
    if let Some(announcement) = session.announcement() {
        println!("== {} ==", announcement.message());
    }
}

fn read_command() -> Result<Option<String>> {
    use std::io::Write;

    print!("> ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    if std::io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_ascii_lowercase()))
}
