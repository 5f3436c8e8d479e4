//! HTTP client for the remote move-generating agent.
//!
//! A single request/response exchange: POST the position encoding, get one
//! move back in 4-character coordinate form. Failures abandon the attempt
//! (no game state changes, no retry) and the session waits on a session
//! command, per [`crate::game::session::GameSession::agent_request_failed`].

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::game::session::{AgentReplyOutcome, GameSession};

/// Wire request: the full position encoding of the board to move on.
#[derive(Debug, Serialize)]
struct MoveRequest<'a> {
    board: &'a str,
}

/// Wire reply: one move in coordinate form, e.g. `"e2e4"`. The agent never
/// transmits a promotion piece; promotions resolve to queen on application.
#[derive(Debug, Deserialize)]
struct MoveReply {
    #[serde(rename = "move")]
    mv: String,
}

#[derive(Debug, Error)]
pub enum AgentError {
    /// Transport failure, non-success status, or a reply body that does
    /// not decode to `{"move": ...}`.
    #[error("agent request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The reply decoded but does not carry a usable move.
    #[error("agent reply is not a usable move: {0:?}")]
    MalformedReply(String),
}

/// Client for the agent's single POST endpoint.
#[derive(Debug, Clone)]
pub struct AgentClient {
    http: reqwest::Client,
    endpoint: String,
}

impl AgentClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Ask the agent for a move on `board` (a FEN string).
    pub async fn request_move(&self, board: &str) -> Result<String, AgentError> {
        debug!("[NET] requesting agent move for {board:?}");
        let reply: MoveReply = self
            .http
            .post(&self.endpoint)
            .json(&MoveRequest { board })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let mv = reply.mv.trim().to_ascii_lowercase();
        if mv.len() < 4 {
            return Err(AgentError::MalformedReply(reply.mv));
        }
        debug!("[NET] agent replied {mv}");
        Ok(mv)
    }
}

/// Run one agent turn if the session calls for one. Returns whether a move
/// was applied. The request is tagged with the session generation it was
/// issued under, so a session command racing the reply makes it stale
/// rather than applied.
pub async fn play_agent_turn(
    session: &mut GameSession,
    client: &AgentClient,
) -> Result<bool, AgentError> {
    let Some(request) = session.take_agent_request() else {
        return Ok(false);
    };
    match client.request_move(&request.board).await {
        Ok(mv) => match session.apply_agent_move(request.generation, &mv) {
            Ok(AgentReplyOutcome::Applied) => Ok(true),
            Ok(AgentReplyOutcome::Stale) => Ok(false),
            Err(err) => {
                warn!("[NET] agent produced an unusable move: {err}");
                Err(AgentError::MalformedReply(mv))
            }
        },
        Err(err) => {
            session.agent_request_failed(request.generation);
            Err(err)
        }
    }
}
