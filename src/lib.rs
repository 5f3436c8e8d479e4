// Module declarations
pub mod game;
pub mod net;
pub mod rules;
pub mod view;

pub use game::session::GameSession;
pub use net::agent::AgentClient;
