//! Networking: the remote move-generating agent.

pub mod agent;
