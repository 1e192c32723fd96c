//! Gridmark - tic-tac-toe match control with an optimal AI opponent.
//!
//! The pure rules, state machine and search live in `gridmark_core`.
//! This crate owns everything around them:
//!
//! - **Controller** ([`Match`]): human turns, the versus-AI mode with its
//!   fixed mark assignment, and the pending-AI-turn protocol.
//! - **Session** ([`MatchSession`]): the deferred, cancellable AI move on
//!   a tokio timer, serialized through one mutex per match.
//!
//! Presentation is a collaborator, not a concern: callers render
//! [`MatchView`] snapshots and feed square indices back in.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod controller;
mod session;

pub use controller::{Match, MatchError, MatchView, Mode};
pub use session::{MatchSession, SessionConfig};
