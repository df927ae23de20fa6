//! Adapter - async session runtime with a JSON line protocol
//!
//! The core crate is synchronous and clock-free. This crate supplies the
//! scheduling a real round needs and a wire format for driving it:
//!
//! 1. **Countdown**: a cancellable [`session::Ticker`] calls `Round::tick`
//!    once per period and is dropped when the round ends
//! 2. **Resolve delay**: the second pick arms a short deadline; the pair is
//!    resolved, atomically, when it fires
//! 3. **Feedback pause**: after a failed pair the processing lock is held for
//!    a further pause, then `selectionCleared` is emitted
//!
//! # Message Types
//!
//! ## Client -> Session
//!
//! - **newRound**: deal a fresh round (optional `seed`)
//! - **pick**: pick the cell at `x`, `y`
//! - **hint**: ask for a connectable pair
//! - **snapshot**: ask for the full round state
//! - **quit**: stop the session
//!
//! ## Session -> Client
//!
//! - **roundStarted**, **roundEnded**
//! - **selection**, **selectionCleared**
//! - **match**: outcome of a resolved pair, with the connecting path
//! - **time**: countdown update
//! - **hint**, **snapshot**
//! - **error**: `invalid_command` or `not_playing`
//!
//! # Environment Variables
//!
//! See [`SessionConfig::from_env`].

pub mod config;
pub mod protocol;
pub mod runtime;
pub mod session;

pub use config::SessionConfig;
pub use protocol::{parse_command, Command, ErrorCode, Event, EventMessage};
pub use runtime::{run_lines, run_stdio};
pub use session::{spawn_session, Inbound, Session, SessionHandle, Ticker};
