//! kube-bot library interface
//!
//! The chat front end: transport stand-in, replies and the session loop.
//! Exposed as a library so the binary and its tests share one code path.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod chat;

pub use chat::{strip_mention, ChatEvent, ChatSession, IncomingMessage, Responder};
