//! Chat front end
//!
//! - `transport`: incoming events and mention stripping
//! - `responder`: turns one message into one reply
//! - `session`: line-oriented loop driving the responder

pub mod responder;
pub mod session;
pub mod transport;

pub use responder::Responder;
pub use session::ChatSession;
pub use transport::{strip_mention, ChatEvent, IncomingMessage};
