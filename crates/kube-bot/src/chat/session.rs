//! Line-oriented chat loop

use std::future::Future;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::info;

use super::{
    responder::Responder,
    transport::{ChatEvent, IncomingMessage},
};

/// Reads events until input ends or `shutdown` resolves, writing one reply
/// per message.
#[derive(Debug, Clone)]
pub struct ChatSession<'a> {
    responder: Responder<'a>,
    sender: String,
    channel: String,
    log_unhandled_events: bool,
}

impl<'a> ChatSession<'a> {
    pub fn new(
        responder: Responder<'a>,
        sender: impl Into<String>,
        channel: impl Into<String>,
        log_unhandled_events: bool,
    ) -> Self {
        Self {
            responder,
            sender: sender.into(),
            channel: channel.into(),
            log_unhandled_events,
        }
    }

    /// Run the loop, returning how many messages were answered
    ///
    /// # Errors
    ///
    /// Returns error if reading input or writing a reply fails
    pub async fn run<R, W, S>(&self, input: R, output: &mut W, shutdown: S) -> Result<usize>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
        S: Future<Output = ()>,
    {
        let mut lines = input.lines();
        tokio::pin!(shutdown);
        let mut answered = 0;

        loop {
            let line = tokio::select! {
                biased;
                () = &mut shutdown => {
                    info!("received shutdown request");
                    break;
                }
                line = lines.next_line() => line.context("Failed to read message")?,
            };
            let Some(line) = line else {
                break;
            };

            match ChatEvent::from_line(&line, &self.sender, &self.channel) {
                ChatEvent::Message(message) => {
                    self.answer(&message, output).await?;
                    answered += 1;
                }
                ChatEvent::Unhandled(kind) => {
                    if self.log_unhandled_events {
                        info!(event = %kind, "received unhandled event");
                    }
                }
                ChatEvent::Blank => {}
            }
        }

        info!(messages = answered, "chat session ended");
        Ok(answered)
    }

    async fn answer<W>(&self, message: &IncomingMessage, output: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        info!(
            sender = %message.sender,
            channel = %message.channel,
            text = %message.text,
            "received message"
        );
        let reply = self.responder.respond(message);
        output
            .write_all(format!("{reply}\n").as_bytes())
            .await
            .context("Failed to send reply")?;
        output.flush().await.context("Failed to send reply")
    }
}
