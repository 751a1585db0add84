//! Conversation session.
//!
//! Holds the ordered message history and the in-flight flag. Submitting is
//! split in two halves so the caller can run the network call wherever it
//! likes: [`Session::submit`] validates and records the user turn, and
//! [`Session::complete`] records whatever came back.

use tracing::{debug, info, warn};

use super::client::{ChatBackend, ChatError};
use super::message::{ChatRequest, Message};

#[derive(Debug)]
pub struct Session {
    messages: Vec<Message>,
    in_flight: bool,
    greeting: String,
    error_placeholder: String,
}

impl Session {
    /// Start a session seeded with `greeting` (skipped when empty).
    ///
    /// `error_placeholder` is the assistant text appended whenever a request
    /// fails, whatever the cause.
    pub fn new(greeting: impl Into<String>, error_placeholder: impl Into<String>) -> Self {
        let mut session = Self {
            messages: Vec::new(),
            in_flight: false,
            greeting: greeting.into(),
            error_placeholder: error_placeholder.into(),
        };
        session.seed();
        session
    }

    fn seed(&mut self) {
        if !self.greeting.is_empty() {
            self.messages.push(Message::assistant(self.greeting.clone()));
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Record a user turn and return the payload to send.
    ///
    /// Returns `None` (and leaves `input` alone) when the input is blank or a
    /// request is already in flight. On success `input` is emptied and the
    /// in-flight flag is raised until [`Session::complete`] is called.
    pub fn submit(&mut self, input: &mut String) -> Option<ChatRequest> {
        if self.in_flight {
            debug!("submission ignored: request in flight");
            return None;
        }
        if input.trim().is_empty() {
            return None;
        }

        let text = std::mem::take(input);
        self.messages.push(Message::user(text));
        self.in_flight = true;
        Some(self.to_request())
    }

    /// Record the outcome of the request issued by the last `submit`.
    pub fn complete(&mut self, outcome: Result<String, ChatError>) {
        if !self.in_flight {
            warn!("completion dropped: no request in flight");
            return;
        }

        let message = match outcome {
            Ok(reply) => {
                info!(len = reply.len(), "chat reply received");
                Message::assistant(reply)
            }
            Err(e) => {
                warn!(error = %e, "chat request failed");
                Message::failure(self.error_placeholder.clone())
            }
        };
        self.messages.push(message);
        self.in_flight = false;
    }

    /// Submit, call `backend`, and complete in one go.
    ///
    /// Returns `false` if the submission was rejected.
    pub async fn exchange<B>(&mut self, input: &mut String, backend: &B) -> bool
    where
        B: ChatBackend + ?Sized,
    {
        let Some(request) = self.submit(input) else {
            return false;
        };
        let outcome = backend.send(&request).await;
        self.complete(outcome);
        true
    }

    /// Start over from the greeting. Refused while a request is in flight.
    pub fn reset(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.messages.clear();
        self.seed();
        true
    }

    /// The whole history as a request body, in display order.
    pub fn to_request(&self) -> ChatRequest {
        ChatRequest {
            messages: self.messages.iter().map(Message::to_wire).collect(),
        }
    }
}
