//! Assistant transcript.
//!
//! An append-only log of the exchanges with the query assistant, bounded to
//! the most recent messages. It is display history only: nothing in it is
//! fed back into later queries.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;

/// Greeting the assistant opens every session with.
pub const GREETING: &str = "Bonjour ! Je suis votre assistant flotte. \
     Demandez-moi par exemple « machines critiques » ou le nom d'un client.";

const CAPACITY: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub role: Role,
    pub text: String,
    pub at: DateTime<Utc>,
}

/// Ring buffer of the last 200 messages, oldest first.
#[derive(Debug, Clone)]
pub struct Transcript {
    messages: VecDeque<Message>,
    capacity: usize,
}

impl Transcript {
    /// Creates a transcript holding only the greeting.
    pub fn new() -> Self {
        Self::with_capacity(CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut transcript = Self {
            messages: VecDeque::with_capacity(capacity.min(CAPACITY)),
            capacity: capacity.max(1),
        };
        transcript.push(Role::Assistant, GREETING);
        transcript
    }

    /// Appends a message, evicting the oldest one when full.
    pub fn push(&mut self, role: Role, text: impl Into<String>) {
        if self.messages.len() >= self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(Message {
            role,
            text: text.into(),
            at: Utc::now(),
        });
    }

    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.back()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}
