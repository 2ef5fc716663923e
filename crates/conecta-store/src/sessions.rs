use std::collections::VecDeque;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use conecta_core::ids::SessionKey;
use conecta_core::turns::{Stage, Turn};

/// History bound: only the most recent 20 turns are retained.
pub const MAX_TURNS: usize = 20;

/// Per-conversation state. Lives in memory for the process lifetime until
/// explicitly cleared.
#[derive(Clone, Debug)]
pub struct Session {
    turns: VecDeque<Turn>,
    pub stage: Stage,
    greeted: bool,
}

impl Session {
    pub fn new() -> Self {
        Self {
            turns: VecDeque::with_capacity(MAX_TURNS),
            stage: Stage::Greeting,
            greeted: false,
        }
    }

    /// Whether the assistant has already introduced itself in this session.
    pub fn greeted(&self) -> bool {
        self.greeted
    }

    pub fn mark_greeted(&mut self) {
        self.greeted = true;
    }

    pub fn turns(&self) -> &VecDeque<Turn> {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Append a turn, evicting the oldest entries beyond [`MAX_TURNS`].
    pub fn push_turn(&mut self, turn: Turn) {
        self.turns.push_back(turn);
        while self.turns.len() > MAX_TURNS {
            self.turns.pop_front();
        }
    }

    /// Record one completed customer/assistant exchange.
    pub fn record_exchange(&mut self, message: &str, reply: &str) {
        self.push_turn(Turn::customer(message));
        self.push_turn(Turn::assistant(reply));
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide map from session key to conversation state.
///
/// Entries are created lazily on first access and removed only by an
/// explicit clear. Each entry carries its own async mutex; holding it
/// across the model call serializes concurrent requests for the same key.
#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<SessionKey, Arc<Mutex<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the existing session for `key`, creating a fresh one if absent.
    pub fn get_or_create(&self, key: &SessionKey) -> Arc<Mutex<Session>> {
        self.sessions
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(Session::new())))
            .clone()
    }

    /// Remove the session for `key`. No-op if absent.
    pub fn remove(&self, key: &SessionKey) {
        if self.sessions.remove(key).is_some() {
            tracing::debug!(session_key = %key, "session cleared");
        }
    }

    pub fn contains(&self, key: &SessionKey) -> bool {
        self.sessions.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
