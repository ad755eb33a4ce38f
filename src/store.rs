//! Session store: an explicit mapping from session id to owned match
//! state. The surrounding service imposes lifecycle (creation,
//! expiry); the store itself never shares mutable state between
//! sessions and hands out one `&mut` at a time.

use std::collections::HashMap;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::errors::SessionError;
use crate::session::GameSession;
use crate::targeting::Difficulty;

/// Opaque session identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SessionId(u64);

#[derive(Default)]
pub struct SessionStore {
    sessions: HashMap<SessionId, GameSession>,
    next_id: u64,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session seeded from the thread RNG.
    pub fn create(&mut self, difficulty: Difficulty) -> Result<SessionId, SessionError> {
        let seed = rand::rng().random();
        self.create_with_seed(difficulty, seed)
    }

    /// Create a session with an explicit seed (reproducible matches).
    pub fn create_with_seed(
        &mut self,
        difficulty: Difficulty,
        seed: u64,
    ) -> Result<SessionId, SessionError> {
        let session = GameSession::new(difficulty, SmallRng::seed_from_u64(seed))?;
        let id = SessionId(self.next_id);
        self.next_id += 1;
        self.sessions.insert(id, session);
        Ok(id)
    }

    pub fn get(&self, id: SessionId) -> Option<&GameSession> {
        self.sessions.get(&id)
    }

    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut GameSession> {
        self.sessions.get_mut(&id)
    }

    pub fn remove(&mut self, id: SessionId) -> Option<GameSession> {
        self.sessions.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
