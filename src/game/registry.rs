// Copyright 2026 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

use anyhow::Result;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use tracing::debug;

use super::{GameId, MoveRequest, RegistryError, Session, SessionConfig, SessionSnapshot};
use RegistryError::*;

pub type SharedSession = Arc<Mutex<Session>>;

/// Sessions by game. Each session sits behind its own lock, so moves in
/// one game are applied one at a time while other games carry on. The
/// map lock is only held long enough to find a session.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<GameId, SharedSession>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new game under a random id.
    #[cfg(feature = "random")]
    pub fn create(&self, config: SessionConfig) -> Result<GameId> {
        let mut sessions = self.sessions.write().map_err(|_| Poisoned)?;
        let mut id = GameId::random();
        while sessions.contains_key(&id) {
            id = GameId::random();
        }
        sessions.insert(id, Arc::new(Mutex::new(Session::with_config(config))));
        debug!(game = %id, "session created");
        Ok(id)
    }

    pub fn insert(&self, id: GameId, session: Session) -> Result<SharedSession> {
        let mut sessions = self.sessions.write().map_err(|_| Poisoned)?;
        if sessions.contains_key(&id) {
            return Err(DuplicateGame(id).into());
        }
        let shared = Arc::new(Mutex::new(session));
        sessions.insert(id, shared.clone());
        debug!(game = %id, "session registered");
        Ok(shared)
    }

    pub fn get(&self, id: GameId) -> Result<SharedSession> {
        let sessions = self.sessions.read().map_err(|_| Poisoned)?;
        let shared = sessions.get(&id).ok_or(UnknownGame(id))?;
        Ok(shared.clone())
    }

    pub fn remove(&self, id: GameId) -> Result<SharedSession> {
        let mut sessions = self.sessions.write().map_err(|_| Poisoned)?;
        let shared = sessions.remove(&id).ok_or(UnknownGame(id))?;
        debug!(game = %id, "session removed");
        Ok(shared)
    }

    pub fn len(&self) -> Result<usize> {
        let sessions = self.sessions.read().map_err(|_| Poisoned)?;
        Ok(sessions.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Runs `f` with exclusive access to one session.
    pub fn with_session<T, F>(&self, id: GameId, f: F) -> Result<T>
    where
        F: FnOnce(&mut Session) -> T,
    {
        let shared = self.get(id)?;
        let mut session = shared.lock().map_err(|_| Poisoned)?;
        Ok(f(&mut session))
    }

    pub fn apply_move(&self, id: GameId, request: &MoveRequest) -> Result<SessionSnapshot> {
        let snapshot = self.with_session(id, |session| session.apply_move(request))??;
        Ok(snapshot)
    }

    pub fn set_occupancy(&self, id: GameId, side_count: usize) -> Result<SessionSnapshot> {
        self.with_session(id, |session| {
            session.set_occupancy(side_count);
            session.snapshot()
        })
    }
}
