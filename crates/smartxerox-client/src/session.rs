// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Local session: the single signed-in profile, persisted as one JSON document.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use smartxerox_core::UserProfile;
use smartxerox_core::error::{Result, ShopError};
use tracing::{debug, info, warn};

/// Storage key of the persisted profile.
pub const SESSION_KEY: &str = "sx_user";

/// Durable storage for the signed-in profile.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store the session as `sx_user.json` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{SESSION_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The persisted profile, or `None` when absent or unreadable.
    pub fn load(&self) -> Option<UserProfile> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "session unreadable, treating as signed out");
                return None;
            }
        };

        match serde_json::from_str::<UserProfile>(&data) {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "session malformed, treating as signed out");
                None
            }
        }
    }

    /// Persist `profile`, replacing whatever was stored.
    pub fn save(&self, profile: &UserProfile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(profile)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)
            .map_err(|e| ShopError::Session(format!("could not replace session file: {e}")))?;
        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    /// Remove the persisted profile. Clearing an empty store is fine.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// The session shared by every service.
///
/// Lifecycle: [`init`](Self::init) loads from storage, [`establish`](Self::establish)
/// adopts a profile after sign-in, [`teardown`](Self::teardown) clears it on
/// logout. The lock is only held for the synchronous step itself, never
/// across an `.await`.
#[derive(Debug, Clone)]
pub struct SessionContext {
    store: Arc<SessionStore>,
    current: Arc<Mutex<Option<UserProfile>>>,
}

impl SessionContext {
    pub fn init(store: SessionStore) -> Self {
        let current = store.load();
        info!(signed_in = current.is_some(), "session loaded");
        Self {
            store: Arc::new(store),
            current: Arc::new(Mutex::new(current)),
        }
    }

    pub fn current(&self) -> Option<UserProfile> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Adopt `profile` for this run and persist it. The in-memory session is
    /// replaced even if persisting fails.
    pub fn establish(&self, profile: UserProfile) -> Result<()> {
        let saved = self.store.save(&profile);
        info!(user_id = %profile.id, "session established");
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(profile);
        saved
    }

    /// Remove the persisted profile, then forget it for this run. When the
    /// file cannot be removed the session stays signed in and the error is
    /// returned, so memory never disagrees with the next launch.
    pub fn teardown(&self) -> Result<()> {
        self.store.clear()?;
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = None;
        info!("session cleared");
        Ok(())
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }
}
