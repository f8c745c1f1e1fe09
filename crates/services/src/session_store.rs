use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use serde::de::DeserializeOwned;
use storage::repository::KeyValueStore;
use tokio::sync::Mutex;
use weekend_core::model::{AnswerBook, CompletionFlags, Phase, SessionState};

use crate::error::SessionError;

/// Storage key of the answers blob.
pub const ANSWERS_KEY: &str = "saas_inputs";
/// Storage key of the completion flags blob.
pub const FLAGS_KEY: &str = "saas_checks";

/// Owns the session's answers and flags and writes them through to storage.
///
/// Reads come from memory. Every mutation re-serializes the whole affected
/// blob and overwrites it; writes are serialized so blobs land in mutation
/// order. Memory only changes once the blob is saved, so a failed mutation
/// leaves both untouched. The current phase index is not stored here.
pub struct SessionStore {
    kv: Arc<dyn KeyValueStore>,
    state: RwLock<SessionState>,
    write_gate: Mutex<()>,
}

impl SessionStore {
    /// Load both blobs from `kv`. Missing blobs start empty.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Malformed` if a stored blob cannot be parsed, and
    /// `SessionError::Storage` if the backend cannot be read. Nothing is
    /// written on failure.
    pub async fn open(kv: Arc<dyn KeyValueStore>) -> Result<Self, SessionError> {
        let answers: AnswerBook = load_blob(kv.as_ref(), ANSWERS_KEY).await?;
        let flags: CompletionFlags = load_blob(kv.as_ref(), FLAGS_KEY).await?;
        tracing::info!(
            completed = flags.completed_count(),
            "session state loaded"
        );

        Ok(Self {
            kv,
            state: RwLock::new(SessionState::new(answers, flags)),
            write_gate: Mutex::new(()),
        })
    }

    /// Clone of the current in-memory state.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.read_state().clone()
    }

    /// Stored answer, or `""` when absent.
    #[must_use]
    pub fn answer(&self, phase: &Phase, question: &str) -> String {
        self.read_state().answer(phase, question).to_owned()
    }

    #[must_use]
    pub fn is_complete(&self, phase: &Phase) -> bool {
        self.read_state().is_complete(phase)
    }

    /// Replace one answer and persist the entire answers blob.
    ///
    /// The in-memory answer changes only after the save succeeds.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Catalog` if `question` does not belong to
    /// `phase`, or a storage/encoding error if the write-through fails.
    pub async fn set_answer(
        &self,
        phase: &Phase,
        question: &str,
        value: impl Into<String>,
    ) -> Result<(), SessionError> {
        let _gate = self.write_gate.lock().await;
        let mut next = self.snapshot();
        next.set_answer(phase, question, value)?;
        let blob = encode_blob(next.answers(), ANSWERS_KEY)?;
        self.persist(ANSWERS_KEY, &blob).await?;
        *self.write_state() = next;
        Ok(())
    }

    /// Set one completion flag and persist the entire flags blob.
    ///
    /// # Errors
    ///
    /// Returns a storage/encoding error if the write-through fails.
    pub async fn set_complete(&self, phase: &Phase, complete: bool) -> Result<(), SessionError> {
        let _gate = self.write_gate.lock().await;
        let mut next = self.snapshot();
        next.set_complete(phase, complete);
        let blob = encode_blob(next.flags(), FLAGS_KEY)?;
        self.persist(FLAGS_KEY, &blob).await?;
        *self.write_state() = next;
        Ok(())
    }

    async fn persist(&self, key: &'static str, blob: &str) -> Result<(), SessionError> {
        match self.kv.save(key, blob).await {
            Ok(()) => {
                tracing::debug!(key, bytes = blob.len(), "session blob saved");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(key, error = %err, "session blob save failed");
                Err(err.into())
            }
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

async fn load_blob<T>(kv: &dyn KeyValueStore, key: &'static str) -> Result<T, SessionError>
where
    T: DeserializeOwned + Default,
{
    match kv.load(key).await? {
        Some(raw) => serde_json::from_str(&raw).map_err(|source| {
            tracing::error!(key, error = %source, "stored session blob is malformed");
            SessionError::Malformed { key, source }
        }),
        None => Ok(T::default()),
    }
}

fn encode_blob<T: Serialize>(value: &T, key: &'static str) -> Result<String, SessionError> {
    serde_json::to_string(value).map_err(|source| SessionError::Encode { key, source })
}
