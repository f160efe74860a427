use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config_manager::Config;
use crate::error::{BackendError, ConfigError, SessionError};
use crate::llm::{StatelessLLMFactory, StatelessLLMInterface};
use crate::session::SessionState;
use crate::translate::{GenerationSettings, LanguagePair, TranslationRequest, Translator};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub translator: Translator,
    pub sessions: Arc<DashMap<Uuid, SessionState>>,
    pub translation_tasks: Arc<DashMap<Uuid, AbortHandle>>,
}

/// Aborts the translation task and frees the session slot once the outcome is
/// stored or the waiting request is dropped.
struct TaskGuard {
    tasks: Arc<DashMap<Uuid, AbortHandle>>,
    session_id: Uuid,
    handle: AbortHandle,
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.handle.abort();
        self.tasks.remove(&self.session_id);
    }
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let llm = StatelessLLMFactory::create_llm(&config.llm_config, config.openai_api_key.clone())?;
        Ok(Self::with_llm(config, llm))
    }

    pub fn with_llm(config: Config, llm: Arc<dyn StatelessLLMInterface>) -> Self {
        let settings = GenerationSettings::from(&config.llm_config);
        Self {
            config: Arc::new(config),
            translator: Translator::new(llm, settings),
            sessions: Arc::new(DashMap::new()),
            translation_tasks: Arc::new(DashMap::new()),
        }
    }

    pub fn create_session(&self) -> Uuid {
        let session_id = Uuid::new_v4();
        self.sessions.insert(session_id, SessionState::new());
        info!("Created session {}", session_id);
        session_id
    }

    pub fn session(&self, session_id: Uuid) -> Result<SessionState, SessionError> {
        self.sessions
            .get(&session_id)
            .map(|entry| entry.value().clone())
            .ok_or(SessionError::NotFound(session_id))
    }

    pub fn clear_session(&self, session_id: Uuid) -> Result<SessionState, SessionError> {
        let mut entry = self
            .sessions
            .get_mut(&session_id)
            .ok_or(SessionError::NotFound(session_id))?;
        entry.reset();
        Ok(entry.clone())
    }

    /// Run one Translate action for a session and return the updated view.
    /// A session with a translation in flight rejects the submit as busy
    /// before anything is changed. Invalid input is recorded as a warning
    /// without contacting the backend.
    pub async fn translate_in_session(
        &self,
        session_id: Uuid,
        input_language: &str,
        output_language: &str,
        text: &str,
    ) -> Result<SessionState, SessionError> {
        let (task, guard) = match self.translation_tasks.entry(session_id) {
            Entry::Occupied(_) => return Err(SessionError::Busy),
            Entry::Vacant(slot) => {
                let mut entry = self
                    .sessions
                    .get_mut(&session_id)
                    .ok_or(SessionError::NotFound(session_id))?;

                let validated = LanguagePair::parse(input_language, output_language).and_then(|pair| {
                    entry.select_languages(pair);
                    TranslationRequest::new(pair, text)
                });
                let request = match validated {
                    Ok(request) => request,
                    Err(e) => {
                        warn!("Rejected input for session {}: {}", session_id, e);
                        entry.record_outcome(text, &Err(e.into()));
                        return Ok(entry.clone());
                    }
                };

                let translator = self.translator.clone();
                let task = tokio::spawn(async move { translator.translate(&request).await });
                slot.insert(task.abort_handle());
                let guard = TaskGuard {
                    tasks: self.translation_tasks.clone(),
                    session_id,
                    handle: task.abort_handle(),
                };
                (task, guard)
            }
        };

        let outcome = match task.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(BackendError::Cancelled.into()),
            Err(e) => Err(BackendError::Network(format!("translation task failed: {}", e)).into()),
        };

        // The slot stays taken until the outcome is stored.
        let view = {
            let mut entry = self
                .sessions
                .get_mut(&session_id)
                .ok_or(SessionError::NotFound(session_id))?;
            entry.record_outcome(text, &outcome);
            entry.clone()
        };
        drop(guard);
        Ok(view)
    }

    /// Abort the session's in-flight translation. Returns whether one was running.
    pub fn cancel_translation(&self, session_id: Uuid) -> Result<bool, SessionError> {
        if !self.sessions.contains_key(&session_id) {
            return Err(SessionError::NotFound(session_id));
        }
        match self.translation_tasks.get(&session_id) {
            Some(handle) => {
                info!("Cancelling translation for session {}", session_id);
                handle.abort();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Drop sessions not updated within `ttl`. Sessions with a translation in
    /// flight are kept. Returns how many were removed.
    pub fn evict_idle_sessions(&self, ttl: Duration) -> usize {
        let Some(cutoff) = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| Utc::now().checked_sub_signed(ttl))
        else {
            return 0;
        };
        let busy: HashSet<Uuid> = self.translation_tasks.iter().map(|e| *e.key()).collect();

        let before = self.sessions.len();
        self.sessions
            .retain(|session_id, session| session.updated_at > cutoff || busy.contains(session_id));
        let removed = before.saturating_sub(self.sessions.len());
        if removed > 0 {
            debug!("Evicted {} idle sessions", removed);
        }
        removed
    }

    /// Periodically evict idle sessions according to `system_config`.
    pub fn spawn_session_sweeper(&self) -> JoinHandle<()> {
        let state = self.clone();
        let ttl = self.config.system_config.session_ttl();
        let every = self.config.system_config.session_sweep_interval();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                state.evict_idle_sessions(ttl);
            }
        })
    }
}
