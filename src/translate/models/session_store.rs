use std::collections::{HashMap, VecDeque};

use serde::Serialize;
use tokio::sync::RwLock;

/// Sessions kept before the oldest one is evicted.
pub const MAX_SESSIONS: usize = 1000;
/// Contexts kept per session before the oldest one is evicted.
pub const MAX_CONTEXTS_PER_SESSION: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionContext {
    pub prompt: String,
    pub translated: Option<String>,
}

#[derive(Debug, Default)]
struct Sessions {
    order: VecDeque<String>,
    contexts: HashMap<String, VecDeque<(String, SessionContext)>>,
}

/// In-memory record of translations per session, keyed
/// `session_id -> context_id`. Both levels evict oldest first once full.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<Sessions>,
}

impl SessionStore {
    pub async fn record_prompt(&self, session_id: &str, context_id: &str, prompt: &str) {
        let mut sessions = self.sessions.write().await;
        let sessions = &mut *sessions;

        if !sessions.contexts.contains_key(session_id) {
            sessions.order.push_back(session_id.to_string());
            sessions
                .contexts
                .insert(session_id.to_string(), VecDeque::new());

            while sessions.order.len() > MAX_SESSIONS {
                if let Some(evicted) = sessions.order.pop_front() {
                    tracing::debug!("evicting translation session {}", evicted);
                    sessions.contexts.remove(&evicted);
                }
            }
        }

        let Some(contexts) = sessions.contexts.get_mut(session_id) else {
            return;
        };

        contexts.retain(|(id, _)| id != context_id);
        contexts.push_back((
            context_id.to_string(),
            SessionContext {
                prompt: prompt.to_string(),
                translated: None,
            },
        ));

        while contexts.len() > MAX_CONTEXTS_PER_SESSION {
            contexts.pop_front();
        }
    }

    pub async fn record_translation(&self, session_id: &str, context_id: &str, translated: &str) {
        let mut sessions = self.sessions.write().await;

        if let Some((_, context)) = sessions
            .contexts
            .get_mut(session_id)
            .and_then(|contexts| contexts.iter_mut().find(|(id, _)| id == context_id))
        {
            context.translated = Some(translated.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn lookup(store: &SessionStore, session_id: &str, context_id: &str) -> Option<SessionContext> {
        let sessions = store.sessions.read().await;

        sessions
            .contexts
            .get(session_id)
            .and_then(|contexts| contexts.iter().find(|(id, _)| id == context_id))
            .map(|(_, context)| context.clone())
    }

    #[tokio::test]
    async fn translation_is_attached_to_recorded_prompt() {
        let store = SessionStore::default();

        store.record_prompt("s1", "c1", "猫").await;
        store.record_translation("s1", "c1", "cat").await;
        store.record_translation("s1", "missing", "dog").await;

        assert_eq!(
            lookup(&store, "s1", "c1").await,
            Some(SessionContext {
                prompt: "猫".to_string(),
                translated: Some("cat".to_string()),
            })
        );
        assert_eq!(lookup(&store, "s1", "missing").await, None);
    }

    #[tokio::test]
    async fn contexts_are_capped_per_session() {
        let store = SessionStore::default();

        for n in 0..MAX_CONTEXTS_PER_SESSION + 5 {
            store.record_prompt("s1", &format!("c{}", n), "猫").await;
        }

        assert_eq!(store.sessions.read().await.contexts["s1"].len(), MAX_CONTEXTS_PER_SESSION);
        assert_eq!(lookup(&store, "s1", "c4").await, None);
        assert!(lookup(&store, "s1", "c5").await.is_some());
    }

    #[tokio::test]
    async fn oldest_session_is_evicted() {
        let store = SessionStore::default();

        for n in 0..=MAX_SESSIONS {
            store.record_prompt(&format!("s{}", n), "c1", "猫").await;
        }

        let sessions = store.sessions.read().await;
        assert_eq!(sessions.contexts.len(), MAX_SESSIONS);
        assert_eq!(sessions.order.len(), MAX_SESSIONS);
        assert!(!sessions.contexts.contains_key("s0"));
        assert!(sessions.contexts.contains_key(&format!("s{}", MAX_SESSIONS)));
    }

    #[tokio::test]
    async fn re_recording_a_context_replaces_it() {
        let store = SessionStore::default();

        store.record_prompt("s1", "c1", "猫").await;
        store.record_translation("s1", "c1", "cat").await;
        store.record_prompt("s1", "c1", "犬").await;

        assert_eq!(store.sessions.read().await.contexts["s1"].len(), 1);
        assert_eq!(
            lookup(&store, "s1", "c1").await,
            Some(SessionContext {
                prompt: "犬".to_string(),
                translated: None,
            })
        );
    }
}
