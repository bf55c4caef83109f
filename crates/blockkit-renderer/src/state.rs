//! Interaction state and action routing.
//!
//! The host owns both ends: an [`InteractionStore`] answering `{loading,
//! initial}` lookups during a render pass, and an [`ActionSink`] receiving
//! the actions users trigger on rendered widgets. The engine only reads the
//! store and only writes to the sink.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::context::BlockContext;

/// Ephemeral per-element snapshot supplied by the host.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InteractionState {
    #[serde(default)]
    pub loading: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InteractionState {
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn with_initial(initial: impl Into<Value>) -> Self {
        Self {
            initial: Some(initial.into()),
            ..Self::default()
        }
    }
}

/// Lookup key: the same action id in two regions is two entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateKey {
    pub context: BlockContext,
    pub block_id: Option<String>,
    pub action_id: String,
}

impl StateKey {
    pub fn new(context: BlockContext, block_id: Option<&str>, action_id: &str) -> Self {
        Self {
            context,
            block_id: block_id.map(str::to_owned),
            action_id: action_id.to_owned(),
        }
    }
}

/// Read-only accessor over the host's interaction store.
pub trait InteractionStore {
    fn lookup(&self, key: &StateKey) -> Option<InteractionState>;
}

/// In-memory store for hosts without one of their own. Mutate it between
/// render passes only.
#[derive(Debug, Default)]
pub struct MemoryInteractionStore {
    entries: Mutex<HashMap<StateKey, InteractionState>>,
}

impl MemoryInteractionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<StateKey, InteractionState>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set(&self, key: StateKey, state: InteractionState) {
        self.entries().insert(key, state);
    }

    /// Flips `loading` for `key`, creating the entry when needed.
    pub fn set_loading(&self, key: StateKey, loading: bool) {
        self.entries().entry(key).or_default().loading = loading;
    }

    pub fn remove(&self, key: &StateKey) -> Option<InteractionState> {
        self.entries().remove(key)
    }
}

impl InteractionStore for MemoryInteractionStore {
    fn lookup(&self, key: &StateKey) -> Option<InteractionState> {
        self.entries().get(key).cloned()
    }
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// Which host channel an action goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Block action triggered from a section accessory or an actions row.
    Action,
    /// View state update from any other region (modal inputs, top level).
    State,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActionPayload {
    pub value: Value,
}

impl ActionPayload {
    pub fn value(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// What the host receives for every dispatched action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiAction {
    pub kind: ActionKind,
    pub action_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_id: Option<String>,
    pub payload: ActionPayload,
}

/// Outbound action channel. Fire and forget: the engine never waits on it.
pub trait ActionSink {
    fn dispatch(&self, action: UiAction);
}

impl<F> ActionSink for F
where
    F: Fn(UiAction),
{
    fn dispatch(&self, action: UiAction) {
        self(action)
    }
}

/// Routing target a dispatcher is closed over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionBinding {
    pub kind: ActionKind,
    pub action_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_id: Option<String>,
}

/// Callback bound to one element.
///
/// Two dispatchers are equal when they route to the same binding; the sink
/// itself does not take part in comparisons.
#[derive(Clone, Default)]
pub struct ActionDispatcher {
    binding: Option<ActionBinding>,
    sink: Option<Arc<dyn ActionSink>>,
}

impl ActionDispatcher {
    pub fn new(binding: ActionBinding, sink: Option<Arc<dyn ActionSink>>) -> Self {
        Self {
            binding: Some(binding),
            sink,
        }
    }

    /// Dispatcher for elements without an identity. Invoking it does nothing.
    pub fn noop() -> Self {
        Self::default()
    }

    pub fn binding(&self) -> Option<&ActionBinding> {
        self.binding.as_ref()
    }

    pub fn is_noop(&self) -> bool {
        self.binding.is_none() || self.sink.is_none()
    }

    /// Sends `payload` to the host. Returns whether anything was sent.
    pub fn dispatch(&self, payload: ActionPayload) -> bool {
        let (Some(binding), Some(sink)) = (&self.binding, &self.sink) else {
            return false;
        };
        sink.dispatch(UiAction {
            kind: binding.kind,
            action_id: binding.action_id.clone(),
            block_id: binding.block_id.clone(),
            app_id: binding.app_id.clone(),
            view_id: binding.view_id.clone(),
            payload,
        });
        true
    }
}

impl PartialEq for ActionDispatcher {
    fn eq(&self, other: &Self) -> bool {
        self.binding == other.binding
    }
}

impl fmt::Debug for ActionDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDispatcher")
            .field("binding", &self.binding)
            .field("connected", &self.sink.is_some())
            .finish()
    }
}

impl Serialize for ActionDispatcher {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.binding.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn binding(action_id: &str) -> ActionBinding {
        ActionBinding {
            kind: ActionKind::Action,
            action_id: action_id.into(),
            block_id: Some("b".into()),
            app_id: None,
            view_id: None,
        }
    }

    #[test]
    fn memory_store_scopes_by_context() {
        let store = MemoryInteractionStore::new();
        store.set(
            StateKey::new(BlockContext::Actions, Some("b"), "go"),
            InteractionState::loading(),
        );
        let actions = store.lookup(&StateKey::new(BlockContext::Actions, Some("b"), "go"));
        let section = store.lookup(&StateKey::new(BlockContext::Section, Some("b"), "go"));
        assert_eq!(actions.map(|s| s.loading), Some(true));
        assert_eq!(section, None);
    }

    #[test]
    fn set_loading_preserves_initial() {
        let store = MemoryInteractionStore::new();
        let key = StateKey::new(BlockContext::Form, None, "name");
        store.set(key.clone(), InteractionState::with_initial("Bob"));
        store.set_loading(key.clone(), true);
        let state = store.lookup(&key).expect("state");
        assert!(state.loading);
        assert_eq!(state.initial, Some(json!("Bob")));
        assert!(store.remove(&key).is_some());
        assert_eq!(store.lookup(&key), None);
    }

    #[test]
    fn store_is_shared_between_threads() {
        let store = Arc::new(MemoryInteractionStore::new());
        let writers: Vec<_> = ["a", "b", "c"]
            .into_iter()
            .map(|id| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    store.set_loading(StateKey::new(BlockContext::Actions, None, id), true)
                })
            })
            .collect();
        for writer in writers {
            writer.join().expect("writer");
        }
        for id in ["a", "b", "c"] {
            let state = store.lookup(&StateKey::new(BlockContext::Actions, None, id));
            assert_eq!(state.map(|s| s.loading), Some(true));
        }
    }

    #[test]
    fn dispatcher_sends_bound_identity() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let sent = Arc::clone(&sent);
            move |action: UiAction| sent.lock().expect("lock").push(action)
        };
        let dispatcher = ActionDispatcher::new(binding("go"), Some(Arc::new(sink)));
        assert!(dispatcher.dispatch(ActionPayload::value("yes")));

        let sent = sent.lock().expect("lock");
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].action_id, "go");
        assert_eq!(sent[0].block_id.as_deref(), Some("b"));
        assert_eq!(sent[0].payload.value, json!("yes"));
    }

    #[test]
    fn noop_dispatcher_does_nothing() {
        let dispatcher = ActionDispatcher::noop();
        assert!(dispatcher.is_noop());
        assert!(!dispatcher.dispatch(ActionPayload::value(1)));

        let unconnected = ActionDispatcher::new(binding("go"), None);
        assert!(unconnected.is_noop());
        assert!(!unconnected.dispatch(ActionPayload::value(1)));
    }

    #[test]
    fn dispatchers_compare_by_binding() {
        let sink: Arc<dyn ActionSink> = Arc::new(|_: UiAction| {});
        let a = ActionDispatcher::new(binding("go"), Some(Arc::clone(&sink)));
        let b = ActionDispatcher::new(binding("go"), None);
        let c = ActionDispatcher::new(binding("stop"), Some(sink));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
