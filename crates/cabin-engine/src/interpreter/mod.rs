//! Layered command interpretation: parser, rules, then the remote backend.

pub mod cache;
pub mod remote;
pub mod sanitize;

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

pub use cache::IntentCache;
pub use remote::{RemoteRequest, SemanticBackend, build_request, parse_reply};
pub use sanitize::{finalize, from_remote};

use crate::context::InterpretContext;
use crate::error::BackendError;
use crate::intent::Intent;
use crate::parser::{RuleResolver, parse_command};

/// Confidence at which a local result is taken without asking the backend.
pub const CONFIDENT: f32 = 0.95;

/// Default bound on a remote call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// Turns raw player text into a sanitized [`Intent`].
///
/// The cache is shared by clones, so one interpreter can serve many sessions.
#[derive(Clone)]
pub struct Interpreter {
    rules: RuleResolver,
    backend: Option<Arc<dyn SemanticBackend>>,
    cache: IntentCache,
    timeout: Duration,
}

impl std::fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interpreter")
            .field("backend", &self.backend.as_ref().map(|b| b.name().to_string()))
            .field("cached", &self.cache.len())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::offline()
    }
}

impl Interpreter {
    /// Parser and rules only.
    pub fn offline() -> Self {
        Self::new(IntentCache::default())
    }

    /// An interpreter using the given cache and no backend.
    pub fn new(cache: IntentCache) -> Self {
        Self {
            rules: RuleResolver::new(),
            backend: None,
            cache,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Attach a remote backend.
    pub fn with_backend(mut self, backend: Arc<dyn SemanticBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Bound each remote call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the rule resolver.
    pub fn with_rules(mut self, rules: RuleResolver) -> Self {
        self.rules = rules;
        self
    }

    /// Whether remote interpretation is configured.
    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    /// The shared cache.
    pub fn cache(&self) -> &IntentCache {
        &self.cache
    }

    /// Resolve one command. Never fails; unusable input becomes `none`.
    pub async fn interpret(&self, text: &str, ctx: &InterpretContext) -> Intent {
        if text.trim().is_empty() {
            return Intent::none();
        }

        let parsed = parse_command(text, ctx);
        if let Some(intent) = parsed.as_ref().filter(|i| i.confidence >= CONFIDENT) {
            debug!(action = %intent.action, "parser resolved input");
            return finalize(intent.clone(), ctx);
        }

        let ruled = self.rules.resolve(text, ctx);
        let confident_rule = ruled.as_ref().is_some_and(|i| i.confidence >= CONFIDENT);
        let fallback = ruled.or(parsed).unwrap_or_else(Intent::none);

        let Some(backend) = self.backend.as_ref().filter(|_| !confident_rule) else {
            debug!(action = %fallback.action, "rules resolved input");
            return finalize(fallback, ctx);
        };

        let key = ctx.cache_key(text);
        if let Some(hit) = self.cache.get(&key) {
            debug!(action = %hit.action, "intent cache hit");
            return hit;
        }

        match self.ask(backend.as_ref(), text, ctx).await {
            Ok(intent) => {
                debug!(action = %intent.action, backend = backend.name(), "remote resolved input");
                self.cache.insert(key, intent.clone());
                intent
            }
            Err(e) => {
                warn!(
                    error = %e,
                    backend = backend.name(),
                    "remote interpretation failed, using rules"
                );
                finalize(fallback, ctx)
            }
        }
    }

    async fn ask(
        &self,
        backend: &dyn SemanticBackend,
        text: &str,
        ctx: &InterpretContext,
    ) -> Result<Intent, BackendError> {
        let request = build_request(ctx, text);
        let raw = tokio::time::timeout(self.timeout, backend.complete(&request))
            .await
            .map_err(|_| BackendError::Timeout(self.timeout))??;
        let reply = parse_reply(&raw)?;
        Ok(from_remote(&reply, ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::ActionKind;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockBackend {
        reply: Result<String, ()>,
        calls: AtomicUsize,
    }

    impl MockBackend {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: Err(()),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SemanticBackend for MockBackend {
        async fn complete(&self, _request: &RemoteRequest) -> Result<String, BackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply
                .clone()
                .map_err(|_| BackendError::Transport("connection refused".into()))
        }
    }

    struct SlowBackend;

    #[async_trait]
    impl SemanticBackend for SlowBackend {
        async fn complete(&self, _request: &RemoteRequest) -> Result<String, BackendError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok("{\"action\": \"look\"}".into())
        }
    }

    fn test_ctx() -> InterpretContext {
        InterpretContext {
            room_name: "Cabin Grounds".into(),
            exits: vec!["clearing".into(), "north".into()],
            room_items: vec!["firewood".into()],
            inventory: vec!["stone".into()],
            allowed_actions: ActionKind::ALL.to_vec(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn empty_input_is_none() {
        let intent = Interpreter::offline().interpret("   ", &test_ctx()).await;
        assert_eq!(intent.action, ActionKind::None);
        assert_eq!(intent.confidence, 0.0);
    }

    #[tokio::test]
    async fn confident_parse_skips_backend() {
        let backend = MockBackend::replying("{\"action\": \"look\"}");
        let interp = Interpreter::offline().with_backend(backend.clone());
        let intent = interp.interpret("north", &test_ctx()).await;
        assert_eq!(intent.action, ActionKind::Move);
        assert_eq!(intent.arg("direction"), Some("north"));
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn offline_uses_rules() {
        let intent = Interpreter::offline()
            .interpret("walk towards the clearing", &test_ctx())
            .await;
        assert_eq!(intent.action, ActionKind::Move);
        assert_eq!(intent.arg("direction"), Some("clearing"));
    }

    #[tokio::test]
    async fn offline_unknown_input_is_none() {
        let intent = Interpreter::offline()
            .interpret("sing to the moon", &test_ctx())
            .await;
        assert_eq!(intent.action, ActionKind::None);
    }

    #[tokio::test]
    async fn repeated_input_hits_cache() {
        let backend = MockBackend::replying(
            "{\"action\": \"look\", \"confidence\": 0.8, \"reply\": \"You squint at the treeline.\"}",
        );
        let interp = Interpreter::offline().with_backend(backend.clone());
        let first = interp.interpret("stare into the dark", &test_ctx()).await;
        let second = interp.interpret("Stare into  the dark", &test_ctx()).await;
        assert_eq!(first, second);
        assert_eq!(first.action, ActionKind::Look);
        assert_eq!(first.reply.as_deref(), Some("You squint at the treeline."));
        assert_eq!(backend.calls(), 1);
        assert_eq!(interp.cache().len(), 1);
    }

    #[tokio::test]
    async fn changed_surroundings_miss_cache() {
        let backend = MockBackend::replying("{\"action\": \"look\", \"confidence\": 0.8}");
        let interp = Interpreter::offline().with_backend(backend.clone());
        let mut ctx = test_ctx();
        interp.interpret("stare into the dark", &ctx).await;
        ctx.inventory.push("rope".into());
        interp.interpret("stare into the dark", &ctx).await;
        assert_eq!(backend.calls(), 2);
    }

    #[tokio::test]
    async fn remote_move_through_wall_is_demoted() {
        let backend = MockBackend::replying(
            "{\"action\": \"move\", \"args\": {\"direction\": \"west\"}, \"confidence\": 1.0}",
        );
        let interp = Interpreter::offline().with_backend(backend);
        let intent = interp.interpret("slip between the trees", &test_ctx()).await;
        assert_eq!(intent.action, ActionKind::None);
        assert!(intent.confidence <= 0.5);
    }

    #[tokio::test]
    async fn backend_failure_falls_back_to_rules() {
        let backend = MockBackend::failing();
        let interp = Interpreter::offline().with_backend(backend.clone());
        let intent = interp.interpret("gather some firewood", &test_ctx()).await;
        assert_eq!(backend.calls(), 1);
        assert_eq!(intent.action, ActionKind::Take);
        assert_eq!(intent.arg("item"), Some("firewood"));
        assert!(interp.cache().is_empty());
    }

    #[tokio::test]
    async fn malformed_reply_falls_back_to_none() {
        let backend = MockBackend::replying("I think they want to dance.");
        let interp = Interpreter::offline().with_backend(backend);
        let intent = interp.interpret("dance wildly", &test_ctx()).await;
        assert_eq!(intent.action, ActionKind::None);
        assert_eq!(intent.confidence, 0.0);
    }

    #[tokio::test]
    async fn slow_backend_times_out() {
        let interp = Interpreter::offline()
            .with_backend(Arc::new(SlowBackend))
            .with_timeout(Duration::from_millis(50));
        let intent = interp.interpret("dance wildly", &test_ctx()).await;
        assert_eq!(intent.action, ActionKind::None);
    }
}
