//! Session Manager service

use std::sync::Arc;
use std::time::Duration;

use chat_client::{map_failure, ChatApiClient, ChatClientError, TurnRequest};
use chat_core::{
    clear_greeting, derive, open_greeting, Message, MessageStatus, SessionState,
    SuggestionStage, TickerContext, WidgetConfig,
};
use chat_state::GeometryStore;
use tokio::sync::{broadcast, RwLock};

use crate::events::{SessionEvent, WidgetStatus};
use crate::geometry::EventedGeometryStore;
use crate::session::WidgetSession;
use crate::view::WidgetView;

const EVENT_CAPACITY: usize = 64;

/// Why a send did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Empty,
    Closed,
    Locked,
    AwaitingReply,
}

/// Result of a `send_turn` call.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    Skipped(SkipReason),
    /// The backend answered. `locked` is the lockout state after the turn.
    Replied { locked: bool },
    /// The turn failed and a fallback reply was shown instead.
    Fallback { reason: String },
    /// The session was closed or cleared while the turn was in flight.
    Discarded,
}

/// Session Manager - owns one widget conversation
pub struct SessionManager {
    client: Arc<dyn ChatApiClient>,
    user_id: String,
    turn_timeout: Duration,
    session: Arc<RwLock<WidgetSession>>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionManager {
    pub fn new(client: Arc<dyn ChatApiClient>, config: &WidgetConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            client,
            user_id: config.user_id.clone(),
            turn_timeout: config.request_timeout(),
            session: Arc::new(RwLock::new(WidgetSession::default())),
            events,
        }
    }

    pub fn with_turn_timeout(mut self, timeout: Duration) -> Self {
        self.turn_timeout = timeout;
        self
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Wrap a geometry store so its writes show up on this manager's bus.
    pub fn bind_geometry<S: GeometryStore>(&self, store: S) -> EventedGeometryStore<S> {
        EventedGeometryStore::new(store, self.events.clone())
    }

    /// Open the widget. Always starts a new session; history survives a
    /// close/reopen unless it only holds the welcome message.
    pub async fn open(&self, ticker: Option<TickerContext>) {
        {
            let mut session = self.session.write().await;
            session.restart();
            session.open = true;
            session.ticker = ticker;

            if session.history.is_pristine() {
                let welcome = open_greeting(session.ticker.as_ref());
                session.history.reset(welcome);
                self.emit_history(&session);
            }

            tracing::info!(
                ticker = session.ticker.as_ref().map(|t| t.symbol.as_str()),
                client = self.client.name(),
                "Chat widget opened"
            );
            self.emit_session(&session);
            self.emit_status(&session);
        }
        self.refresh_suggestions(SuggestionStage::Initial).await;
    }

    /// Close the widget. Drops the session; keeps the history.
    pub async fn close(&self) {
        let mut session = self.session.write().await;
        session.restart();
        session.open = false;
        tracing::info!("Chat widget closed");
        self.emit_session(&session);
        self.emit_status(&session);
    }

    /// Replace history with a greeting and start a new session.
    pub async fn clear_history(&self) {
        {
            let mut session = self.session.write().await;
            session.restart();
            let greeting = clear_greeting(session.ticker.as_ref());
            session.history.reset(greeting);
            tracing::info!("Chat history cleared");
            self.emit_history(&session);
            self.emit_session(&session);
            self.emit_status(&session);
        }
        self.refresh_suggestions(SuggestionStage::Initial).await;
    }

    /// Send one user turn.
    ///
    /// The user message is appended as pending before the request goes out
    /// and settled once it completes. At most one turn is in flight; the
    /// reply is dropped if the session was reset in the meantime.
    pub async fn send_turn(&self, text: &str) -> TurnOutcome {
        let (turn, pending_id, epoch) = {
            let mut session = self.session.write().await;
            if let Some(reason) = session.skip_reason(text) {
                tracing::debug!(?reason, "Turn skipped");
                return TurnOutcome::Skipped(reason);
            }

            let pending_id = session.history.push_user(text);
            session.awaiting_reply = true;
            let turn = TurnRequest {
                text: text.to_string(),
                user_id: self.user_id.clone(),
                ticker: session.ticker.clone(),
                summary: session.state.summary().to_string(),
                session_id: session.state.session_id(),
            };
            self.emit_history(&session);
            self.emit_suggestions(&session);
            self.emit_status(&session);
            (turn, pending_id, session.epoch)
        };

        tracing::debug!(
            client = self.client.name(),
            session_id = ?turn.session_id,
            "Sending chat turn"
        );
        let result = match tokio::time::timeout(self.turn_timeout, self.client.send_turn(&turn)).await
        {
            Ok(result) => result,
            Err(_) => Err(ChatClientError::Timeout(self.turn_timeout)),
        };

        let mut session = self.session.write().await;
        if session.epoch != epoch {
            tracing::debug!("Session reset while turn was in flight, dropping result");
            if session.history.settle(pending_id, MessageStatus::Failed) {
                self.emit_history(&session);
            }
            return TurnOutcome::Discarded;
        }
        session.awaiting_reply = false;

        let mut wants_follow_ups = false;
        let outcome = match result {
            Ok(reply) => {
                session.history.settle(pending_id, MessageStatus::Delivered);
                session.history.push_bot(reply.reply);
                let just_locked = session.state.apply_turn(
                    reply.session_id,
                    &reply.summary,
                    reply.unrelated_topic_count,
                );
                if just_locked {
                    tracing::info!(
                        count = reply.unrelated_topic_count,
                        "Unrelated topic limit reached, chat locked"
                    );
                }

                let locked = session.state.locked();
                if locked {
                    session.show_suggestions = false;
                } else if reply.suggestions.is_empty() {
                    wants_follow_ups = true;
                } else {
                    session.suggestions = reply.suggestions;
                    session.show_suggestions = true;
                }
                self.emit_session(&session);
                TurnOutcome::Replied { locked }
            }
            Err(error) => {
                tracing::warn!(client = self.client.name(), error = %error, "Chat turn failed");
                let fallback = map_failure(&error);
                session.history.settle(pending_id, MessageStatus::Failed);
                session.history.push_bot(fallback.reply);
                session.suggestions = fallback.suggestions;
                session.show_suggestions = true;
                TurnOutcome::Fallback {
                    reason: error.to_string(),
                }
            }
        };

        self.emit_history(&session);
        self.emit_suggestions(&session);
        self.emit_status(&session);
        drop(session);

        if wants_follow_ups {
            self.refresh_suggestions(SuggestionStage::FollowUp).await;
        }
        outcome
    }

    /// Send a suggestion as if the user typed it.
    pub async fn select_suggestion(&self, suggestion: &str) -> TurnOutcome {
        self.send_turn(suggestion).await
    }

    /// Ask the client for quick replies, falling back to the local set.
    /// Never runs once the session is locked.
    pub async fn refresh_suggestions(&self, stage: SuggestionStage) {
        let (ticker, session_id, epoch) = {
            let session = self.session.read().await;
            if session.state.locked() {
                tracing::debug!("Session locked, not fetching suggestions");
                return;
            }
            (
                session.ticker.clone(),
                session.state.session_id(),
                session.epoch,
            )
        };

        let fetched = tokio::time::timeout(
            self.turn_timeout,
            self.client
                .fetch_suggestions(stage, ticker.as_ref(), session_id),
        )
        .await;
        let suggestions = match fetched {
            Ok(Ok(suggestions)) if !suggestions.is_empty() => suggestions,
            Ok(Ok(_)) => derive(stage, ticker.as_ref()),
            Ok(Err(error)) => {
                tracing::warn!(error = %error, "Suggestion fetch failed, using defaults");
                derive(stage, ticker.as_ref())
            }
            Err(_) => {
                tracing::warn!("Suggestion fetch timed out, using defaults");
                derive(stage, ticker.as_ref())
            }
        };

        let mut session = self.session.write().await;
        if session.epoch != epoch || session.state.locked() {
            return;
        }
        session.suggestions = suggestions;
        session.show_suggestions = true;
        self.emit_suggestions(&session);
    }

    /// Probe the backend.
    pub async fn health(&self) -> chat_client::Result<()> {
        self.client.health().await
    }

    pub async fn history(&self) -> Vec<Message> {
        self.session.read().await.history.messages().to_vec()
    }

    pub async fn session_state(&self) -> SessionState {
        self.session.read().await.state.clone()
    }

    pub async fn suggestions(&self) -> Vec<String> {
        self.session.read().await.suggestions.clone()
    }

    pub async fn ticker(&self) -> Option<TickerContext> {
        self.session.read().await.ticker.clone()
    }

    pub async fn is_awaiting_reply(&self) -> bool {
        self.session.read().await.awaiting_reply
    }

    pub async fn status(&self) -> WidgetStatus {
        self.session.read().await.status()
    }

    pub async fn view(&self) -> WidgetView {
        WidgetView::from_session(&*self.session.read().await)
    }

    fn emit(&self, event: SessionEvent) {
        tracing::trace!(kind = event.kind(), "Session event");
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    fn emit_history(&self, session: &WidgetSession) {
        self.emit(SessionEvent::HistoryChanged {
            messages: session.history.messages().to_vec(),
        });
    }

    fn emit_session(&self, session: &WidgetSession) {
        self.emit(SessionEvent::SessionChanged {
            state: session.state.clone(),
        });
    }

    fn emit_suggestions(&self, session: &WidgetSession) {
        self.emit(SessionEvent::SuggestionsChanged {
            suggestions: session.suggestions.clone(),
            visible: session.suggestions_visible(),
        });
    }

    fn emit_status(&self, session: &WidgetSession) {
        self.emit(SessionEvent::StatusChanged {
            status: session.status(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chat_client::{TurnReply, FALLBACK_REPLY};
    use chat_core::{SessionId, Sender};
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::sync::Notify;

    /// Client that replays scripted results and records every turn.
    #[derive(Default)]
    struct ScriptedClient {
        replies: Mutex<VecDeque<chat_client::Result<TurnReply>>>,
        turns: Mutex<Vec<TurnRequest>>,
        suggestion_calls: AtomicUsize,
        gate: Option<Arc<Notify>>,
        hang: bool,
    }

    impl ScriptedClient {
        fn with_replies(replies: Vec<chat_client::Result<TurnReply>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                ..Self::default()
            }
        }

        fn turns(&self) -> Vec<TurnRequest> {
            self.turns.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatApiClient for ScriptedClient {
        fn name(&self) -> &'static str {
            "scripted"
        }

        async fn send_turn(&self, turn: &TurnRequest) -> chat_client::Result<TurnReply> {
            self.turns.lock().unwrap().push(turn.clone());
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            if self.hang {
                std::future::pending::<()>().await;
            }
            let next = self.replies.lock().unwrap().pop_front();
            next.unwrap_or_else(|| Ok(reply("ok")))
        }

        async fn fetch_suggestions(
            &self,
            stage: SuggestionStage,
            ticker: Option<&TickerContext>,
            _session_id: Option<SessionId>,
        ) -> chat_client::Result<Vec<String>> {
            self.suggestion_calls.fetch_add(1, Ordering::SeqCst);
            Ok(derive(stage, ticker))
        }

        async fn health(&self) -> chat_client::Result<()> {
            Ok(())
        }
    }

    fn reply(text: &str) -> TurnReply {
        TurnReply {
            reply: text.to_string(),
            ..TurnReply::default()
        }
    }

    fn manager(client: Arc<ScriptedClient>) -> SessionManager {
        SessionManager::new(client, &WidgetConfig::default())
    }

    fn aapl() -> TickerContext {
        TickerContext::new("AAPL", "Apple Inc.", 150.25)
    }

    #[tokio::test]
    async fn test_open_without_ticker_shows_generic_welcome() {
        let client = Arc::new(ScriptedClient::default());
        let manager = manager(client.clone());
        manager.open(None).await;

        let history = manager.history().await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].sender(), Sender::Bot);
        assert!(history[0].text().starts_with("Hello! I'm your AI assistant."));
        assert_eq!(
            manager.suggestions().await,
            derive(SuggestionStage::Initial, None)
        );
        assert_eq!(manager.status().await, WidgetStatus::Ready);
    }

    #[tokio::test]
    async fn test_open_with_ticker_mentions_symbol_and_price() {
        let manager = manager(Arc::new(ScriptedClient::default()));
        manager.open(Some(aapl())).await;

        let history = manager.history().await;
        assert!(history[0].text().contains("AAPL"));
        assert!(history[0].text().contains("150.25"));
        assert_eq!(manager.suggestions().await.len(), 3);
    }

    #[tokio::test]
    async fn test_blank_send_is_noop() {
        let client = Arc::new(ScriptedClient::default());
        let manager = manager(client.clone());
        manager.open(None).await;

        let outcome = manager.send_turn("   ").await;
        assert_eq!(outcome, TurnOutcome::Skipped(SkipReason::Empty));
        assert_eq!(manager.history().await.len(), 1);
        assert!(client.turns().is_empty());
    }

    #[tokio::test]
    async fn test_send_before_open_is_skipped() {
        let client = Arc::new(ScriptedClient::default());
        let manager = manager(client.clone());
        let outcome = manager.send_turn("hello").await;
        assert_eq!(outcome, TurnOutcome::Skipped(SkipReason::Closed));
        assert!(client.turns().is_empty());
    }

    #[tokio::test]
    async fn test_successful_turn_updates_session() {
        let client = Arc::new(ScriptedClient::with_replies(vec![Ok(TurnReply {
            reply: "Apple is up today.".to_string(),
            summary: "asked about AAPL".to_string(),
            suggestions: vec!["One".to_string(), "Two".to_string()],
            session_id: Some(42),
            unrelated_topic_count: 1,
        })]));
        let manager = manager(client.clone());
        manager.open(Some(aapl())).await;

        let outcome = manager.send_turn("How is AAPL?").await;
        assert_eq!(outcome, TurnOutcome::Replied { locked: false });

        let history = manager.history().await;
        assert_eq!(history.len(), 3);
        assert_eq!(history[1].sender(), Sender::User);
        assert_eq!(history[1].status(), MessageStatus::Delivered);
        assert_eq!(history[2].text(), "Apple is up today.");

        let state = manager.session_state().await;
        assert_eq!(state.session_id(), Some(42));
        assert_eq!(state.summary(), "asked about AAPL");
        assert_eq!(state.unrelated_topic_count(), 1);
        assert!(state.started());
        assert_eq!(manager.suggestions().await, vec!["One", "Two"]);
    }

    #[tokio::test]
    async fn test_session_id_is_sent_on_next_turn() {
        let client = Arc::new(ScriptedClient::with_replies(vec![
            Ok(TurnReply {
                session_id: Some(42),
                summary: "s1".to_string(),
                ..reply("first")
            }),
            Ok(reply("second")),
        ]));
        let manager = manager(client.clone());
        manager.open(None).await;

        manager.send_turn("one").await;
        manager.send_turn("two").await;

        let turns = client.turns();
        assert_eq!(turns[0].session_id, None);
        assert_eq!(turns[0].summary, "");
        assert_eq!(turns[1].session_id, Some(42));
        assert_eq!(turns[1].summary, "s1");
        // No id in the second reply keeps the first
        assert_eq!(manager.session_state().await.session_id(), Some(42));
    }

    #[tokio::test]
    async fn test_unrelated_count_is_taken_from_reply() {
        let client = Arc::new(ScriptedClient::with_replies(vec![
            Ok(TurnReply {
                unrelated_topic_count: 2,
                ..reply("a")
            }),
            Ok(TurnReply {
                unrelated_topic_count: 1,
                ..reply("b")
            }),
        ]));
        let manager = manager(client);
        manager.open(None).await;
        manager.send_turn("x").await;
        manager.send_turn("y").await;
        assert_eq!(manager.session_state().await.unrelated_topic_count(), 1);
    }

    #[tokio::test]
    async fn test_lockout_blocks_sends_and_suggestions() {
        let client = Arc::new(ScriptedClient::with_replies(vec![Ok(TurnReply {
            unrelated_topic_count: 3,
            suggestions: vec!["ignored".to_string()],
            ..reply("Let's stay on topic.")
        })]));
        let manager = manager(client.clone());
        manager.open(Some(aapl())).await;

        let outcome = manager.send_turn("what's the weather?").await;
        assert_eq!(outcome, TurnOutcome::Replied { locked: true });
        assert_eq!(manager.status().await, WidgetStatus::Unavailable);

        let calls = client.suggestion_calls.load(Ordering::SeqCst);
        manager.refresh_suggestions(SuggestionStage::FollowUp).await;
        assert_eq!(client.suggestion_calls.load(Ordering::SeqCst), calls);

        let len = manager.history().await.len();
        let outcome = manager.send_turn("hello?").await;
        assert_eq!(outcome, TurnOutcome::Skipped(SkipReason::Locked));
        assert_eq!(manager.history().await.len(), len);
        assert_eq!(client.turns().len(), 1);

        let view = manager.view().await;
        assert!(view.suggestions.is_none());
        assert!(!view.input_enabled);
    }

    #[tokio::test]
    async fn test_clear_and_reopen_unlock() {
        let client = Arc::new(ScriptedClient::with_replies(vec![
            Ok(TurnReply {
                unrelated_topic_count: 3,
                ..reply("locked")
            }),
            Ok(TurnReply {
                unrelated_topic_count: 3,
                ..reply("locked again")
            }),
        ]));
        let manager = manager(client.clone());
        manager.open(None).await;
        manager.send_turn("off topic").await;

        manager.clear_history().await;
        assert!(!manager.session_state().await.locked());
        assert_eq!(manager.history().await.len(), 1);
        assert_eq!(
            manager.history().await[0].text(),
            "Hello! I'm your AI assistant. How can I assist you today?"
        );

        manager.send_turn("off topic").await;
        assert!(manager.session_state().await.locked());

        manager.close().await;
        manager.open(None).await;
        assert!(!manager.session_state().await.locked());
        assert_eq!(manager.status().await, WidgetStatus::Ready);
    }

    #[tokio::test]
    async fn test_transport_failure_shows_fallback() {
        let client = Arc::new(ScriptedClient::with_replies(vec![
            Ok(TurnReply {
                session_id: Some(7),
                summary: "kept".to_string(),
                ..reply("first")
            }),
            Err(ChatClientError::Http {
                status: 502,
                body: "bad gateway".to_string(),
            }),
        ]));
        let manager = manager(client);
        manager.open(None).await;
        manager.send_turn("one").await;

        let outcome = manager.send_turn("two").await;
        assert!(matches!(outcome, TurnOutcome::Fallback { .. }));

        let history = manager.history().await;
        assert_eq!(history.len(), 5);
        assert_eq!(history[3].status(), MessageStatus::Failed);
        assert_eq!(history[4].text(), FALLBACK_REPLY);
        assert_eq!(
            manager.suggestions().await,
            vec![
                "Try asking again",
                "Check your connection",
                "Contact support if the issue persists"
            ]
        );

        let state = manager.session_state().await;
        assert_eq!(state.session_id(), Some(7));
        assert_eq!(state.summary(), "kept");
        assert!(!manager.is_awaiting_reply().await);
    }

    #[tokio::test]
    async fn test_api_error_reply() {
        let client = Arc::new(ScriptedClient::with_replies(vec![Err(ChatClientError::Api {
            message: Some("quota exceeded".to_string()),
            summary: None,
            suggestions: vec![],
        })]));
        let manager = manager(client);
        manager.open(None).await;
        manager.send_turn("hi").await;
        let history = manager.history().await;
        assert_eq!(history.last().unwrap().text(), "API Error: quota exceeded");
    }

    #[tokio::test]
    async fn test_empty_reply_suggestions_fetch_follow_ups() {
        let client = Arc::new(ScriptedClient::with_replies(vec![Ok(reply("sure"))]));
        let manager = manager(client.clone());
        manager.open(Some(aapl())).await;
        let calls = client.suggestion_calls.load(Ordering::SeqCst);

        manager.send_turn("tell me more").await;
        assert_eq!(client.suggestion_calls.load(Ordering::SeqCst), calls + 1);
        assert_eq!(
            manager.suggestions().await,
            derive(SuggestionStage::FollowUp, Some(&aapl()))
        );
    }

    #[tokio::test]
    async fn test_single_turn_in_flight() {
        let gate = Arc::new(Notify::new());
        let client = Arc::new(ScriptedClient {
            gate: Some(gate.clone()),
            ..ScriptedClient::default()
        });
        let manager = Arc::new(manager(client.clone()));
        manager.open(None).await;

        let background = manager.clone();
        let first = tokio::spawn(async move { background.send_turn("first").await });
        while !manager.is_awaiting_reply().await {
            tokio::task::yield_now().await;
        }

        let history = manager.history().await;
        assert_eq!(history.len(), 2);
        assert!(history[1].is_pending());
        assert!(manager.view().await.typing_indicator);

        let second = manager.send_turn("second").await;
        assert_eq!(second, TurnOutcome::Skipped(SkipReason::AwaitingReply));

        gate.notify_one();
        let outcome = first.await.unwrap();
        assert_eq!(outcome, TurnOutcome::Replied { locked: false });
        assert_eq!(client.turns().len(), 1);
        assert_eq!(
            manager.history().await[1].status(),
            MessageStatus::Delivered
        );
    }

    #[tokio::test]
    async fn test_close_discards_in_flight_reply() {
        let gate = Arc::new(Notify::new());
        let client = Arc::new(ScriptedClient {
            replies: Mutex::new(
                vec![Ok(TurnReply {
                    session_id: Some(9),
                    ..reply("late")
                })]
                .into(),
            ),
            gate: Some(gate.clone()),
            ..ScriptedClient::default()
        });
        let manager = Arc::new(manager(client));
        manager.open(None).await;

        let background = manager.clone();
        let turn = tokio::spawn(async move { background.send_turn("hello").await });
        while !manager.is_awaiting_reply().await {
            tokio::task::yield_now().await;
        }
        manager.close().await;
        gate.notify_one();

        assert_eq!(turn.await.unwrap(), TurnOutcome::Discarded);
        let history = manager.history().await;
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].status(), MessageStatus::Failed);
        assert_eq!(manager.session_state().await.session_id(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_turn_timeout_falls_back() {
        let client = Arc::new(ScriptedClient {
            hang: true,
            ..ScriptedClient::default()
        });
        let manager = manager(client).with_turn_timeout(Duration::from_secs(30));
        manager.open(None).await;

        let outcome = manager.send_turn("anyone there?").await;
        assert!(matches!(outcome, TurnOutcome::Fallback { .. }));
        assert_eq!(manager.history().await.last().unwrap().text(), FALLBACK_REPLY);
        assert!(!manager.is_awaiting_reply().await);
    }

    #[tokio::test]
    async fn test_reopen_keeps_history_and_resets_session() {
        let client = Arc::new(ScriptedClient::with_replies(vec![Ok(TurnReply {
            session_id: Some(5),
            summary: "talked".to_string(),
            ..reply("hi")
        })]));
        let manager = manager(client);
        manager.open(None).await;
        manager.send_turn("hello").await;

        manager.close().await;
        assert_eq!(manager.status().await, WidgetStatus::Closed);
        manager.open(None).await;

        assert_eq!(manager.history().await.len(), 3);
        let state = manager.session_state().await;
        assert_eq!(state.session_id(), None);
        assert_eq!(state.summary(), "");
        assert!(!state.started());
    }

    #[tokio::test]
    async fn test_pristine_reopen_welcomes_new_ticker() {
        let manager = manager(Arc::new(ScriptedClient::default()));
        manager.open(Some(aapl())).await;
        manager.close().await;

        let msft = TickerContext::new("MSFT", "Microsoft", 300.0);
        manager.open(Some(msft.clone())).await;

        let history = manager.history().await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].text(), msft.welcome());
    }

    #[tokio::test]
    async fn test_message_ids_increase() {
        let manager = manager(Arc::new(ScriptedClient::default()));
        manager.open(None).await;
        manager.send_turn("a").await;
        manager.send_turn("b").await;

        let ids: Vec<_> = manager.history().await.iter().map(|m| m.id()).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn test_events_are_published() {
        let manager = manager(Arc::new(ScriptedClient::default()));
        let mut events = manager.subscribe();
        manager.open(None).await;
        manager.send_turn("hello").await;

        let mut kinds = Vec::new();
        while let Ok(event) = events.try_recv() {
            kinds.push(event.kind());
        }
        assert_eq!(kinds[0], "history_changed");
        assert!(kinds.contains(&"session_changed"));
        assert!(kinds.contains(&"suggestions_changed"));
        assert!(kinds.contains(&"status_changed"));
    }

    #[tokio::test]
    async fn test_bound_geometry_store_emits_events() {
        use chat_state::{SharedGeometry, Viewport, WidgetGeometry};

        let manager = manager(Arc::new(ScriptedClient::default()));
        let mut events = manager.subscribe();
        let store = manager.bind_geometry(SharedGeometry::default());

        let geometry = WidgetGeometry::initial(Viewport::new(1280.0, 800.0));
        store.store(geometry);

        assert_eq!(store.load(), Some(geometry));
        match events.try_recv().unwrap() {
            SessionEvent::GeometryChanged { geometry: g } => assert_eq!(g, geometry),
            other => panic!("unexpected event {:?}", other),
        }
    }
}
