//! Routing state machine — hands unmatched questions to human responders.
//!
//! Owns the process-wide [`UnreadState`] and drives each session's
//! [`SessionState`] through `Idle -> Pending -> Idle`. Every unread-count
//! change is persist-then-commit, and all mutations run under one lock so
//! concurrent submissions cannot lose increments.
//!
//! # Flow
//!
//! ```text
//! submit_unmatched(q)  -> classify -> unread[r] += 1 -> session.pending = q
//! answer(text)         -> corpus.append(q, text) -> unread[r] = 0 -> session idle
//! ```

use crate::ports::interaction_logger::{
    InteractionEvent, InteractionLogger, NoInteractionLogger,
};
use crate::ports::unread_store::UnreadStore;
use crate::use_cases::corpus_store::CorpusStore;
use crate::use_cases::error::DeskError;
use guidance_domain::{
    Domain, DomainClassifier, PendingQuery, Query, Responder, SessionState, UnreadState, truncate,
};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// One responder's badge for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponderBadge {
    pub domain: Domain,
    pub responder: Responder,
    pub unread: u64,
}

/// Tracks pending questions and per-responder unread counts.
pub struct RoutingStateMachine {
    classifier: DomainClassifier,
    corpus: Arc<CorpusStore>,
    store: Arc<dyn UnreadStore>,
    unread: Mutex<UnreadState>,
    logger: Arc<dyn InteractionLogger>,
}

impl RoutingStateMachine {
    /// Restore unread counts from `store`, or start every responder at zero.
    pub fn open(
        classifier: DomainClassifier,
        corpus: Arc<CorpusStore>,
        store: Arc<dyn UnreadStore>,
    ) -> Result<Self, DeskError> {
        let unread = match store.load()? {
            Some(stored) => {
                let (state, unknown) = UnreadState::reconcile(classifier.directory(), stored);
                for name in unknown {
                    warn!("Dropping unread count for unconfigured responder '{}'", name);
                }
                state
            }
            None => {
                info!("No saved unread counts; starting all responders at 0");
                UnreadState::zeroed(classifier.directory())
            }
        };

        Ok(Self {
            classifier,
            corpus,
            store,
            unread: Mutex::new(unread),
            logger: Arc::new(NoInteractionLogger),
        })
    }

    /// Create with an interaction logger.
    pub fn with_interaction_logger(mut self, logger: Arc<dyn InteractionLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn classifier(&self) -> &DomainClassifier {
        &self.classifier
    }

    /// Route `query` to a responder and make it the session's pending query.
    ///
    /// Any query already pending in the session is discarded unanswered.
    pub fn submit_unmatched(
        &self,
        session: &mut SessionState,
        query: &Query,
    ) -> Result<PendingQuery, DeskError> {
        let classification = self.classifier.classify(query.as_str());
        let fallback = classification.is_fallback();
        let pending = PendingQuery::new(
            query.as_str(),
            classification.domain,
            classification.responder,
        );

        let unread = {
            let mut state = self.lock_unread();
            let next = state.incremented(&pending.responder);
            self.store.save(next.as_map())?;
            let count = next.count(&pending.responder);
            *state = next;
            count
        };

        let superseded = session.submit(pending.clone());
        if let Some(old) = &superseded {
            warn!(
                "Discarding unanswered question '{}' for a new one",
                truncate(&old.question, 80)
            );
        }

        info!(
            "Routed '{}' to {} ({}), unread now {}",
            truncate(&pending.question, 80),
            pending.responder,
            pending.domain,
            unread
        );
        self.logger.log(InteractionEvent::new(
            "routed",
            serde_json::json!({
                "question": pending.question,
                "domain": pending.domain,
                "responder": pending.responder,
                "keyword_score": classification.score,
                "fallback": fallback,
                "unread": unread,
                "superseded": superseded.map(|p| p.question),
            }),
        ));

        Ok(pending)
    }

    /// Record a human answer for the session's pending query.
    ///
    /// The answer is written to the corpus first; the responder's unread
    /// count is reset only after that succeeded. On error the session keeps
    /// its pending query so the answer can be resubmitted.
    ///
    /// If the corpus write succeeded but the unread reset could not be
    /// saved, the error is [`DeskError::UnreadPersistence`] and the answer
    /// is already in the corpus. Resubmitting the same answer then skips
    /// the corpus write and only retries the reset.
    pub fn answer(&self, session: &mut SessionState, response: &str) -> Result<(), DeskError> {
        let response = response.trim();
        if response.is_empty() {
            return Err(DeskError::InvalidInput("answer is empty".to_string()));
        }
        let pending = session.pending.clone().ok_or(DeskError::NoPendingQuery)?;

        {
            let mut state = self.lock_unread();
            if self.corpus.lookup_exact(&pending.question).as_deref() == Some(response) {
                debug!(
                    "Answer for '{}' already stored; only resetting unread",
                    truncate(&pending.question, 80)
                );
            } else {
                self.corpus.append(&pending.question, response)?;
            }

            let next = state.reset(&pending.responder);
            self.store.save(next.as_map())?;
            *state = next;
        }

        session.resolve(response);

        info!(
            "{} answered a {} question; unread reset",
            pending.responder, pending.domain
        );
        self.logger.log(InteractionEvent::new(
            "answered",
            serde_json::json!({
                "question": pending.question,
                "domain": pending.domain,
                "responder": pending.responder,
                "answer": response,
            }),
        ));

        Ok(())
    }

    /// The session's pending query, if it is assigned to `responder` and
    /// that responder currently has unread questions.
    pub fn peek(&self, session: &SessionState, responder: &str) -> Option<PendingQuery> {
        let pending = session.pending.as_ref()?;
        if !pending.is_assigned_to(responder) {
            return None;
        }
        if self.unread_count(responder) == 0 {
            return None;
        }
        Some(pending.clone())
    }

    /// Accept a session saved by an earlier run.
    ///
    /// A pending query whose responder no longer owns its domain (the
    /// directory changed in between) cannot be peeked or answered, so it
    /// is dropped.
    pub fn restore_session(&self, mut session: SessionState) -> SessionState {
        if let Some(pending) = &session.pending {
            let current = self.classifier.directory().responder_for(pending.domain);
            if current != &pending.responder {
                warn!(
                    "Dropping saved question for {}: {} is now handled by {}",
                    pending.responder, pending.domain, current
                );
                session.pending = None;
            }
        }
        session
    }

    /// Unread count for the responder called `name` (0 if unknown)
    pub fn unread_count(&self, name: &str) -> u64 {
        self.lock_unread().count_by_name(name)
    }

    /// Every configured responder with its unread count, in domain order
    pub fn badges(&self) -> Vec<ResponderBadge> {
        let state = self.lock_unread();
        self.classifier
            .directory()
            .iter()
            .map(|(domain, responder)| ResponderBadge {
                domain,
                responder: responder.clone(),
                unread: state.count(responder),
            })
            .collect()
    }

    fn lock_unread(&self) -> MutexGuard<'_, UnreadState> {
        self.unread.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
