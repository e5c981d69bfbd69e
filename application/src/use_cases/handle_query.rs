//! Handle query use case — answers one end-user question.
//!
//! Tries, in order: the fixed greeting table, the corpus (fuzzy), and
//! finally routing to a human responder. The caller owns the
//! [`SessionState`]; it is updated only when handling succeeds.

use crate::config::DeskParams;
use crate::ports::interaction_logger::{
    InteractionEvent, InteractionLogger, NoInteractionLogger,
};
use crate::use_cases::corpus_store::CorpusStore;
use crate::use_cases::error::DeskError;
use crate::use_cases::routing::RoutingStateMachine;
use guidance_domain::{FixedResponses, FuzzyMatcher, PendingQuery, Query, SessionState};
use std::sync::Arc;
use tracing::{debug, info};

/// What happened to a question
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// Greeting or courtesy phrase with a canned reply
    Fixed(String),
    /// Answered from the corpus
    Matched {
        question: String,
        answer: String,
        ratio: f64,
    },
    /// No answer available; handed to a responder
    Routed(PendingQuery),
}

impl QueryOutcome {
    /// Text to show the end user, if the question was answered
    pub fn reply(&self) -> Option<&str> {
        match self {
            QueryOutcome::Fixed(text) => Some(text),
            QueryOutcome::Matched { answer, .. } => Some(answer),
            QueryOutcome::Routed(_) => None,
        }
    }

    pub fn is_routed(&self) -> bool {
        matches!(self, QueryOutcome::Routed(_))
    }
}

/// Use case for answering or routing a question.
pub struct HandleQueryUseCase {
    fixed: FixedResponses,
    matcher: FuzzyMatcher,
    corpus: Arc<CorpusStore>,
    routing: Arc<RoutingStateMachine>,
    logger: Arc<dyn InteractionLogger>,
}

impl HandleQueryUseCase {
    pub fn new(
        corpus: Arc<CorpusStore>,
        routing: Arc<RoutingStateMachine>,
        params: &DeskParams,
    ) -> Result<Self, DeskError> {
        Ok(Self {
            fixed: FixedResponses,
            matcher: FuzzyMatcher::new(params.threshold)?,
            corpus,
            routing,
            logger: Arc::new(NoInteractionLogger),
        })
    }

    /// Create with an interaction logger.
    pub fn with_interaction_logger(mut self, logger: Arc<dyn InteractionLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn corpus(&self) -> &CorpusStore {
        &self.corpus
    }

    pub fn routing(&self) -> &RoutingStateMachine {
        &self.routing
    }

    pub fn threshold(&self) -> f64 {
        self.matcher.threshold()
    }

    /// Answer `raw` or route it to a responder.
    ///
    /// Fixed and corpus answers set `last_response` and leave any pending
    /// question in place. A routed question supersedes the pending one.
    pub fn handle(&self, session: &mut SessionState, raw: &str) -> Result<QueryOutcome, DeskError> {
        let query = Query::parse(raw)?;

        if let Some(reply) = self.fixed.lookup(query.as_str()) {
            debug!("Fixed response for '{}'", query);
            self.logger.log(InteractionEvent::new(
                "fixed_response",
                serde_json::json!({
                    "question": query.as_str(),
                    "reply": reply,
                }),
            ));
            session.respond(reply);
            return Ok(QueryOutcome::Fixed(reply.to_string()));
        }

        if let Some(hit) = self.corpus.find_best(&self.matcher, query.as_str()) {
            info!(
                "Answered from corpus (ratio {:.3}): '{}'",
                hit.ratio, hit.question
            );
            self.logger.log(InteractionEvent::new(
                "corpus_match",
                serde_json::json!({
                    "question": query.as_str(),
                    "matched": hit.question,
                    "ratio": hit.ratio,
                }),
            ));
            session.respond(hit.answer.clone());
            return Ok(QueryOutcome::Matched {
                question: hit.question,
                answer: hit.answer,
                ratio: hit.ratio,
            });
        }

        debug!(
            "No corpus question reached {:.2} for '{}'",
            self.matcher.threshold(),
            query
        );
        let pending = self.routing.submit_unmatched(session, &query)?;
        Ok(QueryOutcome::Routed(pending))
    }
}
