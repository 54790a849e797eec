//! Conversation state machine
//!
//! Drives one inbound message through onboarding, the confirmation and
//! correction sub-flows, or fresh parsing and classification. States
//! live in the persisted state store under the `conversation` topic;
//! no stored row means IDLE. The handler is total: every failure path
//! maps to a user-facing reply, never an error out of the webhook.

use std::sync::Arc;

use finia_config::{AgentSettings, Vocabulary};
use finia_core::{
    BusinessContext, Candidate, Classification, ConversationStep, Nature, Outcome, ProfileKind,
    Topic, UserProfile,
};
use finia_llm::TransactionClassifier;
use finia_persistence::{Ledger, StateStore, UserDirectory};

use crate::input::{is_affirmative, is_negative, parse_menu_choice};
use crate::onboarding::OnboardingFlow;
use crate::recorder::Recorder;
use crate::replies;

pub struct ConversationFlow {
    users: Arc<dyn UserDirectory>,
    state: Arc<dyn StateStore>,
    classifier: TransactionClassifier,
    recorder: Recorder,
    onboarding: OnboardingFlow,
    vocabulary: Arc<Vocabulary>,
    restart_keyword: String,
}

impl ConversationFlow {
    pub fn new(
        users: Arc<dyn UserDirectory>,
        state: Arc<dyn StateStore>,
        ledger: Arc<dyn Ledger>,
        classifier: TransactionClassifier,
        vocabulary: Arc<Vocabulary>,
        settings: &AgentSettings,
    ) -> Self {
        Self {
            onboarding: OnboardingFlow::new(users.clone(), state.clone(), vocabulary.clone()),
            recorder: Recorder::new(ledger),
            users,
            state,
            classifier,
            vocabulary,
            restart_keyword: settings.restart_keyword.to_lowercase(),
        }
    }

    /// Handle one inbound message and produce the reply text.
    pub async fn handle(&self, sender_address: &str, text: &str) -> String {
        let user = match self.users.find_or_create(sender_address).await {
            Ok(user) => user,
            Err(e) => {
                tracing::error!(error = %e, "user lookup failed");
                return replies::persistence_retry();
            }
        };

        let trimmed = text.trim();

        // The restart keyword wins over any state, including mid-onboarding.
        if trimmed.to_lowercase() == self.restart_keyword {
            return self.restart(&user).await;
        }

        if !user.onboarding_complete {
            return self.onboarding.handle(&user, trimmed).await;
        }

        let record = match self.state.get_state(user.id, Topic::Conversation).await {
            Ok(record) => record,
            Err(e) => {
                tracing::error!(user_id = user.id, error = %e, "conversation state read failed");
                return replies::persistence_retry();
            }
        };

        match record {
            None => self.handle_idle(&user, trimmed).await,
            Some(record) => match record.decode_conversation() {
                Ok(step) => self.handle_step(&user, trimmed, step).await,
                Err(e) => {
                    tracing::warn!(user_id = user.id, error = %e, "corrupted conversation state, clearing");
                    let _ = self.state.clear_state(user.id, Topic::Conversation).await;
                    replies::corrupted_state()
                }
            },
        }
    }

    /// Clear both topics, reset onboarding completion and start over.
    async fn restart(&self, user: &UserProfile) -> String {
        if self.state.clear_state(user.id, Topic::Conversation).await.is_err()
            || self.state.clear_state(user.id, Topic::Onboarding).await.is_err()
        {
            return replies::persistence_retry();
        }

        let mut updated = user.clone();
        updated.onboarding_complete = false;
        if self.users.update(&updated).await.is_err() {
            return replies::persistence_retry();
        }

        tracing::info!(user_id = user.id, "conversation restarted");
        self.onboarding.begin(&updated).await
    }

    /// IDLE: parse the message as one or more fresh transactions.
    async fn handle_idle(&self, user: &UserProfile, text: &str) -> String {
        if finia_parse::looks_multiple(text) {
            let mut candidates = finia_parse::split(text);
            if candidates.len() > 1 {
                return self.record_batch(user, candidates).await;
            }
            if let Some(candidate) = candidates.pop() {
                return self.classify_and_route(user, candidate).await;
            }
            // Nothing splittable survived; report what plain validation sees.
        }

        match finia_parse::validate(text) {
            Ok(candidate) => self.classify_and_route(user, candidate).await,
            Err(e) => replies::error_help(&e),
        }
    }

    /// Classify one candidate and either record it or park it for
    /// confirmation. Failed classifications carry the keyword fallback
    /// and go through the same confirmation prompt.
    async fn classify_and_route(&self, user: &UserProfile, candidate: Candidate) -> String {
        let classification = self.classifier.classify(&candidate, user.profile_kind).await;

        match classification.outcome {
            Outcome::Resolved => {
                match self.recorder.record(&classification, &candidate, user).await {
                    Ok(reply) => reply,
                    Err(e) => {
                        tracing::error!(user_id = user.id, error = %e, "ledger append failed");
                        replies::persistence_retry()
                    }
                }
            }
            Outcome::LowConfidence | Outcome::Failed { .. } => {
                let prompt =
                    replies::confirm_prompt(&classification, &candidate, user.profile_kind);
                let step = ConversationStep::AwaitingConfirmation { classification, candidate };
                match self.store(user, &step).await {
                    Ok(()) => prompt,
                    Err(reply) => reply,
                }
            }
        }
    }

    /// Multi-transaction messages are recorded as a batch, without the
    /// per-item confirmation sub-flow.
    async fn record_batch(&self, user: &UserProfile, candidates: Vec<Candidate>) -> String {
        let mut items = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let classification = self.classifier.classify(&candidate, user.profile_kind).await;
            items.push((classification, candidate));
        }

        match self.recorder.record_batch(&items, user).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(user_id = user.id, error = %e, "batch append failed");
                replies::persistence_retry()
            }
        }
    }

    async fn handle_step(
        &self,
        user: &UserProfile,
        text: &str,
        step: ConversationStep,
    ) -> String {
        match step {
            ConversationStep::AwaitingConfirmation { classification, candidate } => {
                if is_affirmative(text) {
                    match self.recorder.record(&classification, &candidate, user).await {
                        Ok(reply) => {
                            if let Err(e) =
                                self.state.clear_state(user.id, Topic::Conversation).await
                            {
                                tracing::error!(user_id = user.id, error = %e, "state clear failed after record");
                            }
                            reply
                        }
                        Err(e) => {
                            // State stays put so the confirmation is not lost.
                            tracing::error!(user_id = user.id, error = %e, "ledger append failed");
                            replies::persistence_retry()
                        }
                    }
                } else if is_negative(text) {
                    let menu = replies::correction_type_menu(user.profile_kind);
                    let step = ConversationStep::AwaitingCorrectionType { candidate };
                    match self.store(user, &step).await {
                        Ok(()) => menu,
                        Err(reply) => reply,
                    }
                } else {
                    replies::confirm_reprompt()
                }
            }

            ConversationStep::AwaitingCorrectionType { candidate } => {
                let choice = parse_menu_choice(text)
                    .and_then(|n| correction_choice(user.profile_kind, n));

                match choice {
                    Some((nature, business_context)) => {
                        let menu = replies::category_menu(&self.vocabulary.categories_for(
                            user.profile_kind,
                            business_context,
                            nature,
                        ));
                        let step = ConversationStep::AwaitingCorrectionCategory {
                            candidate,
                            nature,
                            business_context,
                        };
                        match self.store(user, &step).await {
                            Ok(()) => menu,
                            Err(reply) => reply,
                        }
                    }
                    None => replies::correction_type_menu(user.profile_kind),
                }
            }

            ConversationStep::AwaitingCorrectionCategory {
                candidate,
                nature,
                business_context,
            } => {
                let categories =
                    self.vocabulary.categories_for(user.profile_kind, business_context, nature);

                let category = if let Some(n) = parse_menu_choice(text) {
                    match categories.get(n - 1) {
                        Some(picked) => picked.name.clone(),
                        None => return replies::category_menu(&categories),
                    }
                } else if text.is_empty() {
                    return replies::category_menu(&categories);
                } else {
                    text.to_string()
                };

                let classification = Classification {
                    nature,
                    business_context,
                    category,
                    origin: Classification::UNSPECIFIED_ORIGIN.to_string(),
                    confidence: 1.0,
                    outcome: Outcome::Resolved,
                };

                match self.recorder.record(&classification, &candidate, user).await {
                    Ok(reply) => {
                        if let Err(e) = self.state.clear_state(user.id, Topic::Conversation).await
                        {
                            tracing::error!(user_id = user.id, error = %e, "state clear failed after record");
                        }
                        reply
                    }
                    Err(e) => {
                        tracing::error!(user_id = user.id, error = %e, "ledger append failed");
                        replies::persistence_retry()
                    }
                }
            }
        }
    }

    async fn store(&self, user: &UserProfile, step: &ConversationStep) -> Result<(), String> {
        let payload = match serde_json::to_value(step) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(user_id = user.id, error = %e, "conversation step encode failed");
                return Err(replies::persistence_retry());
            }
        };
        if let Err(e) = self.state.set_state(user.id, Topic::Conversation, payload).await {
            tracing::error!(user_id = user.id, error = %e, "conversation state write failed");
            return Err(replies::persistence_retry());
        }
        Ok(())
    }
}

/// Map a numbered nature/context pick to its meaning. Personal profiles
/// see a 2-option menu, business profiles a 4-option one.
fn correction_choice(profile: ProfileKind, n: usize) -> Option<(Nature, BusinessContext)> {
    use BusinessContext::{Business, Personal};
    use Nature::{Expense, Income};

    if profile.has_business_context() {
        match n {
            1 => Some((Expense, Business)),
            2 => Some((Expense, Personal)),
            3 => Some((Income, Business)),
            4 => Some((Income, Personal)),
            _ => None,
        }
    } else {
        match n {
            1 => Some((Expense, Personal)),
            2 => Some((Income, Personal)),
            _ => None,
        }
    }
}
