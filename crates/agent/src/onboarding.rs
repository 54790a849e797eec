//! Onboarding flow
//!
//! Five-step sequence under the `onboarding` topic: preferred name,
//! expense example, income example, category confirmation, learning
//! mode. The preferred name is persisted to the user directory as soon
//! as it is collected; completion flips `onboarding_complete`.

use std::sync::Arc;

use finia_config::Vocabulary;
use finia_core::{OnboardingStep, Topic, UserProfile};
use finia_persistence::{StateStore, UserDirectory};

use crate::input::is_affirmative;
use crate::replies;

pub struct OnboardingFlow {
    users: Arc<dyn UserDirectory>,
    state: Arc<dyn StateStore>,
    vocabulary: Arc<Vocabulary>,
}

impl OnboardingFlow {
    pub fn new(
        users: Arc<dyn UserDirectory>,
        state: Arc<dyn StateStore>,
        vocabulary: Arc<Vocabulary>,
    ) -> Self {
        Self { users, state, vocabulary }
    }

    /// Advance onboarding by one user message and return the reply.
    pub async fn handle(&self, user: &UserProfile, text: &str) -> String {
        let record = match self.state.get_state(user.id, Topic::Onboarding).await {
            Ok(record) => record,
            Err(e) => {
                tracing::error!(user_id = user.id, error = %e, "onboarding state read failed");
                return replies::persistence_retry();
            }
        };

        let Some(record) = record else {
            return self.begin(user).await;
        };

        let step = match record.decode_onboarding() {
            Ok(step) => step,
            Err(e) => {
                tracing::warn!(user_id = user.id, error = %e, "corrupted onboarding state, restarting");
                let _ = self.state.clear_state(user.id, Topic::Onboarding).await;
                return self.begin(user).await;
            }
        };

        match step {
            OnboardingStep::PreferredName => {
                let name = text.trim();
                if name.is_empty() {
                    return replies::onboarding_welcome();
                }

                let mut updated = user.clone();
                updated.display_name = Some(name.to_string());
                if self.users.update(&updated).await.is_err() {
                    return replies::persistence_retry();
                }

                let next = OnboardingStep::ExpenseExample { name: name.to_string() };
                match self.store(user, &next).await {
                    Ok(()) => replies::onboarding_ask_expense_example(name),
                    Err(reply) => reply,
                }
            }
            OnboardingStep::ExpenseExample { name } => {
                let next = OnboardingStep::IncomeExample {
                    name,
                    expense_example: text.trim().to_string(),
                };
                match self.store(user, &next).await {
                    Ok(()) => replies::onboarding_ask_income_example(),
                    Err(reply) => reply,
                }
            }
            OnboardingStep::IncomeExample { name, expense_example } => {
                let next = OnboardingStep::CategoryConfirmation {
                    name,
                    expense_example,
                    income_example: text.trim().to_string(),
                };
                match self.store(user, &next).await {
                    Ok(()) => replies::onboarding_category_confirmation(
                        self.vocabulary.categories(user.profile_kind),
                    ),
                    Err(reply) => reply,
                }
            }
            OnboardingStep::CategoryConfirmation { name, .. } => {
                let accepted = is_affirmative(text);
                match self.store(user, &OnboardingStep::LearningMode { name }).await {
                    Ok(()) => replies::onboarding_learning_mode_menu(accepted),
                    Err(reply) => reply,
                }
            }
            OnboardingStep::LearningMode { name } => match text.trim() {
                "1" | "2" => {
                    let mut updated = user.clone();
                    updated.onboarding_complete = true;
                    if self.users.update(&updated).await.is_err() {
                        return replies::persistence_retry();
                    }
                    if let Err(e) = self.state.clear_state(user.id, Topic::Onboarding).await {
                        tracing::error!(user_id = user.id, error = %e, "onboarding state clear failed");
                        return replies::persistence_retry();
                    }
                    replies::onboarding_complete(&name)
                }
                _ => replies::onboarding_learning_mode_reprompt(),
            },
        }
    }

    /// Start onboarding from the first step.
    pub async fn begin(&self, user: &UserProfile) -> String {
        match self.store(user, &OnboardingStep::PreferredName).await {
            Ok(()) => replies::onboarding_welcome(),
            Err(reply) => reply,
        }
    }

    async fn store(&self, user: &UserProfile, step: &OnboardingStep) -> Result<(), String> {
        let payload = match serde_json::to_value(step) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(user_id = user.id, error = %e, "onboarding step encode failed");
                return Err(replies::persistence_retry());
            }
        };
        if let Err(e) = self.state.set_state(user.id, Topic::Onboarding, payload).await {
            tracing::error!(user_id = user.id, error = %e, "onboarding state write failed");
            return Err(replies::persistence_retry());
        }
        Ok(())
    }
}
