//! Application state
//!
//! Wires configuration, vocabulary, the classifier backend and the
//! persistence layer into one `ConversationFlow` shared by all
//! webhook handlers.

use std::sync::Arc;

use anyhow::Context;

use finia_agent::ConversationFlow;
use finia_config::{Settings, Vocabulary};
use finia_llm::{LlmConfig, OpenAiBackend, TransactionClassifier};
use finia_persistence::PersistenceLayer;

#[derive(Clone)]
pub struct AppState {
    pub flow: Arc<ConversationFlow>,
}

impl AppState {
    /// Assemble the full stack from settings.
    pub fn build(settings: &Settings) -> anyhow::Result<Self> {
        let vocabulary = Arc::new(match &settings.vocabulary_path {
            Some(path) => Vocabulary::load(path)
                .with_context(|| format!("loading vocabulary from {}", path))?,
            None => Vocabulary::default(),
        });

        let backend = OpenAiBackend::new(LlmConfig::from(&settings.llm))
            .context("initializing classifier backend")?;
        let classifier = TransactionClassifier::new(
            Arc::new(backend),
            vocabulary.clone(),
            settings.agent.confidence_threshold,
        );

        let persistence = PersistenceLayer::in_memory();
        let flow = ConversationFlow::new(
            persistence.users,
            persistence.state,
            persistence.ledger,
            classifier,
            vocabulary,
            &settings.agent,
        );

        Ok(Self { flow: Arc::new(flow) })
    }
}
