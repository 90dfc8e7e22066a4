//! AI classification over an external text-completion provider.
//!
//! The provider itself lives behind [`CompletionProvider`] so that the HTTP client (see the
//! `tflow-groq` crate) can be swapped for a fake in tests.

mod parser;
mod prompt;

pub use parser::{parse_triage_answer, LabelMatch};
pub use prompt::{user_message, TRIAGE_SYSTEM_PROMPT};

use crate::error::ProviderError;
use crate::triage::TriageLevel;
use async_trait::async_trait;
use std::sync::Arc;

/// A text-in, text-out completion service.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Sends a system instruction and a user message, returning the model's reply.
    async fn complete(&self, system: &str, user: &str) -> Result<String, ProviderError>;
}

/// Classifies symptom text with a language model.
#[derive(Clone)]
pub struct AiClassifier {
    provider: Arc<dyn CompletionProvider>,
}

impl AiClassifier {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Asks the provider for a triage level.
    ///
    /// # Errors
    ///
    /// Returns a `ProviderError` if:
    /// - the provider call fails or times out,
    /// - the response is blank,
    /// - the response does not end in a recognisable label.
    pub async fn classify(&self, symptoms: &str) -> Result<TriageLevel, ProviderError> {
        let response = self
            .provider
            .complete(TRIAGE_SYSTEM_PROMPT, &user_message(symptoms))
            .await?;

        match parse_triage_answer(&response) {
            LabelMatch::Exact(level) => Ok(level),
            LabelMatch::LastLine(line) => parser::loose_label(&line).ok_or_else(|| {
                ProviderError::InvalidResponse(format!("no triage level in answer: {line}"))
            }),
            LabelMatch::Empty => Err(ProviderError::InvalidResponse(
                "empty response from provider".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct CannedProvider {
        reply: Result<String, ProviderError>,
        seen_user: Mutex<Option<String>>,
    }

    impl CannedProvider {
        fn new(reply: Result<&str, ProviderError>) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.map(str::to_string),
                seen_user: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl CompletionProvider for CannedProvider {
        async fn complete(&self, system: &str, user: &str) -> Result<String, ProviderError> {
            assert_eq!(system, TRIAGE_SYSTEM_PROMPT);
            *self.seen_user.lock().unwrap() = Some(user.to_string());
            self.reply.clone()
        }
    }

    #[tokio::test]
    async fn returns_exact_label() {
        let provider = CannedProvider::new(Ok("Thinking...\nCritical"));
        let classifier = AiClassifier::new(provider.clone());

        assert_eq!(
            classifier.classify("unresponsive after fall").await,
            Ok(TriageLevel::Critical)
        );
        assert_eq!(
            provider.seen_user.lock().unwrap().as_deref(),
            Some("A patient describes their symptoms: \"unresponsive after fall\"")
        );
    }

    #[tokio::test]
    async fn accepts_decorated_last_line() {
        let classifier = AiClassifier::new(CannedProvider::new(Ok("Answer:\n**Urgent**")));
        assert_eq!(classifier.classify("chest pain").await, Ok(TriageLevel::Urgent));
    }

    #[tokio::test]
    async fn unrecognised_answer_is_an_error() {
        let classifier = AiClassifier::new(CannedProvider::new(Ok("I cannot help with that")));
        assert!(matches!(
            classifier.classify("chest pain").await,
            Err(ProviderError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn blank_answer_is_an_error() {
        let classifier = AiClassifier::new(CannedProvider::new(Ok("  \n")));
        assert!(matches!(
            classifier.classify("chest pain").await,
            Err(ProviderError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn provider_failure_is_passed_through() {
        let classifier = AiClassifier::new(CannedProvider::new(Err(ProviderError::Timeout)));
        assert_eq!(
            classifier.classify("chest pain").await,
            Err(ProviderError::Timeout)
        );
    }
}
