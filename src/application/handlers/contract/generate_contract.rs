//! ContractGenerator - drafts a contract and always returns a usable record.
//!
//! The model reply is resolved through a fixed fallback chain. Every stage
//! is optional except the last, which accepts any text:
//!
//! 1. JSON candidate extracted from the reply
//! 2. The whole reply parsed as JSON
//! 3. The repaired reply, then candidate extraction
//! 4. The repaired reply read as markdown prose

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::contract::{
    compose_prompt, detect_language, extract_json_candidate, normalize, offline_template,
    parse_json_tolerant, parse_plain_text, repair_text, upstream_failure, ContractRequest,
    GeneratedContract, GenerationOutcome, Locale, ParsedResponse, RecognizedFields,
    ResolutionStage,
};
use crate::ports::{AIProvider, CompletionRequest, FinishReason, RequestMetadata};

/// Drafts contracts with an optional AI provider.
///
/// Without a provider every request is answered from the offline template.
#[derive(Clone)]
pub struct ContractGenerator {
    provider: Option<Arc<dyn AIProvider>>,
}

impl ContractGenerator {
    pub fn new(provider: Option<Arc<dyn AIProvider>>) -> Self {
        Self { provider }
    }

    pub fn with_provider(provider: Arc<dyn AIProvider>) -> Self {
        Self::new(Some(provider))
    }

    pub fn offline() -> Self {
        Self::new(None)
    }

    pub fn is_offline(&self) -> bool {
        self.provider.is_none()
    }

    pub async fn generate(&self, request: &ContractRequest) -> GeneratedContract {
        self.generate_with_diagnostics(request).await.contract
    }

    /// Like [`generate`](Self::generate), also reporting which stage produced
    /// the record.
    pub async fn generate_with_diagnostics(&self, request: &ContractRequest) -> GenerationOutcome {
        let locale = detect_language(&request.description);

        let Some(provider) = &self.provider else {
            tracing::debug!(locale = locale.tag(), "no AI provider configured, using offline template");
            return GenerationOutcome::new(
                offline_template(request, locale),
                ResolutionStage::OfflineTemplate,
            );
        };

        let trace_id = Uuid::new_v4().to_string();
        let completion = CompletionRequest::new(
            compose_prompt(request, locale),
            RequestMetadata::new(trace_id.clone()),
        );

        match provider.complete(completion).await {
            Ok(response) => {
                if response.finish_reason == FinishReason::Length {
                    tracing::warn!(
                        trace_id = %trace_id,
                        completion_tokens = response.usage.completion_tokens,
                        "contract reply hit the output token limit"
                    );
                }

                let outcome = resolve_response(&response.content, locale);
                tracing::debug!(
                    trace_id = %trace_id,
                    model = %response.model,
                    stage = ?outcome.stage,
                    finish_reason = ?response.finish_reason,
                    prompt_tokens = response.usage.prompt_tokens,
                    completion_tokens = response.usage.completion_tokens,
                    "contract reply resolved"
                );
                outcome
            }
            Err(err) => {
                tracing::warn!(trace_id = %trace_id, error = %err, "contract generation failed upstream");
                GenerationOutcome::new(
                    upstream_failure(&err.to_string(), locale),
                    ResolutionStage::UpstreamFailure,
                )
            }
        }
    }
}

/// Turns a raw model reply into a record. Never fails.
pub fn resolve_response(raw: &str, locale: Locale) -> GenerationOutcome {
    if let Some(fields) = extract_json_candidate(raw).and_then(|c| recognize(&c)) {
        return recognized(fields, locale, ResolutionStage::ExtractedJson);
    }

    if let Some(fields) = recognize(raw) {
        return recognized(fields, locale, ResolutionStage::WholeResponseJson);
    }

    let repaired = repair_text(raw);
    if let Some(fields) = extract_json_candidate(&repaired).and_then(|c| recognize(&c)) {
        return recognized(fields, locale, ResolutionStage::RepairedExtractedJson);
    }

    GenerationOutcome::new(parse_plain_text(&repaired, locale), ResolutionStage::PlainText)
}

fn recognize(text: &str) -> Option<RecognizedFields> {
    parse_json_tolerant(text).and_then(RecognizedFields::recognize)
}

fn recognized(fields: RecognizedFields, locale: Locale, stage: ResolutionStage) -> GenerationOutcome {
    GenerationOutcome::new(normalize(ParsedResponse::Recognized(fields), locale), stage)
}
