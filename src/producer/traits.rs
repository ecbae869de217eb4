use async_trait::async_trait;

/// External collaborator that drafts raw plan documents.
///
/// The engine hands a producer the objective and the tool catalog and gets
/// back raw text; everything about how the text is generated (model choice,
/// prompting, retries) is the producer's business. The engine only consumes
/// plans, it never generates them.
#[async_trait]
pub trait PlanProducer: Send + Sync {
    /// Producer identifier (e.g. "openai").
    fn name(&self) -> &str;

    /// Draft a raw plan for the objective, given the tool catalog.
    async fn produce(&self, objective: &str, catalog: &str) -> anyhow::Result<String>;
}
