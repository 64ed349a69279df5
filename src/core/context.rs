use uuid::Uuid;

/// Per-operation context handed in by the boundary layer.
///
/// Carries the correlation identifier that ties log lines and error envelopes
/// to one inbound request. Boundaries that track their own request ids pass
/// them through [`OpContext::with_correlation`]; everything else gets a fresh
/// one.
#[derive(Debug, Clone)]
pub struct OpContext {
    correlation_id: String,
}

impl OpContext {
    pub fn new() -> Self {
        Self {
            correlation_id: Uuid::new_v4().simple().to_string(),
        }
    }

    pub fn with_correlation(id: impl Into<String>) -> Self {
        Self {
            correlation_id: id.into(),
        }
    }

    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }
}

impl Default for OpContext {
    fn default() -> Self {
        Self::new()
    }
}
