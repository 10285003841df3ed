#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStage {
    Received,
    Translating,
    ParametersMerged,
    BackendCalled,
    Persisting,
    Completed,
    Failed,
}

impl GenerationStage {
    pub fn value(&self) -> &'static str {
        match *self {
            Self::Received => "received",
            Self::Translating => "translating",
            Self::ParametersMerged => "parameters_merged",
            Self::BackendCalled => "backend_called",
            Self::Persisting => "persisting",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_completed_and_failed_are_terminal() {
        assert!(GenerationStage::Completed.is_terminal());
        assert!(GenerationStage::Failed.is_terminal());
        assert!(!GenerationStage::Persisting.is_terminal());
        assert_eq!(GenerationStage::Failed.value(), "failed");
    }
}
