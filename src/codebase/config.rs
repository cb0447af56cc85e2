//! Run-scoped resolver options

/// Options for one analysis run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnalysisConfig {
    /// Accumulate every referencing location on the declaring property
    /// (needed for "find usages"). Method-to-property edges are recorded
    /// regardless of this flag.
    pub collect_references: bool,
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collect_references(mut self, collect_references: bool) -> Self {
        self.collect_references = collect_references;
        self
    }
}
