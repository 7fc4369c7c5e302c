//! Validator configuration.

/// Switches that tighten validation beyond the plain descriptor.
///
/// The defaults check shape only, exactly as the descriptor declares it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Report top-level keys that the descriptor does not recognize.
    pub strict_top_level: bool,
    /// Require `version` to parse as a semantic version.
    pub check_semver: bool,
}

impl ValidationOptions {
    /// Options with every extra check switched off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether unrecognized top-level keys are reported.
    pub fn with_strict_top_level(mut self, strict: bool) -> Self {
        self.strict_top_level = strict;
        self
    }

    /// Sets whether `version` must parse as a semantic version.
    pub fn with_semver_check(mut self, check: bool) -> Self {
        self.check_semver = check;
        self
    }
}
