//! Clean options

/// Options for the clean command
#[derive(Debug, Clone, Default)]
pub struct CleanOptions {
    /// Report what would be deleted without deleting
    pub dry_run: bool,
}

impl CleanOptions {
    /// Create new clean options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set dry run
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}
