use std::fmt;

/// Sequential states of a finalize run.
///
/// Each stage is a precondition for the next; a failure in any of them ends
/// the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Clean,
    Configure,
    Build,
    Relocate,
    Verify,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Clean,
        Stage::Configure,
        Stage::Build,
        Stage::Relocate,
        Stage::Verify,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Clean => "clean",
            Stage::Configure => "configure",
            Stage::Build => "build",
            Stage::Relocate => "relocate",
            Stage::Verify => "verify",
        }
    }

    /// 1-based position, used for "[2/5]" style progress
    pub fn position(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0) + 1
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
