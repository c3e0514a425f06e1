use std::fmt;

/// The kind of write an entry is going through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Toggle,
    Edit,
    Patch,
    Create,
    Delete,
}

impl Operation {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Toggle => "toggle",
            Self::Edit => "edit",
            Self::Patch => "patch",
            Self::Create => "create",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where a collection entry stands relative to the server.
///
/// Entries loaded from the server start `Idle`. A write moves the entry to
/// `Optimistic` until the call settles, then to `Confirmed` on success or
/// `RolledBack` when the prior snapshot was restored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntityPhase {
    #[default]
    Idle,
    Optimistic(Operation),
    Confirmed(Operation),
    RolledBack(Operation),
}

impl EntityPhase {
    /// Whether a write on this entry has not settled yet.
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Optimistic(_))
    }

    pub const fn operation(self) -> Option<Operation> {
        match self {
            Self::Idle => None,
            Self::Optimistic(operation)
            | Self::Confirmed(operation)
            | Self::RolledBack(operation) => Some(operation),
        }
    }
}

impl fmt::Display for EntityPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Optimistic(operation) => write!(f, "pending {operation}"),
            Self::Confirmed(operation) => write!(f, "{operation} confirmed"),
            Self::RolledBack(operation) => write!(f, "{operation} rolled back"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_optimistic_is_pending() {
        assert!(EntityPhase::Optimistic(Operation::Edit).is_pending());
        assert!(!EntityPhase::Idle.is_pending());
        assert!(!EntityPhase::Confirmed(Operation::Edit).is_pending());
        assert!(!EntityPhase::RolledBack(Operation::Edit).is_pending());
    }

    #[test]
    fn phase_display() {
        assert_eq!(
            EntityPhase::Optimistic(Operation::Create).to_string(),
            "pending create"
        );
        assert_eq!(
            EntityPhase::RolledBack(Operation::Toggle).to_string(),
            "toggle rolled back"
        );
        assert_eq!(EntityPhase::Idle.operation(), None);
    }
}
