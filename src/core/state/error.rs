//=========================================================================
// State Errors
//=========================================================================

/// Why a registry operation was refused.
///
/// Never fatal: the `bool`-returning wrappers on `StateManager` log these
/// and carry on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// The resolved state reported an empty name.
    EmptyName,

    /// A state with this name is already registered.
    DuplicateName(String),

    /// No factory is registered under this name.
    UnknownFactory(String),

    /// No state is registered under this key.
    UnknownState(String),

    /// The current state is still loading and cannot be swapped out.
    LoadInProgress(String),

    /// The requested state is already current.
    AlreadyCurrent(String),
}

impl std::fmt::Display for StateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "State has no name"),
            Self::DuplicateName(name) => write!(f, "State {:?} is already registered", name),
            Self::UnknownFactory(name) => write!(f, "No state factory named {:?}", name),
            Self::UnknownState(name) => write!(f, "No state registered as {:?}", name),
            Self::LoadInProgress(name) => {
                write!(f, "Current state {:?} is still loading", name)
            }
            Self::AlreadyCurrent(name) => write!(f, "State {:?} is already current", name),
        }
    }
}

impl std::error::Error for StateError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_state() {
        let err = StateError::LoadInProgress("Level".into());
        assert_eq!(err.to_string(), "Current state \"Level\" is still loading");
    }

    #[test]
    fn state_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<StateError>();
    }
}
