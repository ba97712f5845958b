//=========================================================================
// State Sources
//=========================================================================
//
// The three ways a state can be handed to `add_state`: a ready instance,
// a one-shot constructor, or the name of a factory registered with the
// game up front.
//
//=========================================================================

use std::collections::HashMap;
use std::fmt;

use super::State;

//=== StateSource =========================================================

type BoxedState = Box<dyn State>;

/// Something `StateManager::add_state` can turn into a state instance.
pub enum StateSource {
    Instance(BoxedState),
    Factory(Box<dyn FnOnce() -> BoxedState>),
    /// Looked up in the manager's [`StateFactories`].
    Named(String),
}

impl StateSource {
    pub fn instance<S: State + 'static>(state: S) -> Self {
        Self::Instance(Box::new(state))
    }

    pub fn factory<S, F>(build: F) -> Self
    where
        S: State + 'static,
        F: FnOnce() -> S + 'static,
    {
        Self::Factory(Box::new(move || Box::new(build()) as BoxedState))
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }
}

impl From<BoxedState> for StateSource {
    fn from(state: BoxedState) -> Self {
        Self::Instance(state)
    }
}

impl fmt::Debug for StateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instance(state) => f.debug_tuple("Instance").field(&state.name()).finish(),
            Self::Factory(_) => f.write_str("Factory"),
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
        }
    }
}

//=== StateFactories ======================================================

/// Name → constructor table consulted for [`StateSource::Named`].
#[derive(Default)]
pub struct StateFactories {
    factories: HashMap<String, Box<dyn Fn() -> BoxedState>>,
}

impl StateFactories {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a constructor, replacing any previous one with that name.
    pub fn register<S, F>(&mut self, name: impl Into<String>, build: F)
    where
        S: State + 'static,
        F: Fn() -> S + 'static,
    {
        self.factories
            .insert(name.into(), Box::new(move || Box::new(build()) as BoxedState));
    }

    /// Builds a fresh instance from the named factory.
    pub fn build(&self, name: &str) -> Option<BoxedState> {
        self.factories.get(name).map(|build| build())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for StateFactories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.factories.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str);

    impl State for Named {
        fn name(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn factories_build_fresh_instances() {
        let mut factories = StateFactories::new();
        factories.register("Menu", || Named("Menu"));

        assert!(factories.contains("Menu"));
        assert_eq!(factories.build("Menu").map(|s| s.name().to_owned()), Some("Menu".into()));
        assert!(factories.build("Level").is_none());
    }

    #[test]
    fn source_debug_shows_names() {
        let source = StateSource::instance(Named("Level"));
        assert_eq!(format!("{:?}", source), "Instance(\"Level\")");
        assert_eq!(format!("{:?}", StateSource::named("Menu")), "Named(\"Menu\")");
    }
}
