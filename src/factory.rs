//! Name-based backend registry. The highest-priority backend is the default.

use log::{info, warn};
use std::sync::OnceLock;

use crate::backends::trivial;
use crate::error::BackendError;
use crate::network::Network;
use crate::options::{OptionsDict, WeightsFile};

pub type NetworkFactoryFn = fn(Option<&WeightsFile>, &OptionsDict) -> Result<Box<dyn Network>, BackendError>;

#[derive(Clone, Copy)]
pub struct Registration {
    pub name: &'static str,
    pub priority: i32,
    pub create: NetworkFactoryFn,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration").field("name", &self.name).field("priority", &self.priority).finish()
    }
}

#[derive(Debug, Default)]
pub struct NetworkFactory {
    // Kept sorted by descending priority; ties keep registration order.
    registrations: Vec<Registration>,
}

static GLOBAL: OnceLock<NetworkFactory> = OnceLock::new();

impl NetworkFactory {
    pub fn new() -> Self { Self::default() }

    /// Factory pre-loaded with every backend compiled into this crate.
    pub fn with_builtin() -> Self {
        let mut f = Self::new();
        f.register(trivial::NAME, trivial::PRIORITY, trivial::make_trivial_network);
        f
    }

    pub fn global() -> &'static NetworkFactory { GLOBAL.get_or_init(Self::with_builtin) }

    /// Registers `name`, replacing any backend already registered under it.
    pub fn register(&mut self, name: &'static str, priority: i32, create: NetworkFactoryFn) {
        if let Some(pos) = self.registrations.iter().position(|r| r.name == name) {
            warn!("Backend '{}' registered twice; replacing", name);
            self.registrations.remove(pos);
        }
        let at = self.registrations.iter().position(|r| r.priority < priority).unwrap_or(self.registrations.len());
        self.registrations.insert(at, Registration { name, priority, create });
    }

    pub fn backends_list(&self) -> Vec<&'static str> { self.registrations.iter().map(|r| r.name).collect() }

    pub fn registrations(&self) -> &[Registration] { &self.registrations }

    pub fn default_backend(&self) -> Option<&'static str> { self.registrations.first().map(|r| r.name) }

    pub fn create(
        &self,
        name: &str,
        weights: Option<&WeightsFile>,
        options: &OptionsDict,
    ) -> Result<Box<dyn Network>, BackendError> {
        let reg = self
            .registrations
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| BackendError::UnknownBackend(name.to_string()))?;
        info!("Creating backend [{}]...", reg.name);
        (reg.create)(weights, options)
    }

    pub fn create_default(
        &self,
        weights: Option<&WeightsFile>,
        options: &OptionsDict,
    ) -> Result<Box<dyn Network>, BackendError> {
        let name = self.default_backend().ok_or(BackendError::NoBackends)?;
        self.create(name, weights, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::TrivialNetwork;

    fn make_other(_w: Option<&WeightsFile>, _o: &OptionsDict) -> Result<Box<dyn Network>, BackendError> {
        Ok(Box::new(TrivialNetwork::default()))
    }

    #[test]
    fn priority_ordering_and_replacement() {
        let mut f = NetworkFactory::with_builtin();
        f.register("low", 1, make_other);
        f.register("high", 10, make_other);
        assert_eq!(f.backends_list(), vec!["high", "trivial", "low"]);
        f.register("high", 0, make_other);
        assert_eq!(f.backends_list(), vec!["trivial", "low", "high"]);
        assert_eq!(f.default_backend(), Some("trivial"));
    }

    #[test]
    fn empty_factory_has_no_default() {
        let f = NetworkFactory::new();
        assert!(matches!(f.create_default(None, &OptionsDict::new()), Err(BackendError::NoBackends)));
    }
}
