//! Ordered protocol registry: first match wins.

use aeon_core::{Context, ResponsePayload, RESPONSE_TABLE};
use rand::Rng;
use tracing::{debug, warn};

use crate::protocol::Protocol;

/// Protocols in declaration order.
///
/// Triggers are expected to be disjoint, but nothing relies on it: lookups always take
/// the first match and ignore the rest. Names are unique; registering a duplicate name
/// is refused.
#[derive(Debug, Clone, Default)]
pub struct ProtocolRegistry {
    protocols: Vec<Protocol>,
}

impl ProtocolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// One protocol per row of the shared response table, in table order.
    pub fn with_default_protocols() -> Self {
        RESPONSE_TABLE
            .iter()
            .map(Protocol::from_entry)
            .collect()
    }

    /// Append a protocol. Returns false (and leaves the registry unchanged) when a
    /// protocol with the same name is already registered.
    pub fn register(&mut self, protocol: Protocol) -> bool {
        if self.get(protocol.name()).is_some() {
            warn!(protocol = %protocol.name(), "duplicate protocol name; ignoring");
            return false;
        }
        self.protocols.push(protocol);
        true
    }

    /// First protocol whose trigger matches, with its current response. Only the
    /// matched protocol renders, so only it draws from `rng`.
    pub fn resolve<R: Rng + ?Sized>(
        &self,
        context: &Context,
        rng: &mut R,
    ) -> Option<(&Protocol, ResponsePayload)> {
        let hit = self
            .protocols
            .iter()
            .find_map(|p| p.activate(context, &mut *rng).map(|response| (p, response)));
        match &hit {
            Some((p, _)) => debug!(protocol = %p.name(), %context, "protocol matched"),
            None => debug!(%context, "no protocol matched"),
        }
        hit
    }

    /// First matching protocol, mutably.
    pub fn resolve_mut(&mut self, context: &Context) -> Option<&mut Protocol> {
        self.protocols.iter_mut().find(|p| p.matches(context))
    }

    pub fn get(&self, name: &str) -> Option<&Protocol> {
        self.protocols.iter().find(|p| p.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Protocol> {
        self.protocols.iter()
    }

    pub fn len(&self) -> usize {
        self.protocols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.protocols.is_empty()
    }
}

impl FromIterator<Protocol> for ProtocolRegistry {
    fn from_iter<I: IntoIterator<Item = Protocol>>(iter: I) -> Self {
        let mut registry = Self::new();
        for protocol in iter {
            registry.register(protocol);
        }
        registry
    }
}
