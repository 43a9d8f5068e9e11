//! Node ID providers for UUIDv1 and UUIDv2.

#[cfg(feature = "global_gen")]
use std::sync;

#[cfg(feature = "global_gen")]
use crate::random::SharedRng;

/// A 48-bit node identifier, usually the IEEE 802 MAC address of a network adapter.
pub type NodeId = [u8; 6];

/// A trait that defines the node ID provider interface for UUIDv1 and UUIDv2 generation.
///
/// Closures taking `&mut NodeId` implement this trait.
pub trait NodeSource {
    /// Writes exactly six bytes of node ID into `node`.
    fn fetch(&self, node: &mut NodeId);
}

impl<F: Fn(&mut NodeId)> NodeSource for F {
    fn fetch(&self, node: &mut NodeId) {
        self(node)
    }
}

/// A [`NodeSource`] that always yields the wrapped node ID.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct FixedNode(/** The node ID to yield. */ pub NodeId);

impl NodeSource for FixedNode {
    fn fetch(&self, node: &mut NodeId) {
        *node = self.0;
    }
}

/// The default [`NodeSource`] that yields the process-wide node ID obtained by
/// [`resolve_node_id()`].
#[cfg(feature = "global_gen")]
#[cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct SystemNode;

#[cfg(feature = "global_gen")]
impl NodeSource for SystemNode {
    fn fetch(&self, node: &mut NodeId) {
        *node = resolve_node_id();
    }
}

/// Returns the process-wide node ID, resolving it on first use.
///
/// The MAC address of the first non-loopback network adapter is used if available. Otherwise,
/// six random bytes are used with the multicast bit (the least significant bit of the first
/// octet) set so that the value never collides with a real MAC address.
///
/// Only one thread performs the resolution; every later call returns the cached value.
#[cfg(feature = "global_gen")]
#[cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]
pub fn resolve_node_id() -> NodeId {
    static NODE: sync::OnceLock<NodeId> = sync::OnceLock::new();
    *NODE.get_or_init(|| load_node_id(SharedRng::global()))
}

#[cfg(feature = "global_gen")]
fn load_node_id(rng: &SharedRng) -> NodeId {
    match mac_address::get_mac_address() {
        Ok(Some(addr)) if addr.bytes() != [0; 6] => return addr.bytes(),
        Ok(_) => tracing::debug!("no usable network adapter; falling back to random node id"),
        Err(err) => {
            tracing::debug!(%err, "could not list network adapters; falling back to random node id")
        }
    }
    random_node_id(rng)
}

#[cfg(feature = "global_gen")]
fn random_node_id(rng: &SharedRng) -> NodeId {
    let mut node = [0u8; 6];
    rng.fill_bytes(&mut node);
    node[0] |= 0x01;
    node
}
