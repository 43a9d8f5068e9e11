//! Construction algorithms for UUID versions 1 through 5.
//!
//! Each constructor takes its collaborators (clock sequence, node ID provider, random number
//! generator) as arguments so that callers decide which instances share state. The entry point
//! functions at the crate root pass the process-wide defaults.

use md5::Md5;
use sha1::{Digest, Sha1};

use crate::clock::{ClockSequence, TimeSource};
use crate::endian;
use crate::host::HostId;
use crate::node::{NodeId, NodeSource};
use crate::random::RandSource;
use crate::Uuid;

/// Packs a 60-bit timestamp into `time_mid` and `time_hi` with `time_low` given separately.
const fn pack_time(time_low: u32, ts: u64) -> u64 {
    (time_low as u64) << 32 | ((ts >> 32) & 0xffff) << 16 | (ts >> 48)
}

/// Returns the node ID as the 48 least significant bits of a word.
fn fetch_node(source: &impl NodeSource) -> u64 {
    let mut node: NodeId = [0; 6];
    source.fetch(&mut node);
    node.iter().fold(0, |acc, &e| acc << 8 | e as u64)
}

/// Hashes the name space ID (in network byte order) followed by the name, and takes the first 16
/// bytes of the digest.
fn hash_name<D: Digest>(namespace: &Uuid, name: &[u8]) -> Uuid {
    let (hi, lo) = namespace.as_words();
    let digest = D::new()
        .chain_update(endian::words_to_network_bytes(hi, lo))
        .chain_update(name)
        .finalize();
    let (hi, lo) = endian::network_bytes_to_words(&digest);
    Uuid::from_words(hi, lo)
}

impl Uuid {
    /// Generates a UUIDv1 object from a clock sequence and a node ID provider.
    ///
    /// Only the low 14 bits of the 16-bit clock sequence counter are embedded because the top two
    /// bits carry the variant. Values generated within the same clock tick may thus sort below
    /// their predecessors when a bump carries into bit 14, even though the counter itself only
    /// wraps after 65,536 bumps.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc4122::{node::FixedNode, ClockSequence, Uuid};
    ///
    /// let clock = ClockSequence::new();
    /// let uuid = Uuid::new_v1(&clock, &FixedNode([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]));
    /// assert!(uuid.to_string().ends_with("-001122334455"));
    /// ```
    pub fn new_v1<T: TimeSource>(clock: &ClockSequence<T>, node: &impl NodeSource) -> Self {
        let (ts, seq) = clock.read();
        let hi = pack_time(ts as u32, ts);
        let lo = (seq as u64) << 48 | fetch_node(node);
        Self::from_words(hi, lo).stamped(1)
    }

    /// Generates a UUIDv2 object from a clock sequence, a host identifier, and a node ID provider.
    ///
    /// The local identifier replaces `time_low` and the local domain replaces `clock_seq_low`,
    /// leaving only the upper timestamp bits and the upper counter byte to distinguish values
    /// generated for the same host. This layout does not fully conform to DCE 1.1 and the values
    /// are far less unique than other versions; it exists for completeness and should not be
    /// relied upon in production.
    pub fn new_v2<T: TimeSource>(
        clock: &ClockSequence<T>,
        host: HostId,
        node: &impl NodeSource,
    ) -> Self {
        let (ts, seq) = clock.read();
        let hi = pack_time(host.id(), ts);
        let lo = ((seq & 0xff00) as u64) << 48
            | (u8::from(host.domain()) as u64) << 48
            | fetch_node(node);
        Self::from_words(hi, lo).stamped(2)
    }

    /// Generates a name-based UUIDv3 object using MD5.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc4122::Uuid;
    ///
    /// let uuid = Uuid::new_v3(&Uuid::NAMESPACE_DNS, "www.widgets.com");
    /// assert_eq!(uuid.to_string(), "3d813cbb-47fb-32ba-91df-831e1593ac29");
    /// ```
    pub fn new_v3(namespace: &Uuid, name: impl AsRef<[u8]>) -> Self {
        hash_name::<Md5>(namespace, name.as_ref()).stamped(3)
    }

    /// Generates a UUIDv4 object from two 64-bit random numbers.
    pub fn new_v4(rng: &mut impl RandSource) -> Self {
        let hi = rng.next_u64();
        let lo = rng.next_u64();
        Self::from_words(hi, lo).stamped(4)
    }

    /// Generates a name-based UUIDv5 object using SHA-1.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc4122::Uuid;
    ///
    /// let uuid = Uuid::new_v5(&Uuid::NAMESPACE_DNS, "www.widgets.com");
    /// assert_eq!(uuid.to_string(), "21f7f8de-8051-5b89-8680-0195ef798b6a");
    /// ```
    pub fn new_v5(namespace: &Uuid, name: impl AsRef<[u8]>) -> Self {
        hash_name::<Sha1>(namespace, name.as_ref()).stamped(5)
    }
}
