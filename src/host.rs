//! DCE host identifiers for UUIDv2.

/// The local identifier returned on platforms that lack the requested concept.
pub const UNSUPPORTED_LOCAL_ID: u32 = u32::MAX;

/// The DCE local domain that a local identifier belongs to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LocalDomain {
    /// POSIX user ID domain.
    Person,
    /// POSIX group ID domain.
    Group,
    /// Organization-defined domain.
    Org,
}

impl From<LocalDomain> for u8 {
    fn from(src: LocalDomain) -> Self {
        match src {
            LocalDomain::Person => 0,
            LocalDomain::Group => 1,
            LocalDomain::Org => 2,
        }
    }
}

/// A pair of local domain and 32-bit local identifier embedded in a UUIDv2.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct HostId {
    domain: LocalDomain,
    id: u32,
}

impl HostId {
    /// Creates a host identifier from a domain and a local identifier.
    pub const fn new(domain: LocalDomain, id: u32) -> Self {
        Self { domain, id }
    }

    /// Creates a host identifier from the real user ID of the current process.
    pub fn person() -> Self {
        Self::new(LocalDomain::Person, resolve_host_id(LocalDomain::Person))
    }

    /// Creates a host identifier from the real group ID of the current process.
    pub fn group() -> Self {
        Self::new(LocalDomain::Group, resolve_host_id(LocalDomain::Group))
    }

    /// Returns the local domain.
    pub const fn domain(&self) -> LocalDomain {
        self.domain
    }

    /// Returns the 32-bit local identifier.
    pub const fn id(&self) -> u32 {
        self.id
    }
}

/// Returns the local identifier of the current process in `domain`.
///
/// This is the real user or group ID on Unix. [`UNSUPPORTED_LOCAL_ID`] is returned for
/// [`LocalDomain::Org`] and on non-Unix platforms.
pub fn resolve_host_id(domain: LocalDomain) -> u32 {
    match domain {
        #[cfg(unix)]
        LocalDomain::Person => unsafe { libc::getuid() },
        #[cfg(unix)]
        LocalDomain::Group => unsafe { libc::getgid() },
        _ => UNSUPPORTED_LOCAL_ID,
    }
}
