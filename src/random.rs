//! Random number sources for UUIDv4 and random node IDs.

use std::{fmt, sync};

use rand::{rngs::OsRng, RngCore, SeedableRng};
use rand_chacha::ChaCha12Rng;

/// A trait that defines the minimum random number generator interface for UUIDv4 generation.
///
/// Closures returning `u64` implement this trait, and any [`RngCore`] type can be used through
/// [`Adapter`].
pub trait RandSource {
    /// Returns the next random `u64`.
    fn next_u64(&mut self) -> u64;
}

impl<F: FnMut() -> u64> RandSource for F {
    fn next_u64(&mut self) -> u64 {
        self()
    }
}

/// An adapter that implements [`RandSource`] for [`RngCore`] types.
///
/// # Examples
///
/// ```rust
/// use rfc4122::{random::Adapter, Uuid};
///
/// let uuid = Uuid::new_v4(&mut Adapter(rand::thread_rng()));
/// assert_eq!(uuid.version(), 4);
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Adapter<T>(/** The wrapped [`RngCore`] type. */ pub T);

impl<T: RngCore> RandSource for Adapter<T> {
    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }
}

/// A thread-safe random number generator that can be shared by reference.
///
/// The inner [`ChaCha12Rng`] is seeded once from the operating system's entropy source so that
/// each draw costs only a lock and a block-cipher step. On Unix, an instance seeded from the
/// entropy source reseeds itself when it is first used in a forked child process.
pub struct SharedRng(sync::Mutex<Inner>);

pub(crate) struct Inner {
    /// Process that seeded `rng`, or `None` for a fixed seed.
    #[cfg(unix)]
    pid: Option<u32>,
    rng: ChaCha12Rng,
}

impl Inner {
    fn get_mut(&mut self) -> &mut ChaCha12Rng {
        #[cfg(unix)]
        if self.pid.is_some_and(|pid| pid != std::process::id()) {
            tracing::debug!("reseeding random number generator in forked process");
            *self = Self::from_entropy();
        }
        &mut self.rng
    }

    fn from_entropy() -> Self {
        Self {
            #[cfg(unix)]
            pid: Some(std::process::id()),
            rng: ChaCha12Rng::from_rng(OsRng)
                .expect("rfc4122: could not seed random number generator"),
        }
    }
}

impl SharedRng {
    /// Creates an instance seeded from the operating system's entropy source.
    ///
    /// # Panics
    ///
    /// Panics if the entropy source is unavailable.
    pub fn new() -> Self {
        Self(sync::Mutex::new(Inner::from_entropy()))
    }

    /// Creates an instance with a fixed seed.
    ///
    /// The sequence is reproducible and is not reseeded in forked processes.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self(sync::Mutex::new(Inner {
            #[cfg(unix)]
            pid: None,
            rng: ChaCha12Rng::from_seed(seed),
        }))
    }

    /// Returns the process-wide instance, creating one if none exists.
    #[cfg(feature = "global_gen")]
    #[cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]
    pub fn global() -> &'static Self {
        static G: sync::OnceLock<SharedRng> = sync::OnceLock::new();
        G.get_or_init(Self::new)
    }

    /// Returns the next random `u64`.
    pub fn next_u64(&self) -> u64 {
        self.lock().get_mut().next_u64()
    }

    /// Fills `dest` with random data.
    pub fn fill_bytes(&self, dest: &mut [u8]) {
        self.lock().get_mut().fill_bytes(dest)
    }

    pub(crate) fn lock(&self) -> sync::MutexGuard<'_, Inner> {
        // a generator state cannot be left half-updated by a panicking holder
        self.0.lock().unwrap_or_else(sync::PoisonError::into_inner)
    }
}

impl Default for SharedRng {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SharedRng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedRng").finish_non_exhaustive()
    }
}

impl RandSource for &SharedRng {
    fn next_u64(&mut self) -> u64 {
        SharedRng::next_u64(*self)
    }
}
