//! Clock sequence shared by the time-based UUID versions.

use std::{sync, time};

use rand::{rngs::OsRng, RngCore};

/// The number of 100-nanosecond intervals between the UUID epoch (1582-10-15 00:00:00 UTC) and
/// the Unix epoch (1970-01-01 00:00:00 UTC).
pub const UUID_EPOCH_OFFSET: u64 = 122_192_928_000_000_000;

/// A trait that defines the clock interface for [`ClockSequence`].
pub trait TimeSource {
    /// Returns the current time as 100-nanosecond intervals since the UUID epoch.
    fn uuid_ticks(&mut self) -> u64;
}

/// The default [`TimeSource`] that reads [`std::time::SystemTime`].
///
/// A system clock set before the Unix epoch reads as [`UUID_EPOCH_OFFSET`].
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn uuid_ticks(&mut self) -> u64 {
        let elapsed = time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .unwrap_or_default();
        UUID_EPOCH_OFFSET
            + elapsed.as_secs() * 10_000_000
            + u64::from(elapsed.subsec_nanos() / 100)
    }
}

impl<F: FnMut() -> u64> TimeSource for F {
    fn uuid_ticks(&mut self) -> u64 {
        self()
    }
}

/// Represents a clock sequence that yields a non-decreasing pair of timestamp and sequence
/// counter for each read.
///
/// The counter is seeded with a random 16-bit value and is incremented (wrapping at 16 bits)
/// whenever the clock fails to advance past the previously read timestamp, either because the
/// clock was set backwards or because two reads landed within the same clock tick.
///
/// UUIDv1 embeds only the low 14 bits of the counter, so the embedded clock sequence of a
/// UUIDv1 may decrease on a single bump (e.g., from `0x3fff` to `0x0000` when the counter moves
/// from `0x3fff` to `0x4000`), not only when the 16-bit counter wraps.
///
/// On Unix, an instance created by [`ClockSequence::new()`] draws a fresh random counter when it
/// is first read in a forked child process.
///
/// # Examples
///
/// ```rust
/// use rfc4122::ClockSequence;
///
/// let clock = ClockSequence::new();
/// let (ts1, seq1) = clock.read();
/// let (ts2, seq2) = clock.read();
/// assert!((ts1, seq1) < (ts2, seq2));
/// ```
#[derive(Debug)]
pub struct ClockSequence<T = SystemClock> {
    state: sync::Mutex<State<T>>,
}

#[derive(Debug)]
struct State<T> {
    /// Process that seeded `seq`, or `None` for a caller-supplied seed.
    #[cfg(unix)]
    pid: Option<u32>,
    last: u64,
    seq: u16,
    time: T,
}

impl ClockSequence<SystemClock> {
    /// Creates an instance that reads the system clock, seeding the counter from the operating
    /// system's entropy source.
    pub fn new() -> Self {
        let clock = Self::with_time_source(SystemClock, OsRng.next_u32() as u16);
        #[cfg(unix)]
        {
            clock.lock().pid = Some(std::process::id());
        }
        clock
    }

    /// Returns the process-wide instance, creating one if none exists.
    #[cfg(feature = "global_gen")]
    #[cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]
    pub fn global() -> &'static Self {
        static G: sync::OnceLock<ClockSequence> = sync::OnceLock::new();
        G.get_or_init(Self::new)
    }
}

impl Default for ClockSequence<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeSource> ClockSequence<T> {
    /// Creates an instance with a custom time source and initial counter value.
    pub const fn with_time_source(time: T, seed: u16) -> Self {
        Self {
            state: sync::Mutex::new(State {
                #[cfg(unix)]
                pid: None,
                last: 0,
                seq: seed,
                time,
            }),
        }
    }

    /// Returns the current timestamp and sequence counter.
    pub fn read(&self) -> (u64, u16) {
        let mut state = self.lock();

        #[cfg(unix)]
        if state.pid.is_some_and(|pid| pid != std::process::id()) {
            state.pid = Some(std::process::id());
            state.seq = OsRng.next_u32() as u16;
            tracing::debug!(seq = state.seq, "reseeded clock sequence in forked process");
        }

        let now = state.time.uuid_ticks();
        if now <= state.last {
            state.seq = state.seq.wrapping_add(1);
            tracing::trace!(now, last = state.last, seq = state.seq, "bumped clock sequence");
        }
        state.last = now;
        (now, state.seq)
    }

    fn lock(&self) -> sync::MutexGuard<'_, State<T>> {
        // the state is always consistent, so a panic elsewhere does not invalidate it
        self.state
            .lock()
            .unwrap_or_else(sync::PoisonError::into_inner)
    }
}
