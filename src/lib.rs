//! An implementation of RFC 4122 UUID versions 1 through 5
//!
//! ```rust
//! use rfc4122::{make_v1, make_v4, make_v5, Uuid};
//!
//! let uuid = make_v4();
//! println!("{}", uuid); // e.g., "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
//! println!("{:?}", uuid.raw_data()); // as 16-byte big-endian array
//!
//! let uuid = make_v1();
//! println!("{}", uuid); // e.g., "1a6bcc52-8f2a-11ee-bd6e-0242ac120002"
//!
//! let uuid = make_v5(&Uuid::NAMESPACE_DNS, "www.widgets.com");
//! assert_eq!(uuid.to_string(), "21f7f8de-8051-5b89-8680-0195ef798b6a");
//!
//! let parsed = rfc4122::make_from("{21F7F8DE-8051-5B89-8680-0195EF798B6A}")?;
//! assert_eq!(parsed, uuid);
//! # Ok::<(), rfc4122::ParseError>(())
//! ```
//!
//! See [RFC 4122](https://www.rfc-editor.org/rfc/rfc4122).
//!
//! # Field and bit layout
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          time_low                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |       time_mid                |  ver  |      time_hi          |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|  clk_seq_hi   |  clk_seq_low  |         node (0-1)        |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                         node (2-5)                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 4-bit `ver` field holds the version number (1 to 5).
//! - The 2-bit `var` field is set at `10`.
//! - Versions 1 and 2 fill the time fields with a 60-bit count of 100-nanosecond intervals since
//!   1582-10-15 00:00:00 UTC, the clock sequence fields with a counter that is bumped whenever
//!   the clock fails to advance, and `node` with a MAC address or a random value with the
//!   multicast bit set. Version 2 further overwrites `time_low` with a POSIX user or group ID
//!   and `clk_seq_low` with the local domain.
//! - Versions 3 and 5 fill all fields with the MD5 or SHA-1 digest of a name space ID followed by
//!   a name.
//! - Version 4 fills all fields with random bits.
//!
//! The `ver` and `var` bits overwrite whatever the above put there, except in values created from
//! a string or from [`Fields`], which reproduce the given bits exactly.
//!
//! # Shared state
//!
//! The time-based versions draw from a [`ClockSequence`] and a [`NodeSource`], and version 4
//! draws from a [`RandSource`]. The `make_*` functions use process-wide defaults, while the
//! `Uuid::new_v*` constructors take these collaborators as arguments so that callers can
//! substitute their own clocks, node IDs, and random number generators.

mod id;
pub use id::{Fields, ParseError, Uuid, Variant};

pub mod clock;
pub use clock::{ClockSequence, SystemClock, TimeSource};

pub mod endian;

mod generator;

mod global_gen;
pub use global_gen::{make_from, make_from_fields, make_v3, make_v4_with, make_v5};
#[cfg(feature = "global_gen")]
pub use global_gen::{make_v1, make_v1_with, make_v2, make_v4};

pub mod host;
pub use host::{HostId, LocalDomain};

pub mod node;
pub use node::{NodeId, NodeSource};
#[cfg(feature = "global_gen")]
pub use node::SystemNode;

pub mod random;
pub use random::{RandSource, SharedRng};
