//! Entry point functions backed by the process-wide default collaborators.

use crate::{Fields, ParseError, RandSource, Uuid};

#[cfg(feature = "global_gen")]
use crate::{ClockSequence, HostId, NodeSource, SharedRng, SystemNode};

/// Generates a UUIDv1 object.
///
/// This function employs the process-wide [`ClockSequence`] and guarantees the process-wide
/// monotonic order of timestamp and clock sequence pairs. The node ID is the MAC address of a
/// network adapter or a random value resolved once per process.
///
/// # Examples
///
/// ```rust
/// let uuid = rfc4122::make_v1();
/// println!("{}", uuid); // e.g., "1a6bcc52-8f2a-11ee-bd6e-0242ac120002"
/// assert_eq!(uuid.version(), 1);
/// ```
#[cfg(feature = "global_gen")]
#[cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]
pub fn make_v1() -> Uuid {
    make_v1_with(&SystemNode)
}

/// Generates a UUIDv1 object with a custom node ID provider.
///
/// # Examples
///
/// ```rust
/// let uuid = rfc4122::make_v1_with(&|node: &mut [u8; 6]| *node = [0x01, 0, 0, 0, 0, 0x2a]);
/// assert!(uuid.to_string().ends_with("-01000000002a"));
/// ```
#[cfg(feature = "global_gen")]
#[cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]
pub fn make_v1_with(node: &impl NodeSource) -> Uuid {
    Uuid::new_v1(ClockSequence::global(), node)
}

/// Generates a UUIDv2 object.
///
/// See [`Uuid::new_v2()`] for the limitations of this version; do not use it in production.
///
/// # Examples
///
/// ```rust
/// use rfc4122::HostId;
///
/// let uuid = rfc4122::make_v2(HostId::person());
/// assert_eq!(uuid.version(), 2);
/// ```
#[cfg(feature = "global_gen")]
#[cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]
pub fn make_v2(host: HostId) -> Uuid {
    Uuid::new_v2(ClockSequence::global(), host, &SystemNode)
}

/// Generates a name-based UUIDv3 object using MD5.
///
/// # Examples
///
/// ```rust
/// use rfc4122::Uuid;
///
/// let uuid = rfc4122::make_v3(&Uuid::NAMESPACE_DNS, "www.widgets.com");
/// assert_eq!(uuid.to_string(), "3d813cbb-47fb-32ba-91df-831e1593ac29");
/// ```
pub fn make_v3(namespace: &Uuid, name: impl AsRef<[u8]>) -> Uuid {
    Uuid::new_v3(namespace, name)
}

/// Generates a UUIDv4 object.
///
/// # Examples
///
/// ```rust
/// let uuid = rfc4122::make_v4();
/// println!("{}", uuid); // e.g., "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
/// ```
#[cfg(feature = "global_gen")]
#[cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]
pub fn make_v4() -> Uuid {
    make_v4_with(&mut SharedRng::global())
}

/// Generates a UUIDv4 object with a custom random number generator.
///
/// # Examples
///
/// ```rust
/// let mut x = 0u64;
/// let uuid = rfc4122::make_v4_with(&mut || {
///     x = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
///     x
/// });
/// assert_eq!(uuid.version(), 4);
/// ```
pub fn make_v4_with(rng: &mut impl RandSource) -> Uuid {
    Uuid::new_v4(rng)
}

/// Generates a name-based UUIDv5 object using SHA-1.
///
/// # Examples
///
/// ```rust
/// use rfc4122::Uuid;
///
/// let uuid = rfc4122::make_v5(&Uuid::NAMESPACE_DNS, "www.widgets.com");
/// assert_eq!(uuid.to_string(), "21f7f8de-8051-5b89-8680-0195ef798b6a");
/// ```
pub fn make_v5(namespace: &Uuid, name: impl AsRef<[u8]>) -> Uuid {
    Uuid::new_v5(namespace, name)
}

/// Creates a UUID object from the 8-4-4-4-12 hexadecimal string representation, optionally
/// enclosed in braces.
///
/// The bits are reproduced exactly; no version or variant is imposed.
///
/// # Examples
///
/// ```rust
/// let x = rfc4122::make_from("{6ba7b810-9dad-11d1-80b4-00c04fd430c8}")?;
/// assert_eq!(x, rfc4122::Uuid::NAMESPACE_DNS);
///
/// let err = rfc4122::make_from("6ba7b810-9dad-11d1-80b4-00c04fd430c").unwrap_err();
/// assert_eq!(err.input(), "6ba7b810-9dad-11d1-80b4-00c04fd430c");
/// # Ok::<(), rfc4122::ParseError>(())
/// ```
pub fn make_from(text: &str) -> Result<Uuid, ParseError> {
    text.parse()
}

/// Creates a UUID object from GUID-layout field values.
pub const fn make_from_fields(fields: Fields) -> Uuid {
    Uuid::from_fields(fields)
}



#[cfg(test)]
mod tests_v3_v5 {
    use super::{make_from, make_v3, make_v5};
    use crate::{Uuid, Variant};

    /// Reproduces known name-based identifiers
    #[test]
    fn reproduces_known_name_based_identifiers() {
        let ns = make_from("6ba7b810-9dad-11d1-80b4-00c04fd430c8").unwrap();
        assert_eq!(ns, Uuid::NAMESPACE_DNS);
        assert_eq!(
            make_v3(&ns, "www.widgets.com").to_string(),
            "3d813cbb-47fb-32ba-91df-831e1593ac29"
        );
        assert_eq!(
            make_v5(&ns, "www.widgets.com").to_string(),
            "21f7f8de-8051-5b89-8680-0195ef798b6a"
        );
    }

    /// Generates same identifier for same name
    #[test]
    fn generates_same_identifier_for_same_name() {
        let namespaces = [
            Uuid::NAMESPACE_DNS,
            Uuid::NAMESPACE_URL,
            Uuid::NAMESPACE_OID,
            Uuid::NAMESPACE_X500,
        ];
        for ns in namespaces {
            for name in ["", "a", "example.com", "https://example.com/?q=1"] {
                let v3 = make_v3(&ns, name);
                assert_eq!(v3, make_v3(&ns, name));
                assert_eq!((v3.version(), v3.variant()), (3, Variant::Rfc4122));

                let v5 = make_v5(&ns, name);
                assert_eq!(v5, make_v5(&ns, name));
                assert_eq!((v5.version(), v5.variant()), (5, Variant::Rfc4122));
                assert_ne!(v3, v5);
            }
        }
    }
}

#[cfg(feature = "global_gen")]
#[cfg(test)]
mod tests_v4 {
    use super::{make_v4, make_v4_with};
    use crate::Variant;

    const N_SAMPLES: usize = 100_000;
    thread_local!(static SAMPLES: Vec<String> = (0..N_SAMPLES).map(|_| make_v4().into()).collect());

    /// Generates canonical string
    #[test]
    fn generates_canonical_string() {
        let pattern = r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";
        let re = regex::Regex::new(pattern).unwrap();
        SAMPLES.with(|samples| {
            for e in samples {
                assert_eq!(e.len(), 36);
                assert_eq!(&e[14..15], "4");
                assert!(re.is_match(e));
            }
        });
    }

    /// Generates 100k identifiers without collision
    #[test]
    fn generates_100k_identifiers_without_collision() {
        use std::collections::HashSet;
        SAMPLES.with(|samples| {
            let s: HashSet<&String> = samples.iter().collect();
            assert_eq!(s.len(), N_SAMPLES);
        });
    }

    /// Sets constant bits and random bits properly
    #[test]
    fn sets_constant_bits_and_random_bits_properly() {
        // count '1' of each bit
        let bins = SAMPLES.with(|samples| {
            let mut bins = [0u32; 128];
            for e in samples {
                let mut it = bins.iter_mut().rev();
                for c in e.chars().rev() {
                    if let Some(mut num) = c.to_digit(16) {
                        for _ in 0..4 {
                            *it.next().unwrap() += num & 1;
                            num >>= 1;
                        }
                    }
                }
            }
            bins
        });

        // test if constant bits are all set to 1 or 0
        let n = N_SAMPLES as u32;
        assert_eq!(bins[48], 0, "version bit 48");
        assert_eq!(bins[49], n, "version bit 49");
        assert_eq!(bins[50], 0, "version bit 50");
        assert_eq!(bins[51], 0, "version bit 51");
        assert_eq!(bins[64], n, "variant bit 64");
        assert_eq!(bins[65], 0, "variant bit 65");

        // test if random bits are set to 1 at ~50% probability
        // set margin based on binom dist 99.999% confidence interval
        let margin = 4.417173 * (0.5 * 0.5 / N_SAMPLES as f64).sqrt();
        for i in (0..48).chain(52..64).chain(66..128) {
            let p = bins[i] as f64 / N_SAMPLES as f64;
            assert!((p - 0.5).abs() < margin, "random bit {}: {}", i, p);
        }
    }

    /// Sets correct variant and version bits
    #[test]
    fn sets_correct_variant_and_version_bits() {
        for _ in 0..1_000 {
            let e = make_v4();
            assert_eq!(e.variant(), Variant::Rfc4122);
            assert_eq!(e.version(), 4);
        }
    }

    /// Uses custom random number generator
    #[test]
    fn uses_custom_random_number_generator() {
        let mut rng = rand::rngs::mock::StepRng::new(0, 0);
        let e = make_v4_with(&mut || rand::RngCore::next_u64(&mut rng));
        assert_eq!(e.to_string(), "00000000-0000-4000-8000-000000000000");
    }

    /// Generates no duplicates under multithreading
    #[test]
    fn generates_no_duplicates_under_multithreading() {
        use std::{collections::HashSet, thread};

        let s: HashSet<_> = thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| (0..10_000).map(|_| make_v4()).collect::<Vec<_>>()))
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap())
                .collect()
        });
        assert_eq!(s.len(), 4 * 10_000);
    }

    /// Diverges from parent sequence in forked child
    #[cfg(unix)]
    #[test]
    fn diverges_from_parent_sequence_in_forked_child() {
        use crate::{SharedRng, Uuid};

        let _ = make_v4();
        let mut fds = [0 as libc::c_int; 2];
        assert_eq!(unsafe { libc::pipe(fds.as_mut_ptr()) }, 0);

        // no other thread may hold the generator lock across fork
        let guard = SharedRng::global().lock();
        let pid = unsafe { libc::fork() };
        drop(guard);
        assert!(pid >= 0);
        if pid == 0 {
            let bytes = make_v4().raw_data();
            unsafe {
                libc::close(fds[0]);
                libc::write(fds[1], bytes.as_ptr().cast(), bytes.len());
                libc::_exit(0);
            }
        }

        let parent = make_v4();
        let mut buf = [0u8; 16];
        let n = unsafe {
            libc::close(fds[1]);
            let n = libc::read(fds[0], buf.as_mut_ptr().cast(), buf.len());
            libc::close(fds[0]);
            libc::waitpid(pid, std::ptr::null_mut(), 0);
            n
        };
        assert_eq!(n, 16);
        let child = Uuid::from(buf);
        assert_eq!(child.version(), 4);
        assert_ne!(child, parent);
    }
}

#[cfg(test)]
mod tests_from {
    use super::{make_from, make_from_fields};
    use crate::{Fields, Uuid};

    /// Round-trips generated identifiers with and without braces
    #[test]
    fn round_trips_generated_identifiers_with_and_without_braces() {
        let mut rng = rand::rngs::mock::StepRng::new(0x0123_4567_89ab_cdef, 0xfedc_ba98_7654_3211);
        for _ in 0..1_000 {
            let text = crate::make_v4_with(&mut || rand::RngCore::next_u64(&mut rng)).to_string();
            assert_eq!(make_from(&text).unwrap().to_string(), text);
            assert_eq!(make_from(&format!("{{{}}}", text)).unwrap().to_string(), text);
        }

        let text = "6ba7b810-9dad-11d1-80b4-00c04fd430c8";
        assert_eq!(make_from(text).unwrap().to_string(), text);
    }

    /// Rejects malformed strings with original input
    #[test]
    fn rejects_malformed_strings_with_original_input() {
        let cases = [
            "6ba7b810-9dad-11d1-80b4-00c04fd430c",
            "{6ba7b810-9dad-11d1-80b4-00c04fd430c8]",
            "6ba7b810-9dad-11d1-80b40-0c04fd430c8",
            "6ba7b810-9dad-11d1-80x4-00c04fd430c8",
            "{6ba7b810-9dad-11d1-80x4-00c04fd430c8}",
        ];
        for e in cases {
            assert_eq!(make_from(e).unwrap_err().input(), e);
        }
    }

    /// Creates Nil UUID from zeroed fields
    #[test]
    fn creates_nil_uuid_from_zeroed_fields() {
        let e = make_from_fields(Fields::default());
        assert_eq!(e, Uuid::NIL);
        assert_eq!(e.raw_data(), [0u8; 16]);
        assert_eq!(e.to_string(), "00000000-0000-0000-0000-000000000000");
    }
}
