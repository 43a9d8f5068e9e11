use std::{fmt, ops, str};

/// Represents a Universally Unique IDentifier.
///
/// The 128 bits are held as two 64-bit words in the RFC 4122 field order:
///
/// ```text
///  hi: time_low(32) | time_mid(16) | time_hi_and_version(16)
///  lo: clock_seq_hi_and_reserved(8) | clock_seq_low(8) | node(48)
/// ```
///
/// Comparison operators and hashing act on the 128 bits as a big-endian integer.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid {
    hi: u64,
    lo: u64,
}

/// Field values of a UUID in the classic GUID layout.
///
/// [`Uuid::from_fields()`] packs these values as given without touching the version or variant
/// bits, so any 128-bit value (including the Nil UUID) can be expressed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Fields {
    pub time_low: u32,
    pub time_mid: u16,
    pub time_hi_and_version: u16,
    pub clock_seq_hi_and_reserved: u8,
    pub clock_seq_low: u8,
    pub node: [u8; 6],
}

/// The variant field of a UUID, as determined by the most significant bits of the
/// `clock_seq_hi_and_reserved` octet.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Variant {
    /// `0xxx`: reserved for NCS backward compatibility.
    Ncs,
    /// `10xx`: the variant specified in RFC 4122.
    Rfc4122,
    /// `110x`: reserved for Microsoft backward compatibility.
    Microsoft,
    /// `111x`: reserved for future definition.
    Future,
}

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self::from_words(0, 0);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self::from_words(u64::MAX, u64::MAX);

    /// Name space ID for fully-qualified domain names (6ba7b810-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_DNS: Self = Self::from_fields(Fields {
        time_low: 0x6ba7_b810,
        time_mid: 0x9dad,
        time_hi_and_version: 0x11d1,
        clock_seq_hi_and_reserved: 0x80,
        clock_seq_low: 0xb4,
        node: [0x00, 0xc0, 0x4f, 0xd4, 0x30, 0xc8],
    });

    /// Name space ID for URLs (6ba7b811-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_URL: Self = Self::from_fields(Fields {
        time_low: 0x6ba7_b811,
        time_mid: 0x9dad,
        time_hi_and_version: 0x11d1,
        clock_seq_hi_and_reserved: 0x80,
        clock_seq_low: 0xb4,
        node: [0x00, 0xc0, 0x4f, 0xd4, 0x30, 0xc8],
    });

    /// Name space ID for ISO OIDs (6ba7b812-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_OID: Self = Self::from_fields(Fields {
        time_low: 0x6ba7_b812,
        time_mid: 0x9dad,
        time_hi_and_version: 0x11d1,
        clock_seq_hi_and_reserved: 0x80,
        clock_seq_low: 0xb4,
        node: [0x00, 0xc0, 0x4f, 0xd4, 0x30, 0xc8],
    });

    /// Name space ID for X.500 DNs (6ba7b814-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_X500: Self = Self::from_fields(Fields {
        time_low: 0x6ba7_b814,
        time_mid: 0x9dad,
        time_hi_and_version: 0x11d1,
        clock_seq_hi_and_reserved: 0x80,
        clock_seq_low: 0xb4,
        node: [0x00, 0xc0, 0x4f, 0xd4, 0x30, 0xc8],
    });

    /// Creates an object from the high and low 64-bit words.
    pub const fn from_words(hi: u64, lo: u64) -> Self {
        Self { hi, lo }
    }

    /// Returns the high and low 64-bit words.
    pub const fn as_words(&self) -> (u64, u64) {
        (self.hi, self.lo)
    }

    /// Creates an object by packing the GUID-layout field values as they are.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc4122::{Fields, Uuid};
    ///
    /// let x = Uuid::from_fields(Fields {
    ///     time_low: 0x6ba7_b810,
    ///     time_mid: 0x9dad,
    ///     time_hi_and_version: 0x11d1,
    ///     clock_seq_hi_and_reserved: 0x80,
    ///     clock_seq_low: 0xb4,
    ///     node: [0x00, 0xc0, 0x4f, 0xd4, 0x30, 0xc8],
    /// });
    /// assert_eq!(x, Uuid::NAMESPACE_DNS);
    /// ```
    pub const fn from_fields(fields: Fields) -> Self {
        let n = fields.node;
        Self {
            hi: (fields.time_low as u64) << 32
                | (fields.time_mid as u64) << 16
                | fields.time_hi_and_version as u64,
            lo: (fields.clock_seq_hi_and_reserved as u64) << 56
                | (fields.clock_seq_low as u64) << 48
                | (n[0] as u64) << 40
                | (n[1] as u64) << 32
                | (n[2] as u64) << 24
                | (n[3] as u64) << 16
                | (n[4] as u64) << 8
                | n[5] as u64,
        }
    }

    /// Splits the value into the GUID-layout field values.
    pub const fn fields(&self) -> Fields {
        let lo = self.lo;
        Fields {
            time_low: (self.hi >> 32) as u32,
            time_mid: (self.hi >> 16) as u16,
            time_hi_and_version: self.hi as u16,
            clock_seq_hi_and_reserved: (lo >> 56) as u8,
            clock_seq_low: (lo >> 48) as u8,
            node: [
                (lo >> 40) as u8,
                (lo >> 32) as u8,
                (lo >> 24) as u8,
                (lo >> 16) as u8,
                (lo >> 8) as u8,
                lo as u8,
            ],
        }
    }

    /// Returns the 16-byte big-endian representation.
    pub const fn raw_data(&self) -> [u8; 16] {
        ((self.hi as u128) << 64 | self.lo as u128).to_be_bytes()
    }

    /// Returns the version number stored in the top four bits of `time_hi_and_version`.
    ///
    /// The value is meaningful only when [`Uuid::variant()`] is [`Variant::Rfc4122`].
    pub const fn version(&self) -> u8 {
        ((self.hi >> 12) & 0x0f) as u8
    }

    /// Returns the variant field value.
    pub const fn variant(&self) -> Variant {
        match (self.lo >> 61) as u8 {
            0b000..=0b011 => Variant::Ncs,
            0b100..=0b101 => Variant::Rfc4122,
            0b110 => Variant::Microsoft,
            _ => Variant::Future,
        }
    }

    /// Overwrites the version and variant bits of a freshly packed value.
    pub(crate) fn stamped(mut self, version: u8) -> Self {
        self.set_variant();
        self.set_version(version);
        self
    }

    fn set_variant(&mut self) {
        self.lo = (self.lo & 0x3fff_ffff_ffff_ffff) | 0x8000_0000_0000_0000;
    }

    fn set_version(&mut self, version: u8) {
        self.hi = (self.hi & 0xffff_ffff_ffff_0fff) | ((version as u64 & 0x0f) << 12);
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated
    /// structure that can be dereferenced as `str` and [`Display`](fmt::Display)ed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc4122::Uuid;
    ///
    /// let x = "{6BA7B810-9DAD-11D1-80B4-00C04FD430C8}".parse::<Uuid>()?;
    /// let y = x.encode();
    /// assert_eq!(&y as &str, "6ba7b810-9dad-11d1-80b4-00c04fd430c8");
    /// assert_eq!(format!("{}", y), "6ba7b810-9dad-11d1-80b4-00c04fd430c8");
    /// # Ok::<(), rfc4122::ParseError>(())
    /// ```
    pub fn encode(&self) -> impl ops::Deref<Target = str> + fmt::Display {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";

        let mut buffer = [0u8; 36];
        let mut buf_iter = buffer.iter_mut();
        for (i, e) in self.raw_data().into_iter().enumerate() {
            let e = e as usize;
            *buf_iter.next().unwrap() = DIGITS[e >> 4];
            *buf_iter.next().unwrap() = DIGITS[e & 15];
            if i == 3 || i == 5 || i == 7 || i == 9 {
                *buf_iter.next().unwrap() = b'-';
            }
        }
        debug_assert!(buffer.is_ascii());
        UuidStr(buffer)
    }
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Uuid {
    type Err = ParseError;

    /// Creates an object from the 8-4-4-4-12 hexadecimal string representation, optionally
    /// enclosed in braces.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        const GROUPS: [(usize, usize); 5] = [(0, 8), (9, 13), (14, 18), (19, 23), (24, 36)];

        let err = || ParseError {
            input: src.to_owned(),
        };

        let bytes = src.as_bytes();
        let body = match bytes.len() {
            38 if bytes[0] == b'{' && bytes[37] == b'}' => &bytes[1..37],
            36 => bytes,
            _ => return Err(err()),
        };
        if [8, 13, 18, 23].iter().any(|&i| body[i] != b'-') {
            return Err(err());
        }

        let mut parts = [0u64; 5];
        for (part, &(first, last)) in parts.iter_mut().zip(GROUPS.iter()) {
            *part = parse_hex(&body[first..last]).ok_or_else(err)?;
        }

        Ok(Self {
            hi: parts[0] << 32 | parts[1] << 16 | parts[2],
            lo: parts[3] << 48 | parts[4],
        })
    }
}

/// Parses a run of hexadecimal digits, rejecting anything else including signs.
fn parse_hex(digits: &[u8]) -> Option<u64> {
    digits.iter().try_fold(0u64, |acc, &c| {
        let d = char::from(c).to_digit(16)?;
        Some(acc << 4 | d as u64)
    })
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.raw_data()
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self::from(u128::from_be_bytes(src))
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        (src.hi as u128) << 64 | src.lo as u128
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self::from_words((src >> 64) as u64, src as u64)
    }
}

impl From<Uuid> for String {
    fn from(src: Uuid) -> Self {
        src.to_string()
    }
}

impl TryFrom<String> for Uuid {
    type Error = ParseError;

    fn try_from(src: String) -> Result<Self, Self::Error> {
        src.parse()
    }
}

impl TryFrom<&str> for Uuid {
    type Error = ParseError;

    fn try_from(src: &str) -> Result<Self, Self::Error> {
        src.parse()
    }
}

/// Concrete return type of [`Uuid::encode()`] containing the stack-allocated 8-4-4-4-12 string
/// representation.
struct UuidStr([u8; 36]);

impl ops::Deref for UuidStr {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        debug_assert!(self.0.is_ascii());
        unsafe { str::from_utf8_unchecked(&self.0) }
    }
}

impl fmt::Display for UuidStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}

/// Error parsing an invalid string representation of UUID.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParseError {
    input: String,
}

impl ParseError {
    /// Returns the rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid uuid string: {}", self.input)
    }
}

impl std::error::Error for ParseError {}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_bytes(src.raw_data())
        }
    }

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            Self::from(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(&self.raw_data())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            <[u8; 16]>::try_from(value)
                .map(Self::Value::from)
                .map_err(de::Error::custom)
        }
    }

}
