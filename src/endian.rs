//! Byte-order conversion between host and network (big-endian) order.

/// Integers whose byte order can be reversed or converted to and from network order.
pub trait ByteOrder: Sized {
    /// Reverses the byte order unconditionally.
    fn byteswap(self) -> Self;

    /// Converts from host to network byte order; a no-op on big-endian targets.
    fn to_network(self) -> Self;

    /// Converts from network to host byte order; a no-op on big-endian targets.
    fn to_host(self) -> Self;
}

macro_rules! impl_byte_order {
    ($($t:ty),*) => {
        $(
            impl ByteOrder for $t {
                #[inline]
                fn byteswap(self) -> Self {
                    self.swap_bytes()
                }

                #[inline]
                fn to_network(self) -> Self {
                    self.to_be()
                }

                #[inline]
                fn to_host(self) -> Self {
                    <$t>::from_be(self)
                }
            }
        )*
    };
}

impl_byte_order!(u16, u32, u64, i16, i32, i64);

/// Lays a pair of 64-bit words out as 16 bytes in network order.
pub(crate) fn words_to_network_bytes(hi: u64, lo: u64) -> [u8; 16] {
    let mut bytes = [0u8; 16];
    bytes[..8].copy_from_slice(&hi.to_network().to_ne_bytes());
    bytes[8..].copy_from_slice(&lo.to_network().to_ne_bytes());
    bytes
}

/// Reads the first 16 bytes of `bytes` in network order as a pair of 64-bit words.
///
/// # Panics
///
/// Panics if `bytes` is shorter than 16 bytes.
pub(crate) fn network_bytes_to_words(bytes: &[u8]) -> (u64, u64) {
    let mut hi = [0u8; 8];
    let mut lo = [0u8; 8];
    hi.copy_from_slice(&bytes[..8]);
    lo.copy_from_slice(&bytes[8..16]);
    (
        u64::from_ne_bytes(hi).to_host(),
        u64::from_ne_bytes(lo).to_host(),
    )
}

#[cfg(test)]
mod tests {
    use super::{network_bytes_to_words, words_to_network_bytes, ByteOrder};

    /// Swaps bytes of every width
    #[test]
    fn swaps_bytes_of_every_width() {
        assert_eq!(0x0102u16.byteswap(), 0x0201);
        assert_eq!(0x0102_0304u32.byteswap(), 0x0403_0201);
        assert_eq!(0x0102_0304_0506_0708u64.byteswap(), 0x0807_0605_0403_0201);
        assert_eq!(0x0180i16.byteswap(), -0x7fff);
        assert_eq!((-2i32).byteswap(), 0xfeff_ffffu32 as i32);
        assert_eq!(0x7fi64.byteswap(), 0x7f00_0000_0000_0000);
    }

    /// Converts to and from network order symmetrically
    #[test]
    fn converts_to_and_from_network_order_symmetrically() {
        for x in [0u64, 1, 0x0123_4567_89ab_cdef, u64::MAX] {
            assert_eq!(x.to_network().to_host(), x);
            assert_eq!(x.to_network().to_ne_bytes(), x.to_be_bytes());
        }
        for x in [0u32, 1, 0x0123_4567, u32::MAX] {
            assert_eq!(x.to_network().to_ne_bytes(), x.to_be_bytes());
        }
        for x in [0u16, 1, 0x0123, u16::MAX] {
            assert_eq!(x.to_network().to_ne_bytes(), x.to_be_bytes());
        }
    }

    /// Lays words out most significant byte first
    #[test]
    fn lays_words_out_most_significant_byte_first() {
        let bytes = words_to_network_bytes(0x0001_0203_0405_0607, 0x0809_0a0b_0c0d_0e0f);
        assert_eq!(
            bytes,
            [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]
        );
        assert_eq!(
            network_bytes_to_words(&bytes),
            (0x0001_0203_0405_0607, 0x0809_0a0b_0c0d_0e0f)
        );

        let digest = [0xaau8; 20];
        assert_eq!(
            network_bytes_to_words(&digest),
            (0xaaaa_aaaa_aaaa_aaaa, 0xaaaa_aaaa_aaaa_aaaa)
        );
    }
}
