//! Numeric sample types.

use std::fmt::Debug;

/// A numeric pixel sample.
///
/// Filters compute in `f64` and convert back with [`Scalar::from_f64`],
/// which rounds and saturates for integer types. The little-endian byte
/// helpers are used by the run-length file format.
pub trait Scalar: Copy + Default + PartialEq + PartialOrd + Debug {
    /// Size of the little-endian encoding in bytes.
    const BYTES: usize;

    fn to_f64(self) -> f64;

    fn from_f64(value: f64) -> Self;

    fn write_le(self, out: &mut Vec<u8>);

    /// Decode from the first [`Scalar::BYTES`] bytes of `bytes`.
    fn read_le(bytes: &[u8]) -> Self;
}

macro_rules! impl_scalar_int {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            const BYTES: usize = std::mem::size_of::<$t>();

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_f64(value: f64) -> Self {
                // float-to-int `as` saturates and maps NaN to zero
                value.round() as $t
            }

            fn write_le(self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_le_bytes());
            }

            fn read_le(bytes: &[u8]) -> Self {
                let mut buf = [0u8; std::mem::size_of::<$t>()];
                buf.copy_from_slice(&bytes[..Self::BYTES]);
                <$t>::from_le_bytes(buf)
            }
        }
    )*};
}

macro_rules! impl_scalar_float {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            const BYTES: usize = std::mem::size_of::<$t>();

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_f64(value: f64) -> Self {
                value as $t
            }

            fn write_le(self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_le_bytes());
            }

            fn read_le(bytes: &[u8]) -> Self {
                let mut buf = [0u8; std::mem::size_of::<$t>()];
                buf.copy_from_slice(&bytes[..Self::BYTES]);
                <$t>::from_le_bytes(buf)
            }
        }
    )*};
}

impl_scalar_int!(u8, u16, u32, i16, i32);
impl_scalar_float!(f32, f64);
