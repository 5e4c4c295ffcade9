//! Fixed-width element encoding for length-prefixed arrays.
//!
//! Layout: `[count][count x element]`, little-endian. When `count` is zero the
//! element block is absent entirely, and readers must not attempt to read it.

/// A value with a fixed-width little-endian encoding.
pub trait ArrayElement: Sized + Copy {
    const SIZE: usize;
    fn encode(&self, out: &mut Vec<u8>);
    fn decode(bytes: &[u8]) -> Self;
}

/// Integer types usable as the array count prefix.
pub trait ArrayCount: ArrayElement {
    fn from_len(len: usize) -> Option<Self>;
    fn to_len(self) -> Option<usize>;
}

macro_rules! impl_array_element {
    ($($t:ty),*) => {$(
        impl ArrayElement for $t {
            const SIZE: usize = std::mem::size_of::<$t>();

            fn encode(&self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_le_bytes());
            }

            fn decode(bytes: &[u8]) -> Self {
                let mut raw = [0u8; std::mem::size_of::<$t>()];
                raw.copy_from_slice(&bytes[..Self::SIZE]);
                <$t>::from_le_bytes(raw)
            }
        }
    )*};
}

macro_rules! impl_array_count {
    ($($t:ty),*) => {$(
        impl ArrayCount for $t {
            fn from_len(len: usize) -> Option<Self> {
                <$t>::try_from(len).ok()
            }

            fn to_len(self) -> Option<usize> {
                usize::try_from(self).ok()
            }
        }
    )*};
}

impl_array_element!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);
impl_array_count!(u8, u16, u32, u64);
