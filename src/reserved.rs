//! Reserved sentinel markers.
//!
//! Every list owns one guard node that never carries data. Callers are
//! still not allowed to use the marker value that historically tagged
//! that node, so each storable type names its reserved value here.

/// The literal string reserved for the sentinel node.
pub const SENTINEL: &str = "SENTINEL";

/// A value type that can be stored in a sentinel-guarded container.
pub trait Reserved {
    /// True if `self` equals the reserved sentinel marker for this type.
    fn is_reserved(&self) -> bool;
}

impl Reserved for str {
    #[inline]
    fn is_reserved(&self) -> bool {
        self == SENTINEL
    }
}

impl Reserved for String {
    #[inline]
    fn is_reserved(&self) -> bool {
        self.as_str().is_reserved()
    }
}

impl<T: Reserved + ?Sized> Reserved for &T {
    #[inline]
    fn is_reserved(&self) -> bool {
        (**self).is_reserved()
    }
}

macro_rules! reserve_max {
    ($($t:ty),* $(,)?) => {
        $(
            impl Reserved for $t {
                #[inline]
                fn is_reserved(&self) -> bool {
                    *self == <$t>::MAX
                }
            }
        )*
    };
}

reserve_max!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
