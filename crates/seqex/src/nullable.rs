//! Null-ness of sequence elements.
//!
//! Patterns get a default `null` binding that asks the element whether it is
//! null. Element types opt in through [`Nullable`].

use std::rc::Rc;
use std::sync::Arc;

/// Element types that may represent an absent value.
pub trait Nullable {
    fn is_null(&self) -> bool;
}

impl<U> Nullable for Option<U> {
    #[inline]
    fn is_null(&self) -> bool {
        self.is_none()
    }
}

impl<U: Nullable + ?Sized> Nullable for &U {
    #[inline]
    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

impl<U: Nullable + ?Sized> Nullable for Box<U> {
    #[inline]
    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

impl<U: Nullable + ?Sized> Nullable for Rc<U> {
    #[inline]
    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

impl<U: Nullable + ?Sized> Nullable for Arc<U> {
    #[inline]
    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

impl<U> Nullable for Vec<U> {
    #[inline]
    fn is_null(&self) -> bool {
        false
    }
}

/// Plain value types are never null.
macro_rules! never_null {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Nullable for $ty {
                #[inline]
                fn is_null(&self) -> bool {
                    false
                }
            }
        )*
    };
}

never_null!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    str,
    String,
);
