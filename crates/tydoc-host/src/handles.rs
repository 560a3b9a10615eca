//! Opaque handles into the host type-checker.
//!
//! Handles are plain `u32` newtypes: the resolver only ever compares and
//! hashes them, and hands them back to the host for structural queries.
//! `0` is reserved as the invalid sentinel in all three spaces.

/// Opaque reference to a resolved type instance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeHandle(pub u32);

/// Opaque reference to the syntax node that introduced a symbol.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DeclId(pub u32);

/// Identity of a named symbol; the recursion guard keys on these.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SymbolId(pub u32);

macro_rules! impl_handle {
    ($ty:ident) => {
        impl $ty {
            /// Sentinel value never handed out by a host.
            pub const INVALID: Self = Self(0);

            /// First id a host may allocate.
            pub const FIRST_VALID: u32 = 1;

            pub const fn is_valid(self) -> bool {
                self.0 >= Self::FIRST_VALID
            }
        }
    };
}

impl_handle!(TypeHandle);
impl_handle!(DeclId);
impl_handle!(SymbolId);
