//! Function-signature specialization parameter encodings.
//!
//! A `FunctionSignatureSpecializationParamKind` node stores either one of
//! the exclusive [`SpecializationParamKind`] values or an OR of
//! [`SpecializationParamFlags`]. The flag bits start above every kind
//! value so the two never collide.

use bitflags::bitflags;

/// Exclusive rewrite applied to one parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SpecializationParamKind {
    ConstantPropFunction = 0,
    ConstantPropGlobal = 1,
    ConstantPropInteger = 2,
    ConstantPropFloat = 3,
    ConstantPropString = 4,
    ClosureProp = 5,
    BoxToValue = 6,
    BoxToStack = 7,
}

impl SpecializationParamKind {
    #[inline]
    pub const fn index(self) -> u64 {
        self as u64
    }
}

bitflags! {
    /// Combinable rewrites applied to one parameter.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct SpecializationParamFlags: u64 {
        /// Parameter is never used.
        const DEAD = 1 << 6;
        const OWNED_TO_GUARANTEED = 1 << 7;
        /// Aggregate exploded into its fields.
        const SROA = 1 << 8;
        const GUARANTEED_TO_OWNED = 1 << 9;
    }
}

impl SpecializationParamFlags {
    /// Flag for a mangling letter (`d`, `g`, `o`, `s`).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            b'd' => Some(Self::DEAD),
            b'g' => Some(Self::OWNED_TO_GUARANTEED),
            b'o' => Some(Self::GUARANTEED_TO_OWNED),
            b's' => Some(Self::SROA),
            _ => None,
        }
    }
}
