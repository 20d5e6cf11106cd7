//! Value-witness and field-offset codes stored as node indices.

/// Entry of a value-witness table, mangled as a two-letter code after `w`.
///
/// The discriminant is what a `ValueWitness` node stores as its index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ValueWitnessKind {
    AllocateBuffer = 0,
    AssignWithCopy,
    AssignWithTake,
    DeallocateBuffer,
    Destroy,
    DestroyBuffer,
    DestroyArray,
    InitializeBufferWithCopyOfBuffer,
    InitializeBufferWithCopy,
    InitializeWithCopy,
    InitializeBufferWithTakeOfBuffer,
    InitializeBufferWithTake,
    InitializeWithTake,
    ProjectBuffer,
    StoreExtraInhabitant,
    GetExtraInhabitantIndex,
    InitializeArrayWithCopy,
    InitializeArrayWithTakeFrontToBack,
    InitializeArrayWithTakeBackToFront,
    GetEnumTag,
    DestructiveProjectEnumData,
    DestructiveInjectEnumTag,
}

impl ValueWitnessKind {
    /// Code-to-kind table, in discriminant order.
    const TABLE: [(&'static [u8; 2], ValueWitnessKind); 22] = [
        (b"al", Self::AllocateBuffer),
        (b"ca", Self::AssignWithCopy),
        (b"ta", Self::AssignWithTake),
        (b"de", Self::DeallocateBuffer),
        (b"xx", Self::Destroy),
        (b"XX", Self::DestroyBuffer),
        (b"Xx", Self::DestroyArray),
        (b"CP", Self::InitializeBufferWithCopyOfBuffer),
        (b"Cp", Self::InitializeBufferWithCopy),
        (b"cp", Self::InitializeWithCopy),
        (b"TK", Self::InitializeBufferWithTakeOfBuffer),
        (b"Tk", Self::InitializeBufferWithTake),
        (b"tk", Self::InitializeWithTake),
        (b"pr", Self::ProjectBuffer),
        (b"xs", Self::StoreExtraInhabitant),
        (b"xg", Self::GetExtraInhabitantIndex),
        (b"Cc", Self::InitializeArrayWithCopy),
        (b"Tt", Self::InitializeArrayWithTakeFrontToBack),
        (b"tT", Self::InitializeArrayWithTakeBackToFront),
        (b"ug", Self::GetEnumTag),
        (b"up", Self::DestructiveProjectEnumData),
        (b"ui", Self::DestructiveInjectEnumTag),
    ];

    /// Look up a two-letter mangling code.
    pub fn from_code(code: [u8; 2]) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(c, _)| **c == code)
            .map(|&(_, kind)| kind)
    }

    /// The two-letter mangling code.
    pub fn code(self) -> &'static str {
        // Every entry is ASCII.
        std::str::from_utf8(Self::TABLE[self as usize].0).unwrap_or_default()
    }

    /// Index stored on a `ValueWitness` node.
    #[inline]
    pub const fn index(self) -> u64 {
        self as u64
    }
}

/// Whether a field offset is stored directly or behind a pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Directness {
    Direct = 0,
    Indirect = 1,
}

impl Directness {
    /// `d` is direct, `i` indirect.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            b'd' => Some(Directness::Direct),
            b'i' => Some(Directness::Indirect),
            _ => None,
        }
    }

    #[inline]
    pub const fn index(self) -> u64 {
        self as u64
    }
}
