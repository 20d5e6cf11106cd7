//! Closed set of node kinds produced by the legacy decoder.

/// Defines `NodeKind` together with its name table.
///
/// Each generated variant gets:
/// - an entry in `NodeKind::ALL`, in declaration order
/// - a `name()` arm returning the variant identifier, which is also the
///   spelling used by the tree dump
macro_rules! define_node_kinds {
    ($($(#[$meta:meta])* $kind:ident),* $(,)?) => {
        /// Kind of a symbol-tree node.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum NodeKind {
            $($(#[$meta])* $kind,)*
        }

        impl NodeKind {
            /// Every kind, in declaration order.
            pub const ALL: &'static [NodeKind] = &[$(NodeKind::$kind,)*];

            /// Stable name of this kind.
            pub const fn name(self) -> &'static str {
                match self {
                    $(NodeKind::$kind => stringify!($kind),)*
                }
            }
        }
    };
}

define_node_kinds! {
    // === Top level ===
    /// Root of every decoded symbol.
    Global,
    /// Undecoded trailing bytes, kept verbatim.
    Suffix,
    ObjCAttribute,
    NonObjCAttribute,
    DynamicAttribute,
    DirectMethodReferenceAttribute,
    VTableAttribute,

    // === Specialization attributes ===
    GenericSpecialization,
    GenericSpecializationNotReAbstracted,
    GenericSpecializationParam,
    IsSerialized,
    SpecializationPassID,
    FunctionSignatureSpecialization,
    FunctionSignatureSpecializationParam,
    FunctionSignatureSpecializationParamKind,
    FunctionSignatureSpecializationParamPayload,

    // === Metadata and witness globals ===
    TypeMetadata,
    GenericTypeMetadataPattern,
    TypeMetadataAccessFunction,
    TypeMetadataLazyCache,
    Metaclass,
    NominalTypeDescriptor,
    FullTypeMetadata,
    ProtocolDescriptor,
    PartialApplyForwarder,
    PartialApplyObjCForwarder,
    TypeMangling,
    ValueWitness,
    ValueWitnessTable,
    FieldOffset,
    Directness,
    ProtocolConformance,
    ProtocolWitnessTable,
    GenericProtocolWitnessTable,
    GenericProtocolWitnessTableInstantiationFunction,
    LazyProtocolWitnessTableAccessor,
    LazyProtocolWitnessTableCacheVariable,
    ProtocolWitnessTableAccessor,
    AssociatedTypeMetadataAccessor,
    AssociatedTypeWitnessTableAccessor,
    ReabstractionThunk,
    ReabstractionThunkHelper,
    ProtocolWitness,

    // === Names ===
    Identifier,
    PrefixOperator,
    PostfixOperator,
    InfixOperator,
    LocalDeclName,
    PrivateDeclName,
    /// Integer payload carried as [`Payload::Index`](crate::Payload::Index).
    Number,
    Index,

    // === Declarations and contexts ===
    Module,
    Extension,
    Structure,
    Enum,
    Class,
    Protocol,
    TypeAlias,
    Static,
    Function,
    Variable,
    Subscript,
    Initializer,
    DefaultArgumentInitializer,
    Allocator,
    Constructor,
    Deallocator,
    Destructor,
    IVarInitializer,
    IVarDestroyer,
    ExplicitClosure,
    ImplicitClosure,

    // === Accessors ===
    Getter,
    GlobalGetter,
    Setter,
    MaterializeForSet,
    WillSet,
    DidSet,
    ReadAccessor,
    ModifyAccessor,
    OwningAddressor,
    NativeOwningAddressor,
    NativePinningAddressor,
    UnsafeAddressor,
    OwningMutableAddressor,
    NativeOwningMutableAddressor,
    NativePinningMutableAddressor,
    UnsafeMutableAddressor,

    // === Types ===
    Type,
    TypeList,
    BuiltinTypeName,
    BoundGenericClass,
    BoundGenericStructure,
    BoundGenericEnum,
    Tuple,
    TupleElement,
    TupleElementName,
    VariadicMarker,
    FunctionType,
    UncurriedFunctionType,
    ObjCBlock,
    CFunctionPointer,
    AutoClosureType,
    ThinFunctionType,
    ThrowsAnnotation,
    ArgumentTuple,
    ReturnType,
    InOut,
    DynamicSelf,
    ErrorType,
    Metatype,
    ExistentialMetatype,
    MetatypeRepresentation,
    ProtocolList,
    AssociatedTypeRef,
    Unowned,
    Unmanaged,
    Weak,

    // === Generics ===
    DependentGenericSignature,
    DependentPseudogenericSignature,
    DependentGenericParamCount,
    DependentGenericParamType,
    DependentGenericType,
    DependentMemberType,
    DependentAssociatedTypeRef,
    DependentGenericConformanceRequirement,
    DependentGenericSameTypeRequirement,
    DependentGenericLayoutRequirement,

    // === SIL types ===
    ImplFunctionType,
    ImplConvention,
    ImplFunctionAttribute,
    ImplParameter,
    ImplResult,
    ImplErrorResult,
    SILBoxType,
    SILBoxTypeWithLayout,
    SILBoxLayout,
    SILBoxMutableField,
    SILBoxImmutableField,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
