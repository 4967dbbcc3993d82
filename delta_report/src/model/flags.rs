//! Delta classification flags shared with the upstream compatibility analyzer
//!
//! Values are matched exactly; anything outside the table is kept as a raw
//! integer on the entry and renders through the fallback strategy.

macro_rules! delta_flags {
    ($($variant:ident = $value:literal => $name:literal),+ $(,)?) => {
        /// Closed set of change classifiers
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum DeltaFlag {
            $($variant = $value),+
        }

        impl DeltaFlag {
            pub fn from_code(code: i32) -> Option<Self> {
                match code {
                    $($value => Some(DeltaFlag::$variant),)+
                    _ => None,
                }
            }

            pub fn code(self) -> i32 {
                self as i32
            }

            /// Upper snake case name as written by the analyzer
            pub fn name(self) -> &'static str {
                match self {
                    $(DeltaFlag::$variant => $name),+
                }
            }

            pub fn all() -> &'static [DeltaFlag] {
                &[$(DeltaFlag::$variant),+]
            }
        }
    };
}

delta_flags! {
    AbstractToNonAbstract = 1 => "ABSTRACT_TO_NON_ABSTRACT",
    AnnotationDefaultValue = 2 => "ANNOTATION_DEFAULT_VALUE",
    ApiComponent = 3 => "API_COMPONENT",
    ArrayToVarargs = 4 => "ARRAY_TO_VARARGS",
    CheckedException = 5 => "CHECKED_EXCEPTION",
    ClassBound = 6 => "CLASS_BOUND",
    Clinit = 7 => "CLINIT",
    Constructor = 8 => "CONSTRUCTOR",
    ContractedSuperinterfacesSet = 9 => "CONTRACTED_SUPERINTERFACES_SET",
    DecreaseAccess = 10 => "DECREASE_ACCESS",
    EnumConstant = 11 => "ENUM_CONSTANT",
    ExecutionEnvironment = 12 => "EXECUTION_ENVIRONMENT",
    ExpandedSuperinterfacesSet = 13 => "EXPANDED_SUPERINTERFACES_SET",
    Field = 14 => "FIELD",
    FieldMovedUp = 15 => "FIELD_MOVED_UP",
    FinalToNonFinal = 16 => "FINAL_TO_NON_FINAL",
    FinalToNonFinalNonStatic = 17 => "FINAL_TO_NON_FINAL_NON_STATIC",
    FinalToNonFinalStaticConstant = 18 => "FINAL_TO_NON_FINAL_STATIC_CONSTANT",
    FinalToNonFinalStaticNonConstant = 19 => "FINAL_TO_NON_FINAL_STATIC_NON_CONSTANT",
    IncreaseAccess = 20 => "INCREASE_ACCESS",
    InterfaceBound = 21 => "INTERFACE_BOUND",
    InterfaceBounds = 22 => "INTERFACE_BOUNDS",
    Method = 23 => "METHOD",
    MethodMovedUp = 24 => "METHOD_MOVED_UP",
    MethodWithDefaultValue = 25 => "METHOD_WITH_DEFAULT_VALUE",
    MethodWithoutDefaultValue = 26 => "METHOD_WITHOUT_DEFAULT_VALUE",
    NativeToNonNative = 27 => "NATIVE_TO_NON_NATIVE",
    NonAbstractToAbstract = 28 => "NON_ABSTRACT_TO_ABSTRACT",
    NonFinalToFinal = 29 => "NON_FINAL_TO_FINAL",
    NonNativeToNative = 30 => "NON_NATIVE_TO_NATIVE",
    NonStaticToStatic = 31 => "NON_STATIC_TO_STATIC",
    NonSynchronizedToSynchronized = 32 => "NON_SYNCHRONIZED_TO_SYNCHRONIZED",
    NonTransientToTransient = 33 => "NON_TRANSIENT_TO_TRANSIENT",
    OverridenMethod = 34 => "OVERRIDEN_METHOD",
    StaticToNonStatic = 35 => "STATIC_TO_NON_STATIC",
    Superclass = 36 => "SUPERCLASS",
    SynchronizedToNonSynchronized = 37 => "SYNCHRONIZED_TO_NON_SYNCHRONIZED",
    ToAnnotation = 38 => "TO_ANNOTATION",
    ToClass = 39 => "TO_CLASS",
    ToEnum = 40 => "TO_ENUM",
    ToInterface = 41 => "TO_INTERFACE",
    TransientToNonTransient = 42 => "TRANSIENT_TO_NON_TRANSIENT",
    Type = 43 => "TYPE",
    TypeArguments = 44 => "TYPE_ARGUMENTS",
    TypeMember = 45 => "TYPE_MEMBER",
    TypeParameter = 46 => "TYPE_PARAMETER",
    TypeParameterName = 47 => "TYPE_PARAMETER_NAME",
    TypeParameters = 48 => "TYPE_PARAMETERS",
    TypeVisibility = 49 => "TYPE_VISIBILITY",
    UncheckedException = 50 => "UNCHECKED_EXCEPTION",
    Value = 51 => "VALUE",
    VarargsToArray = 52 => "VARARGS_TO_ARRAY",
    Restrictions = 53 => "RESTRICTIONS",
    ApiType = 54 => "API_TYPE",
    NonVolatileToVolatile = 55 => "NON_VOLATILE_TO_VOLATILE",
    VolatileToNonVolatile = 56 => "VOLATILE_TO_NON_VOLATILE",
    MajorVersion = 57 => "MAJOR_VERSION",
    MinorVersion = 58 => "MINOR_VERSION",
    ApiField = 59 => "API_FIELD",
    ApiMethod = 60 => "API_METHOD",
    ApiConstructor = 61 => "API_CONSTRUCTOR",
    ApiEnumConstant = 62 => "API_ENUM_CONSTANT",
    ApiMethodWithDefaultValue = 63 => "API_METHOD_WITH_DEFAULT_VALUE",
    ApiMethodWithoutDefaultValue = 64 => "API_METHOD_WITHOUT_DEFAULT_VALUE",
    TypeArgument = 65 => "TYPE_ARGUMENT",
    SuperInterfaceWithMethods = 66 => "SUPER_INTERFACE_WITH_METHODS",
    MethodMovedDown = 67 => "METHOD_MOVED_DOWN",
    Deprecation = 68 => "DEPRECATION",
    ReexportedType = 69 => "REEXPORTED_TYPE",
    ReexportedApiType = 70 => "REEXPORTED_API_TYPE",
    DefaultMethod = 71 => "DEFAULT_METHOD",
}

impl std::fmt::Display for DeltaFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
