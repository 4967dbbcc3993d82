use crate::model::{DeltaEntry, DeltaFlag, ElementKind};

/// How an entry's locator is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderStrategy {
    /// `Type#Ret name(P1, P2)`
    MethodSignature,
    /// `Type#Simple(P1, P2)`
    ConstructorSignature,
    /// `Type#key`
    VerbatimMember,
    /// `Type.key`
    TypeMember,
    /// Bare owning type name
    TypeNameOnly,
    /// Message template bound to the entry's arguments
    TemplatedMessage,
    /// The key itself, for bundle level entries
    BaselineKey,
    /// Empty locator; the entry still gets a line
    Empty,
    /// No line at all
    Unrenderable,
}

/// Pick the rendering strategy from `(flag, element type)` and whether a type name is present
pub fn select_strategy(entry: &DeltaEntry) -> RenderStrategy {
    let has_parameters = entry.key.contains('(');

    if entry.is_baseline_level() {
        return match entry.flag() {
            Some(DeltaFlag::MajorVersion | DeltaFlag::MinorVersion) => {
                RenderStrategy::TemplatedMessage
            }
            Some(DeltaFlag::ApiComponent) => RenderStrategy::BaselineKey,
            _ => RenderStrategy::Empty,
        };
    }

    let signature = |strategy: RenderStrategy| {
        if has_parameters {
            strategy
        } else {
            RenderStrategy::Unrenderable
        }
    };

    match entry.flag() {
        Some(
            DeltaFlag::Method
            | DeltaFlag::MethodWithDefaultValue
            | DeltaFlag::MethodWithoutDefaultValue
            | DeltaFlag::ApiMethod
            | DeltaFlag::ApiMethodWithDefaultValue
            | DeltaFlag::ApiMethodWithoutDefaultValue,
        ) => signature(RenderStrategy::MethodSignature),
        Some(DeltaFlag::Constructor | DeltaFlag::ApiConstructor) => {
            signature(RenderStrategy::ConstructorSignature)
        }
        Some(
            DeltaFlag::Field
            | DeltaFlag::ApiField
            | DeltaFlag::EnumConstant
            | DeltaFlag::ApiEnumConstant,
        ) => RenderStrategy::VerbatimMember,
        Some(
            DeltaFlag::TypeMember
            | DeltaFlag::ApiType
            | DeltaFlag::ReexportedType
            | DeltaFlag::ReexportedApiType,
        ) => RenderStrategy::TypeMember,
        Some(DeltaFlag::IncreaseAccess) if has_parameters => RenderStrategy::MethodSignature,
        Some(DeltaFlag::IncreaseAccess) => RenderStrategy::VerbatimMember,
        Some(DeltaFlag::Deprecation) => match entry.element_type {
            kind if kind.is_type_like() => RenderStrategy::TypeMember,
            ElementKind::Constructor => signature(RenderStrategy::ConstructorSignature),
            ElementKind::Method => signature(RenderStrategy::MethodSignature),
            ElementKind::Field => RenderStrategy::VerbatimMember,
            _ => RenderStrategy::TypeNameOnly,
        },
        _ => RenderStrategy::TypeNameOnly,
    }
}
