//! Compilation units, directives, attributes and member declarations.
//!
//! Member lists of compilation units, namespaces and types keep only their
//! natively labelled items, so DSL-specific members can sit next to host
//! members in the same list.

use log::debug;

use weft_syntax::syntax::{
    Accessor, AccessorList, Attribute, AttributeArgument, AttributeArgumentList, AttributeList,
    AttributeTargetSpecifier, BaseList, CompilationUnit, ConstraintClause,
    ConstructorDecl, ConstructorInitializer, ConversionOperatorDecl, DelegateDecl,
    DestructorDecl, EnumDecl, EnumMemberDecl, ExplicitInterfaceSpecifier, ExternAlias, FieldDecl,
    IndexerDecl, MethodDecl, NamespaceDecl, OperatorDecl, Parameter, ParameterList,
    ParameterListKind, PropertyDecl, TypeDecl, TypeParameter, TypeParameterList, UsingDirective,
};

use super::{LowerError, Members};

pub(super) fn compilation_unit(m: &Members) -> Result<CompilationUnit, LowerError> {
    let unit = CompilationUnit {
        externs: m.native_list("Externs")?,
        usings: m.native_list("Usings")?,
        attribute_lists: m.native_list("AttributeLists")?,
        members: m.native_list("Members")?,
    };
    debug!(
        usings = unit.usings.len(),
        members = unit.members.len();
        "Compilation unit lowered"
    );
    Ok(unit)
}

pub(super) fn extern_alias(m: &Members) -> Result<ExternAlias, LowerError> {
    Ok(ExternAlias {
        identifier: m.token("Identifier")?,
    })
}

pub(super) fn using_directive(m: &Members) -> Result<UsingDirective, LowerError> {
    Ok(UsingDirective {
        static_keyword: m.optional_token("StaticKeyword")?,
        alias: m.optional("Alias")?,
        name: m.required("Name")?,
    })
}

pub(super) fn namespace(m: &Members) -> Result<NamespaceDecl, LowerError> {
    Ok(NamespaceDecl {
        name: m.required("Name")?,
        externs: m.native_list("Externs")?,
        usings: m.native_list("Usings")?,
        members: m.native_list("Members")?,
    })
}

pub(super) fn attribute_list(m: &Members) -> Result<AttributeList, LowerError> {
    Ok(AttributeList {
        target: m.optional("Target")?,
        attributes: m.separated("Attributes")?,
    })
}

pub(super) fn attribute_target(m: &Members) -> Result<AttributeTargetSpecifier, LowerError> {
    Ok(AttributeTargetSpecifier {
        identifier: m.token("Identifier")?,
    })
}

pub(super) fn attribute(m: &Members) -> Result<Attribute, LowerError> {
    Ok(Attribute {
        name: m.required("Name")?,
        arguments: m.optional("ArgumentList")?,
    })
}

pub(super) fn attribute_argument_list(m: &Members) -> Result<AttributeArgumentList, LowerError> {
    Ok(AttributeArgumentList {
        arguments: m.separated("Arguments")?,
    })
}

pub(super) fn attribute_argument(m: &Members) -> Result<AttributeArgument, LowerError> {
    Ok(AttributeArgument {
        name_equals: m.optional("NameEquals")?,
        name_colon: m.optional("NameColon")?,
        expression: m.required("Expression")?,
    })
}

/// Classes, structs and interfaces.
pub(super) fn type_decl(m: &Members) -> Result<TypeDecl, LowerError> {
    Ok(TypeDecl {
        attribute_lists: m.list("AttributeLists")?,
        modifiers: m.tokens("Modifiers")?,
        identifier: m.token("Identifier")?,
        type_parameters: m.optional("TypeParameterList")?,
        base_list: m.optional("BaseList")?,
        constraint_clauses: m.list("ConstraintClauses")?,
        members: m.native_list("Members")?,
    })
}

pub(super) fn enum_decl(m: &Members) -> Result<EnumDecl, LowerError> {
    Ok(EnumDecl {
        attribute_lists: m.list("AttributeLists")?,
        modifiers: m.tokens("Modifiers")?,
        identifier: m.token("Identifier")?,
        base_list: m.optional("BaseList")?,
        members: m.separated("Members")?,
    })
}

pub(super) fn enum_member(m: &Members) -> Result<EnumMemberDecl, LowerError> {
    Ok(EnumMemberDecl {
        attribute_lists: m.list("AttributeLists")?,
        identifier: m.token("Identifier")?,
        equals_value: m.optional("EqualsValue")?,
    })
}

pub(super) fn delegate(m: &Members) -> Result<DelegateDecl, LowerError> {
    Ok(DelegateDecl {
        attribute_lists: m.list("AttributeLists")?,
        modifiers: m.tokens("Modifiers")?,
        return_type: m.required("ReturnType")?,
        identifier: m.token("Identifier")?,
        type_parameters: m.optional("TypeParameterList")?,
        parameters: m.required("ParameterList")?,
        constraint_clauses: m.list("ConstraintClauses")?,
    })
}

pub(super) fn type_parameter_list(m: &Members) -> Result<TypeParameterList, LowerError> {
    Ok(TypeParameterList {
        parameters: m.separated("Parameters")?,
    })
}

pub(super) fn type_parameter(m: &Members) -> Result<TypeParameter, LowerError> {
    Ok(TypeParameter {
        attribute_lists: m.list("AttributeLists")?,
        variance: m.optional_token("VarianceKeyword")?,
        identifier: m.token("Identifier")?,
    })
}

pub(super) fn base_list(m: &Members) -> Result<BaseList, LowerError> {
    Ok(BaseList {
        types: m.separated("Types")?,
    })
}

pub(super) fn constraint_clause(m: &Members) -> Result<ConstraintClause, LowerError> {
    Ok(ConstraintClause {
        name: m.required("Name")?,
        constraints: m.separated("Constraints")?,
    })
}

/// Fields and event fields.
pub(super) fn field(m: &Members) -> Result<FieldDecl, LowerError> {
    Ok(FieldDecl {
        attribute_lists: m.list("AttributeLists")?,
        modifiers: m.tokens("Modifiers")?,
        declaration: m.required("Declaration")?,
    })
}

pub(super) fn method(m: &Members) -> Result<MethodDecl, LowerError> {
    Ok(MethodDecl {
        attribute_lists: m.list("AttributeLists")?,
        modifiers: m.tokens("Modifiers")?,
        return_type: m.required("ReturnType")?,
        explicit_interface: m.optional("ExplicitInterfaceSpecifier")?,
        identifier: m.token("Identifier")?,
        type_parameters: m.optional("TypeParameterList")?,
        parameters: m.required("ParameterList")?,
        constraint_clauses: m.list("ConstraintClauses")?,
        body: m.optional("Body")?,
    })
}

pub(super) fn explicit_interface(m: &Members) -> Result<ExplicitInterfaceSpecifier, LowerError> {
    Ok(ExplicitInterfaceSpecifier {
        name: m.required("Name")?,
    })
}

pub(super) fn operator(m: &Members) -> Result<OperatorDecl, LowerError> {
    Ok(OperatorDecl {
        attribute_lists: m.list("AttributeLists")?,
        modifiers: m.tokens("Modifiers")?,
        return_type: m.required("ReturnType")?,
        operator: m.token("OperatorToken")?,
        parameters: m.required("ParameterList")?,
        body: m.optional("Body")?,
    })
}

pub(super) fn conversion_operator(m: &Members) -> Result<ConversionOperatorDecl, LowerError> {
    Ok(ConversionOperatorDecl {
        attribute_lists: m.list("AttributeLists")?,
        modifiers: m.tokens("Modifiers")?,
        implicit_or_explicit: m.token("ImplicitOrExplicitKeyword")?,
        ty: m.required("Type")?,
        parameters: m.required("ParameterList")?,
        body: m.optional("Body")?,
    })
}

pub(super) fn constructor(m: &Members) -> Result<ConstructorDecl, LowerError> {
    Ok(ConstructorDecl {
        attribute_lists: m.list("AttributeLists")?,
        modifiers: m.tokens("Modifiers")?,
        identifier: m.token("Identifier")?,
        parameters: m.required("ParameterList")?,
        initializer: m.optional("Initializer")?,
        body: m.optional("Body")?,
    })
}

pub(super) fn constructor_initializer(m: &Members) -> Result<ConstructorInitializer, LowerError> {
    Ok(ConstructorInitializer {
        this_or_base: m.token("ThisOrBaseKeyword")?,
        arguments: m.required("ArgumentList")?,
    })
}

pub(super) fn destructor(m: &Members) -> Result<DestructorDecl, LowerError> {
    Ok(DestructorDecl {
        attribute_lists: m.list("AttributeLists")?,
        modifiers: m.tokens("Modifiers")?,
        identifier: m.token("Identifier")?,
        body: m.optional("Body")?,
    })
}

/// Properties and events with accessors.
pub(super) fn property(m: &Members) -> Result<PropertyDecl, LowerError> {
    Ok(PropertyDecl {
        attribute_lists: m.list("AttributeLists")?,
        modifiers: m.tokens("Modifiers")?,
        ty: m.required("Type")?,
        explicit_interface: m.optional("ExplicitInterfaceSpecifier")?,
        identifier: m.token("Identifier")?,
        accessors: m.required("AccessorList")?,
    })
}

pub(super) fn indexer(m: &Members) -> Result<IndexerDecl, LowerError> {
    Ok(IndexerDecl {
        attribute_lists: m.list("AttributeLists")?,
        modifiers: m.tokens("Modifiers")?,
        ty: m.required("Type")?,
        explicit_interface: m.optional("ExplicitInterfaceSpecifier")?,
        parameters: m.required("ParameterList")?,
        accessors: m.required("AccessorList")?,
    })
}

pub(super) fn accessor_list(m: &Members) -> Result<AccessorList, LowerError> {
    Ok(AccessorList {
        accessors: m.list("Accessors")?,
    })
}

pub(super) fn accessor(m: &Members) -> Result<Accessor, LowerError> {
    Ok(Accessor {
        attribute_lists: m.list("AttributeLists")?,
        modifiers: m.tokens("Modifiers")?,
        keyword: m.token("Keyword")?,
        body: m.optional("Body")?,
    })
}

pub(super) fn parameter_list(
    m: &Members,
    kind: ParameterListKind,
) -> Result<ParameterList, LowerError> {
    Ok(ParameterList {
        kind,
        parameters: m.separated("Parameters")?,
    })
}

pub(super) fn parameter(m: &Members) -> Result<Parameter, LowerError> {
    Ok(Parameter {
        attribute_lists: m.list("AttributeLists")?,
        modifiers: m.tokens("Modifiers")?,
        ty: m.optional("Type")?,
        identifier: m.token("Identifier")?,
        default: m.optional("Default")?,
    })
}
