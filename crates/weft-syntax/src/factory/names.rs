//! Framework type names, rooted at `global::` so generated code never
//! collides with user declarations.

use weft_core::CsTokenKind;

use crate::{syntax::TypeSyntax, token::SyntaxToken};

/// Parse a dotted name such as `System.Collections` into a name.
///
/// Empty segments are skipped; an empty input yields an empty identifier.
pub fn dotted(name: &str) -> TypeSyntax {
    let mut segments = name.split('.').filter(|segment| !segment.is_empty());
    let first = TypeSyntax::identifier(segments.next().unwrap_or_default());
    segments.fold(first, |left, segment| {
        TypeSyntax::qualified(left, TypeSyntax::identifier(segment))
    })
}

/// `global::namespace.Name<arguments>`
pub fn global(namespace: &str, name: &str, arguments: Vec<TypeSyntax>) -> TypeSyntax {
    let right = if arguments.is_empty() {
        TypeSyntax::identifier(name)
    } else {
        TypeSyntax::generic(name, arguments)
    };
    let qualified = if namespace.is_empty() {
        right
    } else {
        TypeSyntax::qualified(dotted(namespace), right)
    };
    TypeSyntax::alias_qualified(SyntaxToken::fixed(CsTokenKind::GlobalKeyword), qualified)
}

const SYSTEM: &str = "System";
const GENERIC: &str = "System.Collections.Generic";
const SERIALIZATION: &str = "System.Runtime.Serialization";
const REFLECTION: &str = "System.Reflection";
const XML: &str = "System.Xml.Linq";
const TRANSACTIONS: &str = "System.Transactions";

fn system(name: &str) -> TypeSyntax {
    global(SYSTEM, name, Vec::new())
}

pub fn object() -> TypeSyntax {
    system("Object")
}

pub fn string() -> TypeSyntax {
    system("String")
}

pub fn type_() -> TypeSyntax {
    system("Type")
}

pub fn attribute() -> TypeSyntax {
    system("Attribute")
}

pub fn attribute_usage_attribute() -> TypeSyntax {
    system("AttributeUsageAttribute")
}

pub fn attribute_targets() -> TypeSyntax {
    system("AttributeTargets")
}

pub fn list(element: TypeSyntax) -> TypeSyntax {
    global(GENERIC, "List", vec![element])
}

pub fn dictionary(key: TypeSyntax, value: TypeSyntax) -> TypeSyntax {
    global(GENERIC, "Dictionary", vec![key, value])
}

pub fn hash_set(element: TypeSyntax) -> TypeSyntax {
    global(GENERIC, "HashSet", vec![element])
}

pub fn ienumerable(element: TypeSyntax) -> TypeSyntax {
    global(GENERIC, "IEnumerable", vec![element])
}

pub fn icollection(element: TypeSyntax) -> TypeSyntax {
    global(GENERIC, "ICollection", vec![element])
}

pub fn ilist(element: TypeSyntax) -> TypeSyntax {
    global(GENERIC, "IList", vec![element])
}

pub fn key_value_pair(key: TypeSyntax, value: TypeSyntax) -> TypeSyntax {
    global(GENERIC, "KeyValuePair", vec![key, value])
}

pub fn nullable(element: TypeSyntax) -> TypeSyntax {
    global(SYSTEM, "Nullable", vec![element])
}

/// `Func<arguments..., result>`
pub fn func(mut arguments: Vec<TypeSyntax>, result: TypeSyntax) -> TypeSyntax {
    arguments.push(result);
    global(SYSTEM, "Func", arguments)
}

/// `Action` or `Action<arguments...>`
pub fn action(arguments: Vec<TypeSyntax>) -> TypeSyntax {
    global(SYSTEM, "Action", arguments)
}

pub fn lazy(element: TypeSyntax) -> TypeSyntax {
    global(SYSTEM, "Lazy", vec![element])
}

pub fn argument_null_exception() -> TypeSyntax {
    system("ArgumentNullException")
}

pub fn argument_exception() -> TypeSyntax {
    system("ArgumentException")
}

pub fn invalid_operation_exception() -> TypeSyntax {
    system("InvalidOperationException")
}

pub fn not_implemented_exception() -> TypeSyntax {
    system("NotImplementedException")
}

pub fn not_supported_exception() -> TypeSyntax {
    system("NotSupportedException")
}

pub fn data_contract_attribute() -> TypeSyntax {
    global(SERIALIZATION, "DataContractAttribute", Vec::new())
}

pub fn data_member_attribute() -> TypeSyntax {
    global(SERIALIZATION, "DataMemberAttribute", Vec::new())
}

pub fn serializable_attribute() -> TypeSyntax {
    system("SerializableAttribute")
}

pub fn non_serialized_attribute() -> TypeSyntax {
    system("NonSerializedAttribute")
}

pub fn binding_flags() -> TypeSyntax {
    global(REFLECTION, "BindingFlags", Vec::new())
}

pub fn property_info() -> TypeSyntax {
    global(REFLECTION, "PropertyInfo", Vec::new())
}

pub fn method_info() -> TypeSyntax {
    global(REFLECTION, "MethodInfo", Vec::new())
}

pub fn xname() -> TypeSyntax {
    global(XML, "XName", Vec::new())
}

pub fn xnamespace() -> TypeSyntax {
    global(XML, "XNamespace", Vec::new())
}

pub fn xelement() -> TypeSyntax {
    global(XML, "XElement", Vec::new())
}

pub fn xattribute() -> TypeSyntax {
    global(XML, "XAttribute", Vec::new())
}

pub fn transaction_scope() -> TypeSyntax {
    global(TRANSACTIONS, "TransactionScope", Vec::new())
}

pub fn transaction_scope_option() -> TypeSyntax {
    global(TRANSACTIONS, "TransactionScopeOption", Vec::new())
}

pub fn isolation_level() -> TypeSyntax {
    global(TRANSACTIONS, "IsolationLevel", Vec::new())
}

pub fn date_time() -> TypeSyntax {
    system("DateTime")
}

pub fn date_time_kind() -> TypeSyntax {
    system("DateTimeKind")
}

pub fn date_time_offset() -> TypeSyntax {
    system("DateTimeOffset")
}

pub fn time_span() -> TypeSyntax {
    system("TimeSpan")
}

pub fn guid() -> TypeSyntax {
    system("Guid")
}

pub fn uri() -> TypeSyntax {
    system("Uri")
}

pub fn uri_kind() -> TypeSyntax {
    system("UriKind")
}
