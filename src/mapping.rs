//! Static mapping between Swagger types/formats and Go types.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

/// Go type of open-ended values.
pub const IFACE: &str = "interface{}";

/// Swagger type or format -> Go type.
///
/// Format keys are stored without hyphens (`date-time` is looked up as
/// `datetime`).
pub static TYPE_MAPPING: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // strfmt formats
        ("byte", "strfmt.Base64"),
        ("date", "strfmt.Date"),
        ("datetime", "strfmt.DateTime"),
        ("uri", "strfmt.URI"),
        ("email", "strfmt.Email"),
        ("hostname", "strfmt.Hostname"),
        ("ipv4", "strfmt.IPv4"),
        ("ipv6", "strfmt.IPv6"),
        ("cidr", "strfmt.CIDR"),
        ("mac", "strfmt.MAC"),
        ("uuid", "strfmt.UUID"),
        ("uuid3", "strfmt.UUID3"),
        ("uuid4", "strfmt.UUID4"),
        ("uuid5", "strfmt.UUID5"),
        ("isbn", "strfmt.ISBN"),
        ("isbn10", "strfmt.ISBN10"),
        ("isbn13", "strfmt.ISBN13"),
        ("creditcard", "strfmt.CreditCard"),
        ("ssn", "strfmt.SSN"),
        ("hexcolor", "strfmt.HexColor"),
        ("rgbcolor", "strfmt.RGBColor"),
        ("duration", "strfmt.Duration"),
        ("bsonobjectid", "strfmt.ObjectId"),
        ("password", "strfmt.Password"),
        // sized numbers
        ("int8", "int8"),
        ("int16", "int16"),
        ("int32", "int32"),
        ("int64", "int64"),
        ("uint8", "uint8"),
        ("uint16", "uint16"),
        ("uint32", "uint32"),
        ("uint64", "uint64"),
        ("float", "float32"),
        ("double", "float64"),
        // plain swagger types
        ("number", "float64"),
        ("integer", "int64"),
        ("boolean", "bool"),
        // streams
        ("binary", "io.ReadCloser"),
    ])
});

/// Go type -> swagger type or format, for diagnostics.
///
/// Several keys map to the same Go type (`double` and `number`); the
/// alphabetically last key wins so the table is deterministic.
pub static SWAGGER_TYPE_NAME: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut reverse: HashMap<&'static str, &'static str> = HashMap::new();
    for (&k, &v) in TYPE_MAPPING.iter() {
        let entry = reverse.entry(v).or_insert(k);
        if k > *entry {
            *entry = k;
        }
    }
    reverse
});

/// Go types that need custom (de)serialization.
pub static CUSTOM_FORMATTERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    let mut set: HashSet<&'static str> = TYPE_MAPPING
        .values()
        .copied()
        .filter(|t| t.starts_with("strfmt."))
        .collect();
    set.insert("io.ReadCloser");
    set
});

/// Go builtin scalar types.
pub static PRIMITIVES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "bool",
        "uint",
        "uint8",
        "uint16",
        "uint32",
        "uint64",
        "int",
        "int8",
        "int16",
        "int32",
        "int64",
        "float32",
        "float64",
        "string",
        "complex64",
        "complex128",
        "byte",
        "[]byte",
        "rune",
    ])
});

/// Well-known zero literals by Go type.
pub static ZEROES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("bool", "false"),
        ("float32", "0"),
        ("float64", "0"),
        ("int", "0"),
        ("int8", "0"),
        ("int16", "0"),
        ("int32", "0"),
        ("int64", "0"),
        ("uint", "0"),
        ("uint8", "0"),
        ("uint16", "0"),
        ("uint32", "0"),
        ("uint64", "0"),
        ("string", "\"\""),
        ("strfmt.Base64", "strfmt.Base64([]byte(nil))"),
        ("strfmt.CIDR", "strfmt.CIDR(\"\")"),
        ("strfmt.CreditCard", "strfmt.CreditCard(\"\")"),
        ("strfmt.Date", "strfmt.Date{}"),
        ("strfmt.DateTime", "strfmt.DateTime{}"),
        ("strfmt.Duration", "strfmt.Duration(0)"),
        ("strfmt.Email", "strfmt.Email(\"\")"),
        ("strfmt.HexColor", "strfmt.HexColor(\"#000000\")"),
        ("strfmt.Hostname", "strfmt.Hostname(\"\")"),
        ("strfmt.IPv4", "strfmt.IPv4(\"\")"),
        ("strfmt.IPv6", "strfmt.IPv6(\"\")"),
        ("strfmt.ISBN", "strfmt.ISBN(\"\")"),
        ("strfmt.ISBN10", "strfmt.ISBN10(\"\")"),
        ("strfmt.ISBN13", "strfmt.ISBN13(\"\")"),
        ("strfmt.MAC", "strfmt.MAC(\"\")"),
        ("strfmt.ObjectId", "strfmt.ObjectId{}"),
        ("strfmt.Password", "strfmt.Password(\"\")"),
        ("strfmt.RGBColor", "strfmt.RGBColor(\"rgb(0,0,0)\")"),
        ("strfmt.SSN", "strfmt.SSN(\"\")"),
        ("strfmt.URI", "strfmt.URI(\"\")"),
        ("strfmt.UUID", "strfmt.UUID(\"\")"),
        ("strfmt.UUID3", "strfmt.UUID3(\"\")"),
        ("strfmt.UUID4", "strfmt.UUID4(\"\")"),
        ("strfmt.UUID5", "strfmt.UUID5(\"\")"),
        ("io.ReadCloser", "io.ReadCloser(nil)"),
    ])
});

/// Strip hyphens from a format so `date-time` matches `datetime`.
pub fn normalize_format(format: &str) -> String {
    format.replace('-', "")
}

/// Go type for a swagger type or (normalized) format.
pub fn go_type_for(key: &str) -> Option<&'static str> {
    TYPE_MAPPING.get(key).copied()
}

/// Go type for a format as written in a schema.
pub fn go_type_for_format(format: &str) -> Option<&'static str> {
    go_type_for(&normalize_format(format))
}

pub fn is_custom_formatter(go_type: &str) -> bool {
    CUSTOM_FORMATTERS.contains(go_type)
}

pub fn is_primitive(go_type: &str) -> bool {
    PRIMITIVES.contains(go_type)
}

pub fn zero_literal(go_type: &str) -> Option<&'static str> {
    ZEROES.get(go_type).copied()
}

/// Swagger type or format a Go type was mapped from.
pub fn swagger_type_name(go_type: &str) -> Option<&'static str> {
    SWAGGER_TYPE_NAME.get(go_type).copied()
}
