//! Identifier derivation for generated classes, attributes and modules.

use heck::ToSnakeCase;

/// Convert an item name to its class name.
///
/// Title-cases the name (a cased character is uppercased when it follows an
/// uncased one and lowercased otherwise), then drops underscores.
/// Digits and acronyms get no special treatment:
/// `"lr_decay"` -> `"LrDecay"`, `"layer2norm"` -> `"Layer2Norm"`, `"HTTP_proxy"` -> `"HttpProxy"`.
pub fn to_class_name(name: &str) -> String {
    let mut result: String = String::with_capacity(name.len());
    let mut previous_cased: bool = false;
    for c in name.chars() {
        let cased: bool = c.is_uppercase() || c.is_lowercase();
        if c == '_' {
            previous_cased = false;
            continue;
        }
        if cased && previous_cased {
            result.extend(c.to_lowercase());
        } else if cased {
            result.extend(c.to_uppercase());
        } else {
            result.push(c);
        }
        previous_cased = cased;
    }
    result
}

/// Sanitize a property key for use as a Python attribute name.
/// Every character that is not ASCII alphanumeric or `_` becomes `_`.
pub fn to_attribute_name(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Convert a schema file stem to an importable Python module name.
pub fn to_module_name(stem: &str) -> String {
    stem.to_snake_case()
}
