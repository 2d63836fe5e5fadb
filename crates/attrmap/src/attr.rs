//! Attribute-name derivation.
//!
//! Every key in an [`AttrMap`](crate::AttrMap) gets an identifier-shaped
//! attribute alias. The alias is the key with every run of characters outside
//! `[letters, digits, _]` collapsed to a single `_`, prefixed with `int_` when
//! the key starts with a digit.

/// Derives the attribute name for a key.
///
/// ```
/// use attrmap::attr_name_for_key;
///
/// assert_eq!(attr_name_for_key("test123-456.7"), "test123_456_7");
/// assert_eq!(attr_name_for_key("2abc345"), "int_2abc345");
/// assert_eq!(attr_name_for_key("foo-: '2.4;"), "foo_2_4_");
/// ```
pub fn attr_name_for_key(key: &str) -> String {
    let mut name = String::with_capacity(key.len() + 4);
    if key.starts_with(|c: char| c.is_numeric()) {
        name.push_str("int_");
    }
    let mut last_was_separator = false;
    for c in key.chars() {
        if c.is_alphanumeric() || c == '_' {
            name.push(c);
            last_was_separator = false;
        } else if !last_was_separator {
            name.push('_');
            last_was_separator = true;
        }
    }
    name
}
