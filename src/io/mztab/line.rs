//! Format-agnostic decoders for the line shapes shared by the metadata
//! handlers: `SECTION<TAB>key<TAB>value`, `SECTION<TAB>key[index]-property
//! <TAB>value` and `SECTION<TAB>key[index]-property[subIndex]<TAB>value`.
//! The decoders know nothing about which item they are decoding; the
//! handlers layer the item semantics on top.
use thiserror::Error;

use crate::meta::{MzTabModeError, MzTabTypeError};
use crate::params::CvParamError;

/// Shape-level failures raised while decoding a single line. These carry no
/// position; the reader attaches the line number and byte offset when it
/// wraps them into [`MzTabError`](crate::MzTabError).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineDecodeError {
    #[error("Expected at least 3 tab-separated fields, found {found}")]
    MissingFields { found: usize },
    #[error("The line-item key is empty")]
    EmptyKey,
    #[error("Missing index on `{key}`")]
    MissingIndex { key: String },
    #[error("Index on `{key}` is not a non-negative integer: {found:?}")]
    MalformedIndex { key: String, found: String },
    #[error("Missing sub-index on property `{property}` of `{key}`")]
    MissingSubIndex { key: String, property: String },
    #[error("Sub-index on property `{property}` of `{key}` is not a non-negative integer: {found:?}")]
    MalformedSubIndex {
        key: String,
        property: String,
        found: String,
    },
    #[error("Malformed line-item key `{key}`")]
    MalformedKey { key: String },
    #[error("Missing property on `{key}`")]
    MissingProperty { key: String },
    #[error("Expected a `{target}[n]` reference, found {found:?}")]
    MalformedReference { target: &'static str, found: String },
    #[error(transparent)]
    Param(#[from] CvParamError),
    #[error(transparent)]
    Mode(#[from] MzTabModeError),
    #[error(transparent)]
    Type(#[from] MzTabTypeError),
}

/// The decoded form of a `SECTION<TAB>key<TAB>value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScalarItem<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

/// The decoded form of a `SECTION<TAB>key[index](-property)?<TAB>value`
/// line. `property` is `None` for a bare `key[index]` value assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IndexedItem<'a> {
    pub key: &'a str,
    pub index: u32,
    pub property: Option<&'a str>,
    pub value: &'a str,
}

/// The decoded form of a `SECTION<TAB>key[index]-property[subIndex]<TAB>
/// value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SubIndexedItem<'a> {
    pub key: &'a str,
    pub index: u32,
    pub property: &'a str,
    pub sub_index: u32,
    pub value: &'a str,
}

/// Splits a line into its `(key, value)` fields, after verifying the section
/// prefix. The value is the remainder of the line: the format forbids
/// embedded tabs, so any extra tab is treated as part of the value.
fn split_item_fields<'a>(
    line: &'a str,
    section: &str,
) -> Result<Option<(&'a str, &'a str)>, LineDecodeError> {
    if line.is_empty() {
        return Ok(None);
    }
    let mut fields = line.splitn(3, '\t');
    match fields.next() {
        Some(prefix) if prefix == section => {}
        _ => return Ok(None),
    }
    let key = fields
        .next()
        .ok_or(LineDecodeError::MissingFields { found: 1 })?;
    let value = fields
        .next()
        .ok_or(LineDecodeError::MissingFields { found: 2 })?;
    if key.is_empty() {
        return Err(LineDecodeError::EmptyKey);
    }
    Ok(Some((key, value)))
}

/// The raw key field of a line, used by handlers for cheap rejection before
/// any validation runs. `None` when the line is empty, belongs to another
/// section, or has no key field at all.
pub(crate) fn key_field<'a>(line: &'a str, section: &str) -> Option<&'a str> {
    let mut fields = line.splitn(3, '\t');
    if fields.next()? != section {
        return None;
    }
    fields.next()
}

/// The item name of a line-item key: everything before the first `[` or `-`.
pub(crate) fn item_name(key: &str) -> &str {
    &key[..key.find(['[', '-']).unwrap_or(key.len())]
}

/// The property name of a line-item key, stripped of any sub-index suffix,
/// or `None` when the key carries no property segment. Tolerant of malformed
/// indices so that handlers can match the name before validation runs.
pub(crate) fn property_name(key: &str) -> Option<&str> {
    let start = match key.find(']') {
        Some(at) => at + 1,
        None => 0,
    };
    let dash = key[start..].find('-')? + start;
    let property = &key[dash + 1..];
    Some(&property[..property.find('[').unwrap_or(property.len())])
}

/// Validates a `key[index]` shape with an optional `-property` tail.
fn parse_indexed_key(key: &str) -> Result<(&str, u32, Option<&str>), LineDecodeError> {
    let open = key.find('[').ok_or_else(|| LineDecodeError::MissingIndex {
        key: key.to_string(),
    })?;
    let name = &key[..open];
    if name.is_empty() {
        return Err(LineDecodeError::EmptyKey);
    }
    // the closing bracket is searched from the opening one, so a bracketed
    // property suffix cannot shadow it
    let close = key[open..]
        .find(']')
        .map(|at| at + open)
        .ok_or_else(|| LineDecodeError::MalformedIndex {
            key: key.to_string(),
            found: key[open + 1..].to_string(),
        })?;
    let raw = &key[open + 1..close];
    if raw.is_empty() {
        return Err(LineDecodeError::MissingIndex {
            key: key.to_string(),
        });
    }
    let index = raw.parse().map_err(|_| LineDecodeError::MalformedIndex {
        key: key.to_string(),
        found: raw.to_string(),
    })?;
    let rest = &key[close + 1..];
    let property = match rest.strip_prefix('-') {
        Some(property) => Some(property),
        None if rest.is_empty() => None,
        None => {
            return Err(LineDecodeError::MalformedKey {
                key: key.to_string(),
            })
        }
    };
    Ok((name, index, property))
}

/// Validates a `key[index]-property[subIndex]` shape.
fn parse_sub_indexed_key(key: &str) -> Result<(&str, u32, &str, u32), LineDecodeError> {
    let (name, index, property) = parse_indexed_key(key)?;
    let property = property.ok_or_else(|| LineDecodeError::MissingProperty {
        key: key.to_string(),
    })?;
    let open = property
        .find('[')
        .ok_or_else(|| LineDecodeError::MissingSubIndex {
            key: name.to_string(),
            property: property.to_string(),
        })?;
    let property_name = &property[..open];
    let close = property[open..]
        .find(']')
        .map(|at| at + open)
        .ok_or_else(|| LineDecodeError::MalformedSubIndex {
            key: name.to_string(),
            property: property_name.to_string(),
            found: property[open + 1..].to_string(),
        })?;
    let raw = &property[open + 1..close];
    if raw.is_empty() {
        return Err(LineDecodeError::MissingSubIndex {
            key: name.to_string(),
            property: property_name.to_string(),
        });
    }
    let sub_index = raw
        .parse()
        .map_err(|_| LineDecodeError::MalformedSubIndex {
            key: name.to_string(),
            property: property_name.to_string(),
            found: raw.to_string(),
        })?;
    if !property[close + 1..].is_empty() {
        return Err(LineDecodeError::MalformedKey {
            key: key.to_string(),
        });
    }
    Ok((name, index, property_name, sub_index))
}

/// Decodes a `SECTION<TAB>key<TAB>value` line. `Ok(None)` means the line is
/// empty or belongs to another section; a present but malformed line is an
/// error.
pub(crate) fn decode_scalar<'a>(
    line: &'a str,
    section: &str,
) -> Result<Option<ScalarItem<'a>>, LineDecodeError> {
    match split_item_fields(line, section)? {
        Some((key, value)) => Ok(Some(ScalarItem { key, value })),
        None => Ok(None),
    }
}

/// Decodes a `SECTION<TAB>key[index](-property)?<TAB>value` line.
pub(crate) fn decode_indexed<'a>(
    line: &'a str,
    section: &str,
) -> Result<Option<IndexedItem<'a>>, LineDecodeError> {
    let Some((key, value)) = split_item_fields(line, section)? else {
        return Ok(None);
    };
    let (name, index, property) = parse_indexed_key(key)?;
    Ok(Some(IndexedItem {
        key: name,
        index,
        property,
        value,
    }))
}

/// Decodes a `SECTION<TAB>key[index]-property[subIndex]<TAB>value` line.
pub(crate) fn decode_sub_indexed<'a>(
    line: &'a str,
    section: &str,
) -> Result<Option<SubIndexedItem<'a>>, LineDecodeError> {
    let Some((key, value)) = split_item_fields(line, section)? else {
        return Ok(None);
    };
    let (name, index, property, sub_index) = parse_sub_indexed_key(key)?;
    Ok(Some(SubIndexedItem {
        key: name,
        index,
        property,
        sub_index,
        value,
    }))
}

/// Parses a `target[n]` reference literal, e.g. `sample[2]`.
pub(crate) fn parse_reference(value: &str, target: &'static str) -> Result<u32, LineDecodeError> {
    let malformed = || LineDecodeError::MalformedReference {
        target,
        found: value.to_string(),
    };
    let inner = value
        .trim()
        .strip_prefix(target)
        .and_then(|rest| rest.strip_prefix('['))
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(malformed)?;
    inner.parse().map_err(|_| malformed())
}

/// Parses a comma-separated list of `target[n]` reference literals.
pub(crate) fn parse_reference_list(
    value: &str,
    target: &'static str,
) -> Result<Vec<u32>, LineDecodeError> {
    value
        .split(',')
        .map(|entry| parse_reference(entry, target))
        .collect()
}
