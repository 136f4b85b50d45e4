//! Python pickle parameter source
//!
//! Trained Punkt models are distributed as pickles. The unpickled value is
//! searched for the first dictionary carrying all four parameter fields, so
//! both a bare parameter dictionary and one nested inside another object's
//! state (for example under a `_params` key) are accepted. Dictionaries
//! pickled as `collections.defaultdict` or `OrderedDict` read as plain dicts.

mod normalize;

use super::traits::{ParamSource, SourceFormat};
use crate::domain::{Collocation, LoadError, ParameterSet};
use serde_pickle::{DeOptions, HashableValue, Value};
use std::collections::BTreeMap;
use std::io::Read;

const ORTHO_CONTEXT: &str = "ortho_context";
const COLLOCATIONS: &str = "collocations";
const ABBREV_TYPES: &str = "abbrev_types";
const SENT_STARTERS: &str = "sent_starters";

const FIELDS: [&str; 4] = [ORTHO_CONTEXT, COLLOCATIONS, ABBREV_TYPES, SENT_STARTERS];

type PickleDict = BTreeMap<HashableValue, Value>;

/// Reads a [`ParameterSet`] from a Python pickle
#[derive(Debug, Default, Clone, Copy)]
pub struct PickleSource;

impl ParamSource for PickleSource {
    fn format(&self) -> SourceFormat {
        SourceFormat::Pickle
    }

    fn load(&self, reader: &mut dyn Read) -> Result<ParameterSet, LoadError> {
        // Python 2 pickles store text as byte strings
        let options = DeOptions::new()
            .decode_strings()
            .replace_unresolved_globals();

        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| LoadError::decode("pickle", e))?;

        let value = serde_pickle::value_from_slice(&normalize::normalize(&bytes), options)
            .map_err(|e| LoadError::decode("pickle", e))?;

        let dict = find_parameter_dict(&value).ok_or_else(|| {
            LoadError::shape(format!(
                "no dictionary with fields {} found in pickle",
                FIELDS.join(", ")
            ))
        })?;

        parameters_from_dict(dict)
    }
}

/// Depth-first search for the first dictionary holding every parameter field
fn find_parameter_dict(value: &Value) -> Option<&PickleDict> {
    match value {
        Value::Dict(dict) => {
            if FIELDS.iter().all(|field| dict_get(dict, field).is_some()) {
                Some(dict)
            } else {
                dict.values().find_map(find_parameter_dict)
            }
        }
        Value::List(items) | Value::Tuple(items) => items.iter().find_map(find_parameter_dict),
        _ => None,
    }
}

fn dict_get<'a>(dict: &'a PickleDict, name: &str) -> Option<&'a Value> {
    dict.get(&HashableValue::String(name.to_string()))
        .or_else(|| dict.get(&HashableValue::Bytes(name.as_bytes().to_vec())))
}

fn parameters_from_dict(dict: &PickleDict) -> Result<ParameterSet, LoadError> {
    let mut params = ParameterSet::new();

    // Fields were checked by find_parameter_dict
    let field = |name: &str| {
        dict_get(dict, name).ok_or_else(|| LoadError::shape(format!("missing field {name}")))
    };

    params.ortho_context = ortho_context(field(ORTHO_CONTEXT)?)?;
    params.collocations = collocations(field(COLLOCATIONS)?)?.into_iter().collect();
    params.abbrev_types = string_members(ABBREV_TYPES, field(ABBREV_TYPES)?)?
        .into_iter()
        .collect();
    params.sent_starters = string_members(SENT_STARTERS, field(SENT_STARTERS)?)?
        .into_iter()
        .collect();

    tracing::debug!(
        ortho_context = params.ortho_context.len(),
        collocations = params.collocations.len(),
        abbrev_types = params.abbrev_types.len(),
        sent_starters = params.sent_starters.len(),
        "Decoded pickle parameters"
    );

    Ok(params)
}

fn ortho_context(value: &Value) -> Result<BTreeMap<String, i64>, LoadError> {
    let Value::Dict(dict) = value else {
        return Err(LoadError::shape(format!(
            "{ORTHO_CONTEXT} must be a dict, found {}",
            describe(value)
        )));
    };

    dict.iter()
        .map(|(key, flags)| {
            let token = hashable_string(key).ok_or_else(|| {
                LoadError::shape(format!("{ORTHO_CONTEXT} keys must be strings"))
            })?;
            let flags = match flags {
                Value::I64(n) => *n,
                Value::Bool(b) => i64::from(*b),
                Value::Int(_) => {
                    return Err(LoadError::shape(format!(
                        "{ORTHO_CONTEXT} value for \"{token}\" is out of range"
                    )))
                }
                other => {
                    return Err(LoadError::shape(format!(
                        "{ORTHO_CONTEXT} value for \"{token}\" must be an integer, found {}",
                        describe(other)
                    )))
                }
            };
            Ok((token, flags))
        })
        .collect()
}

fn collocations(value: &Value) -> Result<Vec<Collocation>, LoadError> {
    let invalid = || LoadError::shape(format!("{COLLOCATIONS} members must be pairs of strings"));

    match value {
        Value::Set(items) | Value::FrozenSet(items) => items
            .iter()
            .map(|item| match item {
                HashableValue::Tuple(parts) if parts.len() == 2 => {
                    match (hashable_string(&parts[0]), hashable_string(&parts[1])) {
                        (Some(first), Some(second)) => Ok((first, second)),
                        _ => Err(invalid()),
                    }
                }
                _ => Err(invalid()),
            })
            .collect(),
        Value::List(items) | Value::Tuple(items) => items
            .iter()
            .map(|item| match item {
                Value::Tuple(parts) | Value::List(parts) if parts.len() == 2 => {
                    match (value_string(&parts[0]), value_string(&parts[1])) {
                        (Some(first), Some(second)) => Ok((first, second)),
                        _ => Err(invalid()),
                    }
                }
                _ => Err(invalid()),
            })
            .collect(),
        other => Err(LoadError::shape(format!(
            "{COLLOCATIONS} must be a set, found {}",
            describe(other)
        ))),
    }
}

fn string_members(field: &str, value: &Value) -> Result<Vec<String>, LoadError> {
    let invalid = || LoadError::shape(format!("{field} members must be strings"));

    match value {
        Value::Set(items) | Value::FrozenSet(items) => items
            .iter()
            .map(|item| hashable_string(item).ok_or_else(invalid))
            .collect(),
        Value::List(items) | Value::Tuple(items) => items
            .iter()
            .map(|item| value_string(item).ok_or_else(invalid))
            .collect(),
        other => Err(LoadError::shape(format!(
            "{field} must be a set, found {}",
            describe(other)
        ))),
    }
}

fn hashable_string(value: &HashableValue) -> Option<String> {
    match value {
        HashableValue::String(s) => Some(s.clone()),
        HashableValue::Bytes(b) => String::from_utf8(b.clone()).ok(),
        _ => None,
    }
}

fn value_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bytes(b) => String::from_utf8(b.clone()).ok(),
        _ => None,
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::None => "None",
        Value::Bool(_) => "bool",
        Value::I64(_) | Value::Int(_) => "int",
        Value::F64(_) => "float",
        Value::Bytes(_) => "bytes",
        Value::String(_) => "str",
        Value::List(_) => "list",
        Value::Tuple(_) => "tuple",
        Value::Set(_) => "set",
        Value::FrozenSet(_) => "frozenset",
        Value::Dict(_) => "dict",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_pickle::SerOptions;
    use std::collections::BTreeSet;

    fn key(s: &str) -> HashableValue {
        HashableValue::String(s.to_string())
    }

    fn string_set(items: &[&str]) -> Value {
        Value::Set(items.iter().map(|s| key(s)).collect::<BTreeSet<_>>())
    }

    fn parameter_dict() -> PickleDict {
        let mut ortho = BTreeMap::new();
        ortho.insert(key("the"), Value::I64(2));
        ortho.insert(key("mr"), Value::I64(4));

        let pairs: BTreeSet<HashableValue> = [("new", "york"), ("los", "angeles")]
            .iter()
            .map(|(a, b)| HashableValue::Tuple(vec![key(a), key(b)]))
            .collect();

        let mut dict = BTreeMap::new();
        dict.insert(key(ORTHO_CONTEXT), Value::Dict(ortho));
        dict.insert(key(COLLOCATIONS), Value::Set(pairs));
        dict.insert(key(ABBREV_TYPES), string_set(&["dr", "mr"]));
        dict.insert(key(SENT_STARTERS), string_set(&["however"]));
        dict
    }

    #[test]
    fn test_parameters_from_dict() {
        let params = parameters_from_dict(&parameter_dict()).unwrap();

        assert_eq!(params.ortho_context["the"], 2);
        assert_eq!(params.ortho_context["mr"], 4);
        assert!(params
            .collocations
            .contains(&("los".to_string(), "angeles".to_string())));
        assert_eq!(params.abbrev_types.len(), 2);
        assert!(params.sent_starters.contains("however"));
    }

    #[test]
    fn test_find_nested_parameter_dict() {
        let mut outer = BTreeMap::new();
        outer.insert(key("_lang_vars"), Value::None);
        outer.insert(key("_params"), Value::Dict(parameter_dict()));
        let value = Value::Tuple(vec![Value::None, Value::Dict(outer)]);

        let found = find_parameter_dict(&value).unwrap();
        assert!(dict_get(found, ORTHO_CONTEXT).is_some());
    }

    #[test]
    fn test_find_parameter_dict_missing() {
        let mut dict = parameter_dict();
        dict.remove(&key(SENT_STARTERS));
        assert!(find_parameter_dict(&Value::Dict(dict)).is_none());
    }

    #[test]
    fn test_byte_string_fields() {
        let mut dict = BTreeMap::new();
        for field in FIELDS {
            let value = if field == ORTHO_CONTEXT {
                let mut ortho = BTreeMap::new();
                ortho.insert(HashableValue::Bytes(b"the".to_vec()), Value::I64(2));
                Value::Dict(ortho)
            } else {
                Value::List(vec![])
            };
            dict.insert(HashableValue::Bytes(field.as_bytes().to_vec()), value);
        }

        let params = parameters_from_dict(&dict).unwrap();
        assert_eq!(params.ortho_context["the"], 2);
    }

    #[test]
    fn test_list_members_accepted() {
        let mut dict = parameter_dict();
        dict.insert(
            key(COLLOCATIONS),
            Value::List(vec![Value::List(vec![
                Value::String("new".to_string()),
                Value::String("york".to_string()),
            ])]),
        );
        dict.insert(
            key(ABBREV_TYPES),
            Value::List(vec![Value::String("dr".to_string())]),
        );

        let params = parameters_from_dict(&dict).unwrap();
        assert_eq!(params.collocations.len(), 1);
        assert!(params.abbrev_types.contains("dr"));
    }

    #[test]
    fn test_non_integer_ortho_value_rejected() {
        let mut dict = parameter_dict();
        let mut ortho = BTreeMap::new();
        ortho.insert(key("the"), Value::F64(2.5));
        dict.insert(key(ORTHO_CONTEXT), Value::Dict(ortho));

        let err = parameters_from_dict(&dict).unwrap_err();
        assert!(err.to_string().contains("must be an integer, found float"));
    }

    #[test]
    fn test_malformed_pair_rejected() {
        let mut dict = parameter_dict();
        let pairs: BTreeSet<HashableValue> =
            [HashableValue::Tuple(vec![key("a"), key("b"), key("c")])]
                .into_iter()
                .collect();
        dict.insert(key(COLLOCATIONS), Value::Set(pairs));

        assert!(matches!(
            parameters_from_dict(&dict),
            Err(LoadError::Shape(_))
        ));
    }

    #[test]
    fn test_load_serialized_pickle() {
        let bytes =
            serde_pickle::value_to_vec(&Value::Dict(parameter_dict()), SerOptions::new()).unwrap();

        let params = PickleSource.load(&mut bytes.as_slice()).unwrap();
        assert_eq!(params.len(), 7);
    }

    #[test]
    fn test_load_truncated_pickle() {
        // Protocol header with nothing after it
        let err = PickleSource.load(&mut b"\x80\x03".as_slice()).unwrap_err();
        assert!(matches!(err, LoadError::Decode { .. }));
    }

    #[test]
    fn test_load_pickle_without_parameters() {
        let bytes = serde_pickle::value_to_vec(
            &Value::List(vec![Value::I64(1), Value::I64(2)]),
            SerOptions::new(),
        )
        .unwrap();

        let err = PickleSource.load(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, LoadError::Shape(_)));
    }

    #[test]
    fn test_load_defaultdict_ortho_context() {
        // pickle.dumps(dict with ortho_context=defaultdict(int, {"the": 2}), protocol=2)
        let bytes = b"\x80\x02}q\x00(X\x0d\x00\x00\x00ortho_contextq\x01ccollections\x0adefaul\
        tdict\x0aq\x02c__builtin__\x0along\x0aq\x03\x85q\x04Rq\x05X\x03\x00\x00\
        \x00theq\x06K\x02sX\x0c\x00\x00\x00collocationsq\x07c__builtin__\x0aset\
        \x0aq\x08]q\x09X\x03\x00\x00\x00newq\x0aX\x04\x00\x00\x00yorkq\x0b\x86q\
        \x0ca\x85q\x0dRq\x0eX\x0c\x00\x00\x00abbrev_typesq\x0fh\x08]q\x10X\x02\
        \x00\x00\x00drq\x11a\x85q\x12Rq\x13X\x0d\x00\x00\x00sent_startersq\x14h\
        \x08]q\x15\x85q\x16Rq\x17u.";

        let params = PickleSource.load(&mut bytes.as_slice()).unwrap();
        assert_eq!(params.ortho_context.len(), 1);
        assert_eq!(params.ortho_context["the"], 2);
        assert!(params
            .collocations
            .contains(&("new".to_string(), "york".to_string())));
        assert!(params.abbrev_types.contains("dr"));
        assert!(params.sent_starters.is_empty());
    }

    #[test]
    fn test_load_protocol_4_tokenizer_state() {
        // Tokenizer object with a _params attribute, pickled with protocol 4
        let bytes = b"\x80\x04\x95U\x01\x00\x00\x00\x00\x00\x00\x8c\x13nltk.tokenize.punkt\x94\
        \x8c\x16PunktSentenceTokenizer\x94\x93\x94)\x81\x94}\x94(\x8c\x07_params\
        \x94h\x00\x8c\x0fPunktParameters\x94\x93\x94)\x81\x94}\x94(\x8c\x0cabbre\
        v_types\x94\x8f\x94(\x8c\x02dr\x94\x90\x8c\x0ccollocations\x94\x8f\x94(\
        \x8c\x03new\x94\x8c\x04york\x94\x86\x94\x90\x8c\x0dsent_starters\x94\x8f\
        \x94(\x8c\x07however\x94\x90\x8c\x0dortho_context\x94\x8c\x0bcollections\
        \x94\x8c\x0bdefaultdict\x94\x93\x94\x8c\x08builtins\x94\x8c\x03int\x94\
        \x93\x94\x85\x94R\x94(\x8c\x03the\x94K\x02\x8c\x02mr\x94K\x04uub\x8c\x0a\
        _lang_vars\x94h\x00\x8c\x11PunktLanguageVars\x94\x93\x94)\x81\x94K\x01b\
        \x8c\x06_Token\x94h\x00\x8c\x0aPunktToken\x94\x93\x94ub.";

        let params = PickleSource.load(&mut bytes.as_slice()).unwrap();
        assert_eq!(params.ortho_context["the"], 2);
        assert_eq!(params.ortho_context["mr"], 4);
        assert_eq!(params.collocations.len(), 1);
        assert!(params.abbrev_types.contains("dr"));
        assert!(params.sent_starters.contains("however"));
    }

    #[test]
    fn test_load_ordered_dict_ortho_context() {
        let bytes = b"\x80\x04\x95s\x00\x00\x00\x00\x00\x00\x00}\x94(\x8c\x0dortho_context\x94\
        \x8c\x0bcollections\x94\x8c\x0bOrderedDict\x94\x93\x94)R\x94\x8c\x03the\
        \x94K\x02s\x8c\x0ccollocations\x94]\x94\x8c\x0cabbrev_types\x94]\x94\x8c\
        \x0dsent_starters\x94]\x94u.";

        let params = PickleSource.load(&mut bytes.as_slice()).unwrap();
        assert_eq!(params.ortho_context["the"], 2);
        assert_eq!(params.len(), 1);
    }
}
