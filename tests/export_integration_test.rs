//! Integration tests for loading parameter files and exporting documents

use punkt_export::adapters::source::{load_parameters, SourceFormat};
use punkt_export::core::export::{
    build_document, export, ExportOptions, KeyPolicy, OutputStyle,
};
use punkt_export::domain::{ExportDocument, LoadError, ParameterSet, PunktError};
use serde_pickle::{HashableValue, SerOptions, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use test_case::test_case;

fn sample_params() -> ParameterSet {
    ParameterSet::builder()
        .ortho_context("the", 2)
        .ortho_context("mr", 4)
        .collocation("new", "york")
        .collocation("los", "angeles")
        .abbrev_type("dr")
        .abbrev_type("mr")
        .sent_starter("however")
        .build()
}

fn key(s: &str) -> HashableValue {
    HashableValue::String(s.to_string())
}

/// Pickled dict with the same content as `sample_params`
fn sample_pickle_dict() -> Value {
    let mut ortho = BTreeMap::new();
    ortho.insert(key("the"), Value::I64(2));
    ortho.insert(key("mr"), Value::I64(4));

    let pairs: BTreeSet<HashableValue> = [("new", "york"), ("los", "angeles")]
        .iter()
        .map(|(a, b)| HashableValue::Tuple(vec![key(a), key(b)]))
        .collect();

    let mut dict = BTreeMap::new();
    dict.insert(key("ortho_context"), Value::Dict(ortho));
    dict.insert(key("collocations"), Value::Set(pairs));
    dict.insert(
        key("abbrev_types"),
        Value::Set([key("dr"), key("mr")].into_iter().collect()),
    );
    dict.insert(
        key("sent_starters"),
        Value::Set([key("however")].into_iter().collect()),
    );
    Value::Dict(dict)
}

/// `PunktSentenceTokenizer` pickled by CPython with protocol 2. The
/// parameters live under `_params` and `ortho_context` is a
/// `defaultdict(int)` holding {"the": 2, "mr": 4}.
const TOKENIZER_PICKLE: &[u8] = b"\x80\x02cnltk.tokenize.punkt\x0aPunktSentenceTokenizer\x0aq\x00)\x81q\
    \x01}q\x02(X\x07\x00\x00\x00_paramsq\x03cnltk.tokenize.punkt\x0aPunktPar\
    ameters\x0aq\x04)\x81q\x05}q\x06(X\x0c\x00\x00\x00abbrev_typesq\x07c__bu\
    iltin__\x0aset\x0aq\x08]q\x09X\x02\x00\x00\x00drq\x0aa\x85q\x0bRq\x0cX\
    \x0c\x00\x00\x00collocationsq\x0dh\x08]q\x0eX\x03\x00\x00\x00newq\x0fX\
    \x04\x00\x00\x00yorkq\x10\x86q\x11a\x85q\x12Rq\x13X\x0d\x00\x00\x00sent_\
    startersq\x14h\x08]q\x15X\x07\x00\x00\x00howeverq\x16a\x85q\x17Rq\x18X\
    \x0d\x00\x00\x00ortho_contextq\x19ccollections\x0adefaultdict\x0aq\x1ac_\
    _builtin__\x0along\x0aq\x1b\x85q\x1cRq\x1d(X\x03\x00\x00\x00theq\x1eK\
    \x02X\x02\x00\x00\x00mrq\x1fK\x04uubX\x0a\x00\x00\x00_lang_varsq\x20cnlt\
    k.tokenize.punkt\x0aPunktLanguageVars\x0aq!)\x81q\x22K\x01bX\x06\x00\x00\
    \x00_Tokenq#cnltk.tokenize.punkt\x0aPunktToken\x0aq$ub.";

fn write_fixture(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, bytes).unwrap();
    path
}

fn compact(params: &ParameterSet) -> String {
    export(params, &ExportOptions::default()).unwrap()
}

#[test]
fn test_empty_parameter_set() {
    assert_eq!(
        compact(&ParameterSet::new()),
        r#"{"OrthoContext": {},"Colocations": {},"AbbrevTypes": {},"SentStarters": {}}"#
    );
}

#[test]
fn test_compact_layout() {
    assert_eq!(
        compact(&sample_params()),
        concat!(
            r#"{"OrthoContext": {"mr": 4, "the": 2},"#,
            r#""Colocations": {"los,angeles": 1, "new,york": 1},"#,
            r#""AbbrevTypes": {"dr": 1, "mr": 1},"#,
            r#""SentStarters": {"however": 1}}"#
        )
    );
}

#[test]
fn test_output_is_valid_json_with_fixed_group_order() {
    let text = compact(&sample_params());
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value.as_object().unwrap().len(), 4);

    let positions: Vec<usize> = ["OrthoContext", "Colocations", "AbbrevTypes", "SentStarters"]
        .iter()
        .map(|k| text.find(&format!("\"{k}\"")).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_pretty_has_same_content() {
    let params = sample_params();
    let pretty = export(
        &params,
        &ExportOptions::new(OutputStyle::Pretty, KeyPolicy::Overwrite),
    )
    .unwrap();
    assert!(pretty.contains('\n'));

    let from_pretty: ExportDocument = serde_json::from_str(&pretty).unwrap();
    let from_compact: ExportDocument = serde_json::from_str(&compact(&params)).unwrap();
    assert_eq!(from_pretty, from_compact);
}

#[test]
fn test_set_groups_use_presence_flag() {
    let doc = build_document(&sample_params(), KeyPolicy::Overwrite).unwrap();
    assert!(doc.colocations.values().all(|v| *v == 1));
    assert!(doc.abbrev_types.values().all(|v| *v == 1));
    assert!(doc.sent_starters.values().all(|v| *v == 1));
    assert_eq!(doc.ortho_context["mr"], 4);
}

#[test_case("say \"hi\"", r#""say \"hi\"": 1"# ; "quotes")]
#[test_case("back\\slash", r#""back\\slash": 1"# ; "backslash")]
#[test_case("tab\there", r#""tab\there": 1"# ; "control character")]
#[test_case("naïve", r#""naïve": 1"# ; "non-ascii kept verbatim")]
fn test_key_escaping(token: &str, expected: &str) {
    let params = ParameterSet::builder().abbrev_type(token).build();
    let text = compact(&params);
    assert!(text.contains(expected), "{text}");
    serde_json::from_str::<serde_json::Value>(&text).unwrap();
}

#[test]
fn test_collocation_collision_overwrites_by_default() {
    let params = ParameterSet::builder()
        .collocation("a,b", "c")
        .collocation("a", "b,c")
        .build();

    let doc = build_document(&params, KeyPolicy::Overwrite).unwrap();
    assert_eq!(doc.colocations.len(), 1);
    assert_eq!(doc.colocations["a,b,c"], 1);
}

#[test]
fn test_collocation_collision_rejected_in_strict_mode() {
    let params = ParameterSet::builder()
        .collocation("a,b", "c")
        .collocation("a", "b,c")
        .build();

    let err = build_document(&params, KeyPolicy::Strict).unwrap_err();
    match err {
        PunktError::KeyCollision { group, key } => {
            assert_eq!(group, "Colocations");
            assert_eq!(key, "a,b,c");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_ambiguous_collocation_rejected_in_strict_mode() {
    let params = ParameterSet::builder().collocation("a,b", "c").build();

    assert!(build_document(&params, KeyPolicy::Overwrite).is_ok());
    assert!(matches!(
        build_document(&params, KeyPolicy::Strict),
        Err(PunktError::AmbiguousKey { .. })
    ));
}

#[test]
fn test_export_is_deterministic() {
    let params = sample_params();
    assert_eq!(compact(&params), compact(&params.clone()));
}

#[test]
fn test_sources_load_the_same_parameters() {
    let dir = TempDir::new().unwrap();
    let params = sample_params();

    let pickle = serde_pickle::value_to_vec(&sample_pickle_dict(), SerOptions::new()).unwrap();
    let json = serde_json::to_vec(&params).unwrap();
    let msgpack = rmp_serde::to_vec_named(&params).unwrap();

    let paths = [
        write_fixture(dir.path(), "english.pickle", &pickle),
        write_fixture(dir.path(), "english.json", &json),
        write_fixture(dir.path(), "english.msgpack", &msgpack),
    ];

    for path in &paths {
        let loaded = load_parameters(path, None).unwrap();
        assert_eq!(loaded, params, "{}", path.display());
    }
}

#[test]
fn test_nested_pickle_parameters() {
    let dir = TempDir::new().unwrap();
    let mut tokenizer = BTreeMap::new();
    tokenizer.insert(key("_lang_vars"), Value::None);
    tokenizer.insert(key("_params"), sample_pickle_dict());
    let bytes = serde_pickle::value_to_vec(&Value::Dict(tokenizer), SerOptions::new()).unwrap();

    let path = write_fixture(dir.path(), "russian.pickle", &bytes);
    let loaded = load_parameters(&path, None).unwrap();
    assert_eq!(compact(&loaded), compact(&sample_params()));
}

#[test]
fn test_python_tokenizer_pickle_exports_legacy_document() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "english.pickle", TOKENIZER_PICKLE);

    let loaded = load_parameters(&path, None).unwrap();
    assert_eq!(
        compact(&loaded),
        concat!(
            r#"{"OrthoContext": {"mr": 4, "the": 2},"#,
            r#""Colocations": {"new,york": 1},"#,
            r#""AbbrevTypes": {"dr": 1},"#,
            r#""SentStarters": {"however": 1}}"#
        )
    );
}

#[test]
fn test_format_override() {
    let dir = TempDir::new().unwrap();
    let json = serde_json::to_vec(&sample_params()).unwrap();
    let path = write_fixture(dir.path(), "english.data", &json);

    assert_eq!(SourceFormat::detect(&path), SourceFormat::Pickle);
    assert!(load_parameters(&path, None).is_err());
    assert_eq!(
        load_parameters(&path, Some(SourceFormat::Json)).unwrap(),
        sample_params()
    );
}

#[test]
fn test_missing_input_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = load_parameters(dir.path().join("english.pickle"), None).unwrap_err();
    assert!(matches!(err, LoadError::NotFound(_)));
}

#[test]
fn test_corrupt_input_is_load_error() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "english.msgpack", b"\xc1\xc1\xc1");
    let err = load_parameters(&path, None).unwrap_err();
    assert!(matches!(err, LoadError::Decode { .. }));

    let err: PunktError = err.into();
    assert!(err.to_string().starts_with("Load error"));
}
