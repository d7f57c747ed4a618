//! Tests for user-defined schemas through the public API.

use argschema::{
    flag_name, Argument, Arguments, ArgumentsError, ParsedValues, ParserSettings, Schema,
    SchemaError, SettingsBuilder, Value, ValueType,
};
use std::path::PathBuf;

#[derive(Debug, PartialEq)]
struct BuildArguments {
    target: String,
    jobs: u32,
    ratio: f64,
    output: Option<PathBuf>,
    features: Vec<String>,
    release: bool,
    quiet: u8,
    strict: Option<bool>,
}

impl Arguments for BuildArguments {
    fn schema() -> Schema {
        Schema::new()
            .argument(Argument::new("target").help("Build target").short('t'))
            .argument(
                Argument::new("jobs")
                    .value_type(ValueType::Integer)
                    .default_value(4_i64),
            )
            .argument(
                Argument::new("ratio")
                    .value_type(ValueType::Float)
                    .default_value(0.5),
            )
            .argument(
                Argument::new("output")
                    .value_type(ValueType::Path)
                    .optional(),
            )
            .argument(Argument::new("features").list().delimiter(',').optional())
            .argument(Argument::new("release").switch())
            .argument(Argument::new("quiet").count().short('q'))
            .argument(
                Argument::new("strict")
                    .value_type(ValueType::Bool)
                    .optional()
                    .missing_value(true),
            )
    }

    fn from_values(values: &mut ParsedValues) -> Result<Self, SchemaError> {
        Ok(Self {
            target: values.take("target")?,
            jobs: values.take("jobs")?,
            ratio: values.take("ratio")?,
            output: values.take_optional("output")?,
            features: values.take_or_default("features")?,
            release: values.take("release")?,
            quiet: values.take("quiet")?,
            strict: values.take_optional("strict")?,
        })
    }

    fn settings() -> argschema::Result<ParserSettings> {
        Ok(SettingsBuilder::new()
            .with_program("build")
            .with_version("0.0.1")
            .build())
    }
}

#[test]
fn test_every_flag_round_trips() {
    let args = BuildArguments::try_parse_args([
        "-t",
        "x86_64",
        "--jobs",
        "8",
        "--ratio",
        "0.25",
        "--output",
        "/tmp/out",
        "--features",
        "a,b",
        "--release",
        "-qq",
        "--strict",
        "false",
    ])
    .unwrap();

    assert_eq!(
        args,
        BuildArguments {
            target: "x86_64".to_string(),
            jobs: 8,
            ratio: 0.25,
            output: Some(PathBuf::from("/tmp/out")),
            features: vec!["a".to_string(), "b".to_string()],
            release: true,
            quiet: 2,
            strict: Some(false),
        }
    );
}

#[test]
fn test_defaults_fill_absent_flags() {
    let args = BuildArguments::try_parse_args(["--target", "arm"]).unwrap();
    assert_eq!(args.jobs, 4);
    assert_eq!(args.ratio, 0.5);
    assert_eq!(args.output, None);
    assert!(args.features.is_empty());
    assert!(!args.release);
    assert_eq!(args.quiet, 0);
    assert_eq!(args.strict, None);
}

#[test]
fn test_flag_without_value_uses_missing_value() {
    let args = BuildArguments::try_parse_args(["--target", "arm", "--strict"]).unwrap();
    assert_eq!(args.strict, Some(true));
}

#[test]
fn test_negative_numbers_are_values() {
    let err = BuildArguments::try_parse_args(["--target", "arm", "--jobs", "-1"]).unwrap_err();
    assert!(matches!(
        err,
        ArgumentsError::Schema(SchemaError::TypeMismatch { ref name, .. }) if name == "jobs"
    ));
}

#[test]
fn test_missing_required_flag() {
    let err = BuildArguments::try_parse_args(Vec::<&str>::new()).unwrap_err();
    assert!(matches!(err, ArgumentsError::Usage(_)));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_version_request() {
    let err = BuildArguments::try_parse_args(["--version"]).unwrap_err();
    match err {
        ArgumentsError::Usage(e) => assert!(e.is_help_request()),
        other => panic!("Expected usage error, got {:?}", other),
    }
}

#[test]
fn test_flag_names_are_deterministic() {
    for _ in 0..3 {
        let flags: Vec<String> = BuildArguments::schema()
            .arguments()
            .iter()
            .map(Argument::flag)
            .collect();
        assert_eq!(
            flags,
            vec![
                "--target",
                "--jobs",
                "--ratio",
                "--output",
                "--features",
                "--release",
                "--quiet",
                "--strict"
            ]
        );
    }
    assert_eq!(flag_name("groups"), "--groups");
}

#[test]
fn test_help_follows_declaration_order() {
    let help = BuildArguments::help().unwrap();
    let target = help.find("--target").unwrap();
    let jobs = help.find("--jobs").unwrap();
    let strict = help.find("--strict").unwrap();
    assert!(target < jobs && jobs < strict);
    assert!(help.contains("[default: 4]"));
}

#[test]
fn test_parsed_values_by_hand() {
    let parser = argschema::ArgumentParser::new(BuildArguments::schema(), ParserSettings::default())
        .unwrap();
    let values = parser.parse_from(["build", "--target", "t"]).unwrap();
    assert_eq!(values.get("target"), Some(&Value::from("t")));
    assert_eq!(values.get("release"), Some(&Value::Bool(false)));
    assert_eq!(values.len(), 8);
}
