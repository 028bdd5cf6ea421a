use pwm_argparse::{
    ConfigError, Error, OptionRegistry, ParseError, PositionalOptions, ValidationError, ValueSpec,
};
use rstest::rstest;

fn service_user() -> OptionRegistry {
    OptionRegistry::builder()
        .long_value("service", ValueSpec::<String>::new().required_all(), "Service")
        .long_value("user", ValueSpec::<String>::new().required_all(), "User")
        .build()
        .unwrap()
}

#[test]
fn end_to_end_required_options() {
    let mut registry = service_user();
    let consumed = registry
        .parse(&["--service", "foo", "--user", "bar"])
        .unwrap();
    assert_eq!(consumed, 4);
    assert_eq!(
        registry.get("service").unwrap().value_as::<String>().unwrap(),
        "foo"
    );
    assert_eq!(
        registry.get("user").unwrap().value_as::<String>().unwrap(),
        "bar"
    );
}

#[test]
fn end_to_end_missing_value() {
    let mut registry = service_user();
    let err = registry.parse(&["--service"]).unwrap_err();
    match &err {
        Error::Parse(ParseError::MissingValue { option }) => assert_eq!(option, "--service"),
        other => panic!("unexpected error: {other:?}"),
    }
    let message = err.to_string();
    assert!(message.contains("--service"), "{message}");
    assert!(message.contains("requires a value"), "{message}");
}

#[test]
fn missing_required_option_fails_validation_only() {
    let mut registry = service_user();
    registry.parse_with(&["--service", "foo"], false).unwrap();
    let err = registry.validate().unwrap_err();
    assert!(matches!(
        err,
        Error::Validation { ref option, source: ValidationError::TooFew { .. } } if option == "--user"
    ));
}

#[rstest]
#[case("-x")]
#[case("x=")]
#[case("x y")]
#[case("x\ty")]
#[case("")]
fn invalid_names_are_rejected(#[case] name: &str) {
    let err = OptionRegistry::builder().long(name, "").build().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidName { .. }), "{err:?}");
}

#[test]
fn default_is_read_without_any_match() {
    let mut registry = OptionRegistry::builder()
        .long_value("target", ValueSpec::<String>::new().with_default(["stdout"]), "")
        .build()
        .unwrap();
    registry.parse(&[] as &[&str]).unwrap();
    let target = registry.get("target").unwrap();
    assert!(target.is_present());
    assert_eq!(target.value_as::<String>().unwrap(), "stdout");
}

#[test]
fn limit_counts_bound_values_and_rejects_overflow() {
    let spec = || {
        ValueSpec::<i32>::new()
            .with_default([1, 2])
            .with_limit(3)
            .unwrap()
    };
    let mut registry = OptionRegistry::builder()
        .long_value("n ", spec(), "")
        .build()
        .unwrap();
    registry.parse(&["--n", "7"]).unwrap();
    assert_eq!(
        registry.get("n").unwrap().value_as::<Vec<i32>>().unwrap(),
        [7]
    );

    let mut registry = OptionRegistry::builder()
        .long_value("n ", spec(), "")
        .build()
        .unwrap();
    registry.parse(&["--n", "7", "8", "9"]).unwrap();
    let err = registry.parse(&["--n", "10"]).unwrap_err();
    assert!(err.to_string().contains("cannot take any more values"), "{err}");
}

#[test]
fn unlimited_needs_at_least_one_value() {
    let build = || {
        OptionRegistry::builder()
            .long_value("col ", ValueSpec::<String>::new().unlimited(), "")
            .build()
            .unwrap()
    };
    let mut empty = build();
    assert!(matches!(
        empty.parse(&[] as &[&str]).unwrap_err(),
        Error::Validation { .. }
    ));

    let mut one = build();
    one.parse(&["--col", "srv"]).unwrap();
}

#[test]
fn assign_pattern_leaves_next_token() {
    let mut registry = OptionRegistry::builder()
        .long_value("col=", ValueSpec::<String>::new().unlimited(), "")
        .positional(ValueSpec::<String>::new(), "rest")
        .build()
        .unwrap();
    registry.parse(&["--col=srv", "pw"]).unwrap();
    assert_eq!(
        registry.get("col").unwrap().value_as::<Vec<String>>().unwrap(),
        ["srv"]
    );
    assert_eq!(
        registry.positional().unwrap().value_as::<String>().unwrap(),
        "pw"
    );
}

#[test]
fn space_pattern_collects_until_next_option() {
    let mut registry = OptionRegistry::builder()
        .long_value("col ", ValueSpec::<String>::new().unlimited(), "")
        .long("verbose", "")
        .build()
        .unwrap();
    registry.parse(&["--col", "srv", "pw", "--verbose"]).unwrap();
    assert_eq!(
        registry.get("col").unwrap().value_as::<Vec<String>>().unwrap(),
        ["srv", "pw"]
    );
    assert!(registry.get("verbose").unwrap().is_present());
}

#[test]
fn paused_positional_hands_off_the_tail() {
    let mut top = OptionRegistry::builder()
        .long("help", "")
        .positional_with(
            ValueSpec::<String>::new().with_label("command"),
            "",
            PositionalOptions::default().pause(),
        )
        .build()
        .unwrap();
    let args = ["get", "--col", "srv"];
    let rest = top.parse(&args).unwrap();
    assert_eq!(&args[rest..], ["--col", "srv"]);

    let mut sub = OptionRegistry::builder()
        .long_value("col ", ValueSpec::<String>::new().unlimited(), "")
        .build()
        .unwrap();
    assert_eq!(sub.parse(&args[rest..]).unwrap(), 2);
    assert_eq!(
        sub.get("col").unwrap().value_as::<Vec<String>>().unwrap(),
        ["srv"]
    );
}

#[test]
fn constraint_failure_is_reported_by_validate() {
    let mut registry = OptionRegistry::builder()
        .long_value(
            "target",
            ValueSpec::<String>::new()
                .with_default(["stdout"])
                .with_constraint(|v: &String| v == "stdout" || v == "file")
                .unwrap(),
            "",
        )
        .build()
        .unwrap();
    let err = registry.parse(&["--target=socket"]).unwrap_err();
    assert_eq!(
        err,
        Error::Validation {
            option: "--target".to_string(),
            source: ValidationError::ConstraintViolated {
                value: "socket".to_string()
            },
        }
    );
}

#[test]
fn numeric_values_are_converted() {
    let mut registry = OptionRegistry::builder()
        .short_value("n", ValueSpec::<u32>::new(), "")
        .long_value("ratio", ValueSpec::<f64>::new(), "")
        .build()
        .unwrap();
    registry.parse(&["-n", "12", "--ratio=2.5e1"]).unwrap();
    assert_eq!(registry.get("n").unwrap().value_as::<u32>().unwrap(), 12);
    assert_eq!(
        registry.get("ratio").unwrap().value_as::<f64>().unwrap(),
        25.0
    );

    let mut registry = OptionRegistry::builder()
        .short_value("n", ValueSpec::<u32>::new(), "")
        .build()
        .unwrap();
    let err = registry.parse(&["-n", "12abc"]).unwrap_err();
    assert!(matches!(
        err,
        Error::Parse(ParseError::Conversion { ref option, .. }) if option == "-n"
    ));
}
