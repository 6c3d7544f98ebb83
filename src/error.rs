use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FuzzyError {
    #[error("value {value} is outside universe `{universe}` [{min}, {max}]")]
    OutOfBounds {
        universe: String,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("sets belong to different universes (`{left}` and `{right}`)")]
    UniverseMismatch { left: String, right: String },
    #[error("a multipoint set needs at least 2 points, got {0}")]
    InsufficientPoints(usize),
    #[error("invalid point at index {index}: {reason}")]
    InvalidPoints { index: usize, reason: &'static str },
    #[error("invalid universe `{name}`: [{min}, {max}]")]
    InvalidUniverse { name: String, min: f64, max: f64 },
    #[error("rule base has no rules")]
    EmptyRuleBase,
    #[error("malformed rule: {0}")]
    MalformedRule(String),
    #[error("no rule with the given key")]
    UnknownRule,
    #[error("{0} requires a singleton operand")]
    NotASingleton(&'static str),
    #[error("unsupported defuzzification method `{0}`")]
    UnsupportedMethod(String),
    #[error("nothing to defuzzify: the universe yields no samples")]
    EmptySet,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, FuzzyError>;

#[test]
fn test_messages() {
    let err = FuzzyError::OutOfBounds {
        universe: "temperature".into(),
        value: 51.,
        min: 0.,
        max: 50.,
    };

    assert_eq!(err.to_string(), "value 51 is outside universe `temperature` [0, 50]");
    assert_eq!(
        FuzzyError::NotASingleton("AND").to_string(),
        "AND requires a singleton operand"
    );
}
