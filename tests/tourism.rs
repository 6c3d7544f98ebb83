use fuzzy_rulebase::{defuzzify, Clause, DefuzzificationOp, FuzzyError, FuzzySet, RuleBase, Universe};

struct Tourism {
    temperature: FuzzySet,
    cold: FuzzySet,
    warm: FuzzySet,
    hot: FuzzySet,
    sunshine: FuzzySet,
    cloudy: FuzzySet,
    part_sunny: FuzzySet,
    sunny: FuzzySet,
    tourists: FuzzySet,
    low: FuzzySet,
    medium: FuzzySet,
    high: FuzzySet,
}

fn tourism(temperature: f64, sunshine: f64) -> Result<Tourism, FuzzyError> {
    let temperature_u = Universe::new("temperature", 0., 50.)?;
    let sunshine_u = Universe::new("sunshine", 0., 100.)?;
    let tourists_u = Universe::new("tourists", 0., 100.)?;

    Ok(Tourism {
        temperature: temperature_u.singleton(temperature)?,
        cold: temperature_u.multipoint([(0., 1.), (17., 1.), (20., 0.)])?,
        warm: temperature_u.multipoint([(17., 0.), (20., 1.), (26., 1.), (29., 0.)])?,
        hot: temperature_u.multipoint([(26., 0.), (29., 1.), (50., 1.)])?,
        sunshine: sunshine_u.singleton(sunshine)?,
        cloudy: sunshine_u.multipoint([(0., 1.), (30., 1.), (50., 0.)])?,
        part_sunny: sunshine_u.multipoint([(30., 0.), (50., 1.), (100., 0.)])?,
        sunny: sunshine_u.multipoint([(50., 0.), (100., 1.)])?,
        tourists: tourists_u.singleton(0.)?,
        low: tourists_u.multipoint([(0., 1.), (50., 0.)])?,
        medium: tourists_u.multipoint([(0., 0.), (50., 1.), (100., 0.)])?,
        high: tourists_u.multipoint([(50., 0.), (100., 1.)])?,
    })
}

fn rule_base(t: &Tourism) -> RuleBase {
    let mut rules = RuleBase::new();

    rules
        .new_rule()
        .if_(&t.temperature)
        .is(&t.hot)
        .or(&t.sunshine)
        .is(&t.sunny)
        .then(&t.tourists)
        .is(&t.high);
    rules
        .new_rule()
        .if_(&t.temperature)
        .is(&t.warm)
        .and(&t.sunshine)
        .is(&t.part_sunny)
        .then(&t.tourists)
        .is(&t.medium);
    rules
        .new_rule()
        .if_(&t.temperature)
        .is(&t.cold)
        .and(&t.sunshine)
        .is(&t.cloudy)
        .then(&t.tourists)
        .is(&t.low);
    rules
}

#[test]
fn test_regression_baseline() {
    let t = tourism(19., 60.).unwrap();
    let rules = rule_base(&t);
    let aggregate = rules.exec().unwrap();
    let cog = defuzzify(&aggregate, DefuzzificationOp::Cog).unwrap();

    assert!((cog - 51.02581727740945).abs() < 1e-6, "{cog}");
    assert!((0. ..=100.).contains(&cog));
}

#[test]
fn test_rule_order_does_not_matter() {
    let t = tourism(27.5, 45.).unwrap();
    let forward = rule_base(&t).infer(DefuzzificationOp::Cog).unwrap();
    let mut reversed = RuleBase::new();

    for (subject, term, connective, subject2, term2, consequent) in [
        (&t.temperature, &t.cold, "AND", &t.sunshine, &t.cloudy, &t.low),
        (&t.temperature, &t.warm, "AND", &t.sunshine, &t.part_sunny, &t.medium),
        (&t.temperature, &t.hot, "OR", &t.sunshine, &t.sunny, &t.high),
    ] {
        let second = if connective == "AND" {
            Clause::And(subject2.clone())
        } else {
            Clause::Or(subject2.clone())
        };

        reversed
            .add_clauses([
                Clause::If(subject.clone()),
                Clause::Is(term.clone()),
                second,
                Clause::Is(term2.clone()),
                Clause::Then(t.tourists.clone()),
                Clause::Is(consequent.clone()),
            ])
            .unwrap();
    }

    let backward = reversed.infer(DefuzzificationOp::Cog).unwrap();

    assert!((forward - backward).abs() < 1e-9, "{forward} != {backward}");
}

#[test]
fn test_crisp_inputs_out_of_bounds() {
    assert!(matches!(tourism(51., 60.), Err(FuzzyError::OutOfBounds { .. })));
    assert!(matches!(tourism(19., -1.), Err(FuzzyError::OutOfBounds { .. })));
}

#[test]
fn test_nothing_fires() {
    let t = tourism(19., 60.).unwrap();
    let mut rules = RuleBase::new();

    rules
        .new_rule()
        .if_(&t.temperature)
        .is(&t.hot)
        .then(&t.tourists)
        .is(&t.high);

    let aggregate = rules.exec().unwrap();

    assert_eq!(aggregate.max_degree(), 0.);
    assert_eq!(defuzzify(&aggregate, DefuzzificationOp::Cog), Ok(0.));
}

#[test]
fn test_method_by_name() {
    let t = tourism(19., 60.).unwrap();
    let rules = rule_base(&t);
    let by_name = rules.infer("cog".parse().unwrap()).unwrap();

    assert_eq!(rules.infer(DefuzzificationOp::Cog), Ok(by_name));
    assert!(matches!(
        "centroid".parse::<DefuzzificationOp>(),
        Err(FuzzyError::UnsupportedMethod(_))
    ));
}
