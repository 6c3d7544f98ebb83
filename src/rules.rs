use slotmap::{new_key_type, SlotMap};
use tracing::{debug, trace};

use crate::config::Config;
use crate::dsl::{parse_clauses, Clause, RuleBuilder, Start};
use crate::error::{FuzzyError, Result};
use crate::ops::{AndOp, ImplicationOp, OrOp};
use crate::set::{FuzzySet, Singleton};

new_key_type! {
    /// A rule key
    pub struct RuleKey;
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Connective {
    And,
    Or,
}

impl Connective {
    fn keyword(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// `subject IS term`
#[derive(Clone, Debug)]
pub(crate) struct Proposition {
    subject: FuzzySet,
    term: FuzzySet,
}

impl Proposition {
    pub(crate) fn new(subject: FuzzySet, term: FuzzySet) -> Self {
        Proposition { subject, term }
    }

    /// Degree to which the subject is the term. Only defined when the subject
    /// is a crisp value, i.e. the intersection reduces to a singleton.
    fn degree(&self, keyword: &'static str) -> Result<f64> {
        self.subject
            .intersect(&self.term)?
            .as_singleton()
            .map(Singleton::degree)
            .ok_or(FuzzyError::NotASingleton(keyword))
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Premise {
    first: Proposition,
    rest: Vec<(Connective, Proposition)>,
}

impl Premise {
    pub(crate) fn new(first: Proposition) -> Self {
        Premise { first, rest: Vec::new() }
    }

    pub(crate) fn push(&mut self, connective: Connective, proposition: Proposition) {
        self.rest.push((connective, proposition));
    }

    /// Folds the propositions left to right.
    fn firing_strength(&self, and_op: AndOp, or_op: OrOp) -> Result<f64> {
        // A lone proposition is first needed as a singleton by THEN
        let keyword = self.rest.first().map_or("THEN", |(connective, _)| connective.keyword());
        let mut strength = self.first.degree(keyword)?;

        for (connective, proposition) in &self.rest {
            let degree = proposition.degree(connective.keyword())?;

            strength = match connective {
                Connective::And => and_op.call(strength, degree),
                Connective::Or => or_op.call(strength, degree),
            };
        }

        Ok(strength)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Rule {
    premise: Premise,
    output: FuzzySet,
    term: FuzzySet,
}

impl Rule {
    pub(crate) fn new(premise: Premise, output: FuzzySet, term: FuzzySet) -> Self {
        Rule { premise, output, term }
    }

    fn exec(&self, config: &Config) -> Result<(f64, FuzzySet)> {
        let strength = self.premise.firing_strength(config.and_op, config.or_op)?;
        let output = self.output.universe();

        output.ensure_same(self.term.universe())?;

        let set = match (config.imp_op, &self.term) {
            // Clip the consequent with the flat projection of the firing strength
            (ImplicationOp::Mamdani, term) => output.flat(strength).intersect(term)?,
            (op, FuzzySet::Singleton(s)) => FuzzySet::Singleton(s.map_degrees(|v| op.call(strength, v))),
            (ImplicationOp::Larsen, FuzzySet::MultiPoint(m)) => FuzzySet::MultiPoint(m.map_degrees(|v| strength * v)),
            (ImplicationOp::KleeneDienes, FuzzySet::MultiPoint(m)) => {
                FuzzySet::MultiPoint(m.combine_level(1. - strength, f64::max))
            },
            (ImplicationOp::Lukasiewicz, FuzzySet::MultiPoint(m)) => FuzzySet::MultiPoint(
                m.map_degrees(|v| 1. - strength + v)
                    .combine_level(1., f64::min),
            ),
            (ImplicationOp::Zadeh, FuzzySet::MultiPoint(m)) => FuzzySet::MultiPoint(
                m.combine_level(strength, f64::min)
                    .combine_level(1. - strength, f64::max),
            ),
        };

        Ok((strength, set))
    }
}

enum RuleSlot {
    Pending,
    Ready(Rule),
}

/// An ordered collection of rules whose outputs are aggregated by union.
#[derive(Default)]
pub struct RuleBase {
    rules: SlotMap<RuleKey, RuleSlot>,
    config: Config,
}

impl RuleBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;

        Ok(RuleBase {
            rules: SlotMap::with_key(),
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Reserves a slot and starts building the rule that fills it.
    pub fn new_rule(&mut self) -> RuleBuilder<'_, Start> {
        let key = self.rules.insert(RuleSlot::Pending);

        RuleBuilder::new(self, key)
    }

    /// Adds a rule from a chain of clauses checked at runtime. Nothing is
    /// added when the chain is malformed.
    pub fn add_clauses(&mut self, clauses: impl IntoIterator<Item = Clause>) -> Result<RuleKey> {
        let rule = parse_clauses(clauses)?;

        Ok(self.rules.insert(RuleSlot::Ready(rule)))
    }

    pub(crate) fn install(&mut self, key: RuleKey, rule: Rule) {
        if let Some(slot) = self.rules.get_mut(key) {
            *slot = RuleSlot::Ready(rule);
        }
    }

    /// Returns whether a rule was removed.
    pub fn remove_rule(&mut self, key: RuleKey) -> bool {
        self.rules.remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Output set of a single rule.
    pub fn exec_rule(&self, key: RuleKey) -> Result<FuzzySet> {
        let slot = self.rules.get(key).ok_or(FuzzyError::UnknownRule)?;

        self.exec_slot(key, slot)
    }

    /// Executes every rule and folds their outputs with [`FuzzySet::union`].
    pub fn exec(&self) -> Result<FuzzySet> {
        let mut aggregate: Option<FuzzySet> = None;

        for (key, slot) in &self.rules {
            let output = self.exec_slot(key, slot)?;

            aggregate = Some(match aggregate {
                None => output,
                Some(acc) => acc.union(&output)?,
            });
        }

        let aggregate = aggregate.ok_or(FuzzyError::EmptyRuleBase)?;

        debug!(
            rules = self.rules.len(),
            height = aggregate.max_degree(),
            "rule base executed"
        );

        Ok(aggregate)
    }

    fn exec_slot(&self, key: RuleKey, slot: &RuleSlot) -> Result<FuzzySet> {
        let RuleSlot::Ready(rule) = slot else {
            return Err(FuzzyError::MalformedRule(format!(
                "rule {key:?} was never completed with THEN ... IS"
            )));
        };
        let (strength, set) = rule.exec(&self.config)?;

        trace!(?key, strength, "rule fired");

        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::universe::Universe;

    struct Fixture {
        temperature: FuzzySet,
        warm: FuzzySet,
        hot: FuzzySet,
        sunshine: FuzzySet,
        part_sunny: FuzzySet,
        tourists: FuzzySet,
        medium: FuzzySet,
        high: FuzzySet,
    }

    fn fixture() -> Fixture {
        let temperature = Universe::new("temperature", 0., 50.).unwrap();
        let sunshine = Universe::new("sunshine", 0., 100.).unwrap();
        let tourists = Universe::new("tourists", 0., 100.).unwrap();

        Fixture {
            temperature: temperature.singleton(19.).unwrap(),
            warm: temperature.multipoint([(17., 0.), (20., 1.), (26., 1.), (29., 0.)]).unwrap(),
            hot: temperature.multipoint([(26., 0.), (29., 1.), (50., 1.)]).unwrap(),
            sunshine: sunshine.singleton(60.).unwrap(),
            part_sunny: sunshine.multipoint([(30., 0.), (50., 1.), (100., 0.)]).unwrap(),
            tourists: tourists.singleton(0.).unwrap(),
            medium: tourists.multipoint([(0., 0.), (50., 1.), (100., 0.)]).unwrap(),
            high: tourists.multipoint([(50., 0.), (100., 1.)]).unwrap(),
        }
    }

    #[test]
    fn test_and_takes_minimum() {
        let f = fixture();
        let mut rules = RuleBase::new();
        let key = rules
            .new_rule()
            .if_(&f.temperature)
            .is(&f.warm)
            .and(&f.sunshine)
            .is(&f.part_sunny)
            .then(&f.tourists)
            .is(&f.medium);
        let output = rules.exec_rule(key).unwrap();
        let warm = f.warm.membership_degree(19.).unwrap();

        assert!(warm < 0.8);
        assert!((output.max_degree() - warm).abs() < 1e-12);
        assert!((output.membership_degree(50.).unwrap() - warm).abs() < 1e-12);
        assert_eq!(output.membership_degree(0.), Ok(0.));
    }

    #[test]
    fn test_or_takes_maximum() {
        let f = fixture();
        let mut rules = RuleBase::new();
        let key = rules
            .new_rule()
            .if_(&f.temperature)
            .is(&f.hot)
            .or(&f.sunshine)
            .is(&f.part_sunny)
            .then(&f.tourists)
            .is(&f.high);
        let output = rules.exec_rule(key).unwrap();

        assert_eq!(output.max_degree(), 0.8);
        assert_eq!(output.membership_degree(100.), Ok(0.8));
    }

    #[test]
    fn test_exec_is_idempotent() {
        let f = fixture();
        let mut rules = RuleBase::new();

        rules.new_rule().if_(&f.temperature).is(&f.warm).then(&f.tourists).is(&f.medium);
        rules.new_rule().if_(&f.sunshine).is(&f.part_sunny).then(&f.tourists).is(&f.high);

        let first = rules.exec().unwrap();

        assert_eq!(rules.exec().unwrap(), first);
        assert_eq!(rules.len(), 2);
    }

    #[test]
    fn test_empty_rule_base() {
        assert_eq!(RuleBase::new().exec(), Err(FuzzyError::EmptyRuleBase));
    }

    #[test]
    fn test_incomplete_rule() {
        let f = fixture();
        let mut rules = RuleBase::new();
        let key = rules.new_rule().if_(&f.temperature).is(&f.warm).key();

        assert!(matches!(rules.exec(), Err(FuzzyError::MalformedRule(_))));
        assert!(matches!(rules.exec_rule(key), Err(FuzzyError::MalformedRule(_))));
        assert!(rules.remove_rule(key));
        assert!(!rules.remove_rule(key));
        assert_eq!(rules.exec_rule(key), Err(FuzzyError::UnknownRule));
        assert_eq!(rules.exec(), Err(FuzzyError::EmptyRuleBase));
    }

    #[test]
    fn test_not_a_singleton() {
        let f = fixture();
        let mut rules = RuleBase::new();
        let key = rules.new_rule().if_(&f.warm).is(&f.hot).then(&f.tourists).is(&f.high);

        assert_eq!(rules.exec_rule(key), Err(FuzzyError::NotASingleton("THEN")));

        let key = rules
            .new_rule()
            .if_(&f.temperature)
            .is(&f.hot)
            .and(&f.part_sunny)
            .is(&f.part_sunny)
            .then(&f.tourists)
            .is(&f.high);

        assert_eq!(rules.exec_rule(key), Err(FuzzyError::NotASingleton("AND")));
        assert_eq!(rules.exec(), Err(FuzzyError::NotASingleton("THEN")));
    }

    #[test]
    fn test_universe_mismatch_surfaces_at_exec() {
        let f = fixture();
        let mut rules = RuleBase::new();

        rules.new_rule().if_(&f.temperature).is(&f.part_sunny).then(&f.tourists).is(&f.high);

        assert!(matches!(rules.exec(), Err(FuzzyError::UniverseMismatch { .. })));

        let mut rules = RuleBase::new();

        rules.new_rule().if_(&f.temperature).is(&f.warm).then(&f.sunshine).is(&f.high);

        assert!(matches!(rules.exec(), Err(FuzzyError::UniverseMismatch { .. })));
    }

    #[test]
    fn test_clauses() {
        let f = fixture();
        let mut rules = RuleBase::new();
        let key = rules
            .add_clauses([
                Clause::If(f.temperature.clone()),
                Clause::Is(f.warm.clone()),
                Clause::And(f.sunshine.clone()),
                Clause::Is(f.part_sunny.clone()),
                Clause::Then(f.tourists.clone()),
                Clause::Is(f.medium.clone()),
            ])
            .unwrap();
        let mut built = RuleBase::new();
        let built_key = built
            .new_rule()
            .if_(&f.temperature)
            .is(&f.warm)
            .and(&f.sunshine)
            .is(&f.part_sunny)
            .then(&f.tourists)
            .is(&f.medium);

        assert_eq!(rules.exec_rule(key), built.exec_rule(built_key));
    }

    #[test]
    fn test_malformed_clauses() {
        let f = fixture();
        let mut rules = RuleBase::new();
        let chains = [
            vec![Clause::If(f.temperature.clone()), Clause::If(f.temperature.clone())],
            vec![Clause::If(f.temperature.clone()), Clause::And(f.sunshine.clone())],
            vec![
                Clause::If(f.temperature.clone()),
                Clause::Is(f.warm.clone()),
                Clause::Is(f.hot.clone()),
            ],
            vec![
                Clause::If(f.temperature.clone()),
                Clause::Is(f.warm.clone()),
                Clause::Then(f.tourists.clone()),
            ],
            vec![
                Clause::If(f.temperature.clone()),
                Clause::Is(f.warm.clone()),
                Clause::Then(f.tourists.clone()),
                Clause::Is(f.medium.clone()),
                Clause::Or(f.sunshine.clone()),
            ],
            vec![Clause::Is(f.warm.clone())],
            vec![],
        ];

        for chain in chains {
            assert!(matches!(rules.add_clauses(chain), Err(FuzzyError::MalformedRule(_))));
        }

        assert!(rules.is_empty());

        let err = rules
            .add_clauses([Clause::If(f.temperature.clone()), Clause::If(f.temperature.clone())])
            .unwrap_err();

        assert_eq!(err, FuzzyError::MalformedRule("unexpected IF at clause 2 after IF".into()));
    }

    #[test]
    fn test_implication_ops_match_pointwise() {
        let f = fixture();
        let ops = [
            ImplicationOp::Mamdani,
            ImplicationOp::Larsen,
            ImplicationOp::KleeneDienes,
            ImplicationOp::Lukasiewicz,
            ImplicationOp::Zadeh,
        ];
        let strength = f.warm.membership_degree(19.).unwrap();

        for op in ops {
            let mut rules = RuleBase::with_config(Config::new().with_imp_op(op)).unwrap();

            rules.new_rule().if_(&f.temperature).is(&f.warm).then(&f.tourists).is(&f.medium);

            let output = rules.exec().unwrap();

            for x in [0., 12.5, 30., 33., 40., 50., 61., 75., 99.] {
                let expected = op.call(strength, f.medium.membership_degree(x).unwrap());
                let actual = output.membership_degree(x).unwrap();

                assert!((expected - actual).abs() < 1e-12, "{op:?} at {x}: {expected} != {actual}");
            }
        }
    }

    #[test]
    fn test_singleton_consequent() {
        let f = fixture();
        let hundred = f.tourists.universe().singleton(100.).unwrap();
        let mut rules = RuleBase::with_config(Config::new().with_imp_op(ImplicationOp::Larsen)).unwrap();

        rules.new_rule().if_(&f.sunshine).is(&f.part_sunny).then(&f.tourists).is(&hundred);

        let output = rules.exec().unwrap();
        let singleton = output.as_singleton().unwrap();

        assert_eq!(singleton.center(), 100.);
        assert_eq!(singleton.degree(), 0.8);
    }

    #[test]
    fn test_and_or_ops_from_config() {
        let f = fixture();
        let config = Config::new().with_and_op(AndOp::Prod);
        let mut rules = RuleBase::with_config(config).unwrap();

        rules
            .new_rule()
            .if_(&f.sunshine)
            .is(&f.part_sunny)
            .and(&f.sunshine)
            .is(&f.part_sunny)
            .then(&f.tourists)
            .is(&f.high);

        let output = rules.exec().unwrap();

        assert!((output.max_degree() - 0.64).abs() < 1e-12);
        assert!(RuleBase::with_config(Config::new().with_resolution(0.)).is_err());
    }
}
