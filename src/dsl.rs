use std::fmt;

use crate::error::{FuzzyError, Result};
use crate::rules::{Connective, Premise, Proposition, Rule, RuleBase, RuleKey};
use crate::set::FuzzySet;

/// Builds one rule of a [`RuleBase`] following
/// `IF set IS set {AND set IS set | OR set IS set}* THEN set IS set`.
///
/// Every grammar position is its own state type and only exposes the calls
/// that may follow it, so an out-of-order chain does not compile:
///
/// ```compile_fail
/// # use fuzzy_rulebase::{RuleBase, Universe};
/// # let universe = Universe::new("temperature", 0., 50.).unwrap();
/// # let input = universe.singleton(19.).unwrap();
/// let mut rules = RuleBase::new();
/// rules.new_rule().if_(&input).if_(&input);
/// ```
///
/// ```compile_fail
/// # use fuzzy_rulebase::{RuleBase, Universe};
/// # let universe = Universe::new("temperature", 0., 50.).unwrap();
/// # let input = universe.singleton(19.).unwrap();
/// let mut rules = RuleBase::new();
/// rules.new_rule().if_(&input).and(&input);
/// ```
///
/// The rule is installed in its slot by the final `is`. A builder dropped
/// before that leaves the slot incomplete and [`RuleBase::exec`] reports it.
#[must_use = "a rule is only installed by the final `is` after `then`"]
pub struct RuleBuilder<'rb, S> {
    base: &'rb mut RuleBase,
    key: RuleKey,
    state: S,
}

pub struct Start(());

pub struct AfterIf {
    subject: FuzzySet,
}

pub struct AfterIs {
    premise: Premise,
}

pub struct AfterAnd {
    premise: Premise,
    subject: FuzzySet,
}

pub struct AfterOr {
    premise: Premise,
    subject: FuzzySet,
}

pub struct AfterThen {
    premise: Premise,
    output: FuzzySet,
}

impl<'rb, S> RuleBuilder<'rb, S> {
    /// The slot this rule will be installed into.
    pub fn key(&self) -> RuleKey {
        self.key
    }

    fn map<T>(self, f: impl FnOnce(S) -> T) -> RuleBuilder<'rb, T> {
        RuleBuilder {
            base: self.base,
            key: self.key,
            state: f(self.state),
        }
    }
}

impl<'rb> RuleBuilder<'rb, Start> {
    pub(crate) fn new(base: &'rb mut RuleBase, key: RuleKey) -> Self {
        RuleBuilder {
            base,
            key,
            state: Start(()),
        }
    }

    pub fn if_(self, set: &FuzzySet) -> RuleBuilder<'rb, AfterIf> {
        self.map(|_| AfterIf { subject: set.clone() })
    }
}

impl<'rb> RuleBuilder<'rb, AfterIf> {
    pub fn is(self, term: &FuzzySet) -> RuleBuilder<'rb, AfterIs> {
        self.map(|AfterIf { subject }| AfterIs {
            premise: Premise::new(Proposition::new(subject, term.clone())),
        })
    }
}

impl<'rb> RuleBuilder<'rb, AfterIs> {
    pub fn and(self, set: &FuzzySet) -> RuleBuilder<'rb, AfterAnd> {
        self.map(|AfterIs { premise }| AfterAnd {
            premise,
            subject: set.clone(),
        })
    }

    pub fn or(self, set: &FuzzySet) -> RuleBuilder<'rb, AfterOr> {
        self.map(|AfterIs { premise }| AfterOr {
            premise,
            subject: set.clone(),
        })
    }

    /// Starts the consequent. `set` names the output variable; the rule's
    /// result lives in its universe.
    pub fn then(self, set: &FuzzySet) -> RuleBuilder<'rb, AfterThen> {
        self.map(|AfterIs { premise }| AfterThen {
            premise,
            output: set.clone(),
        })
    }
}

impl<'rb> RuleBuilder<'rb, AfterAnd> {
    pub fn is(self, term: &FuzzySet) -> RuleBuilder<'rb, AfterIs> {
        self.map(|AfterAnd { mut premise, subject }| {
            premise.push(Connective::And, Proposition::new(subject, term.clone()));
            AfterIs { premise }
        })
    }
}

impl<'rb> RuleBuilder<'rb, AfterOr> {
    pub fn is(self, term: &FuzzySet) -> RuleBuilder<'rb, AfterIs> {
        self.map(|AfterOr { mut premise, subject }| {
            premise.push(Connective::Or, Proposition::new(subject, term.clone()));
            AfterIs { premise }
        })
    }
}

impl<'rb> RuleBuilder<'rb, AfterThen> {
    /// Completes the rule and installs it into its slot.
    pub fn is(self, term: &FuzzySet) -> RuleKey {
        let AfterThen { premise, output } = self.state;

        self.base.install(self.key, Rule::new(premise, output, term.clone()));
        self.key
    }
}

/// One step of a rule chain assembled at runtime, e.g. from a rule table.
#[derive(Clone, Debug)]
pub enum Clause {
    If(FuzzySet),
    Is(FuzzySet),
    And(FuzzySet),
    Or(FuzzySet),
    Then(FuzzySet),
}

impl Clause {
    fn keyword(&self) -> &'static str {
        match self {
            Self::If(_) => "IF",
            Self::Is(_) => "IS",
            Self::And(_) => "AND",
            Self::Or(_) => "OR",
            Self::Then(_) => "THEN",
        }
    }
}

enum ChainState {
    Start,
    AfterIf(FuzzySet),
    AfterIs(Premise),
    AfterConnective(Premise, Connective, FuzzySet),
    AfterThen(Premise, FuzzySet),
    Done(Rule),
}

impl fmt::Display for ChainState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("at the start"),
            Self::AfterIf(_) => f.write_str("after IF"),
            Self::AfterIs(_) => f.write_str("after IS"),
            Self::AfterConnective(_, Connective::And, _) => f.write_str("after AND"),
            Self::AfterConnective(_, Connective::Or, _) => f.write_str("after OR"),
            Self::AfterThen(..) => f.write_str("after THEN"),
            Self::Done(_) => f.write_str("after the final IS"),
        }
    }
}

/// Walks `clauses` through the same grammar as [`RuleBuilder`], checked at runtime.
pub(crate) fn parse_clauses(clauses: impl IntoIterator<Item = Clause>) -> Result<Rule> {
    let mut state = ChainState::Start;

    for (position, clause) in clauses.into_iter().enumerate() {
        state = match (state, clause) {
            (ChainState::Start, Clause::If(subject)) => ChainState::AfterIf(subject),
            (ChainState::AfterIf(subject), Clause::Is(term)) => {
                ChainState::AfterIs(Premise::new(Proposition::new(subject, term)))
            },
            (ChainState::AfterIs(premise), Clause::And(subject)) => {
                ChainState::AfterConnective(premise, Connective::And, subject)
            },
            (ChainState::AfterIs(premise), Clause::Or(subject)) => {
                ChainState::AfterConnective(premise, Connective::Or, subject)
            },
            (ChainState::AfterConnective(mut premise, connective, subject), Clause::Is(term)) => {
                premise.push(connective, Proposition::new(subject, term));
                ChainState::AfterIs(premise)
            },
            (ChainState::AfterIs(premise), Clause::Then(output)) => ChainState::AfterThen(premise, output),
            (ChainState::AfterThen(premise, output), Clause::Is(term)) => {
                ChainState::Done(Rule::new(premise, output, term))
            },
            (state, clause) => {
                return Err(FuzzyError::MalformedRule(format!(
                    "unexpected {} at clause {} {state}",
                    clause.keyword(),
                    position + 1,
                )))
            },
        };
    }

    match state {
        ChainState::Done(rule) => Ok(rule),
        state => Err(FuzzyError::MalformedRule(format!(
            "chain ends {state}, expected THEN ... IS"
        ))),
    }
}
