//! Fuzzy sets over bounded universes, rules chained as
//! `IF x IS a AND y IS b THEN z IS c`, and defuzzification back to a crisp
//! value.
//!
//! ```
//! use fuzzy_rulebase::{DefuzzificationOp, RuleBase, Universe};
//!
//! # fn main() -> fuzzy_rulebase::Result<()> {
//! let temperature = Universe::new("temperature", 0., 50.)?;
//! let warm = temperature.multipoint([(17., 0.), (20., 1.), (26., 1.), (29., 0.)])?;
//! let today = temperature.singleton(19.)?;
//!
//! let tourists = Universe::new("tourists", 0., 100.)?;
//! let medium = tourists.triangular(50., 100.)?;
//! let count = tourists.singleton(0.)?;
//!
//! let mut rules = RuleBase::new();
//! rules.new_rule().if_(&today).is(&warm).then(&count).is(&medium);
//!
//! let expected = rules.infer(DefuzzificationOp::Cog)?;
//! assert!((expected - 50.).abs() < 0.01);
//! # Ok(())
//! # }
//! ```

mod config;
mod dsl;
mod error;
mod inference;
mod linspace;
mod math;
mod ops;
mod rules;
mod set;
mod terms;
mod universe;
mod variable;

pub use config::Config;
pub use dsl::{AfterAnd, AfterIf, AfterIs, AfterOr, AfterThen, Clause, RuleBuilder, Start};
pub use error::{FuzzyError, Result};
pub use inference::{defuzzify, defuzzify_with};
pub use ops::{AndOp, DefuzzificationOp, ImplicationOp, OrOp};
pub use rules::{RuleBase, RuleKey};
pub use set::{FuzzySet, MultiPointSet, Point, Singleton};
pub use terms::{Key, Term, Terms};
pub use universe::Universe;
pub use variable::LinguisticVariable;
