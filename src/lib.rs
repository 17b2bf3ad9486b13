//! # formula-qe: Quantifier elimination over shared Boolean formulas
//!
//! **`formula-qe`** eliminates quantified variables from propositional
//! formulas by Shannon expansion. Formulas live in a hash-consed DAG owned by
//! a [`FormulaFactory`][crate::factory::FormulaFactory], so that structurally
//! equal sub-formulas are stored once and shared by all their parents.
//!
//! ## What does it compute?
//!
//! Given a formula `f` and variables `x1, ..., xn`, the universal quantifier
//! elimination produces a quantifier-free formula equivalent to
//! `∀x1 ... ∀xn. f`, one variable at a time:
//!
//! ```text
//! ∀x. f  =  f[true/x] ∧ f[false/x]
//! ```
//!
//! The existential variant joins the two cofactors with `∨` instead.
//!
//! ## Key Features
//!
//! - **Factory-Centric Architecture**: All formulas are built through the smart constructors of
//!   [`FormulaFactory`][crate::factory::FormulaFactory]. They simplify trivial cases and hash-cons the result.
//! - **Lightweight handles**: Formulas are referred to by copyable [`FormulaRef`][crate::reference::FormulaRef]
//!   handles, and equal handles mean structurally equal formulas.
//! - **Restriction**: Substitution of truth values for variables, the building block of the elimination.
//! - **Checking tools**: Model counting, tautology and equivalence checks, rendering, and Graphviz export.
//!
//! ## Basic Usage
//!
//! ```rust
//! use formula_qe::factory::FormulaFactory;
//! use formula_qe::qe::UniversalQuantifierElimination;
//! use formula_qe::transformation::FormulaTransformation;
//!
//! // 1. Initialize the factory
//! let ff = FormulaFactory::default();
//!
//! // 2. Build a formula: f = (x => a) & (~x => b)
//! let a = ff.variable("a");
//! let b = ff.variable("b");
//! let x = ff.variable("x");
//! let f = ff.and(ff.implication(x, a), ff.implication(ff.not(x), b));
//!
//! // 3. Eliminate x universally
//! let forall_x = UniversalQuantifierElimination::new([ff.variable_of("x")]);
//! let g = forall_x.apply(&ff, f).unwrap();
//!
//! // 4. The result no longer mentions x
//! assert_eq!(g, ff.and(a, b));
//! assert_eq!(ff.to_string(g), "a & b");
//! ```
//!
//! ## Core Components
//!
//! - **[`factory`]**: The [`FormulaFactory`][crate::factory::FormulaFactory] and its smart constructors.
//! - **[`qe`]**: Universal and existential quantifier elimination.
//! - **[`restrict`]**: Restriction and evaluation under an [`Assignment`][crate::assignment::Assignment].
//! - **[`sat`]**: Model counting and equivalence checking by exhaustive expansion.
//! - **[`dot`]**: Utilities for visualizing formula DAGs using Graphviz.

pub mod assignment;
pub mod cache;
pub mod display;
pub mod dot;
pub mod error;
pub mod eval;
pub mod factory;
pub mod node;
pub mod qe;
pub mod reference;
pub mod restrict;
pub mod sat;
pub mod table;
pub mod transformation;
pub mod types;
pub mod utils;
