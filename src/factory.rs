//! The formula factory: owner of every formula node.
//!
//! All formulas are created through the smart constructors of [`FormulaFactory`].
//! The factory normalizes trivial cases (constants, double negation, duplicate
//! operands, ...) and hash-conses the result, so that structurally equal
//! formulas are represented by the same [`FormulaRef`].
//!
//! # Examples
//!
//! ```
//! use formula_qe::factory::FormulaFactory;
//!
//! let ff = FormulaFactory::default();
//! let a = ff.variable("a");
//! let b = ff.variable("b");
//!
//! let f = ff.and(a, b);
//! assert_eq!(f, ff.and(b, a));
//! assert_eq!(ff.and(f, ff.not(a)), ff.falsum());
//! assert_eq!(ff.to_string(ff.implication(f, ff.or(a, b))), "a & b => a | b");
//! ```

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt::Debug;
use std::rc::Rc;

use log::debug;
use num_bigint::BigUint;

use crate::cache::{Cache, TransformationKey};
use crate::error::{FormulaError, Result};
use crate::node::{FType, Node};
use crate::reference::FormulaRef;
use crate::table::Table;
use crate::types::{Lit, Var};

/// Sizing of the factory's internal tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactoryConfig {
    /// Initial number of unique table buckets, as a power of two. The table grows on demand.
    pub table_bits: usize,
    /// Size of the transformation cache, as a power of two.
    pub cache_bits: usize,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            table_bits: 12,
            cache_bits: 12,
        }
    }
}

impl FactoryConfig {
    pub fn with_table_bits(mut self, bits: usize) -> Self {
        self.table_bits = bits;
        self
    }

    pub fn with_cache_bits(mut self, bits: usize) -> Self {
        self.cache_bits = bits;
        self
    }
}

pub struct FormulaFactory {
    table: RefCell<Table<Node>>,
    /// Commutative nodes (and, or, equivalence) keyed by their sorted operands.
    commutative: RefCell<HashMap<(FType, Box<[FormulaRef]>), FormulaRef>>,
    names: RefCell<Vec<Rc<str>>>,
    vars: RefCell<HashMap<Rc<str>, Var>>,
    cache: RefCell<Cache<TransformationKey, FormulaRef>>,
    falsum: FormulaRef,
    verum: FormulaRef,
}

impl FormulaFactory {
    pub fn new(config: FactoryConfig) -> Self {
        assert!(
            config.table_bits <= 31,
            "Table bits should be in the range 0..=31"
        );
        assert!(
            config.cache_bits <= 31,
            "Cache bits should be in the range 0..=31"
        );

        let mut table = Table::new(config.table_bits);

        // Allocate the constants:
        let falsum = table.put(Node::False);
        assert_eq!(falsum, 1); // Make sure $false is (1).
        let verum = table.put(Node::True);
        assert_eq!(verum, 2); // Make sure $true is (2).

        Self {
            table: RefCell::new(table),
            commutative: RefCell::new(HashMap::new()),
            names: RefCell::new(Vec::new()),
            vars: RefCell::new(HashMap::new()),
            cache: RefCell::new(Cache::new(config.cache_bits)),
            falsum: FormulaRef::new(falsum as u32),
            verum: FormulaRef::new(verum as u32),
        }
    }
}

impl Default for FormulaFactory {
    fn default() -> Self {
        FormulaFactory::new(FactoryConfig::default())
    }
}

impl Debug for FormulaFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let table = self.table.borrow();
        f.debug_struct("FormulaFactory")
            .field("size", &table.len())
            .field("buckets", &table.num_buckets())
            .field("variables", &self.names.borrow().len())
            .finish()
    }
}

impl FormulaFactory {
    pub fn verum(&self) -> FormulaRef {
        self.verum
    }
    pub fn falsum(&self) -> FormulaRef {
        self.falsum
    }
    pub fn constant(&self, value: bool) -> FormulaRef {
        if value {
            self.verum
        } else {
            self.falsum
        }
    }

    pub fn is_true(&self, f: FormulaRef) -> bool {
        f == self.verum
    }
    pub fn is_false(&self, f: FormulaRef) -> bool {
        f == self.falsum
    }
    pub fn is_constant(&self, f: FormulaRef) -> bool {
        self.is_true(f) || self.is_false(f)
    }

    /// Number of nodes created so far, constants included.
    pub fn size(&self) -> usize {
        self.table.borrow().len()
    }

    /// Check whether the handle was produced by this factory.
    pub fn contains(&self, f: FormulaRef) -> bool {
        self.table.borrow().contains(f.index())
    }

    pub(crate) fn check(&self, f: FormulaRef) -> Result<()> {
        if self.contains(f) {
            Ok(())
        } else {
            Err(FormulaError::UnknownFormula(f))
        }
    }

    pub fn node(&self, f: FormulaRef) -> Node {
        self.table.borrow().value(f.index()).clone()
    }
    pub fn kind(&self, f: FormulaRef) -> FType {
        self.table.borrow().value(f.index()).kind()
    }
    pub fn operands(&self, f: FormulaRef) -> Vec<FormulaRef> {
        self.table.borrow().value(f.index()).operands()
    }

    fn mk(&self, node: Node) -> FormulaRef {
        let i = self.table.borrow_mut().put(node);
        FormulaRef::new(i as u32)
    }

    fn find(&self, node: &Node) -> Option<FormulaRef> {
        self.table
            .borrow()
            .find(node)
            .map(|i| FormulaRef::new(i as u32))
    }
}

// Variables and literals
impl FormulaFactory {
    /// Intern a variable name.
    pub fn variable_of(&self, name: &str) -> Var {
        if let Some(&v) = self.vars.borrow().get(name) {
            return v;
        }
        let name: Rc<str> = Rc::from(name);
        let mut names = self.names.borrow_mut();
        names.push(name.clone());
        let v = Var::new(names.len() as u32);
        debug!("new variable {} = '{}'", v, name);
        self.vars.borrow_mut().insert(name, v);
        v
    }

    /// Look up a variable by name without interning it.
    pub fn find_variable(&self, name: &str) -> Option<Var> {
        self.vars.borrow().get(name).copied()
    }

    /// The name a variable was interned with.
    ///
    /// # Panics
    ///
    /// Panics if the variable does not belong to this factory.
    pub fn name(&self, var: Var) -> Rc<str> {
        let names = self.names.borrow();
        let i = var.id() as usize - 1;
        assert!(i < names.len(), "Unknown variable {}", var);
        names[i].clone()
    }

    /// Sort variables by name.
    pub fn sorted_by_name(&self, vars: impl IntoIterator<Item = Var>) -> Vec<Var> {
        let mut vars: Vec<Var> = vars.into_iter().collect();
        vars.sort_by_cached_key(|&v| self.name(v));
        vars
    }

    /// The positive literal of the named variable.
    pub fn variable(&self, name: &str) -> FormulaRef {
        self.literal(name, true)
    }

    pub fn literal(&self, name: &str, phase: bool) -> FormulaRef {
        let v = self.variable_of(name);
        self.lit(v.lit(phase))
    }

    pub fn var(&self, var: Var) -> FormulaRef {
        self.lit(var.pos())
    }

    pub fn lit(&self, lit: Lit) -> FormulaRef {
        self.mk(Node::Literal(lit))
    }
}

// Smart constructors
impl FormulaFactory {
    /// Negation.
    ///
    /// ```text
    /// ~$true => $false
    /// ~$false => $true
    /// ~(a) => (~a)          literal
    /// ~~F => F
    /// ```
    pub fn not(&self, f: FormulaRef) -> FormulaRef {
        debug!("not(f = {})", f);
        match self.node(f) {
            Node::True => self.falsum,
            Node::False => self.verum,
            Node::Literal(lit) => self.lit(-lit),
            Node::Not(a) => a,
            _ => self.mk(Node::Not(f)),
        }
    }

    /// Negation of `f` if it already exists, without creating new nodes.
    fn find_negation(&self, f: FormulaRef) -> Option<FormulaRef> {
        match self.node(f) {
            Node::True => Some(self.falsum),
            Node::False => Some(self.verum),
            Node::Literal(lit) => self.find(&Node::Literal(-lit)),
            Node::Not(a) => Some(a),
            _ => self.find(&Node::Not(f)),
        }
    }

    /// Implication.
    ///
    /// ```text
    /// $false => F  =>  $true
    /// F => $true   =>  $true
    /// $true => F   =>  F
    /// F => $false  =>  ~F
    /// F => F       =>  $true
    /// ```
    pub fn implication(&self, left: FormulaRef, right: FormulaRef) -> FormulaRef {
        debug!("implication(left = {}, right = {})", left, right);
        if self.is_false(left) || self.is_true(right) {
            return self.verum;
        }
        if self.is_true(left) {
            return right;
        }
        if self.is_false(right) {
            return self.not(left);
        }
        if left == right {
            return self.verum;
        }
        self.mk(Node::Impl(left, right))
    }

    /// Equivalence. `F <=> G` and `G <=> F` are the same node.
    ///
    /// ```text
    /// $true <=> F   =>  F
    /// $false <=> F  =>  ~F
    /// F <=> F       =>  $true
    /// F <=> ~F      =>  $false
    /// ```
    pub fn equivalence(&self, left: FormulaRef, right: FormulaRef) -> FormulaRef {
        debug!("equivalence(left = {}, right = {})", left, right);
        if self.is_true(left) {
            return right;
        }
        if self.is_true(right) {
            return left;
        }
        if self.is_false(left) {
            return self.not(right);
        }
        if self.is_false(right) {
            return self.not(left);
        }
        if left == right {
            return self.verum;
        }
        if self.find_negation(left) == Some(right) {
            return self.falsum;
        }
        self.mk_commutative(FType::Equiv, vec![left, right])
    }

    pub fn and(&self, a: FormulaRef, b: FormulaRef) -> FormulaRef {
        self.and_many([a, b])
    }

    /// N-ary conjunction.
    ///
    /// Nested conjunctions are flattened, `$true` operands and duplicates are
    /// dropped, and `$false` or a complementary pair of operands yields `$false`.
    /// The empty conjunction is `$true`.
    pub fn and_many(&self, operands: impl IntoIterator<Item = FormulaRef>) -> FormulaRef {
        self.nary(FType::And, operands)
    }

    pub fn or(&self, a: FormulaRef, b: FormulaRef) -> FormulaRef {
        self.or_many([a, b])
    }

    /// N-ary disjunction, dual to [`and_many`][FormulaFactory::and_many].
    pub fn or_many(&self, operands: impl IntoIterator<Item = FormulaRef>) -> FormulaRef {
        self.nary(FType::Or, operands)
    }

    fn nary(&self, kind: FType, operands: impl IntoIterator<Item = FormulaRef>) -> FormulaRef {
        let (neutral, absorbing) = match kind {
            FType::And => (self.verum, self.falsum),
            FType::Or => (self.falsum, self.verum),
            _ => unreachable!("{} is not an n-ary operator", kind),
        };

        // Complementary operands as given, before flattening hides them:
        let operands: Vec<FormulaRef> = operands.into_iter().collect();
        let given: HashSet<FormulaRef> = operands.iter().copied().collect();
        for &op in &operands {
            if let Some(neg) = self.find_negation(op) {
                if given.contains(&neg) {
                    debug!("{}: complementary operands {} and {}", kind, op, neg);
                    return absorbing;
                }
            }
        }

        // Flatten nested operators of the same kind:
        let mut flat = Vec::new();
        for op in operands {
            let node = self.node(op);
            if node.kind() == kind {
                flat.extend(node.operands());
            } else {
                flat.push(op);
            }
        }
        debug!("{}({:?})", kind, flat);

        let mut ops = Vec::with_capacity(flat.len());
        let mut seen = HashSet::new();
        for op in flat {
            if op == absorbing {
                return absorbing;
            }
            if op == neutral || !seen.insert(op) {
                continue;
            }
            if let Some(neg) = self.find_negation(op) {
                if seen.contains(&neg) {
                    debug!("{}: complementary operands {} and {}", kind, op, neg);
                    return absorbing;
                }
            }
            ops.push(op);
        }

        match ops.len() {
            0 => neutral,
            1 => ops[0],
            _ => self.mk_commutative(kind, ops),
        }
    }

    /// Hash-cons a node whose operands may be given in any order.
    ///
    /// The first construction fixes the stored operand order.
    fn mk_commutative(&self, kind: FType, operands: Vec<FormulaRef>) -> FormulaRef {
        let mut sorted = operands.clone();
        sorted.sort_unstable();
        let key = (kind, sorted.into_boxed_slice());
        if let Some(&f) = self.commutative.borrow().get(&key) {
            return f;
        }

        let node = match kind {
            FType::And => Node::And(Rc::from(operands)),
            FType::Or => Node::Or(Rc::from(operands)),
            FType::Equiv => {
                assert_eq!(operands.len(), 2);
                Node::Equiv(operands[0], operands[1])
            }
            _ => unreachable!("{} is not commutative", kind),
        };
        let f = self.mk(node);
        self.commutative.borrow_mut().insert(key, f);
        f
    }
}

// Queries
impl FormulaFactory {
    /// All nodes reachable from the given roots, roots included.
    pub fn descendants(&self, roots: impl IntoIterator<Item = FormulaRef>) -> HashSet<FormulaRef> {
        let mut visited = HashSet::new();
        let mut stack: Vec<FormulaRef> = roots.into_iter().collect();

        while let Some(f) = stack.pop() {
            if visited.insert(f) {
                stack.extend(self.operands(f));
            }
        }

        visited
    }

    /// Number of distinct nodes in the DAG rooted at `f`.
    pub fn number_of_nodes(&self, f: FormulaRef) -> usize {
        self.descendants([f]).len()
    }

    /// Variables occurring in `f`.
    pub fn variables(&self, f: FormulaRef) -> BTreeSet<Var> {
        self.literals(f).into_iter().map(|lit| lit.var()).collect()
    }

    /// Literals occurring in `f`.
    pub fn literals(&self, f: FormulaRef) -> BTreeSet<Lit> {
        let table = self.table.borrow();
        self.descendants([f])
            .into_iter()
            .filter_map(|g| match table.value(g.index()) {
                Node::Literal(lit) => Some(*lit),
                _ => None,
            })
            .collect()
    }

    /// Some variable occurring in `f`, if any.
    pub fn any_variable(&self, f: FormulaRef) -> Option<Var> {
        let mut stack = vec![f];
        let mut visited = HashSet::new();
        while let Some(g) = stack.pop() {
            if !visited.insert(g) {
                continue;
            }
            match self.node(g) {
                Node::Literal(lit) => return Some(lit.var()),
                node => stack.extend(node.operands()),
            }
        }
        None
    }

    /// Number of atoms (constants and literals) in the tree unfolding of `f`.
    ///
    /// Shared sub-formulas are counted once per occurrence, so the count can
    /// be exponential in the size of the DAG.
    pub fn number_of_atoms(&self, f: FormulaRef) -> BigUint {
        let mut cache = HashMap::new();
        self.number_of_atoms_(f, &mut cache)
    }

    fn number_of_atoms_(
        &self,
        f: FormulaRef,
        cache: &mut HashMap<FormulaRef, BigUint>,
    ) -> BigUint {
        if let Some(n) = cache.get(&f) {
            return n.clone();
        }
        let n = match self.node(f) {
            Node::False | Node::True | Node::Literal(_) => BigUint::from(1u32),
            node => node
                .operands()
                .into_iter()
                .map(|op| self.number_of_atoms_(op, cache))
                .sum(),
        };
        cache.insert(f, n.clone());
        n
    }
}

// Transformation cache
impl FormulaFactory {
    pub(crate) fn cached(&self, key: &TransformationKey) -> Option<FormulaRef> {
        self.cache.borrow().get(key).copied()
    }

    pub(crate) fn cache_result(&self, key: TransformationKey, result: FormulaRef) {
        self.cache.borrow_mut().insert(key, result);
    }

    pub fn cache_hits(&self) -> usize {
        self.cache.borrow().hits()
    }
    pub fn cache_misses(&self) -> usize {
        self.cache.borrow().misses()
    }

    pub fn clear_cache(&self) {
        debug!("Clearing transformation cache");
        self.cache.borrow_mut().clear();
    }
}
