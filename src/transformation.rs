use log::debug;

use crate::error::Result;
use crate::factory::FormulaFactory;
use crate::reference::FormulaRef;

/// A function from formulas to formulas, evaluated inside a factory.
pub trait FormulaTransformation {
    fn apply(&self, factory: &FormulaFactory, formula: FormulaRef) -> Result<FormulaRef>;

    /// Tag under which [`FormulaFactory::transform`] may memoise results.
    ///
    /// Only transformations whose result depends on nothing but the input
    /// formula may return a tag. Transformations carrying their own
    /// parameters must keep the default `None`.
    fn cache_key(&self) -> Option<&'static str> {
        None
    }
}

impl FormulaFactory {
    /// Apply a transformation, consulting the factory cache when the
    /// transformation allows it.
    pub fn transform<T>(&self, formula: FormulaRef, transformation: &T) -> Result<FormulaRef>
    where
        T: FormulaTransformation + ?Sized,
    {
        let Some(tag) = transformation.cache_key() else {
            return transformation.apply(self, formula);
        };

        let key = (tag, formula);
        if let Some(res) = self.cached(&key) {
            debug!("cache: {}({}) -> {}", tag, formula, res);
            return Ok(res);
        }
        let res = transformation.apply(self, formula)?;
        debug!("computed: {}({}) -> {}", tag, formula, res);
        self.cache_result(key, res);
        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use test_log::test;

    use super::*;

    /// Negation that counts how often it actually runs.
    struct CountingNegation {
        calls: Cell<usize>,
        cacheable: bool,
    }

    impl FormulaTransformation for CountingNegation {
        fn apply(&self, factory: &FormulaFactory, formula: FormulaRef) -> Result<FormulaRef> {
            self.calls.set(self.calls.get() + 1);
            Ok(factory.not(formula))
        }

        fn cache_key(&self) -> Option<&'static str> {
            self.cacheable.then_some("counting-negation")
        }
    }

    #[test]
    fn test_transform_cached() {
        let ff = FormulaFactory::default();
        let t = CountingNegation {
            calls: Cell::new(0),
            cacheable: true,
        };

        let a = ff.variable("a");
        let na = ff.not(a);
        assert_eq!(ff.transform(a, &t), Ok(na));
        assert_eq!(ff.transform(a, &t), Ok(na));
        assert_eq!(t.calls.get(), 1);
        assert_eq!(ff.cache_hits(), 1);

        ff.clear_cache();
        assert_eq!(ff.transform(a, &t), Ok(na));
        assert_eq!(t.calls.get(), 2);
    }

    #[test]
    fn test_transform_uncached() {
        let ff = FormulaFactory::default();
        let t = CountingNegation {
            calls: Cell::new(0),
            cacheable: false,
        };

        let a = ff.variable("a");
        ff.transform(a, &t).unwrap();
        ff.transform(a, &t).unwrap();
        assert_eq!(t.calls.get(), 2);
        assert_eq!(ff.cache_hits(), 0);
        assert_eq!(ff.cache_misses(), 0);
    }

    #[test]
    fn test_transform_dyn() {
        let ff = FormulaFactory::default();
        let t: Box<dyn FormulaTransformation> = Box::new(CountingNegation {
            calls: Cell::new(0),
            cacheable: true,
        });
        let a = ff.variable("a");
        assert_eq!(ff.transform(a, t.as_ref()), Ok(ff.not(a)));
    }
}
