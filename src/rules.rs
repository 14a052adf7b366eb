use crate::dsl::Expr;

/// The rule base: a declarative, ordered list of antecedent/consequent
/// pairs. Rules are plain data so the base can be enumerated and validated
/// independently of the inference algorithm, and evaluation order never
/// affects the result (min/max are commutative and associative).
#[derive(Default)]
pub struct Rules<T>(pub(crate) Vec<Rule<T>>);

impl<T> Rules<T> {
    pub fn new() -> Self {
        Rules(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Rules(Vec::with_capacity(capacity))
    }

    pub fn add(&mut self, premise: Expr<T>, consequence: Expr<T>) {
        self.0.push(Rule { premise, consequence });
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub(crate) struct Rule<T> {
    pub(crate) premise: Expr<T>,
    pub(crate) consequence: Expr<T>,
}

#[test]
fn test_rule_base_is_enumerable() {
    use crate::variable::VariableKey;

    let mut rules: Rules<u8> = Rules::with_capacity(2);

    assert!(rules.is_empty());

    rules.add(Expr::Is(VariableKey::default(), 1), Expr::Is(VariableKey::default(), 2));

    assert_eq!(rules.len(), 1);
    assert!(!rules.is_empty());
}
