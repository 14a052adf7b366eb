use crate::variable::{Variable, VariableKey};

/// A rule premise: one or more `variable is term` propositions combined with
/// fuzzy AND. The fixed-rule systems this crate targets never branch on OR
/// inside a premise; OR shows up only as the max-aggregation across rules.
pub enum Expr<T> {
    Is(VariableKey, T),
    And(Vec<Expr<T>>),
}

impl<T> Expr<T> {
    pub fn and(self, rhs: Expr<T>) -> Self {
        Expr::And(vec![self, rhs])
    }

    /// Flattens the expression into its `(variable, term)` propositions.
    pub fn propositions(&self) -> Vec<(VariableKey, &T)> {
        let mut props = Vec::new();

        fn parse<'p, T>(expr: &'p Expr<T>, out: &mut Vec<(VariableKey, &'p T)>) {
            match expr {
                Expr::Is(var_key, term) => out.push((*var_key, term)),
                Expr::And(exprs) => {
                    for expr in exprs {
                        parse(expr, out);
                    }
                },
            }
        }

        parse(self, &mut props);

        props
    }
}

impl<I> Variable<I> {
    pub fn is<T>(self, rhs: I) -> Expr<T>
    where
        I: Into<T>,
    {
        Expr::Is(self.0, rhs.into())
    }
}

#[test]
fn test_propositions_flatten_nested_ands() {
    let key = VariableKey::default();
    let expr: Expr<u8> = Expr::Is(key, 1).and(Expr::Is(key, 2).and(Expr::Is(key, 3)));

    let terms: Vec<u8> = expr.propositions().into_iter().map(|(_, t)| *t).collect();

    assert_eq!(terms, vec![1, 2, 3]);
}
