use crate::{
    name::Name,
    term::{Term, TermRef},
};

/// Alpha-equivalence. Terms are walked in lockstep under paired binder
/// stacks: bound variables match iff bound at the same depth, free variables
/// iff they are the same name.
pub fn is_equal(lhs: &TermRef, rhs: &TermRef) -> bool {
    fn rec<'a>(
        lhs: &'a Term,
        rhs: &'a Term,
        lhs_bound: &mut Vec<&'a Name>,
        rhs_bound: &mut Vec<&'a Name>,
    ) -> bool {
        match (lhs, rhs) {
            (Term::Var(x), Term::Var(y)) => {
                let lhs_depth = lhs_bound.iter().rev().position(|&bound| bound == x);
                let rhs_depth = rhs_bound.iter().rev().position(|&bound| bound == y);
                match (lhs_depth, rhs_depth) {
                    (Some(i), Some(j)) => i == j,
                    (None, None) => x == y,
                    _ => false,
                }
            }
            (Term::Abs(x, lhs_body), Term::Abs(y, rhs_body)) => {
                lhs_bound.push(x);
                rhs_bound.push(y);
                let equal = rec(lhs_body, rhs_body, lhs_bound, rhs_bound);
                lhs_bound.pop();
                rhs_bound.pop();
                equal
            }
            (Term::Apply(f, a), Term::Apply(g, b)) => {
                rec(f, g, lhs_bound, rhs_bound) && rec(a, b, lhs_bound, rhs_bound)
            }
            _ => false,
        }
    }
    rec(lhs, rhs, &mut vec![], &mut vec![])
}
