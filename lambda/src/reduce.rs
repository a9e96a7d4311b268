use crate::term::{apply, Term, TermRef};

#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct ReduceOptions {
    /// Apply a redex without reducing its argument first (normal-order
    /// style). Default is eager: the argument is driven to normal form
    /// before the beta step.
    pub lazy_evaluation: bool,
    /// Never reduce inside an abstraction body.
    pub keep_lambda_body: bool,
}

/// At most one beta step; `None` when `term` is already irreducible under
/// `options`. Repeated application to normal form is the caller's concern,
/// as is guarding against divergent terms.
pub fn reduce(term: &TermRef, options: ReduceOptions) -> Option<TermRef> {
    match term.as_ref() {
        Term::Var(_) => None,
        Term::Abs(bound, body) => {
            if options.keep_lambda_body {
                return None;
            }
            let body = reduce(body, options)?;
            Some(Term::abs(bound.clone(), body))
        }
        Term::Apply(lhs, rhs) => {
            if matches!(lhs.as_ref(), Term::Abs(..)) {
                if options.lazy_evaluation {
                    return apply(lhs, rhs);
                }
                if let Some(rhs) = reduce(rhs, options) {
                    return Some(Term::app(lhs.clone(), rhs));
                }
                apply(lhs, rhs)
            } else {
                if let Some(lhs) = reduce(lhs, options) {
                    return Some(Term::app(lhs, rhs.clone()));
                }
                if let Some(rhs) = reduce(rhs, options) {
                    return Some(Term::app(lhs.clone(), rhs));
                }
                None
            }
        }
    }
}
