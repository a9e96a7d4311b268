use std::{fmt, rc::Rc};

use crate::name::{fresh_name, Name};

pub type TermRef = Rc<Term>;

#[derive(PartialEq, Eq, Debug)]
pub enum Term {
    /// `x`
    Var(Name),
    /// `λx→t`
    Abs(Name, TermRef),
    /// `t t`
    Apply(TermRef, TermRef),
}

impl Term {
    pub fn var(name: Name) -> TermRef {
        Rc::new(Term::Var(name))
    }

    pub fn abs(bound: Name, body: TermRef) -> TermRef {
        Rc::new(Term::Abs(bound, body))
    }

    pub fn app(lhs: TermRef, rhs: TermRef) -> TermRef {
        Rc::new(Term::Apply(lhs, rhs))
    }

    pub fn has_free(&self, name: &Name) -> bool {
        match self {
            Term::Var(var) => var == name,
            Term::Abs(bound, body) => bound != name && body.has_free(name),
            Term::Apply(lhs, rhs) => lhs.has_free(name) || rhs.has_free(name),
        }
    }

    /// Free occurrences in left-to-right order, duplicates kept. An
    /// abstraction strikes at most one occurrence of its bound name, which
    /// can over-report; the result is only ever used as a collision set.
    pub fn free_vars(&self) -> Vec<Name> {
        match self {
            Term::Var(var) => vec![var.clone()],
            Term::Abs(bound, body) => {
                let mut vars = body.free_vars();
                if let Some(at) = vars.iter().position(|var| var == bound) {
                    vars.remove(at);
                }
                vars
            }
            Term::Apply(lhs, rhs) => {
                let mut vars = lhs.free_vars();
                vars.extend(rhs.free_vars());
                vars
            }
        }
    }
}

/// Replaces every free occurrence of `name` with `replacement`, renaming a
/// bound variable first whenever the replacement would be captured by it.
/// Unchanged subtrees keep their identity (same `Rc`).
pub fn substitute(term: &TermRef, name: &Name, replacement: &TermRef) -> TermRef {
    match term.as_ref() {
        Term::Var(var) => {
            if var == name {
                replacement.clone()
            } else {
                term.clone()
            }
        }
        Term::Apply(lhs, rhs) => {
            let new_lhs = substitute(lhs, name, replacement);
            let new_rhs = substitute(rhs, name, replacement);
            if Rc::ptr_eq(&new_lhs, lhs) && Rc::ptr_eq(&new_rhs, rhs) {
                term.clone()
            } else {
                Term::app(new_lhs, new_rhs)
            }
        }
        Term::Abs(bound, body) => {
            if bound == name {
                // the target is shadowed throughout the body
                return term.clone();
            }
            if replacement.has_free(bound) {
                let mut taken = body.free_vars();
                taken.extend(replacement.free_vars());
                let renamed = fresh_name(&taken);
                let renamed_body = substitute(body, bound, &Term::var(renamed.clone()));
                Term::abs(renamed, substitute(&renamed_body, name, replacement))
            } else {
                Term::abs(bound.clone(), substitute(body, name, replacement))
            }
        }
    }
}

/// Renames the bound variable of an abstraction. A no-op unless the term is
/// an abstraction binding `old` whose body actually has `old` free.
pub fn alpha_convert(term: &TermRef, old: &Name, new: &Name) -> TermRef {
    match term.as_ref() {
        Term::Abs(bound, body) if bound == old && body.has_free(old) => {
            Term::abs(new.clone(), substitute(body, old, &Term::var(new.clone())))
        }
        _ => term.clone(),
    }
}

/// One beta step for a redex: `None` unless `term` is an abstraction. When
/// the bound name does not occur free the argument is discarded.
pub fn apply(term: &TermRef, argument: &TermRef) -> Option<TermRef> {
    match term.as_ref() {
        Term::Abs(bound, body) => Some(if body.has_free(bound) {
            substitute(body, bound, argument)
        } else {
            body.clone()
        }),
        _ => None,
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Var(name) => write!(f, "{name}"),
            Term::Abs(bound, body) => write!(f, "λ{bound}→{body}"),
            Term::Apply(lhs, rhs) => {
                match lhs.as_ref() {
                    Term::Abs(..) => write!(f, "({lhs})")?,
                    _ => write!(f, "{lhs}")?,
                }
                match rhs.as_ref() {
                    Term::Var(_) => write!(f, "{rhs}"),
                    _ => write!(f, "({rhs})"),
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    macro_rules! name {
        ($text:expr) => {
            crate::name::Name::new($text).unwrap()
        };
    }
    macro_rules! var {
        ($text:expr) => {
            Term::var(name!($text))
        };
    }
    macro_rules! lambda {
        ($bound:expr, $body:expr) => {
            Term::abs(name!($bound), $body)
        };
    }
    macro_rules! apply {
        ($lhs:expr, $rhs:expr) => {
            Term::app($lhs, $rhs)
        };
    }

    #[test]
    fn has_free_respects_binders() {
        let term = lambda!("x", apply!(var!("x"), var!("y")));
        assert!(!term.has_free(&name!("x")));
        assert!(term.has_free(&name!("y")));
        assert!(!term.has_free(&name!("z")));
    }

    #[test]
    fn free_vars_strike_one_bound_occurrence() {
        let term = lambda!("x", apply!(var!("x"), var!("y")));
        assert_eq!(term.free_vars(), vec![name!("y")]);

        // duplicates survive concatenation, and the binder removes only one
        let twice = lambda!("x", apply!(var!("x"), var!("x")));
        assert_eq!(twice.free_vars(), vec![name!("x")]);

        let pair = apply!(apply!(var!("x"), var!("y")), var!("x"));
        assert_eq!(pair.free_vars(), vec![name!("x"), name!("y"), name!("x")]);
    }

    #[test]
    fn substitute_hits_free_variables_only() {
        let replacement = lambda!("z", var!("z"));
        assert_eq!(
            substitute(&var!("x"), &name!("x"), &replacement),
            replacement
        );
        assert_eq!(substitute(&var!("y"), &name!("x"), &replacement), var!("y"));

        // shadowed target: the abstraction comes back untouched
        let shadowed = lambda!("x", var!("x"));
        let out = substitute(&shadowed, &name!("x"), &replacement);
        assert!(Rc::ptr_eq(&out, &shadowed));
    }

    #[test]
    fn substitute_shares_unchanged_subtrees() {
        let term = apply!(var!("a"), var!("b"));
        let out = substitute(&term, &name!("x"), &var!("c"));
        assert!(Rc::ptr_eq(&out, &term));
    }

    #[test]
    fn substitute_avoids_capture() {
        // (λy→y x)[x := y] must not capture the replacement's y
        let term = lambda!("y", apply!(var!("y"), var!("x")));
        let out = substitute(&term, &name!("x"), &var!("y"));
        assert_eq!(out, lambda!("z", apply!(var!("z"), var!("y"))));

        let Term::Abs(bound, _) = out.as_ref() else {
            panic!("expected an abstraction, got {out}");
        };
        assert_ne!(bound, &name!("y"));
    }

    #[test]
    fn alpha_convert_renames_or_leaves_alone() {
        let term = lambda!("x", apply!(var!("x"), var!("y")));
        assert_eq!(
            alpha_convert(&term, &name!("x"), &name!("z")),
            lambda!("z", apply!(var!("z"), var!("y")))
        );

        // wrong bound name: identity
        let same = alpha_convert(&term, &name!("w"), &name!("z"));
        assert!(Rc::ptr_eq(&same, &term));

        // bound name unused in the body: identity
        let constant = lambda!("x", var!("y"));
        let same = alpha_convert(&constant, &name!("x"), &name!("z"));
        assert!(Rc::ptr_eq(&same, &constant));
    }

    #[test]
    fn apply_substitutes_or_discards() {
        let identity = lambda!("x", var!("x"));
        let argument = var!("a");
        assert_eq!(apply(&identity, &argument), Some(var!("a")));

        // bound name absent: the argument is dropped, the body aliased
        let constant = lambda!("x", var!("y"));
        let out = apply(&constant, &argument).unwrap();
        assert_eq!(out, var!("y"));

        assert_eq!(apply(&var!("x"), &argument), None);
        assert_eq!(apply(&apply!(var!("x"), var!("y")), &argument), None);
    }

    #[test]
    fn display_parenthesizes_like_the_surface_syntax() {
        assert_eq!(lambda!("x", var!("x")).to_string(), "λx→x");
        assert_eq!(
            apply!(apply!(var!("a"), var!("b")), var!("c")).to_string(),
            "abc"
        );
        assert_eq!(
            apply!(var!("a"), apply!(var!("b"), var!("c"))).to_string(),
            "a(bc)"
        );
        assert_eq!(
            apply!(lambda!("x", var!("x")), var!("a")).to_string(),
            "(λx→x)a"
        );
        assert_eq!(
            apply!(var!("a"), lambda!("x", var!("x"))).to_string(),
            "a(λx→x)"
        );
    }
}
