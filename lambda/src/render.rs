use crate::{name::Name, parser::Syntax, term::Term};

/// Markup rendering. Variables are italic, free occurrences additionally
/// bold, and a `[a-z][0-9]+` name is split into a stem plus `<sub>` digits.
/// Head and separator glyphs come from `syntax`.
pub fn to_html(term: &Term, syntax: &Syntax) -> String {
    let mut out = String::new();
    write_term(term, syntax, &mut vec![], &mut out);
    out
}

fn write_term<'a>(
    term: &'a Term,
    syntax: &Syntax,
    bound: &mut Vec<&'a Name>,
    out: &mut String,
) {
    match term {
        Term::Var(name) => {
            let is_bound = bound.contains(&name);
            write_var(name, is_bound, out);
        }
        Term::Abs(name, body) => {
            out.push_str(syntax.head());
            write_var(name, true, out);
            out.push_str(syntax.separator());
            bound.push(name);
            write_term(body, syntax, bound, out);
            bound.pop();
        }
        Term::Apply(lhs, rhs) => {
            let group_lhs = matches!(lhs.as_ref(), Term::Abs(..));
            let group_rhs = !matches!(rhs.as_ref(), Term::Var(_));
            if group_lhs {
                out.push('(');
            }
            write_term(lhs, syntax, bound, out);
            if group_lhs {
                out.push(')');
            }
            out.push_str("&nbsp;");
            if group_rhs {
                out.push('(');
            }
            write_term(rhs, syntax, bound, out);
            if group_rhs {
                out.push(')');
            }
        }
    }
}

fn write_var(name: &Name, is_bound: bool, out: &mut String) {
    let (stem, subscript) = split_subscript(name.as_str());
    out.push_str("<i>");
    if is_bound {
        out.push_str(stem);
    } else {
        out.push_str("<b>");
        out.push_str(stem);
        out.push_str("</b>");
    }
    out.push_str("</i>");
    if let Some(digits) = subscript {
        out.push_str("<sub>");
        out.push_str(digits);
        out.push_str("</sub>");
    }
}

fn split_subscript(text: &str) -> (&str, Option<&str>) {
    // valid lowercase names carry only digits after the first character
    if text.starts_with(|c: char| c.is_ascii_lowercase()) && text.len() > 1 {
        (&text[..1], Some(&text[1..]))
    } else {
        (text, None)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::parse;

    fn html(input: &str) -> String {
        to_html(&parse(input).unwrap(), &Syntax::default())
    }

    #[test]
    fn free_variables_are_bold() {
        assert_eq!(html(r"\x.xy"), "λ<i>x</i>→<i>x</i>&nbsp;<i><b>y</b></i>");
    }

    #[test]
    fn rebinding_shadows_for_the_inner_body() {
        assert_eq!(
            html(r"x \x.x"),
            "<i><b>x</b></i>&nbsp;(λ<i>x</i>→<i>x</i>)"
        );
    }

    #[test]
    fn digit_suffixes_become_subscripts() {
        assert_eq!(html("x1"), "<i><b>x</b></i><sub>1</sub>");
        assert_eq!(
            html(r"\x1.x1"),
            "λ<i>x</i><sub>1</sub>→<i>x</i><sub>1</sub>"
        );
        // uppercase names are never subscripted
        assert_eq!(html("A1"), "<i><b>A1</b></i>");
    }

    #[test]
    fn application_grouping_matches_display() {
        assert_eq!(
            html(r"(\x.x) y"),
            "(λ<i>x</i>→<i>x</i>)&nbsp;<i><b>y</b></i>"
        );
        assert_eq!(
            html("a (b c)"),
            "<i><b>a</b></i>&nbsp;(<i><b>b</b></i>&nbsp;<i><b>c</b></i>)"
        );
    }

    #[test]
    fn configured_glyphs_are_used() {
        let syntax = Syntax::new("λ", ".");
        assert_eq!(
            to_html(&parse(r"\x.x").unwrap(), &syntax),
            "λ<i>x</i>.<i>x</i>"
        );
    }
}
