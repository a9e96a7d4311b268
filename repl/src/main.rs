use anyhow::{bail, Result};
use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use lambda::{is_equal, parse_with, reduce, to_html, ParseError, ReduceOptions, Syntax, TermRef};
use rustyline::{error::ReadlineError, Editor};

const HISTORY: &str = "/tmp/lambda.history";
/// Reduction steps allowed before giving up on a divergent term.
const STEP_BUDGET: usize = 10_000;

#[derive(Clone, Copy, derive_more::Display, Debug)]
enum Strategy {
    #[display(fmt = "eager")]
    Eager,
    #[display(fmt = "lazy")]
    Lazy,
}

type CmdResult = Result<(), (String, ParseError)>;

#[derive(Default)]
struct Repl {
    syntax: Syntax,
    options: ReduceOptions,
}

impl Repl {
    fn strategy(&self) -> Strategy {
        if self.options.lazy_evaluation {
            Strategy::Lazy
        } else {
            Strategy::Eager
        }
    }

    fn parse(&self, input: &str) -> Result<TermRef, (String, ParseError)> {
        parse_with(&self.syntax, input).map_err(|e| (input.to_string(), e))
    }

    fn evaluate(&self, input: &str) -> CmdResult {
        if input.trim().is_empty() {
            return Ok(());
        }
        let mut term = self.parse(input)?;
        for _ in 0..STEP_BUDGET {
            match reduce(&term, self.options) {
                Some(next) => term = next,
                None => {
                    println!("{term}");
                    return Ok(());
                }
            }
        }
        println!("no normal form within {STEP_BUDGET} steps, stopped at {term}");
        Ok(())
    }

    fn reduce_once(&self, input: &str) -> CmdResult {
        let term = self.parse(input)?;
        match reduce(&term, self.options) {
            Some(next) => println!("{next}"),
            None => println!("already in normal form: {term}"),
        }
        Ok(())
    }

    fn show_parse(&self, input: &str) -> CmdResult {
        let term = self.parse(input)?;
        println!("{term:?}");
        Ok(())
    }

    fn show_free(&self, input: &str) -> CmdResult {
        let term = self.parse(input)?;
        let vars = term
            .free_vars()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        println!("{}", vars.join(" "));
        Ok(())
    }

    fn show_equal(&self, input: &str) -> CmdResult {
        let Some((lhs, rhs)) = input.split_once(',') else {
            eprintln!("usage: :equal term , term");
            return Ok(());
        };
        let lhs = self.parse(lhs)?;
        let rhs = self.parse(rhs)?;
        println!("{}", is_equal(&lhs, &rhs));
        Ok(())
    }

    fn show_html(&self, input: &str) -> CmdResult {
        let term = self.parse(input)?;
        println!("{}", to_html(&term, &self.syntax));
        Ok(())
    }

    fn handle(&mut self, input: &str) -> CmdResult {
        let (cmd, rest) = if let Some(stripped) = input.strip_prefix(':') {
            stripped
                .trim_start()
                .split_once(' ')
                .unwrap_or((stripped, ""))
        } else {
            ("", input)
        };
        match cmd {
            "" | "e" | "eval" | "evaluate" => self.evaluate(rest)?,
            "p" | "parse" => self.show_parse(rest)?,
            "r" | "reduce" => self.reduce_once(rest)?,
            "f" | "free" => self.show_free(rest)?,
            "eq" | "equal" => self.show_equal(rest)?,
            "html" => self.show_html(rest)?,
            "lazy" => {
                self.options.lazy_evaluation = !self.options.lazy_evaluation;
                println!("evaluation strategy: {}", self.strategy());
            }
            "keep" => {
                self.options.keep_lambda_body = !self.options.keep_lambda_body;
                println!(
                    "keep abstraction bodies: {}",
                    self.options.keep_lambda_body
                );
            }
            "head" => {
                let glyph = rest.trim();
                if glyph.is_empty() {
                    println!("abstraction head: {}", self.syntax.head());
                } else {
                    self.syntax.set_head(glyph);
                }
            }
            "sep" | "separator" => {
                let glyph = rest.trim();
                if glyph.is_empty() {
                    println!("abstraction separator: {}", self.syntax.separator());
                } else {
                    self.syntax.set_separator(glyph);
                }
            }
            "h" | "help" => show_help(),
            _ => {
                eprintln!("Unknown command {cmd}");
                show_help();
            }
        }
        Ok(())
    }
}

fn show_help() {
    println!(
        "{}",
        r#"
term                 -- reduce the term to normal form and print it
:parse      term     -- show the parsed term
:reduce     term     -- perform a single reduction step
:free       term     -- list the term's free variables
:equal      t1 , t2  -- check alpha-equivalence
:html       term     -- render the term as markup
:lazy                -- toggle lazy evaluation
:keep                -- toggle reduction inside abstraction bodies
:head       [glyph]  -- show or set the abstraction head glyph
:separator  [glyph]  -- show or set the abstraction separator glyph
:help                -- show this message
        "#
        .trim()
    );
}

fn build_report(error: &ParseError) -> Report {
    match error {
        ParseError::InvalidArgumentName { position } => {
            Report::build(ReportKind::Error, (), *position)
                .with_message("invalid argument name")
                .with_label(
                    Label::new(*position..*position + 1)
                        .with_message(format!(
                            "{}",
                            "expected a variable name here".fg(Color::Red)
                        ))
                        .with_color(Color::Red),
                )
        }
        ParseError::UnclosedTerm { position, .. } => {
            Report::build(ReportKind::Error, (), *position)
                .with_message("unclosed term")
                .with_label(
                    Label::new(*position..*position + 1)
                        .with_message(format!("{}", "expected `)` by here".fg(Color::Yellow)))
                        .with_color(Color::Yellow),
                )
        }
        ParseError::UnexpectedCharacter {
            character,
            position,
        } => Report::build(ReportKind::Error, (), *position)
            .with_message(format!("unexpected `{character}`"))
            .with_label(
                Label::new(*position..*position + 1)
                    .with_message(format!("unexpected {}", character.fg(Color::Red)))
                    .with_color(Color::Red),
            ),
        ParseError::MissingBody { position } => Report::build(ReportKind::Error, (), *position)
            .with_message("missing abstraction body")
            .with_label(
                Label::new(*position..*position + 1)
                    .with_message(format!("{}", "expected a body here".fg(Color::Red)))
                    .with_color(Color::Red),
            ),
        ParseError::EmptyInput => {
            Report::build(ReportKind::Error, (), 0).with_message("no term in input")
        }
    }
    .finish()
}

fn main() -> Result<()> {
    println!("Hi, this is an untyped lambda calculus REPL. :h to show help");
    println!();
    let mut repl = Repl::default();
    let mut editor = Editor::<()>::new();
    editor.load_history(HISTORY).ok();
    let mut pending: Option<String> = None;
    loop {
        match editor.readline(">> ") {
            Ok(mut line) if line.ends_with('\\') => {
                line.pop();
                line.push('\n');
                if let Some(pending) = pending.as_mut() {
                    pending.push_str(line.as_str());
                } else {
                    pending = Some(line);
                }
            }
            Ok(line) => {
                let input = if let Some(mut input) = pending.take() {
                    input.push_str(line.as_str());
                    input
                } else {
                    line
                };
                editor.add_history_entry(input.as_str());
                if let Err((source, error)) = repl.handle(input.trim()) {
                    build_report(&error).eprint(Source::from(&source))?;
                }
                editor.save_history(HISTORY).ok();
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                println!("Bye!");
                break;
            }
            Err(e) => bail!(e),
        }
    }
    Ok(())
}
