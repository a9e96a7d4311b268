pub mod equiv;
pub mod name;
pub mod parser;
pub mod reduce;
pub mod render;
pub mod term;

pub use equiv::is_equal;
pub use name::{fresh_name, is_identifier, Name, NameError};
pub use parser::{parse, parse_with, ParseError, Syntax};
pub use reduce::{reduce, ReduceOptions};
pub use render::to_html;
pub use term::{alpha_convert, apply, substitute, Term, TermRef};
