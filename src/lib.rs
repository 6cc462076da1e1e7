#![allow(clippy::module_inception)]

use std::{fmt::Display, rc::Rc};

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod escape;
pub mod frame;
pub mod ir;
pub mod macros;
pub mod symbol;
pub mod temp;
pub mod translate;
pub mod type_checker;
pub mod types;

/// Byte offset into a source file, paired with the file's name.
#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.1, self.0)
    }
}

/// Returns the 1-based line number, the line text and the column of `position`.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos >= source.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return Some((line_number, line.to_string(), line_pos));
        }

        start = end;
        line_number += 1;
    }

    None
}

pub fn render_error(error: &Error, source: &str) -> String {
    /*
        Error: IntegerRequired (integer required)
        -> prog.tig
           |
        20 | a + "b"
           | ----^
    */

    let position = error.get_position();
    let mut rendered = String::new();

    if let ErrorTip::None = error.get_tip() {
        rendered.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        rendered.push_str(&format!("Error: {} ({})\n", error.get_error_name(), error.get_tip()));
    }
    rendered.push_str(&format!("-> {}\n", position.1));

    let Some((line, line_text, line_pos)) = get_line_at_position(source, position.0) else {
        return rendered;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    rendered.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    rendered.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    rendered.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    rendered
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::{
        errors::errors::{Error, ErrorImpl},
        Position,
    };

    const SOURCE: &str = "let\n  var a := \"x\"\nin\n  a + 1\nend\n";

    #[test]
    fn test_get_line_at_position() {
        let (line_number, line, line_pos) = super::get_line_at_position(SOURCE, 6).unwrap();
        assert_eq!(line_number, 2);
        assert_eq!(line, "  var a := \"x\"\n");
        assert_eq!(line_pos, 2);

        let (line_number, line, line_pos) = super::get_line_at_position(SOURCE, 24).unwrap();
        assert_eq!(line_number, 4);
        assert_eq!(line, "  a + 1\n");
        assert_eq!(line_pos, 2);

        assert!(super::get_line_at_position(SOURCE, 400).is_none());
    }

    #[test]
    fn test_render_error() {
        let error = Error::new(
            ErrorImpl::IntegerRequired { received: "string".to_string() },
            Position(24, Rc::new("prog.tig".to_string())),
        );

        let rendered = super::render_error(&error, SOURCE);
        assert!(rendered.starts_with("Error: IntegerRequired"));
        assert!(rendered.contains("-> prog.tig"));
        assert!(rendered.contains("4 | a + 1"));
        assert!(rendered.trim_end().ends_with("^"));
    }
}
