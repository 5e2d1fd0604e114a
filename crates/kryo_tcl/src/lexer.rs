//! Word-level Tcl lexer (§4.4's "chunk-allocated AST, error recovery"
//! sibling for the adapter surface — here just enough to split a script
//! into commands and commands into words).
//!
//! Tcl's real substitution rules (`$var`, `[cmd]`, backslash escapes
//! inside bare words) are out of scope: this adapter only needs to
//! recognize widget-creation commands and their literal option values,
//! not execute a general-purpose scripting language (§1 Non-goals).

use crate::error::{TclError, TclResult};

/// Split `source` into commands, each a list of words. Commands are
/// terminated by `;` or a newline; `#` starts a line comment when it
/// begins a command. `{braced}` words are taken verbatim (no escape
/// processing, matching Tcl's own brace semantics); `"quoted"` words
/// process `\" \\ \n \t` escapes; bare words run to the next whitespace.
pub fn split_commands(source: &str) -> TclResult<Vec<Vec<String>>> {
    let mut commands = Vec::new();
    let mut words = Vec::new();
    let chars: Vec<char> = source.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            ' ' | '\t' | '\r' => {
                i += 1;
            }
            '\n' | ';' => {
                i += 1;
                if !words.is_empty() {
                    commands.push(std::mem::take(&mut words));
                }
            }
            '#' if words.is_empty() => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            '{' => {
                i += 1;
                let mut depth = 1usize;
                let word_start = i;
                while i < chars.len() && depth > 0 {
                    match chars[i] {
                        '{' => depth += 1,
                        '}' => depth -= 1,
                        _ => {}
                    }
                    i += 1;
                }
                if depth != 0 {
                    return Err(TclError::UnterminatedBrace(commands.len()));
                }
                words.push(chars[word_start..i - 1].iter().collect());
            }
            '"' => {
                i += 1;
                let mut word = String::new();
                let mut closed = false;
                while i < chars.len() {
                    match chars[i] {
                        '"' => {
                            i += 1;
                            closed = true;
                            break;
                        }
                        '\\' if i + 1 < chars.len() => {
                            let escaped = chars[i + 1];
                            word.push(match escaped {
                                'n' => '\n',
                                't' => '\t',
                                'r' => '\r',
                                other => other,
                            });
                            i += 2;
                        }
                        c => {
                            word.push(c);
                            i += 1;
                        }
                    }
                }
                if !closed {
                    return Err(TclError::UnterminatedString(commands.len()));
                }
                words.push(word);
            }
            _ => {
                let word_start = i;
                while i < chars.len() && !matches!(chars[i], ' ' | '\t' | '\r' | '\n' | ';') {
                    i += 1;
                }
                words.push(chars[word_start..i].iter().collect());
            }
        }
    }
    if !words.is_empty() {
        commands.push(words);
    }
    Ok(commands)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_simple_command_into_words() {
        let commands = split_commands("button .b -text Hi\n").unwrap();
        assert_eq!(commands, vec![vec!["button", ".b", "-text", "Hi"]]);
    }

    #[test]
    fn semicolon_separates_commands_on_one_line() {
        let commands = split_commands("frame .f; button .f.b -text Go").unwrap();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[1][0], "button");
    }

    #[test]
    fn comment_lines_are_skipped() {
        let commands = split_commands("# a comment\nframe .f\n").unwrap();
        assert_eq!(commands, vec![vec!["frame", ".f"]]);
    }

    #[test]
    fn quoted_word_processes_escapes_and_keeps_spaces() {
        let commands = split_commands(r#"label .l -text "Hello\nWorld""#).unwrap();
        assert_eq!(commands[0][3], "Hello\nWorld");
    }

    #[test]
    fn braced_word_is_taken_verbatim() {
        let commands = split_commands("button .b -command {puts \"hi\"}").unwrap();
        assert_eq!(commands[0][3], "puts \"hi\"");
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        assert!(split_commands(r#"label .l -text "oops"#).is_err());
    }
}
