//! Input highlighting for the shell.

use std::borrow::Cow;

use cutoffs_foundation::Category;

use crate::command::COMMAND_WORDS;

const BOLD_BLUE: &str = "\x1b[1;34m";
const CYAN: &str = "\x1b[36m";
const YELLOW: &str = "\x1b[33m";
const MAGENTA: &str = "\x1b[35m";
const RESET: &str = "\x1b[0m";

/// Highlighter for shell commands.
///
/// The leading command word is bold blue, category codes are cyan, quoted
/// text is yellow and numbers are magenta.
#[derive(Debug, Default)]
pub struct CommandHighlighter;

impl CommandHighlighter {
    /// Creates a new highlighter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Highlight a line of input.
    #[allow(clippy::unused_self)]
    #[must_use]
    pub fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let mut result = String::with_capacity(line.len() * 2);
        let mut chars = line.char_indices().peekable();
        let mut first_word = true;

        while let Some((start, c)) = chars.next() {
            if c.is_whitespace() {
                result.push(c);
                continue;
            }

            if c == '"' {
                let mut end = line.len();
                for (i, next) in chars.by_ref() {
                    if next == '"' {
                        end = i + 1;
                        break;
                    }
                }
                push_colored(&mut result, YELLOW, &line[start..end]);
                first_word = false;
                continue;
            }

            let mut end = line.len();
            while let Some(&(i, next)) = chars.peek() {
                if next.is_whitespace() || next == '"' {
                    end = i;
                    break;
                }
                chars.next();
            }
            let word = &line[start..end];

            if first_word && COMMAND_WORDS.contains(&word) {
                push_colored(&mut result, BOLD_BLUE, word);
            } else if is_category(word) {
                push_colored(&mut result, CYAN, word);
            } else if word.chars().all(|ch| ch.is_ascii_digit()) {
                push_colored(&mut result, MAGENTA, word);
            } else {
                result.push_str(word);
            }
            first_word = false;
        }

        Cow::Owned(result)
    }
}

fn is_category(word: &str) -> bool {
    // `OC:asc` highlights as a sort key
    let code = word.split(':').next().unwrap_or(word);
    code.parse::<Category>().is_ok()
}

fn push_colored(out: &mut String, color: &str, text: &str) {
    out.push_str(color);
    out.push_str(text);
    out.push_str(RESET);
}
