//! Shell command parsing.
//!
//! Commands are whitespace-separated words; a double-quoted word may
//! contain spaces. Field names are matched against the column labels
//! ignoring case, and may be written with spaces, dashes or underscores
//! (`branch-code`, `"Branch Code"`, `branch code`).

use std::str::FromStr;

use cutoffs_engine::{PageSize, SortDirection, SortKey, SortRole};
use cutoffs_debug::TraceEvent;
use cutoffs_foundation::{Category, Error, FilterField, Result};

/// Number of trace records `trace last` shows by default.
pub const DEFAULT_TRACE_COUNT: usize = 10;

/// Trace sub-commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraceCommand {
    /// Enable human-readable tracing.
    On,
    /// Disable tracing.
    Off,
    /// Enable JSON tracing.
    Json,
    /// Show the most recent records.
    Last(usize),
    /// Show the records of revisions `from..=to`.
    Revisions {
        /// First revision.
        from: u64,
        /// Last revision.
        to: u64,
    },
    /// Record only these event types (empty records everything).
    Only(Vec<String>),
    /// Show buffer statistics.
    Stats,
    /// Empty the buffer.
    Clear,
}

/// A parsed shell command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Show the current page.
    Show,
    /// Toggle a filter value.
    Filter {
        /// The field.
        field: FilterField,
        /// The value.
        value: String,
    },
    /// Remove a filter value.
    Unfilter {
        /// The field.
        field: FilterField,
        /// The value.
        value: String,
    },
    /// Clear one field's selection, or all of them.
    Clear(Option<FilterField>),
    /// Set a field's search text (empty clears it).
    Search {
        /// The field.
        field: FilterField,
        /// The text.
        text: String,
    },
    /// List a field's candidate values.
    Values(FilterField),
    /// Show the filter card.
    Filters,
    /// Show the sort roles and the secondary choices.
    Sorts,
    /// Assign or empty a sort role.
    Sort {
        /// The role.
        role: SortRole,
        /// The category, `None` to empty the role.
        category: Option<Category>,
    },
    /// Flip the direction of the role holding a category.
    Flip(Category),
    /// Set a role's direction.
    Dir {
        /// The role.
        role: SortRole,
        /// The direction.
        direction: SortDirection,
    },
    /// Go to a page.
    Page(usize),
    /// Next page.
    Next,
    /// Previous page.
    Prev,
    /// Change the page size.
    Rows(PageSize),
    /// Tracing controls.
    Trace(TraceCommand),
    /// Show help.
    Help,
    /// Leave the shell.
    Quit,
}

/// Command words, for completion.
pub const COMMAND_WORDS: [&str; 17] = [
    "show", "filter", "unfilter", "clear", "search", "values", "filters", "sort", "flip", "dir",
    "page", "next", "prev", "rows", "trace", "help", "quit",
];

/// Argument words that are not field names or categories.
pub const ARGUMENT_WORDS: [&str; 13] = [
    "primary", "secondary", "none", "asc", "desc", "on", "off", "json", "last", "rev", "only",
    "stats", "clear",
];

/// Splits a line into words, honoring double quotes.
///
/// # Errors
///
/// Returns an error if a quote is left open.
pub fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                quoted = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if quoted || !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
                quoted = false;
            }
            c => current.push(c),
        }
    }

    if in_quotes {
        return Err(Error::invalid_command("unterminated quote"));
    }
    if quoted || !current.is_empty() {
        words.push(current);
    }
    Ok(words)
}

/// Takes a field name from the front of `words`, trying a two-word name
/// first so that `college code X` works without quotes.
fn take_field(words: &[String]) -> Result<(FilterField, &[String])> {
    if words.len() >= 2 {
        if let Ok(field) = format!("{} {}", words[0], words[1]).parse::<FilterField>() {
            return Ok((field, &words[2..]));
        }
    }
    match words.first() {
        Some(word) => Ok((word.parse::<FilterField>()?, &words[1..])),
        None => Err(Error::invalid_command("expected a field name")),
    }
}

fn rest(words: &[String]) -> String {
    words.join(" ")
}

fn expect_end(words: &[String]) -> Result<()> {
    match words.first() {
        None => Ok(()),
        Some(extra) => Err(Error::invalid_command(format!("unexpected {extra:?}"))),
    }
}

fn one<'a>(words: &'a [String], what: &str) -> Result<&'a str> {
    match words {
        [word] => Ok(word),
        [] => Err(Error::invalid_command(format!("expected {what}"))),
        [_, extra, ..] => Err(Error::invalid_command(format!("unexpected {extra:?}"))),
    }
}

/// Parses a sort key written `CATEGORY[:asc|:desc]`; the direction
/// defaults to descending.
///
/// # Errors
///
/// Returns an error for an unknown category or direction.
pub fn parse_sort_key(text: &str) -> Result<SortKey> {
    let (category, direction) = match text.split_once(':') {
        Some((category, direction)) => (category, direction.parse::<SortDirection>()?),
        None => (text, SortDirection::default()),
    };
    Ok(SortKey::new(category.parse::<Category>()?, direction))
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let words = tokenize(line)?;
        let Some((head, args)) = words.split_first() else {
            return Err(Error::invalid_command("empty command"));
        };

        let command = match head.to_ascii_lowercase().as_str() {
            "show" | "ls" => {
                expect_end(args)?;
                Self::Show
            }
            "filter" | "unfilter" => {
                let (field, value) = take_field(args)?;
                if value.is_empty() {
                    return Err(Error::invalid_command(format!("expected a value for {field}")));
                }
                let value = rest(value);
                if head.eq_ignore_ascii_case("filter") {
                    Self::Filter { field, value }
                } else {
                    Self::Unfilter { field, value }
                }
            }
            "clear" => {
                if args.is_empty() {
                    Self::Clear(None)
                } else {
                    let (field, extra) = take_field(args)?;
                    expect_end(extra)?;
                    Self::Clear(Some(field))
                }
            }
            "search" => {
                let (field, text) = take_field(args)?;
                Self::Search {
                    field,
                    text: rest(text),
                }
            }
            "values" => {
                let (field, extra) = take_field(args)?;
                expect_end(extra)?;
                Self::Values(field)
            }
            "filters" => {
                expect_end(args)?;
                Self::Filters
            }
            "sort" => {
                let (role, category) = match args {
                    [] => return Ok(Self::Sorts),
                    [role, category] => (role.parse::<SortRole>()?, category),
                    _ => {
                        return Err(Error::invalid_command(
                            "usage: sort [primary|secondary CATEGORY|none]",
                        ));
                    }
                };
                let category = if category.eq_ignore_ascii_case("none") {
                    None
                } else {
                    Some(category.parse()?)
                };
                Self::Sort { role, category }
            }
            "flip" => Self::Flip(one(args, "a category")?.parse()?),
            "dir" => match args {
                [role, direction] => Self::Dir {
                    role: role.parse()?,
                    direction: direction.parse()?,
                },
                _ => {
                    return Err(Error::invalid_command(
                        "usage: dir primary|secondary asc|desc",
                    ));
                }
            },
            "page" => {
                let text = one(args, "a page number")?;
                let page = text
                    .parse()
                    .map_err(|_| Error::invalid_command(format!("not a page number: {text}")))?;
                Self::Page(page)
            }
            "next" | "n" => {
                expect_end(args)?;
                Self::Next
            }
            "prev" | "p" => {
                expect_end(args)?;
                Self::Prev
            }
            "rows" => Self::Rows(one(args, "a page size")?.parse()?),
            "trace" => Self::Trace(parse_trace(args)?),
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => {
                return Err(Error::invalid_command(format!(
                    "unknown command: {other} (try \"help\")"
                )));
            }
        };
        Ok(command)
    }
}

fn revision(text: &str) -> Result<u64> {
    text.parse()
        .map_err(|_| Error::invalid_command(format!("not a revision: {text}")))
}

fn parse_trace(args: &[String]) -> Result<TraceCommand> {
    let Some((sub, rest)) = args.split_first() else {
        return Err(Error::invalid_command(
            "usage: trace on|off|json|last [N]|rev A [B]|only [EVENT...]|stats|clear",
        ));
    };
    let command = match sub.to_ascii_lowercase().as_str() {
        "on" => TraceCommand::On,
        "off" => TraceCommand::Off,
        "json" => TraceCommand::Json,
        "last" => {
            let count = match rest.first() {
                Some(n) => n
                    .parse()
                    .map_err(|_| Error::invalid_command(format!("not a count: {n}")))?,
                None => DEFAULT_TRACE_COUNT,
            };
            return Ok(TraceCommand::Last(count));
        }
        "rev" => match rest {
            [from] => {
                let from = revision(from)?;
                return Ok(TraceCommand::Revisions { from, to: from });
            }
            [from, to] => {
                let (from, to) = (revision(from)?, revision(to)?);
                if from > to {
                    return Err(Error::invalid_command(format!(
                        "empty revision range: {from}..{to}"
                    )));
                }
                return Ok(TraceCommand::Revisions { from, to });
            }
            _ => return Err(Error::invalid_command("usage: trace rev A [B]")),
        },
        "only" => {
            let types = parse_event_types(rest)?;
            return Ok(TraceCommand::Only(types));
        }
        "stats" => TraceCommand::Stats,
        "clear" => TraceCommand::Clear,
        other => {
            return Err(Error::invalid_command(format!("unknown trace option: {other}")));
        }
    };
    expect_end(rest)?;
    Ok(command)
}

/// Checks event type names, accepting `all` for no restriction.
///
/// # Errors
///
/// Returns an error naming the first unknown event type.
pub fn parse_event_types(words: &[String]) -> Result<Vec<String>> {
    if let [word] = words {
        if word.eq_ignore_ascii_case("all") {
            return Ok(Vec::new());
        }
    }
    words
        .iter()
        .map(|word| {
            let name = word.to_ascii_lowercase();
            if TraceEvent::TYPES.contains(&name.as_str()) {
                Ok(name)
            } else {
                Err(Error::invalid_command(format!(
                    "unknown event type: {word} (one of {})",
                    TraceEvent::TYPES.join(", ")
                )))
            }
        })
        .collect()
}
