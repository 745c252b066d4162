//! Command grammar for the interactive shell.
//!
//! A line is tokenized with quote support (`remove "Ann Chovey"` is two
//! tokens) and then parsed into a [`Command`]. Parsing is pure; no command
//! touches the directory here.

use crate::search::{Field, Refinement};

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `add` - prompt for fields and create a contact
    Add,
    /// `edit <query>` - edit the single contact matching the query
    Edit { query: Vec<String> },
    /// `note <query>` - edit just the notes field
    Note { query: Vec<String> },
    /// `remove <query>` - remove the contact(s) matching the query
    Remove { query: Vec<String> },
    /// `search <phrase> [-field value ...]` - simple or refined search
    Search {
        phrase: Vec<String>,
        refinements: Vec<Refinement>,
    },
    /// `group add <group> <query>`
    GroupAdd { group: String, query: Vec<String> },
    /// `group remove <group> <query>`
    GroupRemove { group: String, query: Vec<String> },
    /// `group create <name>`
    GroupCreate { name: String },
    /// `group delete <name>`
    GroupDelete { name: String },
    /// `group members <name>`
    GroupMembers { name: String },
    /// `group list` / `list groups`
    ListGroups,
    /// `list contacts`
    ListContacts,
    /// `info` - counts of contacts, companies, groups
    Info,
    /// `fix` - run the index repair pass
    Fix,
    /// `load <file>`
    Load { file: String },
    /// `save`
    Save,
    /// `export <file>`
    Export { file: String },
    /// `commands <file>` - execute a command script
    Script { file: String },
    /// `about`
    About,
    /// `help`
    Help,
    /// `exit` / `quit`
    Exit,
}

/// A line that could not be parsed, with the usage hint to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError(pub String);

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Split a command line into tokens.
///
/// Whitespace separates tokens; single or double quotes group a token that
/// contains whitespace. An unterminated quote runs to the end of the line.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut in_token = false;

    for ch in line.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch == '\'' || ch == '"' => {
                quote = Some(ch);
                in_token = true;
            }
            None if ch.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(ch);
                in_token = true;
            }
        }
    }
    if in_token {
        tokens.push(current);
    }
    tokens
}

fn usage(text: &str) -> ParseError {
    ParseError(text.to_string())
}

/// Split a `search` argument list into the leading phrase and any
/// `-field value` refinement pairs.
fn parse_search_args(args: &[String]) -> Result<(Vec<String>, Vec<Refinement>), ParseError> {
    let mut phrase = Vec::new();
    let mut refinements = Vec::new();
    let mut i = 0;
    while i < args.len() && !args[i].starts_with('-') {
        phrase.push(args[i].clone());
        i += 1;
    }
    if phrase.is_empty() {
        return Err(usage("Usage: search <search term> [-field value ...]"));
    }
    while i < args.len() {
        let raw = &args[i];
        let name = raw.trim_start_matches('-');
        let field: Field = name
            .parse()
            .map_err(|e: String| ParseError(format!("{} (fields: id, name, phone, email, company, notes, groups)", e)))?;
        let Some(value) = args.get(i + 1) else {
            return Err(ParseError(format!("Missing value for -{}", field)));
        };
        refinements.push(Refinement {
            field,
            token: value.clone(),
        });
        i += 2;
    }
    Ok((phrase, refinements))
}

/// Parse a tokenized line into a command.
pub fn parse(tokens: &[String]) -> Result<Command, ParseError> {
    let Some(head) = tokens.first() else {
        return Err(usage(""));
    };
    let args = &tokens[1..];
    match head.as_str() {
        "add" => Ok(Command::Add),
        "edit" => {
            if args.is_empty() {
                return Err(usage("Usage: edit <contact>"));
            }
            Ok(Command::Edit {
                query: args.to_vec(),
            })
        }
        "note" | "notes" => {
            if args.is_empty() {
                return Err(usage("Usage: note <contact>"));
            }
            Ok(Command::Note {
                query: args.to_vec(),
            })
        }
        "remove" => {
            if args.is_empty() {
                return Err(usage("Usage: remove <contact>"));
            }
            Ok(Command::Remove {
                query: args.to_vec(),
            })
        }
        "search" => {
            let (phrase, refinements) = parse_search_args(args)?;
            Ok(Command::Search {
                phrase,
                refinements,
            })
        }
        "group" => parse_group(args),
        "list" => match args.first().map(String::as_str) {
            Some("contacts") => Ok(Command::ListContacts),
            Some("groups") => Ok(Command::ListGroups),
            _ => Err(usage("Usage: list [contacts|groups]")),
        },
        "info" => Ok(Command::Info),
        "fix" => Ok(Command::Fix),
        "load" => match args.first() {
            Some(file) => Ok(Command::Load { file: file.clone() }),
            None => Err(usage("Please specify a file name.")),
        },
        "save" => Ok(Command::Save),
        "export" => match args.first() {
            Some(file) => Ok(Command::Export { file: file.clone() }),
            None => Err(usage("Please specify a file name.")),
        },
        "commands" => match args.first() {
            Some(file) => Ok(Command::Script { file: file.clone() }),
            None => Err(usage("Please specify a file name.")),
        },
        "about" => Ok(Command::About),
        "help" => Ok(Command::Help),
        "exit" | "quit" => Ok(Command::Exit),
        other => Err(ParseError(format!("Unknown command: {}", other))),
    }
}

fn parse_group(args: &[String]) -> Result<Command, ParseError> {
    const GROUP_USAGE: &str = "Usage: group <add|remove|create|delete|members|list>";
    match args.first().map(String::as_str) {
        Some("add") => {
            if args.len() < 3 {
                return Err(usage("Usage: group add <group_name> <contact>"));
            }
            Ok(Command::GroupAdd {
                group: args[1].clone(),
                query: args[2..].to_vec(),
            })
        }
        Some("remove") => {
            if args.len() < 3 {
                return Err(usage("Usage: group remove <group_name> <contact>"));
            }
            Ok(Command::GroupRemove {
                group: args[1].clone(),
                query: args[2..].to_vec(),
            })
        }
        Some("create") => match args.get(1) {
            Some(name) => Ok(Command::GroupCreate { name: name.clone() }),
            None => Err(usage("Usage: group create <group_name>")),
        },
        Some("delete") => match args.get(1) {
            Some(name) => Ok(Command::GroupDelete { name: name.clone() }),
            None => Err(usage("Usage: group delete <group_name>")),
        },
        Some("members") => match args.get(1) {
            Some(name) => Ok(Command::GroupMembers { name: name.clone() }),
            None => Err(usage("Usage: group members <group_name>")),
        },
        Some("list") => Ok(Command::ListGroups),
        _ => Err(usage(GROUP_USAGE)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(line: &str) -> Vec<String> {
        tokenize(line)
    }

    #[test]
    fn test_tokenize_plain_and_quoted() {
        assert_eq!(toks("list contacts"), vec!["list", "contacts"]);
        assert_eq!(toks("remove \"Ann Chovey\""), vec!["remove", "Ann Chovey"]);
        assert_eq!(toks("group add 'Old Friends' ann"), vec!["group", "add", "Old Friends", "ann"]);
    }

    #[test]
    fn test_tokenize_empty_and_whitespace() {
        assert!(toks("").is_empty());
        assert!(toks("   ").is_empty());
    }

    #[test]
    fn test_tokenize_unterminated_quote_runs_to_eol() {
        assert_eq!(toks("search \"acme corp"), vec!["search", "acme corp"]);
    }

    #[test]
    fn test_tokenize_empty_quotes_produce_empty_token() {
        assert_eq!(toks("edit \"\""), vec!["edit", ""]);
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse(&toks("add")).unwrap(), Command::Add);
        assert_eq!(parse(&toks("info")).unwrap(), Command::Info);
        assert_eq!(parse(&toks("fix")).unwrap(), Command::Fix);
        assert_eq!(parse(&toks("quit")).unwrap(), Command::Exit);
        assert_eq!(parse(&toks("group list")).unwrap(), Command::ListGroups);
        assert_eq!(parse(&toks("list groups")).unwrap(), Command::ListGroups);
    }

    #[test]
    fn test_parse_search_plain() {
        let cmd = parse(&toks("search acme corp")).unwrap();
        assert_eq!(
            cmd,
            Command::Search {
                phrase: vec!["acme".to_string(), "corp".to_string()],
                refinements: vec![],
            }
        );
    }

    #[test]
    fn test_parse_search_with_refinements() {
        let cmd = parse(&toks("search a -company Acme -groups friends")).unwrap();
        let Command::Search {
            phrase,
            refinements,
        } = cmd
        else {
            panic!("expected search");
        };
        assert_eq!(phrase, vec!["a".to_string()]);
        assert_eq!(refinements.len(), 2);
        assert_eq!(refinements[0].field, Field::Company);
        assert_eq!(refinements[0].token, "Acme");
        assert_eq!(refinements[1].field, Field::Groups);
    }

    #[test]
    fn test_parse_search_rejects_unknown_field_and_missing_value() {
        assert!(parse(&toks("search a -birthday june")).is_err());
        assert!(parse(&toks("search a -company")).is_err());
        assert!(parse(&toks("search")).is_err());
    }

    #[test]
    fn test_parse_group_commands() {
        assert_eq!(
            parse(&toks("group add Friends ann")).unwrap(),
            Command::GroupAdd {
                group: "Friends".to_string(),
                query: vec!["ann".to_string()],
            }
        );
        assert!(parse(&toks("group add Friends")).is_err());
        assert!(parse(&toks("group")).is_err());
        assert_eq!(
            parse(&toks("group delete Friends")).unwrap(),
            Command::GroupDelete {
                name: "Friends".to_string()
            }
        );
    }

    #[test]
    fn test_parse_unknown_command() {
        let err = parse(&toks("frobnicate")).unwrap_err();
        assert!(err.to_string().contains("Unknown command"));
    }
}
