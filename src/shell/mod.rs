//! The interactive command shell.
//!
//! The shell parses lines into [`command::Command`] values and drives the
//! Directory, Query Engine, and JSON store. It is the only layer that
//! prompts or prints; the core never does either.

pub mod command;
pub mod render;

use crate::config::Config;
use crate::directory::{Directory, GroupChange};
use crate::domain::ContactId;
use crate::error::StoreError;
use crate::models::ContactFields;
use crate::search::{advanced_search, simple_search};
use crate::store::JsonStore;
use anyhow::{Context, Result};
use command::Command;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::fs;
use tracing::warn;

/// How a free-text query resolved against the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No contact matched
    None,
    /// Exactly one contact matched
    One(ContactId),
    /// Several contacts matched; single-target commands must narrow
    Many(Vec<ContactId>),
}

/// Interactive shell over a Directory and its contacts file.
pub struct Shell {
    directory: Directory,
    store: JsonStore,
    contacts_file: String,
    autosave_on_exit: bool,
}

impl Shell {
    /// Build a shell from configuration, with an empty directory.
    pub fn new(config: &Config) -> Self {
        Self {
            directory: Directory::new(),
            store: JsonStore::new(),
            contacts_file: config.contacts_file.clone(),
            autosave_on_exit: config.autosave_on_exit,
        }
    }

    /// The directory the shell operates on.
    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Path of the contacts file used by `save` and exit.
    pub fn contacts_file(&self) -> &str {
        &self.contacts_file
    }

    /// Load the contacts file into the directory.
    ///
    /// A missing file is reported but leaves the directory as it was; so
    /// does a malformed one. On success the whole directory is replaced.
    pub fn load_contacts(&mut self, path: &str) -> bool {
        match self.store.load(path) {
            Ok(records) => {
                self.directory.bulk_import(records);
                self.contacts_file = path.to_string();
                true
            }
            Err(StoreError::NotFound(_)) => {
                println!("No contacts file was found for '{}'", path);
                false
            }
            Err(e) => {
                println!("Error: {}", e);
                false
            }
        }
    }

    /// Save the directory to the current contacts file.
    fn save_contacts(&self) {
        match self
            .store
            .save(&self.contacts_file, self.directory.bulk_export())
        {
            Ok(()) => println!("Saved contacts to '{}'.", self.contacts_file),
            Err(e) => println!("Error: {}", e),
        }
    }

    /// Resolve a free-text query to contact ids via simple search.
    pub fn resolve(&self, query: &[String]) -> Resolution {
        let matches = simple_search(self.directory.contacts(), query);
        match matches.len() {
            0 => Resolution::None,
            1 => Resolution::One(matches[0].id().clone()),
            _ => Resolution::Many(matches.iter().map(|c| c.id().clone()).collect()),
        }
    }

    /// Run the interactive loop until `exit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        let mut rl = DefaultEditor::new().context("failed to create line editor")?;
        loop {
            match rl.readline("> ") {
                Ok(line) => {
                    let _ = rl.add_history_entry(line.as_str());
                    let tokens = command::tokenize(&line);
                    if tokens.is_empty() {
                        continue;
                    }
                    match command::parse(&tokens) {
                        Ok(Command::Exit) => {
                            self.on_exit(&mut rl);
                            break;
                        }
                        Ok(cmd) => self.execute(cmd, &mut rl),
                        Err(e) => println!("{}", e),
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    self.on_exit(&mut rl);
                    break;
                }
                Err(e) => {
                    warn!(error = %e, "readline failed");
                    break;
                }
            }
        }
        Ok(())
    }

    fn on_exit(&mut self, rl: &mut DefaultEditor) {
        if self.autosave_on_exit
            || confirm(rl, "Save changes before exiting?", true)
        {
            self.save_contacts();
        }
        println!("Goodbye!");
    }

    /// Execute one parsed command.
    fn execute(&mut self, cmd: Command, rl: &mut DefaultEditor) {
        match cmd {
            Command::Add => self.cmd_add(rl),
            Command::Edit { query } => self.cmd_edit(&query, rl, false),
            Command::Note { query } => self.cmd_edit(&query, rl, true),
            Command::Remove { query } => self.cmd_remove(&query, rl),
            Command::Search {
                phrase,
                refinements,
            } => {
                let results = if refinements.is_empty() {
                    simple_search(self.directory.contacts(), &phrase)
                } else {
                    advanced_search(self.directory.contacts(), &phrase.join(" "), &refinements)
                };
                println!("Search results for '{}':", phrase.join(" "));
                render::print_contacts(results);
            }
            Command::GroupAdd { group, query } => self.cmd_group_add(&group, &query),
            Command::GroupRemove { group, query } => self.cmd_group_remove(&group, &query),
            Command::GroupCreate { name } => {
                if self.directory.create_group(&name) {
                    println!("Created group '{}'.", name);
                } else {
                    println!("Group '{}' already exists.", name);
                }
            }
            Command::GroupDelete { name } => {
                if self.directory.delete_group(&name) {
                    println!("Deleted group '{}'.", name);
                } else {
                    println!("Group '{}' does not exist.", name);
                }
            }
            Command::GroupMembers { name } => match self.directory.group_members(&name) {
                Some(members) => render::print_contacts(members),
                None => println!("Group '{}' does not exist.", name),
            },
            Command::ListGroups => render::print_groups(&self.directory),
            Command::ListContacts => render::print_contacts(self.directory.contacts()),
            Command::Info => render::info(&self.directory),
            Command::Fix => {
                self.directory.repair();
                println!("Repaired contact indexes.");
            }
            Command::Load { file } => {
                if self.load_contacts(&file) {
                    println!("Loaded contacts from '{}'.", file);
                }
            }
            Command::Save => self.save_contacts(),
            Command::Export { file } => {
                match self.store.save(&file, self.directory.bulk_export()) {
                    Ok(()) => println!("Exported contacts to '{}'.", file),
                    Err(e) => println!("Error: {}", e),
                }
            }
            Command::Script { file } => self.cmd_script(&file),
            Command::About => render::about(),
            Command::Help => render::help(),
            // Exit is handled by the loop.
            Command::Exit => {}
        }
    }

    fn cmd_add(&mut self, rl: &mut DefaultEditor) {
        let fields = ContactFields {
            name: prompt(rl, "Name: "),
            phone: prompt(rl, "Phone: "),
            email: prompt(rl, "Email: "),
            company: prompt(rl, "Company: "),
            notes: prompt(rl, "Notes: "),
        };
        let contact = self.directory.add_contact(fields);
        println!("Added contact '{}'.", contact.name);
    }

    fn cmd_edit(&mut self, query: &[String], rl: &mut DefaultEditor, notes_only: bool) {
        match self.resolve(query) {
            Resolution::None => println!("No contacts found."),
            Resolution::Many(ids) => {
                println!("Multiple contacts found:");
                self.print_by_ids(&ids);
                println!("Please narrow your search to one contact.");
            }
            Resolution::One(id) => {
                let Some(contact) = self.directory.lookup(&id) else {
                    return;
                };
                render::print_contacts([contact]);
                if !confirm(rl, "Edit this contact?", true) {
                    return;
                }
                let current = contact.clone();
                let changes = if notes_only {
                    ContactFields {
                        notes: prompt(rl, &format!("Notes [{}]: ", current.notes)),
                        ..Default::default()
                    }
                } else {
                    ContactFields {
                        name: prompt(rl, &format!("Name [{}]: ", current.name)),
                        phone: prompt(rl, &format!("Phone [{}]: ", current.phone)),
                        email: prompt(rl, &format!("Email [{}]: ", current.email)),
                        company: prompt(rl, &format!("Company [{}]: ", current.company)),
                        notes: prompt(rl, &format!("Notes [{}]: ", current.notes)),
                    }
                };
                // Blank answers keep the old values.
                self.directory.update_contact(&id, changes);
            }
        }
    }

    fn cmd_remove(&mut self, query: &[String], rl: &mut DefaultEditor) {
        match self.resolve(query) {
            Resolution::None => println!("No contacts found."),
            Resolution::One(id) => {
                self.print_by_ids(std::slice::from_ref(&id));
                if confirm(rl, "Are you sure you want to remove this contact?", false) {
                    self.directory.remove_contact(&id);
                    println!("Contact removed.");
                } else {
                    println!("No contacts removed.");
                }
            }
            Resolution::Many(ids) => {
                println!("Multiple contacts found:");
                self.print_by_ids(&ids);
                if confirm(rl, "Are you sure you want to remove these contacts?", false) {
                    for id in &ids {
                        self.directory.remove_contact(id);
                    }
                    println!("Removed contacts.");
                } else {
                    println!("No contacts removed.");
                }
            }
        }
    }

    fn cmd_group_add(&mut self, group: &str, query: &[String]) {
        match self.resolve(query) {
            Resolution::None => println!("No contacts found."),
            Resolution::Many(ids) => {
                println!("Multiple contacts found:");
                self.print_by_ids(&ids);
                println!("Please specify a single contact.");
                println!("No contacts added.");
            }
            Resolution::One(id) => {
                let name = self
                    .directory
                    .lookup(&id)
                    .map(|c| c.name.clone())
                    .unwrap_or_default();
                match self.directory.assign_group(&id, group) {
                    GroupChange::Added => {
                        println!("Added '{}' to group '{}'.", name, group)
                    }
                    GroupChange::AlreadyMember => {
                        println!("Contact '{}' is already in group '{}'.", name, group)
                    }
                    _ => println!("No contacts found."),
                }
            }
        }
        // The original ran its repair pass after every group command.
        self.directory.repair();
    }

    fn cmd_group_remove(&mut self, group: &str, query: &[String]) {
        match self.resolve(query) {
            Resolution::None => println!("No contacts found."),
            Resolution::Many(ids) => {
                println!("Multiple contacts found:");
                self.print_by_ids(&ids);
                println!("Please specify a single contact.");
                println!("No contacts removed.");
            }
            Resolution::One(id) => {
                let name = self
                    .directory
                    .lookup(&id)
                    .map(|c| c.name.clone())
                    .unwrap_or_default();
                match self.directory.unassign_group(&id, group) {
                    GroupChange::Removed => {
                        println!("Removed '{}' from group '{}'.", name, group)
                    }
                    GroupChange::NotMember => {
                        println!("Contact '{}' is not in group '{}'.", name, group)
                    }
                    GroupChange::NoSuchGroup => {
                        println!("Group '{}' does not exist.", group)
                    }
                    _ => {}
                }
            }
        }
        self.directory.repair();
    }

    fn cmd_script(&mut self, file: &str) {
        let text = match fs::read_to_string(file) {
            Ok(text) => text,
            Err(e) => {
                println!("Could not read '{}': {}", file, e);
                return;
            }
        };
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        self.run_script_lines(&lines);
    }

    /// Execute a command script.
    ///
    /// Scripts support non-interactive commands. An `add` line is followed
    /// by `field: value` sub-lines (name, phone, email, company, notes);
    /// `remove <query>` removes a single match and refuses multiples, since
    /// there is no prompt to confirm with.
    pub fn run_script_lines(&mut self, lines: &[String]) {
        let mut i = 0;
        while i < lines.len() {
            let line = lines[i].trim();
            i += 1;
            if line.is_empty() {
                continue;
            }
            println!("Executing command: {}", line);
            let tokens = command::tokenize(line);
            match tokens.first().map(String::as_str) {
                Some("add") => {
                    let (fields, consumed) = parse_script_add(&lines[i..]);
                    i += consumed;
                    let contact = self.directory.add_contact(fields);
                    println!("Added contact '{}'.", contact.name);
                }
                Some("remove") => {
                    let query: Vec<String> = tokens[1..].to_vec();
                    if query.is_empty() {
                        println!("Usage: remove <contact>");
                        continue;
                    }
                    match self.resolve(&query) {
                        Resolution::One(id) => {
                            if let Some(removed) = self.directory.remove_contact(&id) {
                                println!("Removing contact '{}'", removed.name);
                                println!("Contact removed.");
                            }
                        }
                        Resolution::Many(ids) => {
                            println!("Multiple contacts found:");
                            self.print_by_ids(&ids);
                            println!("Removing multiple contacts is not supported in this mode.");
                            println!("No contacts removed.");
                        }
                        Resolution::None => println!("No contacts found."),
                    }
                }
                Some("group") => match command::parse(&tokens) {
                    Ok(Command::GroupAdd { group, query }) => self.cmd_group_add(&group, &query),
                    Ok(Command::GroupRemove { group, query }) => {
                        self.cmd_group_remove(&group, &query)
                    }
                    Ok(Command::GroupCreate { name }) => {
                        self.directory.create_group(&name);
                    }
                    Ok(Command::GroupDelete { name }) => {
                        self.directory.delete_group(&name);
                    }
                    _ => println!("Unsupported command in this mode."),
                },
                Some("fix") => self.directory.repair(),
                _ => println!("Unsupported command in this mode."),
            }
        }
    }

    fn print_by_ids(&self, ids: &[ContactId]) {
        let found = self.directory.lookup_many(ids.iter());
        render::print_contacts(found.into_iter().flatten());
    }
}

/// Prompt for one line of input; interrupted input counts as blank.
fn prompt(rl: &mut DefaultEditor, text: &str) -> String {
    match rl.readline(text) {
        Ok(line) => line.trim().to_string(),
        Err(_) => String::new(),
    }
}

/// Yes/no prompt with a default answer for blank input.
fn confirm(rl: &mut DefaultEditor, text: &str, default_yes: bool) -> bool {
    println!("{}", text);
    let hint = if default_yes { "([y]/n)? " } else { "(y/[n])? " };
    loop {
        match rl.readline(hint) {
            Ok(line) => {
                let answer = line.trim().to_lowercase();
                match answer.chars().next() {
                    None => return default_yes,
                    Some('y') => return true,
                    Some('n') => return false,
                    _ => println!("Invalid choice: {}", answer),
                }
            }
            Err(_) => return default_yes,
        }
    }
}

/// Consume `field: value` sub-lines after a script `add` command.
///
/// Returns the collected fields and how many lines were consumed. Stops at
/// the first line that does not start with a known field name.
fn parse_script_add(lines: &[String]) -> (ContactFields, usize) {
    let mut fields = ContactFields::default();
    let mut consumed = 0;
    for line in lines {
        let stripped = line.replace(':', "");
        let mut words = stripped.split_whitespace();
        let Some(key) = words.next() else {
            break;
        };
        let value = words.collect::<Vec<_>>().join(" ");
        match key {
            "name" => fields.name = value,
            "phone" => fields.phone = value,
            "email" => fields.email = value,
            "company" => fields.company = value,
            "notes" => fields.notes = value,
            _ => break,
        }
        consumed += 1;
    }
    (fields, consumed)
}
