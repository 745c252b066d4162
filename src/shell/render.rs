//! Plain-text rendering for the shell.
//!
//! Column layout matches the original tool: fixed-width columns, groups
//! joined with commas. All output goes to stdout; logging stays on stderr.

use crate::directory::Directory;
use crate::models::Contact;

/// Application name shown by splash and about.
pub const APPLICATION_NAME: &str = "Rolodex";

const HELP: &str = "
    Commands:
    'exit' to exit the application.
    'about' to display information about the application and version.
    'info' to show the number of contacts, companies, and groups.
    'add' to add a contact.
    'edit <contact>' to edit a contact.
    'note <contact>' to edit a contact's notes.
    'remove <contact>' to remove a contact.
    'search <query> [-field value ...]' to search for contacts.
    'group add <group> <contact>' to add a contact to a group.
    'group remove <group> <contact>' to remove a contact from a group.
    'group create <group>' to create a group.
    'group delete <group>' to delete a group.
    'group members <group>' to list all contacts in a group.
    'group list' to list all groups.
    'list contacts' to list all contacts.
    'list groups' to list all groups.
    'fix' to repair the contact indexes.
    'load <filename>' to load contacts from a file.
    'save' to save the contacts to the current file.
    'export <filename>' to export the contacts to a file.
    'commands <filename>' to execute commands from a file.
    'help' to display this list.

    Config (environment or .env):
    'ROLODEX_CONTACTS_FILE' to set the contacts file name.
    'ROLODEX_AUTOSAVE_ON_EXIT' to always save when exiting.
    'ROLODEX_SPLASH_SCREEN' to toggle the splash screen.
";

/// Print the contact table with column headers.
pub fn print_contacts<'a>(contacts: impl IntoIterator<Item = &'a Contact>) {
    println!(
        "\n{:<10}{:<20}{:<16}{:<26}{:<20}{:<24}{:<20}",
        "ID", "Name", "Phone", "Email", "Company", "Notes", "Groups"
    );
    for c in contacts {
        println!(
            "{:<10}{:<20}{:<16}{:<26}{:<20}{:<24}{:<20}",
            c.id().as_str(),
            c.name,
            c.phone,
            c.email,
            c.company,
            c.notes,
            c.groups.join(", ")
        );
    }
    println!();
}

/// Print companies with their member counts.
pub fn print_companies(directory: &Directory) {
    println!("\n{:<20}{:<20}", "Company", "# of Contacts");
    for company in directory.company_names() {
        let size = directory.company_size(company).unwrap_or(0);
        println!("{:<20}{:<20}", company, size);
    }
}

/// Print groups with their member counts.
pub fn print_groups(directory: &Directory) {
    println!("\n{:<20}{:<20}", "Group", "# of Contacts");
    for group in directory.group_names() {
        let size = directory.group_size(group).unwrap_or(0);
        println!("{:<20}{:<20}", group, size);
    }
}

/// Print the startup splash screen.
pub fn splash() {
    println!(
        r"
    ██████╗ ██╗  ██╗
    ██╔══██╗╚██╗██╔╝
    ██████╔╝ ╚███╔╝
    ██╔══██╗ ██╔██╗
    ██║  ██║██╔╝ ██╗
    ╚═╝  ╚═╝╚═╝  ╚═╝
   "
    );
    println!("{} v{}\n", APPLICATION_NAME, env!("CARGO_PKG_VERSION"));
}

/// Print the about box.
pub fn about() {
    println!("------------------------------");
    println!("About");
    println!("{} v{}\n", APPLICATION_NAME, env!("CARGO_PKG_VERSION"));
    println!("A local contact manager with a line-oriented shell.");
    println!("------------------------------\n");
}

/// Print the info box: contact, company, and group counts.
pub fn info(directory: &Directory) {
    println!("------------------------------");
    println!("Info");
    println!("Contacts:  {}", directory.len());
    println!("Companies: {}", directory.company_names().len());
    print_companies(directory);
    println!("\nGroups: {}", directory.group_names().len());
    print_groups(directory);
    println!("------------------------------\n");
}

/// Print the command reference.
pub fn help() {
    println!("{}", HELP);
}
