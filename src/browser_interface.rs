//! Text front end shared by the command line binary and the MCP server.
//!
//! Every function returns the text to show; neither binary formats views
//! itself.

use crate::catalog::CatalogFilter;
use crate::display::{render_list, Legend, RecordDetail};
use crate::session::{DetailSession, ListSession, LoadState};
use schema::Direction;

/// Returns the list view text, headed by the active filter if any.
pub fn list_display(session: &ListSession) -> String {
    let mut output = String::new();
    let filter = session.filter();
    if !filter.is_empty() {
        output.push_str(&filter_summary(filter));
        output.push('\n');
    }
    output.push_str(&render_list(&session.view()));
    output
}

fn filter_summary(filter: &CatalogFilter) -> String {
    let type_part = if filter.type_label.is_empty() {
        "all types".to_string()
    } else {
        format!("type {}", filter.type_label)
    };
    if filter.search.is_empty() {
        format!("Filter: {}", type_part)
    } else {
        format!("Filter: {}, name contains \"{}\"", type_part, filter.search)
    }
}

/// Returns the type selector options, "All types" first.
pub fn types_display(session: &ListSession) -> String {
    match session.state() {
        LoadState::Loading => "Loading...".to_string(),
        LoadState::Failed(message) => format!("Error while fetching data: {}", message),
        LoadState::Loaded(_) => {
            let mut output = String::from("Types:\n  - All types\n");
            for label in session.type_options() {
                output.push_str(&format!("  - {}\n", label));
            }
            output
        }
    }
}

/// Returns the detail view text for whatever the session currently holds.
pub fn detail_display(session: &DetailSession) -> String {
    match session.state() {
        LoadState::Loading => "Loading...".to_string(),
        LoadState::Failed(message) => format!("Error while fetching data: {}", message),
        LoadState::Loaded(record) => format!("{}", RecordDetail(record)),
    }
}

pub fn legend_display() -> String {
    Legend.to_string()
}

/// A single keystroke-level command of the interactive browse loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseCommand {
    Move(Direction),
    Quit,
}

/// Parses user input into a navigation direction.
pub fn parse_direction(input: &str) -> Result<Direction, String> {
    match input.trim().to_lowercase().as_str() {
        "n" | "next" | "suivant" => Ok(Direction::Next),
        "p" | "prev" | "previous" | "précédent" => Ok(Direction::Previous),
        other => Err(format!(
            "Unknown direction '{}'. Use 'next' or 'previous'.",
            other
        )),
    }
}

pub fn parse_browse_command(input: &str) -> Result<BrowseCommand, String> {
    match input.trim().to_lowercase().as_str() {
        "q" | "quit" | "back" | "retour" => Ok(BrowseCommand::Quit),
        other => parse_direction(other).map(BrowseCommand::Move),
    }
}
