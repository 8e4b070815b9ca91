//! `bizsvc contacts ...` subcommands.

use clap::Subcommand;
use serde_json::{json, Value as JsonValue};

use crate::cancel::Cancellation;
use crate::context::Context;
use crate::di::FromContext;
use crate::error::AppError;
use crate::models::{ContactEdit, NewContact};
use crate::services::{ContactService, CrudService};

#[derive(Subcommand, Debug, Clone)]
pub enum ContactsCommand {
    /// List all contacts
    List,

    /// Show one contact
    Get {
        /// Contact ID
        id: u64,
    },

    /// Create a contact
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: Option<String>,
    },

    /// Update a contact's name and, optionally, email
    Edit {
        /// Contact ID
        id: u64,

        #[arg(long)]
        name: String,

        #[arg(long)]
        email: Option<String>,
    },

    /// Delete a contact
    Delete {
        /// Contact ID
        id: u64,
    },
}

/// Outcome of one command, ready for printing.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub body: JsonValue,
    pub success: bool,
    pub summary: String,
}

impl Report {
    fn ok(body: JsonValue) -> Self {
        Self {
            body,
            success: true,
            summary: String::new(),
        }
    }

    fn not_found(id: u64) -> Self {
        Self {
            body: json!({ "error": "NOT_FOUND", "id": id }),
            success: false,
            summary: format!("contact {} not found", id),
        }
    }
}

/// Command handlers for contacts, resolved from the context.
#[derive(FromContext, Clone)]
pub struct ContactCommands {
    contacts: ContactService,
}

impl ContactCommands {
    pub async fn execute(
        &self,
        command: ContactsCommand,
        cancel: &Cancellation,
    ) -> Result<Report, AppError> {
        match command {
            ContactsCommand::List => {
                let contacts = self.contacts.list(cancel).await?;
                Ok(Report::ok(to_json(&contacts)?))
            }
            ContactsCommand::Get { id } => match self.contacts.get(&id, cancel).await? {
                Some(contact) => Ok(Report::ok(to_json(&contact)?)),
                None => Ok(Report::not_found(id)),
            },
            ContactsCommand::Add { name, email } => {
                let contact = self
                    .contacts
                    .add(Some(NewContact { name, email }), cancel)
                    .await?;
                Ok(Report::ok(to_json(&contact)?))
            }
            ContactsCommand::Edit { id, name, email } => {
                let edit = ContactEdit { id, name, email };
                match self.contacts.edit(Some(edit), cancel).await? {
                    Some(contact) => Ok(Report::ok(to_json(&contact)?)),
                    None => Ok(Report::not_found(id)),
                }
            }
            ContactsCommand::Delete { id } => {
                if self.contacts.delete(&id, cancel).await? {
                    Ok(Report::ok(json!({ "deleted": id })))
                } else {
                    Ok(Report::not_found(id))
                }
            }
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<JsonValue, AppError> {
    serde_json::to_value(value).map_err(AppError::Mapping)
}
