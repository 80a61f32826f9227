// Note management commands

use crate::client::{Client, ClientError};
use crate::output::{print_field, print_table_header, print_table_row, OutputFormat};
use anyhow::{Context, Result};
use clap::Subcommand;
use serde::{Deserialize, Serialize};

#[derive(Subcommand)]
pub enum NotesCommand {
    /// List your notes, most recently updated first
    List,

    /// Show a note
    Get {
        /// Note ID
        note_id: i64,
    },

    /// Create a note
    Create {
        /// Note title
        #[arg(long, short)]
        title: String,

        /// Note body (use - to read from stdin)
        #[arg(long, short)]
        content: Option<String>,
    },

    /// Replace a note's title and content
    Update {
        /// Note ID
        note_id: i64,

        /// New title
        #[arg(long, short)]
        title: String,

        /// New body (use - to read from stdin); omitted means empty
        #[arg(long, short)]
        content: Option<String>,
    },

    /// Delete a note
    Delete {
        /// Note ID
        note_id: i64,
    },
}

#[derive(Debug, Serialize)]
struct NoteRequest {
    title: String,
    content: String,
}

/// Note response from API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct MessageResponse {
    message: String,
}

pub async fn run(
    command: NotesCommand,
    client: &Client,
    output: OutputFormat,
    quiet: bool,
) -> Result<()> {
    match command {
        NotesCommand::List => list(client, output).await,
        NotesCommand::Get { note_id } => get(client, output, note_id).await,
        NotesCommand::Create { title, content } => {
            let request = NoteRequest {
                title,
                content: read_content(content)?,
            };
            create(client, output, quiet, request).await
        }
        NotesCommand::Update {
            note_id,
            title,
            content,
        } => {
            let request = NoteRequest {
                title,
                content: read_content(content)?,
            };
            update(client, output, quiet, note_id, request).await
        }
        NotesCommand::Delete { note_id } => delete(client, output, quiet, note_id).await,
    }
}

/// `-` reads the body from stdin
fn read_content(content: Option<String>) -> Result<String> {
    match content.as_deref() {
        Some("-") => std::io::read_to_string(std::io::stdin()).context("Failed to read stdin"),
        _ => Ok(content.unwrap_or_default()),
    }
}

fn not_found(note_id: i64) -> impl FnOnce(ClientError) -> anyhow::Error {
    move |e| match e {
        ClientError::NotFound => anyhow::anyhow!("Note not found: {}", note_id),
        e => e.into(),
    }
}

async fn list(client: &Client, output: OutputFormat) -> Result<()> {
    let notes: Vec<Note> = client.get("/notes/").await?;

    if output.is_text() {
        if notes.is_empty() {
            println!("No notes found");
            return Ok(());
        }

        print_table_header(&[("ID", 8), ("TITLE", 30), ("UPDATED", 25)]);
        for note in &notes {
            print_table_row(&[
                (&note.id.to_string(), 8),
                (&note.title, 30),
                (&note.updated_at, 25),
            ]);
        }
    } else {
        output.print_value(&notes)?;
    }

    Ok(())
}

async fn get(client: &Client, output: OutputFormat, note_id: i64) -> Result<()> {
    let note: Note = client
        .get(&format!("/notes/{}/", note_id))
        .await
        .map_err(not_found(note_id))?;

    if output.is_text() {
        print_note(&note);
    } else {
        output.print_value(&note)?;
    }

    Ok(())
}

async fn create(
    client: &Client,
    output: OutputFormat,
    quiet: bool,
    request: NoteRequest,
) -> Result<()> {
    let note: Note = client.post("/notes/", &request).await?;

    if output.is_text() {
        if quiet {
            println!("{}", note.id);
        } else {
            println!("Created note: {}", note.id);
            print_field("Title", &note.title);
        }
    } else {
        output.print_value(&note)?;
    }

    Ok(())
}

async fn update(
    client: &Client,
    output: OutputFormat,
    quiet: bool,
    note_id: i64,
    request: NoteRequest,
) -> Result<()> {
    let note: Note = client
        .put(&format!("/notes/{}/", note_id), &request)
        .await
        .map_err(not_found(note_id))?;

    if output.is_text() {
        if !quiet {
            println!("Updated note: {}", note.id);
            print_field("Title", &note.title);
            print_field("Updated", &note.updated_at);
        }
    } else {
        output.print_value(&note)?;
    }

    Ok(())
}

async fn delete(client: &Client, output: OutputFormat, quiet: bool, note_id: i64) -> Result<()> {
    let response: MessageResponse = client
        .delete(&format!("/notes/{}/", note_id))
        .await
        .map_err(not_found(note_id))?;

    if output.is_text() {
        if !quiet {
            println!("{} ({})", response.message, note_id);
        }
    } else {
        output.print_value(&serde_json::json!({ "id": note_id, "message": response.message }))?;
    }

    Ok(())
}

fn print_note(note: &Note) {
    print_field("ID", &note.id.to_string());
    print_field("Title", &note.title);
    print_field("Created", &note.created_at);
    print_field("Updated", &note.updated_at);
    if !note.content.is_empty() {
        println!();
        println!("{}", note.content);
    }
}
