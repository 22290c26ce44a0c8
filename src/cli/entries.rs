//! CLI entry commands: list, add, write, delete, export.

use anyhow::{bail, Context, Result};
use std::path::Path;

use super::Session;
use crate::journal::export::{self, plain_text};
use crate::journal::EntryDraft;
use crate::voice::{dictate, LineTranscriber};

/// Print entries newest first with a one-line preview.
pub fn list(session: &Session) -> Result<()> {
    let entries = session.journal.entries();
    if entries.is_empty() {
        println!("No journal entries yet. Start writing!");
        return Ok(());
    }

    for entry in entries {
        let text = plain_text(&entry.content);
        let first_line = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
        let preview: String = first_line.chars().take(80).collect();
        println!("{}  {}  {}", entry.date, entry.id, entry.title);
        println!("    {preview}");
    }
    println!("\n{} entr{}", entries.len(), if entries.len() == 1 { "y" } else { "ies" });
    Ok(())
}

pub async fn add(session: &mut Session, title: &str, content: &str) -> Result<()> {
    let mut draft = EntryDraft::new(title);
    draft.push_text(content);
    submit(session, draft).await
}

/// Compose an entry from dictated lines on stdin, optionally opening with a
/// prompt.
pub async fn write(session: &mut Session, title: &str, ai_category: Option<&str>) -> Result<()> {
    let mut draft = EntryDraft::new(title);

    if let Some(raw) = ai_category {
        let category = raw.parse().map_err(anyhow::Error::msg)?;
        let prompt = session.services.prompts.ai_prompt(category).await;
        eprintln!("Prompt: {}", prompt.question);
        draft.insert_prompt(&prompt);
    }

    eprintln!("Dictate your entry, one line at a time. End with Ctrl-D.");
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut transcriber = LineTranscriber::new(stdin);
    dictate(&mut transcriber, &mut draft).await;

    submit(session, draft).await
}

async fn submit(session: &mut Session, mut draft: EntryDraft) -> Result<()> {
    let Some(submission) = draft.submit() else {
        bail!("entry is empty; nothing saved");
    };
    let entry = session
        .journal
        .add_entry(&submission.title, &submission.content)
        .await;
    println!("Saved entry {} ({})", entry.id, entry.title);
    Ok(())
}

pub async fn delete(session: &mut Session, id: &str) -> Result<()> {
    let existed = session.journal.get(id).is_some();
    session.journal.delete_entry(id).await;
    if existed {
        println!("Deleted entry {id}");
    } else {
        println!("No entry {id} in this journal; nothing to delete");
    }
    Ok(())
}

/// Write a plain-text export of one entry into `out_dir`.
pub async fn export(session: &Session, id: &str, out_dir: &Path) -> Result<()> {
    let entry = session
        .journal
        .get(id)
        .with_context(|| format!("no entry with id {id}"))?;
    let export = export::export_entry(entry);
    let path = out_dir.join(&export.filename);
    tokio::fs::write(&path, export.body)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Exported to {}", path.display());
    Ok(())
}
