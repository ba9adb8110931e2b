//! Terminal rendering of the top-level views.
//!
//! Each view renders a [`StoreState`] snapshot to a string under the title
//! the [`Router`](crate::router::Router) chose for it. [`run_open`] ties the
//! two together: navigate, run the store action the view needs, render.

use anyhow::{bail, Result};
use serde_json::Value;
use std::fmt::Write;

use crate::models::BriefStatus;
use crate::router::{Route, Router};
use crate::store::{BriefStore, LoadReport, StoreState};

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));
    out.push('\n');
}

fn group(out: &mut String, label: &str, briefs: &[&crate::models::Brief]) {
    let _ = writeln!(out, "{} ({})", label, briefs.len());
    for brief in briefs {
        let event = brief.event_type.as_deref().unwrap_or("-");
        let _ = writeln!(
            out,
            "  {}  {}  [{}]  v{}",
            brief.id, brief.title, event, brief.version
        );
    }
    out.push('\n');
}

/// Brief list grouped by status.
pub fn render_dashboard(state: &StoreState, title: &str) -> String {
    let mut out = String::new();
    heading(&mut out, title);

    if let Some(err) = &state.error {
        let _ = writeln!(out, "Error: {}\n", err);
    }

    if state.briefs.is_empty() {
        out.push_str("No briefs yet. Create one with `brief new --title <TITLE>`.\n");
        return out;
    }

    group(&mut out, "In progress", &state.active_briefs());
    group(&mut out, "Drafts", &state.draft_briefs());
    group(&mut out, "Completed", &state.completed_briefs());
    let archived = state.briefs_with_status(BriefStatus::Archived);
    if !archived.is_empty() {
        group(&mut out, "Archived", &archived);
    }

    let _ = writeln!(out, "Total: {}", state.briefs.len());
    out
}

/// Prompt for the new-brief view. Creation itself happens through
/// `brief new`.
pub fn render_new_brief(title: &str) -> String {
    let mut out = String::new();
    heading(&mut out, title);
    out.push_str("Create a brief with:\n");
    out.push_str("  brief new --title <TITLE> [--event-type <TYPE>] [--meta key=value]...\n");
    out
}

fn field_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

/// The current brief with its sections and documents.
pub fn render_editor(state: &StoreState, title: &str, report: Option<&LoadReport>) -> String {
    let mut out = String::new();
    heading(&mut out, title);

    let Some(brief) = &state.current_brief else {
        if let Some(err) = &state.error {
            let _ = writeln!(out, "Error: {}", err);
        } else {
            out.push_str("No brief loaded.\n");
        }
        return out;
    };

    let _ = writeln!(out, "  ID:          {}", brief.id);
    let _ = writeln!(out, "  Title:       {}", brief.title);
    let _ = writeln!(out, "  Event type:  {}", brief.event_type.as_deref().unwrap_or("-"));
    let _ = writeln!(out, "  Status:      {}", brief.status);
    let _ = writeln!(out, "  Version:     {}", brief.version);
    if let Some(updated) = &brief.updated_at {
        let _ = writeln!(out, "  Updated:     {}", updated);
    }
    out.push('\n');

    let _ = writeln!(out, "Sections ({})", state.current_sections.len());
    for section in &state.current_sections {
        let _ = writeln!(
            out,
            "  {}. {}  ({})",
            section.section_number, section.section_name, section.id
        );
        if let Value::Object(fields) = &section.content {
            for (name, value) in fields {
                let _ = writeln!(out, "       {}: {}", name, field_value(value));
            }
        }
    }
    out.push('\n');

    let _ = writeln!(out, "Documents ({})", state.current_documents.len());
    for doc in &state.current_documents {
        let _ = writeln!(out, "  {}  {}  [{}]", doc.id, doc.filename, doc.file_type);
    }

    if let Some(LoadReport::Partial {
        sections_error,
        documents_error,
    }) = report
    {
        out.push('\n');
        if let Some(err) = sections_error {
            let _ = writeln!(out, "Warning: sections could not be loaded: {}", err);
        }
        if let Some(err) = documents_error {
            let _ = writeln!(out, "Warning: documents could not be loaded: {}", err);
        }
    }

    out
}

/// Navigate to `path`, load what its view needs and return the rendering.
pub async fn open(store: &BriefStore, router: &mut Router, path: &str) -> Result<String> {
    let Some(route) = router.navigate(path).cloned() else {
        bail!("No view for path '{}'", path);
    };
    let title = router.title().to_string();

    let rendered = match route {
        Route::Dashboard => {
            store.fetch_briefs(None).await;
            render_dashboard(&store.snapshot().await, &title)
        }
        Route::NewBrief => render_new_brief(&title),
        Route::EditBrief { id } => {
            let report = store.fetch_brief(&id).await;
            render_editor(&store.snapshot().await, &title, Some(&report))
        }
    };
    Ok(rendered)
}

/// `brief open <path>`: print the view for `path`.
pub async fn run_open(store: &BriefStore, path: &str) -> Result<()> {
    let mut router = Router::new();
    let rendered = open(store, &mut router, path).await?;
    print!("{}", rendered);
    Ok(())
}
