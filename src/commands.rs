//! CLI entry points for the resource commands.
//!
//! Each `run_*` function performs one store or API action and prints the
//! result to stdout. Errors bubble up as `anyhow` errors with context.

use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};
use std::path::Path;

use crate::config::Config;
use crate::http::ApiClient;
use crate::models::{BriefChanges, BriefStatus, NewBrief, NewSection, SectionChanges, Upload};
use crate::router::Router;
use crate::store::BriefStore;
use crate::views;

/// Parse a `key=value` pair. Used by `--meta` and `--set` arguments.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no '=' found in '{}'", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Build a JSON object from `key=value` pairs. Values that parse as JSON
/// (numbers, booleans, arrays, objects, quoted strings) keep their type;
/// anything else is a plain string.
pub fn pairs_to_object(pairs: Vec<(String, String)>) -> Map<String, Value> {
    pairs
        .into_iter()
        .map(|(k, v)| {
            let value = serde_json::from_str(&v).unwrap_or(Value::String(v));
            (k, value)
        })
        .collect()
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub async fn run_dashboard(store: &BriefStore, status: Option<BriefStatus>) -> Result<()> {
    let mut router = Router::new();
    router.navigate("/");
    store.fetch_briefs(status).await;
    let state = store.snapshot().await;
    print!("{}", views::render_dashboard(&state, router.title()));
    if let Some(err) = state.error {
        bail!("Failed to list briefs: {}", err);
    }
    Ok(())
}

pub async fn run_new(
    store: &BriefStore,
    title: String,
    event_type: Option<String>,
    meta: Vec<(String, String)>,
) -> Result<()> {
    let data = NewBrief {
        title,
        event_type,
        brief_metadata: pairs_to_object(meta),
    };
    let brief = store
        .create_brief(&data)
        .await
        .context("Failed to create brief")?;

    let state = store.snapshot().await;
    println!("Created brief {} ({} sections)", brief.id, state.current_sections.len());
    Ok(())
}

pub async fn run_update(store: &BriefStore, id: &str, changes: BriefChanges) -> Result<()> {
    if changes.is_empty() {
        bail!("Nothing to update: pass at least one of --title, --event-type, --status");
    }
    let brief = store
        .update_brief(id, &changes)
        .await
        .with_context(|| format!("Failed to update brief {}", id))?;
    println!("Updated brief {} (status: {}, version: {})", brief.id, brief.status, brief.version);
    Ok(())
}

pub async fn run_delete(store: &BriefStore, id: &str) -> Result<()> {
    store
        .delete_brief(id)
        .await
        .with_context(|| format!("Failed to delete brief {}", id))?;
    println!("Deleted brief {}", id);
    Ok(())
}

pub async fn run_versions(api: &ApiClient, id: &str, create: bool) -> Result<()> {
    if create {
        let version = api
            .briefs()
            .create_version(id)
            .await
            .with_context(|| format!("Failed to create version of brief {}", id))?;
        println!("Created version {}", version.version_number);
        return Ok(());
    }

    let versions = api
        .briefs()
        .versions(id)
        .await
        .with_context(|| format!("Failed to list versions of brief {}", id))?;
    println!("{:<8} {:<28} ID", "VERSION", "CREATED");
    for v in &versions {
        println!(
            "{:<8} {:<28} {}",
            v.version_number,
            v.created_at.as_deref().unwrap_or("-"),
            v.id.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

pub async fn run_export(
    store: &BriefStore,
    id: &str,
    format: Option<&str>,
    out_dir: &Path,
) -> Result<()> {
    let path = store
        .export_brief(id, format, out_dir)
        .await
        .with_context(|| format!("Failed to export brief {}", id))?;
    println!("Saved {}", path.display());
    Ok(())
}

pub async fn run_section_get(api: &ApiClient, id: &str) -> Result<()> {
    let section = api
        .sections()
        .get(id)
        .await
        .with_context(|| format!("Failed to fetch section {}", id))?;
    print_json(&section)
}

pub async fn run_section_create(
    api: &ApiClient,
    brief_id: &str,
    number: i64,
    name: String,
    fields: Vec<(String, String)>,
) -> Result<()> {
    let data = NewSection {
        section_number: number,
        section_name: name,
        content: pairs_to_object(fields),
    };
    let section = api
        .sections()
        .create(brief_id, &data)
        .await
        .context("Failed to create section")?;
    println!("Created section {} ({})", section.id, section.section_name);
    Ok(())
}

/// Load the section's brief first so the in-place patch has something to
/// patch, then update.
pub async fn run_section_update(
    store: &BriefStore,
    id: &str,
    fields: Vec<(String, String)>,
) -> Result<()> {
    if fields.is_empty() {
        bail!("Nothing to update: pass at least one --set key=value");
    }

    let section = store
        .api()
        .sections()
        .get(id)
        .await
        .with_context(|| format!("Failed to fetch section {}", id))?;
    let _ = store.fetch_sections(&section.brief_id).await;

    let mut content = match section.content {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    content.extend(pairs_to_object(fields));

    let changes = SectionChanges {
        content: Some(content),
        ai_generated: None,
    };
    let section = store
        .update_section(id, &changes)
        .await
        .with_context(|| format!("Failed to update section {}", id))?;
    println!("Updated section {} ({})", section.id, section.section_name);
    Ok(())
}

pub async fn run_section_delete(api: &ApiClient, id: &str) -> Result<()> {
    api.sections()
        .delete(id)
        .await
        .with_context(|| format!("Failed to delete section {}", id))?;
    println!("Deleted section {}", id);
    Ok(())
}

pub async fn run_document_list(store: &BriefStore, brief_id: &str) -> Result<()> {
    store
        .fetch_documents(brief_id)
        .await
        .with_context(|| format!("Failed to list documents of brief {}", brief_id))?;
    let state = store.snapshot().await;
    println!("{:<38} {:<10} FILENAME", "ID", "TYPE");
    for doc in &state.current_documents {
        println!("{:<38} {:<10} {}", doc.id, doc.file_type, doc.filename);
    }
    Ok(())
}

pub async fn run_document_get(api: &ApiClient, id: &str) -> Result<()> {
    let doc = api
        .documents()
        .get(id)
        .await
        .with_context(|| format!("Failed to fetch document {}", id))?;
    print_json(&doc)
}

pub async fn run_document_upload(store: &BriefStore, brief_id: &str, file: &Path) -> Result<()> {
    let upload = Upload::from_path(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let doc = store
        .upload_document(brief_id, upload)
        .await
        .context("Failed to upload document")?;
    println!("Uploaded {} as document {}", doc.filename, doc.id);
    Ok(())
}

pub async fn run_document_analyze(api: &ApiClient, id: &str, section_name: &str) -> Result<()> {
    let result = api
        .documents()
        .analyze(id, section_name)
        .await
        .with_context(|| format!("Failed to analyze document {}", id))?;
    print_json(&result)
}

pub async fn run_document_delete(store: &BriefStore, id: &str) -> Result<()> {
    store
        .delete_document(id)
        .await
        .with_context(|| format!("Failed to delete document {}", id))?;
    println!("Deleted document {}", id);
    Ok(())
}

pub async fn run_ai_generate(
    api: &ApiClient,
    section_id: &str,
    context: Vec<(String, String)>,
    prompt: Option<String>,
) -> Result<()> {
    let generated = api
        .ai()
        .generate(section_id, Value::Object(pairs_to_object(context)), prompt)
        .await
        .context("Failed to generate content")?;
    print_json(&generated.generated_content)
}

pub async fn run_ai_suggest(
    api: &ApiClient,
    field_name: &str,
    context: Vec<(String, String)>,
) -> Result<()> {
    let suggestions = api
        .ai()
        .suggestions(field_name, &Value::Object(pairs_to_object(context)))
        .await
        .context("Failed to fetch suggestions")?;
    print_json(&suggestions)
}

pub async fn run_ai_auto_populate(api: &ApiClient, section_id: &str, brief_id: &str) -> Result<()> {
    let result = api
        .ai()
        .auto_populate(section_id, brief_id)
        .await
        .context("Failed to auto-populate section")?;
    print_json(&result)
}

pub async fn run_health(api: &ApiClient) -> Result<()> {
    let health = api
        .health()
        .await
        .with_context(|| format!("Backend at {} is not reachable", api.base_url()))?;
    println!("{}  {}", api.base_url(), health);
    Ok(())
}

/// Print the resolved configuration.
pub fn run_config(config: &Config, hostname: &str) -> Result<()> {
    let base_url = config.resolve_base_url(hostname)?;
    println!("{:<16} {}", "api base url", base_url);
    println!(
        "{:<16} {}",
        "backend.url",
        config.backend.url.as_deref().unwrap_or("(derived from host)")
    );
    println!("{:<16} {}", "use_https", config.backend.use_https);
    println!("{:<16} {}", "local_port", config.backend.local_port);
    println!("{:<16} {}", "api_prefix", config.backend.api_prefix);
    println!("{:<16} {}", "dev_server.port", config.dev_server.port);
    Ok(())
}
