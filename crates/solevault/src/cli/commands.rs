//! # CLI Layer
//!
//! This module is **one possible UI client** for SoleVault, not the application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Reads image and backup files named on the command line
//! - Installs the tracing subscriber
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Context Setup**: Resolve the data directory, load config, open the store
//! 3. **Dispatch**: Route commands to the API facade
//! 4. **Output**: Render text with `colored`, or JSON with `--output json`

use super::render::{
    eprint_messages, print_full, print_identification, print_json, print_list, print_messages,
    print_stats,
};
use super::setup::{Cli, Commands, ConfigCommands, OutputFormat, SneakerFields};
use clap::{CommandFactory, Parser};
use clapfig::{Clapfig, ConfigAction, SearchPath};
use solevaultapp::backup::{backup_file_name, ImportMode};
use solevaultapp::commands::{CmdMessage, CmdResult};
use solevaultapp::config::{VaultConfig, APP_NAME, CONFIG_FILE_NAME};
use solevaultapp::error::{Result, VaultError};
use solevaultapp::identify::{GeminiIdentifier, IdentifyRequest, ImageData, Identifier};
use solevaultapp::init::{initialize, resolve_data_dir, VaultContext};
use solevaultapp::query::SortOption;
use solevaultapp::model::{image_data_url, mime_for_extension, SneakerDraft};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Completions and config don't need the store
    match &cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(*shell, &mut cmd, APP_NAME, &mut std::io::stdout());
            return Ok(());
        }
        Some(Commands::Config { action }) => {
            let data_dir = resolve_data_dir(cli.data.clone())?;
            return Ok(handle_config(action.as_ref(), &data_dir)?);
        }
        _ => {}
    }

    let mut ctx = initialize(cli.data.clone())?;
    debug!(data_dir = %ctx.data_dir.display(), "Context ready");
    let output = cli.output;

    let outcome = match cli.command {
        Some(Commands::List { search, sort }) => {
            handle_list(&ctx, &search.join(" "), sort.map(Into::into), output)
        }
        Some(Commands::View { ids }) => handle_view(&ctx, &ids, output),
        Some(Commands::Add { fields }) => handle_add(&mut ctx, fields, output),
        Some(Commands::Edit {
            id,
            fields,
            clear_image,
        }) => handle_edit(&mut ctx, &id, fields, clear_image, output),
        Some(Commands::Delete { ids }) => handle_delete(&mut ctx, &ids, output),
        Some(Commands::Identify { image, hint }) => handle_identify(&ctx, image, hint, output),
        Some(Commands::Stats) => handle_stats(&ctx, output),
        Some(Commands::Export { path }) => handle_export(&ctx, path),
        Some(Commands::Import { path, merge }) => handle_import(&mut ctx, &path, merge, output),
        // Handled above
        Some(Commands::Completions { .. }) | Some(Commands::Config { .. }) => Ok(()),
        None => handle_list(&ctx, "", None, output),
    };
    Ok(outcome?)
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "warn,solevault=debug,solevaultapp=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Prints a result's messages, or its structured payload as JSON.
///
/// In JSON mode messages go to stderr so stdout stays parseable.
fn finish(result: &CmdResult, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Text => {
            print_messages(&result.messages);
            Ok(())
        }
        OutputFormat::Json => {
            eprint_messages(&result.messages);
            if let Some(stats) = &result.stats {
                print_json(stats)
            } else if let Some(found) = &result.identification {
                print_json(found)
            } else if !result.listed_sneakers.is_empty() {
                print_json(&result.listed_sneakers)
            } else {
                print_json(&result.affected_sneakers)
            }
        }
    }
}

fn handle_list(
    ctx: &VaultContext,
    term: &str,
    sort: Option<SortOption>,
    output: OutputFormat,
) -> Result<()> {
    let result = ctx.api.list_sneakers(Some(term), sort)?;
    if output == OutputFormat::Text {
        print_list(&result.listed_sneakers, |id| ctx.api.short_id(id));
    }
    finish(&result, output)
}

fn handle_view(ctx: &VaultContext, ids: &[String], output: OutputFormat) -> Result<()> {
    let result = ctx.api.view_sneakers(ids)?;
    if output == OutputFormat::Text {
        print_full(&result.listed_sneakers);
    }
    finish(&result, output)
}

fn handle_add(ctx: &mut VaultContext, fields: SneakerFields, output: OutputFormat) -> Result<()> {
    let mut draft = SneakerDraft::new();
    let image = load_image(fields.image.as_deref())?;
    if let Some(image) = &image {
        draft.image = Some(image_data_url(&image.mime_type, &image.bytes));
    }

    // A photo with no brand or model given is identified without asking.
    let auto_identify = image.is_some() && fields.brand.is_none() && fields.model.is_none();
    let mut notes = Vec::new();
    if fields.identify || auto_identify {
        notes = identify_into(ctx, image, fields.hint.clone(), &mut draft);
    }
    apply_fields(&mut draft, &fields);

    print_notes(&notes, output);
    let result = ctx.api.add_sneaker(draft)?;
    finish(&result, output)
}

fn handle_edit(
    ctx: &mut VaultContext,
    id: &str,
    fields: SneakerFields,
    clear_image: bool,
    output: OutputFormat,
) -> Result<()> {
    let mut draft = ctx.api.edit_draft(id)?;

    let image = match load_image(fields.image.as_deref())? {
        Some(image) => {
            draft.image = Some(image_data_url(&image.mime_type, &image.bytes));
            Some(image)
        }
        None if clear_image => {
            draft.image = None;
            None
        }
        // Identify can reuse the stored photo
        None => draft.image.as_deref().and_then(ImageData::from_data_url),
    };

    let mut notes = Vec::new();
    if fields.identify {
        notes = identify_into(ctx, image, fields.hint.clone(), &mut draft);
    }
    apply_fields(&mut draft, &fields);

    let result = ctx.api.edit_sneaker(id, draft)?;
    print_notes(&notes, output);
    finish(&result, output)
}

fn handle_delete(ctx: &mut VaultContext, ids: &[String], output: OutputFormat) -> Result<()> {
    let result = ctx.api.delete_sneakers(ids)?;
    finish(&result, output)
}

fn handle_identify(
    ctx: &VaultContext,
    image: Option<PathBuf>,
    hint: Option<String>,
    output: OutputFormat,
) -> Result<()> {
    let request = IdentifyRequest {
        image: load_image(image.as_deref())?,
        hint,
    };
    let identifier = identifier_for(&ctx.config)?;
    let result = ctx.api.identify(&identifier, &request)?;
    if output == OutputFormat::Text {
        if let Some(found) = &result.identification {
            print_identification(found);
        }
        return Ok(());
    }
    finish(&result, output)
}

fn handle_stats(ctx: &VaultContext, output: OutputFormat) -> Result<()> {
    let result = ctx.api.stats()?;
    if output == OutputFormat::Text {
        if let Some(stats) = &result.stats {
            print_stats(stats);
        }
    }
    finish(&result, output)
}

fn handle_export(ctx: &VaultContext, path: Option<PathBuf>) -> Result<()> {
    match path {
        Some(p) if p.as_os_str() == "-" => {
            let result = ctx.api.export_document()?;
            if let Some(document) = &result.document {
                println!("{}", document);
            }
            eprint_messages(&result.messages);
            Ok(())
        }
        other => {
            let path = other.unwrap_or_else(|| {
                PathBuf::from(backup_file_name(chrono::Local::now().date_naive()))
            });
            let result = ctx.api.export_to_file(&path)?;
            print_messages(&result.messages);
            Ok(())
        }
    }
}

fn handle_import(
    ctx: &mut VaultContext,
    path: &Path,
    merge: bool,
    output: OutputFormat,
) -> Result<()> {
    let mode = if merge {
        ImportMode::Merge
    } else {
        ImportMode::Replace
    };
    let mut result = ctx.api.import_from_file(path, mode)?;
    // The whole collection is not interesting here, only the summary
    result.affected_sneakers.clear();
    finish(&result, output)
}

/// Overlays explicitly given flags onto the draft. Flags win over identification.
fn apply_fields(draft: &mut SneakerDraft, fields: &SneakerFields) {
    if let Some(brand) = &fields.brand {
        draft.brand = brand.clone();
    }
    if let Some(model) = &fields.model {
        draft.model = model.clone();
    }
    if let Some(colorway) = &fields.colorway {
        draft.colorway = colorway.clone();
    }
    if let Some(size) = &fields.size {
        draft.size = size.clone();
    }
    if let Some(price) = &fields.price {
        draft.price = price.clone();
    }
}

/// Runs identification into `draft`. Failures are reported and leave the draft as is.
fn identify_into(
    ctx: &VaultContext,
    image: Option<ImageData>,
    hint: Option<String>,
    draft: &mut SneakerDraft,
) -> Vec<CmdMessage> {
    let request = IdentifyRequest { image, hint };
    match identifier_for(&ctx.config) {
        Ok(identifier) => ctx.api.fill_draft(&identifier, &request, draft).messages,
        Err(e) => {
            warn!(error = %e, "Identification unavailable");
            vec![CmdMessage::error(format!(
                "{}. Please fill in the details manually.",
                e
            ))]
        }
    }
}

fn identifier_for(config: &VaultConfig) -> Result<impl Identifier> {
    Ok(GeminiIdentifier::from_env(config.ai_model.clone())?
        .with_timeout(Duration::from_secs(config.ai_timeout_secs)))
}

fn print_notes(notes: &[CmdMessage], output: OutputFormat) {
    match output {
        OutputFormat::Text => print_messages(notes),
        OutputFormat::Json => eprint_messages(notes),
    }
}

fn load_image(path: Option<&Path>) -> Result<Option<ImageData>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let bytes = std::fs::read(path)?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    Ok(Some(ImageData::new(mime_for_extension(ext), bytes)))
}

/// Handle the `solevault config` subcommand using clapfig directly.
fn handle_config(action: Option<&ConfigCommands>, data_dir: &Path) -> Result<()> {
    let search_paths = vec![SearchPath::Path(data_dir.to_path_buf())];
    match action {
        None => {
            let config: VaultConfig = Clapfig::builder()
                .app_name(APP_NAME)
                .file_name(CONFIG_FILE_NAME)
                .search_paths(search_paths)
                .no_env()
                .strict(false)
                .load()
                .unwrap_or_default();

            let table =
                toml::Value::try_from(&config).map_err(|e| VaultError::Config(e.to_string()))?;
            if let toml::Value::Table(t) = table {
                for (k, v) in &t {
                    println!("{} = {}", k, format_toml_value(v));
                }
            }
            Ok(())
        }
        Some(ConfigCommands::Gen { file }) => {
            let action = ConfigAction::Gen {
                output: file.clone(),
            };
            print!("{}", config_action(search_paths, &action)?);
            Ok(())
        }
        Some(ConfigCommands::Get { key }) => {
            let action = ConfigAction::Get {
                key: key.clone(),
                scope: None,
            };
            println!("{}", config_action(search_paths, &action)?);
            Ok(())
        }
        Some(ConfigCommands::Set { key, value }) => {
            // The data dir may not exist yet on a fresh machine
            std::fs::create_dir_all(data_dir)?;
            let action = ConfigAction::Set {
                key: key.clone(),
                value: value.clone(),
                scope: None,
            };
            println!("{}", config_action(search_paths, &action)?);
            Ok(())
        }
    }
}

fn config_action(search_paths: Vec<SearchPath>, action: &ConfigAction) -> Result<String> {
    let result = Clapfig::builder::<VaultConfig>()
        .app_name(APP_NAME)
        .file_name(CONFIG_FILE_NAME)
        .search_paths(search_paths)
        .no_env()
        .strict(false)
        .handle(action)
        .map_err(|e| VaultError::Config(e.to_string()))?;
    Ok(result.to_string())
}

/// Format a TOML value for display.
fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => format!("\"{}\"", s),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_draft_fields() {
        let mut draft = SneakerDraft {
            brand: "Nike".into(),
            model: "Dunk Low".into(),
            colorway: "Panda".into(),
            price: "115".into(),
            ..SneakerDraft::default()
        };
        let fields = SneakerFields {
            colorway: Some("Grey Fog".into()),
            price: Some(String::new()),
            ..SneakerFields::default()
        };
        apply_fields(&mut draft, &fields);
        assert_eq!(draft.brand, "Nike");
        assert_eq!(draft.colorway, "Grey Fog");
        assert_eq!(draft.price, "");
    }

    #[test]
    fn toml_strings_are_quoted() {
        assert_eq!(format_toml_value(&toml::Value::String("x".into())), "\"x\"");
        assert_eq!(format_toml_value(&toml::Value::Integer(30)), "30");
    }

    #[test]
    fn missing_image_path_is_none() {
        assert!(load_image(None).unwrap().is_none());
        assert!(load_image(Some(Path::new("/no/such/image.png"))).is_err());
    }
}
