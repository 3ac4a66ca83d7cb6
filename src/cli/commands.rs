//! Command dispatch: load a document, run one operation, write the result

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{OutputFormat, Settings};
use crate::domain::{DomTree, RemovableTag, TreeBuilder, WrapTag};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(format) = cli.format {
        settings.format = format;
    }
    if cli.lenient {
        settings.strict = false;
    }
    debug!(?settings, "effective settings");

    match &cli.command {
        Some(Commands::Html { file }) => _html(file, &settings),
        Some(Commands::Print { file }) => _print(file, &settings),
        Some(Commands::Replace { file, old, new }) => _replace(file, old, new, &settings),
        Some(Commands::BoldRow { file, row }) => _bold_row(file, *row, &settings),
        Some(Commands::Remove { file, tag }) => _remove(file, tag, &settings),
        Some(Commands::AddTag { file, word, tag }) => _add_tag(file, word, tag, &settings),
        Some(Commands::Config { command }) => _config(command, &settings),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::InvalidArgs(
            "no command given, see --help".to_string(),
        )),
    }
}

/// Build a document from a file, or from stdin when `file` is `-`.
pub fn load_document(file: &Path, settings: &Settings) -> CliResult<DomTree> {
    let builder = TreeBuilder::new().with_strict(settings.strict);
    if file == Path::new("-") {
        return Ok(builder.build_from_reader(io::stdin().lock())?);
    }
    let handle = File::open(file)
        .map_err(|e| CliError::io(format!("open {}", file.display()), e))?;
    Ok(builder.build_from_reader(BufReader::new(handle))?)
}

fn emit(tree: &DomTree, format: OutputFormat) -> CliResult<()> {
    if tree.is_empty() {
        output::warning("document is empty");
    }
    match format {
        OutputFormat::Html => output::info(&tree.get_html()),
        OutputFormat::Tree => tree
            .print()
            .map_err(|e| CliError::io("write tree to stdout", e))?,
    }
    Ok(())
}

#[instrument(skip(settings))]
fn _html(file: &Path, settings: &Settings) -> CliResult<()> {
    let tree = load_document(file, settings)?;
    emit(&tree, OutputFormat::Html)
}

#[instrument(skip(settings))]
fn _print(file: &Path, settings: &Settings) -> CliResult<()> {
    let tree = load_document(file, settings)?;
    emit(&tree, OutputFormat::Tree)
}

#[instrument(skip(settings))]
fn _replace(file: &Path, old: &str, new: &str, settings: &Settings) -> CliResult<()> {
    let mut tree = load_document(file, settings)?;
    tree.replace_tag(old, new)?;
    emit(&tree, settings.format)
}

#[instrument(skip(settings))]
fn _bold_row(file: &Path, row: usize, settings: &Settings) -> CliResult<()> {
    let mut tree = load_document(file, settings)?;
    tree.bold_row(row)?;
    emit(&tree, settings.format)
}

#[instrument(skip(settings))]
fn _remove(file: &Path, tag: &str, settings: &Settings) -> CliResult<()> {
    let mut tree = load_document(file, settings)?;
    if RemovableTag::parse(tag).is_none() {
        output::warning(&format!("cannot remove <{tag}>, expected one of p, em, b, ol, ul"));
    }
    tree.remove_tag(tag);
    emit(&tree, settings.format)
}

#[instrument(skip(settings))]
fn _add_tag(file: &Path, word: &str, tag: &str, settings: &Settings) -> CliResult<()> {
    let mut tree = load_document(file, settings)?;
    if WrapTag::parse(tag).is_none() {
        output::warning(&format!("cannot wrap words in <{tag}>, expected em or b"));
    }
    tree.add_tag(word, tag);
    emit(&tree, settings.format)
}

#[instrument(skip(settings))]
fn _config(command: &ConfigCommands, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}
