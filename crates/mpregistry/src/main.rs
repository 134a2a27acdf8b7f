//! `mpreg` - CLI for mpregistry
//!
//! This binary provides the command-line interface for managing the member
//! register.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use mpregistry::cli::{
    AddCommand, Cli, Command, ConfigCommand, EditCommand, ImportSampleCommand, ListCommand,
    ShowCommand,
};
use mpregistry::form::abbreviate_photo;
use mpregistry::{init_logging, App, Config, Error, LoadReport, SubmitOutcome};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(exit_status(&e))
        }
    }
}

/// Exit status for a failed command: 2 when the input needs correcting,
/// 1 for everything else.
fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<Error>() {
        Some(e) if e.is_user_error() => 2,
        _ => 1,
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Cli {
        config: config_path,
        command,
        ..
    } = cli;
    let command = match command {
        Command::Config(cmd) => return handle_config(config_path, cmd),
        command => command,
    };

    let config = Config::load_from(config_path).context("loading configuration")?;
    let mut app = App::open(&config).context("opening member database")?;
    if let LoadReport::Discarded { reason } = app.store().load_report() {
        eprintln!("warning: stored members were unreadable and have been ignored ({reason})");
    }

    match command {
        Command::List(cmd) => handle_list(&mut app, &cmd),
        Command::Show(cmd) => handle_show(&mut app, &cmd),
        Command::Add(cmd) => handle_add(&mut app, &cmd).await,
        Command::Edit(cmd) => handle_edit(&mut app, &cmd).await,
        Command::Delete(cmd) => {
            if app.delete(cmd.id)? {
                println!("Deleted member {}", cmd.id);
            } else {
                println!("No member with id {}; nothing deleted", cmd.id);
            }
            Ok(())
        }
        Command::ImportSample(cmd) => handle_import(&mut app, &config, &cmd),
        Command::Status(cmd) => handle_status(&app, &config, cmd.json),
        // Handled above.
        Command::Config(_) => Ok(()),
    }
}

fn handle_list(app: &mut App, cmd: &ListCommand) -> anyhow::Result<()> {
    app.toggle_view();
    if cmd.page != 1 && !app.change_page(cmd.page) {
        anyhow::bail!(
            "page {} is out of range (1..={})",
            cmd.page,
            app.total_pages().max(1)
        );
    }

    if cmd.json {
        let page = app.list_view().snapshot();
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        print!("{}", app.render());
    }
    Ok(())
}

fn handle_show(app: &mut App, cmd: &ShowCommand) -> anyhow::Result<()> {
    let record = app.member(cmd.id)?;
    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        app.view_details(record);
        print!("{}", app.render());
    }
    Ok(())
}

async fn handle_add(app: &mut App, cmd: &AddCommand) -> anyhow::Result<()> {
    cmd.fields.apply(app.form_mut())?;
    cmd.photo.apply(app.form_mut()).await?;
    report(&app.submit_form().await?);
    Ok(())
}

async fn handle_edit(app: &mut App, cmd: &EditCommand) -> anyhow::Result<()> {
    let record = app.member(cmd.id)?;
    app.edit(record);
    cmd.fields.apply(app.form_mut())?;
    cmd.photo.apply(app.form_mut()).await?;
    report(&app.submit_form().await?);
    Ok(())
}

fn report(outcome: &SubmitOutcome) {
    let verb = match outcome {
        SubmitOutcome::Added(_) => "Added",
        SubmitOutcome::Updated(_) => "Updated",
    };
    let record = outcome.record();
    println!("{verb} member {}: {}", record.id, record.display_name());
    println!("  photo: {}", abbreviate_photo(&record.photo_display));
}

fn handle_import(
    app: &mut App,
    config: &Config,
    cmd: &ImportSampleCommand,
) -> anyhow::Result<()> {
    let count = cmd.count.unwrap_or(config.sample.count);
    let mut rng = match cmd.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let imported = app.import_sample_data(count, &mut rng)?;
    println!("Imported {imported} sample members");
    Ok(())
}

fn handle_status(app: &App, config: &Config, json: bool) -> anyhow::Result<()> {
    let stats = app.store().storage().stats()?;
    let load = match app.store().load_report() {
        LoadReport::Empty => "empty".to_string(),
        LoadReport::Loaded(n) => format!("loaded {n} members"),
        LoadReport::Discarded { reason } => format!("discarded: {reason}"),
    };

    if json {
        let status = serde_json::json!({
            "database_path": config.database_path(),
            "collection_key": config.storage.collection_key,
            "members": app.store().len(),
            "next_id": app.store().next_id(),
            "total_pages": app.total_pages(),
            "load": load,
            "entries": stats.entries,
            "stored_bytes": stats.stored_bytes,
            "db_size_bytes": stats.db_size_bytes,
            "last_write": stats.last_write,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("mpreg status");
        println!("------------");
        println!("Database:      {}", config.database_path().display());
        println!("Collection:    {}", config.storage.collection_key);
        println!("Members:       {}", app.store().len());
        println!("Next id:       {}", app.store().next_id());
        println!("Pages:         {}", app.total_pages());
        println!("Load:          {load}");
        println!("Stored bytes:  {}", stats.stored_bytes);
        println!("File size:     {}", stats.db_size_bytes);
        match stats.last_write {
            Some(at) => println!("Last write:    {}", at.to_rfc3339()),
            None => println!("Last write:    never"),
        }
    }
    Ok(())
}

fn handle_config(config_path: Option<PathBuf>, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(config_path).context("loading configuration")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  Collection key:     {}", config.storage.collection_key);
                println!();
                println!("[List]");
                println!("  Page size:          {}", config.list.page_size);
                println!("  Page window:        {}", config.list.page_window);
                println!();
                println!("[Sample]");
                println!("  Count:              {}", config.sample.count);
                println!("  Photo URL template: {}", config.sample.photo_url_template);
            }
        }
        ConfigCommand::Path => {
            let path = config_path.unwrap_or_else(Config::default_config_path);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path)).context("configuration is invalid")?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpregistry::MemberId;

    #[test]
    fn test_user_errors_exit_with_two() {
        let err = anyhow::Error::from(Error::MemberNotFound(MemberId::new(4)));
        assert_eq!(exit_status(&err), 2);

        let err = anyhow::Error::from(Error::ReadOnlyForm).context("editing member");
        assert_eq!(exit_status(&err), 2);
    }

    #[test]
    fn test_system_errors_exit_with_one() {
        let err = anyhow::Error::from(Error::internal("broken"));
        assert_eq!(exit_status(&err), 1);

        let err = anyhow::anyhow!("page 9 is out of range (1..=3)");
        assert_eq!(exit_status(&err), 1);
    }
}
