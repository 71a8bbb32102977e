//! `gatelab` - CLI for the gatelab logic workbench.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{IsTerminal, Write as _};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use gatelab::autosave::Autosaver;
use gatelab::circuits::{self, Circuit, CircuitKind, Evaluation};
use gatelab::cli::{
    CircuitArgs, Cli, Command, ConfigCommand, OutputFormat, PrefsCommand, SessionCommand,
    SetCommand, ShowCommand, StateCommand, TableCommand, ToggleCommand,
};
use gatelab::session::{Session, View, HELP};
use gatelab::store::StateStore;
use gatelab::{init_logging, inputs::InputSet, CircuitState, Config, Error, Storage};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("failed to load configuration")?;

    match cli.command {
        Command::List => handle_list(&config),
        Command::Show(cmd) => handle_show(&config, &cmd),
        Command::Table(cmd) => handle_table(&config, &cmd),
        Command::Toggle(cmd) => handle_toggle(&config, &cmd),
        Command::Set(cmd) => handle_set(&config, &cmd),
        Command::Reset { circuit } => handle_reset(&config, &circuit),
        Command::Session(cmd) => handle_session(&config, cmd),
        Command::State(cmd) => handle_state(&config, cmd),
        Command::Prefs(cmd) => handle_prefs(&config, cmd),
        Command::Status(cmd) => handle_status(&config, cmd.json),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn open_storage(config: &Config) -> Result<Storage> {
    let path = config.database_path();
    Storage::open(&path).with_context(|| format!("failed to open {}", path.display()))
}

fn parse_kind(name: &str) -> Result<CircuitKind> {
    Ok(name.parse::<CircuitKind>()?)
}

/// An evaluation plus the equations and explanation shown with it.
#[derive(Debug, Serialize)]
struct Report<'a> {
    title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    principle: Option<&'static str>,
    #[serde(flatten)]
    evaluation: &'a Evaluation,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    equations: Vec<&'static str>,
}

fn print_evaluation(
    circuit: &Circuit,
    evaluation: &Evaluation,
    format: OutputFormat,
    show_equations: bool,
    with_principle: bool,
) -> Result<()> {
    let report = Report {
        title: circuit.title(),
        principle: with_principle.then_some(circuit.principle()),
        evaluation,
        equations: if show_equations {
            circuit.equations()
        } else {
            Vec::new()
        },
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Plain => {
            match evaluation.mode {
                Some(mode) => println!("{} [{mode}]", report.title),
                None => println!("{}", report.title),
            }
            if let Some(principle) = report.principle {
                println!("  {principle}");
            }
            println!("  in:  {}", join_signals(&evaluation.inputs));
            println!("  out: {}", join_signals(&evaluation.outputs));
            for detail in &evaluation.details {
                println!("  {}: {}", detail.label, detail.value);
            }
            for equation in &report.equations {
                println!("  {equation}");
            }
        }
        OutputFormat::Table => {
            println!("{}", report.title);
            if let Some(principle) = report.principle {
                println!("  {principle}");
                println!();
            }
            let width = evaluation
                .inputs
                .iter()
                .chain(&evaluation.outputs)
                .map(|s| s.name.len())
                .chain(evaluation.details.iter().map(|d| d.label.len()))
                .max()
                .unwrap_or(0);
            for signal in &evaluation.inputs {
                println!("  in   {:<width$}  {}", signal.name, signal.bit());
            }
            for signal in &evaluation.outputs {
                println!("  out  {:<width$}  {}", signal.name, signal.bit());
            }
            for detail in &evaluation.details {
                println!("       {:<width$}  {}", detail.label, detail.value);
            }
            for equation in &report.equations {
                println!("  {equation}");
            }
        }
    }
    Ok(())
}

fn join_signals(signals: &[circuits::Signal]) -> String {
    signals
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build a session from command-line circuit arguments.
fn session_from_args(args: &CircuitArgs, storage: Option<&Storage>) -> Result<Session> {
    let kind = parse_kind(&args.circuit)?;
    let saved = match storage {
        Some(storage) if args.saved => storage.latest_state(kind)?,
        _ => None,
    };
    let mut session = match saved {
        Some(state) => Session::restore(&state)?,
        None => Session::new(Circuit::new(kind)),
    };
    if let Some(mode) = &args.mode {
        session.set_mode(mode)?;
    }
    for (name, value) in InputSet::parse_assignments(&args.assignments)?.iter() {
        session.set(name, value)?;
    }
    Ok(session)
}

/// The latest saved session of a circuit, or a fresh one.
fn latest_session(storage: &Storage, kind: CircuitKind) -> Result<Session> {
    match storage.latest_state(kind)? {
        Some(state) => match Session::restore(&state) {
            Ok(session) => Ok(session),
            Err(e) => {
                warn!(id = %state.id, error = %e, "Ignoring unusable saved state");
                Ok(Session::new(Circuit::new(kind)))
            }
        },
        None => Ok(Session::new(Circuit::new(kind))),
    }
}

fn record_visit(storage: &mut Storage, kind: CircuitKind) -> Result<()> {
    let prefs = storage.preferences()?.unwrap_or_default().visited(kind);
    storage.save_preferences(&prefs)?;
    Ok(())
}

fn handle_list(config: &Config) -> Result<()> {
    if config.display.format == OutputFormat::Json {
        let catalog: Vec<_> = CircuitKind::ALL
            .iter()
            .map(|kind| {
                serde_json::json!({
                    "id": kind,
                    "alias": kind.alias(),
                    "title": kind.title(),
                    "modes": kind.modes(),
                    "power_switch": kind.has_power_switch(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    for kind in CircuitKind::ALL {
        println!("{:<18} {:<12} {}", kind.id(), kind.alias(), kind.title());
        let modes = kind.modes();
        if !modes.is_empty() {
            let names: Vec<&str> = modes.iter().map(|m| m.name()).collect();
            println!("{:<31} modes: {}", "", names.join(", "));
        }
    }
    Ok(())
}

fn handle_show(config: &Config, cmd: &ShowCommand) -> Result<()> {
    let mut storage = if cmd.save || cmd.circuit.saved {
        Some(open_storage(config)?)
    } else {
        None
    };
    let mut session = session_from_args(&cmd.circuit, storage.as_ref())?;
    if cmd.off {
        session.set_power(false)?;
    }

    print_evaluation(
        session.circuit(),
        &session.evaluate(),
        cmd.format.unwrap_or(config.display.format),
        config.display.show_equations,
        true,
    )?;

    if let (true, Some(storage)) = (cmd.save, storage.as_mut()) {
        let state = session.snapshot();
        if storage.save_state(&state)? {
            eprintln!("Saved {}", state.id);
        } else {
            eprintln!("Unchanged since last save");
        }
        record_visit(storage, session.circuit().kind())?;
    }
    Ok(())
}

fn handle_table(config: &Config, cmd: &TableCommand) -> Result<()> {
    let storage = if cmd.circuit.saved {
        Some(open_storage(config)?)
    } else {
        None
    };
    let session = session_from_args(&cmd.circuit, storage.as_ref())?;
    let table = session.table(config.display.max_table_inputs)?;
    print!("{}", table.render(cmd.format.unwrap_or(config.display.format))?);
    Ok(())
}

/// Apply an edit to the latest saved state of a circuit and save the result.
fn edit_saved(
    config: &Config,
    circuit: &str,
    edit: impl FnOnce(&mut Session) -> gatelab::Result<()>,
) -> Result<()> {
    let kind = parse_kind(circuit)?;
    let mut storage = open_storage(config)?;
    let mut session = latest_session(&storage, kind)?;
    edit(&mut session)?;

    let state = session.snapshot();
    let written = storage.save_state(&state)?;
    debug!(id = %state.id, written, "One-shot edit saved");
    record_visit(&mut storage, kind)?;

    print_evaluation(
        session.circuit(),
        &session.evaluate(),
        config.display.format,
        config.display.show_equations,
        false,
    )
}

fn handle_toggle(config: &Config, cmd: &ToggleCommand) -> Result<()> {
    edit_saved(config, &cmd.circuit, |session| {
        session.toggle(&cmd.input).map(|_| ())
    })
}

fn handle_set(config: &Config, cmd: &SetCommand) -> Result<()> {
    let assignments = InputSet::parse_assignments(&cmd.assignments)?;
    edit_saved(config, &cmd.circuit, |session| {
        if let Some(mode) = &cmd.mode {
            session.set_mode(mode)?;
        }
        for (name, value) in assignments.iter() {
            session.set(name, value)?;
        }
        Ok(())
    })
}

fn handle_reset(config: &Config, circuit: &str) -> Result<()> {
    edit_saved(config, circuit, |session| {
        session.reset();
        Ok(())
    })
}

fn handle_session(config: &Config, cmd: SessionCommand) -> Result<()> {
    let mut storage = open_storage(config)?;
    let kind = match &cmd.circuit {
        Some(name) => parse_kind(name)?,
        None => storage
            .preferences()?
            .and_then(|prefs| prefs.last_visited_circuit)
            .unwrap_or(CircuitKind::BasicGates),
    };
    let session = if cmd.fresh || !config.session.restore_last_state {
        Session::new(Circuit::new(kind))
    } else {
        latest_session(&storage, kind)?
    };
    record_visit(&mut storage, kind)?;

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(async {
        if !config.session.autosave || cmd.no_autosave {
            return session_loop(session, None, config).await;
        }

        let saver = Autosaver::spawn(storage, config.autosave_delay());
        let result = session_loop(session, Some(&saver), config).await;
        let (storage, stats) = saver.into_sink().await?;
        info!(
            written = stats.written,
            skipped = stats.skipped,
            failed = stats.failed,
            "Session autosave finished"
        );
        let removed = storage.apply_retention(config.storage.max_states, config.max_age())?;
        if removed > 0 {
            debug!(removed, "Pruned old states");
        }
        result
    })
}

async fn session_loop(
    mut session: Session,
    saver: Option<&Autosaver<Storage>>,
    config: &Config,
) -> Result<()> {
    let format = config.display.format;
    let interactive = std::io::stdin().is_terminal();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print_evaluation(
        session.circuit(),
        &session.evaluate(),
        format,
        config.display.show_equations,
        true,
    )?;
    if interactive {
        println!("Type 'help' for commands.");
    }

    loop {
        if interactive {
            print!("{}> ", session.circuit().kind().alias());
            std::io::stdout().flush()?;
        }
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let response = match session.execute(&line) {
            Ok(response) => response,
            Err(e) if e.is_validation_error() => {
                eprintln!("error: {e}");
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        if let (Some(saver), Some(snapshot)) = (saver, response.snapshot) {
            saver.submit(snapshot).await?;
        }
        match response.view {
            View::Evaluation => print_evaluation(
                session.circuit(),
                &response.evaluation,
                format,
                config.display.show_equations,
                false,
            )?,
            View::Table => match session.table(config.display.max_table_inputs) {
                Ok(table) => print!("{}", table.render(format)?),
                Err(e) if e.is_validation_error() => eprintln!("error: {e}"),
                Err(e) => return Err(e.into()),
            },
            View::Help => {
                println!("{HELP}");
                println!();
                println!("{}", session.circuit().principle());
            }
            View::Quit => break,
        }
    }
    Ok(())
}

fn print_states(states: &[CircuitState], format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(states)?);
        return Ok(());
    }
    if states.is_empty() {
        println!("No saved states.");
        return Ok(());
    }
    if format == OutputFormat::Table {
        println!("{:<32}  {:<18}  {:<6}  {:<20}  INPUTS", "ID", "CIRCUIT", "MODE", "SAVED");
    }
    for state in states {
        let saved = state
            .saved_at()
            .map_or_else(|| "?".to_string(), |t| t.format("%Y-%m-%d %H:%M:%S").to_string());
        let mode = state.mode.as_deref().unwrap_or("-");
        if format == OutputFormat::Table {
            println!(
                "{:<32}  {:<18}  {mode:<6}  {saved:<20}  {}",
                state.id,
                state.circuit_type.id(),
                state.describe_inputs()
            );
            continue;
        }
        let high: Vec<&str> = state
            .inputs
            .iter()
            .filter_map(|(name, value)| value.then_some(name))
            .collect();
        let high = if high.is_empty() {
            "all low".to_string()
        } else {
            high.join(" ")
        };
        println!("{}  {saved}  [{mode}]  high: {high}", state.id);
    }
    Ok(())
}

fn handle_state(config: &Config, cmd: StateCommand) -> Result<()> {
    let storage = open_storage(config)?;
    match cmd {
        StateCommand::List {
            circuit,
            limit,
            format,
        } => {
            let kind = circuit.as_deref().map(parse_kind).transpose()?;
            let states = storage.recent(kind, limit)?;
            print_states(&states, format.unwrap_or(config.display.format))?;
        }
        StateCommand::Show { id } => match storage.get_state(&id)? {
            Some(state) => println!("{}", serde_json::to_string_pretty(&state)?),
            None => return Err(Error::state_not_found(id).into()),
        },
        StateCommand::Latest { circuit } => {
            let kind = parse_kind(&circuit)?;
            match storage.latest_state(kind)? {
                Some(state) => println!("{}", serde_json::to_string_pretty(&state)?),
                None => println!("No saved state for {kind}."),
            }
        }
        StateCommand::Delete { id } => {
            if storage.delete(&id)? {
                println!("Deleted {id}");
            } else {
                return Err(Error::state_not_found(id).into());
            }
        }
        StateCommand::Prune {
            keep,
            older_than_days,
        } => {
            let removed = storage.apply_retention(
                keep.unwrap_or(config.storage.max_states),
                config.max_age_or(older_than_days),
            )?;
            println!("Pruned {removed} state(s)");
        }
    }
    Ok(())
}

fn handle_prefs(config: &Config, cmd: PrefsCommand) -> Result<()> {
    let mut storage = open_storage(config)?;
    match cmd {
        PrefsCommand::Show => match storage.preferences()? {
            Some(prefs) => println!("{}", serde_json::to_string_pretty(&prefs)?),
            None => println!("No preferences saved."),
        },
        PrefsCommand::Visit { circuit } => {
            let kind = parse_kind(&circuit)?;
            record_visit(&mut storage, kind)?;
            println!("Last visited: {kind}");
        }
        PrefsCommand::ClearLast => {
            let mut prefs = storage.preferences()?.unwrap_or_default();
            prefs.last_visited_circuit = None;
            storage.save_preferences(&prefs)?;
            println!("Cleared last visited circuit");
        }
    }
    Ok(())
}

fn handle_status(config: &Config, json: bool) -> Result<()> {
    let storage = open_storage(config)?;
    let stats = storage.stats()?;
    if json {
        let status = serde_json::json!({
            "database_path": storage.path(),
            "stats": stats,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        let date = |t: Option<chrono::DateTime<chrono::Utc>>| {
            t.map_or_else(|| "-".to_string(), |t| t.to_rfc3339())
        };
        println!("gatelab status");
        println!("--------------");
        println!("Database:      {}", storage.path().display());
        println!("Size:          {} bytes", stats.db_size_bytes);
        println!("States:        {}", stats.total_states);
        println!("Circuits:      {}", stats.circuits);
        println!("Oldest:        {}", date(stats.oldest_state));
        println!("Newest:        {}", date(stats.newest_state));
        println!("Preferences:   {}", if stats.has_preferences { "saved" } else { "none" });
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", config.to_json_pretty()?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  Max states:         {}", config.storage.max_states);
                println!("  Max age (days):     {}", config.storage.max_age_days);
                println!();
                println!("[Session]");
                println!("  Autosave:           {}", config.session.autosave);
                println!("  Autosave delay:     {} ms", config.session.autosave_delay_ms);
                println!("  Restore last state: {}", config.session.restore_last_state);
                println!();
                println!("[Display]");
                println!("  Format:             {:?}", config.display.format);
                println!("  Show equations:     {}", config.display.show_equations);
                println!("  Max table inputs:   {}", config.display.max_table_inputs);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => anyhow::bail!("configuration error: {e}"),
            }
        }
    }
    Ok(())
}
