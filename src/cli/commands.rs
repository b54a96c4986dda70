//! Command dispatch

use std::io::{self, BufRead, IsTerminal};
use std::thread;
use std::time::Duration;

use clap::CommandFactory;
use clap_complete::generate;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::application::services::{DecisionSession, ScenarioService};
use crate::application::{ApplicationError, IoResultExt, Phase, PhaseAction, Playback};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::cli::render::{self, TreeConvert};
use crate::config::{global_config_path, local_config_path, OutputFormat, Settings};
use crate::domain::{presets, Domain, Trace};

/// Per-invocation state resolved from flags and settings.
struct Context<'a> {
    settings: &'a Settings,
    format: OutputFormat,
    service: ScenarioService,
}

impl Context<'_> {
    fn domain(&self, arg: Option<&str>) -> CliResult<Domain> {
        match arg {
            Some(key) => Ok(self.service.domain(key)?),
            None => Ok(self.settings.default_domain),
        }
    }

    fn json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}

pub fn execute_command(cli: &Cli, settings: &Settings) -> CliResult<()> {
    let ctx = Context {
        settings,
        format: cli.format.unwrap_or(settings.format),
        service: ScenarioService::new(settings.strict_input && !cli.lenient),
    };

    match &cli.command {
        Commands::Nodes { domain } => cmd_nodes(&ctx, domain.as_deref()),
        Commands::Tree { domain } => cmd_tree(&ctx, domain.as_deref()),
        Commands::Run {
            domain,
            preset,
            overrides,
            input,
            play,
            no_play,
            interval,
        } => {
            let domain = ctx.domain(domain.as_deref())?;
            let attributes = match input {
                Some(path) => ctx.service.load_attributes(domain.key(), path)?,
                None => ctx.service.attributes_with_overrides(
                    domain.key(),
                    preset.as_deref(),
                    overrides,
                )?,
            };
            let trace = ctx.service.trace(domain.key(), &attributes)?;
            let autoplay = *play || (settings.playback.autoplay && !*no_play);
            let interval = interval.unwrap_or(settings.playback.interval_ms);
            cmd_run(&ctx, domain, &trace, autoplay, interval)
        }
        Commands::Snapshot { domain } => cmd_snapshot(&ctx, domain.as_deref()),
        Commands::Presets { domain } => cmd_presets(&ctx, domain.as_deref()),
        Commands::Walk { domain, choices } => {
            let domain = ctx.domain(domain.as_deref())?;
            if choices.is_empty() {
                cmd_walk_interactive(domain)
            } else {
                cmd_walk(&ctx, domain, choices)
            }
        }
        Commands::Info { domain } => cmd_info(&ctx, domain.as_deref()),
        Commands::Config { command } => cmd_config(&ctx, cli, command),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let text =
        serde_json::to_string_pretty(value).map_err(|e| ApplicationError::OperationFailed {
            context: "serialize output".into(),
            source: Box::new(e),
        })?;
    output::info(&text);
    Ok(())
}

fn cmd_nodes(ctx: &Context, domain: Option<&str>) -> CliResult<()> {
    let domain = ctx.domain(domain)?;
    let nodes = ctx.service.get_nodes(domain.key())?;
    if ctx.json() {
        return print_json(nodes);
    }
    output::header(domain.title());
    output::info(&render::node_table(domain.tree()));
    Ok(())
}

fn cmd_tree(ctx: &Context, domain: Option<&str>) -> CliResult<()> {
    let domain = ctx.domain(domain)?;
    let tree = domain.tree();
    if ctx.json() {
        return print_json(&serde_json::json!({
            "nodes": tree.nodes(),
            "edges": tree.edges(),
        }));
    }
    output::info(&tree.to_tree_string());
    Ok(())
}

#[instrument(level = "debug", skip(ctx, trace))]
fn cmd_run(
    ctx: &Context,
    domain: Domain,
    trace: &Trace,
    autoplay: bool,
    interval_ms: u64,
) -> CliResult<()> {
    if ctx.json() {
        return print_json(trace);
    }

    let tree = domain.tree();
    if autoplay && io::stdout().is_terminal() {
        let mut playback = Playback::new(trace.steps.clone());
        playback.play();
        output::info(&render::playback_frame(&playback, tree));
        loop {
            thread::sleep(Duration::from_millis(interval_ms));
            if !playback.tick() {
                break;
            }
            println!();
            output::info(&render::playback_frame(&playback, tree));
        }
    } else {
        for (i, step) in trace.steps.iter().enumerate() {
            output::info(&render::step_line(i, step));
        }
    }

    let path = trace
        .path
        .iter()
        .filter_map(|&id| tree.get(id))
        .map(|n| n.display_label())
        .collect::<Vec<_>>()
        .join(" → ");
    println!();
    output::action("Path", &path);
    if let Some(outcome) = trace.outcome {
        output::success(&format!("{} ({})", outcome.emblem(), outcome));
    }
    Ok(())
}

fn cmd_snapshot(ctx: &Context, domain: Option<&str>) -> CliResult<()> {
    let domain = ctx.domain(domain)?;
    let steps = ctx.service.full_structure_snapshot(domain.key())?;
    if ctx.json() {
        return print_json(&steps);
    }
    for (i, step) in steps.iter().enumerate() {
        output::info(&render::step_line(i, step));
    }
    Ok(())
}

fn cmd_presets(ctx: &Context, domain: Option<&str>) -> CliResult<()> {
    let domain = ctx.domain(domain)?;
    let list = presets(domain);
    if ctx.json() {
        return print_json(list);
    }
    output::header(domain.title());
    for (i, preset) in list.iter().enumerate() {
        output::action(&format!("{i}. {}", preset.name), preset.description);
        if let Ok(Value::Object(fields)) = serde_json::to_value(preset.attributes) {
            let attrs = fields
                .iter()
                .filter(|(k, _)| k.as_str() != "domain")
                .map(|(k, v)| match v {
                    Value::String(s) => format!("{k}={s}"),
                    other => format!("{k}={other}"),
                })
                .collect::<Vec<_>>()
                .join(" ");
            output::detail(&attrs);
        }
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WalkReport<'a> {
    answers: Vec<String>,
    node_path: Vec<usize>,
    outcome: Option<crate::domain::Outcome>,
    label: &'a str,
    trace: Trace,
}

fn cmd_walk(ctx: &Context, domain: Domain, choices: &[usize]) -> CliResult<()> {
    let mut session = DecisionSession::new(domain);
    let outcome = session.choose_all(choices)?;
    let current = session.current()?;
    debug!(node = current.id, ?outcome, "walk: finished");

    if ctx.json() {
        return print_json(&WalkReport {
            answers: session.path(),
            node_path: session.node_path(),
            outcome,
            label: current.label,
            trace: session.to_trace(),
        });
    }

    for answer in session.path() {
        output::detail(&answer);
    }
    match outcome {
        Some(o) => output::success(&format!("{} {}", current.display_label(), o.emblem())),
        None => output::warning(&format!(
            "stopped at '{}' before reaching an outcome",
            current.display_label()
        )),
    }
    Ok(())
}

/// One trimmed, lowercased line from stdin; `None` on end of input.
fn read_command() -> CliResult<Option<String>> {
    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_lowercase()))
}

fn cmd_walk_interactive(domain: Domain) -> CliResult<()> {
    let mut phase = Phase::default();
    let mut session = DecisionSession::new(domain);
    info!(%domain, "interactive walk");

    loop {
        match phase {
            Phase::Intro => {
                output::header(domain.title());
                output::info(domain.description());
                output::prompt("[enter] full tree  [q] quit >");
                match read_command()?.as_deref() {
                    None | Some("q") => return Ok(()),
                    Some(_) => phase = phase.apply(PhaseAction::ShowFullTree),
                }
            }
            Phase::FullTree => {
                output::info(&domain.tree().to_tree_string());
                output::prompt("[enter] start choosing  [b] back  [q] quit >");
                match read_command()?.as_deref() {
                    None | Some("q") => return Ok(()),
                    Some("b") => phase = phase.apply(PhaseAction::BackToIntro),
                    Some(_) => phase = phase.apply(PhaseAction::StartPlayground),
                }
            }
            Phase::Playground => {
                let node = session.current()?;
                if node.is_leaf {
                    for answer in session.path() {
                        output::detail(&answer);
                    }
                    if let Some(o) = node.outcome {
                        output::success(&format!("{} {}", node.display_label(), o.emblem()));
                    }
                    output::prompt("[r] restart  [t] tree  [b] back  [q] quit >");
                } else {
                    output::header(&node.display_label());
                    for option in session.options() {
                        output::detail(&format!("[{}] {}", option.index, option.label));
                    }
                    output::prompt("branch number, [r] restart, [b] back, [q] quit >");
                }

                match read_command()?.as_deref() {
                    None | Some("q") => return Ok(()),
                    Some("r") => session.reset(),
                    Some("t") => {
                        session.reset();
                        phase = phase.apply(PhaseAction::ShowFullTree);
                    }
                    Some("b") => {
                        session.reset();
                        phase = phase.apply(PhaseAction::BackToIntro);
                    }
                    Some(choice) => match choice.parse::<usize>() {
                        Ok(index) => {
                            if let Err(e) = session.choose(index) {
                                output::warning(&e);
                            }
                        }
                        Err(_) => output::warning("enter one of the listed branch numbers"),
                    },
                }
            }
        }
    }
}

#[derive(Serialize)]
struct DomainInfo {
    key: &'static str,
    title: &'static str,
    description: &'static str,
    nodes: usize,
    leaves: usize,
    depth: usize,
    attributes: &'static [&'static str],
}

impl From<Domain> for DomainInfo {
    fn from(domain: Domain) -> Self {
        let tree = domain.tree();
        Self {
            key: domain.key(),
            title: domain.title(),
            description: domain.description(),
            nodes: tree.len(),
            leaves: tree.leaves().len(),
            depth: tree.depth(),
            attributes: domain.attribute_names(),
        }
    }
}

fn cmd_info(ctx: &Context, domain: Option<&str>) -> CliResult<()> {
    let domains = match domain {
        Some(key) => vec![ctx.domain(Some(key))?],
        None => Domain::ALL.to_vec(),
    };
    let infos: Vec<DomainInfo> = domains.into_iter().map(DomainInfo::from).collect();
    if ctx.json() {
        return print_json(&infos);
    }
    for info in &infos {
        output::header(&format!("{} ({})", info.title, info.key));
        output::info(info.description);
        output::detail(&format!(
            "{} nodes, {} leaves, depth {}",
            info.nodes, info.leaves, info.depth
        ));
        output::detail(&format!("attributes: {}", info.attributes.join(", ")));
        println!();
    }
    Ok(())
}

fn cmd_config(ctx: &Context, cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            if ctx.json() {
                return print_json(ctx.settings);
            }
            output::info(&ctx.settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            let local_dir = match &cli.config_dir {
                Some(dir) => dir.clone(),
                None => std::env::current_dir()?,
            };
            let mut locations = Vec::new();
            if let Some(global) = global_config_path() {
                locations.push(("global", global));
            }
            locations.push(("local", local_config_path(&local_dir)));
            for (kind, path) in locations {
                let marker = if path.exists() { "exists" } else { "missing" };
                output::action(kind, &format!("{} ({marker})", path.display()));
            }
            Ok(())
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("no home directory to place the global config in".into())
                })?
            } else {
                let dir = match &cli.config_dir {
                    Some(dir) => dir.clone(),
                    None => std::env::current_dir()?,
                };
                local_config_path(&dir)
            };
            if path.exists() {
                return Err(CliError::Usage(format!(
                    "{} already exists",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).with_path_context("create config dir", parent)?;
            }
            std::fs::write(&path, Settings::template())
                .with_path_context("write config", &path)?;
            output::success(&format!("wrote {}", path.display()));
            Ok(())
        }
    }
}
