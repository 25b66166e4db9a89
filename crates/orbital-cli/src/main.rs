//! orbital CLI: radial orbital layout engine in the terminal

use clap::{Parser, Subcommand};
use orbital_engine::{
    default_services, load_items, LayoutParams, NodeView, OrbitalConfig, OrbitalEngine, Phase,
    TimelineItem,
};
use orbital_tui::{IconMode, Theme, TuiOptions};
use serde_json::json;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Radial orbital layout engine with TUI
#[derive(Parser)]
#[command(name = "orbital")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (default: .orbital/config.json if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Item list as a JSON array (default: built-in services)
    #[arg(long, global = true)]
    items: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the TUI (default when no command specified)
    Tui {
        /// ASCII icons and borders
        #[arg(long)]
        ascii: bool,

        /// Color theme: mocha, latte, or contrast
        #[arg(long, default_value = "mocha")]
        theme: String,
    },

    /// Print the transform of every node at an angle
    Layout {
        /// Lay out N placeholder items instead of an item list (wins over --items)
        #[arg(long)]
        count: Option<usize>,

        /// Ring angle in degrees
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        angle: f64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the items
    Items {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration as JSON
    Config {
        /// Write the defaults to .orbital/config.json if no config exists
        #[arg(long)]
        init: bool,
    },

    /// Run the engine headless for a number of ticks
    Simulate {
        /// Number of rotation ticks
        #[arg(long)]
        ticks: u64,

        /// Focus this item id before the first tick
        #[arg(long)]
        focus: Option<u32>,

        /// Clear focus after this many ticks
        #[arg(long)]
        clear_after: Option<u64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    let cli = Cli::parse();
    let is_tui = matches!(cli.command, None | Some(Commands::Tui { .. }));
    init_logging(is_tui);

    if let Err(e) = dispatch(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Stderr logging for commands; the TUI owns the terminal, so it only logs
/// to the file named by `ORBITAL_LOG`.
fn init_logging(is_tui: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if !is_tui {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return;
    }

    let Some(path) = std::env::var_os("ORBITAL_LOG") else {
        return;
    };
    match File::create(&path) {
        Ok(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init(),
        Err(e) => eprintln!(
            "Warning: cannot open log file {}: {e}",
            Path::new(&path).display()
        ),
    }
}

fn dispatch(cli: Cli) -> CliResult {
    let config = load_config(cli.config.as_deref())?;
    let items = cli.items.as_deref();

    match cli.command {
        None => cmd_tui(config, items, false, "mocha"),
        Some(Commands::Tui { ascii, theme }) => cmd_tui(config, items, ascii, &theme),
        Some(Commands::Layout { count, angle, json }) => {
            let items = match count {
                Some(n) => placeholder_items(n),
                None => load_item_list(items)?,
            };
            cmd_layout(&items, &config, angle, json)
        }
        Some(Commands::Items { json }) => cmd_items(&load_item_list(items)?, json),
        Some(Commands::Config { init }) => cmd_config(&config, cli.config.is_some(), init),
        Some(Commands::Simulate {
            ticks,
            focus,
            clear_after,
            json,
        }) => {
            let engine = OrbitalEngine::new(load_item_list(items)?, config)?;
            cmd_simulate(engine, ticks, focus, clear_after, json)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<OrbitalConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => OrbitalConfig::load(path)?,
        None => OrbitalConfig::discover(&std::env::current_dir()?)?,
    };
    debug!(?config, "configuration loaded");
    Ok(config)
}

fn load_item_list(path: Option<&Path>) -> Result<Vec<TimelineItem>, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let items = load_items(path)?;
            info!(count = items.len(), path = %path.display(), "items loaded");
            Ok(items)
        }
        None => Ok(default_services()),
    }
}

/// `n` items named after their position, for layout previews.
fn placeholder_items(n: usize) -> Vec<TimelineItem> {
    (1..=n)
        .map(|i| {
            let id = u32::try_from(i).unwrap_or(u32::MAX);
            TimelineItem::new(id, format!("Item {i}"), String::new(), "dot")
        })
        .collect()
}

fn cmd_tui(config: OrbitalConfig, items: Option<&Path>, ascii: bool, theme: &str) -> CliResult {
    let theme = Theme::by_name(theme).ok_or_else(|| format!("unknown theme: {theme}"))?;
    let icon_mode = if ascii {
        IconMode::Ascii
    } else {
        IconMode::from_env()
    };
    let options = TuiOptions {
        items: load_item_list(items)?,
        config,
        icon_mode,
        theme,
    };

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(orbital_tui::run_tui(options))
}

fn node_json(node: &NodeView<'_>) -> serde_json::Value {
    json!({
        "id": node.item.id,
        "title": node.item.title,
        "x": node.transform.x,
        "y": node.transform.y,
        "z_order": node.transform.z_order,
        "opacity": node.transform.opacity,
        "scale": node.transform.scale,
        "expanded": node.expanded,
    })
}

fn print_nodes(nodes: &[NodeView<'_>]) {
    println!(
        "{:>4}  {:>9}  {:>9}  {:>5}  {:>7}  {:>5}  title",
        "id", "x", "y", "z", "opacity", "scale"
    );
    for node in nodes {
        let t = &node.transform;
        let marker = if node.expanded { " *" } else { "" };
        println!(
            "{:>4}  {:>9.2}  {:>9.2}  {:>5}  {:>7.3}  {:>5.3}  {}{marker}",
            node.item.id.0, t.x, t.y, t.z_order, t.opacity, t.scale, node.item.title
        );
    }
}

fn cmd_layout(
    items: &[TimelineItem],
    config: &OrbitalConfig,
    angle: f64,
    json: bool,
) -> CliResult {
    let params = LayoutParams::from(config);
    let total = items.len();
    let nodes: Vec<NodeView<'_>> = items
        .iter()
        .enumerate()
        .map(|(index, item)| NodeView {
            index,
            item,
            transform: params.compute(index, total, angle),
            expanded: false,
        })
        .collect();

    if json {
        let out: Vec<_> = nodes.iter().map(node_json).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Layout at {angle}° ({total} items)\n");
    print_nodes(&nodes);
    Ok(())
}

fn cmd_items(items: &[TimelineItem], json: bool) -> CliResult {
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
        return Ok(());
    }

    for item in items {
        println!("  {} - {} [{}] energy {:.0}", item.id, item.title, item.status, item.energy);
        println!("    Icon: {}", item.icon.name());
        if !item.content.is_empty() {
            println!("    {}", item.content);
        }
        println!();
    }
    println!("{} item(s)", items.len());
    Ok(())
}

fn cmd_config(config: &OrbitalConfig, explicit: bool, init: bool) -> CliResult {
    if init && !explicit {
        let path = std::env::current_dir()?
            .join(orbital_engine::config::CONFIG_DIR)
            .join(orbital_engine::config::CONFIG_FILE);
        if path.exists() {
            eprintln!("Config already exists at {}", path.display());
        } else {
            config.save(&path)?;
            eprintln!("Created {}", path.display());
        }
    }
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

/// Outcome of a headless run.
#[derive(Debug, PartialEq)]
struct SimulationReport {
    /// Ticks that moved the ring.
    advanced: u64,
    /// Ticks swallowed while an item was focused.
    paused: u64,
}

fn simulate(
    engine: &mut OrbitalEngine,
    ticks: u64,
    focus: Option<u32>,
    clear_after: Option<u64>,
) -> SimulationReport {
    if let Some(id) = focus {
        engine.toggle_expansion(orbital_engine::ItemId(id));
    }

    let mut report = SimulationReport {
        advanced: 0,
        paused: 0,
    };
    for tick in 1..=ticks {
        if engine.tick() {
            report.advanced += 1;
        } else {
            report.paused += 1;
        }
        if clear_after == Some(tick) {
            engine.clear_focus();
        }
    }
    report
}

fn cmd_simulate(
    mut engine: OrbitalEngine,
    ticks: u64,
    focus: Option<u32>,
    clear_after: Option<u64>,
    json: bool,
) -> CliResult {
    let report = simulate(&mut engine, ticks, focus, clear_after);
    let nodes = engine.nodes();

    if json {
        let out = json!({
            "ticks": ticks,
            "advanced": report.advanced,
            "paused": report.paused,
            "angle": engine.angle(),
            "auto_rotate": engine.auto_rotate(),
            "focused": engine.focused(),
            "nodes": nodes.iter().map(node_json).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let phase = match engine.phase() {
        Phase::Rotating => "rotating".to_string(),
        Phase::Focused(id) => format!("focused on {id}"),
    };
    println!(
        "{ticks} tick(s): {} advanced, {} paused; angle {}°, {phase}\n",
        report.advanced,
        report.paused,
        engine.angle()
    );
    print_nodes(&nodes);
    Ok(())
}
