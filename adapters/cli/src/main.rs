#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays, edits and shares Wise Mole levels.

mod config;
mod script;
mod share;
mod storage;

use std::{cell::Cell, path::PathBuf, rc::Rc};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use wise_mole_core::{Command, DEFAULT_EDITOR_FIELD_SIZE};
use wise_mole_system_catalog as catalog;
use wise_mole_system_editor::{Editor, EditorInput};
use wise_mole_system_notifications::Notifier;
use wise_mole_world::{self as world, query, World};

use crate::{config::Config, share::SharedLevel};

#[derive(Debug, Parser)]
#[command(name = "wise-mole")]
#[command(about = "Play, edit and share Wise Mole box-pushing levels", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Play a level with a scripted move sequence and print the result
    Play {
        #[command(flatten)]
        source: LevelSource,
        /// Moves to apply: U, D, L, R to walk, z to undo, y to redo
        #[arg(short, long, default_value = "")]
        moves: String,
    },
    /// Print a level in its text form
    Show {
        #[command(flatten)]
        source: LevelSource,
    },
    /// Save a level to disk
    Save {
        #[command(flatten)]
        source: LevelSource,
        #[command(flatten)]
        target: SaveTarget,
    },
    /// Print a single-line share code for a level
    Share {
        #[command(flatten)]
        source: LevelSource,
    },
    /// Decode a share code and print or save the level
    Unshare {
        /// Share code produced by the `share` command
        code: String,
        /// Level file to write instead of printing
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(long, requires = "out")]
        force: bool,
    },
    /// Check that a level can be played
    Validate {
        #[command(flatten)]
        source: LevelSource,
    },
    /// List the predefined levels
    Levels,
    /// Edit a level, or a blank field when no source is given
    Edit {
        #[command(flatten)]
        source: LevelSource,
        /// New field size, clamped to 1..=40 per axis
        #[arg(long, value_name = "WIDTHxHEIGHT")]
        resize: Option<String>,
        /// Tool applications in order, e.g. `wall:0,0` or `box:3,2`
        #[arg(long = "paint", value_name = "TOOL:COLUMN,ROW")]
        paints: Vec<String>,
        /// Level file to write instead of printing
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(long, requires = "out")]
        force: bool,
        /// Save even if the level has no mole or lacks boxes for its targets
        #[arg(long, requires = "out")]
        allow_invalid: bool,
    },
}

#[derive(Debug, Args)]
#[group(multiple = false)]
struct LevelSource {
    /// Predefined level number, starting at 1
    #[arg(short, long, value_name = "N")]
    level: Option<usize>,
    /// Level file to open
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,
}

impl LevelSource {
    fn open(&self) -> Result<World> {
        self.open_optional()?
            .context("pass --level <N> or --file <FILE> to choose a level")
    }

    fn open_optional(&self) -> Result<Option<World>> {
        if let Some(index) = self.level {
            return Ok(Some(catalog::load_predefined(index)?));
        }
        match &self.file {
            Some(path) => Ok(Some(storage::load_level_file(path)?)),
            None => Ok(None),
        }
    }
}

#[derive(Debug, Args)]
struct SaveTarget {
    /// Level file to write; the .wmgame extension is added when missing
    #[arg(short, long, value_name = "FILE")]
    out: PathBuf,
    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
    /// Save even if the level has no mole or lacks boxes for its targets
    #[arg(long)]
    allow_invalid: bool,
}

/// Entry point for the Wise Mole command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    init_tracing(&config);
    run(cli.command, &config)
}

fn init_tracing(config: &Config) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Play { source, moves } => play(source.open()?, &moves),
        Commands::Show { source } => {
            print!("{}", render(&source.open()?));
            Ok(())
        }
        Commands::Save { source, target } => {
            let world = source.open()?;
            save(&world, &target, config)
        }
        Commands::Share { source } => {
            let world = source.open()?;
            let shared = SharedLevel {
                size: query::field_size(&world),
                bytes: world.to_level_bytes(),
            };
            println!("{}", shared.encode());
            Ok(())
        }
        Commands::Unshare { code, out, force } => unshare(&code, out, force, config),
        Commands::Validate { source } => {
            let world = source.open()?;
            catalog::validate_for_save(&world)
                .with_context(|| format!("level '{}' is not playable", query::name(&world)))?;
            println!("level '{}' is playable", query::name(&world));
            Ok(())
        }
        Commands::Levels => list_levels(),
        Commands::Edit {
            source,
            resize,
            paints,
            out,
            force,
            allow_invalid,
        } => {
            let world = edit(&source, resize.as_deref(), &paints)?;
            match out {
                Some(out) => save(
                    &world,
                    &SaveTarget {
                        out,
                        force,
                        allow_invalid,
                    },
                    config,
                ),
                None => {
                    print!("{}", render(&world));
                    Ok(())
                }
            }
        }
    }
}

fn play(mut world: World, moves: &str) -> Result<()> {
    let commands = script::parse_moves(moves)?;

    let solved_at = Rc::new(Cell::new(None));
    let mut notifier = Notifier::new();
    notifier.on_mole_moved(|step| {
        debug!(from = ?step.from, to = ?step.to, pushed = step.pushed_box.is_some(), "mole moved");
    });
    let sink = Rc::clone(&solved_at);
    notifier.on_user_won(move |steps| sink.set(Some(steps)));

    let mut events = Vec::new();
    for command in commands {
        events.clear();
        world::apply(&mut world, command, &mut events);
        if events.is_empty() {
            debug!(?command, "command had no effect");
        }
        notifier.dispatch(&events);
    }

    print!("{}", render(&world));
    println!(
        "steps: {}, pushes: {}",
        query::step_count(&world),
        query::step_with_load_count(&world)
    );
    match solved_at.get() {
        Some(steps) if query::is_won(&world) => println!("solved in {steps} steps"),
        _ if query::is_won(&world) => println!("solved"),
        _ => println!("not solved"),
    }
    Ok(())
}

fn edit(source: &LevelSource, resize: Option<&str>, paints: &[String]) -> Result<World> {
    let mut editor = Editor::new();
    let mut world = match source.open_optional()? {
        Some(world) => world,
        None => {
            let mut world = World::new();
            let mut commands = Vec::new();
            editor.resize(DEFAULT_EDITOR_FIELD_SIZE, &mut commands);
            apply_all(&mut world, commands);
            world
        }
    };

    if let Some(resize) = resize {
        let mut commands = Vec::new();
        editor.resize(script::parse_size(resize)?, &mut commands);
        apply_all(&mut world, commands);
    }

    for paint in paints {
        let (tool, cell) = script::parse_paint(paint)?;
        let size = query::field_size(&world);
        if !cell.is_within(size) {
            warn!(
                column = cell.column(),
                row = cell.row(),
                "paint outside the field ignored"
            );
        }
        editor.select_tool(tool);
        let mut commands = Vec::new();
        editor.handle(
            EditorInput::new(Some(cell), false),
            size,
            query::mole_position(&world),
            &mut commands,
        );
        apply_all(&mut world, commands);
    }

    Ok(world)
}

fn apply_all(world: &mut World, commands: Vec<Command>) {
    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
}

fn save(world: &World, target: &SaveTarget, config: &Config) -> Result<()> {
    if let Err(issue) = catalog::validate_for_save(world) {
        if !target.allow_invalid {
            bail!("{issue}; pass --allow-invalid to save anyway");
        }
        warn!(%issue, "saving a level that cannot be played");
    }
    let path = config.resolve_save_path(&target.out);
    let written = storage::save_level_bytes(&path, &world.to_level_bytes(), target.force)?;
    println!("saved {}", written.display());
    Ok(())
}

fn unshare(code: &str, out: Option<PathBuf>, force: bool, config: &Config) -> Result<()> {
    let shared = SharedLevel::decode(code).context("failed to decode share code")?;
    let world =
        World::from_level_bytes(&shared.bytes).context("share code does not hold a level")?;
    match out {
        Some(out) => {
            let path = config.resolve_save_path(&out);
            let written = storage::save_level_bytes(&path, &world.to_level_bytes(), force)?;
            println!("saved {}", written.display());
        }
        None => print!("{}", render(&world)),
    }
    Ok(())
}

fn list_levels() -> Result<()> {
    for index in 1..=catalog::predefined_level_count() {
        let world = catalog::load_predefined(index)?;
        let size = query::field_size(&world);
        println!(
            "{index}: {}x{}, {} boxes",
            size.width(),
            size.height(),
            query::boxes(&world).len()
        );
    }
    Ok(())
}

fn render(world: &World) -> String {
    String::from_utf8_lossy(&world.to_level_bytes()).into_owned()
}
