use clap::{Parser, Subcommand};
use gzclp_core::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gzclp")]
#[command(about = "GZCLP linear-progression strength tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show current progress for every lift (default)
    Status,

    /// Show the next session to perform
    Next,

    /// Record lift results and commit the session
    Complete {
        /// Lift ID that was completed successfully (repeatable)
        #[arg(long = "pass", value_name = "ID")]
        passed: Vec<u32>,

        /// Lift ID that was failed (repeatable)
        #[arg(long = "fail", value_name = "ID")]
        failed: Vec<u32>,
    },

    /// Edit the lift catalog
    #[command(subcommand)]
    Lift(LiftCommands),

    /// Personalize starting weights and finish first-run setup
    Init {
        #[arg(long)]
        squat: Option<f64>,

        #[arg(long)]
        bench: Option<f64>,

        #[arg(long)]
        deadlift: Option<f64>,

        #[arg(long)]
        press: Option<f64>,

        #[arg(long)]
        row: Option<f64>,
    },

    /// Reset all program data to the default catalog
    Reset {
        /// Confirm: this discards all progress and history
        #[arg(long)]
        yes: bool,
    },

    /// List completed sessions
    History,

    /// Export completed-session history to CSV
    Export {
        /// Output path (defaults to <data-dir>/history.csv)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum LiftCommands {
    /// Add a lift to the program
    Add {
        /// Tier (T1, T2 or T3)
        #[arg(long)]
        tier: String,

        #[arg(long)]
        name: String,

        /// Weight added after each successful attempt
        #[arg(long)]
        increment: f64,

        /// Starting weight
        #[arg(long)]
        weight: f64,

        /// Session index 0-3 (repeatable)
        #[arg(long = "session", value_name = "INDEX", required = true)]
        sessions: Vec<usize>,
    },

    /// Remove a lift from the program and every session
    Remove {
        /// Lift ID
        id: u32,
    },
}

fn main() -> Result<()> {
    gzclp_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let state_path = data_dir.join("program.json");

    match cli.command.unwrap_or(Commands::Status) {
        Commands::Status => cmd_status(&state_path, &config),
        Commands::Next => cmd_next(&state_path, &config),
        Commands::Complete { passed, failed } => {
            cmd_complete(&state_path, &config, &passed, &failed)
        }
        Commands::Lift(cmd) => cmd_lift(&state_path, &config, cmd),
        Commands::Init {
            squat,
            bench,
            deadlift,
            press,
            row,
        } => cmd_init(&state_path, &config, squat, bench, deadlift, press, row),
        Commands::Reset { yes } => cmd_reset(&state_path, &config, yes),
        Commands::History => cmd_history(&state_path, &config),
        Commands::Export { output } => {
            let output = output.unwrap_or_else(|| data_dir.join("history.csv"));
            cmd_export(&state_path, &config, &output)
        }
    }
}

/// Load the saved program, or seed the default one on first run
fn load_engine(state_path: &std::path::Path, config: &Config) -> Result<ProgramEngine> {
    let progression = config.progression.clone();
    match ProgramState::load(state_path)? {
        Some(state) => Ok(ProgramEngine::new(state, progression)),
        None => {
            println!("No saved program found - starting the default GZCLP program.");
            let engine = ProgramEngine::with_default_program(progression);
            engine.state().save(state_path)?;
            Ok(engine)
        }
    }
}

fn cmd_status(state_path: &std::path::Path, config: &Config) -> Result<()> {
    let engine = load_engine(state_path, config)?;

    println!("\n{}", engine.summary());
    let plan = engine.next_session()?;
    println!("Next session: {} (day {})", plan.name, plan.day);
    Ok(())
}

fn cmd_next(state_path: &std::path::Path, config: &Config) -> Result<()> {
    let engine = load_engine(state_path, config)?;
    let plan = engine.next_session()?;
    display_session(&plan);
    Ok(())
}

fn cmd_complete(
    state_path: &std::path::Path,
    config: &Config,
    passed: &[u32],
    failed: &[u32],
) -> Result<()> {
    let mut engine = load_engine(state_path, config)?;

    for &id in passed {
        engine.record_result(LiftId(id), true)?;
    }
    for &id in failed {
        engine.record_result(LiftId(id), false)?;
    }

    engine.complete_session()?;
    engine.state().save(state_path)?;

    println!("✓ Session completed and saved");
    for &id in passed {
        if let Ok(lift) = engine.state().lift(LiftId(id)) {
            println!(
                "  [{}] {} -> {}kg next time",
                id, lift.name, lift.next_attempt.weight
            );
        }
    }
    for &id in failed {
        if let Ok(lift) = engine.state().lift(LiftId(id)) {
            let scheme = lift.tier.rep_schemes()[lift.next_attempt.rep_scheme_index];
            let last = scheme.last_set();
            println!(
                "  [{}] {} -> {}x{}{} at {}kg next time",
                id,
                lift.name,
                scheme.num_sets(),
                last.reps,
                if last.amrap { "+" } else { "" },
                lift.next_attempt.weight
            );
        }
    }

    let plan = engine.next_session()?;
    println!("\nNext up: session {}", plan.name);
    Ok(())
}

fn cmd_lift(state_path: &std::path::Path, config: &Config, cmd: LiftCommands) -> Result<()> {
    let mut engine = load_engine(state_path, config)?;

    match cmd {
        LiftCommands::Add {
            tier,
            name,
            increment,
            weight,
            sessions,
        } => {
            let tier = parse_tier(&tier)?;
            let id = engine.add_lift(tier, name.clone(), increment, weight, &sessions)?;
            engine.state().save(state_path)?;
            println!("✓ Added {} {} as lift [{}]", tier, name, id);
        }
        LiftCommands::Remove { id } => {
            let id = LiftId(id);
            let name = engine.state().lift(id)?.name.clone();
            engine.remove_lift(id)?;
            engine.state().save(state_path)?;
            println!("✓ Removed {} (lift [{}]) from the program", name, id);
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_init(
    state_path: &std::path::Path,
    config: &Config,
    squat: Option<f64>,
    bench: Option<f64>,
    deadlift: Option<f64>,
    press: Option<f64>,
    row: Option<f64>,
) -> Result<()> {
    let mut engine = load_engine(state_path, config)?;

    let defaults = StartingWeights::default();
    let weights = StartingWeights {
        squat: squat.unwrap_or(defaults.squat),
        bench: bench.unwrap_or(defaults.bench),
        deadlift: deadlift.unwrap_or(defaults.deadlift),
        overhead_press: press.unwrap_or(defaults.overhead_press),
        row: row.unwrap_or(defaults.row),
    };

    engine.set_starting_weights(&weights);
    engine.complete_setup();
    engine.state().save(state_path)?;

    println!("✓ Starting weights set; setup complete");
    display_session(&engine.next_session()?);
    Ok(())
}

fn cmd_reset(state_path: &std::path::Path, config: &Config, yes: bool) -> Result<()> {
    if !yes {
        eprintln!("Refusing to reset without --yes (this discards all progress and history)");
        std::process::exit(1);
    }

    let mut engine = load_engine(state_path, config)?;
    engine.reset();
    engine.state().save(state_path)?;

    println!("✓ Program reset to defaults");
    Ok(())
}

fn cmd_history(state_path: &std::path::Path, config: &Config) -> Result<()> {
    let engine = load_engine(state_path, config)?;
    let sessions = &engine.state().completed_sessions;

    if sessions.is_empty() {
        println!("No completed sessions yet.");
        return Ok(());
    }

    for (index, session) in sessions.iter().enumerate() {
        println!(
            "Session #{} ({})",
            index + 1,
            session.completed_at.format("%Y-%m-%d %H:%M")
        );
        for result in &session.results {
            let name = engine
                .state()
                .lift(result.lift_id)
                .map(|l| l.name.clone())
                .unwrap_or_else(|_| format!("(removed lift {})", result.lift_id));
            let mark = if result.outcome.is_success() {
                "✓"
            } else {
                "✗"
            };
            println!("  {} {}", mark, name);
        }
    }
    Ok(())
}

fn cmd_export(
    state_path: &std::path::Path,
    config: &Config,
    output: &std::path::Path,
) -> Result<()> {
    let engine = load_engine(state_path, config)?;
    let rows = write_history_csv(engine.state(), output)?;
    println!("✓ Exported {} history rows", rows);
    println!("  CSV: {}", output.display());
    Ok(())
}

fn display_session(plan: &SessionPlan) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  SESSION {}  (day {})", plan.name, plan.day);
    println!("╰─────────────────────────────────────────╯");
    println!();

    for exercise in &plan.exercises {
        println!(
            "  [{}] {}  {}  {}x{}{}  {}kg  (rest {} min)",
            exercise.id,
            exercise.tier,
            exercise.name,
            exercise.sets,
            exercise.reps,
            if exercise.amrap { "+" } else { "" },
            exercise.weight,
            exercise.tier.rest_minutes(),
        );
    }
    println!();
}

fn parse_tier(value: &str) -> Result<Tier> {
    match value.to_uppercase().as_str() {
        "T1" => Ok(Tier::T1),
        "T2" => Ok(Tier::T2),
        "T3" => Ok(Tier::T3),
        other => Err(Error::Config(format!(
            "unknown tier '{}' (expected T1, T2 or T3)",
            other
        ))),
    }
}
