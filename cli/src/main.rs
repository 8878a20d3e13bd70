mod nim;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use harvest_agents::{plan, Agent, AlphaBetaAgent};
use harvest_core::{simulate_detailed, Goal, GameState, Scenario};
use nim::Nim;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "harvest")]
#[command(version, about = "Resource planner and alpha-beta search driver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a gold and wood collection run for a scenario file
    Plan {
        /// Scenario JSON file
        scenario: PathBuf,

        /// Override the required gold
        #[arg(long)]
        gold: Option<u32>,

        /// Override the required wood
        #[arg(long)]
        wood: Option<u32>,

        /// Stop after this many expanded states
        #[arg(long)]
        max_expansions: Option<usize>,
    },

    /// Play Nim between two alpha-beta agents
    Nim {
        /// Pile sizes, comma separated
        #[arg(long, value_delimiter = ',', default_value = "3,4,5")]
        piles: Vec<u32>,

        /// Search depth in plies
        #[arg(long, default_value_t = 6)]
        depth: u8,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Plan {
            scenario,
            gold,
            wood,
            max_expansions,
        } => run_plan(scenario, gold, wood, max_expansions),
        Commands::Nim { piles, depth } => run_nim(piles, depth),
    }
}

fn run_plan(
    path: PathBuf,
    gold: Option<u32>,
    wood: Option<u32>,
    max_expansions: Option<usize>,
) -> Result<()> {
    let mut scenario = Scenario::load(&path)
        .with_context(|| format!("failed to load scenario {}", path.display()))?;
    if let Some(limit) = max_expansions {
        scenario.planner = scenario.planner.with_max_expansions(limit);
    }
    let goal = Goal::new(
        gold.unwrap_or(scenario.required_gold),
        wood.unwrap_or(scenario.required_wood),
    );

    let state = scenario
        .into_state()
        .context("invalid scenario")?
        .with_goal(goal);
    info!(gold = goal.gold, wood = goal.wood, "planning");

    let plan = plan(&state).context("planning failed")?;
    let report = simulate_detailed(&state, &plan.actions).context("plan does not replay")?;

    for (step, action) in plan.iter().enumerate() {
        println!("{:>3}. {}", step + 1, action);
    }
    println!();
    println!("Steps: {}", report.steps);
    println!("Cost: {}", plan.cost);
    println!(
        "Moves: {}  Harvests: {}  Deposits: {}",
        report.moves, report.harvests, report.deposits
    );
    println!("Banked: {} gold, {} wood", report.gold_banked, report.wood_banked);
    println!("Expanded: {}  Generated: {}", plan.expanded, plan.generated);

    Ok(())
}

fn run_nim(piles: Vec<u32>, depth: u8) -> Result<()> {
    if piles.iter().all(|&p| p == 0) {
        bail!("at least one non-empty pile is required");
    }

    let mut players = [AlphaBetaAgent::new(depth), AlphaBetaAgent::new(depth)];
    let mut game = Nim::new(piles);
    let mut turn = 0;

    println!("Piles: {:?}", game.piles());
    while !game.is_terminal() {
        let player = &mut players[turn % 2];
        let take = player
            .best_action(&game)?
            .context("search returned no move in a live position")?;

        game = Nim::new(game.apply(take).piles().to_vec());
        println!(
            "Player {} ({}): {}  -> {:?}",
            turn % 2 + 1,
            Agent::<Nim>::name(player),
            take,
            game.piles()
        );
        turn += 1;
    }

    println!("Player {} takes the last stone and wins", (turn + 1) % 2 + 1);
    Ok(())
}
