//! Arise CLI - daily hunter quests and progression
//!
//! Generates training quests, tracks experience, levels and rank, and keeps
//! the hunter profile on local disk.

mod adapters;
mod application;
mod config;
mod display;

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::{Confirm, Input, Password, Select};
use tracing_subscriber::EnvFilter;

use arise::{
    ContentGenerator, Difficulty, MartialStyle, Onboarding, ProfileRepository, ProgressionEngine,
    StatCategory, TrainingLocation,
};
use arise_gemini::GeminiContentGenerator;

use adapters::{JsonFileContentCache, JsonFileProfileRepository};
use application::{ContentGateway, Session};
use config::{Config, API_KEY_ENV};

type HunterSession =
    Session<JsonFileProfileRepository, JsonFileContentCache, GeminiContentGenerator>;

#[derive(Parser)]
#[command(name = "arise")]
#[command(about = "Arise CLI - Daily quests, leveling and the shadow dojo", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create your hunter (prompts for anything not given)
    Awaken {
        /// Hunter name
        #[arg(short, long)]
        name: Option<String>,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        age: Option<u32>,
        /// Height in cm
        #[arg(long)]
        height: Option<f64>,
        /// Weight in kg
        #[arg(long)]
        weight: Option<f64>,
        /// Training goal, e.g. "Weight loss"
        #[arg(long)]
        goal: Option<String>,
        /// easy, normal, hard, hell
        #[arg(short, long)]
        difficulty: Option<Difficulty>,
        /// home, calisthenics, gym
        #[arg(short, long)]
        location: Option<TrainingLocation>,
        /// Martial art style (none, boxing, muay_thai, jiu_jitsu, karate, mma, capoeira)
        #[arg(short, long)]
        style: Option<MartialStyle>,
        /// Replace an existing hunter
        #[arg(long)]
        force: bool,
    },

    /// Show level, rank and stats
    Status,

    /// Show today's quests
    Quests {
        /// Generate a new batch
        #[arg(short, long)]
        refresh: bool,
    },

    /// Complete quests interactively
    Train {
        /// Generate a new batch first
        #[arg(short, long)]
        refresh: bool,
    },

    /// Show guidance for your goal
    Tips {
        #[arg(short, long)]
        refresh: bool,
    },

    /// Show drills for your martial style
    Drills {
        #[arg(short, long)]
        refresh: bool,
    },

    /// Log experience from outside training
    Log {
        /// XP amount
        amount: f64,
        /// str, agi or vit
        category: StatCategory,
    },

    /// Change training location
    Location { location: TrainingLocation },

    /// Change difficulty
    Difficulty { difficulty: Difficulty },

    /// Change martial style (progress of every style is kept)
    Style { style: MartialStyle },

    /// Change your training goal
    Goal { goal: String },

    /// Store the Gemini API key
    Key {
        /// API key (will prompt if not provided)
        key: Option<String>,
    },

    /// Show current configuration
    Config,

    /// Delete the hunter and cached content
    Reset {
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "arise=debug" } else { "arise=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Awaken {
            name,
            gender,
            age,
            height,
            weight,
            goal,
            difficulty,
            location,
            style,
            force,
        } => {
            let onboarding = match name {
                Some(name) => {
                    let mut onboarding = Onboarding::new(name)
                        .with_difficulty(difficulty.unwrap_or_default())
                        .with_martial_style(style.unwrap_or_default());
                    if let Some(gender) = gender {
                        onboarding.gender = gender;
                    }
                    if let Some(age) = age {
                        onboarding.age = age;
                    }
                    if let Some(height) = height {
                        onboarding.height_cm = height;
                    }
                    if let Some(weight) = weight {
                        onboarding.weight_kg = weight;
                    }
                    if let Some(goal) = goal {
                        onboarding.daily_goal = goal;
                    }
                    onboarding.location = location.unwrap_or_default();
                    onboarding
                }
                None => prompt_onboarding()?,
            };
            cmd_awaken(onboarding, force).await
        }
        Commands::Status => cmd_status().await,
        Commands::Quests { refresh } => cmd_quests(refresh).await,
        Commands::Train { refresh } => cmd_train(refresh).await,
        Commands::Tips { refresh } => cmd_tips(refresh).await,
        Commands::Drills { refresh } => cmd_drills(refresh).await,
        Commands::Log { amount, category } => cmd_log(amount, category).await,
        Commands::Location { location } => {
            let mut session = open_session().await?;
            session.set_location(location).await?;
            println!("{} Training at {}", "✓".green(), location.to_string().cyan());
            Ok(())
        }
        Commands::Difficulty { difficulty } => {
            let mut session = open_session().await?;
            session.set_difficulty(difficulty).await?;
            println!(
                "{} Difficulty set to {} ({})",
                "✓".green(),
                difficulty.to_string().cyan(),
                difficulty.intensity_hint().dimmed()
            );
            Ok(())
        }
        Commands::Style { style } => {
            let mut session = open_session().await?;
            session.set_martial_style(style).await?;
            match session.profile().active_martial_progress() {
                Some(progress) => println!(
                    "{} Now training {} (Lv.{})",
                    "✓".green(),
                    style.display_name().red(),
                    progress.level
                ),
                None => println!("{} Martial training paused", "✓".green()),
            }
            Ok(())
        }
        Commands::Goal { goal } => {
            let mut session = open_session().await?;
            session.set_goal(&goal).await?;
            println!("{} Goal set to {}", "✓".green(), session.profile().daily_goal.cyan());
            Ok(())
        }
        Commands::Key { key } => cmd_key(key),
        Commands::Config => cmd_config(),
        Commands::Reset { yes } => cmd_reset(yes).await,
    }
}

// ============================================
// Wiring
// ============================================

struct Stores {
    repository: Arc<JsonFileProfileRepository>,
    cache: Arc<JsonFileContentCache>,
}

impl Stores {
    fn open(data_dir: &Path) -> Self {
        Self {
            repository: Arc::new(JsonFileProfileRepository::in_dir(data_dir)),
            cache: Arc::new(JsonFileContentCache::in_dir(data_dir)),
        }
    }
}

fn gateway(config: &Config) -> ContentGateway<GeminiContentGenerator> {
    let generator = GeminiContentGenerator::new(config.gemini_config());
    ContentGateway::new(Arc::new(generator), config.retry_policy())
}

async fn open_session() -> Result<HunterSession> {
    let config = Config::load()?;
    let stores = Stores::open(&config.data_dir()?);

    Session::resume(
        stores.repository,
        stores.cache,
        gateway(&config),
        ProgressionEngine::new(config.progression_config()),
    )
    .await
    .context("No hunter found. Run 'arise awaken' first.")
}

fn warn_if_offline(session: &HunterSession) {
    if !session.is_live() {
        println!(
            "{}",
            format!("Offline mode: set {API_KEY_ENV} or run 'arise key' for generated content.")
                .yellow()
        );
    }
}

// ============================================
// Command Implementations
// ============================================

fn prompt_onboarding() -> Result<Onboarding> {
    let name: String = Input::new()
        .with_prompt("Hunter name")
        .interact_text()
        .context("Failed to read input")?;
    let mut onboarding = Onboarding::new(name);

    onboarding.gender = Input::new()
        .with_prompt("Gender")
        .default(onboarding.gender.clone())
        .interact_text()
        .context("Failed to read input")?;
    onboarding.age = Input::new()
        .with_prompt("Age")
        .default(onboarding.age)
        .interact_text()
        .context("Failed to read input")?;
    onboarding.height_cm = Input::new()
        .with_prompt("Height (cm)")
        .default(onboarding.height_cm)
        .interact_text()
        .context("Failed to read input")?;
    onboarding.weight_kg = Input::new()
        .with_prompt("Weight (kg)")
        .default(onboarding.weight_kg)
        .interact_text()
        .context("Failed to read input")?;
    onboarding.daily_goal = Input::new()
        .with_prompt("Goal")
        .default(onboarding.daily_goal.clone())
        .interact_text()
        .context("Failed to read input")?;

    let index = Select::new()
        .with_prompt("Difficulty")
        .items(&Difficulty::ALL)
        .default(1)
        .interact()
        .context("Failed to read selection")?;
    onboarding.difficulty = Difficulty::ALL[index];

    let index = Select::new()
        .with_prompt("Where do you train?")
        .items(&TrainingLocation::ALL)
        .default(0)
        .interact()
        .context("Failed to read selection")?;
    onboarding.location = TrainingLocation::ALL[index];

    let styles: Vec<&str> = MartialStyle::ALL.iter().map(|s| s.display_name()).collect();
    let index = Select::new()
        .with_prompt("Martial style")
        .items(&styles)
        .default(0)
        .interact()
        .context("Failed to read selection")?;
    onboarding.martial_style = MartialStyle::ALL[index];

    Ok(onboarding)
}

async fn cmd_awaken(onboarding: Onboarding, force: bool) -> Result<()> {
    let config = Config::load()?;
    let stores = Stores::open(&config.data_dir()?);

    if stores.repository.load().await.is_some() {
        if !force {
            bail!("A hunter already exists. Use --force to start over.");
        }
        stores.cache.clear().await?;
    }

    let session = Session::awaken(
        onboarding,
        stores.repository,
        stores.cache,
        gateway(&config),
        ProgressionEngine::new(config.progression_config()),
    )
    .await
    .context("Failed to awaken")?;

    println!("{}", "[SYSTEM] You have been chosen.".blue().bold());
    println!("{}\n", session.awakening_message().await.italic());
    display::print_status(session.profile());
    Ok(())
}

async fn cmd_status() -> Result<()> {
    let session = open_session().await?;
    display::print_status(session.profile());
    Ok(())
}

async fn cmd_quests(refresh: bool) -> Result<()> {
    let mut session = open_session().await?;
    warn_if_offline(&session);
    session.refresh_quests(refresh).await;
    if let Some(context) = session.quest_context() {
        println!("{}", context.to_string().dimmed());
    }
    display::print_quests(session.quests());
    Ok(())
}

async fn cmd_train(refresh: bool) -> Result<()> {
    let mut session = open_session().await?;
    warn_if_offline(&session);
    session.refresh_quests(refresh).await;

    loop {
        display::print_quests(session.quests());

        let pending: Vec<(String, String)> = session
            .quests()
            .iter()
            .filter(|q| !q.completed)
            .map(|q| (q.id.clone(), format!("{} (+{:.0} XP)", q.title, q.xp_reward)))
            .collect();
        if pending.is_empty() && !session.quests().is_empty() {
            println!("\n{}", "All quests cleared. Well done, hunter.".green().bold());
            break;
        }

        let mut items: Vec<String> = pending.iter().map(|(_, label)| label.clone()).collect();
        items.push("Generate new quests".to_string());
        items.push("Done".to_string());

        let choice = Select::new()
            .with_prompt("Complete a quest")
            .items(&items)
            .default(0)
            .interact()
            .context("Failed to read selection")?;
        println!();

        if let Some((id, _)) = pending.get(choice) {
            if let Some(outcome) = session.complete_item(id).await? {
                display::print_outcome(&outcome);
                println!();
            }
        } else if choice == pending.len() {
            session.refresh_quests(true).await;
        } else {
            break;
        }
    }

    Ok(())
}

async fn cmd_tips(refresh: bool) -> Result<()> {
    let mut session = open_session().await?;
    warn_if_offline(&session);
    session.refresh_tips(refresh).await;
    if let Some(context) = session.tips_context() {
        println!("{}", context.to_string().dimmed());
    }
    display::print_tips(session.tips());
    Ok(())
}

async fn cmd_drills(refresh: bool) -> Result<()> {
    let mut session = open_session().await?;
    if session.profile().martial_style.is_none() {
        bail!("No martial style selected. Run 'arise style <style>' first.");
    }
    warn_if_offline(&session);
    session.refresh_drills(refresh).await;
    if let Some(context) = session.drill_context() {
        println!("{}", context.to_string().dimmed());
    }
    display::print_drills(session.drills());
    Ok(())
}

async fn cmd_log(amount: f64, category: StatCategory) -> Result<()> {
    let mut session = open_session().await?;
    let outcome = session.gain_experience(amount, category).await?;
    display::print_outcome(&outcome);
    Ok(())
}

fn cmd_key(key: Option<String>) -> Result<()> {
    let mut config = Config::load()?;

    let api_key = match key {
        Some(k) => k,
        None => Password::new()
            .with_prompt("Gemini API Key")
            .interact()
            .context("Failed to read API key")?,
    };

    config.set_api_key(api_key);
    if !GeminiContentGenerator::new(config.gemini_config()).is_configured() {
        bail!("API key is empty");
    }
    config.save()?;

    println!("{} API key saved to {:?}", "✓".green(), Config::config_path()?);
    Ok(())
}

fn cmd_config() -> Result<()> {
    let config = Config::load()?;
    let gemini = config.gemini_config();

    println!("{}", "Configuration:".bold());
    println!("  Config file: {:?}", Config::config_path()?);
    let data_dir = config.data_dir()?;
    println!("  Data dir:    {:?}", data_dir);
    println!(
        "  Profile:     {:?}",
        JsonFileProfileRepository::in_dir(&data_dir).path()
    );
    println!("  Model:       {}", gemini.model);

    if let Some(key) = gemini.usable_key() {
        let masked = if key.chars().count() > 8 {
            let head: String = key.chars().take(8).collect();
            format!("{head}...")
        } else {
            "***".to_string()
        };
        println!("  API Key:     {}", masked.green());
    } else {
        println!("  API Key:     {}", "(not set)".red());
    }

    let retry = config.retry_policy();
    println!(
        "  Retry:       {} attempts, {}ms initial backoff, {}ms cap",
        retry.max_attempts,
        retry.initial_backoff.as_millis(),
        retry.max_backoff.as_millis()
    );

    let progression = config.progression_config();
    println!("  Rank by:     {}", progression.rank_strategy);
    match progression.mental_trickle {
        Some(amount) => println!("  Mental gain: +{amount} per activity"),
        None => println!("  Mental gain: {}", "off".dimmed()),
    }

    Ok(())
}

async fn cmd_reset(yes: bool) -> Result<()> {
    let config = Config::load()?;
    let stores = Stores::open(&config.data_dir()?);

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Delete your hunter and all progress?")
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;
        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    stores.repository.clear().await?;
    stores.cache.clear().await?;
    println!("{} Hunter deleted", "✓".green());
    Ok(())
}
