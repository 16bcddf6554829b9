//! Terminal front end: renders snapshots and forwards intents.

use anyhow::Result;
use clap::{Parser, Subcommand};
use pokedex_battle::battle::catch::get_catch_rate_description;
use pokedex_battle::data::{
    chart_or_neutral, find_species, load_catalog, load_roster, load_species, load_type_chart,
    pick_encounter,
};
use pokedex_battle::{
    BattleRng, BattleRules, BattleRunner, BattleSession, BattleSnapshot, CatalogEntry,
    CatchEncounter, CatchRunner, CatchSnapshot, Combatant, Config, DataSource, EncounterOutcome,
    JsonFileStore, LoadError, NamedApiResource, PlayerIntent, PokeApiClient, RetryPolicy,
    SpeciesRecord, SystemRng, UnlockedRegistry,
};
use std::future::Future;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Pause between battle messages.
const MESSAGE_PACE: Duration = Duration::from_millis(600);

#[derive(Parser, Debug)]
#[command(name = "pokedex-battle", version, about = "First-generation Pokedex with wild battles")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Seed for a reproducible run
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Print battle messages without pauses
    #[arg(long, global = true)]
    fast: bool,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// List the roster and which species are caught
    Catalog,
    /// Battle a wild Pokemon
    Battle {
        /// Your Pokemon, by name or number
        #[arg(long)]
        player: Option<String>,
    },
    /// Try to catch a wild Pokemon
    Catch,
}

struct Input {
    lines: Lines<BufReader<Stdin>>,
}

impl Input {
    fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Print `text` and read one trimmed line. None at end of input.
    async fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        print!("{} ", text);
        std::io::stdout().flush()?;
        Ok(self.lines.next_line().await?.map(|line| line.trim().to_string()))
    }

    async fn confirm(&mut self, text: &str) -> Result<bool> {
        Ok(matches!(
            self.prompt(text).await?.as_deref(),
            Some("y") | Some("Y") | Some("yes")
        ))
    }
}

struct App {
    config: Config,
    source: Arc<dyn DataSource>,
    policy: RetryPolicy,
    registry: UnlockedRegistry,
    rng: Box<dyn BattleRng + Send>,
    input: Input,
    fast: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before the subscriber so RUST_LOG from .env is honoured.
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    let rng: Box<dyn BattleRng + Send> = match cli.seed {
        Some(seed) => Box::new(SystemRng::seeded(seed)),
        None => Box::new(SystemRng::new()),
    };
    let source: Arc<dyn DataSource> = Arc::new(PokeApiClient::new(&config.api)?);
    let registry = UnlockedRegistry::load(Box::new(JsonFileStore::new(&config.save_path)));

    let mut app = App {
        policy: RetryPolicy::from_config(&config.api),
        config,
        source,
        registry,
        rng,
        input: Input::new(),
        fast: cli.fast,
    };

    match cli.command.unwrap_or(Command::Battle { player: None }) {
        Command::Catalog => app.catalog().await,
        Command::Battle { player } => app.battle(player).await,
        Command::Catch => app.catch().await,
    }
}

impl App {
    /// Run `load` until it succeeds or the player declines to retry.
    async fn load_with_retry_prompt<T, F, Fut>(&mut self, what: &str, load: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, LoadError>>,
    {
        Ok(self.retry_prompt_loop(what, load).await??)
    }

    /// Like [`Self::load_with_retry_prompt`] but hands the last `LoadError`
    /// back to the caller instead of aborting.
    async fn retry_prompt_loop<T, F, Fut>(
        &mut self,
        what: &str,
        mut load: F,
    ) -> Result<Result<T, LoadError>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, LoadError>>,
    {
        loop {
            println!("Loading {}...", what);
            match load().await {
                Ok(value) => return Ok(Ok(value)),
                Err(err) => {
                    println!("Error loading Pokemon data: {}", err);
                    println!("Please check your internet connection and try again.");
                    if !self.input.confirm("Retry? [y/N]").await? {
                        return Ok(Err(err));
                    }
                }
            }
        }
    }

    async fn roster(&mut self) -> Result<Vec<NamedApiResource>> {
        let source = Arc::clone(&self.source);
        let policy = self.policy;
        let limit = self.config.api.roster_size;
        self.load_with_retry_prompt("roster", || load_roster(source.as_ref(), limit, &policy))
            .await
    }

    async fn species(&mut self, entry: &NamedApiResource) -> Result<SpeciesRecord> {
        let source = Arc::clone(&self.source);
        let policy = self.policy;
        let what = entry.name.clone();
        self.load_with_retry_prompt(&what, || load_species(source.as_ref(), entry, &policy))
            .await
    }

    fn combatant(&self, record: &SpeciesRecord) -> Combatant {
        Combatant::from_species(
            record,
            self.config.battle.default_hp,
            &self.config.battle.version_group,
        )
    }

    async fn catalog(&mut self) -> Result<()> {
        let roster = self.roster().await?;
        let catalog = load_catalog(self.source.as_ref(), &roster, &self.policy).await;
        let unlocked = self.registry.unlocked();

        for (index, entry) in catalog.iter().enumerate() {
            match entry {
                CatalogEntry::Loaded(record) => {
                    let types = record
                        .pokemon_types()
                        .iter()
                        .map(|t| t.to_string())
                        .collect::<Vec<_>>()
                        .join("/");
                    let mark = if entry.is_unlocked(unlocked) { "caught" } else { "locked" };
                    println!("#{:03} {:<12} {:<16} {}", record.id, entry.display_name(), types, mark);
                }
                CatalogEntry::Placeholder { .. } => {
                    println!("#{:03} {:<12} ?", index + 1, entry.display_name());
                }
            }
        }
        println!("Caught {} of {}.", unlocked.len(), catalog.len());
        Ok(())
    }

    async fn battle(&mut self, player_query: Option<String>) -> Result<()> {
        let roster = self.roster().await?;
        let source = Arc::clone(&self.source);
        let policy = self.policy;
        let chart = chart_or_neutral(
            self.retry_prompt_loop("type chart", || load_type_chart(Arc::clone(&source), &policy))
                .await?,
        );
        if chart.is_empty() {
            println!("Type data is unavailable; every attack will be neutral.");
        }

        let player_entry = match self.choose_player(&roster, player_query).await? {
            Some(entry) => entry,
            None => return Ok(()),
        };
        let Some(opponent_entry) =
            pick_encounter(&roster, self.registry.unlocked(), self.rng.as_mut()).cloned()
        else {
            println!("The roster is empty.");
            return Ok(());
        };

        let player_record = self.species(&player_entry).await?;
        let opponent_record = self.species(&opponent_entry).await?;
        let player = self.combatant(&player_record);
        let opponent = self.combatant(&opponent_record);
        let session = BattleSession::new(
            format!("battle-{}-{}", player.species_id, opponent.species_id),
            player,
            opponent,
        );
        let rng = std::mem::replace(&mut self.rng, Box::new(SystemRng::new()));
        let mut runner = BattleRunner::new(session, Arc::new(chart), BattleRules::default(), rng);

        self.render_battle(&runner.snapshot()).await;
        while !runner.is_battle_ended() {
            let Some(line) = self.input.prompt("Move number, (r)un or (q)uit:").await? else {
                break;
            };
            let intent = match line.as_str() {
                "q" => break,
                "r" => PlayerIntent::Run,
                other => match other.parse::<usize>() {
                    Ok(n) if n >= 1 => PlayerIntent::SelectMove(n - 1),
                    _ => {
                        println!("Pick a move number or r.");
                        continue;
                    }
                },
            };
            match runner.submit(intent) {
                Ok(snapshot) => self.render_battle(&snapshot).await,
                Err(err) => println!("{}", err),
            }
        }
        Ok(())
    }

    async fn choose_player(
        &mut self,
        roster: &[NamedApiResource],
        mut query: Option<String>,
    ) -> Result<Option<NamedApiResource>> {
        loop {
            let text = match query.take() {
                Some(text) => text,
                None => match self.input.prompt("Choose your Pokemon (name or number):").await? {
                    Some(text) => text,
                    None => return Ok(None),
                },
            };
            match find_species(roster, &text) {
                Some(entry) => return Ok(Some(entry.clone())),
                None => println!("No Pokemon called {:?} in the roster.", text),
            }
        }
    }

    async fn render_battle(&self, snapshot: &BattleSnapshot) {
        for line in &snapshot.log {
            println!("{}", line);
            if !self.fast {
                tokio::time::sleep(MESSAGE_PACE).await;
            }
        }
        println!(
            "  {:<12} HP {:>3}/{:<3}    {:<12} HP {:>3}/{:<3}",
            snapshot.player.name,
            snapshot.player.current_hp,
            snapshot.player.max_hp,
            snapshot.opponent.name,
            snapshot.opponent.current_hp,
            snapshot.opponent.max_hp,
        );
        if snapshot.state.accepts_actions() {
            println!("{}", snapshot.message);
            for (i, m) in snapshot.offered_moves.iter().enumerate() {
                println!("  {}) {}", i + 1, m);
            }
        }
    }

    async fn catch(&mut self) -> Result<()> {
        let roster = self.roster().await?;
        let Some(target_entry) =
            pick_encounter(&roster, self.registry.unlocked(), self.rng.as_mut()).cloned()
        else {
            println!("The roster is empty.");
            return Ok(());
        };
        let target = self.species(&target_entry).await?;
        let rng = std::mem::replace(&mut self.rng, Box::new(SystemRng::new()));
        let mut runner = CatchRunner::new(CatchEncounter::new(target), rng);

        println!("{}", runner.snapshot().message);
        while !runner.is_finished() {
            let Some(line) = self.input.prompt("(t)hrow a Poke Ball, (r)un or (q)uit:").await? else {
                break;
            };
            let intent = match line.as_str() {
                "t" => PlayerIntent::AttemptCatch,
                "r" => PlayerIntent::Run,
                "q" => break,
                _ => continue,
            };
            match runner.submit(intent, &mut self.registry) {
                Ok(snapshot) => self.render_catch(intent, &snapshot, runner.encounter().target()),
                Err(err) => println!("{}", err),
            }
        }
        Ok(())
    }

    fn render_catch(&self, intent: PlayerIntent, snapshot: &CatchSnapshot, target: &SpeciesRecord) {
        if let (PlayerIntent::AttemptCatch, Some(attempt)) = (intent, snapshot.last_attempt) {
            println!(
                "{} is at {:.0}% health. Catch chance: {}",
                snapshot.target_name,
                attempt.health_percent,
                get_catch_rate_description(attempt.catch_rate)
            );
        }
        for line in &snapshot.log {
            println!("{}", line);
        }
        if snapshot.outcome == EncounterOutcome::Caught {
            println!("Base Stats:");
            for stat in &target.stats {
                println!("  {}: {}", stat_label(&stat.stat.name), stat.base_stat);
            }
            let types = snapshot
                .target_types
                .iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>()
                .join("/");
            println!("Types: {}", types);
            if snapshot.newly_unlocked {
                println!("{} was added to your Pokedex!", snapshot.target_name);
            }
        }
    }
}

/// `special-attack` -> `Special Attack`.
fn stat_label(name: &str) -> String {
    pokedex_battle::Move::new(name, None).display_name()
}
