//! pet-runner: headless runner for the PocketPet core.
//!
//! Usage:
//!   pet-runner --name Mochi --db pet.db --minutes 120
//!   pet-runner --db pet.db --ipc-mode
//!
//! Batch mode creates (or resumes) a pet, fast-forwards simulated wall
//! clock, and prints a summary. IPC mode reads one JSON command per
//! stdin line and answers with the full UI state, for driving the core
//! from an external frontend or a test harness.

use anyhow::Result;
use pocketpet_core::{
    actions::Reward,
    clock,
    config::GameConfig,
    engine::GameEngine,
    event::Severity,
    mess::Dropping,
    notify::MemorySink,
    pet::{ColorVariant, InventoryCounts, ItemKind, PetSnapshot, Species, Stage},
    store::SaveStore,
    types::EpochMs,
};
use std::env;
use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    NewGame { name: String },
    Hatch,
    Feed,
    Clean,
    Medicine,
    Treat,
    Play,
    Reward { coins: i64, exp: i64, happiness: f64, energy_cost: f64 },
    Sleep,
    Wake,
    Buy { item: ItemKind },
    CleanDropping { id: String },
    Advance { ms: EpochMs },
    Reset { name: String },
    Quit,
}

#[derive(serde::Serialize)]
struct UiState<'a> {
    now_ms: EpochMs,
    pet: &'a PetSnapshot,
    inventory: &'a InventoryCounts,
    droppings: &'a [Dropping],
    notifications: Vec<Notification>,
    error: Option<String>,
}

#[derive(serde::Serialize)]
struct Notification {
    severity: Severity,
    message: String,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let minutes = parse_arg(&args, "--minutes", 0i64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let db = flag_value(&args, "--db").unwrap_or(":memory:");
    let name = flag_value(&args, "--name").unwrap_or("Mochi");
    let save_id = flag_value(&args, "--save-id").unwrap_or("slot-1").to_string();
    let config = match flag_value(&args, "--config") {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    let store = open_store(db)?;
    store.migrate()?;

    let sink = Arc::new(Mutex::new(MemorySink::default()));
    let now = clock::now_ms();

    let mut engine = match GameEngine::resume(
        save_id.clone(),
        seed,
        config.clone(),
        store,
        Box::new(sink.clone()),
        now,
    )? {
        Some(engine) => {
            log::info!("resumed save '{save_id}'");
            engine
        }
        None => {
            let store = open_store(db)?;
            store.migrate()?;
            let engine = GameEngine::new_game(
                save_id.clone(),
                name,
                Species::Cat,
                ColorVariant::White,
                seed,
                config,
                store,
                Box::new(sink.clone()),
                now,
            )?;
            log::info!("started new game '{save_id}' for {name}");
            engine
        }
    };

    if ipc_mode {
        run_ipc_loop(&mut engine, &sink, now)?;
    } else {
        if engine.pet.stage == Stage::Egg {
            // Batch runs skip the tap ritual and hatch immediately.
            engine.hatch(now)?;
        }
        let end = fast_forward(&mut engine, now, minutes * 60_000);
        print_summary(&engine, end);
    }

    Ok(())
}

fn open_store(db: &str) -> Result<SaveStore> {
    let store = if db == ":memory:" {
        SaveStore::in_memory()?
    } else {
        SaveStore::open(db)?
    };
    Ok(store)
}

/// Step simulated wall clock forward, pumping the engine as the real
/// timer loop would: every second while sleeping, every half minute
/// otherwise.
fn fast_forward(engine: &mut GameEngine, from_ms: EpochMs, span_ms: EpochMs) -> EpochMs {
    let mut now = from_ms;
    let end = from_ms + span_ms.max(0);
    while now < end {
        let step = if engine.pet.is_sleeping { 1_000 } else { 30_000 };
        now = (now + step).min(end);
        engine.pump(now);
    }
    end
}

fn run_ipc_loop(
    engine: &mut GameEngine,
    sink: &Arc<Mutex<MemorySink>>,
    start_ms: EpochMs,
) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();
    // Virtual clock cursor: `advance` moves it, everything else uses it.
    let mut now = start_ms;

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{err_json}")?;
                stdout.flush()?;
                continue;
            }
        };

        let mut error: Option<String> = None;
        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => {}
            IpcCommand::NewGame { name } | IpcCommand::Reset { name } => {
                if let Err(e) = engine.reset(name, Species::Cat, ColorVariant::White, now) {
                    error = Some(e.to_string());
                }
            }
            IpcCommand::Hatch => error = engine.hatch(now).err().map(|e| e.to_string()),
            IpcCommand::Feed => error = engine.feed(now).err().map(|e| e.to_string()),
            IpcCommand::Clean => error = engine.clean(now).err().map(|e| e.to_string()),
            IpcCommand::Medicine => error = engine.medicate(now).err().map(|e| e.to_string()),
            IpcCommand::Treat => error = engine.treat(now).err().map(|e| e.to_string()),
            IpcCommand::Play => error = engine.start_play(now).err().map(|e| e.to_string()),
            IpcCommand::Reward { coins, exp, happiness, energy_cost } => {
                let reward = Reward { coins, exp, happiness };
                error = engine
                    .apply_reward(reward, energy_cost, now)
                    .err()
                    .map(|e| e.to_string());
            }
            IpcCommand::Sleep => error = engine.start_sleep(now).err().map(|e| e.to_string()),
            IpcCommand::Wake => engine.wake(now),
            IpcCommand::Buy { item } => error = engine.buy(item, now).err().map(|e| e.to_string()),
            IpcCommand::CleanDropping { id } => {
                if !engine.clean_dropping(&id, now) {
                    error = Some(format!("no dropping '{id}'"));
                }
            }
            IpcCommand::Advance { ms } => {
                now = fast_forward(engine, now, ms);
            }
        }

        let notifications = sink
            .lock()
            .map(|mut s| s.drain())
            .unwrap_or_default()
            .into_iter()
            .map(|(severity, message)| Notification { severity, message })
            .collect();
        let state = UiState {
            now_ms: now,
            pet: &engine.pet,
            inventory: &engine.inventory,
            droppings: engine.droppings(),
            notifications,
            error,
        };
        writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
        stdout.flush()?;
    }
    Ok(())
}

fn print_summary(engine: &GameEngine, now: EpochMs) {
    let pet = &engine.pet;
    let when = chrono::DateTime::from_timestamp_millis(now)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| now.to_string());

    println!("=== PET SUMMARY ({when}) ===");
    println!("  name:        {}", pet.name);
    println!("  stage:       {}", pet.stage.label());
    println!("  alive:       {}", pet.is_alive);
    println!("  mood:        {:?}", pet.mood);
    println!("  danger:      {:?}", pet.danger_level);
    println!("  hunger:      {:.1}", pet.hunger);
    println!("  happiness:   {:.1}", pet.happiness);
    println!("  energy:      {:.1}", pet.energy);
    println!("  cleanliness: {:.1}", pet.cleanliness);
    println!("  health:      {:.1}", pet.health);
    println!("  level:       {} ({} exp)", pet.level, pet.experience);
    println!("  coins:       {}", pet.coins);
    println!("  age:         {} days", pet.age_days);
    println!(
        "  pantry:      food {} / medicine {} / treats {} / soap {}",
        engine.inventory.food,
        engine.inventory.medicine,
        engine.inventory.treats,
        engine.inventory.soap
    );
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
