//! The game engine — the single state-owning controller.
//!
//! RULES:
//!   - All mutations flow through engine methods; nothing else holds the
//!     snapshot. The pure modules (decay, sleep, actions, progression,
//!     catchup) never see the scheduler, the store, or the sink.
//!   - Care actions run cancel-timers → wake → mutate → settle
//!     progression → persist, in that order.
//!   - Every user-relevant event is appended to the event log and, when
//!     it carries a message, forwarded to the notification sink.
//!   - Persistence is fire-and-forget: a failed save is logged, never
//!     surfaced as a gameplay error.

use crate::{
    actions::{self, Reward},
    catchup,
    config::GameConfig,
    decay,
    error::{GameError, GameResult},
    event::{event_type_name, EventLogEntry, PetEvent, Severity},
    mess::{Dropping, MessState},
    notify::NotificationSink,
    pet::{ColorVariant, InventoryCounts, ItemKind, PetSnapshot, Species, Stage},
    progression,
    random_event,
    rng::{GameRng, RngBank, RngSlot},
    scheduler::{Scheduler, TaskKind},
    sleep,
    store::SaveStore,
    types::{EpochMs, SaveId},
};

pub struct GameEngine {
    pub save_id: SaveId,
    pub pet: PetSnapshot,
    pub inventory: InventoryCounts,
    pub config: GameConfig,
    scheduler: Scheduler,
    care_rng: GameRng,
    event_rng: GameRng,
    mess_rng: GameRng,
    mess: MessState,
    store: SaveStore,
    sink: Box<dyn NotificationSink>,
    last_event_at: EpochMs,
}

impl GameEngine {
    /// Start a brand-new game: a named egg with full stats and the
    /// starting pantry.
    #[allow(clippy::too_many_arguments)]
    pub fn new_game(
        save_id: SaveId,
        name: impl Into<String>,
        species: Species,
        color_variant: ColorVariant,
        seed: u64,
        config: GameConfig,
        store: SaveStore,
        sink: Box<dyn NotificationSink>,
        now_ms: EpochMs,
    ) -> GameResult<Self> {
        let pet = PetSnapshot::new_egg(name, species, color_variant, now_ms);
        let inventory = InventoryCounts::starting();
        let bank = RngBank::new(seed);
        let mess = MessState::new(pet.cleanliness);
        let engine = Self {
            scheduler: Scheduler::new(now_ms, &config),
            care_rng: bank.for_slot(RngSlot::Care),
            event_rng: bank.for_slot(RngSlot::Events),
            mess_rng: bank.for_slot(RngSlot::Mess),
            mess,
            save_id,
            pet,
            inventory,
            config,
            store,
            sink,
            last_event_at: now_ms,
        };
        engine.store.save(&engine.save_id, &engine.pet, &engine.inventory, now_ms)?;
        Ok(engine)
    }

    /// Resume from a persisted save, reconciling the offline gap in one
    /// shot. Returns None when no (readable) save exists.
    pub fn resume(
        save_id: SaveId,
        seed: u64,
        config: GameConfig,
        store: SaveStore,
        sink: Box<dyn NotificationSink>,
        now_ms: EpochMs,
    ) -> GameResult<Option<Self>> {
        let Some((mut pet, inventory)) = store.load(&save_id)? else {
            return Ok(None);
        };

        let events = catchup::reconcile(&mut pet, now_ms, &config);

        let bank = RngBank::new(seed);
        let mess = MessState::new(pet.cleanliness);
        let mut engine = Self {
            scheduler: Scheduler::new(now_ms, &config),
            care_rng: bank.for_slot(RngSlot::Care),
            event_rng: bank.for_slot(RngSlot::Events),
            mess_rng: bank.for_slot(RngSlot::Mess),
            mess,
            save_id,
            pet,
            inventory,
            config,
            store,
            sink,
            last_event_at: now_ms,
        };
        engine.sync_timers(now_ms);
        for event in &events {
            engine.emit(now_ms, event);
        }
        engine.persist(now_ms);
        Ok(Some(engine))
    }

    pub fn store(&self) -> &SaveStore {
        &self.store
    }

    pub fn droppings(&self) -> &[Dropping] {
        self.mess.droppings()
    }

    // ── Timer pump ─────────────────────────────────────────────

    /// Drain every scheduled task due at `now_ms` and apply its
    /// transition. The embedding calls this from its own loop; between
    /// calls nothing mutates, so no callback can observe a half-applied
    /// state.
    pub fn pump(&mut self, now_ms: EpochMs) {
        for task in self.scheduler.due(now_ms) {
            match task {
                TaskKind::SleepTick | TaskKind::SleepComplete => {
                    if let Some(event) =
                        sleep::apply_progress(&mut self.pet, now_ms, &self.config.sleep)
                    {
                        self.emit(now_ms, &event);
                    }
                    self.persist(now_ms);
                }
                TaskKind::DecayTick => {
                    let events = decay::advance(&mut self.pet, 1.0, now_ms, &self.config);
                    self.after_decay(now_ms, events);
                }
                TaskKind::AgeRefresh => {
                    self.pet.age_days = self.pet.age_days_at(now_ms);
                    self.persist(now_ms);
                }
                TaskKind::EventCheck => self.check_random_event(now_ms),
            }
        }
    }

    // ── Care actions ───────────────────────────────────────────

    pub fn feed(&mut self, now_ms: EpochMs) -> GameResult<()> {
        if let Err(e) = actions::ensure_alive(&self.pet)
            .and_then(|_| actions::ensure_stock(&self.inventory, ItemKind::Food))
        {
            return Err(self.reject(e));
        }
        self.wake_for_action(now_ms);
        let event = actions::feed(
            &mut self.pet,
            &mut self.inventory,
            &self.config.actions,
            &mut self.care_rng,
        )?;
        self.emit(now_ms, &event);
        self.finish_care(now_ms);
        Ok(())
    }

    pub fn clean(&mut self, now_ms: EpochMs) -> GameResult<()> {
        if let Err(e) = actions::ensure_alive(&self.pet)
            .and_then(|_| actions::ensure_stock(&self.inventory, ItemKind::Soap))
        {
            return Err(self.reject(e));
        }
        self.wake_for_action(now_ms);
        let event = actions::clean(&mut self.pet, &mut self.inventory, &self.config.actions)?;
        self.emit(now_ms, &event);
        self.finish_care(now_ms);
        Ok(())
    }

    pub fn medicate(&mut self, now_ms: EpochMs) -> GameResult<()> {
        if let Err(e) = actions::ensure_alive(&self.pet)
            .and_then(|_| actions::ensure_stock(&self.inventory, ItemKind::Medicine))
        {
            return Err(self.reject(e));
        }
        self.wake_for_action(now_ms);
        let event = actions::medicate(&mut self.pet, &mut self.inventory, &self.config.actions)?;
        self.emit(now_ms, &event);
        self.finish_care(now_ms);
        Ok(())
    }

    pub fn treat(&mut self, now_ms: EpochMs) -> GameResult<()> {
        if let Err(e) = actions::ensure_alive(&self.pet)
            .and_then(|_| actions::ensure_stock(&self.inventory, ItemKind::Treats))
        {
            return Err(self.reject(e));
        }
        self.wake_for_action(now_ms);
        let event = actions::treat(&mut self.pet, &mut self.inventory, &self.config.actions)?;
        self.emit(now_ms, &event);
        self.finish_care(now_ms);
        Ok(())
    }

    /// Open a play session. The minigame runs externally; its outcome
    /// comes back through `apply_reward`.
    pub fn start_play(&mut self, now_ms: EpochMs) -> GameResult<()> {
        if let Err(e) = actions::ensure_alive(&self.pet)
            .and_then(|_| actions::ensure_energy(&self.pet, self.config.actions.play_min_energy))
        {
            return Err(self.reject(e));
        }
        self.wake_for_action(now_ms);
        let event = actions::start_play(&mut self.pet, &self.config.actions)?;
        self.emit(now_ms, &event);
        self.finish_care(now_ms);
        Ok(())
    }

    /// Apply a minigame win/lose reward, plus that game's energy cost.
    pub fn apply_reward(
        &mut self,
        reward: Reward,
        energy_cost: f64,
        now_ms: EpochMs,
    ) -> GameResult<()> {
        if let Err(e) = actions::ensure_alive(&self.pet) {
            return Err(self.reject(e));
        }
        let event = actions::apply_reward(&mut self.pet, reward, energy_cost)?;
        self.emit(now_ms, &event);
        self.finish_care(now_ms);
        Ok(())
    }

    /// Buy one item from the shop catalog. Works even while the pet is
    /// dead — the shop is outside the care loop.
    pub fn buy(&mut self, item: ItemKind, now_ms: EpochMs) -> GameResult<()> {
        let Some(price) = self.config.shop_price(item) else {
            return Err(self.reject(GameError::Other(anyhow::anyhow!(
                "{item} is not in the shop catalog"
            ))));
        };
        match actions::buy(&mut self.pet, &mut self.inventory, item, price) {
            Ok(event) => {
                self.emit(now_ms, &event);
                self.persist(now_ms);
                Ok(())
            }
            Err(e) => Err(self.reject(e)),
        }
    }

    // ── Sleep ──────────────────────────────────────────────────

    pub fn start_sleep(&mut self, now_ms: EpochMs) -> GameResult<()> {
        match sleep::start(&mut self.pet, now_ms) {
            Ok(event) => {
                self.scheduler.cancel_decay();
                self.scheduler
                    .arm_sleep(now_ms, now_ms + self.config.sleep.duration_ms);
                self.emit(now_ms, &event);
                self.persist(now_ms);
                Ok(())
            }
            Err(e) => Err(self.reject(e)),
        }
    }

    /// Explicit user wake.
    pub fn wake(&mut self, now_ms: EpochMs) {
        self.wake_for_action(now_ms);
        self.persist(now_ms);
    }

    // ── Lifecycle ──────────────────────────────────────────────

    /// Hatch the egg. The tap-counter (or whatever ritual the UI runs)
    /// decides when to call this; only the stage gate lives here.
    pub fn hatch(&mut self, now_ms: EpochMs) -> GameResult<()> {
        if self.pet.stage != Stage::Egg {
            return Err(self.reject(GameError::NotAnEgg));
        }
        self.pet.stage = Stage::Baby;
        self.pet.birth_timestamp = now_ms;
        self.pet.age_days = 0;
        self.pet.last_update_timestamp = now_ms;
        self.scheduler.arm_decay(now_ms);
        let event = PetEvent::Hatched {
            name: self.pet.name.clone(),
        };
        self.emit(now_ms, &event);
        self.persist(now_ms);
        Ok(())
    }

    /// Clean up one dropping; pays a coin if it was still there.
    pub fn clean_dropping(&mut self, id: &str, now_ms: EpochMs) -> bool {
        if !self.mess.clean(id) {
            return false;
        }
        let coins = self.config.mess.clean_reward_coins;
        self.pet.coins += coins;
        let event = PetEvent::DroppingCleaned { coins };
        self.emit(now_ms, &event);
        self.persist(now_ms);
        true
    }

    /// Full external reset: wipe the save and start over with a new egg.
    /// The only path out of a terminal (dead) state.
    pub fn reset(
        &mut self,
        name: impl Into<String>,
        species: Species,
        color_variant: ColorVariant,
        now_ms: EpochMs,
    ) -> GameResult<()> {
        self.store.clear(&self.save_id)?;
        self.pet = PetSnapshot::new_egg(name, species, color_variant, now_ms);
        self.inventory = InventoryCounts::starting();
        self.mess.clear();
        self.scheduler = Scheduler::new(now_ms, &self.config);
        self.last_event_at = now_ms;
        let event = PetEvent::GameReset;
        self.emit(now_ms, &event);
        self.persist(now_ms);
        Ok(())
    }

    // ── Internals ──────────────────────────────────────────────

    /// Arm timers to match the loaded pet's state.
    fn sync_timers(&mut self, now_ms: EpochMs) {
        if self.pet.is_sleeping {
            self.scheduler.cancel_decay();
            let complete_at = self
                .pet
                .sleep_started_at
                .map_or(now_ms + self.config.sleep.duration_ms, |t| {
                    t + self.config.sleep.duration_ms
                });
            self.scheduler.arm_sleep(now_ms, complete_at);
        } else if self.pet.is_alive && self.pet.stage != Stage::Egg {
            self.scheduler.arm_decay(now_ms);
        }
    }

    /// Cancel sleep timers, then wake — in that order, so no pending
    /// interpolation tick can overwrite the mutation that follows.
    fn wake_for_action(&mut self, now_ms: EpochMs) {
        if !self.pet.is_sleeping {
            return;
        }
        self.scheduler.cancel_sleep();
        if let Some(event) = sleep::wake(&mut self.pet) {
            self.emit(now_ms, &event);
        }
        if self.pet.is_alive && self.pet.stage != Stage::Egg {
            self.scheduler.arm_decay(now_ms);
        }
    }

    /// Post-mutation tail shared by all care actions.
    fn finish_care(&mut self, now_ms: EpochMs) {
        let events = progression::settle(&mut self.pet, &self.config.progression);
        for event in &events {
            self.emit(now_ms, event);
        }
        self.observe_mess(now_ms);
        self.persist(now_ms);
    }

    fn after_decay(&mut self, now_ms: EpochMs, events: Vec<PetEvent>) {
        let died = events
            .iter()
            .any(|e| matches!(e, PetEvent::PetDied { .. }));
        for event in &events {
            self.emit(now_ms, event);
        }
        if died {
            self.scheduler.cancel_decay();
        }
        self.observe_mess(now_ms);
        self.persist(now_ms);
    }

    fn observe_mess(&mut self, now_ms: EpochMs) {
        let spawned = self.mess.observe(
            self.pet.cleanliness,
            self.config.mess.spawn_drop_threshold,
            &mut self.mess_rng,
        );
        if let Some(dropping) = spawned {
            let event = PetEvent::DroppingAppeared {
                dropping_id: dropping.id,
            };
            self.emit(now_ms, &event);
        }
    }

    fn check_random_event(&mut self, now_ms: EpochMs) {
        if !self.pet.is_alive || self.pet.stage == Stage::Egg || self.pet.is_sleeping {
            return;
        }
        let since_last = now_ms - self.last_event_at;
        if !random_event::should_trigger(since_last, &self.config.event_timing, &mut self.event_rng)
        {
            return;
        }
        let Some(picked) = random_event::pick(&self.config.events, &mut self.event_rng) else {
            return;
        };
        random_event::apply(&mut self.pet, &mut self.inventory, &picked.effects);
        let event = PetEvent::RandomEventOccurred {
            event_id: picked.event_id.clone(),
            description: picked.description.clone(),
        };
        self.last_event_at = now_ms;
        self.emit(now_ms, &event);
        let events = progression::settle(&mut self.pet, &self.config.progression);
        for e in &events {
            self.emit(now_ms, e);
        }
        self.persist(now_ms);
    }

    /// Append to the event log and forward to the sink.
    fn emit(&mut self, now_ms: EpochMs, event: &PetEvent) {
        match serde_json::to_string(event) {
            Ok(payload) => {
                let entry = EventLogEntry {
                    id: None,
                    save_id: self.save_id.clone(),
                    at_ms: now_ms,
                    event_type: event_type_name(event).to_string(),
                    payload,
                };
                if let Err(e) = self.store.append_event(&entry) {
                    log::error!("event log append failed: {e}");
                }
            }
            Err(e) => log::error!("event serialization failed: {e}"),
        }
        let message = event.message();
        if !message.is_empty() {
            self.sink.notify(event.severity(), &message);
        }
    }

    /// Surface a rejected operation to the user, then hand the error
    /// back to the caller. No state was mutated.
    fn reject(&mut self, error: GameError) -> GameError {
        let severity = match error {
            GameError::Deceased => Severity::Danger,
            _ => Severity::Warning,
        };
        self.sink.notify(severity, &error.to_string());
        error
    }

    fn persist(&self, now_ms: EpochMs) {
        if let Err(e) = self
            .store
            .save(&self.save_id, &self.pet, &self.inventory, now_ms)
        {
            log::error!("save failed: {e}");
        }
    }
}
