//! Game session: общее состояние одной партии
//!
//! Архитектура:
//! - `SessionState`: единственный Resource с canonical состоянием партии
//!   (HP, дверь, инвентарь, пули, terminal флаги, строки для UI)
//! - Подсистемы мутируют его только через методы ниже (guards внутри)
//! - Presentation читает, но не пишет (решения игрока приходят как SessionCommand)
//!
//! Инвариант: после game over / victory урон никому не применяется.

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ai::{Kid, Voenkom, VoenkomConfig, VoenkomState};
use crate::equipment::Inventory;
use crate::item_system::{shelf_items, WeaponKind, WorldItem};
use crate::physics::KinematicBody;
use crate::player::Player;
use crate::presentation::{SessionCommand, SpeechLine, SpeechRequest, SpeechStatus, Speaker, UiEvent};
use crate::shooting::Bullet;
use crate::world::{PLAYER_SPAWN, VOENKOM_POST};
use crate::{DeterministicRng, SimulationSet};

pub const MAX_PLAYER_HP: u32 = 100;
pub const MAX_VOENKOM_HP: u32 = 150;
pub const STARTING_AMMO: u32 = 6;

/// Выброшенный предмет: вперёд от игрока и на высоте руки (от ног)
const DROP_DISTANCE: f32 = 1.5;
const DROP_HEIGHT: f32 = 1.7;

pub const INTRO_MESSAGE: &str = "WASD - Ходить. F - Взаимодействие. G - Инвентарь.";
pub const REJECT_MESSAGE: &str = "ТЫ ОТКАЗАЛСЯ! ОН В ЯРОСТИ!";
pub const VICTORY_MESSAGE: &str = "Военком мертв. Ты свободен!";
pub const KILLED_MESSAGE: &str = "ТЫ ПОГИБ. Военком забрал тебя.";
pub const CAPTURED_MESSAGE: &str = "ТЫ ПОЙМАН";
pub const COMPLIANCE_MESSAGE: &str = "Повестка подписана. Тебя везут на сборный пункт.";
pub const COMPLIANCE_LINE: &str = "Свежее мясо на фронт.";

/// Чем закончилась партия
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect, Serialize, Deserialize)]
pub enum GameOutcome {
    /// HP игрока кончились от ударов
    Killed,
    /// Задержание: 5 секунд неподвижности в Checking
    Captured,
    /// Игрок подписал повестку
    Compliance,
    /// Военком убит
    Victory,
}

/// Что произошло при уроне военкому
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VoenkomDamageReport {
    pub applied: u32,
    pub summons_withdrawn: bool,
    pub killed: bool,
}

/// Resource: состояние партии
#[derive(Resource, Debug, Clone)]
pub struct SessionState {
    /// Session clock (секунды симуляции, монотонно, переживает restart)
    pub clock: f32,
    /// Момент старта партии по `clock` (None: меню, партия не начата)
    pub started_at: Option<f32>,

    pub player_hp: u32,
    pub voenkom_hp: u32,
    pub door_open: bool,
    pub peephole_active: bool,

    pub inventory: Inventory,
    pub ammo: u32,

    pub voenkom_state: VoenkomState,
    /// Compliance ending: анимация военкома заморожена (он не Dead)
    pub voenkom_frozen: bool,
    pub detention_time: f32,
    /// Prompt повестки сейчас показан
    pub summons_shown: bool,

    pub world_items: Vec<WorldItem>,
    pub bullets: Vec<Bullet>,

    pub is_game_over: bool,
    pub is_victory: bool,
    pub outcome: Option<GameOutcome>,

    pub message: String,
    pub interaction_text: String,

    next_serial: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            clock: 0.0,
            started_at: None,
            player_hp: MAX_PLAYER_HP,
            voenkom_hp: MAX_VOENKOM_HP,
            door_open: false,
            peephole_active: false,
            inventory: Inventory::default(),
            ammo: STARTING_AMMO,
            voenkom_state: VoenkomState::default(),
            voenkom_frozen: false,
            detention_time: 0.0,
            summons_shown: false,
            world_items: shelf_items(),
            bullets: Vec::new(),
            is_game_over: false,
            is_victory: false,
            outcome: None,
            message: INTRO_MESSAGE.to_string(),
            interaction_text: String::new(),
            next_serial: 1,
        }
    }
}

impl SessionState {
    /// Свежая партия, стартовавшая в момент `clock`
    pub fn started(clock: f32) -> Self {
        Self {
            clock,
            started_at: Some(clock),
            ..Default::default()
        }
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Секунды с начала партии (0, пока не начата)
    pub fn elapsed(&self) -> f32 {
        self.started_at.map_or(0.0, |start| self.clock - start)
    }

    /// Партия закончена (любым исходом)
    pub fn is_finished(&self) -> bool {
        self.is_game_over || self.is_victory
    }

    /// Игрок может действовать (после победы: тоже)
    pub fn accepts_player_actions(&self) -> bool {
        self.is_started() && !self.is_game_over
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn set_interaction_text(&mut self, text: impl Into<String>) {
        self.interaction_text = text.into();
    }

    // ------------------------------------------------------------------
    // Урон
    // ------------------------------------------------------------------

    /// Урон игроку. Возвращает фактически снятое HP.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        if self.is_finished() {
            return 0;
        }

        let new_hp = self.player_hp.saturating_sub(amount);
        let applied = self.player_hp - new_hp;
        self.player_hp = new_hp;

        if new_hp == 0 {
            self.finish(GameOutcome::Killed, KILLED_MESSAGE);
        }
        applied
    }

    /// Задержание: принудительная потеря всего HP
    pub fn capture_player(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        self.player_hp = 0;
        self.finish(GameOutcome::Captured, CAPTURED_MESSAGE);
        true
    }

    /// Урон военкому (melee или агрегированные попадания пуль).
    ///
    /// Любой урон провоцирует Attacking (и отзывает повестку в Offering).
    pub fn damage_voenkom(&mut self, amount: u32) -> VoenkomDamageReport {
        if self.is_finished() || self.voenkom_state == VoenkomState::Dead {
            return VoenkomDamageReport::default();
        }

        let summons_withdrawn = self.provoke();

        let new_hp = self.voenkom_hp.saturating_sub(amount);
        let applied = self.voenkom_hp - new_hp;
        self.voenkom_hp = new_hp;

        let killed = new_hp == 0;
        if killed {
            self.voenkom_state = VoenkomState::Dead;
            self.summons_shown = false;
            self.is_victory = true;
            self.outcome = Some(GameOutcome::Victory);
            self.set_message(VICTORY_MESSAGE);
        }

        VoenkomDamageReport {
            applied,
            summons_withdrawn,
            killed,
        }
    }

    /// Переводит военкома в Attacking (idempotent для Attacking/Dead).
    ///
    /// Возвращает true, если при этом была отозвана повестка.
    pub fn provoke(&mut self) -> bool {
        match self.voenkom_state {
            VoenkomState::Attacking | VoenkomState::Dead => false,
            VoenkomState::Offering => {
                self.withdraw_offer();
                true
            }
            _ => {
                self.voenkom_state = VoenkomState::Attacking;
                false
            }
        }
    }

    // ------------------------------------------------------------------
    // Повестка
    // ------------------------------------------------------------------

    /// Игрок подписал повестку: game over без смерти военкома
    pub fn accept_summons(&mut self) -> bool {
        if !self.summons_shown || self.is_finished() {
            return false;
        }
        self.summons_shown = false;
        self.player_hp = 0;
        self.voenkom_frozen = true;
        self.finish(GameOutcome::Compliance, COMPLIANCE_MESSAGE);
        true
    }

    /// Игрок отказался: военком в ярости
    pub fn reject_summons(&mut self) -> bool {
        if !self.summons_shown || self.is_finished() || self.voenkom_state != VoenkomState::Offering {
            return false;
        }
        self.withdraw_offer();
        true
    }

    fn withdraw_offer(&mut self) {
        self.summons_shown = false;
        self.voenkom_state = VoenkomState::Attacking;
        self.set_message(REJECT_MESSAGE);
    }

    fn finish(&mut self, outcome: GameOutcome, message: &str) {
        self.is_game_over = true;
        self.outcome = Some(outcome);
        self.peephole_active = false;
        self.set_message(message);
    }

    // ------------------------------------------------------------------
    // Инвентарь и предметы
    // ------------------------------------------------------------------

    /// Подбор предмета по id. Неизвестный id: no-op.
    pub fn pickup_item(&mut self, item_id: &str) -> Option<WeaponKind> {
        let index = self.world_items.iter().position(|item| item.id == item_id)?;
        let kind = self.world_items[index].kind;
        let outcome = self.inventory.store(kind)?;
        let item = self.world_items.remove(index);

        // Swap: старое оружие ложится на место подобранного
        if let Some(displaced) = outcome.displaced {
            let id = self.next_item_id(displaced);
            self.world_items
                .push(WorldItem::new(id, displaced, item.position, Vec3::ZERO));
        }

        crate::log(&format!("Picked up {} into slot {}", item.id, outcome.slot + 1));
        self.set_message(format!("Подобрано: {}", item.display_name));
        Some(kind)
    }

    /// Выбрасывает оружие из активного слота перед игроком.
    ///
    /// `forward`: направление взгляда (используется только x/z).
    pub fn drop_active_item(&mut self, feet: Vec3, forward: Vec3, rng: &mut impl Rng) -> Option<String> {
        let kind = self.inventory.take_active()?;

        let position = feet + Vec3::new(forward.x * DROP_DISTANCE, DROP_HEIGHT, forward.z * DROP_DISTANCE);
        let rotation = Vec3::new(rng.gen_range(0.0..6.0), rng.gen_range(0.0..6.0), rng.gen_range(0.0..6.0));
        let id = self.next_item_id(kind);

        crate::log(&format!("Dropped {} at {:?}", id, position));
        self.world_items.push(WorldItem::new(id.clone(), kind, position, rotation));
        self.set_message("Предмет выброшен");
        Some(id)
    }

    pub fn select_slot(&mut self, slot: usize) -> bool {
        self.inventory.select(slot)
    }

    pub fn current_weapon(&self) -> WeaponKind {
        self.inventory.active_weapon()
    }

    pub fn use_ammo(&mut self) -> bool {
        if self.ammo == 0 {
            return false;
        }
        self.ammo -= 1;
        true
    }

    pub fn spawn_bullet(&mut self, origin: Vec3, direction: Vec3) -> u64 {
        let id = self.next_serial();
        self.bullets.push(Bullet::new(id, origin, direction, self.clock));
        id
    }

    // ------------------------------------------------------------------
    // Дверь / глазок
    // ------------------------------------------------------------------

    /// Открыть/закрыть дверь. Возвращает новое состояние.
    pub fn toggle_door(&mut self) -> bool {
        self.door_open = !self.door_open;
        let message = if self.door_open { "Дверь открыта" } else { "Дверь закрыта" };
        self.set_message(message);
        self.door_open
    }

    pub fn set_peephole(&mut self, active: bool) {
        self.peephole_active = active;
    }

    fn next_serial(&mut self) -> u64 {
        let serial = self.next_serial;
        self.next_serial += 1;
        serial
    }

    fn next_item_id(&mut self, kind: WeaponKind) -> String {
        // Полка занимает суффикс "-1"
        format!("{}-{}", kind.id_prefix(), self.next_serial() + 1)
    }
}

// ============================================================================
// Systems
// ============================================================================

/// Система: session clock + оценка занятости речи
pub fn advance_session_clock(
    time: Res<Time<Fixed>>,
    mut session: ResMut<SessionState>,
    mut speech: ResMut<SpeechStatus>,
) {
    let delta = time.delta_secs();
    session.clock += delta;
    speech.tick(delta);
}

/// Система: команды из UI (start / restart / решение по повестке)
#[allow(clippy::too_many_arguments)]
pub fn process_session_commands(
    mut commands_events: EventReader<SessionCommand>,
    mut session: ResMut<SessionState>,
    mut rng: ResMut<DeterministicRng>,
    config: Res<VoenkomConfig>,
    mut speech: ResMut<SpeechStatus>,
    mut voenkom_query: Query<(&mut Voenkom, &mut Transform, &mut KinematicBody), Without<Player>>,
    mut player_query: Query<(&mut Player, &mut Transform, &mut KinematicBody), Without<Voenkom>>,
    mut kid_query: Query<&mut Kid>,
    mut speech_events: EventWriter<SpeechRequest>,
    mut ui_events: EventWriter<UiEvent>,
) {
    for command in commands_events.read() {
        match command {
            SessionCommand::Start if session.is_started() => {
                crate::log("Start ignored: session already running");
            }
            SessionCommand::Start | SessionCommand::Restart => {
                let clock = session.clock;
                *session = SessionState::started(clock);

                for (mut voenkom, mut transform, mut body) in voenkom_query.iter_mut() {
                    *voenkom = Voenkom::new(&config, &mut rng.rng);
                    transform.translation = VOENKOM_POST;
                    body.velocity = Vec3::ZERO;
                }
                for (mut player, mut transform, mut body) in player_query.iter_mut() {
                    *player = Player::default();
                    transform.translation = PLAYER_SPAWN;
                    body.velocity = Vec3::ZERO;
                }
                for mut kid in kid_query.iter_mut() {
                    *kid = Kid::new(&mut rng.rng);
                }

                ui_events.write(UiEvent::HideSummons);
                crate::log_info(&format!("Session started at clock {:.2}s", clock));
            }
            SessionCommand::AcceptSummons => {
                if session.accept_summons() {
                    let line = SpeechLine::new(Speaker::Voenkom, COMPLIANCE_LINE, 1.0, 0.9, 0.2);
                    speech.note_spoken(&line);
                    speech_events.write(SpeechRequest(line));
                    ui_events.write(UiEvent::HideSummons);
                    crate::log_info("Summons accepted: compliance ending");
                }
            }
            SessionCommand::RejectSummons => {
                if session.reject_summons() {
                    ui_events.write(UiEvent::HideSummons);
                    crate::log_info("Summons rejected: voenkom → Attacking");
                }
            }
        }
    }
}

/// Session Plugin
///
/// `SessionState` + команды из UI и session clock в `SimulationSet::Session`
/// (первыми в тике: все остальные системы видят уже обновлённые часы).
pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SessionState>();

        app.add_systems(
            FixedUpdate,
            (process_session_commands, advance_session_clock)
                .chain()
                .in_set(SimulationSet::Session),
        );
    }
}

#[cfg(test)]
mod session_tests;
