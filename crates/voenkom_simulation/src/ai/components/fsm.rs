//! Voenkom FSM components (state, brain timers, config, pose).

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::physics::KinematicBody;

/// Состояния военкома
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
pub enum VoenkomState {
    /// Стоит за дверью: стучит, звонит, орёт, злится
    #[default]
    Waiting,

    /// Дверь открыли в первые 30 сек: идёт вручать повестку
    Offering,

    /// Дверь открыли поздно: "стоять смирно!" (задержание)
    Checking,

    /// Погоня за игроком
    Chasing,

    /// Рукопашная (бьёт раз в секунду)
    Attacking,

    /// HP == 0, terminal
    Dead,
}

impl VoenkomState {
    /// Chasing / Attacking: реплики не дублируются в статус
    pub fn is_hostile(self) -> bool {
        matches!(self, VoenkomState::Chasing | VoenkomState::Attacking)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VoenkomState::Waiting => "waiting",
            VoenkomState::Offering => "offering",
            VoenkomState::Checking => "checking",
            VoenkomState::Chasing => "chasing",
            VoenkomState::Attacking => "attacking",
            VoenkomState::Dead => "dead",
        }
    }
}

/// Параметры поведения военкома
#[derive(Resource, Debug, Clone, Reflect, Serialize, Deserialize)]
pub struct VoenkomConfig {
    /// Граница (сек): раньше вручают повестку, позже задерживают
    pub offer_window: f32,
    /// Рост злости в Waiting (в секунду)
    pub anger_rate: f32,
    /// Злость при переходе в Checking
    pub checking_anger: f32,
    /// Пороги пулов фраз (low ниже medium, medium ниже high)
    pub anger_medium: f32,
    pub anger_high: f32,

    /// Стук: первый через `first_knock_delay`, дальше U(min, max)
    pub first_knock_delay: f32,
    pub knock_interval_min: f32,
    pub knock_interval_max: f32,

    /// Звонок: один раз в момент U(min, max), только до `bell_cutoff`
    pub bell_delay_min: f32,
    pub bell_delay_max: f32,
    pub bell_cutoff: f32,

    /// Жуткий cue: после `scary_after` каждые `scary_interval`
    pub scary_after: f32,
    pub scary_interval: f32,

    /// Насмешки: max(min, base - anger/10) + U(0, jitter)
    pub first_taunt_delay: f32,
    pub taunt_min_interval: f32,
    pub taunt_base_interval: f32,
    pub taunt_jitter: f32,
    /// Speech занят: повтор через столько секунд
    pub speech_retry_delay: f32,

    /// Пропорциональный возврат на пост (velocity = diff * gain)
    pub post_return_gain: f32,
    /// Скорость подхода с повесткой
    pub offer_walk_speed: f32,

    /// Смещение игрока меньше этого за тик = "стоит смирно"
    pub stillness_epsilon: f32,
    /// Сколько секунд неподвижности до задержания
    pub detention_limit: f32,

    pub chase_speed: f32,
    /// Ближе: остановиться и бить
    pub engage_distance: f32,
    pub strike_range: f32,
    pub strike_interval: f32,
    pub strike_damage: u32,
    pub strike_taunt_chance: f64,

    /// Пауза перед предсмертной фразой
    pub death_line_delay: f32,
    /// После фразы до "окончательно мёртв"
    pub death_linger: f32,
}

impl Default for VoenkomConfig {
    fn default() -> Self {
        Self {
            offer_window: 30.0,
            anger_rate: 2.0,
            checking_anger: 50.0,
            anger_medium: 40.0,
            anger_high: 80.0,

            first_knock_delay: 1.0,
            knock_interval_min: 2.0,
            knock_interval_max: 4.0,

            bell_delay_min: 5.0,
            bell_delay_max: 25.0,
            bell_cutoff: 30.0,

            scary_after: 60.0,
            scary_interval: 10.0,

            first_taunt_delay: 2.0,
            taunt_min_interval: 3.0,
            taunt_base_interval: 10.0,
            taunt_jitter: 5.0,
            speech_retry_delay: 2.0,

            post_return_gain: 5.0,
            offer_walk_speed: 2.0,

            stillness_epsilon: 0.01,
            detention_limit: 5.0,

            chase_speed: 5.5,
            engage_distance: 1.8,
            strike_range: 2.5,
            strike_interval: 1.0,
            strike_damage: 20,
            strike_taunt_chance: 0.5,

            death_line_delay: 1.0,
            death_linger: 0.5,
        }
    }
}

/// Фазы смерти (логически военком уже Dead, это только визуал/речь)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum DeathSequence {
    /// Пауза перед последней фразой
    Silent { timer: f32 },
    /// Фраза произнесена, ждём её окончания
    LastWords { timer: f32 },
    /// Окончательно мёртв (анимация заморожена)
    Finished,
}

/// Флаги для рендера (read-only для presentation)
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct VoenkomPose {
    pub moving: bool,
    pub attacking: bool,
    pub speaking: bool,
    pub offering: bool,
    pub frozen: bool,
    pub truly_dead: bool,
}

/// Мозг военкома: таймеры, злость, sampling игрока.
///
/// Canonical state (`VoenkomState`) живёт в `SessionState`,
/// здесь: только то, что нужно самому автомату.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Transform, KinematicBody)]
pub struct Voenkom {
    pub anger: f32,

    pub knock_timer: f32,
    pub taunt_timer: f32,
    pub bell_timer: f32,
    pub bell_rung: bool,
    pub scary_timer: f32,

    /// Для детекции фронта closed → open
    pub was_door_open: bool,
    /// Повестка уже предъявлена (prompt поднят)
    pub summons_raised: bool,

    /// Позиция глаз игрока на прошлом тике (Checking)
    pub last_player_sample: Option<Vec3>,
    pub detention: f32,
    pub capture_issued: bool,

    /// До следующего удара (0 = можно бить)
    pub strike_timer: f32,
    /// Анимация "говорит" (сек)
    pub speak_timer: f32,

    pub death: Option<DeathSequence>,
    pub pose: VoenkomPose,
}

impl Voenkom {
    pub fn new(config: &VoenkomConfig, rng: &mut impl Rng) -> Self {
        Self {
            anger: 0.0,
            knock_timer: config.first_knock_delay,
            taunt_timer: config.first_taunt_delay,
            bell_timer: rng.gen_range(config.bell_delay_min..config.bell_delay_max),
            bell_rung: false,
            scary_timer: config.scary_interval,
            was_door_open: false,
            summons_raised: false,
            last_player_sample: None,
            detention: 0.0,
            capture_issued: false,
            strike_timer: 0.0,
            speak_timer: 0.0,
            death: None,
            pose: VoenkomPose::default(),
        }
    }

    /// Логически мёртв и все фазы смерти отыграны
    pub fn is_truly_dead(&self) -> bool {
        matches!(self.death, Some(DeathSequence::Finished))
    }
}

/// Интервал между насмешками без jitter (злее значит чаще, но не чаще min)
pub fn taunt_interval(anger: f32, config: &VoenkomConfig) -> f32 {
    (config.taunt_base_interval - anger / 10.0).max(config.taunt_min_interval)
}
