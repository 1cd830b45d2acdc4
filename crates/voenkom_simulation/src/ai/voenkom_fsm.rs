//! Voenkom FSM: один тик автомата.
//!
//! Архитектура:
//! - `step()`: чистая функция (brain + context) → (next state, velocity, effects)
//! - Один handler на состояние; shared state (`SessionState`) не трогаем
//! - Эффекты (речь, звуки, UI, урон игроку) применяет система `voenkom_fsm_system`
//!
//! Порядок внутри тика:
//! 1. Dead: только death sequence (работает даже после победы)
//! 2. Game over: всё заморожено
//! 3. Фронт двери closed → open (только из Waiting)
//! 4. Handler текущего состояния

use bevy::prelude::*;
use rand::Rng;

use super::components::{taunt_interval, DeathSequence, Voenkom, VoenkomConfig, VoenkomState};
use super::phrases;
use crate::presentation::{AudioCue, SpeechLine, Speaker};
use crate::world::{HANDOFF_Z, VOENKOM_CENTER_HEIGHT, VOENKOM_POST};

/// Глубина, на которую проваливается тело после смерти
pub const SINK_DEPTH: f32 = -10.0;

/// Всё, что автомат читает из мира за тик
#[derive(Debug, Clone, Copy)]
pub struct VoenkomContext {
    pub state: VoenkomState,
    pub delta: f32,
    /// Секунды с начала партии
    pub elapsed: f32,
    pub door_open: bool,
    /// Позиция военкома (ноги)
    pub position: Vec3,
    /// Позиция глаз игрока
    pub player_eye: Vec3,
    pub speech_busy: bool,
    pub game_over: bool,
    pub frozen: bool,
}

/// Запросы побочных эффектов
#[derive(Debug, Clone, PartialEq)]
pub enum VoenkomEffect {
    Speak(SpeechLine),
    Cue(AudioCue),
    Message(String),
    /// Поднять prompt повестки
    RaiseSummons,
    /// Новое значение таймера задержания
    DetentionProgress(f32),
    StrikePlayer(u32),
    /// Задержание: принудительная потеря всего HP
    CapturePlayer,
}

/// Результат тика
#[derive(Debug, Clone, PartialEq)]
pub struct VoenkomStep {
    pub next_state: VoenkomState,
    /// Target velocity для kinematic body
    pub velocity: Vec3,
    /// Телепорт (провал тела под пол)
    pub relocate: Option<Vec3>,
    pub effects: Vec<VoenkomEffect>,
}

impl VoenkomStep {
    fn hold(state: VoenkomState) -> Self {
        Self {
            next_state: state,
            velocity: Vec3::ZERO,
            relocate: None,
            effects: Vec::new(),
        }
    }

    pub fn spoken_lines(&self) -> impl Iterator<Item = &SpeechLine> {
        self.effects.iter().filter_map(|effect| match effect {
            VoenkomEffect::Speak(line) => Some(line),
            _ => None,
        })
    }

    pub fn has_effect(&self, expected: &VoenkomEffect) -> bool {
        self.effects.contains(expected)
    }
}

/// Один тик автомата военкома
pub fn step(brain: &mut Voenkom, ctx: &VoenkomContext, config: &VoenkomConfig, rng: &mut impl Rng) -> VoenkomStep {
    let mut out = VoenkomStep::hold(ctx.state);
    brain.speak_timer = (brain.speak_timer - ctx.delta).max(0.0);

    if ctx.state == VoenkomState::Dead {
        handle_dead(brain, ctx, config, rng, &mut out);
        refresh_pose(brain, ctx, &out);
        return out;
    }

    if ctx.game_over {
        refresh_pose(brain, ctx, &out);
        return out;
    }

    let door_opened = ctx.door_open && !brain.was_door_open;
    brain.was_door_open = ctx.door_open;

    if door_opened && ctx.state == VoenkomState::Waiting {
        handle_door_opened(brain, ctx, config, &mut out);
    } else {
        match ctx.state {
            VoenkomState::Waiting => handle_waiting(brain, ctx, config, rng, &mut out),
            VoenkomState::Offering => handle_offering(brain, ctx, config, &mut out),
            VoenkomState::Checking | VoenkomState::Chasing | VoenkomState::Attacking => {
                handle_hostile(brain, ctx, config, rng, &mut out)
            }
            VoenkomState::Dead => {}
        }
    }

    refresh_pose(brain, ctx, &out);
    out
}

/// Реплика военкома. В спокойных состояниях дублируется в статус
/// (предсмертная фраза не перекрывает сообщение о победе).
fn speak(brain: &mut Voenkom, state: VoenkomState, line: SpeechLine, out: &mut VoenkomStep) {
    brain.speak_timer = line.text.chars().count() as f32 * 0.1;
    if !state.is_hostile() && state != VoenkomState::Dead {
        out.effects.push(VoenkomEffect::Message(line.caption()));
    }
    out.effects.push(VoenkomEffect::Speak(line));
}

fn voenkom_line(text: &str, volume: f32, rate: f32, pitch: f32) -> SpeechLine {
    SpeechLine::new(Speaker::Voenkom, text, volume, rate, pitch)
}

// ============================================================================
// Handlers
// ============================================================================

/// Фронт closed → open в Waiting: рано открыли, значит повестка, поздно, значит задержание
fn handle_door_opened(brain: &mut Voenkom, ctx: &VoenkomContext, config: &VoenkomConfig, out: &mut VoenkomStep) {
    if ctx.elapsed < config.offer_window {
        speak(brain, ctx.state, voenkom_line(phrases::DOOR_OPENED_EARLY, 1.0, 1.0, 0.3), out);
        out.effects.push(VoenkomEffect::Message(
            "ВАМ ВРУЧАЮТ ПОВЕСТКУ [Y - Взять / N - Отказать]".to_string(),
        ));
        out.next_state = VoenkomState::Offering;
    } else {
        speak(brain, ctx.state, voenkom_line(phrases::DOOR_OPENED_LATE, 1.0, 1.2, 0.1), out);
        brain.anger = config.checking_anger;
        brain.last_player_sample = None;
        brain.detention = 0.0;
        out.next_state = VoenkomState::Checking;
    }
}

fn handle_waiting(
    brain: &mut Voenkom,
    ctx: &VoenkomContext,
    config: &VoenkomConfig,
    rng: &mut impl Rng,
    out: &mut VoenkomStep,
) {
    // Держим пост за дверью
    let to_post = VOENKOM_POST - ctx.position;
    if to_post.x.abs() > 0.1 || to_post.z.abs() > 0.1 {
        out.velocity = Vec3::new(to_post.x, 0.0, to_post.z) * config.post_return_gain;
    }

    brain.anger += config.anger_rate * ctx.delta;

    brain.knock_timer -= ctx.delta;
    if brain.knock_timer <= 0.0 {
        out.effects.push(VoenkomEffect::Cue(AudioCue::Knock));
        brain.knock_timer = rng.gen_range(config.knock_interval_min..config.knock_interval_max);
    }

    if !brain.bell_rung && ctx.elapsed < config.bell_cutoff {
        brain.bell_timer -= ctx.delta;
        if brain.bell_timer <= 0.0 {
            out.effects.push(VoenkomEffect::Cue(AudioCue::DoorBell));
            brain.bell_rung = true;
        }
    }

    if ctx.elapsed > config.scary_after {
        brain.scary_timer -= ctx.delta;
        if brain.scary_timer <= 0.0 {
            out.effects.push(VoenkomEffect::Cue(AudioCue::Scary));
            brain.scary_timer = config.scary_interval;
        }
    }

    brain.taunt_timer -= ctx.delta;
    if brain.taunt_timer <= 0.0 {
        if ctx.speech_busy {
            brain.taunt_timer = config.speech_retry_delay;
        } else {
            let text = phrases::pick(phrases::taunt_pool(brain.anger, config), rng);
            speak(brain, ctx.state, voenkom_line(text, 1.2, 1.1, 0.2), out);
            brain.taunt_timer = taunt_interval(brain.anger, config) + rng.gen_range(0.0..config.taunt_jitter);
        }
    }
}

fn handle_offering(brain: &mut Voenkom, ctx: &VoenkomContext, config: &VoenkomConfig, out: &mut VoenkomStep) {
    let remaining = HANDOFF_Z - ctx.position.z;

    if remaining > 0.1 {
        out.velocity = Vec3::Z * config.offer_walk_speed;
    } else if !brain.summons_raised {
        brain.summons_raised = true;
        out.effects.push(VoenkomEffect::RaiseSummons);
    }
}

/// Checking / Chasing / Attacking: дистанция до глаз игрока решает всё
fn handle_hostile(
    brain: &mut Voenkom,
    ctx: &VoenkomContext,
    config: &VoenkomConfig,
    rng: &mut impl Rng,
    out: &mut VoenkomStep,
) {
    let mut state = ctx.state;

    if state == VoenkomState::Checking {
        // Первый тик после входа: точка отсчёта, смещение 0
        let previous = brain.last_player_sample.replace(ctx.player_eye);
        let moved = previous.map_or(0.0, |sample| sample.distance(ctx.player_eye));

        if moved < config.stillness_epsilon {
            brain.detention += ctx.delta;
            out.effects.push(VoenkomEffect::DetentionProgress(brain.detention));

            if brain.detention > config.detention_limit && !brain.capture_issued {
                brain.capture_issued = true;
                out.effects.push(VoenkomEffect::CapturePlayer);
            }
        } else {
            brain.detention = 0.0;
            out.effects.push(VoenkomEffect::DetentionProgress(0.0));
            speak(brain, state, voenkom_line(phrases::CAUGHT_MOVING, 1.0, 1.0, 0.2), out);
            state = VoenkomState::Chasing;
        }
    }

    let center = ctx.position + Vec3::Y * VOENKOM_CENTER_HEIGHT;
    let to_player = ctx.player_eye - center;
    let distance = to_player.length();

    if distance < config.engage_distance {
        state = VoenkomState::Attacking;
    } else if state != VoenkomState::Checking {
        let heading = Vec3::new(to_player.x, 0.0, to_player.z).normalize_or_zero();
        out.velocity = heading * config.chase_speed;
    }

    brain.strike_timer = (brain.strike_timer - ctx.delta).max(0.0);
    if state == VoenkomState::Attacking && distance < config.strike_range && brain.strike_timer <= 0.0 {
        brain.strike_timer = config.strike_interval;
        out.effects.push(VoenkomEffect::StrikePlayer(config.strike_damage));
        out.effects.push(VoenkomEffect::Cue(AudioCue::Hit));

        if rng.gen_bool(config.strike_taunt_chance) {
            let text = phrases::pick(phrases::STRIKE_TAUNTS, rng);
            speak(brain, state, voenkom_line(text, 1.0, 1.5, 0.1), out);
        }
    }

    out.next_state = state;
}

/// Dead: тело под пол, пауза, предсмертная фраза, окончательная смерть
fn handle_dead(
    brain: &mut Voenkom,
    ctx: &VoenkomContext,
    config: &VoenkomConfig,
    rng: &mut impl Rng,
    out: &mut VoenkomStep,
) {
    if ctx.position.y > SINK_DEPTH * 0.5 {
        out.relocate = Some(Vec3::new(ctx.position.x, SINK_DEPTH, ctx.position.z));
    }

    let next = match brain.death {
        None => DeathSequence::Silent {
            timer: config.death_line_delay,
        },
        Some(DeathSequence::Silent { timer }) => {
            let timer = timer - ctx.delta;
            if timer <= 0.0 {
                let line = voenkom_line(phrases::pick(phrases::DEATH_LINES, rng), 1.0, 0.8, 0.1);
                let linger = line.duration_secs() + config.death_linger;
                speak(brain, ctx.state, line, out);
                DeathSequence::LastWords { timer: linger }
            } else {
                DeathSequence::Silent { timer }
            }
        }
        Some(DeathSequence::LastWords { timer }) => {
            let timer = timer - ctx.delta;
            if timer <= 0.0 {
                crate::log("Voenkom: death sequence finished");
                DeathSequence::Finished
            } else {
                DeathSequence::LastWords { timer }
            }
        }
        Some(DeathSequence::Finished) => DeathSequence::Finished,
    };
    brain.death = Some(next);
}

fn refresh_pose(brain: &mut Voenkom, ctx: &VoenkomContext, out: &VoenkomStep) {
    let state = out.next_state;
    brain.pose.moving = out.velocity.length_squared() > 0.01 && state != VoenkomState::Waiting;
    brain.pose.attacking = state == VoenkomState::Attacking;
    brain.pose.offering = state == VoenkomState::Offering;
    brain.pose.speaking = brain.speak_timer > 0.0;
    brain.pose.frozen = ctx.frozen;
    brain.pose.truly_dead = brain.is_truly_dead();
}

#[cfg(test)]
#[path = "voenkom_fsm_tests.rs"]
mod voenkom_fsm_tests;
