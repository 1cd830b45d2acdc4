//! Voenkom FSM system: собирает context из мира, применяет эффекты шага.

use bevy::prelude::*;

use crate::ai::voenkom_fsm::{step, VoenkomContext, VoenkomEffect};
use crate::ai::{Voenkom, VoenkomConfig, VoenkomState};
use crate::combat::{PlayerDamageCause, PlayerDamaged};
use crate::physics::KinematicBody;
use crate::player::{Player, PlayerConfig};
use crate::presentation::{CueRequest, SpeechRequest, SpeechStatus, UiEvent};
use crate::session::{SessionState, MAX_PLAYER_HP};
use crate::DeterministicRng;

/// Система: один тик автомата военкома
///
/// 1. Context: session (state, дверь, terminal флаги), позиции, speech busy
/// 2. `step()`: переходы и эффекты
/// 3. Эффекты → events / SessionState, velocity → KinematicBody
///
/// Урон игроку уходит как `PlayerDamaged` и применяется в Damage set.
#[allow(clippy::too_many_arguments)]
pub fn voenkom_fsm_system(
    time: Res<Time<Fixed>>,
    mut session: ResMut<SessionState>,
    mut rng: ResMut<DeterministicRng>,
    mut speech: ResMut<SpeechStatus>,
    config: Res<VoenkomConfig>,
    player_config: Res<PlayerConfig>,
    mut voenkom_query: Query<(&mut Voenkom, &mut Transform, &mut KinematicBody), Without<Player>>,
    player_query: Query<(&Player, &Transform), Without<Voenkom>>,
    mut speech_events: EventWriter<SpeechRequest>,
    mut cue_events: EventWriter<CueRequest>,
    mut ui_events: EventWriter<UiEvent>,
    mut player_damage: EventWriter<PlayerDamaged>,
) {
    if !session.is_started() {
        return;
    }

    let Ok((mut brain, mut transform, mut body)) = voenkom_query.single_mut() else {
        return;
    };

    // Без игрока военкому некуда идти: цель: его же пост
    let player_eye = player_query
        .single()
        .map(|(player, player_transform)| player.eye_position(player_transform.translation, &player_config))
        .unwrap_or(transform.translation);

    let ctx = VoenkomContext {
        state: session.voenkom_state,
        delta: time.delta_secs(),
        elapsed: session.elapsed(),
        door_open: session.door_open,
        position: transform.translation,
        player_eye,
        speech_busy: speech.is_speaking(),
        game_over: session.is_game_over,
        frozen: session.voenkom_frozen,
    };

    let out = step(&mut brain, &ctx, &config, &mut rng.rng);

    for effect in out.effects {
        match effect {
            VoenkomEffect::Speak(line) => {
                speech.note_spoken(&line);
                speech_events.write(SpeechRequest(line));
            }
            VoenkomEffect::Cue(cue) => {
                cue_events.write(CueRequest(cue));
            }
            VoenkomEffect::Message(text) => {
                session.set_message(text);
            }
            VoenkomEffect::RaiseSummons => {
                session.summons_shown = true;
                ui_events.write(UiEvent::ShowSummons);
                crate::log_info("📜 Summons raised");
            }
            VoenkomEffect::DetentionProgress(seconds) => {
                session.detention_time = seconds;
                ui_events.write(UiEvent::DetentionProgress(seconds));
            }
            VoenkomEffect::StrikePlayer(amount) => {
                player_damage.write(PlayerDamaged {
                    amount,
                    cause: PlayerDamageCause::Strike,
                });
            }
            VoenkomEffect::CapturePlayer => {
                player_damage.write(PlayerDamaged {
                    amount: MAX_PLAYER_HP,
                    cause: PlayerDamageCause::Capture,
                });
            }
        }
    }

    if out.next_state != ctx.state {
        crate::log_info(&format!(
            "Voenkom: {} → {}",
            ctx.state.as_str(),
            out.next_state.as_str()
        ));
        session.voenkom_state = out.next_state;
        if out.next_state != VoenkomState::Checking {
            session.detention_time = 0.0;
        }
    }

    body.velocity = out.velocity;
    if let Some(position) = out.relocate {
        transform.translation = position;
        body.velocity = Vec3::ZERO;
    }
}
