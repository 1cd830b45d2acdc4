//! Глазок: военком реагирует, когда игрок ёрзает у двери.
//!
//! Движение мыши копится в `Player::peephole_agitation` (затухает каждый тик),
//! выше порога: реплика, не чаще раза в `peephole_taunt_interval`.

use bevy::prelude::*;

use super::{Player, PlayerConfig, PlayerInput};
use crate::ai::{phrases, VoenkomState};
use crate::presentation::{SpeechLine, SpeechRequest, SpeechStatus, Speaker};
use crate::session::SessionState;
use crate::DeterministicRng;

/// Накопить движение мыши. Возвращает true, если пора дразнить.
pub fn update_agitation(player: &mut Player, look_delta: Vec2, now: f32, config: &PlayerConfig) -> bool {
    player.peephole_agitation += look_delta.x.abs() + look_delta.y.abs();

    let rested = player
        .last_peephole_taunt_at
        .map_or(true, |last| now - last > config.peephole_taunt_interval);
    let fire = player.peephole_agitation > config.peephole_agitation_threshold && rested;

    if fire {
        player.last_peephole_taunt_at = Some(now);
        player.peephole_agitation = 0.0;
    }

    player.peephole_agitation *= config.peephole_agitation_decay;
    fire
}

/// Система: реплики военкома на движение у глазка
pub fn peephole_taunts(
    input: Res<PlayerInput>,
    mut session: ResMut<SessionState>,
    mut rng: ResMut<DeterministicRng>,
    mut speech: ResMut<SpeechStatus>,
    config: Res<PlayerConfig>,
    mut player_query: Query<&mut Player>,
    mut speech_events: EventWriter<SpeechRequest>,
) {
    if !session.peephole_active || session.is_game_over {
        return;
    }
    let Ok(mut player) = player_query.single_mut() else {
        return;
    };

    if !update_agitation(&mut player, input.look_delta, session.clock, &config) {
        return;
    }
    if session.voenkom_state == VoenkomState::Dead {
        return;
    }

    let text = phrases::pick(phrases::PEEPHOLE_TAUNTS, &mut rng.rng);
    let line = SpeechLine::new(Speaker::Voenkom, text, 1.0, 1.1, 0.2);
    if !session.voenkom_state.is_hostile() {
        session.set_message(line.caption());
    }
    speech.note_spoken(&line);
    speech_events.write(SpeechRequest(line));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fidgeting_triggers_taunt() {
        let config = PlayerConfig::default();
        let mut player = Player::default();

        assert!(!update_agitation(&mut player, Vec2::new(200.0, 100.0), 1.0, &config));
        assert!(update_agitation(&mut player, Vec2::new(200.0, 100.0), 1.1, &config));
        assert_eq!(player.last_peephole_taunt_at, Some(1.1));
        assert_eq!(player.peephole_agitation, 0.0);
    }

    #[test]
    fn test_taunts_throttled() {
        let config = PlayerConfig::default();
        let mut player = Player::default();

        assert!(update_agitation(&mut player, Vec2::new(600.0, 0.0), 1.0, &config));
        assert!(!update_agitation(&mut player, Vec2::new(600.0, 0.0), 2.0, &config));
        assert!(!update_agitation(&mut player, Vec2::new(600.0, 0.0), 4.0, &config));
        assert!(update_agitation(&mut player, Vec2::new(600.0, 0.0), 4.5, &config));
    }

    #[test]
    fn test_agitation_decays() {
        let config = PlayerConfig::default();
        let mut player = Player::default();

        update_agitation(&mut player, Vec2::new(100.0, 0.0), 0.0, &config);
        for tick in 0..20 {
            update_agitation(&mut player, Vec2::ZERO, tick as f32, &config);
        }

        assert!(player.peephole_agitation < 100.0 * 0.9_f32.powi(20));
    }
}
