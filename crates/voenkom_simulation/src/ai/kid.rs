//! Соседский ребёнок: скриптовый "болельщик" за спиной игрока.
//!
//! Пока партия идёт и военком не дерётся: кричит раз в 15-25 сек
//! (первый раз через 5), между делом подпрыгивает.

use bevy::prelude::*;
use rand::Rng;

use super::components::VoenkomState;
use super::phrases;
use crate::presentation::{SpeechLine, SpeechRequest, SpeechStatus, Speaker};
use crate::session::SessionState;
use crate::world::KID_POSITION;
use crate::DeterministicRng;

const FIRST_SPEECH_DELAY: f32 = 5.0;
const SPEECH_INTERVAL_MIN: f32 = 15.0;
const SPEECH_INTERVAL_JITTER: f32 = 10.0;
const SPEECH_RETRY_DELAY: f32 = 2.0;

/// Скорость фазы прыжка (рад/с), прыжок длится до π
const HOP_SPEED: f32 = 4.0;
const HOP_HEIGHT: f32 = 0.25;

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct Kid {
    pub speech_timer: f32,
    pub hop_timer: f32,
    /// Фаза текущего прыжка (None: стоит на полу)
    pub hop_phase: Option<f32>,
}

impl Kid {
    pub fn new(rng: &mut impl Rng) -> Self {
        Self {
            speech_timer: FIRST_SPEECH_DELAY,
            hop_timer: rng.gen_range(1.0..3.0),
            hop_phase: None,
        }
    }

    /// Высота над полом (для рендера)
    pub fn hop_height(&self) -> f32 {
        self.hop_phase.map_or(0.0, |phase| phase.sin() * HOP_HEIGHT)
    }

    /// Прыжки: ожидание U(2,5) сек, затем дуга sin(phase) до π
    pub fn tick_hop(&mut self, delta: f32, rng: &mut impl Rng) {
        match self.hop_phase {
            Some(phase) => {
                let phase = phase + delta * HOP_SPEED;
                if phase >= std::f32::consts::PI {
                    self.hop_phase = None;
                    self.hop_timer = rng.gen_range(2.0..5.0);
                } else {
                    self.hop_phase = Some(phase);
                }
            }
            None => {
                self.hop_timer -= delta;
                if self.hop_timer <= 0.0 {
                    self.hop_phase = Some(0.0);
                }
            }
        }
    }

    /// Речь: возвращает фразу, если пора кричать.
    ///
    /// Молчит, пока военком в погоне / бою / мёртв.
    pub fn tick_speech(
        &mut self,
        delta: f32,
        voenkom_state: VoenkomState,
        speech_busy: bool,
        rng: &mut impl Rng,
    ) -> Option<SpeechLine> {
        if voenkom_state.is_hostile() || voenkom_state == VoenkomState::Dead {
            return None;
        }

        self.speech_timer -= delta;
        if self.speech_timer > 0.0 {
            return None;
        }

        if speech_busy {
            self.speech_timer = SPEECH_RETRY_DELAY;
            return None;
        }

        self.speech_timer = SPEECH_INTERVAL_MIN + rng.gen_range(0.0..SPEECH_INTERVAL_JITTER);
        let text = phrases::pick(phrases::KID_HECKLES, rng);
        Some(SpeechLine::new(Speaker::Kid, text, 0.8, 1.1, 1.4))
    }
}

/// Система: ребёнок (прыжки + выкрики)
pub fn kid_heckler_system(
    time: Res<Time<Fixed>>,
    mut session: ResMut<SessionState>,
    mut rng: ResMut<DeterministicRng>,
    mut speech: ResMut<SpeechStatus>,
    mut kid_query: Query<(&mut Kid, &mut Transform)>,
    mut speech_events: EventWriter<SpeechRequest>,
) {
    if !session.is_started() || session.is_game_over {
        return;
    }
    let delta = time.delta_secs();

    for (mut kid, mut transform) in kid_query.iter_mut() {
        kid.tick_hop(delta, &mut rng.rng);
        transform.translation.y = KID_POSITION.y + kid.hop_height();

        let busy = speech.is_speaking();
        if let Some(line) = kid.tick_speech(delta, session.voenkom_state, busy, &mut rng.rng) {
            session.set_message(line.caption());
            speech.note_spoken(&line);
            speech_events.write(SpeechRequest(line));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_first_heckle_after_five_seconds() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut kid = Kid::new(&mut rng);

        for _ in 0..19 {
            assert!(kid.tick_speech(0.25, VoenkomState::Waiting, false, &mut rng).is_none());
        }
        let line = kid.tick_speech(0.25, VoenkomState::Waiting, false, &mut rng).expect("heckle expected");

        assert_eq!(line.speaker, Speaker::Kid);
        assert_eq!((line.volume, line.rate, line.pitch), (0.8, 1.1, 1.4));
        assert!(line.caption().starts_with("РЕБЕНОК: \""));
        assert!((15.0..25.0).contains(&kid.speech_timer));
    }

    #[test]
    fn test_busy_speech_retries_in_two_seconds() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut kid = Kid::new(&mut rng);
        kid.speech_timer = 0.1;

        assert!(kid.tick_speech(0.25, VoenkomState::Offering, true, &mut rng).is_none());
        assert_eq!(kid.speech_timer, SPEECH_RETRY_DELAY);
    }

    #[test]
    fn test_silent_during_fight() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut kid = Kid::new(&mut rng);
        kid.speech_timer = 0.1;

        for state in [VoenkomState::Chasing, VoenkomState::Attacking, VoenkomState::Dead] {
            assert!(kid.tick_speech(1.0, state, false, &mut rng).is_none());
        }
        // Таймер стоит, пока военком занят
        assert_eq!(kid.speech_timer, 0.1);
    }

    #[test]
    fn test_hop_arc() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut kid = Kid::new(&mut rng);
        kid.hop_timer = 0.1;

        kid.tick_hop(0.25, &mut rng);
        assert_eq!(kid.hop_phase, Some(0.0));
        assert_eq!(kid.hop_height(), 0.0);

        kid.tick_hop(0.25, &mut rng);
        assert!((kid.hop_height() - 1.0_f32.sin() * 0.25).abs() < 1e-6);

        // 4 рад/с до π: ещё ~0.54 сек
        for _ in 0..3 {
            kid.tick_hop(0.25, &mut rng);
        }
        assert!(kid.hop_phase.is_none());
        assert!((2.0..5.0).contains(&kid.hop_timer));
    }
}
