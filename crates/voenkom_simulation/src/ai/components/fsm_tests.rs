//! Tests for Voenkom FSM components.

#[cfg(test)]
mod tests {
    use super::super::fsm::{taunt_interval, DeathSequence, Voenkom, VoenkomConfig, VoenkomState};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_voenkom_state_default() {
        assert_eq!(VoenkomState::default(), VoenkomState::Waiting);
    }

    #[test]
    fn test_hostile_states() {
        assert!(VoenkomState::Chasing.is_hostile());
        assert!(VoenkomState::Attacking.is_hostile());
        assert!(!VoenkomState::Checking.is_hostile());
        assert!(!VoenkomState::Offering.is_hostile());
        assert!(!VoenkomState::Dead.is_hostile());
    }

    #[test]
    fn test_voenkom_config_default() {
        let config = VoenkomConfig::default();
        assert_eq!(config.offer_window, 30.0);
        assert_eq!(config.anger_rate, 2.0);
        assert_eq!(config.detention_limit, 5.0);
        assert_eq!(config.chase_speed, 5.5);
        assert_eq!(config.engage_distance, 1.8);
        assert_eq!(config.strike_range, 2.5);
        assert_eq!(config.strike_damage, 20);
    }

    #[test]
    fn test_new_brain_timers() {
        let config = VoenkomConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        for _ in 0..20 {
            let brain = Voenkom::new(&config, &mut rng);
            assert_eq!(brain.knock_timer, 1.0);
            assert_eq!(brain.taunt_timer, 2.0);
            assert!((5.0..25.0).contains(&brain.bell_timer));
            assert!(!brain.bell_rung);
            assert!(brain.death.is_none());
        }
    }

    #[test]
    fn test_truly_dead_only_when_finished() {
        let config = VoenkomConfig::default();
        let mut brain = Voenkom::new(&config, &mut ChaCha8Rng::seed_from_u64(1));

        brain.death = Some(DeathSequence::LastWords { timer: 0.1 });
        assert!(!brain.is_truly_dead());

        brain.death = Some(DeathSequence::Finished);
        assert!(brain.is_truly_dead());
    }

    #[test]
    fn test_taunt_interval_floor() {
        let config = VoenkomConfig::default();
        assert_eq!(taunt_interval(0.0, &config), 10.0);
        assert_eq!(taunt_interval(70.0, &config), 3.0);
        assert_eq!(taunt_interval(1000.0, &config), 3.0);
    }
}
