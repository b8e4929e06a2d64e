//! Tests for ProgressionLedger.

#[cfg(test)]
mod tests {
    use crate::config::ProgressionConfig;
    use crate::progression::*;
    use crate::vitals::VitalsPool;

    fn sheet() -> StatSheet {
        StatSheet::new(
            VitalsPool::new(100.0, 1.0).unwrap(),
            Some(VitalsPool::new(100.0, 2.0).unwrap()),
        )
    }

    fn ledger() -> ProgressionLedger {
        ProgressionLedger::new(ProgressionConfig::default()).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let ledger = ledger();
        assert_eq!(ledger.level(), 1);
        assert_eq!(ledger.current_xp(), 0.0);
        assert_eq!(ledger.xp_to_next_level(), 100.0);
        assert_eq!(ledger.available_stat_points(), 0);
    }

    #[test]
    fn test_starting_level_grants_points() {
        let config = ProgressionConfig {
            starting_level: 4,
            ..Default::default()
        };
        let ledger = ProgressionLedger::new(config).unwrap();

        assert_eq!(ledger.level(), 4);
        assert_eq!(ledger.available_stat_points(), 15); // (4 - 1) × 5
        assert_eq!(ledger.xp_to_next_level(), 100.0 * 1.5f32.powi(3));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ProgressionConfig {
            xp_multiplier: 0.9,
            ..Default::default()
        };
        assert!(matches!(
            ProgressionLedger::new(config),
            Err(ProgressionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_huge_starting_level_rejected_without_panic() {
        let config = ProgressionConfig {
            starting_level: 1_000_000_000,
            ..Default::default()
        };
        assert!(matches!(
            ProgressionLedger::new(config),
            Err(ProgressionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_stat_points_saturate_on_level_up() {
        let config = ProgressionConfig {
            points_per_level: u32::MAX,
            ..Default::default()
        };
        let mut ledger = ProgressionLedger::new(config).unwrap();
        let mut sheet = sheet();

        let gain = ledger.add_experience(250.0, &mut sheet).unwrap();
        assert_eq!(gain.level_ups.len(), 2);
        assert_eq!(ledger.available_stat_points(), u32::MAX);
    }

    #[test]
    fn test_partial_experience_no_level_up() {
        let mut ledger = ledger();
        let mut sheet = sheet();

        let gain = ledger.add_experience(40.0, &mut sheet).unwrap();
        assert_eq!(gain.progress, 0.4);
        assert!(gain.level_ups.is_empty());
        assert_eq!(ledger.level(), 1);
        assert_eq!(ledger.current_xp(), 40.0);
    }

    #[test]
    fn test_exact_threshold_single_level_up() {
        let mut ledger = ledger();
        let mut sheet = sheet();

        let gain = ledger.add_experience(100.0, &mut sheet).unwrap();
        assert_eq!(gain.progress, 1.0);
        assert_eq!(gain.level_ups.len(), 1);
        assert_eq!(ledger.level(), 2);
        assert_eq!(ledger.current_xp(), 0.0);
        assert_eq!(ledger.xp_to_next_level(), 150.0);
        assert_eq!(ledger.available_stat_points(), 5);
    }

    #[test]
    fn test_multi_level_grant() {
        // 250 XP: 100 (lvl 1→2) + 150 (lvl 2→3) = 250 → level 3, xp 0
        let mut ledger = ledger();
        let mut sheet = sheet();

        let gain = ledger.add_experience(250.0, &mut sheet).unwrap();
        assert_eq!(gain.progress, 2.5); // > 1.0 до разрешения level-ups
        assert_eq!(
            gain.level_ups.iter().map(|l| l.level).collect::<Vec<_>>(),
            vec![2, 3]
        );
        assert_eq!(ledger.level(), 3);
        assert_eq!(ledger.current_xp(), 0.0);
        assert_eq!(ledger.xp_to_next_level(), 225.0);
        assert_eq!(ledger.available_stat_points(), 10); // 2 × points_per_level
        assert!(ledger.current_xp() < ledger.xp_to_next_level());
    }

    #[test]
    fn test_each_level_up_restores_pools() {
        let mut ledger = ledger();
        let mut sheet = sheet();
        sheet.health.modify(-90.0).unwrap();
        sheet.mana.as_mut().unwrap().modify(-60.0).unwrap();

        let gain = ledger.add_experience(300.0, &mut sheet).unwrap();
        assert_eq!(gain.level_ups.len(), 2);
        for level_up in &gain.level_ups {
            assert_eq!(level_up.health.fraction, 1.0);
            assert_eq!(level_up.mana.map(|m| m.fraction), Some(1.0));
        }

        // Первый level-up вылечил 90, второй уже нечего лечить
        assert_eq!(gain.level_ups[0].health.applied, 90.0);
        assert_eq!(gain.level_ups[1].health.applied, 0.0);
        assert!(sheet.health.is_full());
        assert!(sheet.mana.unwrap().is_full());
    }

    #[test]
    fn test_level_up_without_mana() {
        let mut ledger = ledger();
        let mut sheet = StatSheet::new(VitalsPool::new(50.0, 0.0).unwrap(), None);
        sheet.health.modify(-25.0).unwrap();

        let gain = ledger.add_experience(100.0, &mut sheet).unwrap();
        assert_eq!(gain.level_ups[0].mana, None);
        assert_eq!(sheet.health.current(), 50.0);
    }

    #[test]
    fn test_negative_experience_rejected() {
        let mut ledger = ledger();
        let mut sheet = sheet();
        ledger.add_experience(30.0, &mut sheet).unwrap();

        assert_eq!(
            ledger.add_experience(-10.0, &mut sheet),
            Err(ProgressionError::InvalidExperience(-10.0))
        );
        assert!(ledger.add_experience(f32::NAN, &mut sheet).is_err());
        assert_eq!(ledger.current_xp(), 30.0); // без мутаций
    }

    #[test]
    fn test_zero_experience_is_valid() {
        let mut ledger = ledger();
        let mut sheet = sheet();

        let gain = ledger.add_experience(0.0, &mut sheet).unwrap();
        assert_eq!(gain.progress, 0.0);
        assert!(gain.level_ups.is_empty());
    }

    #[test]
    fn test_allocate_without_points_fails() {
        let mut ledger = ledger();
        let mut sheet = sheet();
        let before = sheet;

        assert_eq!(
            ledger.allocate_stat_point(StatKind::Strength, &mut sheet),
            Err(ProgressionError::NoStatPointsAvailable)
        );
        assert_eq!(sheet, before);
        assert_eq!(ledger.allocation().total(), 0);
    }

    #[test]
    fn test_allocate_each_stat() {
        let mut ledger = ledger();
        let mut sheet = sheet();
        ledger.add_experience(100.0, &mut sheet).unwrap(); // 5 points

        assert_eq!(
            ledger.allocate_stat_point(StatKind::Strength, &mut sheet),
            Ok(StatEffect::DamageMultiplier { total: 3.0 })
        );

        let mana = ledger.allocate_stat_point(StatKind::Intelligence, &mut sheet).unwrap();
        assert!(matches!(mana, StatEffect::MaxMana(_)));
        assert_eq!(sheet.mana.unwrap().max(), 105.0);
        assert_eq!(sheet.mana.unwrap().current(), 105.0);

        let health = ledger.allocate_stat_point(StatKind::Vitality, &mut sheet).unwrap();
        assert!(matches!(health, StatEffect::MaxHealth(_)));
        assert_eq!(sheet.health.max(), 110.0);
        assert_eq!(sheet.health.current(), 110.0);

        assert_eq!(
            ledger.allocate_stat_point(StatKind::Defense, &mut sheet),
            Ok(StatEffect::Armor { total: 1.0 })
        );

        assert_eq!(ledger.available_stat_points(), 1);
        assert_eq!(ledger.allocation().total(), 4);
        for stat in StatKind::ALL {
            assert_eq!(ledger.allocation().points(stat), 1);
        }
    }

    #[test]
    fn test_allocation_effects_are_cumulative() {
        let mut ledger = ledger();
        let mut sheet = sheet();
        ledger.add_experience(100.0, &mut sheet).unwrap();

        for _ in 0..3 {
            ledger.allocate_stat_point(StatKind::Defense, &mut sheet).unwrap();
        }
        assert_eq!(sheet.armor, 3.0);
        assert_eq!(ledger.allocation().defense, 3);
        assert_eq!(ledger.available_stat_points(), 2);
    }

    #[test]
    fn test_intelligence_without_mana_refused() {
        let mut ledger = ledger();
        let mut sheet = StatSheet::new(VitalsPool::new(100.0, 0.0).unwrap(), None);
        ledger.add_experience(100.0, &mut sheet).unwrap();

        assert_eq!(
            ledger.allocate_stat_point(StatKind::Intelligence, &mut sheet),
            Err(ProgressionError::MissingCapability(StatKind::Intelligence))
        );
        assert_eq!(ledger.available_stat_points(), 5); // очко не потрачено
        assert_eq!(ledger.allocation().intelligence, 0);
    }

    #[test]
    fn test_allocated_never_exceeds_granted() {
        let mut ledger = ledger();
        let mut sheet = sheet();
        ledger.add_experience(100.0, &mut sheet).unwrap();

        let mut spent = 0;
        while ledger.allocate_stat_point(StatKind::Vitality, &mut sheet).is_ok() {
            spent += 1;
        }
        assert_eq!(spent, 5);
        assert_eq!(ledger.allocation().total(), 5);
        assert_eq!(ledger.available_stat_points(), 0);
    }

    #[test]
    fn test_xp_requirement_curve() {
        let config = ProgressionConfig::default();
        assert_eq!(xp_requirement(&config, 1), 100.0);
        assert_eq!(xp_requirement(&config, 2), 150.0);
        assert_eq!(xp_requirement(&config, 3), 225.0);
    }
}
