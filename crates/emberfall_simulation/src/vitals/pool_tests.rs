//! Tests for VitalsPool and mitigation.

#[cfg(test)]
mod tests {
    use super::super::pool::*;
    use proptest::prelude::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_new_pool_is_full() {
        let pool = VitalsPool::new(50.0, 1.0).unwrap();
        assert_eq!(pool.current(), 50.0);
        assert_eq!(pool.max(), 50.0);
        assert_eq!(pool.fraction(), 1.0);
    }

    #[test]
    fn test_new_pool_rejects_non_positive_max() {
        assert_eq!(VitalsPool::new(0.0, 1.0), Err(VitalsError::NonPositiveMax(0.0)));
        assert_eq!(VitalsPool::new(-5.0, 1.0), Err(VitalsError::NonPositiveMax(-5.0)));
        assert!(matches!(
            VitalsPool::new(f32::NAN, 1.0),
            Err(VitalsError::NonFiniteAmount(_))
        ));
    }

    #[test]
    fn test_damage_without_armor() {
        // max=50, armor=0, raw 20 → 30, fraction 0.6, смерти нет
        let mut pool = VitalsPool::new(50.0, 0.0).unwrap();
        let change = pool.modify_mitigated(-20.0, 0.0).unwrap();

        assert_eq!(pool.current(), 30.0);
        assert!(approx(change.fraction, 0.6));
        assert!(approx(change.applied, -20.0));
        assert!(!change.depleted);
    }

    #[test]
    fn test_lethal_damage_depletes_once() {
        // current=5, max=50, raw 20 → 0, depletion ровно один раз
        let mut pool = VitalsPool::new(50.0, 0.0).unwrap();
        pool.modify(-45.0).unwrap();
        assert_eq!(pool.current(), 5.0);

        let change = pool.modify_mitigated(-20.0, 0.0).unwrap();
        assert_eq!(pool.current(), 0.0);
        assert_eq!(change.fraction, 0.0);
        assert!(change.depleted);
        assert!(pool.is_depleted());

        // Уже на нуле - повторного depletion нет
        let again = pool.modify_mitigated(-20.0, 0.0).unwrap();
        assert_eq!(pool.current(), 0.0);
        assert!(!again.depleted);
    }

    #[test]
    fn test_depletion_rearms_after_recovery() {
        let mut pool = VitalsPool::new(10.0, 0.0).unwrap();
        assert!(pool.modify(-10.0).unwrap().depleted);

        pool.modify(5.0).unwrap();
        assert!(pool.modify(-10.0).unwrap().depleted);
    }

    #[test]
    fn test_armor_mitigates_damage() {
        // armor 100 → половина урона
        let mut pool = VitalsPool::new(100.0, 0.0).unwrap();
        let change = pool.modify_mitigated(-40.0, 100.0).unwrap();

        assert!(approx(pool.current(), 80.0));
        assert!(approx(change.applied, -20.0));
    }

    #[test]
    fn test_armor_ignored_for_healing() {
        let mut pool = VitalsPool::new(100.0, 0.0).unwrap();
        pool.modify(-50.0).unwrap();

        pool.modify_mitigated(30.0, 100.0).unwrap();
        assert_eq!(pool.current(), 80.0);
    }

    #[test]
    fn test_healing_clamped_to_max() {
        let mut pool = VitalsPool::new(100.0, 0.0).unwrap();
        pool.modify(-10.0).unwrap();

        let change = pool.modify(500.0).unwrap();
        assert_eq!(pool.current(), 100.0);
        assert_eq!(change.applied, 10.0);
        assert_eq!(change.fraction, 1.0);
    }

    #[test]
    fn test_set_max_heals_into_increase() {
        let mut pool = VitalsPool::new(100.0, 0.0).unwrap();
        pool.modify(-50.0).unwrap(); // 50 / 100

        let change = pool.set_max(10.0).unwrap();
        assert_eq!(pool.max(), 110.0);
        assert_eq!(pool.current(), 60.0);
        assert!(approx(change.fraction, 60.0 / 110.0));
    }

    #[test]
    fn test_set_max_rejects_negative_delta() {
        let mut pool = VitalsPool::new(100.0, 0.0).unwrap();
        assert_eq!(pool.set_max(-10.0), Err(VitalsError::NegativeMaxDelta(-10.0)));

        // Без мутаций
        assert_eq!(pool.max(), 100.0);
        assert_eq!(pool.current(), 100.0);
    }

    #[test]
    fn test_regenerate() {
        let mut pool = VitalsPool::new(100.0, 2.0).unwrap();
        pool.modify(-50.0).unwrap();

        let change = pool.regenerate(2.0).unwrap(); // 2 sec × 2 units/sec = +4
        assert_eq!(pool.current(), 54.0);
        assert!(approx(change.fraction, 0.54));

        pool.regenerate(100.0); // Clamp to max
        assert_eq!(pool.current(), 100.0);

        // Полный pool - нечего сообщать
        assert!(pool.regenerate(1.0).is_none());
    }

    #[test]
    fn test_restore_full() {
        let mut pool = VitalsPool::new(80.0, 0.0).unwrap();
        pool.modify(-79.0).unwrap();

        let change = pool.restore_full();
        assert_eq!(pool.current(), 80.0);
        assert_eq!(change.fraction, 1.0);
    }

    #[test]
    fn test_has_at_least() {
        let mut pool = VitalsPool::new(100.0, 0.0).unwrap();
        pool.modify(-70.0).unwrap();

        assert!(pool.has_at_least(30.0));
        assert!(!pool.has_at_least(30.5));
    }

    #[test]
    fn test_non_finite_amount_is_rejected() {
        let mut pool = VitalsPool::new(100.0, 0.0).unwrap();
        pool.modify(-20.0).unwrap();

        assert!(matches!(pool.modify(f32::NAN), Err(VitalsError::NonFiniteAmount(_))));
        assert_eq!(
            pool.modify_mitigated(f32::NEG_INFINITY, 10.0),
            Err(VitalsError::NonFiniteAmount(f32::NEG_INFINITY))
        );
        assert_eq!(pool.modify(f32::INFINITY), Err(VitalsError::NonFiniteAmount(f32::INFINITY)));
        assert_eq!(pool.current(), 80.0);
    }

    #[test]
    fn test_regenerate_with_non_finite_delta_is_noop() {
        let mut pool = VitalsPool::new(100.0, 5.0).unwrap();
        pool.modify(-50.0).unwrap();

        assert_eq!(pool.regenerate(f32::NAN), None);
        assert_eq!(pool.current(), 50.0);
    }

    #[test]
    fn test_mitigation_factor_values() {
        assert_eq!(mitigation_factor(0.0), 1.0);
        assert!(approx(mitigation_factor(100.0), 0.5));
        assert!(approx(mitigation_factor(300.0), 0.25));
        assert_eq!(mitigation_factor(-50.0), 1.0); // отрицательный armor = 0
        assert!(mitigation_factor(f32::MAX) > 0.0);
    }

    proptest! {
        #[test]
        fn prop_pool_stays_clamped(
            max in 1.0f32..10_000.0,
            armor in 0.0f32..1_000.0,
            amounts in proptest::collection::vec(-20_000.0f32..20_000.0, 0..64),
        ) {
            let mut pool = VitalsPool::new(max, 1.0).unwrap();
            for amount in amounts {
                let change = pool.modify_mitigated(amount, armor).unwrap();
                prop_assert!(pool.current() >= 0.0);
                prop_assert!(pool.current() <= pool.max());
                prop_assert!((0.0..=1.0).contains(&change.fraction));
            }
        }

        #[test]
        fn prop_mitigated_damage_strictly_positive(
            armor in 0.0f32..1_000_000.0,
            damage in 0.01f32..10_000.0,
        ) {
            prop_assert!(damage * mitigation_factor(armor) > 0.0);
        }

        #[test]
        fn prop_mitigation_strictly_decreasing(
            armor in 0.0f32..1_000.0,
            extra in 1.0f32..1_000.0,
            damage in 1.0f32..10_000.0,
        ) {
            let low = damage * mitigation_factor(armor);
            let high = damage * mitigation_factor(armor + extra);
            prop_assert!(high < low);
        }
    }
}
