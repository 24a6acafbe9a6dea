//! 步态状态机属性测试

use ease_gait::{
    GaitPhaseKind, JointSetpoint, LegCycle, LegGaitStateMachine, LegIdentity, LegTargets,
    PhaseBehavior, PhaseSpec, TrajectoryTable, TransitionCondition,
};
use proptest::prelude::*;

fn cycle_of(n: usize, threshold_ms: u64) -> LegCycle {
    let phases = GaitPhaseKind::ALL[..n]
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            PhaseSpec::new(
                *kind,
                PhaseBehavior::constant(JointSetpoint::hold(i as f64), JointSetpoint::hold(0.0)),
                TransitionCondition::ElapsedTime { threshold_ms },
            )
        })
        .collect();
    LegCycle::new(phases).unwrap()
}

proptest! {
    /// N 次切换后回到第一个相位
    #[test]
    fn cycle_closes_after_n_transitions(
        n in 1usize..=11,
        threshold_ms in 0u64..500,
        step in 1u64..50,
    ) {
        let mut leg = LegGaitStateMachine::new(LegIdentity::Left, cycle_of(n, threshold_ms), 0);
        let first = leg.phase();

        let mut now = 0u64;
        let mut transitions = 0;
        while transitions < n {
            now += step;
            if leg.tick(now, false).is_some() {
                transitions += 1;
            }
        }

        prop_assert_eq!(leg.phase(), first);
        prop_assert_eq!(leg.transitions(), n as u64);
    }

    /// 每个 tick 至多一次切换，且切换次数与返回值一致
    #[test]
    fn at_most_one_transition_per_tick(
        n in 1usize..=11,
        threshold_ms in 0u64..20,
        steps in prop::collection::vec(0u64..30, 1..200),
    ) {
        let mut leg = LegGaitStateMachine::new(LegIdentity::Right, cycle_of(n, threshold_ms), 0);
        let mut now = 0u64;
        let mut reported = 0u64;

        for step in steps {
            now += step;
            let before = leg.transitions();
            let t = leg.tick(now, false);
            prop_assert!(leg.transitions() - before <= 1);
            if let Some(t) = t {
                reported += 1;
                prop_assert_eq!(t.to, leg.phase());
                prop_assert_eq!(leg.phase_entered_at(), now);
            }
        }
        prop_assert_eq!(leg.transitions(), reported);
    }

    /// 回放游标永远不超过 len - 1
    #[test]
    fn replay_cursor_never_exceeds_last_sample(len in 1usize..64, ticks in 0usize..256) {
        let samples = (0..len)
            .map(|i| {
                let p = i as f64;
                LegTargets::new(JointSetpoint::hold(p), JointSetpoint::hold(-p))
            })
            .collect();
        let cycle = LegCycle::new(vec![PhaseSpec::new(
            GaitPhaseKind::MidSwing,
            PhaseBehavior::replay(TrajectoryTable::new(samples).unwrap()),
            TransitionCondition::Never,
        )])
        .unwrap();
        let mut leg = LegGaitStateMachine::new(LegIdentity::Left, cycle, 0);

        for tick in 0..ticks {
            leg.tick(tick as u64, true);
            prop_assert!(leg.cursor() <= len - 1);
        }
        // 启动后的第一个 tick 输出采样 0，之后每个 tick 前进一格
        let expected = ticks.saturating_sub(1).min(len - 1);
        prop_assert_eq!(leg.cursor(), expected);
        prop_assert_eq!(leg.targets().hip.position, expected as f64);
    }

    /// 传感器相位只在触发时切换（电平判定）
    #[test]
    fn sensor_phase_follows_level(levels in prop::collection::vec(any::<bool>(), 1..100)) {
        let cycle = LegCycle::new(vec![
            PhaseSpec::new(
                GaitPhaseKind::SwingUp,
                PhaseBehavior::constant(JointSetpoint::hold(0.4), JointSetpoint::hold(0.6)),
                TransitionCondition::SensorEvent,
            ),
            PhaseSpec::new(
                GaitPhaseKind::SwingDown,
                PhaseBehavior::constant(JointSetpoint::hold(-0.1), JointSetpoint::hold(-0.3)),
                TransitionCondition::SensorEvent,
            ),
        ])
        .unwrap();
        let mut leg = LegGaitStateMachine::new(LegIdentity::Left, cycle, 0);

        for (i, level) in levels.iter().enumerate() {
            let t = leg.tick(i as u64 + 1, *level);
            prop_assert_eq!(t.is_some(), *level);
        }
        let expected = levels.iter().filter(|l| **l).count() as u64;
        prop_assert_eq!(leg.transitions(), expected);
    }
}
