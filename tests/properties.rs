use detclock::{
    ClockState, ClocksConfig, ClocksData, ElectronicsTick, ElectronicsTime, ExternalTick,
    ExternalTickD, OpticalTick, TpcElectronicsTime, TpcTick, TriggerTick, TriggerTime,
};
use proptest::prelude::*;
use qtty::Microseconds;

const PROPTEST_CASES: u32 = 256;

fn frequency() -> impl Strategy<Value = f64> {
    prop_oneof![Just(2.0), Just(16.0), Just(31.25), Just(64.0), 0.5f64..500.0]
}

/// Frequencies whose 1600 us frame holds a whole number of ticks.
fn whole_frame_frequency() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(2.0),
        Just(16.0),
        Just(31.25),
        Just(64.0),
        (1u32..500).prop_map(f64::from),
    ]
}

fn clock(frequency: f64) -> ClockState {
    ClockState::new(Microseconds::new(0.0), Microseconds::new(1_600.0), frequency).unwrap()
}

fn snapshot(trigger: f64, beam: f64) -> ClocksData {
    ClocksData::for_job(&ClocksConfig::default())
        .unwrap()
        .with_trigger(Microseconds::new(trigger), Microseconds::new(beam))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(PROPTEST_CASES))]

    #[test]
    fn prop_ticks_truncate_product(f in frequency(), t in -1.0e6f64..1.0e6) {
        let c = clock(f);
        let ticks = c.ticks_at(Microseconds::new(t));
        let exact = t * f;
        let snapped = (exact - exact.round()).abs() <= 8.0 * f64::EPSILON * exact.abs().max(1.0);
        if !snapped {
            prop_assert_eq!(ticks, exact as i64);
            prop_assert!((ticks as f64).abs() <= exact.abs());
        }
        prop_assert!((exact - ticks as f64).abs() < 1.0);

        let back = c.time_of_tick(ticks as f64);
        prop_assert!((back.value() - t).abs() < c.tick_period().value() + 1e-6);
    }

    #[test]
    fn prop_frequency_times_period_is_one(f in frequency()) {
        let c = clock(f);
        prop_assert!((c.frequency() * c.tick_period().value() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn prop_sample_frame_round_trip(f in frequency(), tick in 0i64..10_000_000) {
        let c = clock(f);
        let sample = c.sample_of_tick(tick);
        let frame = c.frame_of_tick(tick);
        prop_assert!(sample >= 0 && sample < c.frame_ticks());
        prop_assert_eq!(c.tick_of(sample, frame), tick);
        prop_assert_eq!(c.try_tick_of(sample, frame), Ok(tick));
        prop_assert_eq!(c.with_tick(tick).ticks(), tick);
    }

    #[test]
    fn prop_sample_frame_of_time_round_trip(
        f in whole_frame_frequency(),
        tick in 0i64..10_000_000,
    ) {
        let c = clock(f);
        let moved = c.with_tick(tick);
        prop_assert_eq!(moved.ticks(), tick);
        prop_assert_eq!(moved.sample(), c.sample_of_tick(tick));
        prop_assert_eq!(moved.frame(), c.frame_of_tick(tick));
    }

    #[test]
    fn prop_same_category_tick_is_identity(
        trigger in -1.0e4f64..1.0e4,
        n in -10_000_000i64..10_000_000,
    ) {
        let d = snapshot(trigger, trigger);
        prop_assert_eq!(ElectronicsTick::new(n).to::<detclock::Electronics, i64>(&d).count(), n);
        prop_assert_eq!(TpcTick::new(n).to::<detclock::TpcElectronics, i64>(&d).count(), n);
        prop_assert_eq!(OpticalTick::new(n).to::<detclock::OpticalElectronics, i64>(&d).count(), n);
        prop_assert_eq!(TriggerTick::new(n).to::<detclock::TriggerElectronics, i64>(&d).count(), n);
        prop_assert_eq!(ExternalTick::new(n).to::<detclock::ExternalElectronics, i64>(&d).count(), n);
        let frac: ExternalTickD = ExternalTick::new(n).to(&d);
        prop_assert_eq!(frac.count(), n as f64);
    }

    #[test]
    fn prop_tick_point_tick_round_trip(n in -10_000_000i64..10_000_000) {
        let d = snapshot(0.0, 0.0);
        let external: ExternalTick = ExternalTick::new(n).to_point(&d).to_tick(&d);
        prop_assert_eq!(external.count(), n);
        let tpc: TpcTick = TpcTick::new(n).to_point(&d).to_tick(&d);
        prop_assert_eq!(tpc.count(), n);
    }

    #[test]
    fn prop_tpc_tick_time_round_trip(
        trigger in -1.0e4f64..1.0e4,
        tick in -1.0e6f64..1.0e6,
    ) {
        let d = snapshot(trigger, trigger);
        let back = d.time_to_tick(d.tpc_tick_to_time(tick));
        prop_assert!((back - tick).abs() < 1e-6, "{back} != {tick}");
        prop_assert!((d.tpc_tdc_to_tick(d.tpc_tick_to_tdc(tick)) - tick).abs() < 1e-6);
    }

    #[test]
    fn prop_router_round_trip(
        trigger in -1.0e4f64..1.0e4,
        beam in -1.0e4f64..1.0e4,
        t in -1.0e5f64..1.0e5,
    ) {
        let d = snapshot(trigger, beam);
        let e = ElectronicsTime::new(t);
        let rel: TriggerTime = e.to(&d);
        prop_assert!((rel.value() - (t - trigger)).abs() < 1e-9);
        let tpc: TpcElectronicsTime = rel.to(&d);
        let back: ElectronicsTime = tpc.to(&d);
        prop_assert!((back.value() - t).abs() < 1e-8);
    }
}
