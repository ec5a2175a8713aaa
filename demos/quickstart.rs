use detclock::{
    ClockService, ClocksConfig, ConfigKey, ElectronicsTime, EventTiming, SimulationTime,
    TriggerRecord, TriggerTime,
};
use qtty::Microseconds;
use tracing_subscriber::EnvFilter;

fn main() -> detclock::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,detclock=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ClocksConfig::default().with(ConfigKey::TriggerOffsetTPC, 3_200.0);
    let service = ClockService::new(config)?;

    let event = EventTiming::default().with_trigger(TriggerRecord::new(
        Microseconds::new(4_050.0),
        Microseconds::new(4_048.5),
    ));
    let clocks = service.data_for_event(&event);
    println!("{clocks}");

    let timings = clocks.timings();
    let deposit = SimulationTime::new(1_250.0);
    let elec: ElectronicsTime = timings.to_electronics_time(deposit);
    let rel: TriggerTime = elec.to(&clocks);

    println!("deposit:       {deposit}");
    println!("electronics:   {elec}");
    println!("trigger:       {rel}");
    println!("TPC tick:      {}", timings.to_tpc_tick(deposit));
    println!("optical tick:  {}", timings.to_optical_tick(deposit));
    println!("TPC period:    {}", timings.tpc_clock_period());
    Ok(())
}
