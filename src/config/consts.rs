/// Default tick rate of the engine loop (ticks per second)
pub const DEFAULT_TICK_RATE_HZ: f64 = 100.0;
/// Default upper bound on ticks before the engine gives up
pub const DEFAULT_MAX_TICKS: u64 = 100_000;
/// Default number of packets a link holds before its producer is backpressured
pub const DEFAULT_QUEUE_SIZE: usize = 4;
