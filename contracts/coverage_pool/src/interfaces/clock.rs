use soroban_sdk::Env;

/// Monotonic, never-decreasing source of the current tick.
pub trait TickSource {
    fn current_tick(&self) -> u64;
}

/// Ticks are ledger sequence numbers.
pub struct LedgerClock<'a> {
    env: &'a Env,
}

impl<'a> LedgerClock<'a> {
    pub fn new(env: &'a Env) -> Self {
        LedgerClock { env }
    }
}

impl TickSource for LedgerClock<'_> {
    fn current_tick(&self) -> u64 {
        u64::from(self.env.ledger().sequence())
    }
}
