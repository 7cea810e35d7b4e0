// Premium rates are fixed-point fractions of covered funds per tick.
pub const PREMIUM_RATE_PRECISION: i128 = 1_000_000_000_000_000_000; // 1e18
pub const ONE_PERCENT_PREMIUM_RATE: i128 = PREMIUM_RATE_PRECISION / 100;

// Storage
pub const DAY_IN_LEDGERS: u32 = 17280;

pub const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - DAY_IN_LEDGERS;
