pub mod bn;
pub mod helpers;
pub mod premium;
pub mod safe_math;
pub mod shares;
