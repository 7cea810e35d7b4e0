//! Big number types

#![allow(clippy::assign_op_pattern)]
#![allow(clippy::ptr_offset_with_cast)]
#![allow(clippy::manual_range_contains)]
#![allow(clippy::manual_div_ceil)]

use soroban_sdk::Env;
use uint::construct_uint;

use crate::error::{CoverageResult, ErrorCode};
use crate::validate;

construct_uint! {
    /// 256-bit unsigned integer.
    pub struct U256(4);
}

impl U256 {
    /// Convert u256 to i128, failing when the value exceeds `i128::MAX`
    pub fn to_i128(self, env: &Env) -> CoverageResult<i128> {
        validate!(
            env,
            self <= U256::from(i128::MAX.unsigned_abs()),
            ErrorCode::MathError,
            "u256 value does not fit in i128"
        )?;

        Ok(self.low_u128() as i128)
    }
}
