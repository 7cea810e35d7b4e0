use coverage::error::{ CoverageResult, ErrorCode };
use soroban_sdk::{ log, token, Address, Env };

/// Moves the pooled asset between the ledger and external identities.
pub trait AssetTransfer {
    /// Pulls `amount` from `from` into the ledger's custody.
    ///
    /// Fails with `InsufficientFunds` when the transfer is refused.
    fn credit_in(&self, from: &Address, amount: i128) -> CoverageResult;

    /// Sends `amount` out of the ledger's custody to `to`.
    ///
    /// Fails with `TransferFault` when the transfer is refused.
    fn pay_out(&self, to: &Address, amount: i128) -> CoverageResult;
}

/// Custody held by the contract itself on a SEP-41 token.
pub struct TokenVault<'a> {
    env: &'a Env,
    token: token::Client<'a>,
}

impl<'a> TokenVault<'a> {
    pub fn new(env: &'a Env, asset: &Address) -> Self {
        TokenVault {
            env,
            token: token::Client::new(env, asset),
        }
    }
}

impl AssetTransfer for TokenVault<'_> {
    fn credit_in(&self, from: &Address, amount: i128) -> CoverageResult {
        let vault = self.env.current_contract_address();
        match self.token.try_transfer(from, &vault, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => {
                log!(self.env, "Coverage Pool: transfer of {} from {} refused", amount, from.clone());
                Err(ErrorCode::InsufficientFunds)
            }
        }
    }

    fn pay_out(&self, to: &Address, amount: i128) -> CoverageResult {
        let vault = self.env.current_contract_address();
        match self.token.try_transfer(&vault, to, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => {
                log!(self.env, "Coverage Pool: payout of {} to {} refused", amount, to.clone());
                Err(ErrorCode::TransferFault)
            }
        }
    }
}
