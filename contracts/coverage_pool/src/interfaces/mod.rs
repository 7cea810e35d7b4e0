mod assets;
mod clock;

pub use assets::{ AssetTransfer, TokenVault };
pub use clock::{ LedgerClock, TickSource };
