pub mod protocol;
pub mod stake;
