//! qdrop-storage: OpenDAL operator factory + transfer hand-off

pub mod operator;
pub mod transfer;

pub use operator::build_operator;
pub use transfer::hand_off;
