pub mod billing;
pub mod break_even;
pub mod feed;
pub mod weight;
