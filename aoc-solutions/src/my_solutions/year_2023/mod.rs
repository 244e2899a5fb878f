pub mod day_10;
pub mod day_12;
pub mod day_16;
pub mod day_17;
pub mod day_18;
pub mod day_21;
pub mod day_23;
pub mod day_25;
