pub mod achievement;
pub mod calendar;
pub mod level;
pub mod streak;
