//! Stats module - mean rank computation

mod calculator;

pub use calculator::{CourseRanking, RankingTable, StatsCalculator};
