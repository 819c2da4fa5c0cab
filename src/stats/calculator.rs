//! Statistics Calculator Module
//! Computes per-course mean ranks and orders the courses by preference.

use crate::data::CourseResponses;
use statrs::statistics::Statistics;
use std::cmp::Ordering;
use std::fmt;
use tracing::warn;

/// Summary of one core course across all respondents.
#[derive(Debug, Clone)]
pub struct CourseRanking {
    pub course_id: String,
    pub course_name: String,
    /// Arithmetic mean of the valid ranks; NaN when there are none.
    pub mean_rank: f64,
    pub responses: usize,
    pub median_rank: f64,
    pub std_dev: f64,
}

impl Default for CourseRanking {
    fn default() -> Self {
        Self {
            course_id: String::new(),
            course_name: String::new(),
            mean_rank: f64::NAN,
            responses: 0,
            median_rank: f64::NAN,
            std_dev: f64::NAN,
        }
    }
}

/// Courses sorted by ascending mean rank (most preferred first).
#[derive(Debug, Clone, Default)]
pub struct RankingTable {
    rankings: Vec<CourseRanking>,
}

impl RankingTable {
    pub fn rankings(&self) -> &[CourseRanking] {
        &self.rankings
    }

    pub fn iter(&self) -> impl Iterator<Item = &CourseRanking> {
        self.rankings.iter()
    }

    pub fn len(&self) -> usize {
        self.rankings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rankings.is_empty()
    }

    /// Course identifiers in ranked order.
    pub fn course_ids(&self) -> Vec<&str> {
        self.rankings.iter().map(|r| r.course_id.as_str()).collect()
    }
}

impl fmt::Display for RankingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name_width = self
            .rankings
            .iter()
            .map(|r| r.course_name.chars().count())
            .chain(std::iter::once("Course Name".len()))
            .max()
            .unwrap_or_default();

        writeln!(
            f,
            "{:>4}  {:<10}  {:<name_width$}  {:>9}  {:>6}  {:>7}  {:>3}",
            "#", "Course ID", "Course Name", "Mean Rank", "Median", "Std", "N"
        )?;
        for (idx, r) in self.rankings.iter().enumerate() {
            writeln!(
                f,
                "{:>4}  {:<10}  {:<name_width$}  {:>9.3}  {:>6.1}  {:>7.3}  {:>3}",
                idx + 1,
                r.course_id,
                r.course_name,
                r.mean_rank,
                r.median_rank,
                r.std_dev,
                r.responses
            )?;
        }
        Ok(())
    }
}

/// Turns coerced survey responses into a ranking table.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute statistics for every course and sort by mean rank.
    ///
    /// The sort is stable, so courses with equal means keep their input
    /// (core-column) order. Courses without any valid rank sort last.
    pub fn rank_courses(courses: &[CourseResponses]) -> RankingTable {
        let mut rankings: Vec<CourseRanking> = courses
            .iter()
            .map(|course| {
                let mut ranking = Self::compute_course_stats(&course.valid_ranks());
                ranking.course_id = course.course_id.clone();
                ranking.course_name = course.course_name.clone();

                if ranking.responses == 0 {
                    warn!(course = %course.course_id, "no numeric responses, mean rank undefined");
                }
                ranking
            })
            .collect();

        rankings.sort_by(|a, b| Self::compare_means(a.mean_rank, b.mean_rank));

        RankingTable { rankings }
    }

    /// Descriptive statistics for one course's valid ranks.
    pub fn compute_course_stats(values: &[f64]) -> CourseRanking {
        let n = values.len();
        if n == 0 {
            return CourseRanking::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        let median_rank = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };

        let std_dev = if n > 1 { values.iter().std_dev() } else { 0.0 };

        CourseRanking {
            mean_rank: values.iter().mean(),
            responses: n,
            median_rank,
            std_dev,
            ..CourseRanking::default()
        }
    }

    /// Ascending order on means with NaN after every number.
    pub fn compare_means(a: f64, b: f64) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            (false, true) => Ordering::Less,
            (true, false) => Ordering::Greater,
            (true, true) => Ordering::Equal,
        }
    }
}
