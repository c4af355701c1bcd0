//! Aggregate figures shown under the certification grid.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;

use super::records::{Certification, CertificationCategory};

/// Counts derived from the certification table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificationSummary {
    /// Number of certifications
    pub count: usize,
    /// Distinct categories ("specializations")
    pub specializations: usize,
    /// Earliest and latest year mentioned in the periods
    pub years: Option<(u16, u16)>,
}

impl CertificationSummary {
    /// Derives the summary from `certifications`.
    #[must_use]
    pub fn from_certifications(certifications: &[Certification]) -> Self {
        let categories: BTreeSet<CertificationCategory> =
            certifications.iter().map(|cert| cert.category).collect();

        let mut years = BTreeSet::new();
        if let Ok(year_regex) = Regex::new(r"\b(20\d{2})\b") {
            for cert in certifications {
                for capture in year_regex.captures_iter(&cert.period) {
                    if let Ok(year) = capture[1].parse::<u16>() {
                        years.insert(year);
                    }
                }
            }
        }

        Self {
            count: certifications.len(),
            specializations: categories.len(),
            years: years.first().copied().zip(years.last().copied()),
        }
    }

    /// Active-learning span, e.g. `2024-25`.
    #[must_use]
    pub fn active_span(&self) -> Option<String> {
        let (first, last) = self.years?;
        Some(if first == last {
            first.to_string()
        } else if first / 100 == last / 100 {
            format!("{first}-{:02}", last % 100)
        } else {
            format!("{first}-{last}")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Gradient;

    fn cert(title: &str, period: &str, category: CertificationCategory) -> Certification {
        Certification {
            organization: "Org".to_string(),
            title: title.to_string(),
            period: period.to_string(),
            gradient: Gradient::default(),
            category,
        }
    }

    #[test]
    fn test_summary_counts() {
        let summary = CertificationSummary::from_certifications(&[
            cert("A", "Feb - May 2025", CertificationCategory::Programming),
            cert("B", "Oct 2024", CertificationCategory::Testing),
            cert("C", "Aug 2025", CertificationCategory::Analytics),
            cert("D", "Jul 2025", CertificationCategory::Analytics),
        ]);
        assert_eq!(summary.count, 4);
        assert_eq!(summary.specializations, 3);
        assert_eq!(summary.years, Some((2024, 2025)));
        assert_eq!(summary.active_span().as_deref(), Some("2024-25"));
    }

    #[test]
    fn test_single_year_and_no_years() {
        let single = CertificationSummary::from_certifications(&[cert(
            "A",
            "Aug 2025",
            CertificationCategory::Analytics,
        )]);
        assert_eq!(single.active_span().as_deref(), Some("2025"));

        let none = CertificationSummary::from_certifications(&[]);
        assert_eq!(none.count, 0);
        assert_eq!(none.active_span(), None);
    }
}
