//! Quorum rules for group decisions
//!
//! Rules are always evaluated against the **roster size**, never against the
//! number of participants who happened to answer. Silence counts as dissent.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Rule for determining whether enough roster members agreed
///
/// - `HalfOfRoster`: at least `ceil(n / 2)` (default)
/// - `Unanimous`: all roster members
/// - `AtLeast(k)`: at least `k`
/// - `Percentage(p)`: at least `ceil(n × p / 100)`
///
/// # Example
///
/// ```
/// use huddle_domain::QuorumRule;
///
/// let rule = QuorumRule::HalfOfRoster;
/// assert!(rule.is_satisfied(2, 4));  // 2 >= ceil(4/2)
/// assert!(!rule.is_satisfied(1, 4));
/// assert!(rule.is_satisfied(2, 3));  // 2 >= ceil(3/2)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuorumRule {
    /// At least half of the roster, rounded up
    #[default]
    HalfOfRoster,

    /// Every roster member
    Unanimous,

    /// At least n members
    AtLeast(usize),

    /// At least this percentage of the roster (0-100)
    Percentage(u8),
}

impl QuorumRule {
    /// Minimum agreeing members needed for a roster of `roster_size`
    pub fn min_required(&self, roster_size: usize) -> usize {
        match self {
            QuorumRule::HalfOfRoster => roster_size.div_ceil(2),
            QuorumRule::Unanimous => roster_size,
            QuorumRule::AtLeast(n) => *n,
            QuorumRule::Percentage(p) => (roster_size * usize::from((*p).min(100))).div_ceil(100),
        }
    }

    /// Check whether `count` agreeing members satisfy the rule
    pub fn is_satisfied(&self, count: usize, roster_size: usize) -> bool {
        count >= self.min_required(roster_size)
    }

    /// Get a human-readable description of this rule
    pub fn description(&self) -> String {
        match self {
            QuorumRule::HalfOfRoster => "half of the roster (rounded up)".to_string(),
            QuorumRule::Unanimous => "unanimous (every member)".to_string(),
            QuorumRule::AtLeast(n) => format!("at least {} members", n),
            QuorumRule::Percentage(p) => format!("at least {}% of the roster", p),
        }
    }
}

/// `ceil(total × fraction)`, the member count a fractional threshold demands.
///
/// ```
/// use huddle_domain::quorum::required_for_fraction;
///
/// assert_eq!(required_for_fraction(4, 0.5), 2);
/// assert_eq!(required_for_fraction(3, 0.5), 2);
/// assert_eq!(required_for_fraction(0, 0.5), 0);
/// ```
pub fn required_for_fraction(total: usize, fraction: f64) -> usize {
    let fraction = fraction.clamp(0.0, 1.0);
    (total as f64 * fraction).ceil() as usize
}

impl std::fmt::Display for QuorumRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl std::str::FromStr for QuorumRule {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "half" | "half_of_roster" => Ok(QuorumRule::HalfOfRoster),
            "unanimous" => Ok(QuorumRule::Unanimous),
            s if s.starts_with("atleast:") || s.starts_with("at_least:") => {
                let n: usize = s
                    .split(':')
                    .nth(1)
                    .and_then(|n| n.parse().ok())
                    .ok_or_else(|| DomainError::InvalidRule(s.to_string()))?;
                Ok(QuorumRule::AtLeast(n))
            }
            s if s.starts_with("percentage:") || s.ends_with('%') => {
                let num_str = s.trim_start_matches("percentage:").trim_end_matches('%');
                let p: u8 = num_str
                    .parse()
                    .ok()
                    .filter(|p| *p <= 100)
                    .ok_or_else(|| DomainError::InvalidRule(s.to_string()))?;
                Ok(QuorumRule::Percentage(p))
            }
            _ => Err(DomainError::InvalidRule(format!(
                "{}. Valid: half, unanimous, atleast:N, percentage:N or N%",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_of_roster_rounds_up() {
        let rule = QuorumRule::HalfOfRoster;

        assert_eq!(rule.min_required(4), 2);
        assert_eq!(rule.min_required(5), 3);
        assert_eq!(rule.min_required(1), 1);

        assert!(!rule.is_satisfied(1, 4));
        assert!(rule.is_satisfied(2, 4));
        assert!(!rule.is_satisfied(2, 5));
        assert!(rule.is_satisfied(3, 5));
    }

    #[test]
    fn test_unanimous_rule() {
        let rule = QuorumRule::Unanimous;
        assert!(!rule.is_satisfied(2, 3));
        assert!(rule.is_satisfied(3, 3));
    }

    #[test]
    fn test_at_least_rule() {
        let rule = QuorumRule::AtLeast(2);
        assert!(!rule.is_satisfied(1, 5));
        assert!(rule.is_satisfied(2, 5));
    }

    #[test]
    fn test_percentage_rule() {
        let rule = QuorumRule::Percentage(75);
        // 4 members: need ceil(3.0) = 3
        assert!(!rule.is_satisfied(2, 4));
        assert!(rule.is_satisfied(3, 4));

        // 50% behaves like half of roster
        assert_eq!(QuorumRule::Percentage(50).min_required(7), 4);
    }

    #[test]
    fn test_percentage_uses_exact_integer_ceiling() {
        assert_eq!(QuorumRule::Percentage(7).min_required(100), 7);
        assert_eq!(QuorumRule::Percentage(29).min_required(100), 29);
        assert_eq!(QuorumRule::Percentage(7).min_required(101), 8);
        assert_eq!(QuorumRule::Percentage(0).min_required(10), 0);
        assert_eq!(QuorumRule::Percentage(100).min_required(3), 3);
    }

    #[test]
    fn test_required_for_fraction_clamps() {
        assert_eq!(required_for_fraction(4, 1.5), 4);
        assert_eq!(required_for_fraction(4, -1.0), 0);
        assert_eq!(required_for_fraction(5, 0.4), 2);
    }

    #[test]
    fn test_parse_rule() {
        assert_eq!("half".parse::<QuorumRule>().unwrap(), QuorumRule::HalfOfRoster);
        assert_eq!("Unanimous".parse::<QuorumRule>().unwrap(), QuorumRule::Unanimous);
        assert_eq!("atleast:3".parse::<QuorumRule>().unwrap(), QuorumRule::AtLeast(3));
        assert_eq!("60%".parse::<QuorumRule>().unwrap(), QuorumRule::Percentage(60));
        assert!("150%".parse::<QuorumRule>().is_err());
        assert!("most".parse::<QuorumRule>().is_err());
    }
}
