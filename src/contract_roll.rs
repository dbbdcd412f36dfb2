use anyhow::{Result, anyhow, bail};
use std::fmt;
use std::str::FromStr;

/// Root symbol for ICE Sugar No. 11 futures
pub const SUGAR_ROOT: &str = "SB";

/// Delivery months traded for Sugar No. 11: a quarterly cycle with a gap
/// (March, May, July, October)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FuturesMonth {
    March,   // H
    May,     // K
    July,    // N
    October, // V
}

impl FuturesMonth {
    /// Get the month code used in contract symbols
    pub fn code(&self) -> char {
        match self {
            FuturesMonth::March => 'H',
            FuturesMonth::May => 'K',
            FuturesMonth::July => 'N',
            FuturesMonth::October => 'V',
        }
    }

    /// Get the calendar month of delivery (1-12)
    pub fn delivery_month(&self) -> u32 {
        match self {
            FuturesMonth::March => 3,
            FuturesMonth::May => 5,
            FuturesMonth::July => 7,
            FuturesMonth::October => 10,
        }
    }

    /// Convert from a month code character
    pub fn from_code(code: char) -> Result<Self> {
        match code {
            'H' => Ok(FuturesMonth::March),
            'K' => Ok(FuturesMonth::May),
            'N' => Ok(FuturesMonth::July),
            'V' => Ok(FuturesMonth::October),
            _ => Err(anyhow!("Invalid sugar contract month code: {}", code)),
        }
    }
}

/// A single futures contract identifier, e.g. SBV25
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractSymbol {
    pub month: FuturesMonth,
    /// Two-digit contract year (full year modulo 100)
    pub year: u8,
}

impl ContractSymbol {
    pub fn new(month: FuturesMonth, full_year: i32) -> Self {
        Self {
            month,
            year: full_year.rem_euclid(100) as u8,
        }
    }

    /// Render the symbol as root + month code + zero-padded two-digit year
    pub fn render(&self) -> String {
        format!("{}{}{:02}", SUGAR_ROOT, self.month.code(), self.year)
    }
}

impl fmt::Display for ContractSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl FromStr for ContractSymbol {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let rest = s
            .strip_prefix(SUGAR_ROOT)
            .ok_or_else(|| anyhow!("Not a sugar contract symbol: {}", s))?;
        let mut chars = rest.chars();
        let code = chars
            .next()
            .ok_or_else(|| anyhow!("Truncated contract symbol: {}", s))?;
        let month = FuturesMonth::from_code(code)?;
        let digits = chars.as_str();
        if digits.len() != 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            bail!("Invalid contract year in symbol: {}", s);
        }
        let year: u8 = digits.parse()?;
        Ok(Self { month, year })
    }
}

/// One row of the roll schedule: for any calendar month in `calendar_months`,
/// the three nearest active delivery months and the year each one falls in
/// (0 = current year, 1 = next year).
struct RollRule {
    calendar_months: &'static [u32],
    contracts: [FuturesMonth; 3],
    year_offsets: [i32; 3],
}

/// The full roll schedule for Sugar No. 11. A contract is considered rolled
/// off once the calendar reaches its delivery month, so e.g. in March the
/// front contract is already May (K).
const ROLL_SCHEDULE: &[RollRule] = &[
    RollRule {
        calendar_months: &[1, 2],
        contracts: [FuturesMonth::March, FuturesMonth::May, FuturesMonth::July],
        year_offsets: [0, 0, 0],
    },
    RollRule {
        calendar_months: &[3, 4],
        contracts: [FuturesMonth::May, FuturesMonth::July, FuturesMonth::October],
        year_offsets: [0, 0, 0],
    },
    RollRule {
        calendar_months: &[5, 6],
        contracts: [FuturesMonth::July, FuturesMonth::October, FuturesMonth::March],
        year_offsets: [0, 0, 1],
    },
    RollRule {
        calendar_months: &[7, 8, 9],
        contracts: [FuturesMonth::October, FuturesMonth::March, FuturesMonth::May],
        year_offsets: [0, 1, 1],
    },
    RollRule {
        calendar_months: &[10, 11, 12],
        contracts: [FuturesMonth::March, FuturesMonth::May, FuturesMonth::July],
        year_offsets: [1, 1, 1],
    },
];

/// Compute the three nearest active sugar delivery months for a calendar
/// date, earliest delivery first.
///
/// Pure function of (month, year); callers pass in the components of
/// "today" so scheduled runs stay unit-testable.
pub fn compute_front_three(month: u32, year: i32) -> Result<[ContractSymbol; 3]> {
    if !(1..=12).contains(&month) {
        bail!("Invalid calendar month: {}", month);
    }
    if !(1900..=2099).contains(&year) {
        bail!("Calendar year out of supported range: {}", year);
    }

    let rule = ROLL_SCHEDULE
        .iter()
        .find(|r| r.calendar_months.contains(&month))
        .ok_or_else(|| anyhow!("No roll rule covers calendar month {}", month))?;

    Ok(std::array::from_fn(|i| {
        ContractSymbol::new(rule.contracts[i], year + rule.year_offsets[i])
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(month: u32, year: i32) -> Vec<String> {
        compute_front_three(month, year)
            .unwrap()
            .iter()
            .map(|s| s.render())
            .collect()
    }

    #[test]
    fn test_month_code_conversion() {
        assert_eq!(FuturesMonth::March.code(), 'H');
        assert_eq!(FuturesMonth::October.code(), 'V');
        assert_eq!(FuturesMonth::from_code('K').unwrap(), FuturesMonth::May);
        assert_eq!(FuturesMonth::July.delivery_month(), 7);
        assert!(FuturesMonth::from_code('Z').is_err());
    }

    #[test]
    fn test_symbol_rendering() {
        let symbol = ContractSymbol::new(FuturesMonth::October, 2025);
        assert_eq!(symbol.render(), "SBV25");
        assert_eq!(symbol.to_string(), "SBV25");

        // Year must be zero-padded
        let symbol = ContractSymbol::new(FuturesMonth::March, 2005);
        assert_eq!(symbol.render(), "SBH05");
    }

    #[test]
    fn test_symbol_parsing() {
        let symbol: ContractSymbol = "SBV25".parse().unwrap();
        assert_eq!(symbol.month, FuturesMonth::October);
        assert_eq!(symbol.year, 25);

        assert!("CLV25".parse::<ContractSymbol>().is_err());
        assert!("SBZ25".parse::<ContractSymbol>().is_err());
        assert!("SBV2".parse::<ContractSymbol>().is_err());
        assert!("SBV2x".parse::<ContractSymbol>().is_err());
        assert!("SB".parse::<ContractSymbol>().is_err());
    }

    #[test]
    fn test_early_year_uses_current_year_contracts() {
        assert_eq!(rendered(1, 2025), vec!["SBH25", "SBK25", "SBN25"]);
        assert_eq!(rendered(3, 2025), vec!["SBK25", "SBN25", "SBV25"]);
    }

    #[test]
    fn test_mid_year_rolls_march_into_next_year() {
        assert_eq!(rendered(6, 2025), vec!["SBN25", "SBV25", "SBH26"]);
        assert_eq!(rendered(8, 2025), vec!["SBV25", "SBH26", "SBK26"]);
    }

    #[test]
    fn test_late_year_rolls_everything_into_next_year() {
        assert_eq!(rendered(11, 2025), vec!["SBH26", "SBK26", "SBN26"]);
        assert_eq!(rendered(12, 2099), vec!["SBH00", "SBK00", "SBN00"]);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(compute_front_three(0, 2025).is_err());
        assert!(compute_front_three(13, 2025).is_err());
        assert!(compute_front_three(6, 1899).is_err());
        assert!(compute_front_three(6, 2100).is_err());
    }
}
