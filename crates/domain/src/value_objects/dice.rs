//! Dice expression parsing and rolling
//!
//! Supports multi-group expressions like "2d6+3", "1d20+1d4-2", "4d6".
//! An expression is scanned for signed dice groups (`[+|-]NdM`) and signed
//! flat modifiers; everything else in the string is ignored. Out-of-range
//! groups or modifiers invalidate the whole expression rather than rolling
//! a degenerate subset of it.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Largest allowed dice count per group (`N` in `NdM`).
pub const MAX_DICE_PER_GROUP: i32 = 100;
/// Largest allowed die size per group (`M` in `NdM`).
pub const MAX_DIE_SIDES: i32 = 1000;
/// Largest allowed magnitude for a flat modifier. A flat term beyond it
/// invalidates the whole expression, same as an out-of-range dice group;
/// it is never silently clamped.
pub const MAX_FLAT_MODIFIER: i32 = 1000;

/// Error when parsing a dice expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceParseError {
    /// The expression string is empty
    #[error("Empty dice expression")]
    Empty,
    /// The expression contains no `NdM` group at all
    #[error("No dice group found in '{0}'")]
    NoDiceGroup(String),
    /// Dice count outside `1..=MAX_DICE_PER_GROUP`
    #[error("Dice count must be between 1 and {MAX_DICE_PER_GROUP}")]
    DiceCountOutOfRange,
    /// Die size outside `1..=MAX_DIE_SIDES`
    #[error("Die size must be between 1 and {MAX_DIE_SIDES}")]
    DieSizeOutOfRange,
    /// Flat modifier magnitude above `MAX_FLAT_MODIFIER`
    #[error("Flat modifier magnitude must not exceed {MAX_FLAT_MODIFIER}")]
    ModifierOutOfRange,
}

/// Sign attached to a term in an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    fn apply(self, value: i32) -> i32 {
        match self {
            Sign::Plus => value,
            Sign::Minus => -value,
        }
    }

    fn symbol(self) -> char {
        match self {
            Sign::Plus => '+',
            Sign::Minus => '-',
        }
    }
}

/// One parsed term of a dice expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DiceTerm {
    /// A dice group like `2d6`, combined into the total with its sign
    Group { sign: Sign, count: i32, sides: i32 },
    /// A flat numeric modifier, already signed
    Flat { value: i32 },
}

/// A parsed dice expression like "2d6+1d4+3".
///
/// Terms keep the order they appeared in the source string; rolling
/// applies them to a running total left-to-right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceExpression {
    terms: Vec<DiceTerm>,
}

impl DiceExpression {
    /// Parse an expression string.
    ///
    /// The scanner picks out signed `NdM` groups and flat modifiers and
    /// skips anything else. At least one dice group is required. Bounds
    /// violations fail the entire expression (fail closed, no partial roll).
    pub fn parse(input: &str) -> Result<Self, DiceParseError> {
        let trimmed = input.trim().to_lowercase();
        if trimmed.is_empty() {
            return Err(DiceParseError::Empty);
        }

        let chars: Vec<char> = trimmed.chars().collect();
        let mut terms = Vec::new();
        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            if c != '+' && c != '-' && !c.is_ascii_digit() {
                i += 1;
                continue;
            }

            let sign = match c {
                '+' => {
                    i += 1;
                    Sign::Plus
                }
                '-' => {
                    i += 1;
                    Sign::Minus
                }
                _ => Sign::Plus,
            };

            // Allow whitespace between a sign and its number ("2d6 + 3")
            while i < chars.len() && chars[i].is_whitespace() {
                i += 1;
            }
            if i >= chars.len() || !chars[i].is_ascii_digit() {
                // Stray sign with no number attached; skip it
                continue;
            }

            let (first, next) = read_number(&chars, i);
            i = next;

            if i < chars.len() && chars[i] == 'd' && chars.get(i + 1).is_some_and(char::is_ascii_digit) {
                let (sides, next) = read_number(&chars, i + 1);
                i = next;
                if !(1..=i64::from(MAX_DICE_PER_GROUP)).contains(&first) {
                    return Err(DiceParseError::DiceCountOutOfRange);
                }
                if !(1..=i64::from(MAX_DIE_SIDES)).contains(&sides) {
                    return Err(DiceParseError::DieSizeOutOfRange);
                }
                terms.push(DiceTerm::Group {
                    sign,
                    count: first as i32,
                    sides: sides as i32,
                });
            } else {
                if first > i64::from(MAX_FLAT_MODIFIER) {
                    return Err(DiceParseError::ModifierOutOfRange);
                }
                terms.push(DiceTerm::Flat {
                    value: sign.apply(first as i32),
                });
            }
        }

        if !terms.iter().any(|t| matches!(t, DiceTerm::Group { .. })) {
            return Err(DiceParseError::NoDiceGroup(trimmed));
        }

        Ok(Self { terms })
    }

    /// The parsed terms in source order.
    pub fn terms(&self) -> &[DiceTerm] {
        &self.terms
    }

    /// Roll the expression, drawing each die independently and uniformly
    /// from `[1, sides]`.
    pub fn roll<R: Rng>(&self, rng: &mut R) -> DiceRollResult {
        let mut rolls = Vec::with_capacity(self.terms.len());
        let mut total = 0;
        for term in &self.terms {
            match *term {
                DiceTerm::Group { sign, count, sides } => {
                    let dice: Vec<i32> = (0..count).map(|_| rng.gen_range(1..=sides)).collect();
                    let subtotal: i32 = dice.iter().sum();
                    total += sign.apply(subtotal);
                    rolls.push(TermRoll::Group {
                        sign,
                        count,
                        sides,
                        rolls: dice,
                        subtotal,
                    });
                }
                DiceTerm::Flat { value } => {
                    total += value;
                    rolls.push(TermRoll::Flat { value });
                }
            }
        }
        DiceRollResult { rolls, total }
    }

    /// Get the minimum possible total.
    pub fn min_total(&self) -> i32 {
        self.terms
            .iter()
            .map(|term| match *term {
                DiceTerm::Group { sign, count, sides } => match sign {
                    Sign::Plus => count,
                    Sign::Minus => -(count * sides),
                },
                DiceTerm::Flat { value } => value,
            })
            .sum()
    }

    /// Get the maximum possible total.
    pub fn max_total(&self) -> i32 {
        self.terms
            .iter()
            .map(|term| match *term {
                DiceTerm::Group { sign, count, sides } => match sign {
                    Sign::Plus => count * sides,
                    Sign::Minus => -count,
                },
                DiceTerm::Flat { value } => value,
            })
            .sum()
    }
}

impl fmt::Display for DiceExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, term) in self.terms.iter().enumerate() {
            match *term {
                DiceTerm::Group { sign, count, sides } => {
                    if idx == 0 {
                        if sign == Sign::Minus {
                            write!(f, "-")?;
                        }
                    } else {
                        write!(f, "{}", sign.symbol())?;
                    }
                    write!(f, "{count}d{sides}")?;
                }
                DiceTerm::Flat { value } => {
                    if idx == 0 {
                        write!(f, "{value}")?;
                    } else if value < 0 {
                        write!(f, "-{}", -value)?;
                    } else {
                        write!(f, "+{value}")?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// The rolled outcome of one expression term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TermRoll {
    Group {
        sign: Sign,
        count: i32,
        sides: i32,
        /// Individual die results
        rolls: Vec<i32>,
        /// Sum of this group's dice before the sign is applied
        subtotal: i32,
    },
    Flat {
        value: i32,
    },
}

/// Result of rolling a dice expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceRollResult {
    /// Per-term outcomes in source order
    pub rolls: Vec<TermRoll>,
    /// Grand total, terms applied left-to-right with their signs
    pub total: i32,
}

impl DiceRollResult {
    /// Format as a breakdown string (e.g., "2d6[4, 5] + 3 = 12").
    pub fn breakdown(&self) -> String {
        let mut out = String::new();
        for (idx, roll) in self.rolls.iter().enumerate() {
            match roll {
                TermRoll::Group {
                    sign,
                    count,
                    sides,
                    rolls,
                    ..
                } => {
                    if idx == 0 {
                        if *sign == Sign::Minus {
                            out.push('-');
                        }
                    } else {
                        out.push_str(&format!(" {} ", sign.symbol()));
                    }
                    let dice: Vec<String> = rolls.iter().map(|r| r.to_string()).collect();
                    out.push_str(&format!("{count}d{sides}[{}]", dice.join(", ")));
                }
                TermRoll::Flat { value } => {
                    if idx == 0 {
                        out.push_str(&value.to_string());
                    } else if *value < 0 {
                        out.push_str(&format!(" - {}", -value));
                    } else {
                        out.push_str(&format!(" + {value}"));
                    }
                }
            }
        }
        out.push_str(&format!(" = {}", self.total));
        out
    }
}

/// Parse and roll in one step, mapping any parse failure to `None`.
///
/// Callers that only want "no roll performed" rather than a diagnostic
/// (e.g. chat-style roll commands) use this instead of
/// [`DiceExpression::parse`].
pub fn roll_expression(input: &str) -> Option<DiceRollResult> {
    let expression = DiceExpression::parse(input).ok()?;
    Some(expression.roll(&mut rand::thread_rng()))
}

/// Read a run of ASCII digits starting at `start`, saturating well above
/// every legal bound so oversized numbers still fail range checks.
fn read_number(chars: &[char], start: usize) -> (i64, usize) {
    let mut value: i64 = 0;
    let mut i = start;
    while i < chars.len() && chars[i].is_ascii_digit() {
        if value < 1_000_000 {
            value = value * 10 + i64::from(chars[i] as u8 - b'0');
        }
        i += 1;
    }
    (value, i)
}
