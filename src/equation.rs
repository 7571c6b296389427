use std::fmt::{Display, Formatter};

use rand::Rng;

/// Balloon fill colors, cycled in order across a level's six equations.
const COLORS: [&str; 6] = ["#f1b40f", "#3b82f6", "#22c55e", "#ef4444", "#a855f7", "#ec4899"];

/// Number of balloons generated per level.
pub const EQUATIONS_PER_LEVEL: usize = 6;

/// An arithmetic operator appearing in generated equations.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Operator {
    /// Addition.
    Add,
    /// Subtraction, always arranged to give a non-negative result.
    Sub,
    /// Multiplication.
    Mul,
    /// Division; clean in early levels, one-decimal results later.
    Div,
    /// Modulo, handy for producing small values.
    Mod,
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Mod => '%',
        })
    }
}

/// What the player is asked to do with a level's balloons.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum GameMode {
    /// Click the single smallest value.
    Smallest,
    /// Click every balloon, lowest value first.
    Ascending,
    /// Click every balloon, highest value first.
    Descending,
    /// Click the single largest value.
    Largest,
}

impl GameMode {
    /// The mode in force at a given level: four 20-level phases.
    pub fn for_level(level: u32) -> Self {
        match level {
            ..=20 => Self::Smallest,
            21..=40 => Self::Ascending,
            41..=60 => Self::Descending,
            _ => Self::Largest,
        }
    }
}

/// The phase banner shown for a level.
pub fn difficulty_label(level: u32) -> &'static str {
    match level {
        ..=5 => "PHASE 1.1: BASIC SMALL",
        6..=10 => "PHASE 1.2: DIVISION MASTERY",
        11..=15 => "PHASE 1.3: MODULO MAGIC",
        16..=20 => "PHASE 1.4: SMALLEST EXPERT",
        21..=40 => "PHASE 2: LOW TO HIGH",
        41..=60 => "PHASE 3: HIGH TO LOW",
        _ => "PHASE 4: BIGGEST",
    }
}

/// One balloon: an arithmetic expression, its value, and presentation data.
#[derive(Clone, PartialEq, Debug)]
pub struct Equation {
    /// Unique id within the run, used to track clicks.
    pub id: String,
    /// The expression as shown to the player, e.g. `"12 / 4"`.
    pub text: String,
    /// The expression's value. Integral except for late-phase division, which
    /// rounds to one decimal place.
    pub value: f64,
    /// Balloon fill color.
    pub color: &'static str,
}

/// Operator pool for a level; repeats weight the draw.
fn operator_pool(level: u32) -> &'static [Operator] {
    use Operator::*;

    match level {
        ..=4 => &[Add, Sub, Add, Sub],
        5..=8 => &[Add, Sub, Div, Div],
        9..=12 => &[Div, Div, Mod, Mod],
        13..=16 => &[Add, Sub, Mul, Div, Mod],
        17..=20 => &[Div, Mod, Mul, Div, Mod],
        _ => &[Add, Sub, Mul, Div, Mod],
    }
}

/// Generate the six balloons for `level`.
///
/// Value range and decimal precision scale with the level; the operator mix
/// follows the phase sub-brackets. Values are kept distinct where possible so
/// "smallest"/"largest" rounds have a unique answer, giving up after 40 of the
/// 50 attempts per balloon.
pub fn generate_equations(level: u32, rng: &mut impl Rng) -> Vec<Equation> {
    let operators = operator_pool(level);
    let max_range = (10 + level / 2) as i64;
    // decimals introduced mid-phase 1
    let allow_decimals = level > 8;

    let mut seen_values: Vec<f64> = Vec::with_capacity(EQUATIONS_PER_LEVEL);
    let mut equations = Vec::with_capacity(EQUATIONS_PER_LEVEL);

    for i in 0..EQUATIONS_PER_LEVEL {
        for attempts in 0..50 {
            let op = operators[rng.gen_range(0..operators.len())];
            let mut a: i64 = rng.gen_range(2..=max_range + 5);
            let mut b: i64 = rng.gen_range(2..=(max_range / 2).max(2));

            let (value, text): (f64, String) = match op {
                Operator::Add => ((a + b) as f64, format!("{} {} {}", a, op, b)),
                Operator::Sub => {
                    if a < b {
                        std::mem::swap(&mut a, &mut b);
                    }
                    ((a - b) as f64, format!("{} {} {}", a, op, b))
                }
                Operator::Mul => {
                    let a = rng.gen_range(1..=max_range.min(10));
                    let b = rng.gen_range(1..=8);
                    ((a * b) as f64, format!("{} {} {}", a, op, b))
                }
                Operator::Div => {
                    if !allow_decimals || level < 12 {
                        // pick the quotient first so the division comes out clean
                        let quotient = rng.gen_range(1..=5);
                        let divisor = rng.gen_range(2..=6);
                        (quotient as f64, format!("{} {} {}", quotient * divisor, op, divisor))
                    } else {
                        let value = (a as f64 / b as f64 * 10.0).round() / 10.0;
                        (value, format!("{} {} {}", a, op, b))
                    }
                }
                Operator::Mod => {
                    if a <= b {
                        a = b + rng.gen_range(1..=10);
                    }
                    ((a % b) as f64, format!("{} {} {}", a, op, b))
                }
            };

            if !seen_values.contains(&value) || attempts > 40 {
                seen_values.push(value);
                equations.push(Equation {
                    id: format!("lvl{}-eq{}-{}", level, i, attempts),
                    text,
                    value,
                    color: COLORS[i % COLORS.len()],
                });
                break;
            }
        }
    }

    equations
}
