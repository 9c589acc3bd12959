//! Reaction equation strings.
//!
//! An equation lists reactants and products separated by an arrow:
//!
//! - `<=>` or `=`: reversible
//! - `=>`: irreversible
//!
//! Terms are separated by ` + ` (a plus sign with whitespace on both sides,
//! so ion names such as `N2+` survive). A term is an optional integer
//! coefficient followed by a species name: `2 O`, `2O`, or `N2`. The name `M`
//! stands for a generic third body and may appear once on each side.

use regex::Regex;

use super::MechanismError;

const THIRD_BODY: &str = "M";

/// One species on one side of an equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Participant {
    pub species: usize,
    pub coefficient: u32,
}

/// A parsed reaction equation.
///
/// Repeated species on one side are merged, so `N2 + N2` becomes one
/// participant with coefficient 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
    pub reactants: Vec<Participant>,
    pub products: Vec<Participant>,
    pub reversible: bool,
    pub third_body: bool,
}

impl Equation {
    /// Change in moles of gas, `Σν_products − Σν_reactants`, excluding `M`.
    #[must_use]
    pub fn delta_nu(&self) -> i32 {
        let sum = |side: &[Participant]| side.iter().map(|p| p.coefficient as i32).sum::<i32>();
        sum(&self.products) - sum(&self.reactants)
    }
}

pub(crate) struct EquationParser {
    arrow: Regex,
    separator: Regex,
    term: Regex,
}

impl EquationParser {
    pub(crate) fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            arrow: Regex::new(r"<=>|=>|=")?,
            separator: Regex::new(r"\s+\+\s+")?,
            term: Regex::new(r"^(?:(\d+)\s*)?([A-Za-z][A-Za-z0-9_()+\-]*)$")?,
        })
    }

    pub(crate) fn parse(&self, equation: &str, species: &[&str]) -> Result<Equation, MechanismError> {
        let arrows: Vec<_> = self.arrow.find_iter(equation).collect();
        let [arrow] = arrows.as_slice() else {
            return Err(MechanismError::equation(
                equation,
                format!("expected exactly one arrow, found {}", arrows.len()),
            ));
        };
        let reversible = arrow.as_str() != "=>";
        let lhs = &equation[..arrow.start()];
        let rhs = &equation[arrow.end()..];

        let (reactants, m_left) = self.side(equation, lhs, species)?;
        let (products, m_right) = self.side(equation, rhs, species)?;
        if m_left != m_right {
            return Err(MechanismError::equation(
                equation,
                "third body M must appear on both sides",
            ));
        }

        Ok(Equation {
            reactants,
            products,
            reversible,
            third_body: m_left,
        })
    }

    fn side(
        &self,
        equation: &str,
        text: &str,
        species: &[&str],
    ) -> Result<(Vec<Participant>, bool), MechanismError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(MechanismError::equation(equation, "empty side"));
        }

        let mut participants: Vec<Participant> = Vec::new();
        let mut third_body = false;
        for term in self.separator.split(text) {
            let captures = self.term.captures(term.trim()).ok_or_else(|| {
                MechanismError::equation(equation, format!("cannot read term `{term}`"))
            })?;
            let coefficient = match captures.get(1) {
                Some(digits) => digits.as_str().parse::<u32>().map_err(|err| {
                    MechanismError::equation(equation, format!("bad coefficient: {err}"))
                })?,
                None => 1,
            };
            if coefficient == 0 {
                return Err(MechanismError::equation(equation, "zero coefficient"));
            }
            let name = captures.get(2).map_or("", |m| m.as_str());

            if name == THIRD_BODY {
                if third_body || coefficient != 1 {
                    return Err(MechanismError::equation(
                        equation,
                        "third body M may appear once per side",
                    ));
                }
                third_body = true;
                continue;
            }

            let index = species.iter().position(|s| *s == name).ok_or_else(|| {
                MechanismError::UnknownSpecies {
                    equation: equation.to_string(),
                    species: name.to_string(),
                }
            })?;
            match participants.iter_mut().find(|p| p.species == index) {
                Some(existing) => existing.coefficient += coefficient,
                None => participants.push(Participant {
                    species: index,
                    coefficient,
                }),
            }
        }

        if participants.is_empty() {
            return Err(MechanismError::equation(equation, "a side needs at least one species"));
        }
        Ok((participants, third_body))
    }
}

/// Parses `equation` against an ordered list of species names.
///
/// # Errors
///
/// Returns [`MechanismError::Equation`] for malformed text and
/// [`MechanismError::UnknownSpecies`] for names not in `species`.
pub fn parse_equation(equation: &str, species: &[&str]) -> Result<Equation, MechanismError> {
    let parser = EquationParser::new()
        .map_err(|err| MechanismError::equation(equation, format!("parser setup: {err}")))?;
    parser.parse(equation, species)
}
