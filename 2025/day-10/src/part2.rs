use miette::*;
use rayon::prelude::*;

use crate::error::SolveError;
use crate::parser;

#[tracing::instrument(skip(input))]
pub fn process(input: &str) -> Result<String> {
    let machines = parser::parse(input)?;

    // Machines are independent; each maps to its fewest joltage presses
    let presses = machines
        .par_iter()
        .enumerate()
        .map(|(i, m)| {
            m.minimum_press_sum()?
                .ok_or(SolveError::Unsolvable { machine: i + 1 })
        })
        .collect::<Result<Vec<usize>, SolveError>>()?;

    tracing::info!(machines = presses.len(), "joltage counters configured");
    let total: usize = presses.iter().sum();

    Ok(total.to_string())
}
