use miette::*;
use rayon::prelude::*;

use crate::error::SolveError;
use crate::parser;

#[tracing::instrument(skip(input))]
pub fn process(input: &str) -> Result<String> {
    let machines = parser::parse(input)?;

    // Machines are independent; each maps to its fewest toggles
    let presses = machines
        .par_iter()
        .enumerate()
        .map(|(i, m)| {
            m.minimum_subset_size()?
                .ok_or(SolveError::Unsolvable { machine: i + 1 })
        })
        .collect::<Result<Vec<usize>, SolveError>>()?;

    tracing::info!(machines = presses.len(), "indicator lights configured");
    let total: usize = presses.iter().sum();

    Ok(total.to_string())
}
