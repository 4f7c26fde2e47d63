//! Minimum total presses for the joltage counters.
//!
//! The counters give an underdetermined system `A x = t` over the buttons.
//! After exact elimination every pivot variable is an affine function of the
//! free variables, so the integer program reduces to enumerating the free
//! variables inside their press bounds and keeping the cheapest assignment
//! whose pivots all come out as non-negative integers.

use crate::error::SolveError;
use crate::machine::Machine;
use crate::rational::Rational;
use crate::rref::{Echelon, LinearSystem};

/// Highest number of free variables the exhaustive search accepts.
///
/// Puzzle inputs seen so far never need more than this; the product of the
/// press bounds grows too fast to go further blindly.
pub const MAX_FREE_VARS: usize = 3;

/// The reduced system, split into `x_p = rhs - coeff * x_free`.
struct PressSearch {
    rhs: Vec<Rational>,
    /// `coeff[i][f]`: entry of pivot row `i` in free column `free_cols[f]`.
    coeff: Vec<Vec<Rational>>,
    /// Inclusive upper bound per free variable.
    bounds: Vec<u32>,
    /// Current assignment of the free variables.
    free: Vec<u32>,
    best: Option<usize>,
}

impl PressSearch {
    fn new(system: &LinearSystem, pivot_cols: &[usize], machine: &Machine) -> Self {
        let free_cols: Vec<usize> = (0..system.num_vars())
            .filter(|c| !pivot_cols.contains(c))
            .collect();

        let rhs = (0..pivot_cols.len()).map(|i| system.rhs(i)).collect();
        let coeff = (0..pivot_cols.len())
            .map(|i| free_cols.iter().map(|&c| system.coeff(i, c)).collect())
            .collect();
        let bounds = free_cols.iter().map(|&c| machine.press_bound(c)).collect();

        Self {
            rhs,
            coeff,
            bounds,
            free: vec![0; free_cols.len()],
            best: None,
        }
    }

    fn beats_best(&self, total: usize) -> bool {
        self.best.map_or(true, |best| total < best)
    }

    /// Assigns free variable `depth` every value in its range, then recurses.
    /// `partial` is the sum of the already assigned free variables.
    fn enumerate(&mut self, depth: usize, partial: usize) -> Result<(), SolveError> {
        if depth == self.free.len() {
            return self.evaluate(partial);
        }

        for v in 0..=self.bounds[depth] {
            let partial = partial + v as usize;
            // Larger values only push the sum further up
            if !self.beats_best(partial) {
                break;
            }
            self.free[depth] = v;
            self.enumerate(depth + 1, partial)?;
        }
        self.free[depth] = 0;
        Ok(())
    }

    /// Derives the pivot variables for the current free assignment and
    /// records the total if every one is a non-negative integer.
    fn evaluate(&mut self, free_sum: usize) -> Result<(), SolveError> {
        let mut total = free_sum;

        for (rhs, coeffs) in self.rhs.iter().zip(&self.coeff) {
            let mut value = *rhs;
            for (&c, &x) in coeffs.iter().zip(&self.free) {
                if x == 0 || c.is_zero() {
                    continue;
                }
                let term = c
                    .checked_mul(Rational::from(i64::from(x)))
                    .ok_or(SolveError::Overflow)?;
                value = value.checked_sub(term).ok_or(SolveError::Overflow)?;
            }

            let presses = match value.to_integer() {
                Some(n) if n >= 0 => n as usize,
                _ => return Ok(()),
            };
            total += presses;
            if !self.beats_best(total) {
                return Ok(());
            }
        }

        self.best = Some(total);
        Ok(())
    }
}

/// Fewest presses reaching every joltage target exactly, or `None` when no
/// non-negative integer combination of the buttons does.
#[tracing::instrument(level = "debug", skip_all, fields(buttons = machine.buttons().len()))]
pub fn minimum_press_sum(machine: &Machine) -> Result<Option<usize>, SolveError> {
    let mut system = machine.augmented_system();

    let pivot_cols = match system.rref()? {
        Echelon::Consistent { pivot_cols } => pivot_cols,
        Echelon::Inconsistent => {
            tracing::debug!("joltage system is inconsistent");
            return Ok(None);
        }
    };

    let free_count = system.num_vars() - pivot_cols.len();
    tracing::debug!(pivots = pivot_cols.len(), free = free_count, "reduced joltage system");
    if free_count > MAX_FREE_VARS {
        return Err(SolveError::UnsupportedFreeVariableCount { count: free_count });
    }

    let mut search = PressSearch::new(&system, &pivot_cols, machine);
    search.enumerate(0, 0)?;

    tracing::debug!(best = ?search.best, "press search finished");
    Ok(search.best)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::machine::Button;
    use rstest::rstest;

    fn machine(buttons: &[&[usize]], targets: &[u32]) -> Machine {
        let counters = targets.len();
        let buttons = buttons
            .iter()
            .map(|idx| Button::from_indices(idx, counters))
            .collect();
        Machine::new(0, counters, buttons, targets.to_vec()).unwrap()
    }

    #[test]
    fn single_button_covering_both_counters() -> miette::Result<()> {
        assert_eq!(minimum_press_sum(&machine(&[&[0, 1]], &[3, 3]))?, Some(3));
        Ok(())
    }

    #[test]
    fn independent_buttons_have_no_free_variables() -> miette::Result<()> {
        let m = machine(&[&[0], &[1]], &[4, 2]);
        let mut system = m.augmented_system();
        assert_eq!(
            system.rref()?,
            Echelon::Consistent {
                pivot_cols: vec![0, 1]
            }
        );
        assert_eq!(minimum_press_sum(&m)?, Some(6));
        Ok(())
    }

    #[test]
    fn inconsistent_system_is_unreachable() -> miette::Result<()> {
        // One button raising both counters cannot make them differ
        assert_eq!(minimum_press_sum(&machine(&[&[0, 1]], &[3, 4]))?, None);
        Ok(())
    }

    #[test]
    fn unique_solution_must_be_non_negative() -> miette::Result<()> {
        // x0 + x1 = 1, x1 = 2 forces x0 = -1
        assert_eq!(minimum_press_sum(&machine(&[&[0], &[0, 1]], &[1, 2]))?, None);
        Ok(())
    }

    #[test]
    fn unique_solution_must_be_integral() -> miette::Result<()> {
        let m = Machine::new(
            0,
            1,
            vec![Button {
                lights: 0,
                increments: vec![2],
            }],
            vec![3],
        )?;
        assert_eq!(minimum_press_sum(&m)?, None);
        Ok(())
    }

    #[test]
    fn free_variable_trades_presses() -> miette::Result<()> {
        // (0) (1) (0,1) with targets {2,3}: pressing (0,1) twice and (1) once
        assert_eq!(
            minimum_press_sum(&machine(&[&[0], &[1], &[0, 1]], &[2, 3]))?,
            Some(3)
        );
        Ok(())
    }

    #[test]
    fn non_unit_increments_are_supported() -> miette::Result<()> {
        let m = Machine::new(
            0,
            2,
            vec![
                Button {
                    lights: 0,
                    increments: vec![2, 1],
                },
                Button {
                    lights: 0,
                    increments: vec![1, 0],
                },
                Button {
                    lights: 0,
                    increments: vec![0, 1],
                },
            ],
            vec![6, 3],
        )?;
        assert_eq!(minimum_press_sum(&m)?, Some(3));
        Ok(())
    }

    #[test]
    fn three_free_variables_are_searched() -> miette::Result<()> {
        // One pivot and three free copies of the same button
        let buttons: Vec<&[usize]> = vec![&[0][..]; 4];
        assert_eq!(minimum_press_sum(&machine(&buttons, &[2]))?, Some(2));
        Ok(())
    }

    #[test]
    fn too_many_free_variables_is_fatal() {
        let buttons: Vec<&[usize]> = vec![&[0][..]; 5];
        assert_eq!(
            minimum_press_sum(&machine(&buttons, &[2])),
            Err(SolveError::UnsupportedFreeVariableCount { count: 4 })
        );
    }

    #[rstest]
    #[case("[.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}", 10)]
    #[case("[...#.] (0,2,3,4) (2,3) (0,4) (0,1,2) (1,2,3,4) {7,5,12,7,2}", 12)]
    #[case("[.###.#] (0,1,2,3,4) (0,3,4) (0,1,2,4,5) (1,2) {10,11,11,5,10,5}", 11)]
    fn sample_machines(#[case] line: &str, #[case] expected: usize) -> miette::Result<()> {
        let machines = crate::parser::parse(line)?;
        assert_eq!(minimum_press_sum(&machines[0])?, Some(expected));
        Ok(())
    }
}
