use crate::error::SolveError;
use crate::rational::Rational;

/// Result of reducing a [`LinearSystem`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Echelon {
    /// Pivot columns in increasing order, one per elimination step.
    Consistent { pivot_cols: Vec<usize> },
    /// Some row reduced to `0 = b` with `b != 0`.
    Inconsistent,
}

#[derive(Debug, Clone)]
pub struct LinearSystem {
    /// Augmented matrix [A | b]; in Reduced Row Echelon Form after `rref`.
    matrix: Vec<Vec<Rational>>,
    num_vars: usize,
    num_eqs: usize,
}

impl LinearSystem {
    /// Each row holds `num_vars` coefficients followed by the right-hand side.
    pub fn new(matrix: Vec<Vec<Rational>>, num_vars: usize) -> Self {
        debug_assert!(matrix.iter().all(|row| row.len() == num_vars + 1));
        let num_eqs = matrix.len();
        Self {
            matrix,
            num_vars,
            num_eqs,
        }
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    pub fn num_eqs(&self) -> usize {
        self.num_eqs
    }

    pub fn coeff(&self, row: usize, col: usize) -> Rational {
        self.matrix[row][col]
    }

    pub fn rhs(&self, row: usize) -> Rational {
        self.matrix[row][self.num_vars]
    }

    /// Gauss-Jordan elimination over the rationals, in place.
    ///
    /// Pivot row `i` ends up describing the variable `pivot_cols[i]` with a
    /// leading 1, and every other row is zero in that column.
    pub fn rref(&mut self) -> Result<Echelon, SolveError> {
        let mut pivot_row = 0;
        let mut pivot_cols = Vec::new();

        for c in 0..self.num_vars {
            if pivot_row >= self.num_eqs {
                break;
            }

            let Some(r) = (pivot_row..self.num_eqs).find(|&r| !self.matrix[r][c].is_zero()) else {
                continue;
            };
            self.matrix.swap(pivot_row, r);

            // Entries left of `c` are already zero in this row
            let pivot = self.matrix[pivot_row][c];
            for v in &mut self.matrix[pivot_row][c..] {
                *v = v.checked_div(pivot).ok_or(SolveError::Overflow)?;
            }

            let pivot_vec = self.matrix[pivot_row].clone();
            for (i, row) in self.matrix.iter_mut().enumerate() {
                if i == pivot_row || row[c].is_zero() {
                    continue;
                }
                let factor = row[c];
                for (v, &p) in row[c..].iter_mut().zip(&pivot_vec[c..]) {
                    let scaled = p.checked_mul(factor).ok_or(SolveError::Overflow)?;
                    *v = v.checked_sub(scaled).ok_or(SolveError::Overflow)?;
                }
            }

            pivot_cols.push(c);
            pivot_row += 1;
        }

        // 0 = b with b != 0
        let n = self.num_vars;
        let inconsistent = self
            .matrix
            .iter()
            .any(|row| row[..n].iter().all(|v| v.is_zero()) && !row[n].is_zero());
        if inconsistent {
            return Ok(Echelon::Inconsistent);
        }

        Ok(Echelon::Consistent { pivot_cols })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn system(rows: &[&[i64]]) -> LinearSystem {
        let num_vars = rows.first().map_or(0, |r| r.len() - 1);
        let matrix = rows
            .iter()
            .map(|r| r.iter().map(|&v| Rational::from(v)).collect())
            .collect();
        LinearSystem::new(matrix, num_vars)
    }

    #[rstest]
    #[case(&[&[1, 0, 0, 4][..], &[0, 1, 0, 5], &[0, 0, 1, 6]], 3)]
    #[case(&[&[0, 2, 8][..], &[3, 0, 9]], 2)]
    #[case(&[&[1, 1, 3][..], &[1, -1, 1]], 2)]
    fn full_rank_systems_pivot_every_column(
        #[case] rows: &[&[i64]],
        #[case] cols: usize,
    ) -> miette::Result<()> {
        let mut sys = system(rows);
        assert_eq!(
            sys.rref()?,
            Echelon::Consistent {
                pivot_cols: (0..cols).collect()
            }
        );
        for (i, c) in (0..cols).enumerate() {
            assert_eq!(sys.coeff(i, c), Rational::ONE);
        }
        Ok(())
    }

    #[test]
    fn zero_row_with_nonzero_rhs_is_inconsistent() -> miette::Result<()> {
        let mut sys = system(&[&[1, 1, 2], &[0, 0, 3]]);
        assert_eq!(sys.rref()?, Echelon::Inconsistent);
        Ok(())
    }

    #[test]
    fn contradictory_rows_are_inconsistent() -> miette::Result<()> {
        let mut sys = system(&[&[1, 1, 2], &[2, 2, 5]]);
        assert_eq!(sys.rref()?, Echelon::Inconsistent);
        Ok(())
    }

    #[test]
    fn dependent_column_is_left_free() -> miette::Result<()> {
        // x0 + x1 = 3, x1 + x2 = 5, x0 - x2 = -2 (third row is redundant)
        let mut sys = system(&[&[1, 1, 0, 3], &[0, 1, 1, 5], &[1, 0, -1, -2]]);
        assert_eq!(
            sys.rref()?,
            Echelon::Consistent {
                pivot_cols: vec![0, 1]
            }
        );
        assert_eq!(sys.rhs(0), Rational::from(-2));
        assert_eq!(sys.coeff(0, 2), Rational::from(-1));
        assert_eq!(sys.rhs(1), Rational::from(5));
        assert_eq!(sys.coeff(1, 2), Rational::ONE);
        assert_eq!(sys.rhs(2), Rational::ZERO);
        Ok(())
    }

    #[test]
    fn solutions_stay_exact() -> miette::Result<()> {
        // 3x = 1, 3y = 2
        let mut sys = system(&[&[3, 0, 1], &[0, 3, 2]]);
        sys.rref()?;
        assert_eq!(sys.rhs(0), Rational::new(1, 3));
        assert_eq!(sys.rhs(1), Rational::new(2, 3));
        Ok(())
    }
}
