use crate::error::SolveError;

/// Most buttons the subset enumeration accepts.
///
/// Set by the width of the `u64` subset index, not by the search itself.
/// Work is `2^k` XORs for `k` buttons.
pub const MAX_SUBSET_BUTTONS: usize = 32;

/// Fewest buttons whose toggles XOR to `desired`, each pressed at most once.
///
/// Every one of the `2^k` subsets is visited in Gray-code order, so moving
/// from one subset to the next flips exactly one button: a single XOR on the
/// running pattern and a ±1 on the running subset size.
///
/// Returns `None` when no subset lights exactly `desired`.
pub fn minimum_subset_size(desired: u16, buttons: &[u16]) -> Result<Option<usize>, SolveError> {
    let k = buttons.len();
    if k > MAX_SUBSET_BUTTONS {
        return Err(SolveError::TooManyButtons { count: k });
    }

    // The empty subset
    if desired == 0 {
        return Ok(Some(0));
    }

    let mut lights = 0u16;
    let mut pressed = 0u64;
    let mut size = 0usize;
    let mut best: Option<usize> = None;

    for i in 1..(1u64 << k) {
        // Bit that differs between gray(i - 1) and gray(i)
        let b = i.trailing_zeros();
        lights ^= buttons[b as usize];
        pressed ^= 1 << b;
        if pressed & (1 << b) != 0 {
            size += 1;
        } else {
            size -= 1;
        }

        if lights == desired && best.map_or(true, |best| size < best) {
            best = Some(size);
        }
    }

    debug_assert_eq!(size, pressed.count_ones() as usize);
    Ok(best)
}
