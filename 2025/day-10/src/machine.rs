use crate::error::SolveError;
use crate::rational::Rational;
use crate::rref::LinearSystem;
use crate::{lights, presses};

/// Widest indicator diagram a machine can have; one bit per light in a `u16`.
pub const MAX_WIDTH: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    /// Lights toggled by one press, bit `i` for light `i`.
    pub lights: u16,
    /// How much one press raises each joltage counter.
    pub increments: Vec<u32>,
}

impl Button {
    /// A button wired to the given light/counter indices, each raised by one.
    pub fn from_indices(indices: &[usize], counters: usize) -> Self {
        let mut lights = 0u16;
        let mut increments = vec![0; counters];
        for &i in indices {
            if i < MAX_WIDTH {
                lights |= 1 << i;
            }
            if let Some(inc) = increments.get_mut(i) {
                *inc = 1;
            }
        }
        Self { lights, increments }
    }
}

/// One line of the manual: indicator target, buttons and joltage targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    desired: u16,
    width: usize,
    buttons: Vec<Button>,
    targets: Vec<u32>,
}

impl Machine {
    pub fn new(
        desired: u16,
        width: usize,
        buttons: Vec<Button>,
        targets: Vec<u32>,
    ) -> Result<Self, SolveError> {
        if width > MAX_WIDTH {
            return Err(SolveError::InvalidMachine(format!(
                "diagram has {width} lights, at most {MAX_WIDTH} are supported"
            )));
        }
        let mask = if width == MAX_WIDTH {
            u16::MAX
        } else {
            (1u16 << width) - 1
        };
        if desired & !mask != 0 {
            return Err(SolveError::InvalidMachine(format!(
                "desired pattern {desired:#b} is wider than {width} lights"
            )));
        }
        for (b, button) in buttons.iter().enumerate() {
            if button.increments.len() != targets.len() {
                return Err(SolveError::InvalidMachine(format!(
                    "button {b} drives {} counters, but there are {} targets",
                    button.increments.len(),
                    targets.len()
                )));
            }
            if button.lights & !mask != 0 {
                return Err(SolveError::InvalidMachine(format!(
                    "button {b} toggles a light outside the {width}-light diagram"
                )));
            }
        }

        Ok(Self {
            desired,
            width,
            buttons,
            targets,
        })
    }

    pub fn desired(&self) -> u16 {
        self.desired
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn targets(&self) -> &[u32] {
        &self.targets
    }

    /// Fewest buttons, each pressed at most once, that light exactly the
    /// desired pattern. `None` if no subset does.
    pub fn minimum_subset_size(&self) -> Result<Option<usize>, SolveError> {
        let masks: Vec<u16> = self.buttons.iter().map(|b| b.lights).collect();
        lights::minimum_subset_size(self.desired, &masks)
    }

    /// Fewest total presses that bring every counter exactly to its target.
    /// `None` if the targets cannot be reached.
    pub fn minimum_press_sum(&self) -> Result<Option<usize>, SolveError> {
        presses::minimum_press_sum(self)
    }

    /// Most presses a button could take before overshooting some counter it
    /// raises. A button that raises nothing is capped at zero.
    pub fn press_bound(&self, button: usize) -> u32 {
        self.buttons[button]
            .increments
            .iter()
            .zip(&self.targets)
            .filter(|&(&inc, _)| inc > 0)
            .map(|(_, &target)| target)
            .min()
            .unwrap_or(0)
    }

    /// `A x = t` with one row per counter and one column per button.
    pub fn augmented_system(&self) -> LinearSystem {
        let num_vars = self.buttons.len();
        let rows = self
            .targets
            .iter()
            .enumerate()
            .map(|(counter, &target)| {
                self.buttons
                    .iter()
                    .map(|b| Rational::from(i64::from(b.increments[counter])))
                    .chain(std::iter::once(Rational::from(i64::from(target))))
                    .collect()
            })
            .collect();
        LinearSystem::new(rows, num_vars)
    }
}
