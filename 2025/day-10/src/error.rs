use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::lights::MAX_SUBSET_BUTTONS;
use crate::presses::MAX_FREE_VARS;

/// Fatal outcomes of solving a machine.
///
/// Infeasibility is not one of them: the searches report it as `None`.
#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum SolveError {
    #[error("found {count} free variables, but the press search handles at most {}", MAX_FREE_VARS)]
    #[diagnostic(
        code(day10::unsupported_free_variables),
        help("the machine has more degrees of freedom than the exhaustive search was validated for")
    )]
    UnsupportedFreeVariableCount { count: usize },

    #[error("machine has {count} buttons, but subset enumeration handles at most {}", MAX_SUBSET_BUTTONS)]
    #[diagnostic(code(day10::too_many_buttons))]
    TooManyButtons { count: usize },

    #[error("rational arithmetic overflowed")]
    #[diagnostic(code(day10::overflow))]
    Overflow,

    #[error("invalid machine: {0}")]
    #[diagnostic(code(day10::invalid_machine))]
    InvalidMachine(String),

    /// `machine` counts non-empty input lines from 1.
    #[error("machine #{machine} has no solution")]
    #[diagnostic(
        code(day10::unsolvable),
        help("well-formed puzzle input always has a reachable configuration")
    )]
    Unsolvable { machine: usize },
}

#[derive(Debug, Error, Diagnostic)]
#[error("malformed machine description")]
#[diagnostic(code(day10::malformed_input))]
pub struct MalformedInput {
    #[source_code]
    pub src: String,
    #[label("{reason}")]
    pub span: SourceSpan,
    pub reason: String,
}
