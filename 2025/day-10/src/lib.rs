pub mod error;
pub mod lights;
pub mod machine;
pub mod parser;
pub mod presses;
pub mod rational;
pub mod rref;

pub mod part1;
pub mod part2;
