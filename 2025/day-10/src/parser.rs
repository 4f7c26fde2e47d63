use chumsky::prelude::*;
use miette::Result;

use crate::error::MalformedInput;
use crate::machine::{Button, Machine, MAX_WIDTH};

fn number<'a, T>() -> impl Parser<'a, &'a str, T, extra::Err<Rich<'a, char>>> + Clone
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    text::int(10).try_map(|s: &str, span| s.parse::<T>().map_err(|e| Rich::custom(span, e)))
}

fn parser<'a>() -> impl Parser<'a, &'a str, Vec<Machine>, extra::Err<Rich<'a, char>>> {
    let hspace = one_of(" \t").repeated();

    let light = choice((just('.').to(false), just('#').to(true)));

    // [.##.]
    let diagram = light
        .repeated()
        .at_least(1)
        .collect::<Vec<bool>>()
        .delimited_by(just('['), just(']'));

    // (0,2,3)
    let button = number::<usize>()
        .separated_by(just(','))
        .at_least(1)
        .collect::<Vec<usize>>()
        .delimited_by(just('('), just(')'));

    // {3,5,4}
    let targets = number::<u32>()
        .separated_by(just(','))
        .at_least(1)
        .collect::<Vec<u32>>()
        .delimited_by(just('{'), just('}'));

    let machine = diagram
        .then_ignore(hspace)
        .then(button.then_ignore(hspace).repeated().collect::<Vec<_>>())
        .then(targets)
        .try_map(|((lights, buttons), targets), span| {
            let width = lights.len();
            if width > MAX_WIDTH {
                return Err(Rich::custom(
                    span,
                    format!("diagram has {width} lights, at most {MAX_WIDTH} are supported"),
                ));
            }

            let counters = targets.len();
            if let Some(&i) = buttons.iter().flatten().find(|&&i| i >= width || i >= counters) {
                return Err(Rich::custom(
                    span,
                    format!("button index {i} is outside {width} lights and {counters} counters"),
                ));
            }

            let desired = lights
                .iter()
                .enumerate()
                .filter(|&(_, &on)| on)
                .fold(0u16, |acc, (i, _)| acc | 1 << i);
            let buttons = buttons
                .iter()
                .map(|idx| Button::from_indices(idx, counters))
                .collect();

            Machine::new(desired, width, buttons, targets).map_err(|e| Rich::custom(span, e))
        })
        .padded_by(hspace);

    // Blank lines between machines are skipped, whitespace-only ones too
    let newlines = hspace.then(text::newline()).repeated().at_least(1);

    machine
        .separated_by(newlines)
        .allow_leading()
        .allow_trailing()
        .collect::<Vec<Machine>>()
        .then_ignore(hspace)
}

/// Parses one machine per non-empty line.
pub fn parse(input: &str) -> Result<Vec<Machine>> {
    parser().parse(input).into_result().map_err(|errs| {
        // Report the first error; later ones are usually knock-on failures
        let (span, reason) = errs
            .first()
            .map(|e| (e.span().start..e.span().end, e.to_string()))
            .unwrap_or((0..0, "unknown parse failure".to_string()));
        MalformedInput {
            src: input.to_string(),
            span: span.into(),
            reason,
        }
        .into()
    })
}
