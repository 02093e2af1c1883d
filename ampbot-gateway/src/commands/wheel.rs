//! Wheel of fortune: pick one of a comma-separated list of options.

use rand::Rng;

use crate::command::{
    ArgValue, Args, CallerContext, CommandError, CommandHandler, CommandSpec, ParamSpec, Payload,
    WheelOption,
};

const OPTIONS_PARAM: &str = "options";

pub struct WheelCommand;

#[async_trait::async_trait]
impl CommandHandler for WheelCommand {
    async fn run(&self, args: &Args, _caller: &CallerContext) -> Result<Payload, CommandError> {
        let options = args.options(OPTIONS_PARAM)?;
        let options = spin(options, &mut rand::thread_rng())?;
        Ok(Payload::Wheel { options })
    }
}

/// Split on commas, trim and drop empty options.
pub fn parse_options(raw: &str) -> Result<ArgValue, String> {
    let options: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|option| !option.is_empty())
        .map(str::to_string)
        .collect();
    if options.is_empty() {
        return Err("at least one option required".to_string());
    }
    Ok(ArgValue::Options(options))
}

/// Flag exactly one option, chosen uniformly, as the winner. Input order is kept.
pub fn spin<R: Rng + ?Sized>(
    options: &[String],
    rng: &mut R,
) -> Result<Vec<WheelOption>, CommandError> {
    if options.is_empty() {
        return Err(CommandError::Validation(
            "at least one option required".to_string(),
        ));
    }
    let winner = rng.gen_range(0..options.len());
    Ok(options
        .iter()
        .enumerate()
        .map(|(position, label)| WheelOption {
            label: label.clone(),
            is_winner: position == winner,
        })
        .collect())
}

pub fn spec() -> CommandSpec {
    CommandSpec::new(
        "wheel",
        "Spin the wheel and pick one of the comma-separated options.",
        WheelCommand,
    )
    .alias("ruota")
    .param(
        ParamSpec::text(OPTIONS_PARAM, "Comma-separated options, e.g. `pizza, sushi`")
            .greedy()
            .with_parser(parse_options),
    )
}
