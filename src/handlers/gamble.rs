//! `!gamble <option> <option> ...` picks one option at random.

use super::context::{Context, Handler, Outcome};
use crate::protocol::normalize_command;
use rand::seq::SliceRandom;

pub struct GambleHandler;

impl Handler for GambleHandler {
    fn name(&self) -> &'static str {
        "gamble"
    }

    fn process(
        &self,
        _ctx: &mut Context<'_>,
        sender: &str,
        message: &str,
        _raw_line: &str,
    ) -> Outcome {
        let message = normalize_command(message);
        let mut args = message.split_whitespace();
        match args.next() {
            Some(cmd) if cmd.eq_ignore_ascii_case("!gamble") => {}
            _ => return Outcome::Pass,
        }

        let options: Vec<&str> = args.collect();
        if options.len() < 2 {
            return Outcome::Reply(format!(
                "{}, usage: !gamble <option1> <option2> ...",
                sender
            ));
        }

        match options.choose(&mut rand::thread_rng()) {
            Some(chosen) => Outcome::Reply(format!("{} gambled and won: {} 🎲", sender, chosen)),
            None => Outcome::Pass,
        }
    }
}
