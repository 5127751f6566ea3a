use crate::cli::MessageArgs;
use crate::error::Result;
use crate::links::LinkFormatter;
use crate::output;

pub fn run(args: &MessageArgs, links: LinkFormatter) -> Result<()> {
    let message = super::load_message(args, links)?;
    output::print_json(&message);
    Ok(())
}
