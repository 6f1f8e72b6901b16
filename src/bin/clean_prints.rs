use debug_strip::cli::command;
use structopt::StructOpt;

fn main() {
    command::clean_prints(command::CommandCleanPrints::from_args());
}
