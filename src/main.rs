use debug_strip::cli::command;
use structopt::StructOpt;

fn main() {
    command::strip(command::CommandStrip::from_args());
}
