use std::process::ExitCode;

use merge_mv::app::{self, EXIT_SETUP};
use merge_mv::{TransferMode, cli, output as out};

fn main() -> ExitCode {
    let args = cli::parse();
    match app::run(args, TransferMode::Move) {
        Ok(code) => code,
        Err(e) => {
            out::print_error(&format!("{e:#}"));
            ExitCode::from(EXIT_SETUP)
        }
    }
}
