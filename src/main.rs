use std::process::ExitCode;

use move_hide::{output as out, MoveHideError};

mod app;
mod logging;

fn main() -> ExitCode {
    let args = move_hide::cli::parse();
    match app::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            out::print_error(&format!("{e:#}"));
            let code = e
                .downcast_ref::<MoveHideError>()
                .map(|m| m.code())
                .unwrap_or(1);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
