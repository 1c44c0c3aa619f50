use std::process::ExitCode;

fn main() -> ExitCode {
    match spiral_galaxy::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("spiral-galaxy: {err}");
            ExitCode::FAILURE
        }
    }
}
