use std::process::ExitCode;

fn main() -> ExitCode {
    match wooflat::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            wooflat::ui::output::error(format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
