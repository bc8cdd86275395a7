use std::process::ExitCode;

fn main() -> ExitCode {
    visita_cli::run()
}
