use std::process::ExitCode;

fn main() -> ExitCode {
    axion_limits::telemetry::init_tracing();

    match axion_limits::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
