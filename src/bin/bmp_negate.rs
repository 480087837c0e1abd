use std::process::ExitCode;

fn main() -> ExitCode {
    zenbmp::cli::negate_main()
}
