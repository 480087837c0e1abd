use std::process::ExitCode;

fn main() -> ExitCode {
    zenbmp::cli::compare_main()
}
