use std::process::ExitCode;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = file_sorter::cli::parse();
    app::run(args)
}
