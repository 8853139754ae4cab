//! User-facing console lines. Colors only when the stream is a TTY.

use owo_colors::OwoColorize;

fn is_tty(stream: atty::Stream) -> bool {
    atty::is(stream)
}

/// Warning on stderr (e.g. file logging could not be enabled).
pub fn print_warn(msg: &str) {
    if is_tty(atty::Stream::Stderr) {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

/// Fatal condition on stderr.
pub fn print_error(msg: &str) {
    if is_tty(atty::Stream::Stderr) {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

/// Plain progress line on stdout, one per copied file.
pub fn print_user(msg: &str) {
    println!("{}", msg);
}
