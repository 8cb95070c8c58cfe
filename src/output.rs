//! User-facing console lines.
//! Colors are enabled only when the target stream is a TTY. Tracing logs go to
//! stderr separately; these are the lines people read and scripts parse.

use owo_colors::OwoColorize;

fn stdout_is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn stderr_is_tty() -> bool {
    atty::is(atty::Stream::Stderr)
}

pub fn print_warn(msg: &str) {
    if stderr_is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if stderr_is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if stdout_is_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// Interactive question; no newline so the answer lands on the same line.
pub fn print_prompt(question: &str) {
    if stderr_is_tty() {
        eprint!("{} {} [y/N] ", "?".magenta().bold(), question);
    } else {
        eprint!("? {} [y/N] ", question);
    }
}

/// One planned action in dry-run output: `<verb> <src> -> <dest>`.
pub fn print_plan_line(verb: &str, src: &str, dest: &str) {
    if stdout_is_tty() {
        println!("{:>8} {} -> {}", verb.bold(), src, dest);
    } else {
        println!("{:>8} {} -> {}", verb, src, dest);
    }
}
