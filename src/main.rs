//! seer-icongen - renders the Seer extension icon set
//!
//! Locates a system font with CJK coverage, draws the extension kanji onto
//! rounded blue tiles and writes `icon16.png`, `icon48.png` and
//! `icon128.png` into the `icons/` directory next to the extension
//! manifest.

mod font;
mod generate;
mod glyph;
mod icon;
mod logging;

/// Process exit codes
mod exit_codes {
    pub const SUCCESS: i32 = 0;
    /// No candidate font exists on this system.
    pub const NO_FONT: i32 = 1;
    pub const UNEXPECTED_FAILURE: i32 = 2;
}

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    if let Err(e) = logging::init() {
        eprintln!("Failed to initialize logging: {}", e);
        return exit_codes::UNEXPECTED_FAILURE;
    }

    match generate::run(&generate::default_output_dir()) {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            let code = exit_code_for(&e);
            if code == exit_codes::NO_FONT {
                eprintln!("Please install a Japanese font and try again.");
            }
            code
        }
    }
}

/// Map a driver error to the exit code the process should end with.
fn exit_code_for(err: &generate::GenerateError) -> i32 {
    match err {
        generate::GenerateError::Font(font::FontError::NotFound) => exit_codes::NO_FONT,
        _ => exit_codes::UNEXPECTED_FAILURE,
    }
}
