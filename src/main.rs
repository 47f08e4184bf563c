use std::env;
use std::path::Path;
use std::process::ExitCode;

use crc32_embed::{embed, EmbedOutcome};

/// Exit codes: 0 for a found fixed point or a completed-but-empty search
/// (exhaustion is a valid negative answer), 1 for usage, read, placeholder,
/// or write failures.
fn main() -> ExitCode {
    // Control log level with RUST_LOG env var:
    //   RUST_LOG=debug ./crc32-embed file.bin
    crc32_embed::logging::init();

    let Some(path) = env::args().nth(1) else {
        eprintln!("Usage: crc32-embed <file_path>");
        return ExitCode::FAILURE;
    };

    match embed(Path::new(&path)) {
        Ok(EmbedOutcome::Found {
            value,
            attempts,
            elapsed,
        }) => {
            println!("Fixed point found!");
            println!("CRC32 = {}", hex::encode(value.to_be_bytes()));
            println!("File updated: {}", path);
            println!("Elapsed time: {} seconds", elapsed.as_secs());
            println!("Total attempts: {}", attempts);
            ExitCode::SUCCESS
        }
        Ok(EmbedOutcome::Exhausted { attempts, elapsed }) => {
            println!("No fixed point found.");
            println!("Elapsed time: {} seconds", elapsed.as_secs());
            println!("Total attempts: {}", attempts);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
