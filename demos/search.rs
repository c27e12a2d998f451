//! Case-sensitive substring search across files using memory-mapped IO.
//!
//! Usage:
//!
//!   search <word> <filename1> [... <filenameN>]

use std::env;
use std::process::ExitCode;

use filemap::MappedFile;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <word> <filename1> [... <filenameN>]", args[0]);
        eprintln!(
            "Performs a case-sensitive search for 'word' in the listed files using memory-mapped IO."
        );
        return ExitCode::from(1);
    }

    let needle = args[1].as_bytes();
    if needle.is_empty() {
        eprintln!("Very clever, you passed me an empty word to search for.");
        return ExitCode::from(2);
    }

    // The files are the haystack, the word is the needle. A failure on one
    // file is reported and the rest are still searched.
    for filename in &args[2..] {
        match MappedFile::open(filename) {
            Ok(map) => {
                if map.windows(needle.len()).any(|window| window == needle) {
                    println!("{} matches.", filename);
                }
            }
            Err(err) => eprintln!("ERROR:{}: {}", filename, err),
        }
    }

    ExitCode::SUCCESS
}
