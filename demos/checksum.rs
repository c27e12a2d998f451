//! Compare plain read() against memory-mapped access by checksumming a file.
//!
//! Usage:
//!
//!   checksum {read | mmap} <filename>
//!
//! In `read` mode the file is consumed through a deliberately small 256-byte
//! buffer, a pattern still common in the wild. In `mmap` mode the whole file
//! is handed to the checksum in one call and the OS pages data in as it is
//! touched. Run both modes under `time` with a big file to see the gap.

use std::env;
use std::fs::File;
use std::io::Read;
use std::process::ExitCode;

use filemap::MappedFile;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a over a block, continuing from `state`.
fn fnv1a(state: u64, bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(state, |hash, &byte| (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME))
}

fn die(reason: &str) -> ExitCode {
    eprintln!("ERROR: {}", reason);
    ExitCode::from(1)
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        return die(&format!("Usage: {} {{read | mmap}} <filename>", args[0]));
    }

    let mode = args[1].as_str();
    let filename = &args[2];

    let mut checksum = FNV_OFFSET;
    let size;

    match mode {
        "read" => {
            let mut file = match File::open(filename) {
                Ok(file) => file,
                Err(err) => return die(&format!("could not open {}: {}", filename, err)),
            };

            let mut total = 0usize;
            let mut buffer = [0u8; 256];
            loop {
                match file.read(&mut buffer) {
                    Ok(0) => break,
                    Ok(n) => {
                        checksum = fnv1a(checksum, &buffer[..n]);
                        total += n;
                    }
                    Err(err) => return die(&format!("read failed: {}", err)),
                }
            }
            size = total;
        }
        "mmap" => {
            let map = match MappedFile::open(filename) {
                Ok(map) => map,
                Err(err) => return die(&format!("could not map {}: {}", filename, err)),
            };

            // The whole file in one call; the OS worries about paging.
            checksum = fnv1a(checksum, &map);
            size = map.size();
        }
        other => {
            return die(&format!("Unknown mode: {}. Expecting 'read' or 'mmap'", other));
        }
    }

    println!("{}:{}: size {} bytes, checksum {:016x}", filename, mode, size, checksum);
    ExitCode::SUCCESS
}
