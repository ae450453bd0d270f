#![allow(dead_code)]

pub mod command;
pub mod file;

use assert_fs::TempDir;
use plumb::Repository;
use plumb::artifacts::core::events::NullSink;
use std::sync::Arc;

/// Scratch directory under cargo's per-target temp dir
pub fn temp_dir() -> TempDir {
    TempDir::new_in(env!("CARGO_TARGET_TMPDIR")).expect("Failed to create temp dir")
}

/// Initialized repository whose command output is discarded
pub fn init_repository(dir: &TempDir) -> Repository {
    let repository =
        Repository::with_events(dir.path(), Box::new(std::io::sink()), Arc::new(NullSink))
            .expect("Failed to open repository");
    repository.init().expect("Failed to initialize repository");
    repository
}

// Helper function to create hexdump representation
pub fn to_hexdump(data: &[u8]) -> String {
    let mut result = String::new();
    for (i, chunk) in data.chunks(16).enumerate() {
        result.push_str(&format!("{:08x}: ", i * 16));

        for byte in chunk {
            result.push_str(&format!("{:02x} ", byte));
        }
        for _ in chunk.len()..16 {
            result.push_str("   ");
        }

        result.push_str(" |");
        for byte in chunk {
            if byte.is_ascii_graphic() {
                result.push(*byte as char);
            } else {
                result.push('.');
            }
        }
        result.push_str("|\n");
    }
    result
}

// Macro to compare raw bytes with hexdump output on failure
#[macro_export]
macro_rules! assert_bytes_eq {
    ($actual:expr, $expected:expr) => {
        if $actual != $expected {
            pretty_assertions::assert_eq!(
                common::to_hexdump($actual),
                common::to_hexdump($expected),
                "\n=== CONTENTS DIFFER ===\nactual ({} bytes) vs expected ({} bytes)",
                $actual.len(),
                $expected.len()
            );
        }
    };
}
