use crate::options::BinaryDetection;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Number of leading bytes inspected when classifying a file.
pub const SNIFF_LEN: usize = 512;

/// Classifies an already-read prefix. Only the first [`SNIFF_LEN`] bytes are
/// looked at, whatever the slice length.
pub fn classify(prefix: &[u8], mode: BinaryDetection) -> bool {
    let prefix = &prefix[..prefix.len().min(SNIFF_LEN)];
    match mode {
        BinaryDetection::Simple => prefix.contains(&0),
        BinaryDetection::Accurate => content_inspector::inspect(prefix).is_binary(),
        BinaryDetection::None => false,
    }
}

/// NUL-byte sniff over the first 512 bytes of the file at `path`.
///
/// Standalone form of the check. The scan itself classifies the prefix it
/// already read with [`classify`] instead of opening the file twice.
///
/// A file that cannot be opened or read is reported as text; the engine's
/// content read then fails and skips it instead.
pub fn looks_binary(path: &Path) -> bool {
    let Ok(file) = File::open(path) else {
        return false;
    };
    let mut prefix = Vec::with_capacity(SNIFF_LEN);
    match file.take(SNIFF_LEN as u64).read_to_end(&mut prefix) {
        Ok(_) => classify(&prefix, BinaryDetection::Simple),
        Err(_) => false,
    }
}
