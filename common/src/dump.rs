//! Hex dumps for verbose diagnostics.

use std::fmt::Write as _;

const LINE: usize = 16;

/// Render `data` as offset, hex and printable-ASCII columns, sixteen bytes per
/// line, each line ending in a newline.
pub fn hex_dump(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len().div_ceil(LINE) * 79);

    for (line, chunk) in data.chunks(LINE).enumerate() {
        let _ = write!(out, "{:08x}  ", line * LINE);
        for idx in 0..LINE {
            match chunk.get(idx) {
                Some(byte) => {
                    let _ = write!(out, "{byte:02x} ");
                }
                None => out.push_str("   "),
            }
            if idx == 7 {
                out.push(' ');
            }
        }

        out.push_str(" |");
        out.extend(chunk.iter().map(|&byte| {
            if (0x20..0x7f).contains(&byte) { byte as char } else { '.' }
        }));
        out.push_str("|\n");
    }

    out
}

/// Lowercase hex without separators.
pub fn hex(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 2);
    for byte in data {
        let _ = write!(out, "{byte:02x}");
    }
    out
}
