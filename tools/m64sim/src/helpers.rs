use std::fmt::Write;

/// A run of 16-bit words to print after a program stops.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Dump {
    pub address: u16,
    pub count: usize,
}

/// Words in the whole 64 KiB address space.
pub const MAX_DUMP_WORDS: usize = 0x8000;

/// `$0200`, `0x0200` or plain decimal.
pub fn parse_address(s: &str) -> Result<u16, String> {
    let s = s.trim();
    let parsed = if let Some(hex) = s.strip_prefix('$').or_else(|| s.strip_prefix("0x")) {
        u16::from_str_radix(hex, 16)
    } else {
        s.parse::<u16>()
    };
    parsed.map_err(|e| format!("invalid address '{}': {}", s, e))
}

/// `ADDR:COUNT`
pub fn parse_dump(s: &str) -> Result<Dump, String> {
    let (address, count) = s
        .split_once(':')
        .ok_or_else(|| format!("expected ADDR:COUNT, got '{}'", s))?;
    let address = parse_address(address)?;
    let count = count
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid count '{}': {}", count, e))?;
    if count > MAX_DUMP_WORDS {
        return Err(format!("dump count {} too large, at most {} words", count, MAX_DUMP_WORDS));
    }
    Ok(Dump { address, count })
}

/// Address of the `index`th word after `start`, wrapping past `$FFFF`.
pub fn word_address(start: u16, index: usize) -> u16 {
    start.wrapping_add((index as u16).wrapping_mul(2))
}

/// One line per word: address, raw hex, signed value.
pub fn format_words(start: u16, words: impl IntoIterator<Item = i16>) -> String {
    let mut out = String::new();
    for (i, word) in words.into_iter().enumerate() {
        let addr = word_address(start, i);
        let _ = writeln!(out, "${:04X}  ${:04X}  {}", addr, word as u16, word);
    }
    out
}
