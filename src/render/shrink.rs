//! Line-terminator postprocessing for rendered HTML.

/// `\n` or `\r`.
#[inline]
const fn is_line_terminator(b: u8) -> bool {
    matches!(b, b'\n' | b'\r')
}

/// Collapse every run of consecutive line terminators into its first byte.
///
/// `\n` and `\r` are interchangeable: `"\r\n\n"` becomes `"\r"`.
/// All other bytes are kept in order.
pub fn shrink(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    let mut after_terminator = false;

    for &b in data {
        let terminator = is_line_terminator(b);
        if !(terminator && after_terminator) {
            out.push(b);
        }
        after_terminator = terminator;
    }

    out.shrink_to_fit();
    out
}
