/// Named references understood by the fragment parser.
const NAMED: &[(&str, char)] = &[
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&apos;", '\''),
    ("&nbsp;", '\u{00A0}'),
];

const MAX_HEX_DIGITS: usize = 6; // 0x10FFFF
const MAX_DEC_DIGITS: usize = 7; // 1114111

/// Decode the small entity subset that inserted markup and escaped text use.
///
/// - Named: `&amp;`, `&lt;`, `&gt;`, `&quot;`, `&apos;`, `&nbsp;`.
/// - Numeric, semicolon-terminated: `&#160;` and `&#xA0;`.
/// - Anything else (unknown names, missing `;`, invalid scalars) passes through.
pub(crate) fn decode_entities(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    let mut copy_start = 0;

    while i < bytes.len() {
        if bytes[i] != b'&' {
            i += 1;
            continue;
        }
        // Flush bytes up to '&' unchanged (preserves UTF-8).
        out.push_str(&s[copy_start..i]);

        if let Some((len, ch)) = named_at(bytes, i).or_else(|| numeric_at(s, i)) {
            out.push(ch);
            i += len;
        } else {
            out.push('&');
            i += 1;
        }
        copy_start = i;
    }

    out.push_str(&s[copy_start..]);
    out
}

fn named_at(bytes: &[u8], i: usize) -> Option<(usize, char)> {
    NAMED.iter().find_map(|(pat, ch)| {
        bytes
            .get(i..i + pat.len())
            .is_some_and(|s| s == pat.as_bytes())
            .then_some((pat.len(), *ch))
    })
}

fn numeric_at(s: &str, i: usize) -> Option<(usize, char)> {
    let rest = s.get(i..)?;
    let (digits_start, radix, max) = if rest.starts_with("&#x") || rest.starts_with("&#X") {
        (3, 16, MAX_HEX_DIGITS)
    } else if rest.starts_with("&#") {
        (2, 10, MAX_DEC_DIGITS)
    } else {
        return None;
    };
    let body = &rest[digits_start..];
    let end = body.find(';')?;
    let digits = &body[..end];
    if digits.is_empty() || digits.len() > max || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let ch = u32::from_str_radix(digits, radix)
        .ok()
        .and_then(char::from_u32)?;
    Some((digits_start + end + 1, ch))
}
