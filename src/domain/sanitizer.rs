/// Trims the input and replaces `<`, `>`, `"` and `'` with HTML entities.
///
/// `&` is left alone, so running the function on already escaped text never
/// brings a raw markup character back.
pub fn sanitize_input(input: &str) -> String {
    let trimmed = input.trim();
    let mut out = String::with_capacity(trimmed.len());

    for c in trimmed.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }

    out
}

/// Sanitizes free text and keeps its line breaks visible in HTML.
pub fn sanitize_multiline(input: &str) -> String {
    sanitize_input(input)
        .replace("\r\n", "\n")
        .replace('\n', "<br>")
}
