/// Section of a request path: everything before the first `/` found from index 1 on.
///
/// The scan is purely positional. The first character is always kept whatever it is, so
/// `/api/users` gives `/api` and `report/test/api` gives `report`. Paths with no further
/// `/` are their own section.
pub fn section_of(path: &str) -> &str {
    let mut chars = path.char_indices();

    // index 0 is skipped, even when it is not a '/'
    chars.next();

    for (i, c) in chars {
        if c == '/' {
            return &path[..i];
        }
    }

    path
}
