//! Small lexical helpers shared by the definition parsers.

/// Extracts the Bot API version from a `// VERSION x.y` header line.
///
/// Only the first non-blank line is inspected, so a version mentioned later in
/// a comment never overrides the header.
pub fn schema_version(contents: &str) -> Option<&str> {
    let first = contents.lines().map(str::trim).find(|l| !l.is_empty())?;
    let version = first.strip_prefix("// VERSION ")?.trim();
    (!version.is_empty()).then_some(version)
}

/// `true` for a non-empty run of lowercase ASCII letters, digits and `_`,
/// which is the alphabet of every Bot API wire key and tag.
pub(crate) fn is_wire_ident(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_header() {
        assert_eq!(schema_version("// VERSION 6.3\nuser id:long = User;"), Some("6.3"));
        assert_eq!(schema_version("\n\n// VERSION 7.0  \n"), Some("7.0"));
    }

    #[test]
    fn version_must_be_first() {
        assert_eq!(schema_version("user id:long = User;\n// VERSION 6.3"), None);
        assert_eq!(schema_version("// VERSION "), None);
    }

    #[test]
    fn wire_idents() {
        assert!(is_wire_ident("mpeg4_gif"));
        assert!(is_wire_ident("type"));
        assert!(!is_wire_ident("Type"));
        assert!(!is_wire_ident(""));
        assert!(!is_wire_ident("a-b"));
    }
}
