//! Seed-list loading: the newline-delimited `name,server` file read at
//! startup.

use std::io;
use std::path::Path;

use crate::identity::CharacterIdentity;

/// Parse a seed list into identities.
///
/// One identity per line as `name,server`; surrounding whitespace is
/// ignored, `#`-prefixed lines are comments, blank lines and lines
/// without a server component are skipped. Duplicates (after
/// normalization) collapse to the first occurrence, preserving order.
pub fn parse_seed_list(contents: &str) -> Vec<CharacterIdentity> {
    let mut identities: Vec<CharacterIdentity> = Vec::new();

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((name, server)) = line.split_once(',') else {
            tracing::warn!("Skipping malformed seed line: {}", line);
            continue;
        };
        let identity = CharacterIdentity::new(name, server);
        if identity.name().is_empty() || identity.server().is_empty() {
            tracing::warn!("Skipping malformed seed line: {}", line);
            continue;
        }
        if !identities.contains(&identity) {
            identities.push(identity);
        }
    }

    identities
}

/// Read and parse a seed file. I/O errors are returned so the caller
/// can degrade to an empty roster with a visible error instead of
/// crashing.
pub fn read_seed_file(path: &Path) -> io::Result<Vec<CharacterIdentity>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(parse_seed_list(&contents))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn skips_comments_blanks_and_collapses_duplicates() {
        let contents = "atlas,tarren mill\n# comment\n\natlas,tarren mill\n";
        let identities = parse_seed_list(contents);
        assert_eq!(identities.len(), 1);
        assert_eq!(identities[0].key(), "atlas-tarren mill");
    }

    #[test]
    fn normalizes_and_preserves_order() {
        let contents = "Braum, Draenor\natlas,tarren mill\nBRAUM,draenor\n";
        let identities = parse_seed_list(contents);
        let keys: Vec<String> = identities.iter().map(CharacterIdentity::key).collect();
        assert_eq!(keys, vec!["braum-draenor", "atlas-tarren mill"]);
    }

    #[test]
    fn skips_malformed_lines() {
        let contents = "no-server-here\n,missing name\natlas,\nvalid,server\n";
        let identities = parse_seed_list(contents);
        assert_eq!(identities.len(), 1);
        assert_eq!(identities[0].key(), "valid-server");
    }

    #[test]
    fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "atlas,tarren mill").unwrap();
        writeln!(file, "# tracked friends").unwrap();
        writeln!(file, "braum,draenor").unwrap();

        let identities = read_seed_file(file.path()).unwrap();
        assert_eq!(identities.len(), 2);
    }

    #[test]
    fn missing_file_is_an_error_not_a_panic() {
        let result = read_seed_file(Path::new("/nonexistent/tracked_characters.txt"));
        assert!(result.is_err());
    }
}
