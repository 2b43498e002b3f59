//! Official plugin listing (repository contents API).

use crate::catalog::is_plugin_file;
use anyhow::{Context, Result};
use serde::Deserialize;

/// One object of the contents API array. Every other field is ignored.
#[derive(Debug, Deserialize)]
struct ListingEntry {
    name: String,
}

/// Parse a contents API response into plugin file names.
///
/// Keeps names carrying the plugin extension that are not helper files.
/// Order follows the response.
pub fn parse_listing(body: &str) -> Result<Vec<String>> {
    let entries: Vec<ListingEntry> =
        serde_json::from_str(body).context("parsing repository listing JSON")?;
    Ok(entries
        .into_iter()
        .map(|entry| entry.name)
        .filter(|name| is_plugin_file(name))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_extension_and_skip_set() {
        let names =
            parse_listing(r#"[{"name":"foo.py"},{"name":"__init__.py"},{"name":"bar.txt"}]"#)
                .unwrap();
        assert_eq!(names, vec!["foo.py".to_string()]);
    }

    #[test]
    fn ignores_extra_fields() {
        let names = parse_listing(
            r#"[{"name":"eztv.py","type":"file","size":1200},{"name":"example.py","type":"file"}]"#,
        )
        .unwrap();
        assert_eq!(names, vec!["eztv.py".to_string()]);
    }

    #[test]
    fn rejects_non_array_payload() {
        assert!(parse_listing(r#"{"message":"API rate limit exceeded"}"#).is_err());
        assert!(parse_listing("<html>").is_err());
    }
}
