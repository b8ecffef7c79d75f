//! Cafe lookup domain
//!
//! Validation, filtering and serialization behind `GET /cafe`. Nothing here
//! knows about HTTP; the handler maps the outcome to a response.

mod directory;
mod query;

pub use directory::{render_names, Cafe, CafeDirectory};
pub use query::{CafeQuery, QueryError};

/// Run the whole pipeline for a raw query string
///
/// Returns the comma-joined names on success, or the first validation
/// failure.
pub fn lookup(directory: &CafeDirectory, query: Option<&str>) -> Result<String, QueryError> {
    let query = CafeQuery::parse(query, directory)?;
    Ok(render_names(&directory.select(&query)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(body: &str) -> Vec<&str> {
        if body.is_empty() {
            Vec::new()
        } else {
            body.split(',').collect()
        }
    }

    #[test]
    fn test_lookup_errors() {
        let dir = CafeDirectory::builtin();
        assert_eq!(lookup(&dir, None), Err(QueryError::UnknownCity));
        assert_eq!(lookup(&dir, Some("city=omsk")), Err(QueryError::UnknownCity));
        assert_eq!(
            lookup(&dir, Some("city=tula&count=na")),
            Err(QueryError::IncorrectCount)
        );
    }

    #[test]
    fn test_lookup_count() {
        let dir = CafeDirectory::builtin();
        let body = lookup(&dir, Some("count=2&city=moscow")).unwrap();
        assert_eq!(split(&body).len(), 2);
        assert!(!body.ends_with(','));

        let body = lookup(&dir, Some("count=0&city=moscow")).unwrap();
        assert_eq!(body, "");
    }

    #[test]
    fn test_lookup_search() {
        let dir = CafeDirectory::builtin();

        let body = lookup(&dir, Some("city=moscow&search=%D0%BA%D0%BE%D1%84%D0%B5")).unwrap();
        let found = split(&body);
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|name| name.to_lowercase().contains("кофе")));

        let body = lookup(
            &dir,
            Some("city=moscow&search=%D1%84%D0%B0%D1%81%D0%BE%D0%BB%D1%8C"),
        )
        .unwrap();
        assert_eq!(body, "");
    }

    #[test]
    fn test_lookup_is_repeatable() {
        let dir = CafeDirectory::builtin();
        let first = lookup(&dir, Some("city=moscow&count=3"));
        let second = lookup(&dir, Some("city=moscow&count=3"));
        assert_eq!(first, second);
    }
}
