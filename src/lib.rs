pub mod cli;
pub mod error;
pub mod grading {

    use scraper::{ Html, Selector, };
    use serde::{ Serialize, Deserialize, };
    use serde_json::ser::{ PrettyFormatter, Serializer, };
    use tracing::{ debug, trace, };
    use crate::error::GradeError;
    use std::{
        path::Path,
        collections::BTreeMap,
        fs::read,
    };




    const INDENT: &[u8] = b"    ";






    /// Selectors to look for, in the order they were listed.
    #[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
    pub struct Checks (
        Vec<String>,
        );
    impl Checks {
        pub fn load(path: &Path) -> Result<Self, GradeError> {
            if !path.exists() {
                return Err(GradeError::MissingFile(path.to_owned()));
            }
            let bytes = read(path)
                .map_err(|source| GradeError::Read { path: path.to_owned(), source })?;
            let checks: Self = serde_json::from_slice(&bytes)
                .map_err(|source| GradeError::Checks { path: path.to_owned(), source })?;
            debug!(path = %path.display(), count = checks.0.len(), "loaded checks");
            Ok(checks)
        }
        pub fn sorted(&self) -> Vec<&str> {
            let mut sorted = self.0
                .iter()
                .map( |check| check.as_str() )
                .collect::<Vec<_>>();
            sorted.sort();
            sorted
        }
    }
    impl From<Vec<String>> for Checks {
        fn from(checks: Vec<String>) -> Self {
            Self(checks)
        }
    }






    /// Whether each check matched at least one element, keyed by selector.
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
    #[serde(transparent)]
    pub struct Report (
        BTreeMap<String, bool>,
        );
    impl Report {
        pub fn get(&self, check: &str) -> Option<bool> {
            self.0.get(check).copied()
        }
        pub fn checks(&self) -> impl Iterator<Item = &str> + '_ {
            self.0.keys().map( |check| check.as_str() )
        }
        pub fn len(&self) -> usize {
            self.0.len()
        }
        pub fn is_empty(&self) -> bool {
            self.0.is_empty()
        }
        /// JSON object with a four space indent, keys in sorted order.
        pub fn render(&self) -> serde_json::Result<String> {
            let mut out = Vec::new();
            let mut serializer = Serializer::with_formatter(
                &mut out,
                PrettyFormatter::with_indent(INDENT),
                );
            self.serialize(&mut serializer)?;
            Ok(String::from_utf8_lossy(&out).into_owned())
        }
    }






    pub fn read_html(path: &Path) -> Result<Html, GradeError> {
        let bytes = read(path)
            .map_err(|source| GradeError::Read { path: path.to_owned(), source })?;
        Ok(Html::parse_document(&String::from_utf8_lossy(&bytes)))
    }

    /// Checks run in sorted order. The first selector the parser rejects
    /// aborts the whole evaluation.
    pub fn evaluate(document: &Html, checks: &Checks) -> Result<Report, GradeError> {
        let mut report = BTreeMap::new();
        for check in checks.sorted() {
            let selector = Selector::parse(check)
                .map_err(|err| GradeError::Selector {
                    selector: check.to_owned(),
                    reason: err.to_string(),
                })?;
            let present = document.select(&selector).next().is_some();
            trace!(%check, present, "evaluated check");
            report.insert(check.to_owned(), present);
        }
        Ok(Report(report))
    }
}





use anyhow::Result;
use crate::{ cli::{ Cli, Mode, }, grading::*, };

/// Resolve the input, load the checks, grade, and render the report.
pub fn run(cli: &Cli) -> Result<String> {
    let html = Mode::from_cli(cli).resolve(&cli.cache)?;
    let checks = Checks::load(&cli.checks)?;
    let document = read_html(&html)?;
    let report = evaluate(&document, &checks)?;
    Ok(report.render()?)
}






#[cfg(test)]
mod tests {
    use super::{ run, cli::*, error::GradeError, grading::*, };
    use pretty_assertions::assert_eq;
    use scraper::Html;
    use std::{ fs::write, path::PathBuf, };
    use tempfile::{ tempdir, TempDir, };

    fn checks(list: &[&str]) -> Checks {
        list.iter().map( |s| s.to_string() ).collect::<Vec<_>>().into()
    }

    fn fixture(html: &str, checks: &str) -> (TempDir, Cli) {
        let dir = tempdir().unwrap();
        write(dir.path().join("index.html"), html).unwrap();
        write(dir.path().join("checks.json"), checks).unwrap();
        let cli = Cli {
            checks: dir.path().join("checks.json"),
            file: dir.path().join("index.html"),
            url: None,
            cache: dir.path().join("url.html"),
        };
        (dir, cli)
    }

    #[test]
    fn report_keys_are_the_sorted_checks() {
        let document = Html::parse_document("<html><p class=\"x\">a</p></html>");
        let report = evaluate(&document, &checks(&["p.x", "a[href]", "div", "p"])).unwrap();
        assert_eq!(report.checks().collect::<Vec<_>>(), vec!["a[href]", "div", "p", "p.x"]);
    }

    #[test]
    fn single_match_is_enough() {
        let document = Html::parse_document("<html><body><a href=\"/\">x</a><a>y</a></body></html>");
        let report = evaluate(&document, &checks(&["a[href]", "a[title]"])).unwrap();
        assert_eq!(report.get("a[href]"), Some(true));
        assert_eq!(report.get("a[title]"), Some(false));
    }

    #[test]
    fn duplicate_checks_collapse() {
        let document = Html::parse_document("<h1>Hi</h1>");
        let report = evaluate(&document, &checks(&["h1", "h1"])).unwrap();
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn invalid_selector_is_fatal() {
        let document = Html::parse_document("<h1>Hi</h1>");
        let err = evaluate(&document, &checks(&["h1", "[[["])).unwrap_err();
        assert!(matches!(err, GradeError::Selector { ref selector, .. } if selector == "[[["));
    }

    #[test]
    fn empty_checks_render_empty_object() {
        let document = Html::parse_document("<h1>Hi</h1>");
        let report = evaluate(&document, &checks(&[])).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.render().unwrap(), "{}");
    }

    #[test]
    fn end_to_end_from_file() {
        let (_dir, cli) = fixture("<html><h1>Hi</h1></html>", r#"["h2", "h1"]"#);
        assert_eq!(run(&cli).unwrap(), "{\n    \"h1\": true,\n    \"h2\": false\n}");
    }

    #[test]
    fn rerun_is_byte_identical() {
        let (_dir, cli) = fixture("<ul><li>a</li></ul>", r#"["li", "ul > li", "ol"]"#);
        assert_eq!(run(&cli).unwrap(), run(&cli).unwrap());
    }

    #[test]
    fn non_array_checks_are_rejected() {
        let (_dir, cli) = fixture("<h1>Hi</h1>", r#"{"h1": true}"#);
        let err = Checks::load(&cli.checks).unwrap_err();
        assert!(matches!(err, GradeError::Checks { .. }));
    }

    #[test]
    fn malformed_checks_are_rejected() {
        let (_dir, cli) = fixture("<h1>Hi</h1>", "[\"h1\",");
        let err = Checks::load(&cli.checks).unwrap_err();
        assert!(matches!(err, GradeError::Checks { .. }));
        assert!(err.to_string().ends_with("checks.json is not a valid checks file"));
    }

    #[test]
    fn missing_checks_file() {
        let missing = PathBuf::from("/nonexistent/checks.json");
        assert!(matches!(Checks::load(&missing), Err(GradeError::MissingFile(path)) if path == missing));
    }
}
