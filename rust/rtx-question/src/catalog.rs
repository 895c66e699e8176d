//! The question catalog, holding every known question template in file order.
//!
//! ## Definition format
//!
//! One template per line, four tab-separated fields:
//!
//! ```text
//! template \t corpus \t types \t solution
//! ```
//!
//! `corpus` is a JSON array of example sentences and `types` any JSON value
//! describing the expected parameter types. Lines starting with `#` and blank
//! lines are skipped. Any other malformed line fails the whole load.

use std::fs;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::error::QuestionError;
use crate::question::Question;
use crate::similarity::CorpusRanker;
use crate::tsv;

#[derive(Debug, Clone, Default)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

/// The template chosen for an input.
#[derive(Debug, Clone, Copy)]
pub struct Selection<'c> {
    pub index: usize,
    pub question: &'c Question,
    pub score: f64,
}

impl QuestionCatalog {
    pub fn new(questions: Vec<Question>) -> Self {
        QuestionCatalog { questions }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, QuestionError> {
        let path = path.as_ref();
        let file = fs::File::open(path).map_err(|e| QuestionError::io(path, e))?;
        let catalog = Self::read_from(file, path)?;
        info!(templates = catalog.len(), path = %path.display(), "loaded question catalog");
        Ok(catalog)
    }

    pub fn read(input: impl Read) -> Result<Self, QuestionError> {
        Self::read_from(input, Path::new(tsv::IN_MEMORY))
    }

    fn read_from(input: impl Read, path: &Path) -> Result<Self, QuestionError> {
        let mut questions = Vec::new();
        let mut rows = tsv::reader(input, false);
        for record in rows.records() {
            let record = record.map_err(|e| {
                tsv::record_error(path, e, |line_number, reason| {
                    QuestionError::UnparseableCatalogLine {
                        line_number,
                        line: String::new(),
                        reason,
                    }
                })
            })?;
            if tsv::is_blank(&record) || record.get(0).is_some_and(|cell| cell.starts_with('#')) {
                continue;
            }
            questions.push(parse_line(&tsv::line(&record), tsv::line_number(&record))?);
        }
        Ok(QuestionCatalog { questions })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Choose the template whose corpus `ranker` finds closest to `text`.
    ///
    /// Fails with [`QuestionError::NoTemplateMatch`] if the ranker returns no
    /// match, an index outside the catalog, or a score below `threshold`.
    pub fn select(
        &self,
        text: &str,
        ranker: &dyn CorpusRanker,
        threshold: f64,
    ) -> Result<Selection<'_>, QuestionError> {
        if self.questions.is_empty() {
            return Err(QuestionError::EmptyCatalog);
        }

        let corpora: Vec<&[String]> = self.questions.iter().map(Question::corpus).collect();
        let found = ranker.find_best_corpus(text, &corpora);
        debug!(?found, threshold, "ranked question templates");

        match found {
            Some(found) if found.score >= threshold => {
                let question = self.questions.get(found.index).ok_or(
                    QuestionError::NoTemplateMatch {
                        best_score: found.score,
                        threshold,
                    },
                )?;
                Ok(Selection {
                    index: found.index,
                    question,
                    score: found.score,
                })
            }
            Some(found) => Err(QuestionError::NoTemplateMatch {
                best_score: found.score,
                threshold,
            }),
            None => Err(QuestionError::NoTemplateMatch {
                best_score: 0.0,
                threshold,
            }),
        }
    }
}

fn parse_line(line: &str, line_number: usize) -> Result<Question, QuestionError> {
    let unparseable = |reason: String| QuestionError::UnparseableCatalogLine {
        line_number,
        line: line.to_string(),
        reason,
    };

    let fields: Vec<&str> = line.trim().split('\t').collect();
    let [template, corpus, types, solution] = fields.as_slice() else {
        return Err(unparseable(format!("expected 4 fields, found {}", fields.len())));
    };

    let corpus: Vec<String> = serde_json::from_str(corpus)
        .map_err(|e| unparseable(format!("corpus is not a JSON list of strings: {e}")))?;
    let types: serde_json::Value = serde_json::from_str(types)
        .map_err(|e| unparseable(format!("types is not valid JSON: {e}")))?;

    if template.trim().is_empty() {
        return Err(unparseable("empty template".into()));
    }
    if solution.trim().is_empty() {
        return Err(unparseable("empty solution identifier".into()));
    }

    Ok(Question::new(template, corpus, types, solution.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::TokenOverlapRanker;
    use pretty_assertions::assert_eq;
    use testresult::TestResult;

    const CATALOG: &str = "\
# template\tcorpus\ttypes\tsolution
What is $term?\t[\"what is a dog\", \"what is an otolith\"]\t[]\tQ0
What genetic conditions might offer protection against $disont_disease?\t[\"what genetic conditions protect against malaria\"]\t[\"disont_disease\"]\tQ1Solution.py

";

    #[test]
    fn reads_templates_in_order() -> TestResult {
        let catalog = QuestionCatalog::read(CATALOG.as_bytes())?;
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.questions()[0].parameter_names(), ["term"]);
        assert_eq!(catalog.questions()[1].parameter_names(), ["disont_disease"]);
        assert_eq!(catalog.questions()[1].solution(), "Q1Solution.py");
        assert_eq!(catalog.questions()[1].types(), &serde_json::json!(["disont_disease"]));
        Ok(())
    }

    #[test]
    fn rejects_wrong_field_count() {
        let result = QuestionCatalog::read("What is $term?\t[]\tQ0\n".as_bytes());
        match result {
            Err(QuestionError::UnparseableCatalogLine { line_number, line, .. }) => {
                assert_eq!(line_number, 1);
                assert_eq!(line, "What is $term?\t[]\tQ0");
            }
            other => panic!("expected unparseable line, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_json_corpus() {
        let result = QuestionCatalog::read("# c\nWhat is $term?\t['a dog']\t[]\tQ0\n".as_bytes());
        assert!(matches!(
            result,
            Err(QuestionError::UnparseableCatalogLine { line_number: 2, .. })
        ));
    }

    #[test]
    fn unreadable_catalogs_report_their_path() -> TestResult {
        let dir = tempfile::tempdir()?;
        match QuestionCatalog::load(dir.path()) {
            Err(QuestionError::Io { path, .. }) => assert_eq!(path, dir.path()),
            other => panic!("expected an I/O error, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn invalid_utf8_fails_on_its_line() {
        let result = QuestionCatalog::read(&b"# header\nWhat is \xff?\t[]\t[]\tQ0\n"[..]);
        assert!(matches!(
            result,
            Err(QuestionError::UnparseableCatalogLine { line_number: 2, .. })
        ));
    }

    #[test]
    fn selects_by_corpus_similarity() -> TestResult {
        let catalog = QuestionCatalog::read(CATALOG.as_bytes())?;
        let ranker = TokenOverlapRanker::default();
        let selection = catalog.select(
            "What genetic conditions might offer protection against malaria",
            &ranker,
            0.1,
        )?;
        assert_eq!(selection.index, 1);
        assert_eq!(selection.question.solution(), "Q1Solution.py");
        Ok(())
    }

    #[test]
    fn poor_matches_are_rejected() -> TestResult {
        let catalog = QuestionCatalog::read(CATALOG.as_bytes())?;
        let ranker = TokenOverlapRanker::default();
        let result = catalog.select("how tall is the eiffel tower", &ranker, 0.1);
        assert!(matches!(result, Err(QuestionError::NoTemplateMatch { .. })));
        Ok(())
    }

    #[test]
    fn empty_catalog_cannot_select() {
        let catalog = QuestionCatalog::default();
        let ranker = TokenOverlapRanker::default();
        assert!(matches!(
            catalog.select("what is a dog", &ranker, 0.0),
            Err(QuestionError::EmptyCatalog)
        ));
    }
}
