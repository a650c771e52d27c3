use crate::EncodeError;
use std::collections::HashMap;

/// Tokenize text for vectorization: lowercase, split on anything that is
/// not alphanumeric, drop empty pieces. Single-character tokens are kept
/// since categorical codes (gender, neuter flags) are one letter.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Term frequency–inverse document frequency weighting over a fixed
/// vocabulary learned once from a reference corpus.
///
/// `transform` never changes output width: rows are always
/// `vocabulary_size()` wide, and terms outside the vocabulary contribute
/// nothing.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// Learn vocabulary and document frequencies from `documents`.
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Result<Self, EncodeError> {
        if documents.is_empty() {
            return Err(EncodeError::EmptyCorpus);
        }

        let n_docs = documents.len();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let mut seen: Vec<String> = tokenize(doc.as_ref());
            seen.sort();
            seen.dedup();
            for term in seen {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        if doc_freq.is_empty() {
            return Err(EncodeError::EmptyCorpus);
        }

        // Lexicographic vocabulary order keeps fits deterministic.
        let mut terms: Vec<(String, usize)> = doc_freq.into_iter().collect();
        terms.sort_by(|a, b| a.0.cmp(&b.0));

        let mut vocabulary = HashMap::with_capacity(terms.len());
        let mut idf = Vec::with_capacity(terms.len());
        for (index, (term, df)) in terms.into_iter().enumerate() {
            vocabulary.insert(term, index);
            // Smoothed IDF: ln((1 + n) / (1 + df)) + 1
            idf.push(((1.0 + n_docs as f32) / (1.0 + df as f32)).ln() + 1.0);
        }

        Ok(Self { vocabulary, idf })
    }

    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Weight documents against the learned vocabulary. Each row is
    /// L2-normalized; a document with no known terms stays all-zero.
    pub fn transform<S: AsRef<str>>(&self, documents: &[S]) -> Vec<Vec<f32>> {
        let width = self.vocabulary.len();
        documents
            .iter()
            .map(|doc| {
                let mut row = vec![0.0f32; width];
                for token in tokenize(doc.as_ref()) {
                    if let Some(&index) = self.vocabulary.get(&token) {
                        row[index] += 1.0;
                    }
                }
                for (index, value) in row.iter_mut().enumerate() {
                    *value *= self.idf[index];
                }

                let norm = row.iter().map(|v| v * v).sum::<f32>().sqrt();
                if norm > f32::EPSILON {
                    for value in &mut row {
                        *value /= norm;
                    }
                }
                row
            })
            .collect()
    }
}
