use crate::reduce::Projection;
use crate::tfidf::TfidfVectorizer;
use crate::EncodeError;
use pawrec_core::Vector;

/// A vectorization model fitted once from a reference corpus: TF-IDF
/// weighting followed by a principal-component projection down to a fixed
/// output width.
///
/// The fit is immutable. Incremental additions to a collection must be
/// encoded with the collection's original `FittedEncoder` — re-fitting
/// would change the vocabulary and basis and silently invalidate every
/// previously stored vector, so no re-fit entry point exists on this type.
#[derive(Debug, Clone)]
pub struct FittedEncoder {
    tfidf: TfidfVectorizer,
    projection: Projection,
    width: usize,
}

impl FittedEncoder {
    /// Fit an encoder of `width` output dimensions over `texts`.
    ///
    /// Fails with [`EncodeError::EmptyCorpus`] when there is nothing to
    /// learn from: no documents, or documents that tokenize to nothing.
    pub fn fit<S: AsRef<str>>(texts: &[S], width: usize) -> Result<Self, EncodeError> {
        let tfidf = TfidfVectorizer::fit(texts)?;
        let weighted = tfidf.transform(texts);
        let projection = Projection::fit(&weighted, width);

        Ok(Self {
            tfidf,
            projection,
            width,
        })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.tfidf.vocabulary_size()
    }

    /// Encode texts with the already-learned vocabulary and basis.
    ///
    /// Output vectors are always `width()` wide; text with no vocabulary
    /// overlap encodes to the projected origin rather than changing shape.
    pub fn encode<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<Vector>, EncodeError> {
        let weighted = self.tfidf.transform(texts);
        let reduced = self.projection.transform(&weighted);

        let mut vectors = Vec::with_capacity(reduced.len());
        for row in reduced {
            if row.len() != self.width {
                return Err(EncodeError::WidthMismatch {
                    expected: self.width,
                    actual: row.len(),
                });
            }
            vectors.push(Vector::new(row));
        }
        Ok(vectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_empty_corpus_fails() {
        let texts: Vec<String> = Vec::new();
        assert!(matches!(
            FittedEncoder::fit(&texts, 4),
            Err(EncodeError::EmptyCorpus)
        ));
    }

    #[test]
    fn test_encode_width_always_matches_fit() {
        let corpus = vec!["cat orange", "dog black", "cat orange"];
        let encoder = FittedEncoder::fit(&corpus, 8).unwrap();
        assert_eq!(encoder.width(), 8);

        let vectors = encoder.encode(&["parrot green", "cat orange"]).unwrap();
        for vector in &vectors {
            assert_eq!(vector.dim(), 8);
        }
    }

    #[test]
    fn test_identical_text_encodes_identically() {
        let corpus = vec!["cat orange", "dog black", "cat orange"];
        let encoder = FittedEncoder::fit(&corpus, 4).unwrap();
        let vectors = encoder.encode(&corpus).unwrap();

        assert_eq!(vectors[0], vectors[2]);
        assert_eq!(vectors[0].l2_distance(&vectors[2]), 0.0);
        assert!(vectors[0].l2_distance(&vectors[1]) > 0.0);
    }

    #[test]
    fn test_encode_reuses_fit_for_new_text() {
        let corpus = vec!["cat orange", "dog black"];
        let encoder = FittedEncoder::fit(&corpus, 4).unwrap();

        let original = encoder.encode(&corpus).unwrap();
        // Encoding new text must not disturb how the original corpus encodes.
        let _ = encoder.encode(&["cat black"]).unwrap();
        let again = encoder.encode(&corpus).unwrap();
        assert_eq!(original, again);
    }
}
