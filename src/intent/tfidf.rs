//! TF-IDF vectorizer for command text.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::error::Result;

/// TF-IDF vectorizer fitted once on a set of documents.
///
/// The vocabulary is ordered lexicographically, so a given corpus always maps
/// a term to the same vector dimension. Every vector produced by one
/// vectorizer has length [`vocabulary_size`](Self::vocabulary_size).
pub struct TfIdfVectorizer {
    /// Vocabulary in dimension order.
    terms: Vec<String>,
    /// Vocabulary: word -> index mapping.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency for each word.
    idf: Vec<f64>,
    /// Total number of documents seen during fitting.
    n_documents: usize,
    /// Analyzer for tokenization.
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("n_documents", &self.n_documents)
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl TfIdfVectorizer {
    /// Fit a vectorizer on the given documents.
    ///
    /// An empty document list is valid and yields an empty vocabulary.
    pub fn fit<S: AsRef<str>>(analyzer: Arc<dyn Analyzer>, documents: &[S]) -> Result<Self> {
        let mut document_frequency: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let unique_tokens: HashSet<String> = analyzer.terms(doc.as_ref())?.into_iter().collect();
            for token in unique_tokens {
                *document_frequency.entry(token).or_insert(0) += 1;
            }
        }

        let terms: Vec<String> = document_frequency
            .keys()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let vocabulary: HashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();

        // IDF = ln((N + 1) / (df + 1)) + 1
        let n_documents = documents.len();
        let idf = terms
            .iter()
            .map(|term| {
                let df = document_frequency.get(term).copied().unwrap_or(0);
                ((n_documents as f64 + 1.0) / (df as f64 + 1.0)).ln() + 1.0
            })
            .collect();

        Ok(Self {
            terms,
            vocabulary,
            idf,
            n_documents,
            analyzer,
        })
    }

    /// Tokenize a document with the fitted analyzer.
    pub fn tokenize(&self, document: &str) -> Result<Vec<String>> {
        self.analyzer.terms(document)
    }

    /// Transform a document into a TF-IDF feature vector.
    pub fn transform(&self, document: &str) -> Result<Vec<f64>> {
        let tokens = self.tokenize(document)?;
        Ok(self.transform_tokens(&tokens))
    }

    /// Transform already tokenized text into a TF-IDF feature vector.
    ///
    /// Out-of-vocabulary tokens are ignored but still count towards the
    /// document length. An empty token list gives the zero vector.
    pub fn transform_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<f64> {
        let mut features = vec![0.0; self.vocabulary.len()];
        if tokens.is_empty() {
            return features;
        }

        for token in tokens {
            if let Some(&idx) = self.vocabulary.get(token.as_ref()) {
                features[idx] += 1.0;
            }
        }

        let doc_length = tokens.len() as f64;
        for (idx, value) in features.iter_mut().enumerate() {
            *value = *value / doc_length * self.idf[idx];
        }

        features
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Vocabulary terms in dimension order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// IDF weight of a term, if it is in the vocabulary.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&idx| self.idf[idx])
    }

    /// Number of documents the vectorizer was fitted on.
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    /// Get the analyzer used for tokenization.
    pub fn analyzer(&self) -> &Arc<dyn Analyzer> {
        &self.analyzer
    }
}

/// Cosine similarity between two vectors.
///
/// Returns exactly 0.0 when the lengths differ or either vector has zero
/// magnitude.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let magnitude_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        0.0
    } else {
        dot_product / (magnitude_a * magnitude_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::command::CommandAnalyzer;

    fn vectorizer(documents: &[&str]) -> TfIdfVectorizer {
        let analyzer = Arc::new(CommandAnalyzer::new().unwrap());
        TfIdfVectorizer::fit(analyzer, documents).unwrap()
    }

    #[test]
    fn test_tfidf_vectorizer() {
        let vectorizer = vectorizer(&[
            "remind me to buy milk",
            "set a timer for ten minutes",
            "take a note",
        ]);
        assert_eq!(vectorizer.n_documents(), 3);
        assert_eq!(vectorizer.vocabulary_size(), 9);

        let features = vectorizer.transform("buy a timer").unwrap();
        assert_eq!(features.len(), vectorizer.vocabulary_size());
    }

    #[test]
    fn test_vocabulary_is_sorted() {
        let vectorizer = vectorizer(&["zebra apple", "mango apple"]);
        assert_eq!(vectorizer.terms(), ["apple", "mango", "zebra"]);
    }

    #[test]
    fn test_smoothed_idf() {
        let vectorizer = vectorizer(&["zebra apple", "mango apple"]);
        // df(apple) = 2, N = 2 → ln(3/3) + 1
        assert!((vectorizer.idf("apple").unwrap() - 1.0).abs() < 1e-12);
        // df(zebra) = 1 → ln(3/2) + 1
        let expected = (3.0_f64 / 2.0).ln() + 1.0;
        assert!((vectorizer.idf("zebra").unwrap() - expected).abs() < 1e-12);
        assert!(vectorizer.idf("banana").is_none());
    }

    #[test]
    fn test_document_frequency_counts_documents_not_occurrences() {
        let vectorizer = vectorizer(&["apple apple apple", "mango"]);
        let expected = (3.0_f64 / 2.0).ln() + 1.0;
        assert!((vectorizer.idf("apple").unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_term_frequency_is_normalized_by_token_count() {
        let vectorizer = vectorizer(&["zebra apple", "mango apple"]);
        // "apple unknownword": tf(apple) = 1/2, the OOV token still counts.
        let features = vectorizer.transform("apple unknownword").unwrap();
        let apple_idf = vectorizer.idf("apple").unwrap();
        assert!((features[0] - 0.5 * apple_idf).abs() < 1e-12);
        assert_eq!(features[1], 0.0);
        assert_eq!(features[2], 0.0);
    }

    #[test]
    fn test_empty_input_gives_zero_vector() {
        let vectorizer = vectorizer(&["zebra apple"]);
        let features = vectorizer.transform("the a to").unwrap();
        assert_eq!(features, vec![0.0, 0.0]);
        assert!(features.iter().all(|v| !v.is_nan()));
    }

    #[test]
    fn test_empty_corpus() {
        let vectorizer = vectorizer(&[]);
        assert_eq!(vectorizer.vocabulary_size(), 0);
        assert!(vectorizer.transform("anything at all").unwrap().is_empty());
    }

    #[test]
    fn test_cosine_similarity() {
        let a = vec![1.0, 2.0, 3.0];
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-9);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_self_similarity_of_transformed_vectors() {
        let vectorizer = vectorizer(&["set timer ten minutes", "take note milk"]);
        let features = vectorizer.transform("set timer ten minutes").unwrap();
        assert!((cosine_similarity(&features, &features) - 1.0).abs() < 1e-9);
    }
}
