//! Trainable classifier: TF-IDF features into multinomial naive Bayes.
//!
//! Features are tokens of two or more word characters that are not stop
//! words. The vocabulary keeps the [`MAX_FEATURES`] most frequent terms
//! across the training corpus. Term counts are weighted by smoothed IDF
//! (`ln((1 + n) / (1 + df)) + 1`) and L2-normalized per document. Class
//! likelihoods use Laplace smoothing (`alpha = 1`).
//!
//! A fitted model serializes to JSON so it can be reloaded on startup.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use super::{Classifier, KeywordClassifier};
use crate::error::{CoreError, Result};
use crate::models::Document;
use crate::tokenize::{remove_stop_words, tokenize};

/// Fewest categorized documents accepted for training.
pub const MIN_TRAINING_DOCUMENTS: usize = 10;
/// Fewest distinct labels accepted for training.
pub const MIN_TRAINING_LABELS: usize = 2;
pub const MAX_FEATURES: usize = 1000;

const ALPHA: f64 = 1.0;

fn features(text: &str) -> Vec<String> {
    remove_stop_words(tokenize(text))
        .into_iter()
        .filter(|t| t.chars().count() >= 2)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NaiveBayesModel {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
    /// Sorted class labels.
    classes: Vec<String>,
    class_log_prior: Vec<f64>,
    /// `[class][feature]` log probabilities.
    feature_log_prob: Vec<Vec<f64>>,
}

impl NaiveBayesModel {
    /// Fit on parallel `texts` and `labels`. Returns `None` when the corpus
    /// yields no features or no labels.
    pub fn fit(texts: &[&str], labels: &[&str]) -> Option<Self> {
        if texts.is_empty() || texts.len() != labels.len() {
            return None;
        }

        let docs: Vec<Vec<String>> = texts.iter().map(|t| features(t)).collect();

        let mut corpus_counts: HashMap<&str, usize> = HashMap::new();
        for doc in &docs {
            for term in doc {
                *corpus_counts.entry(term.as_str()).or_default() += 1;
            }
        }
        if corpus_counts.is_empty() {
            return None;
        }

        let mut ranked: Vec<(&str, usize)> = corpus_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        ranked.truncate(MAX_FEATURES);

        let kept: BTreeSet<&str> = ranked.iter().map(|(t, _)| *t).collect();
        let vocabulary: BTreeMap<String, usize> = kept
            .iter()
            .enumerate()
            .map(|(i, t)| (t.to_string(), i))
            .collect();

        let n_features = vocabulary.len();
        let n_docs = docs.len() as f64;

        let mut df = vec![0usize; n_features];
        for doc in &docs {
            let seen: BTreeSet<usize> = doc.iter().filter_map(|t| vocabulary.get(t).copied()).collect();
            for idx in seen {
                df[idx] += 1;
            }
        }
        let idf: Vec<f64> = df
            .iter()
            .map(|&d| ((1.0 + n_docs) / (1.0 + d as f64)).ln() + 1.0)
            .collect();

        let classes: Vec<String> = labels
            .iter()
            .map(|l| l.to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let class_index: HashMap<&str, usize> = classes
            .iter()
            .enumerate()
            .map(|(i, c)| (c.as_str(), i))
            .collect();

        let mut class_docs = vec![0usize; classes.len()];
        let mut class_features = vec![vec![0.0f64; n_features]; classes.len()];
        for (doc, label) in docs.iter().zip(labels) {
            let c = class_index[label];
            class_docs[c] += 1;
            for (idx, weight) in tfidf(doc, &vocabulary, &idf) {
                class_features[c][idx] += weight;
            }
        }

        let class_log_prior = class_docs
            .iter()
            .map(|&count| (count as f64 / n_docs).ln())
            .collect();
        let feature_log_prob = class_features
            .iter()
            .map(|row| {
                let total: f64 = row.iter().sum::<f64>() + ALPHA * n_features as f64;
                row.iter().map(|&v| ((v + ALPHA) / total).ln()).collect()
            })
            .collect();

        Some(Self {
            vocabulary,
            idf,
            classes,
            class_log_prior,
            feature_log_prob,
        })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Most likely label for `text`. Text with no known terms gets the
    /// label with the largest prior.
    pub fn predict(&self, text: &str) -> Option<&str> {
        let doc = features(text);
        let weights = tfidf(&doc, &self.vocabulary, &self.idf);

        let mut best: Option<(usize, f64)> = None;
        for (c, prior) in self.class_log_prior.iter().enumerate() {
            let row = self.feature_log_prob.get(c)?;
            let score = prior
                + weights
                    .iter()
                    .map(|&(idx, w)| w * row.get(idx).copied().unwrap_or(0.0))
                    .sum::<f64>();
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((c, score)),
            }
        }
        best.and_then(|(c, _)| self.classes.get(c)).map(String::as_str)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| CoreError::ModelIo {
                path: path.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_vec(self).map_err(|source| CoreError::ModelFormat {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| CoreError::ModelIo {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|source| CoreError::ModelIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| CoreError::ModelFormat {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Sparse L2-normalized TF-IDF weights of a tokenized document.
fn tfidf(doc: &[String], vocabulary: &BTreeMap<String, usize>, idf: &[f64]) -> Vec<(usize, f64)> {
    let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
    for term in doc {
        if let Some(&idx) = vocabulary.get(term) {
            *counts.entry(idx).or_default() += 1.0;
        }
    }
    let mut weights: Vec<(usize, f64)> = counts
        .into_iter()
        .map(|(idx, tf)| (idx, tf * idf.get(idx).copied().unwrap_or(1.0)))
        .collect();
    let norm = weights.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for (_, w) in &mut weights {
            *w /= norm;
        }
    }
    weights
}

/// Classifier that predicts with a trained [`NaiveBayesModel`] and uses
/// keyword scoring until one is available.
pub struct ModelClassifier {
    keywords: KeywordClassifier,
    model: RwLock<Option<NaiveBayesModel>>,
    model_path: Option<PathBuf>,
}

impl ModelClassifier {
    /// Wrap `keywords`, loading a previously saved model from `model_path`
    /// if one exists. Load failures are logged and leave the classifier
    /// untrained.
    pub fn new(keywords: KeywordClassifier, model_path: Option<PathBuf>) -> Self {
        let model = model_path
            .as_deref()
            .filter(|p| p.exists())
            .and_then(|p| match NaiveBayesModel::load(p) {
                Ok(model) => {
                    tracing::info!(path = %p.display(), classes = model.classes.len(), "loaded classifier model");
                    Some(model)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring unreadable classifier model");
                    None
                }
            });
        Self {
            keywords,
            model: RwLock::new(model),
            model_path,
        }
    }

    pub fn is_trained(&self) -> Result<bool> {
        Ok(self
            .model
            .read()
            .map_err(|_| CoreError::LockPoisoned)?
            .is_some())
    }

    /// Fit a model on the categorized documents in `documents`.
    ///
    /// Returns `false` without touching the current model when fewer than
    /// [`MIN_TRAINING_DOCUMENTS`] documents carry a category, when they span
    /// fewer than [`MIN_TRAINING_LABELS`] labels, or when their text has no
    /// usable terms. On success the model is saved to the configured path;
    /// a failed save is logged and the in-memory model is kept.
    pub fn train(&self, documents: &[Document]) -> Result<bool> {
        let (texts, labels): (Vec<&str>, Vec<&str>) = documents
            .iter()
            .filter_map(|d| d.category.as_deref().map(|c| (d.content.as_str(), c)))
            .unzip();

        if texts.len() < MIN_TRAINING_DOCUMENTS {
            tracing::info!(categorized = texts.len(), "not enough categorized documents to train");
            return Ok(false);
        }
        let distinct: BTreeSet<&str> = labels.iter().copied().collect();
        if distinct.len() < MIN_TRAINING_LABELS {
            tracing::info!(labels = distinct.len(), "training needs at least two categories");
            return Ok(false);
        }

        let Some(model) = NaiveBayesModel::fit(&texts, &labels) else {
            tracing::warn!("training corpus produced an empty vocabulary");
            return Ok(false);
        };

        if let Some(path) = &self.model_path {
            if let Err(e) = model.save(path) {
                tracing::warn!(error = %e, "failed to save classifier model");
            }
        }
        tracing::info!(
            documents = texts.len(),
            classes = model.classes.len(),
            features = model.vocabulary.len(),
            "classifier model trained"
        );

        *self.model.write().map_err(|_| CoreError::LockPoisoned)? = Some(model);
        Ok(true)
    }
}

impl Classifier for ModelClassifier {
    fn name(&self) -> &'static str {
        "model"
    }

    fn classify(&self, content: &str) -> Result<String> {
        if content.trim().is_empty() {
            return self.keywords.classify_by_keywords(content);
        }
        let guard = self.model.read().map_err(|_| CoreError::LockPoisoned)?;
        match guard.as_ref().and_then(|m| m.predict(content)) {
            Some(label) => Ok(label.to_string()),
            None => self.keywords.classify_by_keywords(content),
        }
    }

    fn keywords(&self) -> &KeywordClassifier {
        &self.keywords
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: i64, content: &str, category: Option<&str>) -> Document {
        Document {
            id,
            filename: format!("{id}.txt"),
            title: format!("Doc {id}"),
            content: content.to_string(),
            size: content.len() as i64,
            media_type: "text/plain".to_string(),
            category: category.map(str::to_string),
            uploaded_at: "2024-01-01 00:00:00".to_string(),
            processing_seconds: None,
            raw: None,
        }
    }

    fn corpus() -> Vec<Document> {
        let mut docs = Vec::new();
        for i in 0..6 {
            docs.push(doc(
                i,
                "football league match season goal striker referee",
                Some("Sports"),
            ));
        }
        for i in 6..12 {
            docs.push(doc(
                i,
                "court judge verdict plaintiff defendant lawsuit statute",
                Some("Legal"),
            ));
        }
        docs
    }

    #[test]
    fn fit_and_predict_majority_vocabulary() {
        let texts = ["apple banana apple", "banana apple", "engine wheel brake", "wheel engine"];
        let labels = ["Fruit", "Fruit", "Car", "Car"];
        let model = NaiveBayesModel::fit(&texts, &labels).unwrap();
        assert_eq!(model.classes(), &["Car".to_string(), "Fruit".to_string()]);
        assert_eq!(model.predict("a ripe apple"), Some("Fruit"));
        assert_eq!(model.predict("brake and engine"), Some("Car"));
    }

    #[test]
    fn fit_rejects_featureless_corpus() {
        assert!(NaiveBayesModel::fit(&["the a", "of to"], &["X", "Y"]).is_none());
        assert!(NaiveBayesModel::fit(&[], &[]).is_none());
    }

    #[test]
    fn vocabulary_is_capped() {
        let big: String = (0..1500).map(|i| format!("term{i} ")).collect();
        let model = NaiveBayesModel::fit(&[big.as_str(), "other words"], &["A", "B"]).unwrap();
        assert_eq!(model.vocabulary_len(), MAX_FEATURES);
    }

    #[test]
    fn untrained_falls_back_to_keywords() {
        let c = ModelClassifier::new(KeywordClassifier::default(), None);
        assert!(!c.is_trained().unwrap());
        assert_eq!(
            c.classify("legal contract clause liability").unwrap(),
            "Legal"
        );
        assert_eq!(c.classify("  ").unwrap(), "Other");
    }

    #[test]
    fn train_requires_enough_documents() {
        let c = ModelClassifier::new(KeywordClassifier::default(), None);
        let few: Vec<Document> = corpus().into_iter().take(9).collect();
        assert!(!c.train(&few).unwrap());

        let mut uncategorized = corpus();
        for d in uncategorized.iter_mut().skip(3) {
            d.category = None;
        }
        assert!(!c.train(&uncategorized).unwrap());
        assert!(!c.is_trained().unwrap());
    }

    #[test]
    fn train_requires_two_labels() {
        let c = ModelClassifier::new(KeywordClassifier::default(), None);
        let single: Vec<Document> = corpus()
            .into_iter()
            .map(|mut d| {
                d.category = Some("Sports".into());
                d
            })
            .collect();
        assert!(!c.train(&single).unwrap());
    }

    #[test]
    fn trained_model_predicts_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model").join("classifier.json");

        let c = ModelClassifier::new(KeywordClassifier::default(), Some(path.clone()));
        assert!(c.train(&corpus()).unwrap());
        assert!(c.is_trained().unwrap());
        assert_eq!(c.classify("the referee stopped the match").unwrap(), "Sports");
        assert_eq!(c.classify("the judge read the verdict").unwrap(), "Legal");
        assert!(path.exists());

        let reloaded = ModelClassifier::new(KeywordClassifier::default(), Some(path));
        assert!(reloaded.is_trained().unwrap());
        assert_eq!(reloaded.classify("striker scored a goal").unwrap(), "Sports");
    }

    #[test]
    fn corrupt_model_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classifier.json");
        fs::write(&path, b"not json").unwrap();

        assert!(matches!(
            NaiveBayesModel::load(&path),
            Err(CoreError::ModelFormat { .. })
        ));
        let c = ModelClassifier::new(KeywordClassifier::default(), Some(path));
        assert!(!c.is_trained().unwrap());
    }
}
