//! Forest adapter: Implementation of `Classifier` over a JSON artifact.
//!
//! The deployed model is a random forest exported to JSON by the
//! training pipeline: flat node arrays per tree, one class vote per
//! tree, majority wins. The export embeds the feature names and class
//! labels it was trained on, and the loader refuses any artifact whose
//! contract does not match the compiled-in encoding tables — a mismatch
//! there would produce silently wrong predictions, not errors.
//!
//! # Integrity
//!
//! If a `<artifact>.sha256` sidecar is present next to the artifact,
//! the artifact bytes must match it. Absence of the sidecar is allowed.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::{FeatureVector, SleepDisorder, FEATURE_NAMES, NUM_FEATURES};
use crate::ports::{Classifier, ClassifierError};

/// Artifact file names probed when the configured path is a directory,
/// in preference order.
const ARTIFACT_CANDIDATES: [&str; 2] = ["sleep_model.json", "model.json"];

/// Node `feature` value marking a leaf (sklearn export convention).
const LEAF_FEATURE: i32 = -2;

/// Supported artifact format version.
const ARTIFACT_VERSION: u32 = 1;

/// One node of a decision tree, in the flat-array layout produced by
/// the training export. Internal nodes route on `features[feature] <=
/// threshold`; leaves carry the voted class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    /// Feature index, or `LEAF_FEATURE` for a leaf
    pub feature: i32,
    pub threshold: f64,
    /// Child index for `value <= threshold`
    pub left: i32,
    /// Child index for `value > threshold`
    pub right: i32,
    /// Majority class at this node (authoritative only at leaves)
    pub class: u32,
}

/// A single decision tree as a flat node array rooted at index 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

/// Model parameters exported by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedForestModel {
    pub version: u32,
    pub feature_names: Vec<String>,
    pub class_labels: Vec<String>,
    pub trees: Vec<DecisionTree>,
}

/// Pre-fit random-forest classifier.
///
/// Immutable after [`ForestClassifier::load`]; inference walks the
/// trees without touching shared state, so a loaded instance is safe to
/// share across threads.
#[derive(Debug)]
pub struct ForestClassifier {
    model: ExportedForestModel,
}

impl ForestClassifier {
    /// Load the artifact from `path` (a file, or a directory probed for
    /// the standard artifact names).
    ///
    /// This is the process's one-time initialization: it either returns
    /// a fully usable classifier or an error the caller must treat as
    /// fatal configuration failure.
    ///
    /// # Errors
    /// Returns `ClassifierError` if the artifact is missing, corrupt,
    /// fails its checksum, or violates the encoding contract.
    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let artifact_path = Self::resolve_artifact_path(path)?;

        let bytes = std::fs::read(&artifact_path)?;
        Self::verify_checksum(&artifact_path, &bytes)?;

        let model: ExportedForestModel = serde_json::from_slice(&bytes)
            .map_err(|e| ClassifierError::Artifact(format!("{artifact_path:?}: {e}")))?;

        Self::validate_model(&model)?;

        tracing::info!(
            "Loaded forest artifact from {:?} ({} trees, {} features, {} classes)",
            artifact_path,
            model.trees.len(),
            model.feature_names.len(),
            model.class_labels.len()
        );

        Ok(Self { model })
    }

    /// Number of trees in the loaded forest.
    #[must_use]
    pub fn num_trees(&self) -> usize {
        self.model.trees.len()
    }

    fn resolve_artifact_path(path: &Path) -> Result<PathBuf, ClassifierError> {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        if path.is_dir() {
            return ARTIFACT_CANDIDATES
                .iter()
                .map(|name| path.join(name))
                .find(|candidate| candidate.is_file())
                .ok_or_else(|| {
                    ClassifierError::Unavailable(format!(
                        "no artifact in {path:?} (expected one of {ARTIFACT_CANDIDATES:?})"
                    ))
                });
        }
        Err(ClassifierError::Unavailable(format!(
            "path {path:?} does not exist"
        )))
    }

    fn verify_checksum(artifact_path: &Path, bytes: &[u8]) -> Result<(), ClassifierError> {
        let sidecar = {
            let mut name = artifact_path.as_os_str().to_os_string();
            name.push(".sha256");
            PathBuf::from(name)
        };
        if !sidecar.is_file() {
            return Ok(());
        }

        let expected = std::fs::read_to_string(&sidecar)?;
        // Accept `sha256sum` output (digest followed by the file name).
        let expected = expected.split_whitespace().next().unwrap_or("");

        let digest = Sha256::digest(bytes);
        let actual: String = digest.iter().map(|b| format!("{b:02x}")).collect();

        if actual != expected.to_ascii_lowercase() {
            return Err(ClassifierError::ChecksumMismatch(
                artifact_path.display().to_string(),
            ));
        }
        Ok(())
    }

    /// Reject any artifact whose contract or tree layout is unusable.
    fn validate_model(model: &ExportedForestModel) -> Result<(), ClassifierError> {
        if model.version != ARTIFACT_VERSION {
            return Err(ClassifierError::Artifact(format!(
                "unsupported artifact version {} (expected {ARTIFACT_VERSION})",
                model.version
            )));
        }

        if model.feature_names != FEATURE_NAMES {
            return Err(ClassifierError::Artifact(format!(
                "feature names do not match the deployed encoding contract: got {:?}",
                model.feature_names
            )));
        }

        let expected_labels: Vec<&str> = SleepDisorder::ALL.iter().map(|d| d.label()).collect();
        if model.class_labels != expected_labels {
            return Err(ClassifierError::Artifact(format!(
                "class labels do not match the deployed label set: got {:?}",
                model.class_labels
            )));
        }

        if model.trees.is_empty() {
            return Err(ClassifierError::Artifact("artifact has no trees".into()));
        }

        let n_classes = model.class_labels.len();
        for (t, tree) in model.trees.iter().enumerate() {
            Self::validate_tree(t, tree, n_classes)?;
        }

        Ok(())
    }

    fn validate_tree(
        t: usize,
        tree: &DecisionTree,
        n_classes: usize,
    ) -> Result<(), ClassifierError> {
        if tree.nodes.is_empty() {
            return Err(ClassifierError::Artifact(format!("tree {t} has no nodes")));
        }

        let len = tree.nodes.len() as i64;
        for (i, node) in tree.nodes.iter().enumerate() {
            if node.feature == LEAF_FEATURE {
                if (node.class as usize) >= n_classes {
                    return Err(ClassifierError::Artifact(format!(
                        "tree {t} node {i}: leaf class {} out of range [0, {n_classes})",
                        node.class
                    )));
                }
                continue;
            }

            if node.feature < 0 || node.feature as usize >= NUM_FEATURES {
                return Err(ClassifierError::Artifact(format!(
                    "tree {t} node {i}: feature index {} out of range [0, {NUM_FEATURES})",
                    node.feature
                )));
            }

            // Children must point strictly forward in the array; this is
            // what guarantees tree walks terminate.
            for child in [node.left, node.right] {
                if i64::from(child) <= i as i64 || i64::from(child) >= len {
                    return Err(ClassifierError::Artifact(format!(
                        "tree {t} node {i}: child index {child} out of range ({i}, {len})"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Walk one tree to its leaf. Indices were bounds-checked at load.
    fn walk_tree(tree: &DecisionTree, features: &FeatureVector) -> usize {
        let mut index = 0usize;
        loop {
            let node = &tree.nodes[index];
            if node.feature == LEAF_FEATURE {
                return node.class as usize;
            }
            index = if features[node.feature as usize] <= node.threshold {
                node.left as usize
            } else {
                node.right as usize
            };
        }
    }
}

impl Classifier for ForestClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<usize, ClassifierError> {
        let mut votes = vec![0usize; self.model.class_labels.len()];
        for tree in &self.model.trees {
            votes[Self::walk_tree(tree, features)] += 1;
        }

        // Majority vote; ties resolve to the lowest class index so the
        // result is deterministic across runs.
        let mut winner = 0usize;
        for (class, &count) in votes.iter().enumerate() {
            if count > votes[winner] {
                winner = class;
            }
        }

        tracing::debug!("Forest vote tally: {:?} -> class {}", votes, winner);
        Ok(winner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn leaf(class: u32) -> TreeNode {
        TreeNode {
            feature: LEAF_FEATURE,
            threshold: 0.0,
            left: -1,
            right: -1,
            class,
        }
    }

    fn split(feature: i32, threshold: f64, left: i32, right: i32) -> TreeNode {
        TreeNode {
            feature,
            threshold,
            left,
            right,
            class: 0,
        }
    }

    /// A stump voting `low` when quality_of_sleep <= 5.5, else `high`.
    fn quality_stump(low: u32, high: u32) -> DecisionTree {
        DecisionTree {
            nodes: vec![split(4, 5.5, 1, 2), leaf(low), leaf(high)],
        }
    }

    fn valid_model(trees: Vec<DecisionTree>) -> ExportedForestModel {
        ExportedForestModel {
            version: ARTIFACT_VERSION,
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            class_labels: SleepDisorder::ALL.iter().map(|d| d.label().to_string()).collect(),
            trees,
        }
    }

    fn write_artifact(path: &Path, model: &ExportedForestModel) {
        let json = serde_json::to_string(model).expect("serialize model");
        std::fs::write(path, json).expect("write artifact");
    }

    fn features_with_quality(quality: f64) -> FeatureVector {
        let mut features = [0.0; NUM_FEATURES];
        features[4] = quality;
        features
    }

    #[test]
    fn test_shipped_artifact_loads() {
        let classifier =
            ForestClassifier::load(Path::new("models")).expect("shipped artifact should load");
        assert!(classifier.num_trees() > 0);
    }

    #[test]
    fn test_load_from_directory_prefers_sleep_model() {
        let temp = tempdir().expect("tempdir");
        write_artifact(
            &temp.path().join("sleep_model.json"),
            &valid_model(vec![quality_stump(0, 2)]),
        );
        write_artifact(
            &temp.path().join("model.json"),
            &valid_model(vec![quality_stump(0, 2), quality_stump(0, 2)]),
        );

        let classifier = ForestClassifier::load(temp.path()).expect("load artifact");
        assert_eq!(classifier.num_trees(), 1);
    }

    #[test]
    fn test_missing_artifact_is_unavailable() {
        let temp = tempdir().expect("tempdir");

        let err = ForestClassifier::load(temp.path()).expect_err("must fail");
        assert!(matches!(err, ClassifierError::Unavailable(_)));

        let err =
            ForestClassifier::load(&temp.path().join("nowhere")).expect_err("must fail");
        assert!(matches!(err, ClassifierError::Unavailable(_)));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("sleep_model.json");
        std::fs::write(&path, b"not a model").expect("write");

        let err = ForestClassifier::load(&path).expect_err("must fail");
        assert!(matches!(err, ClassifierError::Artifact(_)));
    }

    #[test]
    fn test_wrong_feature_order_rejected() {
        let temp = tempdir().expect("tempdir");
        let mut model = valid_model(vec![quality_stump(0, 2)]);
        model.feature_names.swap(0, 1);
        let path = temp.path().join("sleep_model.json");
        write_artifact(&path, &model);

        let err = ForestClassifier::load(&path).expect_err("must fail");
        assert!(matches!(err, ClassifierError::Artifact(_)));
    }

    #[test]
    fn test_wrong_class_labels_rejected() {
        let temp = tempdir().expect("tempdir");
        let mut model = valid_model(vec![quality_stump(0, 2)]);
        model.class_labels[2] = "Healthy".to_string();
        let path = temp.path().join("sleep_model.json");
        write_artifact(&path, &model);

        let err = ForestClassifier::load(&path).expect_err("must fail");
        assert!(matches!(err, ClassifierError::Artifact(_)));
    }

    #[test]
    fn test_empty_forest_rejected() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("sleep_model.json");
        write_artifact(&path, &valid_model(vec![]));

        let err = ForestClassifier::load(&path).expect_err("must fail");
        assert!(matches!(err, ClassifierError::Artifact(_)));
    }

    #[test]
    fn test_backward_child_index_rejected() {
        let temp = tempdir().expect("tempdir");
        // Child pointing at itself would loop forever if accepted.
        let tree = DecisionTree {
            nodes: vec![split(4, 5.5, 0, 2), leaf(0), leaf(2)],
        };
        let path = temp.path().join("sleep_model.json");
        write_artifact(&path, &valid_model(vec![tree]));

        let err = ForestClassifier::load(&path).expect_err("must fail");
        assert!(matches!(err, ClassifierError::Artifact(_)));
    }

    #[test]
    fn test_leaf_class_out_of_range_rejected() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("sleep_model.json");
        write_artifact(&path, &valid_model(vec![quality_stump(0, 7)]));

        let err = ForestClassifier::load(&path).expect_err("must fail");
        assert!(matches!(err, ClassifierError::Artifact(_)));
    }

    #[test]
    fn test_checksum_sidecar_verified() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("sleep_model.json");
        write_artifact(&path, &valid_model(vec![quality_stump(0, 2)]));

        let bytes = std::fs::read(&path).expect("read artifact");
        let digest = Sha256::digest(&bytes);
        let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
        let sidecar = temp.path().join("sleep_model.json.sha256");

        std::fs::write(&sidecar, format!("{hex}  sleep_model.json\n")).expect("write sidecar");
        assert!(ForestClassifier::load(&path).is_ok());

        std::fs::write(&sidecar, format!("{}  sleep_model.json\n", "0".repeat(64)))
            .expect("write sidecar");
        let err = ForestClassifier::load(&path).expect_err("must fail");
        assert!(matches!(err, ClassifierError::ChecksumMismatch(_)));
    }

    #[test]
    fn test_stump_prediction_routes_on_threshold() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("sleep_model.json");
        write_artifact(&path, &valid_model(vec![quality_stump(0, 2)]));
        let classifier = ForestClassifier::load(&path).expect("load");

        assert_eq!(classifier.predict(&features_with_quality(3.0)).unwrap(), 0);
        assert_eq!(classifier.predict(&features_with_quality(9.0)).unwrap(), 2);
        // Boundary value routes left.
        assert_eq!(classifier.predict(&features_with_quality(5.5)).unwrap(), 0);
    }

    #[test]
    fn test_majority_vote() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("sleep_model.json");
        write_artifact(
            &path,
            &valid_model(vec![
                quality_stump(0, 2),
                quality_stump(0, 2),
                quality_stump(1, 1),
            ]),
        );
        let classifier = ForestClassifier::load(&path).expect("load");

        // Low quality: votes [0, 0, 1] -> class 0 wins 2:1.
        assert_eq!(classifier.predict(&features_with_quality(2.0)).unwrap(), 0);
        // High quality: votes [2, 2, 1] -> class 2 wins 2:1.
        assert_eq!(classifier.predict(&features_with_quality(8.0)).unwrap(), 2);
    }

    #[test]
    fn test_tie_resolves_to_lowest_class_index() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("sleep_model.json");
        write_artifact(
            &path,
            &valid_model(vec![quality_stump(2, 2), quality_stump(0, 0)]),
        );
        let classifier = ForestClassifier::load(&path).expect("load");

        assert_eq!(classifier.predict(&features_with_quality(5.0)).unwrap(), 0);
    }
}
