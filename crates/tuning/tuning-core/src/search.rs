//! Randomized hyperparameter search with stratified cross-validation.

use crate::metrics::ConfusionMatrix;
use crate::validation::StratifiedKFold;
use classifier_api::BoosterParams;
use classifier_core::GradientBoostedClassifier;
use classifier_spi::Classifier;
use data_spi::Dataset;
use rand::seq::index;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, info, warn};
use tuning_api::SearchConfig;
use tuning_spi::{
    CandidateScore, ParameterSpace, Result, SearchResult, TuningError, Validator,
};

/// Training and held-out rows of one fold.
struct Fold {
    train: Dataset,
    test: Dataset,
}

/// Randomized search over a booster parameter grid.
///
/// Candidates are drawn without replacement with a seeded generator. Every
/// (candidate x fold) fit is an independent task on a bounded rayon pool;
/// scores are reduced in candidate order, so the outcome does not depend on
/// scheduling.
///
/// # Example
///
/// ```rust,ignore
/// let search = RandomizedSearch::new(SearchConfig::default());
/// let base = BoosterParams::default().with_scale_pos_weight(ratio);
/// let result = search.run(&train, &base)?;
/// println!("best f1 {:.4}: {}", result.best_score, result.best_params);
/// ```
#[derive(Debug, Clone)]
pub struct RandomizedSearch {
    config: SearchConfig,
}

impl RandomizedSearch {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Sample grid indices in draw order.
    pub fn sample_candidates(&self) -> Result<Vec<usize>> {
        self.config.validate()?;
        let total = self.config.grid.combinations();
        let n_iter = if self.config.n_iter > total {
            warn!(
                requested = self.config.n_iter,
                available = total,
                "n_iter exceeds grid size, evaluating every configuration"
            );
            total
        } else {
            self.config.n_iter
        };

        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        Ok(index::sample(&mut rng, total, n_iter).into_vec())
    }

    /// Run the search with stratified K-fold validation.
    pub fn run(&self, dataset: &Dataset, base: &BoosterParams) -> Result<SearchResult> {
        self.run_with(dataset, base, &StratifiedKFold::new(self.config.folds))
    }

    /// Run the search with a caller-supplied validator.
    pub fn run_with(
        &self,
        dataset: &Dataset,
        base: &BoosterParams,
        validator: &dyn Validator,
    ) -> Result<SearchResult> {
        let grid_indices = self.sample_candidates()?;
        let candidates: Vec<BoosterParams> = grid_indices
            .iter()
            .map(|&i| self.config.grid.candidate(i, base))
            .collect();

        let folds: Vec<Fold> = validator
            .splits(dataset.labels())?
            .into_iter()
            .map(|split| Fold {
                train: dataset.subset(&split.train),
                test: dataset.subset(&split.test),
            })
            .collect();
        let n_folds = folds.len();
        if n_folds == 0 {
            return Err(TuningError::InvalidConfig("validator produced no folds".into()));
        }

        info!(
            candidates = candidates.len(),
            folds = n_folds,
            workers = self.config.workers,
            "starting randomized search"
        );

        let tasks: Vec<(usize, usize)> = (0..candidates.len())
            .flat_map(|c| (0..n_folds).map(move |f| (c, f)))
            .collect();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers)
            .build()
            .map_err(|e| TuningError::WorkerPool(e.to_string()))?;

        let objective = self.config.objective;
        let scores: Vec<Result<f64>> = pool.install(|| {
            tasks
                .par_iter()
                .map(|&(c, f)| {
                    let score = score_fold(&candidates[c], &folds[f], objective)?;
                    debug!(candidate = c, fold = f, score, "fold scored");
                    Ok(score)
                })
                .collect()
        });

        let mut scored = Vec::with_capacity(candidates.len());
        let mut scores = scores.into_iter();
        for (grid_index, params) in grid_indices.into_iter().zip(candidates) {
            let fold_scores = scores
                .by_ref()
                .take(n_folds)
                .collect::<Result<Vec<f64>>>()?;
            let mean_score = fold_scores.iter().sum::<f64>() / n_folds as f64;
            scored.push(CandidateScore {
                grid_index,
                params,
                fold_scores,
                mean_score,
            });
        }

        let best_candidate = best_index(&scored);
        let best = &scored[best_candidate];
        info!(
            score = best.mean_score,
            objective = %objective,
            params = %best.params,
            "search finished"
        );

        Ok(SearchResult {
            best_params: best.params,
            best_score: best.mean_score,
            best_candidate,
            objective,
            evaluations: scored.len() * n_folds,
            candidates: scored,
        })
    }
}

/// Fit on the fold's training rows and score its held-out rows.
fn score_fold(
    params: &BoosterParams,
    fold: &Fold,
    objective: tuning_spi::Objective,
) -> Result<f64> {
    let model = GradientBoostedClassifier::fit(params, &fold.train)?;
    let predicted = fold
        .test
        .features()
        .iter()
        .map(|row| model.predict(row).map(|p| p.label))
        .collect::<classifier_spi::Result<Vec<u8>>>()?;
    Ok(ConfusionMatrix::from_labels(&predicted, fold.test.labels()).score(objective))
}

/// Index of the highest mean score; the earliest wins ties.
fn best_index(scored: &[CandidateScore]) -> usize {
    let mut best = 0;
    for (i, candidate) in scored.iter().enumerate().skip(1) {
        if candidate.mean_score > scored[best].mean_score {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_spi::{FeatureVector, FEATURE_COUNT};
    use tuning_api::{ParamGrid, SearchBuilder};

    fn dataset(n: usize) -> Dataset {
        let mut features = Vec::with_capacity(n);
        let mut labels = Vec::with_capacity(n);
        for i in 0..n {
            let positive = i % 4 == 0;
            let mut row = [0.0; FEATURE_COUNT];
            row[0] = if positive { 100.0 + (i % 9) as f64 } else { (i % 11) as f64 };
            row[1] = ((i * 7) % 5) as f64;
            features.push(FeatureVector::new(row));
            labels.push(u8::from(positive));
        }
        Dataset::new(features, labels).unwrap()
    }

    fn small_config() -> SearchConfig {
        SearchBuilder::new()
            .n_estimators(&[5, 10])
            .learning_rate(&[0.1, 0.3])
            .max_depth(&[1, 2])
            .subsample(&[0.8, 1.0])
            .colsample_bytree(&[1.0])
            .gamma(&[0.0])
            .min_child_weight(&[1.0])
            .iterations(4)
            .k_fold(3)
            .seed(42)
            .workers(2)
            .build()
    }

    #[test]
    fn test_sampling_is_distinct_and_seeded() {
        let search = RandomizedSearch::new(SearchConfig::default());
        let a = search.sample_candidates().unwrap();
        let b = search.sample_candidates().unwrap();
        assert_eq!(a.len(), 50);
        assert_eq!(a, b);

        let mut unique = a.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), 50);
        assert!(a.iter().all(|&i| i < 3888));
    }

    #[test]
    fn test_sampling_capped_at_grid_size() {
        let config = SearchConfig::default()
            .with_grid(ParamGrid::single(&BoosterParams::default()))
            .with_n_iter(10);
        let picked = RandomizedSearch::new(config).sample_candidates().unwrap();
        assert_eq!(picked, vec![0]);
    }

    #[test]
    fn test_search_finds_separating_model() {
        let result = RandomizedSearch::new(small_config())
            .run(&dataset(60), &BoosterParams::default())
            .unwrap();

        assert_eq!(result.candidates.len(), 4);
        assert_eq!(result.evaluations, 12);
        assert!(result.candidates.iter().all(|c| c.fold_scores.len() == 3));
        assert!(result.best_score > 0.9);
        assert_eq!(
            result.best_params,
            result.candidates[result.best_candidate].params
        );
    }

    #[test]
    fn test_search_is_deterministic_across_worker_counts() {
        let data = dataset(60);
        let base = BoosterParams::default().with_scale_pos_weight(3.0);
        let one = RandomizedSearch::new(small_config().with_workers(1))
            .run(&data, &base)
            .unwrap();
        let four = RandomizedSearch::new(small_config().with_workers(4))
            .run(&data, &base)
            .unwrap();

        assert_eq!(one.best_candidate, four.best_candidate);
        assert_eq!(one.best_params, four.best_params);
        assert_eq!(one.candidates, four.candidates);
    }

    #[test]
    fn test_base_fields_reach_candidates() {
        let base = BoosterParams::default().with_scale_pos_weight(3.0);
        let result = RandomizedSearch::new(small_config())
            .run(&dataset(60), &base)
            .unwrap();
        assert!(result
            .candidates
            .iter()
            .all(|c| c.params.scale_pos_weight == 3.0));
    }

    #[test]
    fn test_ties_go_to_earliest() {
        let make = |mean_score| CandidateScore {
            grid_index: 0,
            params: BoosterParams::default(),
            fold_scores: vec![mean_score],
            mean_score,
        };
        assert_eq!(best_index(&[make(0.5), make(0.8), make(0.8)]), 1);
        assert_eq!(best_index(&[make(0.7)]), 0);
    }

    #[test]
    fn test_degenerate_fold_labels() {
        let labels: Vec<u8> = (0..20).map(|i| u8::from(i == 0)).collect();
        let features = vec![FeatureVector::zeros(); 20];
        let data = Dataset::new(features, labels).unwrap();
        let err = RandomizedSearch::new(small_config())
            .run(&data, &BoosterParams::default())
            .unwrap_err();
        assert!(matches!(err, TuningError::ClassTooSmall { label: 1, .. }));
    }
}
