//! Cross-validation strategies.

use tuning_spi::{FoldSplit, Result, TuningError, Validator};

/// Stratified K-fold cross-validator without shuffling.
///
/// Rows of each class keep their original order and are dealt to folds in
/// contiguous chunks. Chunk sizes differ by at most one, with the larger
/// chunks going to the first folds, so every fold preserves the class
/// proportions as closely as possible.
#[derive(Debug, Clone)]
pub struct StratifiedKFold {
    folds: usize,
}

impl StratifiedKFold {
    pub fn new(folds: usize) -> Self {
        Self { folds }
    }
}

impl Validator for StratifiedKFold {
    fn splits(&self, labels: &[u8]) -> Result<Vec<FoldSplit>> {
        if self.folds < 2 {
            return Err(TuningError::InvalidConfig("folds must be >= 2".into()));
        }
        if labels.len() < self.folds {
            return Err(TuningError::InsufficientData {
                required: self.folds,
                got: labels.len(),
            });
        }

        // fold_of[i] = fold that row i is tested in
        let mut fold_of = vec![0usize; labels.len()];
        for class in [0u8, 1u8] {
            let members: Vec<usize> = labels
                .iter()
                .enumerate()
                .filter(|(_, &label)| label == class)
                .map(|(i, _)| i)
                .collect();

            if members.len() < self.folds {
                return Err(TuningError::ClassTooSmall {
                    label: class,
                    members: members.len(),
                    folds: self.folds,
                });
            }

            let base = members.len() / self.folds;
            let extra = members.len() % self.folds;
            let mut start = 0;
            for fold in 0..self.folds {
                let size = base + usize::from(fold < extra);
                for &row in &members[start..start + size] {
                    fold_of[row] = fold;
                }
                start += size;
            }
        }

        Ok((0..self.folds)
            .map(|fold| {
                let (test, train): (Vec<usize>, Vec<usize>) =
                    (0..labels.len()).partition(|&row| fold_of[row] == fold);
                FoldSplit { train, test }
            })
            .collect())
    }

    fn n_splits(&self) -> usize {
        self.folds
    }
}
