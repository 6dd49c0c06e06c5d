//! Binary classification metrics.
//!
//! Undefined ratios (no predicted or no actual members of a class) count as
//! zero rather than failing.

use classifier_spi::{NEGATIVE_CLASS_NAME, POSITIVE_CLASS_NAME};
use std::fmt;
use tuning_spi::Objective;

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn harmonic(precision: f64, recall: f64) -> f64 {
    if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    }
}

/// Counts of predicted against actual labels, with 1 as the positive class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionMatrix {
    pub tp: usize,
    pub fp: usize,
    pub tn: usize,
    pub fn_count: usize,
}

impl ConfusionMatrix {
    /// Tally paired predictions and ground-truth labels.
    pub fn from_labels(predicted: &[u8], actual: &[u8]) -> Self {
        debug_assert_eq!(predicted.len(), actual.len());
        let mut matrix = Self::default();
        for (&pred, &label) in predicted.iter().zip(actual) {
            match (pred, label) {
                (1, 1) => matrix.tp += 1,
                (1, _) => matrix.fp += 1,
                (_, 1) => matrix.fn_count += 1,
                _ => matrix.tn += 1,
            }
        }
        matrix
    }

    pub fn total(&self) -> usize {
        self.tp + self.fp + self.tn + self.fn_count
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.tp + self.tn, self.total())
    }

    /// Positive-class precision.
    pub fn precision(&self) -> f64 {
        ratio(self.tp, self.tp + self.fp)
    }

    /// Positive-class recall.
    pub fn recall(&self) -> f64 {
        ratio(self.tp, self.tp + self.fn_count)
    }

    /// Positive-class F1.
    pub fn f1(&self) -> f64 {
        harmonic(self.precision(), self.recall())
    }

    pub fn score(&self, objective: Objective) -> f64 {
        match objective {
            Objective::F1 => self.f1(),
            Objective::Precision => self.precision(),
            Objective::Recall => self.recall(),
            Objective::Accuracy => self.accuracy(),
        }
    }

    /// Metrics of one class, treating that class as positive.
    pub fn class_metrics(&self, label: u8) -> ClassMetrics {
        let (hit, false_alarm, miss) = if label == 1 {
            (self.tp, self.fp, self.fn_count)
        } else {
            (self.tn, self.fn_count, self.fp)
        };
        let precision = ratio(hit, hit + false_alarm);
        let recall = ratio(hit, hit + miss);
        ClassMetrics {
            precision,
            recall,
            f1: harmonic(precision, recall),
            support: hit + miss,
        }
    }
}

/// Precision, recall, F1 and support of one class or one average.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Per-class report with accuracy, macro and support-weighted averages.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    /// Indexed by label.
    pub classes: [ClassMetrics; 2],
    pub accuracy: f64,
    pub macro_avg: ClassMetrics,
    pub weighted_avg: ClassMetrics,
    pub confusion: ConfusionMatrix,
}

impl ClassificationReport {
    pub fn from_labels(predicted: &[u8], actual: &[u8]) -> Self {
        Self::from_confusion(ConfusionMatrix::from_labels(predicted, actual))
    }

    pub fn from_confusion(confusion: ConfusionMatrix) -> Self {
        let classes = [confusion.class_metrics(0), confusion.class_metrics(1)];
        let total = confusion.total();

        let mean = |pick: fn(&ClassMetrics) -> f64| (pick(&classes[0]) + pick(&classes[1])) / 2.0;
        let weighted = |pick: fn(&ClassMetrics) -> f64| {
            if total == 0 {
                0.0
            } else {
                classes
                    .iter()
                    .map(|c| pick(c) * c.support as f64)
                    .sum::<f64>()
                    / total as f64
            }
        };

        let macro_avg = ClassMetrics {
            precision: mean(|c| c.precision),
            recall: mean(|c| c.recall),
            f1: mean(|c| c.f1),
            support: total,
        };
        let weighted_avg = ClassMetrics {
            precision: weighted(|c| c.precision),
            recall: weighted(|c| c.recall),
            f1: weighted(|c| c.f1),
            support: total,
        };

        Self {
            classes,
            accuracy: confusion.accuracy(),
            macro_avg,
            weighted_avg,
            confusion,
        }
    }

    /// F1 of the confirmed-planet class.
    pub fn positive_f1(&self) -> f64 {
        self.classes[1].f1
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>20} {:>10} {:>10} {:>10} {:>10}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for (name, m) in [NEGATIVE_CLASS_NAME, POSITIVE_CLASS_NAME]
            .iter()
            .zip(&self.classes)
        {
            writeln!(
                f,
                "{:>20} {:>10.2} {:>10.2} {:>10.2} {:>10}",
                name, m.precision, m.recall, m.f1, m.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>20} {:>10} {:>10} {:>10.2} {:>10}",
            "accuracy",
            "",
            "",
            self.accuracy,
            self.confusion.total()
        )?;
        for (name, m) in [("macro avg", &self.macro_avg), ("weighted avg", &self.weighted_avg)] {
            writeln!(
                f,
                "{:>20} {:>10.2} {:>10.2} {:>10.2} {:>10}",
                name, m.precision, m.recall, m.f1, m.support
            )?;
        }
        Ok(())
    }
}
