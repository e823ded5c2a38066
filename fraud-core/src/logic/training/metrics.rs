//! Classification metrics for the held-out partition

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::logic::model::CLASS_FRAUD;

/// Binary confusion matrix (fraud is the positive class)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_negative: usize,
    pub false_positive: usize,
    pub false_negative: usize,
    pub true_positive: usize,
}

impl ConfusionMatrix {
    pub fn from_predictions(y_true: &[u8], y_pred: &[u8]) -> Self {
        let mut m = Self::default();
        for (&t, &p) in y_true.iter().zip(y_pred) {
            match (t == CLASS_FRAUD, p == CLASS_FRAUD) {
                (false, false) => m.true_negative += 1,
                (false, true) => m.false_positive += 1,
                (true, false) => m.false_negative += 1,
                (true, true) => m.true_positive += 1,
            }
        }
        m
    }

    pub fn total(&self) -> usize {
        self.true_negative + self.false_positive + self.false_negative + self.true_positive
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

impl ClassMetrics {
    fn new(tp: usize, fp: usize, fn_: usize) -> Self {
        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        Self {
            precision,
            recall,
            f1,
            support: tp + fn_,
        }
    }
}

/// Zero when the denominator is zero
fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Per-class and averaged metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub legitimate: ClassMetrics,
    pub fraud: ClassMetrics,
    pub accuracy: f64,
    pub macro_avg: ClassMetrics,
    pub weighted_avg: ClassMetrics,
    pub confusion: ConfusionMatrix,
}

impl ClassificationReport {
    pub fn from_predictions(y_true: &[u8], y_pred: &[u8]) -> Self {
        let c = ConfusionMatrix::from_predictions(y_true, y_pred);

        let legitimate = ClassMetrics::new(c.true_negative, c.false_negative, c.false_positive);
        let fraud = ClassMetrics::new(c.true_positive, c.false_positive, c.false_negative);
        let total = c.total();

        let macro_avg = ClassMetrics {
            precision: (legitimate.precision + fraud.precision) / 2.0,
            recall: (legitimate.recall + fraud.recall) / 2.0,
            f1: (legitimate.f1 + fraud.f1) / 2.0,
            support: total,
        };

        let weight = |a: f64, b: f64| {
            if total == 0 {
                0.0
            } else {
                (a * legitimate.support as f64 + b * fraud.support as f64) / total as f64
            }
        };
        let weighted_avg = ClassMetrics {
            precision: weight(legitimate.precision, fraud.precision),
            recall: weight(legitimate.recall, fraud.recall),
            f1: weight(legitimate.f1, fraud.f1),
            support: total,
        };

        Self {
            legitimate,
            fraud,
            accuracy: ratio(c.true_negative + c.true_positive, total),
            macro_avg,
            weighted_avg,
            confusion: c,
        }
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, name: &str, m: &ClassMetrics) -> fmt::Result {
    writeln!(
        f,
        "{:>14} {:>10.2} {:>10.2} {:>10.2} {:>10}",
        name, m.precision, m.recall, m.f1, m.support
    )
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>14} {:>10} {:>10} {:>10} {:>10}", "", "precision", "recall", "f1-score", "support")?;
        writeln!(f)?;
        write_row(f, "0", &self.legitimate)?;
        write_row(f, "1", &self.fraud)?;
        writeln!(f)?;
        writeln!(
            f,
            "{:>14} {:>10} {:>10} {:>10.2} {:>10}",
            "accuracy", "", "", self.accuracy, self.confusion.total()
        )?;
        write_row(f, "macro avg", &self.macro_avg)?;
        write_row(f, "weighted avg", &self.weighted_avg)?;
        writeln!(f)?;
        writeln!(f, "Confusion matrix (rows = actual, cols = predicted):")?;
        writeln!(f, "{:>14} {:>10} {:>10}", "", "0", "1")?;
        writeln!(
            f,
            "{:>14} {:>10} {:>10}",
            "0", self.confusion.true_negative, self.confusion.false_positive
        )?;
        write!(
            f,
            "{:>14} {:>10} {:>10}",
            "1", self.confusion.false_negative, self.confusion.true_positive
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confusion_matrix() {
        let y_true = [0, 0, 0, 1, 1, 1];
        let y_pred = [0, 1, 0, 1, 0, 1];
        let c = ConfusionMatrix::from_predictions(&y_true, &y_pred);
        assert_eq!(c.true_negative, 2);
        assert_eq!(c.false_positive, 1);
        assert_eq!(c.false_negative, 1);
        assert_eq!(c.true_positive, 2);
    }

    #[test]
    fn test_report_values() {
        // 8 legit (7 right), 2 fraud (1 right)
        let y_true = [0, 0, 0, 0, 0, 0, 0, 0, 1, 1];
        let y_pred = [0, 0, 0, 0, 0, 0, 0, 1, 1, 0];
        let r = ClassificationReport::from_predictions(&y_true, &y_pred);

        assert!((r.fraud.precision - 0.5).abs() < 1e-12);
        assert!((r.fraud.recall - 0.5).abs() < 1e-12);
        assert!((r.fraud.f1 - 0.5).abs() < 1e-12);
        assert_eq!(r.fraud.support, 2);

        assert!((r.legitimate.precision - 7.0 / 8.0).abs() < 1e-12);
        assert!((r.legitimate.recall - 7.0 / 8.0).abs() < 1e-12);
        assert_eq!(r.legitimate.support, 8);

        assert!((r.accuracy - 0.8).abs() < 1e-12);
        assert!((r.macro_avg.recall - (0.875 + 0.5) / 2.0).abs() < 1e-12);
        assert!((r.weighted_avg.recall - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_no_positive_predictions() {
        let r = ClassificationReport::from_predictions(&[0, 1], &[0, 0]);
        assert_eq!(r.fraud.precision, 0.0);
        assert_eq!(r.fraud.recall, 0.0);
        assert_eq!(r.fraud.f1, 0.0);
    }

    #[test]
    fn test_display_has_both_classes() {
        let r = ClassificationReport::from_predictions(&[0, 1, 1], &[0, 1, 0]);
        let text = r.to_string();
        assert!(text.contains("precision"));
        assert!(text.contains("macro avg"));
        assert!(text.contains("weighted avg"));
        assert!(text.contains("Confusion matrix"));
    }
}
