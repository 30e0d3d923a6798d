//! Per-epoch loss history

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{TrainError, TrainResult};

const Y_LABEL: &str = "the cumulative log loss";
const X_LABEL: &str = "epoch";

/// Append-only list of cumulative losses, one per epoch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LossHistory {
    losses: Vec<f64>,
    created_at: DateTime<Utc>,
}

impl Default for LossHistory {
    fn default() -> Self {
        Self {
            losses: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

impl LossHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, loss: f64) {
        self.losses.push(loss);
    }

    pub fn losses(&self) -> &[f64] {
        &self.losses
    }

    pub fn len(&self) -> usize {
        self.losses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.losses.is_empty()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Loss gained during each epoch, derived from the cumulative values
    pub fn per_epoch(&self) -> Vec<f64> {
        let mut prev = 0.0;
        self.losses
            .iter()
            .map(|&loss| {
                let delta = loss - prev;
                prev = loss;
                delta
            })
            .collect()
    }

    /// Draw a text chart of loss against epoch.
    ///
    /// `width` and `height` size the plot area in characters; both are
    /// clamped to at least 2.
    pub fn render(&self, width: usize, height: usize) -> String {
        if self.losses.is_empty() {
            return format!("{}: no epochs recorded\n", Y_LABEL);
        }

        let width = width.max(2);
        let height = height.max(2);
        let n = self.losses.len();

        let (mut lo, mut hi) = self
            .losses
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if (hi - lo).abs() < f64::EPSILON {
            lo -= 0.5;
            hi += 0.5;
        }

        let mut grid = vec![vec![' '; width]; height];
        for (i, &loss) in self.losses.iter().enumerate() {
            let x = if n == 1 { 0 } else { i * (width - 1) / (n - 1) };
            let y = ((loss - lo) / (hi - lo) * (height - 1) as f64).round() as usize;
            grid[height - 1 - y.min(height - 1)][x] = '*';
        }

        let mut out = format!("{}\n", Y_LABEL);
        for (row_idx, row) in grid.iter().enumerate() {
            let level = height - 1 - row_idx;
            let label = if level == height - 1 || level == 0 || level == (height - 1) / 2 {
                let value = lo + (hi - lo) * level as f64 / (height - 1) as f64;
                format!("{:>12.4e}", value)
            } else {
                " ".repeat(12)
            };
            out.push_str(&label);
            out.push_str(" |");
            out.extend(row.iter());
            out.push('\n');
        }

        out.push_str(&" ".repeat(13));
        out.push('+');
        out.push_str(&"-".repeat(width));
        out.push('\n');

        let last = n.to_string();
        let gap = width.saturating_sub(1 + last.len());
        out.push_str(&" ".repeat(14));
        out.push('1');
        if n > 1 {
            out.push_str(&" ".repeat(gap));
            out.push_str(&last);
        }
        out.push('\n');
        out.push_str(&" ".repeat(14 + width.saturating_sub(X_LABEL.len()) / 2));
        out.push_str(X_LABEL);
        out.push('\n');
        out
    }

    pub fn save(&self, path: &Path) -> TrainResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|err| TrainError::Io {
                path: parent.to_path_buf(),
                err,
            })?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|err| TrainError::Io {
            path: path.to_path_buf(),
            err,
        })?;
        tracing::info!(path = %path.display(), epochs = self.len(), "Saved loss history");
        Ok(())
    }

    pub fn load(path: &Path) -> TrainResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|err| TrainError::Io {
            path: path.to_path_buf(),
            err,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn history(values: &[f64]) -> LossHistory {
        let mut h = LossHistory::new();
        for &v in values {
            h.push(v);
        }
        h
    }

    #[test]
    fn test_per_epoch() {
        let h = history(&[10.0, 15.0, 18.0]);
        assert_eq!(h.per_epoch(), vec![10.0, 5.0, 3.0]);
    }

    #[test]
    fn test_render() {
        let h = history(&[100.0, 180.0, 240.0, 290.0]);
        let chart = h.render(20, 5);
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(lines[0], Y_LABEL);
        // title, plot rows, axis, tick labels, axis label
        assert_eq!(lines.len(), 1 + 5 + 3);
        assert_eq!(chart.matches('*').count(), 4);
        assert!(lines[1].contains("2.9000e2"));
        assert!(lines[5].contains("1.0000e2"));
        assert!(lines.last().unwrap().trim() == X_LABEL);
    }

    #[test]
    fn test_render_flat_and_empty() {
        let chart = history(&[3.0]).render(10, 3);
        assert_eq!(chart.matches('*').count(), 1);

        let empty = LossHistory::new().render(10, 3);
        assert!(empty.contains("no epochs recorded"));
    }

    #[test]
    fn test_save_load() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("logs/loss.json");
        let h = history(&[1.0, 2.0]);
        h.save(&path)?;
        assert_eq!(LossHistory::load(&path)?, h);
        Ok(())
    }
}
