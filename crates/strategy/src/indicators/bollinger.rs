use serde::{Deserialize, Serialize};

/// Bollinger Bands: SMA(period) ± k population standard deviations.
#[derive(Debug, Clone)]
pub struct Bollinger {
    pub period: usize,
    pub std_dev: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerValue {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl Default for Bollinger {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev: 2.0,
        }
    }
}

impl Bollinger {
    pub fn latest(&self, closes: &[f64]) -> Option<BollingerValue> {
        if self.period == 0 || closes.len() < self.period {
            return None;
        }
        let window = &closes[closes.len() - self.period..];
        let n = self.period as f64;
        let middle = window.iter().sum::<f64>() / n;
        let variance = window.iter().map(|v| (v - middle).powi(2)).sum::<f64>() / n;
        let width = self.std_dev * variance.sqrt();

        Some(BollingerValue {
            upper: middle + width,
            middle,
            lower: middle - width,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_series_collapses_bands() {
        let v = Bollinger::default().latest(&[1.2; 25]).unwrap();
        assert!((v.upper - v.lower).abs() < 1e-12);
        assert!((v.middle - 1.2).abs() < 1e-12);
    }

    #[test]
    fn bands_use_population_deviation() {
        // mean 3, population sd sqrt(2)
        let bb = Bollinger { period: 5, std_dev: 2.0 };
        let v = bb.latest(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!((v.upper - (3.0 + 2.0 * 2f64.sqrt())).abs() < 1e-12);
        assert!((v.lower - (3.0 - 2.0 * 2f64.sqrt())).abs() < 1e-12);
    }

    #[test]
    fn too_short() {
        assert!(Bollinger::default().latest(&[1.0; 19]).is_none());
    }
}
