//! Route priority scoring for dock assignment.
//!
//! Each route is described by five signals. Signals are normalized by their
//! maximum over the routes being scheduled and combined with
//! [`PriorityWeights`]; higher scores load first.

use serde::{Deserialize, Serialize};

use crate::ga::DEPOT;
use crate::models::Instance;

/// Windows narrower than this (hours) add to a route's tightness risk.
const TIGHT_WINDOW_SPAN: f64 = 3.0;

/// Weights of the five priority signals.
///
/// # Examples
///
/// ```
/// use u_dock_routing::scheduling::PriorityWeights;
///
/// let w = PriorityWeights::default();
/// let sum = w.critical_density + w.duration + w.critical_count
///     + w.tightness + w.traffic_sensitivity;
/// assert!((sum - 1.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriorityWeights {
    /// Share of critical clients on the route.
    pub critical_density: f64,
    /// Estimated route duration.
    pub duration: f64,
    /// Number of critical clients.
    pub critical_count: f64,
    /// Risk from narrow windows.
    pub tightness: f64,
    /// Exposure to travel-time variation across bands.
    pub traffic_sensitivity: f64,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            critical_density: 0.40,
            duration: 0.30,
            critical_count: 0.15,
            tightness: 0.10,
            traffic_sensitivity: 0.05,
        }
    }
}

/// Raw (unnormalized) priority signals of one route.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RouteSignals {
    /// Critical clients divided by route length.
    pub critical_density: f64,
    /// Travel plus service hours, using the band active at the minimum
    /// departure time.
    pub duration: f64,
    /// Number of critical clients.
    pub critical_count: f64,
    /// Sum of `1 / (span + 0.1)` over clients with a window narrower than 3 h.
    pub tightness: f64,
    /// Sum over legs of `(slowest - fastest) / fastest` across bands.
    pub traffic_sensitivity: f64,
}

impl RouteSignals {
    /// Measures a route. Empty routes yield all-zero signals.
    pub fn measure(instance: &Instance, route: &[usize]) -> Self {
        if route.is_empty() {
            return Self::default();
        }

        let travel = instance.travel();
        let matrix = travel.matrix_at(instance.params().min_departure);

        let mut critical = 0usize;
        let mut tightness = 0.0;
        let mut service = 0.0;
        for &id in route {
            let client = instance.client(id);
            if client.is_critical() {
                critical += 1;
            }
            let span = client.window().span();
            if span < TIGHT_WINDOW_SPAN {
                tightness += 1.0 / (span + 0.1);
            }
            service += client.service_time();
        }

        let legs = std::iter::once(DEPOT)
            .chain(route.iter().copied())
            .zip(route.iter().copied().chain(std::iter::once(DEPOT)));
        let mut driving = 0.0;
        let mut sensitivity = 0.0;
        for (from, to) in legs {
            driving += matrix.get(from, to);
            let (fast, slow) = travel.leg_range(from, to);
            if fast > 0.0 {
                sensitivity += (slow - fast) / fast;
            }
        }

        Self {
            critical_density: critical as f64 / route.len() as f64,
            duration: driving + service,
            critical_count: critical as f64,
            tightness,
            traffic_sensitivity: sensitivity,
        }
    }
}

/// Weighted, max-normalized score for each route's signals.
pub fn priority_scores(signals: &[RouteSignals], weights: &PriorityWeights) -> Vec<f64> {
    let max_of = |f: fn(&RouteSignals) -> f64| signals.iter().map(f).fold(0.0, f64::max);
    let norm = |value: f64, max: f64| if max > 0.0 { value / max } else { 0.0 };

    let max_density = max_of(|s| s.critical_density);
    let max_duration = max_of(|s| s.duration);
    let max_count = max_of(|s| s.critical_count);
    let max_tightness = max_of(|s| s.tightness);
    let max_sensitivity = max_of(|s| s.traffic_sensitivity);

    signals
        .iter()
        .map(|s| {
            weights.critical_density * norm(s.critical_density, max_density)
                + weights.duration * norm(s.duration, max_duration)
                + weights.critical_count * norm(s.critical_count, max_count)
                + weights.tightness * norm(s.tightness, max_tightness)
                + weights.traffic_sensitivity * norm(s.traffic_sensitivity, max_sensitivity)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{fixtures, Client, Parameters, TimeWindow};

    #[test]
    fn test_signals_of_empty_route() {
        let inst = fixtures::uniform(2, 1.0, vec![], Parameters::default());
        assert_eq!(RouteSignals::measure(&inst, &[]), RouteSignals::default());
    }

    #[test]
    fn test_signals_counts() {
        let inst = fixtures::with_clients(
            vec![
                Client::new(1).critical().with_service_time(0.5),
                Client::new(2).with_window(TimeWindow::new(4.0, 5.0).expect("valid")),
                Client::new(3),
            ],
            0.25,
            vec![],
            Parameters::default(),
        );
        let s = RouteSignals::measure(&inst, &[1, 2, 3]);
        assert!((s.critical_density - 1.0 / 3.0).abs() < 1e-10);
        assert_eq!(s.critical_count, 1.0);
        // 4 legs of 0.25 plus 0.5 service
        assert!((s.duration - 1.5).abs() < 1e-10);
        assert!((s.tightness - 1.0 / 1.1).abs() < 1e-10);
        // single band: no variation
        assert_eq!(s.traffic_sensitivity, 0.0);
    }

    #[test]
    fn test_traffic_sensitivity_with_bands() {
        let inst = fixtures::mixed();
        let s = RouteSignals::measure(&inst, &[1, 2]);
        // slow band is 1.5x the fast one on every leg
        assert!((s.traffic_sensitivity - 1.5).abs() < 1e-10);
    }

    #[test]
    fn test_scores_normalized() {
        let signals = [
            RouteSignals {
                critical_density: 1.0,
                duration: 4.0,
                critical_count: 2.0,
                tightness: 0.0,
                traffic_sensitivity: 0.0,
            },
            RouteSignals {
                critical_density: 0.5,
                duration: 8.0,
                critical_count: 1.0,
                tightness: 0.0,
                traffic_sensitivity: 0.0,
            },
        ];
        let scores = priority_scores(&signals, &PriorityWeights::default());
        assert!((scores[0] - (0.40 + 0.15 + 0.30 * 0.5)).abs() < 1e-10);
        assert!((scores[1] - (0.20 + 0.075 + 0.30)).abs() < 1e-10);
    }

    #[test]
    fn test_scores_all_zero() {
        let scores = priority_scores(&[RouteSignals::default(); 3], &PriorityWeights::default());
        assert_eq!(scores, vec![0.0; 3]);
    }
}
