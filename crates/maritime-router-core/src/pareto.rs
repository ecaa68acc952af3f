//! Pareto dominance, crowding distance, non-dominated sorting, and the
//! bounded archive that ties them together.

use serde::{Deserialize, Serialize};

use crate::objectives::InternalObjectives;
use crate::route::Route;

/// `a` Pareto-dominates `b` iff `a` is at least as good in every objective
/// and strictly better in at least one. Both vectors are in the internal
/// all-minimize orientation.
pub fn dominates(a: &InternalObjectives, b: &InternalObjectives) -> bool {
    let a = a.as_array();
    let b = b.as_array();
    a.iter().zip(b.iter()).all(|(x, y)| x <= y) && a.iter().zip(b.iter()).any(|(x, y)| x < y)
}

/// Crowding distance for every entry in `front`. Boundary solutions (the
/// min/max along any objective) receive `+∞`; interior solutions accumulate
/// `(next - prev) / range` per objective, skipping objectives whose range
/// is too small to normalize by.
pub fn crowding_distance(front: &[InternalObjectives]) -> Vec<f64> {
    let n = front.len();
    if n == 0 {
        return Vec::new();
    }
    if n <= 2 {
        return vec![f64::INFINITY; n];
    }

    let mut distances = vec![0.0; n];
    let n_objectives = front[0].as_array().len();

    for m in 0..n_objectives {
        let mut indices: Vec<usize> = (0..n).collect();
        indices.sort_by(|&i, &j| {
            front[i].as_array()[m]
                .partial_cmp(&front[j].as_array()[m])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        distances[indices[0]] = f64::INFINITY;
        distances[indices[n - 1]] = f64::INFINITY;

        let lo = front[indices[0]].as_array()[m];
        let hi = front[indices[n - 1]].as_array()[m];
        let range = hi - lo;
        if range < 1e-10 {
            continue;
        }

        for i in 1..n - 1 {
            let next = front[indices[i + 1]].as_array()[m];
            let prev = front[indices[i - 1]].as_array()[m];
            if distances[indices[i]].is_finite() {
                distances[indices[i]] += (next - prev) / range;
            }
        }
    }

    distances
}

/// NSGA-II style non-dominated sort. Returns a list of fronts, each a list
/// of indices into `objectives`; front 0 is the non-dominated set.
pub fn non_dominated_sort(objectives: &[InternalObjectives]) -> Vec<Vec<usize>> {
    let n = objectives.len();
    if n == 0 {
        return Vec::new();
    }

    let mut domination_count = vec![0usize; n];
    let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];

    for i in 0..n {
        for j in (i + 1)..n {
            if dominates(&objectives[i], &objectives[j]) {
                dominated_by[i].push(j);
                domination_count[j] += 1;
            } else if dominates(&objectives[j], &objectives[i]) {
                dominated_by[j].push(i);
                domination_count[i] += 1;
            }
        }
    }

    let mut fronts = Vec::new();
    let mut current: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();

    while !current.is_empty() {
        let mut next = Vec::new();
        for &i in &current {
            for &j in &dominated_by[i] {
                domination_count[j] -= 1;
                if domination_count[j] == 0 {
                    next.push(j);
                }
            }
        }
        fronts.push(current);
        current = next;
    }

    fronts
}

/// A single archived route with its objective vector and caller-supplied
/// metadata (e.g. the speed profile that produced it).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveEntry {
    pub route: Route,
    pub objectives: InternalObjectives,
    pub speeds: Vec<f64>,
}

/// Bounded non-dominated set with crowding-distance-based diversity pruning.
/// An antichain under Pareto dominance at all times.
#[derive(Debug, Clone)]
pub struct ParetoArchive {
    max_size: usize,
    entries: Vec<ArchiveEntry>,
}

impl ParetoArchive {
    pub fn new(max_size: usize) -> Self {
        Self { max_size, entries: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn all(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    /// Attempt to insert `(route, objectives, speeds)`. Returns `false` if
    /// an existing entry dominates the candidate; otherwise the candidate
    /// is inserted, every entry it dominates is removed, and the archive is
    /// truncated back to `max_size` if it now overflows.
    pub fn insert(&mut self, route: Route, objectives: InternalObjectives, speeds: Vec<f64>) -> bool {
        if self.entries.iter().any(|e| dominates(&e.objectives, &objectives)) {
            return false;
        }

        self.entries.retain(|e| !dominates(&objectives, &e.objectives));
        self.entries.push(ArchiveEntry { route, objectives, speeds });

        if self.entries.len() > self.max_size {
            self.truncate();
        }

        true
    }

    fn truncate(&mut self) {
        if self.entries.len() <= self.max_size {
            return;
        }
        let obj: Vec<InternalObjectives> = self.entries.iter().map(|e| e.objectives).collect();
        let distances = crowding_distance(&obj);

        let mut indexed: Vec<(usize, f64)> = distances.into_iter().enumerate().collect();
        // Stable sort descending by distance; ties keep original (insertion) order.
        indexed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        indexed.truncate(self.max_size);
        indexed.sort_by_key(|&(idx, _)| idx);

        self.entries = indexed.into_iter().map(|(idx, _)| self.entries[idx].clone()).collect();
    }

    /// Entry with the minimum value on objective column `k` (0=fuel,
    /// 1=time, 2=risk, 3=emissions, 4=discomfort).
    pub fn best_on(&self, k: usize) -> Option<&ArchiveEntry> {
        self.entries
            .iter()
            .min_by(|a, b| a.objectives.as_array()[k].partial_cmp(&b.objectives.as_array()[k]).unwrap())
    }

    /// Entry minimizing the weighted sum of range-normalized objectives.
    pub fn compromise(&self, weights: &[f64; 5]) -> Option<&ArchiveEntry> {
        if self.entries.is_empty() {
            return None;
        }

        let mut obj_min = [f64::INFINITY; 5];
        let mut obj_max = [f64::NEG_INFINITY; 5];
        for e in &self.entries {
            let a = e.objectives.as_array();
            for i in 0..5 {
                obj_min[i] = obj_min[i].min(a[i]);
                obj_max[i] = obj_max[i].max(a[i]);
            }
        }

        let mut best_idx = 0;
        let mut best_score = f64::INFINITY;
        for (idx, e) in self.entries.iter().enumerate() {
            let a = e.objectives.as_array();
            let mut score = 0.0;
            for i in 0..5 {
                let range = obj_max[i] - obj_min[i];
                let normalized = if range < 1e-10 { 0.0 } else { (a[i] - obj_min[i]) / range };
                score += normalized * weights[i];
            }
            if score < best_score {
                best_score = score;
                best_idx = idx;
            }
        }

        Some(&self.entries[best_idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::Waypoint;

    fn obj(fuel: f64, time: f64, risk: f64, emissions: f64, discomfort: f64) -> InternalObjectives {
        InternalObjectives { fuel_t: fuel, time_h: time, risk, emissions_t: emissions, discomfort }
    }

    fn route() -> Route {
        Route::new(vec![Waypoint::new(0.0, 0.0).unwrap(), Waypoint::new(0.0, 1.0).unwrap()]).unwrap()
    }

    #[test]
    fn dominates_is_irreflexive() {
        let a = obj(1.0, 1.0, 1.0, 1.0, 1.0);
        assert!(!dominates(&a, &a));
    }

    #[test]
    fn dominates_is_transitive() {
        let a = obj(1.0, 1.0, 1.0, 1.0, 1.0);
        let b = obj(2.0, 2.0, 2.0, 2.0, 2.0);
        let c = obj(3.0, 3.0, 3.0, 3.0, 3.0);
        assert!(dominates(&a, &b));
        assert!(dominates(&b, &c));
        assert!(dominates(&a, &c));
    }

    #[test]
    fn dominates_is_asymmetric() {
        let a = obj(1.0, 1.0, 1.0, 1.0, 1.0);
        let b = obj(2.0, 2.0, 2.0, 2.0, 2.0);
        assert!(dominates(&a, &b));
        assert!(!dominates(&b, &a));
    }

    #[test]
    fn crowding_distance_small_fronts_are_all_infinite() {
        let front = vec![obj(1.0, 2.0, 0.1, 3.0, 0.5), obj(2.0, 1.0, 0.2, 2.0, 0.4)];
        let d = crowding_distance(&front);
        assert!(d.iter().all(|x| x.is_infinite()));
    }

    #[test]
    fn crowding_distance_scales_invariantly() {
        let front = vec![
            obj(1.0, 1.0, 0.1, 1.0, 0.1),
            obj(2.0, 2.0, 0.2, 2.0, 0.2),
            obj(3.0, 3.0, 0.3, 3.0, 0.3),
        ];
        let scaled: Vec<InternalObjectives> = front
            .iter()
            .map(|o| obj(o.fuel_t * 10.0, o.time_h, o.risk, o.emissions_t, o.discomfort))
            .collect();
        let d1 = crowding_distance(&front);
        let d2 = crowding_distance(&scaled);
        // Middle element is the only finite one; relative contribution per
        // dimension is scale-invariant after range-normalization.
        assert!(d1[1].is_finite() && d2[1].is_finite());
        assert!((d1[1] - d2[1]).abs() < 1e-9);
    }

    #[test]
    fn archive_rejects_dominated_insertion() {
        let mut archive = ParetoArchive::new(10);
        assert!(archive.insert(route(), obj(1.0, 1.0, 0.1, 1.0, 0.1), vec![10.0]));
        assert!(!archive.insert(route(), obj(2.0, 2.0, 0.2, 2.0, 0.2), vec![10.0]));
        assert_eq!(archive.len(), 1);
    }

    #[test]
    fn archive_removes_dominated_incumbents() {
        let mut archive = ParetoArchive::new(10);
        assert!(archive.insert(route(), obj(2.0, 2.0, 0.2, 2.0, 0.2), vec![10.0]));
        assert!(archive.insert(route(), obj(1.0, 1.0, 0.1, 1.0, 0.1), vec![10.0]));
        assert_eq!(archive.len(), 1);
    }

    #[test]
    fn archive_never_exceeds_max_size() {
        let mut archive = ParetoArchive::new(3);
        for i in 0..10 {
            let f = i as f64;
            archive.insert(route(), obj(f, 10.0 - f, 0.0, f, 0.0), vec![10.0]);
        }
        assert!(archive.len() <= 3);
    }

    #[test]
    fn archive_is_always_an_antichain() {
        let mut archive = ParetoArchive::new(20);
        for i in 0..20 {
            let f = (i % 7) as f64;
            archive.insert(route(), obj(f, 20.0 - f, (i as f64) / 40.0, f, 0.0), vec![10.0]);
        }
        let entries = archive.all();
        for i in 0..entries.len() {
            for j in 0..entries.len() {
                if i != j {
                    assert!(!dominates(&entries[i].objectives, &entries[j].objectives));
                }
            }
        }
    }

    #[test]
    fn non_dominated_sort_front_zero_is_mutually_nondominated() {
        let objs = vec![
            obj(1.0, 5.0, 0.0, 1.0, 0.0),
            obj(5.0, 1.0, 0.0, 5.0, 0.0),
            obj(3.0, 3.0, 0.0, 3.0, 0.0),
            obj(10.0, 10.0, 0.0, 10.0, 0.0),
        ];
        let fronts = non_dominated_sort(&objs);
        assert!(fronts[0].contains(&0));
        assert!(fronts[0].contains(&1));
        assert!(fronts.last().unwrap().contains(&3));
    }
}
