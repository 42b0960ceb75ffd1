//! CART decision tree with Gini impurity, used as the forest's base learner.

use std::cmp::Ordering;

use ndarray::{Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::seq::index;
use serde::{Deserialize, Serialize};

/// Number of candidate features examined at each split.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxFeatures {
    /// `sqrt(n_features)`
    #[default]
    Sqrt,
    /// `log2(n_features)`
    Log2,
    /// Every feature.
    All,
    /// A fixed number of features, capped at `n_features`.
    Count(usize),
}

impl MaxFeatures {
    /// Resolves to a count in `1..=n_features` (0 only when there are no features).
    pub fn resolve(self, n_features: usize) -> usize {
        if n_features == 0 {
            return 0;
        }
        let k = match self {
            MaxFeatures::Sqrt => (n_features as f64).sqrt() as usize,
            MaxFeatures::Log2 => (n_features as f64).log2() as usize,
            MaxFeatures::All => n_features,
            MaxFeatures::Count(k) => k,
        };
        k.clamp(1, n_features)
    }
}

/// Growth limits for a single tree.
#[derive(Clone, Copy, Debug)]
pub(crate) struct TreeParams {
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    pub max_features: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
enum Node {
    Leaf {
        distribution: Vec<f64>,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Clone, Copy, Debug)]
struct Split {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

/// Fitted tree stored as a flat node arena; node 0 is the root.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct DecisionTree {
    nodes: Vec<Node>,
    n_classes: usize,
}

struct Grower<'a> {
    x: &'a Array2<f64>,
    y: &'a [usize],
    n_classes: usize,
    params: TreeParams,
    rng: &'a mut StdRng,
    nodes: Vec<Node>,
}

impl DecisionTree {
    /// Grows a tree on the rows listed in `samples` (duplicates act as weights).
    pub fn fit(
        x: &Array2<f64>,
        y: &[usize],
        n_classes: usize,
        samples: &[usize],
        params: TreeParams,
        rng: &mut StdRng,
    ) -> Self {
        let mut grower = Grower {
            x,
            y,
            n_classes,
            params,
            rng,
            nodes: Vec::new(),
        };
        let mut indices = samples.to_vec();
        grower.grow(&mut indices, 0);
        Self {
            nodes: grower.nodes,
            n_classes,
        }
    }

    /// Class distribution of the leaf reached by `row`.
    pub fn predict_proba(&self, row: ArrayView1<'_, f64>) -> &[f64] {
        let mut current = 0;
        loop {
            match &self.nodes[current] {
                Node::Leaf { distribution } => return distribution,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    current = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    #[cfg(test)]
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    #[cfg(test)]
    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], idx: usize) -> usize {
            match &nodes[idx] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(nodes, *left).max(walk(nodes, *right)),
            }
        }
        if self.nodes.is_empty() {
            0
        } else {
            walk(&self.nodes, 0)
        }
    }
}

impl Grower<'_> {
    fn grow(&mut self, indices: &mut [usize], depth: usize) -> usize {
        let counts = class_counts(self.y, indices, self.n_classes);
        let n = indices.len();

        let pure = counts.iter().filter(|&&c| c > 0).count() <= 1;
        let too_deep = self.params.max_depth.is_some_and(|max| depth >= max);
        if pure || too_deep || n < self.params.min_samples_split {
            return self.push_leaf(&counts, n);
        }

        let Some(split) = self.best_split(indices) else {
            return self.push_leaf(&counts, n);
        };

        let x = self.x;
        let mid = partition_in_place(indices, |i| x[[i, split.feature]] <= split.threshold);
        let node = self.nodes.len();
        self.nodes.push(Node::Leaf {
            distribution: Vec::new(),
        });

        let (left_idx, right_idx) = indices.split_at_mut(mid);
        let left = self.grow(left_idx, depth + 1);
        let right = self.grow(right_idx, depth + 1);
        self.nodes[node] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        node
    }

    fn push_leaf(&mut self, counts: &[usize], n: usize) -> usize {
        let distribution = counts
            .iter()
            .map(|&c| if n == 0 { 0.0 } else { c as f64 / n as f64 })
            .collect();
        self.nodes.push(Node::Leaf { distribution });
        self.nodes.len() - 1
    }

    /// Scans features in random order until `max_features` of them admit a
    /// split and a best split exists, or every feature has been tried.
    fn best_split(&mut self, indices: &[usize]) -> Option<Split> {
        let n_features = self.x.ncols();
        let order = index::sample(&mut *self.rng, n_features, n_features);
        let min_leaf = self.params.min_samples_leaf;
        let n = indices.len();

        let mut best: Option<Split> = None;
        let mut informative = 0;
        let mut pairs: Vec<(f64, usize)> = Vec::with_capacity(n);
        for feature in order.iter() {
            if informative >= self.params.max_features && best.is_some() {
                break;
            }
            pairs.clear();
            pairs.extend(indices.iter().map(|&i| (self.x[[i, feature]], self.y[i])));
            pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut left = vec![0usize; self.n_classes];
            let mut right = vec![0usize; self.n_classes];
            for &(_, class) in &pairs {
                right[class] += 1;
            }

            let mut separable = false;
            for k in 0..n - 1 {
                let class = pairs[k].1;
                left[class] += 1;
                right[class] -= 1;

                let (lo, hi) = (pairs[k].0, pairs[k + 1].0);
                // Skips equal values and any NaN.
                if lo.partial_cmp(&hi) != Some(Ordering::Less) {
                    continue;
                }
                separable = true;

                let n_left = k + 1;
                let n_right = n - n_left;
                if n_left < min_leaf || n_right < min_leaf {
                    continue;
                }

                let impurity = (n_left as f64 * gini(&left, n_left)
                    + n_right as f64 * gini(&right, n_right))
                    / n as f64;
                if best.map_or(true, |b| impurity < b.impurity) {
                    let mid = lo + (hi - lo) / 2.0;
                    // Adjacent floats can round the midpoint up to `hi`.
                    let threshold = if mid < hi { mid } else { lo };
                    best = Some(Split {
                        feature,
                        threshold,
                        impurity,
                    });
                }
            }
            if separable {
                informative += 1;
            }
        }
        best
    }
}

fn class_counts(y: &[usize], indices: &[usize], n_classes: usize) -> Vec<usize> {
    let mut counts = vec![0; n_classes];
    for &i in indices {
        counts[y[i]] += 1;
    }
    counts
}

fn gini(counts: &[usize], n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / n;
            p * p
        })
        .sum::<f64>()
}

/// Moves every index satisfying `goes_left` to the front; returns their count.
fn partition_in_place(indices: &mut [usize], goes_left: impl Fn(usize) -> bool) -> usize {
    let mut mid = 0;
    for k in 0..indices.len() {
        if goes_left(indices[k]) {
            indices.swap(mid, k);
            mid += 1;
        }
    }
    mid
}
