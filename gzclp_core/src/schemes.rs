//! Fixed rep-scheme and rest-time tables for each tier.
//!
//! These tables are the program configuration of GZCLP itself and never
//! change at runtime: each tier has an ordered cycle of rep schemes that a
//! lift moves through on failure (T1 and T2 have three stages, T3 has one).

use crate::Tier;

/// Target for a single set within a rep scheme
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SetTarget {
    pub reps: u32,
    /// Last set of some schemes is AMRAP: no fixed upper rep target
    pub amrap: bool,
}

const fn fixed(reps: u32) -> SetTarget {
    SetTarget { reps, amrap: false }
}

const fn amrap(reps: u32) -> SetTarget {
    SetTarget { reps, amrap: true }
}

/// An ordered sequence of set targets for one stage of a tier's cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RepScheme {
    pub sets: &'static [SetTarget],
}

impl RepScheme {
    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }

    /// The last set, which determines the displayed reps-per-set and whether
    /// the scheme carries the AMRAP marker (eg. "5 x 3+").
    pub fn last_set(&self) -> SetTarget {
        self.sets[self.sets.len() - 1]
    }
}

/// T1 cycle: 5x3+, 6x2+, 10x1+
pub const T1_SCHEMES: &[RepScheme] = &[
    RepScheme {
        sets: &[fixed(3), fixed(3), fixed(3), fixed(3), amrap(3)],
    },
    RepScheme {
        sets: &[fixed(2), fixed(2), fixed(2), fixed(2), fixed(2), amrap(2)],
    },
    RepScheme {
        sets: &[
            fixed(1),
            fixed(1),
            fixed(1),
            fixed(1),
            fixed(1),
            fixed(1),
            fixed(1),
            fixed(1),
            fixed(1),
            amrap(1),
        ],
    },
];

/// T2 cycle: 3x10, 3x8, 3x6
pub const T2_SCHEMES: &[RepScheme] = &[
    RepScheme {
        sets: &[fixed(10), fixed(10), fixed(10)],
    },
    RepScheme {
        sets: &[fixed(8), fixed(8), fixed(8)],
    },
    RepScheme {
        sets: &[fixed(6), fixed(6), fixed(6)],
    },
];

/// T3 has a single stage: 15, 15, 25
pub const T3_SCHEMES: &[RepScheme] = &[RepScheme {
    sets: &[fixed(15), fixed(15), fixed(25)],
}];

/// Suggested rest between sets, in minutes, as a (min, max) range
pub const REST_MINUTES: [(Tier, u32, u32); 3] =
    [(Tier::T1, 3, 5), (Tier::T2, 2, 3), (Tier::T3, 1, 2)];

/// Weight increments selectable when editing a lift
pub const INCREMENTS: &[f64] = &[0.5, 1.0, 2.5, 5.0, 10.0];

impl Tier {
    /// The ordered rep-scheme cycle for this tier
    pub fn rep_schemes(self) -> &'static [RepScheme] {
        match self {
            Tier::T1 => T1_SCHEMES,
            Tier::T2 => T2_SCHEMES,
            Tier::T3 => T3_SCHEMES,
        }
    }

    pub fn num_rep_schemes(self) -> usize {
        self.rep_schemes().len()
    }

    /// Suggested rest range for display, eg. "3-5"
    pub fn rest_minutes(self) -> String {
        let (_, lo, hi) = REST_MINUTES
            .iter()
            .copied()
            .find(|(t, _, _)| *t == self)
            .unwrap_or((self, 0, 0));
        format!("{}-{}", lo, hi)
    }
}

/// Round a weight down to a loadable multiple of `step`
///
/// `floor(x / step) * step`. Used when deloading so that the resulting weight
/// never requires plates smaller than the configured smallest increment.
pub fn round_down_to_increment(weight: f64, step: f64) -> f64 {
    (weight / step).floor() * step
}
