//! Observation and action space descriptors.
//!
//! The adapter accepts `Box` observations and `Box` or `Discrete` actions.
//! `MultiDiscrete` and `Tuple` can still be declared by an environment; the
//! adapter rejects them with a typed error at construction.

mod r#box;

pub use r#box::{Box, UNBOUNDED_THRESHOLD};

/// A single categorical choice in `0..n`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Discrete {
    pub n: usize,
}

impl Discrete {
    pub fn new(n: usize) -> Self {
        assert!(n > 0, "Discrete space needs at least one category");
        Self { n }
    }
}

/// One categorical branch per entry of `nvec`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultiDiscrete {
    pub nvec: Vec<usize>,
}

impl MultiDiscrete {
    pub fn new(nvec: Vec<usize>) -> Self {
        assert!(nvec.iter().all(|&n| n > 0), "Every branch needs at least one category");
        Self { nvec }
    }
}

/// Ordered product of other spaces
#[derive(Clone, Debug)]
pub struct Tuple {
    pub spaces: Vec<DynSpace>,
}

impl Tuple {
    pub fn new(spaces: Vec<DynSpace>) -> Self {
        Self { spaces }
    }
}

/// Space as declared by a [`GymEnv`](crate::env::GymEnv)
#[derive(Clone, Debug)]
pub enum DynSpace {
    Discrete(Discrete),
    MultiDiscrete(MultiDiscrete),
    Box(Box),
    Tuple(Tuple),
}

impl DynSpace {
    /// Shape of one flattened element of this space
    pub fn shape(&self) -> Vec<usize> {
        match self {
            DynSpace::Discrete(_) => vec![1],
            DynSpace::MultiDiscrete(s) => vec![s.nvec.len()],
            DynSpace::Box(s) => s.shape().to_vec(),
            DynSpace::Tuple(s) => {
                let flat = s.spaces.iter().map(|inner| inner.shape().iter().product::<usize>()).sum();
                vec![flat]
            }
        }
    }

    /// Short name used in error messages and logs
    pub fn kind(&self) -> &'static str {
        match self {
            DynSpace::Discrete(_) => "Discrete",
            DynSpace::MultiDiscrete(_) => "MultiDiscrete",
            DynSpace::Box(_) => "Box",
            DynSpace::Tuple(_) => "Tuple",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(DynSpace::Discrete(Discrete::new(3)).kind(), "Discrete");
        assert_eq!(DynSpace::MultiDiscrete(MultiDiscrete::new(vec![2])).kind(), "MultiDiscrete");
        assert_eq!(DynSpace::Box(Box::unit(&[2])).kind(), "Box");
        assert_eq!(DynSpace::Tuple(Tuple::new(vec![])).kind(), "Tuple");
    }

    #[test]
    fn test_composite_shapes_are_flat() {
        assert_eq!(DynSpace::Discrete(Discrete::new(5)).shape(), vec![1]);
        assert_eq!(DynSpace::MultiDiscrete(MultiDiscrete::new(vec![2, 3, 4])).shape(), vec![3]);
        let tuple = DynSpace::Tuple(Tuple::new(vec![
            DynSpace::Discrete(Discrete::new(2)),
            DynSpace::Box(Box::unit(&[2, 3])),
        ]));
        assert_eq!(tuple.shape(), vec![7]);
    }

    #[test]
    #[should_panic]
    fn test_empty_discrete_panics() {
        Discrete::new(0);
    }
}
