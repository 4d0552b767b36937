//! Box (continuous) observation/action space

use ndarray::{ArrayD, IxDyn, Zip};

/// Ratio entries above this magnitude are treated as unbounded and left at 1.
pub const UNBOUNDED_THRESHOLD: f32 = 1e38;

/// Box space for continuous values with bounds
#[derive(Clone, Debug)]
pub struct Box {
    /// Lower bound for each element
    pub low: ArrayD<f32>,
    /// Upper bound for each element
    pub high: ArrayD<f32>,
    /// Shape of the space
    shape: Vec<usize>,
}

impl Box {
    /// Create a new box space with given bounds
    pub fn new(low: ArrayD<f32>, high: ArrayD<f32>) -> Self {
        assert_eq!(low.shape(), high.shape(), "Low and high must have same shape");
        let shape = low.shape().to_vec();
        Self { low, high, shape }
    }

    /// Create a box space with uniform bounds
    pub fn uniform(shape: &[usize], low: f32, high: f32) -> Self {
        let low_arr = ArrayD::from_elem(IxDyn(shape), low);
        let high_arr = ArrayD::from_elem(IxDyn(shape), high);
        Self::new(low_arr, high_arr)
    }

    /// Create a box space from -inf to +inf (unbounded)
    pub fn unbounded(shape: &[usize]) -> Self {
        Self::uniform(shape, f32::NEG_INFINITY, f32::INFINITY)
    }

    /// Create a unit box [0, 1] for all elements
    pub fn unit(shape: &[usize]) -> Self {
        Self::uniform(shape, 0.0, 1.0)
    }

    /// Create a symmetric box [-1, 1] for all elements
    pub fn symmetric(shape: &[usize]) -> Self {
        Self::uniform(shape, -1.0, 1.0)
    }

    /// Shape of one element of the space
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Per-element scale factor mapping the native range onto [-1, 1].
    ///
    /// Each entry is `max(high, -low)`, so asymmetric bounds share one factor.
    /// Entries above [`UNBOUNDED_THRESHOLD`] (including infinities) become 1.
    pub fn scale_ratio(&self) -> ArrayD<f32> {
        Zip::from(&self.high)
            .and(&self.low)
            .map_collect(|&h, &l| {
                let ratio = h.max(-l);
                if ratio > UNBOUNDED_THRESHOLD {
                    1.0
                } else {
                    ratio
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_share_shape() {
        let space = Box::uniform(&[3, 4], -1.0, 1.0);
        assert_eq!(space.shape(), &[3, 4]);
        assert_eq!(space.low.shape(), space.high.shape());
        assert!(Box::unbounded(&[2]).high.iter().all(|h| h.is_infinite()));
        assert!(Box::symmetric(&[2]).low.iter().all(|&l| l == -1.0));
    }

    #[test]
    fn test_scale_ratio_asymmetric_bounds() {
        let space = Box::new(
            ArrayD::from_shape_vec(IxDyn(&[3]), vec![-2.0, 0.0, -5.0]).unwrap(),
            ArrayD::from_shape_vec(IxDyn(&[3]), vec![2.0, 10.0, 1.0]).unwrap(),
        );
        let ratio = space.scale_ratio();
        assert_eq!(ratio.as_slice().unwrap(), &[2.0, 10.0, 5.0]);
    }

    #[test]
    fn test_scale_ratio_clamps_unbounded() {
        let space = Box::new(
            ArrayD::from_shape_vec(IxDyn(&[3]), vec![f32::NEG_INFINITY, -f32::MAX, -3.0]).unwrap(),
            ArrayD::from_shape_vec(IxDyn(&[3]), vec![f32::INFINITY, f32::MAX, 3.0]).unwrap(),
        );
        let ratio = space.scale_ratio();
        assert_eq!(ratio.as_slice().unwrap(), &[1.0, 1.0, 3.0]);
    }
}
