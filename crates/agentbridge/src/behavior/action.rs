//! Batched actions submitted by a training harness.

use ndarray::{Array, ArrayD, Dimension};

/// Action array of any of the element types a harness may produce.
///
/// The environment converts to the element type its behavior expects
/// (`f32` for continuous, `i32` for discrete) without failing.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionBuffer {
    Float32(ArrayD<f32>),
    Float64(ArrayD<f64>),
    Int32(ArrayD<i32>),
    Int64(ArrayD<i64>),
}

impl ActionBuffer {
    pub fn shape(&self) -> &[usize] {
        match self {
            ActionBuffer::Float32(a) => a.shape(),
            ActionBuffer::Float64(a) => a.shape(),
            ActionBuffer::Int32(a) => a.shape(),
            ActionBuffer::Int64(a) => a.shape(),
        }
    }

    pub fn dtype(&self) -> &'static str {
        match self {
            ActionBuffer::Float32(_) => "f32",
            ActionBuffer::Float64(_) => "f64",
            ActionBuffer::Int32(_) => "i32",
            ActionBuffer::Int64(_) => "i64",
        }
    }

    /// Convert to `f32`, rounding wide types to the nearest representable value
    pub fn into_f32(self) -> ArrayD<f32> {
        match self {
            ActionBuffer::Float32(a) => a,
            ActionBuffer::Float64(a) => a.mapv(|v| v as f32),
            ActionBuffer::Int32(a) => a.mapv(|v| v as f32),
            ActionBuffer::Int64(a) => a.mapv(|v| v as f32),
        }
    }

    /// Convert to `i32`. Floats truncate toward zero; out of range values saturate.
    pub fn into_i32(self) -> ArrayD<i32> {
        match self {
            ActionBuffer::Float32(a) => a.mapv(|v| v as i32),
            ActionBuffer::Float64(a) => a.mapv(|v| v as i32),
            ActionBuffer::Int32(a) => a,
            ActionBuffer::Int64(a) => a.mapv(|v| v.clamp(i32::MIN as i64, i32::MAX as i64) as i32),
        }
    }
}

impl<D: Dimension> From<Array<f32, D>> for ActionBuffer {
    fn from(a: Array<f32, D>) -> Self {
        ActionBuffer::Float32(a.into_dyn())
    }
}

impl<D: Dimension> From<Array<f64, D>> for ActionBuffer {
    fn from(a: Array<f64, D>) -> Self {
        ActionBuffer::Float64(a.into_dyn())
    }
}

impl<D: Dimension> From<Array<i32, D>> for ActionBuffer {
    fn from(a: Array<i32, D>) -> Self {
        ActionBuffer::Int32(a.into_dyn())
    }
}

impl<D: Dimension> From<Array<i64, D>> for ActionBuffer {
    fn from(a: Array<i64, D>) -> Self {
        ActionBuffer::Int64(a.into_dyn())
    }
}
