//! Side channel for per-iteration costs.

/// Receives the cost sequence of one run, in emission order.
///
/// The runner calls [`record`](CostSink::record) once per inner iteration
/// with the neighbour's cost, and once per temperature level with the
/// current cost. Implementations must not block for long; buffering is
/// expected.
pub trait CostSink {
    fn record(&mut self, cost: f64);
}

/// Discards every value.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl CostSink for NullSink {
    fn record(&mut self, _cost: f64) {}
}

impl CostSink for Vec<f64> {
    fn record(&mut self, cost: f64) {
        self.push(cost);
    }
}

impl<S: CostSink + ?Sized> CostSink for &mut S {
    fn record(&mut self, cost: f64) {
        (**self).record(cost);
    }
}
