/// Mean of the last `N` samples, kept in a ring buffer.
pub struct RollingAverage<const N: usize> {
    buffer: [f32; N],
    idx: usize,
    len: usize,
    sum: f32,
}

impl<const N: usize> Default for RollingAverage<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RollingAverage<N> {
    pub fn new() -> Self {
        Self {
            buffer: [0.0; N],
            idx: 0,
            len: 0,
            sum: 0.0,
        }
    }

    /// Push a sample, evicting the oldest once the window is full,
    /// and return the new mean.
    pub fn apply(&mut self, sample: f32) -> f32 {
        if N == 0 {
            return sample;
        }

        if self.len == N {
            self.sum -= self.buffer[self.idx];
        } else {
            self.len += 1;
        }
        self.buffer[self.idx] = sample;
        self.sum += sample;
        self.idx = (self.idx + 1) % N;

        // Resum once per wrap so rounding error from the running sum can't build up
        if self.idx == 0 {
            self.sum = self.buffer.iter().sum();
        }

        self.output()
    }

    /// Mean of the samples in the window, 0 if empty.
    pub fn output(&self) -> f32 {
        if self.len == 0 {
            0.0
        } else {
            self.sum / self.len as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RollingAverage;
    use approx::assert_abs_diff_eq;

    #[test]
    fn empty_is_zero() {
        let filter = RollingAverage::<4>::new();
        assert_eq!(filter.output(), 0.);
    }

    #[test]
    fn partial_window() {
        let mut filter = RollingAverage::<4>::new();
        filter.apply(10.);
        assert_eq!(filter.apply(20.), 15.);
    }

    #[test]
    fn evicts_oldest() {
        let mut filter = RollingAverage::<3>::new();
        for sample in [1., 2., 3., 4., 5.] {
            filter.apply(sample);
        }
        assert_abs_diff_eq!(filter.output(), 4., epsilon = 1e-6);
    }

    #[test]
    fn long_run_does_not_drift() {
        let mut filter = RollingAverage::<10>::new();
        for i in 0..100_000 {
            filter.apply(if i % 2 == 0 { 0.1 } else { 2500. });
        }
        assert_abs_diff_eq!(filter.output(), 1250.05, epsilon = 1e-2);
    }
}
