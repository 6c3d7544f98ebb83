/// Evenly spaced samples `start + step * i` for `i` in `0..len`.
#[derive(Clone, Debug)]
pub struct Linspace {
    start: f64,
    step: f64,
    index: usize,
    len: usize,
}

impl Linspace {
    /// Samples `[min, max)` every `step`, `floor((max - min) / step)` samples in total.
    pub fn stepped(min: f64, max: f64, step: f64) -> Self {
        let span = (max - min) / step;
        // Non-finite or negative spans produce no samples
        let len = if span.is_finite() && span > 0. {
            span.floor() as usize
        } else {
            0
        };

        Linspace {
            start: min,
            step,
            index: 0,
            len,
        }
    }
}

impl Iterator for Linspace {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        if self.index >= self.len {
            None
        } else {
            let i = self.index;
            self.index += 1;
            Some(self.start + self.step * i as f64)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Linspace {}

#[test]
fn test_stepped() {
    let samples: Vec<_> = Linspace::stepped(0., 1., 0.25).collect();

    assert_eq!(samples, vec![0., 0.25, 0.5, 0.75]);
    assert_eq!(Linspace::stepped(0., 100., 0.01).len(), 10_000);
    assert_eq!(Linspace::stepped(3., 3., 0.01).len(), 0);
    assert_eq!(Linspace::stepped(0., f64::INFINITY, 0.01).len(), 0);
}
