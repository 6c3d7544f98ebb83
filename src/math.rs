use crate::set::Point;

/// Similar to numpy.interp for a single `x`: linear between the knots,
/// flat before the first and after the last one.
///
/// `knots` must be non-empty and strictly increasing in `x`.
pub(crate) fn interp(knots: &[Point], x: f64) -> f64 {
    let i = knots.partition_point(|p| p.x <= x);

    // Base cases
    if i == 0 {
        return knots[0].degree;
    }
    if i == knots.len() {
        return knots[i - 1].degree;
    }

    let (p1, p2) = (knots[i - 1], knots[i]);

    p1.degree + (x - p1.x) * (p2.degree - p1.degree) / (p2.x - p1.x)
}

/// Pointwise combination of two piecewise-linear functions, exact as long as
/// `op` picks one of its operands (min, max).
///
/// Every breakpoint of either operand is kept and a knot is inserted wherever
/// the operands cross between two breakpoints, so the result is again
/// piecewise-linear.
pub(crate) fn combine(a: &[Point], b: &[Point], op: impl Fn(f64, f64) -> f64) -> Vec<Point> {
    let mut xs: Vec<f64> = a.iter().chain(b).map(|p| p.x).collect();

    xs.sort_unstable_by(f64::total_cmp);
    xs.dedup();

    let mut out = Vec::with_capacity(xs.len() * 2);
    let mut prev: Option<(f64, f64)> = None;

    for x in xs {
        let (u, v) = (interp(a, x), interp(b, x));
        let diff = u - v;

        if let Some((px, pdiff)) = prev {
            if (pdiff < 0. && diff > 0.) || (pdiff > 0. && diff < 0.) {
                let cx = px + (x - px) * pdiff / (pdiff - diff);

                // Rounding may land the crossing on a neighbour
                if px < cx && cx < x {
                    out.push(Point::new(cx, op(interp(a, cx), interp(b, cx))));
                }
            }
        }

        out.push(Point::new(x, op(u, v)));
        prev = Some((x, diff));
    }

    simplify(out)
}

/// Drops knots lying on the segment between their neighbours.
pub(crate) fn simplify(knots: Vec<Point>) -> Vec<Point> {
    const EPS: f64 = 1e-12;

    if knots.len() < 3 {
        return knots;
    }

    let mut out: Vec<Point> = Vec::with_capacity(knots.len());

    for (i, knot) in knots.iter().enumerate() {
        let Some(next) = knots.get(i + 1) else {
            out.push(*knot);
            break;
        };
        let Some(last) = out.last() else {
            out.push(*knot);
            continue;
        };
        let expected = last.degree + (knot.x - last.x) * (next.degree - last.degree) / (next.x - last.x);

        if (expected - knot.degree).abs() > EPS {
            out.push(*knot);
        }
    }

    out
}

#[cfg(test)]
fn knots(coords: &[(f64, f64)]) -> Vec<Point> {
    coords.iter().copied().map(Point::from).collect()
}

#[test]
fn test_interp() {
    let xs = knots(&[(1., 3.), (2., 2.), (3., 0.)]);
    let y: Vec<_> = [0., 1., 1.5, 2.72, 3.24].iter().map(|x| interp(&xs, *x)).collect();

    assert_eq!(y, vec![3., 3., 2.5, 0.5599999999999996, 0.]);

    let xs = knots(&[(0., 0.), (1., 2.), (2., 5.), (3., 3.), (4.5, 2.)]);
    let y: Vec<_> = [2.5, -1., 7.5].iter().map(|x| interp(&xs, *x)).collect();

    assert_eq!(y, vec![4., 0., 2.]);
    assert_eq!(interp(&knots(&[(5., 0.7)]), -3.), 0.7);
}

#[test]
fn test_combine_inserts_crossings() {
    let rising = knots(&[(0., 0.), (10., 1.)]);
    let falling = knots(&[(0., 1.), (10., 0.)]);
    let min = combine(&rising, &falling, f64::min);

    assert_eq!(min, knots(&[(0., 0.), (5., 0.5), (10., 0.)]));

    let max = combine(&rising, &falling, f64::max);

    assert_eq!(max, knots(&[(0., 1.), (5., 0.5), (10., 1.)]));
}

#[test]
fn test_simplify_collinear() {
    let line = knots(&[(0., 0.), (1., 0.1), (2., 0.2), (4., 0.2), (5., 0.2)]);

    assert_eq!(simplify(line), knots(&[(0., 0.), (2., 0.2), (5., 0.2)]));
}
