//! Placement of an active box inside an allocated box, one axis at a time.

use crate::types::Align;

/// Place a box of `size` inside the span `lo..hi`.
///
/// `Fill`, or a span too small to hold `size`, yields the whole span.
/// Otherwise the result is exactly `size` long and positioned by `align`.
pub fn calc_axis(lo: f32, hi: f32, size: f32, align: Align) -> (f32, f32) {
    let extra = (hi - lo) - size;
    if align == Align::Fill || extra <= 0.0 {
        return (lo, hi);
    }
    match align {
        Align::Start => (lo, lo + size),
        Align::Center => {
            let m = lo + extra / 2.0;
            (m, m + size)
        }
        Align::End => (hi - size, hi),
        Align::Fill => (lo, hi),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fill_takes_span() {
        assert_eq!(calc_axis(10.0, 110.0, 20.0, Align::Fill), (10.0, 110.0));
    }

    #[test]
    fn test_start_center_end() {
        assert_eq!(calc_axis(0.0, 100.0, 20.0, Align::Start), (0.0, 20.0));
        assert_eq!(calc_axis(0.0, 100.0, 20.0, Align::Center), (40.0, 60.0));
        assert_eq!(calc_axis(0.0, 100.0, 20.0, Align::End), (80.0, 100.0));
    }

    #[test]
    fn test_overflow_clamps_to_span() {
        assert_eq!(calc_axis(0.0, 100.0, 150.0, Align::Center), (0.0, 100.0));
        assert_eq!(calc_axis(0.0, 100.0, 100.0, Align::End), (0.0, 100.0));
    }

    fn aligned() -> impl Strategy<Value = Align> {
        prop_oneof![Just(Align::Start), Just(Align::Center), Just(Align::End)]
    }

    proptest! {
        #[test]
        fn prop_fitting_box_has_exact_size(
            lo in -1000i32..1000,
            span in 1i32..1000,
            frac in 0.0f64..=1.0,
            align in aligned(),
        ) {
            let lo = lo as f32;
            let hi = lo + span as f32;
            let size = (span as f64 * frac).floor() as f32;
            let (a, b) = calc_axis(lo, hi, size, align);
            if size < span as f32 {
                prop_assert_eq!(b - a, size);
            } else {
                prop_assert_eq!((a, b), (lo, hi));
            }
            prop_assert!(lo <= a && a <= b && b <= hi);
        }

        #[test]
        fn prop_fill_or_overflow_is_whole_span(
            lo in -1000i32..1000,
            span in 1i32..1000,
            over in 0i32..1000,
            align in prop_oneof![Just(Align::Start), Just(Align::Center), Just(Align::End), Just(Align::Fill)],
        ) {
            let lo = lo as f32;
            let hi = lo + span as f32;
            let size = (span + over) as f32;
            prop_assert_eq!(calc_axis(lo, hi, size, align), (lo, hi));
            prop_assert_eq!(calc_axis(lo, hi, 0.0, Align::Fill), (lo, hi));
        }
    }
}
