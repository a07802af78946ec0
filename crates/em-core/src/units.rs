// em-core/src/units.rs

use uom::si::f64::{Frequency as UomFrequency, Time as UomTime};

// Public canonical unit types (SI, f64)
pub type Frequency = UomFrequency;
pub type Time = UomTime;

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn hz(v: f64) -> Frequency {
    use uom::si::frequency::hertz;
    Frequency::new::<hertz>(v)
}

#[inline]
pub fn as_seconds(t: Time) -> f64 {
    use uom::si::time::second;
    t.get::<second>()
}

#[inline]
pub fn as_hertz(f: Frequency) -> f64 {
    use uom::si::frequency::hertz;
    f.get::<hertz>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        assert_eq!(as_seconds(s(20.0)), 20.0);
        assert_eq!(as_hertz(hz(1.0)), 1.0);
    }

    #[test]
    fn millisecond_constructor_converts_to_seconds() {
        use uom::si::time::millisecond;
        let dt = Time::new::<millisecond>(1.0);
        assert!((as_seconds(dt) - 1e-3).abs() < 1e-15);
    }
}
