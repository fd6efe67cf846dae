use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use timeline_atlas::core::{TimeDomain, TimeScale, ViewTransform};

fn historical_domain() -> TimeDomain {
    TimeDomain::historical(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()).expect("domain")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn invert_recovers_dates_within_a_millisecond(
        width in 320u32..4000u32,
        ratio in 0.0f64..=1.0,
    ) {
        let domain = historical_domain();
        let scale = TimeScale::new(domain, 0.0, f64::from(width)).expect("scale");
        let millis = (domain.min_millis() + ratio * domain.span_millis()).round();

        let px = scale.scale_millis(millis).expect("to pixel");
        let recovered = scale.invert(px).expect("from pixel");
        prop_assert!((recovered - millis).abs() < 1.0, "drift {}", recovered - millis);
    }

    #[test]
    fn constrain_is_idempotent_and_stays_in_domain(
        width in 320u32..4000u32,
        zoom_exponent in 0.0f64..6.0,
        translate_ratio in -1.5f64..1.5,
    ) {
        let domain = historical_domain();
        let width = f64::from(width);
        let base = TimeScale::new(domain, 0.0, width).expect("scale");
        let scale_k = 10f64.powf(zoom_exponent);
        let candidate = ViewTransform::new(translate_ratio * scale_k * width, scale_k)
            .expect("transform");

        let once = candidate.constrain(domain, base, width).expect("constrain");
        let twice = once.constrain(domain, base, width).expect("constrain again");
        prop_assert_eq!(once, twice);
        prop_assert_eq!(once.scale_k, scale_k);

        let start = once.date_millis_at(base, 0.0).expect("start");
        let end = once.date_millis_at(base, width).expect("end");
        prop_assert!(start >= domain.min_millis() - 1.0);
        prop_assert!(end <= domain.max_millis() + 1.0);
    }
}
