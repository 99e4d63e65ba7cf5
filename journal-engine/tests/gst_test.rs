//! GST detector tests.

use journal_engine::defaults::reference_tax_config;
use journal_engine::models::{GstBreakup, GstRegime};
use journal_engine::services::detect_gst;
use rust_decimal_macros::dec;

#[test]
fn no_tax_keyword_means_no_gst() {
    let config = reference_tax_config();
    assert!(detect_gst("Paid electricity bill Rs 1800 in cash", dec!(1800), &config).is_none());
}

#[test]
fn inclusive_sale_splits_intra_state() {
    let config = reference_tax_config();
    let gst = detect_gst(
        "Sold goods worth Rs 11800 including GST 18% to Ramesh",
        dec!(11800),
        &config,
    )
    .unwrap();

    assert!(gst.is_inclusive);
    assert_eq!(gst.rate, dec!(18));
    assert_eq!(gst.taxable_value, dec!(10000.00));
    assert_eq!(gst.total_tax, dec!(1800.00));
    assert_eq!(gst.total_amount, dec!(11800));
    match gst.breakup {
        GstBreakup::IntraState { cgst, sgst } => {
            assert_eq!(cgst, dec!(900.00));
            assert_eq!(sgst, dec!(900.00));
        }
        GstBreakup::InterState { .. } => panic!("expected intra-state split"),
    }
}

#[test]
fn exclusive_purchase_adds_tax_on_top() {
    let config = reference_tax_config();
    let gst = detect_gst(
        "Purchased goods Rs 10000 plus GST 18% on credit",
        dec!(10000),
        &config,
    )
    .unwrap();

    assert!(!gst.is_inclusive);
    assert_eq!(gst.taxable_value, dec!(10000));
    assert_eq!(gst.total_tax, dec!(1800.00));
    assert_eq!(gst.total_amount, dec!(11800.00));
}

#[test]
fn inter_state_keyword_selects_igst() {
    let config = reference_tax_config();
    let gst = detect_gst(
        "Inter-state sale Rs 11800 including GST 18%",
        dec!(11800),
        &config,
    )
    .unwrap();

    assert_eq!(gst.regime(), GstRegime::InterState);
    match gst.breakup {
        GstBreakup::InterState { igst } => assert_eq!(igst, dec!(1800.00)),
        GstBreakup::IntraState { .. } => panic!("expected IGST"),
    }
}

#[test]
fn services_rate_applies_without_explicit_rate() {
    let mut config = reference_tax_config();
    config.services_rate = dec!(12);
    let gst = detect_gst("Paid consulting fees Rs 10000 plus GST", dec!(10000), &config).unwrap();
    assert_eq!(gst.rate, dec!(12));
}

#[test]
fn blocked_category_blocks_input_credit() {
    let config = reference_tax_config();
    let gst = detect_gst(
        "Paid restaurant bill Rs 1180 including GST 18%",
        dec!(1180),
        &config,
    )
    .unwrap();
    assert!(!gst.itc_eligible);
    assert!(gst.blocked_reason.is_some());
}

#[test]
fn composition_scheme_blocks_input_credit() {
    let mut config = reference_tax_config();
    config.composition_scheme = true;
    let gst = detect_gst(
        "Purchased goods Rs 10000 plus GST 18%",
        dec!(10000),
        &config,
    )
    .unwrap();
    assert!(!gst.itc_eligible);
}

#[test]
fn rcm_service_flags_reverse_charge_but_keeps_credit() {
    let config = reference_tax_config();
    let gst = detect_gst(
        "Paid advocate fees Rs 10000 plus GST 18%",
        dec!(10000),
        &config,
    )
    .unwrap();
    assert!(gst.reverse_charge);
    assert!(gst.itc_eligible);
}

#[test]
fn tax_round_trip_holds_within_a_paisa() {
    let config = reference_tax_config();
    let epsilon = dec!(0.01);

    for amount in [dec!(100), dec!(999.99), dec!(1234.56), dec!(11800)] {
        for rate in [5u32, 12, 18, 28] {
            let inclusive = detect_gst(
                &format!("goods sold for {} including gst {}%", amount, rate),
                amount,
                &config,
            )
            .unwrap();
            assert!(
                (inclusive.taxable_value + inclusive.total_tax - amount).abs() <= epsilon,
                "inclusive round trip failed for {} at {}%",
                amount,
                rate
            );

            let exclusive = detect_gst(
                &format!("goods bought for {} plus gst {}%", amount, rate),
                amount,
                &config,
            )
            .unwrap();
            assert!(
                (exclusive.total_amount - exclusive.total_tax - amount).abs() <= epsilon,
                "exclusive round trip failed for {} at {}%",
                amount,
                rate
            );
        }
    }
}
