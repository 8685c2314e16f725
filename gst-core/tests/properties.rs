//! Property-based tests for invoice totals and amount in words.

use gst_core::{GstConfig, InvoiceCalculator, LineItem, amount_in_words};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Quantities from 0 to 1,000 with up to three decimals.
fn quantity() -> impl Strategy<Value = Decimal> {
    (0i64..=1_000_000i64).prop_map(|milli| Decimal::new(milli, 3))
}

/// Rates from 0.00 to 100,000.00.
fn rate() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000_000i64).prop_map(|paise| Decimal::new(paise, 2))
}

fn line_items() -> impl Strategy<Value = Vec<LineItem>> {
    prop::collection::vec(
        (quantity(), rate()).prop_map(|(q, r)| LineItem::new(q, r)),
        0..20,
    )
}

fn calculator() -> InvoiceCalculator {
    InvoiceCalculator::new(GstConfig::default())
}

const SCALE_WORDS: [&str; 4] = ["thousand", "million", "billion", "trillion"];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn subtotal_ignores_item_order(items in line_items()) {
        let mut reversed = items.clone();
        reversed.reverse();

        let forward = calculator().calculate(&items);
        let backward = calculator().calculate(&reversed);

        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn subtotal_is_sum_of_amounts(items in line_items()) {
        let expected: Decimal = items.iter().map(|item| item.quantity * item.rate).sum();

        prop_assert_eq!(calculator().calculate(&items).subtotal, expected);
    }

    #[test]
    fn grand_total_is_whole_rupees(items in line_items()) {
        let totals = calculator().calculate(&items);

        prop_assert!(totals.grand_total.fract().is_zero());
        prop_assert!(totals.rounding_adjustment.abs() < Decimal::ONE);
        prop_assert_eq!(
            totals.grand_total,
            totals.total_before_round_off() + totals.rounding_adjustment
        );
    }

    #[test]
    fn central_and_state_tax_are_equal(items in line_items()) {
        let totals = calculator().calculate(&items);

        prop_assert_eq!(totals.central_tax, totals.state_tax);
    }

    #[test]
    fn calculation_is_idempotent(items in line_items()) {
        let first = calculator().calculate(&items);
        let second = calculator().calculate(&items);

        // Compare scale as well as value.
        prop_assert_eq!(first.grand_total.serialize(), second.grand_total.serialize());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn words_have_clean_spacing_and_single_scales(n in 1u32..=999_999u32) {
        let text = amount_in_words(Decimal::from(n)).unwrap();

        prop_assert_eq!(text.trim(), text.as_str());
        prop_assert!(!text.contains("  "), "double space in {:?}", text);
        prop_assert!(text.ends_with(" rupees only"));
        prop_assert!(text.chars().next().is_some_and(char::is_uppercase));

        for scale in SCALE_WORDS {
            prop_assert!(text.matches(scale).count() <= 1, "{} repeated in {:?}", scale, text);
        }
        let words: Vec<&str> = text.split(' ').collect();
        for pair in words.windows(2) {
            prop_assert_ne!(pair[0], pair[1], "doubled word in {:?}", text);
        }
    }

    #[test]
    fn words_are_deterministic(paise in 0i64..=1_000_000_000i64) {
        let amount = Decimal::new(paise, 2);

        prop_assert_eq!(amount_in_words(amount), amount_in_words(amount));
    }
}
