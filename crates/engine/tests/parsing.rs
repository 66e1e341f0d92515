use engine::{
    Decimal, ParsedExpense, ParsedSale, SaleRule, Settings, format_compact_currency,
    format_currency, normalize, parse_expense, parse_product, parse_sale, parse_sale_with_rule,
    validate_amount, validate_phone,
};
use proptest::prelude::*;
use rust_decimal_macros::dec;

#[test]
fn normalizer_reads_both_notations() {
    assert_eq!(normalize("1,234.56"), Some(dec!(1234.56)));
    assert_eq!(normalize("1.234,56"), Some(dec!(1234.56)));
    assert_eq!(normalize("1,234"), Some(dec!(1234)));
    assert_eq!(normalize("12,5"), Some(dec!(12.5)));
    assert_eq!(normalize("-12.50"), Some(dec!(-12.50)));
    assert_eq!(normalize("abc"), None);
}

#[test]
fn sale_examples() {
    let sale = |amount: Decimal, item: &str, quantity| ParsedSale {
        amount,
        item: item.to_string(),
        quantity,
    };

    assert_eq!(parse_sale("500 bread"), Some(sale(dec!(500), "bread", 1)));
    assert_eq!(parse_sale("2x 500 bread"), Some(sale(dec!(1000), "bread", 2)));
    assert_eq!(parse_sale("500 bread 3"), Some(sale(dec!(500), "bread", 3)));
    assert_eq!(parse_sale("bread 500"), Some(sale(dec!(500), "bread", 1)));
}

#[test]
fn expense_examples() {
    let expected = Some(ParsedExpense {
        amount: dec!(500),
        category: "supplies".to_string(),
    });
    assert_eq!(parse_expense("500 supplies"), expected);
    assert_eq!(parse_expense("supplies 500"), expected);
}

#[test]
fn parser_and_normalizer_read_commas_differently() {
    assert_eq!(normalize("12,5"), Some(dec!(12.5)));
    assert_eq!(parse_sale("12,5 bread").map(|s| s.amount), Some(dec!(125)));
    assert_eq!(validate_amount("12,5"), Ok(dec!(125)));
}

#[test]
fn phone_and_compact_examples() {
    assert_eq!(
        validate_phone("08123456789", "+62"),
        Ok("+628123456789".to_string())
    );
    assert!(validate_phone("+1234567", "+62").is_err());
    assert_eq!(format_compact_currency(dec!(1500000), "Rp"), "Rp 1.5M");
    assert_eq!(format_compact_currency(dec!(999), "Rp"), "Rp 999");
}

#[test]
fn product_then_sale_flow() {
    let settings = Settings::default();
    let product = parse_product("beras premium 12,500 40").unwrap();
    assert_eq!(product.name, "beras premium");
    assert_eq!(product.stock, 40);

    let price = product.price.unwrap();
    assert_eq!(settings.format_currency(price), "Rp 12,500");

    let sale = parse_sale(&format!("3x {price} {}", product.name)).unwrap();
    assert_eq!(settings.format_compact(sale.amount), "Rp 37.5K");
}

proptest! {
    #[test]
    fn formatted_currency_normalizes_back(
        mantissa in -1_000_000_000_000i64..1_000_000_000_000i64,
        scale in 0u32..=4,
        places in 0u32..=4,
    ) {
        let value = Decimal::new(mantissa, scale);
        let rendered = format_currency(value, "Rp", places);
        let digits = rendered.strip_prefix("Rp ").unwrap();
        let parsed = normalize(digits).unwrap();

        let tolerance = Decimal::new(5, places + 1);
        prop_assert!((parsed - value).abs() <= tolerance, "{rendered} -> {parsed}");
    }

    #[test]
    fn multiplier_amount_is_exact(
        quantity in 1u32..10_000,
        unit_cents in 1i64..1_000_000_000,
    ) {
        let unit = Decimal::new(unit_cents, 2);
        let (rule, sale) = parse_sale_with_rule(&format!("{quantity}x {unit} item")).unwrap();

        prop_assert_eq!(rule, SaleRule::Multiplier);
        prop_assert_eq!(sale.quantity, quantity);
        prop_assert_eq!(sale.amount, unit * Decimal::from(quantity));
        prop_assert_eq!(sale.item, "item");
    }
}
