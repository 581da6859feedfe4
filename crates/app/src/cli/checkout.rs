//! Checkout command.

use clap::Args;
use jiff::Timestamp;
use kotsell::{
    contact::ContactInfo,
    coupons::Coupon,
    money::display_php,
    orders::PaymentMethod,
    receipt::Receipt,
};
use rust_decimal::Decimal;
use tabled::{Table, Tabled};

use crate::context::AppContext;

use super::render_error;

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// First name (required).
    #[arg(long)]
    first_name: Option<String>,

    /// Last name (required).
    #[arg(long)]
    last_name: Option<String>,

    /// House and street address (required).
    #[arg(long)]
    street: Option<String>,

    /// Barangay.
    #[arg(long)]
    barangay: Option<String>,

    /// City.
    #[arg(long)]
    city: Option<String>,

    /// Postal code.
    #[arg(long)]
    postal_code: Option<String>,

    /// Payment method: COD, GCash or Card.
    #[arg(long, default_value = "COD")]
    payment: PaymentMethod,

    /// Coupon code to redeem, together with `--coupon-amount`.
    #[arg(long, requires = "coupon_amount")]
    coupon_code: Option<String>,

    /// Peso discount of the coupon.
    #[arg(long, requires = "coupon_code")]
    coupon_amount: Option<Decimal>,
}

#[derive(Tabled)]
struct ReceiptRow {
    #[tabled(rename = "Product")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Total")]
    total: String,
}

fn print_receipt(receipt: &Receipt) {
    let rows: Vec<ReceiptRow> = receipt
        .items()
        .iter()
        .map(|item| ReceiptRow {
            name: item.name.clone(),
            price: display_php(item.price),
            quantity: item.quantity,
            total: display_php(item.line_total()),
        })
        .collect();

    println!("{}", Table::new(rows));
    println!("Subtotal:     {}", display_php(receipt.subtotal()));

    if receipt.discount() > Decimal::ZERO {
        println!("Discount:    -{}", display_php(receipt.discount()));
    }

    println!("Shipping fee: {}", display_php(receipt.shipping_fee()));
    println!("Total:        {}", display_php(receipt.total()));
}

pub(crate) async fn run(args: CheckoutArgs, ctx: &AppContext) -> Result<(), String> {
    let mut flow = ctx.begin_checkout();

    // Saved profile fields stand in for anything not given on the command
    // line, the way the checkout form was pre-filled.
    let defaults = flow.contact().clone();
    flow.set_contact(ContactInfo {
        first_name: args.first_name.unwrap_or(defaults.first_name),
        last_name: args.last_name.unwrap_or(defaults.last_name),
        house_street: args.street.unwrap_or(defaults.house_street),
        barangay: args.barangay.unwrap_or(defaults.barangay),
        city: args.city.unwrap_or(defaults.city),
        postal_code: args.postal_code.unwrap_or(defaults.postal_code),
    });
    flow.set_payment_method(args.payment);

    if let (Some(code), Some(amount)) = (args.coupon_code, args.coupon_amount) {
        let coupon = Coupon::new(code, amount).map_err(|error| render_error(&error))?;
        flow.apply_coupon(coupon).map_err(|error| render_error(&error))?;
    }

    let receipt = flow
        .submit(Timestamp::now())
        .await
        .map_err(|error| render_error(&error))?
        .clone();

    let order_number = ctx
        .transactions
        .lock()
        .map_or(0, |log| log.history().last().map_or(0, |tx| tx.order_number));

    println!("Order #{order_number} placed. Payment method: {}.", args.payment);
    println!();
    print_receipt(&receipt);

    Ok(())
}
