//! Cart commands.

use anyhow::Result;
use cartwheel_commerce::{CartError, CartSnapshot};

use super::{ItemArgs, SetArgs};
use crate::context::Context;

/// A cart operation the store refused. Already shown to the user by the
/// store's notifier.
#[derive(Debug, thiserror::Error)]
#[error("cart operation rejected: {0}")]
pub struct Rejected(pub CartError);

pub async fn add(args: ItemArgs, ctx: &Context) -> Result<()> {
    let store = ctx.cart_store()?;
    let cart = store.add(args.id).await.map_err(Rejected)?;

    ctx.output.success(&format!("Added product {}", args.id));
    print_cart(&cart, ctx);
    Ok(())
}

pub async fn remove(args: ItemArgs, ctx: &Context) -> Result<()> {
    let store = ctx.cart_store()?;
    let cart = store.remove(args.id).await.map_err(Rejected)?;

    ctx.output.success(&format!("Removed product {}", args.id));
    print_cart(&cart, ctx);
    Ok(())
}

pub async fn set(args: SetArgs, ctx: &Context) -> Result<()> {
    let store = ctx.cart_store()?;
    let cart = store
        .set_quantity(args.id, args.amount)
        .await
        .map_err(Rejected)?;

    ctx.output
        .success(&format!("Set product {} to {}", args.id, args.amount));
    print_cart(&cart, ctx);
    Ok(())
}

pub async fn show(ctx: &Context) -> Result<()> {
    let store = ctx.cart_store()?;
    print_cart(&store.cart(), ctx);
    Ok(())
}

const WIDTHS: [usize; 4] = [6, 32, 6, 10];

fn print_cart(cart: &CartSnapshot, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(cart);
        return;
    }

    ctx.output.header("Cart");
    if cart.is_empty() {
        ctx.output.info("Cart is empty");
        return;
    }

    ctx.output.table_row(&["ID", "PRODUCT", "QTY", "TOTAL"], &WIDTHS);
    for entry in cart {
        let id = entry.product_id().to_string();
        let amount = entry.amount.to_string();
        let total = money(entry.line_total());
        ctx.output.table_row(
            &[id.as_str(), entry.product.title.as_str(), amount.as_str(), total.as_str()],
            &WIDTHS,
        );
    }
    println!();
    ctx.output.kv("items", &cart.item_count().to_string());
    ctx.output.kv("subtotal", &money(cart.subtotal()));
}

fn money(value: f64) -> String {
    format!("${:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money() {
        assert_eq!(money(59.9 * 2.0), "$119.80");
        assert_eq!(money(0.0), "$0.00");
    }

    #[test]
    fn test_rejected_is_distinguishable() {
        let err: anyhow::Error = Rejected(CartError::InvalidAmount(0)).into();
        assert!(err.is::<Rejected>());
        assert!(err.to_string().contains("rejected"));
    }
}
